use std::fs;
use std::path::PathBuf;
use tile_search::loader::{load_card, load_cards, load_stage};
use tile_search::render::render;
use tile_search::{FillEval, LoadError, Point, Solver};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tile_search_{name}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn loads_cards_sorted_by_file_name() {
    let dir = scratch_dir("cards");
    fs::write(dir.join("2.txt"), "xx\n").unwrap();
    fs::write(dir.join("10.txt"), "x\nxo\n").unwrap();
    fs::write(dir.join("notes.md"), "ignored").unwrap();

    let cards = load_cards(&dir).unwrap();
    let numbers: Vec<u32> = cards.iter().map(|c| c.number).collect();
    assert_eq!(numbers, vec![10, 2]);
    assert_eq!(cards[0].cell_count(), 3);
    assert!(cards[0].base_pattern().get(Point::new(1, 1)).unwrap().special);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn load_errors_fail_fast() {
    let dir = scratch_dir("errors");
    fs::write(dir.join("blank.txt"), "x\n").unwrap();
    fs::write(dir.join("3.txt"), "\n\n").unwrap();
    fs::write(dir.join("4.txt"), "___\n").unwrap();

    assert!(matches!(
        load_card(dir.join("blank.txt")),
        Err(LoadError::BadIdentifier { .. })
    ));
    assert!(matches!(load_card(dir.join("3.txt")), Err(LoadError::Empty { .. })));
    assert!(matches!(load_card(dir.join("4.txt")), Err(LoadError::NoMarkers { .. })));
    assert!(matches!(load_card(dir.join("5.txt")), Err(LoadError::Io { .. })));
    assert!(load_cards(&dir).is_err());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn loaded_stage_round_trip_through_solver() {
    let dir = scratch_dir("stage");
    fs::write(dir.join("1.txt"), "______\n__xx__\n______\n").unwrap();
    let cards_dir = dir.join("cards");
    fs::create_dir_all(&cards_dir).unwrap();
    fs::write(cards_dir.join("1.txt"), "xxx\n").unwrap();
    fs::write(cards_dir.join("2.txt"), "x_\nxx\n").unwrap();

    let stage = load_stage(dir.join("1.txt")).unwrap();
    assert_eq!((stage.width(), stage.height()), (6, 3));
    assert_eq!(stage.occupied_count(), 2);

    let cards = load_cards(&cards_dir).unwrap();
    let result = Solver::new(Box::new(FillEval)).search_combo(&stage, 2, &cards);
    assert_eq!(result.score, 8.0);

    let drawing = render(&result.best, false);
    assert_eq!(drawing.lines().count(), 3);
    assert_eq!(drawing.matches('0').count(), 8);

    fs::remove_dir_all(&dir).unwrap();
}
