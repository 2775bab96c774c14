use crate::card::Card;
use crate::config::{CARD_NAME, DEFAULT_SPECIAL_COST, STAGE_NAME};
use crate::error::LoadError;
use crate::geometry::{Cell, Pattern, Point};
use crate::stage::Stage;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

struct Grid {
    pattern: Pattern,
    width: i32,
    height: i32,
}

// One line per row. 'x' is a normal cell, 'o' a special cell when
// `allow_special` is set; every other character is empty.
fn parse_grid(path: &Path, text: &str, allow_special: bool) -> Result<Grid, LoadError> {
    let lines: Vec<&str> = text.lines().collect();
    let width = lines
        .iter()
        .map(|line| line.trim_end().chars().count())
        .max()
        .unwrap_or(0);
    if width == 0 {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    let mut pattern = Pattern::new();
    for (y, line) in lines.iter().enumerate() {
        for (x, c) in line.chars().enumerate() {
            let point = Point::new(x as i32, y as i32);
            match c {
                'x' => {
                    pattern.add(Cell::new(point, false));
                }
                'o' if allow_special => {
                    pattern.add(Cell::new(point, true));
                }
                _ => {}
            }
        }
    }

    Ok(Grid {
        pattern,
        width: width as i32,
        height: lines.len() as i32,
    })
}

fn number_from_stem(path: &Path) -> Result<u32, LoadError> {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    stem.parse::<u32>().map_err(|_| LoadError::BadIdentifier {
        path: path.to_path_buf(),
        stem,
    })
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Builds a card from its text grid. Ink cost is the cell count.
pub fn parse_card(path: &Path, number: u32, text: &str) -> Result<Card, LoadError> {
    let grid = parse_grid(path, text, true)?;
    if grid.pattern.is_empty() {
        return Err(LoadError::NoMarkers {
            path: path.to_path_buf(),
        });
    }
    let ink_cost = grid.pattern.len() as u32;
    Ok(Card::new(
        number,
        CARD_NAME,
        &grid.pattern,
        ink_cost,
        DEFAULT_SPECIAL_COST,
    ))
}

/// Builds a fixed-size stage. A grid without marks is a valid empty board.
pub fn parse_stage(path: &Path, number: u32, text: &str) -> Result<Stage, LoadError> {
    let grid = parse_grid(path, text, false)?;
    Ok(Stage::new(
        number,
        STAGE_NAME,
        grid.pattern,
        grid.width,
        grid.height,
    ))
}

pub fn load_card(path: impl AsRef<Path>) -> Result<Card, LoadError> {
    let path = path.as_ref();
    let number = number_from_stem(path)?;
    parse_card(path, number, &read(path)?)
}

pub fn load_stage(path: impl AsRef<Path>) -> Result<Stage, LoadError> {
    let path = path.as_ref();
    let number = number_from_stem(path)?;
    parse_stage(path, number, &read(path)?)
}

/// Loads every `*.txt` card in `dir`, ordered by file name.
pub fn load_cards(dir: impl AsRef<Path>) -> Result<Vec<Arc<Card>>, LoadError> {
    let dir = dir.as_ref();
    let io_error = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.extension().is_some_and(|e| e == "txt") {
            paths.push(path);
        }
    }
    paths.sort();

    let cards = paths
        .iter()
        .map(|p| load_card(p).map(Arc::new))
        .collect::<Result<Vec<_>, _>>()?;
    debug!("Loaded {} card(s) from {}", cards.len(), dir.display());
    Ok(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_card() {
        let card = parse_card(Path::new("12.txt"), 12, "_x_\nxxo\n").unwrap();
        assert_eq!(card.number, 12);
        assert_eq!(card.name, CARD_NAME);
        assert_eq!(card.cell_count(), 4);
        assert_eq!(card.ink_cost, 4);
        assert_eq!(card.special_cost, DEFAULT_SPECIAL_COST);
        assert!(card.base_pattern().get(Point::new(2, 1)).unwrap().special);
        assert!(!card.base_pattern().get(Point::new(1, 0)).unwrap().special);
    }

    #[test]
    fn test_parse_card_is_normalized() {
        let card = parse_card(Path::new("1.txt"), 1, "___\n__x\n__x\n").unwrap();
        assert!(card.base_pattern().has(Point::new(0, 0)));
        assert!(card.base_pattern().has(Point::new(0, 1)));
    }

    #[test]
    fn test_parse_card_errors() {
        assert!(matches!(
            parse_card(Path::new("1.txt"), 1, ""),
            Err(LoadError::Empty { .. })
        ));
        assert!(matches!(
            parse_card(Path::new("1.txt"), 1, "  \n\n"),
            Err(LoadError::Empty { .. })
        ));
        assert!(matches!(
            parse_card(Path::new("1.txt"), 1, "___\n_._\n"),
            Err(LoadError::NoMarkers { .. })
        ));
    }

    #[test]
    fn test_parse_stage_ragged() {
        let stage = parse_stage(Path::new("1.txt"), 1, "____\n__\nx_o___\n").unwrap();
        assert_eq!((stage.width(), stage.height()), (6, 3));
        assert_eq!(stage.name, STAGE_NAME);
        // 'o' is not terrain on a stage.
        assert_eq!(stage.occupied_count(), 1);
        assert!(stage.initial_pattern().has(Point::new(0, 2)));
    }

    #[test]
    fn test_parse_stage_without_marks() {
        let stage = parse_stage(Path::new("2.txt"), 2, "________\n________\n").unwrap();
        assert_eq!((stage.width(), stage.height()), (8, 2));
        assert_eq!(stage.occupied_count(), 0);
    }

    #[test]
    fn test_bad_identifier() {
        assert!(matches!(
            number_from_stem(Path::new("cards/straight.txt")),
            Err(LoadError::BadIdentifier { stem, .. }) if stem == "straight"
        ));
        assert_eq!(number_from_stem(Path::new("cards/007.txt")).unwrap(), 7);
    }
}
