use crate::geometry::Point;
use crate::stage::Stage;
use directories::UserDirs;
use log::{info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

const RESET: &str = "\x1b[0m";
const YELLOW: &str = "\x1b[33m";
const WHITE: &str = "\x1b[37m";

// One color per history entry, cycling.
const COLORMAP: [&str; 16] = [
    "\x1b[34m", "\x1b[36m", "\x1b[32m", "\x1b[90m", "\x1b[94m", "\x1b[96m", "\x1b[92m",
    "\x1b[95m", "\x1b[91m", "\x1b[97m", "\x1b[93m", "\x1b[35m", "\x1b[31m", "\x1b[39m",
    "\x1b[37m", "\x1b[33m",
];

#[derive(Clone, Copy)]
enum Mark {
    Terrain,
    Card { index: usize, special: bool },
}

/// Draws the stage as a character grid.
///
/// `.` is empty, `0` is initial terrain or a card cell and `X` a special card
/// cell. With `colored`, each history entry gets its own ANSI color.
pub fn render(stage: &Stage, colored: bool) -> String {
    let mut marks: HashMap<Point, Mark> = HashMap::new();
    for point in stage.initial_pattern().points() {
        marks.insert(point, Mark::Terrain);
    }
    for (index, placement) in stage.place_hist().iter().enumerate() {
        for cell in placement.get_pattern().cells() {
            marks.insert(
                cell.point,
                Mark::Card {
                    index,
                    special: cell.special,
                },
            );
        }
    }

    let mut out = String::new();
    for y in 0..stage.height() {
        for x in 0..stage.width() {
            let (color, c) = match marks.get(&Point::new(x, y)) {
                None => (WHITE, '.'),
                Some(Mark::Terrain) => (YELLOW, '0'),
                Some(Mark::Card { index, special }) => {
                    (COLORMAP[index % COLORMAP.len()], if *special { 'X' } else { '0' })
                }
            };
            if colored {
                out.push_str(color);
            }
            out.push(c);
        }
        if colored {
            out.push_str(RESET);
        }
        out.push('\n');
    }
    out
}

/// Plain rendering followed by one line per placement.
pub fn describe(stage: &Stage, score: f64) -> String {
    let mut out = render(stage, false);
    out.push_str(&format!("\nstage {} ({}), score {score}\n", stage.number, stage.name));
    for (i, p) in stage.place_hist().iter().enumerate() {
        out.push_str(&format!(
            "{i:>3}: card {:>3} at ({}, {}) rotation {:?}\n",
            p.card.number, p.point.x, p.point.y, p.rotation
        ));
    }
    out
}

/// Writes the board to `<documents>/TileSolutions/<score>_<md5>.txt`.
/// Returns the path written, or `None` when it could not be saved.
pub fn save_stage(stage: &Stage, score: f64) -> Option<PathBuf> {
    let text = describe(stage, score);
    let hash = format!("{:x}", md5::compute(&text));
    let filename = format!("{score}_{hash}.txt");

    let Some(dirs) = UserDirs::new() else {
        warn!("No home directory; solution not saved");
        return None;
    };
    let mut path = dirs.document_dir().unwrap_or(dirs.home_dir()).to_path_buf();
    path.push("TileSolutions");
    if let Err(e) = fs::create_dir_all(&path) {
        warn!("Could not create {}: {e}", path.display());
        return None;
    }
    path.push(filename);
    match fs::write(&path, text) {
        Ok(()) => {
            info!("Saved solution to {}", path.display());
            Some(path)
        }
        Err(e) => {
            warn!("Could not write {}: {e}", path.display());
            None
        }
    }
}
