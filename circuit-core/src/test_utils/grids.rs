//! Compact grid builders.
//!
//! Each character is one cell: `.` plain (`block-01`), `C` circuit
//! (`circuit-01`), `#` obstacle (`obstacle-01`). Any other character
//! is used verbatim as a tile id.

use crate::grid::Grid;
use crate::level::Level;
use crate::position::Position;
use crate::tile::TilePalette;

/// Build a grid from rows of cell characters.
///
/// # Panics
///
/// Panics if the rows do not form a valid grid.
pub fn ascii_grid(rows: &[&str]) -> Grid {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            row.chars()
                .map(|c| match c {
                    '.' => "block-01".to_string(),
                    'C' => "circuit-01".to_string(),
                    '#' => "obstacle-01".to_string(),
                    other => other.to_string(),
                })
                .collect()
        })
        .collect();
    Grid::from_rows(&rows, &TilePalette::builtin()).expect("ascii grid must be rectangular")
}

/// Build a level numbered `1` around an ascii grid.
pub fn ascii_level(rows: &[&str], start: Position, max_commands: usize) -> Level {
    Level::new(1, "test level", ascii_grid(rows), start, max_commands)
}
