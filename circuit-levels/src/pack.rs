//! The bundled level pack format.
//!
//! A pack is a JSON array of level records, each carrying its grid as
//! rows of tile ids. In `startPosition`, `x` is the row and `y` the
//! column.

use circuit_core::{Grid, Level, LevelError, LevelId, Position, TilePalette};
use serde::{Deserialize, Serialize};

/// The level pack shipped with this crate.
pub const BUNDLED_PACK: &str = include_str!("../data/levels.json");

/// Start cell as written in a pack record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackPosition {
    /// Row.
    pub x: usize,
    /// Column.
    pub y: usize,
}

impl From<PackPosition> for Position {
    fn from(p: PackPosition) -> Self {
        Position::new(p.x, p.y)
    }
}

/// One level as written in a pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelRecord {
    /// Level id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Display description.
    #[serde(default)]
    pub description: String,
    /// Rows of tile ids.
    pub grid: Vec<Vec<String>>,
    /// Where the robot starts.
    pub start_position: PackPosition,
    /// Advertised circuit count.
    pub required_circuits: usize,
    /// Longest allowed program.
    pub max_commands: usize,
}

impl LevelRecord {
    /// Build the playable level, classifying tiles through `palette`.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::Grid`] if the rows are empty or ragged.
    pub fn into_level(self, palette: &TilePalette) -> Result<Level, LevelError> {
        let grid = Grid::from_rows(&self.grid, palette)?;
        if grid.circuit_count() != self.required_circuits {
            tracing::warn!(
                level = self.id,
                advertised = self.required_circuits,
                actual = grid.circuit_count(),
                "circuit.levels.circuit_count_mismatch"
            );
        }
        Ok(Level::new(
            LevelId(self.id),
            self.name,
            grid,
            self.start_position.into(),
            self.max_commands,
        )
        .with_description(self.description)
        .with_required_circuits(self.required_circuits))
    }
}

/// Decode a pack and build every level in it.
///
/// # Errors
///
/// Returns [`LevelError::Decode`] for malformed JSON and
/// [`LevelError::Grid`] for the first level with a malformed grid.
pub fn parse_pack(json: &str, palette: &TilePalette) -> Result<Vec<Level>, LevelError> {
    let records: Vec<LevelRecord> =
        serde_json::from_str(json).map_err(|e| LevelError::Decode(e.to_string()))?;
    records
        .into_iter()
        .map(|record| record.into_level(palette))
        .collect()
}
