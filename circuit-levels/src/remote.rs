//! Level detail records from the level service.
//!
//! The service sends the grid as a flat, row-major `tiles` list plus
//! `grid_width`. Unlike the bundled pack, `start_x` is the column and
//! `start_y` the row.

use circuit_core::{Grid, GridError, Level, LevelError, LevelId, Position, TilePalette};
use serde::{Deserialize, Serialize};

/// One cell of a flat tile list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiLevelTile {
    /// Tile id, e.g. `circuit-01`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Catalogue row id. Unused for play.
    #[serde(default)]
    pub tile_id: Option<u64>,
}

/// A level as the service describes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiLevelDetail {
    /// Level id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Display description; may be null.
    #[serde(default)]
    pub description: Option<String>,
    /// Difficulty label.
    #[serde(default)]
    pub difficulty: String,
    /// Start column.
    pub start_x: usize,
    /// Start row.
    pub start_y: usize,
    /// Advertised circuit count.
    pub required_circuits: usize,
    /// Longest allowed program.
    pub max_commands: usize,
    /// Columns.
    pub grid_width: usize,
    /// Rows.
    pub grid_height: usize,
    /// Row-major cells.
    pub tiles: Vec<ApiLevelTile>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DetailBody {
    Wrapped { level: ApiLevelDetail },
    Bare(ApiLevelDetail),
}

impl ApiLevelDetail {
    /// Reshape the tile list and build the playable level.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::Grid`] if the tile list does not reshape
    /// into `grid_width` columns or disagrees with `grid_height`.
    pub fn into_level(self, palette: &TilePalette) -> Result<Level, LevelError> {
        let ids: Vec<&str> = self.tiles.iter().map(|t| t.kind.as_str()).collect();
        let grid = Grid::from_flat(&ids, self.grid_width, palette)?;
        if grid.height() != self.grid_height {
            return Err(GridError::DimensionMismatch {
                declared_height: self.grid_height,
                declared_width: self.grid_width,
                height: grid.height(),
                width: grid.width(),
            }
            .into());
        }
        Ok(Level::new(
            LevelId(self.id),
            self.name,
            grid,
            Position::new(self.start_y, self.start_x),
            self.max_commands,
        )
        .with_description(self.description.unwrap_or_default())
        .with_difficulty(self.difficulty)
        .with_required_circuits(self.required_circuits))
    }
}

/// Decode a level detail response, with or without its `{"level": ...}`
/// wrapper, and build the level.
///
/// # Errors
///
/// Returns [`LevelError::Decode`] for malformed JSON and
/// [`LevelError::Grid`] for a malformed grid.
pub fn parse_level_detail(json: &str, palette: &TilePalette) -> Result<Level, LevelError> {
    let body: DetailBody =
        serde_json::from_str(json).map_err(|e| LevelError::Decode(e.to_string()))?;
    let detail = match body {
        DetailBody::Wrapped { level } | DetailBody::Bare(level) => level,
    };
    detail.into_level(palette)
}
