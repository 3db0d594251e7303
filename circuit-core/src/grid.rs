//! The rectangular tile grid a run is played on.

use crate::error::GridError;
use crate::position::{ActivationSet, Position};
use crate::tile::{Tile, TilePalette};

/// A rectangular, immutable matrix of resolved tiles.
///
/// Construction validates shape, so every `Grid` is rectangular and
/// non-empty. Share it across a run as `Arc<Grid>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Tile>,
}

impl Grid {
    /// Build from already-resolved rows.
    pub fn from_tiles(rows: Vec<Vec<Tile>>) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(GridError::Empty);
        }
        let mut cells = Vec::with_capacity(width * height);
        for (row, tiles) in rows.into_iter().enumerate() {
            if tiles.len() != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    found: tiles.len(),
                });
            }
            cells.extend(tiles);
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build from rows of raw tile identifiers, resolving each through
    /// `palette`.
    pub fn from_rows<S: AsRef<str>>(rows: &[Vec<S>], palette: &TilePalette) -> Result<Self, GridError> {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|id| palette.tile(id.as_ref())).collect())
            .collect();
        Self::from_tiles(rows)
    }

    /// Reshape a row-major flat list of identifiers into rows of `width`.
    pub fn from_flat<S: AsRef<str>>(
        tiles: &[S],
        width: usize,
        palette: &TilePalette,
    ) -> Result<Self, GridError> {
        if width == 0 || tiles.is_empty() {
            return Err(GridError::Empty);
        }
        if tiles.len() % width != 0 {
            return Err(GridError::Reshape {
                len: tiles.len(),
                width,
            });
        }
        let rows = tiles
            .chunks(width)
            .map(|row| row.iter().map(|id| palette.tile(id.as_ref())).collect())
            .collect();
        Self::from_tiles(rows)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `pos` lies inside the grid.
    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.height && pos.col < self.width
    }

    /// The tile at `pos`, or `None` outside the grid.
    pub fn get(&self, pos: Position) -> Option<&Tile> {
        self.contains(pos)
            .then(|| &self.cells[pos.row * self.width + pos.col])
    }

    /// The tile at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the grid. The engine clamps every
    /// target before looking it up.
    pub fn tile_at(&self, pos: Position) -> &Tile {
        assert!(self.contains(pos), "tile_at({pos}) outside {}x{} grid", self.height, self.width);
        &self.cells[pos.row * self.width + pos.col]
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.cells.chunks(self.width)
    }

    /// Every circuit cell on the grid.
    pub fn circuit_cells(&self) -> ActivationSet {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.is_circuit())
            .map(|(i, _)| Position::new(i / self.width, i % self.width).key())
            .collect()
    }

    /// Count of circuit tiles.
    pub fn circuit_count(&self) -> usize {
        self.cells.iter().filter(|t| t.is_circuit()).count()
    }
}
