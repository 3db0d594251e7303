//! Grid coordinates, cell keys, and the circuit activation set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A cell coordinate: `row` indexes the grid's rows, `col` its columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Position {
    /// Row index, `0` is the top row.
    pub row: usize,
    /// Column index, `0` is the leftmost column.
    pub col: usize,
}

impl Position {
    /// Create a position from row and column.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Apply a signed delta, clamping each axis independently into
    /// `[0, height - 1]` × `[0, width - 1]`.
    ///
    /// Both dimensions must be non-zero.
    pub fn offset_clamped(self, d_row: isize, d_col: isize, height: usize, width: usize) -> Self {
        Self {
            row: clamp_axis(self.row, d_row, height),
            col: clamp_axis(self.col, d_col, width),
        }
    }

    /// Clamp this position into a `height` × `width` grid.
    pub fn clamped_to(self, height: usize, width: usize) -> Self {
        self.offset_clamped(0, 0, height, width)
    }

    /// The activation key for this cell.
    pub fn key(self) -> CellKey {
        CellKey::from(self)
    }
}

fn clamp_axis(value: usize, delta: isize, dim: usize) -> usize {
    let max = dim.saturating_sub(1);
    value.saturating_add_signed(delta).min(max)
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Composite `row-col` key identifying one grid cell.
///
/// Serializes as the string form, e.g. `"0-2"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellKey {
    row: usize,
    col: usize,
}

impl CellKey {
    /// Key for the cell at `row`, `col`.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The cell this key names.
    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }
}

impl From<Position> for CellKey {
    fn from(p: Position) -> Self {
        Self::new(p.row, p.col)
    }
}

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.col)
    }
}

impl FromStr for CellKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, col) = s
            .split_once('-')
            .ok_or_else(|| format!("cell key {s:?} is not of the form row-col"))?;
        let row = row
            .parse()
            .map_err(|_| format!("cell key {s:?} has a bad row"))?;
        let col = col
            .parse()
            .map_err(|_| format!("cell key {s:?} has a bad column"))?;
        Ok(Self::new(row, col))
    }
}

impl TryFrom<String> for CellKey {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CellKey> for String {
    fn from(k: CellKey) -> Self {
        k.to_string()
    }
}

/// The set of circuit cells activated so far in a run.
///
/// Append-only within a run; ordered so that iteration and
/// serialization are deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivationSet(BTreeSet<CellKey>);

impl ActivationSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key. Returns `true` if it was not already present.
    pub fn insert(&mut self, key: CellKey) -> bool {
        self.0.insert(key)
    }

    /// Whether `key` has been activated.
    pub fn contains(&self, key: &CellKey) -> bool {
        self.0.contains(key)
    }

    /// Number of activated cells.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing has been activated.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate keys in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &CellKey> {
        self.0.iter()
    }

    /// Whether every key of `other` is present in `self`.
    pub fn is_superset(&self, other: &ActivationSet) -> bool {
        self.0.is_superset(&other.0)
    }

    /// Keys in `self` that are missing from `other`.
    pub fn missing_from(&self, other: &ActivationSet) -> ActivationSet {
        Self(self.0.difference(&other.0).copied().collect())
    }

    /// String keys, e.g. `["0-2", "1-1"]`.
    pub fn keys(&self) -> Vec<String> {
        self.0.iter().map(CellKey::to_string).collect()
    }
}

impl FromIterator<CellKey> for ActivationSet {
    fn from_iter<I: IntoIterator<Item = CellKey>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ActivationSet {
    type Item = &'a CellKey;
    type IntoIter = std::collections::btree_set::Iter<'a, CellKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
