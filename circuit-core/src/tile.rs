//! Tile identifiers and their classification.
//!
//! Levels name tiles with free-form strings (`circuit-01`, `block-02`,
//! `obstacle-01`, ...). Each identifier is resolved to a closed
//! [`TileKind`] once, through a [`TilePalette`], when the level loads.
//! Lookups during a run never touch the string again.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Raw tile identifier as it appears in level data.
/// No format requirement; classification is the palette's job.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub String);

impl TileId {
    /// Create a tile id from anything that converts to String.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TileId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for TileId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// What a tile does to the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    /// Passable and inert.
    Plain,
    /// Blocks movement onto it.
    Obstacle,
    /// Passable; can be activated.
    Circuit,
}

impl TileKind {
    /// Classify a raw identifier by its prefix: `circuit*` is a circuit,
    /// `obstacle*` or `wall` is an obstacle, anything else is plain.
    pub fn classify(id: &str) -> Self {
        if id.starts_with("circuit") {
            Self::Circuit
        } else if id.starts_with("obstacle") || id == "wall" {
            Self::Obstacle
        } else {
            Self::Plain
        }
    }
}

/// One resolved grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    id: TileId,
    kind: TileKind,
}

impl Tile {
    /// Pair an identifier with its resolved kind.
    pub fn new(id: impl Into<TileId>, kind: TileKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    /// The raw identifier.
    pub fn id(&self) -> &TileId {
        &self.id
    }

    /// The resolved kind.
    pub fn kind(&self) -> TileKind {
        self.kind
    }

    /// Whether the tile blocks movement.
    pub fn is_obstacle(&self) -> bool {
        self.kind == TileKind::Obstacle
    }

    /// Whether the tile can be activated.
    pub fn is_circuit(&self) -> bool {
        self.kind == TileKind::Circuit
    }
}

/// Explicit mapping from raw tile identifiers to [`TileKind`].
///
/// Identifiers not in the table fall back to [`TileKind::classify`].
/// Entries can override the prefix rule, e.g. to mark a decorative
/// `circuit-broken` tile as plain.
#[derive(Debug, Clone, Default)]
pub struct TilePalette {
    kinds: HashMap<String, TileKind>,
}

impl TilePalette {
    /// An empty palette; every id resolves by prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// The tile set shipped with the local level pack.
    pub fn builtin() -> Self {
        let mut palette = Self::new();
        for id in ["circuit-01", "circuit-02", "block-01", "block-02", "obstacle-01"] {
            palette.register_classified(id);
        }
        palette
    }

    /// Map `id` to an explicit kind, overriding any earlier entry.
    pub fn insert(&mut self, id: impl Into<String>, kind: TileKind) -> &mut Self {
        self.kinds.insert(id.into(), kind);
        self
    }

    /// Add `id` with its prefix-derived kind, keeping an existing entry.
    pub fn register_classified(&mut self, id: impl Into<String>) -> &mut Self {
        let id = id.into();
        let kind = TileKind::classify(&id);
        self.kinds.entry(id).or_insert(kind);
        self
    }

    /// Resolve an identifier.
    pub fn resolve(&self, id: &str) -> TileKind {
        self.kinds
            .get(id)
            .copied()
            .unwrap_or_else(|| TileKind::classify(id))
    }

    /// Build a [`Tile`] for `id`.
    pub fn tile(&self, id: impl Into<TileId>) -> Tile {
        let id = id.into();
        let kind = self.resolve(id.as_str());
        Tile { id, kind }
    }

    /// Number of explicit entries.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether the table has no explicit entries.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_by_prefix() {
        assert_eq!(TileKind::classify("circuit-01"), TileKind::Circuit);
        assert_eq!(TileKind::classify("circuit-99"), TileKind::Circuit);
        assert_eq!(TileKind::classify("obstacle-01"), TileKind::Obstacle);
        assert_eq!(TileKind::classify("wall"), TileKind::Obstacle);
        assert_eq!(TileKind::classify("walls"), TileKind::Plain);
        assert_eq!(TileKind::classify("block-02"), TileKind::Plain);
        assert_eq!(TileKind::classify(""), TileKind::Plain);
    }

    #[test]
    fn palette_overrides_prefix_rule() {
        let mut palette = TilePalette::builtin();
        palette.insert("circuit-broken", TileKind::Plain);
        assert_eq!(palette.resolve("circuit-broken"), TileKind::Plain);
        assert_eq!(palette.resolve("circuit-02"), TileKind::Circuit);
        // Unknown ids still classify.
        assert_eq!(palette.resolve("obstacle-07"), TileKind::Obstacle);
    }

    #[test]
    fn register_classified_keeps_existing_entry() {
        let mut palette = TilePalette::new();
        palette.insert("wall", TileKind::Plain);
        palette.register_classified("wall");
        assert_eq!(palette.resolve("wall"), TileKind::Plain);
        assert_eq!(palette.len(), 1);
    }

    #[test]
    fn tile_predicates() {
        let palette = TilePalette::builtin();
        assert!(palette.tile("circuit-01").is_circuit());
        assert!(palette.tile("obstacle-01").is_obstacle());
        let plain = palette.tile("block-01");
        assert!(!plain.is_circuit() && !plain.is_obstacle());
        assert_eq!(plain.id().as_str(), "block-01");
    }
}
