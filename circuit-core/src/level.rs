//! Levels and the source that supplies them.

use crate::error::LevelError;
use crate::grid::Grid;
use crate::position::Position;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Level identifier.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelId(pub u64);

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for LevelId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A playable level.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct Level {
    /// Identifier.
    pub id: LevelId,
    /// Display name.
    pub name: String,
    /// Display description.
    pub description: String,
    /// Free-form difficulty label (`easy`, `medium`, `hard`).
    pub difficulty: String,
    /// The board. Shared with every run on this level.
    pub grid: Arc<Grid>,
    /// Where the robot starts each run.
    pub start: Position,
    /// Longest program the player may build.
    pub max_commands: usize,
    /// Circuit count the level advertises. Display only; wins are
    /// judged against the grid's actual circuits.
    pub required_circuits: usize,
}

impl Level {
    /// Create a level. `required_circuits` defaults to the grid's
    /// circuit count.
    pub fn new(
        id: impl Into<LevelId>,
        name: impl Into<String>,
        grid: Grid,
        start: Position,
        max_commands: usize,
    ) -> Self {
        let required_circuits = grid.circuit_count();
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            difficulty: String::new(),
            grid: Arc::new(grid),
            start,
            max_commands,
            required_circuits,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the difficulty label.
    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = difficulty.into();
        self
    }

    /// Override the advertised circuit count.
    pub fn with_required_circuits(mut self, required_circuits: usize) -> Self {
        self.required_circuits = required_circuits;
        self
    }
}

/// Supplies levels, from bundled data or a remote service.
///
/// Implementations:
/// - `MemoryLevelSource` (circuit-levels): levels held in memory,
///   loaded from the bundled JSON pack or remote detail records
/// - a remote service client, outside this workspace
#[async_trait]
pub trait LevelSource: Send + Sync {
    /// Fetch one level.
    async fn level(&self, id: LevelId) -> Result<Level, LevelError>;

    /// Ids of every level this source can supply, ascending.
    async fn level_ids(&self) -> Result<Vec<LevelId>, LevelError>;
}
