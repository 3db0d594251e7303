//! In-memory [`LevelSource`].

use async_trait::async_trait;
use circuit_core::{Level, LevelError, LevelId, LevelSource, TilePalette};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::pack::{parse_pack, BUNDLED_PACK};
use crate::remote::parse_level_detail;

/// Levels held in a `BTreeMap` behind a `RwLock`.
///
/// Levels can be added while the source is being read, e.g. as detail
/// records arrive from the level service.
pub struct MemoryLevelSource {
    levels: RwLock<BTreeMap<LevelId, Level>>,
}

impl MemoryLevelSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self {
            levels: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a source holding `levels`. Later duplicates replace
    /// earlier ones.
    pub fn from_levels(levels: impl IntoIterator<Item = Level>) -> Self {
        let levels = levels.into_iter().map(|level| (level.id, level)).collect();
        Self {
            levels: RwLock::new(levels),
        }
    }

    /// Create a source from a level pack.
    ///
    /// # Errors
    ///
    /// Returns the first decode or grid error in the pack.
    pub fn from_pack(json: &str, palette: &TilePalette) -> Result<Self, LevelError> {
        let levels = parse_pack(json, palette)?;
        tracing::debug!(levels = levels.len(), "circuit.levels.pack_loaded");
        Ok(Self::from_levels(levels))
    }

    /// Create a source from the pack bundled with this crate.
    ///
    /// # Errors
    ///
    /// Returns a decode or grid error if the bundled pack is malformed.
    pub fn bundled() -> Result<Self, LevelError> {
        Self::from_pack(BUNDLED_PACK, &TilePalette::builtin())
    }

    /// Add a level, returning the one it replaced.
    pub async fn insert(&self, level: Level) -> Option<Level> {
        self.levels.write().await.insert(level.id, level)
    }

    /// Decode a level service detail response and add it.
    ///
    /// # Errors
    ///
    /// Returns a decode or grid error; the source is left unchanged.
    pub async fn insert_detail(
        &self,
        json: &str,
        palette: &TilePalette,
    ) -> Result<LevelId, LevelError> {
        let level = parse_level_detail(json, palette)?;
        let id = level.id;
        self.insert(level).await;
        tracing::debug!(level = %id, "circuit.levels.detail_loaded");
        Ok(id)
    }

    /// Remove a level.
    pub async fn remove(&self, id: LevelId) -> Option<Level> {
        self.levels.write().await.remove(&id)
    }

    /// Number of levels held.
    pub async fn len(&self) -> usize {
        self.levels.read().await.len()
    }

    /// Whether no levels are held.
    pub async fn is_empty(&self) -> bool {
        self.levels.read().await.is_empty()
    }
}

impl Default for MemoryLevelSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LevelSource for MemoryLevelSource {
    async fn level(&self, id: LevelId) -> Result<Level, LevelError> {
        self.levels
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| LevelError::NotFound(id.to_string()))
    }

    async fn level_ids(&self) -> Result<Vec<LevelId>, LevelError> {
        Ok(self.levels.read().await.keys().copied().collect())
    }
}
