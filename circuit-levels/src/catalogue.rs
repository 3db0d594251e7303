//! The tile catalogue.
//!
//! The level service publishes the tile types it knows, each with an
//! image for presentation. Catalogue entries extend a [`TilePalette`]
//! without overriding anything already in it.

use circuit_core::{LevelError, TilePalette};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileDescriptor {
    /// Tile id, e.g. `block-02`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Where the tile's image lives.
    pub image_url: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogueBody {
    Wrapped { tiles: Vec<TileDescriptor> },
    Bare(Vec<TileDescriptor>),
}

/// Tile ids and their images.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileCatalogue {
    images: BTreeMap<String, String>,
}

impl TileCatalogue {
    /// An empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a catalogue response, with or without its `{"tiles": ...}`
    /// wrapper.
    ///
    /// # Errors
    ///
    /// Returns [`LevelError::Decode`] for malformed JSON.
    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        let body: CatalogueBody =
            serde_json::from_str(json).map_err(|e| LevelError::Decode(e.to_string()))?;
        let tiles = match body {
            CatalogueBody::Wrapped { tiles } | CatalogueBody::Bare(tiles) => tiles,
        };
        Ok(tiles.into_iter().collect())
    }

    /// Add or replace an entry. Later entries win.
    pub fn insert(&mut self, descriptor: TileDescriptor) {
        self.images.insert(descriptor.kind, descriptor.image_url);
    }

    /// Image for `id`, if catalogued.
    pub fn image_url(&self, id: &str) -> Option<&str> {
        self.images.get(id).map(String::as_str)
    }

    /// Register every catalogued id in `palette` by prefix.
    pub fn extend_palette(&self, palette: &mut TilePalette) {
        for id in self.images.keys() {
            palette.register_classified(id.as_str());
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the catalogue is empty.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl FromIterator<TileDescriptor> for TileCatalogue {
    fn from_iter<I: IntoIterator<Item = TileDescriptor>>(iter: I) -> Self {
        let mut catalogue = Self::new();
        for descriptor in iter {
            catalogue.insert(descriptor);
        }
        catalogue
    }
}
