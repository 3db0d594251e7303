#![deny(missing_docs)]
//! Level loading for circuit.
//!
//! Two record formats feed the same [`Level`](circuit_core::Level):
//!
//! | Format | Decoder | Grid | Start |
//! |--------|---------|------|-------|
//! | Bundled pack | [`parse_pack`] | rows of tile ids | `startPosition {x: row, y: col}` |
//! | Level service detail | [`parse_level_detail`] | flat `tiles` + `grid_width` | `start_x` col, `start_y` row |
//!
//! [`MemoryLevelSource`] holds decoded levels and implements
//! [`LevelSource`](circuit_core::LevelSource). [`TileCatalogue`] carries
//! the service's tile list and extends a palette with it.

pub mod catalogue;
pub mod memory;
pub mod pack;
pub mod remote;

pub use catalogue::{TileCatalogue, TileDescriptor};
pub use memory::MemoryLevelSource;
pub use pack::{parse_pack, LevelRecord, PackPosition, BUNDLED_PACK};
pub use remote::{parse_level_detail, ApiLevelDetail, ApiLevelTile};
