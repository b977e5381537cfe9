//! Level adapters - everything between level data and the core
//!
//! - [`codec`]: tile ids used by level files and observations
//! - [`data`]: [`LevelData`] and its text format
//! - [`data_source`]: line supplier replaying a [`LevelData`]
//! - [`random_source`]: seeded random line supplier
//! - [`rules`]: the rescue-the-target rule set
//!
//! Failures while reading or decoding level data are reported as [`LevelError`].

pub mod codec;
pub mod data;
pub mod data_source;
pub mod error;
pub mod random_source;
pub mod rules;

pub use codec::{tile_from_id, tile_id};
pub use data::LevelData;
pub use data_source::LevelDataSupplier;
pub use error::LevelError;
pub use random_source::{RandomLineSupplier, RandomSupplierConfig};
pub use rules::RescueTargetRules;
