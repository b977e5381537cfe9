//! Gem Jam (workspace facade crate).
//!
//! Re-exports the implementation crates under `gem_jam::{core,level,types}` and hosts the
//! pieces of the headless runner that are worth testing on their own: hit selection,
//! JSON observations and the debug grid view.

pub use gem_jam_core as core;
pub use gem_jam_level as level;
pub use gem_jam_types as types;

pub mod autoplay;
pub mod debug;
pub mod observe;
