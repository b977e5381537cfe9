//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules of the gem puzzle: the grid and its color groups, what
//! each gem does when hit, how chains resolve, how gems settle afterwards, and the round
//! loop that feeds new lines in from the bottom. It has **no** rendering, input or I/O;
//! everything it needs from the outside comes through the traits in [`collab`].
//!
//! # Module Structure
//!
//! - [`grid`]: row-major cell storage and union-find color grouping
//! - [`tile`]: gem variants, activation patterns and pop behaviour
//! - [`resolver`]: recursive hit/chain resolution and dirty-row hints
//! - [`settler`]: vertical fall and horizontal bottom-row compaction
//! - [`round`]: the round controller (timer, suspension, hit sequencing)
//! - [`collab`]: line supplier, rules and render sink contracts
//! - [`snapshot`]: value copies of the grid for observers
//! - [`rng`]: seeded LCG for reproducible line generation
//!
//! # Turn Sequence
//!
//! 1. A hit activates the tile under the cursor; groups below the minimum size do nothing
//! 2. Bombs caught in a blast fire recursively, each at most once
//! 3. Pass 0: tiles fall inside every touched column
//! 4. Pass 1: empty bottom-row columns are closed by sliding columns right
//! 5. Groups are regenerated and the rules decide win/lose
//!
//! Independently, every elapsed round pushes one new line in from the bottom.
//!
//! # Example
//!
//! ```
//! use gem_jam_core::{Grid, Resolver, Settler, Tile};
//! use gem_jam_types::{Coord, GemColor};
//!
//! let mut grid = Grid::new(3, 2);
//! for x in 0..3 {
//!     grid.set(Coord::new(x, 1), Some(Tile::color(GemColor::Red)));
//! }
//! grid.set(Coord::new(0, 0), Some(Tile::target()));
//! grid.regenerate_groups();
//!
//! let mut resolver = Resolver::new(grid.width());
//! assert!(resolver.resolve_hit(&mut grid, Coord::new(1, 1)));
//!
//! let moves = Settler.step(&mut grid, 0, resolver.dirty());
//! assert_eq!(moves.len(), 1);
//! assert!(grid.get(Coord::new(0, 1)).is_some());
//! ```

pub mod collab;
pub mod grid;
pub mod resolver;
pub mod rng;
pub mod round;
pub mod settler;
pub mod snapshot;
pub mod tile;

pub use gem_jam_types as types;

// Re-export commonly used types for convenience
pub use collab::{LevelLayout, LineSupplier, NullSink, RenderSink, RulesCollaborator, Verdict};
pub use grid::Grid;
pub use resolver::{DirtyRows, Resolver};
pub use rng::SimpleRng;
pub use round::{HitOutcome, HitReport, Phase, PhysicsPass, RoundController, RoundEnd, RoundState};
pub use settler::Settler;
pub use snapshot::GridSnapshot;
pub use tile::{Activation, Tile, TileKind};
