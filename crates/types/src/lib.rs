//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, level adapters, observation output).
//!
//! # Coordinates
//!
//! - **x** grows to the right, starting at column 0
//! - **y** grows downwards, row 0 is the top row
//! - New lines enter at the bottom row (`height - 1`)
//!
//! # Tuning Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_MIN_POP_COUNT` | 3 | Smallest color group a hit will pop |
//! | `DEFAULT_ROUND_TIME_MS` | 1500 | Time until a new line is pushed |
//! | `PHYSICS_PASSES` | 2 | Vertical fall, then horizontal compaction |
//! | `MOVE_PASS_MS` | 1000 | Time for a gem to fall the full level height |
//! | `BONUS_POINTS` | 1 | Bonus credited per popped bonus gem |
//! | `ICE_HITS` | 1 | Extra hits an iced gem absorbs |
//! | `DEFAULT_MOVES` | 35 | Moves granted by the rescue rules |
//!
//! # Examples
//!
//! ```
//! use gem_jam_types::{Coord, GemColor, GemMove};
//!
//! let pos = Coord::new(2, 1);
//! assert_eq!(pos.to_index(4), 6);
//! assert_eq!(Coord::from_index(6, 4), pos);
//!
//! assert_eq!(GemColor::from_str("lime"), Some(GemColor::Lime));
//! assert_eq!(GemColor::Lime.id(), 3);
//!
//! let mv = GemMove::new(Coord::new(0, 0), Coord::new(0, 2));
//! assert_eq!(mv.distance(), 2);
//! ```

use std::fmt;
use std::ops::Add;

/// Smallest color group that a hit pops (3 gems)
pub const DEFAULT_MIN_POP_COUNT: usize = 3;

/// Round length in milliseconds before a new line is pushed (1.5s)
pub const DEFAULT_ROUND_TIME_MS: u32 = 1500;

/// Number of physics passes run after every hit
pub const PHYSICS_PASSES: usize = 2;

/// Animation time budget for one physics pass, spread over the level height
pub const MOVE_PASS_MS: u32 = 1000;

/// Bonus points granted when a bonus gem pops
pub const BONUS_POINTS: u32 = 1;

/// Extra hits an iced gem takes before it breaks
pub const ICE_HITS: i8 = 1;

/// Moves granted by the rescue-target rule set
pub const DEFAULT_MOVES: u32 = 35;

/// Random level generation defaults
pub const DEFAULT_LEVEL_WIDTH: usize = 12;
pub const DEFAULT_LEVEL_HEIGHT: usize = 10;
pub const DEFAULT_FREE_LINES: usize = 3;
pub const DEFAULT_COLOR_COUNT: usize = 4;


/// Grid coordinate (x = column, y = row from the top)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert a row-major flat index back into a coordinate
    pub fn from_index(index: usize, width: usize) -> Self {
        Self {
            x: (index % width) as i32,
            y: (index / width) as i32,
        }
    }

    /// Row-major flat index (y * width + x)
    ///
    /// The coordinate must be non-negative; bounds against the height are the
    /// caller's concern.
    pub fn to_index(&self, width: usize) -> usize {
        debug_assert!(self.x >= 0 && self.y >= 0, "negative coordinate {}", self);
        self.y as usize * width + self.x as usize
    }

    /// Manhattan distance between two coordinates
    pub fn manhattan(&self, other: Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The six gem colors
///
/// Numeric ids (1..=6) are part of the level encoding and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GemColor {
    Green,
    Red,
    Lime,
    Orange,
    Blue,
    White,
}

impl GemColor {
    pub const ALL: [Self; 6] = [
        Self::Green,
        Self::Red,
        Self::Lime,
        Self::Orange,
        Self::Blue,
        Self::White,
    ];

    /// Stable numeric id (1..=6)
    pub fn id(&self) -> u8 {
        match self {
            GemColor::Green => 1,
            GemColor::Red => 2,
            GemColor::Lime => 3,
            GemColor::Orange => 4,
            GemColor::Blue => 5,
            GemColor::White => 6,
        }
    }

    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(GemColor::Green),
            2 => Some(GemColor::Red),
            3 => Some(GemColor::Lime),
            4 => Some(GemColor::Orange),
            5 => Some(GemColor::Blue),
            6 => Some(GemColor::White),
            _ => None,
        }
    }

    /// Parse color from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "green" => Some(GemColor::Green),
            "red" => Some(GemColor::Red),
            "lime" => Some(GemColor::Lime),
            "orange" => Some(GemColor::Orange),
            "blue" => Some(GemColor::Blue),
            "white" => Some(GemColor::White),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GemColor::Green => "green",
            GemColor::Red => "red",
            GemColor::Lime => "lime",
            GemColor::Orange => "orange",
            GemColor::Blue => "blue",
            GemColor::White => "white",
        }
    }
}

/// One physics-driven relocation of a gem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GemMove {
    pub from: Coord,
    pub to: Coord,
}

impl GemMove {
    pub fn new(from: Coord, to: Coord) -> Self {
        Self { from, to }
    }

    /// Number of cells travelled (Manhattan distance)
    pub fn distance(&self) -> u32 {
        self.from.manhattan(self.to)
    }
}
