//! Collaborator contracts - what the round controller needs from the outside world
//!
//! The controller owns one implementation of each trait, injected at construction:
//!
//! - [`LineSupplier`]: level layout and the stream of new bottom lines
//! - [`RulesCollaborator`]: round length, win/lose decisions and status text
//! - [`RenderSink`]: receives tile updates and animation requests
//!
//! Win/lose is reported as a returned [`Verdict`] rather than through callbacks.

use crate::grid::Grid;
use crate::tile::Tile;
use crate::types::Coord;

/// Initial level contents
#[derive(Debug, Clone, PartialEq)]
pub struct LevelLayout {
    /// Row-major cells, `width * height` entries
    pub cells: Vec<Option<Tile>>,
    pub width: usize,
    pub height: usize,
}

impl LevelLayout {
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            cells: vec![None; width * height],
            width,
            height,
        }
    }
}

/// Outcome decided by the rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Win(String),
    Lose(String),
}

impl Verdict {
    pub fn is_win(&self) -> bool {
        matches!(self, Verdict::Win(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Verdict::Win(msg) | Verdict::Lose(msg) => msg,
        }
    }
}

/// Source of the level and of new lines
pub trait LineSupplier {
    fn get_level(&mut self) -> LevelLayout;

    /// Next line, one entry per column. Columns whose top cell in `grid` is occupied
    /// must be `None` and are not consumed.
    fn get_new_line(&mut self, grid: &Grid) -> Vec<Option<Tile>>;

    /// The line `get_new_line` would return, without consuming it
    fn peek_next_line(&mut self, grid: &Grid) -> Vec<Option<Tile>>;

    fn restart(&mut self);
}

/// Game rules consulted at the end of every round and every click
pub trait RulesCollaborator {
    fn round_time_ms(&self) -> u32;

    fn end_round(&mut self, grid: &Grid) -> Option<Verdict>;

    fn end_click(&mut self, changed: bool, grid: &Grid) -> Option<Verdict>;

    fn info_text(&self) -> String;

    fn restart(&mut self, grid: &Grid);
}

/// Receiver of render updates and animation requests
pub trait RenderSink {
    fn set_tile(&mut self, pos: Coord, tile: Option<&Tile>);

    fn set_preview_line(&mut self, line: &[Option<Tile>]);

    /// Animate one gem; `duration_ms` is advisory
    fn play_move(&mut self, from: Coord, to: Coord, duration_ms: u32);

    /// Height used to scale move durations
    fn level_height(&self) -> usize;

    fn recreate(&mut self, _width: usize, _height: usize) {}

    fn set_info_text(&mut self, _text: &str) {}

    /// Elapsed share of the current round, 0.0..=1.0
    fn set_round_progress(&mut self, _progress: f32) {}

    fn set_bonus(&mut self, _bonus: u32) {}
}

/// Sink that discards everything; for headless runs
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink {
    height: usize,
}

impl NullSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSink for NullSink {
    fn set_tile(&mut self, _pos: Coord, _tile: Option<&Tile>) {}

    fn set_preview_line(&mut self, _line: &[Option<Tile>]) {}

    fn play_move(&mut self, _from: Coord, _to: Coord, _duration_ms: u32) {}

    fn level_height(&self) -> usize {
        self.height
    }

    fn recreate(&mut self, _width: usize, height: usize) {
        self.height = height;
    }
}
