//! Settler module - two-phase gravity after a hit
//!
//! Pass 0 lets tiles fall straight down inside every dirty column. Pass 1 closes holes
//! in the bottom row by sliding whole columns to the right. Each pass mutates the grid
//! and returns the relocations as [`GemMove`]s, one per tile, for the animation
//! collaborator.

use crate::grid::Grid;
use crate::resolver::DirtyRows;
use crate::types::{Coord, GemMove, PHYSICS_PASSES};

/// Physics step runner
#[derive(Debug, Clone, Copy, Default)]
pub struct Settler;

impl Settler {
    /// Number of passes run after every hit
    pub const PASSES: usize = PHYSICS_PASSES;

    pub fn passes(&self) -> usize {
        Self::PASSES
    }

    /// Run pass `nr` (0 = vertical fall, 1 = horizontal compaction).
    ///
    /// Panics when `nr` is not a valid pass index.
    pub fn step(&self, grid: &mut Grid, nr: usize, dirty: &DirtyRows) -> Vec<GemMove> {
        match nr {
            0 => fall_down(grid, dirty),
            1 => compact_right(grid),
            _ => panic!("physics step {} out of range 0..{}", nr, Self::PASSES),
        }
    }
}

/// Let tiles fall in every column whose dirty hint is set.
///
/// Works bottom-up from the hint row, shifting everything above a hole down by one cell
/// per sweep until no tile above the settled part hangs over a gap. A tile moved in
/// several sweeps still yields a single move from its first to its last cell.
pub fn fall_down(grid: &mut Grid, dirty: &DirtyRows) -> Vec<GemMove> {
    let mut moves: Vec<GemMove> = Vec::new();

    for x in 0..grid.width().min(dirty.width()) {
        let hint = dirty.get(x);
        if hint == DirtyRows::NONE {
            continue;
        }
        let col = x as i32;
        let mut current_y = hint.min(grid.height() as i32 - 1);
        let mut first_sweep = true;
        let mut something_to_move = true;

        while current_y > -1 && something_to_move {
            if grid.is_occupied(Coord::new(col, current_y)) {
                current_y -= 1;
            }

            for y in (0..current_y).rev() {
                let below = Coord::new(col, y + 1);
                let here = Coord::new(col, y);
                if grid.is_occupied(below) {
                    continue;
                }
                let Some(tile) = grid.take(here) else {
                    continue;
                };
                grid.set(below, Some(tile));

                // Extend the move that ended here in the previous sweep.
                let earlier = if first_sweep {
                    None
                } else {
                    moves.iter_mut().find(|mv| mv.to == here)
                };
                match earlier {
                    Some(mv) => mv.to = below,
                    None => moves.push(GemMove::new(here, below)),
                }
            }

            something_to_move = (0..current_y).any(|y| grid.is_occupied(Coord::new(col, y + 1)));
            first_sweep = false;
        }
    }

    moves
}

/// Close empty runs in the bottom row by moving columns to the right.
///
/// Columns keep their vertical layout; every tile of a relocated column becomes one
/// move. Walks targets from the right edge, keeping a running distance to the next
/// non-empty source column.
pub fn compact_right(grid: &mut Grid) -> Vec<GemMove> {
    let mut moves = Vec::new();
    if grid.width() == 0 || grid.height() == 0 {
        return moves;
    }

    let width = grid.width() as i32;
    let height = grid.height() as i32;

    // Runs of empty bottom cells: first empty column, first filled column after it.
    let mut run_starts = Vec::new();
    let mut run_ends = Vec::new();
    let mut x = 0;
    while x < width {
        if bottom_empty(grid, x) {
            run_starts.push(x);
            while x < width && bottom_empty(grid, x) {
                x += 1;
            }
            if x < width {
                run_ends.push(x);
            }
        }
        x += 1;
    }
    if run_ends.len() < run_starts.len() {
        run_ends.push(width);
    }

    let mut target = width - 1;
    let mut distance = 1;
    while target - distance >= 0 {
        if let Some(run) = run_ends.iter().position(|&end| end == target) {
            distance += (target - run_starts[run]) - 1;
        }

        if bottom_empty(grid, target) {
            while target - distance >= 0 && bottom_empty(grid, target - distance) {
                distance += 1;
            }

            let source = target - distance;
            if source >= 0 {
                for y in 0..height {
                    let from = Coord::new(source, y);
                    let to = Coord::new(target, y);
                    if let Some(tile) = grid.take(from) {
                        grid.set(to, Some(tile));
                        moves.push(GemMove::new(from, to));
                    }
                }
            }
        }

        target -= 1;
    }

    moves
}

fn bottom_empty(grid: &Grid, x: i32) -> bool {
    !grid.is_occupied(Coord::new(x, grid.height() as i32 - 1))
}
