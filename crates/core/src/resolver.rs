//! Resolver module - turns one hit into pops and chain reactions
//!
//! A hit activates the tile under the cursor. Its touched cells are popped in order; a
//! chainable tile caught in the blast is resolved recursively first (it clears itself
//! as the first entry of its own activation, so each bomb fires at most once). Every
//! touched cell raises the dirty-row hint of its column, which later bounds how far the
//! vertical fall has to look.

use crate::grid::Grid;
use crate::tile::Activation;
use crate::types::Coord;

/// Per-column "deepest changed row" hints; `-1` means the column is untouched
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DirtyRows {
    rows: Vec<i32>,
}

impl DirtyRows {
    pub const NONE: i32 = -1;

    pub fn new(width: usize) -> Self {
        Self {
            rows: vec![Self::NONE; width],
        }
    }

    /// Reset every column, resizing to `width`
    pub fn reset(&mut self, width: usize) {
        self.rows.clear();
        self.rows.resize(width, Self::NONE);
    }

    /// Raise the hint of `pos.x` to at least `pos.y`
    pub fn mark(&mut self, pos: Coord) {
        let slot = &mut self.rows[pos.x as usize];
        *slot = (*slot).max(pos.y);
    }

    /// Hint for column `x`
    pub fn get(&self, x: usize) -> i32 {
        self.rows[x]
    }

    pub fn is_dirty(&self, x: usize) -> bool {
        self.rows[x] != Self::NONE
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.rows.len()
    }
}

/// Chain-reaction engine; accumulates hints and re-render requests across a hit
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    dirty: DirtyRows,
    rerender: Vec<Coord>,
    removed: u32,
}

impl Resolver {
    pub fn new(width: usize) -> Self {
        Self {
            dirty: DirtyRows::new(width),
            rerender: Vec::new(),
            removed: 0,
        }
    }

    /// Clear hints, re-render list and removal count
    pub fn reset(&mut self, width: usize) {
        self.dirty.reset(width);
        self.rerender.clear();
        self.removed = 0;
    }

    pub fn dirty(&self) -> &DirtyRows {
        &self.dirty
    }

    /// Cells rewritten by self-managed tiles since the last reset
    pub fn rerender(&self) -> &[Coord] {
        &self.rerender
    }

    /// Tiles that left the grid since the last reset
    pub fn removed(&self) -> u32 {
        self.removed
    }

    /// Resolve a hit at `pos`. Returns true if anything happened.
    ///
    /// Empty cells and tiles that are not poppable are no-ops and leave the grid untouched.
    pub fn resolve_hit(&mut self, grid: &mut Grid, pos: Coord) -> bool {
        let Some(tile) = grid.get(pos).copied() else {
            return false;
        };
        if !tile.is_poppable() {
            return false;
        }

        let Activation {
            touched,
            self_managed,
        } = tile.activate(pos, grid);
        if touched.is_empty() {
            return false;
        }

        if self_managed {
            for &cell in &touched {
                self.rerender.push(cell);
                self.dirty.mark(cell);
            }
            return true;
        }

        for &cell in &touched {
            if let Some(hit) = grid.get(cell).copied() {
                if hit.is_chainable() {
                    if cell == pos {
                        grid.set(cell, None);
                        self.removed += 1;
                    } else {
                        self.resolve_hit(grid, cell);
                    }
                }
            }

            if let Some(target) = grid.get_mut(cell) {
                if target.pop() {
                    let points = target.bonus_points();
                    grid.set(cell, None);
                    grid.add_bonus(points);
                    self.removed += 1;
                }
            }

            self.dirty.mark(cell);
        }

        true
    }
}
