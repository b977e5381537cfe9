//! Grid module - the level's cell storage and color grouping
//!
//! The grid is a `width x height` array of optional [`Tile`]s stored row-major in a
//! single `Vec` (index = `y * width + x`). Row 0 is the top; new lines enter at the
//! bottom row.
//!
//! Accessors take a [`Coord`] and **panic** when it lies outside the grid. Callers that
//! probe around a position (bombs, the rotator) check [`Grid::in_bounds`] first; an
//! out-of-range access anywhere else is a logic error.
//!
//! Besides the cells the grid carries the two pieces of per-level state that tile
//! behaviour needs: the minimum group size a color hit pops and the bonus counter
//! credited by bonus gems.

use crate::snapshot::GridSnapshot;
use crate::tile::Tile;
use crate::types::{Coord, DEFAULT_MIN_POP_COUNT};

/// Cell storage plus grouping state for one level
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Option<Tile>>,
    min_pop_count: usize,
    bonus: u32,
}

impl Grid {
    /// Create an empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
            min_pop_count: DEFAULT_MIN_POP_COUNT,
            bonus: 0,
        }
    }

    /// Build a grid from row-major cells.
    ///
    /// Panics if `cells.len() != width * height`.
    pub fn from_cells(cells: Vec<Option<Tile>>, width: usize, height: usize) -> Self {
        let mut grid = Self::new(0, 0);
        grid.set_level(cells, width, height);
        grid
    }

    /// Replace the whole level. Resets the bonus counter, keeps `min_pop_count`.
    ///
    /// Panics if `cells.len() != width * height`.
    pub fn set_level(&mut self, cells: Vec<Option<Tile>>, width: usize, height: usize) {
        assert_eq!(
            cells.len(),
            width * height,
            "level data has {} cells, expected {}x{}",
            cells.len(),
            width,
            height
        );
        self.width = width;
        self.height = height;
        self.cells = cells;
        self.bonus = 0;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Minimum group size a color hit pops
    pub fn min_pop_count(&self) -> usize {
        self.min_pop_count
    }

    pub fn set_min_pop_count(&mut self, count: usize) {
        self.min_pop_count = count;
    }

    /// Bonus points collected since the level was set
    pub fn bonus(&self) -> u32 {
        self.bonus
    }

    pub fn add_bonus(&mut self, points: u32) {
        self.bonus += points;
    }

    /// Check if a coordinate lies inside the grid
    pub fn in_bounds(&self, pos: Coord) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Flat index of `pos`. Panics when `pos` is outside the grid.
    #[inline(always)]
    pub fn index_of(&self, pos: Coord) -> usize {
        assert!(
            self.in_bounds(pos),
            "coordinate {} outside {}x{} grid",
            pos,
            self.width,
            self.height
        );
        pos.to_index(self.width)
    }

    /// Coordinate of a flat index
    pub fn coord_of(&self, index: usize) -> Coord {
        Coord::from_index(index, self.width)
    }

    /// Tile at `pos`, `None` if the cell is empty
    pub fn get(&self, pos: Coord) -> Option<&Tile> {
        self.cells[self.index_of(pos)].as_ref()
    }

    pub fn get_mut(&mut self, pos: Coord) -> Option<&mut Tile> {
        let idx = self.index_of(pos);
        self.cells[idx].as_mut()
    }

    /// Overwrite a cell
    pub fn set(&mut self, pos: Coord, tile: Option<Tile>) {
        let idx = self.index_of(pos);
        self.cells[idx] = tile;
    }

    /// Empty a cell and return what it held
    pub fn take(&mut self, pos: Coord) -> Option<Tile> {
        let idx = self.index_of(pos);
        self.cells[idx].take()
    }

    pub fn is_occupied(&self, pos: Coord) -> bool {
        self.get(pos).is_some()
    }

    /// Row-major view of every cell
    pub fn cells(&self) -> &[Option<Tile>] {
        &self.cells
    }

    /// Cells of row `y`, left to right
    pub fn row(&self, y: usize) -> &[Option<Tile>] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Positions of every tile whose group id is `group`, in row-major order
    pub fn group_members(&self, group: usize) -> Vec<Coord> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| matches!(cell, Some(tile) if tile.group == group))
            .map(|(idx, _)| self.coord_of(idx))
            .collect()
    }

    /// Size of the group containing the tile at `pos` (0 for an empty cell)
    pub fn group_size_at(&self, pos: Coord) -> usize {
        match self.get(pos) {
            Some(tile) => self.group_members(tile.group).len(),
            None => 0,
        }
    }

    /// Recompute group ids so that two tiles share a group exactly when they are
    /// 4-connected through tiles of the same base color.
    ///
    /// Every tile first becomes the root of its own group (its flat index). Color-equal
    /// right and down neighbours are then unioned column by column, and finally each
    /// tile is pointed straight at its root. Non-color tiles end up alone.
    pub fn regenerate_groups(&mut self) {
        for (idx, cell) in self.cells.iter_mut().enumerate() {
            if let Some(tile) = cell {
                tile.group = idx;
            }
        }

        for x in 0..self.width {
            for y in 0..self.height {
                let here = y * self.width + x;
                if x + 1 < self.width {
                    self.union_if_color_equal(here, here + 1);
                }
                if y + 1 < self.height {
                    self.union_if_color_equal(here, here + self.width);
                }
            }
        }

        for idx in 0..self.cells.len() {
            if self.cells[idx].is_some() {
                let root = self.find_root(idx);
                if let Some(tile) = self.cells[idx].as_mut() {
                    tile.group = root;
                }
            }
        }
    }

    fn union_if_color_equal(&mut self, here: usize, neighbour: usize) {
        let (Some(a), Some(b)) = (&self.cells[here], &self.cells[neighbour]) else {
            return;
        };
        if !a.color_equals(b) {
            return;
        }

        let root = self.find_root(here);
        let other = self.find_root(neighbour);
        if let Some(tile) = self.cells[other].as_mut() {
            tile.group = root;
        }
    }

    /// Follow group links until a tile that is its own group
    fn find_root(&self, mut idx: usize) -> usize {
        while let Some(tile) = &self.cells[idx] {
            if tile.group == idx {
                break;
            }
            idx = tile.group;
        }
        idx
    }

    /// Independent value copy of the cells and counters
    pub fn snapshot(&self) -> GridSnapshot {
        let mut snap = GridSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Fill an existing snapshot, reusing its allocation
    pub fn snapshot_into(&self, out: &mut GridSnapshot) {
        out.width = self.width;
        out.height = self.height;
        out.bonus = self.bonus;
        out.cells.clear();
        out.cells.extend_from_slice(&self.cells);
    }

    /// Set a cell from test fixtures, ignoring grouping
    #[cfg(test)]
    pub fn set_xy(&mut self, x: i32, y: i32, tile: Tile) {
        self.set(Coord::new(x, y), Some(tile));
    }
}
