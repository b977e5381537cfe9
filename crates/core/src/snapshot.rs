//! Snapshot module - value copies of the grid for observers

use crate::tile::Tile;
use crate::types::Coord;

/// Value copy of a grid, independent of later mutation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major cells (y * width + x)
    pub cells: Vec<Option<Tile>>,
    pub bonus: u32,
}

impl GridSnapshot {
    pub fn clear(&mut self) {
        self.width = 0;
        self.height = 0;
        self.cells.clear();
        self.bonus = 0;
    }

    /// Tile at `pos`, `None` for empty or out-of-range cells
    pub fn get(&self, pos: Coord) -> Option<&Tile> {
        if pos.x < 0 || pos.y < 0 || pos.x as usize >= self.width || pos.y as usize >= self.height {
            return None;
        }
        self.cells[pos.to_index(self.width)].as_ref()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<Tile>]> {
        self.cells.chunks(self.width.max(1))
    }
}
