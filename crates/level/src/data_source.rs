use gem_jam_core::{Grid, LevelLayout, LineSupplier, Tile};
use gem_jam_types::Coord;

use crate::codec::tile_from_id;
use crate::data::LevelData;
use crate::error::LevelError;

/// Line supplier backed by a hand-made [`LevelData`]
///
/// The screen is `max_lines_on_screen` rows tall; the first `lines_on_start` data rows
/// fill its bottom. Each column then keeps its own cursor into the remaining data rows,
/// so a column that was full when a line came in gets that row's tile later.
#[derive(Debug, Clone)]
pub struct LevelDataSupplier {
    data: LevelData,
    tiles: Vec<Option<Tile>>,
    cursors: Vec<usize>,
}

impl LevelDataSupplier {
    pub fn new(data: LevelData) -> Result<Self, LevelError> {
        let tiles = data
            .gems
            .iter()
            .map(|&id| tile_from_id(id))
            .collect::<Result<Vec<_>, _>>()?;
        let cursors = vec![data.lines_on_start; data.width];
        Ok(Self {
            data,
            tiles,
            cursors,
        })
    }

    pub fn data(&self) -> &LevelData {
        &self.data
    }

    /// Next data row per column
    pub fn cursors(&self) -> &[usize] {
        &self.cursors
    }

    fn tile_at(&self, row: usize, x: usize) -> Option<Tile> {
        self.tiles.get(row * self.data.width + x).copied().flatten()
    }
}

impl LineSupplier for LevelDataSupplier {
    fn get_level(&mut self) -> LevelLayout {
        let width = self.data.width;
        let height = self.data.max_lines_on_screen;
        let mut layout = LevelLayout::empty(width, height);

        let start = (height - self.data.lines_on_start) * width;
        for (cell, tile) in layout.cells[start..].iter_mut().zip(&self.tiles) {
            *cell = *tile;
        }

        self.restart();
        layout
    }

    fn get_new_line(&mut self, grid: &Grid) -> Vec<Option<Tile>> {
        let mut line = vec![None; self.data.width];
        for (x, slot) in line.iter_mut().enumerate() {
            if grid.is_occupied(Coord::new(x as i32, 0)) {
                continue;
            }
            let row = self.cursors[x];
            self.cursors[x] += 1;
            *slot = self.tile_at(row, x);
        }
        line
    }

    fn peek_next_line(&mut self, _grid: &Grid) -> Vec<Option<Tile>> {
        (0..self.data.width)
            .map(|x| self.tile_at(self.cursors[x], x))
            .collect()
    }

    fn restart(&mut self) {
        self.cursors.fill(self.data.lines_on_start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gem_jam_core::TileKind;
    use gem_jam_types::GemColor;

    fn supplier() -> LevelDataSupplier {
        // Rows: [1 2] [9 8] [3 0]; two rows start on a three-row screen.
        let data = LevelData::new(2, 2, 3, vec![1, 2, 9, 8, 3, 0]).unwrap();
        LevelDataSupplier::new(data).unwrap()
    }

    fn kinds(line: &[Option<Tile>]) -> Vec<Option<TileKind>> {
        line.iter().map(|t| t.map(|t| t.kind)).collect()
    }

    #[test]
    fn level_fills_bottom_rows() {
        let mut s = supplier();
        let layout = s.get_level();
        assert_eq!((layout.width, layout.height), (2, 3));
        assert!(layout.cells[0].is_none() && layout.cells[1].is_none());
        assert_eq!(
            layout.cells[2].map(|t| t.kind),
            Some(TileKind::Color(GemColor::Green))
        );
        assert_eq!(layout.cells[5].map(|t| t.kind), Some(TileKind::Target));
    }

    #[test]
    fn peek_does_not_consume() {
        let mut s = supplier();
        let layout = s.get_level();
        let grid = Grid::from_cells(layout.cells, layout.width, layout.height);
        let peeked = s.peek_next_line(&grid);
        assert_eq!(kinds(&peeked), vec![Some(TileKind::Color(GemColor::Lime)), None]);
        assert_eq!(kinds(&s.peek_next_line(&grid)), kinds(&peeked));
        assert_eq!(kinds(&s.get_new_line(&grid)), kinds(&peeked));
        assert_eq!(s.cursors(), &[3, 3]);
    }

    #[test]
    fn full_column_keeps_its_cursor() {
        let mut s = supplier();
        let layout = s.get_level();
        let mut grid = Grid::from_cells(layout.cells, layout.width, layout.height);
        grid.set(Coord::new(1, 0), Some(Tile::target()));

        let line = s.get_new_line(&grid);
        assert!(line[0].is_some());
        assert!(line[1].is_none());
        assert_eq!(s.cursors(), &[3, 2]);

        s.restart();
        assert_eq!(s.cursors(), &[2, 2]);
    }

    #[test]
    fn exhausted_data_yields_empty_cells() {
        let mut s = supplier();
        let layout = s.get_level();
        let grid = Grid::from_cells(layout.cells, layout.width, layout.height);
        s.get_new_line(&grid);
        let line = s.get_new_line(&grid);
        assert!(line.iter().all(Option::is_none));
        assert_eq!(s.cursors(), &[4, 4]);
    }
}
