//! Random line supplier
//!
//! Generates the starting level and every new line from a seeded [`SimpleRng`]. Each cell
//! rolls one of:
//!
//! - a special tile (any non-target id, limited to the configured colors)
//! - a plain color gem
//! - an empty cell (only where the cell above is empty too)
//!
//! A plain color gem above gets a 1-in-4 chance to be continued by the same color, which
//! builds vertical groups. While playing, "above" is the current bottom row.
//!
//! The next line is rolled ahead of time and cached, so the preview always shows what
//! will come in. Cached cells stay until a line consumes them.

use gem_jam_core::{Grid, LevelLayout, LineSupplier, SimpleRng, Tile, TileKind};
use gem_jam_types::{
    Coord, GemColor, DEFAULT_COLOR_COUNT, DEFAULT_FREE_LINES, DEFAULT_LEVEL_HEIGHT,
    DEFAULT_LEVEL_WIDTH,
};

use crate::codec::{tile_from_id, ALL_IDS, TARGET};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomSupplierConfig {
    pub seed: u32,
    pub width: usize,
    pub height: usize,
    /// Empty rows on top of the starting level
    pub free_lines: usize,
    /// Number of gem colors in play (1..=6)
    pub colors: usize,
    /// Place one target in the topmost generated row
    pub target: bool,
}

impl Default for RandomSupplierConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            width: DEFAULT_LEVEL_WIDTH,
            height: DEFAULT_LEVEL_HEIGHT,
            free_lines: DEFAULT_FREE_LINES,
            colors: DEFAULT_COLOR_COUNT,
            target: true,
        }
    }
}

/// Seeded random level and line generator
#[derive(Debug, Clone)]
pub struct RandomLineSupplier {
    config: RandomSupplierConfig,
    rng: SimpleRng,
    /// Pre-rolled next line; outer `None` means the cell has not been rolled yet
    cache: Vec<Option<Option<Tile>>>,
}

impl RandomLineSupplier {
    pub fn new(mut config: RandomSupplierConfig) -> Self {
        config.colors = config.colors.clamp(1, GemColor::ALL.len());
        config.width = config.width.max(1);
        config.height = config.height.max(1);
        Self {
            rng: SimpleRng::new(config.seed),
            cache: vec![None; config.width],
            config,
        }
    }

    pub fn config(&self) -> &RandomSupplierConfig {
        &self.config
    }

    fn random_color(&mut self) -> GemColor {
        GemColor::ALL[self.rng.next_range(self.config.colors as u32) as usize]
    }

    /// Any special or colored tile except targets and colors out of play
    fn random_special(&mut self) -> Tile {
        loop {
            // Skip NONE at index 0.
            let pick = 1 + self.rng.next_range(ALL_IDS.len() as u32 - 1) as usize;
            let id = ALL_IDS[pick];
            if id == TARGET {
                continue;
            }
            let Ok(Some(tile)) = tile_from_id(id) else {
                continue;
            };
            match tile.base_color() {
                Some(color) if color.id() as usize > self.config.colors => continue,
                _ => return tile,
            }
        }
    }

    fn random_tile(&mut self, allow_empty: bool) -> Option<Tile> {
        match self.rng.next_range(if allow_empty { 3 } else { 2 }) {
            0 => Some(self.random_special()),
            1 => Some(Tile::color(self.random_color())),
            _ => None,
        }
    }

    /// Roll every cache cell that is not rolled yet, based on the line above it
    fn fill_cache(&mut self, above: &[Option<Tile>]) {
        for x in 0..self.cache.len() {
            if self.cache[x].is_some() {
                continue;
            }
            let over = above.get(x).copied().flatten();

            let mut rolled = None;
            if let Some(TileKind::Color(color)) = over.map(|t| t.kind) {
                if self.rng.one_in(4) {
                    rolled = Some(Tile::color(color));
                }
            }
            if rolled.is_none() {
                rolled = self.random_tile(over.is_none());
            }
            self.cache[x] = Some(rolled);
        }
    }

    fn bottom_row(grid: &Grid) -> Vec<Option<Tile>> {
        match grid.height() {
            0 => Vec::new(),
            h => grid.row(h - 1).to_vec(),
        }
    }
}

impl LineSupplier for RandomLineSupplier {
    fn get_level(&mut self) -> LevelLayout {
        let RandomSupplierConfig {
            width,
            height,
            free_lines,
            target,
            ..
        } = self.config;
        let mut layout = LevelLayout::empty(width, height);
        self.cache = vec![None; width];

        for y in free_lines..height {
            let above: Vec<Option<Tile>> = if y == 0 {
                vec![None; width]
            } else {
                layout.cells[(y - 1) * width..y * width].to_vec()
            };
            self.fill_cache(&above);
            if y == free_lines && target && width > 0 {
                let x = self.rng.next_range(width as u32) as usize;
                self.cache[x] = Some(Some(Tile::target()));
            }

            for (x, slot) in self.cache.iter_mut().enumerate() {
                layout.cells[y * width + x] = slot.take().flatten();
            }
        }

        layout
    }

    fn get_new_line(&mut self, grid: &Grid) -> Vec<Option<Tile>> {
        let bottom = Self::bottom_row(grid);
        self.fill_cache(&bottom);

        (0..self.cache.len())
            .map(|x| {
                if grid.is_occupied(Coord::new(x as i32, 0)) {
                    None
                } else {
                    self.cache[x].take().flatten()
                }
            })
            .collect()
    }

    fn peek_next_line(&mut self, grid: &Grid) -> Vec<Option<Tile>> {
        let bottom = Self::bottom_row(grid);
        self.fill_cache(&bottom);
        self.cache.iter().map(|slot| slot.flatten()).collect()
    }

    fn restart(&mut self) {
        self.rng = SimpleRng::new(self.config.seed);
        self.cache = vec![None; self.config.width];
    }
}
