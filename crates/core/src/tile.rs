//! Tile module - gem variants and their activation/pop behaviour
//!
//! Every cell of the [`Grid`] is either empty or holds a [`Tile`]. A tile is a plain
//! value: its variant lives in [`TileKind`], and the only per-instance state besides the
//! variant is the `group` id written by [`Grid::regenerate_groups`].
//!
//! Behaviour is split in two steps:
//!
//! - [`Tile::activate`] decides which cells a hit implicates. Most variants only *report*
//!   cells and leave removal to the resolver; the rotator rewrites the grid itself and
//!   reports `self_managed = true`.
//! - [`Tile::pop`] is applied by the resolver to every implicated cell and decides whether
//!   the tile actually leaves the grid (iced gems absorb a hit first).
//!
//! Chainable tiles (the two bombs) always list their own position first, so a chain
//! consumes its origin before anything else can trigger it again.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::types::{Coord, GemColor, BONUS_POINTS, ICE_HITS};

/// Blast offsets of the cross bomb, relative to the bomb (self excluded)
pub const CROSS_BOMB_PATTERN: [Coord; 12] = [
    Coord::new(0, -2),
    Coord::new(-1, -1),
    Coord::new(0, -1),
    Coord::new(1, -1),
    Coord::new(-2, 0),
    Coord::new(-2, -1),
    Coord::new(1, 0),
    Coord::new(2, 0),
    Coord::new(-1, 1),
    Coord::new(0, 1),
    Coord::new(1, 1),
    Coord::new(0, 2),
];

/// Neighbour ring turned by the rotator, in clockwise order starting top-left
pub const ROTATOR_RING: [Coord; 8] = [
    Coord::new(-1, -1),
    Coord::new(0, -1),
    Coord::new(1, -1),
    Coord::new(1, 0),
    Coord::new(1, 1),
    Coord::new(0, 1),
    Coord::new(-1, 1),
    Coord::new(-1, 0),
];

/// Gem variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// Plain colored gem
    Color(GemColor),
    /// Colored gem that credits bonus points when popped
    Bonus(GemColor),
    /// Colored gem behind ice; absorbs `remaining_hits` pops before breaking
    Iced {
        color: GemColor,
        remaining_hits: i8,
    },
    /// Pops a fixed diamond-ish pattern around itself
    CrossBomb,
    /// Pops its whole row and column ("firework")
    AreaBomb,
    /// Turns its eight neighbours clockwise, then vanishes
    Rotator,
    /// Marker that can never be popped
    Target,
}

/// One occupied cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub kind: TileKind,
    /// Group id; meaningful only right after [`Grid::regenerate_groups`]
    pub group: usize,
}

/// Result of activating a tile
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Activation {
    /// Cells implicated by the activation (pop targets, or cells to re-render)
    pub touched: Vec<Coord>,
    /// True when the tile already rewrote the grid; the caller must not pop `touched`
    pub self_managed: bool,
}

impl Activation {
    fn pop(touched: Vec<Coord>) -> Self {
        Self {
            touched,
            self_managed: false,
        }
    }

    fn managed(touched: Vec<Coord>) -> Self {
        Self {
            touched,
            self_managed: true,
        }
    }
}

impl Tile {
    pub fn new(kind: TileKind) -> Self {
        Self { kind, group: 0 }
    }

    pub fn color(color: GemColor) -> Self {
        Self::new(TileKind::Color(color))
    }

    pub fn bonus(color: GemColor) -> Self {
        Self::new(TileKind::Bonus(color))
    }

    pub fn iced(color: GemColor) -> Self {
        Self::new(TileKind::Iced {
            color,
            remaining_hits: ICE_HITS,
        })
    }

    pub fn cross_bomb() -> Self {
        Self::new(TileKind::CrossBomb)
    }

    pub fn area_bomb() -> Self {
        Self::new(TileKind::AreaBomb)
    }

    pub fn rotator() -> Self {
        Self::new(TileKind::Rotator)
    }

    pub fn target() -> Self {
        Self::new(TileKind::Target)
    }

    /// Base color for the color family (plain, bonus, iced)
    pub fn base_color(&self) -> Option<GemColor> {
        match self.kind {
            TileKind::Color(color) | TileKind::Bonus(color) => Some(color),
            TileKind::Iced { color, .. } => Some(color),
            _ => None,
        }
    }

    /// True if both tiles belong to the color family and share a color
    pub fn color_equals(&self, other: &Tile) -> bool {
        match (self.base_color(), other.base_color()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    /// Chainable tiles resolve recursively when caught in another tile's blast
    pub fn is_chainable(&self) -> bool {
        matches!(self.kind, TileKind::CrossBomb | TileKind::AreaBomb)
    }

    pub fn is_poppable(&self) -> bool {
        !matches!(self.kind, TileKind::Target)
    }

    /// Remaining ice for iced gems
    pub fn remaining_hits(&self) -> Option<i8> {
        match self.kind {
            TileKind::Iced { remaining_hits, .. } => Some(remaining_hits),
            _ => None,
        }
    }

    /// Bonus credited when this tile is removed by a pop
    pub fn bonus_points(&self) -> u32 {
        match self.kind {
            TileKind::Bonus(_) => BONUS_POINTS,
            _ => 0,
        }
    }

    /// Apply one pop. Returns true when the tile should be removed.
    pub fn pop(&mut self) -> bool {
        match &mut self.kind {
            TileKind::Iced { remaining_hits, .. } => {
                *remaining_hits -= 1;
                *remaining_hits < 0
            }
            _ => self.is_poppable(),
        }
    }

    /// Activate this tile, which sits at `pos` on `grid`.
    ///
    /// `self` is a copy of the grid cell; variants that rewrite the grid do so through
    /// `grid` directly.
    pub fn activate(&self, pos: Coord, grid: &mut Grid) -> Activation {
        match self.kind {
            TileKind::Color(_) | TileKind::Bonus(_) | TileKind::Iced { .. } => {
                let members = grid.group_members(self.group);
                if members.len() >= grid.min_pop_count() {
                    Activation::pop(members)
                } else {
                    Activation::pop(Vec::new())
                }
            }
            TileKind::CrossBomb => {
                let mut touched = Vec::with_capacity(CROSS_BOMB_PATTERN.len() + 1);
                touched.push(pos);
                touched.extend(
                    CROSS_BOMB_PATTERN
                        .iter()
                        .map(|&offset| pos + offset)
                        .filter(|&c| grid.in_bounds(c)),
                );
                Activation::pop(touched)
            }
            TileKind::AreaBomb => Activation::pop(area_blast(pos, grid)),
            TileKind::Rotator => Activation::managed(rotate_ring(pos, grid)),
            TileKind::Target => Activation::managed(Vec::new()),
        }
    }
}

/// Self, then the column above and below, then the row left and right
fn area_blast(pos: Coord, grid: &Grid) -> Vec<Coord> {
    let width = grid.width() as i32;
    let height = grid.height() as i32;

    let mut touched = Vec::with_capacity((width + height - 1) as usize);
    touched.push(pos);
    touched.extend((0..pos.y).map(|y| Coord::new(pos.x, y)));
    touched.extend((pos.y + 1..height).map(|y| Coord::new(pos.x, y)));
    touched.extend((0..pos.x).map(|x| Coord::new(x, pos.y)));
    touched.extend((pos.x + 1..width).map(|x| Coord::new(x, pos.y)));
    touched
}

/// Turn the ring around `pos` one step clockwise and remove the rotator.
///
/// Rotators on the outer border only remove themselves.
fn rotate_ring(pos: Coord, grid: &mut Grid) -> Vec<Coord> {
    let mut touched = Vec::with_capacity(ROTATOR_RING.len() + 1);
    touched.push(pos);

    let interior = pos.x > 0
        && pos.y > 0
        && pos.x < grid.width() as i32 - 1
        && pos.y < grid.height() as i32 - 1;

    if interior {
        let ring: ArrayVec<Coord, 8> = ROTATOR_RING.iter().map(|&o| pos + o).collect();
        let taken: ArrayVec<Option<Tile>, 8> = ring.iter().map(|&c| grid.take(c)).collect();

        // Each ring slot receives the content of its counter-clockwise neighbour.
        for (i, &c) in ring.iter().enumerate() {
            grid.set(c, taken[(i + ring.len() - 1) % ring.len()]);
            touched.push(c);
        }
    }

    grid.set(pos, None);
    touched
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_with(width: usize, height: usize, tiles: &[(i32, i32, Tile)]) -> Grid {
        let mut grid = Grid::new(width, height);
        for &(x, y, tile) in tiles {
            grid.set(Coord::new(x, y), Some(tile));
        }
        grid.regenerate_groups();
        grid
    }

    #[test]
    fn test_chainable_flags() {
        assert!(Tile::cross_bomb().is_chainable());
        assert!(Tile::area_bomb().is_chainable());
        assert!(!Tile::rotator().is_chainable());
        assert!(!Tile::target().is_chainable());
        assert!(!Tile::color(GemColor::Red).is_chainable());
        assert!(!Tile::iced(GemColor::Red).is_chainable());
    }

    #[test]
    fn test_color_equals_across_family() {
        let plain = Tile::color(GemColor::Blue);
        assert!(plain.color_equals(&Tile::bonus(GemColor::Blue)));
        assert!(plain.color_equals(&Tile::iced(GemColor::Blue)));
        assert!(!plain.color_equals(&Tile::color(GemColor::Red)));
        assert!(!plain.color_equals(&Tile::cross_bomb()));
        assert!(!Tile::target().color_equals(&Tile::target()));
    }

    #[test]
    fn test_pop_plain_and_target() {
        assert!(Tile::color(GemColor::Green).pop());
        assert!(Tile::bonus(GemColor::Green).pop());
        assert!(!Tile::target().pop());
    }

    #[test]
    fn test_iced_pop_needs_two_hits() {
        let mut tile = Tile::iced(GemColor::White);
        assert_eq!(tile.remaining_hits(), Some(1));
        assert!(!tile.pop());
        assert_eq!(tile.remaining_hits(), Some(0));
        assert!(tile.pop());
    }

    #[test]
    fn test_bonus_points() {
        assert_eq!(Tile::bonus(GemColor::Lime).bonus_points(), BONUS_POINTS);
        assert_eq!(Tile::color(GemColor::Lime).bonus_points(), 0);
    }

    #[test]
    fn test_cross_bomb_interior_has_thirteen_cells() {
        let mut grid = grid_with(7, 7, &[(3, 3, Tile::cross_bomb())]);
        let pos = Coord::new(3, 3);
        let tile = *grid.get(pos).unwrap();
        let act = tile.activate(pos, &mut grid);
        assert!(!act.self_managed);
        assert_eq!(act.touched.len(), 13);
        assert_eq!(act.touched[0], pos);
        assert!(act.touched.contains(&Coord::new(1, 2)));
        assert!(!act.touched.contains(&Coord::new(2, 3)));
    }

    #[test]
    fn test_cross_bomb_corner_is_clipped() {
        let mut grid = grid_with(5, 5, &[(0, 0, Tile::cross_bomb())]);
        let tile = *grid.get(Coord::new(0, 0)).unwrap();
        let act = tile.activate(Coord::new(0, 0), &mut grid);
        // (1,0) (2,0) (0,1) (1,1) (0,2) survive clipping
        assert_eq!(act.touched.len(), 6);
        assert_eq!(act.touched[0], Coord::new(0, 0));
    }

    #[test]
    fn test_area_bomb_covers_row_and_column() {
        let mut grid = grid_with(4, 3, &[(1, 1, Tile::area_bomb())]);
        let tile = *grid.get(Coord::new(1, 1)).unwrap();
        let act = tile.activate(Coord::new(1, 1), &mut grid);
        assert_eq!(act.touched.len(), 4 + 3 - 1);
        assert_eq!(
            act.touched,
            vec![
                Coord::new(1, 1),
                Coord::new(1, 0),
                Coord::new(1, 2),
                Coord::new(0, 1),
                Coord::new(2, 1),
                Coord::new(3, 1),
            ]
        );
    }

    #[test]
    fn test_small_group_activates_nothing() {
        let mut grid = grid_with(
            3,
            1,
            &[
                (0, 0, Tile::color(GemColor::Red)),
                (1, 0, Tile::color(GemColor::Red)),
            ],
        );
        let tile = *grid.get(Coord::new(0, 0)).unwrap();
        let act = tile.activate(Coord::new(0, 0), &mut grid);
        assert!(act.touched.is_empty());
        assert!(!act.self_managed);
    }

    #[test]
    fn test_rotator_turns_ring_clockwise() {
        let colors = GemColor::ALL;
        let mut tiles = vec![(1, 1, Tile::rotator())];
        // Fill the ring with distinct markers: ring slot i gets a unique tile.
        let markers: Vec<Tile> = vec![
            Tile::color(colors[0]),
            Tile::color(colors[1]),
            Tile::color(colors[2]),
            Tile::color(colors[3]),
            Tile::color(colors[4]),
            Tile::color(colors[5]),
            Tile::bonus(colors[0]),
            Tile::bonus(colors[1]),
        ];
        for (i, offset) in ROTATOR_RING.iter().enumerate() {
            tiles.push((1 + offset.x, 1 + offset.y, markers[i]));
        }
        let mut grid = grid_with(3, 3, &tiles);
        let before: Vec<Option<TileKind>> = ROTATOR_RING
            .iter()
            .map(|&o| grid.get(Coord::new(1, 1) + o).map(|t| t.kind))
            .collect();

        let act = Tile::rotator().activate(Coord::new(1, 1), &mut grid);
        assert!(act.self_managed);
        assert_eq!(act.touched.len(), 9);
        assert!(grid.get(Coord::new(1, 1)).is_none());

        for i in 0..8 {
            let c = Coord::new(1, 1) + ROTATOR_RING[(i + 1) % 8];
            assert_eq!(grid.get(c).map(|t| t.kind), before[i]);
        }
    }

    #[test]
    fn test_rotator_on_edge_only_removes_itself() {
        let mut grid = grid_with(
            3,
            3,
            &[
                (1, 0, Tile::rotator()),
                (0, 0, Tile::color(GemColor::Red)),
                (2, 0, Tile::color(GemColor::Blue)),
            ],
        );
        let act = Tile::rotator().activate(Coord::new(1, 0), &mut grid);
        assert_eq!(act.touched, vec![Coord::new(1, 0)]);
        assert!(act.self_managed);
        assert!(grid.get(Coord::new(1, 0)).is_none());
        assert_eq!(
            grid.get(Coord::new(0, 0)).map(|t| t.kind),
            Some(TileKind::Color(GemColor::Red))
        );
    }

    #[test]
    fn test_target_activation_is_noop() {
        let mut grid = grid_with(2, 2, &[(0, 0, Tile::target())]);
        let before = grid.clone();
        let act = Tile::target().activate(Coord::new(0, 0), &mut grid);
        assert!(act.touched.is_empty());
        assert!(act.self_managed);
        assert_eq!(grid, before);
    }
}
