//! Hit selection for unattended runs
//!
//! Picks, in order of preference: any bomb, the largest group that would pop, a rotator.
//! Ties go to the cell that comes first in row-major order, which keeps runs reproducible.

use crate::core::{Grid, TileKind};
use crate::types::Coord;

/// Best cell to hit, or `None` when no hit would change the board
pub fn pick_hit(grid: &Grid) -> Option<Coord> {
    let mut bomb = None;
    let mut rotator = None;
    let mut best_group: Option<(usize, Coord)> = None;

    let mut sizes = vec![0usize; grid.len()];
    for tile in grid.cells().iter().flatten() {
        sizes[tile.group] += 1;
    }

    for (idx, cell) in grid.cells().iter().enumerate() {
        let Some(tile) = cell else {
            continue;
        };
        let pos = grid.coord_of(idx);
        match tile.kind {
            TileKind::CrossBomb | TileKind::AreaBomb => {
                bomb.get_or_insert(pos);
            }
            TileKind::Rotator => {
                rotator.get_or_insert(pos);
            }
            TileKind::Target => {}
            _ => {
                let size = sizes[tile.group];
                let better = best_group.map_or(true, |(best, _)| size > best);
                if size >= grid.min_pop_count() && better {
                    best_group = Some((size, pos));
                }
            }
        }
    }

    bomb.or(best_group.map(|(_, pos)| pos)).or(rotator)
}
