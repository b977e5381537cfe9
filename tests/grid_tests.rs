//! Grid tests - grouping, snapshots and bounds

use std::collections::VecDeque;

use gem_jam::core::{Grid, SimpleRng, Tile};
use gem_jam::types::{Coord, GemColor};

/// Random grid with three colors, some specials and holes
fn random_grid(seed: u32, width: usize, height: usize) -> Grid {
    let mut rng = SimpleRng::new(seed);
    let mut grid = Grid::new(width, height);
    for idx in 0..grid.len() {
        let tile = match rng.next_range(8) {
            0 => None,
            1 => Some(Tile::cross_bomb()),
            2 => Some(Tile::target()),
            3 => Some(Tile::iced(GemColor::ALL[rng.next_range(3) as usize])),
            4 => Some(Tile::bonus(GemColor::ALL[rng.next_range(3) as usize])),
            _ => Some(Tile::color(GemColor::ALL[rng.next_range(3) as usize])),
        };
        grid.set(grid.coord_of(idx), tile);
    }
    grid
}

/// Component label per cell from a 4-connected flood fill
fn flood_fill_labels(grid: &Grid) -> Vec<Option<usize>> {
    let mut labels = vec![None; grid.len()];
    let mut next = 0;

    for start in 0..grid.len() {
        if labels[start].is_some() || grid.cells()[start].is_none() {
            continue;
        }
        labels[start] = Some(next);
        let mut queue = VecDeque::from([grid.coord_of(start)]);

        while let Some(pos) = queue.pop_front() {
            let Some(tile) = grid.get(pos).copied() else {
                continue;
            };
            for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1)] {
                let n = Coord::new(pos.x + dx, pos.y + dy);
                if !grid.in_bounds(n) {
                    continue;
                }
                let idx = grid.index_of(n);
                if labels[idx].is_some() {
                    continue;
                }
                if grid.get(n).is_some_and(|other| tile.color_equals(other)) {
                    labels[idx] = Some(next);
                    queue.push_back(n);
                }
            }
        }
        next += 1;
    }
    labels
}

#[test]
fn test_groups_agree_with_flood_fill() {
    for seed in [1, 7, 42, 1234, 99_999] {
        let mut grid = random_grid(seed, 9, 7);
        grid.regenerate_groups();
        let labels = flood_fill_labels(&grid);

        for a in 0..grid.len() {
            for b in 0..grid.len() {
                let (Some(ta), Some(tb)) = (grid.cells()[a], grid.cells()[b]) else {
                    continue;
                };
                assert_eq!(
                    ta.group == tb.group,
                    labels[a] == labels[b],
                    "seed {}: cells {} and {} disagree",
                    seed,
                    a,
                    b
                );
            }
        }
    }
}

#[test]
fn test_group_sizes_match_members() {
    let mut grid = random_grid(5, 6, 6);
    grid.regenerate_groups();
    for idx in 0..grid.len() {
        let pos = grid.coord_of(idx);
        if let Some(tile) = grid.get(pos) {
            let members = grid.group_members(tile.group);
            assert_eq!(grid.group_size_at(pos), members.len());
            assert!(members.contains(&pos));
        }
    }
}

#[test]
fn test_special_tiles_form_singleton_groups() {
    let mut grid = Grid::new(3, 1);
    grid.set(Coord::new(0, 0), Some(Tile::target()));
    grid.set(Coord::new(1, 0), Some(Tile::target()));
    grid.set(Coord::new(2, 0), Some(Tile::area_bomb()));
    grid.regenerate_groups();

    for x in 0..3 {
        assert_eq!(grid.group_size_at(Coord::new(x, 0)), 1);
    }
}

#[test]
fn test_snapshot_is_a_copy() {
    let mut grid = random_grid(3, 4, 3);
    grid.regenerate_groups();
    let snap = grid.snapshot();

    grid.set(Coord::new(0, 0), Some(Tile::rotator()));
    assert_eq!(snap.width, 4);
    assert_eq!(snap.height, 3);
    assert_ne!(snap.get(Coord::new(0, 0)), grid.get(Coord::new(0, 0)));
    assert_eq!(snap.rows().count(), 3);
    assert_eq!(snap.get(Coord::new(9, 9)), None);
}

#[test]
fn test_set_level_resets_bonus() {
    let mut grid = Grid::new(2, 2);
    grid.add_bonus(5);
    grid.set_min_pop_count(4);
    grid.set_level(vec![None; 6], 3, 2);
    assert_eq!(grid.bonus(), 0);
    assert_eq!(grid.min_pop_count(), 4);
    assert_eq!((grid.width(), grid.height()), (3, 2));
}

#[test]
#[should_panic]
fn test_out_of_bounds_set_panics() {
    let mut grid = Grid::new(3, 3);
    grid.set(Coord::new(3, 0), Some(Tile::target()));
}

#[test]
#[should_panic]
fn test_out_of_bounds_get_panics() {
    let grid = Grid::new(3, 3);
    let _ = grid.get(Coord::new(0, -1));
}
