//! Level adapter tests - id codec, text format and line suppliers

use gem_jam::core::{Grid, LineSupplier, NullSink, RoundController, Tile, TileKind};
use gem_jam::level::codec::{ALL_IDS, HIGHEST_ID};
use gem_jam::level::{
    tile_from_id, tile_id, LevelData, LevelDataSupplier, LevelError, RandomLineSupplier,
    RandomSupplierConfig, RescueTargetRules,
};
use gem_jam::types::{Coord, GemColor};

const SAMPLE: &str = "\
3,2,4
  1  1  2
  9  2  8
  3  3  3
257514 11
";

#[test]
fn test_every_id_survives_the_codec() {
    for id in ALL_IDS {
        let tile = tile_from_id(id).unwrap();
        assert_eq!(tile_id(tile.as_ref()), id, "id {}", id);
    }
    assert_eq!(ALL_IDS.last(), Some(&HIGHEST_ID));
}

#[test]
fn test_unknown_ids_are_rejected() {
    for id in [7, 12, 15, 263, 519, 768, 1024] {
        assert!(
            matches!(tile_from_id(id), Err(LevelError::UnknownTileId(bad)) if bad == id),
            "id {} accepted",
            id
        );
    }
}

#[test]
fn test_codec_flags() {
    let iced = tile_from_id(257).unwrap().unwrap();
    assert_eq!(iced.kind, Tile::iced(GemColor::Green).kind);
    let bonus = tile_from_id(514).unwrap().unwrap();
    assert_eq!(bonus.kind, TileKind::Bonus(GemColor::Red));
    assert_eq!(tile_id(None), 0);
}

#[test]
fn test_parse_sample_level() {
    let data = LevelData::parse(SAMPLE).unwrap();
    assert_eq!(data.width, 3);
    assert_eq!(data.lines_on_start, 2);
    assert_eq!(data.max_lines_on_screen, 4);
    assert_eq!(data.rows(), 4);
    assert_eq!(&data.gems[9..], &[257, 514, 11]);
}

#[test]
fn test_text_round_trip() {
    let data = LevelData::parse(SAMPLE).unwrap();
    let text = data.to_level_string();
    assert_eq!(text, SAMPLE);
    assert_eq!(text.parse::<LevelData>().unwrap(), data);
}

#[test]
fn test_parse_errors() {
    assert!(matches!(LevelData::parse(""), Err(LevelError::MissingHeader)));
    assert!(matches!(
        LevelData::parse("3,2\n  1\n"),
        Err(LevelError::InvalidHeader(_))
    ));
    assert!(matches!(
        LevelData::parse("3,1,2\n  1  2\n  1\n"),
        Err(LevelError::RaggedRow { line: 3, .. })
    ));
    assert!(matches!(
        LevelData::parse("3,1,2\n  1  x\n"),
        Err(LevelError::InvalidNumber { line: 2, .. })
    ));
    assert!(matches!(
        LevelData::parse("3,1,2\n  1  7\n"),
        Err(LevelError::UnknownTileId(7))
    ));
    assert!(matches!(LevelData::parse("3,1,2\n"), Err(LevelError::EmptyLevel)));
}

#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join(format!("gem-jam-level-{}.txt", std::process::id()));
    std::fs::write(&path, SAMPLE).unwrap();
    let loaded = LevelData::load(&path);
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded.unwrap(), LevelData::parse(SAMPLE).unwrap());

    let missing = LevelData::load(std::env::temp_dir().join("gem-jam-no-such-level.txt"));
    assert!(matches!(missing, Err(LevelError::Io(_))));
}

#[test]
fn test_data_supplier_feeds_remaining_rows() {
    let data = LevelData::parse(SAMPLE).unwrap();
    let mut supplier = LevelDataSupplier::new(data).unwrap();
    let layout = supplier.get_level();
    assert_eq!((layout.width, layout.height), (3, 4));
    let mut grid = Grid::from_cells(layout.cells, layout.width, layout.height);

    // First two rows sit at the bottom of the screen.
    assert!(grid.row(0).iter().all(Option::is_none));
    assert!(grid.row(1).iter().all(Option::is_none));
    assert_eq!(grid.get(Coord::new(2, 3)).map(|t| t.kind), Some(TileKind::Target));

    let preview = supplier.peek_next_line(&grid);
    let line = supplier.get_new_line(&grid);
    assert_eq!(preview, line);
    assert!(line.iter().all(|t| t.map(|t| t.kind) == Some(TileKind::Color(GemColor::Lime))));
    assert_eq!(supplier.cursors(), &[3, 3, 3]);

    // A column with an occupied top cell keeps its cursor.
    grid.set(Coord::new(1, 0), Some(Tile::target()));
    let line = supplier.get_new_line(&grid);
    assert!(line[1].is_none());
    assert_eq!(supplier.cursors(), &[4, 3, 4]);

    supplier.restart();
    assert_eq!(supplier.cursors(), &[2, 2, 2]);
}

fn random(seed: u32) -> RandomLineSupplier {
    RandomLineSupplier::new(RandomSupplierConfig {
        seed,
        ..Default::default()
    })
}

#[test]
fn test_random_levels_repeat_per_seed() {
    let a = random(11).get_level();
    let b = random(11).get_level();
    let c = random(12).get_level();
    assert_eq!(a, b);
    assert_ne!(a.cells, c.cells);
}

#[test]
fn test_random_level_shape() {
    let mut supplier = random(3);
    let layout = supplier.get_level();
    let grid = Grid::from_cells(layout.cells, layout.width, layout.height);

    for y in 0..3 {
        assert!(grid.row(y).iter().all(Option::is_none), "row {} not free", y);
    }
    let targets = grid
        .cells()
        .iter()
        .flatten()
        .filter(|t| t.kind == TileKind::Target)
        .count();
    assert_eq!(targets, 1);
    // Only the first four colors are in play.
    assert!(grid
        .cells()
        .iter()
        .flatten()
        .filter_map(|t| t.base_color())
        .all(|c| c.id() <= 4));
}

#[test]
fn test_random_preview_matches_next_line() {
    let mut supplier = random(8);
    let layout = supplier.get_level();
    let grid = Grid::from_cells(layout.cells, layout.width, layout.height);

    let first = supplier.peek_next_line(&grid);
    let again = supplier.peek_next_line(&grid);
    assert_eq!(first, again);
    assert_eq!(supplier.get_new_line(&grid), first);
}

#[test]
fn test_random_restart_replays() {
    let mut supplier = random(21);
    let layout = supplier.get_level();
    let grid = Grid::from_cells(layout.cells.clone(), layout.width, layout.height);
    let line = supplier.get_new_line(&grid);

    supplier.restart();
    assert_eq!(supplier.get_level(), layout);
    assert_eq!(supplier.get_new_line(&grid), line);
}

#[test]
fn test_zero_height_level_is_rejected() {
    assert!(matches!(
        LevelData::parse("3,0,0\n  1\n"),
        Err(LevelError::InvalidHeader(_))
    ));
    assert!(matches!(
        LevelData::new(1, 0, 0, vec![1]),
        Err(LevelError::InvalidHeader(_))
    ));
}

#[test]
fn test_random_level_has_at_least_one_cell() {
    let supplier = RandomLineSupplier::new(RandomSupplierConfig {
        width: 0,
        height: 0,
        free_lines: 0,
        ..Default::default()
    });
    assert_eq!((supplier.config().width, supplier.config().height), (1, 1));

    let mut c = RoundController::new(supplier, RescueTargetRules::default(), NullSink::new());
    assert_eq!((c.grid().width(), c.grid().height()), (1, 1));
    c.force_new_line();
    assert!(c.tick(1).is_some());
}
