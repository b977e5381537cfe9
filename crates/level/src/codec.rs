//! Tile id codec
//!
//! Level files and observations store tiles as small integers:
//!
//! | Bits | Meaning |
//! |------|---------|
//! | 0-2 | color id (1..=6), 0 for non-color tiles |
//! | 3-7 | special item (8 target, 9 cross bomb, 10 area bomb, 11 rotator) |
//! | 8 | ice flag |
//! | 9 | bonus flag |
//!
//! The ids are therefore not contiguous; [`ALL_IDS`] lists every valid one in ascending
//! order.

use gem_jam_core::{Tile, TileKind};
use gem_jam_types::GemColor;

use crate::error::LevelError;

pub const NONE: u16 = 0;
pub const COLOR_MASK: u16 = 0b111;
pub const TARGET: u16 = 8;
pub const CROSS_BOMB: u16 = 9;
pub const AREA_BOMB: u16 = 10;
pub const ROTATOR: u16 = 11;
pub const ICE_FLAG: u16 = 256;
pub const BONUS_FLAG: u16 = 512;

/// Largest valid id (white bonus gem)
pub const HIGHEST_ID: u16 = 518;

/// Every valid id, ascending
pub const ALL_IDS: [u16; 23] = [
    0, 1, 2, 3, 4, 5, 6, 8, 9, 10, 11, 257, 258, 259, 260, 261, 262, 513, 514, 515, 516, 517, 518,
];

/// Decode an id. `Ok(None)` is an empty cell.
pub fn tile_from_id(id: u16) -> Result<Option<Tile>, LevelError> {
    let tile = match id {
        NONE => return Ok(None),
        TARGET => Tile::target(),
        CROSS_BOMB => Tile::cross_bomb(),
        AREA_BOMB => Tile::area_bomb(),
        ROTATOR => Tile::rotator(),
        _ => {
            let color = GemColor::from_id((id & COLOR_MASK) as u8)
                .ok_or(LevelError::UnknownTileId(id))?;
            match id & !COLOR_MASK {
                0 => Tile::color(color),
                ICE_FLAG => Tile::iced(color),
                BONUS_FLAG => Tile::bonus(color),
                _ => return Err(LevelError::UnknownTileId(id)),
            }
        }
    };
    Ok(Some(tile))
}

/// Encode a cell
pub fn tile_id(tile: Option<&Tile>) -> u16 {
    let Some(tile) = tile else {
        return NONE;
    };
    match tile.kind {
        TileKind::Color(color) => color.id() as u16,
        TileKind::Iced { color, .. } => ICE_FLAG | color.id() as u16,
        TileKind::Bonus(color) => BONUS_FLAG | color.id() as u16,
        TileKind::Target => TARGET,
        TileKind::CrossBomb => CROSS_BOMB,
        TileKind::AreaBomb => AREA_BOMB,
        TileKind::Rotator => ROTATOR,
    }
}

/// Decimal digits needed to print `n`
pub fn digit_count(n: u16) -> usize {
    n.checked_ilog10().map_or(1, |log| log as usize + 1)
}
