//! Debug grid view
//!
//! Text dump of a grid for terminals and logs. Three layouts:
//!
//! - `plain`: two-character tile glyphs
//! - `index`: flat index and group id of every cell
//! - `coords`: `x,y` and group id of every cell
//!
//! With colors enabled, tiles are tinted by gem color and the cells of a highlighted group
//! get a blue background.

use clap::ValueEnum;
use crossterm::style::{style, Color, Stylize};

use crate::core::{Grid, Tile, TileKind};
use crate::types::{Coord, GemColor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ViewMode {
    #[default]
    Plain,
    Index,
    Coords,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DebugView {
    pub mode: ViewMode,
    pub color: bool,
    /// Group id to mark
    pub highlight: Option<usize>,
}

impl DebugView {
    pub fn new(mode: ViewMode, color: bool) -> Self {
        Self {
            mode,
            color,
            highlight: None,
        }
    }

    pub fn with_highlight(mut self, group: Option<usize>) -> Self {
        self.highlight = group;
        self
    }

    /// Render the grid, one text line per row
    pub fn render(&self, grid: &Grid) -> String {
        let cell_width = match self.mode {
            ViewMode::Plain => 2,
            ViewMode::Index => digits(grid.len()) * 2 + 1,
            ViewMode::Coords => digits(grid.width()) + digits(grid.height()) + digits(grid.len()) + 2,
        };

        let mut out = String::new();
        for y in 0..grid.height() as i32 {
            for x in 0..grid.width() as i32 {
                let pos = Coord::new(x, y);
                let tile = grid.get(pos);
                let text = match self.mode {
                    ViewMode::Plain => glyph(tile).to_string(),
                    ViewMode::Index => format!("{}:{}", grid.index_of(pos), group_label(tile)),
                    ViewMode::Coords => format!("{},{}:{}", x, y, group_label(tile)),
                };
                let text = format!("{:>cell_width$}", text);
                if x > 0 {
                    out.push(' ');
                }
                self.push_cell(&mut out, text, tile);
            }
            out.push('\n');
        }
        out
    }

    fn push_cell(&self, out: &mut String, text: String, tile: Option<&Tile>) {
        if !self.color {
            out.push_str(&text);
            return;
        }

        let mut styled = style(text).with(tile.map_or(Color::DarkGrey, tile_color));
        if tile.is_some_and(|t| Some(t.group) == self.highlight) {
            styled = styled.on(Color::DarkBlue);
        }
        out.push_str(&styled.to_string());
    }
}

/// Two-character glyph: color letter, then `+` for bonus and `*` for ice
pub fn glyph(tile: Option<&Tile>) -> &'static str {
    let Some(tile) = tile else {
        return " .";
    };
    match tile.kind {
        TileKind::Color(color) => match color {
            GemColor::Green => "G ",
            GemColor::Red => "R ",
            GemColor::Lime => "L ",
            GemColor::Orange => "O ",
            GemColor::Blue => "B ",
            GemColor::White => "W ",
        },
        TileKind::Bonus(color) => match color {
            GemColor::Green => "G+",
            GemColor::Red => "R+",
            GemColor::Lime => "L+",
            GemColor::Orange => "O+",
            GemColor::Blue => "B+",
            GemColor::White => "W+",
        },
        TileKind::Iced { color, .. } => match color {
            GemColor::Green => "G*",
            GemColor::Red => "R*",
            GemColor::Lime => "L*",
            GemColor::Orange => "O*",
            GemColor::Blue => "B*",
            GemColor::White => "W*",
        },
        TileKind::CrossBomb => "XX",
        TileKind::AreaBomb => "##",
        TileKind::Rotator => "@@",
        TileKind::Target => "TT",
    }
}

fn group_label(tile: Option<&Tile>) -> String {
    tile.map_or_else(|| "-".to_string(), |t| t.group.to_string())
}

fn tile_color(tile: &Tile) -> Color {
    match tile.base_color() {
        Some(GemColor::Green) => Color::Green,
        Some(GemColor::Red) => Color::Red,
        Some(GemColor::Lime) => Color::Cyan,
        Some(GemColor::Orange) => Color::DarkYellow,
        Some(GemColor::Blue) => Color::Blue,
        Some(GemColor::White) => Color::White,
        None => match tile.kind {
            TileKind::Target => Color::Magenta,
            TileKind::Rotator => Color::DarkMagenta,
            _ => Color::Grey,
        },
    }
}

fn digits(n: usize) -> usize {
    n.checked_ilog10().map_or(1, |log| log as usize + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid {
        let mut grid = Grid::new(3, 2);
        grid.set(Coord::new(0, 1), Some(Tile::color(GemColor::Red)));
        grid.set(Coord::new(1, 1), Some(Tile::bonus(GemColor::Red)));
        grid.set(Coord::new(2, 1), Some(Tile::cross_bomb()));
        grid.set(Coord::new(2, 0), Some(Tile::iced(GemColor::Blue)));
        grid.regenerate_groups();
        grid
    }

    #[test]
    fn plain_view() {
        let text = DebugView::new(ViewMode::Plain, false).render(&sample());
        assert_eq!(text, " .  . B*\nR  R+ XX\n");
    }

    #[test]
    fn index_view_shows_groups() {
        let text = DebugView::new(ViewMode::Index, false).render(&sample());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("0:-"));
        assert!(lines[1].contains("3:3"));
        assert!(lines[1].contains("4:3"));
        assert!(lines[1].contains("5:5"));
    }

    #[test]
    fn coords_view() {
        let text = DebugView::new(ViewMode::Coords, false).render(&sample());
        assert!(text.contains("2,0:2"));
        assert!(text.contains("1,1:3"));
    }

    #[test]
    fn colored_view_keeps_glyphs() {
        let view = DebugView::new(ViewMode::Plain, true).with_highlight(Some(3));
        let text = view.render(&sample());
        assert!(text.contains("R+"));
        assert!(text.contains("XX"));
        assert!(text.contains("\u{1b}["));
        assert_eq!(text.lines().count(), 2);
    }
}
