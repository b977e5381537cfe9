//! Level data and its text format
//!
//! A level file starts with a header `digits,lines_on_start,max_lines_on_screen` and
//! continues with one line per data row. Every tile id is right-aligned in a field
//! `digits` characters wide:
//!
//! ```text
//! 3,2,4
//!   1  1  2
//!   9  2  8
//!   3  3  3
//! ```
//!
//! The first `lines_on_start` rows are visible when the level starts (at the bottom of a
//! screen `max_lines_on_screen` rows tall); the remaining rows are fed in as new lines.

use std::path::Path;
use std::str::FromStr;

use crate::codec::{digit_count, tile_from_id, HIGHEST_ID};
use crate::error::LevelError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelData {
    pub width: usize,
    pub lines_on_start: usize,
    pub max_lines_on_screen: usize,
    /// Row-major tile ids
    pub gems: Vec<u16>,
}

impl LevelData {
    /// Build level data, validating its shape and every id
    pub fn new(
        width: usize,
        lines_on_start: usize,
        max_lines_on_screen: usize,
        gems: Vec<u16>,
    ) -> Result<Self, LevelError> {
        if width == 0 || gems.is_empty() {
            return Err(LevelError::EmptyLevel);
        }
        if max_lines_on_screen == 0 {
            return Err(LevelError::InvalidHeader(
                "a level needs at least one line on screen".to_string(),
            ));
        }
        if lines_on_start > max_lines_on_screen {
            return Err(LevelError::InvalidHeader(format!(
                "{} lines on start exceed {} lines on screen",
                lines_on_start, max_lines_on_screen
            )));
        }
        if gems.len() % width != 0 {
            return Err(LevelError::RaggedRow {
                line: gems.len() / width + 2,
                expected: width,
                found: gems.len() % width,
            });
        }
        for &id in &gems {
            tile_from_id(id)?;
        }

        Ok(Self {
            width,
            lines_on_start,
            max_lines_on_screen,
            gems,
        })
    }

    /// Number of data rows
    pub fn rows(&self) -> usize {
        self.gems.len() / self.width
    }

    /// Read and parse a level file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse the text format
    pub fn parse(text: &str) -> Result<Self, LevelError> {
        let mut lines = text.lines();
        let header = lines
            .by_ref()
            .find(|line| !line.trim().is_empty())
            .ok_or(LevelError::MissingHeader)?;
        let (digits, lines_on_start, max_lines_on_screen) = parse_header(header)?;

        let mut width = 0;
        let mut gems = Vec::new();
        for (n, line) in lines.enumerate() {
            let line_no = n + 2;
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }

            let fields: Vec<&[u8]> = line.as_bytes().chunks(digits).collect();
            if width == 0 {
                width = fields.len();
            }
            if fields.len() != width || line.len() % digits != 0 {
                return Err(LevelError::RaggedRow {
                    line: line_no,
                    expected: width,
                    found: line.len().div_ceil(digits),
                });
            }

            for field in fields {
                let text = String::from_utf8_lossy(field);
                let id = text.trim().parse::<u16>().map_err(|_| LevelError::InvalidNumber {
                    line: line_no,
                    text: text.to_string(),
                })?;
                gems.push(id);
            }
        }

        Self::new(width, lines_on_start, max_lines_on_screen, gems)
    }

    /// Render the text format
    pub fn to_level_string(&self) -> String {
        let digits = digit_count(HIGHEST_ID);
        let mut out = format!(
            "{},{},{}\n",
            digits, self.lines_on_start, self.max_lines_on_screen
        );
        for row in self.gems.chunks(self.width) {
            for id in row {
                out.push_str(&format!("{:>digits$}", id));
            }
            out.push('\n');
        }
        out
    }
}

impl FromStr for LevelData {
    type Err = LevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_header(line: &str) -> Result<(usize, usize, usize), LevelError> {
    let parts: Vec<&str> = line.trim().split(',').map(str::trim).collect();
    let &[digits, lines_on_start, max_lines] = parts.as_slice() else {
        return Err(LevelError::InvalidHeader(line.to_string()));
    };

    let number = |s: &str| {
        s.parse::<usize>()
            .map_err(|_| LevelError::InvalidHeader(line.to_string()))
    };
    let digits = number(digits)?;
    if digits == 0 {
        return Err(LevelError::InvalidHeader(line.to_string()));
    }
    Ok((digits, number(lines_on_start)?, number(max_lines)?))
}
