use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::{Grid, HitReport, Verdict};
use crate::level::tile_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictRecord {
    pub outcome: Outcome,
    pub message: String,
}

impl From<&Verdict> for VerdictRecord {
    fn from(value: &Verdict) -> Self {
        let outcome = if value.is_win() {
            Outcome::Win
        } else {
            Outcome::Lose
        };
        Self {
            outcome,
            message: value.message().to_string(),
        }
    }
}

/// One line of `--json` output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub turn: u32,
    pub width: usize,
    pub height: usize,
    /// Row-major tile ids
    pub cells: Vec<u16>,
    pub bonus: u32,
    /// Whether this turn's hit changed the board
    pub changed: bool,
    /// Gem moves requested by this turn's physics passes
    pub moves: usize,
    pub info: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<VerdictRecord>,
}

impl Observation {
    pub fn capture(
        turn: u32,
        grid: &Grid,
        hit: Option<&HitReport>,
        info: String,
        verdict: Option<&Verdict>,
    ) -> Self {
        Self {
            turn,
            width: grid.width(),
            height: grid.height(),
            cells: grid.cells().iter().map(|cell| tile_id(cell.as_ref())).collect(),
            bonus: grid.bonus(),
            changed: hit.is_some_and(|h| h.changed),
            moves: hit.map_or(0, |h| h.passes.iter().map(|p| p.moves.len()).sum()),
            info,
            verdict: verdict.map(VerdictRecord::from),
        }
    }

    pub fn to_json_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
