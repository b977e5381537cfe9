use gem_jam_core::{Grid, RulesCollaborator, TileKind, Verdict};
use gem_jam_types::{DEFAULT_MOVES, DEFAULT_ROUND_TIME_MS};

/// Rescue the target: bring it down to the bottom row within a move budget
///
/// Every click that changed the board costs one move. Reaching the bottom row wins, even
/// on the last move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RescueTargetRules {
    round_time_ms: u32,
    moves: u32,
    remaining: i64,
}

impl RescueTargetRules {
    pub fn new(moves: u32) -> Self {
        Self {
            round_time_ms: DEFAULT_ROUND_TIME_MS,
            moves,
            remaining: moves as i64,
        }
    }

    pub fn with_round_time(mut self, round_time_ms: u32) -> Self {
        self.round_time_ms = round_time_ms;
        self
    }

    /// Moves granted per level
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn remaining_moves(&self) -> i64 {
        self.remaining
    }

    pub fn moves_used(&self) -> i64 {
        self.moves as i64 - self.remaining
    }

    /// True when a target sits on the bottom row
    pub fn has_won(&self, grid: &Grid) -> bool {
        grid.height() > 0
            && grid
                .row(grid.height() - 1)
                .iter()
                .flatten()
                .any(|tile| tile.kind == TileKind::Target)
    }

    pub fn has_lost(&self) -> bool {
        self.remaining <= 0
    }
}

impl Default for RescueTargetRules {
    fn default() -> Self {
        Self::new(DEFAULT_MOVES)
    }
}

impl RulesCollaborator for RescueTargetRules {
    fn round_time_ms(&self) -> u32 {
        self.round_time_ms
    }

    fn end_round(&mut self, _grid: &Grid) -> Option<Verdict> {
        None
    }

    fn end_click(&mut self, changed: bool, grid: &Grid) -> Option<Verdict> {
        if changed {
            self.remaining -= 1;
        }
        if self.has_won(grid) {
            return Some(Verdict::Win(format!(
                "You rescued the target in {} moves.",
                self.moves_used()
            )));
        }
        if self.has_lost() {
            return Some(Verdict::Lose("Sorry, no moves left.".to_string()));
        }
        None
    }

    fn info_text(&self) -> String {
        format!(
            "Bring the target down to the ground. {} moves left.",
            self.remaining
        )
    }

    fn restart(&mut self, _grid: &Grid) {
        self.remaining = self.moves as i64;
    }
}
