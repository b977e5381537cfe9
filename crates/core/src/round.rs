//! Round controller - sequences hits, physics and timed new lines
//!
//! The controller owns the [`Grid`] and its three collaborators. Two things drive it:
//!
//! - **Time**: [`RoundController::tick`] counts the round timer down. When it runs out a
//!   new line is pushed in from the bottom and the timer restarts, carrying over any
//!   overshoot so that rounds do not drift.
//! - **Hits**: [`RoundController::begin_hit`] resolves a hit, runs both physics passes and
//!   requests one animation per moved gem. While a hit is being played back the controller
//!   is *suspended* and new lines are held back; [`RoundController::end_hit`] closes the
//!   hit, regroups the grid and asks the rules for a verdict.
//!
//! A verdict from the rules pauses the controller until [`RoundController::restart`].

use crate::collab::{LineSupplier, RenderSink, RulesCollaborator, Verdict};
use crate::grid::Grid;
use crate::resolver::{DirtyRows, Resolver};
use crate::settler::Settler;
use crate::types::{Coord, GemMove, MOVE_PASS_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Paused,
    Running,
}

/// Timer and suspension state of the current round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    pub phase: Phase,
    /// Time left in the round; negative between expiry and the next tick
    pub remaining_ms: i32,
    /// Set while a hit is being played back
    pub new_line_suspended: bool,
    /// Whether the last resolved hit changed the board
    pub changed: bool,
    /// Lines pushed since restart
    pub rounds: u32,
    /// Hits resolved since restart (including no-op hits)
    pub clicks: u32,
    pub verdict: Option<Verdict>,
}

impl RoundState {
    fn new(round_time_ms: u32) -> Self {
        Self {
            phase: Phase::Paused,
            remaining_ms: round_time_ms as i32,
            new_line_suspended: false,
            changed: false,
            rounds: 0,
            clicks: 0,
            verdict: None,
        }
    }
}

/// Remaining time of the next round after the timer expired at `remaining_ms`
pub fn carry_over(full_ms: i32, remaining_ms: i32) -> i32 {
    full_ms.saturating_add(remaining_ms)
}

/// Moves produced by one physics pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicsPass {
    pub moves: Vec<GemMove>,
    /// Longest requested animation; how long a scheduler should block
    pub block_ms: u32,
}

/// What happened during [`RoundController::begin_hit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitReport {
    pub pos: Coord,
    pub changed: bool,
    /// Tiles that left the grid
    pub removed: u32,
    pub passes: Vec<PhysicsPass>,
}

/// A completed hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitOutcome {
    pub report: HitReport,
    pub verdict: Option<Verdict>,
}

/// A round that ended with a new line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundEnd {
    /// Columns that received a tile
    pub pushed: usize,
    pub verdict: Option<Verdict>,
}

/// Owner of the grid and driver of the turn loop
pub struct RoundController<S, R, V>
where
    S: LineSupplier,
    R: RulesCollaborator,
    V: RenderSink,
{
    grid: Grid,
    supplier: S,
    rules: R,
    sink: V,
    resolver: Resolver,
    settler: Settler,
    state: RoundState,
}

impl<S, R, V> RoundController<S, R, V>
where
    S: LineSupplier,
    R: RulesCollaborator,
    V: RenderSink,
{
    /// Wire up the collaborators and start the first level
    pub fn new(supplier: S, rules: R, sink: V) -> Self {
        let state = RoundState::new(rules.round_time_ms());
        let mut controller = Self {
            grid: Grid::new(0, 0),
            supplier,
            rules,
            sink,
            resolver: Resolver::default(),
            settler: Settler,
            state,
        };
        controller.restart();
        controller
    }

    /// Like [`RoundController::new`], with a custom minimum pop count
    pub fn with_min_pop_count(supplier: S, rules: R, sink: V, min_pop_count: usize) -> Self {
        let mut controller = Self::new(supplier, rules, sink);
        controller.grid.set_min_pop_count(min_pop_count);
        controller
    }

    /// Reload the level from the supplier and start running
    pub fn restart(&mut self) {
        self.supplier.restart();
        let layout = self.supplier.get_level();
        self.grid.set_level(layout.cells, layout.width, layout.height);
        self.grid.regenerate_groups();
        self.resolver.reset(layout.width);

        self.rules.restart(&self.grid);
        self.state = RoundState::new(self.rules.round_time_ms());

        self.sink.recreate(layout.width, layout.height);
        self.refresh_all();
        self.push_preview();
        self.sink.set_bonus(self.grid.bonus());
        self.sink.set_round_progress(0.0);

        self.state.phase = Phase::Running;
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn dirty(&self) -> &DirtyRows {
        self.resolver.dirty()
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn supplier(&self) -> &S {
        &self.supplier
    }

    pub fn sink(&self) -> &V {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut V {
        &mut self.sink
    }

    pub fn bonus(&self) -> u32 {
        self.grid.bonus()
    }

    pub fn is_running(&self) -> bool {
        self.state.phase == Phase::Running
    }

    /// Pause or resume. A finished level stays paused until restart.
    pub fn set_paused(&mut self, paused: bool) {
        if paused {
            self.state.phase = Phase::Paused;
        } else if self.state.verdict.is_none() {
            self.state.phase = Phase::Running;
        }
    }

    /// Advance the round timer. Returns the round end when a new line was pushed.
    pub fn tick(&mut self, elapsed_ms: u32) -> Option<RoundEnd> {
        if !self.is_running() {
            return None;
        }

        let full = self.rules.round_time_ms() as i32;
        let elapsed = i32::try_from(elapsed_ms).unwrap_or(i32::MAX);
        self.state.remaining_ms = self.state.remaining_ms.saturating_sub(elapsed);

        let mut ended = None;
        if self.state.remaining_ms < 0 && !self.state.new_line_suspended {
            self.state.remaining_ms = carry_over(full, self.state.remaining_ms);
            let pushed = self.push_new_line();
            self.grid.regenerate_groups();
            self.state.rounds += 1;

            self.push_preview();
            self.refresh_all();

            let verdict = self.rules.end_round(&self.grid);
            self.apply_verdict(&verdict);
            ended = Some(RoundEnd { pushed, verdict });
        }

        if full > 0 {
            let left = self.state.remaining_ms.clamp(0, full) as f32;
            self.sink.set_round_progress(1.0 - left / full as f32);
        }
        ended
    }

    /// Make the next tick push a new line
    pub fn force_new_line(&mut self) {
        if self.is_running() {
            self.state.remaining_ms = 0;
        }
    }

    /// Resolve a hit and run physics. Returns `None` when hits are not accepted
    /// (paused, or another hit is still being played back).
    ///
    /// The controller stays suspended until [`RoundController::end_hit`].
    pub fn begin_hit(&mut self, pos: Coord) -> Option<HitReport> {
        if !self.is_running() || self.state.new_line_suspended {
            return None;
        }

        self.state.new_line_suspended = true;
        self.state.clicks += 1;
        self.resolver.reset(self.grid.width());

        let changed = self.resolver.resolve_hit(&mut self.grid, pos);
        self.state.changed = changed;

        for &cell in self.resolver.rerender() {
            self.sink.set_tile(cell, self.grid.get(cell));
        }
        self.refresh_all();

        let mut passes = Vec::with_capacity(self.settler.passes());
        for nr in 0..self.settler.passes() {
            let moves = self.physics_step(nr);
            let block_ms = self.play_moves(&moves);
            self.refresh_all();
            passes.push(PhysicsPass { moves, block_ms });
        }

        Some(HitReport {
            pos,
            changed,
            removed: self.resolver.removed(),
            passes,
        })
    }

    /// Finish the hit started by [`RoundController::begin_hit`]
    pub fn end_hit(&mut self) -> Option<Verdict> {
        if !self.state.new_line_suspended {
            return None;
        }

        self.state.new_line_suspended = false;
        self.grid.regenerate_groups();
        self.resolver.reset(self.grid.width());

        let verdict = self.rules.end_click(self.state.changed, &self.grid);
        self.sink.set_bonus(self.grid.bonus());
        self.sink.set_info_text(&self.rules.info_text());
        self.push_preview();
        self.apply_verdict(&verdict);
        verdict
    }

    /// `begin_hit` and `end_hit` in one call
    pub fn hit(&mut self, pos: Coord) -> Option<HitOutcome> {
        let report = self.begin_hit(pos)?;
        let verdict = self.end_hit();
        Some(HitOutcome { report, verdict })
    }

    /// Run physics pass `nr` against the current dirty hints.
    ///
    /// Panics when `nr` is not a valid pass index.
    pub fn physics_step(&mut self, nr: usize) -> Vec<GemMove> {
        self.settler.step(&mut self.grid, nr, self.resolver.dirty())
    }

    /// Shift every supplied column up by one and drop the new tile into the bottom row
    fn push_new_line(&mut self) -> usize {
        let width = self.grid.width();
        let height = self.grid.height() as i32;
        if width == 0 || height == 0 {
            return 0;
        }
        let line = self.supplier.get_new_line(&self.grid);

        let mut pushed = 0;
        for (x, slot) in line.into_iter().enumerate().take(width) {
            let Some(tile) = slot else {
                continue;
            };
            let col = x as i32;
            for y in 1..height {
                let lifted = self.grid.take(Coord::new(col, y));
                self.grid.set(Coord::new(col, y - 1), lifted);
            }
            self.grid.set(Coord::new(col, height - 1), Some(tile));
            pushed += 1;
        }
        pushed
    }

    fn play_moves(&mut self, moves: &[GemMove]) -> u32 {
        let height = self.sink.level_height().max(1) as u32;
        let mut longest = 0;
        for mv in moves {
            let duration = MOVE_PASS_MS * mv.distance() / height;
            self.sink.play_move(mv.from, mv.to, duration);
            longest = longest.max(duration);
        }
        longest
    }

    fn refresh_all(&mut self) {
        for idx in 0..self.grid.len() {
            let pos = self.grid.coord_of(idx);
            self.sink.set_tile(pos, self.grid.get(pos));
        }
        self.sink.set_info_text(&self.rules.info_text());
    }

    fn push_preview(&mut self) {
        let preview = self.supplier.peek_next_line(&self.grid);
        self.sink.set_preview_line(&preview);
    }

    fn apply_verdict(&mut self, verdict: &Option<Verdict>) {
        if let Some(v) = verdict {
            self.state.verdict = Some(v.clone());
            self.state.phase = Phase::Paused;
        }
    }
}
