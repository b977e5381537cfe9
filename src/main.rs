//! Headless Gem Jam runner (default binary).
//!
//! Plays a level unattended: every turn it hits the most promising cell, lets the physics
//! settle, then advances the round timer so that a new line comes in. Board dumps or JSON
//! observations go to stdout, progress to stderr.

use std::fmt;
use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use clap::Parser;

use gem_jam::autoplay::pick_hit;
use gem_jam::core::{
    HitReport, LineSupplier, NullSink, RoundController, RulesCollaborator, Verdict,
};
use gem_jam::debug::{DebugView, ViewMode};
use gem_jam::level::{
    LevelData, LevelDataSupplier, RandomLineSupplier, RandomSupplierConfig, RescueTargetRules,
};
use gem_jam::observe::Observation;
use gem_jam::types::{
    DEFAULT_COLOR_COUNT, DEFAULT_FREE_LINES, DEFAULT_LEVEL_HEIGHT, DEFAULT_LEVEL_WIDTH,
    DEFAULT_MIN_POP_COUNT, DEFAULT_MOVES, DEFAULT_ROUND_TIME_MS,
};

/// Falling-gem matching puzzle, played headless.
#[derive(Debug, Parser)]
#[command(
    name = "gem-jam",
    version,
    about = "Plays a Gem Jam level unattended and prints the board after every turn."
)]
pub struct Args {
    /// Seed for the random level generator.
    #[arg(long, default_value_t = 1)]
    pub seed: u32,

    /// Level width in columns (random levels only).
    #[arg(long, default_value_t = DEFAULT_LEVEL_WIDTH, value_name = "COLS")]
    pub width: usize,

    /// Level height in rows (random levels only).
    #[arg(long, default_value_t = DEFAULT_LEVEL_HEIGHT, value_name = "ROWS")]
    pub height: usize,

    /// Number of gem colors, 1 to 6 (random levels only).
    #[arg(long, default_value_t = DEFAULT_COLOR_COUNT, value_name = "N")]
    pub colors: usize,

    /// Empty rows on top of a random level.
    #[arg(long, default_value_t = DEFAULT_FREE_LINES, value_name = "N")]
    pub free_lines: usize,

    /// Do not place a target in random levels.
    #[arg(long)]
    pub no_target: bool,

    /// Load a level in text format instead of generating one.
    #[arg(long, value_name = "FILE")]
    pub level: Option<PathBuf>,

    /// Number of turns to play.
    #[arg(long, default_value_t = 20, value_name = "N")]
    pub turns: u32,

    /// Smallest color group a hit pops.
    #[arg(long, default_value_t = DEFAULT_MIN_POP_COUNT, value_name = "N")]
    pub min_pop: usize,

    /// Moves granted by the rescue rules.
    #[arg(long, default_value_t = DEFAULT_MOVES, value_name = "N")]
    pub moves: u32,

    /// Round length in milliseconds.
    #[arg(long, default_value_t = DEFAULT_ROUND_TIME_MS, value_name = "MS")]
    pub round_ms: u32,

    /// Print one JSON observation per turn instead of board dumps.
    #[arg(long)]
    pub json: bool,

    /// Board dump layout, printed after every turn.
    #[arg(long, value_enum)]
    pub view: Option<ViewMode>,

    /// Tint board dumps with ANSI colors.
    #[arg(long)]
    pub color: bool,

    /// Suppress progress messages on stderr.
    #[arg(short, long)]
    pub quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    ensure!(
        args.width > 0 && args.height > 0,
        "level size must be at least 1x1, got {}x{}",
        args.width,
        args.height
    );

    match &args.level {
        Some(path) => {
            let data = LevelData::load(path)
                .with_context(|| format!("failed to load level {}", path.display()))?;
            let supplier = LevelDataSupplier::new(data).context("failed to decode level")?;
            Runner::new(&args).play(supplier)
        }
        None => {
            let supplier = RandomLineSupplier::new(RandomSupplierConfig {
                seed: args.seed,
                width: args.width,
                height: args.height,
                free_lines: args.free_lines,
                colors: args.colors,
                target: !args.no_target,
            });
            Runner::new(&args).play(supplier)
        }
    }
}

struct Runner<'a> {
    args: &'a Args,
}

impl<'a> Runner<'a> {
    fn new(args: &'a Args) -> Self {
        Self { args }
    }

    fn log(&self, msg: fmt::Arguments<'_>) {
        if !self.args.quiet {
            eprintln!("[gem-jam] {}", msg);
        }
    }

    fn play<S: LineSupplier>(&self, supplier: S) -> Result<()> {
        let rules = RescueTargetRules::new(self.args.moves).with_round_time(self.args.round_ms);
        let mut controller =
            RoundController::with_min_pop_count(supplier, rules, NullSink::new(), self.args.min_pop);
        let view = DebugView::new(self.args.view.unwrap_or_default(), self.args.color);

        self.log(format_args!(
            "level {}x{}, {} tiles",
            controller.grid().width(),
            controller.grid().height(),
            controller.grid().occupied_count()
        ));
        self.emit(0, &controller, None, None, view)?;

        for turn in 1..=self.args.turns {
            let target = pick_hit(controller.grid());
            let group = target.and_then(|pos| controller.grid().get(pos).map(|t| t.group));

            let outcome = target.and_then(|pos| controller.hit(pos));
            let (report, mut verdict) = match outcome {
                Some(outcome) => (Some(outcome.report), outcome.verdict),
                None => (None, None),
            };

            match &report {
                Some(report) => self.log(format_args!(
                    "turn {}: hit {} removed {} moved {}",
                    turn,
                    report.pos,
                    report.removed,
                    report.passes.iter().map(|p| p.moves.len()).sum::<usize>()
                )),
                None => self.log(format_args!("turn {}: nothing to hit", turn)),
            }

            if verdict.is_none() && controller.is_running() {
                controller.force_new_line();
                if let Some(end) = controller.tick(1) {
                    self.log(format_args!("turn {}: new line, {} columns", turn, end.pushed));
                    verdict = end.verdict;
                }
            }

            let view = view.with_highlight(group);
            self.emit(turn, &controller, report.as_ref(), verdict.as_ref(), view)?;

            if let Some(verdict) = verdict {
                self.log(format_args!("turn {}: {}", turn, verdict.message()));
                break;
            }
        }

        self.log(format_args!(
            "done: bonus {}, {} moves left",
            controller.bonus(),
            controller.rules().remaining_moves()
        ));
        Ok(())
    }

    fn emit<S: LineSupplier>(
        &self,
        turn: u32,
        controller: &RoundController<S, RescueTargetRules, NullSink>,
        report: Option<&HitReport>,
        verdict: Option<&Verdict>,
        view: DebugView,
    ) -> Result<()> {
        if self.args.json {
            let obs = Observation::capture(
                turn,
                controller.grid(),
                report,
                controller.rules().info_text(),
                verdict,
            );
            println!("{}", obs.to_json_line().context("failed to encode observation")?);
        } else if self.args.view.is_some() || turn == 0 {
            println!("turn {}", turn);
            print!("{}", view.render(controller.grid()));
        }
        Ok(())
    }
}
