use std::time::Instant;

use klondike_bot::{EngineError, Strategist};
use klondike_core::game::table::TableState;
use serde_json::json;
use tracing::{Level, event};

/// Ceiling on orchestrated steps per game. Generous: a won game needs well
/// under a hundred, but join plans can shuffle runs between columns without
/// ever strictly converging, and the cap turns that into a reported outcome
/// instead of a hang.
pub const DEFAULT_STEP_CAP: usize = 500;

#[derive(Debug, Clone, Copy)]
pub struct DriverConfig {
    pub max_steps: usize,
    pub quiet: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_STEP_CAP,
            quiet: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Won,
    Stuck,
    StepLimit,
}

#[derive(Debug, Clone, Copy)]
pub struct GameReport {
    pub seed: u64,
    pub outcome: GameOutcome,
    pub steps: usize,
    pub promoted: usize,
}

/// Tallies for a run of consecutive seeds.
#[derive(Debug, Clone, Copy)]
pub struct BatchSummary {
    pub games: usize,
    pub wins: usize,
    pub stuck: usize,
    pub capped: usize,
    pub total_promoted: usize,
    pub elapsed_seconds: f64,
}

impl BatchSummary {
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.wins as f64 / self.games as f64
    }

    pub fn average_promoted(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_promoted as f64 / self.games as f64
    }
}

/// Deals the seed and plays it out.
pub fn play_seeded(
    seed: u64,
    config: &DriverConfig,
) -> Result<(GameReport, TableState), EngineError> {
    play_from(TableState::deal_with_seed(seed), seed, config)
}

/// Plays an arbitrary starting table: one opening survey, then steps until
/// the game is won, the strategist reports no progress, or the cap is hit.
pub fn play_from(
    state: TableState,
    seed: u64,
    config: &DriverConfig,
) -> Result<(GameReport, TableState), EngineError> {
    let mut strategist = Strategist::new();
    let mut state = strategist.survey(state)?;
    let mut steps = 0;
    let outcome = loop {
        if state.is_won() {
            break GameOutcome::Won;
        }
        if steps >= config.max_steps {
            break GameOutcome::StepLimit;
        }
        let result = strategist.step(state)?;
        state = result.state;
        if !result.progressed {
            break GameOutcome::Stuck;
        }
        steps += 1;
    };
    let report = GameReport {
        seed,
        outcome,
        steps,
        promoted: state.promoted_count(),
    };
    event!(
        target: "mdklondike::driver",
        Level::INFO,
        seed,
        outcome = ?report.outcome,
        steps = report.steps,
        promoted = report.promoted,
    );
    Ok((report, state))
}

/// Plays `games` consecutive seeds starting at `first_seed`. Progress lines
/// go to stdout as single-line JSON unless `quiet` is set.
pub fn run_batch(
    first_seed: u64,
    games: usize,
    config: &DriverConfig,
) -> Result<BatchSummary, EngineError> {
    let start = Instant::now();
    let mut summary = BatchSummary {
        games,
        wins: 0,
        stuck: 0,
        capped: 0,
        total_promoted: 0,
        elapsed_seconds: 0.0,
    };
    for index in 0..games {
        let seed = first_seed.wrapping_add(index as u64);
        let (report, _state) = play_seeded(seed, config)?;
        match report.outcome {
            GameOutcome::Won => summary.wins += 1,
            GameOutcome::Stuck => summary.stuck += 1,
            GameOutcome::StepLimit => summary.capped += 1,
        }
        summary.total_promoted += report.promoted;

        let played = index + 1;
        if !config.quiet && (played % (games / 10).max(1) == 0 || played == games) {
            let progress = json!({
                "completed": played,
                "total": games,
                "wins": summary.wins,
                "avg_promoted": summary.total_promoted as f64 / played as f64,
            });
            println!("{}", serde_json::to_string(&progress).unwrap());
        }
    }
    summary.elapsed_seconds = start.elapsed().as_secs_f64();
    Ok(summary)
}
