mod executor;
mod knowledge;
mod moves;
mod obvious;
mod paths;
mod strategy;

pub use executor::PathExecutor;
pub use knowledge::StockKnowledge;
pub use moves::{Location, Move, PlanStep};
pub use obvious::ObviousPlanner;
pub use paths::{FoundationPathPlanner, JoinPathPlanner};
pub use strategy::{StepOutcome, Strategist};

use klondike_core::game::table::MoveError;
use klondike_core::model::card::Card;
use thiserror::Error;

/// Conditions that end a session. Planners signal the everyday "no plan
/// here" with `None`; these errors instead mean the engine issued a request
/// the table refused or its stock record stopped matching reality, both
/// defects rather than game situations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("table refused a move: {0:?}")]
    Table(#[from] MoveError),
    #[error("unsupported move pairing: {0}")]
    UnsupportedMove(Move),
    #[error("card {0} missing from the stock record")]
    UnknownCard(Card),
    #[error("card {0} unreachable by cycling the stock")]
    StockDesync(Card),
    #[error("waste-sourced move with no waste card")]
    MissingWasteCard,
}
