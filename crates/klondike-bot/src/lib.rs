pub mod bot;

pub use bot::{
    EngineError, FoundationPathPlanner, JoinPathPlanner, Location, Move, ObviousPlanner,
    PathExecutor, PlanStep, StepOutcome, StockKnowledge, Strategist,
};
