use klondike_core::game::table::TableState;
use klondike_core::model::card::Card;
use tracing::{Level, event};

use crate::bot::EngineError;
use crate::bot::knowledge::StockKnowledge;
use crate::bot::moves::{Location, Move, PlanStep};

/// Carries a finished plan out against the physical table.
pub struct PathExecutor;

impl PathExecutor {
    /// Applies each planned step, cycling the stock whenever a step sources
    /// from the waste pile, then performs the closing move that relocates
    /// the source column's run to `dest`.
    pub fn execute(
        mut state: TableState,
        knowledge: &mut StockKnowledge,
        plan: &[PlanStep],
        src: usize,
        dest: Location,
    ) -> Result<TableState, EngineError> {
        for step in plan {
            if step.mv.from == Location::WastePile {
                knowledge.locate(step.card)?;
                cycle_to(&mut state, step.card)?;
                knowledge.forget(step.card);
            }
            log_step(step);
            step.mv.apply(&mut state)?;
        }
        let closing = Move::new(Location::tableau(src, 0), dest);
        closing.apply(&mut state)?;
        Ok(state)
    }
}

/// Draws (resetting the stock as needed) until the waste top is `card`.
/// The budget allows two full passes over the deck; exceeding it means the
/// stock record no longer matches the physical pile.
fn cycle_to(state: &mut TableState, card: Card) -> Result<(), EngineError> {
    let budget = 2 * (state.stock_len() + state.waste_len()) + 2;
    for _ in 0..budget {
        match state.waste_top() {
            Some(top) if top == card => return Ok(()),
            Some(_) if state.stock_len() == 0 => state.reset_stock(),
            _ => state.draw_from_stock()?,
        }
    }
    Err(EngineError::StockDesync(card))
}

fn log_step(step: &PlanStep) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }
    event!(
        target: "klondike_bot::executor",
        Level::DEBUG,
        mv = %step.mv,
        card = %step.card,
    );
}
