use klondike_core::game::table::{COLUMN_COUNT, TableState};
use klondike_core::model::rank::Rank;
use tracing::{Level, event};

use crate::bot::EngineError;
use crate::bot::executor::PathExecutor;
use crate::bot::knowledge::StockKnowledge;
use crate::bot::moves::{Location, Move};
use crate::bot::obvious::ObviousPlanner;
use crate::bot::paths::{FoundationPathPlanner, JoinPathPlanner};

/// What one orchestrated step produced.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub state: TableState,
    /// `false` means the whole cascade came up empty; the caller decides
    /// whether that makes the game stuck.
    pub progressed: bool,
}

/// Plays a whole game one decision at a time.
///
/// Owns the stock record built by [`Strategist::survey`] and threads it
/// through the planners and the executor. States move by value: each call
/// consumes the table it is given and hands back the successor.
#[derive(Debug, Default)]
pub struct Strategist {
    knowledge: StockKnowledge,
}

impl Strategist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn knowledge(&self) -> &StockKnowledge {
        &self.knowledge
    }

    /// One-time opening sweep. Cycles through the entire stock, recording
    /// every card as it surfaces and greedily playing whatever the obvious
    /// scan finds after each draw, then turns the waste back over so play
    /// starts from square one. Only the draw order is gained, which a
    /// patient human player could memorize just as legally.
    pub fn survey(&mut self, mut state: TableState) -> Result<TableState, EngineError> {
        self.knowledge.mark_explored();
        let draws = state.stock_len();
        for _ in 0..draws {
            state.draw_from_stock()?;
            let top = state.waste_top().ok_or(EngineError::MissingWasteCard)?;
            self.knowledge.record_drawn(top);
            while let Some(mv) = ObviousPlanner::choose(&state) {
                self.note_departure(&state, mv);
                mv.apply(&mut state)?;
            }
        }
        state.reset_stock();
        event!(
            target: "klondike_bot::strategy",
            Level::DEBUG,
            recorded = self.knowledge.len(),
            "stock survey complete",
        );
        Ok(state)
    }

    /// One decision: the obvious scan first, then the peek-assisted
    /// cascade. At most one move, or one executed plan, per call.
    pub fn step(&mut self, mut state: TableState) -> Result<StepOutcome, EngineError> {
        if let Some(mv) = ObviousPlanner::choose(&state) {
            log_move("obvious", mv);
            self.note_departure(&state, mv);
            mv.apply(&mut state)?;
            return Ok(StepOutcome {
                state,
                progressed: true,
            });
        }
        self.peek_assisted(state)
    }

    /// The four peek-assisted heuristics, tried in order:
    /// (a) join a run elsewhere to free a column's face-down cards;
    /// (b) clear a fully exposed column entirely (kings stay put);
    /// (c) promote a single-card column along a planned foundation chain;
    /// (d) the same promotion for any exposed top, however deep its column.
    fn peek_assisted(&mut self, state: TableState) -> Result<StepOutcome, EngineError> {
        for src in (0..COLUMN_COUNT).rev() {
            if state.column(src).face_down_len() == 0 {
                continue;
            }
            for dest in 0..COLUMN_COUNT {
                if dest == src {
                    continue;
                }
                let Some(plan) = JoinPathPlanner::plan(&state, &self.knowledge, src, dest) else {
                    continue;
                };
                let landing = Location::tableau(dest, top_index(&state, dest));
                log_plan("uncover", src, landing, plan.len());
                let state = PathExecutor::execute(state, &mut self.knowledge, &plan, src, landing)?;
                return Ok(StepOutcome {
                    state,
                    progressed: true,
                });
            }
        }
        for src in (0..COLUMN_COUNT).rev() {
            let pile = state.column(src);
            if pile.face_down_len() != 0 {
                continue;
            }
            let Some(bottom) = pile.face_up().first().copied() else {
                continue;
            };
            if bottom.rank == Rank::King {
                continue;
            }
            for dest in 0..COLUMN_COUNT {
                if dest == src {
                    continue;
                }
                let Some(plan) = JoinPathPlanner::plan(&state, &self.knowledge, src, dest) else {
                    continue;
                };
                let landing = Location::tableau(dest, top_index(&state, dest));
                log_plan("clear", src, landing, plan.len());
                let state = PathExecutor::execute(state, &mut self.knowledge, &plan, src, landing)?;
                return Ok(StepOutcome {
                    state,
                    progressed: true,
                });
            }
        }
        for src in 0..COLUMN_COUNT {
            if state.column(src).face_up().len() != 1 {
                continue;
            }
            let Some(deck_card) = state.column(src).top() else {
                continue;
            };
            let Some(plan) = FoundationPathPlanner::plan(&state, &self.knowledge, src) else {
                continue;
            };
            let landing = Location::Foundation(deck_card.suit);
            log_plan("promote", src, landing, plan.len());
            let state = PathExecutor::execute(state, &mut self.knowledge, &plan, src, landing)?;
            return Ok(StepOutcome {
                state,
                progressed: true,
            });
        }
        for src in 0..COLUMN_COUNT {
            let Some(deck_card) = state.column(src).top() else {
                continue;
            };
            let Some(plan) = FoundationPathPlanner::plan(&state, &self.knowledge, src) else {
                continue;
            };
            let landing = Location::Foundation(deck_card.suit);
            log_plan("last-resort", src, landing, plan.len());
            let state = PathExecutor::execute(state, &mut self.knowledge, &plan, src, landing)?;
            return Ok(StepOutcome {
                state,
                progressed: true,
            });
        }
        event!(
            target: "klondike_bot::strategy",
            Level::DEBUG,
            "cascade exhausted, no move",
        );
        Ok(StepOutcome {
            state,
            progressed: false,
        })
    }

    /// A move that takes the waste top away for good takes it off the
    /// record too. Runs before the move so the departing card is still
    /// readable.
    fn note_departure(&mut self, state: &TableState, mv: Move) {
        if mv.from == Location::WastePile {
            if let Some(card) = state.waste_top() {
                self.knowledge.forget(card);
            }
        }
    }
}

fn top_index(state: &TableState, column: usize) -> usize {
    state.column(column).face_up().len().saturating_sub(1)
}

fn log_move(rule: &'static str, mv: Move) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }
    event!(
        target: "klondike_bot::strategy",
        Level::INFO,
        rule,
        mv = %mv,
    );
}

fn log_plan(rule: &'static str, src: usize, landing: Location, steps: usize) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }
    event!(
        target: "klondike_bot::strategy",
        Level::INFO,
        rule,
        src,
        landing = %landing,
        steps,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use klondike_core::game::table::{FOUNDATION_COUNT, TableauColumn};
    use klondike_core::model::card::Card;
    use klondike_core::model::suit::Suit;

    fn card(code: &str) -> Card {
        Card::from_code(code).unwrap()
    }

    fn cards(codes: &[&str]) -> Vec<Card> {
        codes.iter().map(|code| card(code)).collect()
    }

    fn recorded(codes: &[&str]) -> Strategist {
        let mut knowledge = StockKnowledge::new();
        for code in codes {
            knowledge.record_drawn(card(code));
        }
        knowledge.mark_explored();
        Strategist { knowledge }
    }

    fn build_table(
        stock: &[&str],
        waste: &[&str],
        placed: &[(usize, &[&str], &[&str])],
        foundation_tops: &[&str],
    ) -> TableState {
        let mut tableau: [TableauColumn; COLUMN_COUNT] =
            core::array::from_fn(|_| TableauColumn::empty());
        for (index, down, up) in placed {
            tableau[*index] = TableauColumn::new(cards(down), cards(up));
        }
        let mut foundations: [Vec<Card>; FOUNDATION_COUNT] = core::array::from_fn(|_| Vec::new());
        for code in foundation_tops {
            let top = card(code);
            foundations[top.suit.index()] = Rank::ORDERED
                .iter()
                .copied()
                .take_while(|rank| *rank <= top.rank)
                .map(|rank| Card::new(rank, top.suit))
                .collect();
        }
        TableState::from_parts(cards(stock), cards(waste), tableau, foundations)
    }

    #[test]
    fn survey_records_the_draw_order_and_restores_the_table() {
        let state = build_table(&["9C", "7D", "10S", "5H"], &[], &[], &[]);
        let before = state.clone();
        let mut strategist = Strategist::new();
        let state = strategist.survey(state).unwrap();
        assert_eq!(state, before);
        assert_eq!(
            strategist.knowledge().cards(),
            cards(&["5H", "10S", "7D", "9C"]).as_slice()
        );
        assert!(strategist.knowledge().is_explored());
    }

    #[test]
    fn survey_plays_obvious_moves_as_they_surface() {
        let state = build_table(&["2S", "AS"], &[], &[], &[]);
        let mut strategist = Strategist::new();
        let state = strategist.survey(state).unwrap();
        assert_eq!(state.foundation_top(Suit::Spades), Some(card("2S")));
        assert!(strategist.knowledge().is_empty());
        assert_eq!(state.stock_len(), 0);
        assert_eq!(state.waste_len(), 0);
    }

    #[test]
    fn a_drawn_ace_is_promoted_by_the_next_step() {
        let mut state = build_table(&["AS"], &[], &[], &[]);
        state.draw_from_stock().unwrap();
        let mut strategist = Strategist::new();
        let outcome = strategist.step(state).unwrap();
        assert!(outcome.progressed);
        assert_eq!(
            outcome.state.foundation_top(Suit::Spades),
            Some(card("AS"))
        );
        assert!(outcome.state.waste_top().is_none());
    }

    #[test]
    fn obvious_waste_moves_leave_the_record() {
        let state = build_table(&[], &["2H"], &[], &["AH"]);
        let mut strategist = recorded(&["2H"]);
        let outcome = strategist.step(state).unwrap();
        assert!(outcome.progressed);
        assert_eq!(outcome.state.foundation_top(Suit::Hearts), Some(card("2H")));
        assert!(strategist.knowledge().is_empty());
    }

    #[test]
    fn join_cascade_frees_hidden_cards() {
        let state = build_table(
            &["5H"],
            &[],
            &[(2, &["9H"], &["4S"]), (5, &[], &["6C"])],
            &[],
        );
        let mut strategist = recorded(&["5H"]);
        let outcome = strategist.step(state).unwrap();
        assert!(outcome.progressed);
        assert_eq!(outcome.state.column(2).face_up(), cards(&["9H"]).as_slice());
        assert_eq!(outcome.state.column(2).face_down_len(), 0);
        assert_eq!(
            outcome.state.column(5).face_up(),
            cards(&["6C", "5H", "4S"]).as_slice()
        );
        assert!(strategist.knowledge().is_empty());
    }

    #[test]
    fn fully_exposed_columns_are_cleared_out() {
        let state = build_table(
            &["5H"],
            &[],
            &[(1, &[], &["4S"]), (5, &[], &["6C"])],
            &[],
        );
        let mut strategist = recorded(&["5H"]);
        let outcome = strategist.step(state).unwrap();
        assert!(outcome.progressed);
        assert!(outcome.state.column(1).is_empty());
        assert_eq!(
            outcome.state.column(5).face_up(),
            cards(&["6C", "5H", "4S"]).as_slice()
        );
    }

    #[test]
    fn single_card_columns_promote_along_a_planned_chain() {
        let state = build_table(&["4D"], &[], &[(2, &[], &["5D"])], &["3D"]);
        let mut strategist = recorded(&["4D"]);
        let outcome = strategist.step(state).unwrap();
        assert!(outcome.progressed);
        assert_eq!(outcome.state.foundation_top(Suit::Diamonds), Some(card("5D")));
        assert!(outcome.state.column(2).is_empty());
        assert!(strategist.knowledge().is_empty());
    }

    #[test]
    fn desperation_promotes_the_exposed_top_of_a_taller_column() {
        let state = build_table(&[], &[], &[(3, &[], &["8C", "7D"])], &["6D"]);
        let mut strategist = recorded(&[]);
        let outcome = strategist.step(state).unwrap();
        assert!(outcome.progressed);
        assert_eq!(outcome.state.foundation_top(Suit::Diamonds), Some(card("7D")));
        assert_eq!(outcome.state.column(3).face_up(), cards(&["8C"]).as_slice());
    }

    #[test]
    fn a_stuck_table_reports_no_progress_without_mutation() {
        let state = build_table(&[], &["9D"], &[(0, &["5C"], &["7S"])], &[]);
        let before = state.clone();
        let mut strategist = recorded(&["9D"]);
        let outcome = strategist.step(state).unwrap();
        assert!(!outcome.progressed);
        assert_eq!(outcome.state, before);
        let again = strategist.step(outcome.state).unwrap();
        assert!(!again.progressed);
        assert_eq!(again.state, before);
        assert_eq!(strategist.knowledge().cards(), cards(&["9D"]).as_slice());
    }

    #[test]
    fn seeded_games_run_to_completion_without_engine_errors() {
        for seed in [1, 7, 42] {
            let mut strategist = Strategist::new();
            let mut state = strategist.survey(TableState::deal_with_seed(seed)).unwrap();
            for _ in 0..600 {
                let outcome = strategist.step(state).unwrap();
                state = outcome.state;
                if !outcome.progressed || state.is_won() {
                    break;
                }
            }
            assert!(state.promoted_count() <= 52);
        }
    }
}
