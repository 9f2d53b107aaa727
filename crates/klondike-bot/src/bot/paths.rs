use klondike_core::game::table::{COLUMN_COUNT, TableState};
use klondike_core::model::card::Card;
use klondike_core::model::rank::Rank;

use crate::bot::knowledge::StockKnowledge;
use crate::bot::moves::{Location, Move, PlanStep};

/// Where a searched-for card turned up.
enum CardSource {
    Stock,
    Column { column: usize, position: usize },
}

/// Per-column count of exposed cards still assumed in place while a plan is
/// being built. Planning consumes column tops on paper only; this mirrors
/// that consumption without touching the real table.
struct TrackedTops([usize; COLUMN_COUNT]);

impl TrackedTops {
    fn new(state: &TableState) -> Self {
        Self(core::array::from_fn(|column| {
            state.column(column).face_up().len()
        }))
    }

    fn take(&mut self, column: usize) {
        self.0[column] -= 1;
    }

    fn exhaust(&mut self, column: usize) {
        self.0[column] = 0;
    }
}

/// Searches the stock record first, then the tracked top of every column not
/// in `skip`, for a card satisfying `wanted`.
fn find_card(
    state: &TableState,
    knowledge: &StockKnowledge,
    tops: &TrackedTops,
    skip: &[usize],
    wanted: impl Fn(Card) -> bool,
) -> Option<(CardSource, Card)> {
    if let Some(card) = knowledge.cards().iter().copied().find(|card| wanted(*card)) {
        return Some((CardSource::Stock, card));
    }
    for column in 0..COLUMN_COUNT {
        if skip.contains(&column) || tops.0[column] == 0 {
            continue;
        }
        let position = tops.0[column] - 1;
        let card = state.column(column).face_up()[position];
        if wanted(card) {
            return Some((CardSource::Column { column, position }, card));
        }
    }
    None
}

/// Plans the chain of promotions that frees a column's exposed card to its
/// foundation.
pub struct FoundationPathPlanner;

impl FoundationPathPlanner {
    /// `None` means no such chain exists right now, a perfectly normal
    /// outcome. The plan covers the intermediate ranks only; the caller
    /// promotes the freed card itself as the closing move.
    pub fn plan(
        state: &TableState,
        knowledge: &StockKnowledge,
        src: usize,
    ) -> Option<Vec<PlanStep>> {
        let deck_card = state.column(src).top()?;
        let base = state.foundation_top(deck_card.suit)?;
        let mut tops = TrackedTops::new(state);
        let mut plan = Vec::new();
        let mut next_value = base.rank.value() + 1;
        while next_value < deck_card.rank.value() {
            let wanted_rank = Rank::from_value(next_value)?;
            let (source, card) = find_card(state, knowledge, &tops, &[src], |card| {
                card.suit == deck_card.suit && card.rank == wanted_rank
            })?;
            let mv = match source {
                CardSource::Stock => {
                    Move::new(Location::WastePile, Location::Foundation(deck_card.suit))
                }
                CardSource::Column { column, position } => {
                    tops.take(column);
                    Move::new(
                        Location::tableau(column, position),
                        Location::Foundation(deck_card.suit),
                    )
                }
            };
            plan.push(PlanStep { mv, card });
            next_value += 1;
        }
        Some(plan)
    }
}

/// Plans the chain of cards that, stacked onto a destination column, lets a
/// source column's whole exposed run land there in one move.
pub struct JoinPathPlanner;

impl JoinPathPlanner {
    /// Steps are returned in execution order: the highest-needed card is
    /// placed first, building downward until the source run fits. `None`
    /// when the geometry rules the join out or a link cannot be found.
    pub fn plan(
        state: &TableState,
        knowledge: &StockKnowledge,
        src: usize,
        dest: usize,
    ) -> Option<Vec<PlanStep>> {
        let bottom = state.column(src).face_up().first().copied()?;
        let limit = match state.column(dest).top() {
            Some(top) => {
                if top.rank <= bottom.rank {
                    return None;
                }
                let gap = top.rank.value() - bottom.rank.value();
                // Alternation ties color to rank distance: the card sitting
                // k below a top shares its color exactly when k is even.
                if (top.color() == bottom.color()) == (gap % 2 == 1) {
                    return None;
                }
                top.rank.value() - 1
            }
            None => Rank::King.value(),
        };
        let mut tops = TrackedTops::new(state);
        let mut chain = Vec::new();
        let mut cursor = bottom;
        while cursor.rank.value() < limit {
            let wanted_rank = Rank::from_value(cursor.rank.value() + 1)?;
            let wanted_color = cursor.color().opposite();
            let (source, card) = find_card(state, knowledge, &tops, &[src, dest], |card| {
                card.rank == wanted_rank && card.color() == wanted_color
            })?;
            let mv = match source {
                CardSource::Stock => Move::new(Location::WastePile, Location::tableau(dest, 0)),
                CardSource::Column { column, position } => {
                    // The chain executes in reverse, so a second card from
                    // this column would no longer be on top when its turn
                    // came. One link per supplying column.
                    tops.exhaust(column);
                    Move::new(
                        Location::tableau(column, position),
                        Location::tableau(dest, 0),
                    )
                }
            };
            chain.push(PlanStep { mv, card });
            cursor = card;
        }
        chain.reverse();
        Some(chain)
    }
}
