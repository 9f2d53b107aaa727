use klondike_core::game::table::{COLUMN_COUNT, TableState};
use klondike_core::model::card::Card;
use klondike_core::model::rank::Rank;

use crate::bot::moves::{Location, Move};

/// Fixed-priority scan for a single, safely playable move.
///
/// Only currently visible cards are consulted; the stock record plays no
/// part here. Promotions past the deuce are deliberately left to the path
/// planners, since racing cards onto the foundations early strands ranks
/// that other columns still need as landing spots.
pub struct ObviousPlanner;

impl ObviousPlanner {
    /// At most one move per call, in strict priority:
    /// 1. promote an exposed ACE (waste pile first, then lowest column);
    /// 2. promote an exposed DEUCE whose ACE is already up (same order);
    /// 3. relocate the exposed run hiding the most face-down cards onto a
    ///    legal landing spot.
    pub fn choose(state: &TableState) -> Option<Move> {
        if let Some(mv) = Self::promote(state, |_, card| card.rank == Rank::Ace) {
            return Some(mv);
        }
        if let Some(mv) = Self::promote(state, deuce_ready) {
            return Some(mv);
        }
        Self::free_down_cards(state)
    }

    fn promote(state: &TableState, wanted: impl Fn(&TableState, Card) -> bool) -> Option<Move> {
        if let Some(card) = state.waste_top() {
            if wanted(state, card) {
                return Some(Move::new(
                    Location::WastePile,
                    Location::Foundation(card.suit),
                ));
            }
        }
        for (column, pile) in state.columns().iter().enumerate() {
            if let Some(card) = pile.top() {
                if wanted(state, card) {
                    return Some(Move::new(
                        Location::tableau(column, pile.face_up().len() - 1),
                        Location::Foundation(card.suit),
                    ));
                }
            }
        }
        None
    }

    /// Rule 3. Candidates are weighted by how many face-down cards the
    /// relocation uncovers; on equal weight the first candidate in source
    /// 6..0, destination 0..6 order stands.
    fn free_down_cards(state: &TableState) -> Option<Move> {
        let mut best: Option<(usize, usize, usize)> = None;
        for src in (0..COLUMN_COUNT).rev() {
            let pile = state.column(src);
            let weight = pile.face_down_len();
            if weight == 0 {
                continue;
            }
            let Some(bottom) = pile.face_up().first().copied() else {
                continue;
            };
            for dest in 0..COLUMN_COUNT {
                if dest == src || !fits_on(state, dest, bottom) {
                    continue;
                }
                let replaces = match best {
                    None => true,
                    Some((best_weight, _, _)) => weight > best_weight,
                };
                if replaces {
                    best = Some((weight, src, dest));
                }
            }
        }
        let (_, src, dest) = best?;
        let landing = state.column(dest).face_up().len().saturating_sub(1);
        Some(Move::new(
            Location::tableau(src, 0),
            Location::tableau(dest, landing),
        ))
    }
}

fn deuce_ready(state: &TableState, card: Card) -> bool {
    card.rank == Rank::Two
        && state.foundation_top(card.suit).map(|top| top.rank) == Some(Rank::Ace)
}

fn fits_on(state: &TableState, dest: usize, card: Card) -> bool {
    match state.column(dest).top() {
        None => card.rank == Rank::King,
        Some(top) => card.rank.successor() == Some(top.rank) && card.color() != top.color(),
    }
}
