use klondike_core::model::card::Card;

use crate::bot::EngineError;

/// Draw-order record of the stock pile.
///
/// Klondike never reshuffles: drawing moves cards to the waste pile one at a
/// time and resetting turns the waste pile straight back over. One full pass
/// therefore reveals the order every later pass will repeat, minus whatever
/// has permanently left the waste pile since. Only public information is
/// stored; the record is built from cards the rules put face-up anyway.
#[derive(Debug, Clone, Default)]
pub struct StockKnowledge {
    cards: Vec<Card>,
    explored: bool,
}

impl StockKnowledge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a freshly surfaced waste top. Meaningful only during the
    /// opening sweep; afterwards the record only ever shrinks.
    pub fn record_drawn(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Drops the first matching entry once a card permanently leaves the
    /// waste pile. Cards never recorded are ignored.
    pub fn forget(&mut self, card: Card) {
        if let Some(index) = self.cards.iter().position(|known| *known == card) {
            self.cards.remove(index);
        }
    }

    /// Index of a recorded card in draw order. After the sweep every card
    /// still cycling through the waste pile must be on record; a miss means
    /// the record has drifted from the physical stock.
    pub fn locate(&self, card: Card) -> Result<usize, EngineError> {
        self.cards
            .iter()
            .position(|known| *known == card)
            .ok_or(EngineError::UnknownCard(card))
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_explored(&self) -> bool {
        self.explored
    }

    pub fn mark_explored(&mut self) {
        self.explored = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(code: &str) -> Card {
        Card::from_code(code).unwrap()
    }

    #[test]
    fn records_in_draw_order() {
        let mut knowledge = StockKnowledge::new();
        knowledge.record_drawn(card("7D"));
        knowledge.record_drawn(card("AS"));
        knowledge.record_drawn(card("10C"));
        assert_eq!(
            knowledge.cards(),
            &[card("7D"), card("AS"), card("10C")]
        );
        assert_eq!(knowledge.len(), 3);
    }

    #[test]
    fn forget_removes_first_match_only() {
        let mut knowledge = StockKnowledge::new();
        knowledge.record_drawn(card("7D"));
        knowledge.record_drawn(card("AS"));
        knowledge.record_drawn(card("7D"));
        knowledge.forget(card("7D"));
        assert_eq!(knowledge.cards(), &[card("AS"), card("7D")]);
    }

    #[test]
    fn forget_of_unknown_card_is_a_no_op() {
        let mut knowledge = StockKnowledge::new();
        knowledge.record_drawn(card("AS"));
        knowledge.forget(card("KH"));
        assert_eq!(knowledge.cards(), &[card("AS")]);
    }

    #[test]
    fn forgetting_everything_recorded_leaves_nothing() {
        let mut knowledge = StockKnowledge::new();
        for code in ["7D", "AS", "10C"] {
            knowledge.record_drawn(card(code));
        }
        for code in ["10C", "7D", "AS"] {
            knowledge.forget(card(code));
        }
        assert!(knowledge.is_empty());
        assert_eq!(knowledge.len(), 0);
    }

    #[test]
    fn locate_reports_draw_position() {
        let mut knowledge = StockKnowledge::new();
        knowledge.record_drawn(card("7D"));
        knowledge.record_drawn(card("AS"));
        assert_eq!(knowledge.locate(card("AS")).unwrap(), 1);
    }

    #[test]
    fn locate_miss_is_an_error() {
        let knowledge = StockKnowledge::new();
        match knowledge.locate(card("QH")) {
            Err(EngineError::UnknownCard(missing)) => assert_eq!(missing, card("QH")),
            other => panic!("expected UnknownCard, got {other:?}"),
        }
    }

    #[test]
    fn exploration_flag_latches() {
        let mut knowledge = StockKnowledge::new();
        assert!(!knowledge.is_explored());
        knowledge.mark_explored();
        assert!(knowledge.is_explored());
        assert!(knowledge.is_empty());
    }
}
