use std::fmt::Write as _;

use klondike_core::game::table::TableState;
use klondike_core::model::suit::Suit;

/// Compact text picture of a table: stock count, waste top, the four
/// foundation tops in club/diamond/spade/heart order, then one line per
/// column with hidden cards shown as `##`.
pub fn render(state: &TableState) -> String {
    let mut out = String::new();
    let waste = match state.waste_top() {
        Some(card) => card.to_string(),
        None => "--".to_string(),
    };
    let _ = writeln!(out, "stock {:2}  waste {waste}", state.stock_len());

    let _ = write!(out, "foundations");
    for suit in Suit::ALL {
        match state.foundation_top(suit) {
            Some(card) => {
                let _ = write!(out, " {card}");
            }
            None => out.push_str(" --"),
        }
    }
    out.push('\n');

    for (index, column) in state.columns().iter().enumerate() {
        let _ = write!(out, "col {index}:");
        for _ in 0..column.face_down_len() {
            out.push_str(" ##");
        }
        for card in column.face_up() {
            let _ = write!(out, " {card}");
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use klondike_core::game::table::{COLUMN_COUNT, FOUNDATION_COUNT, TableauColumn};
    use klondike_core::model::card::Card;
    use klondike_core::model::rank::Rank;

    fn card(code: &str) -> Card {
        Card::from_code(code).unwrap()
    }

    #[test]
    fn renders_every_pile_in_reading_order() {
        let mut tableau: [TableauColumn; COLUMN_COUNT] =
            core::array::from_fn(|_| TableauColumn::empty());
        tableau[0] = TableauColumn::new(vec![card("2C")], vec![card("KS"), card("QD")]);
        let mut foundations: [Vec<Card>; FOUNDATION_COUNT] = core::array::from_fn(|_| Vec::new());
        foundations[Suit::Spades.index()] = vec![Card::new(Rank::Ace, Suit::Spades)];
        let state = TableState::from_parts(vec![card("9C")], vec![card("4H")], tableau, foundations);

        let expected = "\
stock  1  waste 4H
foundations -- -- AS --
col 0: ## KS QD
col 1:
col 2:
col 3:
col 4:
col 5:
col 6:
";
        assert_eq!(render(&state), expected);
    }

    #[test]
    fn an_untouched_deal_shows_hidden_cards_and_no_waste() {
        let state = TableState::deal_with_seed(3);
        let text = render(&state);
        assert!(text.starts_with("stock 24  waste --\n"));
        assert!(text.contains("foundations -- -- -- --"));
        // column 6 hides six cards
        assert!(text.contains("col 6: ## ## ## ## ## ##"));
    }
}
