use super::table::{COLUMN_COUNT, FOUNDATION_COUNT, TableState, TableauColumn};
use crate::model::card::Card;
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnSnapshot {
    pub face_down: Vec<Card>,
    pub face_up: Vec<Card>,
}

/// Full-fidelity JSON image of a table, hidden cards included. Cards are
/// written as their display codes, so the files stay hand-editable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableSnapshot {
    pub stock: Vec<Card>,
    pub waste: Vec<Card>,
    pub tableau: [ColumnSnapshot; COLUMN_COUNT],
    pub foundations: [Vec<Card>; FOUNDATION_COUNT],
}

impl TableSnapshot {
    pub fn capture(state: &TableState) -> Self {
        TableSnapshot {
            stock: state.stock_cards().to_vec(),
            waste: state.waste_cards().to_vec(),
            tableau: core::array::from_fn(|i| {
                let column = state.column(i);
                ColumnSnapshot {
                    face_down: column.face_down_cards().to_vec(),
                    face_up: column.face_up().to_vec(),
                }
            }),
            foundations: core::array::from_fn(|i| state.foundation(Suit::ALL[i]).to_vec()),
        }
    }

    pub fn restore(self) -> TableState {
        let tableau = self
            .tableau
            .map(|column| TableauColumn::new(column.face_down, column.face_up));
        TableState::from_parts(self.stock, self.waste, tableau, self.foundations)
    }

    pub fn to_json(state: &TableState) -> serde_json::Result<String> {
        let snapshot = Self::capture(state);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
