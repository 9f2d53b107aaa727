use core::fmt;

use klondike_core::game::table::TableState;
use klondike_core::model::card::Card;
use klondike_core::model::suit::Suit;

use crate::bot::EngineError;

/// A spot on the table a card can travel from or to.
///
/// Tableau positions index into the face-up run (0 is the deepest exposed
/// card). For destinations the position is advisory: the table decides where
/// an arriving card actually lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    WastePile,
    Tableau { column: usize, position: usize },
    Foundation(Suit),
}

impl Location {
    pub const fn tableau(column: usize, position: usize) -> Self {
        Location::Tableau { column, position }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::WastePile => f.write_str("waste"),
            Location::Tableau { column, position } => write!(f, "tableau[{column}:{position}]"),
            Location::Foundation(suit) => write!(f, "foundation[{suit}]"),
        }
    }
}

/// A request to relocate a card (or a run rooted at it).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Location,
    pub to: Location,
}

impl Move {
    pub const fn new(from: Location, to: Location) -> Self {
        Self { from, to }
    }

    /// Realizes this move against the table. Exactly four pairings are
    /// performable; asking for any other shape is a planner defect.
    pub fn apply(self, state: &mut TableState) -> Result<(), EngineError> {
        match (self.from, self.to) {
            (Location::WastePile, Location::Tableau { column, .. }) => {
                state.move_waste_to_tableau(column)?;
            }
            (Location::WastePile, Location::Foundation(suit)) => {
                state.move_waste_to_foundation(suit)?;
            }
            (Location::Tableau { column, .. }, Location::Foundation(suit)) => {
                state.move_tableau_to_foundation(column, suit)?;
            }
            (Location::Tableau { column, position }, Location::Tableau { column: dest, .. }) => {
                state.move_tableau_run(column, position, dest)?;
            }
            _ => return Err(EngineError::UnsupportedMove(self)),
        }
        Ok(())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// One link of a planned chain: the move plus the card it should relocate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanStep {
    pub mv: Move,
    pub card: Card,
}
