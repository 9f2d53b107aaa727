pub mod card;
pub mod deck;
pub mod rank;
pub mod suit;
