use crate::model::rank::Rank;
use crate::model::suit::{Suit, SuitColor};
use core::fmt;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn color(self) -> SuitColor {
        self.suit.color()
    }

    /// Parses the compact code produced by `Display`, e.g. `AS` or `10D`.
    pub fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let suit_symbol = chars.next_back()?;
        let rank = Rank::from_symbol(chars.as_str())?;
        let suit = Suit::from_symbol(suit_symbol)?;
        Some(Card::new(rank, suit))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

// Snapshots carry cards as their display codes so the JSON stays readable.
impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;
        Card::from_code(&code).ok_or_else(|| de::Error::custom(format!("invalid card code: {code}")))
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, Rank, Suit};
    use crate::model::suit::SuitColor;

    #[test]
    fn display_concatenates_rank_and_suit() {
        assert_eq!(Card::new(Rank::Queen, Suit::Spades).to_string(), "QS");
        assert_eq!(Card::new(Rank::Ten, Suit::Diamonds).to_string(), "10D");
    }

    #[test]
    fn color_follows_suit() {
        assert_eq!(Card::new(Rank::Ace, Suit::Clubs).color(), SuitColor::Black);
        assert_eq!(Card::new(Rank::Ace, Suit::Hearts).color(), SuitColor::Red);
    }

    #[test]
    fn codes_round_trip() {
        for code in ["AS", "10D", "KH", "2C"] {
            let card = Card::from_code(code).unwrap();
            assert_eq!(card.to_string(), code);
        }
    }

    #[test]
    fn bad_codes_rejected() {
        for code in ["", "S", "A", "1S", "AX", "QSX"] {
            assert_eq!(Card::from_code(code), None, "code {code:?} should not parse");
        }
    }

    #[test]
    fn serializes_as_code_string() {
        let card = Card::new(Rank::Jack, Suit::Hearts);
        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(json, "\"JH\"");
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
    }

    #[test]
    fn deserialize_rejects_garbage() {
        assert!(serde_json::from_str::<Card>("\"ZZ\"").is_err());
    }
}
