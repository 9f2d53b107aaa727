use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Suit {
    Clubs = 0,
    Diamonds = 1,
    Spades = 2,
    Hearts = 3,
}

/// Tableau stacking alternates between the two suit colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SuitColor {
    Black,
    Red,
}

impl SuitColor {
    pub const fn opposite(self) -> SuitColor {
        match self {
            SuitColor::Black => SuitColor::Red,
            SuitColor::Red => SuitColor::Black,
        }
    }
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Spades, Suit::Hearts];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suit::Clubs),
            1 => Some(Suit::Diamonds),
            2 => Some(Suit::Spades),
            3 => Some(Suit::Hearts),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn color(self) -> SuitColor {
        match self {
            Suit::Clubs | Suit::Spades => SuitColor::Black,
            Suit::Diamonds | Suit::Hearts => SuitColor::Red,
        }
    }

    pub fn from_symbol(value: char) -> Option<Self> {
        match value {
            'C' => Some(Suit::Clubs),
            'D' => Some(Suit::Diamonds),
            'S' => Some(Suit::Spades),
            'H' => Some(Suit::Hearts),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Suit::Clubs => "C",
            Suit::Diamonds => "D",
            Suit::Spades => "S",
            Suit::Hearts => "H",
        };
        f.write_str(symbol)
    }
}
