use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;

pub const COLUMN_COUNT: usize = 7;
pub const FOUNDATION_COUNT: usize = 4;

/// Refusals raised by the table for requests that break the rules. Callers
/// are expected to issue only legal requests; any of these surfacing during
/// play indicates a defect upstream, not a recoverable condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    StockEmpty,
    WasteEmpty,
    ColumnOutOfRange(usize),
    ColumnEmpty(usize),
    SameColumn(usize),
    RunOutOfRange { column: usize, start: usize },
    BrokenRun { column: usize, start: usize },
    TableauRefused { card: Card, column: usize },
    FoundationRefused { card: Card, suit: Suit },
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::StockEmpty => write!(f, "stock is empty"),
            MoveError::WasteEmpty => write!(f, "waste is empty"),
            MoveError::ColumnOutOfRange(column) => {
                write!(f, "column {column} is out of range")
            }
            MoveError::ColumnEmpty(column) => write!(f, "column {column} is empty"),
            MoveError::SameColumn(column) => {
                write!(f, "column {column} cannot move onto itself")
            }
            MoveError::RunOutOfRange { column, start } => {
                write!(f, "column {column} has no face-up card at index {start}")
            }
            MoveError::BrokenRun { column, start } => {
                write!(f, "cards from index {start} of column {column} do not form a run")
            }
            MoveError::TableauRefused { card, column } => {
                write!(f, "column {column} refused {card}")
            }
            MoveError::FoundationRefused { card, suit } => {
                write!(f, "{suit} foundation refused {card}")
            }
        }
    }
}

impl std::error::Error for MoveError {}

/// One of the seven columns: hidden cards below, the exposed run above.
/// `face_up` is ordered bottom-first, so the playable top is the last entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableauColumn {
    face_down: Vec<Card>,
    face_up: Vec<Card>,
}

impl TableauColumn {
    pub fn new(face_down: Vec<Card>, face_up: Vec<Card>) -> Self {
        Self { face_down, face_up }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    pub fn face_up(&self) -> &[Card] {
        &self.face_up
    }

    pub fn face_down_len(&self) -> usize {
        self.face_down.len()
    }

    // Hidden cards stay crate-private; play code only sees the count.
    pub(crate) fn face_down_cards(&self) -> &[Card] {
        &self.face_down
    }

    pub fn top(&self) -> Option<Card> {
        self.face_up.last().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.face_up.is_empty() && self.face_down.is_empty()
    }
}

/// The authoritative Klondike layout. All mutation goes through the legality
/// checked methods below; each refuses an illegal request instead of
/// corrupting the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    stock: Vec<Card>,
    waste: Vec<Card>,
    tableau: [TableauColumn; COLUMN_COUNT],
    foundations: [Vec<Card>; FOUNDATION_COUNT],
}

impl TableState {
    /// Standard deal: column `i` receives `i + 1` cards with only the last
    /// face-up; the remaining 24 cards form the stock.
    pub fn deal(deck: &Deck) -> Self {
        let cards = deck.cards();
        let mut cursor = 0;
        let tableau = core::array::from_fn(|column| {
            let count = column + 1;
            let mut face_down = cards[cursor..cursor + count].to_vec();
            cursor += count;
            let face_up = match face_down.pop() {
                Some(card) => vec![card],
                None => Vec::new(),
            };
            TableauColumn::new(face_down, face_up)
        });
        let stock = cards[cursor..].to_vec();
        Self {
            stock,
            waste: Vec::new(),
            tableau,
            foundations: core::array::from_fn(|_| Vec::new()),
        }
    }

    pub fn deal_with_seed(seed: u64) -> Self {
        Self::deal(&Deck::shuffled_with_seed(seed))
    }

    /// Assembles an arbitrary layout. Used by snapshot restore and tests;
    /// the caller is responsible for handing over a layout reachable by
    /// legal play.
    pub fn from_parts(
        stock: Vec<Card>,
        waste: Vec<Card>,
        tableau: [TableauColumn; COLUMN_COUNT],
        foundations: [Vec<Card>; FOUNDATION_COUNT],
    ) -> Self {
        Self {
            stock,
            waste,
            tableau,
            foundations,
        }
    }

    pub fn waste_top(&self) -> Option<Card> {
        self.waste.last().copied()
    }

    pub(crate) fn stock_cards(&self) -> &[Card] {
        &self.stock
    }

    pub(crate) fn waste_cards(&self) -> &[Card] {
        &self.waste
    }

    pub fn stock_len(&self) -> usize {
        self.stock.len()
    }

    pub fn waste_len(&self) -> usize {
        self.waste.len()
    }

    pub fn column(&self, index: usize) -> &TableauColumn {
        &self.tableau[index]
    }

    pub fn columns(&self) -> &[TableauColumn; COLUMN_COUNT] {
        &self.tableau
    }

    pub fn foundation(&self, suit: Suit) -> &[Card] {
        &self.foundations[suit.index()]
    }

    pub fn foundation_top(&self, suit: Suit) -> Option<Card> {
        self.foundations[suit.index()].last().copied()
    }

    /// Total cards promoted across all four foundations.
    pub fn promoted_count(&self) -> usize {
        self.foundations.iter().map(Vec::len).sum()
    }

    pub fn is_won(&self) -> bool {
        self.foundations.iter().all(|pile| pile.len() == 13)
    }

    /// Turns the next stock card face-up onto the waste pile.
    pub fn draw_from_stock(&mut self) -> Result<(), MoveError> {
        let card = self.stock.pop().ok_or(MoveError::StockEmpty)?;
        self.waste.push(card);
        Ok(())
    }

    /// Returns every waste card to the stock, restoring the original draw
    /// order. Resetting with an empty waste is a no-op.
    pub fn reset_stock(&mut self) {
        while let Some(card) = self.waste.pop() {
            self.stock.push(card);
        }
    }

    pub fn move_waste_to_tableau(&mut self, column: usize) -> Result<(), MoveError> {
        self.check_column(column)?;
        let card = self.waste_top().ok_or(MoveError::WasteEmpty)?;
        if !tableau_accepts(self.tableau[column].top(), card) {
            return Err(MoveError::TableauRefused { card, column });
        }
        self.waste.pop();
        self.tableau[column].face_up.push(card);
        Ok(())
    }

    pub fn move_waste_to_foundation(&mut self, suit: Suit) -> Result<(), MoveError> {
        let card = self.waste_top().ok_or(MoveError::WasteEmpty)?;
        if !foundation_accepts(self.foundation_top(suit), card, suit) {
            return Err(MoveError::FoundationRefused { card, suit });
        }
        self.waste.pop();
        self.foundations[suit.index()].push(card);
        Ok(())
    }

    pub fn move_tableau_to_foundation(&mut self, column: usize, suit: Suit) -> Result<(), MoveError> {
        self.check_column(column)?;
        let card = self.tableau[column]
            .top()
            .ok_or(MoveError::ColumnEmpty(column))?;
        if !foundation_accepts(self.foundation_top(suit), card, suit) {
            return Err(MoveError::FoundationRefused { card, suit });
        }
        self.tableau[column].face_up.pop();
        self.foundations[suit.index()].push(card);
        self.flip_exposed(column);
        Ok(())
    }

    /// Relocates the source run from face-up index `start` through the top
    /// onto the destination column.
    pub fn move_tableau_run(&mut self, src: usize, start: usize, dest: usize) -> Result<(), MoveError> {
        self.check_column(src)?;
        self.check_column(dest)?;
        if src == dest {
            return Err(MoveError::SameColumn(src));
        }
        if self.tableau[src].face_up.is_empty() {
            return Err(MoveError::ColumnEmpty(src));
        }
        if start >= self.tableau[src].face_up.len() {
            return Err(MoveError::RunOutOfRange { column: src, start });
        }
        let run = &self.tableau[src].face_up[start..];
        if !is_valid_run(run) {
            return Err(MoveError::BrokenRun { column: src, start });
        }
        let bottom = run[0];
        if !tableau_accepts(self.tableau[dest].top(), bottom) {
            return Err(MoveError::TableauRefused {
                card: bottom,
                column: dest,
            });
        }
        let moved = self.tableau[src].face_up.split_off(start);
        self.tableau[dest].face_up.extend(moved);
        self.flip_exposed(src);
        Ok(())
    }

    fn check_column(&self, column: usize) -> Result<(), MoveError> {
        if column < COLUMN_COUNT {
            Ok(())
        } else {
            Err(MoveError::ColumnOutOfRange(column))
        }
    }

    fn flip_exposed(&mut self, column: usize) {
        let pile = &mut self.tableau[column];
        if pile.face_up.is_empty() {
            if let Some(card) = pile.face_down.pop() {
                pile.face_up.push(card);
            }
        }
    }
}

fn tableau_accepts(top: Option<Card>, card: Card) -> bool {
    match top {
        None => card.rank == Rank::King,
        Some(top) => {
            card.rank.successor() == Some(top.rank) && card.color() != top.color()
        }
    }
}

fn foundation_accepts(top: Option<Card>, card: Card, suit: Suit) -> bool {
    if card.suit != suit {
        return false;
    }
    match top {
        None => card.rank == Rank::Ace,
        Some(top) => top.rank.successor() == Some(card.rank),
    }
}

/// A legal exposed run descends one rank at a time with alternating colors.
fn is_valid_run(cards: &[Card]) -> bool {
    cards.windows(2).all(|pair| {
        pair[1].rank.successor() == Some(pair[0].rank) && pair[1].color() != pair[0].color()
    })
}
