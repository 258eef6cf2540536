//! Card types.

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    /// Hearts.
    Hearts,
    /// Diamonds.
    Diamonds,
    /// Clubs.
    Clubs,
    /// Spades.
    Spades,
}

impl Suit {
    /// All four suits in deck order.
    pub const ALL: [Self; 4] = [Self::Hearts, Self::Diamonds, Self::Clubs, Self::Spades];
}

/// A playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    /// The suit of the card.
    pub suit: Suit,
    /// The rank of the card (1 = Ace, 11 = Jack, 12 = Queen, 13 = King).
    pub rank: u8,
    /// Whether the card is dealt face down.
    pub hidden: bool,
}

impl Card {
    /// Creates a new face-up card.
    ///
    /// Note: This function does not validate the rank. Values outside 1..=13
    /// are accepted but count as zero when evaluating a hand.
    #[must_use]
    pub const fn new(suit: Suit, rank: u8) -> Self {
        Self {
            suit,
            rank,
            hidden: false,
        }
    }

    /// Creates a new face-down card.
    #[must_use]
    pub const fn face_down(suit: Suit, rank: u8) -> Self {
        Self {
            suit,
            rank,
            hidden: true,
        }
    }

    /// Returns the blackjack value of the card before ace adjustment.
    ///
    /// Aces count 11, faces count 10.
    #[must_use]
    pub const fn value(&self) -> u8 {
        rank_value(self.rank)
    }

    /// Returns whether the card is an ace.
    #[must_use]
    pub const fn is_ace(&self) -> bool {
        self.rank == 1
    }

    /// Turns the card face up.
    pub const fn reveal(&mut self) {
        self.hidden = false;
    }
}

/// Maps a rank (1..=13) to its blackjack value (Ace = 11, faces = 10).
#[must_use]
pub const fn rank_value(rank: u8) -> u8 {
    match rank {
        1 => 11,
        2..=10 => rank,
        11..=13 => 10,
        _ => 0,
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;
