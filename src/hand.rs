//! Hand evaluation and player and dealer hand representations.

extern crate alloc;

use alloc::vec::Vec;

use crate::card::Card;

/// Best total of a hand together with the aces still counted as 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HandValue {
    /// Best total, demoting aces to 1 while over 21.
    pub total: u8,
    /// Aces still counted as 11 in `total`.
    pub usable_aces: u8,
}

impl HandValue {
    /// Value of a single card (11 for an ace, which is then usable).
    #[must_use]
    pub const fn from_card_value(value: u8) -> Self {
        Self {
            total: value,
            usable_aces: if value == 11 { 1 } else { 0 },
        }
        .normalized()
    }

    /// Adds one card value (11 for an ace) and demotes aces while over 21.
    #[must_use]
    pub const fn with_card_value(self, value: u8) -> Self {
        Self {
            total: self.total.saturating_add(value),
            usable_aces: self.usable_aces.saturating_add(if value == 11 { 1 } else { 0 }),
        }
        .normalized()
    }

    /// Demotes usable aces one at a time while the total is over 21.
    #[must_use]
    pub const fn normalized(mut self) -> Self {
        while self.total > 21 && self.usable_aces > 0 {
            self.total -= 10;
            self.usable_aces -= 1;
        }
        self
    }

    /// Returns whether the total is over 21.
    #[must_use]
    pub const fn is_bust(&self) -> bool {
        self.total > 21
    }

    /// Returns whether at least one ace is counted as 11 without busting.
    #[must_use]
    pub const fn is_soft(&self) -> bool {
        self.usable_aces > 0 && self.total <= 21
    }
}

/// Shape of a hand for strategy lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandKind {
    /// No ace counted as 11.
    Hard,
    /// At least one ace counted as 11.
    Soft,
    /// Exactly two cards of the same rank.
    Pair,
}

fn evaluate<'a>(cards: impl IntoIterator<Item = &'a Card>) -> HandValue {
    let mut total: u8 = 0;
    let mut usable_aces: u8 = 0;

    for card in cards {
        if card.is_ace() {
            usable_aces = usable_aces.saturating_add(1);
        }
        total = total.saturating_add(card.value());
    }

    HandValue { total, usable_aces }.normalized()
}

/// Evaluates the face-up cards only.
///
/// Hidden cards are skipped, which is what a table display wants for a
/// dealer hand with the hole card down. Use [`evaluate_all`] when the real
/// total matters.
#[must_use]
pub fn evaluate_visible(cards: &[Card]) -> HandValue {
    evaluate(cards.iter().filter(|card| !card.hidden))
}

/// Evaluates every card, face down or not.
#[must_use]
pub fn evaluate_all(cards: &[Card]) -> HandValue {
    evaluate(cards)
}

/// Best non-bust total of the visible cards.
#[must_use]
pub fn best_total(cards: &[Card]) -> u8 {
    evaluate_visible(cards).total
}

/// Aces counted as 11 in [`best_total`].
#[must_use]
pub fn usable_aces(cards: &[Card]) -> u8 {
    evaluate_visible(cards).usable_aces
}

/// Returns whether the visible cards form a soft hand.
#[must_use]
pub fn is_soft(cards: &[Card]) -> bool {
    evaluate_visible(cards).is_soft()
}

/// Classifies the visible cards as a pair, soft, or hard hand.
#[must_use]
pub fn classify(cards: &[Card]) -> HandKind {
    if matches!(cards, [first, second] if first.rank == second.rank) {
        HandKind::Pair
    } else if is_soft(cards) {
        HandKind::Soft
    } else {
        HandKind::Hard
    }
}

/// Hand status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandStatus {
    /// Hand is active and can take actions.
    Active,
    /// Player has stood.
    Stand,
    /// Hand has busted (over 21).
    Bust,
    /// Hand is a blackjack (natural 21).
    Blackjack,
}

/// A player's hand.
#[derive(Debug, Clone)]
pub struct Hand {
    /// Cards in the hand.
    cards: Vec<Card>,
    /// Current status of the hand.
    status: HandStatus,
    /// Bet amount for this hand.
    bet: usize,
    /// Whether this hand is from a split.
    from_split: bool,
    /// Whether the bet has been doubled.
    doubled: bool,
}

impl Hand {
    /// Creates a new empty hand with the given bet.
    #[must_use]
    pub const fn new(bet: usize) -> Self {
        Self {
            cards: Vec::new(),
            status: HandStatus::Active,
            bet,
            from_split: false,
            doubled: false,
        }
    }

    /// Creates a new hand from a split with a single card.
    #[must_use]
    pub fn from_split(card: Card, bet: usize) -> Self {
        Self {
            cards: alloc::vec![card],
            status: HandStatus::Active,
            bet,
            from_split: true,
            doubled: false,
        }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);

        let value = self.value();

        if value > 21 {
            self.status = HandStatus::Bust;
        }
        // Split hands never count as a natural
        else if self.cards.len() == 2 && value == 21 && !self.from_split {
            self.status = HandStatus::Blackjack;
        }
    }

    /// Doubles the bet, takes exactly one card, and stands if not bust.
    pub fn double_down(&mut self, card: Card) {
        self.bet *= 2;
        self.doubled = true;
        self.add_card(card);
        if self.status == HandStatus::Active {
            self.status = HandStatus::Stand;
        }
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the current status of the hand.
    #[must_use]
    pub const fn status(&self) -> HandStatus {
        self.status
    }

    /// Returns the bet amount for this hand.
    #[must_use]
    pub const fn bet(&self) -> usize {
        self.bet
    }

    /// Returns whether the bet was doubled.
    #[must_use]
    pub const fn is_doubled(&self) -> bool {
        self.doubled
    }

    /// Returns the best total and usable aces of every card in the hand.
    #[must_use]
    pub fn evaluate(&self) -> HandValue {
        evaluate_all(&self.cards)
    }

    /// Calculates the value of the hand.
    ///
    /// Aces are counted as 11 if possible without busting, otherwise as 1.
    #[must_use]
    pub fn value(&self) -> u8 {
        self.evaluate().total
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        self.evaluate().is_soft()
    }

    /// Returns the strategy shape of the hand.
    #[must_use]
    pub fn kind(&self) -> HandKind {
        classify(&self.cards)
    }

    /// Returns whether the hand can be split.
    #[must_use]
    pub fn can_split(&self) -> bool {
        self.kind() == HandKind::Pair
    }
}

/// The dealer's hand.
#[derive(Debug, Clone, Default)]
pub struct DealerHand {
    /// Cards in the hand, possibly face down.
    cards: Vec<Card>,
    /// Set once forced play ends over 21.
    busted: bool,
}

impl DealerHand {
    /// Creates a new empty dealer hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            busted: false,
        }
    }

    /// Adds a card to the hand as dealt.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns all cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the first face-up card.
    #[must_use]
    pub fn up_card(&self) -> Option<&Card> {
        self.cards.iter().find(|card| !card.hidden)
    }

    /// Returns whether any card is still face down.
    #[must_use]
    pub fn has_hidden(&self) -> bool {
        self.cards.iter().any(|card| card.hidden)
    }

    /// Turns every card face up.
    pub fn reveal_all(&mut self) {
        for card in &mut self.cards {
            card.reveal();
        }
    }

    /// Calculates the value of the face-up cards.
    #[must_use]
    pub fn visible_value(&self) -> u8 {
        evaluate_visible(&self.cards).total
    }

    /// Returns the best total and usable aces of every card in the hand.
    #[must_use]
    pub fn evaluate(&self) -> HandValue {
        evaluate_all(&self.cards)
    }

    /// Calculates the full value of the hand, hole card included.
    #[must_use]
    pub fn value(&self) -> u8 {
        self.evaluate().total
    }

    /// Returns whether forced play finished over 21.
    #[must_use]
    pub const fn is_bust(&self) -> bool {
        self.busted
    }

    pub(crate) const fn mark_bust(&mut self) {
        self.busted = true;
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        self.evaluate().is_soft()
    }
}
