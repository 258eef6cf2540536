//! Error types for rule and query validation.

use thiserror::Error;

/// Errors found in a table rule configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RulesError {
    /// The shoe would have no cards.
    #[error("deck count must be at least one")]
    NoDecks,
    /// Blackjack payout is negative or not a number.
    #[error("blackjack payout must be a finite, non-negative ratio")]
    InvalidBlackjackPayout,
}

/// Errors found in an EV query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Dealer upcard value outside 2..=11.
    #[error("dealer upcard value {0} is outside 2..=11")]
    InvalidUpcard(u8),
    /// Pair rank outside 1..=13.
    #[error("pair rank {0} is outside 1..=13")]
    InvalidPairRank(u8),
    /// More usable aces than a hand can hold.
    #[error("usable ace count {0} is outside 0..=4")]
    InvalidUsableAces(u8),
}
