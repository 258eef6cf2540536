//! A blackjack decision engine with optional `no_std` support.
//!
//! Given a player hand state, a dealer upcard, and the table [`GameRules`],
//! the crate computes the expected value of every legal action and picks the
//! best one, under an infinite-deck model. It also carries the deterministic
//! pieces a game loop needs around that: hand evaluation with the soft/hard
//! ace rule, a seeded [`Shoe`], and dealer forced play.
//!
//! # Example
//!
//! ```
//! use bjev::{Action, GameRules, Query, calculate_all_action_evs};
//!
//! let rules = GameRules::default();
//! let query = Query::new(16, 0, 6).unwrap();
//! let advice = calculate_all_action_evs(&query, &rules);
//! assert_eq!(advice.best().action, Action::Stand);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod dealer;
pub mod error;
pub mod hand;
pub mod options;
pub mod shoe;
pub mod strategy;

// Re-export main types
pub use card::{Card, DECK_SIZE, Suit};
pub use dealer::{dealer_stands, play_dealer};
pub use error::{QueryError, RulesError};
pub use hand::{
    DealerHand, Hand, HandKind, HandStatus, HandValue, best_total, classify, evaluate_all,
    evaluate_visible, is_soft, usable_aces,
};
pub use options::{GameRules, SurrenderOption};
pub use shoe::Shoe;
pub use strategy::{
    Action, ActionEv, Advisor, DealerDist, DealerOutcome, Query, Recommendation,
    calculate_all_action_evs,
};
