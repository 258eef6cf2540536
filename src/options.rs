//! Table rule configuration.

use crate::error::RulesError;

/// When a player may forfeit half the stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SurrenderOption {
    /// Surrender not offered.
    None,
    /// Surrender after the dealer checks for blackjack.
    #[default]
    Late,
    /// Surrender before the dealer checks for blackjack.
    Early,
}

impl SurrenderOption {
    /// Parses a surrender mode from table configuration text.
    ///
    /// Unrecognized text means surrender is not offered.
    ///
    /// ```
    /// use bjev::SurrenderOption;
    ///
    /// assert_eq!(SurrenderOption::parse("late"), SurrenderOption::Late);
    /// assert_eq!(SurrenderOption::parse(" Early "), SurrenderOption::Early);
    /// assert_eq!(SurrenderOption::parse("sometimes"), SurrenderOption::None);
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.eq_ignore_ascii_case("late") {
            Self::Late
        } else if text.eq_ignore_ascii_case("early") {
            Self::Early
        } else {
            Self::None
        }
    }

    /// Returns whether surrender is offered at all.
    #[must_use]
    pub const fn is_offered(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl From<&str> for SurrenderOption {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

/// Rules of the table an EV query is evaluated under.
///
/// Use the builder pattern to customize rules:
///
/// ```
/// use bjev::{GameRules, SurrenderOption};
///
/// let rules = GameRules::default()
///     .with_decks(2)
///     .with_dealer_hits_soft_17(false)
///     .with_surrender(SurrenderOption::None);
/// assert!(rules.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GameRules {
    /// Number of decks in the shoe.
    pub decks: u8,
    /// Whether the dealer hits soft 17.
    pub dealer_hits_soft_17: bool,
    /// Whether double down is allowed after split.
    pub double_after_split: bool,
    /// Surrender mode.
    pub surrender: SurrenderOption,
    /// Blackjack payout ratio (typically 1.5).
    pub blackjack_pays: f64,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            decks: 6,
            dealer_hits_soft_17: true,
            double_after_split: true,
            surrender: SurrenderOption::Late,
            blackjack_pays: 1.5,
        }
    }
}

impl GameRules {
    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use bjev::GameRules;
    ///
    /// let rules = GameRules::default().with_decks(8);
    /// assert_eq!(rules.decks, 8);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets whether the dealer hits soft 17.
    ///
    /// # Example
    ///
    /// ```
    /// use bjev::GameRules;
    ///
    /// let rules = GameRules::default().with_dealer_hits_soft_17(false);
    /// assert!(!rules.dealer_hits_soft_17);
    /// ```
    #[must_use]
    pub const fn with_dealer_hits_soft_17(mut self, hits: bool) -> Self {
        self.dealer_hits_soft_17 = hits;
        self
    }

    /// Sets whether double down is allowed after split.
    ///
    /// # Example
    ///
    /// ```
    /// use bjev::GameRules;
    ///
    /// let rules = GameRules::default().with_double_after_split(false);
    /// assert!(!rules.double_after_split);
    /// ```
    #[must_use]
    pub const fn with_double_after_split(mut self, allowed: bool) -> Self {
        self.double_after_split = allowed;
        self
    }

    /// Sets the surrender mode.
    #[must_use]
    pub const fn with_surrender(mut self, surrender: SurrenderOption) -> Self {
        self.surrender = surrender;
        self
    }

    /// Sets the blackjack payout ratio.
    ///
    /// # Example
    ///
    /// ```
    /// use bjev::GameRules;
    ///
    /// let rules = GameRules::default().with_blackjack_pays(1.2);
    /// assert_eq!(rules.blackjack_pays, 1.2);
    /// ```
    #[must_use]
    pub const fn with_blackjack_pays(mut self, ratio: f64) -> Self {
        self.blackjack_pays = ratio;
        self
    }

    /// Checks the rules for values no table can use.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no decks or the blackjack payout is
    /// negative or not finite.
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.decks == 0 {
            return Err(RulesError::NoDecks);
        }
        if !self.blackjack_pays.is_finite() || self.blackjack_pays < 0.0 {
            return Err(RulesError::InvalidBlackjackPayout);
        }
        Ok(())
    }
}
