//! Probability distribution of the dealer's final hand.

#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::dealer::dealer_stands;
use crate::hand::HandValue;
use crate::options::GameRules;

use super::deck::DRAWS;

/// How the dealer's hand ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DealerOutcome {
    /// Stands on 17.
    Seventeen,
    /// Stands on 18.
    Eighteen,
    /// Stands on 19.
    Nineteen,
    /// Stands on 20.
    Twenty,
    /// Reaches 21 by drawing.
    TwentyOne,
    /// Goes over 21.
    Bust,
    /// Natural 21 on the first two cards.
    Blackjack,
}

impl DealerOutcome {
    /// Every outcome, in bucket order.
    pub const ALL: [Self; 7] = [
        Self::Seventeen,
        Self::Eighteen,
        Self::Nineteen,
        Self::Twenty,
        Self::TwentyOne,
        Self::Bust,
        Self::Blackjack,
    ];

    /// Outcome for a standing total, or `None` below 17.
    #[must_use]
    pub const fn from_total(total: u8) -> Option<Self> {
        match total {
            17 => Some(Self::Seventeen),
            18 => Some(Self::Eighteen),
            19 => Some(Self::Nineteen),
            20 => Some(Self::Twenty),
            21 => Some(Self::TwentyOne),
            22.. => Some(Self::Bust),
            _ => None,
        }
    }

    /// Final total for the standing outcomes.
    #[must_use]
    pub const fn total(self) -> Option<u8> {
        match self {
            Self::Seventeen => Some(17),
            Self::Eighteen => Some(18),
            Self::Nineteen => Some(19),
            Self::Twenty => Some(20),
            Self::TwentyOne | Self::Blackjack => Some(21),
            Self::Bust => None,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Probability of each [`DealerOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DealerDist {
    probabilities: [f64; 7],
}

impl DealerDist {
    /// A distribution with every probability on one outcome.
    #[must_use]
    pub const fn certain(outcome: DealerOutcome) -> Self {
        let mut probabilities = [0.0; 7];
        probabilities[outcome.index()] = 1.0;
        Self { probabilities }
    }

    /// Probability of `outcome`.
    #[must_use]
    pub const fn probability(&self, outcome: DealerOutcome) -> f64 {
        self.probabilities[outcome.index()]
    }

    /// Probability the dealer busts.
    #[must_use]
    pub const fn bust(&self) -> f64 {
        self.probability(DealerOutcome::Bust)
    }

    /// Probability the dealer has a natural.
    #[must_use]
    pub const fn blackjack(&self) -> f64 {
        self.probability(DealerOutcome::Blackjack)
    }

    /// Iterates over every outcome with its probability.
    pub fn iter(&self) -> impl Iterator<Item = (DealerOutcome, f64)> + '_ {
        DealerOutcome::ALL
            .iter()
            .map(|&outcome| (outcome, self.probability(outcome)))
    }

    /// Sum of all bucket probabilities.
    #[must_use]
    pub fn total_probability(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    /// Returns whether the buckets sum to one within `tolerance`.
    #[must_use]
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        let error = self.total_probability() - 1.0;
        -tolerance <= error && error <= tolerance
    }

    /// EV of a player natural that pays `blackjack_pays` to one.
    ///
    /// A dealer natural pushes; every other dealer outcome loses to it.
    #[must_use]
    pub fn natural_ev(&self, blackjack_pays: f64) -> f64 {
        blackjack_pays * (1.0 - self.blackjack())
    }

    fn accumulate(&mut self, weight: f64, other: &Self) {
        for (mine, theirs) in self.probabilities.iter_mut().zip(other.probabilities) {
            *mine += weight * theirs;
        }
    }
}

/// Where a dealer state sits in the deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deal {
    /// Only the upcard.
    Upcard,
    /// Upcard and hole card; a 21 here is a natural.
    Initial,
    /// Any hand after the dealer has drawn.
    Drawn,
}

impl Deal {
    const fn next(self) -> Self {
        match self {
            Self::Upcard => Self::Initial,
            Self::Initial | Self::Drawn => Self::Drawn,
        }
    }
}

/// Memoized dealer distributions for drawn hands.
///
/// Keys carry the soft-17 rule, so entries from either rule never collide.
/// Clear it between independent queries anyway; [`super::Advisor`] does.
#[derive(Debug, Default)]
pub struct DealerCache {
    entries: HashMap<(u8, u8, bool), DealerDist>,
}

impl DealerCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of memoized states.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing is memoized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Distribution of the dealer's final hand given the upcard value.
///
/// `upcard` is the card's blackjack value, 11 for an ace. The hole card and
/// every later card are drawn from an infinite deck.
#[must_use]
pub fn dealer_distribution(upcard: u8, rules: &GameRules, cache: &mut DealerCache) -> DealerDist {
    outcome(
        HandValue::from_card_value(upcard),
        Deal::Upcard,
        rules.dealer_hits_soft_17,
        cache,
    )
}

fn outcome(state: HandValue, deal: Deal, hits_soft_17: bool, cache: &mut DealerCache) -> DealerDist {
    if state.is_bust() {
        return DealerDist::certain(DealerOutcome::Bust);
    }

    if dealer_stands(state, hits_soft_17) {
        let standing = if deal == Deal::Initial && state.total == 21 {
            DealerOutcome::Blackjack
        } else {
            DealerOutcome::from_total(state.total).unwrap_or(DealerOutcome::Bust)
        };
        return DealerDist::certain(standing);
    }

    let key = (state.total, state.usable_aces, hits_soft_17);
    if deal == Deal::Drawn {
        if let Some(dist) = cache.entries.get(&key) {
            return *dist;
        }
    }

    let mut dist = DealerDist::default();
    for &(value, probability) in &DRAWS {
        let next = outcome(state.with_card_value(value), deal.next(), hits_soft_17, cache);
        dist.accumulate(probability, &next);
    }

    if deal == Deal::Drawn {
        cache.entries.insert(key, dist);
    }
    dist
}
