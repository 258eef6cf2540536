//! Best achievable EV of a player total against a fixed dealer distribution.

#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::hand::HandValue;

use super::dealer::{DealerDist, DealerOutcome};
use super::deck::expect;

/// EV of a hand that is over 21.
pub const BUST_EV: f64 = -1.0;

/// Memoized [`max_ev`] results, keyed by `(total, usable_aces)`.
///
/// Entries are only valid for the dealer distribution they were computed
/// against, so the cache must be cleared whenever the upcard or rules change.
#[derive(Debug, Default)]
pub struct PlayerCache {
    entries: HashMap<HandValue, f64>,
}

impl PlayerCache {
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

/// EV of standing on `total` for one unit.
///
/// Wins on a dealer bust and compares against every standing total. A dealer
/// natural compares as 21.
#[must_use]
pub fn stand_ev(total: u8, dist: &DealerDist) -> f64 {
    if total > 21 {
        return BUST_EV;
    }

    dist.iter()
        .map(|(outcome, probability)| match outcome {
            DealerOutcome::Bust => probability,
            standing => match standing.total() {
                Some(dealer) if total > dealer => probability,
                Some(dealer) if total < dealer => -probability,
                _ => 0.0,
            },
        })
        .sum()
}

/// Best EV of `state` when the player may stand or keep hitting.
pub fn max_ev(state: HandValue, dist: &DealerDist, cache: &mut PlayerCache) -> f64 {
    if state.is_bust() {
        return BUST_EV;
    }
    if let Some(&ev) = cache.entries.get(&state) {
        return ev;
    }

    let stand = stand_ev(state.total, dist);
    let hit = hit_ev(state, dist, cache);
    let ev = stand.max(hit);

    cache.entries.insert(state, ev);
    ev
}

/// EV of taking one card and then playing on optimally.
pub fn hit_ev(state: HandValue, dist: &DealerDist, cache: &mut PlayerCache) -> f64 {
    if state.is_bust() {
        return BUST_EV;
    }
    expect(state, |next| max_ev(next, dist, cache))
}

/// EV of doubling: twice the stake, exactly one more card, then stand.
#[must_use]
pub fn double_ev(state: HandValue, dist: &DealerDist) -> f64 {
    if state.is_bust() {
        return BUST_EV;
    }
    2.0 * expect(state, |next| stand_ev(next.total, dist))
}
