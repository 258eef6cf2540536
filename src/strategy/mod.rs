//! Expected value of every player action and the optimal choice.
//!
//! All EVs use an infinite-deck model: each card is drawn independently with
//! fixed probabilities (see [`deck::DRAWS`]), so shoe depletion and counting
//! are ignored. EVs are per unit of the original stake.
//!
//! The recursive engines memoize into caches owned by an [`Advisor`]. Each
//! query clears them first, so one advisor gives identical answers to
//! identical queries no matter what it was asked before. An advisor needs
//! `&mut self` per query; give each thread its own.

use alloc::vec::Vec;

use crate::card::rank_value;
use crate::error::QueryError;
use crate::hand::{DealerHand, Hand, HandValue};
use crate::options::GameRules;

pub mod dealer;
pub mod deck;
pub mod player;

pub use dealer::{DealerCache, DealerDist, DealerOutcome, dealer_distribution};
pub use player::{PlayerCache, double_ev, hit_ev, max_ev, stand_ev};

/// EV of giving up half the stake.
pub const SURRENDER_EV: f64 = -0.5;

/// A player decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Keep the current total.
    Stand,
    /// Take one more card.
    Hit,
    /// Double the stake and take exactly one card.
    Double,
    /// Forfeit half the stake.
    Surrender,
    /// Play a pair as two hands.
    Split,
}

impl Action {
    /// Every action, in tie-break order.
    pub const ALL: [Self; 5] = [
        Self::Stand,
        Self::Hit,
        Self::Double,
        Self::Surrender,
        Self::Split,
    ];

    /// One-letter strategy chart symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Stand => "S",
            Self::Hit => "H",
            Self::Double => "D",
            Self::Surrender => "R",
            Self::Split => "P",
        }
    }
}

/// The EV of one action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionEv {
    /// The action.
    pub action: Action,
    /// Expected units won per unit staked.
    pub ev: f64,
}

/// Every available action ranked by EV, best first.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    ranked: Vec<ActionEv>,
    best: ActionEv,
}

impl Recommendation {
    /// Sorts by descending EV. Equal EVs keep their input order.
    fn rank(mut ranked: Vec<ActionEv>, best_if_empty: ActionEv) -> Self {
        ranked.sort_by(|a, b| b.ev.total_cmp(&a.ev));
        let best = ranked.first().copied().unwrap_or(best_if_empty);
        Self { ranked, best }
    }

    /// The highest-EV action.
    #[must_use]
    pub const fn best(&self) -> ActionEv {
        self.best
    }

    /// All actions considered, best first.
    #[must_use]
    pub fn ranked(&self) -> &[ActionEv] {
        &self.ranked
    }

    /// EV of `action`, or `None` if it was not available.
    #[must_use]
    pub fn ev(&self, action: Action) -> Option<f64> {
        self.ranked
            .iter()
            .find(|entry| entry.action == action)
            .map(|entry| entry.ev)
    }

    /// The action to suggest when only `legal` actions may be taken now.
    ///
    /// Returns the best action if it is legal, otherwise Stand, then Hit,
    /// then the first legal action. Returns `None` if `legal` is empty.
    ///
    /// ```
    /// use bjev::{Action, GameRules, Query, calculate_all_action_evs};
    ///
    /// let query = Query::new(11, 0, 6).unwrap();
    /// let advice = calculate_all_action_evs(&query, &GameRules::default());
    /// assert_eq!(advice.best().action, Action::Double);
    /// // After a hit the hand can no longer double
    /// assert_eq!(advice.best_legal(&[Action::Hit, Action::Stand]), Some(Action::Stand));
    /// ```
    #[must_use]
    pub fn best_legal(&self, legal: &[Action]) -> Option<Action> {
        [self.best.action, Action::Stand, Action::Hit]
            .into_iter()
            .find(|action| legal.contains(action))
            .or_else(|| legal.first().copied())
    }
}

/// A decision to evaluate: the player's hand state and the dealer upcard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Query {
    player: HandValue,
    pair_rank: Option<u8>,
    dealer_upcard: u8,
    true_count: f64,
}

impl Query {
    /// Creates a query for a player total with `usable_aces` aces counted as
    /// 11, against a dealer upcard value (2..=11, ace = 11).
    ///
    /// A total over 21 is accepted and evaluates as a bust hand.
    ///
    /// # Errors
    ///
    /// Returns an error if the upcard value is outside 2..=11 or more than
    /// four aces are counted as 11.
    pub const fn new(
        player_total: u8,
        usable_aces: u8,
        dealer_upcard: u8,
    ) -> Result<Self, QueryError> {
        if dealer_upcard < 2 || dealer_upcard > 11 {
            return Err(QueryError::InvalidUpcard(dealer_upcard));
        }
        if usable_aces > 4 {
            return Err(QueryError::InvalidUsableAces(usable_aces));
        }
        Ok(Self {
            player: HandValue {
                total: player_total,
                usable_aces,
            }
            .normalized(),
            pair_rank: None,
            dealer_upcard,
            true_count: 0.0,
        })
    }

    /// Marks the hand as a pair of `rank` (1 = Ace, 11..=13 = faces), which
    /// makes splitting available.
    ///
    /// # Errors
    ///
    /// Returns an error if the rank is outside 1..=13.
    pub const fn with_pair(mut self, rank: u8) -> Result<Self, QueryError> {
        if rank < 1 || rank > 13 {
            return Err(QueryError::InvalidPairRank(rank));
        }
        self.pair_rank = Some(rank);
        Ok(self)
    }

    /// Records the running true count. It does not change any EV.
    #[must_use]
    pub const fn with_true_count(mut self, true_count: f64) -> Self {
        self.true_count = true_count;
        self
    }

    /// Builds a query from the cards on the table.
    ///
    /// The player's hand is valued in full; the dealer upcard is the first
    /// face-up card. A two-card hand of equal ranks is a pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the dealer has no face-up card.
    pub fn from_hands(player: &Hand, dealer: &DealerHand) -> Result<Self, QueryError> {
        let upcard = dealer.up_card().map_or(0, crate::card::Card::value);
        let value = player.evaluate();
        let query = Self::new(value.total, value.usable_aces, upcard)?;
        match player.cards() {
            [first, _] if player.can_split() => query.with_pair(first.rank),
            _ => Ok(query),
        }
    }

    /// The player's total and usable aces.
    #[must_use]
    pub const fn player(&self) -> HandValue {
        self.player
    }

    /// The pair rank, if the hand is a pair.
    #[must_use]
    pub const fn pair_rank(&self) -> Option<u8> {
        self.pair_rank
    }

    /// The dealer upcard value (ace = 11).
    #[must_use]
    pub const fn dealer_upcard(&self) -> u8 {
        self.dealer_upcard
    }

    /// The recorded true count.
    #[must_use]
    pub const fn true_count(&self) -> f64 {
        self.true_count
    }
}

/// Computes action EVs, owning the memoization caches.
#[derive(Debug, Default)]
pub struct Advisor {
    dealer_cache: DealerCache,
    player_cache: PlayerCache,
}

impl Advisor {
    /// Creates an advisor with empty caches.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Dealer final-hand distribution for an upcard value (ace = 11).
    pub fn dealer_distribution(&mut self, upcard: u8, rules: &GameRules) -> DealerDist {
        self.dealer_cache.clear();
        dealer_distribution(upcard, rules, &mut self.dealer_cache)
    }

    /// EV of Stand, Hit, Double, and where allowed Surrender and Split,
    /// ranked best first.
    ///
    /// Surrender is offered when the rules allow it. Split is offered when
    /// the query is a pair. The query's true count is ignored.
    pub fn calculate_all_action_evs(&mut self, query: &Query, rules: &GameRules) -> Recommendation {
        self.dealer_cache.clear();
        self.player_cache.clear();

        let dist = dealer_distribution(query.dealer_upcard, rules, &mut self.dealer_cache);
        let state = query.player;

        let mut evs = Vec::with_capacity(Action::ALL.len());
        let stand = ActionEv {
            action: Action::Stand,
            ev: stand_ev(state.total, &dist),
        };
        evs.push(stand);
        evs.push(ActionEv {
            action: Action::Hit,
            ev: hit_ev(state, &dist, &mut self.player_cache),
        });
        evs.push(ActionEv {
            action: Action::Double,
            ev: double_ev(state, &dist),
        });
        if rules.surrender.is_offered() {
            evs.push(ActionEv {
                action: Action::Surrender,
                ev: SURRENDER_EV,
            });
        }
        if let Some(rank) = query.pair_rank {
            evs.push(ActionEv {
                action: Action::Split,
                ev: self.split_ev(rank, &dist, rules),
            });
        }

        let advice = Recommendation::rank(evs, stand);
        log::debug!(
            "player {} ({} usable aces) vs {}: {:?} at {:.4}",
            state.total,
            state.usable_aces,
            query.dealer_upcard,
            advice.best.action,
            advice.best.ev,
        );
        advice
    }

    /// EV of splitting a pair of `rank`: two independent hands, each the
    /// pair card plus one drawn card.
    fn split_ev(&mut self, rank: u8, dist: &DealerDist, rules: &GameRules) -> f64 {
        let start = HandValue::from_card_value(rank_value(rank));
        let is_aces = rank == 1;
        let cache = &mut self.player_cache;

        let one_hand = deck::expect(start, |hand| {
            if is_aces && !rules.double_after_split {
                return stand_ev(hand.total, dist);
            }
            let played = max_ev(hand, dist, cache);
            if rules.double_after_split {
                played.max(double_ev(hand, dist))
            } else {
                played
            }
        });

        2.0 * one_hand
    }
}

/// Ranks every action for `query` under `rules` with a fresh [`Advisor`].
#[must_use]
pub fn calculate_all_action_evs(query: &Query, rules: &GameRules) -> Recommendation {
    Advisor::new().calculate_all_action_evs(query, rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::SurrenderOption;

    fn advise(total: u8, usable_aces: u8, upcard: u8, rules: &GameRules) -> Recommendation {
        let query = Query::new(total, usable_aces, upcard).unwrap();
        calculate_all_action_evs(&query, rules)
    }

    #[test]
    fn ranking_is_descending() {
        let advice = advise(13, 0, 2, &GameRules::default());
        let evs: Vec<f64> = advice.ranked().iter().map(|entry| entry.ev).collect();
        assert!(evs.windows(2).all(|pair| pair[0] >= pair[1]));
        assert_eq!(advice.best(), advice.ranked()[0]);
    }

    #[test]
    fn ties_keep_push_order() {
        let ranked = Recommendation::rank(
            vec![
                ActionEv { action: Action::Stand, ev: -0.5 },
                ActionEv { action: Action::Hit, ev: -0.7 },
                ActionEv { action: Action::Surrender, ev: -0.5 },
            ],
            ActionEv { action: Action::Stand, ev: -0.5 },
        );
        assert_eq!(ranked.ranked()[0].action, Action::Stand);
        assert_eq!(ranked.ranked()[1].action, Action::Surrender);
    }

    #[test]
    fn surrender_only_when_offered() {
        let with = advise(16, 0, 10, &GameRules::default());
        assert_eq!(with.ev(Action::Surrender), Some(SURRENDER_EV));

        let rules = GameRules::default().with_surrender(SurrenderOption::parse("garbled"));
        let without = advise(16, 0, 10, &rules);
        assert_eq!(without.ev(Action::Surrender), None);
        assert_eq!(without.ranked().len(), 3);
    }

    #[test]
    fn split_only_for_pairs() {
        let rules = GameRules::default();
        assert_eq!(advise(16, 0, 10, &rules).ev(Action::Split), None);

        let query = Query::new(16, 0, 10).unwrap().with_pair(8).unwrap();
        assert!(calculate_all_action_evs(&query, &rules).ev(Action::Split).is_some());
    }

    #[test]
    fn bust_input_loses_a_unit() {
        let advice = advise(24, 0, 5, &GameRules::default());
        assert_eq!(advice.ev(Action::Stand), Some(-1.0));
        assert_eq!(advice.ev(Action::Hit), Some(-1.0));
        assert_eq!(advice.ev(Action::Double), Some(-1.0));
    }

    #[test]
    fn soft_total_over_21_is_demoted() {
        let query = Query::new(25, 1, 5).unwrap();
        assert_eq!(query.player(), HandValue { total: 15, usable_aces: 0 });
    }

    #[test]
    fn invalid_inputs_rejected() {
        assert_eq!(Query::new(12, 0, 1), Err(QueryError::InvalidUpcard(1)));
        assert_eq!(Query::new(12, 0, 12), Err(QueryError::InvalidUpcard(12)));
        assert_eq!(Query::new(20, 200, 6), Err(QueryError::InvalidUsableAces(200)));
        assert_eq!(Query::new(15, 5, 6), Err(QueryError::InvalidUsableAces(5)));
        assert!(Query::new(14, 4, 6).is_ok());
        let query = Query::new(12, 0, 7).unwrap();
        assert_eq!(query.with_pair(0), Err(QueryError::InvalidPairRank(0)));
        assert_eq!(query.with_pair(14), Err(QueryError::InvalidPairRank(14)));
    }

    #[test]
    fn true_count_changes_nothing() {
        let rules = GameRules::default();
        let query = Query::new(12, 0, 3).unwrap();
        let counted = query.with_true_count(4.5);
        assert_eq!(counted.true_count(), 4.5);
        assert_eq!(
            calculate_all_action_evs(&query, &rules),
            calculate_all_action_evs(&counted, &rules)
        );
    }

    #[test]
    fn best_legal_falls_back() {
        let advice = advise(11, 0, 6, &GameRules::default());
        assert_eq!(advice.best().action, Action::Double);
        assert_eq!(advice.best_legal(&Action::ALL), Some(Action::Double));
        assert_eq!(advice.best_legal(&[Action::Hit]), Some(Action::Hit));
        assert_eq!(advice.best_legal(&[Action::Split, Action::Surrender]), Some(Action::Split));
        assert_eq!(advice.best_legal(&[]), None);
    }
}
