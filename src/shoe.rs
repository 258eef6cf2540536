//! A shuffled multi-deck shoe of real cards.

use alloc::vec::Vec;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, DECK_SIZE, Suit};

/// Cards waiting to be dealt, drawn from the end.
pub struct Shoe {
    cards: Vec<Card>,
    decks: u8,
    rng: ChaCha8Rng,
}

impl Shoe {
    /// Creates a shuffled shoe with the given number of decks and seed.
    #[must_use]
    pub fn new(decks: u8, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let cards = Self::create_cards(decks, &mut rng);
        Self { cards, decks, rng }
    }

    /// Creates a shoe that deals `draws` in order, front first.
    ///
    /// Once the stacked cards run out the shoe refills with `decks` shuffled
    /// decks from `seed`.
    #[must_use]
    pub fn from_draws(draws: &[Card], decks: u8, seed: u64) -> Self {
        let mut cards = draws.to_vec();
        cards.reverse();
        Self {
            cards,
            decks,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    fn create_cards(decks: u8, rng: &mut ChaCha8Rng) -> Vec<Card> {
        let mut cards = Vec::with_capacity(decks as usize * DECK_SIZE);

        for _ in 0..decks {
            for suit in Suit::ALL {
                for rank in 1..=13 {
                    cards.push(Card::new(suit, rank));
                }
            }
        }

        cards.shuffle(rng);
        cards
    }

    /// Replaces the remaining cards with a fresh shuffled shoe.
    pub fn reshuffle(&mut self) {
        self.cards = Self::create_cards(self.decks, &mut self.rng);
    }

    /// Draws a card, or `None` if the shoe is empty.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Draws a card, reshuffling a fresh shoe first if this one is empty.
    ///
    /// Returns `None` only when the shoe is configured with zero decks.
    pub fn draw_or_reshuffle(&mut self) -> Option<Card> {
        if self.cards.is_empty() {
            log::debug!("shoe exhausted, reshuffling {} decks", self.decks);
            self.reshuffle();
        }
        self.draw()
    }

    /// Returns the number of cards remaining.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}
