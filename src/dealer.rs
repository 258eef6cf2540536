//! Dealer forced play against a real shoe.

use alloc::vec::Vec;

use crate::card::Card;
use crate::hand::{DealerHand, HandValue};
use crate::options::GameRules;
use crate::shoe::Shoe;

/// Returns whether a dealer holding `value` stops drawing.
///
/// The dealer stands on hard 17 or more and on soft 18 or more. Soft 17
/// stands unless `hits_soft_17` is set. A bust hand also stops.
#[must_use]
pub const fn dealer_stands(value: HandValue, hits_soft_17: bool) -> bool {
    if value.total > 17 {
        return true;
    }
    value.total == 17 && !(value.is_soft() && hits_soft_17)
}

/// Dealer plays their hand according to the rules.
///
/// Every hidden card is revealed first. The dealer then draws from the end of
/// `shoe` until [`dealer_stands`] holds, reshuffling a fresh shoe if it runs
/// out. If the final total is over 21 the hand is marked bust.
///
/// Returns the cards drawn by the dealer.
pub fn play_dealer(hand: &mut DealerHand, shoe: &mut Shoe, rules: &GameRules) -> Vec<Card> {
    hand.reveal_all();

    let mut drawn_cards = Vec::new();

    loop {
        let value = hand.evaluate();
        if dealer_stands(value, rules.dealer_hits_soft_17) {
            break;
        }

        let Some(card) = shoe.draw_or_reshuffle() else {
            log::debug!("dealer cannot draw from an empty zero-deck shoe");
            break;
        };
        log::trace!("dealer draws rank {} on {}", card.rank, value.total);
        hand.add_card(card);
        drawn_cards.push(card);
    }

    if hand.value() > 21 {
        hand.mark_bust();
    }

    drawn_cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Suit;

    const fn card(rank: u8) -> Card {
        Card::new(Suit::Diamonds, rank)
    }

    fn dealer(up: u8, hole: u8) -> DealerHand {
        let mut hand = DealerHand::new();
        hand.add_card(card(up));
        hand.add_card(Card::face_down(Suit::Clubs, hole));
        hand
    }

    #[test]
    fn reveals_and_stands_on_hard_17() {
        let mut hand = dealer(10, 7);
        let mut shoe = Shoe::from_draws(&[card(4)], 1, 0);
        let drawn = play_dealer(&mut hand, &mut shoe, &GameRules::default());
        assert!(drawn.is_empty());
        assert!(!hand.has_hidden());
        assert_eq!(hand.value(), 17);
        assert!(!hand.is_bust());
        assert_eq!(shoe.remaining(), 1);
    }

    #[test]
    fn soft_17_follows_rule() {
        let hits = GameRules::default().with_dealer_hits_soft_17(true);
        let stands = GameRules::default().with_dealer_hits_soft_17(false);

        let mut hand = dealer(1, 6);
        let mut shoe = Shoe::from_draws(&[card(3)], 1, 0);
        let drawn = play_dealer(&mut hand, &mut shoe, &hits);
        assert_eq!(drawn, [card(3)]);
        assert_eq!(hand.value(), 20);

        let mut hand = dealer(1, 6);
        let mut shoe = Shoe::from_draws(&[card(3)], 1, 0);
        let drawn = play_dealer(&mut hand, &mut shoe, &stands);
        assert!(drawn.is_empty());
        assert_eq!(hand.value(), 17);
    }

    #[test]
    fn draws_until_bust_and_marks_hand() {
        let mut hand = dealer(10, 6);
        let mut shoe = Shoe::from_draws(&[card(9), card(2)], 1, 0);
        let drawn = play_dealer(&mut hand, &mut shoe, &GameRules::default());
        assert_eq!(drawn, [card(9)]);
        assert_eq!(hand.value(), 25);
        assert!(hand.is_bust());
    }

    #[test]
    fn empty_shoe_reshuffles_mid_hand() {
        let mut hand = dealer(2, 3);
        let mut shoe = Shoe::from_draws(&[], 1, 11);
        let drawn = play_dealer(&mut hand, &mut shoe, &GameRules::default().with_decks(1));
        assert!(!drawn.is_empty());
        assert!(hand.value() >= 17);
        assert_eq!(shoe.remaining() + drawn.len(), crate::card::DECK_SIZE);
    }

    #[test]
    fn stand_rule_table() {
        let hard = |total| HandValue { total, usable_aces: 0 };
        let soft = |total| HandValue { total, usable_aces: 1 };
        assert!(!dealer_stands(hard(16), false));
        assert!(dealer_stands(hard(17), true));
        assert!(dealer_stands(soft(17), false));
        assert!(!dealer_stands(soft(17), true));
        assert!(dealer_stands(soft(18), true));
        assert!(dealer_stands(hard(23), true));
    }
}
