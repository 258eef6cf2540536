//! Infinite-deck card probabilities.

use crate::hand::HandValue;

const THIRTEENTH: f64 = 1.0 / 13.0;

/// Each card value (ace as 11) with its draw probability.
///
/// Every draw is independent: 2 through 9 and the ace are 1/13 each, and
/// the four ten-valued ranks together are 4/13.
pub const DRAWS: [(u8, f64); 10] = [
    (2, THIRTEENTH),
    (3, THIRTEENTH),
    (4, THIRTEENTH),
    (5, THIRTEENTH),
    (6, THIRTEENTH),
    (7, THIRTEENTH),
    (8, THIRTEENTH),
    (9, THIRTEENTH),
    (10, 4.0 * THIRTEENTH),
    (11, THIRTEENTH),
];

/// Probability-weighted sum of `f` over the state after each possible draw.
pub(crate) fn expect(state: HandValue, mut f: impl FnMut(HandValue) -> f64) -> f64 {
    DRAWS
        .iter()
        .map(|&(value, probability)| probability * f(state.with_card_value(value)))
        .sum()
}
