//! Scoring functions for blackjack hands. All of them are pure and work on any slice of cards.

use crate::card::Card;

/// Sum of every card's value with face cards counted as 10 and aces counted as 1.
pub fn min_score(hand: &[Card]) -> u32 {
    hand.iter().map(|c| c.val() as u32).sum()
}

/// The best total for `hand`. A single ace is promoted to 11 when the hard total is 11 or less.
pub fn score(hand: &[Card]) -> u32 {
    let min = min_score(hand);
    if min > 11 || !hand.iter().any(Card::is_ace) {
        return min;
    }
    min + 10
}

/// True if an ace in `hand` is currently being counted as 11.
pub fn is_soft(hand: &[Card]) -> bool {
    score(hand) != min_score(hand)
}

/// True only for a two card 21.
pub fn is_blackjack(hand: &[Card]) -> bool {
    hand.len() == 2 && score(hand) == 21
}

/// True if the best total of `hand` exceeds 21.
pub fn is_bust(hand: &[Card]) -> bool {
    score(hand) > 21
}

/// Formats a hand's total the way a table would call it, e.g. `7/17` for a soft hand.
pub fn formatted_score(hand: &[Card]) -> String {
    if is_soft(hand) {
        format!("{}/{}", min_score(hand), score(hand))
    } else {
        format!("{}", score(hand))
    }
}
