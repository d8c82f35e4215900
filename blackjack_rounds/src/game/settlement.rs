use blackjack_cards::{is_blackjack, score, Card};
use serde::Serialize;
use std::fmt::Display;

/// The result of settling a single hand against the dealer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    Win,
    Blackjack,
    Push,
    Loss,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Outcome::Win => "win",
            Outcome::Blackjack => "blackjack",
            Outcome::Push => "push",
            Outcome::Loss => "loss",
        };
        write!(f, "{}", s)
    }
}

/// The two facts about a finished hand that settlement depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandResult {
    pub score: u32,
    pub blackjack: bool,
}

impl HandResult {
    pub fn new(score: u32, blackjack: bool) -> Self {
        HandResult { score, blackjack }
    }

    /// Associated method for scoring a finished hand.
    pub fn from_cards(cards: &[Card]) -> Self {
        HandResult {
            score: score(cards),
            blackjack: is_blackjack(cards),
        }
    }
}

/// Settles one player hand against the dealer, returning the outcome and the signed change to the balance.
///
/// The rules are checked in order:
/// both blackjack push, a dealer blackjack or a player bust loses, a player blackjack wins `bet * payout`
/// truncated toward zero, a dealer bust or higher player score wins the bet, equal scores push, anything else loses.
pub fn settle(player: HandResult, dealer: HandResult, bet: u32, payout: f64) -> (Outcome, i64) {
    let bet = bet as i64;
    if player.blackjack && dealer.blackjack {
        (Outcome::Push, 0)
    } else if dealer.blackjack || player.score > 21 {
        (Outcome::Loss, -bet)
    } else if player.blackjack {
        (Outcome::Blackjack, ((bet as f64) * payout).trunc() as i64)
    } else if dealer.score > 21 || player.score > dealer.score {
        (Outcome::Win, bet)
    } else if player.score == dealer.score {
        (Outcome::Push, 0)
    } else {
        (Outcome::Loss, -bet)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    const BET: u32 = 100;

    #[test]
    fn test_settlement_table() {
        let bj = HandResult::new(21, true);
        let twenty = HandResult::new(20, false);
        let bust = HandResult::new(24, false);

        assert_eq!(settle(bj, bj, BET, 1.5), (Outcome::Push, 0));
        assert_eq!(settle(twenty, bj, BET, 1.5), (Outcome::Loss, -100));
        assert_eq!(settle(bust, bust, BET, 1.5), (Outcome::Loss, -100));
        assert_eq!(settle(bj, twenty, BET, 1.5), (Outcome::Blackjack, 150));
        assert_eq!(settle(twenty, bust, BET, 1.5), (Outcome::Win, 100));
        assert_eq!(settle(twenty, HandResult::new(19, false), BET, 1.5), (Outcome::Win, 100));
        assert_eq!(settle(twenty, twenty, BET, 1.5), (Outcome::Push, 0));
        assert_eq!(settle(HandResult::new(18, false), twenty, BET, 1.5), (Outcome::Loss, -100));
    }

    #[test]
    fn test_three_card_twenty_one_does_not_beat_dealer_blackjack() {
        let three_card = HandResult::new(21, false);
        assert_eq!(settle(three_card, HandResult::new(21, true), BET, 1.5), (Outcome::Loss, -100));
        assert_eq!(settle(three_card, HandResult::new(21, false), BET, 1.5), (Outcome::Push, 0));
    }

    #[test]
    fn test_blackjack_payout_truncates() {
        let bj = HandResult::new(21, true);
        let dealer = HandResult::new(18, false);
        assert_eq!(settle(bj, dealer, 101, 1.5), (Outcome::Blackjack, 151));
        assert_eq!(settle(bj, dealer, 3, 1.5), (Outcome::Blackjack, 4));
        assert_eq!(settle(bj, dealer, 100, 2.0), (Outcome::Blackjack, 200));
    }

    proptest! {
        #[test]
        fn settlement_is_deterministic(
            p_score in 2u32..31,
            d_score in 2u32..31,
            p_bj in any::<bool>(),
            d_bj in any::<bool>(),
            bet in 1u32..100_000,
        ) {
            let player = HandResult::new(p_score, p_bj);
            let dealer = HandResult::new(d_score, d_bj);
            let first = settle(player, dealer, bet, 1.5);
            prop_assert_eq!(first, settle(player, dealer, bet, 1.5));
            let (_, amount) = first;
            prop_assert!(amount.abs() <= (bet as i64) * 2);
        }
    }
}
