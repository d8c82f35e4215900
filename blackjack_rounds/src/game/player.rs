use blackjack_cards::{formatted_score, is_blackjack, is_bust, score, Card};
use std::fmt::Display;

/// A single hand of the player together with the bet riding on it.
/// During a round with splits the session holds several of these, each scored and settled on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerHand {
    cards: Vec<Card>,
    bet: u32,
}

impl PlayerHand {
    /// Associated function to create a new empty hand with `bet` placed on it.
    pub fn new(bet: u32) -> PlayerHand {
        PlayerHand {
            cards: Vec::with_capacity(5),
            bet,
        }
    }

    /// Associated function to create a hand that already holds `cards`.
    pub fn with_cards(cards: Vec<Card>, bet: u32) -> PlayerHand {
        PlayerHand { cards, bet }
    }

    /// Getter for the cards in the hand.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Getter for the bet placed on the hand.
    pub fn bet(&self) -> u32 {
        self.bet
    }

    /// Number of cards in the hand.
    pub fn num_cards(&self) -> usize {
        self.cards.len()
    }

    /// Method for receiving a card, returns the best score of the hand afterwards.
    pub fn receive_card(&mut self, card: Card) -> u32 {
        self.cards.push(card);
        score(&self.cards)
    }

    pub fn score(&self) -> u32 {
        score(&self.cards)
    }

    pub fn is_blackjack(&self) -> bool {
        is_blackjack(&self.cards)
    }

    pub fn busted(&self) -> bool {
        is_bust(&self.cards)
    }

    /// Returns true if the hand holds exactly two cards.
    pub fn can_double_down(&self) -> bool {
        self.cards.len() == 2
    }

    /// Returns true if the hand holds exactly two cards of the same rank.
    pub fn can_split(&self) -> bool {
        self.cards.len() == 2 && self.cards[0].rank == self.cards[1].rank
    }

    /// Doubles the bet on this hand. Returns false and leaves the bet alone if doubling would overflow.
    pub fn double_bet(&mut self) -> bool {
        match self.bet.checked_mul(2) {
            Some(bet) => {
                self.bet = bet;
                true
            }
            None => false,
        }
    }

    /// Splits the hand in two. `self` keeps the first card and the returned hand holds the second card with the same bet.
    /// Returns `None` and leaves the hand untouched if the hand cannot be split.
    pub fn split(&mut self) -> Option<PlayerHand> {
        if !self.can_split() {
            return None;
        }
        let second = self.cards.split_off(1);
        Some(PlayerHand::with_cards(second, self.bet))
    }

    /// Consumes the hand returning its cards.
    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }
}

impl Display for PlayerHand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cards = self
            .cards
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<String>>()
            .join(", ");
        write!(
            f,
            "[{}] ({}) bet: {}",
            cards,
            formatted_score(&self.cards),
            self.bet
        )
    }
}
