use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The thirteen ranks of a standard deck. The discriminant is the face value, so `Ace` is 1 and `King` is 13.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// All ranks in ascending order, useful for building decks.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Method that returns the contribution of the rank to a blackjack score, face cards are worth 10 and an ace is worth 1.
    pub fn value(&self) -> u8 {
        u8::min(*self as u8, 10)
    }

    fn name(&self) -> &'static str {
        match self {
            Rank::Ace => "Ace",
            Rank::Two => "Two",
            Rank::Three => "Three",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Eight => "Eight",
            Rank::Nine => "Nine",
            Rank::Ten => "Ten",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
        }
    }
}

impl Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The suit of a card. `Joker` exists so a card can be marked as outside the standard deck, it is never dealt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spade,
    Diamond,
    Club,
    Heart,
    Joker,
}

impl Suit {
    /// The four suits that make up a standard deck.
    pub const STANDARD: [Suit; 4] = [Suit::Spade, Suit::Diamond, Suit::Club, Suit::Heart];
}

impl Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Suit::Spade => "Spades",
            Suit::Diamond => "Diamonds",
            Suit::Club => "Clubs",
            Suit::Heart => "Hearts",
            Suit::Joker => "Joker",
        };
        write!(f, "{}", name)
    }
}

/// An immutable playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    /// Associated function to create a new `Card`.
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    /// Getter for the cards contribution to a blackjack score.
    pub fn val(&self) -> u8 {
        self.rank.value()
    }

    pub fn is_ace(&self) -> bool {
        self.rank == Rank::Ace
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.suit == Suit::Joker {
            return write!(f, "Joker");
        }
        write!(f, "{} of {}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_rank_values_are_capped_at_ten() {
        assert_eq!(Rank::Ace.value(), 1);
        assert_eq!(Rank::Seven.value(), 7);
        assert_eq!(Rank::Ten.value(), 10);
        assert_eq!(Rank::Jack.value(), 10);
        assert_eq!(Rank::King.value(), 10);
    }

    #[test]
    fn test_card_display() {
        assert_eq!(Card::new(Rank::Ace, Suit::Spade).to_string(), "Ace of Spades");
        assert_eq!(Card::new(Rank::Ten, Suit::Heart).to_string(), "Ten of Hearts");
        assert_eq!(Card::new(Rank::Two, Suit::Joker).to_string(), "Joker");
    }
}
