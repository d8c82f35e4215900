use crate::card::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;
use thiserror::Error;

/// Number of cards in a single standard deck.
pub const CARDS_PER_DECK: usize = 52;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeckError {
    #[error("attempted to draw from an empty shoe")]
    Empty,
}

/// A shoe made up of one or more standard decks. Cards are only ever removed from the top.
#[derive(Debug, Clone, Default)]
pub struct Deck {
    cards: VecDeque<Card>,
    total: usize,
}

impl Deck {
    /// Associated function that builds `num_decks` standard decks in suit and rank order.
    pub fn new(num_decks: usize) -> Deck {
        let mut cards = VecDeque::with_capacity(num_decks * CARDS_PER_DECK);
        for _ in 0..num_decks {
            for suit in Suit::STANDARD {
                for rank in Rank::ALL {
                    cards.push_back(Card::new(rank, suit));
                }
            }
        }
        let total = cards.len();
        Deck { cards, total }
    }

    /// Associated function that builds `num_decks` standard decks and shuffles them with `rng`.
    pub fn shuffled<R: Rng + ?Sized>(num_decks: usize, rng: &mut R) -> Deck {
        let mut deck = Deck::new(num_decks);
        deck.shuffle(rng);
        deck
    }

    /// Builds a stacked shoe, the first card of `cards` is the top of the shoe.
    pub fn from_cards<I: IntoIterator<Item = Card>>(cards: I) -> Deck {
        let cards: VecDeque<Card> = cards.into_iter().collect();
        let total = cards.len();
        Deck { cards, total }
    }

    /// Shuffles the remaining cards in place.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.make_contiguous().shuffle(rng);
    }

    /// Removes and returns the top card of the shoe.
    pub fn draw(&mut self) -> Result<Card, DeckError> {
        self.cards.pop_front().ok_or(DeckError::Empty)
    }

    /// Returns the top card without removing it.
    pub fn peek(&self) -> Option<&Card> {
        self.cards.front()
    }

    /// Number of cards remaining in the shoe.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards the shoe held when it was built.
    pub fn total(&self) -> usize {
        self.total
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn test_new_deck_has_every_card_once_per_deck() {
        let deck = Deck::new(3);
        assert_eq!(deck.len(), 3 * CARDS_PER_DECK);
        assert_eq!(deck.total(), 3 * CARDS_PER_DECK);

        let mut counts: HashMap<Card, usize> = HashMap::new();
        for card in deck.cards.iter() {
            *counts.entry(*card).or_default() += 1;
        }
        assert_eq!(counts.len(), CARDS_PER_DECK);
        assert!(counts.values().all(|&n| n == 3));
        assert!(counts.keys().all(|c| c.suit != Suit::Joker));
    }

    #[test]
    fn test_shuffled_deck_keeps_its_cards() {
        let mut rng = StdRng::seed_from_u64(7);
        let deck = Deck::shuffled(2, &mut rng);
        let mut shuffled: Vec<Card> = deck.cards.iter().copied().collect();
        let mut ordered: Vec<Card> = Deck::new(2).cards.into_iter().collect();
        assert_ne!(shuffled, ordered);
        shuffled.sort_by_key(|c| (c.suit, c.rank));
        ordered.sort_by_key(|c| (c.suit, c.rank));
        assert_eq!(shuffled, ordered);
    }

    #[test]
    fn test_draw_from_top_until_empty() {
        let ace = Card::new(Rank::Ace, Suit::Club);
        let king = Card::new(Rank::King, Suit::Heart);
        let mut deck = Deck::from_cards(vec![ace, king]);
        assert_eq!(deck.peek(), Some(&ace));
        assert_eq!(deck.draw(), Ok(ace));
        assert_eq!(deck.draw(), Ok(king));
        assert!(deck.is_empty());
        assert_eq!(deck.draw(), Err(DeckError::Empty));
        assert_eq!(deck.total(), 2);
    }
}
