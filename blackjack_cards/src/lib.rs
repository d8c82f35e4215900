//! Cards, shoes and the scoring rules of blackjack. The simulation crate builds its round engine on top of these.

pub mod card;
pub mod deck;
pub mod score;

pub use card::{Card, Rank, Suit};
pub use deck::{Deck, DeckError, CARDS_PER_DECK};
pub use score::{formatted_score, is_blackjack, is_bust, is_soft, min_score, score};

pub mod prelude {
    pub use super::card::{Card, Rank, Suit};
    pub use super::deck::{Deck, DeckError, CARDS_PER_DECK};
    pub use super::score::*;
}
