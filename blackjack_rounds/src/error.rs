use crate::game::table::RoundState;
use blackjack_cards::DeckError;
use thiserror::Error;

/// Errors produced while playing a round of blackjack.
///
/// `Bust` is a signal rather than a failure, the round engine converts it into a stand.
/// Every other variant aborts the simulation run that produced it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BlackjackGameError {
    #[error("hand score exceeded 21")]
    Bust,
    #[error("invalid move: {0}")]
    InvalidMove(String),
    #[error("move not allowed while the round is in state {0:?}")]
    InvalidState(RoundState),
    #[error("the shoe ran out of cards mid round")]
    ShoeExhausted,
    #[error("bet of {bet} is below the table minimum of {min_bet}")]
    BetBelowMinimum { bet: u32, min_bet: u32 },
}

impl BlackjackGameError {
    /// Helper for building an `InvalidMove` error from anything string like.
    pub fn invalid_move<S: Into<String>>(message: S) -> Self {
        BlackjackGameError::InvalidMove(message.into())
    }

    /// Returns true for the recoverable bust signal.
    pub fn is_bust(&self) -> bool {
        matches!(self, BlackjackGameError::Bust)
    }
}

impl From<DeckError> for BlackjackGameError {
    fn from(_: DeckError) -> Self {
        BlackjackGameError::ShoeExhausted
    }
}
