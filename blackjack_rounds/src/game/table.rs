use crate::error::BlackjackGameError;
use crate::game::player::PlayerHand;
use crate::game::settlement::{settle, HandResult, Outcome};
use crate::game::strategy::Move;
use blackjack_cards::{is_blackjack, score, Card, Deck};
use serde::Serialize;
use tracing::debug;

/// The phases of a round. A round only ever moves forward through these states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RoundState {
    PlayerTurn,
    DealerTurn,
    RoundOver,
}

/// Owns everything that changes while a round is played: the shoe, the player's hands, the dealer's hand,
/// the round state and the running balance. Strategies never touch any of this directly, they only see copies.
#[derive(Debug)]
pub struct GameSession {
    shoe: Deck,
    hands: Vec<PlayerHand>,
    hand_idx: usize,
    dealer: Vec<Card>,
    state: RoundState,
    balance: i64,
}

impl GameSession {
    /// Associated function to create a new session drawing from `shoe`. No round is in progress until `deal` is called.
    pub fn new(shoe: Deck) -> GameSession {
        GameSession {
            shoe,
            hands: vec![],
            hand_idx: 0,
            dealer: Vec::with_capacity(5),
            state: RoundState::RoundOver,
            balance: 0,
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    /// Getter for the index of the hand currently being played.
    pub fn hand_idx(&self) -> usize {
        self.hand_idx
    }

    pub fn hands(&self) -> &[PlayerHand] {
        &self.hands
    }

    pub fn dealer_hand(&self) -> &[Card] {
        &self.dealer
    }

    /// Number of cards left in the shoe.
    pub fn cards_remaining(&self) -> usize {
        self.shoe.len()
    }

    /// Replaces the shoe with a fresh one, only allowed between rounds.
    pub fn replace_shoe(&mut self, shoe: Deck) -> Result<(), BlackjackGameError> {
        if self.state != RoundState::RoundOver {
            return Err(BlackjackGameError::InvalidState(self.state));
        }
        self.shoe = shoe;
        Ok(())
    }

    /// Abandons any round in progress, zeroes the balance and starts drawing from `shoe`.
    pub fn restart(&mut self, shoe: Deck) {
        self.clear_round();
        self.balance = 0;
        self.shoe = shoe;
    }

    /// Getter for the dealer's face up card.
    pub fn dealers_face_up_card(&self) -> Result<Card, BlackjackGameError> {
        self.dealer
            .first()
            .copied()
            .ok_or_else(|| BlackjackGameError::invalid_move("the dealer has not been dealt a hand"))
    }

    /// Returns true if the dealer's first two cards are a blackjack.
    pub fn dealer_has_blackjack(&self) -> bool {
        is_blackjack(&self.dealer)
    }

    /// Starts a new round with a single hand carrying `bet`.
    /// Cards are dealt alternately, player first, until both the player and the dealer hold two.
    pub fn deal(&mut self, bet: u32) -> Result<(), BlackjackGameError> {
        let mut hand = PlayerHand::new(bet);
        self.dealer.clear();
        for _ in 0..2 {
            hand.receive_card(self.shoe.draw()?);
            self.dealer.push(self.shoe.draw()?);
        }
        self.hands = vec![hand];
        self.hand_idx = 0;
        self.state = RoundState::PlayerTurn;
        debug!(bet, player = %self.hands[0], dealer_up = %self.dealer[0], "dealt hand");
        Ok(())
    }

    /// Returns the cards of whichever hand is acting in the current state.
    pub fn current_hand(&self) -> Result<&[Card], BlackjackGameError> {
        match self.state {
            RoundState::PlayerTurn => Ok(self.hands[self.hand_idx].cards()),
            RoundState::DealerTurn => Ok(&self.dealer),
            RoundState::RoundOver => Err(BlackjackGameError::InvalidState(self.state)),
        }
    }

    /// Applies `option` to the acting hand.
    pub fn apply(&mut self, option: Move) -> Result<(), BlackjackGameError> {
        debug!(%option, state = ?self.state, hand_idx = self.hand_idx, "applying move");
        match option {
            Move::Hit => self.hit(),
            Move::Stand => self.stand(),
            Move::Double => self.double_down(),
            Move::Split => self.split(),
        }
    }

    /// Draws one card into the acting hand. Returns `BlackjackGameError::Bust` if the hand's score is now over 21.
    pub fn hit(&mut self) -> Result<(), BlackjackGameError> {
        let new_score = match self.state {
            RoundState::PlayerTurn => {
                let card = self.shoe.draw()?;
                self.hands[self.hand_idx].receive_card(card)
            }
            RoundState::DealerTurn => {
                let card = self.shoe.draw()?;
                self.dealer.push(card);
                score(&self.dealer)
            }
            RoundState::RoundOver => return Err(BlackjackGameError::InvalidState(self.state)),
        };
        if new_score > 21 {
            return Err(BlackjackGameError::Bust);
        }
        Ok(())
    }

    /// Ends the acting hand. During the player's turn this moves on to the next hand, or to the dealer once every
    /// hand has been played. During the dealer's turn it ends the round.
    pub fn stand(&mut self) -> Result<(), BlackjackGameError> {
        match self.state {
            RoundState::PlayerTurn => {
                self.hand_idx += 1;
                if self.hand_idx >= self.hands.len() {
                    self.state = RoundState::DealerTurn;
                }
                Ok(())
            }
            RoundState::DealerTurn => {
                self.state = RoundState::RoundOver;
                Ok(())
            }
            RoundState::RoundOver => Err(BlackjackGameError::InvalidState(self.state)),
        }
    }

    /// Doubles the bet on the acting hand, takes exactly one card and stands regardless of the result.
    pub fn double_down(&mut self) -> Result<(), BlackjackGameError> {
        if self.state != RoundState::PlayerTurn {
            return Err(BlackjackGameError::InvalidState(self.state));
        }
        let hand = &mut self.hands[self.hand_idx];
        if !hand.can_double_down() {
            return Err(BlackjackGameError::invalid_move(
                "can only double on a hand with 2 cards",
            ));
        }
        if !hand.double_bet() {
            return Err(BlackjackGameError::invalid_move(format!(
                "a bet of {} is too large to double",
                hand.bet()
            )));
        }
        match self.hit() {
            Ok(()) | Err(BlackjackGameError::Bust) => {}
            Err(e) => return Err(e),
        }
        self.stand()
    }

    /// Splits the acting hand into two hands of one card each. The new hand gets the same bet and is played
    /// after every hand already on the table. No card is drawn into either half.
    pub fn split(&mut self) -> Result<(), BlackjackGameError> {
        if self.state != RoundState::PlayerTurn {
            return Err(BlackjackGameError::InvalidState(self.state));
        }
        let hand = &mut self.hands[self.hand_idx];
        if hand.num_cards() != 2 {
            return Err(BlackjackGameError::invalid_move(
                "you can only split with two cards in your hand",
            ));
        }
        match hand.split() {
            Some(new_hand) => {
                self.hands.push(new_hand);
                Ok(())
            }
            None => Err(BlackjackGameError::invalid_move(
                "both cards must have the same rank to split",
            )),
        }
    }

    /// Skips any remaining turns, used when the dealer is dealt a blackjack.
    pub fn end_turns(&mut self) {
        self.state = RoundState::RoundOver;
    }

    /// Settles every player hand against the dealer, adds the total to the balance and returns the result of each hand.
    pub fn settle(&mut self, payout: f64) -> Vec<(Outcome, i64)> {
        let dealer = HandResult::from_cards(&self.dealer);
        let results = self
            .hands
            .iter()
            .map(|hand| settle(HandResult::from_cards(hand.cards()), dealer, hand.bet(), payout))
            .collect::<Vec<(Outcome, i64)>>();
        let delta: i64 = results.iter().map(|(_, amount)| amount).sum();
        self.balance += delta;
        debug!(delta, balance = self.balance, "settled round");
        results
    }

    /// Clears the table for the next round, returning the final player hands and the dealer's cards.
    pub fn clear_round(&mut self) -> (Vec<PlayerHand>, Vec<Card>) {
        self.state = RoundState::RoundOver;
        self.hand_idx = 0;
        (
            std::mem::take(&mut self.hands),
            std::mem::take(&mut self.dealer),
        )
    }
}
