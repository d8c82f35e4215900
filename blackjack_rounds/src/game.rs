//! Module that focuses on playing single rounds of blackjack. The round state machine lives in `table`,
//! the strategies that drive it in `strategy` and `console`, and `BlackjackGame` ties them together and keeps the stats.

pub mod console;
pub mod player;
pub mod settlement;
pub mod strategy;
pub mod table;
pub mod prelude {
    pub use super::{BlackjackGame, HandLog, RoundLog};
    pub use crate::error::BlackjackGameError;
    pub use crate::game::console::ConsoleStrategy;
    pub use crate::game::player::PlayerHand;
    pub use crate::game::settlement::{settle, HandResult, Outcome};
    pub use crate::game::strategy::prelude::*;
    pub use crate::game::table::{GameSession, RoundState};
}

use crate::error::BlackjackGameError;
use blackjack_cards::{formatted_score, Card, Deck};
use serde::Serialize;
use settlement::Outcome;
use std::fmt::Display;
use std::io::{self, Write};
use strategy::{DealerStrategy, Strategy};
use table::{GameSession, RoundState};
use tracing::{debug, warn};

/// The record of one settled player hand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandLog {
    pub cards: Vec<Card>,
    pub bet: u32,
    pub outcome: Outcome,
    pub amount: i64,
}

/// The record of one complete round, returned by `BlackjackGame::play_round`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundLog {
    pub bet: u32,
    pub hands: Vec<HandLog>,
    pub dealer: Vec<Card>,
    pub delta: i64,
    pub dealer_blackjack: bool,
}

fn join_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}

impl Display for RoundLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "dealer: [{}] ({})",
            join_cards(&self.dealer),
            formatted_score(&self.dealer)
        )?;
        for (i, hand) in self.hands.iter().enumerate() {
            writeln!(
                f,
                "hand {}: [{}] ({}) bet: {} {} {:+}",
                i + 1,
                join_cards(&hand.cards),
                formatted_score(&hand.cards),
                hand.bet,
                hand.outcome,
                hand.amount
            )?;
        }
        write!(f, "round result: {:+}", self.delta)
    }
}

/// Struct that plays rounds of blackjack against the house for any `Strategy`.
/// It owns the `GameSession` and records the stats needed for reporting a simulation.
#[derive(Debug)]
pub struct BlackjackGame {
    session: GameSession,
    dealer: DealerStrategy,
    min_bet: u32,
    blackjack_payout: f64,
    pub total_wins: i32,
    pub total_pushes: i32,
    pub total_losses: i32,
    pub total_winnings: i64,
    pub num_player_blackjacks: i32,
    pub num_dealer_blackjacks: i32,
    pub rounds_played: u32,
}

impl BlackjackGame {
    /// Associated method for building a new game.
    /// `shoe` is the deck that cards are drawn from, `min_bet` is the table minimum and
    /// `blackjack_payout` is the multiple of the bet paid for a natural blackjack.
    pub fn new(shoe: Deck, min_bet: u32, blackjack_payout: f64) -> BlackjackGame {
        BlackjackGame {
            session: GameSession::new(shoe),
            dealer: DealerStrategy,
            // bets must be positive
            min_bet: min_bet.max(1),
            blackjack_payout,
            total_wins: 0,
            total_pushes: 0,
            total_losses: 0,
            total_winnings: 0,
            num_player_blackjacks: 0,
            num_dealer_blackjacks: 0,
            rounds_played: 0,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn balance(&self) -> i64 {
        self.session.balance()
    }

    pub fn min_bet(&self) -> u32 {
        self.min_bet
    }

    pub fn cards_remaining(&self) -> usize {
        self.session.cards_remaining()
    }

    /// Swaps in a new shoe, only allowed between rounds.
    pub fn replace_shoe(&mut self, shoe: Deck) -> Result<(), BlackjackGameError> {
        self.session.replace_shoe(shoe)
    }

    /// Plays one full round with `strategy`. `shuffled` is passed through to the strategy's `bet`.
    ///
    /// Any error other than a bust aborts the round and is returned to the caller, the session is left as it was
    /// when the error happened.
    pub fn play_round<S: Strategy + ?Sized>(
        &mut self,
        strategy: &mut S,
        shuffled: bool,
    ) -> Result<RoundLog, BlackjackGameError> {
        let bet = strategy.bet(shuffled);
        if bet < self.min_bet {
            warn!(bet, min_bet = self.min_bet, "bet below table minimum");
            return Err(BlackjackGameError::BetBelowMinimum {
                bet,
                min_bet: self.min_bet,
            });
        }

        self.session.deal(bet)?;
        let dealer_blackjack = self.session.dealer_has_blackjack();

        if dealer_blackjack {
            debug!("dealer has blackjack, skipping turns");
            self.session.end_turns();
        } else {
            let up_card = self.session.dealers_face_up_card()?;
            while self.session.state() == RoundState::PlayerTurn {
                let hand = self.session.current_hand()?.to_vec();
                let option = strategy.play(&hand, up_card);
                self.apply(option)?;
            }
            while self.session.state() == RoundState::DealerTurn {
                let hand = self.session.current_hand()?.to_vec();
                let option = self.dealer.play(&hand, up_card);
                self.apply(option)?;
            }
        }

        let results = self.session.settle(self.blackjack_payout);
        let (hands, dealer) = self.session.clear_round();

        let mut log = RoundLog {
            bet,
            hands: Vec::with_capacity(hands.len()),
            dealer,
            delta: 0,
            dealer_blackjack,
        };
        for (hand, (outcome, amount)) in hands.into_iter().zip(results) {
            match outcome {
                Outcome::Win => self.total_wins += 1,
                Outcome::Blackjack => {
                    self.total_wins += 1;
                    self.num_player_blackjacks += 1;
                }
                Outcome::Push => self.total_pushes += 1,
                Outcome::Loss => self.total_losses += 1,
            }
            log.delta += amount;
            log.hands.push(HandLog {
                bet: hand.bet(),
                cards: hand.into_cards(),
                outcome,
                amount,
            });
        }
        if dealer_blackjack {
            self.num_dealer_blackjacks += 1;
        }
        self.total_winnings += log.delta;
        self.rounds_played += 1;

        let final_hands = log
            .hands
            .iter()
            .map(|h| h.cards.clone())
            .collect::<Vec<Vec<Card>>>();
        strategy.results(&final_hands, &log.dealer);

        debug!(delta = log.delta, balance = self.balance(), "round over");
        Ok(log)
    }

    /// Applies a move to the session. A bust ends the acting hand's turn, every other error is passed on.
    fn apply(&mut self, option: strategy::Move) -> Result<(), BlackjackGameError> {
        match self.session.apply(option) {
            Ok(()) => Ok(()),
            Err(e) if e.is_bust() => self.session.stand(),
            Err(e) => {
                warn!(%option, error = %e, "move rejected");
                Err(e)
            }
        }
    }

    /// Writes the stats currently recorded to `writer`.
    pub fn display_stats<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        const WIDTH: usize = 80;
        const TEXT_WIDTH: usize = "number of dealer blackjacks:".len() + 20;
        const NUMERIC_WIDTH: usize = WIDTH - TEXT_WIDTH;

        writeln!(writer, "{}", "-".repeat(WIDTH))?;
        writeln!(writer, "{:-^WIDTH$}", "stats")?;
        let rows: [(&str, String); 8] = [
            ("rounds played:", self.rounds_played.to_string()),
            ("total wins:", self.total_wins.to_string()),
            ("total pushes:", self.total_pushes.to_string()),
            ("total losses:", self.total_losses.to_string()),
            ("total winnings:", self.total_winnings.to_string()),
            ("final balance:", self.balance().to_string()),
            ("number of player blackjacks:", self.num_player_blackjacks.to_string()),
            ("number of dealer blackjacks:", self.num_dealer_blackjacks.to_string()),
        ];
        for (text, value) in rows.iter() {
            writeln!(writer, "{:<TEXT_WIDTH$}{:>NUMERIC_WIDTH$}", text, value)?;
        }
        writeln!(writer, "{}", "-".repeat(WIDTH))?;
        Ok(())
    }

    /// Resets the balance and every recorded stat, discards any round left unfinished by an error
    /// and starts drawing from `shoe`.
    pub fn reset(&mut self, shoe: Deck) {
        self.session.restart(shoe);
        self.total_wins = 0;
        self.total_pushes = 0;
        self.total_losses = 0;
        self.total_winnings = 0;
        self.num_player_blackjacks = 0;
        self.num_dealer_blackjacks = 0;
        self.rounds_played = 0;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use blackjack_cards::{Rank, Suit};
    use strategy::Move;

    fn card(rank: Rank) -> Card {
        Card::new(rank, Suit::Spade)
    }

    fn stacked(ranks: &[Rank]) -> Deck {
        Deck::from_cards(ranks.iter().map(|&r| card(r)))
    }

    /// Plays a fixed list of moves and records what it was shown.
    struct Scripted {
        bet: u32,
        moves: Vec<Move>,
        plays: usize,
        seen_results: Vec<(Vec<Vec<Card>>, Vec<Card>)>,
    }

    impl Scripted {
        fn new(bet: u32, moves: Vec<Move>) -> Self {
            Scripted {
                bet,
                moves,
                plays: 0,
                seen_results: vec![],
            }
        }
    }

    impl Strategy for Scripted {
        fn bet(&mut self, _shuffled: bool) -> u32 {
            self.bet
        }

        fn play(&mut self, _hand: &[Card], _dealers_up_card: Card) -> Move {
            let option = self.moves.get(self.plays).copied().unwrap_or(Move::Stand);
            self.plays += 1;
            option
        }

        fn results(&mut self, hands: &[Vec<Card>], dealer: &[Card]) {
            self.seen_results.push((hands.to_vec(), dealer.to_vec()));
        }
    }

    #[test]
    fn test_stand_against_dealer_drawing_to_bust() {
        // player 10+9, dealer 6+10 then draws a king
        let mut game = BlackjackGame::new(
            stacked(&[Rank::Ten, Rank::Six, Rank::Nine, Rank::Ten, Rank::King]),
            100,
            1.5,
        );
        let mut strategy = Scripted::new(100, vec![Move::Stand]);
        let log = game.play_round(&mut strategy, true).unwrap();
        assert_eq!(log.delta, 100);
        assert_eq!(log.dealer.len(), 3);
        assert_eq!(log.hands[0].outcome, Outcome::Win);
        assert_eq!(game.balance(), 100);
        assert_eq!(game.total_wins, 1);
        assert_eq!(strategy.seen_results.len(), 1);
        assert_eq!(strategy.seen_results[0].1, log.dealer);
    }

    #[test]
    fn test_player_bust_ends_turn() {
        // player 10+6 hits a queen, dealer 10+7 stands
        let mut game = BlackjackGame::new(
            stacked(&[Rank::Ten, Rank::Ten, Rank::Six, Rank::Seven, Rank::Queen]),
            100,
            1.5,
        );
        let mut strategy = Scripted::new(100, vec![Move::Hit, Move::Hit]);
        let log = game.play_round(&mut strategy, false).unwrap();
        assert_eq!(strategy.plays, 1);
        assert_eq!(log.hands[0].outcome, Outcome::Loss);
        assert_eq!(log.delta, -100);
        assert_eq!(game.total_losses, 1);
    }

    #[test]
    fn test_bet_below_minimum_is_rejected() {
        let mut game = BlackjackGame::new(stacked(&[Rank::Two; 4]), 100, 1.5);
        let mut strategy = Scripted::new(50, vec![]);
        assert_eq!(
            game.play_round(&mut strategy, false),
            Err(BlackjackGameError::BetBelowMinimum {
                bet: 50,
                min_bet: 100
            })
        );
        assert_eq!(game.cards_remaining(), 4);
    }

    #[test]
    fn test_invalid_move_aborts_round() {
        let mut game = BlackjackGame::new(
            stacked(&[Rank::Nine, Rank::Ten, Rank::Eight, Rank::Seven]),
            100,
            1.5,
        );
        let mut strategy = Scripted::new(100, vec![Move::Split]);
        assert!(matches!(
            game.play_round(&mut strategy, false),
            Err(BlackjackGameError::InvalidMove(_))
        ));
        assert_eq!(game.rounds_played, 0);
    }

    #[test]
    fn test_doubling_a_huge_bet_is_rejected() {
        let mut game = BlackjackGame::new(
            stacked(&[Rank::Six, Rank::Ten, Rank::Five, Rank::Eight, Rank::Ten]),
            100,
            1.5,
        );
        let mut strategy = Scripted::new(u32::MAX, vec![Move::Double]);
        assert!(matches!(
            game.play_round(&mut strategy, false),
            Err(BlackjackGameError::InvalidMove(_))
        ));
        assert_eq!(game.session().hands()[0].bet(), u32::MAX);
        assert_eq!(game.balance(), 0);
    }

    #[test]
    fn test_zero_minimum_still_rejects_zero_bet() {
        let mut game = BlackjackGame::new(stacked(&[Rank::Two; 4]), 0, 1.5);
        assert_eq!(game.min_bet(), 1);
        let mut strategy = Scripted::new(0, vec![]);
        assert_eq!(
            game.play_round(&mut strategy, false),
            Err(BlackjackGameError::BetBelowMinimum { bet: 0, min_bet: 1 })
        );
    }

    #[test]
    fn test_doubled_hand_pays_double() {
        // player 6+5 doubles into a ten, dealer 10+8
        let mut game = BlackjackGame::new(
            stacked(&[Rank::Six, Rank::Ten, Rank::Five, Rank::Eight, Rank::Ten]),
            100,
            1.5,
        );
        let mut strategy = Scripted::new(100, vec![Move::Double]);
        let log = game.play_round(&mut strategy, false).unwrap();
        assert_eq!(log.hands[0].bet, 200);
        assert_eq!(log.delta, 200);
        assert_eq!(log.bet, 100);
    }

    #[test]
    fn test_display_stats_and_reset() {
        let mut game = BlackjackGame::new(
            stacked(&[Rank::Ace, Rank::Nine, Rank::King, Rank::Eight]),
            100,
            1.5,
        );
        let mut strategy = Scripted::new(100, vec![]);
        let log = game.play_round(&mut strategy, false).unwrap();
        assert_eq!(log.delta, 150);
        assert_eq!(game.num_player_blackjacks, 1);

        let mut out = Vec::new();
        game.display_stats(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("number of player blackjacks:"));
        assert!(out.contains("150"));

        game.reset(stacked(&[Rank::Two; 4]));
        assert_eq!(game.cards_remaining(), 4);
        assert_eq!(game.balance(), 0);
        assert_eq!(game.rounds_played, 0);
        assert_eq!(game.num_player_blackjacks, 0);
    }
}
