//! Blackjack round engine and simulation driver. A `Strategy` bets and plays, `BlackjackGame` runs the round
//! state machine against the house, and `BlackjackSimulator` plays many rounds reshuffling the shoe as it runs low.

pub mod error;
pub mod game;
pub mod write;

use blackjack_cards::{Deck, CARDS_PER_DECK};
pub use error::BlackjackGameError;
pub use game::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt::Display;
use std::io::Write;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use thiserror::Error;
use tracing::{info, warn};

pub mod prelude {
    pub use super::{
        game::prelude::*, BlackjackSimulation, BlackjackSimulator, BlackjackSimulatorConfig,
        BlackjackSimulatorConfigBuilder, MulStrategyBlackjackSimulator,
        MulStrategyBlackjackSimulatorBuilder, SimulationError, SimulationSummary, StrategyKind,
    };
}

/// The fewest cards the shoe may hold at the start of a round, whatever the configured fraction.
pub const MIN_CARDS_PER_ROUND: usize = 20;

/// Simple struct for recording all of the interesting data points accumulated during a simulation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    pub label: String,
    pub rounds: u32,
    pub wins: i32,
    pub pushes: i32,
    pub losses: i32,
    pub winnings: i64,
    pub player_blackjacks: i32,
    pub dealer_blackjacks: i32,
    pub shuffles: u32,
}

impl Display for SimulationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const WIDTH: usize = 80;
        const TEXT_WIDTH: usize = "number of player blackjacks".len() + 20;
        const NUM_WIDTH: usize = WIDTH - TEXT_WIDTH;
        let total_hands = self.wins + self.losses + self.pushes;
        // avoids NaN for a run that never finished a hand
        let denom = total_hands.max(1) as f64;
        writeln!(f, "strategy: {}", self.label)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "rounds played", self.rounds)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "hands won", self.wins)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "hands pushed", self.pushes)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "hands lost", self.losses)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "winnings", self.winnings)?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}",
            "number of player blackjacks", self.player_blackjacks
        )?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}",
            "number of dealer blackjacks", self.dealer_blackjacks
        )?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "shuffles", self.shuffles)?;
        writeln!(f, "{:<TEXT_WIDTH$}{:>NUM_WIDTH$}", "total hands played", total_hands)?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}",
            "win percentage",
            (self.wins as f64) / denom
        )?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}",
            "push percentage",
            (self.pushes as f64) / denom
        )?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}",
            "loss percentage",
            (self.losses as f64) / denom
        )?;
        writeln!(
            f,
            "{:<TEXT_WIDTH$}{:>NUM_WIDTH$.2}",
            "average winnings per hand",
            (self.winnings as f64) / denom
        )
    }
}

impl SimulationSummary {
    /// Folds the results of another run of the same strategy into `self`.
    pub fn merge(&mut self, other: &SimulationSummary) {
        self.rounds += other.rounds;
        self.wins += other.wins;
        self.pushes += other.pushes;
        self.losses += other.losses;
        self.winnings += other.winnings;
        self.player_blackjacks += other.player_blackjacks;
        self.dealer_blackjacks += other.dealer_blackjacks;
        self.shuffles += other.shuffles;
    }
}

/// Errors from running several simulations side by side.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("simulation #{id} failed: {source}")]
    GameError {
        id: usize,
        #[source]
        source: BlackjackGameError,
    },
    #[error("failed sending summary: {0}")]
    SendingError(String),
    #[error("failed writing summaries: {0}")]
    WriteError(#[from] std::io::Error),
    #[error("simulation thread panicked")]
    ThreadPanicked,
}

/// Trait for anything that can be run as one of several simulations in a `MulStrategyBlackjackSimulator`.
pub trait BlackjackSimulation: Send {
    /// Required method, runs a single simulation and returns the final balance.
    fn run_single_simulation(&mut self) -> Result<i64, BlackjackGameError>;
    /// Required method, the stats recorded since the last reset.
    fn summary(&self) -> SimulationSummary;
    /// Required method, the method that will reset the simulation
    fn reset(&mut self);
}

/// Struct for configuring a `BlackjackSimulator`. Every field has a default so a partial JSON object deserializes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlackjackSimulatorConfig {
    pub num_decks: usize,
    pub num_hands: u32,
    pub blackjack_payout: f64,
    pub min_bet: u32,
    pub reshuffle_fraction: f64,
    pub seed: Option<u64>,
    pub num_simulations: u32,
}

impl BlackjackSimulatorConfig {
    /// Associated method for returning a new `BlackjackSimulatorConfigBuilder` object.
    pub fn new() -> BlackjackSimulatorConfigBuilder {
        BlackjackSimulatorConfigBuilder::default()
    }

    /// The number of cards below which the shoe is replaced before a round.
    pub fn reshuffle_threshold(&self) -> usize {
        let total = self.num_decks * CARDS_PER_DECK;
        let threshold = ((total as f64) * self.reshuffle_fraction) as usize;
        threshold.max(MIN_CARDS_PER_ROUND)
    }
}

impl Default for BlackjackSimulatorConfig {
    /// Returns the standard configurations for a game of blackjack.
    fn default() -> Self {
        BlackjackSimulatorConfig::new().build()
    }
}

/// Struct to implement builder pattern for `BlackjackSimulatorConfig`
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackjackSimulatorConfigBuilder {
    num_decks: Option<usize>,
    num_hands: Option<u32>,
    blackjack_payout: Option<f64>,
    min_bet: Option<u32>,
    reshuffle_fraction: Option<f64>,
    seed: Option<u64>,
    num_simulations: Option<u32>,
}

impl BlackjackSimulatorConfigBuilder {
    /// Method for choosing the number of decks in the shoe.
    pub fn num_decks(&mut self, decks: usize) -> &mut Self {
        self.num_decks = Some(decks);
        self
    }

    /// Method for setting the number of rounds played by each call to `run`.
    pub fn num_hands(&mut self, hands: u32) -> &mut Self {
        self.num_hands = Some(hands);
        self
    }

    /// Method for setting the multiple of the bet paid for a natural blackjack.
    pub fn blackjack_payout(&mut self, payout: f64) -> &mut Self {
        self.blackjack_payout = Some(payout);
        self
    }

    /// Method for setting the minimum bet for the game
    pub fn min_bet(&mut self, bet: u32) -> &mut Self {
        self.min_bet = Some(bet);
        self
    }

    /// Method for setting the fraction of the full shoe below which it is replaced.
    pub fn reshuffle_fraction(&mut self, fraction: f64) -> &mut Self {
        self.reshuffle_fraction = Some(fraction);
        self
    }

    /// Method for fixing the seed used for shuffling, runs with the same seed deal the same cards.
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    /// Method for setting how many times each strategy is simulated by a `MulStrategyBlackjackSimulator`.
    pub fn num_simulations(&mut self, n: u32) -> &mut Self {
        self.num_simulations = Some(n);
        self
    }

    /// Method for building a `BlackjackSimulatorConfig` object from the given builder.
    pub fn build(&mut self) -> BlackjackSimulatorConfig {
        BlackjackSimulatorConfig {
            num_decks: self.num_decks.unwrap_or(3),
            num_hands: self.num_hands.unwrap_or(100),
            blackjack_payout: self.blackjack_payout.unwrap_or(1.5),
            min_bet: self.min_bet.unwrap_or(DEFAULT_MIN_BET).max(1),
            reshuffle_fraction: self.reshuffle_fraction.unwrap_or(1.0 / 3.0),
            seed: self.seed,
            num_simulations: self.num_simulations.unwrap_or(1),
        }
    }
}

/// The built-in player strategies selectable from the command line or a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyKind {
    /// Hi-Lo count, simple decisions, tiered bets
    Counter,
    /// Hi-Lo count, basic strategy, tiered bets
    Basic,
    /// Hi-Lo count, basic strategy, margin bets
    HiloMargin,
    /// Wong Halves count, basic strategy, margin bets
    WongHalves,
    /// KO count, basic strategy, margin bets
    Ko,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 5] = [
        StrategyKind::Counter,
        StrategyKind::Basic,
        StrategyKind::HiloMargin,
        StrategyKind::WongHalves,
        StrategyKind::Ko,
    ];

    /// Builds the strategy for a shoe of `num_decks` decks, never betting below `min_bet`.
    pub fn build(self, num_decks: usize, min_bet: u32) -> Box<dyn Strategy + Send> {
        const MARGIN: f32 = 3.0;
        let decks = num_decks as u32;
        let tiered = TieredBettingStrategy::new(min_bet, vec![(14.0, 100_000), (8.0, 5_000)]);
        match self {
            StrategyKind::Counter => Box::new(PlayerStrategy::new(
                HiLo::new(decks),
                SimpleDecisionStrategy,
                tiered,
            )),
            StrategyKind::Basic => Box::new(PlayerStrategy::new(
                HiLo::new(decks),
                BasicStrategy::new(),
                tiered,
            )),
            StrategyKind::HiloMargin => Box::new(PlayerStrategy::new(
                HiLo::new(decks),
                BasicStrategy::new(),
                MarginBettingStrategy::new(MARGIN, min_bet),
            )),
            StrategyKind::WongHalves => Box::new(PlayerStrategy::new(
                WongHalves::new(decks),
                BasicStrategy::new(),
                MarginBettingStrategy::new(MARGIN, min_bet),
            )),
            StrategyKind::Ko => Box::new(PlayerStrategy::new(
                KO::new(decks),
                BasicStrategy::new(),
                MarginBettingStrategy::new(MARGIN, min_bet),
            )),
        }
    }
}

/// Struct for running simulations of a strategy against the house.
/// It owns the game and the random number generator used for shuffling and reshuffles the shoe before a round
/// whenever it runs low. The strategy is passed in to `run` so the caller keeps ownership of it.
#[derive(Debug)]
pub struct BlackjackSimulator {
    config: BlackjackSimulatorConfig,
    game: BlackjackGame,
    rng: StdRng,
    reshuffle_threshold: usize,
    shuffles: u32,
}

impl BlackjackSimulator {
    /// Associated method for building a simulator with an empty shoe, so the first round always shuffles.
    pub fn new(config: BlackjackSimulatorConfig) -> Self {
        Self::with_shoe(config, Deck::new(0))
    }

    /// Associated method for building a simulator that starts from `shoe`. It is only replaced once it runs low.
    pub fn with_shoe(config: BlackjackSimulatorConfig, shoe: Deck) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        BlackjackSimulator {
            game: BlackjackGame::new(shoe, config.min_bet, config.blackjack_payout),
            reshuffle_threshold: config.reshuffle_threshold(),
            config,
            rng,
            shuffles: 0,
        }
    }

    pub fn config(&self) -> &BlackjackSimulatorConfig {
        &self.config
    }

    pub fn game(&self) -> &BlackjackGame {
        &self.game
    }

    pub fn balance(&self) -> i64 {
        self.game.balance()
    }

    /// Replaces the shoe with a freshly shuffled one if it holds fewer cards than the threshold.
    /// Returns true if the shoe was replaced.
    pub fn reshuffle_if_needed(&mut self) -> Result<bool, BlackjackGameError> {
        if self.game.cards_remaining() >= self.reshuffle_threshold {
            return Ok(false);
        }
        let shoe = Deck::shuffled(self.config.num_decks, &mut self.rng);
        info!(
            remaining = self.game.cards_remaining(),
            threshold = self.reshuffle_threshold,
            cards = shoe.len(),
            "reshuffling shoe"
        );
        self.game.replace_shoe(shoe)?;
        self.shuffles += 1;
        Ok(true)
    }

    /// Plays a single round, reshuffling first if needed.
    pub fn play_round<S: Strategy + ?Sized>(
        &mut self,
        strategy: &mut S,
    ) -> Result<RoundLog, BlackjackGameError> {
        let shuffled = self.reshuffle_if_needed()?;
        self.game.play_round(strategy, shuffled)
    }

    /// Plays the configured number of rounds with `strategy` and returns the final balance.
    /// The first error aborts the run.
    pub fn run<S: Strategy + ?Sized>(&mut self, strategy: &mut S) -> Result<i64, BlackjackGameError> {
        for round in 0..self.config.num_hands {
            if let Err(e) = self.play_round(strategy) {
                warn!(round, error = %e, "simulation aborted");
                return Err(e);
            }
        }
        info!(
            rounds = self.config.num_hands,
            balance = self.balance(),
            strategy = %strategy.label(),
            "simulation finished"
        );
        Ok(self.balance())
    }

    /// Method to get a `SimulationSummary` derived from the data recorded since the last reset.
    pub fn summary(&self, label: String) -> SimulationSummary {
        SimulationSummary {
            label,
            rounds: self.game.rounds_played,
            wins: self.game.total_wins,
            pushes: self.game.total_pushes,
            losses: self.game.total_losses,
            winnings: self.game.total_winnings,
            player_blackjacks: self.game.num_player_blackjacks,
            dealer_blackjacks: self.game.num_dealer_blackjacks,
            shuffles: self.shuffles,
        }
    }

    /// Resets the balance and stats and discards the shoe, so the next round starts from a fresh shuffle.
    pub fn reset(&mut self) {
        self.game.reset(Deck::new(0));
        self.shuffles = 0;
    }
}

/// A simulator bundled with the strategy it runs, so it can be handed to its own thread.
struct StrategySimulation<S: Strategy + Send> {
    simulator: BlackjackSimulator,
    strategy: S,
}

impl<S: Strategy + Send> BlackjackSimulation for StrategySimulation<S> {
    fn run_single_simulation(&mut self) -> Result<i64, BlackjackGameError> {
        self.simulator.run(&mut self.strategy)
    }

    fn summary(&self) -> SimulationSummary {
        self.simulator.summary(self.strategy.label())
    }

    fn reset(&mut self) {
        self.simulator.reset();
    }
}

/// This struct is for testing multiple strategies at once under the same configuration.
/// Each strategy is simulated in its own thread and the summaries are collected by a writer thread.
pub struct MulStrategyBlackjackSimulator {
    simulations: Vec<Box<dyn BlackjackSimulation>>,
    pub config: BlackjackSimulatorConfig,
}

impl MulStrategyBlackjackSimulator {
    /// Method that returns a new `MulStrategyBlackjackSimulatorBuilder` object.
    pub fn new(config: BlackjackSimulatorConfig) -> MulStrategyBlackjackSimulatorBuilder {
        MulStrategyBlackjackSimulatorBuilder {
            simulations: None,
            config,
        }
    }

    pub fn len(&self) -> usize {
        self.simulations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.simulations.is_empty()
    }

    /// Runs every simulation `config.num_simulations` times, each strategy in a new thread.
    /// Summaries are sent to a writing thread that merges them per strategy and writes them to `writer`,
    /// as JSON if `json` is set.
    pub fn run(
        &mut self,
        writer: Box<dyn Write + Send + 'static>,
        json: bool,
    ) -> Result<(), SimulationError> {
        let (write_sender, write_receiver) = mpsc::channel::<(Option<SimulationSummary>, usize)>();

        // Unique ids let the writing thread know when each simulation is done
        let ids = (1..=self.simulations.len()).collect::<HashSet<usize>>();
        let write_handle =
            thread::spawn(move || write::write_summaries(write_receiver, ids, writer, json));

        let mut handles: Vec<JoinHandle<Result<(), SimulationError>>> = vec![];
        let num_simulations = self.config.num_simulations;
        for (i, mut simulation) in self.simulations.drain(..).enumerate() {
            let id = i + 1;
            let sender = write_sender.clone();
            let handle = thread::spawn(move || {
                let mut result = Ok(());
                for _ in 0..num_simulations {
                    if let Err(source) = simulation.run_single_simulation() {
                        result = Err(SimulationError::GameError { id, source });
                        break;
                    }
                    sender
                        .send((Some(simulation.summary()), id))
                        .map_err(|e| SimulationError::SendingError(e.to_string()))?;
                    simulation.reset();
                }
                // Tell the writing thread we are finished with this simulation, even after a failure
                sender
                    .send((None, id))
                    .map_err(|e| SimulationError::SendingError(e.to_string()))?;
                result
            });
            handles.push(handle);
        }
        drop(write_sender);

        let mut first_error = None;
        for handle in handles {
            let outcome = handle.join().unwrap_or(Err(SimulationError::ThreadPanicked));
            if let Err(e) = outcome {
                warn!(error = %e, "simulation failed");
                first_error.get_or_insert(e);
            }
        }

        match write_handle.join() {
            Ok(result) => result?,
            Err(_) => return Err(SimulationError::ThreadPanicked),
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Struct for building a `MulStrategyBlackjackSimulator` object
pub struct MulStrategyBlackjackSimulatorBuilder {
    simulations: Option<Vec<Box<dyn BlackjackSimulation>>>,
    config: BlackjackSimulatorConfig,
}

impl MulStrategyBlackjackSimulatorBuilder {
    /// Method for adding a new simulation, the only required input is a struct that implements `Strategy`.
    /// The rest of the simulation is configured from the `BlackjackSimulatorConfig` passed during object creation.
    pub fn simulation<S: Strategy + Send + 'static>(&mut self, strategy: S) -> &mut Self {
        let simulation = Box::new(StrategySimulation {
            simulator: BlackjackSimulator::new(self.config),
            strategy,
        });
        self.simulations.get_or_insert_with(Vec::new).push(simulation);
        self
    }

    /// Method that builds a `MulStrategyBlackjackSimulator` object
    pub fn build(&mut self) -> MulStrategyBlackjackSimulator {
        MulStrategyBlackjackSimulator {
            simulations: self.simulations.take().unwrap_or_default(),
            config: self.config,
        }
    }
}
