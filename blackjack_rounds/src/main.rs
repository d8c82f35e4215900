use anyhow::{Context, Result};
use blackjack_rounds::prelude::*;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Simulate rounds of blackjack for card counting strategies.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON file with a simulator config, flags given on the command line override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of decks in the shoe
    #[arg(long)]
    decks: Option<usize>,

    /// Number of rounds played per simulation
    #[arg(long)]
    hands: Option<u32>,

    /// Multiple of the bet paid for a natural blackjack
    #[arg(long)]
    payout: Option<f64>,

    /// Table minimum bet
    #[arg(long)]
    min_bet: Option<u32>,

    /// Fraction of the shoe left when it gets reshuffled
    #[arg(long)]
    reshuffle_fraction: Option<f64>,

    /// Seed for shuffling, runs with the same seed are reproducible
    #[arg(long)]
    seed: Option<u64>,

    /// Number of simulations run per strategy when comparing
    #[arg(long)]
    simulations: Option<u32>,

    /// The strategy to simulate
    #[arg(long, value_enum, default_value_t = StrategyKind::Counter)]
    strategy: StrategyKind,

    /// Simulate every built-in strategy side by side
    #[arg(long)]
    compare: bool,

    /// Write summaries as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn load_config(&self) -> Result<BlackjackSimulatorConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str::<BlackjackSimulatorConfig>(&contents)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => BlackjackSimulatorConfig::default(),
        };
        if let Some(decks) = self.decks {
            config.num_decks = decks;
        }
        if let Some(hands) = self.hands {
            config.num_hands = hands;
        }
        if let Some(payout) = self.payout {
            config.blackjack_payout = payout;
        }
        if let Some(min_bet) = self.min_bet {
            config.min_bet = min_bet;
        }
        if let Some(fraction) = self.reshuffle_fraction {
            config.reshuffle_fraction = fraction;
        }
        if let Some(n) = self.simulations {
            config.num_simulations = n;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        anyhow::ensure!(config.num_decks > 0, "the shoe needs at least one deck");
        anyhow::ensure!(config.min_bet > 0, "the minimum bet must be positive");
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = args.load_config()?;

    if args.compare {
        let mut builder = MulStrategyBlackjackSimulator::new(config);
        for kind in StrategyKind::ALL {
            builder.simulation(kind.build(config.num_decks, config.min_bet));
        }
        let mut simulator = builder.build();
        simulator.run(Box::new(std::io::stdout()), args.json)?;
        return Ok(());
    }

    let mut strategy = args.strategy.build(config.num_decks, config.min_bet);
    let mut simulator = BlackjackSimulator::new(config);
    simulator
        .run(&mut strategy)
        .with_context(|| format!("simulating {}", strategy.label()))?;

    let summary = simulator.summary(strategy.label());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary);
    }
    Ok(())
}
