use anyhow::Result;
use blackjack_rounds::prelude::*;
use clap::Parser;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

/// Play a number of rounds with one strategy, printing every round as it is settled.
#[derive(Debug, Parser)]
struct Args {
    /// Number of rounds to play
    rounds: u32,

    #[arg(long, default_value_t = 3)]
    decks: usize,

    #[arg(long, default_value_t = DEFAULT_MIN_BET)]
    min_bet: u32,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = StrategyKind::Counter)]
    strategy: StrategyKind,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let mut builder = BlackjackSimulatorConfig::new();
    builder
        .num_decks(args.decks)
        .num_hands(args.rounds)
        .min_bet(args.min_bet);
    if let Some(seed) = args.seed {
        builder.seed(seed);
    }
    let config = builder.build();

    let mut strategy = args.strategy.build(config.num_decks, config.min_bet);
    let mut simulator = BlackjackSimulator::new(config);
    let mut stdout = io::stdout().lock();

    for round in 1..=args.rounds {
        let log = simulator.play_round(&mut strategy)?;
        writeln!(stdout, "round #{} bet: {}", round, log.bet)?;
        writeln!(stdout, "{}", log)?;
        writeln!(stdout, "balance: {}", simulator.balance())?;
        writeln!(stdout)?;
    }

    simulator.game().display_stats(&mut stdout)?;
    Ok(())
}
