use anyhow::Result;
use blackjack_rounds::prelude::*;
use clap::Parser;
use std::io;
use tracing_subscriber::EnvFilter;

/// Play blackjack against the house from the terminal.
#[derive(Debug, Parser)]
struct Args {
    /// Number of rounds to play
    #[arg(long, default_value_t = 10)]
    rounds: u32,

    #[arg(long, default_value_t = 3)]
    decks: usize,

    #[arg(long, default_value_t = 1.5)]
    payout: f64,

    #[arg(long, default_value_t = DEFAULT_MIN_BET)]
    min_bet: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = BlackjackSimulatorConfig::new()
        .num_decks(args.decks)
        .num_hands(args.rounds)
        .blackjack_payout(args.payout)
        .min_bet(args.min_bet)
        .build();

    println!("Table minimum is {}", config.min_bet);
    let mut console = ConsoleStrategy::new(io::stdin().lock(), io::stdout());
    let mut simulator = BlackjackSimulator::new(config);
    for _ in 0..config.num_hands {
        match simulator.play_round(&mut console) {
            Ok(log) => println!("{}\nbalance: {}\n", log, simulator.balance()),
            // a bad bet or an illegal move ends the session
            Err(e) => {
                eprintln!("error: {e}");
                break;
            }
        }
    }
    println!("Final balance: {}", simulator.balance());
    Ok(())
}
