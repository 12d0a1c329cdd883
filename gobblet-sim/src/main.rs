//! Gobblet Gobblers Self-Play
//!
//! Plays games through the engine's player API and reports how they end.

mod cli;
mod driver;
mod stats;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::stats::SimStats;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Set up SIGINT handler for graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    let base_seed = cli.seed.unwrap_or_else(rand::random);
    info!(
        games = cli.games,
        base_seed,
        first_mover = ?cli.first_mover,
        max_turns = cli.max_turns,
        "starting self-play"
    );

    let mut stats = SimStats::new();
    for index in 0..cli.games {
        if !running.load(Ordering::SeqCst) {
            warn!(played = index, "interrupted, stopping early");
            break;
        }

        let seed = base_seed.wrapping_add(index);
        let first_mover = cli.first_mover.for_game(index);
        let result = driver::play_game(seed, first_mover, cli.max_turns)?;

        if cli.verbose {
            info!(
                game = index,
                seed,
                outcome = ?result.outcome,
                turns = result.turns,
                "final board\n{}",
                result.board
            );
        }
        stats.record(&result);

        if stats.should_log(cli.log_interval) {
            stats.log_progress();
        }
    }

    println!();
    println!("==========================");
    println!("Self-play complete (base seed {})", base_seed);
    println!("==========================");
    stats.print_summary();
    Ok(())
}
