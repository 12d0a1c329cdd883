//! Command-line interface for gobblet-sim.

use clap::{Parser, ValueEnum};
use gobblet_engine::Owner;

/// Gobblet Gobblers self-play - random player against the engine's opponent
#[derive(Parser, Debug)]
#[command(name = "gobblet-sim")]
#[command(about = "Play many random Gobblet Gobblers games and report outcomes", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Number of games to play
    #[arg(short, long, default_value = "1000")]
    pub games: u64,

    /// Base seed; game i uses seed + i. Random when omitted.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Who moves first in each game
    #[arg(long, value_enum, default_value = "alternate")]
    pub first_mover: FirstMover,

    /// Stop a game after this many actions and count it as unfinished
    #[arg(long, default_value = "200")]
    pub max_turns: usize,

    /// Seconds between progress lines
    #[arg(long, default_value = "5")]
    pub log_interval: u64,

    /// Log the final board of every game
    #[arg(short, long)]
    pub verbose: bool,
}

/// First mover selection
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FirstMover {
    Player,
    Opponent,
    /// Player on even games, opponent on odd ones
    Alternate,
}

impl FirstMover {
    pub fn for_game(self, index: u64) -> Owner {
        match self {
            FirstMover::Player => Owner::Player,
            FirstMover::Opponent => Owner::Opponent,
            FirstMover::Alternate if index % 2 == 0 => Owner::Player,
            FirstMover::Alternate => Owner::Opponent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["gobblet-sim"]);
        assert_eq!(cli.games, 1000);
        assert_eq!(cli.seed, None);
        assert_eq!(cli.first_mover, FirstMover::Alternate);
        assert_eq!(cli.max_turns, 200);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::parse_from([
            "gobblet-sim",
            "--games",
            "10",
            "--seed",
            "3",
            "--first-mover",
            "opponent",
            "--max-turns",
            "50",
            "-v",
        ]);
        assert_eq!(cli.games, 10);
        assert_eq!(cli.seed, Some(3));
        assert_eq!(cli.first_mover, FirstMover::Opponent);
        assert_eq!(cli.max_turns, 50);
        assert!(cli.verbose);
    }

    #[test]
    fn test_alternate_first_mover() {
        assert_eq!(FirstMover::Alternate.for_game(0), Owner::Player);
        assert_eq!(FirstMover::Alternate.for_game(1), Owner::Opponent);
        assert_eq!(FirstMover::Opponent.for_game(0), Owner::Opponent);
    }
}
