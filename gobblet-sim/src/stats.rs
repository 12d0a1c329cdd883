//! Self-play statistics tracking.

use std::time::Instant;

use gobblet_engine::{Outcome, Owner};
use tracing::info;

use crate::driver::GameResult;

/// Percentage of `part` in `total`, 0 when nothing was counted.
fn pct(part: u64, total: u64) -> f64 {
    if total > 0 {
        100.0 * part as f64 / total as f64
    } else {
        0.0
    }
}

/// Statistics collected over a run.
#[derive(Debug, Default)]
pub struct SimStats {
    /// Games played to the end or to the turn cap
    pub games: u64,

    /// Breakdown of finished games
    pub player_wins: u64,
    pub opponent_wins: u64,
    /// Both lines completed by the same action
    pub draws: u64,

    /// Games cut at the turn cap
    pub unfinished: u64,

    /// Games the first mover went on to win
    pub first_mover_wins: u64,

    /// Actions applied, both sides
    pub total_turns: u64,
    pub longest_game: u64,

    /// For rate calculation
    start_time: Option<Instant>,
    last_log_time: Option<Instant>,
    last_log_games: u64,
}

impl SimStats {
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_log_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// Record one game
    pub fn record(&mut self, result: &GameResult) {
        self.games += 1;
        self.total_turns += result.turns as u64;
        self.longest_game = self.longest_game.max(result.turns as u64);

        let winner = match result.outcome {
            Some(Outcome::PlayerWin) => {
                self.player_wins += 1;
                Some(Owner::Player)
            }
            Some(Outcome::OpponentWin) => {
                self.opponent_wins += 1;
                Some(Owner::Opponent)
            }
            Some(Outcome::Draw) => {
                self.draws += 1;
                None
            }
            Some(Outcome::Unfinished) | None => {
                self.unfinished += 1;
                None
            }
        };
        if winner == Some(result.first_mover) {
            self.first_mover_wins += 1;
        }
    }

    /// Average actions per game
    pub fn average_turns(&self) -> f64 {
        if self.games > 0 {
            self.total_turns as f64 / self.games as f64
        } else {
            0.0
        }
    }

    /// Get current games per second
    pub fn games_per_sec(&self) -> f64 {
        if let Some(start) = self.start_time {
            let elapsed = start.elapsed().as_secs_f64();
            if elapsed > 0.0 {
                return self.games as f64 / elapsed;
            }
        }
        0.0
    }

    /// Check if we should log progress
    pub fn should_log(&self, interval_secs: u64) -> bool {
        if let Some(last) = self.last_log_time {
            last.elapsed().as_secs() >= interval_secs
        } else {
            true
        }
    }

    /// Log progress and reset log timer
    pub fn log_progress(&mut self) {
        let now = Instant::now();
        let elapsed_total = self.start_time.map(|s| s.elapsed().as_secs()).unwrap_or(0);

        // Rate since last log
        let rate = match self.last_log_time {
            Some(last) if last.elapsed().as_secs_f64() > 0.0 => {
                (self.games - self.last_log_games) as f64 / last.elapsed().as_secs_f64()
            }
            _ => self.games_per_sec(),
        };

        info!(
            "[{:02}:{:02}:{:02}] games={} rate={:.0}/s player={} opponent={} draw={} capped={}",
            elapsed_total / 3600,
            (elapsed_total % 3600) / 60,
            elapsed_total % 60,
            self.games,
            rate,
            self.player_wins,
            self.opponent_wins,
            self.draws,
            self.unfinished,
        );

        self.last_log_time = Some(now);
        self.last_log_games = self.games;
    }

    /// Print final summary
    pub fn print_summary(&self) {
        println!("Games played: {}", self.games);
        println!("  - Player wins: {} ({:.1}%)", self.player_wins, pct(self.player_wins, self.games));
        println!(
            "  - Opponent wins: {} ({:.1}%)",
            self.opponent_wins,
            pct(self.opponent_wins, self.games)
        );
        println!("  - Draws: {} ({:.1}%)", self.draws, pct(self.draws, self.games));
        println!("  - Turn cap: {} ({:.1}%)", self.unfinished, pct(self.unfinished, self.games));
        println!(
            "First mover won: {} ({:.1}%)",
            self.first_mover_wins,
            pct(self.first_mover_wins, self.games)
        );
        println!("Average length: {:.1} actions", self.average_turns());
        println!("Longest game: {} actions", self.longest_game);
        println!("Average rate: {:.0} games/sec", self.games_per_sec());
    }
}
