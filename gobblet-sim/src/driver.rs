//! Plays one game through the engine's player API.
//!
//! The "player" here is a seeded random mover that turns each chosen action
//! into the same select + cell inputs a person would give.

use gobblet_engine::rules;
use gobblet_engine::{Board, EngineError, GameConfig, GameEngine, Outcome, Owner};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use tracing::{debug, warn};

/// Separates the player's random stream from the opponent's.
const PLAYER_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

/// How one game ended.
#[derive(Debug, Clone)]
pub struct GameResult {
    /// None when the turn cap was hit first
    pub outcome: Option<Outcome>,
    /// Actions applied by both sides
    pub turns: usize,
    pub first_mover: Owner,
    pub board: Board,
}

/// Play a game with both sides moving uniformly at random.
pub fn play_game(seed: u64, first_mover: Owner, max_turns: usize) -> Result<GameResult, EngineError> {
    let config = GameConfig {
        first_mover,
        seed: Some(seed),
    };
    let mut engine = GameEngine::from_config(&config)?;
    let mut rng = StdRng::seed_from_u64(seed ^ PLAYER_STREAM);

    while engine.outcome().is_none() && engine.history().len() < max_turns {
        let board = engine.current_board_snapshot();
        let actions = rules::legal_actions(&board, Owner::Player);
        let Some(&action) = actions.choose(&mut rng) else {
            return Err(EngineError::NoLegalActions {
                owner: Owner::Player,
            });
        };

        let event = engine.perform(action)?;
        if let Some(rejection) = event.rejection {
            // Only legal actions are generated, so this means a rules bug
            warn!(%rejection, ?action, "legal action rejected");
            break;
        }
    }

    let outcome = engine.outcome();
    debug!(seed, ?outcome, turns = engine.history().len(), "game finished");
    Ok(GameResult {
        outcome,
        turns: engine.history().len(),
        first_mover,
        board: engine.current_board_snapshot(),
    })
}
