//! Turn and selection state machine.
//!
//! The engine owns the board and is driven by two player inputs: selecting a
//! piece and acting on a cell. Every call runs to completion, including the
//! opponent's reply, before it returns.
//!
//! ```text
//! NotStarted --start--> PlayerIdle | OpponentTurn
//! PlayerIdle --select(own piece)--> PlayerSelecting(p)
//! PlayerSelecting(p) --select(p)--> PlayerIdle
//! PlayerSelecting(p) --select(q)--> PlayerSelecting(q)
//! PlayerSelecting(p) --act_on_cell(legal)--> OpponentTurn --> PlayerIdle
//!                                        \--> GameOver(outcome)
//! ```

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::policy::{OpponentPolicy, RandomPolicy};
use crate::rules::{self, Outcome};
use crate::{Action, Board, EngineError, GameConfig, Location, Owner, Piece, Pos};

/// Where the game currently stands.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum GameState {
    NotStarted,
    PlayerIdle,
    PlayerSelecting(Piece),
    OpponentTurn,
    GameOver(Outcome),
}

/// Human-readable status for the presentation layer.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, derive_more::Display)]
pub enum Status {
    #[display("Your turn")]
    PlayerTurn,
    #[display("Opponent's turn")]
    OpponentTurn,
    #[display("You win")]
    PlayerWins,
    #[display("You lose")]
    OpponentWins,
    #[display("Draw")]
    Draw,
}

impl Status {
    fn for_outcome(outcome: Outcome) -> Option<Status> {
        match outcome {
            Outcome::Unfinished => None,
            Outcome::PlayerWin => Some(Status::PlayerWins),
            Outcome::OpponentWin => Some(Status::OpponentWins),
            Outcome::Draw => Some(Status::Draw),
        }
    }
}

/// Why a player input was ignored. The state is unchanged when this is set.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, derive_more::Display)]
pub enum Rejection {
    #[display("the game is not waiting for the player")]
    NotPlayerTurn,
    #[display("piece {} cannot be selected", _0)]
    IneligiblePiece(Piece),
    #[display("no piece of yours to select at cell {}", _0.index())]
    NothingToSelect(Pos),
    #[display("cannot place {} at cell {}", _0, _1.index())]
    CannotPlace(Piece, Pos),
    #[display("cannot move from cell {} to cell {}", _0.index(), _1.index())]
    CannotMove(Pos, Pos),
}

/// What a single engine call did.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct EngineEvent {
    /// State after the call.
    pub state: GameState,
    /// Set when the turn changed or the game ended.
    pub status: Option<Status>,
    /// Set once the game is over.
    pub outcome: Option<Outcome>,
    /// Actions applied during the call, in order.
    pub applied: Vec<(Owner, Action)>,
    pub rejection: Option<Rejection>,
}

/// A single game between the player and an opponent policy.
///
/// Not meant for shared access: the host owns the engine and serializes calls.
#[derive(Debug, Clone)]
pub struct GameEngine<P = RandomPolicy> {
    board: Board,
    state: GameState,
    first_mover: Option<Owner>,
    history: Vec<(Owner, Action)>,
    policy: P,
}

impl GameEngine<RandomPolicy> {
    /// Start a game against a random opponent seeded from the OS.
    pub fn new_game(first_mover: Owner) -> Result<Self, EngineError> {
        let mut engine = GameEngine::new(RandomPolicy::from_entropy());
        engine.start(first_mover)?;
        Ok(engine)
    }

    /// Start a game from configuration; a seed makes the opponent reproducible.
    pub fn from_config(config: &GameConfig) -> Result<Self, EngineError> {
        let policy = match config.seed {
            Some(seed) => RandomPolicy::new(seed),
            None => RandomPolicy::from_entropy(),
        };
        let mut engine = GameEngine::new(policy);
        engine.start(config.first_mover)?;
        Ok(engine)
    }
}

impl<P: OpponentPolicy> GameEngine<P> {
    /// Create an engine that has not started a game yet.
    pub fn new(policy: P) -> Self {
        Self {
            board: Board::new(),
            state: GameState::NotStarted,
            first_mover: None,
            history: Vec::new(),
            policy,
        }
    }

    /// Start a new game on an empty board, discarding any game in progress.
    #[instrument(skip(self))]
    pub fn start(&mut self, first_mover: Owner) -> Result<EngineEvent, EngineError> {
        self.start_from(Board::new(), first_mover)
    }

    /// Start a game from an existing position with `to_move` on turn.
    ///
    /// A position that is already decided goes straight to `GameOver`.
    #[instrument(skip(self, board))]
    pub fn start_from(&mut self, board: Board, to_move: Owner) -> Result<EngineEvent, EngineError> {
        self.board = board;
        self.history.clear();
        self.first_mover = Some(to_move);
        self.state = GameState::NotStarted;
        debug!(%board, "new game");

        let outcome = rules::evaluate(&self.board);
        if outcome.is_finished() {
            self.finish(outcome);
            return Ok(self.turn_event(Vec::new()));
        }

        let mut applied = Vec::new();
        match to_move {
            Owner::Player => self.state = GameState::PlayerIdle,
            Owner::Opponent => {
                self.state = GameState::OpponentTurn;
                self.run_opponent_turn(&mut applied)?;
            }
        }
        Ok(self.turn_event(applied))
    }

    /// Select a piece by reference.
    ///
    /// Selecting the current selection again clears it.
    #[instrument(skip(self))]
    pub fn select(&mut self, piece: Piece) -> EngineEvent {
        match self.state {
            GameState::PlayerIdle => {
                if !self.is_selectable(piece) {
                    return self.reject(Rejection::IneligiblePiece(piece));
                }
                self.state = GameState::PlayerSelecting(piece);
            }
            GameState::PlayerSelecting(current) if current == piece => {
                self.state = GameState::PlayerIdle;
            }
            GameState::PlayerSelecting(_) => {
                if !self.is_selectable(piece) {
                    return self.reject(Rejection::IneligiblePiece(piece));
                }
                self.state = GameState::PlayerSelecting(piece);
            }
            _ => return self.reject(Rejection::NotPlayerTurn),
        }
        debug!(state = ?self.state, "selection changed");
        self.selection_event()
    }

    /// Select a piece by raw owner and id, as received from outside.
    pub fn select_id(&mut self, owner: Owner, id: u8) -> Result<EngineEvent, EngineError> {
        let piece = Piece::new(owner, id)?;
        Ok(self.select(piece))
    }

    /// Act on a cell: select the player's piece there, or drop the current
    /// selection onto it.
    #[instrument(skip(self))]
    pub fn act_on_cell(&mut self, cell: usize) -> Result<EngineEvent, EngineError> {
        let pos = Pos::new(cell)?;

        let selected = match self.state {
            GameState::PlayerIdle => {
                return Ok(match self.board.topmost(pos) {
                    Some((piece, _)) if piece.owner() == Owner::Player => {
                        self.state = GameState::PlayerSelecting(piece);
                        debug!(%piece, "selected from board");
                        self.selection_event()
                    }
                    _ => self.reject(Rejection::NothingToSelect(pos)),
                });
            }
            GameState::PlayerSelecting(piece) => piece,
            _ => return Ok(self.reject(Rejection::NotPlayerTurn)),
        };

        // Clicking the cell that shows the selection drops it
        if self.board.topmost(pos).map(|(piece, _)| piece) == Some(selected) {
            self.state = GameState::PlayerIdle;
            debug!(piece = %selected, "deselected on its own cell");
            return Ok(self.selection_event());
        }

        let action = match self.board.location_of(selected) {
            Location::Reserve => {
                if !rules::can_place(&self.board, pos, selected.size()) {
                    return Ok(self.reject(Rejection::CannotPlace(selected, pos)));
                }
                Action::Place { piece: selected, to: pos }
            }
            Location::Board { pos: from, .. } => {
                if !rules::can_move(&self.board, from, pos) {
                    return Ok(self.reject(Rejection::CannotMove(from, pos)));
                }
                Action::Slide { from, to: pos }
            }
        };

        self.play_player_action(action)
    }

    /// Perform a whole player action: select its piece, then act on its
    /// destination.
    ///
    /// The action is applied exactly as given or rejected: a placement of a
    /// piece already on the board never turns into a slide.
    pub fn perform(&mut self, action: Action) -> Result<EngineEvent, EngineError> {
        if !matches!(self.state, GameState::PlayerIdle | GameState::PlayerSelecting(_)) {
            return Ok(self.reject(Rejection::NotPlayerTurn));
        }

        let piece = match action {
            Action::Place { piece, to } => {
                if self.board.location_of(piece) != Location::Reserve {
                    return Ok(self.reject(Rejection::CannotPlace(piece, to)));
                }
                piece
            }
            Action::Slide { from, to } => match self.board.topmost(from) {
                Some(_) if from == to => return Ok(self.reject(Rejection::CannotMove(from, to))),
                Some((piece, _)) => piece,
                None => return Ok(self.reject(Rejection::NothingToSelect(from))),
            },
        };
        if self.state != GameState::PlayerSelecting(piece) {
            let event = self.select(piece);
            if event.rejection.is_some() {
                return Ok(event);
            }
        }
        self.act_on_cell(action.to().index())
    }

    #[inline]
    pub fn current_state(&self) -> GameState {
        self.state
    }

    /// Copy of the board for rendering.
    #[inline]
    pub fn current_board_snapshot(&self) -> Board {
        self.board
    }

    /// The currently selected piece, if any.
    pub fn selected(&self) -> Option<Piece> {
        match self.state {
            GameState::PlayerSelecting(piece) => Some(piece),
            _ => None,
        }
    }

    /// Side that moved first in the current game.
    pub fn first_mover(&self) -> Option<Owner> {
        self.first_mover
    }

    /// Actions applied so far in the current game.
    pub fn history(&self) -> &[(Owner, Action)] {
        &self.history
    }

    /// Status message matching the current state.
    pub fn status(&self) -> Option<Status> {
        match self.state {
            GameState::NotStarted => None,
            GameState::PlayerIdle | GameState::PlayerSelecting(_) => Some(Status::PlayerTurn),
            GameState::OpponentTurn => Some(Status::OpponentTurn),
            GameState::GameOver(outcome) => Status::for_outcome(outcome),
        }
    }

    /// Final outcome once the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            GameState::GameOver(outcome) => Some(outcome),
            _ => None,
        }
    }

    // ========== Internals ==========

    /// A player piece is selectable from reserve or when visible on the board.
    fn is_selectable(&self, piece: Piece) -> bool {
        if piece.owner() != Owner::Player {
            return false;
        }
        match self.board.location_of(piece) {
            Location::Reserve => true,
            Location::Board { pos, .. } => {
                self.board.topmost(pos).map(|(top, _)| top) == Some(piece)
            }
        }
    }

    fn play_player_action(&mut self, action: Action) -> Result<EngineEvent, EngineError> {
        let mut applied = Vec::with_capacity(2);
        self.apply(Owner::Player, action, &mut applied);

        let outcome = rules::evaluate(&self.board);
        if outcome.is_finished() {
            self.finish(outcome);
            return Ok(self.turn_event(applied));
        }

        self.state = GameState::OpponentTurn;
        debug!("opponent's turn");
        self.run_opponent_turn(&mut applied)?;
        Ok(self.turn_event(applied))
    }

    /// One opponent action, then back to the player or game over.
    ///
    /// On error the state stays `OpponentTurn`; the host has to start over.
    fn run_opponent_turn(&mut self, applied: &mut Vec<(Owner, Action)>) -> Result<(), EngineError> {
        debug_assert_eq!(self.state, GameState::OpponentTurn);

        let candidates = rules::legal_actions(&self.board, Owner::Opponent);
        if candidates.is_empty() {
            warn!(board = %self.board, "opponent has no legal action");
            return Err(EngineError::NoLegalActions { owner: Owner::Opponent });
        }

        let index = self.policy.choose(&self.board, &candidates);
        let Some(&action) = candidates.get(index) else {
            warn!(index, len = candidates.len(), "policy chose outside the candidate list");
            return Err(EngineError::PolicyChoiceOutOfRange {
                index,
                len: candidates.len(),
            });
        };
        self.apply(Owner::Opponent, action, applied);

        let outcome = rules::evaluate(&self.board);
        if outcome.is_finished() {
            self.finish(outcome);
        } else {
            self.state = GameState::PlayerIdle;
            debug!("player's turn");
        }
        Ok(())
    }

    fn apply(&mut self, owner: Owner, action: Action, applied: &mut Vec<(Owner, Action)>) {
        debug!(?owner, ?action, "applying action");
        rules::apply(&mut self.board, action);
        self.history.push((owner, action));
        applied.push((owner, action));
    }

    fn finish(&mut self, outcome: Outcome) {
        debug!(?outcome, moves = self.history.len(), "game over");
        self.state = GameState::GameOver(outcome);
    }

    fn reject(&self, rejection: Rejection) -> EngineEvent {
        debug!(%rejection, state = ?self.state, "input ignored");
        EngineEvent {
            state: self.state,
            status: None,
            outcome: self.outcome(),
            applied: Vec::new(),
            rejection: Some(rejection),
        }
    }

    fn selection_event(&self) -> EngineEvent {
        EngineEvent {
            state: self.state,
            status: None,
            outcome: None,
            applied: Vec::new(),
            rejection: None,
        }
    }

    fn turn_event(&self, applied: Vec<(Owner, Action)>) -> EngineEvent {
        EngineEvent {
            state: self.state,
            status: self.status(),
            outcome: self.outcome(),
            applied,
            rejection: None,
        }
    }
}
