//! Pure rule functions over a [`Board`] snapshot.
//!
//! Nothing here mutates except [`apply`], which expects a legal action.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{Action, Board, Owner, Piece, Pos, Size};

/// Result of evaluating a board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Unfinished,
    PlayerWin,
    OpponentWin,
    /// One action completed a line for both sides at once.
    Draw,
}

impl Outcome {
    #[inline]
    pub fn is_finished(self) -> bool {
        self != Outcome::Unfinished
    }
}

/// The 8 winning lines: 3 rows, 3 columns, 2 diagonals.
pub const WIN_LINES: [[Pos; 3]; 8] = [
    [Pos(0), Pos(1), Pos(2)], // Row 0
    [Pos(3), Pos(4), Pos(5)], // Row 1
    [Pos(6), Pos(7), Pos(8)], // Row 2
    [Pos(0), Pos(3), Pos(6)], // Col 0
    [Pos(1), Pos(4), Pos(7)], // Col 1
    [Pos(2), Pos(5), Pos(8)], // Col 2
    [Pos(0), Pos(4), Pos(8)], // Main diagonal
    [Pos(2), Pos(4), Pos(6)], // Anti-diagonal
];

/// Check if a piece of the given size can be placed at this position.
///
/// Every slot from `size` upward must be empty: the piece may cover smaller
/// pieces but never an equal or larger one.
#[inline]
pub fn can_place(board: &Board, pos: Pos, size: Size) -> bool {
    Size::all()
        .filter(|&s| s >= size)
        .all(|s| board.slot(pos, s).is_none())
}

/// Check if the visible piece at `from` can be moved onto `to`.
#[inline]
pub fn can_move(board: &Board, from: Pos, to: Pos) -> bool {
    let Some((_, from_size)) = board.topmost(from) else {
        return false;
    };
    match board.topmost(to) {
        None => true,
        Some((_, to_size)) => from_size.can_gobble(to_size),
    }
}

/// Every (reserve piece, cell) pair the owner could place.
/// Pieces in id order, cells in index order.
pub fn legal_placements(board: &Board, owner: Owner) -> Vec<(Piece, Pos)> {
    let mut placements = Vec::with_capacity(54);
    for piece in board.reserve(owner) {
        for pos in Pos::all() {
            if can_place(board, pos, piece.size()) {
                placements.push((piece, pos));
            }
        }
    }
    placements
}

/// Every (from, to) pair where the owner's visible piece can move.
pub fn legal_moves(board: &Board, owner: Owner) -> Vec<(Pos, Pos)> {
    let mut moves = Vec::with_capacity(32);
    for from in Pos::all() {
        if board.owner_of_topmost(from) != Some(owner) {
            continue;
        }
        for to in Pos::all() {
            if can_move(board, from, to) {
                moves.push((from, to));
            }
        }
    }
    moves
}

/// All legal actions for an owner: placements first, then moves.
///
/// The order is stable, which deterministic policies rely on.
pub fn legal_actions(board: &Board, owner: Owner) -> Vec<Action> {
    let placements = legal_placements(board, owner)
        .into_iter()
        .map(|(piece, to)| Action::Place { piece, to });
    let moves = legal_moves(board, owner)
        .into_iter()
        .map(|(from, to)| Action::Slide { from, to });
    placements.chain(moves).collect()
}

/// Check a single action without generating the full list.
pub fn is_legal(board: &Board, owner: Owner, action: Action) -> bool {
    match action {
        Action::Place { piece, to } => {
            piece.owner() == owner
                && board.location_of(piece) == crate::Location::Reserve
                && can_place(board, to, piece.size())
        }
        Action::Slide { from, to } => {
            board.owner_of_topmost(from) == Some(owner) && can_move(board, from, to)
        }
    }
}

/// Apply a legal action to the board.
///
/// Illegal actions trip the board's own invariant checks and panic.
#[instrument(level = "trace", skip(board))]
pub fn apply(board: &mut Board, action: Action) {
    match action {
        Action::Place { piece, to } => board.place(to, piece),
        Action::Slide { from, to } => {
            assert!(can_move(board, from, to), "illegal slide {:?}", action);
            let piece = board.remove_topmost(from);
            board.place(to, piece);
        }
    }
}

/// Check if a line is fully shown by one owner.
#[inline]
fn line_owner(board: &Board, line: &[Pos; 3]) -> Option<Owner> {
    let first = board.owner_of_topmost(line[0])?;
    line[1..]
        .iter()
        .all(|&pos| board.owner_of_topmost(pos) == Some(first))
        .then_some(first)
}

/// Every completed line of an owner, in [`WIN_LINES`] order.
pub fn winning_lines(board: &Board, owner: Owner) -> Vec<[Pos; 3]> {
    WIN_LINES
        .iter()
        .filter(|line| line_owner(board, line) == Some(owner))
        .copied()
        .collect()
}

/// Evaluate the board after an action.
///
/// Both sides can complete a line with the same action (a slide uncovers one
/// line while finishing another); that case is a draw.
pub fn evaluate(board: &Board) -> Outcome {
    let mut player_won = false;
    let mut opponent_won = false;

    for line in &WIN_LINES {
        match line_owner(board, line) {
            Some(Owner::Player) => player_won = true,
            Some(Owner::Opponent) => opponent_won = true,
            None => {}
        }
    }

    match (player_won, opponent_won) {
        (true, true) => Outcome::Draw,
        (true, false) => Outcome::PlayerWin,
        (false, true) => Outcome::OpponentWin,
        (false, false) => Outcome::Unfinished,
    }
}
