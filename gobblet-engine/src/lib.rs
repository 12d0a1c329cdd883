//! Gobblet Gobblers game engine.
//!
//! A 3x3 board where every cell holds a stack of up to three pieces, one per
//! size level. Only the largest piece of a stack is visible, and a line of three
//! visible pieces of the same owner wins.
//!
//! # Board Layout
//!
//! ```text
//! Cell indices (row-major order):
//!   (0,0)=0  (0,1)=1  (0,2)=2
//!   (1,0)=3  (1,1)=4  (1,2)=5
//!   (2,0)=6  (2,1)=7  (2,2)=8
//!
//! Each cell is indexed by SIZE, not stack position:
//!   slot 0: Small   slot 1: Medium   slot 2: Large
//! ```
//!
//! # Pieces
//!
//! ```text
//! Each owner has 6 pieces, id 0..6, size = id / 2:
//!   ids 0,1 = Small   ids 2,3 = Medium   ids 4,5 = Large
//! ```
//!
//! The crate is split the same way the game is played:
//! - [`board`]: stack storage, no rule checking
//! - [`rules`]: legality, move generation and outcome evaluation
//! - [`engine`]: the player-facing turn/selection state machine
//! - [`policy`]: pluggable opponent strategies

use serde::{Deserialize, Serialize};

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod policy;
pub mod rules;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use board::{Board, Location};
pub use config::GameConfig;
pub use engine::{EngineEvent, GameEngine, GameState, Rejection, Status};
pub use error::EngineError;
pub use policy::{FirstLegalPolicy, OpponentPolicy, RandomPolicy};
pub use rules::Outcome;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// Number of pieces each owner starts with (two of each size).
pub const PIECES_PER_OWNER: u8 = 6;

/// Side owning a piece.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Owner {
    Player,
    Opponent,
}

impl Owner {
    /// Get the opposing side.
    #[inline]
    pub fn other(self) -> Owner {
        match self {
            Owner::Player => Owner::Opponent,
            Owner::Opponent => Owner::Player,
        }
    }

    /// Both sides, player first.
    pub fn both() -> impl Iterator<Item = Owner> {
        [Owner::Player, Owner::Opponent].into_iter()
    }
}

/// Piece size.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Size {
    Small = 0,
    Medium = 1,
    Large = 2,
}

impl Size {
    /// Check if this size can gobble (cover) another size.
    #[inline]
    pub fn can_gobble(self, other: Size) -> bool {
        (self as u8) > (other as u8)
    }

    /// Convert from index (0, 1, 2) to Size.
    #[inline]
    pub fn from_index(idx: usize) -> Option<Size> {
        match idx {
            0 => Some(Size::Small),
            1 => Some(Size::Medium),
            2 => Some(Size::Large),
            _ => None,
        }
    }

    /// Slot index of this size inside a cell.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Get all sizes as an iterator, smallest first.
    pub fn all() -> impl DoubleEndedIterator<Item = Size> {
        [Size::Small, Size::Medium, Size::Large].into_iter()
    }
}

/// Position on the 3x3 board (0-8).
///
/// Layout:
/// ```text
///   0 1 2
///   3 4 5
///   6 7 8
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8")]
pub struct Pos(u8);

impl TryFrom<u8> for Pos {
    type Error = EngineError;

    fn try_from(index: u8) -> Result<Pos, EngineError> {
        Pos::new(index as usize)
    }
}

impl Pos {
    /// Checked constructor for a cell index coming from outside the engine.
    pub fn new(index: usize) -> Result<Pos, EngineError> {
        if index < CELL_COUNT {
            Ok(Pos(index as u8))
        } else {
            Err(EngineError::CellOutOfRange { index })
        }
    }

    /// Create a position from row and column (0-2 each).
    #[inline]
    pub fn from_row_col(row: u8, col: u8) -> Pos {
        debug_assert!(row < 3 && col < 3);
        Pos(row * 3 + col)
    }

    /// Cell index (0-8).
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the row (0-2).
    #[inline]
    pub fn row(self) -> u8 {
        self.0 / 3
    }

    /// Get the column (0-2).
    #[inline]
    pub fn col(self) -> u8 {
        self.0 % 3
    }

    /// Iterate over all 9 positions.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..CELL_COUNT as u8).map(Pos)
    }
}

/// A single piece, identified by its owner and a per-owner id.
///
/// The size is fixed by the id, so a piece never changes size and two pieces
/// of the same owner share a size only in pairs.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPiece")]
pub struct Piece {
    owner: Owner,
    id: u8,
}

/// Unchecked wire form of a [`Piece`].
#[derive(Deserialize)]
struct RawPiece {
    owner: Owner,
    id: u8,
}

impl TryFrom<RawPiece> for Piece {
    type Error = EngineError;

    fn try_from(raw: RawPiece) -> Result<Piece, EngineError> {
        Piece::new(raw.owner, raw.id)
    }
}

impl Piece {
    /// Checked constructor for a piece id coming from outside the engine.
    pub fn new(owner: Owner, id: u8) -> Result<Piece, EngineError> {
        if id < PIECES_PER_OWNER {
            Ok(Piece { owner, id })
        } else {
            Err(EngineError::UnknownPiece { owner, id })
        }
    }

    #[inline]
    pub fn owner(self) -> Owner {
        self.owner
    }

    #[inline]
    pub fn id(self) -> u8 {
        self.id
    }

    #[inline]
    pub fn size(self) -> Size {
        match self.id / 2 {
            0 => Size::Small,
            1 => Size::Medium,
            _ => Size::Large,
        }
    }

    /// All six pieces of an owner in id order.
    pub fn all(owner: Owner) -> impl Iterator<Item = Piece> {
        (0..PIECES_PER_OWNER).map(move |id| Piece { owner, id })
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match (self.owner, self.size()) {
            (Owner::Player, Size::Small) => 's',
            (Owner::Player, Size::Medium) => 'm',
            (Owner::Player, Size::Large) => 'l',
            (Owner::Opponent, Size::Small) => 'S',
            (Owner::Opponent, Size::Medium) => 'M',
            (Owner::Opponent, Size::Large) => 'L',
        };
        write!(f, "{}{}", tag, self.id)
    }
}

/// An action a side can take on its turn.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Action {
    /// Place a piece from reserve onto the board.
    Place { piece: Piece, to: Pos },
    /// Move the visible piece of one cell onto another cell.
    Slide { from: Pos, to: Pos },
}

impl Action {
    /// Get the destination position of the action.
    #[inline]
    pub fn to(&self) -> Pos {
        match self {
            Action::Place { to, .. } => *to,
            Action::Slide { to, .. } => *to,
        }
    }
}
