//! Engine error types.
//!
//! Only contract violations are errors. An illegal move by the player is a
//! normal game event and comes back as a [`crate::Rejection`] instead.

use derive_more::{Display, Error};

use crate::Owner;

/// Unrecoverable error surfaced to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    /// A cell index outside 0..9 was passed in.
    #[display("cell index {index} is outside the board (0-8)")]
    CellOutOfRange { index: usize },

    /// A piece id outside 0..6 was passed in.
    #[display("unknown piece id {id} for {owner:?}")]
    UnknownPiece { owner: Owner, id: u8 },

    /// A side had to move but has no legal placement or move.
    #[display("{owner:?} has no legal action")]
    NoLegalActions { owner: Owner },

    /// An opponent policy picked an index outside the candidate list.
    #[display("policy chose candidate {index} of {len}")]
    PolicyChoiceOutOfRange { index: usize, len: usize },
}
