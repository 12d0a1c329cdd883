//! Stack storage for the 9 cells.
//!
//! The board stores which piece sits in each (cell, size) slot and nothing else.
//! It does NOT validate moves: callers go through [`crate::rules`] first, and a
//! placement that breaks the stacking invariant is a bug that panics here.

use serde::Serialize;

use crate::{Owner, Piece, Pos, Size, CELL_COUNT};

/// Where a piece currently is. Derived from the board, never stored.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Location {
    Reserve,
    Board { pos: Pos, size: Size },
}

/// 9 cells x 3 size slots.
///
/// Each slot holds at most one piece. The visible piece of a cell is the one in
/// its largest occupied slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
pub struct Board {
    cells: [[Option<Piece>; 3]; CELL_COUNT],
}

impl Board {
    /// Create a new empty board; every piece starts in reserve.
    #[inline]
    pub fn new() -> Board {
        Board {
            cells: [[None; 3]; CELL_COUNT],
        }
    }

    /// Get the piece in a specific size slot of a cell.
    #[inline]
    pub fn slot(&self, pos: Pos, size: Size) -> Option<Piece> {
        self.cells[pos.index()][size.index()]
    }

    /// Get the top (visible) piece at a position with its size level.
    /// Returns None if the cell is empty.
    pub fn topmost(&self, pos: Pos) -> Option<(Piece, Size)> {
        let cell = &self.cells[pos.index()];
        // Check from largest to smallest
        Size::all()
            .rev()
            .find_map(|size| cell[size.index()].map(|piece| (piece, size)))
    }

    /// Owner of the visible piece, if any.
    #[inline]
    pub fn owner_of_topmost(&self, pos: Pos) -> Option<Owner> {
        self.topmost(pos).map(|(piece, _)| piece.owner())
    }

    /// Check if a cell is empty.
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.cells[pos.index()].iter().all(Option::is_none)
    }

    /// Stack of a cell from bottom (smallest) to top (largest).
    pub fn stack(&self, pos: Pos) -> impl Iterator<Item = Piece> + '_ {
        self.cells[pos.index()].iter().flatten().copied()
    }

    /// Put a piece into its own size slot of a cell.
    ///
    /// Does NOT validate legality. The slot and every slot above it must be
    /// empty and the piece must be in reserve; anything else is a caller bug.
    pub fn place(&mut self, pos: Pos, piece: Piece) {
        let size = piece.size();
        assert!(
            self.cells[pos.index()][size.index()..].iter().all(Option::is_none),
            "cannot place {} at cell {}: slot {:?} is covered or taken",
            piece,
            pos.index(),
            size
        );
        assert_eq!(
            self.location_of(piece),
            Location::Reserve,
            "piece {} is already on the board",
            piece
        );
        self.cells[pos.index()][size.index()] = Some(piece);
    }

    /// Remove the top piece from a cell and return it.
    ///
    /// Panics if the cell is empty.
    pub fn remove_topmost(&mut self, pos: Pos) -> Piece {
        let (piece, size) = self
            .topmost(pos)
            .unwrap_or_else(|| panic!("cannot remove from empty cell {}", pos.index()));
        self.cells[pos.index()][size.index()] = None;
        piece
    }

    /// Find where a piece currently is.
    pub fn location_of(&self, piece: Piece) -> Location {
        for pos in Pos::all() {
            let size = piece.size();
            if self.slot(pos, size) == Some(piece) {
                return Location::Board { pos, size };
            }
        }
        Location::Reserve
    }

    /// Pieces of an owner still in reserve, in id order.
    pub fn reserve(&self, owner: Owner) -> Vec<Piece> {
        Piece::all(owner)
            .filter(|&piece| self.location_of(piece) == Location::Reserve)
            .collect()
    }

    /// Count pieces of each size on board for an owner, hidden ones included.
    /// Returns [small_count, medium_count, large_count].
    pub fn pieces_on_board(&self, owner: Owner) -> [u8; 3] {
        let mut counts = [0u8; 3];
        for cell in &self.cells {
            for (size_idx, slot) in cell.iter().enumerate() {
                if slot.is_some_and(|piece| piece.owner() == owner) {
                    counts[size_idx] += 1;
                }
            }
        }
        counts
    }

    /// Get reserve counts for an owner (pieces not on board).
    /// Each owner starts with 2 of each size.
    /// Returns [small_reserve, medium_reserve, large_reserve].
    #[inline]
    pub fn reserve_counts(&self, owner: Owner) -> [u8; 3] {
        let on_board = self.pieces_on_board(owner);
        [2 - on_board[0], 2 - on_board[1], 2 - on_board[2]]
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Text grid of the visible pieces: lowercase for the player, uppercase for the
/// opponent, `.` for an empty cell.
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                if col > 0 {
                    write!(f, " ")?;
                }
                match self.topmost(Pos::from_row_col(row, col)) {
                    Some((piece, _)) => write!(f, "{:>2}", piece)?,
                    None => write!(f, "{:>2}", ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece(owner: Owner, id: u8) -> Piece {
        Piece::new(owner, id).unwrap()
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for pos in Pos::all() {
            assert!(board.is_empty(pos));
            assert_eq!(board.topmost(pos), None);
        }
        assert_eq!(board.reserve(Owner::Player).len(), 6);
        assert_eq!(board.reserve(Owner::Opponent).len(), 6);
    }

    #[test]
    fn test_place_and_topmost() {
        let mut board = Board::new();

        // Player Small at 0
        board.place(Pos(0), piece(Owner::Player, 0));
        assert_eq!(board.topmost(Pos(0)), Some((piece(Owner::Player, 0), Size::Small)));

        // Opponent Medium gobbles it
        board.place(Pos(0), piece(Owner::Opponent, 2));
        assert_eq!(board.topmost(Pos(0)), Some((piece(Owner::Opponent, 2), Size::Medium)));
        assert_eq!(board.owner_of_topmost(Pos(0)), Some(Owner::Opponent));

        // The small piece should still be there
        assert_eq!(board.slot(Pos(0), Size::Small), Some(piece(Owner::Player, 0)));
    }

    #[test]
    fn test_remove_topmost() {
        let mut board = Board::new();

        // Build a stack: Player Small, Opponent Medium, Player Large
        board.place(Pos(4), piece(Owner::Player, 1));
        board.place(Pos(4), piece(Owner::Opponent, 3));
        board.place(Pos(4), piece(Owner::Player, 5));

        assert_eq!(board.remove_topmost(Pos(4)), piece(Owner::Player, 5));
        assert_eq!(board.owner_of_topmost(Pos(4)), Some(Owner::Opponent));
        assert_eq!(board.remove_topmost(Pos(4)), piece(Owner::Opponent, 3));
        assert_eq!(board.remove_topmost(Pos(4)), piece(Owner::Player, 1));
        assert!(board.is_empty(Pos(4)));
    }

    #[test]
    #[should_panic(expected = "cannot remove from empty cell")]
    fn test_remove_topmost_empty_panics() {
        let mut board = Board::new();
        board.remove_topmost(Pos(3));
    }

    #[test]
    #[should_panic(expected = "covered or taken")]
    fn test_place_into_taken_slot_panics() {
        let mut board = Board::new();
        board.place(Pos(2), piece(Owner::Player, 0));
        board.place(Pos(2), piece(Owner::Opponent, 0));
    }

    #[test]
    #[should_panic(expected = "covered or taken")]
    fn test_place_under_larger_piece_panics() {
        let mut board = Board::new();
        board.place(Pos(2), piece(Owner::Player, 4));
        board.place(Pos(2), piece(Owner::Opponent, 2));
    }

    #[test]
    #[should_panic(expected = "already on the board")]
    fn test_place_same_piece_twice_panics() {
        let mut board = Board::new();
        board.place(Pos(0), piece(Owner::Player, 2));
        board.place(Pos(1), piece(Owner::Player, 2));
    }

    #[test]
    fn test_stack_order_bottom_to_top() {
        let mut board = Board::new();
        board.place(Pos(7), piece(Owner::Opponent, 0));
        board.place(Pos(7), piece(Owner::Player, 4));

        let stack: Vec<Piece> = board.stack(Pos(7)).collect();
        assert_eq!(stack, vec![piece(Owner::Opponent, 0), piece(Owner::Player, 4)]);
    }

    #[test]
    fn test_location_of() {
        let mut board = Board::new();
        let p = piece(Owner::Player, 3);
        assert_eq!(board.location_of(p), Location::Reserve);

        board.place(Pos(8), p);
        assert_eq!(board.location_of(p), Location::Board { pos: Pos(8), size: Size::Medium });

        board.remove_topmost(Pos(8));
        assert_eq!(board.location_of(p), Location::Reserve);
    }

    #[test]
    fn test_reserve_counts_after_placement() {
        let mut board = Board::new();
        assert_eq!(board.reserve_counts(Owner::Player), [2, 2, 2]);

        board.place(Pos(0), piece(Owner::Player, 0));
        board.place(Pos(1), piece(Owner::Player, 4));
        assert_eq!(board.reserve_counts(Owner::Player), [1, 2, 1]);
        assert_eq!(board.reserve_counts(Owner::Opponent), [2, 2, 2]);

        let ids: Vec<u8> = board.reserve(Owner::Player).iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![1, 2, 3, 5]);
    }

    #[test]
    fn test_gobbled_pieces_still_count() {
        let mut board = Board::new();

        board.place(Pos(0), piece(Owner::Player, 0));
        board.place(Pos(0), piece(Owner::Opponent, 4));

        // Player still has 1 small on board (hidden)
        assert_eq!(board.pieces_on_board(Owner::Player), [1, 0, 0]);
        assert_eq!(board.reserve_counts(Owner::Player), [1, 2, 2]);
    }

    #[test]
    fn test_display_grid() {
        let mut board = Board::new();
        board.place(Pos(0), piece(Owner::Player, 0));
        board.place(Pos(4), piece(Owner::Opponent, 5));

        assert_eq!(board.to_string(), "s0  .  .\n . L5  .\n .  .  .\n");
    }
}
