//! Property tests over boards reached by random legal play.

use gobblet_engine::rules::{self, can_move, can_place, evaluate, Outcome};
use gobblet_engine::{Board, FirstLegalPolicy, GameEngine, GameState, Owner, Piece, Pos, Size};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

/// Play up to `plies` random legal actions, alternating sides, stopping early
/// once a line is completed.
fn random_board(seed: u64, plies: usize) -> Board {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::new();
    let mut owner = if seed % 2 == 0 { Owner::Player } else { Owner::Opponent };
    for _ in 0..plies {
        if evaluate(&board) != Outcome::Unfinished {
            break;
        }
        let actions = rules::legal_actions(&board, owner);
        let Some(&action) = actions.choose(&mut rng) else {
            break;
        };
        rules::apply(&mut board, action);
        owner = owner.other();
    }
    board
}

fn swap_owners(board: &Board) -> Board {
    let mut swapped = Board::new();
    for cell in Pos::all() {
        for piece in board.stack(cell) {
            swapped.place(cell, Piece::new(piece.owner().other(), piece.id()).unwrap());
        }
    }
    swapped
}

fn mirror(outcome: Outcome) -> Outcome {
    match outcome {
        Outcome::PlayerWin => Outcome::OpponentWin,
        Outcome::OpponentWin => Outcome::PlayerWin,
        other => other,
    }
}

proptest! {
    #[test]
    fn prop_can_place_iff_levels_above_empty(seed in any::<u64>(), plies in 0usize..40) {
        let board = random_board(seed, plies);
        for cell in Pos::all() {
            for size in Size::all() {
                let free = Size::all()
                    .filter(|&s| s >= size)
                    .all(|s| board.slot(cell, s).is_none());
                prop_assert_eq!(can_place(&board, cell, size), free);
            }
        }
    }

    #[test]
    fn prop_can_move_implies_covering(seed in any::<u64>(), plies in 0usize..40) {
        let board = random_board(seed, plies);
        for from in Pos::all() {
            for to in Pos::all() {
                if can_move(&board, from, to) {
                    let (_, from_size) = board.topmost(from).unwrap();
                    match board.topmost(to) {
                        None => {}
                        Some((_, to_size)) => prop_assert!(from_size > to_size),
                    }
                }
            }
        }
    }

    #[test]
    fn prop_evaluate_symmetric(seed in any::<u64>(), plies in 0usize..40) {
        let board = random_board(seed, plies);
        prop_assert_eq!(evaluate(&swap_owners(&board)), mirror(evaluate(&board)));
    }

    #[test]
    fn prop_every_piece_in_one_place(seed in any::<u64>(), plies in 0usize..40) {
        let board = random_board(seed, plies);
        for owner in Owner::both() {
            let on_board: u8 = board.pieces_on_board(owner).iter().sum();
            prop_assert_eq!(on_board as usize + board.reserve(owner).len(), 6);
        }
        // Each slot holds a piece of its own size
        for cell in Pos::all() {
            for size in Size::all() {
                if let Some(piece) = board.slot(cell, size) {
                    prop_assert_eq!(piece.size(), size);
                }
            }
        }
    }

    #[test]
    fn prop_legal_actions_apply_cleanly(seed in any::<u64>(), plies in 0usize..40) {
        let board = random_board(seed, plies);
        for owner in Owner::both() {
            for action in rules::legal_actions(&board, owner) {
                prop_assert!(rules::is_legal(&board, owner, action));
                let mut next = board;
                rules::apply(&mut next, action);
                prop_assert_ne!(next, board);
            }
        }
    }

    #[test]
    fn prop_double_select_is_noop(seed in any::<u64>(), id in 0u8..6) {
        let mut engine = GameEngine::new(FirstLegalPolicy);
        engine.start_from(random_board(seed, 6), Owner::Player).unwrap();
        prop_assume!(engine.current_state() == GameState::PlayerIdle);

        let board = engine.current_board_snapshot();
        let piece = Piece::new(Owner::Player, id).unwrap();
        engine.select(piece);
        engine.select(piece);
        prop_assert_eq!(engine.current_state(), GameState::PlayerIdle);
        prop_assert_eq!(engine.current_board_snapshot(), board);
    }
}
