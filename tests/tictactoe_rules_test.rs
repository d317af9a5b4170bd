//! Tests for board snapshots, outcome evaluation and the fallback player.

use tictactoe_rewind::{Board, Cell, Mark, MoveError, Outcome, Position, rules, select_move};

const E: Cell = Cell::Empty;
const A: Cell = Cell::Occupied(Mark::X);
const B: Cell = Cell::Occupied(Mark::O);

#[test]
fn test_empty_board_is_in_progress() {
    let board = Board::empty();
    assert!(!board.is_full());
    assert_eq!(rules::evaluate(&board), Outcome::InProgress);
}

#[test]
fn test_top_row_win_reports_line() {
    let board = Board::from_rows([[A, A, A], [E, B, E], [B, E, E]]);
    assert_eq!(
        rules::evaluate(&board),
        Outcome::Won {
            player: Mark::X,
            line: [Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)],
        }
    );
}

#[test]
fn test_full_board_without_line_is_draw() {
    let board = Board::from_rows([[A, B, A], [A, B, B], [B, A, A]]);
    assert!(board.is_full());
    assert_eq!(rules::evaluate(&board), Outcome::Draw);
}

#[test]
fn test_every_line_is_detected_for_both_marks() {
    for mark in [Mark::X, Mark::O] {
        for line in rules::LINES {
            let board = line
                .iter()
                .try_fold(Board::empty(), |board, pos| board.apply(*pos, mark))
                .expect("Line cells are distinct");
            assert_eq!(rules::evaluate(&board), Outcome::Won { player: mark, line });
        }
    }
}

#[test]
fn test_apply_legal_move_changes_only_target() {
    let board = Board::from_rows([[A, E, E], [E, B, E], [E, E, E]]);
    let next = board.apply(Position::new(2, 2), Mark::X).expect("Cell is empty");

    for pos in Position::ALL {
        let expected = if pos == Position::new(2, 2) { Some(A) } else { board.get(pos) };
        assert_eq!(next.get(pos), expected, "cell {}", pos);
    }
}

#[test]
fn test_apply_to_occupied_cell_fails_and_leaves_board() {
    let board = Board::from_rows([[A, E, E], [E, B, E], [E, E, E]]);
    let before = board.clone();

    let result = board.apply(Position::new(1, 1), Mark::X);
    assert_eq!(result, Err(MoveError::Occupied(Position::new(1, 1))));
    assert_eq!(board, before);
}

#[test]
fn test_fallback_picks_row_major_first_empty() {
    let board = Board::from_rows([[A, A, E], [E, E, E], [E, E, E]]);
    assert_eq!(select_move(&board), Ok(Position::new(0, 2)));
}

#[test]
fn test_fallback_on_full_board_fails() {
    let board = Board::from_rows([[A, B, A], [A, B, B], [B, A, A]]);
    assert_eq!(select_move(&board), Err(MoveError::NoLegalMove));
}

#[test]
fn test_fallback_game_always_terminates() {
    // Both sides play the fallback until the game ends.
    let mut board = Board::empty();
    let mut mark = Mark::X;
    let mut moves = 0;

    while !rules::evaluate(&board).is_terminal() {
        let pos = select_move(&board).expect("Non-terminal board has a move");
        board = board.apply(pos, mark).expect("Fallback move is legal");
        mark = mark.opponent();
        moves += 1;
        assert_eq!(board.occupied_count(), moves);
    }

    // X fills 0,2,4,6 and completes the anti-diagonal on move 7.
    assert_eq!(
        rules::evaluate(&board),
        Outcome::Won {
            player: Mark::X,
            line: [Position::new(0, 2), Position::new(1, 1), Position::new(2, 0)],
        }
    );
}
