//! Tests for human play, history navigation and resets.

use tictactoe_rewind::{
    GameController, GameMode, HistoryError, Mark, MoveError, MoveRejected, Outcome, Position,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn play(game: &mut GameController, moves: &[(usize, usize)]) {
    for &(row, col) in moves {
        game.apply_human_move(Position::new(row, col))
            .unwrap_or_else(|e| panic!("Move ({}, {}) rejected: {}", row, col, e));
    }
}

#[test]
fn test_new_session_starts_at_empty_board() {
    init_tracing();
    let game = GameController::new(GameMode::HumanVsHuman);

    assert_eq!(game.history().len(), 1);
    assert_eq!(game.current_index(), 0);
    assert_eq!(game.turn(), Mark::X);
    assert_eq!(game.outcome(), Outcome::InProgress);
    assert!(game.history()[0].placed().is_none());
    assert_eq!(game.board().occupied_count(), 0);
    assert!(!game.is_awaiting_computer());
    assert!(!game.has_suggester());
}

#[test]
fn test_marks_alternate() {
    init_tracing();
    let mut game = GameController::new(GameMode::HumanVsHuman);

    play(&mut game, &[(1, 1)]);
    assert_eq!(game.turn(), Mark::O);
    play(&mut game, &[(0, 0)]);
    assert_eq!(game.turn(), Mark::X);

    let placed = game.history()[2].placed().expect("Entry 2 records a move");
    assert_eq!(placed.player, Mark::O);
    assert_eq!(placed.position, Position::new(0, 0));
}

#[test]
fn test_occupied_and_off_board_moves_rejected() {
    init_tracing();
    let mut game = GameController::new(GameMode::HumanVsHuman);
    play(&mut game, &[(1, 1)]);

    assert_eq!(
        game.apply_human_move(Position::new(1, 1)),
        Err(MoveRejected::Illegal(MoveError::Occupied(Position::new(1, 1))))
    );
    assert_eq!(
        game.apply_human_move(Position::new(0, 3)),
        Err(MoveRejected::Illegal(MoveError::OutOfBounds(Position::new(0, 3))))
    );
    assert_eq!(game.history().len(), 2);
    assert_eq!(game.turn(), Mark::O);
}

#[test]
fn test_full_game_win_then_branch_from_history() {
    init_tracing();
    let mut game = GameController::new(GameMode::HumanVsHuman);

    play(&mut game, &[(0, 0), (1, 1), (0, 1), (2, 2)]);
    let outcome = game.apply_human_move(Position::new(0, 2)).expect("Winning move");

    let top_row = [Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)];
    assert_eq!(outcome, Outcome::Won { player: Mark::X, line: top_row });
    assert_eq!(game.outcome(), outcome);
    assert_eq!(game.history().len(), 6);

    // Terminal: further moves are no-ops.
    assert_eq!(game.apply_human_move(Position::new(2, 0)), Err(MoveRejected::GameOver));
    assert_eq!(game.history().len(), 6);

    // Rewind to entry 2 (two moves played); X is to move again.
    assert_eq!(game.jump_to(2), Ok(Outcome::InProgress));
    assert_eq!(game.turn(), Mark::X);
    assert_eq!(game.history().len(), 6);

    let outcome = game.apply_human_move(Position::new(2, 0)).expect("Branch move");
    assert_eq!(outcome, Outcome::InProgress);
    assert_eq!(game.history().len(), 4);
    assert_eq!(game.current_index(), 3);
    assert_eq!(game.turn(), Mark::O);

    let placed = game.history()[3].placed().expect("Branch entry records a move");
    assert_eq!(placed.player, Mark::X);
    assert_eq!(placed.position, Position::new(2, 0));
    assert_eq!(game.board().occupied_count(), 3);
}

#[test]
fn test_branch_truncates_to_cursor_plus_two() {
    init_tracing();
    let mut game = GameController::new(GameMode::HumanVsHuman);
    play(&mut game, &[(0, 0), (1, 1), (2, 2), (0, 2)]);
    assert_eq!(game.history().len(), 5);

    game.jump_to(1).expect("Index 1 exists");
    assert_eq!(game.turn(), Mark::O);
    play(&mut game, &[(2, 0)]);

    assert_eq!(game.history().len(), 3);
    assert_eq!(game.current_index(), 2);
}

#[test]
fn test_jump_preserves_history() {
    init_tracing();
    let mut game = GameController::new(GameMode::HumanVsHuman);
    play(&mut game, &[(0, 0), (1, 1), (2, 2)]);
    let before = game.history().to_vec();

    for index in [0, 3, 1, 2] {
        game.jump_to(index).expect("Index exists");
        assert_eq!(game.current_index(), index);
        assert_eq!(game.history(), before.as_slice());
        assert_eq!(game.board(), before[index].board());
        let expected_turn = if index % 2 == 0 { Mark::X } else { Mark::O };
        assert_eq!(game.turn(), expected_turn);
    }
}

#[test]
fn test_jump_out_of_range_leaves_state() {
    init_tracing();
    let mut game = GameController::new(GameMode::HumanVsHuman);
    play(&mut game, &[(0, 0)]);

    assert_eq!(game.jump_to(2), Err(HistoryError::IndexOutOfRange { index: 2, len: 2 }));
    assert_eq!(game.current_index(), 1);
    assert_eq!(game.history().len(), 2);
}

#[test]
fn test_jump_back_from_terminal_reopens_play() {
    init_tracing();
    let mut game = GameController::new(GameMode::HumanVsHuman);
    play(&mut game, &[(0, 0), (1, 1), (0, 1), (2, 2), (0, 2)]);
    assert!(game.outcome().is_terminal());

    game.jump_to(4).expect("Index 4 exists");
    assert_eq!(game.outcome(), Outcome::InProgress);

    game.jump_to(5).expect("Jump forward again");
    assert_eq!(game.outcome().winner(), Some(Mark::X));
}

#[test]
fn test_draw_is_terminal() {
    init_tracing();
    let mut game = GameController::new(GameMode::HumanVsHuman);
    // X O X / X O O / O X X
    play(
        &mut game,
        &[(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0), (2, 2)],
    );

    assert_eq!(game.outcome(), Outcome::Draw);
    assert!(game.board().is_full());
    assert_eq!(game.apply_human_move(Position::new(0, 0)), Err(MoveRejected::GameOver));
}

#[test]
fn test_reset_and_set_mode_discard_history() {
    init_tracing();
    let mut game = GameController::new(GameMode::HumanVsHuman);
    play(&mut game, &[(0, 0), (1, 1)]);

    game.reset(GameMode::HumanVsHuman);
    assert_eq!(game.history().len(), 1);
    assert_eq!(game.current_index(), 0);

    play(&mut game, &[(2, 2)]);
    game.set_mode(GameMode::HumanVsComputer);
    assert_eq!(game.mode(), GameMode::HumanVsComputer);
    assert_eq!(game.history().len(), 1);
    assert_eq!(game.outcome(), Outcome::InProgress);
    assert_eq!(game.last_advisory(), None);
}

#[test]
fn test_human_cannot_play_computer_mark() {
    init_tracing();
    let mut game = GameController::new(GameMode::HumanVsComputer);
    assert!(!game.is_computer_turn());

    play(&mut game, &[(1, 1)]);
    assert!(game.is_computer_turn());
    assert_eq!(
        game.apply_human_move(Position::new(0, 0)),
        Err(MoveRejected::NotYourTurn(Mark::O))
    );
    assert_eq!(game.history().len(), 2);
}

#[test]
fn test_move_list_labels() {
    init_tracing();
    let mut game = GameController::new(GameMode::HumanVsHuman);
    play(&mut game, &[(0, 0), (1, 1)]);

    assert_eq!(
        game.move_list(),
        vec!["Go to game start", "Go to move #1", "Go to move #2"]
    );
}
