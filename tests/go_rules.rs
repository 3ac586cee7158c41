//! Go scenarios exercised through the public wrapper: suicide, ko, and
//! two-pass scoring with komi.

use arena::config::EngineConfig;
use arena::game::{Game, GameStatus, GameType};
use arena::game_wrapper::GameWrapper;
use arena::Color;

fn nine_by_nine() -> GameWrapper {
    let mut config = EngineConfig::default();
    config.go.board_size = 9;
    GameWrapper::new(GameType::Go, &config)
}

#[test]
fn corner_suicide_is_rejected() {
    let mut game = nine_by_nine();
    assert!(game.make_move(0, 1)); // B
    assert!(game.make_move(5, 5)); // W elsewhere
    assert!(game.make_move(1, 0)); // B

    // White at (0,0) would have no liberties and captures nothing.
    let before = game.board().clone();
    assert!(!game.make_move(0, 0));
    assert_eq!(game.board(), &before);
    assert_eq!(game.current_color(), Color::White);
    assert!(!game.get_legal_moves().contains(&arena::Point::new(0, 0)));
}

#[test]
fn capture_is_not_suicide() {
    let mut game = nine_by_nine();
    // Black's corner stone at (0,0) ends with (0,1) as its last liberty.
    // White filling it has no liberties of its own until the capture
    // resolves, so the placement stands only because it captures.
    assert!(game.make_move(0, 0)); // B
    assert!(game.make_move(1, 0)); // W
    assert!(game.make_move(0, 2)); // B
    assert!(game.make_move(8, 8)); // W elsewhere
    assert!(game.make_move(1, 1)); // B

    assert!(game.make_move(0, 1)); // W captures (0,0)
    assert!(game.board().is_empty(0, 0));
    assert_eq!(game.board().get(0, 1), Color::White);
}

#[test]
fn ko_forbids_immediate_recapture_only() {
    let mut game = nine_by_nine();
    for (r, c) in [
        (1, 2), // B
        (2, 2), // W
        (3, 2), // B
        (1, 3), // W
        (2, 1), // B
        (3, 3), // W
        (5, 5), // B elsewhere
        (2, 4), // W
    ] {
        assert!(game.make_move(r, c), "setup move ({},{}) rejected", r, c);
    }
    // Black recaptures the lone white stone at (2,2).
    assert!(game.make_move(2, 3));
    assert!(game.board().is_empty(2, 2));

    // Immediate white recapture at the ko point is illegal.
    assert!(!game.make_move(2, 2));
    assert_eq!(game.current_color(), Color::White);

    // After a move elsewhere the ko point opens again.
    assert!(game.make_move(6, 6)); // W
    assert!(game.make_move(7, 7)); // B
    assert!(game.make_move(2, 2)); // W retakes
    assert!(game.board().is_empty(2, 3));
}

#[test]
fn two_passes_score_the_game() {
    let mut game = nine_by_nine();
    // Black stakes out a corner; the rest of the board is neutral.
    assert!(game.make_move(0, 0));
    assert!(game.pass()); // W
    assert!(game.make_move(0, 1)); // B
    assert!(game.pass()); // W (non-consecutive: Black moved in between)
    assert!(!game.is_over());

    assert!(game.pass()); // B
    assert!(game.pass()); // W, second in a row
    assert!(game.is_over());
    // Black territory is tiny; komi carries White.
    assert_eq!(game.status(), GameStatus::Win(Color::White));
    assert!(game.status_text().contains("wins"));
}

#[test]
fn pass_out_on_empty_board_is_a_white_win_by_komi() {
    let mut game = nine_by_nine();
    assert!(game.pass());
    assert!(game.pass());
    assert!(game.is_over());
    assert_eq!(game.winner(), Some(Color::White));
}

#[test]
fn undo_restores_captured_stones() {
    let mut game = nine_by_nine();
    assert!(game.make_move(0, 0)); // B
    assert!(game.make_move(0, 1)); // W
    assert!(game.make_move(1, 1)); // B
    assert!(game.pass()); // W
    assert!(game.make_move(0, 2)); // B captures (0,1)
    assert!(game.board().is_empty(0, 1));

    assert!(game.undo());
    assert_eq!(game.board().get(0, 1), Color::White);
    assert!(game.board().is_empty(0, 2));
    assert_eq!(game.current_color(), Color::Black);
}
