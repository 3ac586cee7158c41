//! Reversi scenarios through the public wrapper, plus a full-game property
//! check that recorded passes were genuinely forced.

use arena::config::EngineConfig;
use arena::game::{Game, GameStatus, GameType};
use arena::game_wrapper::GameWrapper;
use arena::games::reversi::ReversiState;
use arena::replay::board_at;
use arena::{Color, Point};
use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

fn new_game() -> GameWrapper {
    GameWrapper::new(GameType::Reversi, &EngineConfig::default())
}

#[test]
fn opening_moves_and_first_flip() {
    let mut game = new_game();
    let mut moves = game.get_legal_moves();
    moves.sort();
    assert_eq!(
        moves,
        vec![
            Point::new(2, 3),
            Point::new(3, 2),
            Point::new(4, 5),
            Point::new(5, 4),
        ]
    );

    assert!(game.make_move(2, 3));
    assert_eq!(game.board().get(2, 3), Color::Black);
    assert_eq!(game.board().get(3, 3), Color::Black);
    assert_eq!(game.current_color(), Color::White);
}

#[test]
fn flips_match_the_ray_rule_through_a_full_game() {
    let mut game = new_game();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(77);
    while !game.is_over() {
        let moves = game.get_legal_moves();
        assert!(!moves.is_empty(), "live game must offer a move");
        let p = moves[rng.random_range(0..moves.len())];

        // Predict the flips from the pre-move board, then apply.
        let predicted = ReversiState::flips_for(game.board(), game.current_color(), p.row, p.col);
        assert!(!predicted.is_empty());
        let mover = game.current_color();
        assert!(game.make_move(p.row, p.col));
        for f in &predicted {
            assert_eq!(game.board().get(f.row, f.col), mover);
        }
    }
    // Final status agrees with the count.
    let black = game.board().count(Color::Black);
    let white = game.board().count(Color::White);
    let expected = if black > white {
        GameStatus::Win(Color::Black)
    } else if white > black {
        GameStatus::Win(Color::White)
    } else {
        GameStatus::Draw
    };
    assert_eq!(game.status(), expected);
}

#[test]
fn recorded_passes_were_forced() {
    // Random full games; every recorded pass must come from a position
    // where the passer really had no legal placement.
    for seed in [1u64, 2, 3] {
        let mut game = new_game();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        while !game.is_over() {
            let moves = game.get_legal_moves();
            let p = moves[rng.random_range(0..moves.len())];
            assert!(game.make_move(p.row, p.col));
        }

        let recorder = game.recorder();
        for (i, mv) in recorder.moves().iter().enumerate() {
            if mv.is_pass() {
                let before = board_at(recorder, i);
                assert!(
                    !ReversiState::has_any_move(&before, mv.player),
                    "seed {}: pass at step {} was not forced",
                    seed,
                    i + 1
                );
            }
        }
    }
}

#[test]
fn manual_double_pass_ends_on_count() {
    let mut game = new_game();
    assert!(game.pass());
    assert!(game.pass());
    assert!(game.is_over());
    assert_eq!(game.status(), GameStatus::Draw);
    assert!(game.status_text().contains("Draw"));
}

#[test]
fn undo_unwinds_an_auto_pass() {
    // Drive a random game to completion, then unwind it move by move all
    // the way back to the opening, auto-passes included.
    let mut game = new_game();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(9);
    while !game.is_over() {
        let moves = game.get_legal_moves();
        let p = moves[rng.random_range(0..moves.len())];
        assert!(game.make_move(p.row, p.col));
    }
    let total = game.move_count();
    assert!(total > 0);
    for _ in 0..total {
        assert!(game.undo());
    }
    assert!(!game.undo());
    assert_eq!(game.move_count(), 0);
    assert_eq!(game.current_color(), Color::Black);
    assert_eq!(game.board().count(Color::Black), 2);
    assert_eq!(game.board().count(Color::White), 2);
    let mut reopened = game.get_legal_moves();
    reopened.sort();
    assert_eq!(
        reopened,
        vec![
            Point::new(2, 3),
            Point::new(3, 2),
            Point::new(4, 5),
            Point::new(5, 4),
        ]
    );
}
