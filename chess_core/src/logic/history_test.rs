use crate::logic::board::{Color, Piece, PieceType};
use crate::logic::game::{GameState, GameStatus};
use crate::logic::square::Square;

fn sq(text: &str) -> Square {
    Square::parse(text).unwrap()
}

#[test]
fn test_undo_move() {
    let mut game = GameState::new();
    let initial = game.clone();

    game.make_move(sq("e2"), sq("e4")).unwrap();
    assert_eq!(game.history.len(), 1);
    assert_eq!(game.turn, Color::Black);

    assert!(game.undo_move());
    assert_eq!(game, initial);

    // Nothing left to undo
    assert!(!game.undo_move());
}

#[test]
fn test_undo_capture() {
    let mut game = GameState::new();

    // 1. e4 d5 2. exd5
    game.make_move(sq("e2"), sq("e4")).unwrap();
    game.make_move(sq("d7"), sq("d5")).unwrap();
    game.make_move(sq("e4"), sq("d5")).unwrap();

    let last_record = game.history.last().unwrap();
    assert_eq!(
        last_record.captured,
        Some(Piece::new(PieceType::Pawn, Color::Black))
    );
    assert_eq!(last_record.piece, Piece::new(PieceType::Pawn, Color::White));
    assert_eq!(last_record.color, Color::White);

    assert!(game.undo_move());
    assert_eq!(game.history.len(), 2);
    assert_eq!(game.turn, Color::White);
    assert_eq!(game.last_move, Some((sq("d7"), sq("d5"))));
    assert_eq!(
        game.board.get_piece(sq("e4")),
        Some(Piece::new(PieceType::Pawn, Color::White))
    );
    assert_eq!(
        game.board.get_piece(sq("d5")),
        Some(Piece::new(PieceType::Pawn, Color::Black))
    );
}

#[test]
fn test_undo_reopens_finished_game() {
    let mut game = GameState::new();
    // Fool's mate
    for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
        game.make_move(sq(from), sq(to)).unwrap();
    }
    assert_eq!(game.status, GameStatus::Checkmate(Color::Black));

    assert!(game.undo_move());
    assert_eq!(game.status, GameStatus::Playing);
    assert_eq!(game.turn, Color::Black);
    assert!(game.make_move(sq("d8"), sq("g5")).is_ok());
}
