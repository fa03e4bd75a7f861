use crate::engine::Move;
use crate::logic::board::{Board, Color};
use crate::logic::rules::{is_in_check, validate_piece_logic};
use crate::logic::square::Square;

/// Enumerates legal moves by filtering every (origin, destination) pair
/// through the piece rules and then the self-check rule.
///
/// Output order is fixed: origins in row-major order (a8 first), and for each
/// origin the destinations in row-major order. Search tie-breaking depends
/// on it.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    pub fn generate_moves(&self, board: &Board, turn: Color) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        let mut scratch = board.clone();

        for (from, _) in board.pieces(turn) {
            self.generate_piece_moves(board, &mut scratch, from, turn, &mut moves);
        }

        moves
    }

    /// Checks if the player has at least one legal move.
    /// Returns as soon as one is found.
    pub fn has_legal_moves(&self, board: &Board, turn: Color) -> bool {
        let mut scratch = board.clone();
        board.pieces(turn).any(|(from, _)| {
            Self::candidate_destinations(board, from, turn)
                .into_iter()
                .any(|to| Self::keeps_king_safe(&mut scratch, from, to, turn))
        })
    }

    fn generate_piece_moves(
        &self,
        board: &Board,
        scratch: &mut Board,
        from: Square,
        turn: Color,
        moves: &mut Vec<Move>,
    ) {
        for to in Self::candidate_destinations(board, from, turn) {
            if Self::keeps_king_safe(scratch, from, to, turn) {
                moves.push(Move::new(from, to));
            }
        }
    }

    /// Destinations allowed by the piece rules alone, before the self-check filter.
    fn candidate_destinations(board: &Board, from: Square, turn: Color) -> Vec<Square> {
        Square::all()
            .filter(|&to| validate_piece_logic(board, from, to, turn).is_ok())
            .collect()
    }

    /// Plays the move on `scratch`, tests for self-check, and takes it back.
    fn keeps_king_safe(scratch: &mut Board, from: Square, to: Square, turn: Color) -> bool {
        let captured = scratch.move_piece_quiet(from, to);
        let safe = !is_in_check(scratch, turn);
        scratch.undo_move_quiet(from, to, captured);
        safe
    }
}

/// Legal moves for `color`, in generator order.
pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    MoveGenerator::new().generate_moves(board, color)
}

/// `color` is checkmated iff its king is in check and it has no legal move.
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    is_in_check(board, color) && !MoveGenerator::new().has_legal_moves(board, color)
}

/// No legal move while not in check. The game treats it as a resignation.
pub fn is_stalemate(board: &Board, color: Color) -> bool {
    !is_in_check(board, color) && !MoveGenerator::new().has_legal_moves(board, color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::PieceType;
    use crate::logic::rules::is_valid_move;

    fn sq(text: &str) -> Square {
        Square::parse(text).unwrap()
    }

    #[test]
    fn test_initial_position_has_twenty_moves() {
        let board = Board::new();
        assert_eq!(legal_moves(&board, Color::White).len(), 20);
        assert_eq!(legal_moves(&board, Color::Black).len(), 20);
    }

    #[test]
    fn test_generator_matches_full_validator() {
        let mut board = Board::new();
        board.move_piece_quiet(sq("e2"), sq("e4"));
        board.move_piece_quiet(sq("d7"), sq("d5"));
        board.move_piece_quiet(sq("f8"), sq("b4"));

        for color in [Color::White, Color::Black] {
            let mut expected = Vec::new();
            for from in Square::all() {
                for to in Square::all() {
                    if is_valid_move(&board, from, to, color).is_ok() {
                        expected.push(Move::new(from, to));
                    }
                }
            }
            assert_eq!(legal_moves(&board, color), expected);
        }
    }

    #[test]
    fn test_generation_order_is_row_major() {
        let board = Board::new();
        let moves = legal_moves(&board, Color::White);
        // First white piece in row-major order is the a2 pawn
        // Destinations are row-major too, so a4 (row 4) precedes a3 (row 5)
        assert_eq!(moves[0], Move::new(sq("a2"), sq("a4")));
        assert_eq!(moves[1], Move::new(sq("a2"), sq("a3")));
        assert_eq!(moves[19], Move::new(sq("g1"), sq("h3")));
    }

    #[test]
    fn test_generation_leaves_board_untouched() {
        let board = Board::new();
        let before = board.clone();
        let _ = legal_moves(&board, Color::White);
        let _ = MoveGenerator::new().has_legal_moves(&board, Color::Black);
        assert_eq!(board, before);
    }

    #[test]
    fn test_back_rank_checkmate() {
        let mut board = Board::empty();
        board.add_piece(sq("h8"), PieceType::King, Color::Black);
        board.add_piece(sq("g7"), PieceType::Pawn, Color::Black);
        board.add_piece(sq("h7"), PieceType::Pawn, Color::Black);
        board.add_piece(sq("a8"), PieceType::Rook, Color::White);
        board.add_piece(sq("g1"), PieceType::King, Color::White);

        assert!(is_in_check(&board, Color::Black));
        assert!(legal_moves(&board, Color::Black).is_empty());
        assert!(is_checkmate(&board, Color::Black));
        assert!(!is_checkmate(&board, Color::White));
        assert!(!is_stalemate(&board, Color::Black));
    }

    #[test]
    fn test_check_with_escape_is_not_mate() {
        let mut board = Board::empty();
        board.add_piece(sq("h8"), PieceType::King, Color::Black);
        board.add_piece(sq("g7"), PieceType::Pawn, Color::Black);
        board.add_piece(sq("a8"), PieceType::Rook, Color::White);
        board.add_piece(sq("g1"), PieceType::King, Color::White);

        assert!(is_in_check(&board, Color::Black));
        assert_eq!(
            legal_moves(&board, Color::Black),
            vec![Move::new(sq("h8"), sq("h7"))]
        );
        assert!(!is_checkmate(&board, Color::Black));
    }

    #[test]
    fn test_stalemate_is_not_checkmate() {
        let mut board = Board::empty();
        board.add_piece(sq("h8"), PieceType::King, Color::Black);
        board.add_piece(sq("f7"), PieceType::Queen, Color::White);
        board.add_piece(sq("g6"), PieceType::King, Color::White);

        assert!(!is_in_check(&board, Color::Black));
        assert!(legal_moves(&board, Color::Black).is_empty());
        assert!(!is_checkmate(&board, Color::Black));
        assert!(is_stalemate(&board, Color::Black));
    }
}
