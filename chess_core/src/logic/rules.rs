use crate::logic::board::{Board, Color, Piece, PieceType};
use crate::logic::square::Square;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a move request was rejected. No rejection ever mutates game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveError {
    InvalidCoordinate,
    NoPieceAtOrigin,
    WrongSideToMove,
    OccupiedBySelf,
    IllegalPieceMovement,
    LeavesKingInCheck,
    GameOver,
    InvalidPosition,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::InvalidCoordinate => "invalid coordinate, expected a square like e4",
            Self::NoPieceAtOrigin => "there is no piece on the origin square",
            Self::WrongSideToMove => "that piece belongs to the side not on move",
            Self::OccupiedBySelf => "the destination holds a piece of the same color",
            Self::IllegalPieceMovement => "the piece cannot move that way",
            Self::LeavesKingInCheck => "the move would leave the king in check",
            Self::GameOver => "the game is already over",
            Self::InvalidPosition => {
                "each side needs exactly one king and the side not on move cannot be in check"
            }
        };
        f.write_str(msg)
    }
}

impl std::error::Error for MoveError {}

/// Checks if a move is valid, including piece rules and self-check prevention.
pub fn is_valid_move(board: &Board, from: Square, to: Square, turn: Color) -> Result<(), MoveError> {
    // 1. Piece rules (geometry, path blocking, occupancy)
    validate_piece_logic(board, from, to, turn)?;

    // 2. Simulate on a scratch board and reject self-check
    let mut next_board = board.clone();
    next_board.move_piece_quiet(from, to);

    if is_in_check(&next_board, turn) {
        return Err(MoveError::LeavesKingInCheck);
    }

    Ok(())
}

/// Checks that a position can be played from with `turn` to move: one king
/// per color, and the side that just moved is not left in check.
pub fn validate_position(board: &Board, turn: Color) -> Result<(), MoveError> {
    for color in [Color::White, Color::Black] {
        let king = Piece::new(PieceType::King, color);
        if board.pieces(color).filter(|&(_, piece)| piece == king).count() != 1 {
            return Err(MoveError::InvalidPosition);
        }
    }

    if is_in_check(board, turn.opposite()) {
        return Err(MoveError::InvalidPosition);
    }

    Ok(())
}

/// Checks if `color`'s king is attacked by any enemy piece.
///
/// Attack detection runs the piece rules only, never the self-check filter,
/// so it cannot recurse back into `is_valid_move`. A board without a king of
/// `color` is not in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    let Some(king_sq) = board.find_king(color) else {
        return false;
    };

    is_square_attacked(board, king_sq, color.opposite())
}

/// Whether any piece of `by` could move onto `target` under piece rules.
pub fn is_square_attacked(board: &Board, target: Square, by: Color) -> bool {
    board
        .pieces(by)
        .any(|(sq, _)| validate_piece_logic(board, sq, target, by).is_ok())
}

/// Validates the geometry and specific rules for a piece move, IGNORING self-check.
pub fn validate_piece_logic(
    board: &Board,
    from: Square,
    to: Square,
    turn: Color,
) -> Result<(), MoveError> {
    let piece = board.get_piece(from).ok_or(MoveError::NoPieceAtOrigin)?;

    if piece.color != turn {
        return Err(MoveError::WrongSideToMove);
    }

    if let Some(target) = board.get_piece(to) {
        if target.color == piece.color {
            return Err(MoveError::OccupiedBySelf);
        }
    }

    let legal = match piece.piece_type {
        PieceType::Pawn => pawn_rule(board, piece, from, to),
        PieceType::Knight => knight_rule(from, to),
        PieceType::Bishop => bishop_rule(board, from, to),
        PieceType::Rook => rook_rule(board, from, to),
        PieceType::Queen => rook_rule(board, from, to) || bishop_rule(board, from, to),
        PieceType::King => king_rule(from, to),
    };

    if legal {
        Ok(())
    } else {
        Err(MoveError::IllegalPieceMovement)
    }
}

fn pawn_rule(board: &Board, pawn: Piece, from: Square, to: Square) -> bool {
    let forward = pawn.color.forward();
    let Some(one_step) = from.offset(forward, 0) else {
        return false;
    };

    if from.col() == to.col() {
        if to == one_step {
            return board.get_piece(to).is_none();
        }
        let double_step = one_step.offset(forward, 0);
        return from.row() == pawn.color.pawn_start_row()
            && double_step == Some(to)
            && board.get_piece(one_step).is_none()
            && board.get_piece(to).is_none();
    }

    // Diagonal step forward, capture only. No en-passant.
    to.row() == one_step.row()
        && to.col().abs_diff(from.col()) == 1
        && board.get_piece(to).is_some()
}

fn knight_rule(from: Square, to: Square) -> bool {
    let d_row = to.row().abs_diff(from.row());
    let d_col = to.col().abs_diff(from.col());
    (d_row == 2 && d_col == 1) || (d_row == 1 && d_col == 2)
}

fn bishop_rule(board: &Board, from: Square, to: Square) -> bool {
    let d_row = to.row().abs_diff(from.row());
    let d_col = to.col().abs_diff(from.col());
    d_row == d_col && d_row != 0 && is_path_clear(board, from, to)
}

fn rook_rule(board: &Board, from: Square, to: Square) -> bool {
    (from.row() == to.row()) != (from.col() == to.col()) && is_path_clear(board, from, to)
}

fn king_rule(from: Square, to: Square) -> bool {
    let d_row = to.row().abs_diff(from.row());
    let d_col = to.col().abs_diff(from.col());
    d_row <= 1 && d_col <= 1 && from != to
}

/// True when every square strictly between `from` and `to` is empty.
/// Only meaningful for squares sharing a row, column or diagonal.
fn is_path_clear(board: &Board, from: Square, to: Square) -> bool {
    let step_row = step_towards(from.row(), to.row());
    let step_col = step_towards(from.col(), to.col());

    let mut current = from.offset(step_row, step_col);
    while let Some(sq) = current {
        if sq == to {
            return true;
        }
        if board.get_piece(sq).is_some() {
            return false;
        }
        current = sq.offset(step_row, step_col);
    }
    false
}

const fn step_towards(from: usize, to: usize) -> isize {
    if to > from {
        1
    } else if to < from {
        -1
    } else {
        0
    }
}
