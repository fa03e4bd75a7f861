use crate::engine::Move;
use crate::logic::square::Square;
use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Row delta of a forward pawn step. White advances towards row 0.
    pub const fn forward(self) -> isize {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    /// Row holding this color's pawns in the initial position.
    pub const fn pawn_start_row(self) -> usize {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    #[must_use]
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Self { piece_type, color }
    }
}

/// Mailbox board: one optional piece per square, indexed by `Square::index`.
///
/// The board is plain data. Legality lives in `logic::rules`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(with = "BigArray")]
    pub grid: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Standard initial position.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_initial_position();
        board
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self { grid: [None; 64] }
    }

    fn setup_initial_position(&mut self) {
        // Black on rows 0-1 (ranks 8-7), White on rows 6-7 (ranks 2-1)
        self.setup_pieces(Color::Black, 0);
        self.setup_pieces(Color::White, 7);
    }

    fn setup_pieces(&mut self, color: Color, back_row: usize) {
        let pieces = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        for (col, &pt) in pieces.iter().enumerate() {
            if let Some(sq) = Square::new(back_row, col) {
                self.add_piece(sq, pt, color);
            }
        }

        for col in 0..Square::SIZE {
            if let Some(sq) = Square::new(color.pawn_start_row(), col) {
                self.add_piece(sq, PieceType::Pawn, color);
            }
        }
    }

    #[must_use]
    pub const fn get_piece(&self, sq: Square) -> Option<Piece> {
        self.grid[sq.index()]
    }

    pub fn set_piece(&mut self, sq: Square, piece: Option<Piece>) {
        self.grid[sq.index()] = piece;
    }

    pub fn add_piece(&mut self, sq: Square, piece_type: PieceType, color: Color) {
        self.set_piece(sq, Some(Piece::new(piece_type, color)));
    }

    pub fn clear(&mut self) {
        self.grid = [None; 64];
    }

    /// Moves whatever stands on `from` to `to` without any rule checks.
    /// Returns the piece that was on `to`, to be handed back to
    /// `undo_move_quiet`.
    pub fn move_piece_quiet(&mut self, from: Square, to: Square) -> Option<Piece> {
        let piece = self.grid[from.index()].take();
        let captured = self.grid[to.index()];
        self.grid[to.index()] = piece;
        captured
    }

    /// Exact inverse of `move_piece_quiet`.
    pub fn undo_move_quiet(&mut self, from: Square, to: Square, captured: Option<Piece>) {
        let piece = self.grid[to.index()];
        self.grid[from.index()] = piece;
        self.grid[to.index()] = captured;
    }

    pub fn apply_move(&mut self, mv: &Move) -> Option<Piece> {
        self.move_piece_quiet(mv.from, mv.to)
    }

    pub fn undo_move(&mut self, mv: &Move, captured: Option<Piece>) {
        self.undo_move_quiet(mv.from, mv.to, captured);
    }

    /// First king of `color` in row-major order.
    #[must_use]
    pub fn find_king(&self, color: Color) -> Option<Square> {
        let king = Piece::new(PieceType::King, color);
        self.pieces(color)
            .find(|&(_, piece)| piece == king)
            .map(|(sq, _)| sq)
    }

    /// Squares and pieces of `color`, row-major.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, piece)| piece.color == color)
    }

    /// Every occupied square, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.get_piece(sq).map(|piece| (sq, piece)))
    }
}
