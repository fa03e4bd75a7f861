use crate::engine::Move;
use crate::logic::board::{Board, Color, Piece};
use crate::logic::generator::{legal_moves, MoveGenerator};
use crate::logic::rules::{is_in_check, is_valid_move, validate_position, MoveError};
use crate::logic::square::Square;
use serde::{Deserialize, Serialize};

/// Outcome of a game. Terminal variants carry the winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Checkmate(Color),
    // Also covers a side left without legal moves while not in check
    Resigned(Color),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub turn: Color,
    pub status: GameStatus,
    pub last_move: Option<(Square, Square)>,
    pub history: Vec<MoveRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Color::White,
            status: GameStatus::Playing,
            last_move: None,
            history: Vec::new(),
        }
    }

    /// Starts from an arbitrary position. The status is evaluated at once,
    /// so a position where `turn` is already mated starts finished.
    ///
    /// Fails with `InvalidPosition` unless each side has exactly one king and
    /// the side not on move is out of check.
    pub fn from_position(board: Board, turn: Color) -> Result<Self, MoveError> {
        validate_position(&board, turn)?;
        let mut game = Self {
            board,
            turn,
            ..Self::new()
        };
        game.update_status();
        Ok(game)
    }

    /// Re-checks a state that came from outside (e.g. a deserialized
    /// snapshot) and recomputes its status from the board. A resignation is
    /// kept since the board alone cannot show it.
    pub fn revalidate(&mut self) -> Result<(), MoveError> {
        validate_position(&self.board, self.turn)?;
        if !matches!(self.status, GameStatus::Resigned(_)) {
            self.status = GameStatus::Playing;
            self.update_status();
        }
        Ok(())
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Playing
    }

    /// Validates and applies a move for the side to move. On error nothing changes.
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<(), MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }

        is_valid_move(&self.board, from, to, self.turn)?;

        let piece = self
            .board
            .get_piece(from)
            .ok_or(MoveError::NoPieceAtOrigin)?;
        let captured = self.board.move_piece_quiet(from, to);

        self.history.push(MoveRecord {
            from,
            to,
            piece,
            captured,
            color: self.turn,
        });
        log::debug!("{:?} played {from}{to}", self.turn);

        self.turn = self.turn.opposite();
        self.last_move = Some((from, to));

        self.update_status();

        Ok(())
    }

    /// Ends the game with `color` conceding.
    pub fn resign(&mut self, color: Color) -> Result<(), MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        self.status = GameStatus::Resigned(color.opposite());
        log::info!("{color:?} resigned");
        Ok(())
    }

    fn update_status(&mut self) {
        let current_turn = self.turn;

        if MoveGenerator::new().has_legal_moves(&self.board, current_turn) {
            return;
        }

        let winner = current_turn.opposite();
        if is_in_check(&self.board, current_turn) {
            self.status = GameStatus::Checkmate(winner);
            log::info!("checkmate, {winner:?} wins");
        } else {
            // No moves and no check: the side to move resigns
            self.status = GameStatus::Resigned(winner);
            log::info!("{current_turn:?} has no legal moves and resigns");
        }
    }

    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_over() {
            return Vec::new();
        }
        legal_moves(&self.board, self.turn)
    }

    #[must_use]
    pub fn is_in_check(&self) -> bool {
        is_in_check(&self.board, self.turn)
    }

    /// Takes back the last move. Returns `false` if there is none.
    ///
    /// A resignation made while moves were still available is taken back on
    /// its own, leaving the board as it is.
    pub fn undo_move(&mut self) -> bool {
        if matches!(self.status, GameStatus::Resigned(_))
            && MoveGenerator::new().has_legal_moves(&self.board, self.turn)
        {
            self.status = GameStatus::Playing;
            return true;
        }

        let Some(record) = self.history.pop() else {
            return false;
        };

        self.board
            .undo_move_quiet(record.from, record.to, record.captured);
        self.turn = record.color;

        // Restore last_move from the previous record in history, if any
        self.last_move = self.history.last().map(|prev| (prev.from, prev.to));

        // Undoing always reopens the game, even after checkmate
        self.status = GameStatus::Playing;

        true
    }
}
