use crate::engine::config::EngineConfig;
use crate::engine::search::AlphaBetaEngine;
use crate::engine::Move;
use crate::logic::board::Color;
use crate::logic::game::GameState;
use crate::logic::rules::MoveError;
use crate::logic::square::Square;
use std::sync::Arc;

/// A game plus the engine that plays the automated side.
///
/// This is the whole surface a front end needs: submit a human move, ask the
/// engine for a move, read the state back for rendering.
pub struct ChessSession {
    state: GameState,
    engine: AlphaBetaEngine,
}

impl Default for ChessSession {
    fn default() -> Self {
        Self::new(Arc::new(EngineConfig::default()))
    }
}

impl ChessSession {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            state: GameState::new(),
            engine: AlphaBetaEngine::new(config),
        }
    }

    /// Starts over from the initial position, keeping the engine.
    pub fn new_game(&mut self) {
        self.state = GameState::new();
        log::info!("new game started");
    }

    /// Replaces the game, e.g. to resume from a saved snapshot. The
    /// position is checked and the status recomputed before it is accepted;
    /// on error the current game is kept.
    pub fn load_state(&mut self, mut state: GameState) -> Result<(), MoveError> {
        state.revalidate()?;
        self.state = state;
        Ok(())
    }

    pub fn update_config(&mut self, config: Arc<EngineConfig>) {
        self.engine.update_config(config);
    }

    #[must_use]
    pub const fn current_state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        self.state.legal_moves()
    }

    /// Validates and applies a move for the side to move, returning the new state.
    pub fn submit_move(&mut self, from: Square, to: Square) -> Result<GameState, MoveError> {
        self.state.make_move(from, to)?;
        Ok(self.state.clone())
    }

    /// `submit_move` taking algebraic squares such as `"e2"`, `"e4"`.
    pub fn submit_algebraic(&mut self, from: &str, to: &str) -> Result<GameState, MoveError> {
        let from = Square::parse(from)?;
        let to = Square::parse(to)?;
        self.submit_move(from, to)
    }

    /// The engine's choice for `color` on the current board. Does not play it.
    /// `None` when the game is over or `color` has no legal move.
    ///
    /// Depth is in plies and capped at `u8::MAX`; anything past a handful of
    /// plies is impractical for this search anyway.
    pub fn request_engine_move(&mut self, color: Color, depth: u8) -> Option<Move> {
        if self.state.is_over() {
            return None;
        }
        self.engine.best_move(&self.state.board, color, depth)
    }

    /// Lets the engine play the side to move at `depth`, or at the configured
    /// default depth when `None`. If the engine finds no move that side resigns.
    pub fn play_engine_turn(&mut self, depth: Option<u8>) -> Result<Option<Move>, MoveError> {
        if self.state.is_over() {
            return Err(MoveError::GameOver);
        }

        let turn = self.state.turn;
        let depth = depth.unwrap_or(self.engine.config().default_depth);

        match self.request_engine_move(turn, depth) {
            Some(mv) => {
                self.state.make_move(mv.from, mv.to)?;
                log::debug!("engine played {mv} for {turn:?}");
                Ok(Some(mv))
            }
            None => {
                self.state.resign(turn)?;
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::{Board, PieceType};
    use crate::logic::game::GameStatus;

    #[test]
    fn test_submit_algebraic() {
        let mut session = ChessSession::default();
        let state = session.submit_algebraic("e2", "e4").unwrap();
        assert_eq!(state.turn, Color::Black);
        assert_eq!(&state, session.current_state());

        assert_eq!(
            session.submit_algebraic("e9", "e5"),
            Err(MoveError::InvalidCoordinate)
        );
        assert_eq!(
            session.submit_algebraic("e7", "e4"),
            Err(MoveError::IllegalPieceMovement)
        );
        assert_eq!(session.current_state().history.len(), 1);
    }

    #[test]
    fn test_engine_reply() {
        let mut session = ChessSession::default();
        session.submit_algebraic("e2", "e4").unwrap();

        let mv = session.play_engine_turn(Some(2)).unwrap();
        assert!(mv.is_some());
        assert_eq!(session.current_state().turn, Color::White);
        assert_eq!(session.current_state().history.len(), 2);
    }

    #[test]
    fn test_request_does_not_play() {
        let mut session = ChessSession::default();
        let before = session.current_state().clone();
        let mv = session.request_engine_move(Color::White, 1);
        assert!(mv.is_some());
        assert_eq!(session.current_state(), &before);
    }

    fn stalemated_white() -> GameState {
        // Lone white king on a1, every flight square covered by the queen
        let mut board = Board::empty();
        let sq = |s: &str| Square::parse(s).unwrap();
        board.add_piece(sq("a1"), PieceType::King, Color::White);
        board.add_piece(sq("c2"), PieceType::Queen, Color::Black);
        board.add_piece(sq("h8"), PieceType::King, Color::Black);
        GameState::from_position(board, Color::White).unwrap()
    }

    #[test]
    fn test_engine_without_moves_resigns() {
        let mut session = ChessSession::default();
        session.load_state(stalemated_white()).unwrap();
        // Reopen the game by hand so the engine is asked to move
        session.state.status = GameStatus::Playing;

        assert_eq!(session.request_engine_move(Color::White, 3), None);
        assert_eq!(session.play_engine_turn(None), Ok(None));
        assert_eq!(
            session.current_state().status,
            GameStatus::Resigned(Color::Black)
        );
        assert_eq!(session.play_engine_turn(None), Err(MoveError::GameOver));
    }

    #[test]
    fn test_no_engine_move_after_game_over() {
        let mut session = ChessSession::default();
        session.load_state(stalemated_white()).unwrap();
        assert_eq!(
            session.current_state().status,
            GameStatus::Resigned(Color::Black)
        );
        assert_eq!(session.request_engine_move(Color::Black, 2), None);

        let mut session = ChessSession::default();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            session.submit_algebraic(from, to).unwrap();
        }
        assert!(session.current_state().is_over());
        assert_eq!(session.request_engine_move(Color::White, 1), None);
        assert_eq!(session.request_engine_move(Color::Black, 1), None);
    }

    #[test]
    fn test_load_state_checks_position() {
        let mut session = ChessSession::default();
        session.submit_algebraic("e2", "e4").unwrap();
        let before = session.current_state().clone();

        let mut kingless = GameState::new();
        kingless.board.set_piece(Square::parse("e1").unwrap(), None);
        assert_eq!(
            session.load_state(kingless),
            Err(MoveError::InvalidPosition)
        );

        // Black in check with White to move
        let mut board = Board::empty();
        board.add_piece(Square::parse("e1").unwrap(), PieceType::King, Color::White);
        board.add_piece(Square::parse("e4").unwrap(), PieceType::Rook, Color::White);
        board.add_piece(Square::parse("e8").unwrap(), PieceType::King, Color::Black);
        let capturable = GameState {
            board,
            ..GameState::new()
        };
        assert_eq!(
            session.load_state(capturable),
            Err(MoveError::InvalidPosition)
        );
        assert_eq!(session.current_state(), &before);

        // A stale status is recomputed from the board
        let mut mated = GameState::new();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            mated.make_move(Square::parse(from).unwrap(), Square::parse(to).unwrap()).unwrap();
        }
        mated.status = GameStatus::Playing;
        session.load_state(mated).unwrap();
        assert_eq!(
            session.current_state().status,
            GameStatus::Checkmate(Color::Black)
        );
    }

    #[test]
    fn test_new_game_resets() {
        let mut session = ChessSession::default();
        session.submit_algebraic("d2", "d4").unwrap();
        session.new_game();
        assert_eq!(session.current_state(), &GameState::new());
    }
}
