use crate::engine::config::EngineConfig;
use crate::engine::Evaluator;
use crate::logic::board::{Board, Color};
use std::sync::Arc;

/// Material count, signed positive for White. No positional terms.
/// The sum saturates, so extreme configured values cannot overflow.
pub struct MaterialEvaluator {
    config: Arc<EngineConfig>,
}

impl MaterialEvaluator {
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }
}

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        board
            .occupied()
            .map(|(_, piece)| {
                let val = self.config.piece_value(piece.piece_type);
                match piece.color {
                    Color::White => val,
                    Color::Black => -val,
                }
            })
            .fold(0, i32::saturating_add)
    }
}
