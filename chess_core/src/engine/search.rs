use crate::engine::config::EngineConfig;
use crate::engine::eval::MaterialEvaluator;
use crate::engine::{Evaluator, Move, SearchStats, Searcher};
use crate::logic::board::{Board, Color};
use crate::logic::generator::{is_checkmate, MoveGenerator};
use std::sync::Arc;
use std::time::Instant;

const INF: i32 = i32::MAX;

/// Fixed-depth minimax with alpha-beta pruning.
///
/// White maximizes and Black minimizes, matching the evaluation sign. The
/// caller's board is never modified: the search clones it once and explores
/// on that scratch copy with apply/undo pairs.
pub struct AlphaBetaEngine {
    config: Arc<EngineConfig>,
    evaluator: MaterialEvaluator,
    generator: MoveGenerator,
    nodes_searched: u32,
}

impl AlphaBetaEngine {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            evaluator: MaterialEvaluator::new(config.clone()),
            config,
            generator: MoveGenerator::new(),
            nodes_searched: 0,
        }
    }

    pub fn update_config(&mut self, config: Arc<EngineConfig>) {
        self.evaluator = MaterialEvaluator::new(config.clone());
        self.config = config;
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Best move for `turn` searching `depth` plies, or `None` when `turn`
    /// has no legal move. A depth of 0 is searched as 1.
    pub fn best_move(&mut self, board: &Board, turn: Color, depth: u8) -> Option<Move> {
        self.search(board, turn, depth).map(|(mv, _)| mv)
    }

    fn minimax(
        &mut self,
        board: &mut Board,
        depth: u8,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes_searched += 1;

        if depth == 0 || is_checkmate(board, Color::White) || is_checkmate(board, Color::Black) {
            return self.evaluator.evaluate(board);
        }

        let turn = if maximizing { Color::White } else { Color::Black };
        let moves = self.generator.generate_moves(board, turn);
        if moves.is_empty() {
            return self.evaluator.evaluate(board);
        }

        if maximizing {
            let mut max_eval = -INF;
            for mv in moves {
                let captured = board.apply_move(&mv);
                let score = self.minimax(board, depth - 1, false, alpha, beta);
                board.undo_move(&mv, captured);

                max_eval = max_eval.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            max_eval
        } else {
            let mut min_eval = INF;
            for mv in moves {
                let captured = board.apply_move(&mv);
                let score = self.minimax(board, depth - 1, true, alpha, beta);
                board.undo_move(&mv, captured);

                min_eval = min_eval.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            min_eval
        }
    }
}

impl Searcher for AlphaBetaEngine {
    fn search(&mut self, board: &Board, turn: Color, depth: u8) -> Option<(Move, SearchStats)> {
        self.nodes_searched = 0;
        let start_time = Instant::now();
        let depth = depth.max(1);

        let moves = self.generator.generate_moves(board, turn);
        if moves.is_empty() {
            log::debug!("search: {turn:?} has no legal moves");
            return None;
        }

        let mut scratch = board.clone();
        let maximizing = turn == Color::White;
        let mut alpha = -INF;
        let mut beta = INF;
        let mut best: Option<(Move, i32)> = None;

        for mv in moves {
            let captured = scratch.apply_move(&mv);
            let score = self.minimax(&mut scratch, depth - 1, !maximizing, alpha, beta);
            scratch.undo_move(&mv, captured);
            log::trace!("search: root move {mv} scored {score}");

            // Strict comparison: the first move reaching the best score wins
            let improves = best.map_or(true, |(_, best_score)| {
                if maximizing {
                    score > best_score
                } else {
                    score < best_score
                }
            });
            if improves {
                best = Some((mv, score));
                if maximizing {
                    alpha = alpha.max(score);
                } else {
                    beta = beta.min(score);
                }
            }
        }

        #[allow(clippy::cast_possible_truncation)]
        let stats = SearchStats {
            depth,
            nodes: self.nodes_searched,
            time_ms: start_time.elapsed().as_millis() as u64,
        };

        best.map(|(mv, score)| {
            log::debug!(
                "search: {turn:?} depth={} nodes={} time={}ms best={mv} score={score}",
                stats.depth,
                stats.nodes,
                stats.time_ms
            );
            (mv, stats)
        })
    }
}
