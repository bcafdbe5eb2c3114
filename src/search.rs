//! Exhaustive minimax over the 3x3 game tree.
//!
//! X maximises the utility and O minimises it. Moves are tried in ascending
//! index order and only a strictly better score replaces the current best, so
//! the lowest-index optimal move always wins ties. A child that already reaches
//! the best possible utility for the side to move ends the loop early.

use std::time::Instant;

use crate::board::{Board, Move, Player};
use crate::rules::{apply_move, legal_moves, outcome, player_to_move, O_WINS, X_WINS};

/// Below every real utility.
pub const SENTINEL_MIN: i8 = -2;
/// Above every real utility.
pub const SENTINEL_MAX: i8 = 2;

pub type Scored = (i8, Option<Move>);

/// The optimal move for the player to move, `None` once the game is over.
pub fn best_move(board: Board) -> Option<Move> {
    let start = Instant::now();
    let (score, chosen) = evaluate(board);
    if let Some(mv) = chosen {
        log::debug!(
            "{} plays {mv} (score {score}) after {:?}",
            player_to_move(board),
            start.elapsed()
        );
    }
    chosen
}

pub fn evaluate(board: Board) -> Scored {
    match player_to_move(board) {
        Player::X => max_value(board),
        Player::O => min_value(board),
    }
}

pub fn max_value(board: Board) -> Scored {
    if let Some(utility) = outcome(board).utility() {
        return (utility, None);
    }

    let mut best: Scored = (SENTINEL_MIN, None);
    for mv in legal_moves(board) {
        let (score, _) = min_value(apply_move(board, mv));
        if score == X_WINS {
            return (score, Some(mv));
        }
        if score > best.0 {
            best = (score, Some(mv));
        }
    }
    best
}

pub fn min_value(board: Board) -> Scored {
    if let Some(utility) = outcome(board).utility() {
        return (utility, None);
    }

    let mut best: Scored = (SENTINEL_MAX, None);
    for mv in legal_moves(board) {
        let (score, _) = max_value(apply_move(board, mv));
        if score == O_WINS {
            return (score, Some(mv));
        }
        if score < best.0 {
            best = (score, Some(mv));
        }
    }
    best
}
