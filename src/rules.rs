//! Pure game rules over [`Board`] values.
//!
//! Nothing here holds state: every function takes a board snapshot and returns a
//! fresh answer, so the turn, the winner and the outcome are always recomputed
//! from the cells themselves.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Move, Player, WIN_PATTERNS};
use crate::error::{Error, Result};

pub const X_WINS: i8 = 1;
pub const O_WINS: i8 = -1;
pub const DRAW: i8 = 0;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Win(Player),
    Draw,
}

impl Outcome {
    /// Score from X's point of view, `None` while the game is still running.
    pub fn utility(self) -> Option<i8> {
        match self {
            Outcome::InProgress => None,
            Outcome::Win(Player::X) => Some(X_WINS),
            Outcome::Win(Player::O) => Some(O_WINS),
            Outcome::Draw => Some(DRAW),
        }
    }

    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }
}

pub fn initial_board() -> Board {
    Board::default()
}

/// X owns the turn whenever an odd number of cells is empty.
pub fn player_to_move(board: Board) -> Player {
    if board.empty_count() % 2 == 1 {
        Player::X
    } else {
        Player::O
    }
}

pub fn is_occupied(board: Board, mv: Move) -> bool {
    board[mv].is_some()
}

/// Empty cells in ascending index order.
pub fn legal_moves(board: Board) -> Vec<Move> {
    Move::ALL
        .into_iter()
        .filter(|&mv| !is_occupied(board, mv))
        .collect()
}

/// Marks `mv` for the player to move. An occupied target leaves the board untouched.
pub fn apply_move(board: Board, mv: Move) -> Board {
    if is_occupied(board, mv) {
        log::trace!("ignoring move {mv} onto occupied cell");
        return board;
    }

    let mut next = board;
    next.mark(mv, player_to_move(board));
    next
}

pub fn winner(board: Board) -> Option<Player> {
    [Player::X, Player::O]
        .into_iter()
        .find(|&player| has_line(board, player))
}

fn has_line(board: Board, player: Player) -> bool {
    WIN_PATTERNS
        .iter()
        .any(|pattern| pattern.iter().all(|&mv| board[mv] == Some(player)))
}

pub fn outcome(board: Board) -> Outcome {
    if let Some(player) = winner(board) {
        Outcome::Win(player)
    } else if board.empty_count() == 0 {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

pub fn is_terminal(board: Board) -> bool {
    outcome(board).is_terminal()
}

/// Only defined once the game is over.
pub fn utility(board: Board) -> Result<i8> {
    outcome(board).utility().ok_or_else(|| {
        Error::PreconditionViolation(format!("utility of a game still in progress:\n{board}"))
    })
}
