pub mod board;
pub mod config;
pub mod error;
pub mod rules;
pub mod search;
pub mod session;
pub mod term;
pub mod worker;

pub use board::{Board, Cell, Move, Player, WIN_PATTERNS};
pub use config::Config;
pub use error::{Error, Result};
pub use rules::{
    apply_move, initial_board, is_terminal, legal_moves, outcome, player_to_move, utility, winner,
    Outcome,
};
pub use search::{best_move, max_value, min_value};
pub use session::{GameResult, Session, Turn};
pub use worker::{SearchReply, SearchRequest, SearchWorker};
