use thiserror::Error;

use crate::board::Player;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    #[error("it is not {0}'s turn")]
    NotYourTurn(Player),

    #[error("the game is already over")]
    GameOver,

    #[error("cannot change sides while a game is in progress")]
    GameInProgress,

    #[error("search worker failed: {0}")]
    Worker(String),

    #[error("invalid config: {0}")]
    Config(#[from] ron::error::SpannedError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
