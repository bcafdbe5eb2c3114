//! The live game owned by the front-end.
//!
//! A [`Session`] sequences human and computer turns over the pure rules, keeps
//! the running score and tags every search it hands out with a generation so
//! that answers computed for an abandoned game are dropped on arrival.

use std::fmt::Display;

use crate::board::{Board, Move, Player};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::rules::{apply_move, initial_board, is_occupied, outcome, player_to_move, Outcome};
use crate::worker::{SearchReply, SearchRequest};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum GameResult {
    HumanWin,
    ComputerWin,
    Draw,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Turn {
    /// The target cell was already taken; nothing changed.
    Ignored,
    /// The search answered a game that has since moved on.
    Stale,
    Continue,
    Concluded(GameResult),
}

/// Points counted in halves so a draw can award half a point to each side.
#[derive(Debug, Default, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct Points(u32);

impl Points {
    pub fn halves(self) -> u32 {
        self.0
    }
}

impl Display for Points {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{}.5", self.0 / 2)
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct Scoreboard {
    pub human: Points,
    pub computer: Points,
}

impl Scoreboard {
    fn record(&mut self, result: GameResult) {
        match result {
            GameResult::HumanWin => self.human.0 += 2,
            GameResult::ComputerWin => self.computer.0 += 2,
            GameResult::Draw => {
                self.human.0 += 1;
                self.computer.0 += 1;
            }
        }
    }
}

#[derive(Debug)]
pub struct Session {
    board: Board,
    human: Player,
    score: Scoreboard,
    generation: u64,
}

impl Session {
    pub fn new(human: Player) -> Self {
        Self {
            board: initial_board(),
            human,
            score: Scoreboard::default(),
            generation: 0,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.human)
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn human(&self) -> Player {
        self.human
    }

    pub fn computer(&self) -> Player {
        !self.human
    }

    pub fn score(&self) -> Scoreboard {
        self.score
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn outcome(&self) -> Outcome {
        outcome(self.board)
    }

    /// Picks the human's symbol. Only possible before the first move of a game.
    pub fn assign_human(&mut self, human: Player) -> Result<()> {
        if self.board.mark_count() != 0 {
            return Err(Error::GameInProgress);
        }
        self.human = human;
        Ok(())
    }

    /// Starts a fresh game. Any search still running for the old one becomes stale.
    pub fn reset(&mut self) {
        self.board = initial_board();
        self.generation += 1;
        log::debug!("starting game generation {}", self.generation);
    }

    pub fn is_human_turn(&self) -> bool {
        !self.outcome().is_terminal() && player_to_move(self.board) == self.human
    }

    pub fn is_computer_turn(&self) -> bool {
        !self.outcome().is_terminal() && player_to_move(self.board) == self.computer()
    }

    pub fn play_human(&mut self, mv: Move) -> Result<Turn> {
        if self.outcome().is_terminal() {
            return Err(Error::GameOver);
        }
        if !self.is_human_turn() {
            return Err(Error::NotYourTurn(self.human));
        }
        if is_occupied(self.board, mv) {
            return Ok(Turn::Ignored);
        }
        Ok(self.advance(mv))
    }

    /// Snapshot for the search, present only while the computer is to move.
    pub fn search_request(&self) -> Option<SearchRequest> {
        self.is_computer_turn().then_some(SearchRequest {
            generation: self.generation,
            board: self.board,
        })
    }

    pub fn apply_computer_move(&mut self, reply: SearchReply) -> Result<Turn> {
        if reply.generation != self.generation || reply.board != self.board {
            log::debug!(
                "discarding search reply for generation {} (live generation {})",
                reply.generation,
                self.generation
            );
            return Ok(Turn::Stale);
        }
        if !self.is_computer_turn() {
            return Err(Error::NotYourTurn(self.computer()));
        }
        let Some(mv) = reply.chosen else {
            return Err(Error::PreconditionViolation(
                "search returned no move for a game in progress".to_string(),
            ));
        };
        if is_occupied(self.board, mv) {
            return Ok(Turn::Ignored);
        }
        Ok(self.advance(mv))
    }

    fn advance(&mut self, mv: Move) -> Turn {
        self.board = apply_move(self.board, mv);
        match self.outcome() {
            Outcome::InProgress => Turn::Continue,
            Outcome::Win(player) => self.conclude(if player == self.human {
                GameResult::HumanWin
            } else {
                GameResult::ComputerWin
            }),
            Outcome::Draw => self.conclude(GameResult::Draw),
        }
    }

    fn conclude(&mut self, result: GameResult) -> Turn {
        self.score.record(result);
        log::info!(
            "game over: {result:?}, score human {} computer {}",
            self.score.human,
            self.score.computer
        );
        Turn::Concluded(result)
    }
}
