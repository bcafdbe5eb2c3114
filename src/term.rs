use std::io::{self, Write};

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::board::{Move, Player};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::session::{GameResult, Session, Turn};
use crate::worker::SearchWorker;

type Input = Lines<BufReader<Stdin>>;

/// Plays human-vs-computer games on stdin/stdout until the user quits or closes input.
pub async fn play(config: Config) -> Result<()> {
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let worker = SearchWorker::spawn(config.min_thinking_time());
    let mut session = Session::from_config(&config);

    loop {
        let Some(human) = prompt_side(&mut input, session.human()).await? else {
            break;
        };
        session.assign_human(human)?;
        println!("You play {}, the computer plays {}.", human, session.computer());

        let Some(result) = play_game(&mut input, &worker, &mut session).await? else {
            break;
        };

        println!("\n{}\n", session.board());
        match result {
            GameResult::HumanWin => println!("You won! Congratulations!"),
            GameResult::ComputerWin => println!("You lost. Better luck next time!"),
            GameResult::Draw => println!("It's a draw. You're both equally strong."),
        }
        let score = session.score();
        println!("Score: you {}, computer {}", score.human, score.computer);

        if !prompt_rematch(&mut input).await? {
            break;
        }
        session.reset();
    }

    worker.shutdown().await
}

async fn play_game(
    input: &mut Input,
    worker: &SearchWorker,
    session: &mut Session,
) -> Result<Option<GameResult>> {
    loop {
        let turn = if let Some(request) = session.search_request() {
            println!("Computer is thinking...");
            let reply = worker.best_move(request).await?;
            if let Some(mv) = reply.chosen {
                println!("Computer plays {mv}.");
            }
            session.apply_computer_move(reply)?
        } else {
            println!("\n{}\n", session.board());
            let Some(mv) = prompt_move(input, session.human()).await? else {
                return Ok(None);
            };
            session.play_human(mv)?
        };

        match turn {
            Turn::Concluded(result) => return Ok(Some(result)),
            Turn::Ignored => println!("Invalid tile! Tile already marked. Try again."),
            Turn::Stale | Turn::Continue => {}
        }
    }
}

async fn read_line(input: &mut Input, prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    Ok(input.next_line().await?.map(|line| line.trim().to_string()))
}

async fn prompt_side(input: &mut Input, current: Player) -> Result<Option<Player>> {
    loop {
        let prompt = format!("Play as X or O? [{current}]: ");
        let Some(line) = read_line(input, &prompt).await? else {
            return Ok(None);
        };
        if line.is_empty() {
            return Ok(Some(current));
        }
        match line.parse::<Player>() {
            Ok(player) => return Ok(Some(player)),
            Err(_) => println!("Invalid input! Type X or O."),
        }
    }
}

async fn prompt_move(input: &mut Input, player: Player) -> Result<Option<Move>> {
    loop {
        let Some(line) = read_line(input, &format!("{player}'s turn: ")).await? else {
            return Ok(None);
        };
        match line.parse::<Move>() {
            Ok(mv) => return Ok(Some(mv)),
            Err(Error::InvalidArgument(reason)) => {
                log::debug!("rejected input: {reason}");
                println!("Invalid input! Use a cell like b2 or an index 0-8.");
            }
            Err(e) => return Err(e),
        }
    }
}

async fn prompt_rematch(input: &mut Input) -> Result<bool> {
    let line = read_line(input, "Play again? [Y/n]: ").await?;
    Ok(matches!(line.as_deref(), Some("") | Some("y") | Some("Y")))
}
