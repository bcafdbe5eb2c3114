//! Runs the minimax search off the interactive task.
//!
//! The search receives a board snapshot and hands back a [`SearchReply`]; the
//! session that owns the live board decides whether the reply still applies.

use std::time::{Duration, Instant};

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::board::{Board, Move};
use crate::error::{Error, Result};
use crate::search::best_move;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct SearchRequest {
    pub generation: u64,
    pub board: Board,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct SearchReply {
    pub generation: u64,
    pub board: Board,
    pub chosen: Option<Move>,
}

/// Searches on the blocking pool, then pads the wait up to `min_thinking_time`.
pub async fn search(request: SearchRequest, min_thinking_time: Duration) -> Result<SearchReply> {
    let start = Instant::now();
    let board = request.board;
    let chosen = tokio::task::spawn_blocking(move || best_move(board))
        .await
        .map_err(|e| Error::Worker(e.to_string()))?;

    let elapsed = start.elapsed();
    if let Some(remaining) = min_thinking_time.checked_sub(elapsed) {
        tokio::time::sleep(remaining).await;
    }

    Ok(SearchReply {
        generation: request.generation,
        board,
        chosen,
    })
}

type Job = (SearchRequest, oneshot::Sender<Result<SearchReply>>);

/// A long-lived task that answers search requests one at a time.
#[derive(Debug)]
pub struct SearchWorker {
    jobs: mpsc::Sender<Job>,
    handle: JoinHandle<()>,
}

impl SearchWorker {
    pub fn spawn(min_thinking_time: Duration) -> Self {
        let (jobs, mut rx) = mpsc::channel::<Job>(8);
        let handle = tokio::spawn(async move {
            while let Some((request, reply)) = rx.recv().await {
                let result = search(request, min_thinking_time).await;
                if reply.send(result).is_err() {
                    log::debug!(
                        "search for generation {} finished after its requester left",
                        request.generation
                    );
                }
            }
            log::debug!("search worker stopped");
        });

        Self { jobs, handle }
    }

    pub async fn request(
        &self,
        request: SearchRequest,
    ) -> Result<oneshot::Receiver<Result<SearchReply>>> {
        let (tx, rx) = oneshot::channel();
        self.jobs
            .send((request, tx))
            .await
            .map_err(|_| Error::Worker("search worker is not running".to_string()))?;
        Ok(rx)
    }

    /// Convenience for callers that simply wait for the answer.
    pub async fn best_move(&self, request: SearchRequest) -> Result<SearchReply> {
        self.request(request)
            .await?
            .await
            .map_err(|_| Error::Worker("search worker dropped the request".to_string()))?
    }

    pub async fn shutdown(self) -> Result<()> {
        drop(self.jobs);
        self.handle
            .await
            .map_err(|e| Error::Worker(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, Player};
    use crate::rules::initial_board;

    const X: Cell = Some(Player::X);
    const O: Cell = Some(Player::O);
    const E: Cell = None;

    #[tokio::test]
    async fn test_search_returns_snapshot_and_move() {
        let board = Board::from_cells([X, X, E, O, O, E, E, E, E]).unwrap();
        let reply = search(
            SearchRequest {
                generation: 3,
                board,
            },
            Duration::ZERO,
        )
        .await
        .unwrap();
        assert_eq!(reply.generation, 3);
        assert_eq!(reply.board, board);
        assert_eq!(reply.chosen, Some(Move::new(2).unwrap()));
    }

    #[tokio::test]
    async fn test_search_pads_thinking_time() {
        let board = Board::from_cells([X, X, X, O, O, E, E, E, E]).unwrap();
        let start = Instant::now();
        let reply = search(
            SearchRequest {
                generation: 0,
                board,
            },
            Duration::from_millis(50),
        )
        .await
        .unwrap();
        assert_eq!(reply.chosen, None);
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_worker_answers_over_channel() {
        let worker = SearchWorker::spawn(Duration::ZERO);
        let board = Board::from_cells([X, E, E, O, O, E, E, X, E]).unwrap();
        let reply = worker
            .best_move(SearchRequest {
                generation: 1,
                board,
            })
            .await
            .unwrap();
        assert_eq!(reply.chosen, Some(Move::new(5).unwrap()));

        let pending = worker
            .request(SearchRequest {
                generation: 2,
                board: initial_board(),
            })
            .await
            .unwrap();
        let reply = pending.await.unwrap().unwrap();
        assert_eq!(reply.generation, 2);
        assert_eq!(reply.chosen, Some(Move::new(0).unwrap()));

        worker.shutdown().await.unwrap();
    }
}
