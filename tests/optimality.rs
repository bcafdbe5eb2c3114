use std::collections::{HashMap, HashSet};

use tic_tac_toe::search::evaluate;
use tic_tac_toe::*;

fn reachable_boards() -> Vec<Board> {
    let mut seen = HashSet::new();
    let mut stack = vec![initial_board()];
    while let Some(board) = stack.pop() {
        if !seen.insert(board) || is_terminal(board) {
            continue;
        }
        for mv in legal_moves(board) {
            stack.push(apply_move(board, mv));
        }
    }
    seen.into_iter().collect()
}

/// Plain memoized minimax value, used as the reference for the pruned search.
fn value(board: Board, memo: &mut HashMap<Board, i8>) -> i8 {
    if let Some(&v) = memo.get(&board) {
        return v;
    }
    let v = match outcome(board).utility() {
        Some(u) => u,
        None => {
            let children = legal_moves(board)
                .into_iter()
                .map(|mv| value(apply_move(board, mv), memo));
            match player_to_move(board) {
                Player::X => children.max().unwrap(),
                Player::O => children.min().unwrap(),
            }
        }
    };
    memo.insert(board, v);
    v
}

#[test]
fn test_reachable_state_count() {
    assert_eq!(reachable_boards().len(), 5478);
}

#[test]
fn test_turn_parity_matches_mark_counts() {
    for board in reachable_boards() {
        let x = board.count(Some(Player::X));
        let o = board.count(Some(Player::O));
        let expected = if x == o { Player::X } else { Player::O };
        assert_eq!(player_to_move(board), expected, "{board}");
        if !is_terminal(board) {
            let next = apply_move(board, legal_moves(board)[0]);
            assert_eq!(player_to_move(next), !expected);
        }
    }
}

#[test]
fn test_terminal_outcomes_are_exclusive() {
    for board in reachable_boards().into_iter().filter(|&b| is_terminal(b)) {
        let u = utility(board).unwrap();
        match winner(board) {
            Some(Player::X) => assert_eq!(u, 1),
            Some(Player::O) => assert_eq!(u, -1),
            None => {
                assert_eq!(board.empty_count(), 0, "{board}");
                assert_eq!(u, 0);
            }
        }
    }
}

#[test]
fn test_apply_move_is_idempotent_on_filled_cells() {
    for board in reachable_boards() {
        for mv in Move::ALL {
            let once = apply_move(board, mv);
            if board[mv].is_some() {
                assert_eq!(once, board);
            }
            assert_eq!(apply_move(once, mv), once);
        }
    }
}

#[test]
fn test_best_move_is_legal_and_optimal() {
    let mut memo = HashMap::new();
    for board in reachable_boards() {
        let chosen = best_move(board);
        if is_terminal(board) {
            assert_eq!(chosen, None);
            continue;
        }

        let mv = chosen.unwrap();
        assert!(legal_moves(board).contains(&mv), "{board}");

        let expected = value(board, &mut memo);
        let (score, _) = evaluate(board);
        assert_eq!(score, expected, "{board}");
        assert_eq!(value(apply_move(board, mv), &mut memo), expected, "{board}");
        assert!((-1..=1).contains(&score));
    }
}

#[test]
fn test_computer_never_loses_from_any_position() {
    let mut memo = HashMap::new();
    for board in reachable_boards().into_iter().filter(|&b| !is_terminal(b)) {
        let side = player_to_move(board);
        let start = value(board, &mut memo);

        // Let the opponent try every reply, the search answers for `side`.
        let mut frontier = vec![board];
        while let Some(b) = frontier.pop() {
            if is_terminal(b) {
                let u = utility(b).unwrap();
                match side {
                    Player::X => assert!(u >= start, "{board}\n=>\n{b}"),
                    Player::O => assert!(u <= start, "{board}\n=>\n{b}"),
                }
                continue;
            }
            if player_to_move(b) == side {
                frontier.push(apply_move(b, best_move(b).unwrap()));
            } else {
                frontier.extend(legal_moves(b).into_iter().map(|mv| apply_move(b, mv)));
            }
        }
    }
}
