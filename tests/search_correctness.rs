//! Minimax and MCTS checked against an exhaustive oracle

use hybrid_ttt::{
    BoardState, Error, Player,
    search::{Mcts, MctsConfig, MemoCache, Minimax, mcts, minimax},
};
use rand::{SeedableRng, rngs::StdRng};

mod common;

use common::{Oracle, open_positions, winning_cells};

#[test]
fn test_minimax_is_optimal_near_the_end() {
    let mut oracle = Oracle::new();
    let positions: Vec<_> = open_positions()
        .into_iter()
        .filter(|board| board.empty_count() <= 5)
        .collect();
    assert!(!positions.is_empty());

    for board in positions {
        let mut memo = MemoCache::new();
        let result = minimax(&board, &mut memo).unwrap();
        let optimal = oracle.optimal_moves(&board);

        assert_eq!(result.score, oracle.value(&board), "score on {}", board.encode());
        assert_eq!(
            result.best_move,
            optimal.first().copied(),
            "best move on {}",
            board.encode()
        );
    }
}

#[test]
fn test_minimax_empty_board_is_a_draw() {
    let mut memo = MemoCache::new();
    let result = minimax(&BoardState::new(), &mut memo).unwrap();
    assert_eq!(result.score, 0);
    assert_eq!(result.best_move, Some(0));
}

#[test]
fn test_minimax_scores_for_either_perspective() {
    let mut oracle = Oracle::new();
    let board = BoardState::from_string("X...O...X").unwrap();
    let mut memo = MemoCache::new();

    let for_o = Minimax::new(&mut memo, Player::O).solve(&board).unwrap();
    assert_eq!(for_o.score, oracle.value(&board));

    let x_view = Minimax::new(&mut memo, Player::X)
        .search(&board, Player::O, i32::MIN, i32::MAX)
        .score;
    assert_eq!(x_view, -for_o.score);
}

#[test]
fn test_warm_memo_gives_same_results_as_cleared() {
    let positions = open_positions();
    let mut warm = MemoCache::new();

    for board in &positions {
        let shared = minimax(board, &mut warm).unwrap();
        let mut fresh = MemoCache::new();
        let cold = minimax(board, &mut fresh).unwrap();
        assert_eq!(shared, cold, "memo changed result on {}", board.encode());
    }
    assert!(warm.stats().hits > 0);
}

#[test]
fn test_memo_survives_clear_between_searches() {
    let mut memo = MemoCache::new();
    let board = BoardState::from_string("X...O....").unwrap();

    let first = minimax(&board, &mut memo).unwrap();
    memo.clear();
    assert!(memo.is_empty());
    assert_eq!(minimax(&board, &mut memo).unwrap(), first);
}

#[test]
fn test_minimax_rejects_decided_board() {
    let mut memo = MemoCache::new();
    let board = BoardState::from_string("XXXOO....").unwrap();
    assert!(matches!(
        minimax(&board, &mut memo),
        Err(Error::EmptyMoveSet { .. })
    ));
}

#[test]
fn test_mcts_opening_never_loses() {
    let mut oracle = Oracle::new();
    let empty = BoardState::new();

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mv = mcts(&empty, 4000, &mut rng).unwrap();
        assert!(
            oracle.move_value(&empty, mv) >= 0,
            "seed {seed} opened with losing move {mv}"
        );
    }
}

#[test]
fn test_mcts_keeps_a_won_position_won() {
    let mut oracle = Oracle::new();
    let positions: Vec<_> = open_positions()
        .into_iter()
        .filter(|board| !winning_cells(board, board.to_move).is_empty())
        .take(50)
        .collect();
    assert!(!positions.is_empty());

    let config = MctsConfig::with_iterations(1000).with_opponent_model(true);
    let mut rng = StdRng::seed_from_u64(99);
    for board in positions {
        let mv = Mcts::new(config).search(&board, &mut rng).unwrap();
        assert_eq!(
            oracle.move_value(&board, mv),
            oracle.value(&board),
            "move {mv} throws away the win on {}",
            board.encode()
        );
    }
}

#[test]
fn test_mcts_accepts_a_slower_win() {
    // O to move: 0 wins at once, 4 forks and wins next turn, 2 lets X win
    let board = BoardState::from_string(".X.O.XOXO_O").unwrap();
    let mut oracle = Oracle::new();
    assert_eq!(oracle.optimal_moves(&board), vec![0, 4]);

    let config = MctsConfig::with_iterations(1000).with_opponent_model(true);
    let mv = Mcts::new(config)
        .search(&board, &mut StdRng::seed_from_u64(99))
        .unwrap();
    assert!(mv == 0 || mv == 4, "chose {mv}");
}

#[test]
fn test_mcts_is_reproducible_with_a_seed() {
    let board = BoardState::from_string("X...O....").unwrap();
    let first = mcts(&board, 500, &mut StdRng::seed_from_u64(5)).unwrap();
    let second = mcts(&board, 500, &mut StdRng::seed_from_u64(5)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_mcts_tree_accounts_every_iteration() {
    let board = BoardState::from_string("X...O....").unwrap();
    let tree = Mcts::new(MctsConfig::with_iterations(300))
        .run(&board, &mut StdRng::seed_from_u64(1))
        .unwrap();

    assert_eq!(tree.get(tree.root()).visits, 300);
    let child_visits: u32 = tree.children(tree.root()).map(|child| child.visits).sum();
    assert_eq!(child_visits, 300);
    assert_eq!(tree.children(tree.root()).count(), board.legal_moves().len());
}

#[test]
fn test_mcts_rejects_zero_iterations_and_decided_boards() {
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        mcts(&BoardState::new(), 0, &mut rng),
        Err(Error::InvalidConfiguration { .. })
    ));
    let won = BoardState::from_string("XXXOO....").unwrap();
    assert!(matches!(
        mcts(&won, 100, &mut rng),
        Err(Error::EmptyMoveSet { .. })
    ));
}
