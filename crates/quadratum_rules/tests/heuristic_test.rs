//! Tests for the heat-map bot.

use quadratum_rules::{Board, HeuristicStrategy, Player, ScoringMode, Seat};

fn board() -> Board {
    Board::new(Player::new("one").unwrap(), Player::new("two").unwrap()).unwrap()
}

fn bot(board: &Board, mode: ScoringMode) -> HeuristicStrategy {
    HeuristicStrategy::new(board.first_player().clone(), mode).with_randomized_ties(false)
}

#[test]
fn test_best_only_opens_in_corner() {
    let board = board();
    assert_eq!(bot(&board, ScoringMode::BestOnly).choose_move(&board).unwrap(), 0);
}

#[test]
fn test_cumulative_opens_near_center() {
    let board = board();
    assert_eq!(bot(&board, ScoringMode::Cumulative).choose_move(&board).unwrap(), 11);
}

#[test]
fn test_blocks_opponent_corner_square() {
    let mut board = board();
    let two = board.second_player().clone();
    board.place(0, &two).unwrap();
    assert_eq!(bot(&board, ScoringMode::BestOnly).choose_move(&board).unwrap(), 7);
}

#[test]
fn test_never_picks_occupied_cell() {
    let mut board = board();
    let one = board.first_player().clone();
    for index in (0..64).filter(|i| i % 3 != 0) {
        board.place(index, &one).unwrap();
    }
    for mode in [ScoringMode::BestOnly, ScoringMode::Cumulative] {
        let cell = bot(&board, mode).choose_move(&board).unwrap();
        assert!(board.is_empty(cell).unwrap(), "{mode} picked {cell}");
    }
}

#[test]
fn test_randomized_choice_is_a_best_cell() {
    let board = board();
    let player = board.first_player().clone();
    let bot = HeuristicStrategy::new(player, ScoringMode::BestOnly).with_seed(42);
    let maps = bot.heat_maps(&board, Seat::First).unwrap();
    let top = (0..64).map(|cell| maps.value(cell)).max().unwrap();
    for _ in 0..20 {
        let cell = bot.choose_move(&board).unwrap();
        assert_eq!(maps.value(cell), top);
    }
}

#[test]
fn test_same_seed_same_choices() {
    let board = board();
    let player = board.first_player().clone();
    let a = HeuristicStrategy::new(player.clone(), ScoringMode::BestOnly).with_seed(7);
    let b = HeuristicStrategy::new(player, ScoringMode::BestOnly).with_seed(7);
    let left: Vec<_> = (0..10).map(|_| a.choose_move(&board).unwrap()).collect();
    let right: Vec<_> = (0..10).map(|_| b.choose_move(&board).unwrap()).collect();
    assert_eq!(left, right);
}
