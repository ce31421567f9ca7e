//! Tests for game-over evaluation.

use quadratum_rules::{
    Board, GameOverEvaluator, GameOverState, Player, RemainingSquares, RulesConfig, Seat,
    rules::remaining_squares,
};

fn board() -> Board {
    Board::new(Player::new("one").unwrap(), Player::new("two").unwrap()).unwrap()
}

fn evaluator() -> GameOverEvaluator {
    RulesConfig::default().evaluator().unwrap()
}

fn fill(board: &mut Board, seat: Seat, skip: &[usize]) {
    let player = board.player(seat).clone();
    for index in (0..64).filter(|i| !skip.contains(i)) {
        board.place(index, &player).unwrap();
    }
}

#[test]
fn test_default_thresholds() {
    let evaluator = evaluator();
    assert_eq!(evaluator.min_score(), 150);
    assert_eq!(evaluator.min_difference(), 15);
}

#[test]
fn test_threshold_with_lead_wins() {
    let board = board();
    let evaluator = evaluator();
    assert_eq!(evaluator.evaluate(&board, [150, 135]), GameOverState::Won(Seat::First));
    assert_eq!(evaluator.evaluate(&board, [150, 165]), GameOverState::Won(Seat::Second));
}

#[test]
fn test_threshold_without_lead_continues() {
    let board = board();
    let evaluator = evaluator();
    assert_eq!(evaluator.evaluate(&board, [150, 150]), GameOverState::NotOver);
    assert_eq!(evaluator.evaluate(&board, [160, 146]), GameOverState::NotOver);
    assert_eq!(evaluator.evaluate(&board, [140, 0]), GameOverState::NotOver);
}

#[test]
fn test_full_board_equal_scores_draw() {
    let mut board = board();
    fill(&mut board, Seat::First, &[]);
    let verdict = evaluator().evaluate(&board, [30, 30]);
    assert_eq!(verdict, GameOverState::Draw);
    assert!(verdict.is_over());
    assert_eq!(verdict.winner(), None);
}

#[test]
fn test_full_board_higher_score_wins() {
    let mut board = board();
    fill(&mut board, Seat::Second, &[]);
    assert_eq!(
        evaluator().evaluate(&board, [31, 30]),
        GameOverState::Won(Seat::First)
    );
}

#[test]
fn test_only_leader_can_score() {
    let mut board = board();
    fill(&mut board, Seat::First, &[10]);
    assert_eq!(remaining_squares(&board), RemainingSquares::OnlyFirst);

    let evaluator = evaluator();
    assert_eq!(evaluator.evaluate(&board, [60, 30]), GameOverState::Won(Seat::First));
    // The trailing side cannot score, but the leader could still hand over a lead.
    assert_eq!(evaluator.evaluate(&board, [30, 60]), GameOverState::NotOver);
}

#[test]
fn test_mixed_full_board_leaves_nothing() {
    let mut board = board();
    let one = board.first_player().clone();
    let two = board.second_player().clone();
    for index in 0..64 {
        let (x, y) = (index % 8, index / 8);
        let owner = if (x + y) % 2 == 0 { &one } else { &two };
        board.place(index, owner).unwrap();
    }
    assert_eq!(remaining_squares(&board), RemainingSquares::Neither);
}
