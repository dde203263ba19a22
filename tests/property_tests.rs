//! Property tests over arbitrary boards and action sequences.

use proptest::prelude::*;

use space_tac_toe::core::{adjacent_indices, is_adjacent, Board, Cell, Player, LINES};
use space_tac_toe::{Action, GameResult, GameRng, RulesConfig, RulesEngine, SpaceTacToe};

fn cell() -> impl Strategy<Value = Cell> {
    prop_oneof![Just(Cell::Empty), Just(Cell::Marine), Just(Cell::Alien)]
}

fn board() -> impl Strategy<Value = Board> {
    prop::array::uniform9(cell()).prop_map(Board::from_cells)
}

/// Indices past the board edge are included so rejections get exercised.
fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (0usize..11).prop_map(Action::Place),
        2 => (0usize..11).prop_map(Action::Remove),
        2 => (0usize..11).prop_map(Action::Attack),
        2 => (0usize..11).prop_map(Action::CounterAttack),
        1 => Just(Action::Continue),
    ]
}

fn rules() -> impl Strategy<Value = RulesConfig> {
    prop_oneof![
        Just(RulesConfig::classic()),
        Just(RulesConfig::open_removal()),
        Just(RulesConfig::dice_battle()),
    ]
}

fn line_owner(board: &Board, line: &[usize; 3]) -> Option<Player> {
    let owner = board[line[0]].owner()?;
    line.iter().all(|&i| board[i].is_held_by(owner)).then_some(owner)
}

proptest! {
    #[test]
    fn evaluate_lines_matches_brute_force(board in board()) {
        let owners: Vec<Player> = LINES.iter().filter_map(|l| line_owner(&board, l)).collect();

        match board.evaluate_lines() {
            Some(GameResult::Winner(p)) => prop_assert!(owners.contains(&p)),
            Some(GameResult::Draw) => {
                prop_assert!(owners.is_empty());
                prop_assert!(board.is_full());
            }
            None => {
                prop_assert!(owners.is_empty());
                prop_assert!(!board.is_full());
            }
        }
    }

    #[test]
    fn two_in_a_row_matches_brute_force(board in board()) {
        for player in Player::ALL {
            let expected = LINES.iter().any(|line| {
                let mine = line.iter().filter(|&&i| board[i].is_held_by(player)).count();
                let empty = line.iter().filter(|&&i| board[i].is_empty()).count();
                mine == 2 && empty == 1
            });
            prop_assert_eq!(board.has_two_in_a_row(player), expected);
        }
    }

    #[test]
    fn adjacency_is_symmetric_and_irreflexive(a in 0usize..9, b in 0usize..9) {
        prop_assert_eq!(is_adjacent(a, b), is_adjacent(b, a));
        prop_assert!(!adjacent_indices(a).contains(&a));

        let (ra, ca) = (a / 3, a % 3);
        let (rb, cb) = (b / 3, b % 3);
        let king_move = a != b && ra.abs_diff(rb) <= 1 && ca.abs_diff(cb) <= 1;
        prop_assert_eq!(is_adjacent(a, b), king_move);
    }

    #[test]
    fn rejected_actions_leave_state_unchanged(
        rules in rules(),
        actions in prop::collection::vec(action(), 1..60),
        seed in any::<u64>(),
    ) {
        let game = SpaceTacToe::new(rules);
        let mut state = game.initial_state();
        let mut dice = GameRng::new(seed);

        for action in actions {
            // Same seed on both paths so a legal battle rolls the same dice
            let mut probe = GameRng::from_state(&dice.state());
            match game.try_apply(&state, &action, &mut probe) {
                Ok(_) => state = game.apply(&state, &action, &mut dice),
                Err(_) => {
                    let after = game.apply(&state, &action, &mut dice);
                    prop_assert_eq!(&after, &state);
                }
            }
        }
    }

    #[test]
    fn a_round_scores_at_most_once(
        rules in rules(),
        actions in prop::collection::vec(action(), 1..80),
        seed in any::<u64>(),
    ) {
        let game = SpaceTacToe::new(rules);
        let mut state = game.initial_state();
        let mut dice = GameRng::new(seed);

        for action in actions {
            state = game.apply(&state, &action, &mut dice);

            let total: u32 = state.score.iter().map(|(_, s)| *s).sum();
            prop_assert!(total <= 1);
            prop_assert_eq!(total == 1, matches!(state.winner, Some(GameResult::Winner(_))));
            if state.is_over() {
                prop_assert!(game.legal_actions(&state).iter().all(Action::is_reset));
            }
        }
    }
}
