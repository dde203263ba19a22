//! Space Tac Toe rules: placement, removal, resets, legal actions.
//!
//! Battle resolution lives in `battle.rs`.

use smallvec::SmallVec;

use crate::core::{
    is_adjacent, Action, Cell, DiceSource, GamePhase, GameState, PendingAbility, Player,
    RemovalRule, RulesConfig, CELL_COUNT,
};
use crate::rules::engine::or_unchanged;
use crate::rules::{GameResult, RuleViolation, RulesEngine, RulesResult};

/// Space Marines vs Aliens rules.
///
/// Holds only the configuration; every operation takes the current
/// `GameState` by reference and returns the next one.
#[derive(Clone, Debug, Default)]
pub struct SpaceTacToe {
    config: RulesConfig,
}

/// Builder for creating a SpaceTacToe game.
#[derive(Clone, Debug, Default)]
pub struct SpaceTacToeBuilder {
    config: RulesConfig,
}

impl SpaceTacToeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a complete rules configuration.
    pub fn rules(mut self, config: RulesConfig) -> Self {
        self.config = config;
        self
    }

    pub fn removal_rule(mut self, rule: RemovalRule) -> Self {
        self.config.removal_rule = rule;
        self
    }

    pub fn battles(mut self, enabled: bool) -> Self {
        self.config.battles_enabled = enabled;
        self
    }

    pub fn die_sides(mut self, sides: u8) -> Self {
        self.config = self.config.with_die_sides(sides);
        self
    }

    pub fn first_player(mut self, player: Player) -> Self {
        self.config.first_player = player;
        self
    }

    /// Build the rules and initial state.
    pub fn build(self) -> (SpaceTacToe, GameState) {
        let game = SpaceTacToe::new(self.config);
        let state = game.initial_state();
        (game, state)
    }
}

impl SpaceTacToe {
    #[must_use]
    pub fn new(config: RulesConfig) -> Self {
        Self { config }
    }

    /// Empty board, zero score, configured first player to move.
    #[must_use]
    pub fn initial_state(&self) -> GameState {
        GameState::new(self.config.first_player)
    }

    // === Placement ===

    /// Place the current player's piece on an empty cell.
    ///
    /// Illegal placements return `state` unchanged.
    #[must_use]
    pub fn place_piece(&self, state: &GameState, index: usize) -> GameState {
        or_unchanged(state, Action::Place(index), self.try_place_piece(state, index))
    }

    /// Place the current player's piece, reporting why a placement is illegal.
    ///
    /// After the piece lands, in order:
    /// 1. a completed line or full board ends the round;
    /// 2. a two-in-a-row with an eligible enemy target opens a removal;
    /// 3. otherwise the turn passes.
    pub fn try_place_piece(&self, state: &GameState, index: usize) -> RulesResult<GameState> {
        expect_phase(state, GamePhase::Playing)?;
        if !cell_at(state, index)?.is_empty() {
            return Err(RuleViolation::Occupied(index));
        }

        let mover = state.current_player;
        let mut next = state.clone();
        next.board.set(index, mover);
        next.record_action(mover, Action::Place(index));

        if let Some(result) = next.board.evaluate_lines() {
            end_round(&mut next, result);
        } else if next.board.has_two_in_a_row(mover) && self.removal_triggered(&next, index, mover) {
            tracing::debug!(player = %mover, trigger = index, "removal ability triggered");
            next.phase = GamePhase::SelectingRemoval;
            next.pending = Some(PendingAbility::Removal {
                remover: mover,
                trigger_index: index,
            });
        } else {
            next.advance_turn();
        }

        Ok(next)
    }

    fn removal_triggered(&self, state: &GameState, placed: usize, mover: Player) -> bool {
        match self.config.removal_rule {
            RemovalRule::AdjacentToPlacement => !state.board.adjacent_enemies(placed, mover).is_empty(),
            RemovalRule::AnyOpponentPiece => state.board.count(mover.opponent()) > 0,
        }
    }

    // === Removal ===

    /// Remove an enemy piece with an open removal ability.
    ///
    /// Illegal targets return `state` unchanged and keep the removal open.
    #[must_use]
    pub fn remove_piece(&self, state: &GameState, index: usize) -> GameState {
        or_unchanged(state, Action::Remove(index), self.try_remove_piece(state, index))
    }

    /// Remove an enemy piece, reporting why a target is illegal.
    pub fn try_remove_piece(&self, state: &GameState, index: usize) -> RulesResult<GameState> {
        expect_phase(state, GamePhase::SelectingRemoval)?;
        let Some(PendingAbility::Removal { remover, trigger_index }) = state.pending else {
            return Err(RuleViolation::NoPendingAbility);
        };

        let enemy = remover.opponent();
        if !cell_at(state, index)?.is_held_by(enemy) {
            return Err(RuleViolation::NotOpponentPiece { index, expected: enemy });
        }
        if self.config.removal_rule == RemovalRule::AdjacentToPlacement
            && !is_adjacent(trigger_index, index)
        {
            return Err(RuleViolation::NotAdjacent {
                index,
                trigger: trigger_index,
            });
        }

        let mut next = state.clone();
        next.board.clear(index);
        next.record_action(remover, Action::Remove(index));
        tracing::debug!(player = %remover, index, "piece removed");

        match next.board.evaluate_lines() {
            Some(result) => end_round(&mut next, result),
            None => next.advance_turn(),
        }

        Ok(next)
    }

    /// Cells the open removal may target. Empty outside `SelectingRemoval`.
    #[must_use]
    pub fn removable_cells(&self, state: &GameState) -> SmallVec<[usize; CELL_COUNT]> {
        let Some(PendingAbility::Removal { remover, trigger_index }) = state.pending else {
            return SmallVec::new();
        };
        if state.phase != GamePhase::SelectingRemoval {
            return SmallVec::new();
        }

        let adjacent_only = self.config.removal_rule == RemovalRule::AdjacentToPlacement;
        state
            .board
            .indices_of(remover.opponent())
            .into_iter()
            .filter(|&i| !adjacent_only || is_adjacent(trigger_index, i))
            .collect()
    }

    // === Resets ===

    /// Clear the board and round state, keep the score ("New Battle").
    #[must_use]
    pub fn reset_board(&self, state: &GameState) -> GameState {
        let mut next = state.clone();
        next.reset_board(self.config.first_player);
        tracing::debug!("board reset");
        next
    }

    /// Zero both scores and clear the board ("Reset War").
    #[must_use]
    pub fn reset_scores(&self, state: &GameState) -> GameState {
        let mut next = state.clone();
        next.reset_scores(self.config.first_player);
        tracing::debug!("scores reset");
        next
    }

    /// Check if clicking an enemy cell starts a battle.
    #[must_use]
    pub fn battles_enabled(&self) -> bool {
        self.config.battles_enabled
    }
}

impl RulesEngine for SpaceTacToe {
    fn config(&self) -> &RulesConfig {
        &self.config
    }

    fn legal_actions(&self, state: &GameState) -> Vec<Action> {
        let mut actions: Vec<Action> = match state.phase {
            GamePhase::Playing => {
                let enemy = state.current_player.opponent();
                let mut actions: Vec<Action> =
                    state.board.empty_indices().into_iter().map(Action::Place).collect();
                if self.config.battles_enabled {
                    actions.extend(state.board.indices_of(enemy).into_iter().map(Action::Attack));
                }
                actions
            }
            GamePhase::SelectingRemoval => {
                self.removable_cells(state).into_iter().map(Action::Remove).collect()
            }
            GamePhase::SelectingCounterAttack => self
                .counter_targets(state)
                .into_iter()
                .map(Action::CounterAttack)
                .collect(),
            GamePhase::BattleResult => vec![Action::Continue],
            GamePhase::GameOver => Vec::new(),
        };

        actions.push(Action::ResetBoard);
        actions.push(Action::ResetScores);
        actions
    }

    fn try_apply(
        &self,
        state: &GameState,
        action: &Action,
        dice: &mut dyn DiceSource,
    ) -> RulesResult<GameState> {
        match *action {
            Action::Place(i) => self.try_place_piece(state, i),
            Action::Remove(i) => self.try_remove_piece(state, i),
            Action::Attack(i) => self.try_initiate_battle(state, i, dice),
            Action::CounterAttack(i) => self.try_resolve_counter_attack(state, i),
            Action::Continue => self.try_continue_turn(state),
            Action::ResetBoard => Ok(self.reset_board(state)),
            Action::ResetScores => Ok(self.reset_scores(state)),
        }
    }

    fn is_terminal(&self, state: &GameState) -> Option<GameResult> {
        if state.is_over() {
            state.winner
        } else {
            None
        }
    }
}

// === Shared helpers ===

/// Reject unless `state` is in `expected`.
pub(super) fn expect_phase(state: &GameState, expected: GamePhase) -> RulesResult<()> {
    if state.phase == expected {
        Ok(())
    } else {
        Err(RuleViolation::WrongPhase {
            expected,
            actual: state.phase,
        })
    }
}

/// Cell at `index`, rejecting indices off the board.
pub(super) fn cell_at(state: &GameState, index: usize) -> RulesResult<Cell> {
    state.board.get(index).ok_or(RuleViolation::OutOfBounds(index))
}

/// Move to `GameOver` and credit the winner.
pub(super) fn end_round(state: &mut GameState, result: GameResult) {
    tracing::debug!(?result, board = %state.board, "round over");
    state.finish(result);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, ScriptedDice};

    const M: Cell = Cell::Marine;
    const A: Cell = Cell::Alien;
    const E: Cell = Cell::Empty;

    fn state_with(board: [Cell; 9], to_move: Player) -> GameState {
        let mut state = GameState::new(to_move);
        state.board = Board::from_cells(board);
        state
    }

    #[test]
    fn test_game_creation() {
        let (game, state) = SpaceTacToeBuilder::new()
            .battles(true)
            .first_player(Player::Alien)
            .build();

        assert!(game.battles_enabled());
        assert_eq!(state.current_player, Player::Alien);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_place_alternates_turn() {
        let (game, state) = SpaceTacToeBuilder::new().build();

        let next = game.place_piece(&state, 4);

        assert_eq!(next.board[4], Cell::Marine);
        assert_eq!(next.current_player, Player::Alien);
        assert_eq!(next.phase, GamePhase::Playing);
        assert_eq!(next.turn_number, 2);
        // Input untouched
        assert_eq!(state.board[4], Cell::Empty);
    }

    #[test]
    fn test_place_on_occupied_is_ignored() {
        let game = SpaceTacToe::default();
        let state = state_with([M, E, E, E, E, E, E, E, E], Player::Alien);

        assert_eq!(game.try_place_piece(&state, 0), Err(RuleViolation::Occupied(0)));
        assert_eq!(game.place_piece(&state, 0), state);
    }

    #[test]
    fn test_place_out_of_bounds() {
        let game = SpaceTacToe::default();
        let state = game.initial_state();

        assert_eq!(game.try_place_piece(&state, 9), Err(RuleViolation::OutOfBounds(9)));
    }

    #[test]
    fn test_place_wins_and_scores() {
        let game = SpaceTacToe::default();
        let state = state_with([M, M, E, A, A, E, E, E, E], Player::Marine);

        let next = game.place_piece(&state, 2);

        assert_eq!(next.phase, GamePhase::GameOver);
        assert_eq!(next.winner, Some(GameResult::Winner(Player::Marine)));
        assert_eq!(next.score[Player::Marine], 1);
        assert_eq!(next.score[Player::Alien], 0);
        assert_eq!(game.is_terminal(&next), Some(GameResult::Winner(Player::Marine)));
    }

    #[test]
    fn test_place_draw_leaves_score() {
        let game = SpaceTacToe::default();
        let state = state_with([M, A, M, M, A, A, A, M, E], Player::Marine);

        let next = game.place_piece(&state, 8);

        assert_eq!(next.phase, GamePhase::GameOver);
        assert_eq!(next.winner, Some(GameResult::Draw));
        assert_eq!(next.score[Player::Marine], 0);
        assert_eq!(next.score[Player::Alien], 0);
    }

    #[test]
    fn test_game_over_rejects_placement() {
        let game = SpaceTacToe::default();
        let state = state_with([M, M, E, A, A, E, E, E, E], Player::Marine);
        let over = game.place_piece(&state, 2);

        assert!(matches!(
            game.try_place_piece(&over, 5),
            Err(RuleViolation::WrongPhase { .. })
        ));
        assert_eq!(game.legal_actions(&over), vec![Action::ResetBoard, Action::ResetScores]);
    }

    #[test]
    fn test_two_in_a_row_with_adjacent_enemy_opens_removal() {
        let game = SpaceTacToe::default();
        // Marine at 0, alien at 3; marine places 4 -> diagonal 0-4 open at 8
        let state = state_with([M, E, E, A, E, E, E, E, E], Player::Marine);

        let next = game.place_piece(&state, 4);

        assert_eq!(next.phase, GamePhase::SelectingRemoval);
        assert_eq!(next.current_player, Player::Marine);
        assert_eq!(next.remover(), Some(Player::Marine));
        assert_eq!(next.trigger_index(), Some(4));
        assert_eq!(game.removable_cells(&next).as_slice(), &[3]);
    }

    #[test]
    fn test_two_in_a_row_without_adjacent_enemy_passes_turn() {
        let game = SpaceTacToe::default();
        // Alien at 8 is not adjacent to 1
        let state = state_with([M, E, E, E, E, E, E, E, A], Player::Marine);

        let next = game.place_piece(&state, 1);

        assert_eq!(next.phase, GamePhase::Playing);
        assert_eq!(next.current_player, Player::Alien);
    }

    #[test]
    fn test_open_removal_triggers_on_any_enemy() {
        let game = SpaceTacToe::new(RulesConfig::open_removal());
        let state = state_with([M, E, E, E, E, E, E, E, A], Player::Marine);

        let next = game.place_piece(&state, 1);

        assert_eq!(next.phase, GamePhase::SelectingRemoval);
        assert_eq!(game.removable_cells(&next).as_slice(), &[8]);
    }

    #[test]
    fn test_remove_piece_passes_turn() {
        let game = SpaceTacToe::default();
        let state = state_with([M, E, E, A, E, E, E, E, E], Player::Marine);
        let selecting = game.place_piece(&state, 4);

        let next = game.remove_piece(&selecting, 3);

        assert_eq!(next.board[3], Cell::Empty);
        assert_eq!(next.phase, GamePhase::Playing);
        assert_eq!(next.current_player, Player::Alien);
        assert_eq!(next.pending, None);
    }

    #[test]
    fn test_remove_own_piece_rejected() {
        let game = SpaceTacToe::default();
        let state = state_with([M, E, E, A, E, E, E, E, E], Player::Marine);
        let selecting = game.place_piece(&state, 4);

        let result = game.try_remove_piece(&selecting, 0);
        assert_eq!(
            result,
            Err(RuleViolation::NotOpponentPiece {
                index: 0,
                expected: Player::Alien
            })
        );

        let unchanged = game.remove_piece(&selecting, 0);
        assert_eq!(unchanged, selecting);
        assert_eq!(unchanged.phase, GamePhase::SelectingRemoval);
    }

    #[test]
    fn test_remove_non_adjacent_rejected() {
        let game = SpaceTacToe::default();
        // Alien at 3 touches cell 1, alien at 8 does not
        let state = state_with([M, E, E, A, E, E, E, E, A], Player::Marine);
        let selecting = game.place_piece(&state, 1);
        assert_eq!(selecting.phase, GamePhase::SelectingRemoval);

        assert_eq!(
            game.try_remove_piece(&selecting, 8),
            Err(RuleViolation::NotAdjacent { index: 8, trigger: 1 })
        );
        assert_eq!(game.removable_cells(&selecting).as_slice(), &[3]);
    }

    #[test]
    fn test_remove_outside_selection_rejected() {
        let game = SpaceTacToe::default();
        let state = state_with([M, E, E, A, E, E, E, E, E], Player::Marine);

        assert!(matches!(
            game.try_remove_piece(&state, 3),
            Err(RuleViolation::WrongPhase { .. })
        ));
        assert!(game.removable_cells(&state).is_empty());
    }

    #[test]
    fn test_legal_actions_playing() {
        let game = SpaceTacToe::new(RulesConfig::dice_battle());
        let state = state_with([M, A, E, E, E, E, E, E, E], Player::Marine);

        let actions = game.legal_actions(&state);

        assert!(actions.contains(&Action::Place(2)));
        assert!(actions.contains(&Action::Attack(1)));
        assert!(!actions.contains(&Action::Attack(0)));
        assert!(!actions.contains(&Action::Place(0)));
        assert_eq!(actions.len(), 7 + 1 + 2);
        assert!(game.is_legal(&state, &Action::ResetScores));
    }

    #[test]
    fn test_legal_actions_classic_has_no_attacks() {
        let game = SpaceTacToe::default();
        let state = state_with([M, A, E, E, E, E, E, E, E], Player::Marine);

        assert!(!game
            .legal_actions(&state)
            .iter()
            .any(|a| matches!(a, Action::Attack(_))));
    }

    #[test]
    fn test_apply_ignores_illegal() {
        let game = SpaceTacToe::default();
        let state = game.initial_state();
        let mut dice = ScriptedDice::default();

        let next = game.apply(&state, &Action::Continue, &mut dice);
        assert_eq!(next, state);
    }

    #[test]
    fn test_resets() {
        let game = SpaceTacToe::default();
        let state = state_with([M, M, E, A, A, E, E, E, E], Player::Marine);
        let won = game.place_piece(&state, 2);

        let fresh_board = game.reset_board(&won);
        assert_eq!(fresh_board.board, Board::new());
        assert_eq!(fresh_board.phase, GamePhase::Playing);
        assert_eq!(fresh_board.score[Player::Marine], 1);

        let fresh_war = game.reset_scores(&won);
        assert_eq!(fresh_war, game.initial_state());
    }

    #[test]
    fn test_history_recorded() {
        let game = SpaceTacToe::default();
        let state = game.initial_state();

        let state = game.place_piece(&state, 0);
        let state = game.place_piece(&state, 1);
        let state = game.place_piece(&state, 1); // ignored

        let actions: Vec<_> = state.action_history.iter().map(|r| r.action).collect();
        assert_eq!(actions, vec![Action::Place(0), Action::Place(1)]);
        assert_eq!(state.action_history[1].player, Player::Alien);
    }
}
