//! Dice battles and counter-attacks.
//!
//! With battles enabled, clicking an enemy-held cell during play rolls one
//! die for each side. The attacker needs a strictly higher roll to take the
//! cell. When the defender holds, they either counter-attack (claim one
//! attacker piece) or, if the attacker has no piece on the board, get a
//! random empty cell instead.

use smallvec::SmallVec;

use super::game::{cell_at, end_round, expect_phase, SpaceTacToe};
use crate::core::{
    Action, BattleOutcome, DiceSource, GamePhase, GameState, PendingAbility, CELL_COUNT,
};
use crate::rules::engine::or_unchanged;
use crate::rules::{RuleViolation, RulesEngine, RulesResult};

impl SpaceTacToe {
    /// Contest an enemy-held cell. Illegal attacks return `state` unchanged.
    #[must_use]
    pub fn initiate_battle(
        &self,
        state: &GameState,
        index: usize,
        dice: &mut dyn DiceSource,
    ) -> GameState {
        or_unchanged(state, Action::Attack(index), self.try_initiate_battle(state, index, dice))
    }

    /// Contest an enemy-held cell, reporting why an attack is illegal.
    ///
    /// Rolls the attacker's die first, then the defender's. A compensation
    /// cell, when one is awarded, is picked after both rolls.
    pub fn try_initiate_battle(
        &self,
        state: &GameState,
        index: usize,
        dice: &mut dyn DiceSource,
    ) -> RulesResult<GameState> {
        if !self.config().battles_enabled {
            return Err(RuleViolation::BattlesDisabled);
        }
        expect_phase(state, GamePhase::Playing)?;

        let attacker = state.current_player;
        let defender = attacker.opponent();
        if !cell_at(state, index)?.is_held_by(defender) {
            return Err(RuleViolation::NotOpponentPiece {
                index,
                expected: defender,
            });
        }

        // Deserialized configs can carry a zero-sided die
        let sides = self.config().die_sides.max(1);
        let attacker_roll = dice.roll(sides);
        let defender_roll = dice.roll(sides);
        tracing::trace!(attacker_roll, defender_roll, index, "battle dice");

        let mut outcome = BattleOutcome {
            attacker,
            attacker_roll,
            defender_roll,
            index,
            compensation: None,
        };

        let mut next = state.clone();
        next.record_action(attacker, Action::Attack(index));

        if outcome.attacker_won() {
            next.board.set(index, attacker);
        } else if next.board.count(attacker) > 0 {
            next.phase = GamePhase::SelectingCounterAttack;
            next.pending = Some(PendingAbility::CounterAttack { defender, attacker });
        } else {
            // TODO: compensation only fires for an attacker with no pieces at
            // all; revisit its balance once battle games have been played.
            let empty = next.board.empty_indices();
            if !empty.is_empty() {
                let cell = empty[dice.pick(empty.len()).min(empty.len() - 1)];
                next.board.set(cell, defender);
                outcome.compensation = Some(cell);
            }
        }

        tracing::debug!(
            attacker = %attacker,
            attacker_roll,
            defender_roll,
            index,
            victor = %outcome.victor(),
            compensation = ?outcome.compensation,
            "battle resolved"
        );
        next.battle = Some(outcome);

        if let Some(result) = next.board.evaluate_lines() {
            end_round(&mut next, result);
        } else if next.phase != GamePhase::SelectingCounterAttack {
            next.phase = GamePhase::BattleResult;
        }

        Ok(next)
    }

    /// Claim one of the losing attacker's pieces. Illegal targets return
    /// `state` unchanged and keep the counter-attack open.
    #[must_use]
    pub fn resolve_counter_attack(&self, state: &GameState, index: usize) -> GameState {
        or_unchanged(
            state,
            Action::CounterAttack(index),
            self.try_resolve_counter_attack(state, index),
        )
    }

    /// Claim one of the losing attacker's pieces, reporting why a target is
    /// illegal.
    pub fn try_resolve_counter_attack(
        &self,
        state: &GameState,
        index: usize,
    ) -> RulesResult<GameState> {
        expect_phase(state, GamePhase::SelectingCounterAttack)?;
        let Some(PendingAbility::CounterAttack { defender, attacker }) = state.pending else {
            return Err(RuleViolation::NoPendingAbility);
        };
        if !cell_at(state, index)?.is_held_by(attacker) {
            return Err(RuleViolation::NotOpponentPiece {
                index,
                expected: attacker,
            });
        }

        let mut next = state.clone();
        next.board.set(index, defender);
        next.pending = None;
        next.record_action(defender, Action::CounterAttack(index));
        tracing::debug!(player = %defender, index, "counter-attack claimed cell");

        match next.board.evaluate_lines() {
            Some(result) => end_round(&mut next, result),
            None => next.phase = GamePhase::BattleResult,
        }

        Ok(next)
    }

    /// Cells the open counter-attack may claim. Empty outside
    /// `SelectingCounterAttack`.
    #[must_use]
    pub fn counter_targets(&self, state: &GameState) -> SmallVec<[usize; CELL_COUNT]> {
        match state.pending {
            Some(PendingAbility::CounterAttack { attacker, .. })
                if state.phase == GamePhase::SelectingCounterAttack =>
            {
                state.board.indices_of(attacker)
            }
            _ => SmallVec::new(),
        }
    }

    /// Acknowledge a battle result and pass the turn.
    #[must_use]
    pub fn continue_turn(&self, state: &GameState) -> GameState {
        or_unchanged(state, Action::Continue, self.try_continue_turn(state))
    }

    /// Acknowledge a battle result, reporting why it cannot be acknowledged.
    pub fn try_continue_turn(&self, state: &GameState) -> RulesResult<GameState> {
        expect_phase(state, GamePhase::BattleResult)?;

        let mut next = state.clone();
        next.record_action(state.current_player, Action::Continue);
        next.advance_turn();
        Ok(next)
    }
}
