//! Rules engine trait.
//!
//! Rule sets implement `RulesEngine` to define:
//! - What actions are legal
//! - How actions transform state
//! - When the round is over

use serde::{Deserialize, Serialize};

use super::error::RulesResult;
use crate::core::{Action, DiceSource, GameState, Player, RulesConfig};

/// Result of a completed round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(Player),
    /// Full board, no line.
    Draw,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: Player) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }

    /// The winning player, if any.
    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameResult::Winner(p) => Some(*p),
            GameResult::Draw => None,
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Empty only if nothing, not even a reset, is allowed
/// - `try_apply`: Must not touch the input state; rejected actions return
///   the reason instead of a new state
/// - `is_terminal`: Return None while the round continues
pub trait RulesEngine {
    /// Get the rules configuration.
    fn config(&self) -> &RulesConfig;

    /// Enumerate every action legal in `state`.
    fn legal_actions(&self, state: &GameState) -> Vec<Action>;

    /// Apply an action, producing the next state.
    fn try_apply(
        &self,
        state: &GameState,
        action: &Action,
        dice: &mut dyn DiceSource,
    ) -> RulesResult<GameState>;

    /// Check if the round is over.
    fn is_terminal(&self, state: &GameState) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Apply an action, ignoring illegal ones.
    ///
    /// A rejected action yields an unchanged copy of `state`.
    fn apply(&self, state: &GameState, action: &Action, dice: &mut dyn DiceSource) -> GameState {
        or_unchanged(state, *action, self.try_apply(state, action, dice))
    }

    /// Check if `action` would be accepted in `state`.
    fn is_legal(&self, state: &GameState, action: &Action) -> bool {
        self.legal_actions(state).contains(action)
    }
}

/// Unwrap a transition, logging a rejection and falling back to an
/// unchanged copy of `state`.
pub(crate) fn or_unchanged(
    state: &GameState,
    action: Action,
    result: RulesResult<GameState>,
) -> GameState {
    result.unwrap_or_else(|reason| {
        tracing::debug!(%action, %reason, phase = %state.phase, "action ignored");
        state.clone()
    })
}
