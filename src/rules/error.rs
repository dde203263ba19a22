//! Reasons an action is rejected.
//!
//! The public `apply` path swallows these and returns the state unchanged.
//! `try_apply` hands them back for logging and tests.

use crate::core::{GamePhase, Player};

/// Why an action was not applied.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    #[error("cell {0} is off the board")]
    OutOfBounds(usize),

    #[error("action needs phase {expected}, game is in {actual}")]
    WrongPhase { expected: GamePhase, actual: GamePhase },

    #[error("cell {0} is already occupied")]
    Occupied(usize),

    #[error("cell {index} does not hold a piece of {expected}")]
    NotOpponentPiece { index: usize, expected: Player },

    #[error("cell {index} is not adjacent to cell {trigger}")]
    NotAdjacent { index: usize, trigger: usize },

    #[error("battles are disabled in these rules")]
    BattlesDisabled,

    #[error("no ability is pending")]
    NoPendingAbility,
}

pub type RulesResult<T> = Result<T, RuleViolation>;
