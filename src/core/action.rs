//! Player actions.
//!
//! Every input the presentation layer can produce maps to one `Action`:
//! a cell click in the current phase, the continue button after a battle,
//! or one of the two reset buttons.
//!
//! Applied actions are kept as `ActionRecord`s in the state's history.

use serde::{Deserialize, Serialize};

use super::player::Player;

/// A single player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Place the current player's piece on an empty cell.
    Place(usize),
    /// Remove an enemy piece with the two-in-a-row ability.
    Remove(usize),
    /// Contest an enemy-held cell with a dice battle.
    Attack(usize),
    /// Claim one of the losing attacker's pieces.
    CounterAttack(usize),
    /// Acknowledge a battle result and pass the turn.
    Continue,
    /// Clear the board, keep the score ("New Battle").
    ResetBoard,
    /// Clear the board and the score ("Reset War").
    ResetScores,
}

impl Action {
    /// Target cell of a cell action.
    ///
    /// ```
    /// use space_tac_toe::core::Action;
    ///
    /// assert_eq!(Action::Attack(4).target(), Some(4));
    /// assert_eq!(Action::Continue.target(), None);
    /// ```
    #[must_use]
    pub const fn target(&self) -> Option<usize> {
        match *self {
            Action::Place(i) | Action::Remove(i) | Action::Attack(i) | Action::CounterAttack(i) => {
                Some(i)
            }
            Action::Continue | Action::ResetBoard | Action::ResetScores => None,
        }
    }

    /// Check if this is one of the reset controls.
    #[must_use]
    pub const fn is_reset(&self) -> bool {
        matches!(self, Action::ResetBoard | Action::ResetScores)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Place(i) => write!(f, "place {i}"),
            Action::Remove(i) => write!(f, "remove {i}"),
            Action::Attack(i) => write!(f, "attack {i}"),
            Action::CounterAttack(i) => write!(f, "counter-attack {i}"),
            Action::Continue => write!(f, "continue"),
            Action::ResetBoard => write!(f, "reset board"),
            Action::ResetScores => write!(f, "reset scores"),
        }
    }
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: Player,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the game.
    pub sequence: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: Player, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}
