//! # space-tac-toe
//!
//! Rules engine for "Space Marines vs Aliens", tic-tac-toe with house rules.
//!
//! ## Rules
//!
//! 1. **Lines**: three in a row (row, column, diagonal) wins the round; a
//!    full board without a line is a draw.
//!
//! 2. **Removal**: a placement that leaves the mover two in a row with the
//!    third cell open lets them remove one enemy piece, either one adjacent
//!    to the placement or any one, depending on `RemovalRule`.
//!
//! 3. **Battles** (optional): clicking an enemy cell rolls d10 vs d10. A
//!    strictly higher attacker roll takes the cell; otherwise the defender
//!    counter-attacks, or gets a random empty cell if the attacker has no
//!    pieces to claim.
//!
//! ## Architecture
//!
//! - **Value state**: `GameState` goes in, a new `GameState` comes out.
//!   Illegal actions return the input unchanged.
//!
//! - **Injected dice**: battle randomness goes through `DiceSource`, so
//!   tests can script exact rolls.
//!
//! - **Session wrapper**: `GameEngine` maps cell clicks and buttons onto
//!   actions for a presentation layer.
//!
//! ## Modules
//!
//! - `core`: Players, board geometry, state, actions, dice, configuration
//! - `rules`: RulesEngine trait, results, rule violations
//! - `games`: The Space Marines vs Aliens rule set
//! - `session`: Interactive session driver

pub mod core;
pub mod rules;
pub mod games;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    adjacent_indices, Action, ActionRecord, BattleOutcome, Board, Cell, DiceSource, GamePhase,
    GameRng, GameRngState, GameState, PendingAbility, Player, PlayerMap, RemovalRule,
    RulesConfig, Score, ScriptedDice,
};

pub use crate::rules::{GameResult, RuleViolation, RulesEngine, RulesResult};

pub use crate::games::space::{SpaceTacToe, SpaceTacToeBuilder, Status};

pub use crate::session::GameEngine;
