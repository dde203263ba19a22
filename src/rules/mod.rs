//! Rules engine trait for rule set implementations.
//!
//! Rule sets implement `RulesEngine` to define:
//! - Legal actions for each game state
//! - How actions produce the next state
//! - Win/draw conditions
//!
//! Rejected actions are described by `RuleViolation`.

pub mod engine;
pub mod error;

pub use engine::{GameResult, RulesEngine};
pub use error::{RuleViolation, RulesResult};
