//! Core types: players, board, state, actions, dice, configuration.
//!
//! Everything here is rules-agnostic data. The transitions that give the
//! data meaning live in `games::space`.

pub mod player;
pub mod board;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use player::{Cell, Player, PlayerMap};
pub use board::{adjacent_indices, is_adjacent, Board, ADJACENCY, CELL_COUNT, LINES, SIDE};
pub use rng::{DiceSource, GameRng, GameRngState, ScriptedDice};
pub use config::{RemovalRule, RulesConfig};
pub use action::{Action, ActionRecord};
pub use state::{BattleOutcome, GamePhase, GameState, PendingAbility, Score};
