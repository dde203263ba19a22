//! Status line model.
//!
//! `Status` summarizes what the board is waiting for; its `Display` is the
//! themed line shown above the grid.

use serde::{Deserialize, Serialize};

use super::game::SpaceTacToe;
use crate::core::{BattleOutcome, GamePhase, GameState, Player, RemovalRule};
use crate::rules::{GameResult, RulesEngine};

/// What the current state is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// `Player` is to place (or attack).
    Advance(Player),
    /// `Player` picks an enemy piece to remove.
    SelectRemoval { remover: Player, adjacent_only: bool },
    /// `Player` picks an attacker piece to claim.
    SelectCounterAttack(Player),
    /// A battle was resolved and awaits acknowledgement.
    BattleReport(BattleOutcome),
    Victory(Player),
    Stalemate,
}

impl SpaceTacToe {
    /// Status line for `state`.
    #[must_use]
    pub fn status(&self, state: &GameState) -> Status {
        match state.phase {
            GamePhase::Playing => Status::Advance(state.current_player),
            GamePhase::SelectingRemoval => Status::SelectRemoval {
                remover: state.remover().unwrap_or(state.current_player),
                adjacent_only: self.config().removal_rule == RemovalRule::AdjacentToPlacement,
            },
            GamePhase::SelectingCounterAttack => Status::SelectCounterAttack(
                state
                    .counter_attacker()
                    .unwrap_or(state.current_player.opponent()),
            ),
            GamePhase::BattleResult => match state.battle {
                Some(outcome) => Status::BattleReport(outcome),
                None => Status::Advance(state.current_player),
            },
            GamePhase::GameOver => match state.winner {
                Some(GameResult::Winner(player)) => Status::Victory(player),
                _ => Status::Stalemate,
            },
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Advance(player) => write!(f, "{} advance", player.faction_name()),
            Status::SelectRemoval { remover, adjacent_only } => {
                let target = if *adjacent_only { "an adjacent enemy" } else { "an enemy" };
                write!(
                    f,
                    "{} strike with precision! Select {} to eliminate.",
                    remover.ability_name(),
                    target
                )
            }
            Status::SelectCounterAttack(player) => write!(
                f,
                "{} hold the line! Select an enemy piece to seize.",
                player.ability_name()
            ),
            Status::BattleReport(outcome) => {
                write!(
                    f,
                    "{} roll {} against {}: ",
                    outcome.attacker.faction_name(),
                    outcome.attacker_roll,
                    outcome.defender_roll
                )?;
                if outcome.attacker_won() {
                    write!(f, "the position is taken!")?;
                } else {
                    write!(f, "{} repel the assault!", outcome.defender().faction_name())?;
                }
                if let Some(cell) = outcome.compensation {
                    write!(f, " Reinforcements arrive at sector {cell}.")?;
                }
                Ok(())
            }
            Status::Victory(player) => {
                write!(f, "{} claims victory in this engagement!", player.victor_name())
            }
            Status::Stalemate => write!(f, "Stalemate! The battle rages eternal..."),
        }
    }
}
