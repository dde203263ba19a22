//! Game state: board, turn, phase, pending ability metadata, score.
//!
//! `GameState` is a plain value. Every rules transition takes a
//! `&GameState` and returns a new one, leaving the input untouched, so a
//! presentation layer can hold the current state and swap it for whatever
//! the engine returns.
//!
//! The action history uses an `im` persistent vector so cloning a state
//! stays O(1) no matter how long the game has run.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::{Action, ActionRecord};
use super::board::Board;
use super::player::{Player, PlayerMap};
use crate::rules::GameResult;

/// Win counters, one per player.
///
/// Survives board resets; only a score reset zeroes it.
pub type Score = PlayerMap<u32>;

/// Phase of the current round. Fully determines which actions are legal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the current player to place (or attack).
    #[default]
    Playing,
    /// The current player picks an enemy piece to remove.
    SelectingRemoval,
    /// A battle was resolved; waiting for the continue action.
    BattleResult,
    /// The defender of a failed attack picks an attacker piece to claim.
    SelectingCounterAttack,
    /// Round finished. Only resets are accepted.
    GameOver,
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GamePhase::Playing => "playing",
            GamePhase::SelectingRemoval => "selecting-removal",
            GamePhase::BattleResult => "battle-result",
            GamePhase::SelectingCounterAttack => "selecting-counter-attack",
            GamePhase::GameOver => "game-over",
        };
        f.write_str(name)
    }
}

/// Record of one dice battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BattleOutcome {
    /// Player who started the battle.
    pub attacker: Player,
    /// Attacker's die, 1..=sides.
    pub attacker_roll: u8,
    /// Defender's die, 1..=sides.
    pub defender_roll: u8,
    /// Contested cell.
    pub index: usize,
    /// Empty cell awarded to the defender when the attacker had no piece
    /// left to counter-attack.
    pub compensation: Option<usize>,
}

impl BattleOutcome {
    /// Attacker takes the cell only on a strictly higher roll.
    #[must_use]
    pub const fn attacker_won(&self) -> bool {
        self.attacker_roll > self.defender_roll
    }

    #[must_use]
    pub const fn defender(&self) -> Player {
        self.attacker.opponent()
    }

    /// Player holding the contested cell after the battle.
    #[must_use]
    pub const fn victor(&self) -> Player {
        if self.attacker_won() {
            self.attacker
        } else {
            self.defender()
        }
    }
}

/// An open special ability waiting for a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PendingAbility {
    /// Two-in-a-row removal earned by `remover` placing on `trigger_index`.
    Removal { remover: Player, trigger_index: usize },
    /// `defender` held off `attacker` and may claim one attacker piece.
    CounterAttack { defender: Player, attacker: Player },
}

/// Complete state of one session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,

    /// Whose turn it is. Stays with the remover while selecting a removal
    /// and with the attacker until a battle result is acknowledged.
    pub current_player: Player,

    pub phase: GamePhase,

    /// Set once the round reaches `GameOver`.
    pub winner: Option<GameResult>,

    pub pending: Option<PendingAbility>,

    /// Most recent battle, kept until the turn passes.
    pub battle: Option<BattleOutcome>,

    pub score: Score,

    /// Turn number (starts at 1, advances when the turn passes).
    pub turn_number: u32,

    /// Actions applied since the last board reset.
    pub action_history: Vector<ActionRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Player::Marine)
    }
}

impl GameState {
    /// Fresh state with an empty board and zero score.
    #[must_use]
    pub fn new(first_player: Player) -> Self {
        Self {
            board: Board::new(),
            current_player: first_player,
            phase: GamePhase::Playing,
            winner: None,
            pending: None,
            battle: None,
            score: Score::with_default(),
            turn_number: 1,
            action_history: Vector::new(),
        }
    }

    /// Check if the round is over.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Player allowed to pick a removal target, if a removal is open.
    #[must_use]
    pub fn remover(&self) -> Option<Player> {
        match self.pending {
            Some(PendingAbility::Removal { remover, .. }) => Some(remover),
            _ => None,
        }
    }

    /// Cell whose placement opened the current removal.
    #[must_use]
    pub fn trigger_index(&self) -> Option<usize> {
        match self.pending {
            Some(PendingAbility::Removal { trigger_index, .. }) => Some(trigger_index),
            _ => None,
        }
    }

    /// Player allowed to counter-attack, if a counter-attack is open.
    #[must_use]
    pub fn counter_attacker(&self) -> Option<Player> {
        match self.pending {
            Some(PendingAbility::CounterAttack { defender, .. }) => Some(defender),
            _ => None,
        }
    }

    // === Transitions used by the rules ===

    /// Pass the turn to the other player.
    pub fn advance_turn(&mut self) {
        self.current_player = self.current_player.opponent();
        self.turn_number += 1;
        self.phase = GamePhase::Playing;
        self.pending = None;
        self.battle = None;
    }

    /// End the round with `result`, crediting a winner exactly once.
    pub fn finish(&mut self, result: GameResult) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        if let GameResult::Winner(player) = result {
            self.score[player] += 1;
        }
        self.phase = GamePhase::GameOver;
        self.winner = Some(result);
        self.pending = None;
    }

    /// Clear the board and all round state. Score is kept.
    pub fn reset_board(&mut self, first_player: Player) {
        let score = self.score.clone();
        *self = Self::new(first_player);
        self.score = score;
    }

    /// Zero the score and clear the board.
    pub fn reset_scores(&mut self, first_player: Player) {
        *self = Self::new(first_player);
    }

    // === Action History ===

    /// Append `action` by `player` to the history.
    pub fn record_action(&mut self, player: Player, action: Action) {
        let sequence = self.action_history.len() as u32;
        self.action_history
            .push_back(ActionRecord::new(player, action, self.turn_number, sequence));
    }
}
