//! One interactive session.
//!
//! `GameEngine` is the object a presentation layer holds: it owns the rules,
//! the current `GameState` and the dice. Each input is handled to completion
//! and the caller re-renders from `state()`.
//!
//! ## Example
//!
//! ```
//! use space_tac_toe::{GameEngine, GamePhase, Player, RulesConfig};
//!
//! let mut engine = GameEngine::with_seed(RulesConfig::classic(), 7);
//!
//! engine.click(0); // marine
//! engine.click(3); // alien
//! engine.click(1); // marine: two in a row next to the alien at 3
//!
//! assert_eq!(engine.state().phase, GamePhase::SelectingRemoval);
//! engine.click(3);
//! assert_eq!(engine.state().current_player, Player::Alien);
//! ```

use crate::core::{Action, DiceSource, GamePhase, GameRng, GameState, Player, RulesConfig};
use crate::games::space::{SpaceTacToe, Status};
use crate::rules::{RulesEngine, RulesResult};

/// Rules, state and dice for a single session.
#[derive(Clone, Debug)]
pub struct GameEngine<D: DiceSource = GameRng> {
    rules: SpaceTacToe,
    state: GameState,
    dice: D,
}

impl GameEngine<GameRng> {
    /// New session with entropy-seeded dice.
    #[must_use]
    pub fn new(config: RulesConfig) -> Self {
        Self::with_dice(config, GameRng::from_entropy())
    }

    /// New session whose dice replay the same rolls for the same seed.
    #[must_use]
    pub fn with_seed(config: RulesConfig, seed: u64) -> Self {
        Self::with_dice(config, GameRng::new(seed))
    }
}

impl<D: DiceSource> GameEngine<D> {
    /// New session with caller-supplied dice.
    pub fn with_dice(config: RulesConfig, dice: D) -> Self {
        let rules = SpaceTacToe::new(config);
        let state = rules.initial_state();
        Self { rules, state, dice }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn rules(&self) -> &SpaceTacToe {
        &self.rules
    }

    pub fn dice_mut(&mut self) -> &mut D {
        &mut self.dice
    }

    /// Status line for the current state.
    #[must_use]
    pub fn status(&self) -> Status {
        self.rules.status(&self.state)
    }

    /// The action a click on `index` stands for in the current phase.
    ///
    /// Empty cells place, enemy cells attack (when battles are on), and the
    /// selection phases target the clicked cell. `None` for clicks that mean
    /// nothing right now.
    #[must_use]
    pub fn action_for_click(&self, index: usize) -> Option<Action> {
        let cell = self.state.board.get(index)?;
        match self.state.phase {
            GamePhase::Playing if cell.is_empty() => Some(Action::Place(index)),
            GamePhase::Playing
                if self.rules.battles_enabled()
                    && cell.is_held_by(self.state.current_player.opponent()) =>
            {
                Some(Action::Attack(index))
            }
            GamePhase::SelectingRemoval => Some(Action::Remove(index)),
            GamePhase::SelectingCounterAttack => Some(Action::CounterAttack(index)),
            _ => None,
        }
    }

    /// Handle a click on cell `index`. Meaningless or illegal clicks are
    /// ignored.
    pub fn click(&mut self, index: usize) -> &GameState {
        if let Some(action) = self.action_for_click(index) {
            self.dispatch(action);
        }
        &self.state
    }

    /// Acknowledge a battle result.
    pub fn continue_turn(&mut self) -> &GameState {
        self.dispatch(Action::Continue)
    }

    /// "New Battle": clear the board, keep the score.
    pub fn new_battle(&mut self) -> &GameState {
        self.dispatch(Action::ResetBoard)
    }

    /// "Reset War": clear the board and the score.
    pub fn reset_war(&mut self) -> &GameState {
        self.dispatch(Action::ResetScores)
    }

    /// Apply `action`, ignoring it if illegal.
    pub fn dispatch(&mut self, action: Action) -> &GameState {
        self.state = self.rules.apply(&self.state, &action, &mut self.dice);
        &self.state
    }

    /// Apply `action`, reporting why it was rejected. State is unchanged on
    /// error.
    pub fn try_dispatch(&mut self, action: Action) -> RulesResult<&GameState> {
        self.state = self.rules.try_apply(&self.state, &action, &mut self.dice)?;
        Ok(&self.state)
    }

    /// Win count for `player`.
    #[must_use]
    pub fn score(&self, player: Player) -> u32 {
        self.state.score[player]
    }
}
