//! Rules configuration.
//!
//! The three shipped rule sets differ in two switches:
//! - `RemovalRule`: which enemy pieces a two-in-a-row placement may remove
//! - `battles_enabled`: whether clicking an enemy cell starts a dice battle
//!
//! `RulesConfig::classic()`, `RulesConfig::dice_battle()` and
//! `RulesConfig::open_removal()` are the presets; the `with_*` methods
//! adjust individual switches.

use serde::{Deserialize, Serialize};

use super::player::Player;

/// Which enemy pieces the removal ability may target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemovalRule {
    /// Only enemy pieces adjacent to the placement that triggered the
    /// ability. The ability triggers only when such a piece exists.
    #[default]
    AdjacentToPlacement,
    /// Any enemy piece on the board.
    AnyOpponentPiece,
}

/// Rules configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Removal targeting rule.
    pub removal_rule: RemovalRule,

    /// Clicking an enemy-held cell during play starts a dice battle.
    pub battles_enabled: bool,

    /// Faces on each battle die (default: 10).
    pub die_sides: u8,

    /// Player who moves first after every board reset.
    pub first_player: Player,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl RulesConfig {
    /// Adjacent removal, no battles.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            removal_rule: RemovalRule::AdjacentToPlacement,
            battles_enabled: false,
            die_sides: 10,
            first_player: Player::Marine,
        }
    }

    /// Adjacent removal plus dice battles and counter-attacks.
    #[must_use]
    pub fn dice_battle() -> Self {
        Self::classic().with_battles(true)
    }

    /// Removal of any enemy piece, no battles.
    #[must_use]
    pub fn open_removal() -> Self {
        Self::classic().with_removal_rule(RemovalRule::AnyOpponentPiece)
    }

    pub fn with_removal_rule(mut self, rule: RemovalRule) -> Self {
        self.removal_rule = rule;
        self
    }

    pub fn with_battles(mut self, enabled: bool) -> Self {
        self.battles_enabled = enabled;
        self
    }

    /// Set the die size. Values below 1 are raised to 1.
    pub fn with_die_sides(mut self, sides: u8) -> Self {
        self.die_sides = sides.max(1);
        self
    }

    pub fn with_first_player(mut self, player: Player) -> Self {
        self.first_player = player;
        self
    }
}
