//! Players, cells, and per-player data storage.
//!
//! ## Player
//!
//! The two factions: Space Marines and the alien swarm. Marines move first
//! unless the rules say otherwise.
//!
//! ## Cell
//!
//! The occupant of one board position: a player's piece or nothing.
//!
//! ## PlayerMap
//!
//! Fixed two-slot storage indexed by `Player`. Used for the score counters.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two factions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Marine,
    Alien,
}

impl Player {
    /// Both players in turn order.
    pub const ALL: [Player; 2] = [Player::Marine, Player::Alien];

    /// The other player.
    ///
    /// ```
    /// use space_tac_toe::core::Player;
    ///
    /// assert_eq!(Player::Marine.opponent(), Player::Alien);
    /// assert_eq!(Player::Alien.opponent(), Player::Marine);
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::Marine => Player::Alien,
            Player::Alien => Player::Marine,
        }
    }

    /// Slot index (0 for marines, 1 for aliens).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Player::Marine => 0,
            Player::Alien => 1,
        }
    }

    /// Name shown while this faction is on the move.
    #[must_use]
    pub const fn faction_name(self) -> &'static str {
        match self {
            Player::Marine => "Space Marines",
            Player::Alien => "Tyranid Swarm",
        }
    }

    /// Name shown when this faction uses a special ability.
    #[must_use]
    pub const fn ability_name(self) -> &'static str {
        match self {
            Player::Marine => "The Emperor's Finest",
            Player::Alien => "The Hive Mind",
        }
    }

    /// Name shown when this faction wins.
    #[must_use]
    pub const fn victor_name(self) -> &'static str {
        match self {
            Player::Marine => "The Imperium of Man",
            Player::Alien => "The Great Devourer",
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Marine => write!(f, "Marine"),
            Player::Alien => write!(f, "Alien"),
        }
    }
}

/// Occupant of a single board position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Marine,
    Alien,
}

impl Cell {
    /// The player holding this cell, if any.
    #[must_use]
    pub const fn owner(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Marine => Some(Player::Marine),
            Cell::Alien => Some(Player::Alien),
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Check if this cell holds `player`'s piece.
    #[must_use]
    pub fn is_held_by(self, player: Player) -> bool {
        self.owner() == Some(player)
    }

    /// Single-character glyph used by `Board`'s `Display`.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Marine => 'M',
            Cell::Alien => 'A',
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::Marine => Cell::Marine,
            Player::Alien => Cell::Alien,
        }
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use space_tac_toe::core::{Player, PlayerMap};
///
/// let mut wins: PlayerMap<u32> = PlayerMap::with_default();
/// wins[Player::Alien] += 1;
///
/// assert_eq!(wins[Player::Marine], 0);
/// assert_eq!(wins[Player::Alien], 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(Player) -> T) -> Self {
        Self {
            data: [factory(Player::Marine), factory(Player::Alien)],
        }
    }

    /// Create a new PlayerMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self::new(|_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default() -> Self
    where
        T: Default,
    {
        Self::new(|_| T::default())
    }

    #[must_use]
    pub fn get(&self, player: Player) -> &T {
        &self.data[player.index()]
    }

    pub fn get_mut(&mut self, player: Player) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (Player, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Player, &T)> {
        Player::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over (Player, &mut T) pairs in turn order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Player, &mut T)> {
        Player::ALL.into_iter().zip(self.data.iter_mut())
    }
}

impl<T> Index<Player> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: Player) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<Player> for PlayerMap<T> {
    fn index_mut(&mut self, player: Player) -> &mut Self::Output {
        self.get_mut(player)
    }
}
