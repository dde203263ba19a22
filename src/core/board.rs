//! The 3x3 board and its fixed geometry.
//!
//! Cells are indexed 0..=8 in row-major order:
//!
//! ```text
//! 0 | 1 | 2
//! 3 | 4 | 5
//! 6 | 7 | 8
//! ```
//!
//! Both geometry tables are static: `LINES` lists the eight winning triples
//! and `ADJACENCY` holds the king-move neighbours of every cell, built once
//! at compile time.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::Index;

use super::player::{Cell, Player};
use crate::rules::GameResult;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// Side length of the grid.
pub const SIDE: usize = 3;

/// Winning line indices: rows, columns, diagonals.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// Neighbour list for one cell. Only the first `len` entries are valid.
#[derive(Clone, Copy, Debug)]
pub struct Neighbours {
    cells: [usize; 8],
    len: usize,
}

impl Neighbours {
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.cells[..self.len]
    }
}

const fn build_adjacency() -> [Neighbours; CELL_COUNT] {
    let mut table = [Neighbours { cells: [0; 8], len: 0 }; CELL_COUNT];
    let mut index = 0;
    while index < CELL_COUNT {
        let row = (index / SIDE) as i32;
        let col = (index % SIDE) as i32;
        let mut dr = -1;
        while dr <= 1 {
            let mut dc = -1;
            while dc <= 1 {
                let r = row + dr;
                let c = col + dc;
                let inside = r >= 0 && r < SIDE as i32 && c >= 0 && c < SIDE as i32;
                if !(dr == 0 && dc == 0) && inside {
                    let len = table[index].len;
                    table[index].cells[len] = (r as usize) * SIDE + c as usize;
                    table[index].len = len + 1;
                }
                dc += 1;
            }
            dr += 1;
        }
        index += 1;
    }
    table
}

/// King-move neighbours of every cell.
pub static ADJACENCY: [Neighbours; CELL_COUNT] = build_adjacency();

/// Neighbours of `index`, including diagonals, clipped to the grid.
///
/// ```
/// use space_tac_toe::core::adjacent_indices;
///
/// assert_eq!(adjacent_indices(0), &[1, 3, 4]);
/// assert_eq!(adjacent_indices(4).len(), 8);
/// ```
///
/// # Panics
///
/// Panics if `index` is not a board index.
#[must_use]
pub fn adjacent_indices(index: usize) -> &'static [usize] {
    ADJACENCY[index].as_slice()
}

/// Check if two cells touch, diagonals included.
#[must_use]
pub fn is_adjacent(a: usize, b: usize) -> bool {
    a < CELL_COUNT && adjacent_indices(a).contains(&b)
}

/// Nine cells in row-major order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// An empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from explicit cells.
    #[must_use]
    pub const fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Cell at `index`, or `None` when the index is off the board.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Put `player`'s piece on `index`, replacing whatever was there.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a board index.
    pub fn set(&mut self, index: usize, player: Player) {
        self.cells[index] = Cell::from(player);
    }

    /// Empty the cell at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a board index.
    pub fn clear(&mut self, index: usize) {
        self.cells[index] = Cell::Empty;
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Indices of empty cells, ascending.
    #[must_use]
    pub fn empty_indices(&self) -> SmallVec<[usize; CELL_COUNT]> {
        self.indices_where(|c| c.is_empty())
    }

    /// Indices held by `player`, ascending.
    #[must_use]
    pub fn indices_of(&self, player: Player) -> SmallVec<[usize; CELL_COUNT]> {
        self.indices_where(|c| c.is_held_by(player))
    }

    /// Number of `player`'s pieces on the board.
    #[must_use]
    pub fn count(&self, player: Player) -> usize {
        self.cells.iter().filter(|c| c.is_held_by(player)).count()
    }

    /// Neighbours of `index` held by `player`'s opponent.
    #[must_use]
    pub fn adjacent_enemies(&self, index: usize, player: Player) -> SmallVec<[usize; 8]> {
        let enemy = player.opponent();
        adjacent_indices(index)
            .iter()
            .copied()
            .filter(|&i| self.cells[i].is_held_by(enemy))
            .collect()
    }

    /// Scan the eight lines for a result.
    ///
    /// Returns the owner of the first uniform, non-empty line in scan order;
    /// otherwise `Draw` when no empty cell remains; otherwise `None`.
    #[must_use]
    pub fn evaluate_lines(&self) -> Option<GameResult> {
        for [a, b, c] in LINES {
            let cell = self.cells[a];
            if let Some(player) = cell.owner() {
                if cell == self.cells[b] && cell == self.cells[c] {
                    return Some(GameResult::Winner(player));
                }
            }
        }

        if self.is_full() {
            Some(GameResult::Draw)
        } else {
            None
        }
    }

    /// Check if `player` is one placement away from completing a line:
    /// some line holds exactly two of their pieces and one empty cell.
    #[must_use]
    pub fn has_two_in_a_row(&self, player: Player) -> bool {
        LINES.iter().any(|line| {
            let mine = line.iter().filter(|&&i| self.cells[i].is_held_by(player)).count();
            let empty = line.iter().filter(|&&i| self.cells[i].is_empty()).count();
            mine == 2 && empty == 1
        })
    }

    fn indices_where(&self, pred: impl Fn(Cell) -> bool) -> SmallVec<[usize; CELL_COUNT]> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, c)| pred(*c))
            .map(|(i, _)| i)
            .collect()
    }
}

/// # Panics
///
/// Indexing panics if `index` is not a board index; use `Board::get` for a
/// checked lookup.
impl Index<usize> for Board {
    type Output = Cell;

    fn index(&self, index: usize) -> &Self::Output {
        &self.cells[index]
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, chunk) in self.cells.chunks(SIDE).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for cell in chunk {
                write!(f, "{}", cell.glyph())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const M: Cell = Cell::Marine;
    const A: Cell = Cell::Alien;
    const E: Cell = Cell::Empty;

    #[test]
    fn test_adjacency_center_and_corners() {
        let center: Vec<_> = adjacent_indices(4).to_vec();
        assert_eq!(center, vec![0, 1, 2, 3, 5, 6, 7, 8]);

        assert_eq!(adjacent_indices(0), &[1, 3, 4]);
        assert_eq!(adjacent_indices(2), &[1, 4, 5]);
        assert_eq!(adjacent_indices(6), &[3, 4, 7]);
        assert_eq!(adjacent_indices(8), &[4, 5, 7]);
    }

    #[test]
    fn test_adjacency_edges() {
        assert_eq!(adjacent_indices(1), &[0, 2, 3, 4, 5]);
        assert_eq!(adjacent_indices(3), &[0, 1, 4, 6, 7]);
    }

    #[test]
    fn test_adjacency_is_symmetric_and_irreflexive() {
        for a in 0..CELL_COUNT {
            assert!(!is_adjacent(a, a));
            for &b in adjacent_indices(a) {
                assert!(is_adjacent(b, a), "{a} -> {b} not symmetric");
            }
        }
        assert!(!is_adjacent(9, 4));
    }

    #[test]
    fn test_evaluate_empty_board() {
        assert_eq!(Board::new().evaluate_lines(), None);
    }

    #[test]
    fn test_evaluate_each_line() {
        for line in LINES {
            let mut board = Board::new();
            for i in line {
                board.set(i, Player::Alien);
            }
            assert_eq!(
                board.evaluate_lines(),
                Some(GameResult::Winner(Player::Alien)),
                "line {line:?}"
            );
        }
    }

    #[test]
    fn test_evaluate_draw() {
        let board = Board::from_cells([M, A, M, M, A, A, A, M, M]);
        assert_eq!(board.evaluate_lines(), Some(GameResult::Draw));
    }

    #[test]
    fn test_evaluate_win_on_full_board() {
        let board = Board::from_cells([M, M, M, A, A, M, A, M, A]);
        assert_eq!(board.evaluate_lines(), Some(GameResult::Winner(Player::Marine)));
    }

    #[test]
    fn test_two_in_a_row() {
        let board = Board::from_cells([M, E, E, E, M, E, E, E, E]);
        assert!(board.has_two_in_a_row(Player::Marine));
        assert!(!board.has_two_in_a_row(Player::Alien));

        // Blocked line does not count
        let blocked = Board::from_cells([M, E, E, E, M, E, E, E, A]);
        assert!(!blocked.has_two_in_a_row(Player::Marine));
    }

    #[test]
    fn test_indices_helpers() {
        let board = Board::from_cells([M, A, E, E, M, E, A, E, E]);
        assert_eq!(board.indices_of(Player::Marine).as_slice(), &[0, 4]);
        assert_eq!(board.indices_of(Player::Alien).as_slice(), &[1, 6]);
        assert_eq!(board.empty_indices().as_slice(), &[2, 3, 5, 7, 8]);
        assert_eq!(board.count(Player::Alien), 2);
        assert_eq!(board.adjacent_enemies(4, Player::Marine).as_slice(), &[1, 6]);
        assert!(board.adjacent_enemies(8, Player::Marine).is_empty());
    }

    #[test]
    fn test_get_out_of_range() {
        assert_eq!(Board::new().get(9), None);
        assert_eq!(Board::new().get(8), Some(Cell::Empty));
    }

    #[test]
    fn test_display() {
        let board = Board::from_cells([M, A, E, E, M, E, A, E, E]);
        assert_eq!(board.to_string(), "MA.\n.M.\nA..");
    }

    #[test]
    #[should_panic]
    fn test_set_off_board_panics() {
        Board::new().set(CELL_COUNT, Player::Marine);
    }
}
