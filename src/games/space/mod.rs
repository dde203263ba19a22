//! Space Marines vs Aliens.
//!
//! Tic-tac-toe on the 3x3 grid with house rules:
//! - Three in a row wins the round
//! - A placement that leaves two in a row (third cell open) lets the mover
//!   remove one enemy piece
//! - With battles enabled, clicking an enemy cell rolls d10 against d10 for
//!   it; a defender who holds may counter-attack

mod battle;
mod game;
mod status;

pub use game::{SpaceTacToe, SpaceTacToeBuilder};
pub use status::Status;
