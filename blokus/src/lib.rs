//! Rules engine for a four-player polyomino placement game on a 20x20 board.
//!
//! The [`Board`] answers which moves are legal for each player, and keeps a
//! cache of all legal moves that is updated incrementally after each placement.
pub use board::*;
pub use catalog::*;
pub use errors::*;
pub use piece::*;
pub use piece_set::*;
pub use player_state::*;
pub use protocol::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod bitset;
mod board;
mod catalog;
mod errors;
mod piece;
mod piece_set;
mod player_state;
mod protocol;
mod visualization;
