use crate::{PieceCatalog, PieceSet};

/// The state for a single player during one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerState {
    /// The pieces the player has not placed yet.
    pub remaining: PieceSet,
    /// Passing is final, the player won't be asked for moves anymore.
    pub passed: bool,
    /// The number of tiles the player has placed.
    pub score: u32,
}

impl PlayerState {
    pub fn new(catalog: &PieceCatalog) -> Self {
        Self {
            remaining: catalog.all_ids(),
            passed: false,
            score: 0,
        }
    }

    /// Whether the player is out of the game.
    pub fn is_done(&self) -> bool {
        self.passed || self.remaining.is_empty()
    }
}
