use std::path::Path;
use std::sync::Arc;

use blokus::{CatalogError, PieceCatalog};

mod error;
mod game;
mod player;
mod recording;
mod turn;
pub use error::*;
pub use game::*;
pub use player::*;
pub use recording::*;
pub use turn::*;

/// The settings shared by all games of a run.
pub struct GameConfig {
    /// The pieces of each game. Its source text is sent to the bots.
    pub catalog: Arc<PieceCatalog>,
    /// How often a player may answer with an illegal move in one turn
    /// before they are forced to pass.
    pub max_attempts: usize,
}

impl GameConfig {
    /// A config for the standard pieces.
    pub fn standard(max_attempts: usize) -> Self {
        Self {
            catalog: Arc::new(PieceCatalog::standard()),
            max_attempts,
        }
    }

    /// A config for the pieces in the given file.
    pub fn load(pieces_path: &Path, max_attempts: usize) -> Result<Self, CatalogError> {
        Ok(Self {
            catalog: Arc::new(PieceCatalog::load(pieces_path)?),
            max_attempts,
        })
    }
}
