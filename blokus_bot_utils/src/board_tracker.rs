use std::sync::Arc;

use blokus::{Board, PieceCatalog, Placement};

/// Keeps a local copy of the game board in sync with the list of placements
/// sent by the judge.
///
/// Only placements that weren't seen before are applied, so the board's move
/// cache stays warm between turns.
#[derive(Clone, Debug, Default)]
pub struct BoardTracker {
    board: Option<Board>,
    num_applied: usize,
}

impl BoardTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts over with an empty board.
    pub fn new_game(&mut self, catalog: Arc<PieceCatalog>) {
        self.board = Some(Board::new(catalog));
        self.num_applied = 0;
    }

    /// Applies the placements that are new since the last call, and returns the board.
    ///
    /// `placements` is the full list of placements of the current game. If it
    /// is shorter than what was seen before, the board is rebuilt from scratch.
    pub fn sync(&mut self, placements: &[Placement]) -> anyhow::Result<&Board> {
        let Some(board) = self.board.as_mut() else {
            anyhow::bail!("Asked to play a turn before a game was started");
        };
        if placements.len() < self.num_applied {
            *board = Board::new(board.catalog().clone());
            self.num_applied = 0;
        }
        for (idx, placement) in placements.iter().enumerate().skip(self.num_applied) {
            board.add_move(placement.player, placement.mv).map_err(|err| {
                anyhow::anyhow!("Placement {} by {:?} is illegal: {}", idx, placement.player, err)
            })?;
            self.num_applied = idx + 1;
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use blokus::{Move, Orientation, Player};

    use super::*;

    fn opening() -> Vec<Placement> {
        vec![
            Placement {
                player: Player::Blue,
                mv: Move::new(0, 19, 0, Orientation::IDENTITY),
            },
            Placement {
                player: Player::Yellow,
                mv: Move::new(1, 1, 0, Orientation::new(2, false).unwrap()),
            },
            Placement {
                player: Player::Red,
                mv: Move::new(0, 0, 19, Orientation::IDENTITY),
            },
        ]
    }

    #[test]
    fn incremental_sync() {
        let catalog = Arc::new(PieceCatalog::standard());
        let placements = opening();
        let mut tracker = BoardTracker::new();
        tracker.new_game(catalog.clone());
        tracker.sync(&placements[..1]).unwrap();
        let board = tracker.sync(&placements).unwrap().clone();
        assert_eq!(
            board,
            Board::from_placements(catalog.clone(), &placements).unwrap()
        );

        // A shorter history means a new game
        let board = tracker.sync(&placements[..2]).unwrap();
        assert_eq!(board.get_state(0, 19), None);
        assert_eq!(board.get_state(0, 0), Some(Player::Yellow));
    }

    #[test]
    fn sync_needs_a_game() {
        let mut tracker = BoardTracker::new();
        assert!(tracker.sync(&[]).is_err());
    }

    #[test]
    fn illegal_history_is_an_error() {
        let mut tracker = BoardTracker::new();
        tracker.new_game(Arc::new(PieceCatalog::standard()));
        let mut placements = opening();
        placements[1].player = Player::Green;
        assert!(tracker.sync(&placements).is_err());
    }
}
