use super::{cell_idx, Board, Move, Player, BOARD_HEIGHT, BOARD_WIDTH, NUM_CELLS};
use crate::PieceCatalog;

/// The smallest area, in cells in each direction from a placed piece's
/// origin, in which cached moves are updated.
pub const MIN_CACHE_RADIUS: i8 = 5;

/// The cached moves of one player with their origin in one cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CachedMoves {
    /// No piece was placed near this cell yet, so its moves were never
    /// computed. A player can't have valid moves here.
    Uncomputed,
    /// Exactly the valid moves with the origin in this cell.
    Computed(Vec<Move>),
}

impl CachedMoves {
    pub fn moves(&self) -> &[Move] {
        match self {
            CachedMoves::Uncomputed => &[],
            CachedMoves::Computed(moves) => moves,
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, CachedMoves::Computed(_))
    }
}

#[derive(Clone, PartialEq, Eq)]
pub(super) struct MoveCache {
    /// One entry per player and cell.
    entries: [Vec<CachedMoves>; 4],
    radius: i8,
    /// If every piece covers its origin, a move can't be valid when its
    /// origin cell is illegal.
    origin_is_tile: bool,
}

impl MoveCache {
    pub(super) fn new(catalog: &PieceCatalog) -> Self {
        // A placement changes legality and connectivity at most one cell away
        // from its tiles, i.e. `reach + 1` from its origin. A move is affected
        // if one of its tiles is there, so its origin is at most `reach` further.
        let radius = catalog
            .max_reach()
            .saturating_mul(2)
            .saturating_add(1)
            .max(MIN_CACHE_RADIUS);
        let uncomputed = vec![CachedMoves::Uncomputed; NUM_CELLS];
        Self {
            entries: [
                uncomputed.clone(),
                uncomputed.clone(),
                uncomputed.clone(),
                uncomputed,
            ],
            radius,
            origin_is_tile: catalog.iter().all(|(_, piece)| piece.covers_origin()),
        }
    }

    pub(super) fn get(&self, player: Player, idx: usize) -> &CachedMoves {
        &self.entries[player.index()][idx]
    }

    pub(super) fn all_moves(&self, player: Player) -> Vec<Move> {
        self.entries[player.index()]
            .iter()
            .flat_map(|entry| entry.moves().iter().copied())
            .collect()
    }
}

impl Board {
    /// The radius around a placement in which cached moves are updated.
    pub fn cache_radius(&self) -> i8 {
        self.move_cache.radius
    }

    /// Brings the cached moves of all players up to date after `placing_player`
    /// placed a piece with its origin at `(x, y)`.
    ///
    /// Only the cells within [`Self::cache_radius()`] of the origin are visited.
    /// For the placing player, every cell in this area is computed from scratch,
    /// since the placement may have attached new cells. Other players can only
    /// lose moves, so their already computed moves are filtered, and uncomputed
    /// cells stay uncomputed.
    pub(super) fn refresh_move_cache(&mut self, placing_player: Player, x: i8, y: i8) {
        let radius = self.move_cache.radius;
        let x_min = x.saturating_sub(radius).max(0);
        let x_max = x.saturating_add(radius).min(BOARD_WIDTH - 1);
        let y_min = y.saturating_sub(radius).max(0);
        let y_max = y.saturating_add(radius).min(BOARD_HEIGHT - 1);

        for player in Player::ALL {
            for cell_y in y_min..=y_max {
                for cell_x in x_min..=x_max {
                    let idx = cell_idx(cell_x, cell_y);
                    let refreshed = if self.move_cache.origin_is_tile
                        && !self.grids[player.index()].legal[idx]
                    {
                        // Legality never comes back, so neither do these moves
                        Some(Vec::new())
                    } else if player == placing_player {
                        Some(self.generate_moves_at(player, cell_x, cell_y))
                    } else {
                        match self.move_cache.get(player, idx) {
                            CachedMoves::Uncomputed => None,
                            CachedMoves::Computed(moves) => Some(
                                moves
                                    .iter()
                                    .copied()
                                    .filter(|&mv| self.check_move_valid(player, mv))
                                    .collect(),
                            ),
                        }
                    };
                    if let Some(moves) = refreshed {
                        self.move_cache.entries[player.index()][idx] = CachedMoves::Computed(moves);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use quickcheck::{QuickCheck, TestResult};

    use super::*;
    use crate::arbitrary::GameSequence;
    use crate::{Orientation, PieceCatalog};

    /// Every valid move, found by trying everything everywhere.
    fn brute_force_moves(board: &Board, player: Player) -> Vec<Move> {
        let mut moves = Vec::new();
        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                moves.extend(board.generate_moves_at(player, x, y));
            }
        }
        moves
    }

    fn cache_matches_brute_force(board: &Board) -> bool {
        Player::ALL
            .into_iter()
            .all(|player| board.all_moves(player) == brute_force_moves(board, player))
    }

    #[test]
    fn standard_radius() {
        let board = Board::new(Arc::new(PieceCatalog::standard()));
        assert_eq!(board.cache_radius(), 5);
        let long: PieceCatalog = "1\n1\nO####\n".parse().unwrap();
        assert_eq!(Board::new(Arc::new(long)).cache_radius(), 9);
    }

    #[test]
    fn opening_moves_are_cached() {
        let board = Board::new(Arc::new(PieceCatalog::standard()));
        assert!(cache_matches_brute_force(&board));
        for player in Player::ALL {
            let (x, y) = player.starting_corner();
            let moves = board.all_moves(player);
            assert!(!moves.is_empty());
            // The single tile, at the corner, in all 8 orientations
            assert_eq!(
                moves.iter().filter(|mv| mv.piece == 0).count(),
                8,
                "{:?}",
                player
            );
            assert!(board.cached_moves(player, x, y).is_computed());
        }
    }

    #[test]
    fn far_away_cells_stay_uncomputed() {
        let mut board = Board::new(Arc::new(PieceCatalog::standard()));
        assert_eq!(board.cached_moves(Player::Blue, 10, 10), &CachedMoves::Uncomputed);
        assert!(board.cached_moves(Player::Blue, 10, 10).moves().is_empty());
        board
            .add_move(Player::Blue, Move::new(0, 19, 0, Orientation::IDENTITY))
            .unwrap();
        assert!(board.cached_moves(Player::Blue, 14, 5).is_computed());
        assert!(!board.cached_moves(Player::Blue, 13, 5).is_computed());
        // Yellow's cells near Blue's piece were never computed
        assert!(!board.cached_moves(Player::Yellow, 18, 1).is_computed());
    }

    #[test]
    fn illegal_origins_are_empty() {
        let mut board = Board::new(Arc::new(PieceCatalog::standard()));
        board
            .add_move(Player::Blue, Move::new(0, 19, 0, Orientation::IDENTITY))
            .unwrap();
        for player in Player::ALL {
            assert_eq!(
                board.cached_moves(player, 19, 0),
                &CachedMoves::Computed(vec![])
            );
        }
        assert_eq!(
            board.cached_moves(Player::Blue, 18, 0),
            &CachedMoves::Computed(vec![])
        );
    }

    #[test]
    fn other_players_lose_moves() {
        let mut board = Board::new(Arc::new(PieceCatalog::standard()));
        let vertical = Orientation::new(1, false).unwrap();
        board
            .add_move(Player::Yellow, Move::new(0, 0, 0, Orientation::IDENTITY))
            .unwrap();
        let yellow_move = Move::new(2, 1, 2, vertical);
        assert!(board.all_moves(Player::Yellow).contains(&yellow_move));

        // Red climbs up the left edge until it takes (1, 2)
        for mv in [
            Move::new(9, 0, 17, vertical),
            Move::new(9, 1, 12, vertical),
            Move::new(9, 0, 7, vertical),
            Move::new(2, 1, 3, vertical),
        ] {
            board.add_move(Player::Red, mv).unwrap();
        }
        assert_eq!(board.get_state(1, 2), Some(Player::Red));
        assert!(!board.check_move_valid(Player::Yellow, yellow_move));
        assert!(!board.all_moves(Player::Yellow).contains(&yellow_move));
        assert!(cache_matches_brute_force(&board));
    }

    #[test]
    fn cache_agrees_with_brute_force_in_a_long_game() {
        let catalog = Arc::new(PieceCatalog::standard());
        let mut remaining = [catalog.all_ids(); 4];
        let mut board = Board::new(catalog);
        let mut player = Player::Blue;
        // Deterministically play the middle one of the available moves, until nobody can move
        let mut passes = 0;
        while passes < 4 {
            let moves: Vec<Move> = board
                .all_moves(player)
                .into_iter()
                .filter(|mv| remaining[player.index()].contains(mv.piece))
                .collect();
            if moves.is_empty() {
                passes += 1;
            } else {
                passes = 0;
                let mv = moves[moves.len() / 2];
                board.add_move(player, mv).unwrap();
                remaining[player.index()] = remaining[player.index()].remove(mv.piece);
            }
            if player == Player::Green {
                assert!(cache_matches_brute_force(&board));
            }
            player = player.next();
        }
    }

    #[test]
    fn cache_agrees_with_brute_force() {
        fn prop(game: GameSequence) -> TestResult {
            match Board::from_placements(game.catalog.clone(), &game.placements) {
                Ok(board) => TestResult::from_bool(cache_matches_brute_force(&board)),
                Err(err) => TestResult::error(err.to_string()),
            }
        }
        QuickCheck::new()
            .tests(20)
            .quickcheck(prop as fn(GameSequence) -> TestResult);
    }
}
