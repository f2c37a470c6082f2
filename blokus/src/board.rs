mod move_cache;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use move_cache::*;

use crate::{IllegalPlacement, Orientation, Piece, PieceCatalog};

pub const BOARD_WIDTH: i8 = 20;
pub const BOARD_HEIGHT: i8 = 20;
const NUM_CELLS: usize = BOARD_WIDTH as usize * BOARD_HEIGHT as usize;

const ORTHOGONAL_NEIGHBORS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL_NEIGHBORS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// One of the four players, in turn order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Player {
    Blue,
    Yellow,
    Red,
    Green,
}

impl Player {
    pub const ALL: [Player; 4] = [Player::Blue, Player::Yellow, Player::Red, Player::Green];

    pub fn index(self) -> usize {
        self as usize
    }

    /// The player whose turn comes after this one.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % 4]
    }

    /// The cell in which this player has to start.
    pub fn starting_corner(self) -> (i8, i8) {
        match self {
            Player::Blue => (BOARD_WIDTH - 1, 0),
            Player::Yellow => (0, 0),
            Player::Red => (0, BOARD_HEIGHT - 1),
            Player::Green => (BOARD_WIDTH - 1, BOARD_HEIGHT - 1),
        }
    }
}

/// A candidate placement of a piece.
///
/// `x` and `y` is where the origin of the piece goes. The rotation is the
/// number of 90° clockwise turns, and must be between 0 and 3 for the move
/// to be valid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub piece: usize,
    pub x: i8,
    pub y: i8,
    pub rotation: u8,
    pub flip: bool,
}

impl Move {
    pub fn new(piece: usize, x: i8, y: i8, orientation: Orientation) -> Self {
        Self {
            piece,
            x,
            y,
            rotation: orientation.rotation(),
            flip: orientation.flip(),
        }
    }

    /// `None` if the rotation is out of range.
    pub fn orientation(&self) -> Option<Orientation> {
        Orientation::new(self.rotation, self.flip)
    }
}

/// A placed [`Move`], tagged with who made it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub player: Player,
    #[serde(rename = "move")]
    pub mv: Move,
}

/// Per-cell flags of one player.
#[derive(Clone, PartialEq, Eq)]
struct PlayerGrid {
    /// The player may put a tile here: the cell is free and doesn't share an
    /// edge with one of the player's tiles. Only ever goes from `true` to `false`.
    legal: [bool; NUM_CELLS],
    /// The cell shares a corner with one of the player's tiles, or is the
    /// player's starting corner. Only ever goes from `false` to `true`.
    connected: [bool; NUM_CELLS],
}

impl PlayerGrid {
    fn new() -> Self {
        Self {
            legal: [true; NUM_CELLS],
            connected: [false; NUM_CELLS],
        }
    }
}

/// The 20x20 game board for four players.
///
/// Besides which player occupies which cell, the board tracks for each
/// player which cells they may still use, and which cells their next piece
/// may attach to. Placing a piece updates these in time proportional to the
/// piece size, followed by an update of the [move cache](CachedMoves) in a
/// bounded area around the piece.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    catalog: Arc<PieceCatalog>,
    /// Cells are only ever set, never cleared.
    occupancy: [Option<Player>; NUM_CELLS],
    grids: [PlayerGrid; 4],
    move_cache: MoveCache,
}

fn cell_idx(x: i8, y: i8) -> usize {
    debug_assert!(in_bounds(x, y));
    y as usize * BOARD_WIDTH as usize + x as usize
}

fn in_bounds(x: i8, y: i8) -> bool {
    (0..BOARD_WIDTH).contains(&x) && (0..BOARD_HEIGHT).contains(&y)
}

impl Board {
    /// Creates an empty board where each player's starting corner is
    /// connected, and primes the move cache around the starting corners.
    pub fn new(catalog: Arc<PieceCatalog>) -> Self {
        let mut grids = [
            PlayerGrid::new(),
            PlayerGrid::new(),
            PlayerGrid::new(),
            PlayerGrid::new(),
        ];
        for player in Player::ALL {
            let (x, y) = player.starting_corner();
            grids[player.index()].connected[cell_idx(x, y)] = true;
        }
        let move_cache = MoveCache::new(&catalog);
        let mut board = Self {
            catalog,
            occupancy: [None; NUM_CELLS],
            grids,
            move_cache,
        };
        for player in Player::ALL {
            let (x, y) = player.starting_corner();
            board.refresh_move_cache(player, x, y);
        }
        board
    }

    /// Creates a board and plays the given moves on it, in order.
    pub fn from_placements(
        catalog: Arc<PieceCatalog>,
        placements: &[Placement],
    ) -> Result<Self, IllegalPlacement> {
        let mut board = Self::new(catalog);
        for placement in placements {
            board.add_move(placement.player, placement.mv)?;
        }
        Ok(board)
    }

    pub fn catalog(&self) -> &Arc<PieceCatalog> {
        &self.catalog
    }

    pub fn board_w(&self) -> i8 {
        BOARD_WIDTH
    }

    pub fn board_h(&self) -> i8 {
        BOARD_HEIGHT
    }

    /// Who occupies the cell, if anyone. Cells outside the board are free.
    pub fn get_state(&self, x: i8, y: i8) -> Option<Player> {
        if in_bounds(x, y) {
            self.occupancy[cell_idx(x, y)]
        } else {
            None
        }
    }

    /// Whether `player` may put a tile at `(x, y)`: the cell is on the board,
    /// free, and does not share an edge with one of `player`'s tiles.
    pub fn check_tile_legal(&self, player: Player, x: i8, y: i8) -> bool {
        in_bounds(x, y) && self.grids[player.index()].legal[cell_idx(x, y)]
    }

    /// Whether `(x, y)` shares a corner with one of `player`'s tiles, or is
    /// their starting corner.
    ///
    /// This does not check whether the tile is legal.
    pub fn check_tile_attached(&self, player: Player, x: i8, y: i8) -> bool {
        in_bounds(x, y) && self.grids[player.index()].connected[cell_idx(x, y)]
    }

    /// Checks whether `player` can make the move, and if not, why.
    ///
    /// All tiles are checked for legality before the attachment is checked,
    /// so a move that is both illegal and unattached reports the illegal tile.
    pub fn check_move(&self, player: Player, mv: Move) -> Result<(), IllegalPlacement> {
        let (piece, orientation) = self.resolve(mv)?;
        self.check_piece(player, piece, orientation, mv.x, mv.y)
    }

    /// Looks up the move's piece and orientation.
    fn resolve(&self, mv: Move) -> Result<(&Piece, Orientation), IllegalPlacement> {
        let piece = self
            .catalog
            .get(mv.piece)
            .map_err(IllegalPlacement::UnknownPiece)?;
        let orientation = mv
            .orientation()
            .ok_or(IllegalPlacement::InvalidRotation {
                rotation: mv.rotation,
            })?;
        Ok((piece, orientation))
    }

    /// Whether `player` can make the move.
    pub fn check_move_valid(&self, player: Player, mv: Move) -> bool {
        self.check_move(player, mv).is_ok()
    }

    fn check_piece(
        &self,
        player: Player,
        piece: &Piece,
        orientation: Orientation,
        x: i8,
        y: i8,
    ) -> Result<(), IllegalPlacement> {
        let grid = &self.grids[player.index()];
        let mut attached = false;
        for tile_idx in 0..piece.num_tiles() {
            let (tile_x, tile_y) = piece
                .tile_at(orientation, tile_idx, x, y)
                .filter(|&(tile_x, tile_y)| in_bounds(tile_x, tile_y))
                .ok_or_else(|| {
                    let (dx, dy) = piece.tiles(orientation)[tile_idx];
                    IllegalPlacement::OutOfBounds {
                        x: x.saturating_add(dx),
                        y: y.saturating_add(dy),
                    }
                })?;
            let idx = cell_idx(tile_x, tile_y);
            if !grid.legal[idx] {
                return Err(if self.occupancy[idx].is_some() {
                    IllegalPlacement::Occupied {
                        x: tile_x,
                        y: tile_y,
                    }
                } else {
                    IllegalPlacement::AdjacentToOwnTile {
                        x: tile_x,
                        y: tile_y,
                    }
                });
            }
            attached |= grid.connected[idx];
        }
        if attached {
            Ok(())
        } else {
            Err(IllegalPlacement::NotAttached)
        }
    }

    /// Places the move's tiles for `player` and returns the number of tiles placed.
    ///
    /// If the move is not valid, the board is left unchanged.
    pub fn add_move(&mut self, player: Player, mv: Move) -> Result<u32, IllegalPlacement> {
        let (piece, orientation) = self.resolve(mv)?;
        self.check_piece(player, piece, orientation, mv.x, mv.y)?;
        let piece = *piece;

        for &(dx, dy) in piece.tiles(orientation) {
            let (x, y) = (mv.x + dx, mv.y + dy);
            let idx = cell_idx(x, y);
            debug_assert!(self.occupancy[idx].is_none());
            self.occupancy[idx] = Some(player);

            // Nobody can play on this cell anymore
            for grid in &mut self.grids {
                grid.legal[idx] = false;
            }

            let grid = &mut self.grids[player.index()];
            for (nx, ny) in ORTHOGONAL_NEIGHBORS {
                if in_bounds(x + nx, y + ny) {
                    grid.legal[cell_idx(x + nx, y + ny)] = false;
                }
            }
            for (nx, ny) in DIAGONAL_NEIGHBORS {
                if in_bounds(x + nx, y + ny) {
                    grid.connected[cell_idx(x + nx, y + ny)] = true;
                }
            }
        }

        self.refresh_move_cache(player, mv.x, mv.y);
        Ok(piece.num_tiles() as u32)
    }

    /// Every move `player` can currently make, ordered by row, then column of
    /// the move's origin.
    ///
    /// This doesn't take into account which pieces the player has already
    /// used. Origins that were never near any placement or starting corner
    /// contribute no moves, see [`CachedMoves::Uncomputed`].
    pub fn all_moves(&self, player: Player) -> Vec<Move> {
        self.move_cache.all_moves(player)
    }

    /// The cached moves of `player` that have their origin at `(x, y)`.
    pub fn cached_moves(&self, player: Player, x: i8, y: i8) -> &CachedMoves {
        if in_bounds(x, y) {
            self.move_cache.get(player, cell_idx(x, y))
        } else {
            &CachedMoves::Uncomputed
        }
    }

    /// All moves with the origin at `(x, y)` that are valid for `player`,
    /// computed without the cache.
    pub fn generate_moves_at(&self, player: Player, x: i8, y: i8) -> Vec<Move> {
        let mut moves = Vec::new();
        for (piece_id, piece) in self.catalog.iter() {
            for orientation in Orientation::ALL {
                if self.check_piece(player, piece, orientation, x, y).is_ok() {
                    moves.push(Move::new(piece_id, x, y, orientation));
                }
            }
        }
        moves
    }
}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Board(\n{}\n)", self)
    }
}
