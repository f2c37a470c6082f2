use serde::{Deserialize, Serialize};

use crate::ShapeError;

/// The largest number of tiles a piece may have.
pub const MAX_TILES: usize = 5;

/// One of the 8 ways a piece can be laid down: 4 clockwise rotations, each
/// optionally mirrored horizontally.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Orientation {
    rotation: u8,
    flip: bool,
}

impl Orientation {
    /// All orientations, rotation-major, unflipped before flipped.
    ///
    /// `Orientation::ALL[o.index()] == o` for every orientation `o`.
    pub const ALL: [Orientation; 8] = [
        Orientation { rotation: 0, flip: false },
        Orientation { rotation: 0, flip: true },
        Orientation { rotation: 1, flip: false },
        Orientation { rotation: 1, flip: true },
        Orientation { rotation: 2, flip: false },
        Orientation { rotation: 2, flip: true },
        Orientation { rotation: 3, flip: false },
        Orientation { rotation: 3, flip: true },
    ];

    /// The base shape, as it was defined.
    pub const IDENTITY: Orientation = Orientation {
        rotation: 0,
        flip: false,
    };

    /// Returns `None` if `rotation` is not in `0..=3`.
    pub fn new(rotation: u8, flip: bool) -> Option<Self> {
        (rotation < 4).then_some(Self { rotation, flip })
    }

    /// Number of 90° clockwise steps.
    pub fn rotation(self) -> u8 {
        self.rotation
    }

    pub fn flip(self) -> bool {
        self.flip
    }

    /// A dense index in `0..8`.
    pub fn index(self) -> usize {
        usize::from(self.rotation) * 2 + usize::from(self.flip)
    }

    fn transform(self, (x, y): (i8, i8)) -> (i8, i8) {
        let (x, y) = match self.rotation {
            0 => (x, y),
            1 => (y, -x),
            2 => (-x, -y),
            _ => (-y, x),
        };
        if self.flip {
            (-x, y)
        } else {
            (x, y)
        }
    }
}

/// An immutable polyomino of 1 to [`MAX_TILES`] tiles.
///
/// Tiles are offsets relative to the piece's origin. All 8 orientations are
/// computed once on construction; every orientation lists its tiles in the
/// same order as the base shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    num_tiles: u8,
    /// Indexed by [`Orientation::index()`]. Only the first `num_tiles` entries are used.
    variants: [[(i8, i8); MAX_TILES]; 8],
}

impl Piece {
    /// Builds a piece from parallel lists of x and y offsets.
    pub fn new(xs: &[i8], ys: &[i8]) -> Result<Self, ShapeError> {
        if xs.len() != ys.len() {
            return Err(ShapeError::MismatchedLengths {
                xs: xs.len(),
                ys: ys.len(),
            });
        }
        let tiles: Vec<(i8, i8)> = xs.iter().copied().zip(ys.iter().copied()).collect();
        Self::from_tiles(&tiles)
    }

    pub fn from_tiles(tiles: &[(i8, i8)]) -> Result<Self, ShapeError> {
        if tiles.is_empty() {
            return Err(ShapeError::NoTiles);
        }
        if tiles.len() > MAX_TILES {
            return Err(ShapeError::TooManyTiles(tiles.len()));
        }
        for (idx, &(x, y)) in tiles.iter().enumerate() {
            if tiles[..idx].contains(&(x, y)) {
                return Err(ShapeError::DuplicateTile { x, y });
            }
            // Negating i8::MIN would overflow in the rotations
            if x == i8::MIN || y == i8::MIN {
                return Err(ShapeError::OffsetTooLarge { x, y });
            }
        }

        let mut variants = [[(0, 0); MAX_TILES]; 8];
        for orientation in Orientation::ALL {
            let variant = &mut variants[orientation.index()];
            for (slot, &tile) in variant.iter_mut().zip(tiles) {
                *slot = orientation.transform(tile);
            }
        }
        Ok(Self {
            num_tiles: tiles.len() as u8,
            variants,
        })
    }

    pub fn num_tiles(&self) -> usize {
        usize::from(self.num_tiles)
    }

    /// The tile offsets of the piece laid down in the given orientation.
    pub fn tiles(&self, orientation: Orientation) -> &[(i8, i8)] {
        &self.variants[orientation.index()][..self.num_tiles()]
    }

    /// The absolute position of one tile of the piece, when the piece's origin
    /// is placed at `(x_offset, y_offset)`.
    ///
    /// Returns `None` if the position can't be represented, which callers treat
    /// like any other out-of-bounds coordinate.
    ///
    /// Panics if `tile_idx` is not smaller than [`Self::num_tiles()`].
    pub fn tile_at(
        &self,
        orientation: Orientation,
        tile_idx: usize,
        x_offset: i8,
        y_offset: i8,
    ) -> Option<(i8, i8)> {
        let (x, y) = self.tiles(orientation)[tile_idx];
        Some((x.checked_add(x_offset)?, y.checked_add(y_offset)?))
    }

    /// The largest distance, in either axis, between the origin and a tile.
    ///
    /// This does not depend on the orientation.
    pub fn reach(&self) -> i8 {
        self.tiles(Orientation::IDENTITY)
            .iter()
            .map(|&(x, y)| x.abs().max(y.abs()))
            .max()
            .unwrap_or(0)
    }

    /// Whether the origin itself is one of the tiles.
    pub fn covers_origin(&self) -> bool {
        self.tiles(Orientation::IDENTITY).contains(&(0, 0))
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::ArbitraryShape;

    fn l_tromino() -> Piece {
        Piece::new(&[0, 1, 0], &[0, 0, 1]).unwrap()
    }

    #[test]
    fn rotations_follow_the_clockwise_formulas() {
        let piece = l_tromino();
        let at = |rotation, flip| piece.tiles(Orientation::new(rotation, flip).unwrap()).to_vec();
        assert_eq!(at(0, false), vec![(0, 0), (1, 0), (0, 1)]);
        assert_eq!(at(1, false), vec![(0, 0), (0, -1), (1, 0)]);
        assert_eq!(at(2, false), vec![(0, 0), (-1, 0), (0, -1)]);
        assert_eq!(at(3, false), vec![(0, 0), (0, 1), (-1, 0)]);
        assert_eq!(at(0, true), vec![(0, 0), (-1, 0), (0, 1)]);
        assert_eq!(at(1, true), vec![(0, 0), (0, -1), (-1, 0)]);
    }

    #[test]
    fn tile_at_adds_the_offset() {
        let piece = l_tromino();
        let orientation = Orientation::new(2, false).unwrap();
        assert_eq!(piece.tile_at(orientation, 1, 10, 4), Some((9, 4)));
        assert_eq!(piece.tile_at(orientation, 1, i8::MIN, 4), None);
    }

    #[test]
    fn invalid_shapes_are_rejected() {
        assert_eq!(Piece::new(&[], &[]), Err(ShapeError::NoTiles));
        assert_eq!(
            Piece::new(&[0, 1, 2, 3, 4, 5], &[0; 6]),
            Err(ShapeError::TooManyTiles(6))
        );
        assert_eq!(
            Piece::new(&[0, 1], &[0]),
            Err(ShapeError::MismatchedLengths { xs: 2, ys: 1 })
        );
        assert_eq!(
            Piece::new(&[0, 0], &[1, 1]),
            Err(ShapeError::DuplicateTile { x: 0, y: 1 })
        );
    }

    #[test]
    fn orientation_indices_are_dense() {
        for (idx, orientation) in Orientation::ALL.into_iter().enumerate() {
            assert_eq!(orientation.index(), idx);
        }
        assert_eq!(Orientation::new(4, false), None);
    }

    quickcheck! {
        fn identity_variant_is_the_base_shape(shape: ArbitraryShape) -> bool {
            let piece = Piece::from_tiles(&shape.0).unwrap();
            piece.tiles(Orientation::IDENTITY) == shape.0.as_slice()
        }

        fn half_turn_twice_is_identity(shape: ArbitraryShape) -> bool {
            let piece = Piece::from_tiles(&shape.0).unwrap();
            let half_turn = Orientation::new(2, false).unwrap();
            let once = Piece::from_tiles(piece.tiles(half_turn)).unwrap();
            once.tiles(half_turn) == shape.0.as_slice()
        }

        fn flip_is_an_involution(shape: ArbitraryShape) -> bool {
            let piece = Piece::from_tiles(&shape.0).unwrap();
            let mirror = Orientation::new(0, true).unwrap();
            let once = Piece::from_tiles(piece.tiles(mirror)).unwrap();
            once.tiles(mirror) == shape.0.as_slice()
        }

        fn all_variants_keep_tile_count_and_reach(shape: ArbitraryShape) -> bool {
            let piece = Piece::from_tiles(&shape.0).unwrap();
            Orientation::ALL.into_iter().all(|o| {
                let tiles = piece.tiles(o);
                tiles.len() == shape.0.len()
                    && tiles.iter().map(|&(x, y)| x.abs().max(y.abs())).max() == Some(piece.reach())
            })
        }
    }
}
