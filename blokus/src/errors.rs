/// The error type for constructing a [`Piece`](crate::Piece) from tile offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeError {
    NoTiles,
    TooManyTiles(usize),
    MismatchedLengths { xs: usize, ys: usize },
    DuplicateTile { x: i8, y: i8 },
    OffsetTooLarge { x: i8, y: i8 },
}

impl std::error::Error for ShapeError {}

impl std::fmt::Display for ShapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeError::NoTiles => write!(f, "A piece needs at least one tile"),
            ShapeError::TooManyTiles(n) => write!(
                f,
                "A piece can have at most {} tiles, but {} were given",
                crate::MAX_TILES,
                n
            ),
            ShapeError::MismatchedLengths { xs, ys } => write!(
                f,
                "Got {} x coordinates but {} y coordinates",
                xs, ys
            ),
            ShapeError::DuplicateTile { x, y } => {
                write!(f, "The tile ({}, {}) was given more than once", x, y)
            }
            ShapeError::OffsetTooLarge { x, y } => {
                write!(f, "The tile offset ({}, {}) is too large", x, y)
            }
        }
    }
}

/// The error type for looking up a piece id that is not in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidPieceId {
    pub id: usize,
    pub count: usize,
}

impl std::error::Error for InvalidPieceId {}

impl std::fmt::Display for InvalidPieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "There is no piece {}, the catalog has {} pieces",
            self.id, self.count
        )
    }
}

/// The error type for [`Board::check_move()`](crate::Board::check_move) and
/// [`Board::add_move()`](crate::Board::add_move).
///
/// The board is never modified when this is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IllegalPlacement {
    UnknownPiece(InvalidPieceId),
    InvalidRotation { rotation: u8 },
    OutOfBounds { x: i8, y: i8 },
    Occupied { x: i8, y: i8 },
    AdjacentToOwnTile { x: i8, y: i8 },
    NotAttached,
}

impl std::error::Error for IllegalPlacement {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IllegalPlacement::UnknownPiece(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for IllegalPlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalPlacement::UnknownPiece(_) => write!(f, "The move uses an unknown piece"),
            IllegalPlacement::InvalidRotation { rotation } => write!(
                f,
                "The rotation must be between 0 and 3, but was {}",
                rotation
            ),
            IllegalPlacement::OutOfBounds { x, y } => {
                write!(f, "The tile ({}, {}) is outside of the board", x, y)
            }
            IllegalPlacement::Occupied { x, y } => {
                write!(f, "The tile ({}, {}) is already taken", x, y)
            }
            IllegalPlacement::AdjacentToOwnTile { x, y } => write!(
                f,
                "The tile ({}, {}) touches an edge of one of the player's own tiles",
                x, y
            ),
            IllegalPlacement::NotAttached => write!(
                f,
                "No tile touches a corner of the player's own tiles or their starting corner"
            ),
        }
    }
}

/// The error type for parsing a [`PieceCatalog`](crate::PieceCatalog).
#[derive(Debug)]
pub enum CatalogError {
    Io(std::io::Error),
    /// Line numbers start at 1.
    MissingLine { line: usize },
    InvalidCount { line: usize, text: String },
    InvalidShape { piece: usize, err: ShapeError },
    TooManyPieces(usize),
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(err) => Some(err),
            CatalogError::InvalidShape { err, .. } => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Io(_) => write!(f, "Could not read the piece file"),
            CatalogError::MissingLine { line } => {
                write!(f, "The piece file ended early, expected line {}", line)
            }
            CatalogError::InvalidCount { line, text } => {
                write!(f, "Expected a number on line {}, found {:?}", line, text)
            }
            CatalogError::InvalidShape { piece, .. } => {
                write!(f, "Piece {} has an invalid shape", piece)
            }
            CatalogError::TooManyPieces(n) => write!(
                f,
                "At most {} pieces are supported, but the file has {}",
                crate::PieceSet::CAPACITY,
                n
            ),
        }
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::Io(err)
    }
}
