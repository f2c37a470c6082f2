use std::path::Path;
use std::str::FromStr;

use crate::{CatalogError, InvalidPieceId, Piece, PieceSet};

static STANDARD_PIECES: &str = include_str!("../data/standard_pieces.txt");

/// The ordered, immutable list of pieces that is used in a game.
///
/// Piece ids are indices into this list. A catalog is typically created once
/// and shared (e.g. through an `Arc`) between the board and the players.
///
/// # Text format
///
/// ```text
/// 2      <- number of pieces
/// 2      <- number of rows of the first piece
/// O#
/// ##
/// 1      <- number of rows of the second piece
/// ##O##
/// ```
///
/// Any non-space character is a tile. `O`, `o` and `0` additionally mark the
/// origin of the piece, which is subtracted from all tile coordinates. If a
/// piece has no origin marker, the origin is the top-left corner of its rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PieceCatalog {
    pieces: Vec<Piece>,
    /// The text the catalog was parsed from.
    source: String,
}

impl PieceCatalog {
    /// The 21 pieces of the standard game, i.e. all polyominoes of up to 5 tiles.
    pub fn standard() -> Self {
        STANDARD_PIECES
            .parse()
            .expect("The bundled piece file is valid")
    }

    /// The text this catalog was parsed from, e.g. to hand it to another process.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Reads a catalog in the text format from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        std::fs::read_to_string(path)?.parse()
    }

    pub fn get(&self, id: usize) -> Result<&Piece, InvalidPieceId> {
        self.pieces.get(id).ok_or(InvalidPieceId {
            id,
            count: self.pieces.len(),
        })
    }

    pub fn count(&self) -> usize {
        self.pieces.len()
    }

    /// All piece ids, as a set.
    pub fn all_ids(&self) -> PieceSet {
        PieceSet::full(self.pieces.len())
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Piece)> + '_ {
        self.pieces.iter().enumerate()
    }

    /// The largest [`Piece::reach()`] of any piece.
    pub fn max_reach(&self) -> i8 {
        self.pieces.iter().map(Piece::reach).max().unwrap_or(0)
    }

    pub fn total_tiles(&self) -> usize {
        self.pieces.iter().map(Piece::num_tiles).sum()
    }
}

impl FromStr for PieceCatalog {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().collect();
        // `line_idx` is 0-based, the errors report 1-based line numbers
        let line = |line_idx: usize| {
            lines
                .get(line_idx)
                .copied()
                .ok_or(CatalogError::MissingLine { line: line_idx + 1 })
        };
        let count = |line_idx: usize| {
            let text = line(line_idx)?;
            text.trim()
                .parse::<usize>()
                .map_err(|_| CatalogError::InvalidCount {
                    line: line_idx + 1,
                    text: String::from(text),
                })
        };

        let num_pieces = count(0)?;
        if num_pieces > PieceSet::CAPACITY {
            return Err(CatalogError::TooManyPieces(num_pieces));
        }

        let mut pieces = Vec::with_capacity(num_pieces);
        let mut line_idx = 1;
        for piece_idx in 0..num_pieces {
            let num_rows = count(line_idx)?;
            let mut origin = (0, 0);
            let mut raw_tiles = Vec::new();
            for row in 0..num_rows {
                for (col, c) in line(line_idx + 1 + row)?.chars().enumerate() {
                    if matches!(c, 'O' | 'o' | '0') {
                        origin = (col, row);
                    }
                    if c != ' ' {
                        raw_tiles.push((col, row));
                    }
                }
            }
            let piece = piece_from_raw_tiles(&raw_tiles, origin).map_err(|err| {
                CatalogError::InvalidShape {
                    piece: piece_idx,
                    err,
                }
            })?;
            pieces.push(piece);
            line_idx += 1 + num_rows;
        }
        Ok(Self {
            pieces,
            source: String::from(s),
        })
    }
}

fn piece_from_raw_tiles(
    raw_tiles: &[(usize, usize)],
    (x_origin, y_origin): (usize, usize),
) -> Result<Piece, crate::ShapeError> {
    // Checking the tile count first keeps the offsets below small
    if raw_tiles.len() > crate::MAX_TILES {
        return Err(crate::ShapeError::TooManyTiles(raw_tiles.len()));
    }
    let mut tiles = Vec::with_capacity(raw_tiles.len());
    for &(x, y) in raw_tiles {
        let dx = x as i64 - x_origin as i64;
        let dy = y as i64 - y_origin as i64;
        match (i8::try_from(dx), i8::try_from(dy)) {
            (Ok(dx), Ok(dy)) => tiles.push((dx, dy)),
            _ => {
                return Err(crate::ShapeError::OffsetTooLarge {
                    x: dx.clamp(-127, 127) as i8,
                    y: dy.clamp(-127, 127) as i8,
                })
            }
        }
    }
    Piece::from_tiles(&tiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Orientation, ShapeError};

    #[test]
    fn parse_with_origin() {
        let catalog: PieceCatalog = "2\n2\nO#\n##\n1\n##O##\n".parse().unwrap();
        assert_eq!(catalog.count(), 2);
        assert_eq!(
            catalog.get(0).unwrap().tiles(Orientation::IDENTITY),
            &[(0, 0), (1, 0), (0, 1), (1, 1)]
        );
        assert_eq!(
            catalog.get(1).unwrap().tiles(Orientation::IDENTITY),
            &[(-2, 0), (-1, 0), (0, 0), (1, 0), (2, 0)]
        );
    }

    #[test]
    fn origin_on_a_lower_row_and_other_fill_characters() {
        let catalog: PieceCatalog = "1\n3\nx\n0*\n +\n".parse().unwrap();
        assert_eq!(
            catalog.get(0).unwrap().tiles(Orientation::IDENTITY),
            &[(0, -1), (0, 0), (1, 0), (1, 1)]
        );
    }

    #[test]
    fn missing_origin_defaults_to_top_left() {
        let catalog: PieceCatalog = "1\n1\n ##\n".parse().unwrap();
        assert_eq!(
            catalog.get(0).unwrap().tiles(Orientation::IDENTITY),
            &[(1, 0), (2, 0)]
        );
        assert!(!catalog.get(0).unwrap().covers_origin());
    }

    #[test]
    fn invalid_piece_id() {
        let catalog = PieceCatalog::standard();
        assert!(catalog.get(20).is_ok());
        assert_eq!(catalog.get(21), Err(InvalidPieceId { id: 21, count: 21 }));
    }

    #[test]
    fn standard_catalog() {
        let catalog = PieceCatalog::standard();
        assert_eq!(catalog.count(), 21);
        assert_eq!(catalog.total_tiles(), 89);
        assert_eq!(catalog.max_reach(), 2);
        assert!(catalog.iter().all(|(_, piece)| piece.covers_origin()));
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join(format!("blokus_pieces_{}.txt", std::process::id()));
        let text = "2\n1\nO\n2\nO#\n #\n";
        std::fs::write(&path, text).unwrap();
        let loaded = PieceCatalog::load(&path);
        std::fs::remove_file(&path).unwrap();

        let catalog = loaded.unwrap();
        assert_eq!(catalog, text.parse().unwrap());
        assert_eq!(catalog.count(), 2);
        assert_eq!(catalog.source(), text);
        assert_eq!(
            catalog.get(1).unwrap().tiles(Orientation::IDENTITY),
            &[(0, 0), (1, 0), (1, 1)]
        );
    }

    #[test]
    fn load_missing_file() {
        let path = std::env::temp_dir().join("blokus_pieces_that_do_not_exist.txt");
        let err = PieceCatalog::load(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn standard_source_round_trips() {
        let catalog = PieceCatalog::standard();
        assert_eq!(catalog.source(), STANDARD_PIECES);
        assert_eq!(catalog.source().parse::<PieceCatalog>().unwrap(), catalog);
    }

    #[test]
    fn malformed_files() {
        assert!(matches!(
            "2\n1\nO\n".parse::<PieceCatalog>(),
            Err(CatalogError::MissingLine { line: 4 })
        ));
        assert!(matches!(
            "one\n".parse::<PieceCatalog>(),
            Err(CatalogError::InvalidCount { line: 1, .. })
        ));
        assert!(matches!(
            "1\n1\n###O##\n".parse::<PieceCatalog>(),
            Err(CatalogError::InvalidShape {
                piece: 0,
                err: ShapeError::TooManyTiles(6)
            })
        ));
        assert!(matches!(
            "1\n1\n   \n".parse::<PieceCatalog>(),
            Err(CatalogError::InvalidShape {
                piece: 0,
                err: ShapeError::NoTiles
            })
        ));
        assert!(matches!(
            "65\n".parse::<PieceCatalog>(),
            Err(CatalogError::TooManyPieces(65))
        ));
    }
}
