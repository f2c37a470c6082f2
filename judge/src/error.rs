use blokus::{IllegalPlacement, Move};

#[derive(Debug, PartialEq, Eq)]
/// Error type for one turn.
pub enum IllegalMove {
    PieceAlreadyUsed { piece: usize },
    IllegalPlacement { mv: Move, err: IllegalPlacement },
}

impl std::error::Error for IllegalMove {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            IllegalMove::IllegalPlacement { err, .. } => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::PieceAlreadyUsed { piece } => {
                write!(f, "Tried to place piece {}, which was already used", piece)
            }
            IllegalMove::IllegalPlacement { mv, err: _ } => write!(
                f,
                "Piece {} can't be placed at ({}, {}) with rotation {}{}",
                mv.piece,
                mv.x,
                mv.y,
                mv.rotation,
                if mv.flip { " flipped" } else { "" }
            ),
        }
    }
}
