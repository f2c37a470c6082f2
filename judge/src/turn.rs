use blokus::{Board, Move, PlayTurnResponse, Player, PlayerState};

use crate::error::IllegalMove;

/// Summarizes the outcome of playing a move.
#[derive(Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Passed,
    Placed { mv: Move, tiles: u32 },
}

/// Applies a player's response to the board and their state.
///
/// On error, neither the board nor the state is changed.
pub fn execute_turn(
    state: &mut PlayerState,
    board: &mut Board,
    player: Player,
    response: PlayTurnResponse,
) -> Result<TurnOutcome, IllegalMove> {
    let Some(mv) = response.0 else {
        state.passed = true;
        return Ok(TurnOutcome::Passed);
    };
    if !state.remaining.contains(mv.piece) {
        return Err(IllegalMove::PieceAlreadyUsed { piece: mv.piece });
    }
    let tiles = board
        .add_move(player, mv)
        .map_err(|err| IllegalMove::IllegalPlacement { mv, err })?;
    state.remaining = state.remaining.remove(mv.piece);
    state.score += tiles;
    Ok(TurnOutcome::Placed { mv, tiles })
}
