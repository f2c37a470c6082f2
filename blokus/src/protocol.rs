use serde::{Deserialize, Serialize};

use crate::{Move, PieceSet, Placement, Player};

/// Request for a bot to do something.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Request to reset the bot's state for a new game.
    ///
    /// The response should be an [`Okay`].
    NewGame {
        /// The seat the bot plays in this game.
        player: Player,
        /// The pieces of this game, in the text format of
        /// [`PieceCatalog`](crate::PieceCatalog).
        pieces: String,
    },
    /// Request to play the next turn.
    ///
    /// The response should be a [`PlayTurnResponse`].
    PlayTurn {
        player: Player,
        /// Every piece placed so far, by all players, in order.
        placements: Vec<Placement>,
        /// The ids of the pieces the bot may still use.
        remaining_pieces: PieceSet,
    },
    /// The bot should shut down.
    Bye,
}

/// Dummy struct for use in bot communication.
///
/// Used to signal an acknowledgement without data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Okay();

/// The move to make in this turn, or `None` to pass.
///
/// Passing is final: a player who passed is not asked again in this game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayTurnResponse(pub Option<Move>);
