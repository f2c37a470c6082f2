use blokus::{
    Board, Okay, PieceSet, Placement, PlayTurnResponse, Player as Seat, PlayerState, Request,
};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

use crate::error::IllegalMove;
use crate::player::Player;
use crate::recording::Recorder;
use crate::turn::{execute_turn, TurnOutcome};
use crate::GameConfig;

/// The outcome of one game. All arrays are indexed by seat, see [`Seat::index()`].
pub struct GameResult {
    /// The index of the player (in the slice passed to [`play_game()`]) in each seat.
    pub seating: [usize; 4],
    /// The number of tiles placed from each seat.
    pub scores: [u32; 4],
    /// The number of illegal moves made from each seat.
    pub illegal_moves: [usize; 4],
    pub board: Board,
}

impl GameResult {
    /// The indices of the players with the highest score.
    ///
    /// There is more than one winner when several players are tied.
    pub fn winners(&self) -> Vec<usize> {
        let best = self.scores.iter().copied().max().unwrap_or(0);
        Seat::ALL
            .into_iter()
            .filter(|seat| self.scores[seat.index()] == best)
            .map(|seat| self.seating[seat.index()])
            .collect()
    }

    /// The score of the player with the given index.
    pub fn score_of(&self, player_idx: usize) -> u32 {
        Seat::ALL
            .into_iter()
            .find(|seat| self.seating[seat.index()] == player_idx)
            .map(|seat| self.scores[seat.index()])
            .unwrap_or(0)
    }
}

/// Returns an error only on communication failure, not when an
/// illegal move is played.
pub fn play_game(
    rng: &mut StdRng,
    players: &mut [Player; 4],
    config: &GameConfig,
    recorder: &mut Option<Recorder>,
) -> anyhow::Result<GameResult> {
    // Randomly assign the seats
    let seating = {
        let mut arr = [0, 1, 2, 3];
        arr.shuffle(rng);
        arr
    };

    // Inform the players about the new game, so that they can reset their state
    for seat in Seat::ALL {
        let _: Okay = players[seating[seat.index()]].perform_request(
            recorder,
            &Request::NewGame {
                player: seat,
                pieces: String::from(config.catalog.source()),
            },
        )?;
    }

    let mut board = Board::new(config.catalog.clone());
    let mut states = [PlayerState::new(&config.catalog); 4];
    let mut illegal_moves = [0; 4];
    let mut placements: Vec<Placement> = Vec::new();

    let mut seat = Seat::Blue;
    while !states.iter().all(PlayerState::is_done) {
        let state = &mut states[seat.index()];
        if !state.is_done() {
            let player = &mut players[seating[seat.index()]];
            let name = player.name.clone();
            let (outcome, illegal) = play_turn(
                state,
                &mut board,
                seat,
                &name,
                config.max_attempts,
                |remaining_pieces| {
                    let req = Request::PlayTurn {
                        player: seat,
                        placements: placements.clone(),
                        remaining_pieces,
                    };
                    player.perform_request(recorder, &req)
                },
            )?;
            illegal_moves[seat.index()] += illegal;
            if let TurnOutcome::Placed { mv, .. } = outcome {
                placements.push(Placement { player: seat, mv });
            }
        }
        seat = seat.next();
    }

    for seat in Seat::ALL {
        let placed = config.catalog.all_ids() - states[seat.index()].remaining;
        debug!(?seat, placed = ?Vec::from(placed), "Pieces placed");
    }

    if let Some(rec) = recorder {
        let path = rec.write_game_recording()?;
        debug!(path = %path.display(), "Recorded game");
    }

    Ok(GameResult {
        seating,
        scores: states.map(|state| state.score),
        illegal_moves,
        board,
    })
}

/// Plays one turn of `seat`, asking `ask` for a response with the pieces the
/// player has left.
///
/// An illegal move is answered by asking again, up to `max_attempts` times in
/// total, after which the player is forced to pass. Returns the outcome and the
/// number of illegal moves. Errors from `ask` are passed on.
pub fn play_turn<F>(
    state: &mut PlayerState,
    board: &mut Board,
    seat: Seat,
    name: &str,
    max_attempts: usize,
    mut ask: F,
) -> anyhow::Result<(TurnOutcome, usize)>
where
    F: FnMut(PieceSet) -> anyhow::Result<PlayTurnResponse>,
{
    let mut illegal_moves = 0;
    loop {
        let response = ask(state.remaining)?;
        match execute_turn(state, board, seat, response) {
            Ok(outcome) => {
                match outcome {
                    TurnOutcome::Placed { mv, tiles } => {
                        debug!(player = name, ?seat, ?mv, tiles, "Placed a piece")
                    }
                    TurnOutcome::Passed => debug!(player = name, ?seat, "Passed"),
                }
                return Ok((outcome, illegal_moves));
            }
            Err(err) => {
                illegal_moves += 1;
                log_illegal_move(name, &err);
                if illegal_moves >= max_attempts {
                    warn!(player = name, illegal_moves, "Too many illegal moves, passing");
                    state.passed = true;
                    return Ok((TurnOutcome::Passed, illegal_moves));
                }
            }
        }
    }
}

fn log_illegal_move(player: &str, err: &IllegalMove) {
    info!(player, "Illegal move by player");
    let mut err_dyn = err as &dyn std::error::Error;
    while let Some(src_err) = err_dyn.source() {
        info!("{}", err_dyn);
        err_dyn = src_err;
    }
    info!("{}", err_dyn);
}
