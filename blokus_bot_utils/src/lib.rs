mod board_tracker;
pub use board_tracker::*;

use std::sync::Arc;

use blokus::{Board, Move, Okay, PieceCatalog, PieceSet, PlayTurnResponse, Player, Request};

/// A trait to simplify writing bots.
pub trait Bot {
    /// Called when a new game starts, before the first turn.
    fn new_game(&mut self, _player: Player, _catalog: &Arc<PieceCatalog>) {}

    /// Picks a move for `player`, using only pieces in `remaining`, or
    /// returns `None` to pass for the rest of the game.
    fn select_move(&mut self, player: Player, board: &Board, remaining: PieceSet) -> Option<Move>;

    fn run(&mut self) -> anyhow::Result<()> {
        // Communication happens through stdin/stdout.
        // Stderr can be used for logging.
        let mut stdin = std::io::stdin().lock();
        let mut stdout = std::io::stdout().lock();
        let mut buf = String::new();
        let mut tracker = BoardTracker::new();

        loop {
            // Read the next line into buf
            buf.clear(); // because stdin.read_line() appends to the buffer
            use std::io::BufRead;
            let num_bytes_read = stdin.read_line(&mut buf)?;
            if num_bytes_read == 0 {
                // 0 bytes read means EOF - the judge has exited.
                break Ok(());
            }

            let req = serde_json::from_str::<Request>(buf.trim_end())?;

            match req {
                Request::NewGame { player, pieces } => {
                    let catalog = Arc::new(pieces.parse::<PieceCatalog>()?);
                    tracker.new_game(catalog.clone());
                    self.new_game(player, &catalog);
                    serde_json::to_writer(&mut stdout, &Okay())?;
                }
                Request::PlayTurn {
                    player,
                    placements,
                    remaining_pieces,
                } => {
                    let board = tracker.sync(&placements)?;
                    let mv = self.select_move(player, board, remaining_pieces);
                    serde_json::to_writer(&mut stdout, &PlayTurnResponse(mv))?
                }
                Request::Bye => break Ok(()),
            }
            use std::io::Write;
            writeln!(stdout)?;
            stdout.flush()?;
        }
    }
}

/// All moves `player` can make with the pieces in `remaining`.
pub fn legal_moves(board: &Board, player: Player, remaining: PieceSet) -> Vec<Move> {
    let mut moves = board.all_moves(player);
    moves.retain(|mv| remaining.contains(mv.piece));
    moves
}
