use blokus::{Board, Move, PieceSet, Player};
use blokus_bot_utils::{legal_moves, Bot};
use clap::Parser;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let rng = StdRng::seed_from_u64(seed);

    RandomBot { rng }.run()
}

/// Picks uniformly among all legal moves, and passes when there are none.
struct RandomBot {
    rng: StdRng,
}

impl Bot for RandomBot {
    fn select_move(&mut self, player: Player, board: &Board, remaining: PieceSet) -> Option<Move> {
        legal_moves(board, player, remaining)
            .choose(&mut self.rng)
            .copied()
    }
}
