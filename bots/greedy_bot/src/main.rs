use blokus::{Board, Move, PieceSet, Player};
use blokus_bot_utils::{legal_moves, Bot};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{seq::SliceRandom, SeedableRng};
use tracing::debug;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.log_level);
    let seed = args.seed.unwrap_or_else(rand::random);
    debug!(seed);
    let rng = StdRng::seed_from_u64(seed);

    GreedyBot { rng }.run()
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Always places one of its biggest remaining pieces, so that the small ones
/// are left for the crowded end of the game.
struct GreedyBot {
    rng: StdRng,
}

impl GreedyBot {
    /// The number of cells the move would newly attach for `player`, which is
    /// how much room it opens up for later moves.
    fn new_corners(board: &Board, player: Player, mv: Move) -> usize {
        let Some(piece) = board.catalog().get(mv.piece).ok() else {
            return 0;
        };
        let Some(orientation) = mv.orientation() else {
            return 0;
        };
        let tiles: Vec<(i8, i8)> = piece
            .tiles(orientation)
            .iter()
            .map(|&(dx, dy)| (mv.x + dx, mv.y + dy))
            .collect();
        let mut corners: Vec<(i8, i8)> = Vec::new();
        for &(x, y) in &tiles {
            for (dx, dy) in [(-1, -1), (-1, 1), (1, -1), (1, 1)] {
                let corner = (x + dx, y + dy);
                let touches_piece = tiles.iter().any(|&(tx, ty)| {
                    (tx - corner.0).abs() + (ty - corner.1).abs() <= 1
                });
                if !touches_piece
                    && board.check_tile_legal(player, corner.0, corner.1)
                    && !board.check_tile_attached(player, corner.0, corner.1)
                    && !corners.contains(&corner)
                {
                    corners.push(corner);
                }
            }
        }
        corners.len()
    }
}

impl Bot for GreedyBot {
    fn select_move(&mut self, player: Player, board: &Board, remaining: PieceSet) -> Option<Move> {
        let mut top_choices: Vec<Move> = Vec::new();
        let mut top_score = (0, 0);
        for mv in legal_moves(board, player, remaining) {
            let num_tiles = board
                .catalog()
                .get(mv.piece)
                .map(|piece| piece.num_tiles())
                .unwrap_or(0);
            let score = (num_tiles, Self::new_corners(board, player, mv));
            match score.cmp(&top_score) {
                std::cmp::Ordering::Less => {}
                std::cmp::Ordering::Equal => {
                    top_choices.push(mv);
                }
                std::cmp::Ordering::Greater => {
                    top_choices = vec![mv];
                    top_score = score;
                }
            }
        }
        debug!(?player, choices = top_choices.len(), ?top_score, "Best moves");
        top_choices.choose(&mut self.rng).copied()
    }
}
