use std::path::PathBuf;

use blokus::{AsciiRender, BoxRender, Render};
use clap::{Parser, ValueEnum};
use judge::{play_game, GameConfig, Player, PlayerConfig, Recorder};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Path to the config JSON files of the four players
    #[clap(num_args(4), value_delimiter = ' ', required = true)]
    player_configs: Vec<PathBuf>,

    /// How many games to play
    #[arg(short, long, default_value_t = 100)]
    num_games: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// A file with the pieces to play with, instead of the standard ones
    #[arg(short, long)]
    pieces: Option<PathBuf>,

    /// How many illegal moves a player may make in one turn before being forced to pass
    #[arg(short, long, default_value_t = 3)]
    max_attempts: usize,

    /// Record the game's interactions as JSON files into this directory
    #[arg(short, long)]
    record_games_to_directory: Option<PathBuf>,

    /// How final boards are drawn in the debug log
    #[arg(long, value_enum, default_value_t = RenderStyle::Ascii)]
    render: RenderStyle,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Clone, Copy, ValueEnum)]
enum RenderStyle {
    Ascii,
    Box,
}

impl RenderStyle {
    fn renderer(self) -> &'static dyn Render {
        match self {
            RenderStyle::Ascii => &AsciiRender,
            RenderStyle::Box => &BoxRender,
        }
    }
}

#[derive(Default)]
struct PlayerScore {
    wins: usize,
    shared_wins: usize,
    tiles: u64,
    illegal_moves: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut recorder = if let Some(dir_path) = args.record_games_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let config = match &args.pieces {
        Some(path) => GameConfig::load(path, args.max_attempts)?,
        None => GameConfig::standard(args.max_attempts),
    };
    info!(
        pieces = config.catalog.count(),
        tiles = config.catalog.total_tiles(),
        "Loaded pieces"
    );

    let player_configs = args
        .player_configs
        .iter()
        .map(|path| PlayerConfig::load(path))
        .collect::<Result<Vec<PlayerConfig>, anyhow::Error>>()?;
    let [c0, c1, c2, c3] = player_configs.as_slice() else {
        anyhow::bail!("Exactly four players are needed");
    };
    let mut players = [
        Player::from_config(c0)?,
        Player::from_config(c1)?,
        Player::from_config(c2)?,
        Player::from_config(c3)?,
    ];

    let renderer = args.render.renderer();
    let mut player_scores: [PlayerScore; 4] = Default::default();
    for game_idx in 0..args.num_games {
        let result = play_game(&mut rng, &mut players, &config, &mut recorder)?;
        debug!(game_idx, "Final board:\n{}", renderer.render(&result.board));

        let winners = result.winners();
        let names: Vec<&str> = winners.iter().map(|&i| players[i].name.as_str()).collect();
        debug!(game_idx, ?names, scores = ?result.scores, "Game over");
        for &winner in &winners {
            if winners.len() == 1 {
                player_scores[winner].wins += 1;
            } else {
                player_scores[winner].shared_wins += 1;
            }
        }
        for (player_idx, score) in player_scores.iter_mut().enumerate() {
            score.tiles += u64::from(result.score_of(player_idx));
        }
        for (seat_idx, &count) in result.illegal_moves.iter().enumerate() {
            player_scores[result.seating[seat_idx]].illegal_moves += count;
        }
    }

    eprintln!("End result after {} games:", args.num_games);
    for (player, score) in players.iter().zip(&player_scores) {
        let avg_tiles = if args.num_games > 0 {
            score.tiles as f32 / args.num_games as f32
        } else {
            0.0
        };
        let paren = if score.illegal_moves > 0 {
            format!(" ({} illegal moves)", score.illegal_moves)
        } else {
            String::new()
        };
        eprintln!(
            "- {}: {} wins, {} shared wins, {:.1} tiles per game{}",
            player.name, score.wins, score.shared_wins, avg_tiles, paren
        );
    }

    for player in players {
        player.bye()?;
    }

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
