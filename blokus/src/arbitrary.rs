use std::sync::Arc;

use quickcheck::{Arbitrary, Gen};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::{Board, PieceCatalog, Placement, Player, MAX_TILES};

/// 1 to 5 distinct tile offsets, close to the origin.
#[derive(Clone, Debug)]
pub struct ArbitraryShape(pub Vec<(i8, i8)>);

impl Arbitrary for ArbitraryShape {
    fn arbitrary(g: &mut Gen) -> Self {
        let num_tiles = usize::arbitrary(g) % MAX_TILES + 1;
        let mut tiles = Vec::with_capacity(num_tiles);
        while tiles.len() < num_tiles {
            let tile = ((u8::arbitrary(g) % 7) as i8 - 3, (u8::arbitrary(g) % 7) as i8 - 3);
            if !tiles.contains(&tile) {
                tiles.push(tile);
            }
        }
        ArbitraryShape(tiles)
    }
}

/// A sequence of valid placements from the start of a game with the
/// standard pieces, where every player uses each piece at most once.
#[derive(Clone, Debug)]
pub struct GameSequence {
    pub catalog: Arc<PieceCatalog>,
    pub placements: Vec<Placement>,
}

impl Arbitrary for GameSequence {
    fn arbitrary(g: &mut Gen) -> Self {
        let catalog = Arc::new(PieceCatalog::standard());
        let mut rng = StdRng::seed_from_u64(u64::arbitrary(g));
        let num_turns = usize::arbitrary(g) % 40;

        let mut board = Board::new(catalog.clone());
        let mut remaining = [catalog.all_ids(); 4];
        let mut placements = Vec::new();
        let mut player = Player::Blue;
        for _ in 0..num_turns {
            let moves: Vec<_> = board
                .all_moves(player)
                .into_iter()
                .filter(|mv| remaining[player.index()].contains(mv.piece))
                .collect();
            if let Some(&mv) = moves.choose(&mut rng) {
                board.add_move(player, mv).unwrap();
                remaining[player.index()] = remaining[player.index()].remove(mv.piece);
                placements.push(Placement { player, mv });
            }
            player = player.next();
        }
        GameSequence {
            catalog,
            placements,
        }
    }
}
