//! Property tests over randomly driven games: material conservation,
//! treasure monotonicity, and turn-pointer discipline.

use oanquan::{Game, GameConfig, GameSnapshot, GameStatus, Move};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random games are not required to terminate; properties are checked
/// over a bounded prefix of play.
const MAX_TURNS: usize = 300;

fn home_tiles(seat: u8) -> std::ops::RangeInclusive<usize> {
    let start = seat as usize * 6 + 1;
    start..=start + 4
}

/// Picks a random legal move for the seat, or `None` for a forced pass.
fn random_move(snapshot: &GameSnapshot, seat: u8, rng: &mut StdRng) -> Option<Move> {
    let tiles = home_tiles(seat);
    let seeded: Vec<usize> = tiles
        .clone()
        .filter(|&i| snapshot.tiles[i].seeds > 0)
        .collect();
    if !seeded.is_empty() {
        let tile = seeded[rng.gen_range(0..seeded.len())];
        return Some(Move::new(tile, rng.gen_bool(0.5)));
    }
    // Starved home: the bank is spread from the front of the range
    // before the move resolves, one seed per tile.
    let bank = snapshot.players[seat as usize].captured_seeds as usize;
    if bank == 0 {
        return None;
    }
    let prefix = bank.min(tiles.clone().count());
    let tile = *tiles.start() + rng.gen_range(0..prefix);
    Some(Move::new(tile, rng.gen_bool(0.5)))
}

fn material(snapshot: &GameSnapshot) -> (u32, u32) {
    let seeds = snapshot.tiles.iter().map(|t| t.seeds).sum::<u32>()
        + snapshot.players.iter().map(|p| p.captured_seeds).sum::<u32>();
    let treasures = snapshot.tiles.iter().map(|t| t.treasures).sum::<u32>()
        + snapshot
            .players
            .iter()
            .map(|p| p.captured_treasures)
            .sum::<u32>();
    (seeds, treasures)
}

fn seeded_game(seed: u64) -> Game {
    let mut game = Game::new(0, GameConfig::default().with_seed(seed));
    game.add_player().unwrap();
    game.add_player().unwrap();
    game
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn random_play_conserves_material(seed in any::<u64>()) {
        let mut game = seeded_game(seed);
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..MAX_TURNS {
            if game.is_ended() {
                break;
            }
            let seat = game.active_player();
            let info = random_move(&game.snapshot(), seat, &mut rng);
            game.submit_move(seat, info).unwrap();

            let (seeds, treasures) = material(&game.snapshot());
            prop_assert_eq!(seeds, 50);
            prop_assert_eq!(treasures, 2);
        }
    }

    #[test]
    fn treasures_leave_the_board_monotonically(seed in any::<u64>()) {
        let mut game = seeded_game(seed);
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(1));
        let mut on_board = 2u32;

        for _ in 0..MAX_TURNS {
            if game.is_ended() {
                break;
            }
            let seat = game.active_player();
            let info = random_move(&game.snapshot(), seat, &mut rng);
            game.submit_move(seat, info).unwrap();

            let snapshot = game.snapshot();
            let now: u32 = snapshot.tiles.iter().map(|t| t.treasures).sum();
            prop_assert!(now <= on_board, "treasure returned to the board");
            on_board = now;
        }

        if game.is_ended() {
            prop_assert_eq!(on_board, 0);
            prop_assert_eq!(game.status(), GameStatus::Ended);
            // The sweep leaves every home tile empty.
            let snapshot = game.snapshot();
            for seat in 0..2u8 {
                for i in home_tiles(seat) {
                    prop_assert_eq!(snapshot.tiles[i].seeds, 0);
                }
            }
        }
    }

    #[test]
    fn turn_pointer_moves_only_on_accepted_moves(seed in any::<u64>()) {
        let mut game = seeded_game(seed);
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(2));

        for _ in 0..40 {
            if game.is_ended() {
                break;
            }
            let seat = game.active_player();
            let other = (seat + 1) % 2;

            // Out-of-turn submissions never advance the pointer.
            let rejected = game.submit_move(other, random_move(&game.snapshot(), other, &mut rng));
            prop_assert!(rejected.is_err());
            prop_assert_eq!(game.active_player(), seat);

            let info = random_move(&game.snapshot(), seat, &mut rng);
            game.submit_move(seat, info).unwrap();
            if !game.is_ended() {
                prop_assert_eq!(game.active_player(), other);
            }
        }
    }
}
