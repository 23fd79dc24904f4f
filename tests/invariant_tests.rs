//! Property tests for the rules invariants: dead water stays dead, moves are
//! unit steps, fish are conserved, each player owns at most one tile, and
//! the codec round-trips any reachable movement state.

use proptest::prelude::*;

use penguins::ai;
use penguins::core::{Board, Coord, Direction, GameRng, PlayerId};
use penguins::game::{GameBuilder, Phase, RuleViolation, TurnInput};
use penguins::save::{read_save, write_save};
use penguins::GameState;

fn dir_between(from: Coord, to: Coord) -> Direction {
    if to.row + 1 == from.row {
        Direction::Up
    } else if to.row == from.row + 1 {
        Direction::Down
    } else if to.col + 1 == from.col {
        Direction::Left
    } else {
        Direction::Right
    }
}

fn place_all(state: &mut GameState) {
    while state.next_placer().is_some() {
        let target = ai::choose_placement(state.board()).expect("placeable tile");
        state.place_piece(target).expect("valid placement");
    }
}

fn drive_slot(state: &mut GameState) {
    match state.play_turn(None) {
        Ok(_) => {}
        Err(RuleViolation::InputRequired) => {
            let player = state.current_player().id;
            let from = state.board().find_piece(player).expect("piece on board");
            let to = ai::choose_move(state.board(), player).expect("legal step");
            state
                .play_turn(Some(TurnInput::Move(dir_between(from, to))))
                .expect("chosen step is legal");
        }
        Err(other) => panic!("unexpected rejection: {other}"),
    }
}

/// Coordinates of every dead-water tile.
fn dead_tiles(board: &Board) -> Vec<Coord> {
    board
        .iter()
        .filter(|(_, tile)| tile.is_empty_water())
        .map(|(coord, _)| coord)
        .collect()
}

fn owned_tile_count(board: &Board, player: PlayerId) -> usize {
    board
        .iter()
        .filter(|(_, tile)| tile.owner == Some(player))
        .count()
}

/// A fresh game over an arbitrary small board and roster size.
fn arb_game() -> impl Strategy<Value = GameState> {
    (2usize..=6, 2usize..=6, 2usize..=4, any::<u64>()).prop_map(
        |(rows, cols, player_count, seed)| {
            let mut builder = GameBuilder::new().dimensions(rows, cols);
            for i in 0..player_count {
                builder = builder.player(format!("P{i}"));
            }
            builder.build(seed)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn dead_water_is_permanent(mut state in arb_game()) {
        place_all(&mut state);

        let mut dead = dead_tiles(state.board());
        let mut slots = 0;
        while state.phase() == Phase::Moving {
            drive_slot(&mut state);
            slots += 1;
            prop_assert!(slots < 10_000, "game failed to terminate");

            for &coord in &dead {
                prop_assert!(
                    state.board().tile(coord).is_empty_water(),
                    "dead tile {coord} came back to life"
                );
            }
            dead = dead_tiles(state.board());
        }
    }

    #[test]
    fn fish_are_conserved_and_scores_monotonic(mut state in arb_game()) {
        let initial_fish = state.board().total_fish();
        place_all(&mut state);

        let mut last_scores: Vec<u32> = state.players().iter().map(|p| p.score).collect();
        let mut slots = 0;
        while state.phase() == Phase::Moving {
            drive_slot(&mut state);
            slots += 1;
            prop_assert!(slots < 10_000, "game failed to terminate");

            let banked: u32 = state.players().iter().map(|p| p.score).sum();
            prop_assert_eq!(state.board().total_fish() + banked, initial_fish);

            for (player, before) in state.players().iter().zip(&last_scores) {
                prop_assert!(player.score >= *before);
            }
            last_scores = state.players().iter().map(|p| p.score).collect();
        }
    }

    #[test]
    fn each_player_owns_at_most_one_tile(mut state in arb_game()) {
        place_all(&mut state);

        let ids: Vec<PlayerId> = state.players().iter().map(|p| p.id).collect();
        let mut slots = 0;
        loop {
            for &id in &ids {
                prop_assert!(owned_tile_count(state.board(), id) <= 1);
            }
            if state.phase() != Phase::Moving {
                break;
            }
            drive_slot(&mut state);
            slots += 1;
            prop_assert!(slots < 10_000, "game failed to terminate");
        }
    }

    #[test]
    fn valid_moves_are_exactly_unit_steps(
        seed in any::<u64>(),
        from_row in 0usize..8, from_col in 0usize..8,
        to_row in 0usize..8, to_col in 0usize..8,
    ) {
        let mut rng = GameRng::new(seed);
        let board = Board::random(6, 6, &mut rng);

        let from = Coord::new(from_row, from_col);
        let to = Coord::new(to_row, to_col);

        if board.is_valid_move(from, to) {
            prop_assert_eq!(from.manhattan(to), 1);
            prop_assert!(board.in_bounds(to));
            prop_assert!(!board.tile(to).is_empty_water());
            prop_assert!(board.tile(to).owner.is_none());
        } else if board.in_bounds(to) && board.tile(to).owner.is_none()
            && !board.tile(to).is_empty_water()
        {
            // A playable destination was rejected, so the geometry was wrong
            prop_assert_ne!(from.manhattan(to), 1);
        }
    }

    #[test]
    fn any_reachable_movement_state_round_trips(
        mut state in arb_game(),
        steps in 0usize..40,
    ) {
        place_all(&mut state);
        for _ in 0..steps {
            if state.phase() != Phase::Moving {
                break;
            }
            drive_slot(&mut state);
        }
        prop_assume!(state.phase() == Phase::Moving);

        let mut encoded = Vec::new();
        write_save(&state, &mut encoded).unwrap();
        let restored = read_save(encoded.as_slice()).unwrap();

        prop_assert_eq!(restored.board(), state.board());
        prop_assert_eq!(restored.players(), state.players());
        prop_assert_eq!(restored.turn_index(), state.turn_index());
        prop_assert_eq!(restored.mode(), state.mode());
        prop_assert_eq!(restored.phase(), Phase::Moving);
    }
}
