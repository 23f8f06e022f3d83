use crate::entity::movement::{in_attack_range, player_nearby, request_walk, seek_player, Direction};
use crate::game::consts::{WALK_MAX_X, WALK_MAX_Y, WALK_MIN_X, WALK_MIN_Y};
use crate::game::world::{TileAttr, Unit};
use crate::test::{create_minimal_world, TILE_WALL};

use proptest::prelude::*;

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

#[test]
fn test_walk_onto_floor() {
    let (mut state, _platform) = create_minimal_world(10, 10);
    let moved = request_walk(&mut state.world, &state.tileset, 0, Direction::Right, TileAttr::WALKABLE);
    assert!(moved);
    assert_eq!((state.world.player().x, state.world.player().y), (11, 10));
    assert_eq!(state.world.player().direction, Direction::Right);
}

#[test]
fn test_walk_blocked_by_wall_still_turns() {
    let (mut state, _platform) = create_minimal_world(10, 10);
    state.world.set_tile(10, 9, TILE_WALL);
    let moved = request_walk(&mut state.world, &state.tileset, 0, Direction::Up, TileAttr::WALKABLE);
    assert!(!moved);
    assert_eq!((state.world.player().x, state.world.player().y), (10, 10));
    assert_eq!(state.world.player().direction, Direction::Up);
}

#[test]
fn test_walk_blocked_by_robot() {
    let (mut state, _platform) = create_minimal_world(10, 10);
    state.world.units[1] = Unit::new(2, 10, 11);
    assert!(!request_walk(&mut state.world, &state.tileset, 0, Direction::Down, TileAttr::WALKABLE));
    assert!(!request_walk(&mut state.world, &state.tileset, 1, Direction::Up, TileAttr::HOVERABLE));
}

#[test]
fn test_water_is_hoverable_only() {
    use crate::game::consts::TILE_WATER;
    let (mut state, _platform) = create_minimal_world(10, 10);
    state.world.set_tile(11, 10, TILE_WATER);
    assert!(!request_walk(&mut state.world, &state.tileset, 0, Direction::Right, TileAttr::WALKABLE));
    state.world.units[1] = Unit::new(2, 12, 10);
    assert!(request_walk(&mut state.world, &state.tileset, 1, Direction::Left, TileAttr::HOVERABLE));
}

#[test]
fn test_edges_of_walkable_area() {
    let cases = [
        (WALK_MIN_X, 10, Direction::Left),
        (WALK_MAX_X, 10, Direction::Right),
        (20, WALK_MIN_Y, Direction::Up),
        (20, WALK_MAX_Y, Direction::Down),
    ];
    for (x, y, direction) in cases {
        let (mut state, _platform) = create_minimal_world(x, y);
        let moved = request_walk(&mut state.world, &state.tileset, 0, direction, TileAttr::WALKABLE);
        assert!(!moved, "walked off the edge at ({}, {}) going {:?}", x, y, direction);
        assert_eq!((state.world.player().x, state.world.player().y), (x, y));
    }
}

#[test]
fn test_seek_player_moves_on_both_axes() {
    let (mut state, _platform) = create_minimal_world(10, 10);
    state.world.units[1] = Unit::new(4, 14, 13);
    seek_player(&mut state.world, &state.tileset, 1, TileAttr::HOVERABLE);
    assert_eq!((state.world.units[1].x, state.world.units[1].y), (13, 12));
}

#[test]
fn test_proximity() {
    let (mut state, _platform) = create_minimal_world(10, 10);
    state.world.units[1] = Unit::new(4, 11, 10);
    state.world.units[2] = Unit::new(4, 11, 11);
    state.world.units[3] = Unit::new(4, 12, 10);
    assert!(in_attack_range(&state.world, 1));
    assert!(!in_attack_range(&state.world, 2));
    assert!(player_nearby(&state.world, 2));
    assert!(!player_nearby(&state.world, 3));
}

proptest! {
    #[test]
    fn test_walk_is_repeatable(
        x in WALK_MIN_X..=WALK_MAX_X,
        y in WALK_MIN_Y..=WALK_MAX_Y,
        direction in direction_strategy(),
    ) {
        let (mut first, _platform) = create_minimal_world(x, y);
        let (mut second, _platform) = create_minimal_world(x, y);
        let a = request_walk(&mut first.world, &first.tileset, 0, direction, TileAttr::WALKABLE);
        let b = request_walk(&mut second.world, &second.tileset, 0, direction, TileAttr::WALKABLE);
        prop_assert_eq!(a, b);
        prop_assert_eq!(first.world.player(), second.world.player());
    }

    #[test]
    fn test_walk_stays_inside_walkable_area(
        x in WALK_MIN_X..=WALK_MAX_X,
        y in WALK_MIN_Y..=WALK_MAX_Y,
        steps in proptest::collection::vec(direction_strategy(), 1..40),
    ) {
        let (mut state, _platform) = create_minimal_world(x, y);
        for direction in steps {
            let before = (state.world.player().x, state.world.player().y);
            let moved = request_walk(&mut state.world, &state.tileset, 0, direction, TileAttr::WALKABLE);
            let after = (state.world.player().x, state.world.player().y);
            if moved {
                prop_assert_eq!(after, direction.step(before.0, before.1));
            } else {
                prop_assert_eq!(after, before);
            }
            prop_assert!((WALK_MIN_X..=WALK_MAX_X).contains(&after.0));
            prop_assert!((WALK_MIN_Y..=WALK_MAX_Y).contains(&after.1));
        }
    }
}
