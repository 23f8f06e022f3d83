use crate::entity::ai::{self, UnitKind};
use crate::entity::door::{self, DoorState};
use crate::game::consts::{KEY_HEART, KEY_SPADE, KEY_STAR, TILE_COMPACTOR, TILE_FLOOR};
use crate::game::world::Unit;
use crate::platform::Sound;
use crate::test::create_minimal_world;

fn closed_door(x: u8, y: u8, lock: u8) -> Unit {
    Unit::new(UnitKind::Door.id(), x, y).with_params(0, DoorState::Closed as u8, lock, 0)
}

#[test]
fn test_door_cycle_order() {
    let (mut state, mut platform) = create_minimal_world(30, 21);
    state.world.units[32] = closed_door(30, 20, 0);

    let mut visited = Vec::new();
    for _ in 0..3 {
        ai::run(&mut state, &mut platform, 32);
        visited.push(state.world.units[32].b);
    }
    assert_eq!(state.world.tile_at(30, 20), TILE_FLOOR);

    // stays open while the player is close
    ai::run(&mut state, &mut platform, 32);
    assert_eq!(state.world.units[32].b, DoorState::Open as u8);
    assert_eq!(state.world.units[32].timer_b, 30);

    state.world.player_mut().y = 30;
    for _ in 0..3 {
        ai::run(&mut state, &mut platform, 32);
        visited.push(state.world.units[32].b);
    }
    let expected = [
        DoorState::OpeningA,
        DoorState::OpeningB,
        DoorState::Open,
        DoorState::ClosingA,
        DoorState::ClosingB,
        DoorState::Closed,
    ];
    assert_eq!(visited, expected.map(|s| s as u8).to_vec());
    assert_eq!(platform.sounds, vec![Sound::Door, Sound::Door]);
    assert_ne!(state.world.tile_at(30, 20), TILE_FLOOR);
}

#[test]
fn test_open_door_blocked_by_object() {
    let (mut state, mut platform) = create_minimal_world(30, 21);
    state.world.units[32] = Unit::new(UnitKind::Door.id(), 30, 20).with_params(0, DoorState::Open as u8, 0, 0);
    state.world.player_mut().y = 30;
    state.world.set_tile(30, 20, 41);
    ai::run(&mut state, &mut platform, 32);
    assert_eq!(state.world.units[32].b, DoorState::Open as u8);
    assert_eq!(state.world.units[32].timer_a, 35);
}

#[test]
fn test_locked_door_needs_its_key() {
    let (mut state, mut platform) = create_minimal_world(30, 21);
    state.world.units[32] = closed_door(30, 20, 2);
    ai::run(&mut state, &mut platform, 32);
    assert_eq!(state.world.units[32].b, DoorState::Closed as u8);
    assert_eq!(state.world.units[32].timer_a, 20);

    state.inventory.keys = KEY_HEART;
    ai::run(&mut state, &mut platform, 32);
    assert_eq!(state.world.units[32].b, DoorState::OpeningA as u8);
}

#[test]
fn test_key_locks() {
    assert!(door::unlocked(0, 0));
    assert!(!door::unlocked(1, 0));
    assert!(door::unlocked(1, KEY_SPADE));
    assert!(!door::unlocked(2, KEY_SPADE | KEY_STAR));
    assert!(door::unlocked(3, KEY_STAR));
    assert!(!door::unlocked(4, KEY_SPADE | KEY_HEART | KEY_STAR));
}

#[test]
fn test_trash_compactor_crushes_robot() {
    let (mut state, mut platform) = create_minimal_world(10, 10);
    state.world.set_tile(30, 30, TILE_COMPACTOR);
    state.world.units[33] = Unit::new(UnitKind::TrashCompactor.id(), 30, 30);
    state.world.units[1] = Unit::new(2, 30, 30).with_health(5);

    ai::run(&mut state, &mut platform, 33);
    assert_eq!(state.world.units[33].a, 1);
    ai::run(&mut state, &mut platform, 33);
    assert_eq!(state.world.units[33].a, 2);
    assert!(!state.world.units[1].is_alive());
    assert!(platform.sounds.contains(&Sound::Explosion));
    assert_eq!(state.world.units[28].kind, UnitKind::SmallExplosion.id());

    ai::run(&mut state, &mut platform, 33);
    ai::run(&mut state, &mut platform, 33);
    assert_eq!(state.world.units[33].a, 0);
    assert_eq!(state.world.tile_at(30, 30), TILE_COMPACTOR);
}

#[test]
fn test_empty_trash_compactor_stays_open() {
    let (mut state, mut platform) = create_minimal_world(10, 10);
    state.world.set_tile(30, 30, TILE_COMPACTOR);
    state.world.units[33] = Unit::new(UnitKind::TrashCompactor.id(), 30, 30);
    ai::run(&mut state, &mut platform, 33);
    assert_eq!(state.world.units[33].a, 0);
    assert_eq!(state.world.units[33].timer_a, 20);
}

#[test]
fn test_elevator_opens_for_nearby_player() {
    let (mut state, mut platform) = create_minimal_world(40, 21);
    state.world.units[34] = Unit::new(UnitKind::Elevator.id(), 40, 20)
        .with_params(0, DoorState::Closed as u8, 1, 3);
    ai::run(&mut state, &mut platform, 34);
    assert_eq!(state.world.units[34].b, DoorState::OpeningA as u8);
    ai::run(&mut state, &mut platform, 34);
    ai::run(&mut state, &mut platform, 34);
    assert_eq!(state.world.units[34].b, DoorState::Open as u8);
    assert_eq!(state.world.units[34].timer_a, 50);
}
