use crate::entity::ai::{self, UnitKind};
use crate::entity::player;
use crate::game::consts::{
    ITEM_KEY, ITEM_PISTOL, KEY_HEART, PLAYER_WON, TILE_BIG_CRATE, TILE_COMPACTOR, TILE_FLOOR,
    TILE_MAGNET, TILE_PLAYER_ARRIVED,
};
use crate::game::msg;
use crate::game::state::{Item, Weapon};
use crate::game::world::{TileAttr, Unit};
use crate::platform::Sound;
use crate::test::create_minimal_world;

#[test]
fn test_medkit_heals_with_what_is_left() {
    let (mut state, mut platform) = create_minimal_world(10, 10);
    state.world.player_mut().health = 4;
    state.inventory.medkits = 3;
    player::use_medkit(&mut state, &mut platform);
    assert_eq!(state.world.player().health, 7);
    assert_eq!(state.inventory.medkits, 0);
    assert!(platform.sounds.contains(&Sound::Medkit));
}

#[test]
fn test_medkit_stops_at_full_health() {
    let (mut state, mut platform) = create_minimal_world(10, 10);
    state.world.player_mut().health = 10;
    state.inventory.medkits = 5;
    player::use_medkit(&mut state, &mut platform);
    assert_eq!(state.world.player().health, 12);
    assert_eq!(state.inventory.medkits, 3);

    platform.reset_counters();
    player::use_medkit(&mut state, &mut platform);
    assert_eq!(state.inventory.medkits, 3);
    assert!(platform.sounds.is_empty());
}

#[test]
fn test_cycle_weapon_only_steps_from_pistol_to_plasma() {
    let (mut state, mut platform) = create_minimal_world(10, 10);
    state.inventory.pistol_ammo = 5;
    state.inventory.plasma_ammo = 5;
    state.inventory.weapon = Weapon::Pistol;
    player::cycle_weapon(&mut state, &mut platform);
    assert_eq!(state.inventory.weapon, Weapon::Plasma);

    // ignored until the select timeout ran out
    player::cycle_weapon(&mut state, &mut platform);
    assert_eq!(state.inventory.weapon, Weapon::Plasma);

    state.timers.select_timeout = 0;
    player::cycle_weapon(&mut state, &mut platform);
    assert_eq!(state.inventory.weapon, Weapon::Pistol);
}

#[test]
fn test_cycle_item_skips_empty_stock() {
    let (mut state, mut platform) = create_minimal_world(10, 10);
    state.inventory.emps = 2;
    player::cycle_item(&mut state, &mut platform);
    assert_eq!(state.inventory.item, Item::Emp);

    state.timers.select_timeout = 0;
    player::cycle_item(&mut state, &mut platform);
    // medkit and magnet are empty, fall back to the first item in stock
    assert_eq!(state.inventory.item, Item::Emp);
}

#[test]
fn test_search_finds_hidden_item() {
    let (mut state, mut platform) = create_minimal_world(20, 20);
    state.tileset.set_tile(TILE_BIG_CRATE, TileAttr::SEARCHABLE | TileAttr::MOVABLE, 42);
    state.world.set_tile(21, 20, TILE_BIG_CRATE);
    state.world.units[48] = Unit::new(ITEM_PISTOL, 21, 20).with_params(10, 0, 0, 0);
    platform.push_key(b'd');

    player::search_object(&mut state, &mut platform);
    assert_eq!(state.world.tile_at(21, 20), 42);
    assert_eq!(state.inventory.pistol_ammo, 10);
    assert_eq!(state.inventory.weapon, Weapon::Pistol);
    assert!(!state.world.units[48].is_alive());
    assert!(platform.sounds.contains(&Sound::ItemFound));
    assert!(state.log.contains(msg::FOUND_PISTOL));
    assert_eq!(state.world.player().direction, crate::entity::movement::Direction::Right);
}

#[test]
fn test_search_finds_key() {
    let (mut state, mut platform) = create_minimal_world(20, 20);
    state.tileset.set_tile(60, TileAttr::SEARCHABLE, 60);
    state.world.set_tile(20, 19, 60);
    state.world.units[50] = Unit::new(ITEM_KEY, 20, 19).with_params(1, 0, 0, 0);
    platform.push_key(b'w');
    player::search_object(&mut state, &mut platform);
    assert_eq!(state.inventory.keys, KEY_HEART);
    assert!(state.log.contains(msg::FOUND_KEY));
}

#[test]
fn test_search_empty_object() {
    let (mut state, mut platform) = create_minimal_world(20, 20);
    state.tileset.set_tile(60, TileAttr::SEARCHABLE, 60);
    state.world.set_tile(19, 20, 60);
    platform.push_key(b'a');
    player::search_object(&mut state, &mut platform);
    assert_eq!(state.log.last(), Some(msg::NOT_FOUND));
}

#[test]
fn test_move_object_carries_hidden_item() {
    let (mut state, mut platform) = create_minimal_world(20, 20);
    state.tileset.set_tile(TILE_BIG_CRATE, TileAttr::MOVABLE, 42);
    state.world.set_tile(21, 20, TILE_BIG_CRATE);
    state.world.units[48] = Unit::new(ITEM_PISTOL, 21, 20).with_params(10, 0, 0, 0);
    platform.push_key(b'd');
    platform.push_key(b'd');

    player::move_object(&mut state, &mut platform);
    assert_eq!(state.world.tile_at(22, 20), TILE_BIG_CRATE);
    assert_eq!(state.world.tile_at(21, 20), TILE_FLOOR);
    assert_eq!((state.world.units[48].x, state.world.units[48].y), (22, 20));
    assert!(platform.sounds.contains(&Sound::Move));
}

#[test]
fn test_move_object_into_compactor_leaves_floor() {
    let (mut state, mut platform) = create_minimal_world(20, 20);
    state.tileset.set_tile(TILE_BIG_CRATE, TileAttr::MOVABLE, 42);
    state.tileset.set_tile(TILE_COMPACTOR, TileAttr::MOVE_ONTO, TILE_COMPACTOR);
    state.world.set_tile(20, 21, TILE_BIG_CRATE);
    state.world.set_tile(20, 22, TILE_COMPACTOR);
    platform.push_key(b's');
    platform.push_key(b's');
    player::move_object(&mut state, &mut platform);
    assert_eq!(state.world.tile_at(20, 22), TILE_BIG_CRATE);
    assert_eq!(state.world.tile_at(20, 21), TILE_FLOOR);
}

#[test]
fn test_move_object_refuses_fixed_tiles() {
    let (mut state, mut platform) = create_minimal_world(20, 20);
    platform.push_key(b'd');
    player::move_object(&mut state, &mut platform);
    assert_eq!(state.log.last(), Some(msg::CANT_MOVE));
    assert!(platform.sounds.contains(&Sound::Error));
}

#[test]
fn test_magnet_sends_robot_haywire() {
    let (mut state, mut platform) = create_minimal_world(10, 10);
    state.magnet_active = true;
    state.world.units[28] = Unit::new(UnitKind::Magnet.id(), 30, 30)
        .with_tile(TILE_MAGNET)
        .with_params(3, 0, 0, 0)
        .with_timers(1, 255);
    state.world.units[1] = Unit::new(UnitKind::Evilbot.id(), 30, 30);

    ai::run(&mut state, &mut platform, 28);
    assert!(!state.world.units[28].is_alive());
    assert!(!state.magnet_active);
    let robot = state.world.units[1];
    assert_eq!(robot.kind, UnitKind::Haywire.id());
    assert_eq!(robot.d, UnitKind::Evilbot.id());
    assert_eq!(robot.timer_b, 60);

    // the robot recovers once the magnet wore off
    for _ in 0..60 {
        ai::run(&mut state, &mut platform, 1);
    }
    assert_eq!(state.world.units[1].kind, UnitKind::Evilbot.id());
}

#[test]
fn test_player_picks_magnet_up() {
    let (mut state, mut platform) = create_minimal_world(30, 30);
    state.magnet_active = true;
    state.world.units[28] = Unit::new(UnitKind::Magnet.id(), 30, 30)
        .with_tile(TILE_MAGNET)
        .with_params(3, 0, 0, 0)
        .with_timers(1, 255);
    ai::run(&mut state, &mut platform, 28);
    assert_eq!(state.inventory.magnets, 1);
    assert!(!state.world.units[28].is_alive());
}

#[test]
fn test_transporter_ends_level() {
    let (mut state, mut platform) = create_minimal_world(30, 30);
    state.world.units[40] = Unit::new(UnitKind::TransporterPad.id(), 30, 30);
    ai::run(&mut state, &mut platform, 40);
    assert_eq!(state.world.units[40].kind, UnitKind::Dematerialize.id());
    while state.world.units[40].kind == UnitKind::Dematerialize.id() {
        ai::run(&mut state, &mut platform, 40);
    }
    assert_eq!(state.world.player().kind, PLAYER_WON);
}

#[test]
fn test_transporter_beams_player() {
    let (mut state, mut platform) = create_minimal_world(30, 30);
    state.world.units[40] = Unit::new(UnitKind::TransporterPad.id(), 30, 30).with_params(0, 1, 60, 40);
    ai::run(&mut state, &mut platform, 40);
    while state.world.units[40].kind == UnitKind::Dematerialize.id() {
        ai::run(&mut state, &mut platform, 40);
    }
    let player = state.world.player();
    assert_eq!((player.x, player.y), (60, 40));
    assert_eq!(player.tile, TILE_PLAYER_ARRIVED);
    assert!(state.view.contains(60, 40));
}

#[test]
fn test_locked_transporter_waits_for_robots() {
    let (mut state, mut platform) = create_minimal_world(10, 10);
    state.world.units[40] = Unit::new(UnitKind::TransporterPad.id(), 30, 30).with_params(1, 0, 0, 0);
    state.world.units[1] = Unit::new(2, 50, 50);
    ai::run(&mut state, &mut platform, 40);
    assert_eq!(state.world.units[40].a, 1);
    state.world.units[1].kind = 0;
    ai::run(&mut state, &mut platform, 40);
    assert_eq!(state.world.units[40].a, 0);
}

#[test]
fn test_cheat_fills_inventory() {
    let (mut state, mut platform) = create_minimal_world(10, 10);
    player::cheat(&mut state, &mut platform);
    assert_eq!(state.inventory.keys, 0b111);
    assert_eq!(state.inventory.pistol_ammo, 100);
    assert_eq!(state.inventory.weapon, Weapon::Pistol);
    assert_eq!(state.inventory.item, Item::Bomb);
}
