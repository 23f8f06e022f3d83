use crate::game::consts::{
    ITEM_BOMB, ITEM_KEY, LEVEL_MAP_OFFSET, LEVEL_SIZE, MAP_SIZE, UNIT_SLOTS, WEAPON_SLOTS,
};
use crate::game::world::{AssetError, Tileset, Unit, World};
use crate::game::Difficulty;
use crate::test::create_level_bytes;

#[test]
fn test_load_level_layout() {
    let mut bytes = create_level_bytes(&[
        (0, Unit::new(1, 10, 12).with_health(12)),
        (5, Unit::new(9, 40, 20).with_params(1, 2, 3, 4).with_health(10)),
    ]);
    bytes[LEVEL_MAP_OFFSET + 20 * 128 + 40] = 77;

    let mut world = World::new();
    world.load_level("level-a", &bytes).unwrap();
    let player = world.player();
    assert_eq!((player.kind, player.x, player.y, player.health), (1, 10, 12, 12));
    let robot = world.units[5];
    assert_eq!((robot.kind, robot.x, robot.y), (9, 40, 20));
    assert_eq!((robot.a, robot.b, robot.c, robot.d), (1, 2, 3, 4));
    assert_eq!(robot.health, 10);
    assert_eq!(world.tile_at(40, 20), 77);
    assert_eq!(world.tile_at(41, 20), 9);
    assert!(!world.units[6].is_alive());
}

#[test]
fn test_reload_replaces_every_slot_and_tile() {
    let mut world = World::new();
    world.units[63] = Unit::new(ITEM_BOMB, 3, 3);
    world.set_tile(127, 63, 200);

    let bytes = create_level_bytes(&[(0, Unit::new(1, 10, 12).with_health(12))]);
    world.load_level("level-b", &bytes).unwrap();
    assert_eq!(world.units.len(), UNIT_SLOTS);
    assert_eq!(world.map().len(), MAP_SIZE);
    assert!(!world.units[63].is_alive());
    assert_eq!(world.tile_at(127, 63), 9);
}

#[test]
fn test_truncated_level_is_rejected() {
    let bytes = vec![0; LEVEL_SIZE - 1];
    let mut world = World::new();
    match world.load_level("level-b", &bytes) {
        Err(AssetError::Truncated {
            name,
            expected,
            actual,
        }) => {
            assert_eq!(name, "level-b");
            assert_eq!(expected, LEVEL_SIZE);
            assert_eq!(actual, LEVEL_SIZE - 1);
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_truncated_tileset_is_rejected() {
    assert!(Tileset::from_bytes("tileset", &[0; 100]).is_err());
    assert!(Tileset::from_bytes("tileset", &crate::test::create_tileset_bytes()).is_ok());
}

#[test]
fn test_spawn_uses_first_free_slot() {
    let mut world = World::new();
    for slot in WEAPON_SLOTS {
        assert!(!world.units[slot].is_alive());
    }
    let first = world.spawn(WEAPON_SLOTS, Unit::new(11, 10, 10));
    assert_eq!(first, Some(28));
    world.units[29] = Unit::new(6, 1, 1);
    let second = world.spawn(WEAPON_SLOTS, Unit::new(11, 10, 10));
    assert_eq!(second, Some(30));
    assert_eq!(world.spawn(WEAPON_SLOTS, Unit::new(11, 10, 10)), Some(31));

    // a full range silently refuses
    assert_eq!(world.spawn(WEAPON_SLOTS, Unit::new(11, 10, 10)), None);

    world.units[30].kind = 0;
    assert_eq!(world.free_slot(WEAPON_SLOTS), Some(30));
}

#[test]
fn test_hidden_unit_covers_area() {
    let mut world = World::new();
    world.units[48] = Unit::new(ITEM_BOMB, 20, 30).with_params(2, 0, 1, 2);
    assert_eq!(world.hidden_unit_at(20, 30), Some(48));
    assert_eq!(world.hidden_unit_at(21, 32), Some(48));
    assert_eq!(world.hidden_unit_at(22, 30), None);
    assert_eq!(world.hidden_unit_at(20, 33), None);
    assert_eq!(world.hidden_unit_at(19, 30), None);
}

#[test]
fn test_unit_at_ignores_hidden_and_weapon_slots() {
    let mut world = World::new();
    world.units[3] = Unit::new(2, 15, 15);
    world.units[28] = Unit::new(12, 16, 16);
    world.units[50] = Unit::new(ITEM_BOMB, 17, 17);
    assert_eq!(world.unit_at(15, 15), Some(3));
    assert_eq!(world.unit_at(16, 16), None);
    assert_eq!(world.unit_at(17, 17), None);
}

#[test]
fn test_easy_doubles_hidden_items_except_keys() {
    let mut world = World::new();
    world.units[48] = Unit::new(ITEM_BOMB, 10, 10).with_params(3, 0, 0, 0);
    world.units[49] = Unit::new(ITEM_KEY, 11, 10).with_params(1, 0, 0, 0);
    world.apply_difficulty(Difficulty::Easy);
    assert_eq!(world.units[48].a, 6);
    assert_eq!(world.units[49].a, 1);
}

#[test]
fn test_hard_turns_patrols_into_hunters() {
    let mut world = World::new();
    world.units[1] = Unit::new(2, 10, 10);
    world.units[2] = Unit::new(3, 12, 10);
    world.units[3] = Unit::new(9, 14, 10);
    world.apply_difficulty(Difficulty::Hard);
    assert_eq!(world.units[1].kind, 4);
    assert_eq!(world.units[2].kind, 4);
    assert_eq!(world.units[3].kind, 9);

    world.apply_difficulty(Difficulty::Normal);
    assert_eq!(world.units[1].kind, 4);
}

#[test]
fn test_remaining_counters() {
    let mut world = World::new();
    world.units[1] = Unit::new(2, 10, 10);
    world.units[27] = Unit::new(9, 10, 11);
    world.units[55] = Unit::new(ITEM_BOMB, 10, 12);
    assert_eq!(world.robots_remaining(), 2);
    assert_eq!(world.secrets_remaining(), 1);
}
