mod door;
mod flow;
mod items;
mod movement;
mod render;
mod world;

use crate::game::consts::{MAP_HEIGHT, MAP_WIDTH, TILE_FLOOR, TILE_WATER};
use crate::game::world::{TileAttr, Tileset, Unit};
use crate::game::State;
use crate::platform::headless::HeadlessPlatform;

/// Tile without any attribute, stops walkers and weapon fire.
pub const TILE_WALL: u8 = 1;

pub fn create_minimal_tileset() -> Tileset {
    let mut tileset = Tileset::new();
    tileset.set_tile(
        TILE_FLOOR,
        TileAttr::WALKABLE | TileAttr::HOVERABLE | TileAttr::SEE_THROUGH | TileAttr::MOVE_ONTO,
        TILE_FLOOR,
    );
    tileset.set_tile(TILE_WATER, TileAttr::HOVERABLE | TileAttr::SEE_THROUGH, TILE_WATER);
    tileset
}

/// A level of floor tiles framed by walls, with the player standing at `(x, y)`.
pub fn create_minimal_world(x: u8, y: u8) -> (State, HeadlessPlatform) {
    let platform = HeadlessPlatform::new(false);
    let mut state = State::new(create_minimal_tileset(), &platform);
    for row in 0..MAP_HEIGHT as u8 {
        for column in 0..MAP_WIDTH as u8 {
            let inside = (5..=122).contains(&column) && (3..=60).contains(&row);
            let tile = if inside { TILE_FLOOR } else { TILE_WALL };
            state.world.set_tile(column, row, tile);
        }
    }
    state.world.units[0] = Unit::new(1, x, y).with_health(12).with_tile(96);
    state.recenter_window();
    (state, platform)
}

/// Bytes of a level file holding the given units in their slots and a floor filled map.
pub fn create_level_bytes(units: &[(usize, Unit)]) -> Vec<u8> {
    use crate::game::consts::{LEVEL_MAP_OFFSET, LEVEL_SIZE, UNIT_SLOTS};
    let mut bytes = vec![0; LEVEL_SIZE];
    for &(slot, unit) in units {
        let fields = [unit.kind, unit.x, unit.y, unit.a, unit.b, unit.c, unit.d, unit.health as u8];
        for (index, value) in fields.into_iter().enumerate() {
            bytes[index * UNIT_SLOTS + slot] = value;
        }
    }
    bytes[LEVEL_MAP_OFFSET..].fill(TILE_FLOOR);
    bytes
}

/// Tileset asset bytes of [`create_minimal_tileset`].
pub fn create_tileset_bytes() -> Vec<u8> {
    use crate::game::consts::TILESET_SIZE;
    let tileset = create_minimal_tileset();
    let mut bytes = vec![0; TILESET_SIZE];
    for tile in 0..=255u8 {
        bytes[2 + usize::from(tile)] = tileset.destruct_path(tile);
        bytes[258 + usize::from(tile)] = tileset.attrib(tile).bits();
    }
    bytes
}
