//! Walking and hovering on the tile grid, plus the proximity tests robots and doors use.

use crate::game::consts::{WALK_MAX_X, WALK_MAX_Y, WALK_MIN_X, WALK_MIN_Y};
use crate::game::world::{TileAttr, Tileset, World};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Up = 0,
    Down = 1,
    Left = 2,
    Right = 3,
}

impl Direction {
    /// Pick a direction from the two lowest bits of `bits`.
    pub fn from_bits(bits: u8) -> Direction {
        match bits & 3 {
            0 => Direction::Up,
            1 => Direction::Down,
            2 => Direction::Left,
            _ => Direction::Right,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Position one tile further in this direction, wrapping like the 8 bit coordinates do.
    pub fn step(self, x: u8, y: u8) -> (u8, u8) {
        let (dx, dy) = self.delta();
        (x.wrapping_add_signed(dx), y.wrapping_add_signed(dy))
    }

    fn at_edge(self, x: u8, y: u8) -> bool {
        match self {
            Direction::Up => y == WALK_MIN_Y,
            Direction::Down => y == WALK_MAX_Y,
            Direction::Left => x == WALK_MIN_X,
            Direction::Right => x == WALK_MAX_X,
        }
    }
}

/// Try to move the unit in `slot` one tile towards `direction`.
///
/// The unit turns even if it cannot move. The move fails at the edge of the walkable area, if the
/// destination tile lacks any attribute in `mask` or if the player or a robot stands there.
pub fn request_walk(
    world: &mut World,
    tileset: &Tileset,
    slot: usize,
    direction: Direction,
    mask: TileAttr,
) -> bool {
    let unit = &mut world.units[slot];
    unit.direction = direction;
    let (x, y) = (unit.x, unit.y);
    if direction.at_edge(x, y) {
        return false;
    }
    let (dest_x, dest_y) = direction.step(x, y);
    if !tileset.attrib(world.tile_at(dest_x, dest_y)).contains(mask) {
        return false;
    }
    if world.unit_at(dest_x, dest_y).is_some() {
        return false;
    }
    let unit = &mut world.units[slot];
    unit.x = dest_x;
    unit.y = dest_y;
    true
}

/// Step towards the player, first horizontally and then vertically.
pub fn seek_player(world: &mut World, tileset: &Tileset, slot: usize, mask: TileAttr) {
    let (px, py) = (world.player().x, world.player().y);
    let x = world.units[slot].x;
    if x > px {
        request_walk(world, tileset, slot, Direction::Left, mask);
    } else if x < px {
        request_walk(world, tileset, slot, Direction::Right, mask);
    }
    let y = world.units[slot].y;
    if y > py {
        request_walk(world, tileset, slot, Direction::Up, mask);
    } else if y < py {
        request_walk(world, tileset, slot, Direction::Down, mask);
    }
}

/// A robot can only hit the player from an orthogonally adjacent tile.
pub fn in_attack_range(world: &World, slot: usize) -> bool {
    let (dx, dy) = distance_to_player(world, slot);
    (dx == 1 && dy == 0) || (dx == 0 && dy == 1)
}

/// Doors and elevators react to a player at most one tile away on both axes.
pub fn player_nearby(world: &World, slot: usize) -> bool {
    let (dx, dy) = distance_to_player(world, slot);
    dx < 2 && dy < 2
}

fn distance_to_player(world: &World, slot: usize) -> (u8, u8) {
    let unit = &world.units[slot];
    let player = world.player();
    (unit.x.abs_diff(player.x), unit.y.abs_diff(player.y))
}
