//! The level data: a 128x64 tile map, the 64 slot unit table and the tileset tables that give
//! every tile id its attributes and its destroyed form.

use crate::entity::movement::Direction;
use crate::game::consts::{
    HIDDEN_SLOTS, ITEM_KEY, LEVEL_MAP_OFFSET, LEVEL_SIZE, MAP_SIZE, MAP_WIDTH, SOLID_SLOTS,
    TILESET_SIZE, UNIT_SLOTS,
};
use crate::game::Difficulty;

use std::ops::Range;
use thiserror::Error;

bitflags::bitflags! {
    /// Attribute bits of a tile id.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct TileAttr: u8 {
        const WALKABLE     = 0b0000_0001;
        const HOVERABLE    = 0b0000_0010;
        const MOVABLE      = 0b0000_0100;
        const DESTRUCTIBLE = 0b0000_1000;
        const SEE_THROUGH  = 0b0001_0000;
        const MOVE_ONTO    = 0b0010_0000;
        const SEARCHABLE   = 0b0100_0000;
    }
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset '{name}' could not be found")]
    Missing { name: String },
    #[error("asset '{name}' is truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        name: String,
        expected: usize,
        actual: usize,
    },
}

/// Destruct path and attribute tables of the tileset.
#[derive(Clone, Debug)]
pub struct Tileset {
    destruct_path: [u8; 256],
    attrib: [TileAttr; 256],
}

impl Tileset {
    /// Parse the tileset asset: two header bytes, 256 destruct path entries, 256 attributes.
    pub fn from_bytes(name: &str, bytes: &[u8]) -> Result<Self, AssetError> {
        if bytes.len() < TILESET_SIZE {
            return Err(AssetError::Truncated {
                name: name.into(),
                expected: TILESET_SIZE,
                actual: bytes.len(),
            });
        }
        let mut tileset = Tileset::new();
        tileset.destruct_path.copy_from_slice(&bytes[2..258]);
        for (attr, byte) in tileset.attrib.iter_mut().zip(&bytes[258..514]) {
            *attr = TileAttr::from_bits_truncate(*byte);
        }
        Ok(tileset)
    }

    pub fn new() -> Self {
        Tileset {
            destruct_path: [0; 256],
            attrib: [TileAttr::empty(); 256],
        }
    }

    pub fn attrib(&self, tile: u8) -> TileAttr {
        self.attrib[usize::from(tile)]
    }

    pub fn destruct_path(&self, tile: u8) -> u8 {
        self.destruct_path[usize::from(tile)]
    }

    pub fn set_tile(&mut self, tile: u8, attrib: TileAttr, destroyed: u8) {
        self.attrib[usize::from(tile)] = attrib;
        self.destruct_path[usize::from(tile)] = destroyed;
    }
}

impl Default for Tileset {
    fn default() -> Self {
        Self::new()
    }
}

/// One slot of the unit table. A slot with `kind == 0` is free.
///
/// The meaning of `a`..`d` depends on the unit type, e.g. a door keeps its orientation in `a`,
/// its state in `b` and its lock in `c`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Unit {
    pub kind: u8,
    pub x: u8,
    pub y: u8,
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub health: i8,
    pub timer_a: u8,
    pub timer_b: u8,
    pub tile: u8,
    pub direction: Direction,
}

impl Unit {
    pub const fn new(kind: u8, x: u8, y: u8) -> Self {
        Unit {
            kind,
            x,
            y,
            a: 0,
            b: 0,
            c: 0,
            d: 0,
            health: 0,
            timer_a: 0,
            timer_b: 0,
            tile: 0,
            direction: Direction::Up,
        }
    }

    pub const fn with_tile(mut self, tile: u8) -> Self {
        self.tile = tile;
        self
    }

    pub const fn with_health(mut self, health: i8) -> Self {
        self.health = health;
        self
    }

    pub const fn with_params(mut self, a: u8, b: u8, c: u8, d: u8) -> Self {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self
    }

    pub const fn with_timers(mut self, timer_a: u8, timer_b: u8) -> Self {
        self.timer_a = timer_a;
        self.timer_b = timer_b;
        self
    }

    pub const fn is_alive(&self) -> bool {
        self.kind != 0
    }

    pub const fn is_at(&self, x: u8, y: u8) -> bool {
        self.x == x && self.y == y
    }
}

pub struct World {
    pub units: [Unit; UNIT_SLOTS],
    map: Box<[u8; MAP_SIZE]>,
}

impl World {
    pub fn new() -> Self {
        World {
            units: [Unit::default(); UNIT_SLOTS],
            map: Box::new([0; MAP_SIZE]),
        }
    }

    /// Replace the unit table and the map with the content of a level file.
    ///
    /// The file stores each unit field as an array of 64 bytes (type, x, y, a, b, c, d, health),
    /// followed by 256 unused bytes and the row-major map.
    pub fn load_level(&mut self, name: &str, bytes: &[u8]) -> Result<(), AssetError> {
        if bytes.len() < LEVEL_SIZE {
            return Err(AssetError::Truncated {
                name: name.into(),
                expected: LEVEL_SIZE,
                actual: bytes.len(),
            });
        }
        let field = |index: usize, slot: usize| bytes[index * UNIT_SLOTS + slot];
        for (slot, unit) in self.units.iter_mut().enumerate() {
            *unit = Unit {
                kind: field(0, slot),
                x: field(1, slot),
                y: field(2, slot),
                a: field(3, slot),
                b: field(4, slot),
                c: field(5, slot),
                d: field(6, slot),
                health: field(7, slot) as i8,
                ..Unit::default()
            };
        }
        self.map
            .copy_from_slice(&bytes[LEVEL_MAP_OFFSET..LEVEL_MAP_OFFSET + MAP_SIZE]);
        debug!(
            "loaded level '{}' with {} units",
            name,
            self.units.iter().filter(|u| u.is_alive()).count()
        );
        Ok(())
    }

    pub fn map(&self) -> &[u8] {
        &self.map[..]
    }

    fn index(x: u8, y: u8) -> usize {
        (usize::from(y) * MAP_WIDTH + usize::from(x)) % MAP_SIZE
    }

    pub fn tile_at(&self, x: u8, y: u8) -> u8 {
        self.map[World::index(x, y)]
    }

    pub fn set_tile(&mut self, x: u8, y: u8, tile: u8) {
        self.map[World::index(x, y)] = tile;
    }

    pub fn player(&self) -> &Unit {
        &self.units[0]
    }

    pub fn player_mut(&mut self) -> &mut Unit {
        &mut self.units[0]
    }

    /// First live unit among the player and the robots standing exactly on `(x, y)`.
    pub fn unit_at(&self, x: u8, y: u8) -> Option<usize> {
        SOLID_SLOTS
            .into_iter()
            .find(|&slot| self.units[slot].is_alive() && self.units[slot].is_at(x, y))
    }

    /// First hidden object whose area covers `(x, y)`. A hidden object spans `c` extra columns
    /// and `d` extra rows from its origin.
    pub fn hidden_unit_at(&self, x: u8, y: u8) -> Option<usize> {
        HIDDEN_SLOTS.into_iter().find(|&slot| {
            let unit = &self.units[slot];
            let covers = |origin: u8, extent: u8, pos: u8| {
                origin == pos || (origin <= pos && u16::from(origin) + u16::from(extent) >= u16::from(pos))
            };
            unit.is_alive() && covers(unit.x, unit.c, x) && covers(unit.y, unit.d, y)
        })
    }

    pub fn free_slot(&self, range: Range<usize>) -> Option<usize> {
        range.into_iter().find(|&slot| !self.units[slot].is_alive())
    }

    /// Put `unit` into the first free slot of `range`. Does nothing if the range is full.
    pub fn spawn(&mut self, range: Range<usize>, unit: Unit) -> Option<usize> {
        let slot = self.free_slot(range)?;
        self.units[slot] = unit;
        Some(slot)
    }

    pub fn robots_remaining(&self) -> usize {
        self.units[1..28].iter().filter(|u| u.is_alive()).count()
    }

    pub fn secrets_remaining(&self) -> usize {
        self.units[HIDDEN_SLOTS].iter().filter(|u| u.is_alive()).count()
    }

    /// Easy doubles every hidden item stack except keys. Hard turns all patrolling hoverbots
    /// into attacking ones.
    pub fn apply_difficulty(&mut self, difficulty: Difficulty) {
        match difficulty {
            Difficulty::Easy => {
                for unit in &mut self.units[HIDDEN_SLOTS] {
                    if unit.is_alive() && unit.kind != ITEM_KEY {
                        unit.a <<= 1;
                    }
                }
            }
            Difficulty::Normal => {}
            Difficulty::Hard => {
                for unit in &mut self.units[SOLID_SLOTS] {
                    if unit.kind == 2 || unit.kind == 3 {
                        unit.kind = 4;
                    }
                }
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
