use std::ops::Range;

// map
pub const MAP_WIDTH: usize = 128;
pub const MAP_HEIGHT: usize = 64;
pub const MAP_SIZE: usize = MAP_WIDTH * MAP_HEIGHT;
pub const MAP_COUNT: usize = 14;

// walking units never leave this rectangle
pub const WALK_MIN_X: u8 = 5;
pub const WALK_MAX_X: u8 = 122;
pub const WALK_MIN_Y: u8 = 3;
pub const WALK_MAX_Y: u8 = 60;

// unit table
pub const UNIT_SLOTS: usize = 64;
pub const PLAYER: usize = 0;
pub const ENEMY_SLOTS: Range<usize> = 1..28;
pub const SOLID_SLOTS: Range<usize> = 0..28;
pub const WEAPON_SLOTS: Range<usize> = 28..32;
pub const DOOR_SLOTS: Range<usize> = 32..48;
pub const HIDDEN_SLOTS: Range<usize> = 48..64;
pub const SPRITE_SLOTS: Range<usize> = 0..32;

// level file layout
pub const LEVEL_SIZE: usize = 8960;
pub const LEVEL_MAP_OFFSET: usize = 768;
pub const TILESET_SIZE: usize = 2 + 256 + 256;

pub const PLAYER_MAX_HEALTH: i8 = 12;
// type of the player unit while playing and after leaving through a transporter
pub const PLAYER_ALIVE: u8 = 1;
pub const PLAYER_WON: u8 = 2;

// tiles
pub const TILE_FLOOR: u8 = 9;
pub const TILE_TRANSPORTER_A: u8 = 30;
pub const TILE_TRANSPORTER_B: u8 = 31;
pub const TILE_BIG_CRATE: u8 = 41;
pub const TILE_SMALL_CRATE: u8 = 45;
pub const TILE_PI_CRATE: u8 = 199;
pub const TILE_PLAYER: u8 = 96;
pub const TILE_PLAYER_ARRIVED: u8 = 97;
pub const TILE_HOVERBOT_A: u8 = 98;
pub const TILE_HOVERBOT_B: u8 = 99;
pub const TILE_EVILBOT_FIRST: u8 = 100;
pub const TILE_EVILBOT_LAST: u8 = 103;
pub const TILE_DEAD_PLAYER: u8 = 111;
pub const TILE_DEAD_ROBOT: u8 = 115;
pub const TILE_BOMB: u8 = 130;
pub const TILE_CANISTER: u8 = 131;
pub const TILE_MAGNET: u8 = 134;
pub const TILE_BLOWN_CANISTER: u8 = 135;
pub const TILE_SPARKS_FIRST: u8 = 140;
pub const TILE_SPARKS_END: u8 = 143;
pub const TILE_COMPACTOR: u8 = 148;
pub const TILE_ROLLERBOT_A: u8 = 164;
pub const TILE_ROLLERBOT_B: u8 = 165;
pub const TILE_WATER: u8 = 204;
pub const TILE_PLASMA_VERTICAL: u8 = 240;
pub const TILE_PLASMA_HORIZONTAL: u8 = 241;
pub const TILE_RAFT: u8 = 242;
pub const TILE_DEMATERIALIZE: u8 = 243;
pub const TILE_FIRE_VERTICAL: u8 = 244;
pub const TILE_FIRE_HORIZONTAL: u8 = 245;
pub const TILE_BIG_EXPLOSION: u8 = 246;
pub const TILE_SMALL_EXPLOSION: u8 = 248;
pub const TILE_SMALL_EXPLOSION_END: u8 = 252;

// hidden item types
pub const ITEM_KEY: u8 = 128;
pub const ITEM_BOMB: u8 = 129;
pub const ITEM_EMP: u8 = 130;
pub const ITEM_PISTOL: u8 = 131;
pub const ITEM_PLASMA: u8 = 132;
pub const ITEM_MEDKIT: u8 = 133;
pub const ITEM_MAGNET: u8 = 134;

// key ring bits
pub const KEY_SPADE: u8 = 0x01;
pub const KEY_HEART: u8 = 0x02;
pub const KEY_STAR: u8 = 0x04;

// damage
pub const DAMAGE_PISTOL: i8 = 1;
pub const DAMAGE_HOVERBOT: i8 = 1;
pub const DAMAGE_EVILBOT: i8 = 5;
pub const DAMAGE_EXPLOSION: i8 = 11;

// ranges of weapon fire
pub const RANGE_VERTICAL: u8 = 3;
pub const RANGE_HORIZONTAL: u8 = 5;
pub const RANGE_ROLLERBOT: u8 = 5;

// border flash colours, 12 bit rgb
pub const FLASH_DAMAGE: u16 = 0xf00;
pub const FLASH_EMP: u16 = 0x00f;
pub const FLASH_TICKS: u8 = 10;

// ticks between water animation steps
pub const ANIMATION_TICKS: u8 = 20;
pub const CINEMA_LENGTH: u8 = 197;
pub const SEARCH_PERIOD_TICKS: u8 = 18;
pub const SEARCH_PERIODS: usize = 8;
pub const SELECT_TIMEOUT: u8 = 3;
