//! Sliding doors, elevators and trash compactors. All three are small state machines that redraw a
//! handful of map tiles on every transition.

use crate::entity::ai::UnitKind;
use crate::entity::movement::player_nearby;
use crate::game::consts::{
    FLASH_DAMAGE, KEY_HEART, KEY_SPADE, KEY_STAR, PLAYER, TILE_COMPACTOR, TILE_FLOOR,
    TILE_SMALL_EXPLOSION, WEAPON_SLOTS,
};
use crate::game::msg;
use crate::game::world::Unit;
use crate::game::State;
use crate::platform::{Platform, Sound};
use crate::ui::modal;

type Pieces = [u8; 3];

const OPENING_A: [Pieces; 2] = [[88, 89, 86], [70, 74, 78]];
const OPENING_B: [Pieces; 2] = [[17, 9, 91], [27, 9, 15]];
const CLOSING_A: [Pieces; 2] = [[84, 85, 86], [69, 73, 77]];
const CLOSING_B: [Pieces; 2] = [[80, 81, 82], [68, 72, 76]];

const ELEVATOR_OPENING_A: Pieces = [181, 89, 173];
const ELEVATOR_OPENING_B: Pieces = [182, 9, 172];
const ELEVATOR_CLOSING_A: Pieces = [84, 85, 173];
const ELEVATOR_CLOSING_B: Pieces = [80, 81, 174];

const COMPACTOR_OPEN: [u8; 4] = [144, 145, 148, 148];
const COMPACTOR_HALF: [u8; 4] = [146, 147, 150, 151];
const COMPACTOR_CLOSED: [u8; 4] = [152, 153, 156, 157];

/// Door states kept in the `b` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorState {
    OpeningA = 0,
    OpeningB = 1,
    Open = 2,
    ClosingA = 3,
    ClosingB = 4,
    Closed = 5,
}

impl DoorState {
    pub fn from_id(id: u8) -> Option<DoorState> {
        use DoorState::*;
        [OpeningA, OpeningB, Open, ClosingA, ClosingB, Closed]
            .get(usize::from(id))
            .copied()
    }
}

/// Plot three door pieces centred on the door unit, in a row or in a column.
fn draw_door(state: &mut State, platform: &mut dyn Platform, slot: usize, pieces: Pieces, vertical: bool) {
    let (x, y) = (state.world.units[slot].x, state.world.units[slot].y);
    for (offset, tile) in pieces.into_iter().enumerate() {
        let offset = offset as u8;
        if vertical {
            state.world.set_tile(x, y.wrapping_sub(1).wrapping_add(offset), tile);
        } else {
            state.world.set_tile(x.wrapping_sub(1).wrapping_add(offset), y, tile);
        }
    }
    state.update_live_map_tile(platform, x, y);
}

fn advance(state: &mut State, slot: usize, next: DoorState, timer: u8) {
    let unit = &mut state.world.units[slot];
    unit.b = next as u8;
    unit.timer_a = timer;
    state.check_window_redraw(slot);
}

/// Whether the key ring opens a door with lock `lock` (0 none, 1 spade, 2 heart, 3 star).
pub fn unlocked(lock: u8, keys: u8) -> bool {
    match lock {
        0 => true,
        1 => keys & KEY_SPADE != 0,
        2 => keys & KEY_HEART != 0,
        3 => keys & KEY_STAR != 0,
        _ => false,
    }
}

/// Automatic sliding door. `a` is 0 for a horizontal and 1 for a vertical door, `c` the lock.
pub fn door(state: &mut State, platform: &mut dyn Platform, slot: usize) {
    let unit = state.world.units[slot];
    let Some(door_state) = DoorState::from_id(unit.b) else {
        return;
    };
    let vertical = unit.a == 1;
    let pieces = |table: [Pieces; 2]| table[usize::from(vertical)];
    match door_state {
        DoorState::OpeningA => {
            draw_door(state, platform, slot, pieces(OPENING_A), vertical);
            advance(state, slot, DoorState::OpeningB, 5);
        }
        DoorState::OpeningB => {
            draw_door(state, platform, slot, pieces(OPENING_B), vertical);
            advance(state, slot, DoorState::Open, 30);
        }
        DoorState::Open => {
            if player_nearby(&state.world, slot) {
                state.world.units[slot].timer_b = 30;
                return;
            }
            if state.world.tile_at(unit.x, unit.y) != TILE_FLOOR {
                // blocked by an object
                state.world.units[slot].timer_a = 35;
                return;
            }
            platform.play_sample(Sound::Door);
            draw_door(state, platform, slot, pieces(OPENING_A), vertical);
            advance(state, slot, DoorState::ClosingA, 5);
        }
        DoorState::ClosingA => {
            draw_door(state, platform, slot, pieces(CLOSING_A), vertical);
            advance(state, slot, DoorState::ClosingB, 5);
        }
        DoorState::ClosingB => {
            draw_door(state, platform, slot, pieces(CLOSING_B), vertical);
            advance(state, slot, DoorState::Closed, 5);
        }
        DoorState::Closed => {
            if player_nearby(&state.world, slot) && unlocked(unit.c, state.inventory.keys) {
                platform.play_sample(Sound::Door);
                draw_door(state, platform, slot, pieces(CLOSING_A), vertical);
                advance(state, slot, DoorState::OpeningA, 5);
            } else {
                state.world.units[slot].timer_a = 20;
            }
        }
    }
}

/// Elevator door. `c` is the floor the elevator is on, `d` the number of floors.
pub fn elevator(state: &mut State, platform: &mut dyn Platform, slot: usize) {
    let unit = state.world.units[slot];
    let Some(door_state) = DoorState::from_id(unit.b) else {
        return;
    };
    match door_state {
        DoorState::OpeningA => {
            draw_door(state, platform, slot, ELEVATOR_OPENING_A, false);
            advance(state, slot, DoorState::OpeningB, 5);
        }
        DoorState::OpeningB => {
            draw_door(state, platform, slot, ELEVATOR_OPENING_B, false);
            advance(state, slot, DoorState::Open, 50);
        }
        DoorState::Open => {
            if state.world.tile_at(unit.x, unit.y) != TILE_FLOOR
                || state.world.unit_at(unit.x, unit.y).is_some()
            {
                state.world.units[slot].timer_a = 35;
                return;
            }
            platform.play_sample(Sound::Door);
            draw_door(state, platform, slot, ELEVATOR_OPENING_A, false);
            advance(state, slot, DoorState::ClosingA, 5);
        }
        DoorState::ClosingA => {
            draw_door(state, platform, slot, ELEVATOR_CLOSING_A, false);
            advance(state, slot, DoorState::ClosingB, 5);
        }
        DoorState::ClosingB => {
            draw_door(state, platform, slot, ELEVATOR_CLOSING_B, false);
            advance(state, slot, DoorState::Closed, 5);
            elevator_panel(state, platform, slot);
        }
        DoorState::Closed => {
            if player_nearby(&state.world, slot) {
                platform.play_sample(Sound::Door);
                draw_door(state, platform, slot, ELEVATOR_CLOSING_A, false);
                advance(state, slot, DoorState::OpeningA, 5);
            } else {
                state.world.units[slot].timer_a = 20;
            }
        }
    }
}

/// Offer the floor selection to a player standing inside the closed elevator.
fn elevator_panel(state: &mut State, platform: &mut dyn Platform, slot: usize) {
    let elevator = state.world.units[slot];
    let player = state.world.player();
    if player.x != elevator.x || player.y != elevator.y.wrapping_sub(1) {
        return;
    }
    state.print_info(platform, msg::ELEVATOR);
    state.print_info(platform, msg::ELEVATOR_LEVELS);
    modal::elevator_select(state, platform, slot);
}

fn draw_compactor(state: &mut State, slot: usize, pieces: [u8; 4]) {
    let (x, y) = (state.world.units[slot].x, state.world.units[slot].y);
    let above = y.wrapping_sub(1);
    state.world.set_tile(x, above, pieces[0]);
    state.world.set_tile(x.wrapping_add(1), above, pieces[1]);
    state.world.set_tile(x, y, pieces[2]);
    state.world.set_tile(x.wrapping_add(1), y, pieces[3]);
    state.check_window_redraw(slot);
}

/// Trash compactor. `a` cycles open, closing, closed and opening. Whatever stands inside while
/// it closes is crushed.
pub fn trash_compactor(state: &mut State, platform: &mut dyn Platform, slot: usize) {
    let unit = state.world.units[slot];
    match unit.a {
        0 => {
            if state.world.tile_at(unit.x, unit.y) == TILE_COMPACTOR {
                state.world.set_tile(unit.x.wrapping_add(1), unit.y, TILE_COMPACTOR);
                state.world.units[slot].timer_a = 20;
                if state.world.unit_at(unit.x, unit.y).is_none() {
                    return;
                }
            }
            draw_compactor(state, slot, COMPACTOR_HALF);
            let unit = &mut state.world.units[slot];
            unit.a = 1;
            unit.timer_a = 10;
            platform.play_sample(Sound::Door);
        }
        1 => {
            draw_compactor(state, slot, COMPACTOR_CLOSED);
            let compactor = &mut state.world.units[slot];
            compactor.a = 2;
            compactor.timer_a = 50;
            let victim = state
                .world
                .unit_at(unit.x, unit.y)
                .or_else(|| state.world.unit_at(unit.x.wrapping_add(1), unit.y));
            let Some(victim) = victim else {
                return;
            };
            info!("slot {} crushed by the trash compactor", victim);
            state.print_info(platform, msg::TERMINATED);
            platform.play_sample(Sound::Explosion);
            let crushed = &mut state.world.units[victim];
            crushed.kind = UnitKind::Empty.id();
            crushed.health = 0;
            let sparks = Unit::new(UnitKind::SmallExplosion.id(), unit.x, unit.y)
                .with_tile(TILE_SMALL_EXPLOSION);
            if state.world.spawn(WEAPON_SLOTS, sparks).is_some() && victim == PLAYER {
                state.flash_border(FLASH_DAMAGE);
            }
            state.check_window_redraw(slot);
        }
        2 => {
            draw_compactor(state, slot, COMPACTOR_HALF);
            let unit = &mut state.world.units[slot];
            unit.a = 3;
            unit.timer_a = 10;
        }
        3 => {
            draw_compactor(state, slot, COMPACTOR_OPEN);
            let unit = &mut state.world.units[slot];
            unit.a = 0;
            unit.timer_a = 20;
            platform.play_sample(Sound::Door);
        }
        _ => {}
    }
}
