//! The big explosion of time bombs, plasma bolts and explosive canisters.
//!
//! Phase one blasts the centre and up to two tiles in each of the eight directions, remembering
//! the tiles it overwrote. Phase two puts back the remembered tiles, or their destroyed form.

use crate::entity::ai::UnitKind;
use crate::entity::weapon::inflict_damage;
use crate::game::consts::{
    DAMAGE_EXPLOSION, TILE_BIG_EXPLOSION, TILE_BLOWN_CANISTER, TILE_CANISTER, WEAPON_SLOTS,
};
use crate::game::state::BlastTile;
use crate::game::world::{TileAttr, Unit};
use crate::game::State;
use crate::platform::{Platform, Sound};

/// North, south, east, west, north-east, north-west, south-east, south-west.
const BLAST_DIRECTIONS: [(i8, i8); 8] = [
    (0, -1),
    (0, 1),
    (1, 0),
    (-1, 0),
    (1, -1),
    (-1, -1),
    (1, 1),
    (-1, 1),
];
const BLAST_RADIUS: i8 = 2;

pub fn time_bomb(state: &mut State, platform: &mut dyn Platform, slot: usize) {
    match state.world.units[slot].a {
        0 => blast(state, platform, slot),
        1 => clear_blast(state, platform, slot),
        _ => {}
    }
}

fn damage_at(state: &mut State, platform: &mut dyn Platform, x: u8, y: u8) {
    if let Some(target) = state.world.unit_at(x, y) {
        inflict_damage(state, platform, target, DAMAGE_EXPLOSION);
    }
}

fn blast(state: &mut State, platform: &mut dyn Platform, slot: usize) {
    if state.big_explosion_active {
        // only one explosion at a time, try again later
        state.world.units[slot].timer_a = 10;
        return;
    }
    state.big_explosion_active = true;
    state.screen_shake = 1;
    platform.play_sample(Sound::Explosion);

    let (x, y) = (state.world.units[slot].x, state.world.units[slot].y);
    damage_at(state, platform, x, y);
    if state.view.live_map {
        let centre = state.world.tile_at(x, y);
        state.world.set_tile(x, y, TILE_BIG_EXPLOSION);
        state.update_live_map_tile(platform, x, y);
        state.world.set_tile(x, y, centre);
    }

    state.blast.clear();
    for (dx, dy) in BLAST_DIRECTIONS {
        for distance in 1..=BLAST_RADIUS {
            let bx = x.wrapping_add_signed(dx * distance);
            let by = y.wrapping_add_signed(dy * distance);
            let tile = state.world.tile_at(bx, by);
            if !state.tileset.attrib(tile).contains(TileAttr::SEE_THROUGH) {
                break;
            }
            state.blast.push(BlastTile { x: bx, y: by, tile });
            state.plot_tile(platform, bx, by, TILE_BIG_EXPLOSION);
            damage_at(state, platform, bx, by);
        }
    }
    trace!("explosion at ({}, {}) covers {} tiles", x, y, state.blast.len());

    let unit = &mut state.world.units[slot];
    unit.tile = TILE_BIG_EXPLOSION;
    unit.a = 1;
    unit.timer_a = 12;
    state.view.redraw = true;
}

fn clear_blast(state: &mut State, platform: &mut dyn Platform, slot: usize) {
    let (x, y) = (state.world.units[slot].x, state.world.units[slot].y);
    let centre = state.world.tile_at(x, y);
    state.world.set_tile(x, y, TILE_BIG_EXPLOSION);
    restore_tile(state, platform, x, y, centre);
    for tile in std::mem::take(&mut state.blast) {
        restore_tile(state, platform, tile.x, tile.y, tile.tile);
    }

    state.view.redraw = true;
    state.world.units[slot].kind = UnitKind::Empty.id();
    state.big_explosion_active = false;
    state.screen_shake = 0;
}

/// Put back a tile overwritten by an explosion, unless something else replaced it meanwhile.
///
/// Destructible tiles come back in their destroyed form. A canister caught in the blast is blown
/// and starts another explosion shortly after.
pub fn restore_tile(state: &mut State, platform: &mut dyn Platform, x: u8, y: u8, saved: u8) {
    if state.world.tile_at(x, y) != TILE_BIG_EXPLOSION {
        return;
    }
    if saved == TILE_CANISTER {
        state.plot_tile(platform, x, y, TILE_BLOWN_CANISTER);
        state.world.spawn(
            WEAPON_SLOTS,
            Unit::new(UnitKind::TimeBomb.id(), x, y)
                .with_tile(TILE_CANISTER)
                .with_timers(10, 0),
        );
        return;
    }
    let tile = if state.tileset.attrib(saved).contains(TileAttr::DESTRUCTIBLE) {
        state.tileset.destruct_path(saved)
    } else {
        saved
    };
    state.plot_tile(platform, x, y, tile);
}
