//! Weapon fire in flight, the small explosion it leaves behind and the damage model shared by
//! every attack.

use crate::entity::ai::UnitKind;
use crate::entity::movement::Direction;
use crate::entity::robot::wreck;
use crate::game::consts::{
    DAMAGE_PISTOL, FLASH_DAMAGE, PLAYER, TILE_BLOWN_CANISTER, TILE_CANISTER,
    TILE_SMALL_EXPLOSION, TILE_SMALL_EXPLOSION_END,
};
use crate::game::world::TileAttr;
use crate::game::State;
use crate::platform::Platform;
use crate::ui::hud;

/// Subtract `amount` from the health of the unit in `slot`.
///
/// A robot running out of health turns into wreckage, the player simply stops existing which ends
/// the game on the next loop iteration.
pub fn inflict_damage(state: &mut State, platform: &mut dyn Platform, slot: usize, amount: i8) {
    let unit = &mut state.world.units[slot];
    unit.health = unit.health.saturating_sub(amount);
    if unit.health > 0 {
        if slot == PLAYER {
            hud::display_player_health(state, platform);
            state.flash_border(FLASH_DAMAGE);
        }
        return;
    }
    unit.health = 0;
    if slot == PLAYER {
        unit.kind = UnitKind::Empty.id();
        debug!("player destroyed");
        hud::display_player_health(state, platform);
        state.flash_border(FLASH_DAMAGE);
    } else if unit.kind != UnitKind::DeadRobot.id() {
        debug!("robot in slot {} destroyed", slot);
        wreck(unit);
    }
}

/// Patrolling hoverbots that get shot start hunting the player.
pub fn alter_ai(state: &mut State, slot: usize) {
    let unit = &mut state.world.units[slot];
    if unit.kind == UnitKind::LeftRightDroid.id() || unit.kind == UnitKind::UpDownDroid.id() {
        unit.kind = UnitKind::HoverAttack.id();
    }
}

fn deactivate(state: &mut State, slot: usize) {
    let unit = &mut state.world.units[slot];
    unit.kind = UnitKind::Empty.id();
    if unit.b == 1 {
        unit.b = 0;
        state.plasma_active = false;
    }
}

/// Move a pistol shot or plasma bolt one tile and resolve what it hits.
///
/// `a` holds the remaining range, `b` is 0 for pistol and 1 for plasma fire.
pub fn projectile(state: &mut State, platform: &mut dyn Platform, slot: usize, direction: Direction) {
    if state.world.units[slot].a == 0 {
        deactivate(state, slot);
        state.check_window_redraw(slot);
        return;
    }
    state.check_window_redraw(slot);
    let unit = &mut state.world.units[slot];
    (unit.x, unit.y) = direction.step(unit.x, unit.y);
    unit.a -= 1;
    if unit.b == 0 {
        pistol_hit(state, platform, slot);
    } else {
        plasma_hit(state, slot);
    }
}

fn pistol_hit(state: &mut State, platform: &mut dyn Platform, slot: usize) {
    let (x, y) = (state.world.units[slot].x, state.world.units[slot].y);
    let tile = state.world.tile_at(x, y);
    if tile == TILE_CANISTER {
        state.plot_tile(platform, x, y, TILE_BLOWN_CANISTER);
        let unit = &mut state.world.units[slot];
        unit.kind = UnitKind::TimeBomb.id();
        unit.tile = TILE_CANISTER;
        unit.timer_a = 5;
        unit.a = 0;
        return;
    }
    if !state.tileset.attrib(tile).contains(TileAttr::SEE_THROUGH) {
        become_small_explosion(state, slot);
        state.check_window_redraw(slot);
        return;
    }
    if let Some(target) = state.world.unit_at(x, y) {
        become_small_explosion(state, slot);
        inflict_damage(state, platform, target, DAMAGE_PISTOL);
        alter_ai(state, target);
    }
    state.check_window_redraw(slot);
}

fn plasma_hit(state: &mut State, slot: usize) {
    let (x, y) = (state.world.units[slot].x, state.world.units[slot].y);
    let tile = state.world.tile_at(x, y);
    let clear = tile != TILE_CANISTER
        && state.tileset.attrib(tile).contains(TileAttr::SEE_THROUGH)
        && state.world.unit_at(x, y).is_none();
    if !clear {
        let unit = &mut state.world.units[slot];
        unit.kind = UnitKind::TimeBomb.id();
        unit.timer_a = 1;
        unit.a = 0;
        state.plasma_active = false;
    }
    state.check_window_redraw(slot);
}

fn become_small_explosion(state: &mut State, slot: usize) {
    let unit = &mut state.world.units[slot];
    unit.kind = UnitKind::SmallExplosion.id();
    unit.tile = TILE_SMALL_EXPLOSION;
}

pub fn small_explosion(state: &mut State, slot: usize) {
    let unit = &mut state.world.units[slot];
    unit.timer_a = 0;
    unit.tile += 1;
    if unit.tile == TILE_SMALL_EXPLOSION_END {
        unit.kind = UnitKind::Empty.id();
    }
    state.check_window_redraw(slot);
}
