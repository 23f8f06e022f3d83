//! Robot behaviours: patrolling and attacking hoverbots, evilbots, rollerbots, robots drowning in
//! water and robots sent haywire by a magnet.

use crate::entity::ai::UnitKind;
use crate::entity::movement::{in_attack_range, request_walk, seek_player, Direction};
use crate::entity::weapon::inflict_damage;
use crate::game::consts::{
    DAMAGE_EVILBOT, DAMAGE_HOVERBOT, PLAYER, RANGE_ROLLERBOT, TILE_DEAD_ROBOT,
    TILE_EVILBOT_FIRST, TILE_EVILBOT_LAST, TILE_FIRE_HORIZONTAL, TILE_FIRE_VERTICAL,
    TILE_HOVERBOT_A, TILE_HOVERBOT_B, TILE_ROLLERBOT_A, TILE_ROLLERBOT_B, TILE_SMALL_EXPLOSION,
    TILE_SPARKS_END, TILE_SPARKS_FIRST, WEAPON_SLOTS,
};
use crate::game::world::{TileAttr, Unit};
use crate::game::State;
use crate::platform::{Platform, Sound};

/// Turn a destroyed robot into wreckage that vanishes on its next turn.
pub fn wreck(unit: &mut Unit) {
    unit.a = unit.kind;
    unit.kind = UnitKind::DeadRobot.id();
    unit.timer_a = 255;
    unit.tile = TILE_DEAD_ROBOT;
}

/// Sparks on top of the player whenever a robot hits it.
pub fn player_explosion(state: &mut State) {
    let (x, y) = (state.world.player().x, state.world.player().y);
    state.world.spawn(
        WEAPON_SLOTS,
        Unit::new(UnitKind::SmallExplosion.id(), x, y)
            .with_tile(TILE_SMALL_EXPLOSION)
            .with_timers(1, 0),
    );
}

fn hover_animate(state: &mut State, slot: usize) {
    let unit = &mut state.world.units[slot];
    if unit.timer_b != 0 {
        unit.timer_b -= 1;
        return;
    }
    unit.timer_b = 3;
    unit.tile = if unit.tile == TILE_HOVERBOT_A {
        TILE_HOVERBOT_B
    } else {
        TILE_HOVERBOT_A
    };
    state.check_window_redraw(slot);
}

/// Hover back and forth along one axis, turning around at every obstacle.
pub fn hover_patrol(state: &mut State, slot: usize, vertical: bool) {
    hover_animate(state, slot);
    state.world.units[slot].timer_a = 10;
    state.check_window_redraw(slot);
    let reverse = state.world.units[slot].a == 1;
    let direction = match (vertical, reverse) {
        (false, false) => Direction::Left,
        (false, true) => Direction::Right,
        (true, false) => Direction::Up,
        (true, true) => Direction::Down,
    };
    if !request_walk(&mut state.world, &state.tileset, slot, direction, TileAttr::HOVERABLE) {
        state.world.units[slot].a = u8::from(!reverse);
    }
    state.check_window_redraw(slot);
}

fn strike_player(state: &mut State, platform: &mut dyn Platform, damage: i8) {
    inflict_damage(state, platform, PLAYER, damage);
    player_explosion(state);
    platform.play_sample(Sound::Electrocute);
}

pub fn hover_attack(state: &mut State, platform: &mut dyn Platform, slot: usize) {
    state.world.units[slot].timer_b = 0;
    hover_animate(state, slot);
    state.world.units[slot].timer_a = 7;
    state.check_window_redraw(slot);
    seek_player(&mut state.world, &state.tileset, slot, TileAttr::HOVERABLE);
    if in_attack_range(&state.world, slot) {
        strike_player(state, platform, DAMAGE_HOVERBOT);
        state.world.units[slot].timer_a = 30;
    }
    state.check_window_redraw(slot);
}

pub fn evilbot(state: &mut State, platform: &mut dyn Platform, slot: usize) {
    let unit = &mut state.world.units[slot];
    unit.timer_a = 5;
    unit.tile = if (TILE_EVILBOT_FIRST..TILE_EVILBOT_LAST).contains(&unit.tile) {
        unit.tile + 1
    } else {
        TILE_EVILBOT_FIRST
    };
    if unit.timer_b != 0 {
        unit.timer_b -= 1;
        state.check_window_redraw(slot);
        return;
    }
    unit.timer_b = 1;
    state.check_window_redraw(slot);
    seek_player(&mut state.world, &state.tileset, slot, TileAttr::WALKABLE);
    if in_attack_range(&state.world, slot) {
        strike_player(state, platform, DAMAGE_EVILBOT);
        state.world.units[slot].timer_a = 15;
    }
    state.check_window_redraw(slot);
}

fn rollerbot_animate(state: &mut State, slot: usize) {
    let unit = &mut state.world.units[slot];
    if unit.timer_b != 0 {
        unit.timer_b -= 1;
        return;
    }
    unit.timer_b = 3;
    unit.tile = if unit.tile == TILE_ROLLERBOT_A {
        TILE_ROLLERBOT_B
    } else {
        TILE_ROLLERBOT_A
    };
    state.check_window_redraw(slot);
}

/// Roll along one axis like a patrolling hoverbot, shooting at a player lined up with the robot.
pub fn rollerbot(state: &mut State, platform: &mut dyn Platform, slot: usize, vertical: bool) {
    state.world.units[slot].timer_a = 7;
    rollerbot_animate(state, slot);
    state.check_window_redraw(slot);
    let reverse = state.world.units[slot].a == 1;
    let direction = match (vertical, reverse) {
        (false, false) => Direction::Left,
        (false, true) => Direction::Right,
        (true, false) => Direction::Up,
        (true, true) => Direction::Down,
    };
    if !request_walk(&mut state.world, &state.tileset, slot, direction, TileAttr::WALKABLE) {
        state.world.units[slot].a = u8::from(!reverse);
    }
    rollerbot_fire(state, platform, slot);
    state.check_window_redraw(slot);
}

/// Fire a pistol shot at the player if it is close on the same row or column.
fn rollerbot_fire(state: &mut State, platform: &mut dyn Platform, slot: usize) {
    let robot = state.world.units[slot];
    let player = *state.world.player();
    let (kind, tile) = if robot.y == player.y {
        if robot.x.abs_diff(player.x) >= 6 {
            return;
        }
        let kind = if robot.x > player.x {
            UnitKind::FireLeft
        } else {
            UnitKind::FireRight
        };
        (kind, TILE_FIRE_HORIZONTAL)
    } else if robot.x == player.x {
        if robot.y.abs_diff(player.y) >= 4 {
            return;
        }
        let kind = if robot.y > player.y {
            UnitKind::FireUp
        } else {
            UnitKind::FireDown
        };
        (kind, TILE_FIRE_VERTICAL)
    } else {
        return;
    };
    let shot = Unit::new(kind.id(), robot.x, robot.y)
        .with_tile(tile)
        .with_params(RANGE_ROLLERBOT, 0, 0, 0);
    if state.world.spawn(WEAPON_SLOTS, shot).is_some() {
        platform.play_sample(Sound::Pistol);
    }
}

/// A robot electrocuted by an EMP while hovering over water sparks for a while and then dies.
pub fn water_droid(state: &mut State, slot: usize) {
    let unit = &mut state.world.units[slot];
    if unit.timer_b != 0 {
        unit.timer_b -= 1;
    } else {
        unit.timer_b = 3;
        unit.tile += 1;
        if unit.tile == TILE_SPARKS_END {
            unit.tile = TILE_SPARKS_FIRST;
        }
    }
    unit.a = unit.a.wrapping_sub(1);
    if unit.a == 0 {
        wreck(unit);
    }
    state.check_window_redraw(slot);
}

/// Stagger around randomly until the magnet wears off, then resume the former behaviour.
pub fn haywire(state: &mut State, slot: usize) {
    state.check_window_redraw(slot);
    let direction = Direction::from_bits(state.lfsr.next());
    request_walk(&mut state.world, &state.tileset, slot, direction, TileAttr::WALKABLE);
    state.check_window_redraw(slot);
    let unit = &mut state.world.units[slot];
    unit.timer_a = 10;
    unit.timer_b = unit.timer_b.wrapping_sub(1);
    if unit.timer_b == 0 {
        unit.kind = unit.d;
    }
}

pub fn dead_robot(state: &mut State, slot: usize) {
    state.world.units[slot].kind = UnitKind::Empty.id();
}
