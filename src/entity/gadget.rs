//! Magnets, rafts and transporter pads.

use crate::entity::ai::UnitKind;
use crate::game::consts::{
    PLAYER, PLAYER_WON, TILE_DEMATERIALIZE, TILE_PLAYER_ARRIVED, TILE_RAFT, TILE_TRANSPORTER_A,
    TILE_TRANSPORTER_B, TILE_WATER,
};
use crate::game::msg;
use crate::game::State;
use crate::platform::{Platform, Sound};
use crate::ui::hud;

/// Frames of the dematerialize animation, four ticks each.
const DEMATERIALIZE_TICKS: u8 = 0x20;

/// A dropped magnet waits for something to step on it.
///
/// The lifetime is a 16 bit count split over `timer_b` (low) and `a` (high). The player picks the
/// magnet back up, a robot goes haywire.
pub fn magnet(state: &mut State, platform: &mut dyn Platform, slot: usize) {
    let unit = &mut state.world.units[slot];
    unit.timer_b = unit.timer_b.wrapping_sub(1);
    if unit.timer_b == 0 {
        unit.a = unit.a.wrapping_sub(1);
        if unit.a == 0 {
            unit.kind = UnitKind::Empty.id();
            state.magnet_active = false;
            return;
        }
    }
    let (x, y) = (unit.x, unit.y);
    let Some(found) = state.world.unit_at(x, y) else {
        return;
    };
    if found == PLAYER {
        state.inventory.magnets = state.inventory.magnets.saturating_add(1);
        hud::display_item(state, platform);
    } else {
        platform.play_sample(Sound::Magnet);
        let robot = &mut state.world.units[found];
        debug!("robot in slot {} goes haywire", found);
        robot.d = robot.kind;
        robot.kind = UnitKind::Haywire.id();
        robot.timer_b = 60;
    }
    state.world.units[slot].kind = UnitKind::Empty.id();
    state.magnet_active = false;
}

/// Raft shuttling between columns `b` and `c`, carrying the player along. `a` is 1 while it
/// travels right.
pub fn water_raft(state: &mut State, platform: &mut dyn Platform, slot: usize) {
    let raft = state.world.units[slot];
    let rightwards = raft.a == 1;
    let step: i8 = if rightwards { 1 } else { -1 };
    state.plot_tile(platform, raft.x, raft.y, TILE_WATER);

    let carries_player = state.world.player().is_at(raft.x, raft.y);
    if carries_player {
        let player = state.world.player_mut();
        player.x = player.x.wrapping_add_signed(step);
    } else {
        state.check_window_redraw(slot);
    }
    let x = raft.x.wrapping_add_signed(step);
    state.world.units[slot].x = x;
    state.plot_tile(platform, x, raft.y, TILE_RAFT);
    if carries_player {
        state.recenter_window();
    } else {
        state.check_window_redraw(slot);
    }

    let destination = if rightwards { raft.c } else { raft.b };
    let unit = &mut state.world.units[slot];
    if x == destination {
        unit.timer_a = 100;
        unit.a = u8::from(!rightwards);
    } else {
        unit.timer_a = 6;
    }
}

/// Transporter pad. `a` is 1 while it waits for every robot to be destroyed, `b` is 0 if it ends
/// the level and 1 if it sends the player to `(c, d)`.
pub fn transporter_pad(state: &mut State, platform: &mut dyn Platform, slot: usize) {
    let pad = state.world.units[slot];
    if state.world.player().is_at(pad.x, pad.y) {
        if pad.a != 0 {
            state.print_alert(platform, msg::TRANSPORTER_LOCKED, Sound::Error);
            state.world.units[slot].timer_a = 100;
        } else {
            let unit = &mut state.world.units[slot];
            unit.kind = UnitKind::Dematerialize.id();
            unit.timer_a = 5;
            unit.timer_b = 0;
        }
        return;
    }
    if pad.a != 1 {
        // active pads flicker
        let tile = if pad.timer_b != 1 {
            state.world.units[slot].timer_b = 1;
            TILE_TRANSPORTER_A
        } else {
            state.world.units[slot].timer_b = 0;
            TILE_TRANSPORTER_B
        };
        state.plot_tile(platform, pad.x, pad.y, tile);
        state.check_window_redraw(slot);
    } else if state.world.robots_remaining() == 0 {
        info!("all robots destroyed, transporter activated");
        state.world.units[slot].a = 0;
    }
    state.world.units[slot].timer_a = 30;
}

pub fn dematerialize(state: &mut State, slot: usize) {
    state.world.player_mut().tile = TILE_DEMATERIALIZE;
    let unit = &mut state.world.units[slot];
    unit.timer_b += 1;
    state.dematerialize_frame = unit.timer_b >> 2;
    if unit.timer_b != DEMATERIALIZE_TICKS {
        unit.timer_a = 1;
        state.view.redraw = true;
        return;
    }
    unit.kind = UnitKind::TransporterPad.id();
    let (ends_level, target) = (unit.b != 1, (unit.c, unit.d));
    if ends_level {
        info!("level complete");
        state.world.player_mut().kind = PLAYER_WON;
    } else {
        let player = state.world.player_mut();
        player.tile = TILE_PLAYER_ARRIVED;
        (player.x, player.y) = target;
        state.recenter_window();
    }
}
