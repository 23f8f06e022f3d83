//! Loops that take over input until the player made a choice: the object cursor, the elevator
//! panel, the pause prompt and the screens after a game ended.
//!
//! All of them keep polling quit. Those that run inside a game keep the world simulated.

use crate::entity::movement::Direction;
use crate::game::consts::{DOOR_SLOTS, PLAYER, TILE_DEAD_PLAYER};
use crate::game::msg;
use crate::game::State;
use crate::platform::{Module, Platform, Sound};
use crate::ui::input::{Buttons, KeyAction};
use crate::ui::{hud, render};

/// Glyph of the first floor button, the others follow.
const FLOOR_GLYPH: u8 = 0x31;
const ELEVATOR_KIND: u8 = 19;

fn pad_direction(buttons: Buttons) -> Option<Direction> {
    if buttons.contains(Buttons::RIGHT) {
        Some(Direction::Right)
    } else if buttons.contains(Buttons::LEFT) {
        Some(Direction::Left)
    } else if buttons.contains(Buttons::DOWN) {
        Some(Direction::Down)
    } else if buttons.contains(Buttons::UP) {
        Some(Direction::Up)
    } else {
        None
    }
}

/// Direction picked by a cursor or move key or the d-pad this frame.
fn read_direction(state: &State, platform: &mut dyn Platform) -> Option<Direction> {
    let key = platform.read_key();
    let buttons = platform.read_gamepad(state.control.is_pad());
    key.and_then(|key| state.keys.direction(key))
        .or_else(|| pad_direction(buttons))
}

/// Keep the world running until a direction is chosen. Returns `None` if the player died or the
/// game is quitting.
pub fn select_direction(state: &mut State, platform: &mut dyn Platform) -> Option<Direction> {
    while !platform.is_quit() {
        state.idle_frame(platform);
        if !state.world.player().is_alive() {
            platform.hide_cursor();
            return None;
        }
        if let Some(direction) = read_direction(state, platform) {
            return Some(direction);
        }
    }
    None
}

/// Show the object cursor on the player and let it step one tile. The player turns towards the
/// chosen tile, whose map position is returned.
pub fn user_select_object(state: &mut State, platform: &mut dyn Platform) -> Option<(u8, u8)> {
    platform.play_sample(Sound::Select);
    let view = &state.view;
    let (cursor_x, cursor_y) = if view.is_classic() {
        (view.width() / 2, view.height() / 2)
    } else {
        let player = state.world.player();
        (player.x.wrapping_sub(view.x), player.y.wrapping_sub(view.y))
    };
    if !state.view.live_map {
        platform.show_cursor(cursor_x, cursor_y);
    }
    let direction = select_direction(state, platform)?;
    state.world.units[PLAYER].direction = direction;
    let (cursor_x, cursor_y) = direction.step(cursor_x, cursor_y);
    if !state.view.live_map {
        platform.show_cursor(cursor_x, cursor_y);
    }
    Some((
        cursor_x.wrapping_add(state.view.x),
        cursor_y.wrapping_add(state.view.y),
    ))
}

/// Wait for any key or button.
pub fn wait_any_input(state: &mut State, platform: &mut dyn Platform) {
    let pad_layout = state.control.is_pad();
    while !platform.is_quit() {
        let key = platform.read_key();
        let buttons = platform.read_gamepad(pad_layout);
        if key.is_some() || !buttons.is_empty() {
            return;
        }
        platform.present_frame(true);
        state.pump_ticks(platform);
    }
}

/// Pause prompt. Returns `true` if the player chose to leave the game.
pub fn pause_game(state: &mut State, platform: &mut dyn Platform) -> bool {
    platform.play_sample(Sound::MenuBeep);
    state.clock.active = false;
    state.text.scroll_info(platform);
    state.print_info(platform, msg::PAUSED);
    platform.clear_key_buffer();
    state.timers.key = 20;
    platform.present_frame(false);
    let pad_layout = state.control.is_pad();
    let keys = state.keys;
    while !platform.is_quit() {
        let key = platform.read_key();
        let buttons = platform.read_gamepad(pad_layout);
        let is = |action| key.map_or(false, |key| keys.is(key, action));
        if is(KeyAction::Pause) || is(KeyAction::No) || buttons.contains(Buttons::BLUE) {
            for _ in 0..3 {
                state.text.scroll_info(platform);
            }
            platform.clear_key_buffer();
            state.timers.key = 20;
            state.clock.active = true;
            platform.play_sample(Sound::MenuBeep);
            return false;
        }
        if is(KeyAction::Yes) || buttons.contains(Buttons::RED) {
            info!("game abandoned");
            state.world.player_mut().kind = 0;
            platform.play_sample(Sound::MenuBeep);
            return true;
        }
        platform.present_frame(true);
        state.pump_ticks(platform);
    }
    false
}

fn invert_floor(state: &mut State, platform: &mut dyn Platform, floor: u8) {
    let address = state.text.address(5, state.text.height() - 1) + u16::from(floor);
    let glyph = state.text.glyph_at(address) ^ 0x80;
    state.text.write(platform, address, glyph);
}

/// Move the player to the elevator serving `floor`.
fn go_to_floor(state: &mut State, platform: &mut dyn Platform, floor: u8) {
    let target = DOOR_SLOTS
        .map(|slot| state.world.units[slot])
        .find(|unit| unit.kind == ELEVATOR_KIND && unit.c == floor);
    let Some(elevator) = target else {
        return;
    };
    let player = state.world.player_mut();
    player.x = elevator.x;
    player.y = elevator.y.wrapping_sub(1);
    state.recenter_window();
    if !state.view.live_map {
        render::draw_map_window(state, platform);
    }
    platform.play_sample(Sound::Elevator);
    debug!("elevator to floor {}", floor);
}

/// Floor selection inside the elevator in `slot`. Left and right pick a floor, down leaves.
pub fn elevator_select(state: &mut State, platform: &mut dyn Platform, slot: usize) {
    if !state.view.live_map {
        render::draw_map_window(state, platform);
    }
    let elevator = state.world.units[slot];
    let max_floor = elevator.d;
    let mut floor = elevator.c;
    let buttons_row = state.text.address(6, state.text.height() - 1);
    for i in 0..max_floor {
        state
            .text
            .write(platform, buttons_row + u16::from(i), FLOOR_GLYPH + i);
    }
    invert_floor(state, platform, floor);
    platform.present_frame(false);

    let pad_layout = state.control.is_pad();
    let keys = state.keys;
    while !platform.is_quit() {
        let key = platform.read_key();
        let buttons = platform.read_gamepad(pad_layout);
        let is = |action| key.map_or(false, |key| keys.is(key, action));
        let play = pad_layout && buttons.contains(Buttons::PLAY);
        let direction = key.and_then(|key| keys.direction(key));
        if is(KeyAction::LiveMap) || (play && buttons.contains(Buttons::LEFT)) {
            render::toggle_live_map(state, platform);
            if !state.view.live_map {
                render::draw_map_window(state, platform);
            }
            platform.clear_key_buffer();
            state.timers.key = 20;
        } else if is(KeyAction::LiveMapRobots) || (play && buttons.contains(Buttons::DOWN)) {
            render::toggle_live_map_robots(state);
            platform.clear_key_buffer();
            state.timers.key = 20;
        } else if direction == Some(Direction::Left) || buttons.contains(Buttons::LEFT) {
            if floor != 1 {
                invert_floor(state, platform, floor);
                floor -= 1;
                invert_floor(state, platform, floor);
                go_to_floor(state, platform, floor);
                platform.present_frame(false);
            }
        } else if direction == Some(Direction::Right) || buttons.contains(Buttons::RIGHT) {
            if floor != max_floor {
                invert_floor(state, platform, floor);
                floor += 1;
                invert_floor(state, platform, floor);
                go_to_floor(state, platform, floor);
                platform.present_frame(false);
            }
        } else if direction == Some(Direction::Down) || buttons.contains(Buttons::DOWN) {
            for _ in 0..3 {
                state.text.scroll_info(platform);
            }
            platform.clear_key_buffer();
            state.timers.key = 20;
            return;
        }
        if state.view.live_map {
            render::draw_live_map(state, platform);
        }
        platform.present_frame(true);
        state.pump_ticks(platform);
    }
}

/// The game ended: let the world settle and show the game over box until any input.
pub fn game_over(state: &mut State, platform: &mut dyn Platform) {
    platform.present_frame(false);
    state.clock.active = false;
    platform.pause_module();
    let won = state.world.player().is_alive();
    info!("game over, player {}", if won { "won" } else { "lost" });
    if !won {
        state.world.player_mut().tile = TILE_DEAD_PLAYER;
        state.timers.key = 100;
    }
    while state.timers.key != 0 && !platform.is_quit() {
        state.idle_frame(platform);
    }
    hud::display_game_over_box(state, platform);
    platform.present_frame(false);
    platform.clear_key_buffer();
    platform.stop_module();
    if state.music_on {
        platform.load_module(if won { Module::Win } else { Module::Lose });
    }
    wait_any_input(state, platform);
}

/// Summary screen, shown until any input.
pub fn end_screen(state: &mut State, platform: &mut dyn Platform) {
    platform.clear_key_buffer();
    platform.stop_module();
    platform.start_fade(0x000, 15);
    platform.fade_screen(0, false);
    hud::display_endgame_screen(state, platform);
    platform.stop_samples();
    let won = hud::display_win_lose(state, platform);
    if state.music_on {
        platform.play_module(if won { Module::Win } else { Module::Lose });
    }
    platform.present_frame(false);
    platform.fade_screen(15, false);
    wait_any_input(state, platform);
    platform.clear_key_buffer();
    platform.stop_module();
}
