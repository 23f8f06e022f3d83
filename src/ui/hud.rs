//! The status panel on the right side of the game screen and the full screen summaries shown
//! around a game.

use crate::game::msg;
use crate::game::state::{Item, Weapon};
use crate::game::State;
use crate::platform::{Image, Platform};

const BLOCK_FULL: u8 = 0x66;
const BLOCK_HALF: u8 = 0x5c;
const SPACE: u8 = 32;
const COLON: u8 = 58;
const PANEL_COLOR: u8 = 1;
const SUMMARY_COLOR: u8 = 4;

/// Frame of the game over box, three rows of eleven glyphs.
const GAME_OVER_BOX: [[u8; 11]; 3] = [
    [0x70, 0x40, 0x40, 0x40, 0x40, 0x40, 0x40, 0x40, 0x40, 0x40, 0x6e],
    [0x5d, 0x07, 0x01, 0x0d, 0x05, 0x20, 0x0f, 0x16, 0x05, 0x12, 0x5d],
    [0x6d, 0x40, 0x40, 0x40, 0x40, 0x40, 0x40, 0x40, 0x40, 0x40, 0x7d],
];

/// Left edge of the status panel in pixels.
fn panel_x(platform: &dyn Platform) -> u16 {
    platform.screen_size().0 - 48
}

/// Character address `back` cells left of the end of text row `row`.
fn row_end(state: &State, row: u16, back: u16) -> u16 {
    state.text.address(0, row) - back
}

pub fn display_game_screen(state: &mut State, platform: &mut dyn Platform) {
    platform.display_image(Image::Game);
    state.text.clear();
    let start = row_end(state, 25, 6);
    for (i, color) in [15, 15, 12, 12, 9, 9].into_iter().enumerate() {
        state
            .text
            .write_colored(platform, start + i as u16, 0x71, color, 0);
    }
}

pub fn display_load_message(state: &mut State, platform: &mut dyn Platform) {
    let (screen_w, screen_h) = platform.screen_size();
    let row = (screen_h - 32) / 2 / 8;
    let column = screen_w.saturating_sub(320) / 2 / 8;
    let start = state.text.address(column, row);
    let name = msg::MAP_NAMES[state.map_index % msg::MAP_NAMES.len()];
    state.text.write_str(platform, start, msg::LOADING_MAP, 1);
    state
        .text
        .write_str(platform, start + msg::LOADING_MAP.len() as u16, name, 1);
}

/// Health bar in half blocks plus the damage portrait.
pub fn display_player_health(state: &mut State, platform: &mut dyn Platform) {
    let health = state.world.player().health.max(0) as u8;
    let full = health >> 1;
    let start = row_end(state, 24, 6);
    let mut cell = 0;
    while cell < full.min(6) {
        state.text.write(platform, start + u16::from(cell), BLOCK_FULL);
        cell += 1;
    }
    if health & 1 != 0 && cell < 6 {
        state.text.write(platform, start + u16::from(cell), BLOCK_HALF);
        cell += 1;
    }
    while cell < 6 {
        state.text.write(platform, start + u16::from(cell), SPACE);
        cell += 1;
    }
    let portrait = 5 - full.min(5);
    platform.render_health(portrait, panel_x(platform), 131 + u16::from(portrait >> 1));
}

pub fn display_keys(state: &State, platform: &mut dyn Platform) {
    let x = panel_x(platform);
    platform.clear_rect(x, 106, 48, 14);
    for (key, offset) in [0, 1, 2].into_iter().zip([0, 16, 32]) {
        if state.inventory.keys & (1 << key) != 0 {
            platform.render_key(key, x + offset, 106);
        }
    }
}

/// Select the first weapon with ammo if none is selected.
fn preselect_weapon(state: &mut State, platform: &mut dyn Platform) {
    let inventory = &mut state.inventory;
    if inventory.weapon != Weapon::None {
        return;
    }
    inventory.weapon = if inventory.pistol_ammo != 0 {
        Weapon::Pistol
    } else if inventory.plasma_ammo != 0 {
        Weapon::Plasma
    } else {
        let x = panel_x(platform);
        platform.clear_rect(x, 8, 48, 32);
        Weapon::None
    };
}

/// Show the selected weapon and its ammo, switching away from a weapon that ran dry.
pub fn display_weapon(state: &mut State, platform: &mut dyn Platform) {
    loop {
        preselect_weapon(state, platform);
        let weapon = state.inventory.weapon;
        let sprite = match weapon {
            Weapon::None => return,
            Weapon::Pistol => 0,
            Weapon::Plasma => 1,
        };
        let ammo = state.inventory.ammo(weapon);
        if ammo != 0 {
            platform.render_item(sprite, panel_x(platform), 13);
            let address = row_end(state, 5, 3);
            state.text.write_decimal(platform, address, ammo, PANEL_COLOR);
            return;
        }
        state.inventory.weapon = Weapon::None;
    }
}

/// Select the first item in stock if none is selected.
fn preselect_item(state: &mut State, platform: &mut dyn Platform) {
    if state.inventory.item != Item::None {
        return;
    }
    let found = [Item::Bomb, Item::Emp, Item::Medkit, Item::Magnet]
        .into_iter()
        .find(|&item| state.inventory.count(item) != 0);
    match found {
        Some(item) => state.inventory.item = item,
        None => {
            let x = panel_x(platform);
            platform.clear_rect(x, 48, 48, 40);
        }
    }
}

/// Show the selected item and its count, skipping forward over items that ran out.
pub fn display_item(state: &mut State, platform: &mut dyn Platform) {
    preselect_item(state, platform);
    loop {
        let item = state.inventory.item;
        let sprite = match item {
            Item::None => return,
            Item::Bomb => 5,
            Item::Emp => 3,
            Item::Medkit => 2,
            Item::Magnet => 4,
        };
        let count = state.inventory.count(item);
        if count != 0 {
            platform.render_item(sprite, panel_x(platform), 54);
            let address = row_end(state, 11, 3);
            state.text.write_decimal(platform, address, count, PANEL_COLOR);
            return;
        }
        if item == Item::Magnet {
            state.inventory.item = Item::None;
            preselect_item(state, platform);
        } else {
            state.inventory.item = item.next();
        }
    }
}

/// Small box reading "game over" in the middle of the map window.
pub fn display_game_over_box(state: &mut State, platform: &mut dyn Platform) {
    let top = (state.text.height() - 6) / 2;
    let left = (state.text.width() - 18) / 2;
    for (row, glyphs) in GAME_OVER_BOX.iter().enumerate() {
        let start = state.text.address(left, top + row as u16);
        for (column, &glyph) in glyphs.iter().enumerate() {
            state.text.write(platform, start + column as u16, glyph);
        }
    }
}

/// Summary of the finished game: map, play time, what was left over and the difficulty.
pub fn display_endgame_screen(state: &mut State, platform: &mut dyn Platform) {
    platform.display_image(Image::GameOver);
    state.text.clear();
    let text = &mut state.text;
    let name = msg::MAP_NAMES[state.map_index % msg::MAP_NAMES.len()];
    text.write_str(platform, text.address(22, 7), name, SUMMARY_COLOR);

    let clock = state.clock;
    let time_row = text.address(0, 9);
    text.write_decimal(platform, time_row + 21, clock.hours, SUMMARY_COLOR);
    text.write_decimal(platform, time_row + 24, clock.minutes, SUMMARY_COLOR);
    text.write_decimal(platform, time_row + 27, clock.seconds, SUMMARY_COLOR);
    text.write_colored(platform, time_row + 21, SPACE, SUMMARY_COLOR, 0);
    text.write_colored(platform, time_row + 24, COLON, SUMMARY_COLOR, 0);
    text.write_colored(platform, time_row + 27, COLON, SUMMARY_COLOR, 0);

    let robots = state.world.robots_remaining().min(255) as u8;
    let secrets = state.world.secrets_remaining().min(255) as u8;
    text.write_decimal(platform, text.address(22, 11), robots, SUMMARY_COLOR);
    text.write_decimal(platform, text.address(22, 13), secrets, SUMMARY_COLOR);
    text.write_str(
        platform,
        text.address(22, 15),
        state.difficulty.word(),
        SUMMARY_COLOR,
    );
}

/// "you win!" or "you lose!" on the summary screen. Returns whether the player won.
pub fn display_win_lose(state: &mut State, platform: &mut dyn Platform) -> bool {
    let won = state.world.player().is_alive();
    let text = if won { msg::WIN } else { msg::LOSE };
    let start = state.text.address(16, 3);
    for (i, c) in text.chars().enumerate() {
        state
            .text
            .write_colored(platform, start + i as u16, msg::petscii(c), SUMMARY_COLOR, 1);
    }
    won
}
