//! Title screen menu: start a game, pick the map and the difficulty.

use crate::game::consts::MAP_COUNT;
use crate::game::{msg, State};
use crate::platform::{Image, Module, Platform, Sound};
use crate::ui::input::{Buttons, KeyAction};

const SELECTED_COLOR: u8 = 14;
const NORMAL_COLOR: u8 = 15;
const ROW_OFFSET: u8 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuOption {
    StartGame,
    SelectMap,
    Difficulty,
}

impl MenuOption {
    const ALL: [MenuOption; 3] = [
        MenuOption::StartGame,
        MenuOption::SelectMap,
        MenuOption::Difficulty,
    ];

    fn row(self) -> u16 {
        2 + self as u16
    }
}

/// Cursor position of the title menu.
pub struct IntroMenu {
    pub selected: usize,
}

impl IntroMenu {
    pub fn new() -> Self {
        IntroMenu { selected: 0 }
    }

    pub fn option(&self) -> MenuOption {
        MenuOption::ALL[self.selected]
    }

    /// Move the selection, clamped to the option list. Returns whether it moved.
    pub fn move_by(&mut self, down: bool) -> bool {
        if down && self.selected + 1 < MenuOption::ALL.len() {
            self.selected += 1;
            true
        } else if !down && self.selected > 0 {
            self.selected -= 1;
            true
        } else {
            false
        }
    }
}

impl Default for IntroMenu {
    fn default() -> Self {
        Self::new()
    }
}

fn highlight(state: &mut State, platform: &mut dyn Platform, option: MenuOption, selected: bool) {
    let color = if selected { SELECTED_COLOR } else { NORMAL_COLOR };
    let start = state.text.address(4, option.row());
    for column in 0..10 {
        let glyph = state.text.glyph_at(start + column);
        state
            .text
            .write_colored(platform, start + column, glyph, color, ROW_OFFSET);
    }
}

fn display_map_name(state: &mut State, platform: &mut dyn Platform) {
    let name = msg::MAP_NAMES[state.map_index % MAP_COUNT];
    let start = state.text.address(1, 7);
    for (i, c) in name.chars().enumerate() {
        state
            .text
            .write_colored(platform, start + i as u16, msg::petscii(c), NORMAL_COLOR, ROW_OFFSET);
    }
}

fn start_intro_music(state: &State, platform: &mut dyn Platform) {
    let module = if state.music_on {
        Module::Intro
    } else {
        Module::SoundFx
    };
    platform.play_module(module);
}

fn display_intro_screen(state: &mut State, platform: &mut dyn Platform, menu: &IntroMenu) {
    platform.fade_screen(0, false);
    platform.display_image(Image::Intro);
    state.text.clear();
    for option in MenuOption::ALL {
        let start = state.text.address(4, option.row());
        let label = msg::MENU_OPTIONS[option as usize];
        for (i, c) in label.chars().enumerate() {
            state.text.write_colored(
                platform,
                start + i as u16,
                msg::petscii(c),
                NORMAL_COLOR,
                ROW_OFFSET,
            );
        }
    }
    display_map_name(state, platform);
    platform.render_face(state.difficulty as u8, 234, 75);
    start_intro_music(state, platform);
    platform.fade_screen(15, false);
    highlight(state, platform, menu.option(), true);
    platform.present_frame(false);
}

/// Run the title menu until a game is started. Returns `false` if the game is quitting instead.
pub fn intro_screen(state: &mut State, platform: &mut dyn Platform) -> bool {
    let mut menu = IntroMenu::new();
    display_intro_screen(state, platform, &menu);
    let keys = state.keys;
    while !platform.is_quit() {
        let key = platform.read_key();
        let buttons = platform.read_gamepad(false);
        let is = |action| key.map_or(false, |key| keys.is(key, action));
        let direction_key = |a, b| is(a) || is(b);
        let down = direction_key(KeyAction::CursorDown, KeyAction::MoveDown)
            || buttons.contains(Buttons::DOWN);
        let up = direction_key(KeyAction::CursorUp, KeyAction::MoveUp)
            || buttons.contains(Buttons::UP);
        if down || up {
            let previous = menu.option();
            if menu.move_by(down) {
                highlight(state, platform, previous, false);
                highlight(state, platform, menu.option(), true);
                platform.play_sample(Sound::MenuBeep);
            }
        } else if is(KeyAction::Space) || is(KeyAction::Return) || buttons.contains(Buttons::RED) {
            match menu.option() {
                MenuOption::StartGame => {
                    platform.stop_module();
                    platform.stop_samples();
                    return true;
                }
                MenuOption::SelectMap => {
                    platform.play_sample(Sound::MenuBeep);
                    state.map_index = (state.map_index + 1) % MAP_COUNT;
                    debug!("map selected: {}", msg::MAP_NAMES[state.map_index].trim_end());
                    display_map_name(state, platform);
                }
                MenuOption::Difficulty => {
                    state.difficulty = state.difficulty.next();
                    platform.render_face(state.difficulty as u8, 234, 75);
                    platform.play_sample(Sound::MenuBeep);
                }
            }
        } else if is(KeyAction::Music) {
            state.music_on = !state.music_on;
            start_intro_music(state, platform);
        }
        platform.present_frame(true);
        state.pump_ticks(platform);
    }
    false
}

/// File name of a level, `level-a` for the first map.
pub fn level_name(map_index: usize) -> String {
    format!("level-{}", char::from(b'a' + (map_index % MAP_COUNT) as u8))
}

/// Bindings asked for when defining custom keys, in key table order.
const CUSTOM_KEY_LABELS: [&str; 13] = [
    "move up",
    "move down",
    "move left",
    "move right",
    "fire up",
    "fire down",
    "fire left",
    "fire right",
    "cycle weapons",
    "cycle items",
    "use item",
    "search object",
    "move object",
];

/// Let the player press a key for every in-game binding. The remaining bindings keep their
/// standard keys.
pub fn define_custom_keys(state: &mut State, platform: &mut dyn Platform) {
    platform.fade_screen(0, false);
    let (screen_w, screen_h) = platform.screen_size();
    platform.clear_rect(0, 0, screen_w, screen_h);
    state.text.clear();
    for (row, label) in CUSTOM_KEY_LABELS.iter().enumerate() {
        let address = state.text.address(2, 8 + row as u16);
        state.text.write_str(platform, address, label, NORMAL_COLOR);
    }
    platform.present_frame(false);
    platform.fade_screen(15, false);

    let mut defined = 0;
    while defined < CUSTOM_KEY_LABELS.len() && !platform.is_quit() {
        if let Some(key) = platform.read_key() {
            state.keys.0[defined] = key;
            let address = state.text.address(17, 8 + defined as u16);
            state.text.write_decimal(platform, address, key, NORMAL_COLOR);
            defined += 1;
            platform.present_frame(false);
        } else {
            platform.present_frame(true);
            state.pump_ticks(platform);
        }
    }
    info!("custom keys defined: {:?}", &state.keys.0[..defined]);
}
