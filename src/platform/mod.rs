//! Everything the engine needs from the machine it runs on: drawing tiles and glyphs, playing
//! music and samples, reading keys and the gamepad and loading assets.
//!
//! The engine only ever talks to a `&mut dyn Platform`. All coordinates are in pixels unless noted
//! otherwise, tiles are 24x24 pixels and glyphs 8x8.

pub mod headless;
pub mod vblank;

pub use vblank::FrameSync;

use crate::game::world::{AssetError, Unit};
use crate::ui::input::{Buttons, KeyConfig};

/// Sound effects, numbered like the sample bank.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Explosion = 0,
    ShortBeep = 1,
    Medkit = 2,
    Emp = 3,
    Magnet = 4,
    Shock = 5,
    Move = 6,
    Electrocute = 7,
    Plasma = 8,
    Pistol = 9,
    ItemFound = 10,
    Error = 11,
    CycleWeapon = 12,
    CycleItem = 13,
    Door = 14,
    MenuBeep = 15,
    Select = 16,
    Elevator = 17,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Module {
    SoundFx,
    Intro,
    Win,
    Lose,
    InGame1,
    InGame2,
    InGame3,
    InGame4,
}

impl Module {
    /// In-game music of a map, the four tracks repeat across the map list.
    pub fn for_map(map: usize) -> Module {
        match map % 4 {
            0 => Module::InGame1,
            1 => Module::InGame2,
            2 => Module::InGame3,
            _ => Module::InGame4,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Image {
    Intro,
    Game,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorShape {
    Use,
    Search,
    Move,
}

pub trait Platform {
    // timing and presentation
    fn sync(&self) -> &FrameSync;
    fn frames_per_second(&self) -> u8 {
        60
    }
    /// Request a buffer swap. With `wait_for_vblank` the call blocks until the previous swap
    /// has been performed.
    fn present_frame(&mut self, wait_for_vblank: bool);
    /// Block until the vblank handler posted at least one tick or quit was requested.
    fn wait_vblank(&mut self);
    fn swap_pending(&self) -> bool {
        self.sync().swap_pending()
    }
    fn is_quit(&self) -> bool {
        self.sync().is_quit()
    }

    // geometry
    fn screen_size(&self) -> (u16, u16);
    /// Size of the character grid in glyphs.
    fn text_size(&self) -> (u16, u16);
    /// Size of the map window in tiles.
    fn map_window_size(&self) -> (u8, u8);

    // graphics
    fn render_tile(&mut self, tile: u8, x: u16, y: u16, variant: u8, transparent: bool);
    fn render_tiles(&mut self, bg: u8, fg: u8, x: u16, y: u16, bg_variant: u8, fg_variant: u8);
    fn render_item(&mut self, item: u8, x: u16, y: u16);
    fn render_key(&mut self, key: u8, x: u16, y: u16);
    fn render_health(&mut self, health: u8, x: u16, y: u16);
    fn render_face(&mut self, face: u8, x: u16, y: u16);
    fn clear_rect(&mut self, x: u16, y: u16, width: u16, height: u16);
    fn copy_rect(&mut self, src_x: u16, src_y: u16, dst_x: u16, dst_y: u16, width: u16, height: u16);
    fn render_live_map(&mut self, map: &[u8]);
    fn render_live_map_tile(&mut self, map: &[u8], x: u8, y: u8);
    fn render_live_map_units(&mut self, map: &[u8], units: &[Unit], player_blink: bool, show_robots: bool);
    /// Draw `glyph` at character `address` (row major). Glyphs above 127 are drawn inverted.
    fn write_glyph(&mut self, address: u16, glyph: u8, color: u8, row_offset: u8);
    fn show_cursor(&mut self, x: u8, y: u8);
    fn hide_cursor(&mut self);
    fn set_cursor_shape(&mut self, shape: CursorShape);
    fn display_image(&mut self, image: Image);
    fn fade_screen(&mut self, intensity: u8, immediate: bool);
    fn start_fade(&mut self, color: u16, intensity: u8);
    fn fade(&mut self, intensity: u8);
    fn stop_fade(&mut self);

    // input
    fn read_key(&mut self) -> Option<u8>;
    fn read_gamepad(&mut self, pad_layout: bool) -> Buttons;
    fn is_input_held(&self, pad_layout: bool) -> bool;
    fn key_repeat(&mut self);
    fn clear_key_buffer(&mut self);
    fn standard_controls(&self) -> KeyConfig;

    // audio
    fn load_module(&mut self, module: Module);
    fn play_module(&mut self, module: Module);
    fn pause_module(&mut self);
    fn stop_module(&mut self);
    fn play_sample(&mut self, sound: Sound);
    fn stop_samples(&mut self);

    // assets
    /// Fill `dest` with the content of asset `name` and return the number of bytes read.
    fn load(&mut self, name: &str, dest: &mut [u8]) -> Result<usize, AssetError>;
    fn load_tileset(&mut self) -> Result<Vec<u8>, AssetError>;
}
