//! A platform without a screen or speakers.
//!
//! Drawing and audio calls are only counted and recorded, assets come from a directory or are
//! inserted by hand, and input is fed from a JSON script or pushed directly. Vertical blanks are
//! simulated whenever the game waits for one, unless a realtime timer thread drives them.

use crate::game::consts::TILESET_SIZE;
use crate::game::world::{AssetError, Unit};
use crate::platform::vblank::{spawn_vblank_thread, FrameSync};
use crate::platform::{CursorShape, Image, Module, Platform, Sound};
use crate::ui::input::{Buttons, KeyAction, KeyConfig, KEY_ACTIONS};

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Key codes of the standard controls. Cursor keys use the PETSCII control codes.
pub mod keys {
    pub const CURSOR_UP: u8 = 0x91;
    pub const CURSOR_DOWN: u8 = 0x11;
    pub const CURSOR_LEFT: u8 = 0x9d;
    pub const CURSOR_RIGHT: u8 = 0x1d;
    pub const ESCAPE: u8 = 0x1b;
    pub const RETURN: u8 = b'\r';
    pub const TAB: u8 = b'\t';
}

/// One entry of an input script: wait `idle` frames, then deliver the key and the buttons for one
/// frame.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStep {
    #[serde(default)]
    pub idle: u32,
    #[serde(default)]
    pub key: Option<u8>,
    #[serde(default)]
    pub buttons: u16,
}

/// Parse a JSON array of script steps.
pub fn parse_script(json: &str) -> Result<Vec<ScriptStep>, serde_json::Error> {
    serde_json::from_str(json)
}

pub struct HeadlessPlatform {
    sync: Arc<FrameSync>,
    vblank_thread: Option<thread::JoinHandle<()>>,
    assets_dir: Option<PathBuf>,
    assets: HashMap<String, Vec<u8>>,
    script: VecDeque<ScriptStep>,
    /// quit once the script ran out
    quit_after_script: bool,
    pending_keys: VecDeque<u8>,
    buttons: Buttons,
    /// buttons delivered by the script are released after one frame
    script_buttons: bool,
    screen: (u16, u16),
    text: (u16, u16),
    window: (u8, u8),
    frame_limit: Option<u64>,
    pub frames: u64,
    pub draw_calls: usize,
    pub glyph_writes: usize,
    pub live_map_draws: usize,
    pub sounds: Vec<Sound>,
    pub modules: Vec<Module>,
    pub images: Vec<Image>,
    pub cursor: Option<(u8, u8)>,
    pub cursor_shape: Option<CursorShape>,
    pub fade_level: u8,
}

impl HeadlessPlatform {
    /// A platform with the 17x10 tile window of a 480x272 screen, or the 11x7 window of a 320x200
    /// screen when `classic` is set.
    pub fn new(classic: bool) -> Self {
        let (screen, text, window) = if classic {
            ((320, 200), (40, 25), (11, 7))
        } else {
            ((480, 272), (60, 34), (17, 10))
        };
        HeadlessPlatform {
            sync: Arc::new(FrameSync::new()),
            vblank_thread: None,
            assets_dir: None,
            assets: HashMap::new(),
            script: VecDeque::new(),
            quit_after_script: false,
            pending_keys: VecDeque::new(),
            buttons: Buttons::empty(),
            script_buttons: false,
            screen,
            text,
            window,
            frame_limit: None,
            frames: 0,
            draw_calls: 0,
            glyph_writes: 0,
            live_map_draws: 0,
            sounds: Vec::new(),
            modules: Vec::new(),
            images: Vec::new(),
            cursor: None,
            cursor_shape: None,
            fade_level: 15,
        }
    }

    /// Build the platform from the process wide game environment.
    pub fn from_env() -> color_eyre::Result<Self> {
        let env = crate::game::env().clone();
        let mut platform = HeadlessPlatform::new(env.classic_window);
        platform.assets_dir = env.assets_dir;
        platform.frame_limit = env.frame_limit;
        if let Some(path) = env.script {
            let json = fs::read_to_string(&path)?;
            let steps = parse_script(&json)?;
            info!("replaying {} input steps from {}", steps.len(), path.display());
            platform.set_script(steps);
        }
        if env.realtime {
            platform.start_realtime();
        }
        Ok(platform)
    }

    pub fn set_assets_dir(&mut self, dir: &Path) {
        self.assets_dir = Some(dir.to_path_buf());
    }

    pub fn insert_asset<S: Into<String>>(&mut self, name: S, bytes: Vec<u8>) {
        self.assets.insert(name.into(), bytes);
    }

    pub fn set_script(&mut self, steps: Vec<ScriptStep>) {
        self.script = steps.into();
        self.quit_after_script = true;
    }

    pub fn set_frame_limit(&mut self, limit: u64) {
        self.frame_limit = Some(limit);
    }

    pub fn push_key(&mut self, key: u8) {
        self.pending_keys.push_back(key);
    }

    pub fn set_buttons(&mut self, buttons: Buttons) {
        self.buttons = buttons;
        self.script_buttons = false;
    }

    pub fn reset_counters(&mut self) {
        self.draw_calls = 0;
        self.glyph_writes = 0;
        self.live_map_draws = 0;
        self.sounds.clear();
    }

    /// Let a timer thread post vblanks at the frame rate instead of simulating them.
    pub fn start_realtime(&mut self) {
        if self.vblank_thread.is_none() {
            let fps = self.frames_per_second();
            self.vblank_thread = Some(spawn_vblank_thread(Arc::clone(&self.sync), fps));
        }
    }

    /// Simulate one vertical blank and feed the input script.
    fn simulate_vblank(&mut self) {
        self.sync.vblank();
        self.frame_passed();
    }

    fn frame_passed(&mut self) {
        self.frames += 1;
        if self.script_buttons {
            self.buttons = Buttons::empty();
            self.script_buttons = false;
        }
        if let Some(step) = self.script.front_mut() {
            if step.idle > 0 {
                step.idle -= 1;
            } else if let Some(step) = self.script.pop_front() {
                if let Some(key) = step.key {
                    self.pending_keys.push_back(key);
                }
                if step.buttons != 0 {
                    self.buttons = Buttons::from_bits_truncate(step.buttons);
                    self.script_buttons = true;
                }
            }
        } else if self.quit_after_script && self.pending_keys.is_empty() {
            info!("input script finished after {} frames", self.frames);
            self.sync.request_quit();
        }
        if let Some(limit) = self.frame_limit {
            if self.frames >= limit && !self.sync.is_quit() {
                warn!("frame limit of {} has been reached, closing game", limit);
                self.sync.request_quit();
            }
        }
    }

    fn read_asset(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        if let Some(bytes) = self.assets.get(name) {
            return Ok(bytes.clone());
        }
        let missing = || AssetError::Missing { name: name.into() };
        let dir = self.assets_dir.as_ref().ok_or_else(missing)?;
        fs::read(dir.join(name)).map_err(|e| {
            warn!("cannot read asset '{}': {}", name, e);
            missing()
        })
    }
}

impl Drop for HeadlessPlatform {
    fn drop(&mut self) {
        if let Some(handle) = self.vblank_thread.take() {
            self.sync.request_quit();
            if handle.join().is_err() {
                error!("vblank thread panicked");
            }
        }
    }
}

impl Platform for HeadlessPlatform {
    fn sync(&self) -> &FrameSync {
        &self.sync
    }

    fn present_frame(&mut self, wait_for_vblank: bool) {
        self.sync.request_swap();
        if !wait_for_vblank {
            return;
        }
        if self.vblank_thread.is_some() {
            while self.sync.swap_pending() && !self.sync.is_quit() {
                thread::sleep(Duration::from_millis(1));
            }
            self.frame_passed();
        } else {
            self.simulate_vblank();
        }
    }

    fn wait_vblank(&mut self) {
        if self.vblank_thread.is_some() {
            while !self.sync.has_ticks() && !self.sync.is_quit() {
                thread::sleep(Duration::from_millis(1));
            }
            self.frame_passed();
        } else {
            self.simulate_vblank();
        }
    }

    fn screen_size(&self) -> (u16, u16) {
        self.screen
    }

    fn text_size(&self) -> (u16, u16) {
        self.text
    }

    fn map_window_size(&self) -> (u8, u8) {
        self.window
    }

    fn render_tile(&mut self, _tile: u8, _x: u16, _y: u16, _variant: u8, _transparent: bool) {
        self.draw_calls += 1;
    }

    fn render_tiles(&mut self, _bg: u8, _fg: u8, _x: u16, _y: u16, _bg_variant: u8, _fg_variant: u8) {
        self.draw_calls += 1;
    }

    fn render_item(&mut self, _item: u8, _x: u16, _y: u16) {}

    fn render_key(&mut self, _key: u8, _x: u16, _y: u16) {}

    fn render_health(&mut self, _health: u8, _x: u16, _y: u16) {}

    fn render_face(&mut self, _face: u8, _x: u16, _y: u16) {}

    fn clear_rect(&mut self, _x: u16, _y: u16, _width: u16, _height: u16) {}

    fn copy_rect(&mut self, _src_x: u16, _src_y: u16, _dst_x: u16, _dst_y: u16, _width: u16, _height: u16) {}

    fn render_live_map(&mut self, _map: &[u8]) {
        self.live_map_draws += 1;
    }

    fn render_live_map_tile(&mut self, _map: &[u8], _x: u8, _y: u8) {
        self.live_map_draws += 1;
    }

    fn render_live_map_units(&mut self, _map: &[u8], _units: &[Unit], _player_blink: bool, _show_robots: bool) {
        self.live_map_draws += 1;
    }

    fn write_glyph(&mut self, _address: u16, _glyph: u8, _color: u8, _row_offset: u8) {
        self.glyph_writes += 1;
    }

    fn show_cursor(&mut self, x: u8, y: u8) {
        self.cursor = Some((x, y));
    }

    fn hide_cursor(&mut self) {
        self.cursor = None;
    }

    fn set_cursor_shape(&mut self, shape: CursorShape) {
        self.cursor_shape = Some(shape);
    }

    fn display_image(&mut self, image: Image) {
        self.images.push(image);
    }

    fn fade_screen(&mut self, intensity: u8, _immediate: bool) {
        self.fade_level = intensity;
    }

    fn start_fade(&mut self, _color: u16, intensity: u8) {
        self.fade_level = intensity;
    }

    fn fade(&mut self, intensity: u8) {
        self.fade_level = intensity;
    }

    fn stop_fade(&mut self) {
        self.fade_level = 15;
    }

    fn read_key(&mut self) -> Option<u8> {
        self.pending_keys.pop_front()
    }

    fn read_gamepad(&mut self, _pad_layout: bool) -> Buttons {
        self.buttons
    }

    fn is_input_held(&self, _pad_layout: bool) -> bool {
        !self.pending_keys.is_empty() || !self.buttons.is_empty()
    }

    fn key_repeat(&mut self) {}

    fn clear_key_buffer(&mut self) {
        self.pending_keys.clear();
    }

    fn standard_controls(&self) -> KeyConfig {
        use KeyAction::*;
        let mut config = [0; KEY_ACTIONS];
        let bindings = [
            (MoveUp, b'w'),
            (MoveDown, b's'),
            (MoveLeft, b'a'),
            (MoveRight, b'd'),
            (FireUp, b'i'),
            (FireDown, b'k'),
            (FireLeft, b'j'),
            (FireRight, b'l'),
            (CycleWeapons, b'f'),
            (CycleItems, b'c'),
            (Use, b'u'),
            (Search, b'z'),
            (Move, b'm'),
            (LiveMap, keys::TAB),
            (LiveMapRobots, b'r'),
            (Pause, keys::ESCAPE),
            (Music, b'M'),
            (Cheat, b'C'),
            (CursorUp, keys::CURSOR_UP),
            (CursorDown, keys::CURSOR_DOWN),
            (CursorLeft, keys::CURSOR_LEFT),
            (CursorRight, keys::CURSOR_RIGHT),
            (Space, b' '),
            (Return, keys::RETURN),
            (Yes, b'y'),
            (No, b'n'),
        ];
        for (action, key) in bindings {
            config[action as usize] = key;
        }
        KeyConfig(config)
    }

    fn load_module(&mut self, _module: Module) {}

    fn play_module(&mut self, module: Module) {
        self.modules.push(module);
    }

    fn pause_module(&mut self) {}

    fn stop_module(&mut self) {}

    fn play_sample(&mut self, sound: Sound) {
        self.sounds.push(sound);
    }

    fn stop_samples(&mut self) {}

    fn load(&mut self, name: &str, dest: &mut [u8]) -> Result<usize, AssetError> {
        let bytes = self.read_asset(name)?;
        let read = bytes.len().min(dest.len());
        dest[..read].copy_from_slice(&bytes[..read]);
        debug!("loaded asset '{}', {} bytes", name, read);
        Ok(read)
    }

    fn load_tileset(&mut self) -> Result<Vec<u8>, AssetError> {
        let bytes = self.read_asset("tileset")?;
        if bytes.len() < TILESET_SIZE {
            return Err(AssetError::Truncated {
                name: "tileset".into(),
                expected: TILESET_SIZE,
                actual: bytes.len(),
            });
        }
        Ok(bytes)
    }
}
