use crate::game::Difficulty;
use crate::ui::input::ControlMode;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

lazy_static! {
    static ref GAME_ENV: Mutex<GameEnv> = Mutex::new(GameEnv::new());
}

pub fn env<'a>() -> MutexGuard<'a, GameEnv> {
    GAME_ENV.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameEnv {
    /// if true: log the environment and every state change
    pub is_debug_mode: bool,
    /// optional fixed rng seed
    pub seed: Option<u64>,
    /// optional number of vblank ticks after which the game quits
    pub frame_limit: Option<u64>,
    /// map preselected in the intro menu, zero based
    pub map: usize,
    pub difficulty: Difficulty,
    /// directory the headless platform reads level and tileset files from
    pub assets_dir: Option<PathBuf>,
    /// json input script replayed by the headless platform
    pub script: Option<PathBuf>,
    /// use the 11x7 tile window of the original machines
    pub classic_window: bool,
    pub music: bool,
    /// drive vblank from a timer thread instead of simulating it on demand
    pub realtime: bool,
    pub controls: ControlMode,
}

impl Default for GameEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEnv {
    pub fn new() -> Self {
        GameEnv {
            is_debug_mode: false,
            seed: None,
            frame_limit: None,
            map: 0,
            difficulty: Difficulty::Normal,
            assets_dir: None,
            script: None,
            classic_window: false,
            music: true,
            realtime: false,
            controls: ControlMode::Pad,
        }
    }

    pub fn set_debug_mode(&mut self, debug_mode: bool) {
        self.is_debug_mode = debug_mode;
    }

    pub fn set_seed(&mut self, seed_param: u64) {
        self.seed = Some(seed_param);
    }

    pub fn set_frame_limit(&mut self, limit: u64) {
        self.frame_limit = Some(limit);
    }

    pub fn set_map(&mut self, map: usize) {
        self.map = map;
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn set_assets_dir(&mut self, dir: PathBuf) {
        self.assets_dir = Some(dir);
    }

    pub fn set_script(&mut self, script: PathBuf) {
        self.script = Some(script);
    }

    pub fn set_classic_window(&mut self, classic: bool) {
        self.classic_window = classic;
    }

    pub fn set_music(&mut self, music: bool) {
        self.music = music;
    }

    pub fn set_realtime(&mut self, realtime: bool) {
        self.realtime = realtime;
    }

    pub fn set_controls(&mut self, controls: ControlMode) {
        self.controls = controls;
    }
}
