//! The top level representation of the game. Here the game state is constructed and the run state
//! machine (title menu, game, game over, summary) is executed.

pub mod consts;
pub mod env;
pub mod msg;
pub mod state;
pub mod world;

pub use env::env;
pub use state::State;

use crate::entity::player;
use crate::game::consts::{LEVEL_SIZE, PLAYER_ALIVE};
use crate::game::world::{AssetError, Tileset};
use crate::platform::Platform;
use crate::ui::input::{self, ControlMode};
use crate::ui::{hud, menu, modal, render};
use crate::util;

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy = 0,
    #[default]
    Normal = 1,
    Hard = 2,
}

impl Difficulty {
    pub fn next(self) -> Difficulty {
        match self {
            Difficulty::Easy => Difficulty::Normal,
            Difficulty::Normal => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    /// Six character label shown on the summary screen.
    pub fn word(self) -> &'static str {
        msg::DIFFICULTY_WORDS[self as usize]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Intro,
    NewGame,
    InGame,
    GameOver,
    EndGame,
    Quit,
}

impl Display for RunState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intro => write!(f, "Intro"),
            Self::NewGame => write!(f, "NewGame"),
            Self::InGame => write!(f, "InGame"),
            Self::GameOver => write!(f, "GameOver"),
            Self::EndGame => write!(f, "EndGame"),
            Self::Quit => write!(f, "Quit"),
        }
    }
}

pub struct Game {
    state: State,
    run_state: Option<RunState>,
    /// custom keys are only asked for once per session
    keys_defined: bool,
    /// Keep track of the time to warn if the game runs too slow.
    slowest_frame: u128,
}

impl Game {
    /// Load the tileset and prepare the title menu.
    pub fn new(platform: &mut dyn Platform) -> Result<Self, AssetError> {
        let tileset_bytes = platform.load_tileset()?;
        let tileset = Tileset::from_bytes("tileset", &tileset_bytes)?;
        let state = State::new(tileset, platform);
        if env().is_debug_mode {
            match serde_json::to_string(&*env()) {
                Ok(json) => debug!("game environment: {}", json),
                Err(e) => warn!("cannot serialize game environment: {}", e),
            }
        }
        Ok(Game {
            state,
            run_state: Some(RunState::Intro),
            keys_defined: false,
            slowest_frame: 0,
        })
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.state
    }

    pub fn run_state(&self) -> Option<RunState> {
        self.run_state
    }

    /// Start directly with a new game instead of the title menu.
    pub fn skip_intro(&mut self) {
        self.run_state = Some(RunState::NewGame);
    }

    /// Run the state machine until the game quits.
    pub fn run(&mut self, platform: &mut dyn Platform) {
        while self.step(platform) {}
        info!("slowest frame took {}", util::timer::time_from(self.slowest_frame));
    }

    /// Run the current run state to completion. Returns `false` once there is nothing left to run.
    pub fn step(&mut self, platform: &mut dyn Platform) -> bool {
        let Some(run_state) = self.run_state.take() else {
            return false;
        };
        debug!("enter RunState::{}", run_state);
        let next = if platform.is_quit() && run_state != RunState::Quit {
            RunState::Quit
        } else {
            match run_state {
                RunState::Intro => {
                    if menu::intro_screen(&mut self.state, platform) {
                        RunState::NewGame
                    } else {
                        RunState::Quit
                    }
                }
                RunState::NewGame => {
                    self.set_controls(platform);
                    match self.init_game(platform) {
                        Ok(()) => RunState::InGame,
                        Err(e) => {
                            error!("cannot start game: {}", e);
                            RunState::Intro
                        }
                    }
                }
                RunState::InGame => self.main_loop(platform),
                RunState::GameOver => {
                    modal::game_over(&mut self.state, platform);
                    RunState::EndGame
                }
                RunState::EndGame => {
                    modal::end_screen(&mut self.state, platform);
                    RunState::Intro
                }
                RunState::Quit => {
                    info!("quitting");
                    platform.sync().request_quit();
                    return false;
                }
            }
        };
        self.run_state = Some(next);
        true
    }

    fn set_controls(&mut self, platform: &mut dyn Platform) {
        self.state.control = env().controls;
        if self.state.control == ControlMode::Custom {
            if !self.keys_defined {
                self.state.keys = platform.standard_controls();
                menu::define_custom_keys(&mut self.state, platform);
                self.keys_defined = true;
            }
        } else {
            self.state.keys = platform.standard_controls();
        }
    }

    /// Set up the screen, load the selected level and hand control to the player.
    pub fn init_game(&mut self, platform: &mut dyn Platform) -> Result<(), AssetError> {
        let _timer = util::Timer::new("new game");
        let state = &mut self.state;
        state.reset_for_new_game();
        platform.fade_screen(0, false);
        hud::display_game_screen(state, platform);
        hud::display_load_message(state, platform);
        platform.fade_screen(15, false);

        let name = menu::level_name(state.map_index);
        let mut level = vec![0; LEVEL_SIZE];
        let read = platform.load(&name, &mut level)?;
        state.world.load_level(&name, &level[..read.min(LEVEL_SIZE)])?;
        info!("starting '{}' on {:?}", name, state.difficulty);

        player::start_in_game_music(state, platform);
        state.world.apply_difficulty(state.difficulty);
        player::animate_player(state);
        state.recenter_window();
        state.view.invalidate();
        render::draw_map_window(state, platform);
        hud::display_player_health(state, platform);
        hud::display_keys(state, platform);
        hud::display_weapon(state, platform);
        state.world.player_mut().kind = PLAYER_ALIVE;
        set_initial_timers(state);
        state.print_info(platform, msg::INTRO);
        state.timers.key = 30;
        Ok(())
    }

    /// Play until the player died, won or left through the pause prompt.
    fn main_loop(&mut self, platform: &mut dyn Platform) -> RunState {
        platform.present_frame(false);
        while !platform.is_quit() {
            let mut frame_timer = util::Timer::with_threshold("game frame", 50_000_000);
            let state = &mut self.state;
            state.idle_frame(platform);
            if state.world.player().kind != PLAYER_ALIVE {
                return RunState::GameOver;
            }
            let pad_layout = state.control.is_pad();
            let held = platform.is_input_held(pad_layout);
            player::key_repeat(state, platform, held);

            let key = platform.read_key();
            let buttons = platform.read_gamepad(pad_layout);
            let mut commands = Vec::new();
            if let Some(key) = key {
                state.timers.key = 5;
                commands.extend(input::key_command(&state.keys, key));
            }
            commands.extend(input::pad_commands(state.control, buttons));
            for command in commands {
                trace!("command {:?}", command);
                if player::perform(state, platform, command) {
                    return RunState::EndGame;
                }
            }
            self.slowest_frame = self.slowest_frame.max(frame_timer.stop());
        }
        RunState::Quit
    }
}

/// Start the clock and stagger the first activation of every unit by its slot number.
pub fn set_initial_timers(state: &mut State) {
    state.clock.active = true;
    for (slot, unit) in state.world.units.iter_mut().enumerate().take(48).skip(1) {
        unit.timer_a = slot as u8;
        unit.timer_b = 0;
    }
}
