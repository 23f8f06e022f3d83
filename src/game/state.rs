use crate::entity::ai;
use crate::game::consts::{ANIMATION_TICKS, CINEMA_LENGTH, FLASH_TICKS, UNIT_SLOTS};
use crate::game::msg::{self, MessageLog, MsgClass};
use crate::game::world::{Tileset, World};
use crate::game::Difficulty;
use crate::platform::{Platform, Sound};
use crate::ui::info::TextLayer;
use crate::ui::input::{ControlMode, KeyConfig};
use crate::ui::render::{self, MapView};
use crate::util::rng::{GameRng, Lfsr};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Weapon {
    #[default]
    None = 0,
    Pistol = 1,
    Plasma = 2,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Item {
    #[default]
    None = 0,
    Bomb = 1,
    Emp = 2,
    Medkit = 3,
    Magnet = 4,
}

impl Item {
    /// Next item in cycling order, wrapping to `None`.
    pub fn next(self) -> Item {
        match self {
            Item::None => Item::Bomb,
            Item::Bomb => Item::Emp,
            Item::Emp => Item::Medkit,
            Item::Medkit => Item::Magnet,
            Item::Magnet => Item::None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    pub pistol_ammo: u8,
    pub plasma_ammo: u8,
    pub bombs: u8,
    pub emps: u8,
    pub medkits: u8,
    pub magnets: u8,
    /// bit 0 spade, bit 1 heart, bit 2 star
    pub keys: u8,
    pub weapon: Weapon,
    pub item: Item,
}

impl Inventory {
    pub fn count(&self, item: Item) -> u8 {
        match item {
            Item::None => 0,
            Item::Bomb => self.bombs,
            Item::Emp => self.emps,
            Item::Medkit => self.medkits,
            Item::Magnet => self.magnets,
        }
    }

    pub fn ammo(&self, weapon: Weapon) -> u8 {
        match weapon {
            Weapon::None => 0,
            Weapon::Pistol => self.pistol_ammo,
            Weapon::Plasma => self.plasma_ammo,
        }
    }
}

/// Play time, advanced once per vblank while active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Clock {
    pub active: bool,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
    pub cycles: u8,
}

impl Clock {
    pub fn tick(&mut self, frames_per_second: u8) {
        if !self.active {
            return;
        }
        self.cycles += 1;
        if self.cycles < frames_per_second {
            return;
        }
        self.cycles = 0;
        self.seconds += 1;
        if self.seconds < 60 {
            return;
        }
        self.seconds = 0;
        self.minutes += 1;
        if self.minutes < 60 {
            return;
        }
        self.minutes = 0;
        self.hours = self.hours.wrapping_add(1);
    }

    pub fn reset(&mut self) {
        *self = Clock::default();
    }
}

/// Counters driven by the vblank tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct Timers {
    /// set by every tick, cleared once the background tasks ran
    pub background: bool,
    /// free running count down, used for waits inside commands
    pub countdown: u8,
    pub key: u8,
    pub select_timeout: u8,
    pub border: u8,
    pub border_color: u16,
    pub flashing: bool,
    animation: u8,
}

/// A tile overwritten by a big explosion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlastTile {
    pub x: u8,
    pub y: u8,
    pub tile: u8,
}

/// Everything a running game consists of, apart from the platform.
pub struct State {
    pub world: World,
    pub tileset: Tileset,
    pub inventory: Inventory,
    pub clock: Clock,
    pub timers: Timers,
    pub view: MapView,
    pub text: TextLayer,
    pub log: msg::Log,
    pub lfsr: Lfsr,
    pub big_explosion_active: bool,
    pub plasma_active: bool,
    pub magnet_active: bool,
    /// 0 off, 1..=4 shake phase
    pub screen_shake: u8,
    pub blast: Vec<BlastTile>,
    pub walk_frame: u8,
    pub key_fast: bool,
    pub dematerialize_frame: u8,
    pub map_index: usize,
    pub difficulty: Difficulty,
    pub music_on: bool,
    pub control: ControlMode,
    pub keys: KeyConfig,
}

impl State {
    pub fn new(tileset: Tileset, platform: &dyn Platform) -> Self {
        let (window_w, window_h) = platform.map_window_size();
        let (text_w, text_h) = platform.text_size();
        let env = crate::game::env().clone();
        let mut rng = GameRng::from_env();
        State {
            world: World::new(),
            tileset,
            inventory: Inventory::default(),
            clock: Clock::default(),
            timers: Timers {
                border_color: crate::game::consts::FLASH_DAMAGE,
                ..Timers::default()
            },
            view: MapView::new(window_w, window_h),
            text: TextLayer::new(text_w, text_h),
            log: msg::Log::new(),
            lfsr: Lfsr::from_rng(&mut rng),
            big_explosion_active: false,
            plasma_active: false,
            magnet_active: false,
            screen_shake: 0,
            blast: Vec::with_capacity(16),
            walk_frame: 0,
            key_fast: false,
            dematerialize_frame: 0,
            map_index: env.map,
            difficulty: env.difficulty,
            music_on: env.music,
            control: env.controls,
            keys: platform.standard_controls(),
        }
    }

    /// Inventory, flags and clock of a fresh game.
    pub fn reset_for_new_game(&mut self) {
        self.inventory = Inventory::default();
        self.clock.reset();
        self.magnet_active = false;
        self.plasma_active = false;
        self.big_explosion_active = false;
        self.screen_shake = 0;
        self.blast.clear();
        self.view.live_map = false;
        self.dematerialize_frame = 0;
    }

    /// Work done once per vertical blank.
    pub fn irq_tick(&mut self, platform: &mut dyn Platform) {
        self.clock.tick(platform.frames_per_second());
        self.timers.animation += 1;
        if self.timers.animation >= ANIMATION_TICKS {
            self.timers.animation = 0;
            self.view.anim_state = self.view.anim_state.wrapping_add(1);
            self.view.cinema_state += 1;
            if self.view.cinema_state >= CINEMA_LENGTH {
                self.view.cinema_state = 0;
            }
            self.view.redraw = true;
        }
        self.timers.background = true;
        self.timers.countdown = self.timers.countdown.saturating_sub(1);
        self.timers.key = self.timers.key.saturating_sub(1);
        if self.timers.border != 0 {
            self.timers.border -= 1;
            platform.fade(15 - self.timers.border);
        }
    }

    /// Run the per tick work for every vblank posted since the last call.
    pub fn pump_ticks(&mut self, platform: &mut dyn Platform) {
        for _ in 0..platform.sync().take_ticks() {
            self.irq_tick(platform);
        }
    }

    /// Block until at least one vblank tick is available and process it.
    pub fn sync_frame(&mut self, platform: &mut dyn Platform) {
        if !self.timers.background && !platform.sync().has_ticks() {
            platform.wait_vblank();
        }
        self.pump_ticks(platform);
    }

    /// One step of the screen shake and the border flash, once per background tick.
    pub fn screen_shake(&mut self, platform: &mut dyn Platform) {
        if !self.timers.background {
            return;
        }
        self.timers.select_timeout = self.timers.select_timeout.saturating_sub(1);
        if self.timers.border != 0 {
            if !self.timers.flashing {
                platform.start_fade(self.timers.border_color, 15 - self.timers.border);
                self.timers.flashing = true;
            }
        } else if self.timers.flashing {
            self.timers.flashing = false;
            platform.stop_fade();
        }
        if self.screen_shake == 0 || self.view.live_map {
            return;
        }
        match self.screen_shake {
            1 => {
                let (screen_w, screen_h) = platform.screen_size();
                platform.copy_rect(8, 0, 0, 0, screen_w - 56, screen_h - 32);
                platform.present_frame(true);
                self.view.invalidate();
            }
            3 => self.view.redraw = true,
            _ => {}
        }
        self.screen_shake = if self.screen_shake >= 4 { 1 } else { self.screen_shake + 1 };
    }

    /// Present the map, then run every unit whose timer expired. Does nothing between ticks.
    pub fn background_tasks(&mut self, platform: &mut dyn Platform) {
        if !self.timers.background {
            return;
        }
        if self.view.live_map {
            render::draw_live_map(self, platform);
        } else if self.view.redraw {
            render::draw_map_window(self, platform);
        }
        platform.present_frame(false);

        self.timers.background = false;
        for slot in 1..UNIT_SLOTS {
            let unit = &mut self.world.units[slot];
            if !unit.is_alive() {
                continue;
            }
            if unit.timer_a != 0 {
                unit.timer_a -= 1;
            } else {
                ai::run(self, platform, slot);
            }
        }
    }

    /// One iteration of the loops that keep the world running while waiting for the player.
    pub fn idle_frame(&mut self, platform: &mut dyn Platform) {
        self.sync_frame(platform);
        self.screen_shake(platform);
        self.background_tasks(platform);
    }

    pub fn print_info(&mut self, platform: &mut dyn Platform, text: &str) {
        self.log.add(text, MsgClass::Info);
        self.text.print_info(platform, text);
    }

    pub fn print_alert(&mut self, platform: &mut dyn Platform, text: &str, sound: Sound) {
        self.log.add(text, MsgClass::Alert);
        self.text.print_info(platform, text);
        platform.play_sample(sound);
    }

    pub fn flash_border(&mut self, color: u16) {
        self.timers.border_color = color;
        self.timers.border = FLASH_TICKS;
    }

    /// Request a redraw if the unit in `slot` is visible.
    pub fn check_window_redraw(&mut self, slot: usize) {
        let unit = &self.world.units[slot];
        if self.view.contains(unit.x, unit.y) {
            self.view.redraw = true;
        }
    }

    /// Write a tile into the map and onto the live map if it is shown.
    pub fn plot_tile(&mut self, platform: &mut dyn Platform, x: u8, y: u8, tile: u8) {
        self.world.set_tile(x, y, tile);
        self.update_live_map_tile(platform, x, y);
    }

    pub fn update_live_map_tile(&mut self, platform: &mut dyn Platform, x: u8, y: u8) {
        if self.view.live_map {
            platform.render_live_map_tile(self.world.map(), x, y);
        }
    }

    /// Center the window on the player and request a redraw.
    pub fn recenter_window(&mut self) {
        let player = self.world.player();
        self.view.center_on(player.x, player.y);
    }
}
