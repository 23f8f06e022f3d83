use crate::entity::movement::Direction;
use crate::entity::player;
use crate::game::consts::{PLAYER_ALIVE, UNIT_SLOTS};
use crate::game::env::GameEnv;
use crate::game::state::Clock;
use crate::game::world::Unit;
use crate::game::{self, msg, Game, RunState};
use crate::platform::headless::{keys, parse_script, HeadlessPlatform, ScriptStep};
use crate::platform::{FrameSync, Platform, Sound};
use crate::test::{create_level_bytes, create_minimal_world, create_tileset_bytes};
use crate::ui::input::{self, After, Buttons, ControlMode, InGameAction, KeyAction};
use crate::ui::menu::{self, IntroMenu, MenuOption};
use crate::ui::modal;

fn platform_with_assets() -> HeadlessPlatform {
    let mut platform = HeadlessPlatform::new(false);
    platform.insert_asset("tileset", create_tileset_bytes());
    platform.insert_asset(
        "level-a",
        create_level_bytes(&[
            (0, Unit::new(1, 20, 20).with_health(12)),
            (1, Unit::new(2, 40, 30).with_health(5)),
        ]),
    );
    platform
}

#[test]
fn test_clock_counts_play_time() {
    let mut clock = Clock::default();
    clock.tick(60);
    assert_eq!(clock.cycles, 0);

    clock.active = true;
    for _ in 0..60 {
        clock.tick(60);
    }
    assert_eq!((clock.hours, clock.minutes, clock.seconds), (0, 0, 1));
    for _ in 0..(60 * 60 * 60 - 60) {
        clock.tick(60);
    }
    assert_eq!((clock.hours, clock.minutes, clock.seconds), (1, 0, 0));
}

#[test]
fn test_vblank_performs_requested_swap() {
    let sync = FrameSync::new();
    assert!(!sync.vblank());
    sync.request_swap();
    assert!(sync.swap_pending());
    assert!(sync.vblank());
    assert!(!sync.swap_pending());
    assert!(sync.has_ticks());
    assert_eq!(sync.take_ticks(), 2);
    assert!(!sync.has_ticks());
    assert!(!sync.is_quit());
    sync.request_quit();
    assert!(sync.is_quit());
}

#[test]
fn test_irq_tick_advances_timers() {
    let (mut state, mut platform) = create_minimal_world(20, 20);
    state.timers.key = 2;
    state.timers.countdown = 1;
    state.pump_ticks(&mut platform);
    assert_eq!(state.timers.key, 2);

    platform.wait_vblank();
    platform.wait_vblank();
    state.pump_ticks(&mut platform);
    assert_eq!(state.timers.key, 0);
    assert_eq!(state.timers.countdown, 0);
    assert!(state.timers.background);
}

#[test]
fn test_walk_key_repeat_timings() {
    let (mut state, mut platform) = create_minimal_world(20, 20);
    let walk = |direction| input::Command {
        action: InGameAction::Walk(direction),
        after: After::Nothing,
    };
    player::perform(&mut state, &mut platform, walk(Direction::Right));
    assert_eq!(state.world.player().x, 21);
    assert_eq!(state.timers.key, 13);
    assert!(state.key_fast);

    player::perform(&mut state, &mut platform, walk(Direction::Right));
    assert_eq!(state.timers.key, 6);

    // releasing the key resets the repeat rate
    state.timers.key = 0;
    player::key_repeat(&mut state, &mut platform, false);
    assert!(!state.key_fast);
    let pad_walk = input::Command {
        action: InGameAction::PadWalk(Direction::Down),
        after: After::Nothing,
    };
    player::perform(&mut state, &mut platform, pad_walk);
    assert_eq!(state.timers.key, 15);
}

#[test]
fn test_standard_key_commands() {
    let platform = HeadlessPlatform::new(false);
    let config = platform.standard_controls();
    let command = |key| input::key_command(&config, key).map(|c| c.action);
    assert_eq!(command(b'w'), Some(InGameAction::Walk(Direction::Up)));
    assert_eq!(command(keys::CURSOR_LEFT), Some(InGameAction::Walk(Direction::Left)));
    assert_eq!(command(b'l'), Some(InGameAction::Fire(Direction::Right)));
    assert_eq!(command(b'z'), Some(InGameAction::Search));
    assert_eq!(command(keys::ESCAPE), Some(InGameAction::Pause));
    assert_eq!(command(b'q'), None);
    assert_eq!(config.key(KeyAction::Yes), b'y');
}

#[test]
fn test_pad_commands() {
    let walk = input::pad_commands(ControlMode::Pad, Buttons::LEFT);
    assert_eq!(walk.len(), 1);
    assert_eq!(walk[0].action, InGameAction::PadWalk(Direction::Left));

    let fire = input::pad_commands(ControlMode::Pad, Buttons::YELLOW);
    assert_eq!(fire[0].action, InGameAction::Fire(Direction::Up));
    assert_eq!(fire[0].after, After::KeyTimer(20));

    let live_map = input::pad_commands(ControlMode::Pad, Buttons::PLAY | Buttons::LEFT);
    assert_eq!(live_map.len(), 1);
    assert_eq!(live_map[0].action, InGameAction::ToggleLiveMap);

    let keyboard_fire = input::pad_commands(ControlMode::Standard, Buttons::RED | Buttons::DOWN);
    assert_eq!(keyboard_fire[0].action, InGameAction::Fire(Direction::Down));

    assert!(input::pad_commands(ControlMode::Pad, Buttons::empty()).is_empty());
}

#[test]
fn test_intro_menu_navigation() {
    let mut menu = IntroMenu::new();
    assert_eq!(menu.option(), MenuOption::StartGame);
    assert!(!menu.move_by(false));
    assert!(menu.move_by(true));
    assert!(menu.move_by(true));
    assert_eq!(menu.option(), MenuOption::Difficulty);
    assert!(!menu.move_by(true));
    assert!(menu.move_by(false));
    assert_eq!(menu.option(), MenuOption::SelectMap);
}

#[test]
fn test_level_names() {
    assert_eq!(menu::level_name(0), "level-a");
    assert_eq!(menu::level_name(13), "level-n");
    assert_eq!(menu::level_name(14), "level-a");
}

#[test]
fn test_difficulty_cycle() {
    use crate::game::Difficulty;
    assert_eq!(Difficulty::default(), Difficulty::Normal);
    assert_eq!(Difficulty::Hard.next(), Difficulty::Easy);
    assert_eq!(Difficulty::Easy.word(), "easy  ");
}

#[test]
fn test_script_parsing() {
    let steps = parse_script(r#"[{"idle": 3, "key": 119}, {"buttons": 128}]"#).unwrap();
    assert_eq!(
        steps,
        vec![
            ScriptStep {
                idle: 3,
                key: Some(b'w'),
                buttons: 0
            },
            ScriptStep {
                idle: 0,
                key: None,
                buttons: 0x80
            },
        ]
    );
}

#[test]
fn test_script_feeds_keys_then_quits() {
    let mut platform = HeadlessPlatform::new(false);
    platform.set_script(vec![ScriptStep {
        idle: 1,
        key: Some(b'x'),
        buttons: 0,
    }]);
    platform.present_frame(true);
    assert_eq!(platform.read_key(), None);
    platform.present_frame(true);
    assert_eq!(platform.read_key(), Some(b'x'));
    assert!(!platform.is_quit());
    platform.present_frame(true);
    assert!(platform.is_quit());
}

#[test]
fn test_missing_asset() {
    let mut platform = HeadlessPlatform::new(false);
    let mut dest = [0; 16];
    assert!(platform.load("level-z", &mut dest).is_err());
    platform.insert_asset("short", vec![1, 2, 3]);
    assert_eq!(platform.load("short", &mut dest).unwrap(), 3);
    assert_eq!(&dest[..3], &[1, 2, 3]);
}

#[test]
fn test_initial_timers_stagger_units() {
    let (mut state, _platform) = create_minimal_world(20, 20);
    game::set_initial_timers(&mut state);
    assert!(state.clock.active);
    assert_eq!(state.world.units[1].timer_a, 1);
    assert_eq!(state.world.units[47].timer_a, 47);
    assert_eq!(state.world.units[UNIT_SLOTS - 1].timer_a, 0);
}

#[test]
fn test_new_game_starts_level() {
    let mut platform = platform_with_assets();
    let mut game = Game::new(&mut platform).unwrap();
    game.skip_intro();
    assert!(game.step(&mut platform));
    assert_eq!(game.run_state(), Some(RunState::InGame));
    let state = game.state();
    assert_eq!(state.world.player().kind, PLAYER_ALIVE);
    assert_eq!((state.world.player().x, state.world.player().y), (20, 20));
    assert_eq!(state.world.units[1].timer_a, 1);
    assert!(state.log.contains(msg::INTRO));
    assert!(!platform.modules.is_empty());
}

#[test]
fn test_missing_level_returns_to_menu() {
    let mut platform = HeadlessPlatform::new(false);
    platform.insert_asset("tileset", create_tileset_bytes());
    let mut game = Game::new(&mut platform).unwrap();
    game.skip_intro();
    assert!(game.step(&mut platform));
    assert_eq!(game.run_state(), Some(RunState::Intro));
}

#[test]
fn test_game_runs_until_frame_limit() {
    let mut platform = platform_with_assets();
    platform.set_frame_limit(240);
    let mut game = Game::new(&mut platform).unwrap();
    game.skip_intro();
    game.run(&mut platform);
    assert!(platform.is_quit());
    assert!(platform.frames >= 240);
    assert!(game.state().clock.seconds >= 1);
    assert_eq!(game.run_state(), None);
}

#[test]
fn test_pause_and_leave() {
    let (mut state, mut platform) = create_minimal_world(20, 20);
    platform.set_script(vec![ScriptStep {
        idle: 10,
        key: Some(b'y'),
        buttons: 0,
    }]);
    assert!(modal::pause_game(&mut state, &mut platform));
    assert!(!state.world.player().is_alive());
    assert!(platform.sounds.contains(&Sound::MenuBeep));
}

#[test]
fn test_pause_and_resume() {
    let (mut state, mut platform) = create_minimal_world(20, 20);
    state.clock.active = true;
    platform.set_script(vec![ScriptStep {
        idle: 10,
        key: None,
        buttons: Buttons::BLUE.bits(),
    }]);
    assert!(!modal::pause_game(&mut state, &mut platform));
    assert!(state.world.player().is_alive());
    assert!(state.clock.active);
}

#[test]
fn test_env_default_matches_new() {
    let default = GameEnv::default();
    let fresh = GameEnv::new();
    assert!(default.music);
    assert_eq!(default.controls, ControlMode::Pad);
    assert_eq!(default.controls, fresh.controls);
    assert_eq!(default.difficulty, fresh.difficulty);
    assert_eq!(default.map, fresh.map);
    assert_eq!(default.seed, fresh.seed);
}
