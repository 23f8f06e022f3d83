//! Translation of raw key codes and gamepad bits into in-game commands.

use crate::entity::movement::Direction;

use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct Buttons: u16 {
        const LEFT    = 0x0001;
        const RIGHT   = 0x0002;
        const UP      = 0x0004;
        const DOWN    = 0x0008;
        const GREEN   = 0x0010;
        const BLUE    = 0x0020;
        const YELLOW  = 0x0040;
        const RED     = 0x0080;
        const PLAY    = 0x0100;
        const REVERSE = 0x0200;
        const FORWARD = 0x0400;
        const EXTRA   = 0x0800;
    }
}

/// Slots of the key configuration table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    FireUp,
    FireDown,
    FireLeft,
    FireRight,
    CycleWeapons,
    CycleItems,
    Use,
    Search,
    Move,
    LiveMap,
    LiveMapRobots,
    Pause,
    Music,
    Cheat,
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    Space,
    Return,
    Yes,
    No,
}

pub const KEY_ACTIONS: usize = 26;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyConfig(pub [u8; KEY_ACTIONS]);

impl KeyConfig {
    pub fn key(&self, action: KeyAction) -> u8 {
        self.0[action as usize]
    }

    pub fn is(&self, key: u8, action: KeyAction) -> bool {
        self.key(action) == key
    }

    /// Direction selected by a cursor or move key.
    pub fn direction(&self, key: u8) -> Option<Direction> {
        use KeyAction::*;
        if self.is(key, CursorRight) || self.is(key, MoveRight) {
            Some(Direction::Right)
        } else if self.is(key, CursorLeft) || self.is(key, MoveLeft) {
            Some(Direction::Left)
        } else if self.is(key, CursorDown) || self.is(key, MoveDown) {
            Some(Direction::Down)
        } else if self.is(key, CursorUp) || self.is(key, MoveUp) {
            Some(Direction::Up)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlMode {
    Standard,
    Custom,
    #[default]
    Pad,
}

impl ControlMode {
    pub fn is_pad(self) -> bool {
        self == ControlMode::Pad
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InGameAction {
    Walk(Direction),
    PadWalk(Direction),
    Fire(Direction),
    CycleWeapon,
    CycleItem,
    UseItem,
    Search,
    MoveObject,
    ToggleLiveMap,
    ToggleLiveMapRobots,
    Pause,
    ToggleMusic,
    Cheat,
}

/// What happens to the key timer once a command ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum After {
    Nothing,
    KeyTimer(u8),
    ClearBuffer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Command {
    pub action: InGameAction,
    pub after: After,
}

impl Command {
    const fn new(action: InGameAction, after: After) -> Self {
        Command { action, after }
    }
}

/// Map a key press to at most one command. Earlier bindings win when two actions share a key.
pub fn key_command(config: &KeyConfig, key: u8) -> Option<Command> {
    use InGameAction::*;
    use KeyAction as K;
    if let Some(direction) = config.direction(key) {
        return Some(Command::new(Walk(direction), After::Nothing));
    }
    let bindings = [
        (K::CycleWeapons, CycleWeapon, After::ClearBuffer),
        (K::CycleItems, CycleItem, After::ClearBuffer),
        (K::Move, MoveObject, After::ClearBuffer),
        (K::Search, Search, After::ClearBuffer),
        (K::Use, UseItem, After::ClearBuffer),
        (K::FireUp, Fire(Direction::Up), After::KeyTimer(20)),
        (K::FireLeft, Fire(Direction::Left), After::KeyTimer(20)),
        (K::FireDown, Fire(Direction::Down), After::KeyTimer(20)),
        (K::FireRight, Fire(Direction::Right), After::KeyTimer(20)),
        (K::Pause, Pause, After::Nothing),
        (K::Cheat, Cheat, After::ClearBuffer),
        (K::Music, ToggleMusic, After::ClearBuffer),
        (K::LiveMap, ToggleLiveMap, After::ClearBuffer),
        (K::LiveMapRobots, ToggleLiveMapRobots, After::ClearBuffer),
    ];
    bindings
        .iter()
        .find(|(binding, _, _)| config.is(key, *binding))
        .map(|&(_, action, after)| Command::new(action, after))
}

fn pad_direction(buttons: Buttons) -> Option<Direction> {
    if buttons.contains(Buttons::LEFT) {
        Some(Direction::Left)
    } else if buttons.contains(Buttons::RIGHT) {
        Some(Direction::Right)
    } else if buttons.contains(Buttons::UP) {
        Some(Direction::Up)
    } else if buttons.contains(Buttons::DOWN) {
        Some(Direction::Down)
    } else {
        None
    }
}

/// Map the gamepad state to the commands it issues this tick, in execution order.
pub fn pad_commands(mode: ControlMode, buttons: Buttons) -> Vec<Command> {
    use InGameAction::*;
    let mut commands = Vec::new();
    if buttons.is_empty() {
        return commands;
    }

    // directional buttons repeat while held
    let modifier = if mode.is_pad() { Buttons::PLAY } else { Buttons::BLUE };
    if !buttons.contains(modifier) {
        if let Some(direction) = pad_direction(buttons) {
            if !mode.is_pad() && buttons.contains(Buttons::RED) {
                commands.push(Command::new(Fire(direction), After::KeyTimer(20)));
            } else {
                commands.push(Command::new(PadWalk(direction), After::Nothing));
            }
        }
    }

    let mut push_if = |held: bool, action: InGameAction, after: After| {
        if held {
            commands.push(Command::new(action, after));
        }
    };
    if mode.is_pad() {
        if buttons.contains(Buttons::PLAY) {
            push_if(buttons.contains(Buttons::REVERSE), CycleItem, After::KeyTimer(15));
            push_if(buttons.contains(Buttons::FORWARD), CycleWeapon, After::KeyTimer(15));
            push_if(buttons.contains(Buttons::LEFT), ToggleLiveMap, After::ClearBuffer);
            push_if(buttons.contains(Buttons::DOWN), ToggleLiveMapRobots, After::ClearBuffer);
            push_if(buttons.contains(Buttons::BLUE), Pause, After::Nothing);
            push_if(buttons.contains(Buttons::RED), ToggleMusic, After::ClearBuffer);
        } else {
            push_if(buttons.contains(Buttons::GREEN), Fire(Direction::Left), After::KeyTimer(20));
            push_if(buttons.contains(Buttons::BLUE), Fire(Direction::Right), After::KeyTimer(20));
            push_if(buttons.contains(Buttons::YELLOW), Fire(Direction::Up), After::KeyTimer(20));
            push_if(buttons.contains(Buttons::RED), Fire(Direction::Down), After::KeyTimer(20));
            push_if(buttons.contains(Buttons::REVERSE), Search, After::KeyTimer(15));
            push_if(buttons.contains(Buttons::FORWARD), MoveObject, After::KeyTimer(15));
            push_if(buttons == Buttons::EXTRA, UseItem, After::KeyTimer(15));
        }
    } else if buttons.contains(Buttons::BLUE) {
        push_if(buttons.contains(Buttons::LEFT), CycleItem, After::KeyTimer(15));
        push_if(buttons.contains(Buttons::RIGHT), CycleWeapon, After::KeyTimer(15));
        push_if(buttons.contains(Buttons::UP), MoveObject, After::KeyTimer(15));
        push_if(buttons.contains(Buttons::DOWN), Search, After::KeyTimer(15));
        push_if(buttons == Buttons::BLUE, UseItem, After::KeyTimer(15));
    }
    commands
}
