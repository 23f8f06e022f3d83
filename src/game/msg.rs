//! Texts shown in the info panel and the history of everything printed there.
//!
//! A `'\n'` inside a message starts a new info line.

use serde::{Deserialize, Serialize};

pub const INTRO: &str = "welcome to petrobots!\nby david murray 2021\nrust engine port";
pub const CANT_MOVE: &str = "can't move that!";
pub const BLOCKED: &str = "blocked!";
pub const SEARCHING: &str = "searching";
pub const NOT_FOUND: &str = "nothing found here.";
pub const FOUND_KEY: &str = "you found a key card!";
pub const FOUND_PISTOL: &str = "you found a pistol!";
pub const FOUND_EMP: &str = "you found an emp device!";
pub const FOUND_BOMB: &str = "you found a timebomb!";
pub const FOUND_PLASMA: &str = "you found a plasma gun!";
pub const FOUND_MEDKIT: &str = "you found a medkit!";
pub const FOUND_MAGNET: &str = "you found a magnet!";
pub const MUCH_BETTER: &str = "ahhh, much better!";
pub const EMP_USED: &str = "emp activated!\nnearby robots are rebooting.";
pub const TERMINATED: &str = "you're terminated!";
pub const TRANSPORTER_LOCKED: &str = "transporter will not activate\nuntil all robots destroyed.";
pub const ELEVATOR: &str = "[ elevator panel ]  down\n[  select level  ]  opens";
pub const ELEVATOR_LEVELS: &str = "[                ]  door";
pub const PAUSED: &str = "game paused.\nexit game (y/n)";
pub const MUSIC_ON: &str = "music on.";
pub const MUSIC_OFF: &str = "music off.";
pub const LOADING_MAP: &str = "loading map:";
pub const WIN: &str = "you win!";
pub const LOSE: &str = "you lose!";

pub const MAP_NAMES: [&str; 14] = [
    "01-research lab ",
    "02-headquarters ",
    "03-the village  ",
    "04-the islands  ",
    "05-downtown     ",
    "06-pi university",
    "07-more islands ",
    "08-robot hotel  ",
    "09-forest moon  ",
    "10-death tower  ",
    "11-river death  ",
    "12-bunker       ",
    "13-castle robot ",
    "14-rocket center",
];

pub const DIFFICULTY_WORDS: [&str; 3] = ["easy  ", "normal", "hard  "];

pub const MENU_OPTIONS: [&str; 3] = ["start game", "select map", "difficulty"];

/// Marquee shown on the cinema screen tiles.
pub const CINEMA: &str = "coming soon: space balls 2 - the search for more money, \
attack of the paperclips: clippy's revenge, it came from planet earth, \
rocky 5000, all my circuits the movie, conan the librarian, and more! comin";

/// Screen code of a character in the game font.
pub fn petscii(c: char) -> u8 {
    let code = u32::from(c).min(255) as u8;
    if code >= 96 {
        code - 96
    } else {
        code
    }
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum MsgClass {
    Info,
    Alert,
    Item,
}

#[derive(Serialize, Deserialize, Default, Debug)]
pub struct Log {
    pub is_changed: bool,
    pub messages: Vec<(String, MsgClass)>,
}

impl Log {
    pub fn new() -> Self {
        Log {
            is_changed: false,
            messages: Vec::new(),
        }
    }

    pub fn last(&self) -> Option<&str> {
        self.messages.last().map(|(msg, _)| msg.as_str())
    }

    pub fn contains(&self, msg: &str) -> bool {
        self.messages.iter().any(|(m, _)| m == msg)
    }
}

/// The message log can add text from any string collection.
pub trait MessageLog {
    fn add<T: Into<String>>(&mut self, message: T, class: MsgClass);
}

impl MessageLog for Log {
    /// Push a message into the log under two conditions:
    /// - either the log is empty
    /// - or the last message is not identical to the new message
    fn add<T: Into<String>>(&mut self, msg: T, class: MsgClass) {
        let msg = msg.into();
        if self.last() == Some(msg.as_str()) {
            return;
        }
        debug!("info: {:?}", msg);
        self.messages.push((msg, class));
        self.is_changed = true;
    }
}
