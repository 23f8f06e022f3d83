//! # Petrobots - a tile based robot shooter
//!
//! The engine is split into a simulation core (the unit table and the behaviour of every unit
//! type), a map window renderer that only redraws what changed, and a thin [`platform`] layer that
//! hides graphics, audio, input and asset loading behind a trait.
//!

#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(
    clippy::multiple_crate_versions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::module_name_repetitions,
    clippy::use_self
)]

#[macro_use]
extern crate log;
#[macro_use]
extern crate lazy_static;
extern crate pretty_env_logger;
extern crate rand;
extern crate rand_core;
extern crate rand_isaac;
extern crate serde;
extern crate serde_json;

pub mod entity;
pub mod game;
pub mod platform;
#[cfg(test)]
mod test;
pub mod ui;
pub mod util;

use std::env;
use std::path::PathBuf;

pub const VERSION: &str = "0.1.0";

pub fn parse_cmdline_flags() {
    let args: Vec<String> = env::args().collect();
    debug!("args: {:?}", args);
    for idx in 0..args.len() {
        if let Some(arg) = args.get(idx) {
            match arg.as_str() {
                "-d" | "--debug" => game::env().set_debug_mode(true),
                "-s" | "--seed" => parse_seed(&args, idx),
                "-m" | "--map" => parse_map(&args, idx),
                "-f" | "--frames" => parse_frames(&args, idx),
                "--difficulty" => parse_difficulty(&args, idx),
                "--assets" => parse_path(&args, idx, |env, path| env.set_assets_dir(path)),
                "--script" => parse_path(&args, idx, |env, path| env.set_script(path)),
                "--classic-window" => game::env().set_classic_window(true),
                "--no-music" => game::env().set_music(false),
                "--realtime" => game::env().set_realtime(true),
                "--controls" => parse_controls(&args, idx),
                _ => {}
            }
        }
    }
}

fn parse_seed(args: &[String], idx: usize) {
    // try get next argument to retrieve the seed number
    if idx + 1 == args.len() {
        info!("no seed parameter provided, fall back to use '0' instead");
    }
    if let Some(next_arg) = args.get(idx + 1) {
        let seed = next_arg.parse().map_or_else(
            |_| {
                info!("no numerical seed parameter provided, fall back to use '0' instead");
                0
            },
            |v| v,
        );
        game::env().set_seed(seed);
    }
}

fn parse_map(args: &[String], idx: usize) {
    if idx + 1 == args.len() {
        info!("option '-m | --map' requires a map number between 1 and 14");
    }
    if let Some(next_arg) = args.get(idx + 1) {
        match next_arg.parse::<usize>() {
            Ok(map) if (1..=game::consts::MAP_COUNT).contains(&map) => {
                game::env().set_map(map - 1);
            }
            _ => warn!("invalid map number '{}', keeping the first map", next_arg),
        }
    }
}

fn parse_frames(args: &[String], idx: usize) {
    if idx + 1 == args.len() {
        info!("option '-f | --frames' requires an integer parameter!");
    }
    if let Some(next_arg) = args.get(idx + 1) {
        let limit = next_arg.parse::<u64>().map_or_else(
            |_| {
                info!("no numerical frame limit provided, running without a limit");
                0
            },
            |v| v,
        );
        if limit > 0 {
            game::env().set_frame_limit(limit);
        }
    }
}

fn parse_difficulty(args: &[String], idx: usize) {
    if let Some(next_arg) = args.get(idx + 1) {
        match next_arg.as_str() {
            "easy" => game::env().set_difficulty(game::Difficulty::Easy),
            "normal" => game::env().set_difficulty(game::Difficulty::Normal),
            "hard" => game::env().set_difficulty(game::Difficulty::Hard),
            other => warn!("unknown difficulty '{}', expected easy, normal or hard", other),
        }
    } else {
        info!("option '--difficulty' requires one of easy, normal or hard");
    }
}

fn parse_controls(args: &[String], idx: usize) {
    use ui::input::ControlMode;
    if let Some(next_arg) = args.get(idx + 1) {
        match next_arg.as_str() {
            "standard" => game::env().set_controls(ControlMode::Standard),
            "custom" => game::env().set_controls(ControlMode::Custom),
            "pad" => game::env().set_controls(ControlMode::Pad),
            other => warn!("unknown control mode '{}', expected standard, custom or pad", other),
        }
    } else {
        info!("option '--controls' requires one of standard, custom or pad");
    }
}

fn parse_path<F>(args: &[String], idx: usize, apply: F)
where
    F: FnOnce(&mut game::env::GameEnv, PathBuf),
{
    if let Some(next_arg) = args.get(idx + 1) {
        apply(&mut game::env(), PathBuf::from(next_arg));
    } else {
        info!("option '{}' requires a path", args[idx]);
    }
}
