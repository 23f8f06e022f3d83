//! # Petrobots
//!
//! Runs the engine on the headless platform: assets are read from a directory, input is replayed
//! from a json script and the game ends after a frame limit or when the script ran out.
//!

#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(
    clippy::multiple_crate_versions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]

#[macro_use]
extern crate log;

use color_eyre::eyre::Result;
use petrobots::game::{self, Game};
use petrobots::platform::headless::HeadlessPlatform;

// For game testing run with
// `RUST_LOG=petrobots=debug cargo run -- --assets data --script input.json --frames 3600`.

/// # Errors
/// Missing or truncated assets and unreadable input scripts are repackaged with `color_eyre`.
pub fn main() -> Result<()> {
    color_eyre::install()?;

    println!(
        r#"
         ___     _           _         _
        | _ \___| |_ _ _ ___| |__  ___| |_ ___
        |  _/ -_)  _| '_/ _ \ '_ \/ _ \  _(_-<
        |_| \___|\__|_| \___/_.__/\___/\__/__/
    "#
    );

    // init logger
    pretty_env_logger::init();

    // parse program arguments
    petrobots::parse_cmdline_flags();
    info!("petrobots v{}", petrobots::VERSION);

    let mut platform = HeadlessPlatform::from_env()?;
    let mut game = Game::new(&mut platform)?;
    let unattended = {
        let env = game::env();
        env.script.is_none() && env.frame_limit.is_some()
    };
    if unattended {
        // unattended runs skip the title menu
        game.skip_intro();
    }
    game.run(&mut platform);
    Ok(())
}
