//! Everything between the simulation and the screen: the map window renderer, the character layer,
//! the status panel, input translation and the modal screens.

pub mod hud;
pub mod info;
pub mod input;
pub mod menu;
pub mod modal;
pub mod render;
