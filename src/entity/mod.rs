//! Units and their behaviour. Every unit is a slot in the world's unit table, its type selects the
//! routine that runs whenever its timer expires.

pub mod ai;
pub mod door;
pub mod explosion;
pub mod gadget;
pub mod movement;
pub mod player;
pub mod robot;
pub mod weapon;
