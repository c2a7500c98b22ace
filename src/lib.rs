//! Gauntlet game library
//!
//! A round-based 3D arena survival game: roll a ball through waves of
//! pursuing cubes, collect the coin quota for each round, and survive all
//! four rounds.  Built on Bevy with Rapier3D physics.

pub mod arena;
pub mod collision;
pub mod config;
pub mod constants;
pub mod core;
pub mod error;
pub mod graphics;
pub mod hostile;
pub mod hud;
pub mod menu;
pub mod pickup;
pub mod player;
pub mod round;
pub mod shape;
