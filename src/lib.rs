//! hackstep: a small 2D platformer simulation core.
//!
//! `core` holds geometry, `engine` the frame clock, input and physics, and
//! `game` the player, levels and the [`game::LevelSession`] that ties them
//! together. Drawing is left to whoever listens to the session.

pub mod core;
pub mod engine;
pub mod game;
