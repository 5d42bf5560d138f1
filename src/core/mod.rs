// Core utilities shared by the engine and game layers

pub mod geometry;
pub mod math;

pub use geometry::{overlaps, Rect};
