// Kinematic platformer physics: gravity, instant horizontal control and
// per-axis AABB resolution against static platforms

pub mod body;
mod collision;
mod world;

pub use body::PlayerBody;
pub use collision::{resolve_horizontal, resolve_vertical, VerticalContact};
pub use world::{
    MotionInput, PhysicsConfig, PhysicsWorld, PlayArea, StepReport, DEFAULT_PHYSICS,
    MAX_JUMP_STRENGTH, MIN_JUMP_STRENGTH,
};
