// Player system
//
// - Player entity (body + animation)
// - Fixed player dimensions
// - Animation mode state machine
// - Clip playback and sprite sheet layout

pub mod animation;
pub mod character;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use animation::{AnimationClip, AnimationPlayer, SpriteCell, SpriteSheet};
pub use character::{Player, SpriteFrame};
pub use state::{AnimationMode, AnimationStateMachine, MotionState};
pub use stats::{PlayerStats, BASE_STATS};
