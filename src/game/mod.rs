// Game layer: the player, level content and the session that plays it

pub mod level;
pub mod levels;
pub mod player;
pub mod session;

pub use level::{LevelBehavior, LevelDefinition, LevelId};
pub use session::{LevelSession, LoadOptions, SessionListener};
