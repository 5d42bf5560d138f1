// Level content: static definitions handed to a session, plus the runtime
// door/coin/decoration records the session builds from them

use std::fmt;
use std::rc::Rc;

use glam::Vec2;

use crate::core::Rect;
use crate::engine::physics::{PhysicsConfig, DEFAULT_PHYSICS};

use super::session::LevelSession;

pub type LevelId = u32;

/// Where the player appears when a level does not say
pub const DEFAULT_START: Vec2 = Vec2::new(40.0, 40.0);

pub const DEFAULT_DOOR_WIDTH: f32 = 32.0;
pub const DEFAULT_DOOR_HEIGHT: f32 = 48.0;
pub const DEFAULT_COIN_SIZE: f32 = 18.0;

/// Door placement and lock texts
#[derive(Debug, Clone, PartialEq)]
pub struct DoorConfig {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub locked: bool,
    pub locked_text: Option<String>,
    pub unlocked_text: Option<String>,
}

impl DoorConfig {
    /// An unlocked door of the default size
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            width: DEFAULT_DOOR_WIDTH,
            height: DEFAULT_DOOR_HEIGHT,
            locked: false,
            locked_text: None,
            unlocked_text: None,
        }
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn with_locked_text(mut self, text: impl Into<String>) -> Self {
        self.locked_text = Some(text.into());
        self
    }

    pub fn with_unlocked_text(mut self, text: impl Into<String>) -> Self {
        self.unlocked_text = Some(text.into());
        self
    }
}

/// Coin placement; coins are squares
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoinConfig {
    pub x: f32,
    pub y: f32,
    pub size: f32,
}

impl CoinConfig {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            size: DEFAULT_COIN_SIZE,
        }
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }
}

/// The exit of a loaded level
#[derive(Debug, Clone, PartialEq)]
pub struct Door {
    pub rect: Rect,
    pub locked: bool,
    pub locked_text: Option<String>,
    pub unlocked_text: Option<String>,
}

impl From<DoorConfig> for Door {
    fn from(config: DoorConfig) -> Self {
        Self {
            rect: Rect::new(config.x, config.y, config.width, config.height),
            locked: config.locked,
            locked_text: config.locked_text,
            unlocked_text: config.unlocked_text,
        }
    }
}

/// A coin in a loaded level. `collected` only ever goes false -> true.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coin {
    pub rect: Rect,
    pub collected: bool,
}

impl From<CoinConfig> for Coin {
    fn from(config: CoinConfig) -> Self {
        Self {
            rect: Rect::new(config.x, config.y, config.size, config.size),
            collected: false,
        }
    }
}

/// Non-physical presentation element owned by the level
#[derive(Debug, Clone, PartialEq)]
pub enum Decoration {
    /// Goal text across the top of the play area
    Banner { text: String },
    /// Free-standing info panel
    Panel {
        x: f32,
        y: f32,
        width: f32,
        text: String,
    },
}

impl Decoration {
    pub fn panel(x: f32, y: f32, width: f32, text: impl Into<String>) -> Self {
        Self::Panel {
            x,
            y,
            width,
            text: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Banner { text } | Self::Panel { text, .. } => text,
        }
    }
}

/// Level-specific hooks. Every method has a do-nothing default.
pub trait LevelBehavior {
    /// Runs during load, after the door is placed and before coins are added
    fn setup(&self, _session: &mut LevelSession) {}

    /// Lock state to enforce this tick, or `None` to leave the door alone
    fn door_locked(&self, _session: &LevelSession) -> Option<bool> {
        None
    }

    /// Player touched the door while it was locked.
    ///
    /// Return `false` to fall back to showing the door's locked text.
    fn on_door_locked(&self, _session: &mut LevelSession) -> bool {
        false
    }
}

/// Everything a session needs to build a level
#[derive(Clone)]
pub struct LevelDefinition {
    pub id: LevelId,
    pub name: String,
    pub start: Option<Vec2>,
    pub platforms: Vec<Rect>,
    pub coins: Vec<CoinConfig>,
    pub door: Option<DoorConfig>,
    pub gravity: Option<f32>,
    pub move_speed: Option<f32>,
    pub jump_strength: Option<f32>,
    pub initial_status: Option<String>,
    pub banner_text: Option<String>,
    pub behavior: Option<Rc<dyn LevelBehavior>>,
}

impl LevelDefinition {
    pub fn new(id: LevelId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            start: None,
            platforms: Vec::new(),
            coins: Vec::new(),
            door: None,
            gravity: None,
            move_speed: None,
            jump_strength: None,
            initial_status: None,
            banner_text: None,
            behavior: None,
        }
    }

    pub fn with_start(mut self, x: f32, y: f32) -> Self {
        self.start = Some(Vec2::new(x, y));
        self
    }

    pub fn with_platform(mut self, platform: Rect) -> Self {
        self.platforms.push(platform);
        self
    }

    pub fn with_coin(mut self, coin: CoinConfig) -> Self {
        self.coins.push(coin);
        self
    }

    pub fn with_door(mut self, door: DoorConfig) -> Self {
        self.door = Some(door);
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = Some(gravity);
        self
    }

    pub fn with_move_speed(mut self, speed: f32) -> Self {
        self.move_speed = Some(speed);
        self
    }

    pub fn with_jump_strength(mut self, strength: f32) -> Self {
        self.jump_strength = Some(strength);
        self
    }

    pub fn with_initial_status(mut self, text: impl Into<String>) -> Self {
        self.initial_status = Some(text.into());
        self
    }

    pub fn with_banner(mut self, text: impl Into<String>) -> Self {
        self.banner_text = Some(text.into());
        self
    }

    pub fn with_behavior(mut self, behavior: impl LevelBehavior + 'static) -> Self {
        self.behavior = Some(Rc::new(behavior));
        self
    }

    pub fn start_position(&self) -> Vec2 {
        self.start.unwrap_or(DEFAULT_START)
    }

    /// Default physics with this level's overrides applied
    pub fn physics(&self) -> PhysicsConfig {
        PhysicsConfig {
            gravity: self.gravity.unwrap_or(DEFAULT_PHYSICS.gravity),
            move_speed: self.move_speed.unwrap_or(DEFAULT_PHYSICS.move_speed),
            jump_strength: self.jump_strength.unwrap_or(DEFAULT_PHYSICS.jump_strength),
            ..DEFAULT_PHYSICS
        }
    }
}

impl fmt::Debug for LevelDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelDefinition")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("start", &self.start)
            .field("platforms", &self.platforms.len())
            .field("coins", &self.coins.len())
            .field("door", &self.door)
            .field("physics", &self.physics())
            .field("behavior", &self.behavior.is_some())
            .finish()
    }
}
