// Read-only snapshot handed to the presentation layer each tick

use crate::core::Rect;
use crate::engine::physics::PlayArea;
use crate::game::level::{Coin, Decoration, Door, LevelDefinition};
use crate::game::player::{AnimationMode, SpriteFrame};

/// What to draw this tick. Collected coins are left out.
#[derive(Debug, Clone)]
pub struct RenderFrame<'a> {
    pub level: Option<&'a LevelDefinition>,
    pub area: PlayArea,
    pub platforms: &'a [Rect],
    pub door: Option<&'a Door>,
    pub coins: Vec<&'a Coin>,
    pub decorations: &'a [Decoration],
    /// Player hitbox
    pub player: Rect,
    pub sprite: SpriteFrame,
    pub mode: AnimationMode,
    pub completed: bool,
}

impl RenderFrame<'_> {
    pub fn door_locked(&self) -> bool {
        self.door.is_some_and(|door| door.locked)
    }
}
