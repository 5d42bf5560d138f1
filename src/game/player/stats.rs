// Player dimensions - hitbox and how the sprite is laid over it

use glam::Vec2;

/// Fixed player geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerStats {
    /// Collision box width in pixels
    pub hitbox_width: f32,
    /// Collision box height in pixels
    pub hitbox_height: f32,
    /// Sprite frame edge in sheet pixels
    pub frame_size: f32,
    /// Scale applied to sprite frames on screen
    pub render_scale: f32,
}

/// The one player shape used by every level
pub const BASE_STATS: PlayerStats = PlayerStats {
    hitbox_width: 28.0,
    hitbox_height: 39.0,
    frame_size: 32.0,
    render_scale: 1.5,
};

impl Default for PlayerStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl PlayerStats {
    pub fn hitbox(&self) -> Vec2 {
        Vec2::new(self.hitbox_width, self.hitbox_height)
    }

    /// On-screen sprite size, rounded to whole pixels
    pub fn visual_size(&self) -> Vec2 {
        let edge = (self.frame_size * self.render_scale).round();
        Vec2::splat(edge)
    }

    /// Offset from the sprite's top-left corner to the hitbox's.
    ///
    /// The hitbox is centered horizontally and sits on the sprite's bottom edge.
    pub fn hitbox_offset(&self) -> Vec2 {
        let visual = self.visual_size();
        Vec2::new(
            ((visual.x - self.hitbox_width) / 2.0).max(0.0),
            (visual.y - self.hitbox_height).max(0.0),
        )
    }
}
