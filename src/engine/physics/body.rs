use glam::Vec2;

use crate::core::Rect;

/// Kinematic body for the player: position, velocity and a fixed hitbox.
///
/// Positions are pixels with a top-left origin; velocities are pixels per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerBody {
    /// Top-left corner of the hitbox
    pub position: Vec2,
    /// Velocity applied once per tick
    pub velocity: Vec2,
    /// Hitbox width and height
    pub size: Vec2,
    /// Set by the last vertical resolution
    pub grounded: bool,
}

impl PlayerBody {
    /// Create a body at rest, not yet grounded
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size,
            grounded: false,
        }
    }

    /// Teleport the body and clear its motion
    pub fn reset(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
        self.grounded = false;
    }

    /// Hitbox at the current position
    pub fn rect(&self) -> Rect {
        self.rect_at(self.position.x, self.position.y)
    }

    /// Hitbox moved to a tentative position
    pub fn rect_at(&self, x: f32, y: f32) -> Rect {
        Rect::new(x, y, self.size.x, self.size.y)
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn is_airborne(&self) -> bool {
        !self.grounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_body_is_at_rest() {
        let body = PlayerBody::new(Vec2::new(40.0, 280.0), Vec2::new(28.0, 39.0));
        assert_eq!(body.velocity, Vec2::ZERO);
        assert!(!body.grounded);
        assert!(body.is_airborne());
    }

    #[test]
    fn test_rect_follows_position() {
        let body = PlayerBody::new(Vec2::new(40.0, 280.0), Vec2::new(28.0, 39.0));
        assert_eq!(body.rect(), Rect::new(40.0, 280.0, 28.0, 39.0));
        assert_eq!(body.rect_at(0.0, 1.0), Rect::new(0.0, 1.0, 28.0, 39.0));
    }

    #[test]
    fn test_reset_clears_motion() {
        let mut body = PlayerBody::new(Vec2::ZERO, Vec2::new(28.0, 39.0));
        body.velocity = Vec2::new(3.0, -8.5);
        body.grounded = true;

        body.reset(Vec2::new(90.0, 280.0));
        assert_eq!(body.position, Vec2::new(90.0, 280.0));
        assert_eq!(body.velocity, Vec2::ZERO);
        assert!(!body.grounded);
    }
}
