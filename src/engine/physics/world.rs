use log::debug;

use crate::core::math::{axis_sign, clamp};
use crate::core::Rect;

use super::body::PlayerBody;
use super::collision::{resolve_horizontal, resolve_vertical, VerticalContact};

/// Lower bound for the runtime-tunable jump strength
pub const MIN_JUMP_STRENGTH: f32 = 4.0;
/// Upper bound for the runtime-tunable jump strength
pub const MAX_JUMP_STRENGTH: f32 = 60.0;

/// Movement constants, all in pixels per tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsConfig {
    /// Added to vertical velocity every tick
    pub gravity: f32,
    /// Terminal downward velocity
    pub max_fall_speed: f32,
    /// Horizontal velocity while a direction is held
    pub move_speed: f32,
    /// Upward impulse applied by a jump
    pub jump_strength: f32,
}

/// Default tuning for every level that does not override it
pub const DEFAULT_PHYSICS: PhysicsConfig = PhysicsConfig {
    gravity: 0.36,
    max_fall_speed: 10.0,
    move_speed: 3.0,
    jump_strength: 8.5,
};

impl Default for PhysicsConfig {
    fn default() -> Self {
        DEFAULT_PHYSICS
    }
}

/// Size of the playable area in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for PlayArea {
    fn default() -> Self {
        Self::new(640.0, 360.0)
    }
}

/// Per-tick control input for the player body
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionInput {
    /// -1 (left), 0 or +1 (right)
    pub horizontal: f32,
    /// A jump is queued
    pub jump: bool,
}

/// What happened during one physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    /// The queued jump was applied (the caller should consume it)
    pub jumped: bool,
    /// Horizontal motion was stopped by a platform
    pub blocked: bool,
    /// Vertical contacts resolved this step
    pub contact: VerticalContact,
}

/// Static world the player moves through: play area bounds and platforms
#[derive(Debug, Clone, Default)]
pub struct PhysicsWorld {
    config: PhysicsConfig,
    area: PlayArea,
    platforms: Vec<Rect>,
}

impl PhysicsWorld {
    /// Create an empty world with default physics
    pub fn new(area: PlayArea) -> Self {
        Self::with_config(area, DEFAULT_PHYSICS)
    }

    /// Create an empty world with custom physics
    pub fn with_config(area: PlayArea, config: PhysicsConfig) -> Self {
        Self {
            config,
            area,
            platforms: Vec::new(),
        }
    }

    /// Advance the body by one tick.
    ///
    /// Order matters: horizontal velocity from input, jump impulse, gravity
    /// with terminal speed, then horizontal and vertical resolution.
    pub fn step(&self, body: &mut PlayerBody, input: MotionInput) -> StepReport {
        let mut report = StepReport::default();

        body.velocity.x = axis_sign(input.horizontal) * self.config.move_speed;

        if input.jump && body.grounded {
            body.velocity.y = -self.config.jump_strength;
            body.grounded = false;
            report.jumped = true;
        }

        body.velocity.y += self.config.gravity;
        if body.velocity.y > self.config.max_fall_speed {
            body.velocity.y = self.config.max_fall_speed;
        }

        report.blocked = resolve_horizontal(body, &self.platforms, self.max_x(body));
        report.contact = resolve_vertical(body, &self.platforms, self.floor(body));

        report
    }

    /// Rightmost x the body may occupy
    pub fn max_x(&self, body: &PlayerBody) -> f32 {
        self.area.width - body.width()
    }

    /// Lowest y the body may occupy (the floor bound)
    pub fn floor(&self, body: &PlayerBody) -> f32 {
        self.area.height - body.height()
    }

    /// Add a static platform
    pub fn add_platform(&mut self, platform: Rect) {
        self.platforms.push(platform);
    }

    /// Remove every platform
    pub fn clear_platforms(&mut self) {
        self.platforms.clear();
    }

    pub fn platforms(&self) -> &[Rect] {
        &self.platforms
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Replace the whole physics configuration
    pub fn set_config(&mut self, config: PhysicsConfig) {
        self.config = config;
    }

    pub fn area(&self) -> PlayArea {
        self.area
    }

    /// Set jump strength, clamped to the tunable range. Returns the applied value.
    pub fn set_jump_strength(&mut self, strength: f32) -> f32 {
        let clamped = clamp(strength, MIN_JUMP_STRENGTH, MAX_JUMP_STRENGTH);
        debug!("Jump strength {} -> {}", self.config.jump_strength, clamped);
        self.config.jump_strength = clamped;
        clamped
    }

    pub fn jump_strength(&self) -> f32 {
        self.config.jump_strength
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use glam::Vec2;

    const HITBOX: Vec2 = Vec2::new(28.0, 39.0);

    fn ground_world() -> PhysicsWorld {
        let mut world = PhysicsWorld::new(PlayArea::default());
        world.add_platform(Rect::new(0.0, 320.0, 640.0, 40.0));
        world
    }

    fn grounded_body(world: &PhysicsWorld) -> PlayerBody {
        let mut body = PlayerBody::new(Vec2::new(40.0, 281.0), HITBOX);
        world.step(&mut body, MotionInput::default());
        assert!(body.grounded);
        body
    }

    #[test]
    fn test_default_physics() {
        let config = PhysicsConfig::default();
        assert_eq!(config.gravity, 0.36);
        assert_eq!(config.max_fall_speed, 10.0);
        assert_eq!(config.move_speed, 3.0);
        assert_eq!(config.jump_strength, 8.5);
    }

    #[test]
    fn test_horizontal_velocity_is_instant() {
        let world = ground_world();
        let mut body = grounded_body(&world);

        world.step(
            &mut body,
            MotionInput {
                horizontal: 1.0,
                jump: false,
            },
        );
        assert_eq!(body.velocity.x, 3.0);
        assert_eq!(body.position.x, 43.0);

        world.step(&mut body, MotionInput::default());
        assert_eq!(body.velocity.x, 0.0);
        assert_eq!(body.position.x, 43.0);
    }

    #[test]
    fn test_resting_on_platform_is_stable() {
        let world = ground_world();
        let mut body = grounded_body(&world);

        for _ in 0..10 {
            world.step(&mut body, MotionInput::default());
            assert_abs_diff_eq!(body.position.y, 281.0, epsilon = 1e-4);
            assert_eq!(body.velocity.y, 0.0);
            assert!(body.grounded);
        }
    }

    #[test]
    fn test_jump_from_ground() {
        let world = ground_world();
        let mut body = grounded_body(&world);

        let report = world.step(
            &mut body,
            MotionInput {
                horizontal: 0.0,
                jump: true,
            },
        );
        assert!(report.jumped);
        assert!(!body.grounded);
        // Impulse, then one tick of gravity
        assert_abs_diff_eq!(body.velocity.y, -8.5 + 0.36, epsilon = 1e-5);
        assert!(body.position.y < 281.0);
    }

    #[test]
    fn test_jump_in_air_is_ignored() {
        let world = ground_world();
        let mut body = PlayerBody::new(Vec2::new(40.0, 100.0), HITBOX);

        let report = world.step(
            &mut body,
            MotionInput {
                horizontal: 0.0,
                jump: true,
            },
        );
        assert!(!report.jumped);
        assert_abs_diff_eq!(body.velocity.y, 0.36, epsilon = 1e-6);
    }

    #[test]
    fn test_fall_speed_is_capped() {
        let world = PhysicsWorld::new(PlayArea::new(640.0, 100_000.0));
        let mut body = PlayerBody::new(Vec2::new(40.0, 0.0), HITBOX);

        for _ in 0..200 {
            world.step(&mut body, MotionInput::default());
            assert!(body.velocity.y <= 10.0);
        }
        assert_eq!(body.velocity.y, 10.0);
    }

    #[test]
    fn test_negative_gravity_is_accepted() {
        let config = PhysicsConfig {
            gravity: -0.5,
            ..DEFAULT_PHYSICS
        };
        let world = PhysicsWorld::with_config(PlayArea::default(), config);
        let mut body = PlayerBody::new(Vec2::new(40.0, 200.0), HITBOX);

        world.step(&mut body, MotionInput::default());
        assert!(body.position.y < 200.0);
    }

    #[test]
    fn test_jump_strength_clamped() {
        let mut world = PhysicsWorld::new(PlayArea::default());
        assert_eq!(world.set_jump_strength(11.0), 11.0);
        assert_eq!(world.set_jump_strength(1.0), MIN_JUMP_STRENGTH);
        assert_eq!(world.set_jump_strength(500.0), MAX_JUMP_STRENGTH);
        assert_eq!(world.jump_strength(), MAX_JUMP_STRENGTH);
    }
}
