// Player entity: kinematic body plus animation

use glam::Vec2;

use crate::core::Rect;
use crate::engine::input::PlayerInput;
use crate::engine::physics::{MotionInput, PhysicsWorld, PlayerBody, StepReport};

use super::animation::{SpriteCell, SpriteSheet};
use super::state::{AnimationMode, AnimationStateMachine, MotionState};
use super::stats::PlayerStats;

/// Where and how to draw the player sprite this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteFrame {
    pub cell: SpriteCell,
    /// Region of the sprite sheet, in sheet pixels
    pub source: Rect,
    /// On-screen region, hitbox offset already applied
    pub dest: Rect,
    pub flip_horizontal: bool,
}

/// The player-controlled character
#[derive(Debug, Clone)]
pub struct Player {
    pub body: PlayerBody,
    pub animation: AnimationStateMachine,
    pub stats: PlayerStats,
}

impl Player {
    pub fn new(stats: PlayerStats, spawn: Vec2) -> Self {
        Self {
            body: PlayerBody::new(spawn, stats.hitbox()),
            animation: AnimationStateMachine::new(),
            stats,
        }
    }

    /// Run one tick: physics from the sampled input, then animation.
    ///
    /// A queued jump is consumed only when it actually fired, so pressing
    /// jump just before landing still jumps on touchdown.
    pub fn update(&mut self, world: &PhysicsWorld, input: &mut PlayerInput, dt: f32) -> StepReport {
        let horizontal = input.horizontal();
        let report = world.step(
            &mut self.body,
            MotionInput {
                horizontal,
                jump: input.jump_queued(),
            },
        );

        if report.jumped {
            input.consume_jump();
        }

        self.animation.update(
            MotionState {
                horizontal,
                grounded: self.body.grounded,
                velocity_y: self.body.velocity.y,
            },
            dt,
        );

        report
    }

    /// Put the player back at a spawn point, at rest and idle
    pub fn respawn(&mut self, position: Vec2) {
        self.body.reset(position);
        self.animation.reset();
    }

    pub fn trigger_special(&mut self) {
        self.animation.trigger_special();
    }

    pub fn rect(&self) -> Rect {
        self.body.rect()
    }

    pub fn position(&self) -> Vec2 {
        self.body.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity
    }

    pub fn is_grounded(&self) -> bool {
        self.body.grounded
    }

    pub fn mode(&self) -> AnimationMode {
        self.animation.mode()
    }

    /// Sprite placement for the current animation frame
    pub fn sprite_frame(&self, sheet: &SpriteSheet) -> SpriteFrame {
        let cell = self.animation.current_cell();
        let offset = self.stats.hitbox_offset();
        let visual = self.stats.visual_size();

        SpriteFrame {
            cell,
            source: sheet.source_rect(cell),
            dest: Rect::from_position_size(self.body.position - offset, visual),
            flip_horizontal: self.animation.is_flipped_horizontal(),
        }
    }
}
