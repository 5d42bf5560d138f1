// Player animation state machine

use log::debug;

use super::animation::{AnimationClip, AnimationPlayer, SpriteCell};

const IDLE_FRAMES: [SpriteCell; 2] = [SpriteCell::new(1, 0), SpriteCell::new(1, 1)];
const WALK_FRAMES: [SpriteCell; 7] = [
    SpriteCell::new(3, 0),
    SpriteCell::new(3, 1),
    SpriteCell::new(3, 2),
    SpriteCell::new(3, 3),
    SpriteCell::new(3, 4),
    SpriteCell::new(3, 5),
    SpriteCell::new(3, 6),
];
const RISE_FRAMES: [SpriteCell; 6] = [
    SpriteCell::new(5, 0),
    SpriteCell::new(5, 0),
    SpriteCell::new(5, 1),
    SpriteCell::new(5, 1),
    SpriteCell::new(5, 2),
    SpriteCell::new(5, 3),
];
const FALL_FRAMES: [SpriteCell; 6] = [
    SpriteCell::new(5, 4),
    SpriteCell::new(5, 4),
    SpriteCell::new(5, 5),
    SpriteCell::new(5, 6),
    SpriteCell::new(5, 7),
    SpriteCell::new(5, 7),
];
const SPECIAL_FRAMES: [SpriteCell; 8] = [
    SpriteCell::new(7, 0),
    SpriteCell::new(7, 1),
    SpriteCell::new(7, 2),
    SpriteCell::new(7, 3),
    SpriteCell::new(7, 4),
    SpriteCell::new(7, 5),
    SpriteCell::new(7, 6),
    SpriteCell::new(7, 7),
];
const SPECIAL_HOLD_FRAMES: [SpriteCell; 3] = [
    SpriteCell::new(7, 5),
    SpriteCell::new(7, 6),
    SpriteCell::new(7, 7),
];

/// Which animation sequence the player is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationMode {
    /// Standing still on ground
    #[default]
    Idle,
    /// Moving horizontally on ground
    Walking,
    /// In the air, moving upward
    Rising,
    /// In the air, moving downward
    Falling,
    /// One-shot flourish, only ever started by an explicit trigger
    Special,
    /// Looping pose entered when the special flourish ends
    SpecialHold,
}

impl AnimationMode {
    /// Clip played for this mode
    pub fn clip(&self) -> AnimationClip {
        match self {
            Self::Idle => AnimationClip::looping(&IDLE_FRAMES, 4.0),
            Self::Walking => AnimationClip::looping(&WALK_FRAMES, 10.0),
            Self::Rising => AnimationClip::one_shot(&RISE_FRAMES, 9.0),
            Self::Falling => AnimationClip::one_shot(&FALL_FRAMES, 9.0),
            Self::Special => AnimationClip::one_shot(&SPECIAL_FRAMES, 12.0),
            Self::SpecialHold => AnimationClip::looping(&SPECIAL_HOLD_FRAMES, 1.5),
        }
    }

    /// Idle is the only mode whose cursor never advances
    pub fn advances(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Check if the mode is one of the special override modes
    pub fn is_special(&self) -> bool {
        matches!(self, Self::Special | Self::SpecialHold)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walking => "walking",
            Self::Rising => "rising",
            Self::Falling => "falling",
            Self::Special => "special",
            Self::SpecialHold => "special-hold",
        }
    }
}

/// Motion facts the state machine selects a mode from
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MotionState {
    /// -1, 0 or +1
    pub horizontal: f32,
    pub grounded: bool,
    pub velocity_y: f32,
}

impl MotionState {
    /// Mode implied by motion alone, ignoring any override
    pub fn mode(&self) -> AnimationMode {
        if !self.grounded {
            if self.velocity_y <= 0.0 {
                AnimationMode::Rising
            } else {
                AnimationMode::Falling
            }
        } else if self.horizontal != 0.0 {
            AnimationMode::Walking
        } else {
            AnimationMode::Idle
        }
    }
}

/// Selects the animation mode each tick and drives its playback.
///
/// An override (special or special-hold) beats the motion-derived mode.
/// Special runs to its last frame and then hands over to special-hold;
/// special-hold lasts until the player moves horizontally or leaves the
/// ground.
#[derive(Debug, Clone)]
pub struct AnimationStateMachine {
    mode: AnimationMode,
    override_mode: Option<AnimationMode>,
    player: AnimationPlayer,
    /// Direction the sprite faces (1 = right, -1 = left)
    facing: f32,
    /// Last non-zero horizontal input
    last_facing: f32,
}

impl Default for AnimationStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationStateMachine {
    pub fn new() -> Self {
        Self {
            mode: AnimationMode::Idle,
            override_mode: None,
            player: AnimationPlayer::new(AnimationMode::Idle.clip()),
            facing: 1.0,
            last_facing: 1.0,
        }
    }

    /// Back to idle facing right, dropping any override.
    ///
    /// The remembered facing survives so a reset level keeps the last
    /// direction the player walked.
    pub fn reset(&mut self) {
        self.mode = AnimationMode::Idle;
        self.override_mode = None;
        self.player.play_from_start(AnimationMode::Idle.clip());
        self.player.stop();
        self.facing = 1.0;
    }

    /// Select the mode for this tick and advance playback by `dt` seconds
    pub fn update(&mut self, motion: MotionState, dt: f32) {
        if motion.horizontal > 0.0 {
            self.last_facing = 1.0;
        } else if motion.horizontal < 0.0 {
            self.last_facing = -1.0;
        }

        if self.override_mode == Some(AnimationMode::SpecialHold)
            && (motion.horizontal != 0.0 || !motion.grounded)
        {
            self.override_mode = None;
        }

        let desired = self.override_mode.unwrap_or_else(|| motion.mode());
        if desired != self.mode {
            self.enter(desired, motion.horizontal);
        }

        if self.mode == AnimationMode::Walking {
            self.facing = if motion.horizontal < 0.0 { -1.0 } else { 1.0 };
        }

        if !self.mode.advances() {
            self.player.stop();
            return;
        }

        self.player.resume();
        let finished = self.player.update(dt);
        if finished && self.mode == AnimationMode::Special {
            self.override_mode = Some(AnimationMode::SpecialHold);
            self.enter(AnimationMode::SpecialHold, motion.horizontal);
        }
    }

    /// Start the special flourish regardless of motion.
    ///
    /// No-op while special or special-hold is already showing.
    pub fn trigger_special(&mut self) {
        if self.mode.is_special() || self.override_mode.is_some_and(|mode| mode.is_special()) {
            return;
        }
        self.override_mode = Some(AnimationMode::Special);
        self.enter(AnimationMode::Special, 0.0);
    }

    /// Load the clip for a new mode and pick its facing
    fn enter(&mut self, mode: AnimationMode, horizontal: f32) {
        debug!("Animation {} -> {}", self.mode.name(), mode.name());
        self.mode = mode;
        self.player.play_from_start(mode.clip());

        if mode == AnimationMode::Walking {
            self.facing = if horizontal < 0.0 { -1.0 } else { 1.0 };
            self.last_facing = self.facing;
        } else {
            self.facing = self.last_facing;
        }
    }

    /// Get the current mode
    pub fn mode(&self) -> AnimationMode {
        self.mode
    }

    pub fn override_mode(&self) -> Option<AnimationMode> {
        self.override_mode
    }

    pub fn facing(&self) -> f32 {
        self.facing
    }

    /// Whether the sprite should be drawn mirrored
    pub fn is_flipped_horizontal(&self) -> bool {
        self.facing < 0.0
    }

    pub fn current_frame(&self) -> usize {
        self.player.current_frame()
    }

    /// Sheet cell to draw this tick
    pub fn current_cell(&self) -> SpriteCell {
        self.player.current_cell()
    }

    pub fn clip(&self) -> &AnimationClip {
        self.player.clip()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn grounded(horizontal: f32) -> MotionState {
        MotionState {
            horizontal,
            grounded: true,
            velocity_y: 0.0,
        }
    }

    fn airborne(horizontal: f32, velocity_y: f32) -> MotionState {
        MotionState {
            horizontal,
            grounded: false,
            velocity_y,
        }
    }

    #[test]
    fn test_initial_mode() {
        let sm = AnimationStateMachine::new();
        assert_eq!(sm.mode(), AnimationMode::Idle);
        assert_eq!(sm.facing(), 1.0);
        assert!(sm.override_mode().is_none());
    }

    #[test]
    fn test_idle_to_walking_right() {
        let mut sm = AnimationStateMachine::new();
        sm.update(grounded(1.0), DT);
        assert_eq!(sm.mode(), AnimationMode::Walking);
        assert_eq!(sm.facing(), 1.0);
    }

    #[test]
    fn test_walking_left_flips() {
        let mut sm = AnimationStateMachine::new();
        sm.update(grounded(-1.0), DT);
        assert_eq!(sm.facing(), -1.0);
        assert!(sm.is_flipped_horizontal());
    }

    #[test]
    fn test_walking_back_to_idle_in_one_tick() {
        let mut sm = AnimationStateMachine::new();
        sm.update(grounded(1.0), DT);
        sm.update(grounded(0.0), DT);
        assert_eq!(sm.mode(), AnimationMode::Idle);
    }

    #[test]
    fn test_facing_tracks_input_while_walking() {
        let mut sm = AnimationStateMachine::new();
        sm.update(grounded(1.0), DT);
        sm.update(grounded(-1.0), DT);
        assert_eq!(sm.mode(), AnimationMode::Walking);
        assert_eq!(sm.facing(), -1.0);
    }

    #[test]
    fn test_idle_keeps_last_facing() {
        let mut sm = AnimationStateMachine::new();
        sm.update(grounded(-1.0), DT);
        sm.update(grounded(0.0), DT);
        assert_eq!(sm.mode(), AnimationMode::Idle);
        assert_eq!(sm.facing(), -1.0);
    }

    #[test]
    fn test_idle_never_advances() {
        let mut sm = AnimationStateMachine::new();
        for _ in 0..120 {
            sm.update(grounded(0.0), DT);
        }
        assert_eq!(sm.current_frame(), 0);
        assert_eq!(sm.current_cell(), SpriteCell::new(1, 0));
    }

    #[test]
    fn test_airborne_modes() {
        let mut sm = AnimationStateMachine::new();
        sm.update(airborne(0.0, -5.0), DT);
        assert_eq!(sm.mode(), AnimationMode::Rising);

        sm.update(airborne(0.0, 0.0), DT);
        assert_eq!(sm.mode(), AnimationMode::Rising);

        sm.update(airborne(0.0, 0.5), DT);
        assert_eq!(sm.mode(), AnimationMode::Falling);
    }

    #[test]
    fn test_airborne_facing_is_frozen() {
        let mut sm = AnimationStateMachine::new();
        sm.update(grounded(-1.0), DT);
        sm.update(airborne(-1.0, -5.0), DT);
        assert_eq!(sm.facing(), -1.0);

        // Turning around mid-air does not flip the rising sprite
        sm.update(airborne(1.0, -4.0), DT);
        assert_eq!(sm.mode(), AnimationMode::Rising);
        assert_eq!(sm.facing(), -1.0);
    }

    #[test]
    fn test_rising_holds_last_frame() {
        let mut sm = AnimationStateMachine::new();
        for _ in 0..120 {
            sm.update(airborne(0.0, -5.0), DT);
        }
        assert_eq!(sm.current_frame(), 5);
        assert_eq!(sm.current_cell(), SpriteCell::new(5, 3));
    }

    #[test]
    fn test_walk_cycle_loops() {
        let mut sm = AnimationStateMachine::new();
        sm.update(grounded(1.0), 0.0);
        // Seven frames at 10 fps, plus a little
        sm.update(grounded(1.0), 0.75);
        assert_eq!(sm.current_frame(), 0);
    }

    #[test]
    fn test_special_overrides_walking() {
        let mut sm = AnimationStateMachine::new();
        sm.update(grounded(1.0), DT);
        sm.trigger_special();
        assert_eq!(sm.mode(), AnimationMode::Special);
        assert_eq!(sm.override_mode(), Some(AnimationMode::Special));
        assert_eq!(sm.current_cell(), SpriteCell::new(7, 0));
    }

    #[test]
    fn test_special_survives_motion() {
        let mut sm = AnimationStateMachine::new();
        sm.trigger_special();
        sm.update(grounded(1.0), DT);
        sm.update(airborne(1.0, -3.0), DT);
        assert_eq!(sm.mode(), AnimationMode::Special);
    }

    #[test]
    fn test_special_finishes_into_hold() {
        let mut sm = AnimationStateMachine::new();
        sm.trigger_special();

        // Eight frames at 12 fps is two thirds of a second
        let mut elapsed = 0.0;
        while elapsed < 0.6 {
            sm.update(grounded(0.0), DT);
            elapsed += DT;
        }
        assert_eq!(sm.mode(), AnimationMode::Special);

        for _ in 0..10 {
            sm.update(grounded(0.0), DT);
        }
        assert_eq!(sm.mode(), AnimationMode::SpecialHold);
        assert_eq!(sm.override_mode(), Some(AnimationMode::SpecialHold));
    }

    #[test]
    fn test_hold_cleared_by_horizontal_input() {
        let mut sm = AnimationStateMachine::new();
        sm.trigger_special();
        sm.update(grounded(0.0), 1.0);
        assert_eq!(sm.mode(), AnimationMode::SpecialHold);

        sm.update(grounded(-1.0), DT);
        assert_eq!(sm.mode(), AnimationMode::Walking);
        assert!(sm.override_mode().is_none());
    }

    #[test]
    fn test_hold_cleared_by_leaving_ground() {
        let mut sm = AnimationStateMachine::new();
        sm.trigger_special();
        sm.update(grounded(0.0), 1.0);

        sm.update(airborne(0.0, -8.0), DT);
        assert_eq!(sm.mode(), AnimationMode::Rising);
    }

    #[test]
    fn test_hold_loops_while_still() {
        let mut sm = AnimationStateMachine::new();
        sm.trigger_special();
        sm.update(grounded(0.0), 1.0);

        for _ in 0..600 {
            sm.update(grounded(0.0), DT);
        }
        assert_eq!(sm.mode(), AnimationMode::SpecialHold);
    }

    #[test]
    fn test_trigger_special_is_noop_when_active() {
        let mut sm = AnimationStateMachine::new();
        sm.trigger_special();
        sm.update(grounded(0.0), 0.2);
        let frame = sm.current_frame();
        assert!(frame > 0);

        sm.trigger_special();
        assert_eq!(sm.current_frame(), frame);

        sm.update(grounded(0.0), 1.0);
        assert_eq!(sm.mode(), AnimationMode::SpecialHold);
        sm.trigger_special();
        assert_eq!(sm.mode(), AnimationMode::SpecialHold);
    }

    #[test]
    fn test_special_uses_last_facing() {
        let mut sm = AnimationStateMachine::new();
        sm.update(grounded(-1.0), DT);
        sm.update(grounded(0.0), DT);
        sm.trigger_special();
        assert_eq!(sm.facing(), -1.0);
    }

    #[test]
    fn test_reset() {
        let mut sm = AnimationStateMachine::new();
        sm.update(grounded(-1.0), DT);
        sm.trigger_special();
        sm.reset();

        assert_eq!(sm.mode(), AnimationMode::Idle);
        assert!(sm.override_mode().is_none());
        assert_eq!(sm.facing(), 1.0);
        assert_eq!(sm.current_frame(), 0);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(AnimationMode::Idle.name(), "idle");
        assert_eq!(AnimationMode::SpecialHold.name(), "special-hold");
        assert!(AnimationMode::Special.is_special());
        assert!(!AnimationMode::Falling.is_special());
    }
}
