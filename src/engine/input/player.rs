// Player input state: held directions and the queued jump

use super::action::Action;
use std::collections::HashSet;

/// Input state written by key handlers and sampled once per tick
#[derive(Debug, Default, Clone)]
pub struct PlayerInput {
    /// Held actions
    pressed: HashSet<Action>,

    /// A jump press waiting to be applied.
    ///
    /// Set on the press edge, cleared when the jump fires or the key is
    /// released, so one press never yields two jumps.
    jump_queued: bool,
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if an action is currently pressed
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Register an action press. Repeated presses of a held action are ignored.
    pub fn press(&mut self, action: Action) {
        if !action.is_held() || !self.pressed.insert(action) {
            return;
        }
        if action == Action::Jump {
            self.jump_queued = true;
        }
    }

    /// Register an action release
    pub fn release(&mut self, action: Action) {
        self.pressed.remove(&action);
        if action == Action::Jump {
            self.jump_queued = false;
        }
    }

    /// Whether a jump is waiting to be applied
    pub fn jump_queued(&self) -> bool {
        self.jump_queued
    }

    /// Mark the queued jump as applied
    pub fn consume_jump(&mut self) {
        self.jump_queued = false;
    }

    /// Horizontal direction: -1 (left), 0 (none or both) or +1 (right)
    pub fn horizontal(&self) -> f32 {
        let mut horizontal = 0.0;

        if self.is_pressed(Action::MoveLeft) {
            horizontal -= 1.0;
        }
        if self.is_pressed(Action::MoveRight) {
            horizontal += 1.0;
        }

        horizontal
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.jump_queued = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_input_creation() {
        let input = PlayerInput::new();
        assert!(!input.is_pressed(Action::Jump));
        assert!(!input.jump_queued());
        assert_eq!(input.horizontal(), 0.0);
    }

    #[test]
    fn test_press_jump_queues() {
        let mut input = PlayerInput::new();
        input.press(Action::Jump);
        assert!(input.is_pressed(Action::Jump));
        assert!(input.jump_queued());
    }

    #[test]
    fn test_consumed_jump_needs_a_new_press() {
        let mut input = PlayerInput::new();
        input.press(Action::Jump);
        input.consume_jump();
        assert!(!input.jump_queued());

        // Still held: pressing again without a release does nothing
        input.press(Action::Jump);
        assert!(!input.jump_queued());

        input.release(Action::Jump);
        input.press(Action::Jump);
        assert!(input.jump_queued());
    }

    #[test]
    fn test_release_clears_queued_jump() {
        let mut input = PlayerInput::new();
        input.press(Action::Jump);
        input.release(Action::Jump);
        assert!(!input.jump_queued());
        assert!(!input.is_pressed(Action::Jump));
    }

    #[test]
    fn test_horizontal() {
        let mut input = PlayerInput::new();
        input.press(Action::MoveRight);
        assert_eq!(input.horizontal(), 1.0);

        input.press(Action::MoveLeft);
        assert_eq!(input.horizontal(), 0.0);

        input.release(Action::MoveRight);
        assert_eq!(input.horizontal(), -1.0);
    }

    #[test]
    fn test_trigger_actions_are_not_held() {
        let mut input = PlayerInput::new();
        input.press(Action::Special);
        assert!(!input.is_pressed(Action::Special));
    }

    #[test]
    fn test_reset() {
        let mut input = PlayerInput::new();
        input.press(Action::Jump);
        input.press(Action::MoveLeft);
        input.reset();

        assert!(!input.is_pressed(Action::MoveLeft));
        assert!(!input.jump_queued());
    }
}
