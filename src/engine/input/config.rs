// Key binding configuration and remapping

use super::action::{default_bindings, Action};
use std::collections::HashMap;
use winit::event::ElementState;
use winit::keyboard::{KeyCode, PhysicalKey};

/// A translated key press or release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub action: Action,
    pub pressed: bool,
}

/// Maps physical keys to game actions
#[derive(Debug, Clone)]
pub struct InputBindings {
    bindings: HashMap<KeyCode, Action>,
}

impl InputBindings {
    /// Create a binding table from a list of bindings.
    ///
    /// A key listed twice keeps its last action.
    pub fn from_bindings(bindings: Vec<(KeyCode, Action)>) -> Self {
        Self {
            bindings: bindings.into_iter().collect(),
        }
    }

    /// Get the action bound to a key
    pub fn action_for(&self, key: KeyCode) -> Option<Action> {
        self.bindings.get(&key).copied()
    }

    /// Translate a raw keyboard event.
    ///
    /// Key repeats are dropped so a held key produces exactly one press.
    pub fn translate(
        &self,
        physical_key: PhysicalKey,
        state: ElementState,
        repeat: bool,
    ) -> Option<InputEvent> {
        let PhysicalKey::Code(key) = physical_key else {
            return None;
        };
        let action = self.action_for(key)?;

        match state {
            ElementState::Pressed if repeat => None,
            ElementState::Pressed => Some(InputEvent {
                action,
                pressed: true,
            }),
            ElementState::Released => Some(InputEvent {
                action,
                pressed: false,
            }),
        }
    }
}

impl Default for InputBindings {
    fn default() -> Self {
        Self::from_bindings(default_bindings())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = InputBindings::default();
        assert_eq!(bindings.action_for(KeyCode::Space), Some(Action::Jump));
        assert_eq!(bindings.action_for(KeyCode::KeyA), Some(Action::MoveLeft));
        assert_eq!(bindings.action_for(KeyCode::KeyJ), Some(Action::Special));
        assert_eq!(bindings.action_for(KeyCode::KeyQ), None);
    }

    #[test]
    fn test_later_binding_wins() {
        let bindings = InputBindings::from_bindings(vec![
            (KeyCode::Space, Action::Jump),
            (KeyCode::Space, Action::Special),
        ]);
        assert_eq!(bindings.action_for(KeyCode::Space), Some(Action::Special));
    }

    #[test]
    fn test_translate_press_and_release() {
        let bindings = InputBindings::default();
        let key = PhysicalKey::Code(KeyCode::ArrowRight);

        assert_eq!(
            bindings.translate(key, ElementState::Pressed, false),
            Some(InputEvent {
                action: Action::MoveRight,
                pressed: true
            })
        );
        assert_eq!(
            bindings.translate(key, ElementState::Released, false),
            Some(InputEvent {
                action: Action::MoveRight,
                pressed: false
            })
        );
    }

    #[test]
    fn test_translate_ignores_repeats_and_unbound_keys() {
        let bindings = InputBindings::default();
        assert_eq!(
            bindings.translate(PhysicalKey::Code(KeyCode::Space), ElementState::Pressed, true),
            None
        );
        assert_eq!(
            bindings.translate(PhysicalKey::Code(KeyCode::F5), ElementState::Pressed, false),
            None
        );
    }
}
