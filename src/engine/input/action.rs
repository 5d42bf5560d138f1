// Game action definitions and default key bindings

use winit::keyboard::KeyCode;

/// Represents all possible in-game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    Jump,
    /// Bound so the key is swallowed, no gameplay effect yet
    Down,

    // One-shot triggers
    Special,
    Reset,
}

impl Action {
    /// Held actions are sampled once per tick; the rest fire on press
    pub fn is_held(&self) -> bool {
        matches!(
            self,
            Self::MoveLeft | Self::MoveRight | Self::Jump | Self::Down
        )
    }
}

/// Default keyboard bindings: arrows and WASD, Space to jump, J and R for triggers
pub fn default_bindings() -> Vec<(KeyCode, Action)> {
    vec![
        // Movement
        (KeyCode::ArrowLeft, Action::MoveLeft),
        (KeyCode::KeyA, Action::MoveLeft),
        (KeyCode::ArrowRight, Action::MoveRight),
        (KeyCode::KeyD, Action::MoveRight),
        (KeyCode::ArrowUp, Action::Jump),
        (KeyCode::KeyW, Action::Jump),
        (KeyCode::Space, Action::Jump),
        (KeyCode::ArrowDown, Action::Down),
        (KeyCode::KeyS, Action::Down),
        // Triggers
        (KeyCode::KeyJ, Action::Special),
        (KeyCode::KeyR, Action::Reset),
    ]
}
