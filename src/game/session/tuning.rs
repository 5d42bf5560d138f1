// Debug hook for adjusting jump height on a running level

use log::{info, warn};
use thiserror::Error;

use super::LevelSession;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuningError {
    #[error("jump height must be a number, got {0:?}")]
    NotANumber(String),

    #[error("jump height must be finite, got {0}")]
    NotFinite(f32),
}

/// Parse user-typed jump height. Surrounding whitespace is ignored.
pub fn parse_jump_height(input: &str) -> Result<f32, TuningError> {
    let value: f32 = input
        .trim()
        .parse()
        .map_err(|_| TuningError::NotANumber(input.to_string()))?;

    if !value.is_finite() {
        return Err(TuningError::NotFinite(value));
    }
    Ok(value)
}

/// Handle returned by [`LevelSession::tuning`] while the hook is exposed
pub struct JumpTuning<'a> {
    session: &'a mut LevelSession,
}

impl<'a> JumpTuning<'a> {
    pub(super) fn new(session: &'a mut LevelSession) -> Self {
        Self { session }
    }

    /// Set jump height from text. Rejected input leaves the session untouched.
    ///
    /// Returns the strength actually applied after clamping.
    pub fn set_jump_height(&mut self, input: &str) -> Result<f32, TuningError> {
        let value = match parse_jump_height(input) {
            Ok(value) => value,
            Err(err) => {
                warn!("Ignoring jump height: {}", err);
                return Err(err);
            }
        };

        let applied = self.session.set_jump_strength(value);
        info!("Jump height set to {}", value);
        Ok(applied)
    }

    pub fn set(&mut self, value: f32) -> f32 {
        self.session.set_jump_strength(value)
    }

    /// Adjust the current jump height by `delta`
    pub fn nudge(&mut self, delta: f32) -> f32 {
        let target = self.session.jump_strength() + delta;
        self.session.set_jump_strength(target)
    }

    pub fn jump_height(&self) -> f32 {
        self.session.jump_strength()
    }
}
