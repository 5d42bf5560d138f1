// Session notifications and the listener that receives them

use std::rc::Rc;

use crate::game::level::{Coin, LevelDefinition};

use super::render::RenderFrame;
use super::{LevelSession, LoadOptions};

/// Something the presentation layer should hear about.
///
/// Events are queued while the session mutates itself and dispatched once
/// the current operation has committed its state.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    LevelStarted {
        level: Rc<LevelDefinition>,
        options: LoadOptions,
    },
    LevelCompleted {
        level: Rc<LevelDefinition>,
    },
    Status(String),
    CoinCollected {
        index: usize,
        coin: Coin,
        level: Rc<LevelDefinition>,
    },
    LevelResetRequested {
        level: Option<Rc<LevelDefinition>>,
    },
}

impl SessionEvent {
    pub(super) fn dispatch(self, listener: &mut dyn SessionListener, session: &mut LevelSession) {
        match self {
            Self::LevelStarted { level, options } => listener.level_started(session, &level, options),
            Self::LevelCompleted { level } => listener.level_completed(session, &level),
            Self::Status(message) => listener.status(session, &message),
            Self::CoinCollected { index, coin, level } => {
                listener.coin_collected(session, index, &coin, &level)
            }
            Self::LevelResetRequested { level } => {
                listener.level_reset_requested(session, level.as_deref())
            }
        }
    }
}

/// Presentation-side callbacks. All default to doing nothing.
///
/// Callbacks get the session back, so they may load, reset or stop it.
pub trait SessionListener {
    fn level_started(
        &mut self,
        _session: &mut LevelSession,
        _level: &LevelDefinition,
        _options: LoadOptions,
    ) {
    }

    fn level_completed(&mut self, _session: &mut LevelSession, _level: &LevelDefinition) {}

    fn status(&mut self, _session: &mut LevelSession, _message: &str) {}

    fn coin_collected(
        &mut self,
        _session: &mut LevelSession,
        _index: usize,
        _coin: &Coin,
        _level: &LevelDefinition,
    ) {
    }

    fn level_reset_requested(
        &mut self,
        _session: &mut LevelSession,
        _level: Option<&LevelDefinition>,
    ) {
    }

    /// Called once per tick with the committed world state
    fn render(&mut self, _frame: &RenderFrame<'_>) {}
}
