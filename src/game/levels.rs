// Built-in level catalog

use std::cell::Cell;
use std::rc::Rc;

use log::debug;

use crate::core::Rect;

use super::level::{CoinConfig, Decoration, DoorConfig, LevelBehavior, LevelDefinition, LevelId};
use super::session::LevelSession;

pub const TOTAL_LEVELS: LevelId = 5;

/// Answer for the final gate
pub const FINAL_PASSWORD: &str = "6hadowHac7er";

const GROUND: Rect = Rect::new(0.0, 320.0, 640.0, 40.0);

/// Shared "player holds the keycard" flag for level 4.
///
/// Cloning shares the flag; the host sets it, the level reads it every tick.
#[derive(Debug, Clone, Default)]
pub struct KeyFlag(Rc<Cell<bool>>);

impl KeyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.0.get()
    }

    pub fn set(&self, value: bool) {
        self.0.set(value);
    }
}

/// Checks attempts at the final gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordGate {
    password: &'static str,
}

impl PasswordGate {
    pub const fn new(password: &'static str) -> Self {
        Self { password }
    }

    /// Surrounding whitespace is ignored; the match is case-sensitive
    pub fn accepts(&self, attempt: &str) -> bool {
        attempt.trim() == self.password
    }
}

impl Default for PasswordGate {
    fn default() -> Self {
        Self::new(FINAL_PASSWORD)
    }
}

/// Adds a panel while loading; the level finishes through `complete()`
struct PanelLevel {
    panel: Decoration,
}

impl LevelBehavior for PanelLevel {
    fn setup(&self, session: &mut LevelSession) {
        session.add_decoration(self.panel.clone());
    }
}

/// Level 3: leaves the jump tuning hook lying around
struct DebugHooks;

impl LevelBehavior for DebugHooks {
    fn setup(&self, session: &mut LevelSession) {
        session.expose_tuning();
        session.status("Someone left debugging hooks around here...");
    }
}

/// Level 4: the door stays locked until the keycard flag is set
struct KeycardDoor {
    key: KeyFlag,
}

impl LevelBehavior for KeycardDoor {
    fn setup(&self, session: &mut LevelSession) {
        session.add_decoration(Decoration::panel(
            260.0,
            180.0,
            200.0,
            "Keycard reader waiting for hm_hasKey === 'true'.",
        ));
        session.set_door_locked(true);
    }

    fn door_locked(&self, _session: &LevelSession) -> Option<bool> {
        Some(!self.key.is_set())
    }

    fn on_door_locked(&self, session: &mut LevelSession) -> bool {
        debug!("Keycard missing at the door");
        session.set_door_locked(true);
        session.status("Door status: LOCKED (hm_hasKey required).");
        true
    }
}

/// All built-in levels, in play order
pub fn catalog(key: &KeyFlag) -> Vec<Rc<LevelDefinition>> {
    vec![
        Rc::new(path_not_taken()),
        Rc::new(broken_button()),
        Rc::new(impossible_jump()),
        Rc::new(digital_key(key.clone())),
        Rc::new(source_code_secret()),
    ]
}

/// Look a level up by id
pub fn find(levels: &[Rc<LevelDefinition>], id: LevelId) -> Option<Rc<LevelDefinition>> {
    levels.iter().find(|level| level.id == id).cloned()
}

/// Level after `id`, or `None` at the end of the run
pub fn next_level(levels: &[Rc<LevelDefinition>], id: LevelId) -> Option<Rc<LevelDefinition>> {
    if id >= TOTAL_LEVELS {
        return None;
    }
    find(levels, id + 1)
}

fn path_not_taken() -> LevelDefinition {
    LevelDefinition::new(1, "Level 1 - The Path Not Taken")
        .with_initial_status(
            "The door is up there with no obvious path. Maybe the browser has other routes?",
        )
        .with_start(40.0, 280.0)
        .with_platform(GROUND)
        .with_platform(Rect::new(300.0, 220.0, 140.0, 20.0))
        .with_platform(Rect::new(480.0, 180.0, 110.0, 20.0))
        .with_coin(CoinConfig::at(180.0, 288.0))
        .with_door(DoorConfig::at(540.0, 132.0).with_locked_text("You cannot reach the door from here..."))
}

fn broken_button() -> LevelDefinition {
    LevelDefinition::new(2, "Level 2 - The Broken Button")
        .with_initial_status("This control panel looks busted. Maybe you can fix it.")
        .with_start(60.0, 280.0)
        .with_platform(GROUND)
        .with_platform(Rect::new(200.0, 260.0, 220.0, 20.0))
        .with_platform(Rect::new(480.0, 220.0, 120.0, 20.0))
        .with_coin(CoinConfig::at(260.0, 232.0))
        .with_coin(CoinConfig::at(520.0, 192.0))
        .with_behavior(PanelLevel {
            panel: Decoration::panel(220.0, 200.0, 180.0, "Next Level: Button offline."),
        })
}

fn impossible_jump() -> LevelDefinition {
    LevelDefinition::new(3, "Level 3 - The Impossible Jump")
        .with_initial_status("Even full speed is not enough. Maybe rewrite the rules of physics?")
        .with_start(80.0, 280.0)
        .with_platform(GROUND)
        .with_platform(Rect::new(360.0, 200.0, 100.0, 20.0))
        .with_coin(CoinConfig::at(140.0, 292.0))
        .with_coin(CoinConfig::at(280.0, 292.0))
        .with_coin(CoinConfig::at(420.0, 292.0))
        .with_door(DoorConfig::at(520.0, 120.0).with_locked_text("You need more height to reach this door."))
        .with_behavior(DebugHooks)
}

fn digital_key(key: KeyFlag) -> LevelDefinition {
    LevelDefinition::new(4, "Level 4 - The Digital Key")
        .with_initial_status("Keycard reader offline. Local storage might help.")
        .with_start(90.0, 280.0)
        .with_platform(GROUND)
        .with_platform(Rect::new(240.0, 260.0, 140.0, 20.0))
        .with_platform(Rect::new(420.0, 240.0, 140.0, 20.0))
        .with_coin(CoinConfig::at(260.0, 292.0))
        .with_coin(CoinConfig::at(460.0, 292.0))
        .with_door(
            DoorConfig::at(540.0, 192.0)
                .locked(true)
                .with_locked_text("Door access denied. Missing key: hm_hasKey.")
                .with_unlocked_text("Door unlocked. Proceed quickly!"),
        )
        .with_behavior(KeycardDoor { key })
}

fn source_code_secret() -> LevelDefinition {
    LevelDefinition::new(5, "Level 5 - The Source Code Secret")
        .with_initial_status("Final firewall detected. Password required.")
        .with_start(60.0, 280.0)
        .with_platform(GROUND)
        .with_platform(Rect::new(200.0, 260.0, 160.0, 20.0))
        .with_coin(CoinConfig::at(220.0, 292.0))
        .with_coin(CoinConfig::at(360.0, 292.0))
        .with_behavior(PanelLevel {
            panel: Decoration::panel(
                200.0,
                120.0,
                240.0,
                "Final Gate. Password: (hint: the answer is hidden in the source)",
            ),
        })
}
