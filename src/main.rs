use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use anyhow::Result;
use log::{info, warn};
use winit::{
    event::{ElementState, Event, KeyEvent, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

use hackstep::engine::input::InputBindings;
use hackstep::engine::physics::PlayArea;
use hackstep::game::levels::{self, KeyFlag, PasswordGate};
use hackstep::game::{LevelDefinition, LevelSession, LoadOptions, SessionListener};

/// Step used by the `[` and `]` jump tuning keys
const TUNING_STEP: f32 = 0.5;

/// What the window title shows
#[derive(Debug, Default)]
struct Hud {
    level_name: String,
    status: String,
    coins: u32,
    won: bool,
}

impl Hud {
    fn title(&self) -> String {
        if self.won {
            return format!("hackstep - You Win! - Coins: {}", self.coins);
        }
        format!(
            "hackstep - {} - {} - Coins: {}",
            self.level_name, self.status, self.coins
        )
    }
}

/// Reacts to session events: keeps the HUD current and advances levels
struct Host {
    levels: Vec<Rc<LevelDefinition>>,
    hud: Rc<RefCell<Hud>>,
}

impl SessionListener for Host {
    fn level_started(&mut self, _session: &mut LevelSession, level: &LevelDefinition, _options: LoadOptions) {
        let mut hud = self.hud.borrow_mut();
        hud.level_name = level.name.clone();
        hud.won = false;
    }

    fn level_completed(&mut self, session: &mut LevelSession, level: &LevelDefinition) {
        match levels::next_level(&self.levels, level.id) {
            Some(next) => session.load(next, LoadOptions::default()),
            None => {
                info!("All levels cleared");
                session.stop();
                self.hud.borrow_mut().won = true;
                session.status("Victory unlocked. Press F5 to replay.");
            }
        }
    }

    fn status(&mut self, _session: &mut LevelSession, message: &str) {
        self.hud.borrow_mut().status = message.to_string();
    }

    fn coin_collected(
        &mut self,
        session: &mut LevelSession,
        _index: usize,
        _coin: &hackstep::game::level::Coin,
        _level: &LevelDefinition,
    ) {
        self.hud.borrow_mut().coins += 1;
        session.status("Coin collected!");
    }

    fn level_reset_requested(&mut self, session: &mut LevelSession, level: Option<&LevelDefinition>) {
        self.hud.borrow_mut().coins = 0;
        if let Some(text) = level.and_then(|level| level.initial_status.clone()) {
            session.status(text);
        }
    }
}

/// Keyboard handling outside the bound game actions
struct Controls {
    bindings: InputBindings,
    key: KeyFlag,
    gate: PasswordGate,
    typing: bool,
    password: String,
}

impl Controls {
    fn handle(&mut self, session: &mut LevelSession, levels: &[Rc<LevelDefinition>], event: &KeyEvent) {
        let level_id = session.level().map(|level| level.id);

        if event.state == ElementState::Pressed && !event.repeat {
            let PhysicalKey::Code(code) = event.physical_key else {
                return;
            };

            if self.typing {
                self.type_password(session, code, event);
                return;
            }

            match (code, level_id) {
                (KeyCode::Tab, Some(5)) => {
                    self.typing = true;
                    self.password.clear();
                    session.status("Password: ");
                    return;
                }
                (KeyCode::Enter, Some(2)) => {
                    session.status("Hey, that worked!");
                    session.complete();
                    return;
                }
                (KeyCode::F5, _) => {
                    self.key.set(false);
                    if let Some(first) = levels::find(levels, 1) {
                        session.load(first, LoadOptions::default());
                    }
                    return;
                }
                (KeyCode::KeyK, Some(4)) => {
                    self.key.set(true);
                    info!("Keycard forged");
                    return;
                }
                (KeyCode::BracketLeft, _) | (KeyCode::BracketRight, _) => {
                    let delta = if code == KeyCode::BracketLeft {
                        -TUNING_STEP
                    } else {
                        TUNING_STEP
                    };
                    match session.tuning() {
                        Some(mut tuning) => {
                            let applied = tuning.nudge(delta);
                            info!("Jump height set to {}", applied);
                        }
                        None => warn!("No tuning hook on this level"),
                    }
                    return;
                }
                _ => {}
            }
        }

        self.forward(session, event.physical_key, event.state, event.repeat);
    }

    /// Pass a bound key on to the session. Presses are held back while the
    /// password prompt is open; releases always go through so nothing sticks.
    fn forward(&self, session: &mut LevelSession, key: PhysicalKey, state: ElementState, repeat: bool) {
        if self.typing && state == ElementState::Pressed {
            return;
        }
        if let Some(input) = self.bindings.translate(key, state, repeat) {
            if input.pressed {
                session.press(input.action);
            } else {
                session.release(input.action);
            }
        }
    }

    fn type_password(&mut self, session: &mut LevelSession, code: KeyCode, event: &KeyEvent) {
        match code {
            KeyCode::Escape => {
                self.typing = false;
                session.status("Final firewall detected. Password required.");
            }
            KeyCode::Enter => {
                self.typing = false;
                if self.gate.accepts(&self.password) {
                    session.status("Access granted. Proceed!");
                    session.complete();
                } else {
                    session.status("Access denied.");
                }
            }
            KeyCode::Backspace => {
                self.password.pop();
                session.status(format!("Password: {}", "*".repeat(self.password.len())));
            }
            _ => {
                if let Some(text) = &event.text {
                    self.password.extend(text.chars().filter(|ch| !ch.is_control()));
                    session.status(format!("Password: {}", "*".repeat(self.password.len())));
                }
            }
        }
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting hackstep...");

    let area = PlayArea::default();
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("hackstep")
        .with_inner_size(winit::dpi::LogicalSize::new(area.width, area.height))
        .with_resizable(false)
        .build(&event_loop)?;

    info!("Window created successfully");

    let key = KeyFlag::new();
    let levels = levels::catalog(&key);
    let hud = Rc::new(RefCell::new(Hud::default()));

    let mut session = LevelSession::new(area);
    session.set_listener(Host {
        levels: levels.clone(),
        hud: Rc::clone(&hud),
    });

    let mut controls = Controls {
        bindings: InputBindings::default(),
        key,
        gate: PasswordGate::default(),
        typing: false,
        password: String::new(),
    };

    if let Some(first) = levels::find(&levels, 1) {
        session.load(first, LoadOptions::default());
    }

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                session.destroy();
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                controls.handle(&mut session, &levels, &event);
                window.set_title(&hud.borrow().title());
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                session.frame(Instant::now());
                window.set_title(&hud.borrow().title());
            }
            Event::AboutToWait => {
                if session.is_running() {
                    window.request_redraw();
                }
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
