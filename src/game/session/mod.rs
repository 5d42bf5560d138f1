//! Level session
//!
//! Owns everything that changes while a level is played: the physics world,
//! the player, door, coins and decorations. The host drives it with
//! [`LevelSession::frame`] once per display refresh and feeds it input with
//! [`LevelSession::press`] / [`LevelSession::release`].
//!
//! Notifications are queued as [`SessionEvent`]s and handed to the installed
//! [`SessionListener`] once the operation that raised them has finished, so a
//! listener may call back into the session (load the next level, reset,
//! stop) without observing half-applied state.

pub mod events;
pub mod render;
pub mod tuning;

use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};

use log::{debug, info, trace};

use crate::core::Rect;
use crate::engine::game_loop::FrameClock;
use crate::engine::input::{Action, PlayerInput};
use crate::engine::physics::{PhysicsWorld, PlayArea, DEFAULT_PHYSICS};
use crate::game::level::{
    Coin, CoinConfig, Decoration, Door, DoorConfig, LevelBehavior, LevelDefinition, DEFAULT_START,
};
use crate::game::player::{Player, SpriteSheet, BASE_STATS};

pub use events::{SessionEvent, SessionListener};
pub use render::RenderFrame;
pub use tuning::{parse_jump_height, JumpTuning, TuningError};

/// How a level is (re)loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadOptions {
    /// Keep the current status text instead of showing the level's initial one
    pub preserve_status: bool,
}

pub struct LevelSession {
    world: PhysicsWorld,
    level: Option<Rc<LevelDefinition>>,
    player: Player,
    input: PlayerInput,
    door: Option<Door>,
    coins: Vec<Coin>,
    decorations: Vec<Decoration>,
    completed: bool,
    base_jump_strength: f32,
    clock: FrameClock,
    tuning_exposed: bool,
    sheet: SpriteSheet,

    listener: Option<Box<dyn SessionListener>>,
    events: VecDeque<SessionEvent>,
    dispatching: bool,
    listener_changed: bool,
    defer_depth: u32,
}

impl LevelSession {
    /// Create an idle session with no level loaded
    pub fn new(area: PlayArea) -> Self {
        Self {
            world: PhysicsWorld::new(area),
            level: None,
            player: Player::new(BASE_STATS, DEFAULT_START),
            input: PlayerInput::new(),
            door: None,
            coins: Vec::new(),
            decorations: Vec::new(),
            completed: false,
            base_jump_strength: DEFAULT_PHYSICS.jump_strength,
            clock: FrameClock::new(),
            tuning_exposed: false,
            sheet: SpriteSheet::standard_player(),
            listener: None,
            events: VecDeque::new(),
            dispatching: false,
            listener_changed: false,
            defer_depth: 0,
        }
    }

    /// Install the presentation callbacks, returning the previous listener
    pub fn set_listener(
        &mut self,
        listener: impl SessionListener + 'static,
    ) -> Option<Box<dyn SessionListener>> {
        self.listener_changed |= self.dispatching;
        self.listener.replace(Box::new(listener))
    }

    /// Remove the listener. Called from a callback, the current listener
    /// receives nothing further and the rest of the queue is dropped.
    pub fn clear_listener(&mut self) -> Option<Box<dyn SessionListener>> {
        self.listener_changed |= self.dispatching;
        self.listener.take()
    }

    pub fn set_sprite_sheet(&mut self, sheet: SpriteSheet) {
        self.sheet = sheet;
    }

    // ---- lifecycle ----

    /// Tear down whatever is loaded and build `level` from scratch
    pub fn load(&mut self, level: Rc<LevelDefinition>, options: LoadOptions) {
        self.deferred(|session| session.build_level(level, options));
    }

    /// Rebuild the current level, keeping the status text. No-op when idle.
    pub fn reset(&mut self) {
        let Some(level) = self.level.clone() else {
            return;
        };
        info!("Resetting level {}", level.id);
        self.load(
            level,
            LoadOptions {
                preserve_status: true,
            },
        );
    }

    /// Stop scheduling frames. State stays in place; safe at any time.
    pub fn stop(&mut self) {
        if self.clock.stop() {
            info!("Simulation loop stopped");
        }
    }

    /// Stop and forget the current level entirely
    pub fn destroy(&mut self) {
        self.stop();
        self.clear_level();
        self.level = None;
        self.completed = false;
        self.tuning_exposed = false;
        self.input.reset();
        info!("Session destroyed");
    }

    /// Finish the current level. Fires at most once per load.
    pub fn complete(&mut self) {
        if self.completed {
            return;
        }
        let Some(level) = self.level.clone() else {
            return;
        };
        self.completed = true;
        info!("Level {} completed", level.id);
        self.deferred(|session| session.events.push_back(SessionEvent::LevelCompleted { level }));
    }

    // ---- loop ----

    /// Run one display frame at `now`.
    ///
    /// Returns whether the host should schedule another frame.
    pub fn frame(&mut self, now: Instant) -> bool {
        if !self.clock.is_running() || self.level.is_none() {
            return false;
        }
        let delta = self.clock.begin_frame(now);
        trace!(
            "Frame {} delta {:?} ({:.1} fps)",
            self.clock.frame_count(),
            delta,
            self.clock.fps()
        );
        self.tick(delta);
        self.clock.is_running() && self.level.is_some()
    }

    /// Advance the level by one tick of `delta`, render, then dispatch events
    pub fn tick(&mut self, delta: Duration) {
        if self.level.is_none() {
            return;
        }
        self.deferred(|session| {
            session.step(delta.as_secs_f32());
            session.emit_render();
        });
    }

    // ---- input ----

    pub fn press(&mut self, action: Action) {
        match action {
            Action::Special => self.trigger_special(),
            Action::Reset => self.deferred(|session| {
                let level = session.level.clone();
                session
                    .events
                    .push_back(SessionEvent::LevelResetRequested { level });
                session.reset();
            }),
            _ => self.input.press(action),
        }
    }

    pub fn release(&mut self, action: Action) {
        self.input.release(action);
    }

    // ---- level mutators ----

    pub fn add_platform(&mut self, platform: Rect) {
        self.world.add_platform(platform);
    }

    pub fn add_coin(&mut self, coin: CoinConfig) {
        self.coins.push(Coin::from(coin));
    }

    /// Place the door, replacing any existing one
    pub fn add_door(&mut self, door: DoorConfig) {
        self.door = Some(Door::from(door));
    }

    pub fn add_decoration(&mut self, decoration: Decoration) {
        self.decorations.push(decoration);
    }

    /// Lock or unlock the door and announce the matching text
    pub fn set_door_locked(&mut self, locked: bool) {
        let Some(door) = self.door.as_mut() else {
            return;
        };
        door.locked = locked;
        debug!("Door {}", if locked { "locked" } else { "unlocked" });

        let text = if locked {
            door.locked_text.clone()
        } else {
            door.unlocked_text.clone()
        };
        if let Some(text) = text {
            self.status(text);
        }
    }

    /// Change jump strength without rebuilding the level.
    ///
    /// Clamped to the tunable range; returns the applied value.
    pub fn set_jump_strength(&mut self, strength: f32) -> f32 {
        self.world.set_jump_strength(strength)
    }

    pub fn trigger_special(&mut self) {
        self.player.trigger_special();
    }

    /// Send a status message to the listener
    pub fn status(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.deferred(|session| session.events.push_back(SessionEvent::Status(message)));
    }

    /// Make the jump tuning hook available until the next load or destroy
    pub fn expose_tuning(&mut self) {
        debug!("Jump tuning hook exposed");
        self.tuning_exposed = true;
    }

    pub fn tuning(&mut self) -> Option<JumpTuning<'_>> {
        if self.tuning_exposed {
            Some(JumpTuning::new(self))
        } else {
            None
        }
    }

    // ---- queries ----

    pub fn level(&self) -> Option<&LevelDefinition> {
        self.level.as_deref()
    }

    pub fn level_rc(&self) -> Option<Rc<LevelDefinition>> {
        self.level.clone()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn input(&self) -> &PlayerInput {
        &self.input
    }

    pub fn door(&self) -> Option<&Door> {
        self.door.as_ref()
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    pub fn coins_collected(&self) -> usize {
        self.coins.iter().filter(|coin| coin.collected).count()
    }

    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn is_tuning_exposed(&self) -> bool {
        self.tuning_exposed
    }

    pub fn jump_strength(&self) -> f32 {
        self.world.jump_strength()
    }

    /// Jump strength the current level started with
    pub fn base_jump_strength(&self) -> f32 {
        self.base_jump_strength
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn render_frame(&self) -> RenderFrame<'_> {
        RenderFrame {
            level: self.level.as_deref(),
            area: self.world.area(),
            platforms: self.world.platforms(),
            door: self.door.as_ref(),
            coins: self.coins.iter().filter(|coin| !coin.collected).collect(),
            decorations: &self.decorations,
            player: self.player.rect(),
            sprite: self.player.sprite_frame(&self.sheet),
            mode: self.player.mode(),
            completed: self.completed,
        }
    }

    // ---- internals ----

    fn build_level(&mut self, level: Rc<LevelDefinition>, options: LoadOptions) {
        self.clock.stop();
        self.tuning_exposed = false;
        self.clear_level();

        self.level = Some(Rc::clone(&level));
        self.completed = false;

        let physics = level.physics();
        self.world.set_config(physics);
        self.base_jump_strength = physics.jump_strength;
        self.player.respawn(level.start_position());

        for platform in &level.platforms {
            self.add_platform(*platform);
        }
        if let Some(text) = &level.banner_text {
            self.add_decoration(Decoration::Banner { text: text.clone() });
        }
        if let Some(door) = &level.door {
            self.add_door(door.clone());
        }
        if let Some(behavior) = level.behavior.clone() {
            behavior.setup(self);
        }
        for coin in &level.coins {
            self.add_coin(*coin);
        }

        info!("Loaded level {} ({})", level.id, level.name);
        self.events.push_back(SessionEvent::LevelStarted {
            level: Rc::clone(&level),
            options,
        });
        if !options.preserve_status {
            if let Some(text) = &level.initial_status {
                self.status(text.clone());
            }
        }

        self.clock.start();
    }

    fn clear_level(&mut self) {
        self.world.clear_platforms();
        self.door = None;
        self.coins.clear();
        self.decorations.clear();
    }

    fn behavior(&self) -> Option<Rc<dyn LevelBehavior>> {
        self.level.as_ref().and_then(|level| level.behavior.clone())
    }

    fn step(&mut self, dt: f32) {
        let report = self.player.update(&self.world, &mut self.input, dt);
        if report.jumped {
            trace!("Jump at {:?}", self.player.position());
        }

        self.sync_door_lock();
        self.check_door();
        self.check_coins();
    }

    /// Enforce the level's lock predicate, if it has one
    fn sync_door_lock(&mut self) {
        if self.completed {
            return;
        }
        let Some(current) = self.door.as_ref().map(|door| door.locked) else {
            return;
        };
        let Some(behavior) = self.behavior() else {
            return;
        };
        if let Some(locked) = behavior.door_locked(self) {
            if locked != current {
                self.set_door_locked(locked);
            }
        }
    }

    fn check_door(&mut self) {
        if self.completed {
            return;
        }
        let Some(door) = self.door.as_ref() else {
            return;
        };
        if !door.rect.overlaps(&self.player.rect()) {
            return;
        }

        if !door.locked {
            self.complete();
            return;
        }

        let locked_text = door.locked_text.clone();
        debug!("Player reached a locked door");
        let handled = self
            .behavior()
            .is_some_and(|behavior| behavior.on_door_locked(self));
        if !handled {
            if let Some(text) = locked_text {
                self.status(text);
            }
        }
    }

    fn check_coins(&mut self) {
        let Some(level) = self.level.clone() else {
            return;
        };
        let player = self.player.rect();

        for (index, coin) in self.coins.iter_mut().enumerate() {
            if coin.collected || !coin.rect.overlaps(&player) {
                continue;
            }
            coin.collected = true;
            debug!("Coin {} collected in level {}", index, level.id);
            self.events.push_back(SessionEvent::CoinCollected {
                index,
                coin: *coin,
                level: Rc::clone(&level),
            });
        }
    }

    fn emit_render(&mut self) {
        let Some(mut listener) = self.listener.take() else {
            return;
        };
        listener.render(&self.render_frame());
        if self.listener.is_none() {
            self.listener = Some(listener);
        }
    }

    /// Run `f` with event dispatch held back until it returns
    fn deferred<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.defer_depth += 1;
        let result = f(self);
        self.defer_depth -= 1;
        self.flush_events();
        result
    }

    fn flush_events(&mut self) {
        if self.dispatching || self.defer_depth > 0 {
            return;
        }
        let Some(mut listener) = self.listener.take() else {
            self.events.clear();
            return;
        };

        self.dispatching = true;
        self.listener_changed = false;
        while let Some(event) = self.events.pop_front() {
            event.dispatch(listener.as_mut(), self);
            if self.listener_changed {
                break;
            }
        }
        self.dispatching = false;

        if self.listener_changed {
            // Swapped or cleared mid-dispatch: the old listener is retired and
            // whatever replaced it (if anything) takes the rest of the queue
            self.listener_changed = false;
            debug!("Listener changed during dispatch");
            self.flush_events();
        } else {
            self.listener = Some(listener);
        }
    }
}

impl Default for LevelSession {
    fn default() -> Self {
        Self::new(PlayArea::default())
    }
}
