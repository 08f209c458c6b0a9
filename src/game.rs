//! Game session: the simulation wired to its collaborators
//!
//! A `Session` owns the `GameState`, a `Frontend` and an `UnlockStore`. Every
//! call that mutates the state (input, timers, menu actions) is followed by a
//! flush that drains the event outbox and dispatches each event to the
//! collaborators. Collaborator failures are logged and otherwise ignored.

use crate::consts::LEVEL_COUNT;
use crate::frontend::{Frontend, Notice, Snapshot, SoundCue};
use crate::persistence::UnlockStore;
use crate::platform::Intent;
use crate::settings::Settings;
use crate::sim::{
    Direction, GameEvent, GamePhase, GameState, Level, LevelCatalog, handle_timer, transition,
};

pub struct Session {
    state: GameState,
    frontend: Box<dyn Frontend>,
    store: Box<dyn UnlockStore>,
}

impl Session {
    /// Build a session sitting on the level-1 menu screen
    pub fn new(
        settings: &Settings,
        frontend: Box<dyn Frontend>,
        store: Box<dyn UnlockStore>,
    ) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        let mut state = GameState::new(settings.grid(), seed);
        state.dark_mode = settings.dark_mode;
        state.highest_unlocked = match store.load_highest_unlocked() {
            Ok(highest) => highest.clamp(1, LEVEL_COUNT),
            Err(e) => {
                log::warn!("Could not load unlocked levels, starting fresh: {}", e);
                1
            }
        };
        log::info!(
            "Session seed {}, levels 1-{} unlocked",
            seed,
            state.highest_unlocked
        );

        let mut session = Self {
            state,
            frontend,
            store,
        };
        transition::new_game(&mut session.state, 1);
        session.flush();
        session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for tools and tests; call `flush` afterwards
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &dyn UnlockStore {
        self.store.as_ref()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn highest_unlocked(&self) -> u32 {
        self.state.highest_unlocked
    }

    /// Every level with its unlocked flag, for the level picker
    pub fn level_menu(&self) -> impl Iterator<Item = (&'static Level, bool)> + '_ {
        LevelCatalog::global()
            .iter()
            .map(|level| (level, level.index <= self.state.highest_unlocked))
    }

    /// Start a fresh run at `level` (clamped to what is unlocked)
    pub fn start(&mut self, level: u32) {
        transition::start_game(&mut self.state, level);
        self.flush();
    }

    pub fn toggle_pause(&mut self) {
        transition::toggle_pause(&mut self.state);
        self.flush();
    }

    pub fn restart(&mut self) {
        transition::restart(&mut self.state);
        self.flush();
    }

    /// Drop the current run and show the menu
    pub fn menu(&mut self) {
        transition::return_to_menu(&mut self.state);
        self.flush();
    }

    /// Latch a direction for the next tick; ignored unless running
    pub fn steer(&mut self, dir: Direction) -> bool {
        if !self.state.is_running() {
            return false;
        }
        self.state.snake.steer(dir)
    }

    pub fn handle_intent(&mut self, intent: Intent) {
        match intent {
            Intent::Steer(dir) => {
                self.steer(dir);
            }
            Intent::TogglePause => self.toggle_pause(),
            Intent::ToggleAutopilot => {
                let on = !self.state.autopilot;
                self.set_autopilot(on);
            }
        }
    }

    pub fn toggle_dark_mode(&mut self) {
        self.state.dark_mode = !self.state.dark_mode;
        self.state.emit(GameEvent::Redraw);
        self.flush();
    }

    pub fn set_autopilot(&mut self, on: bool) {
        self.state.autopilot = on;
        log::info!("Autopilot: {}", on);
    }

    /// Run the virtual clock forward by `ms`, firing every due timer
    pub fn advance(&mut self, ms: u64) {
        let until = self.state.timers.now_ms() + ms;
        while let Some(event) = self.state.timers.pop_due(until) {
            handle_timer(&mut self.state, event);
            self.flush();
        }
        self.state.timers.advance_to(until);
    }

    /// Dispatch everything waiting in the outbox
    pub fn flush(&mut self) {
        for event in self.state.drain_events() {
            self.dispatch(event);
        }
    }

    fn dispatch(&mut self, event: GameEvent) {
        match event {
            GameEvent::Redraw | GameEvent::Paused | GameEvent::Resumed => {
                self.frontend.render(&Snapshot::capture(&self.state));
            }
            GameEvent::Ate { .. } => self.play(SoundCue::Eat),
            GameEvent::PowerUpCollected { .. } => self.play(SoundCue::PowerUp),
            GameEvent::PowerUpActivated { kind } => self.frontend.notify(Notice::PowerUp(kind)),
            GameEvent::PowerUpEnded { kind } => log::debug!("{:?} wore off", kind),
            GameEvent::LevelStarted { level } => log::debug!("Level {} ready", level),
            GameEvent::LevelUp { level } => {
                self.play(SoundCue::LevelUp);
                self.frontend.notify(Notice::Level(level));
            }
            GameEvent::Unlocked { highest } => {
                if let Err(e) = self.store.save_highest_unlocked(highest) {
                    log::warn!("Failed to save unlocked level {}: {}", highest, e);
                }
                self.frontend.levels_unlocked(highest);
            }
            GameEvent::GameOver { score, level, .. } => {
                self.play(SoundCue::GameOver);
                self.frontend.game_over(score, level);
            }
        }
    }

    fn play(&mut self, cue: SoundCue) {
        if let Err(e) = self.frontend.play(cue) {
            log::debug!("Sound {:?} skipped: {}", cue, e);
        }
    }
}
