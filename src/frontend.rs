//! Outward-facing collaborators: rendering, sound cues, banners and the
//! level-select UI
//!
//! The session hands every side effect to a `Frontend`. Failures never reach
//! the simulation: they are logged and dropped.

use serde::Serialize;
use thiserror::Error;

use crate::sim::{Cell, GameState, PowerUpKind};

/// Owned view of everything the renderer draws
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub cols: i32,
    pub rows: i32,
    /// Head first
    pub snake: Vec<Cell>,
    pub food: Option<Cell>,
    pub obstacles: Vec<Cell>,
    pub enemies: Vec<Vec<Cell>>,
    pub power_ups: Vec<(Cell, PowerUpKind)>,
    pub active: Option<PowerUpKind>,
    pub dark_mode: bool,
    pub score: u64,
    pub level: u32,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            cols: state.grid.cols,
            rows: state.grid.rows,
            snake: state.snake.to_vec(),
            food: state.food,
            obstacles: state.obstacles.clone(),
            enemies: state.enemies.iter().map(|e| e.segments.clone()).collect(),
            power_ups: state.power_ups.iter().map(|p| (p.cell, p.kind)).collect(),
            active: state.active.as_ref().map(|a| a.kind),
            dark_mode: state.dark_mode,
            score: state.score,
            level: state.level,
        }
    }
}

/// Fire-and-forget sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Eat,
    PowerUp,
    LevelUp,
    GameOver,
}

/// Transient banner shown over the playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    PowerUp(PowerUpKind),
    Level(u32),
}

impl Notice {
    pub fn text(&self) -> String {
        match self {
            Notice::PowerUp(kind) => kind.label().to_string(),
            Notice::Level(level) => format!("Level {}!", level),
        }
    }
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio output unavailable")]
    Unavailable,
    #[error("failed to play {cue:?}: {reason}")]
    Playback { cue: SoundCue, reason: String },
}

/// Sink for everything the simulation wants the player to see or hear
pub trait Frontend {
    fn render(&mut self, snapshot: &Snapshot);

    fn play(&mut self, cue: SoundCue) -> Result<(), AudioError>;

    fn notify(&mut self, notice: Notice);

    /// The unlock watermark advanced; refresh the level picker
    fn levels_unlocked(&mut self, highest: u32);

    fn game_over(&mut self, score: u64, level: u32);
}

/// Discards everything
#[derive(Debug, Default)]
pub struct NullFrontend;

impl Frontend for NullFrontend {
    fn render(&mut self, _snapshot: &Snapshot) {}

    fn play(&mut self, _cue: SoundCue) -> Result<(), AudioError> {
        Ok(())
    }

    fn notify(&mut self, _notice: Notice) {}

    fn levels_unlocked(&mut self, _highest: u32) {}

    fn game_over(&mut self, _score: u64, _level: u32) {}
}

/// Headless frontend that reports through the `log` facade
#[derive(Debug)]
pub struct LogFrontend {
    sound: bool,
    frames: u64,
}

impl LogFrontend {
    pub fn new(sound: bool) -> Self {
        Self { sound, frames: 0 }
    }

    /// Number of frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Frontend for LogFrontend {
    fn render(&mut self, snapshot: &Snapshot) {
        self.frames += 1;
        log::trace!(
            "frame {}: head {:?} len {} score {}",
            self.frames,
            snapshot.snake.first(),
            snapshot.snake.len(),
            snapshot.score
        );
    }

    fn play(&mut self, cue: SoundCue) -> Result<(), AudioError> {
        if !self.sound {
            return Err(AudioError::Unavailable);
        }
        log::debug!("sound: {:?}", cue);
        Ok(())
    }

    fn notify(&mut self, notice: Notice) {
        log::info!("{}", notice.text());
    }

    fn levels_unlocked(&mut self, highest: u32) {
        log::info!("Levels 1-{} unlocked", highest);
    }

    fn game_over(&mut self, score: u64, level: u32) {
        log::info!("GAME OVER - score {} on level {}", score, level);
    }
}
