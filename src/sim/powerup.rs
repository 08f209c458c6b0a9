//! Power-up definitions and lifecycle
//!
//! At most one effect is active. Collecting a new pickup undoes the current
//! effect before applying the new one, and each effect schedules its own
//! expiry timer.

use serde::{Deserialize, Serialize};

use super::scheduler::{TimerEvent, TimerId};
use super::state::{GameEvent, GameState};
use crate::consts::{GROW_BONUS, GROW_SEGMENTS, SPEED_BOOST_DELTA_MS, SPEED_BOOST_FLOOR_MS};

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    SpeedBoost,
    Grow,
    Invulnerability,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::SpeedBoost,
        PowerUpKind::Grow,
        PowerUpKind::Invulnerability,
    ];

    /// How long the effect stays active (ms)
    pub fn duration_ms(self) -> u64 {
        match self {
            PowerUpKind::SpeedBoost => 5_000,
            // Only the banner lasts; the growth itself is permanent
            PowerUpKind::Grow => 1_000,
            PowerUpKind::Invulnerability => 7_000,
        }
    }

    /// Banner text shown while active
    pub fn label(self) -> &'static str {
        match self {
            PowerUpKind::SpeedBoost => "Speed Boost!",
            PowerUpKind::Grow => "Extra Growth!",
            PowerUpKind::Invulnerability => "Invulnerable!",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            PowerUpKind::SpeedBoost => "#20bf6b",
            PowerUpKind::Grow => "#f7b731",
            PowerUpKind::Invulnerability => "#3b82f6",
        }
    }
}

/// A pickup lying on the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub cell: super::grid::Cell,
    /// Timer that removes it if nobody collects it
    pub expiry: Option<TimerId>,
}

/// How to revert an effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Undo {
    /// Nothing to revert
    Nothing,
    /// Put the tick period back
    RestoreSpeed { period_ms: u64 },
    /// Turn self-collision back on
    RestoreSelfCollision,
}

/// The single in-effect power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub undo: Undo,
    pub timer: Option<TimerId>,
}

/// Tick period while a speed boost is active: 40 ms faster, floored at 50 ms
pub fn boosted_period(period_ms: u64) -> u64 {
    period_ms
        .saturating_sub(SPEED_BOOST_DELTA_MS)
        .max(SPEED_BOOST_FLOOR_MS)
}

/// Re-arm the main tick at the current speed, if the game is running
fn rearm_tick(state: &mut GameState) {
    if state.is_running() {
        let period = state.speed_ms;
        state.timers.rearm(&mut state.tick_timer, period, TimerEvent::Tick);
    }
}

/// Apply `kind`'s effect and return how to revert it
fn apply(state: &mut GameState, kind: PowerUpKind) -> Undo {
    match kind {
        PowerUpKind::SpeedBoost => {
            let prior = state.speed_ms;
            state.speed_ms = boosted_period(prior);
            rearm_tick(state);
            Undo::RestoreSpeed { period_ms: prior }
        }
        PowerUpKind::Grow => {
            state.snake.extend_tail(GROW_SEGMENTS);
            state.score += GROW_BONUS;
            Undo::Nothing
        }
        PowerUpKind::Invulnerability => {
            state.invulnerable = true;
            Undo::RestoreSelfCollision
        }
    }
}

fn revert(state: &mut GameState, undo: Undo) {
    match undo {
        Undo::Nothing => {}
        Undo::RestoreSpeed { period_ms } => {
            state.speed_ms = period_ms;
            rearm_tick(state);
        }
        Undo::RestoreSelfCollision => state.invulnerable = false,
    }
}

/// Make `kind` the active power-up, replacing any current one
pub fn activate(state: &mut GameState, kind: PowerUpKind) {
    clear_active(state);

    let undo = apply(state, kind);
    let timer = Some(
        state
            .timers
            .schedule_once(kind.duration_ms(), TimerEvent::PowerUpExpired),
    );
    state.active = Some(ActivePowerUp { kind, undo, timer });
    log::debug!("Power-up active: {:?}", kind);
    state.emit(GameEvent::PowerUpActivated { kind });
}

/// Undo the active power-up right now and cancel its expiry
pub fn clear_active(state: &mut GameState) {
    if let Some(mut active) = state.active.take() {
        state.timers.cancel_slot(&mut active.timer);
        revert(state, active.undo);
        state.emit(GameEvent::PowerUpEnded { kind: active.kind });
    }
}

/// Expiry timer callback
pub fn expire(state: &mut GameState) {
    if let Some(active) = state.active.take() {
        revert(state, active.undo);
        log::debug!("Power-up expired: {:?}", active.kind);
        state.emit(GameEvent::PowerUpEnded { kind: active.kind });
        state.emit(GameEvent::Redraw);
    }
}
