//! Virtual timer wheel
//!
//! Every timed behaviour (main tick, enemy steps, power-up and pickup expiry)
//! is a timer owned by the game state. Time only moves when the host calls
//! `pop_due`/`advance_to`, so tests can step the simulation one millisecond at
//! a time without touching the wall clock.

use serde::{Deserialize, Serialize};

/// Handle for a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(u64);

/// What a timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerEvent {
    /// Advance the player snake
    Tick,
    /// Advance every enemy snake
    EnemyStep,
    /// The active power-up ran out
    PowerUpExpired,
    /// An uncollected pickup (by id) vanishes
    PickupExpired(u32),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Timer {
    id: TimerId,
    event: TimerEvent,
    due_ms: u64,
    /// `Some` for repeating timers
    period_ms: Option<u64>,
}

/// Single-threaded scheduler over virtual milliseconds
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    now_ms: u64,
    timers: Vec<Timer>,
    next_id: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn push(&mut self, event: TimerEvent, delay_ms: u64, period_ms: Option<u64>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            event,
            due_ms: self.now_ms + delay_ms,
            period_ms,
        });
        id
    }

    /// Fire `event` once, `delay_ms` from now
    pub fn schedule_once(&mut self, delay_ms: u64, event: TimerEvent) -> TimerId {
        self.push(event, delay_ms, None)
    }

    /// Fire `event` every `period_ms`, first occurrence one period from now
    pub fn schedule_repeating(&mut self, period_ms: u64, event: TimerEvent) -> TimerId {
        let period = period_ms.max(1);
        self.push(event, period, Some(period))
    }

    /// Stop a timer. Returns whether it was still pending; cancelling twice is fine.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Cancel whatever timer `slot` holds and clear it
    pub fn cancel_slot(&mut self, slot: &mut Option<TimerId>) {
        if let Some(id) = slot.take() {
            self.cancel(id);
        }
    }

    /// Replace the repeating timer held in `slot` with one at `period_ms`
    pub fn rearm(&mut self, slot: &mut Option<TimerId>, period_ms: u64, event: TimerEvent) {
        self.cancel_slot(slot);
        *slot = Some(self.schedule_repeating(period_ms, event));
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Period of a pending repeating timer
    pub fn period_of(&self, id: TimerId) -> Option<u64> {
        self.timers.iter().find(|t| t.id == id).and_then(|t| t.period_ms)
    }

    /// Number of pending timers
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Earliest due time among pending timers
    pub fn next_due(&self) -> Option<u64> {
        self.timers.iter().map(|t| t.due_ms).min()
    }

    /// Pop the earliest timer due at or before `until_ms`.
    ///
    /// Moves the clock to the timer's due time. Repeating timers are
    /// rescheduled one period later; one-shot timers are removed. Ties fire in
    /// scheduling order.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<TimerEvent> {
        let idx = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.id))
            .map(|(i, _)| i)?;

        let Timer {
            event,
            due_ms,
            period_ms,
            ..
        } = self.timers[idx];
        self.now_ms = self.now_ms.max(due_ms);
        match period_ms {
            Some(period) => self.timers[idx].due_ms = due_ms + period,
            None => {
                self.timers.swap_remove(idx);
            }
        }
        Some(event)
    }

    /// Move the clock forward without firing anything
    pub fn advance_to(&mut self, t_ms: u64) {
        self.now_ms = self.now_ms.max(t_ms);
    }
}
