//! Main simulation tick and timer dispatch
//!
//! `tick` is the authoritative per-step transition of the player snake;
//! `handle_timer` routes every scheduler event to its callback.

use super::autopilot;
use super::collision;
use super::enemy;
use super::powerup;
use super::scheduler::TimerEvent;
use super::spawn;
use super::state::{GameEvent, GameState};
use super::transition;
use crate::consts::POWER_UP_BONUS;

/// Advance the player snake by one cell
pub fn tick(state: &mut GameState) {
    if !state.is_running() {
        return;
    }

    if state.autopilot {
        if let Some(dir) = autopilot::choose_direction(state) {
            state.snake.steer(dir);
        }
    }

    state.time_ticks += 1;
    state.snake.direction = state.snake.pending;
    let head = state.grid.step(state.snake.head(), state.snake.direction);

    if let Some(cause) = collision::check(state, head) {
        transition::game_over(state, cause);
        return;
    }

    if state.food == Some(head) {
        state.snake.advance(head, true);
        spawn::place_food(state);
        state.score += state.food_worth;
        state.emit(GameEvent::Ate {
            worth: state.food_worth,
            score: state.score,
        });

        if state.score >= state.level_def().score_threshold() && state.level < state.last_level() {
            transition::level_up(state);
        }
    } else {
        if let Some(idx) = state.power_up_at(head) {
            let id = state.power_ups[idx].id;
            if let Some(picked) = spawn::remove_power_up(state, id) {
                powerup::activate(state, picked.kind);
                state.score += POWER_UP_BONUS;
                state.emit(GameEvent::PowerUpCollected {
                    kind: picked.kind,
                    score: state.score,
                });
            }
        }
        state.snake.advance(head, false);
    }

    state.emit(GameEvent::Redraw);
}

/// Route a fired timer to its callback
pub fn handle_timer(state: &mut GameState, event: TimerEvent) {
    match event {
        TimerEvent::Tick => tick(state),
        TimerEvent::EnemyStep => enemy::step_all(state),
        TimerEvent::PowerUpExpired => powerup::expire(state),
        TimerEvent::PickupExpired(id) => spawn::expire_power_up(state, id),
    }
}

/// Run every timer due within the next `ms` milliseconds
pub fn advance(state: &mut GameState, ms: u64) {
    let until = state.timers.now_ms() + ms;
    while let Some(event) = state.timers.pop_due(until) {
        handle_timer(state, event);
    }
    state.timers.advance_to(until);
}
