//! Level setup, level-up, pause and game over
//!
//! Everything that tears down or rebuilds a level lives here so the timers are
//! always stopped and re-armed together.

use glam::IVec2;

use super::enemy;
use super::grid::Cell;
use super::obstacles;
use super::powerup;
use super::scheduler::TimerEvent;
use super::spawn;
use super::state::{Collision, GameEvent, GamePhase, GameState, Snake};
use crate::consts::ENEMY_STEP_MS;

/// Cells ahead of the spawn head kept free of obstacles
const SPAWN_LANE_AHEAD: i32 = 3;

/// Stop the tick and enemy timers. Safe to call when they are already stopped.
pub fn stop_timers(state: &mut GameState) {
    state.timers.cancel_slot(&mut state.tick_timer);
    state.timers.cancel_slot(&mut state.enemy_timer);
}

/// (Re)start the tick at the current speed and the enemy step if the level has
/// enemies
pub fn arm_timers(state: &mut GameState) {
    let period = state.speed_ms;
    state.timers.rearm(&mut state.tick_timer, period, TimerEvent::Tick);
    if state.level_def().has_enemies() {
        state
            .timers
            .rearm(&mut state.enemy_timer, ENEMY_STEP_MS, TimerEvent::EnemyStep);
    } else {
        state.timers.cancel_slot(&mut state.enemy_timer);
    }
}

/// Lay out `level`: fresh snake, obstacles, enemies and food. Score and phase
/// are left alone.
fn build_level(state: &mut GameState, level: u32) {
    // Undo first: reverting a speed boost re-arms the tick while running
    powerup::clear_active(state);
    stop_timers(state);
    spawn::clear_power_ups(state);
    state.invulnerable = false;

    let def = state.level_def_for(level);
    state.level = def.index;
    state.speed_ms = def.speed_ms;
    state.food_worth = def.food_worth;
    state.snake = Snake::spawn(&state.grid);

    let head = state.snake.head();
    let lane: Vec<Cell> = state
        .snake
        .cells()
        .chain((1..=SPAWN_LANE_AHEAD).map(|i| state.grid.wrap(head + IVec2::new(i, 0))))
        .collect();
    state.obstacles = obstacles::layout_for(&state.grid, def, &lane, &mut state.rng);
    state.enemies = enemy::roster(
        &state.grid,
        def.index,
        def.enemy_count,
        &state.obstacles,
        &state.snake,
        &mut state.rng,
    );
    state.food = None;
    spawn::place_food(state);

    log::info!(
        "Level {} \"{}\": speed {}ms, {} obstacles, {} enemies",
        def.index,
        def.name,
        def.speed_ms,
        state.obstacles.len(),
        state.enemies.len()
    );
    state.emit(GameEvent::LevelStarted { level: def.index });
}

/// Reset to a new run at `level` (clamped to the unlock watermark), waiting to
/// start
pub fn new_game(state: &mut GameState, level: u32) {
    let level = if level > state.highest_unlocked {
        log::warn!(
            "Level {} is locked, starting at level {}",
            level,
            state.highest_unlocked
        );
        state.highest_unlocked
    } else {
        level.max(1)
    };
    state.score = 0;
    state.time_ticks = 0;
    build_level(state, level);
    state.phase = GamePhase::Ready;
    state.emit(GameEvent::Redraw);
}

/// Begin play from the ready state
pub fn start(state: &mut GameState) {
    if state.phase != GamePhase::Ready {
        return;
    }
    state.phase = GamePhase::Running;
    arm_timers(state);
    log::info!("Starting game at level {}", state.level);
}

/// New run at `level`, running immediately
pub fn start_game(state: &mut GameState, level: u32) {
    new_game(state, level);
    start(state);
}

/// Replay the current level from a score of zero
pub fn restart(state: &mut GameState) {
    let level = state.level;
    start_game(state, level);
}

/// Pause or resume. Only the tick and enemy timers stop; effect and pickup
/// lifetimes keep counting.
pub fn toggle_pause(state: &mut GameState) {
    match state.phase {
        GamePhase::Running => {
            state.phase = GamePhase::Paused;
            stop_timers(state);
            state.emit(GameEvent::Paused);
        }
        GamePhase::Paused => {
            state.phase = GamePhase::Running;
            arm_timers(state);
            state.emit(GameEvent::Resumed);
        }
        GamePhase::Ready | GamePhase::GameOver => {}
    }
}

/// Advance to the next level, keeping the score
pub fn level_up(state: &mut GameState) {
    let next = state.level + 1;
    if next > state.last_level() {
        return;
    }

    if next > state.highest_unlocked {
        state.highest_unlocked = next;
        state.emit(GameEvent::Unlocked { highest: next });
    }

    let score = state.score;
    build_level(state, next);
    state.score = score;
    log::info!("Level up! Now on level {} with score {}", next, score);
    state.emit(GameEvent::LevelUp { level: next });

    if state.is_running() {
        arm_timers(state);
    }
}

/// End the run: stop every timer and drop the active effect
pub fn game_over(state: &mut GameState, cause: Collision) {
    state.phase = GamePhase::GameOver;
    stop_timers(state);
    powerup::clear_active(state);
    log::info!(
        "Game over ({:?}) at level {} with score {}",
        cause,
        state.level,
        state.score
    );
    state.emit(GameEvent::GameOver {
        score: state.score,
        level: state.level,
        cause,
    });
}

/// Leave the current run for the menu
pub fn return_to_menu(state: &mut GameState) {
    state.phase = GamePhase::Ready;
    powerup::clear_active(state);
    stop_timers(state);
    state.emit(GameEvent::Redraw);
}
