//! Food and pickup placement
//!
//! Placement draws random cells and rejects occupied ones. After
//! `PLACEMENT_ATTEMPTS` misses it scans the board for free cells and picks one
//! of those, so a crowded board can never spin forever.

use rand::Rng;

use super::grid::Cell;
use super::powerup::{PowerUp, PowerUpKind};
use super::scheduler::TimerEvent;
use super::state::{GameEvent, GameState};
use crate::consts::{PLACEMENT_ATTEMPTS, POWER_UP_LIFETIME_MS};

/// Find a random free cell, or `None` when the board is full
pub fn find_free_cell(state: &mut GameState) -> Option<Cell> {
    for _ in 0..PLACEMENT_ATTEMPTS {
        let candidate = state.grid.random_cell(&mut state.rng);
        if !state.is_occupied(candidate) {
            return Some(candidate);
        }
    }

    let free: Vec<Cell> = state
        .grid
        .cells()
        .filter(|&c| !state.is_occupied(c))
        .collect();
    if free.is_empty() {
        log::warn!("No free cell left on a {}x{} grid", state.grid.cols, state.grid.rows);
        return None;
    }
    log::debug!("Placement fell back to scanning {} free cells", free.len());
    Some(free[state.rng.random_range(0..free.len())])
}

/// Put the food on a fresh cell, then maybe drop a pickup next to it
pub fn place_food(state: &mut GameState) -> Option<Cell> {
    // The old food cell must not block its own replacement
    state.food = None;
    state.food = find_free_cell(state);

    let chance = state.level_def().power_up_chance();
    if state.rng.random_bool(chance) {
        let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
        place_power_up(state, kind);
    }
    state.food
}

/// Drop a pickup of `kind` on a free cell with its own expiry timer
pub fn place_power_up(state: &mut GameState, kind: PowerUpKind) -> Option<u32> {
    let cell = find_free_cell(state)?;
    let id = state.next_entity_id();
    let expiry = Some(
        state
            .timers
            .schedule_once(POWER_UP_LIFETIME_MS, TimerEvent::PickupExpired(id)),
    );
    state.power_ups.push(PowerUp {
        id,
        kind,
        cell,
        expiry,
    });
    Some(id)
}

/// Remove a pickup by id (collected or expired), cancelling its timer
pub fn remove_power_up(state: &mut GameState, id: u32) -> Option<PowerUp> {
    let idx = state.power_ups.iter().position(|p| p.id == id)?;
    let mut power_up = state.power_ups.remove(idx);
    state.timers.cancel_slot(&mut power_up.expiry);
    Some(power_up)
}

/// Pickup expiry timer callback
pub fn expire_power_up(state: &mut GameState, id: u32) {
    if let Some(p) = remove_power_up(state, id) {
        log::debug!("Pickup {:?} at {} expired", p.kind, p.cell);
        state.emit(GameEvent::Redraw);
    }
}

/// Remove every pickup from the field
pub fn clear_power_ups(state: &mut GameState) {
    for mut p in std::mem::take(&mut state.power_ups) {
        state.timers.cancel_slot(&mut p.expiry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::EnemySnake;
    use crate::sim::grid::{Direction, Grid};
    use crate::sim::state::Snake;
    use glam::IVec2;

    #[test]
    fn test_food_avoids_everything() {
        let mut state = GameState::new(Grid::new(10, 10), 3);
        state.obstacles = vec![IVec2::new(1, 1), IVec2::new(8, 8)];
        state.enemies = vec![EnemySnake {
            segments: vec![IVec2::new(6, 6), IVec2::new(6, 7)],
            direction: Direction::Up,
        }];
        for _ in 0..200 {
            let food = place_food(&mut state).expect("room for food");
            assert!(!state.snake.occupies(food));
            assert!(!state.obstacles.contains(&food));
            assert!(!state.is_enemy(food));
            assert!(state.power_ups.iter().all(|p| p.cell != food));
            clear_power_ups(&mut state);
        }
    }

    #[test]
    fn test_fallback_finds_last_free_cell() {
        let grid = Grid::new(8, 8);
        let mut state = GameState::new(grid, 5);
        let last = IVec2::new(7, 7);
        let mut cells: Vec<Cell> = grid.cells().filter(|&c| c != last).collect();
        // Snake covers all but one cell
        cells.reverse();
        state.snake = Snake::from_cells(cells, Direction::Left);
        assert_eq!(find_free_cell(&mut state), Some(last));
    }

    #[test]
    fn test_full_board_yields_none() {
        let grid = Grid::new(8, 8);
        let mut state = GameState::new(grid, 5);
        state.snake = Snake::from_cells(grid.cells(), Direction::Left);
        assert_eq!(find_free_cell(&mut state), None);
        assert_eq!(place_food(&mut state), None);
        assert!(state.power_ups.is_empty());
    }

    #[test]
    fn test_power_up_expires_after_lifetime() {
        let mut state = GameState::new(Grid::new(10, 10), 8);
        let id = place_power_up(&mut state, PowerUpKind::Grow).expect("placed");
        assert_eq!(state.power_ups.len(), 1);

        let mut fired = Vec::new();
        while let Some(ev) = state.timers.pop_due(10_000) {
            fired.push((state.timers.now_ms(), ev));
            if let TimerEvent::PickupExpired(id) = ev {
                expire_power_up(&mut state, id);
            }
        }
        assert_eq!(fired, vec![(10_000, TimerEvent::PickupExpired(id))]);
        assert!(state.power_ups.is_empty());
    }

    #[test]
    fn test_remove_cancels_expiry() {
        let mut state = GameState::new(Grid::new(10, 10), 8);
        let id = place_power_up(&mut state, PowerUpKind::SpeedBoost).expect("placed");
        assert!(remove_power_up(&mut state, id).is_some());
        assert!(state.timers.is_empty());
        assert!(remove_power_up(&mut state, id).is_none());
    }
}
