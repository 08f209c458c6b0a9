//! Demo autopilot
//!
//! Greedy steering used by the idle/demo mode: among the headings that do not
//! reverse onto the neck and do not hit anything, take the one that lands
//! closest (on the torus) to the food.

use super::collision;
use super::grid::Direction;
use super::state::GameState;

/// Pick a heading for the next tick, or `None` when every option is fatal
pub fn choose_direction(state: &GameState) -> Option<Direction> {
    let head = state.snake.head();
    let current = state.snake.direction;
    let target = state
        .food
        .or_else(|| state.power_ups.first().map(|p| p.cell));

    Direction::ALL
        .into_iter()
        .filter(|&d| d != current.opposite())
        .map(|d| (d, state.grid.step(head, d)))
        .filter(|&(_, cell)| collision::check(state, cell).is_none())
        .min_by_key(|&(d, cell)| {
            let distance = target
                .map(|t| state.grid.wrapped_distance(cell, t))
                .unwrap_or(0);
            // Prefer going straight on ties
            (distance, d != current)
        })
        .map(|(d, _)| d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::Grid;
    use crate::sim::state::Snake;
    use glam::IVec2;

    #[test]
    fn test_heads_for_food() {
        let mut state = GameState::new(Grid::new(10, 10), 1);
        state.snake = Snake::from_cells(
            [IVec2::new(5, 5), IVec2::new(4, 5), IVec2::new(3, 5)],
            Direction::Right,
        );
        state.food = Some(IVec2::new(5, 2));
        assert_eq!(choose_direction(&state), Some(Direction::Up));

        state.food = Some(IVec2::new(8, 5));
        assert_eq!(choose_direction(&state), Some(Direction::Right));
    }

    #[test]
    fn test_avoids_obstacle() {
        let mut state = GameState::new(Grid::new(10, 10), 1);
        state.snake = Snake::from_cells(
            [IVec2::new(5, 5), IVec2::new(4, 5), IVec2::new(3, 5)],
            Direction::Right,
        );
        state.food = Some(IVec2::new(8, 5));
        state.obstacles.push(IVec2::new(6, 5));
        let dir = choose_direction(&state).expect("a safe heading");
        assert!(matches!(dir, Direction::Up | Direction::Down));
    }

    #[test]
    fn test_trapped_returns_none() {
        let mut state = GameState::new(Grid::new(10, 10), 1);
        state.snake = Snake::from_cells(
            [IVec2::new(5, 5), IVec2::new(4, 5)],
            Direction::Right,
        );
        state.obstacles = vec![IVec2::new(6, 5), IVec2::new(5, 4), IVec2::new(5, 6)];
        assert_eq!(choose_direction(&state), None);
    }
}
