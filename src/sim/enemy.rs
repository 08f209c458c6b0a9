//! Enemy snakes
//!
//! Red snakes that wander the board from level 61 on. They never eat; they
//! only block cells. Each one takes a random walk with wraparound, refusing to
//! step onto obstacles or the player's body.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::{Cell, Direction, Grid};
use super::state::{GameState, Snake};
use crate::consts::{ENEMY_MAX_LENGTH, ENEMY_START_LEVEL, ENEMY_TURN_CHANCE, OBSTACLE_MARGIN};

/// Draw colour for enemies, distinct from the player's green
pub const ENEMY_COLOR: &str = "#ff4757";

/// Respawn attempts when a fresh enemy lands on something
const SPAWN_ATTEMPTS: u32 = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySnake {
    /// Segments, head first
    pub segments: Vec<Cell>,
    pub direction: Direction,
}

impl EnemySnake {
    pub fn head(&self) -> Cell {
        self.segments[0]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.segments.contains(&cell)
    }

    pub fn color(&self) -> &'static str {
        ENEMY_COLOR
    }
}

/// Segment count for enemies on `level_index`: one more every ten levels past
/// 60, capped at three
pub fn enemy_length(level_index: u32) -> usize {
    let grown = level_index.saturating_sub(ENEMY_START_LEVEL) / 10 + 1;
    (grown as usize).min(ENEMY_MAX_LENGTH)
}

/// Create an enemy at a random interior cell with its body trailing downward
pub fn spawn<R: Rng + ?Sized>(grid: &Grid, level_index: u32, rng: &mut R) -> EnemySnake {
    let head = grid.random_interior_cell(rng, OBSTACLE_MARGIN);
    let segments = (0..enemy_length(level_index) as i32)
        .map(|i| grid.wrap(head + glam::IVec2::new(0, i)))
        .collect();
    EnemySnake {
        segments,
        direction: Direction::random(rng),
    }
}

/// Build the enemy roster for a level, re-rolling spawns that land on an
/// obstacle, the player or another enemy
pub fn roster<R: Rng + ?Sized>(
    grid: &Grid,
    level_index: u32,
    count: u32,
    obstacles: &[Cell],
    player: &Snake,
    rng: &mut R,
) -> Vec<EnemySnake> {
    let mut enemies: Vec<EnemySnake> = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let mut enemy = spawn(grid, level_index, rng);
        for _ in 0..SPAWN_ATTEMPTS {
            let blocked = enemy.segments.iter().any(|&c| {
                obstacles.contains(&c)
                    || player.occupies(c)
                    || enemies.iter().any(|e| e.occupies(c))
            });
            if !blocked {
                break;
            }
            enemy = spawn(grid, level_index, rng);
        }
        enemies.push(enemy);
    }
    enemies
}

/// Advance one enemy a single cell.
///
/// Occasionally picks a new heading. If the next cell is an obstacle or part of
/// the player's body behind the head, it turns randomly and stays put.
pub fn step<R: Rng + ?Sized>(
    enemy: &mut EnemySnake,
    grid: &Grid,
    obstacles: &[Cell],
    player: &Snake,
    rng: &mut R,
) -> bool {
    if rng.random_bool(ENEMY_TURN_CHANCE) {
        enemy.direction = Direction::random(rng);
    }

    let next = grid.step(enemy.head(), enemy.direction);
    if obstacles.contains(&next) || player.body_contains(next) {
        enemy.direction = Direction::random(rng);
        return false;
    }

    enemy.segments.insert(0, next);
    enemy.segments.pop();
    true
}

/// Enemy timer callback: move every enemy once
pub fn step_all(state: &mut GameState) {
    if !state.is_running() {
        return;
    }
    let GameState {
        enemies,
        grid,
        obstacles,
        snake,
        rng,
        ..
    } = state;
    for enemy in enemies.iter_mut() {
        step(enemy, grid, obstacles, snake, rng);
    }
    state.emit(super::state::GameEvent::Redraw);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_length_by_level() {
        assert_eq!(enemy_length(61), 1);
        assert_eq!(enemy_length(65), 1);
        assert_eq!(enemy_length(70), 2);
        assert_eq!(enemy_length(80), 3);
        assert_eq!(enemy_length(100), 3);
    }

    #[test]
    fn test_spawn_is_vertical_and_interior() {
        let grid = Grid::new(20, 35);
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..100 {
            let enemy = spawn(&grid, 85, &mut rng);
            assert_eq!(enemy.len(), 3);
            let head = enemy.head();
            assert!(head.x >= 2 && head.x < 18 && head.y >= 2 && head.y < 33);
            assert_eq!(enemy.segments[1], head + IVec2::new(0, 1));
            assert_eq!(enemy.segments[2], head + IVec2::new(0, 2));
        }
    }

    #[test]
    fn test_step_wraps_and_keeps_length() {
        let grid = Grid::new(10, 10);
        let player = Snake::from_cells([IVec2::new(5, 5)], Direction::Right);
        let mut rng = Pcg32::seed_from_u64(5);
        let mut enemy = EnemySnake {
            segments: vec![IVec2::new(9, 0), IVec2::new(9, 1)],
            direction: Direction::Right,
        };
        for _ in 0..200 {
            let before = enemy.len();
            step(&mut enemy, &grid, &[], &player, &mut rng);
            assert_eq!(enemy.len(), before);
            assert!(grid.contains(enemy.head()));
        }
    }

    #[test]
    fn test_step_blocked_by_obstacle_stays_put() {
        let grid = Grid::new(10, 10);
        let player = Snake::from_cells([IVec2::new(0, 0)], Direction::Right);
        // Walls on all four sides, so whatever the heading the enemy is blocked
        let start = IVec2::new(5, 5);
        let walls: Vec<Cell> = Direction::ALL.iter().map(|d| grid.step(start, *d)).collect();
        let mut enemy = EnemySnake {
            segments: vec![start],
            direction: Direction::Up,
        };
        let mut rng = Pcg32::seed_from_u64(9);
        for _ in 0..50 {
            assert!(!step(&mut enemy, &grid, &walls, &player, &mut rng));
            assert_eq!(enemy.segments, vec![start]);
        }
    }

    #[test]
    fn test_step_blocked_by_player_body_not_head() {
        let grid = Grid::new(10, 10);
        let start = IVec2::new(5, 5);
        let around: Vec<Cell> = Direction::ALL.iter().map(|d| grid.step(start, *d)).collect();

        // Player body surrounds the enemy
        let mut body = vec![IVec2::new(0, 9)];
        body.extend(around.iter().copied());
        let player = Snake::from_cells(body, Direction::Right);
        let mut rng = Pcg32::seed_from_u64(3);
        let mut enemy = EnemySnake {
            segments: vec![start],
            direction: Direction::Left,
        };
        assert!(!step(&mut enemy, &grid, &[], &player, &mut rng));

        // Only the player's head next to it: the enemy is free to move onto it
        let player = Snake::from_cells([IVec2::new(4, 5), IVec2::new(3, 5)], Direction::Right);
        let mut moved = false;
        for _ in 0..20 {
            moved |= step(&mut enemy, &grid, &[], &player, &mut rng);
        }
        assert!(moved);
    }

    #[test]
    fn test_step_all_only_moves_while_running() {
        let mut state = GameState::new(Grid::new(20, 35), 8);
        state.highest_unlocked = 100;
        crate::sim::transition::start_game(&mut state, 70);
        assert!(!state.enemies.is_empty());

        crate::sim::transition::toggle_pause(&mut state);
        state.drain_events();
        let before: Vec<Vec<Cell>> = state.enemies.iter().map(|e| e.segments.clone()).collect();
        for _ in 0..10 {
            step_all(&mut state);
        }
        let after: Vec<Vec<Cell>> = state.enemies.iter().map(|e| e.segments.clone()).collect();
        assert_eq!(before, after);
        assert!(state.drain_events().is_empty());

        crate::sim::transition::toggle_pause(&mut state);
        state.drain_events();
        step_all(&mut state);
        assert_eq!(
            state.drain_events(),
            vec![crate::sim::state::GameEvent::Redraw]
        );
    }

    #[test]
    fn test_roster_avoids_player_and_obstacles() {
        let grid = Grid::new(20, 35);
        let player = Snake::spawn(&grid);
        let obstacles = vec![IVec2::new(8, 8), IVec2::new(12, 20)];
        let mut rng = Pcg32::seed_from_u64(21);
        let enemies = roster(&grid, 100, 6, &obstacles, &player, &mut rng);
        assert_eq!(enemies.len(), 6);
        for e in &enemies {
            for c in &e.segments {
                assert!(!obstacles.contains(c));
                assert!(!player.occupies(*c));
            }
        }
    }
}
