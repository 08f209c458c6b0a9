//! Terminal collision checks for the player's next head cell
//!
//! Checked in a fixed order (obstacle, enemy, self) against the proposed head
//! before it is committed, so a move that both eats and dies always dies.

use super::grid::Cell;
use super::state::{Collision, GameState};

/// Would moving the head onto `head` end the run?
pub fn check(state: &GameState, head: Cell) -> Option<Collision> {
    if state.is_obstacle(head) {
        return Some(Collision::Obstacle);
    }
    if state.is_enemy(head) {
        return Some(Collision::Enemy);
    }
    if !state.invulnerable && state.snake.body_contains(head) {
        return Some(Collision::SelfBite);
    }
    None
}
