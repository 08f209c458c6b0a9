//! Input mapping
//!
//! Browser key names and touch swipes become `Intent`s; the session decides
//! what each intent does in the current phase.

use glam::Vec2;

use crate::sim::Direction;

/// Minimum swipe travel (px) before it counts as a turn
pub const SWIPE_THRESHOLD: f32 = 50.0;

/// What the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Steer(Direction),
    TogglePause,
    /// Demo mode on/off
    ToggleAutopilot,
}

/// Map a `KeyboardEvent.key` value
pub fn map_key(key: &str) -> Option<Intent> {
    let intent = match key {
        "ArrowUp" | "w" | "W" => Intent::Steer(Direction::Up),
        "ArrowDown" | "s" | "S" => Intent::Steer(Direction::Down),
        "ArrowLeft" | "a" | "A" => Intent::Steer(Direction::Left),
        "ArrowRight" | "d" | "D" => Intent::Steer(Direction::Right),
        "p" | "P" => Intent::TogglePause,
        "i" | "I" => Intent::ToggleAutopilot,
        _ => return None,
    };
    Some(intent)
}

/// Direction of a swipe from `start` to `end` (screen space, y down)
pub fn swipe_direction(start: Vec2, end: Vec2) -> Option<Direction> {
    let delta = end - start;
    if delta.x.abs() > delta.y.abs() {
        if delta.x > SWIPE_THRESHOLD {
            Some(Direction::Right)
        } else if delta.x < -SWIPE_THRESHOLD {
            Some(Direction::Left)
        } else {
            None
        }
    } else if delta.y > SWIPE_THRESHOLD {
        Some(Direction::Down)
    } else if delta.y < -SWIPE_THRESHOLD {
        Some(Direction::Up)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_and_wasd_keys() {
        assert_eq!(map_key("ArrowUp"), Some(Intent::Steer(Direction::Up)));
        assert_eq!(map_key("a"), Some(Intent::Steer(Direction::Left)));
        assert_eq!(map_key("D"), Some(Intent::Steer(Direction::Right)));
        assert_eq!(map_key("s"), Some(Intent::Steer(Direction::Down)));
        assert_eq!(map_key("P"), Some(Intent::TogglePause));
        assert_eq!(map_key("Enter"), None);
    }

    #[test]
    fn test_swipes() {
        let origin = Vec2::new(100.0, 100.0);
        assert_eq!(
            swipe_direction(origin, Vec2::new(180.0, 110.0)),
            Some(Direction::Right)
        );
        assert_eq!(
            swipe_direction(origin, Vec2::new(90.0, 20.0)),
            Some(Direction::Up)
        );
        // Too short to count
        assert_eq!(swipe_direction(origin, Vec2::new(130.0, 100.0)), None);
    }
}
