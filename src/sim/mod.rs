//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Virtual clock only (the scheduler), no wall time
//! - Seeded RNG only
//! - Timers fire in `(due, scheduling order)`
//! - No rendering, audio or storage dependencies: side effects leave as
//!   `GameEvent`s

pub mod autopilot;
pub mod collision;
pub mod enemy;
pub mod grid;
pub mod levels;
pub mod obstacles;
pub mod powerup;
pub mod scheduler;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod transition;

pub use enemy::EnemySnake;
pub use grid::{Cell, Direction, Grid};
pub use levels::{Level, LevelCatalog, ObstacleSpec};
pub use powerup::{ActivePowerUp, PowerUp, PowerUpKind};
pub use scheduler::{Scheduler, TimerEvent, TimerId};
pub use state::{Collision, GameEvent, GamePhase, GameState, Snake};
pub use tick::{advance, handle_timer, tick};
