//! Snake Levels - a 100-level grid snake arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, spawning, levels)
//! - `game`: Session driver wiring the simulation to its collaborators
//! - `frontend`: Render/audio/notification sink contracts
//! - `persistence`: Unlock watermark storage
//! - `platform`: Browser/native platform abstraction
//! - `settings`: Player preferences and grid configuration
//! - `web`: Browser entry point and Web Audio frontend (wasm32)

pub mod frontend;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use game::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Default grid dimensions (18px cells on a 360x640 portrait canvas)
    pub const DEFAULT_COLS: i32 = 20;
    pub const DEFAULT_ROWS: i32 = 35;
    /// Smallest grid the simulation accepts
    pub const MIN_GRID_SIZE: i32 = 8;

    /// Number of levels in the catalog
    pub const LEVEL_COUNT: u32 = 100;
    /// Score needed per level index to advance (level L ends at L * 100)
    pub const POINTS_PER_LEVEL: u64 = 100;

    /// Length of the player snake at level start
    pub const START_LENGTH: usize = 3;

    /// Obstacles keep this many cells away from every edge
    pub const OBSTACLE_MARGIN: i32 = 2;
    /// Minimum Manhattan distance between two obstacles
    pub const OBSTACLE_SPACING: i32 = 3;
    /// Rejection-sampling attempts per obstacle before giving up on it
    pub const OBSTACLE_ATTEMPTS: u32 = 50;

    /// Random draws before spawn placement falls back to a full scan
    pub const PLACEMENT_ATTEMPTS: u32 = 1_000;

    /// Enemy snakes step on their own fixed period (ms)
    pub const ENEMY_STEP_MS: u64 = 200;
    /// Chance per step that an enemy picks a new random heading
    pub const ENEMY_TURN_CHANCE: f64 = 0.1;
    /// Enemies appear from this level on
    pub const ENEMY_START_LEVEL: u32 = 60;
    /// Enemy snakes never grow beyond this
    pub const ENEMY_MAX_LENGTH: usize = 3;

    /// Unclaimed power-ups vanish after this long (ms)
    pub const POWER_UP_LIFETIME_MS: u64 = 10_000;
    /// Flat bonus for collecting any power-up
    pub const POWER_UP_BONUS: u64 = 5;

    /// Speed boost shortens the tick period by this much (ms)
    pub const SPEED_BOOST_DELTA_MS: u64 = 40;
    /// Fastest tick period a speed boost can reach (ms)
    pub const SPEED_BOOST_FLOOR_MS: u64 = 50;
    /// Segments added by the grow power-up
    pub const GROW_SEGMENTS: usize = 3;
    /// Score awarded by the grow power-up on top of the flat bonus
    pub const GROW_BONUS: u64 = 15;
}
