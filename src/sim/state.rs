//! Game state and core simulation types
//!
//! `GameState` is the single owner of everything the timers mutate: snakes,
//! food, obstacles, pickups, score and the timers themselves.

use std::collections::VecDeque;

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::enemy::EnemySnake;
use super::grid::{Cell, Direction, Grid};
use super::levels::{Level, LevelCatalog};
use super::powerup::{ActivePowerUp, PowerUp, PowerUpKind};
use super::scheduler::{Scheduler, TimerId};
use crate::consts::START_LENGTH;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level laid out, waiting for the player to start
    Ready,
    /// Timers running
    Running,
    /// Timers stopped by the player
    Paused,
    /// Run ended by a collision
    GameOver,
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    Obstacle,
    Enemy,
    SelfBite,
}

/// Signals raised by the simulation for the outside world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The playfield changed and should be drawn
    Redraw,
    /// Food eaten
    Ate { worth: u64, score: u64 },
    /// A pickup was collected (flat bonus already applied)
    PowerUpCollected { kind: PowerUpKind, score: u64 },
    /// An effect became active
    PowerUpActivated { kind: PowerUpKind },
    /// The active effect wore off or was replaced
    PowerUpEnded { kind: PowerUpKind },
    /// A level was laid out
    LevelStarted { level: u32 },
    /// Score threshold crossed, play continues on `level`
    LevelUp { level: u32 },
    /// Unlock watermark advanced
    Unlocked { highest: u32 },
    Paused,
    Resumed,
    GameOver {
        score: u64,
        level: u32,
        cause: Collision,
    },
}

/// The player snake: body cells head first plus heading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snake {
    body: VecDeque<Cell>,
    /// Heading applied on the last tick
    pub direction: Direction,
    /// Heading latched from input for the next tick
    pub pending: Direction,
}

impl Snake {
    /// Build a snake from explicit cells (head first)
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>, direction: Direction) -> Self {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        debug_assert!(!body.is_empty(), "snake needs at least one segment");
        Self {
            body,
            direction,
            pending: direction,
        }
    }

    /// Horizontal snake of `START_LENGTH` segments heading right, tail wrapped
    /// onto the grid
    pub fn spawn(grid: &Grid) -> Self {
        let head = IVec2::new(grid.cols / 4, grid.rows / 3);
        Self::from_cells(
            (0..START_LENGTH as i32).map(|i| grid.wrap(head - IVec2::new(i, 0))),
            Direction::Right,
        )
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<Cell> {
        self.body.iter().copied().collect()
    }

    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Does `cell` overlap any segment behind the head?
    pub fn body_contains(&self, cell: Cell) -> bool {
        self.body.iter().skip(1).any(|&c| c == cell)
    }

    /// Latch a new heading; reversals onto the neck are refused
    pub fn steer(&mut self, dir: Direction) -> bool {
        if dir == self.direction.opposite() {
            return false;
        }
        self.pending = dir;
        true
    }

    /// Push a new head; drop the tail unless growing
    pub fn advance(&mut self, head: Cell, grow: bool) {
        self.body.push_front(head);
        if !grow {
            self.body.pop_back();
        }
    }

    /// Stack `n` copies of the tail cell
    pub fn extend_tail(&mut self, n: usize) {
        let tail = self.tail();
        self.body.extend(std::iter::repeat_n(tail, n));
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub grid: Grid,
    pub phase: GamePhase,
    /// Current level (1-based)
    pub level: u32,
    pub score: u64,
    /// Unlock watermark
    pub highest_unlocked: u32,
    /// Current tick period (ms), including any speed boost
    pub speed_ms: u64,
    pub food_worth: u64,
    pub snake: Snake,
    /// `None` only when the grid has no free cell left
    pub food: Option<Cell>,
    pub obstacles: Vec<Cell>,
    pub enemies: Vec<EnemySnake>,
    /// Uncollected pickups on the field
    pub power_ups: Vec<PowerUp>,
    pub active: Option<ActivePowerUp>,
    /// Self-collision suppressed
    pub invulnerable: bool,
    pub dark_mode: bool,
    /// Demo mode: steer automatically each tick
    pub autopilot: bool,
    pub timers: Scheduler,
    pub tick_timer: Option<TimerId>,
    pub enemy_timer: Option<TimerId>,
    /// Player ticks simulated this run
    pub time_ticks: u64,
    /// Outbox drained by the session after every callback
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a state with an empty board; call `transition::new_game` to lay
    /// out a level
    pub fn new(grid: Grid, seed: u64) -> Self {
        let level = LevelCatalog::global().get(1);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            grid,
            phase: GamePhase::Ready,
            level: 1,
            score: 0,
            highest_unlocked: 1,
            speed_ms: level.speed_ms,
            food_worth: level.food_worth,
            snake: Snake::spawn(&grid),
            food: None,
            obstacles: Vec::new(),
            enemies: Vec::new(),
            power_ups: Vec::new(),
            active: None,
            invulnerable: false,
            dark_mode: false,
            autopilot: false,
            timers: Scheduler::new(),
            tick_timer: None,
            enemy_timer: None,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Definition of the level being played
    pub fn level_def(&self) -> &'static Level {
        LevelCatalog::global().get(self.level)
    }

    /// Definition for an arbitrary level (falls back to level 1)
    pub fn level_def_for(&self, level: u32) -> &'static Level {
        LevelCatalog::global().get(level)
    }

    /// Highest level in the catalog
    pub fn last_level(&self) -> u32 {
        LevelCatalog::global().last_index()
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.obstacles.contains(&cell)
    }

    pub fn is_enemy(&self, cell: Cell) -> bool {
        self.enemies.iter().any(|e| e.occupies(cell))
    }

    pub fn power_up_at(&self, cell: Cell) -> Option<usize> {
        self.power_ups.iter().position(|p| p.cell == cell)
    }

    /// Is anything at all sitting on `cell`?
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.snake.occupies(cell)
            || self.is_enemy(cell)
            || self.is_obstacle(cell)
            || self.food == Some(cell)
            || self.power_up_at(cell).is_some()
    }
}
