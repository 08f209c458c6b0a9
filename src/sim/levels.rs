//! Level catalog
//!
//! 100 levels: four hand-authored openers, five procedurally scaled bands
//! (5-20, 21-40, 41-60, 61-80, 81-99) and a fixed final level. The table is
//! built once on first use and shared read-only afterwards.

use std::sync::OnceLock;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::Cell;
use crate::consts::LEVEL_COUNT;

/// How a level lays out its static obstacles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObstacleSpec {
    /// Hand-placed cells
    Fixed(Vec<Cell>),
    /// Generated at level start with the given target count
    Random { count: usize },
}

/// Immutable definition of one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// 1-based level number
    pub index: u32,
    pub name: String,
    pub description: String,
    /// Tick period in milliseconds (lower is faster)
    pub speed_ms: u64,
    pub obstacles: ObstacleSpec,
    /// Score per food item
    pub food_worth: u64,
    /// Chance to spawn a power-up alongside each food item (may exceed 1.0)
    pub power_up_frequency: f64,
    pub enemy_count: u32,
}

impl Level {
    pub fn has_enemies(&self) -> bool {
        self.enemy_count > 0
    }

    /// Power-up roll probability clamped into `[0, 1]`
    pub fn power_up_chance(&self) -> f64 {
        self.power_up_frequency.clamp(0.0, 1.0)
    }

    /// Score at which this level is cleared
    pub fn score_threshold(&self) -> u64 {
        self.index as u64 * crate::consts::POINTS_PER_LEVEL
    }
}

/// The full table of levels
#[derive(Debug, Clone)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl LevelCatalog {
    /// Process-wide catalog, generated on first access
    pub fn global() -> &'static LevelCatalog {
        static CATALOG: OnceLock<LevelCatalog> = OnceLock::new();
        CATALOG.get_or_init(LevelCatalog::generate)
    }

    /// Build every level definition
    pub fn generate() -> Self {
        let mut levels = Vec::with_capacity(LEVEL_COUNT as usize);

        levels.push(Level {
            index: 1,
            name: "Classic".into(),
            description: "The classic snake game".into(),
            speed_ms: 130,
            obstacles: ObstacleSpec::Fixed(Vec::new()),
            food_worth: 10,
            power_up_frequency: 0.2,
            enemy_count: 0,
        });
        levels.push(Level {
            index: 2,
            name: "Speedy".into(),
            description: "Everything moves faster!".into(),
            speed_ms: 110,
            obstacles: ObstacleSpec::Fixed(Vec::new()),
            food_worth: 15,
            power_up_frequency: 0.25,
            enemy_count: 0,
        });
        levels.push(Level {
            index: 3,
            name: "First Obstacle".into(),
            description: "Your first obstacle".into(),
            speed_ms: 125,
            obstacles: ObstacleSpec::Fixed(vec![IVec2::new(12, 12)]),
            food_worth: 15,
            power_up_frequency: 0.25,
            enemy_count: 0,
        });
        levels.push(Level {
            index: 4,
            name: "Victory Lap".into(),
            description: "Celebration level".into(),
            speed_ms: 100,
            obstacles: ObstacleSpec::Fixed(Vec::new()),
            food_worth: 100,
            power_up_frequency: 1.0,
            enemy_count: 0,
        });

        for i in 5..LEVEL_COUNT {
            levels.push(banded_level(i));
        }

        levels.push(Level {
            index: LEVEL_COUNT,
            name: "Snake Master".into(),
            description: "You've reached the final challenge!".into(),
            speed_ms: 40,
            obstacles: ObstacleSpec::Random { count: 10 },
            food_worth: 200,
            power_up_frequency: 1.0,
            enemy_count: 6,
        });

        debug_assert_eq!(levels.len(), LEVEL_COUNT as usize);
        Self { levels }
    }

    /// Look up a level; anything outside `1..=100` falls back to level 1
    pub fn get(&self, index: u32) -> &Level {
        index
            .checked_sub(1)
            .and_then(|i| self.levels.get(i as usize))
            .unwrap_or(&self.levels[0])
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Highest level number
    pub fn last_index(&self) -> u32 {
        self.levels.len() as u32
    }

    pub fn iter(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }
}

/// Procedural definition for levels 5..=99
fn banded_level(i: u32) -> Level {
    let f = i as f64 / 100.0;
    let sub = |from: u32, by: u32| (i - from) / by;

    let (name, obstacles, speed, frequency, worth, enemies) = match i {
        5..=20 => (
            format!("Obstacle Stage {}", i - 4),
            sub(2, 2),
            130u64.saturating_sub(((i - 3) * 2) as u64).max(90),
            0.25 + f,
            10 + i,
            0,
        ),
        21..=40 => (
            format!("Challenge {}", i - 20),
            8 + sub(20, 2),
            95u64.saturating_sub((i - 20) as u64).max(75),
            0.3 + f,
            20 + i,
            0,
        ),
        41..=60 => (
            format!("Expert Stage {}", i - 40),
            15 + sub(40, 2),
            80u64.saturating_sub(sub(40, 2) as u64).max(60),
            0.4 + f,
            30 + i,
            0,
        ),
        61..=80 => (
            format!("Enemy Territory {}", i - 60),
            12 + sub(60, 3),
            75u64.saturating_sub(sub(60, 3) as u64).max(60),
            0.5 + f,
            40 + i,
            (sub(60, 6) + 1).min(3),
        ),
        _ => (
            format!("Master Challenge {}", i - 80),
            8 + sub(80, 2),
            65u64.saturating_sub(sub(80, 4) as u64).max(50),
            0.6 + f,
            50 + i,
            (sub(80, 4) + 3).min(5),
        ),
    };

    let description = match i {
        5..=20 => format!("Navigate through {obstacles} obstacles"),
        21..=40 => format!("Dodge {obstacles} obstacles at high speed"),
        41..=60 => format!("For skilled players only! {obstacles} obstacles!"),
        61..=80 => format!("Watch out for {enemies} red snakes!"),
        _ => format!("The ultimate test: {obstacles} obstacles and {enemies} enemies!"),
    };

    Level {
        index: i,
        name,
        description,
        speed_ms: speed,
        obstacles: ObstacleSpec::Random {
            count: obstacles as usize,
        },
        food_worth: worth as u64,
        power_up_frequency: frequency,
        enemy_count: enemies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle_count(level: &Level) -> usize {
        match &level.obstacles {
            ObstacleSpec::Fixed(cells) => cells.len(),
            ObstacleSpec::Random { count } => *count,
        }
    }

    #[test]
    fn test_catalog_has_every_level_in_order() {
        let catalog = LevelCatalog::generate();
        assert_eq!(catalog.len(), 100);
        for (i, level) in catalog.iter().enumerate() {
            assert_eq!(level.index, i as u32 + 1);
        }
    }

    #[test]
    fn test_out_of_range_falls_back_to_first() {
        let catalog = LevelCatalog::global();
        assert_eq!(catalog.get(0).index, 1);
        assert_eq!(catalog.get(101).index, 1);
        assert_eq!(catalog.get(u32::MAX).index, 1);
        assert_eq!(catalog.get(100).index, 100);
    }

    #[test]
    fn test_hand_authored_openers() {
        let catalog = LevelCatalog::generate();
        assert_eq!(catalog.get(1).speed_ms, 130);
        assert_eq!(catalog.get(2).food_worth, 15);
        assert_eq!(
            catalog.get(3).obstacles,
            ObstacleSpec::Fixed(vec![IVec2::new(12, 12)])
        );
        assert_eq!(catalog.get(4).food_worth, 100);
        assert!((catalog.get(4).power_up_frequency - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_band_values() {
        let catalog = LevelCatalog::generate();

        let l5 = catalog.get(5);
        assert_eq!(obstacle_count(l5), 1);
        assert_eq!(l5.speed_ms, 126);
        assert_eq!(l5.food_worth, 15);

        let l20 = catalog.get(20);
        assert_eq!(obstacle_count(l20), 9);
        assert_eq!(l20.speed_ms, 96);

        let l40 = catalog.get(40);
        assert_eq!(obstacle_count(l40), 18);
        assert_eq!(l40.speed_ms, 75);

        let l60 = catalog.get(60);
        assert_eq!(obstacle_count(l60), 25);
        assert_eq!(l60.speed_ms, 70);
        assert!(!l60.has_enemies());

        let l61 = catalog.get(61);
        assert_eq!(l61.enemy_count, 1);
        assert_eq!(obstacle_count(l61), 12);

        let l80 = catalog.get(80);
        assert_eq!(l80.enemy_count, 3);

        let l99 = catalog.get(99);
        assert_eq!(l99.enemy_count, 5);
        assert_eq!(l99.speed_ms, 61);
        assert_eq!(l99.food_worth, 149);

        let last = catalog.get(100);
        assert_eq!(last.speed_ms, 40);
        assert_eq!(last.enemy_count, 6);
        assert_eq!(obstacle_count(last), 10);
    }

    #[test]
    fn test_speed_never_below_band_floor() {
        let catalog = LevelCatalog::generate();
        for level in catalog.iter().filter(|l| l.index < 100) {
            assert!(level.speed_ms >= 50, "level {} too fast", level.index);
        }
        // Enemies only show up from band 61 on
        assert!(catalog.iter().filter(|l| l.index <= 60).all(|l| !l.has_enemies()));
        assert!(catalog.iter().filter(|l| l.index > 60).all(|l| l.has_enemies()));
    }

    #[test]
    fn test_power_up_chance_is_clamped() {
        let catalog = LevelCatalog::generate();
        let l90 = catalog.get(90);
        assert!(l90.power_up_frequency > 1.0);
        assert_eq!(l90.power_up_chance(), 1.0);
    }
}
