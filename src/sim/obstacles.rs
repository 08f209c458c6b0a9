//! Static obstacle layout
//!
//! Random layouts are rejection-sampled from the grid interior so that no two
//! obstacles sit closer than `OBSTACLE_SPACING` (Manhattan), which keeps paths
//! open between them. Each obstacle gets a bounded number of draws.

use rand::Rng;

use super::grid::{Cell, Grid, manhattan};
use super::levels::{Level, ObstacleSpec};
use crate::consts::{OBSTACLE_ATTEMPTS, OBSTACLE_MARGIN, OBSTACLE_SPACING};

/// Generate up to `count` spaced obstacles, none of them on `keep_clear`.
///
/// A draw landing on `keep_clear` is rejected like a too-close one. An
/// obstacle that cannot be placed within `OBSTACLE_ATTEMPTS` draws is dropped,
/// so the result may be shorter than `count` on crowded grids.
pub fn generate<R: Rng + ?Sized>(
    grid: &Grid,
    count: usize,
    level_index: u32,
    keep_clear: &[Cell],
    rng: &mut R,
) -> Vec<Cell> {
    let mut placed: Vec<Cell> = Vec::with_capacity(count);

    for _ in 0..count {
        let mut accepted = None;
        for _ in 0..OBSTACLE_ATTEMPTS {
            let candidate = grid.random_interior_cell(rng, OBSTACLE_MARGIN);
            if !keep_clear.contains(&candidate)
                && placed
                    .iter()
                    .all(|&other| manhattan(candidate, other) >= OBSTACLE_SPACING)
            {
                accepted = Some(candidate);
                break;
            }
        }

        match accepted {
            Some(cell) => placed.push(cell),
            None => log::debug!(
                "Level {}: gave up on obstacle {} after {} attempts",
                level_index,
                placed.len() + 1,
                OBSTACLE_ATTEMPTS
            ),
        }
    }

    if placed.len() < count {
        log::info!(
            "Level {}: placed {}/{} obstacles",
            level_index,
            placed.len(),
            count
        );
    }
    placed
}

/// Build the obstacle set for a level.
///
/// Hand-placed cells that fall off a small grid or onto `keep_clear` (the
/// player's spawn lane) are discarded. Random layouts draw around the lane.
pub fn layout_for<R: Rng + ?Sized>(
    grid: &Grid,
    level: &Level,
    keep_clear: &[Cell],
    rng: &mut R,
) -> Vec<Cell> {
    match &level.obstacles {
        ObstacleSpec::Fixed(cells) => {
            let kept: Vec<Cell> = cells
                .iter()
                .copied()
                .filter(|c| grid.contains(*c) && !keep_clear.contains(c))
                .collect();
            if kept.len() < cells.len() {
                log::debug!(
                    "Level {}: dropped {} fixed obstacles off-grid or on the spawn lane",
                    level.index,
                    cells.len() - kept.len()
                );
            }
            kept
        }
        ObstacleSpec::Random { count } => generate(grid, *count, level.index, keep_clear, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::levels::LevelCatalog;
    use glam::IVec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn assert_spaced(cells: &[Cell]) {
        for (i, a) in cells.iter().enumerate() {
            for b in &cells[i + 1..] {
                assert!(manhattan(*a, *b) >= 3, "{a} and {b} are too close");
            }
        }
    }

    #[test]
    fn test_generate_exact_count_on_roomy_grid() {
        let grid = Grid::new(20, 35);
        let mut rng = Pcg32::seed_from_u64(1);
        let cells = generate(&grid, 12, 30, &[], &mut rng);
        assert_eq!(cells.len(), 12);
        assert_spaced(&cells);
        for c in &cells {
            assert!(c.x >= 2 && c.x < 18 && c.y >= 2 && c.y < 33);
        }
    }

    #[test]
    fn test_generate_terminates_when_crowded() {
        // 4x4 interior can hold only a handful of spaced obstacles
        let grid = Grid::new(8, 8);
        let mut rng = Pcg32::seed_from_u64(2);
        let cells = generate(&grid, 200, 50, &[], &mut rng);
        assert!(cells.len() < 200);
        assert!(!cells.is_empty());
        assert_spaced(&cells);
    }

    #[test]
    fn test_fixed_layout_clips_to_grid() {
        let catalog = LevelCatalog::generate();
        let mut rng = Pcg32::seed_from_u64(3);

        let big = Grid::new(20, 20);
        assert_eq!(
            layout_for(&big, catalog.get(3), &[], &mut rng),
            vec![IVec2::new(12, 12)]
        );

        let small = Grid::new(10, 10);
        assert!(layout_for(&small, catalog.get(3), &[], &mut rng).is_empty());
    }

    #[test]
    fn test_layout_keeps_spawn_lane_clear() {
        let catalog = LevelCatalog::generate();
        let mut rng = Pcg32::seed_from_u64(4);
        let grid = Grid::new(20, 20);
        let lane = [IVec2::new(12, 12)];
        assert!(layout_for(&grid, catalog.get(3), &lane, &mut rng).is_empty());
    }

    #[test]
    fn test_random_layout_draws_around_lane() {
        let catalog = LevelCatalog::generate();
        let level = catalog.get(30);
        let ObstacleSpec::Random { count } = &level.obstacles else {
            panic!("level 30 should have a random layout");
        };
        let grid = Grid::new(20, 35);
        // Three full interior rows off limits
        let lane: Vec<Cell> = (15..18)
            .flat_map(|y| (0..grid.cols).map(move |x| IVec2::new(x, y)))
            .collect();
        for seed in 0..20 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let cells = layout_for(&grid, level, &lane, &mut rng);
            assert_eq!(cells.len(), *count);
            assert!(cells.iter().all(|c| !lane.contains(c)));
            assert_spaced(&cells);
        }
    }

    proptest! {
        #[test]
        fn generated_obstacles_are_spaced(seed in any::<u64>(), count in 0usize..40, cols in 8i32..30, rows in 8i32..30) {
            let grid = Grid::new(cols, rows);
            let mut rng = Pcg32::seed_from_u64(seed);
            let cells = generate(&grid, count, 10, &[], &mut rng);
            prop_assert!(cells.len() <= count);
            for (i, a) in cells.iter().enumerate() {
                prop_assert!(grid.contains(*a));
                for b in &cells[i + 1..] {
                    prop_assert!(manhattan(*a, *b) >= OBSTACLE_SPACING);
                }
            }
        }
    }
}
