//! Grid geometry for the playfield
//!
//! Cells are integer `(x, y)` pairs on a `cols x rows` torus: stepping off one
//! edge re-enters on the opposite edge.

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A grid cell (x grows right, y grows down)
pub type Cell = IVec2;

/// Cardinal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit offset for one step
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Uniformly random direction
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Direction {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Playfield dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub cols: i32,
    pub rows: i32,
}

impl Grid {
    pub fn new(cols: i32, rows: i32) -> Self {
        debug_assert!(cols > 0 && rows > 0, "grid must be non-empty");
        Self { cols, rows }
    }

    /// Total number of cells
    pub fn area(&self) -> usize {
        (self.cols.max(0) as usize) * (self.rows.max(0) as usize)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.cols && cell.y >= 0 && cell.y < self.rows
    }

    /// Fold a cell back onto the torus
    #[inline]
    pub fn wrap(&self, cell: Cell) -> Cell {
        IVec2::new(cell.x.rem_euclid(self.cols), cell.y.rem_euclid(self.rows))
    }

    /// Neighbouring cell in `dir`, with wraparound
    #[inline]
    pub fn step(&self, cell: Cell, dir: Direction) -> Cell {
        self.wrap(cell + dir.delta())
    }

    /// Uniformly random cell anywhere on the grid
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        IVec2::new(rng.random_range(0..self.cols), rng.random_range(0..self.rows))
    }

    /// Uniformly random cell at least `margin` cells away from every edge.
    ///
    /// Grids too small to have an interior fall back to the whole grid.
    pub fn random_interior_cell<R: Rng + ?Sized>(&self, rng: &mut R, margin: i32) -> Cell {
        let span_x = self.cols - 2 * margin;
        let span_y = self.rows - 2 * margin;
        if span_x <= 0 || span_y <= 0 {
            return self.random_cell(rng);
        }
        IVec2::new(
            rng.random_range(0..span_x) + margin,
            rng.random_range(0..span_y) + margin,
        )
    }

    /// Row-major iterator over every cell
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.cols).map(move |x| IVec2::new(x, y)))
    }

    /// Shortest Manhattan distance on the torus
    pub fn wrapped_distance(&self, a: Cell, b: Cell) -> i32 {
        let dx = (a.x - b.x).abs();
        let dy = (a.y - b.y).abs();
        dx.min(self.cols - dx) + dy.min(self.rows - dy)
    }
}

/// Plain (non-wrapping) Manhattan distance
#[inline]
pub fn manhattan(a: Cell, b: Cell) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_wrap_all_edges() {
        let grid = Grid::new(10, 8);
        assert_eq!(grid.step(IVec2::new(9, 3), Direction::Right), IVec2::new(0, 3));
        assert_eq!(grid.step(IVec2::new(0, 3), Direction::Left), IVec2::new(9, 3));
        assert_eq!(grid.step(IVec2::new(4, 0), Direction::Up), IVec2::new(4, 7));
        assert_eq!(grid.step(IVec2::new(4, 7), Direction::Down), IVec2::new(4, 0));
    }

    #[test]
    fn test_opposite_is_involution() {
        for dir in Direction::ALL {
            assert_ne!(dir, dir.opposite());
            assert_eq!(dir, dir.opposite().opposite());
            assert_eq!(dir.delta() + dir.opposite().delta(), IVec2::ZERO);
        }
    }

    #[test]
    fn test_interior_respects_margin() {
        let grid = Grid::new(12, 9);
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let c = grid.random_interior_cell(&mut rng, 2);
            assert!(c.x >= 2 && c.x < 10, "x out of interior: {c}");
            assert!(c.y >= 2 && c.y < 7, "y out of interior: {c}");
        }
    }

    #[test]
    fn test_wrapped_distance() {
        let grid = Grid::new(10, 10);
        assert_eq!(grid.wrapped_distance(IVec2::new(0, 0), IVec2::new(9, 0)), 1);
        assert_eq!(grid.wrapped_distance(IVec2::new(2, 2), IVec2::new(5, 6)), 7);
        assert_eq!(manhattan(IVec2::new(0, 0), IVec2::new(9, 0)), 9);
    }

    proptest! {
        #[test]
        fn step_stays_on_grid(cols in 1i32..40, rows in 1i32..40, x in 0i32..40, y in 0i32..40, d in 0usize..4) {
            let grid = Grid::new(cols, rows);
            let start = IVec2::new(x % cols, y % rows);
            let next = grid.step(start, Direction::ALL[d]);
            prop_assert!(grid.contains(next));
            // Stepping back undoes the move
            prop_assert_eq!(grid.step(next, Direction::ALL[d].opposite()), start);
        }
    }
}
