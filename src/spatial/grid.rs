//! Build placement grid
//!
//! Structures snap to the nearest grid intersection. Two entities occupy the
//! same cell when their positions snap to the same intersection.

use crate::core::types::Vec2;

/// Integer cell coordinates on the build grid
pub type Cell = (i32, i32);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildGrid {
    pub cell_size: f32,
}

impl BuildGrid {
    pub fn new(cell_size: f32) -> Self {
        Self { cell_size }
    }

    /// Nearest cell to a world position
    #[inline]
    pub fn world_to_cell(&self, pos: Vec2) -> Cell {
        let x = (pos.x / self.cell_size).round() as i32;
        let y = (pos.y / self.cell_size).round() as i32;
        (x, y)
    }

    /// World position of a cell's anchor
    #[inline]
    pub fn cell_origin(&self, cell: Cell) -> Vec2 {
        Vec2::new(cell.0 as f32 * self.cell_size, cell.1 as f32 * self.cell_size)
    }

    /// Snap a world position to its nearest cell anchor
    pub fn snap(&self, pos: Vec2) -> Vec2 {
        self.cell_origin(self.world_to_cell(pos))
    }

    pub fn same_cell(&self, a: Vec2, b: Vec2) -> bool {
        self.world_to_cell(a) == self.world_to_cell(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_rounds_to_nearest() {
        let grid = BuildGrid::new(40.0);
        assert_eq!(grid.snap(Vec2::new(45.0, 38.0)), Vec2::new(40.0, 40.0));
        assert_eq!(grid.snap(Vec2::new(61.0, 19.0)), Vec2::new(80.0, 0.0));
    }

    #[test]
    fn test_world_to_cell() {
        let grid = BuildGrid::new(40.0);
        assert_eq!(grid.world_to_cell(Vec2::new(1000.0, 1000.0)), (25, 25));
        assert_eq!(grid.world_to_cell(Vec2::new(0.0, 0.0)), (0, 0));
    }

    #[test]
    fn test_same_cell() {
        let grid = BuildGrid::new(40.0);
        assert!(grid.same_cell(Vec2::new(38.0, 41.0), Vec2::new(40.0, 40.0)));
        assert!(!grid.same_cell(Vec2::new(61.0, 40.0), Vec2::new(40.0, 40.0)));
    }
}
