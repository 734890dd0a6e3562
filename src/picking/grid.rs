use glam::Vec2;

use super::HitTest;
use crate::store::{GridCoord, InstanceId};

/// Screen-space hit test for an axis-aligned grid of equal cells.
///
/// Row 0 is at `origin.y` and rows grow downward; ids are row-major,
/// matching [`GridIndex`](crate::store::GridIndex). Positions in the gaps
/// between cells, or outside the grid, miss.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridHitTest {
    /// Top-left corner of cell `(0, 0)`.
    pub origin: Vec2,
    /// Width and height of one cell.
    pub cell_size: Vec2,
    /// Spacing between neighbouring cells.
    pub gap: f32,
    /// Number of rows.
    pub rows: u32,
    /// Number of columns.
    pub cols: u32,
}

impl GridHitTest {
    /// Gapless grid starting at the origin.
    pub fn new(rows: u32, cols: u32, cell_size: Vec2) -> Self {
        Self {
            origin: Vec2::ZERO,
            cell_size,
            gap: 0.0,
            rows,
            cols,
        }
    }

    /// Set the spacing between cells.
    #[must_use]
    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap.max(0.0);
        self
    }

    /// Move the grid's top-left corner.
    #[must_use]
    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.origin = origin;
        self
    }

    fn pitch(&self) -> Vec2 {
        self.cell_size + Vec2::splat(self.gap)
    }

    /// Centre of the cell at `coord`, in screen space.
    pub fn cell_center(&self, coord: GridCoord) -> Vec2 {
        self.origin
            + Vec2::new(coord.col as f32, coord.row as f32) * self.pitch()
            + self.cell_size * 0.5
    }

    /// Cell containing `pointer`, if any.
    pub fn coord_at(&self, pointer: Vec2) -> Option<GridCoord> {
        let local = pointer - self.origin;
        let pitch = self.pitch();
        if local.x < 0.0
            || local.y < 0.0
            || pitch.x <= 0.0
            || pitch.y <= 0.0
        {
            return None;
        }

        let cell = (local / pitch).floor();
        let (col, row) = (cell.x as u32, cell.y as u32);
        if col >= self.cols || row >= self.rows {
            return None;
        }

        let within = local - cell * pitch;
        if within.x >= self.cell_size.x || within.y >= self.cell_size.y {
            return None;
        }
        Some(GridCoord::new(row, col))
    }
}

impl HitTest for GridHitTest {
    fn hit_test(&self, pointer: Vec2) -> Option<InstanceId> {
        self.coord_at(pointer)
            .map(|c| InstanceId(c.row * self.cols + c.col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_cells_row_major() {
        let grid = GridHitTest::new(2, 3, Vec2::splat(10.0));
        assert_eq!(grid.hit_test(Vec2::new(5.0, 5.0)), Some(InstanceId(0)));
        assert_eq!(grid.hit_test(Vec2::new(25.0, 5.0)), Some(InstanceId(2)));
        assert_eq!(grid.hit_test(Vec2::new(15.0, 15.0)), Some(InstanceId(4)));
    }

    #[test]
    fn misses_outside_and_in_gaps() {
        let grid = GridHitTest::new(2, 2, Vec2::splat(10.0))
            .with_gap(2.0)
            .with_origin(Vec2::new(100.0, 50.0));
        assert_eq!(grid.hit_test(Vec2::new(99.0, 55.0)), None);
        assert_eq!(grid.hit_test(Vec2::new(111.0, 55.0)), None);
        assert_eq!(grid.hit_test(Vec2::new(113.0, 55.0)), Some(InstanceId(1)));
        assert_eq!(grid.hit_test(Vec2::new(105.0, 200.0)), None);
    }

    #[test]
    fn cell_center_round_trips() {
        let grid = GridHitTest::new(40, 15, Vec2::new(12.0, 8.0)).with_gap(1.5);
        let coord = GridCoord::new(17, 9);
        assert_eq!(grid.coord_at(grid.cell_center(coord)), Some(coord));
    }

    #[test]
    fn closures_are_hit_tests() {
        let always_three = |_: Vec2| Some(InstanceId(3));
        assert_eq!(always_three.hit_test(Vec2::ZERO), Some(InstanceId(3)));
    }
}
