//! Instance identifiers and the static grid layout.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Stable index of one grid instance (`0..rows * cols`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Index into the store's columns.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Row/column position of an instance in the grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct GridCoord {
    /// Zero-based row.
    pub row: u32,
    /// Zero-based column.
    pub col: u32,
}

impl GridCoord {
    /// Coordinate at `(row, col)`.
    #[must_use]
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Bidirectional `id <-> coord` lookup, assigned row-major at construction.
#[derive(Debug, Clone)]
pub struct GridIndex {
    rows: u32,
    cols: u32,
    id_to_coord: FxHashMap<InstanceId, GridCoord>,
    coord_to_id: FxHashMap<GridCoord, InstanceId>,
}

impl GridIndex {
    /// Build the lookup maps for an `rows x cols` grid.
    pub fn new(rows: u32, cols: u32) -> Self {
        let count = rows as usize * cols as usize;
        let mut id_to_coord = FxHashMap::default();
        let mut coord_to_id = FxHashMap::default();
        id_to_coord.reserve(count);
        coord_to_id.reserve(count);

        for row in 0..rows {
            for col in 0..cols {
                let id = InstanceId(row * cols + col);
                let coord = GridCoord::new(row, col);
                let _ = id_to_coord.insert(id, coord);
                let _ = coord_to_id.insert(coord, id);
            }
        }

        Self {
            rows,
            cols,
            id_to_coord,
            coord_to_id,
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Total instance count.
    pub fn len(&self) -> usize {
        self.id_to_coord.len()
    }

    /// Whether the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.id_to_coord.is_empty()
    }

    /// Grid position of `id`, if it belongs to this grid.
    pub fn coord(&self, id: InstanceId) -> Option<GridCoord> {
        self.id_to_coord.get(&id).copied()
    }

    /// Instance at `coord`, if inside the grid.
    pub fn id_at(&self, coord: GridCoord) -> Option<InstanceId> {
        self.coord_to_id.get(&coord).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_assignment() {
        let grid = GridIndex::new(3, 4);
        assert_eq!(grid.len(), 12);
        assert_eq!(grid.coord(InstanceId(0)), Some(GridCoord::new(0, 0)));
        assert_eq!(grid.coord(InstanceId(5)), Some(GridCoord::new(1, 1)));
        assert_eq!(grid.id_at(GridCoord::new(2, 3)), Some(InstanceId(11)));
    }

    #[test]
    fn lookups_are_inverse() {
        let grid = GridIndex::new(40, 15);
        for raw in 0..600 {
            let id = InstanceId(raw);
            let coord = grid.coord(id).unwrap();
            assert_eq!(grid.id_at(coord), Some(id));
        }
    }

    #[test]
    fn out_of_range_misses() {
        let grid = GridIndex::new(2, 2);
        assert_eq!(grid.coord(InstanceId(4)), None);
        assert_eq!(grid.id_at(GridCoord::new(2, 0)), None);
        assert_eq!(grid.id_at(GridCoord::new(0, 2)), None);
    }
}
