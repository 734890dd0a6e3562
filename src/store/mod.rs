//! Flat, column-oriented per-instance state.
//!
//! Every attribute lives in its own fixed-length array indexed by
//! [`InstanceId`], so the rendering collaborator can upload columns
//! straight into GPU buffers. Columns are never resized or reordered after
//! construction. Writes go through the scheduler (state, timing, queue)
//! and the interaction layer (hover); readers only get shared slices.

mod attribute;
mod grid;
mod state;

pub use attribute::{Attribute, DirtyFlags};
use glam::Vec3;
pub use grid::{GridCoord, GridIndex, InstanceId};
use serde::{Deserialize, Serialize};
pub use state::RectangleState;

use crate::error::TilecastError;

/// Static content attached to a grid cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct InstanceContent {
    /// Payload handed to the reached-target hook.
    pub label: String,
    /// Whether the auto-selector should prefer this instance.
    pub important: bool,
    /// Pin to `[row, col]`; unpinned entries fill free cells row-major.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cell: Option<[u32; 2]>,
}

impl InstanceContent {
    /// Unpinned content with the given label.
    pub fn new(label: impl Into<String>, important: bool) -> Self {
        Self {
            label: label.into(),
            important,
            cell: None,
        }
    }

    /// Pin this content to `(row, col)`.
    #[must_use]
    pub fn at(mut self, row: u32, col: u32) -> Self {
        self.cell = Some([row, col]);
        self
    }
}

/// Structure-of-arrays storage for every instance in the grid.
#[derive(Debug, Clone)]
pub struct InstanceStore {
    grid: GridIndex,
    state: Vec<RectangleState>,
    hover: Vec<u32>,
    timestamp: Vec<f32>,
    anim_start_time: Vec<f32>,
    animation_progress: Vec<f32>,
    queue_position: Vec<i32>,
    target_position: Vec<Vec3>,
    is_important: Vec<bool>,
    label: Vec<String>,
    dirty: DirtyFlags,
}

impl InstanceStore {
    /// Allocate a `rows x cols` grid, all instances `Idle` and aimed at
    /// `target`.
    ///
    /// Content entries with a `cell` are placed there; the remainder fill
    /// the free cells in row-major order.
    pub fn new(
        rows: u32,
        cols: u32,
        content: &[InstanceContent],
        target: Vec3,
    ) -> Result<Self, TilecastError> {
        if rows == 0 || cols == 0 {
            return Err(TilecastError::InvalidGrid(format!(
                "grid must have at least one row and column, got {rows}x{cols}"
            )));
        }
        let count = rows
            .checked_mul(cols)
            .ok_or_else(|| {
                TilecastError::InvalidGrid(format!(
                    "{rows}x{cols} overflows the instance id space"
                ))
            })? as usize;

        let grid = GridIndex::new(rows, cols);
        let (is_important, label) = place_content(&grid, content)?;

        Ok(Self {
            grid,
            state: vec![RectangleState::Idle; count],
            hover: vec![0; count],
            timestamp: vec![0.0; count],
            anim_start_time: vec![0.0; count],
            animation_progress: vec![0.0; count],
            queue_position: vec![-1; count],
            target_position: vec![target; count],
            is_important,
            label,
            dirty: DirtyFlags::all(),
        })
    }

    /// Number of instances.
    pub fn len(&self) -> usize {
        self.state.len()
    }

    /// Whether the store holds no instances (never true once built).
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Whether `id` indexes into this store.
    pub fn contains(&self, id: InstanceId) -> bool {
        id.index() < self.len()
    }

    /// Iterate every instance id.
    pub fn ids(&self) -> impl Iterator<Item = InstanceId> {
        (0..self.len() as u32).map(InstanceId)
    }

    /// Static grid layout.
    pub fn grid(&self) -> &GridIndex {
        &self.grid
    }

    /// Grid position of `id`.
    pub fn coord(&self, id: InstanceId) -> Option<GridCoord> {
        self.grid.coord(id)
    }

    /// Instance at `coord`.
    pub fn id_at(&self, coord: GridCoord) -> Option<InstanceId> {
        self.grid.id_at(coord)
    }

    // ── Per-instance reads ──

    /// Current lifecycle state.
    pub fn state(&self, id: InstanceId) -> Option<RectangleState> {
        self.state.get(id.index()).copied()
    }

    /// Whether the hover flag is set.
    pub fn is_hovered(&self, id: InstanceId) -> bool {
        self.hover.get(id.index()).is_some_and(|&h| h != 0)
    }

    /// Seconds since epoch of the last state-affecting event.
    pub fn timestamp(&self, id: InstanceId) -> Option<f32> {
        self.timestamp.get(id.index()).copied()
    }

    /// Seconds since epoch when the instance started animating.
    pub fn anim_start_time(&self, id: InstanceId) -> Option<f32> {
        self.anim_start_time.get(id.index()).copied()
    }

    /// Animation progress as of the last tick.
    pub fn animation_progress(&self, id: InstanceId) -> Option<f32> {
        self.animation_progress.get(id.index()).copied()
    }

    /// Position in the pending queue, `None` when not queued.
    pub fn queue_position(&self, id: InstanceId) -> Option<usize> {
        self.queue_position
            .get(id.index())
            .and_then(|&p| usize::try_from(p).ok())
    }

    /// Where the instance animates to.
    pub fn target_position(&self, id: InstanceId) -> Option<Vec3> {
        self.target_position.get(id.index()).copied()
    }

    /// Whether the instance carries important content.
    pub fn is_important(&self, id: InstanceId) -> bool {
        self.is_important.get(id.index()).copied().unwrap_or(false)
    }

    /// Content label (empty for cells without content).
    pub fn label(&self, id: InstanceId) -> &str {
        self.label.get(id.index()).map_or("", String::as_str)
    }

    // ── Column reads ──

    /// State column.
    pub fn states(&self) -> &[RectangleState] {
        &self.state
    }

    /// Hover column (`0`/`1`).
    pub fn hovers(&self) -> &[u32] {
        &self.hover
    }

    /// Timestamp column.
    pub fn timestamps(&self) -> &[f32] {
        &self.timestamp
    }

    /// Animation start-time column.
    pub fn anim_start_times(&self) -> &[f32] {
        &self.anim_start_time
    }

    /// Progress column.
    pub fn animation_progresses(&self) -> &[f32] {
        &self.animation_progress
    }

    /// Raw queue-position column (`-1` = not queued).
    pub fn queue_positions(&self) -> &[i32] {
        &self.queue_position
    }

    /// Target column.
    pub fn target_positions(&self) -> &[Vec3] {
        &self.target_position
    }

    /// A column as raw bytes, ready for a buffer upload.
    pub fn column_bytes(&self, attr: Attribute) -> &[u8] {
        match attr {
            Attribute::State => bytemuck::cast_slice(&self.state),
            Attribute::Hover => bytemuck::cast_slice(&self.hover),
            Attribute::Timestamp => bytemuck::cast_slice(&self.timestamp),
            Attribute::AnimStartTime => {
                bytemuck::cast_slice(&self.anim_start_time)
            }
            Attribute::AnimationProgress => {
                bytemuck::cast_slice(&self.animation_progress)
            }
            Attribute::QueuePosition => {
                bytemuck::cast_slice(&self.queue_position)
            }
            Attribute::TargetPosition => {
                bytemuck::cast_slice(&self.target_position)
            }
        }
    }

    // ── Dirty tracking ──

    /// Flag `attr` as changed since the last read.
    pub fn mark_dirty(&mut self, attr: Attribute) {
        self.dirty.insert(attr);
    }

    /// Whether `attr` changed since the last [`take_dirty`](Self::take_dirty).
    pub fn is_dirty(&self, attr: Attribute) -> bool {
        self.dirty.contains(attr)
    }

    /// Return the dirty set and clear it.
    pub fn take_dirty(&mut self) -> DirtyFlags {
        std::mem::take(&mut self.dirty)
    }

    // ── Writes (scheduler and interaction layer only) ──

    pub(crate) fn set_state(&mut self, id: InstanceId, state: RectangleState) {
        self.state[id.index()] = state;
        self.mark_dirty(Attribute::State);
    }

    pub(crate) fn set_hover(&mut self, id: InstanceId, hovered: bool) {
        self.hover[id.index()] = u32::from(hovered);
        self.mark_dirty(Attribute::Hover);
    }

    pub(crate) fn set_timestamp(&mut self, id: InstanceId, secs: f32) {
        self.timestamp[id.index()] = secs;
        self.mark_dirty(Attribute::Timestamp);
    }

    pub(crate) fn set_anim_start_time(&mut self, id: InstanceId, secs: f32) {
        self.anim_start_time[id.index()] = secs;
        self.mark_dirty(Attribute::AnimStartTime);
    }

    pub(crate) fn set_animation_progress(&mut self, id: InstanceId, t: f32) {
        self.animation_progress[id.index()] = t;
        self.mark_dirty(Attribute::AnimationProgress);
    }

    pub(crate) fn set_queue_position(
        &mut self,
        id: InstanceId,
        position: Option<usize>,
    ) {
        self.queue_position[id.index()] = position.map_or(-1, |p| p as i32);
        self.mark_dirty(Attribute::QueuePosition);
    }

    pub(crate) fn set_all_targets(&mut self, target: Vec3) {
        self.target_position.fill(target);
        self.mark_dirty(Attribute::TargetPosition);
    }
}

/// Resolve content entries to per-id importance and label columns.
fn place_content(
    grid: &GridIndex,
    content: &[InstanceContent],
) -> Result<(Vec<bool>, Vec<String>), TilecastError> {
    let count = grid.len();
    if content.len() > count {
        return Err(TilecastError::Content(format!(
            "{} content entries do not fit in {count} cells",
            content.len()
        )));
    }

    let mut slots: Vec<Option<&InstanceContent>> = vec![None; count];

    for entry in content {
        let Some([row, col]) = entry.cell else {
            continue;
        };
        let id = grid.id_at(GridCoord::new(row, col)).ok_or_else(|| {
            TilecastError::Content(format!(
                "\"{}\" pinned outside the grid at ({row}, {col})",
                entry.label
            ))
        })?;
        let slot = &mut slots[id.index()];
        if let Some(existing) = slot {
            return Err(TilecastError::Content(format!(
                "\"{}\" and \"{}\" both pinned to ({row}, {col})",
                existing.label, entry.label
            )));
        }
        *slot = Some(entry);
    }

    let mut free = (0..count).filter(|&i| slots[i].is_none()).collect::<Vec<_>>();
    free.reverse();
    for entry in content.iter().filter(|e| e.cell.is_none()) {
        // Length check above guarantees a free cell remains.
        if let Some(i) = free.pop() {
            slots[i] = Some(entry);
        }
    }

    Ok(slots
        .into_iter()
        .map(|slot| {
            slot.map_or((false, String::new()), |c| (c.important, c.label.clone()))
        })
        .unzip())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_store_is_idle_and_unqueued() {
        let store = InstanceStore::new(40, 15, &[], Vec3::Z).unwrap();
        assert_eq!(store.len(), 600);
        assert!(store.states().iter().all(|&s| s == RectangleState::Idle));
        assert!(store.queue_positions().iter().all(|&p| p == -1));
        assert!(store.target_positions().iter().all(|&t| t == Vec3::Z));
        assert_eq!(store.queue_position(InstanceId(7)), None);
    }

    #[test]
    fn empty_grid_is_rejected() {
        assert!(matches!(
            InstanceStore::new(0, 15, &[], Vec3::ZERO),
            Err(TilecastError::InvalidGrid(_))
        ));
    }

    #[test]
    fn pinned_content_lands_first_then_fills() {
        let content = vec![
            InstanceContent::new("a", false),
            InstanceContent::new("pinned", true).at(0, 0),
            InstanceContent::new("b", false),
        ];
        let store = InstanceStore::new(2, 2, &content, Vec3::ZERO).unwrap();
        assert_eq!(store.label(InstanceId(0)), "pinned");
        assert!(store.is_important(InstanceId(0)));
        assert_eq!(store.label(InstanceId(1)), "a");
        assert_eq!(store.label(InstanceId(2)), "b");
        assert_eq!(store.label(InstanceId(3)), "");
        assert!(!store.is_important(InstanceId(3)));
    }

    #[test]
    fn content_errors() {
        let too_many = vec![InstanceContent::default(); 5];
        assert!(InstanceStore::new(2, 2, &too_many, Vec3::ZERO).is_err());

        let outside = vec![InstanceContent::new("x", false).at(5, 0)];
        assert!(InstanceStore::new(2, 2, &outside, Vec3::ZERO).is_err());

        let clash = vec![
            InstanceContent::new("x", false).at(1, 1),
            InstanceContent::new("y", false).at(1, 1),
        ];
        assert!(InstanceStore::new(2, 2, &clash, Vec3::ZERO).is_err());
    }

    #[test]
    fn writes_mark_dirty_and_take_clears() {
        let mut store = InstanceStore::new(2, 2, &[], Vec3::ZERO).unwrap();
        assert_eq!(store.take_dirty(), DirtyFlags::all());
        assert!(store.take_dirty().is_empty());

        store.set_hover(InstanceId(1), true);
        assert!(store.is_dirty(Attribute::Hover));
        assert!(!store.is_dirty(Attribute::State));
        assert!(store.is_hovered(InstanceId(1)));

        let dirty = store.take_dirty();
        assert!(dirty.contains(Attribute::Hover));
        assert!(!store.is_dirty(Attribute::Hover));
    }

    #[test]
    fn column_bytes_match_column_widths() {
        let store = InstanceStore::new(3, 3, &[], Vec3::ONE).unwrap();
        assert_eq!(store.column_bytes(Attribute::State).len(), 9 * 4);
        assert_eq!(store.column_bytes(Attribute::QueuePosition).len(), 9 * 4);
        assert_eq!(store.column_bytes(Attribute::TargetPosition).len(), 9 * 12);
    }
}
