//! Pointer-to-instance resolution.
//!
//! The interaction layer never knows how a pointer maps onto the grid; it
//! asks a [`HitTest`]. Hosts with a 3D scene plug in a ray-cast, either as
//! a type implementing the trait or as a plain closure. [`GridHitTest`]
//! covers the flat screen-space layout.

mod grid;

use glam::Vec2;
pub use grid::GridHitTest;

use crate::store::InstanceId;

/// Maps a pointer position to the instance under it.
pub trait HitTest {
    /// Instance under `pointer`, or `None` for a miss.
    fn hit_test(&self, pointer: Vec2) -> Option<InstanceId>;
}

impl<F> HitTest for F
where
    F: Fn(Vec2) -> Option<InstanceId>,
{
    fn hit_test(&self, pointer: Vec2) -> Option<InstanceId> {
        self(pointer)
    }
}
