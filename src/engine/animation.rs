//! Per-frame tick for GridEngine

use web_time::Instant;

use super::GridEngine;

impl GridEngine {
    /// Advance every in-flight animation, admit from the queue, then give
    /// the auto-selector its turn.
    ///
    /// Call once per rendered frame with the frame's wall-clock time.
    /// Returns `true` while anything is animating or waiting, i.e. while
    /// the host should keep redrawing.
    pub fn tick(&mut self, now: Instant) -> bool {
        let busy = self.scheduler.update_animations(now);
        let picked = self.selector.poll(&mut self.scheduler, now);
        busy || picked.is_some()
    }
}
