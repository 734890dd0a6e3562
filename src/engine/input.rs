//! Pointer input for GridEngine

use web_time::Instant;

use super::GridEngine;
use crate::input::InputEvent;
use crate::picking::HitTest;
use crate::store::InstanceId;

impl GridEngine {
    /// Process a platform-agnostic pointer event.
    ///
    /// `hit_test` resolves pointer positions to instances; the engine is
    /// agnostic to how (screen grid, 3D ray-cast, ...). A click that
    /// admits an instance also re-arms the auto-selector so it waits a
    /// full period before stepping in again.
    ///
    /// Returns the instance admitted by a click, if any.
    ///
    /// # Example
    ///
    /// ```ignore
    /// engine.handle_input(InputEvent::CursorMoved { x, y }, &hit_test, now);
    /// ```
    pub fn handle_input<H: HitTest + ?Sized>(
        &mut self,
        event: InputEvent,
        hit_test: &H,
        now: Instant,
    ) -> Option<InstanceId> {
        let admitted = self.interaction.handle_event(
            event,
            hit_test,
            &mut self.scheduler,
            now,
        );
        if let Some(id) = admitted {
            log::debug!("{id} admitted by click");
            self.selector.notify_user_activity(now);
        }
        admitted
    }
}
