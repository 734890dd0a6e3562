//! Converts raw pointer events into hover and click transitions.
//!
//! The `InteractionLayer` owns all transient pointer state (position,
//! hovered instance, press target). It only flips hover flags and
//! forwards clicks; every legality decision is the scheduler's
//! [`can_interact`](crate::animation::Scheduler::can_interact).

use glam::Vec2;
use web_time::Instant;

use super::event::{CursorIcon, InputEvent, MouseButton};
use crate::animation::Scheduler;
use crate::picking::HitTest;
use crate::store::InstanceId;

/// Translates pointer input into scheduler hover/queue calls.
///
/// # Usage
///
/// ```ignore
/// // In the event loop:
/// if let Some(id) = layer.handle_event(event, &hit_test, &mut scheduler, now) {
///     log::info!("{id} admitted by click");
/// }
/// window.set_cursor(layer.cursor());
/// ```
#[derive(Debug, Default)]
pub struct InteractionLayer {
    /// Last known cursor position, `None` once it left the surface.
    pointer: Option<Vec2>,
    /// Interactable instance currently carrying our hover flag.
    hovered: Option<InstanceId>,
    /// Hovered instance at primary-button press.
    press_target: Option<InstanceId>,
    /// Whether the primary button is held.
    mouse_pressed: bool,
    cursor: CursorIcon,
}

impl InteractionLayer {
    /// Layer with nothing hovered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last cursor position on the surface.
    #[must_use]
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Instance currently hovered by this layer.
    #[must_use]
    pub fn hovered(&self) -> Option<InstanceId> {
        self.hovered
    }

    /// Cursor affordance for the host to display.
    #[must_use]
    pub fn cursor(&self) -> CursorIcon {
        self.cursor
    }

    /// Whether the primary button is held.
    #[must_use]
    pub fn mouse_pressed(&self) -> bool {
        self.mouse_pressed
    }

    /// Process one pointer event.
    ///
    /// Returns the instance admitted to the scheduler by a click, if any.
    pub fn handle_event<H: HitTest + ?Sized>(
        &mut self,
        event: InputEvent,
        hit_test: &H,
        scheduler: &mut Scheduler,
        now: Instant,
    ) -> Option<InstanceId> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                let pointer = Vec2::new(x, y);
                self.pointer = Some(pointer);
                self.update_hover(hit_test.hit_test(pointer), scheduler, now);
                None
            }
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed, scheduler, now)
            }
            InputEvent::CursorLeft => {
                self.pointer = None;
                self.press_target = None;
                self.mouse_pressed = false;
                self.update_hover(None, scheduler, now);
                None
            }
        }
    }

    /// Drop our hover flag, e.g. before the grid is torn down.
    pub fn release(&mut self, scheduler: &mut Scheduler, now: Instant) {
        self.pointer = None;
        self.press_target = None;
        self.mouse_pressed = false;
        self.update_hover(None, scheduler, now);
    }

    /// Move the hover flag to `hit`, respecting interactability.
    fn update_hover(
        &mut self,
        hit: Option<InstanceId>,
        scheduler: &mut Scheduler,
        now: Instant,
    ) {
        if hit.is_some() && hit == self.hovered {
            // Same instance; it may have stopped being interactable.
            self.refresh_cursor(scheduler);
            return;
        }

        if let Some(old) = self.hovered.take() {
            let _ = scheduler.hover_lost(old, now);
        }

        match hit {
            Some(id) if scheduler.can_interact(id) => {
                let _ = scheduler.hover_gained(id, now);
                self.hovered = Some(id);
                self.cursor = CursorIcon::Pointer;
            }
            _ => self.cursor = CursorIcon::Default,
        }
    }

    fn refresh_cursor(&mut self, scheduler: &Scheduler) {
        self.cursor = match self.hovered {
            Some(id) if scheduler.can_interact(id) => CursorIcon::Pointer,
            _ => CursorIcon::Default,
        };
    }

    /// Press records the hovered instance; release over the same instance
    /// is a click.
    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
        scheduler: &mut Scheduler,
        now: Instant,
    ) -> Option<InstanceId> {
        if button != MouseButton::Left {
            return None;
        }

        if pressed {
            self.mouse_pressed = true;
            self.press_target = self.hovered;
            return None;
        }

        self.mouse_pressed = false;
        let target = self.press_target.take()?;
        if self.hovered != Some(target) || !scheduler.can_interact(target) {
            return None;
        }

        let admitted = scheduler.add_to_queue(target, now);
        self.refresh_cursor(scheduler);
        admitted.then_some(target)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use web_time::Duration;

    use super::*;
    use crate::animation::AnimationTiming;
    use crate::picking::GridHitTest;
    use crate::store::{InstanceStore, RectangleState};

    fn setup() -> (InteractionLayer, Scheduler, GridHitTest, Instant) {
        let store = InstanceStore::new(1, 4, &[], Vec3::Z).unwrap();
        let t0 = Instant::now();
        let scheduler =
            Scheduler::with_epoch(store, AnimationTiming::new(1.0, 0.0), t0);
        let hit = GridHitTest::new(1, 4, Vec2::splat(10.0));
        (InteractionLayer::new(), scheduler, hit, t0)
    }

    fn move_to(x: f32) -> InputEvent {
        InputEvent::CursorMoved { x, y: 5.0 }
    }

    fn click(
        layer: &mut InteractionLayer,
        s: &mut Scheduler,
        hit: &GridHitTest,
        now: Instant,
    ) -> Option<InstanceId> {
        let press = InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        };
        let release = InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: false,
        };
        let _ = layer.handle_event(press, hit, s, now);
        layer.handle_event(release, hit, s, now)
    }

    #[test]
    fn hover_moves_between_instances() {
        let (mut layer, mut s, hit, t0) = setup();
        let now = t0 + Duration::from_millis(500);

        let _ = layer.handle_event(move_to(5.0), &hit, &mut s, now);
        assert_eq!(layer.hovered(), Some(InstanceId(0)));
        assert_eq!(layer.cursor(), CursorIcon::Pointer);
        assert_eq!(s.store().state(InstanceId(0)), Some(RectangleState::Hovered));
        assert_eq!(s.store().timestamp(InstanceId(0)), Some(0.5));

        let _ = layer.handle_event(move_to(15.0), &hit, &mut s, now);
        assert_eq!(s.store().state(InstanceId(0)), Some(RectangleState::Idle));
        assert!(!s.store().is_hovered(InstanceId(0)));
        assert_eq!(s.store().state(InstanceId(1)), Some(RectangleState::Hovered));
        assert_eq!(layer.hovered(), Some(InstanceId(1)));
    }

    #[test]
    fn leaving_clears_hover() {
        let (mut layer, mut s, hit, t0) = setup();
        let _ = layer.handle_event(move_to(25.0), &hit, &mut s, t0);
        let _ = layer.handle_event(InputEvent::CursorLeft, &hit, &mut s, t0);
        assert_eq!(layer.hovered(), None);
        assert_eq!(layer.pointer(), None);
        assert_eq!(layer.cursor(), CursorIcon::Default);
        assert_eq!(s.store().state(InstanceId(2)), Some(RectangleState::Idle));
    }

    #[test]
    fn miss_clears_hover() {
        let (mut layer, mut s, hit, t0) = setup();
        let _ = layer.handle_event(move_to(5.0), &hit, &mut s, t0);
        let _ = layer.handle_event(move_to(500.0), &hit, &mut s, t0);
        assert_eq!(layer.hovered(), None);
        assert_eq!(s.store().state(InstanceId(0)), Some(RectangleState::Idle));
    }

    #[test]
    fn click_admits_hovered_instance() {
        let (mut layer, mut s, hit, t0) = setup();
        let _ = layer.handle_event(move_to(5.0), &hit, &mut s, t0);
        assert_eq!(click(&mut layer, &mut s, &hit, t0), Some(InstanceId(0)));
        assert_eq!(
            s.store().state(InstanceId(0)),
            Some(RectangleState::Animating)
        );
        // Now in flight: no longer clickable.
        assert_eq!(layer.cursor(), CursorIcon::Default);
        assert_eq!(click(&mut layer, &mut s, &hit, t0), None);
    }

    #[test]
    fn press_and_release_on_different_cells_is_not_a_click() {
        let (mut layer, mut s, hit, t0) = setup();
        let _ = layer.handle_event(move_to(5.0), &hit, &mut s, t0);
        let press = InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        };
        let _ = layer.handle_event(press, &hit, &mut s, t0);
        assert!(layer.mouse_pressed());
        let _ = layer.handle_event(move_to(15.0), &hit, &mut s, t0);
        let release = InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: false,
        };
        assert_eq!(layer.handle_event(release, &hit, &mut s, t0), None);
        assert_eq!(s.queue_len(), 0);
        assert_eq!(s.animating_count(), 0);
    }

    #[test]
    fn non_interactable_instance_gets_no_hover() {
        let (mut layer, mut s, hit, t0) = setup();
        assert!(s.add_to_queue(InstanceId(3), t0));
        let _ = layer.handle_event(move_to(35.0), &hit, &mut s, t0);
        assert_eq!(layer.hovered(), None);
        assert_eq!(layer.cursor(), CursorIcon::Default);
        assert!(!s.store().is_hovered(InstanceId(3)));
        assert_eq!(click(&mut layer, &mut s, &hit, t0), None);
    }

    #[test]
    fn queued_instance_hovers_but_stays_queued() {
        let (mut layer, mut s, hit, t0) = setup();
        assert!(s.add_to_queue(InstanceId(0), t0));
        assert!(s.add_to_queue(InstanceId(1), t0));

        let _ = layer.handle_event(move_to(15.0), &hit, &mut s, t0);
        assert_eq!(layer.cursor(), CursorIcon::Pointer);
        assert!(s.store().is_hovered(InstanceId(1)));
        assert_eq!(s.store().state(InstanceId(1)), Some(RectangleState::Queued));

        // Already queued: the click is rejected.
        assert_eq!(click(&mut layer, &mut s, &hit, t0), None);
        assert_eq!(s.queue_len(), 1);

        let _ = layer.handle_event(InputEvent::CursorLeft, &hit, &mut s, t0);
        assert_eq!(s.store().state(InstanceId(1)), Some(RectangleState::Queued));
        assert!(!s.store().is_hovered(InstanceId(1)));
    }

    #[test]
    fn other_buttons_are_ignored() {
        let (mut layer, mut s, hit, t0) = setup();
        let _ = layer.handle_event(move_to(5.0), &hit, &mut s, t0);
        for pressed in [true, false] {
            let event = InputEvent::MouseButton {
                button: MouseButton::Right,
                pressed,
            };
            assert_eq!(layer.handle_event(event, &hit, &mut s, t0), None);
        }
        assert_eq!(s.animating_count(), 0);
    }
}
