/// Platform-agnostic pointer events.
///
/// These are fed into an [`InteractionLayer`](super::InteractionLayer)
/// together with a [`HitTest`](crate::picking::HitTest).
///
/// # Example
///
/// ```ignore
/// engine.handle_input(InputEvent::CursorMoved { x: 100.0, y: 200.0 }, &hit, now);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute screen position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Cursor left the hit-testable surface.
    CursorLeft,
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button.
    Left,
    /// Secondary (right) mouse button.
    Right,
    /// Middle mouse button (wheel click).
    Middle,
}

/// Cursor affordance the host should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorIcon {
    /// Nothing clickable under the pointer.
    #[default]
    Default,
    /// An interactable instance is under the pointer.
    Pointer,
}
