//! Input handling: pointer event types and the interaction layer that
//! turns them into hover and click transitions.

/// Platform-agnostic input events.
pub mod event;
/// Hover tracking and click detection.
pub mod processor;

pub use event::{CursorIcon, InputEvent, MouseButton};
pub use processor::InteractionLayer;
