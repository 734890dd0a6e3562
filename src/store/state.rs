use bytemuck::NoUninit;

/// Lifecycle state of one grid instance.
///
/// Typical flow is `Idle -> Hovered -> Queued -> Animating -> AtTarget`;
/// hover can come and go before admission, and `AtTarget` is terminal.
/// Stored as `u32` so the state column uploads to the GPU unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, NoUninit)]
#[repr(u32)]
pub enum RectangleState {
    /// Resting in its grid cell.
    #[default]
    Idle = 0,
    /// Under the pointer.
    Hovered = 1,
    /// Waiting in the pending queue.
    Queued = 2,
    /// Moving toward the shared target.
    Animating = 3,
    /// Arrived; never leaves this state.
    AtTarget = 4,
}

impl RectangleState {
    /// Whether hover and queue operations may touch an instance in this
    /// state.
    #[inline]
    #[must_use]
    pub fn is_interactable(self) -> bool {
        matches!(self, Self::Idle | Self::Hovered | Self::Queued)
    }

    /// Whether the auto-selector may nominate an instance in this state.
    #[inline]
    #[must_use]
    pub fn is_selectable(self) -> bool {
        matches!(self, Self::Idle | Self::Hovered)
    }
}
