//! Column names and coarse per-column dirty tracking.

/// One per-instance column of the [`InstanceStore`](super::InstanceStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    /// Lifecycle state (`RectangleState` as `u32`).
    State,
    /// Transient hover flag (`0` or `1`).
    Hover,
    /// Seconds since epoch at the last state-affecting event.
    Timestamp,
    /// Seconds since epoch when the instance started animating.
    AnimStartTime,
    /// Derived animation progress in `[0, 1]`.
    AnimationProgress,
    /// Index in the pending queue, `-1` when not queued.
    QueuePosition,
    /// World-space animation target.
    TargetPosition,
}

impl Attribute {
    /// Every attribute, in column order.
    pub const ALL: [Attribute; 7] = [
        Attribute::State,
        Attribute::Hover,
        Attribute::Timestamp,
        Attribute::AnimStartTime,
        Attribute::AnimationProgress,
        Attribute::QueuePosition,
        Attribute::TargetPosition,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Set of attributes changed since the renderer last read them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirtyFlags(u8);

impl DirtyFlags {
    /// No attribute dirty.
    pub const NONE: Self = Self(0);

    /// Every attribute dirty.
    #[must_use]
    pub fn all() -> Self {
        Attribute::ALL
            .iter()
            .fold(Self::NONE, |acc, &attr| acc.with(attr))
    }

    /// Copy of `self` with `attr` added.
    #[must_use]
    pub fn with(self, attr: Attribute) -> Self {
        Self(self.0 | attr.bit())
    }

    /// Add `attr` to the set.
    pub fn insert(&mut self, attr: Attribute) {
        self.0 |= attr.bit();
    }

    /// Whether `attr` is in the set.
    #[must_use]
    pub fn contains(self, attr: Attribute) -> bool {
        self.0 & attr.bit() != 0
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate the dirty attributes in column order.
    pub fn iter(self) -> impl Iterator<Item = Attribute> {
        Attribute::ALL
            .into_iter()
            .filter(move |attr| self.contains(*attr))
    }
}
