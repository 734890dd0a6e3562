use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::AnimationTiming;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Timing", inline)]
#[serde(default)]
/// Per-instance animation duration and pipeline overlap.
pub struct TimingOptions {
    /// Seconds for one instance to reach the target.
    #[schemars(title = "Duration", range(min = 0.1, max = 30.0), extend("step" = 0.1))]
    pub animation_duration_sec: f32,
    /// Trailing seconds during which the next instance may already start.
    /// Clamped to `[0, animation_duration_sec]`.
    #[schemars(title = "Overlap", range(min = 0.0, max = 30.0), extend("step" = 0.1))]
    pub overlap_duration_sec: f32,
}

impl TimingOptions {
    /// Clamped scheduler timing.
    pub fn to_timing(&self) -> AnimationTiming {
        AnimationTiming::new(self.animation_duration_sec, self.overlap_duration_sec)
    }
}

impl Default for TimingOptions {
    fn default() -> Self {
        Self {
            animation_duration_sec: 6.0,
            overlap_duration_sec: 2.0,
        }
    }
}
