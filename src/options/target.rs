use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Target", inline)]
#[serde(default)]
/// Shared destination of every animation.
pub struct TargetOptions {
    /// World-space target position.
    #[schemars(title = "Position")]
    pub position: [f32; 3],
}

impl TargetOptions {
    /// Target as a vector.
    pub fn to_vec3(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

impl Default for TargetOptions {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 10.0],
        }
    }
}
