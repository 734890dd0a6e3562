use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Auto Selection", inline)]
#[serde(default)]
/// Auto-selector knobs.
pub struct SelectionOptions {
    /// Whether the auto-selector runs.
    #[schemars(title = "Enabled")]
    pub enabled: bool,
    /// Skip a firing while the queue holds more than this many instances.
    #[schemars(title = "Max Queue Size", range(min = 0, max = 64))]
    pub max_queue_size: usize,
    /// Draws per firing before giving up.
    #[schemars(title = "Selection Attempts", range(min = 1, max = 32))]
    pub max_selection_attempts: u32,
    /// Fixed RNG seed for reproducible runs.
    #[schemars(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            max_queue_size: 3,
            max_selection_attempts: 6,
            seed: None,
        }
    }
}
