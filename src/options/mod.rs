//! Centralized scheduler options with TOML preset support.
//!
//! Every tweakable setting (grid size, animation timing, auto-selection,
//! shared target, cell content) lives here. Options serialize to/from TOML
//! so a grid setup can be stored as a preset and reloaded.

mod grid;
mod selection;
mod target;
mod timing;

use std::path::Path;

pub use grid::GridOptions;
use schemars::JsonSchema;
pub use selection::SelectionOptions;
use serde::{Deserialize, Serialize};
pub use target::TargetOptions;
pub use timing::TimingOptions;

use crate::error::TilecastError;
use crate::store::InstanceContent;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[timing]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[serde(default)]
pub struct Options {
    /// Grid dimensions.
    pub grid: GridOptions,
    /// Animation duration and overlap.
    pub timing: TimingOptions,
    /// Auto-selector configuration.
    pub selection: SelectionOptions,
    /// Shared animation target.
    pub target: TargetOptions,
    /// Cell content, pinned or filled row-major.
    #[schemars(skip)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub content: Vec<InstanceContent>,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, TilecastError> {
        let content = std::fs::read_to_string(path).map_err(TilecastError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, TilecastError> {
        toml::from_str(text).map_err(|e| TilecastError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), TilecastError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TilecastError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(TilecastError::Io)?;
        }
        std::fs::write(path, content).map_err(TilecastError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Whether switching from `self` to `other` needs a fresh instance
    /// store (grid shape or content changed).
    pub(crate) fn requires_rebuild(&self, other: &Self) -> bool {
        self.grid != other.grid || self.content != other.content
    }
}
