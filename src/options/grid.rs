use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Grid", inline)]
#[serde(default)]
/// Grid dimensions. Changing them rebuilds every instance.
pub struct GridOptions {
    /// Number of rows.
    #[schemars(title = "Rows", range(min = 1, max = 200))]
    pub rows: u32,
    /// Number of columns.
    #[schemars(title = "Columns", range(min = 1, max = 200))]
    pub cols: u32,
}

impl GridOptions {
    /// Total instance count.
    pub fn instance_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

impl Default for GridOptions {
    fn default() -> Self {
        Self { rows: 40, cols: 15 }
    }
}
