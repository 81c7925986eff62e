//! Month end source configuration types.

use serde::{Deserialize, Serialize};

fn default_format() -> String {
    "%d/%m/%Y".to_string()
}

/// Configuration for the month end source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthEndConfig {
    /// Display format applied to new widgets
    #[serde(default = "default_format")]
    pub display_format: String,
    /// Whether the month containing the anchor counts as the first row
    #[serde(default)]
    pub include_current: bool,
    /// Row count used when the widget tag does not provide one
    #[serde(default)]
    pub default_rows: Option<u32>,
}

impl Default for MonthEndConfig {
    fn default() -> Self {
        Self {
            display_format: default_format(),
            include_current: false,
            default_rows: None,
        }
    }
}
