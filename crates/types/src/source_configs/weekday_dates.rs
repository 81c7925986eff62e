//! Weekday dates source configuration types.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

fn default_weekday() -> Weekday {
    Weekday::Mon
}

fn default_stride_weeks() -> u32 {
    1
}

fn default_format() -> String {
    "%a %d %b %Y".to_string()
}

/// Configuration for the weekday dates source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayDatesConfig {
    /// Weekday used when a widget has not picked one
    #[serde(default = "default_weekday")]
    pub weekday: Weekday,
    /// Weeks between consecutive rows
    #[serde(default = "default_stride_weeks")]
    pub stride_weeks: u32,
    /// Display format applied to new widgets
    #[serde(default = "default_format")]
    pub display_format: String,
    /// Row count used when the widget tag does not provide one
    #[serde(default)]
    pub default_rows: Option<u32>,
}

impl Default for WeekdayDatesConfig {
    fn default() -> Self {
        Self {
            weekday: default_weekday(),
            stride_weeks: default_stride_weeks(),
            display_format: default_format(),
            default_rows: None,
        }
    }
}
