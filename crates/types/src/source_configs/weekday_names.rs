//! Weekday names source configuration types.

use serde::{Deserialize, Serialize};

/// How weekday names are spelled
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NameStyle {
    /// "Monday"
    #[default]
    Long,
    /// "Mon"
    Short,
}

/// Configuration for the weekday names source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WeekdayNamesConfig {
    #[serde(default)]
    pub style: NameStyle,
    /// List Sunday first instead of Monday
    #[serde(default)]
    pub sunday_first: bool,
}
