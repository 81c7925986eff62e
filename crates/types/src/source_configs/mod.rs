//! Source configuration types for all row sources.

pub mod month_end;
pub mod weekday_dates;
pub mod weekday_names;

use serde::{Deserialize, Serialize};

// Re-export all source config types for convenience
pub use month_end::MonthEndConfig;
pub use weekday_dates::WeekdayDatesConfig;
pub use weekday_names::{NameStyle, WeekdayNamesConfig};

/// Type-safe enum for all source configurations.
/// Uses serde tag for JSON serialization: {"source_type": "weekday_dates", ...}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source_type")]
pub enum SourceConfig {
    #[serde(rename = "weekday_dates")]
    WeekdayDates(WeekdayDatesConfig),

    #[serde(rename = "month_end")]
    MonthEnd(MonthEndConfig),

    #[serde(rename = "weekday_names")]
    WeekdayNames(WeekdayNamesConfig),
}

impl SourceConfig {
    /// Get the source type ID string
    pub fn source_type(&self) -> &'static str {
        match self {
            SourceConfig::WeekdayDates(_) => "weekday_dates",
            SourceConfig::MonthEnd(_) => "month_end",
            SourceConfig::WeekdayNames(_) => "weekday_names",
        }
    }

    /// Default configuration for a source type ID
    pub fn default_for(source_type: &str) -> Option<Self> {
        match source_type {
            "weekday_dates" => Some(SourceConfig::WeekdayDates(WeekdayDatesConfig::default())),
            "month_end" => Some(SourceConfig::MonthEnd(MonthEndConfig::default())),
            "weekday_names" => Some(SourceConfig::WeekdayNames(WeekdayNamesConfig::default())),
            _ => None,
        }
    }

    /// Fallback row count configured for this source, if any
    pub fn default_rows(&self) -> Option<u32> {
        match self {
            SourceConfig::WeekdayDates(cfg) => cfg.default_rows,
            SourceConfig::MonthEnd(cfg) => cfg.default_rows,
            SourceConfig::WeekdayNames(_) => None,
        }
    }
}
