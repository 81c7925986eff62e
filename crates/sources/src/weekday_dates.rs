//! Weekday dates row source
//!
//! Lists the dates of one weekday (e.g. every Monday) starting on or after
//! the anchor date, one row per stride.

use anyhow::Result;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use rg_rows_core::{
    Anchor, CellValue, ConfigurationRecord, DefaultsContext, FieldId, FieldMetadata, FieldPurpose,
    RecordDefaults, RowSource, SourceConfig, SourceMetadata, HIDDEN_COLUMN_WIDTH,
};

// Re-export weekday dates config types from rg-rows-types
pub use rg_rows_types::source_configs::WeekdayDatesConfig;

/// Auxiliary field overriding the configured stride
pub const STRIDE_FIELD: &str = "stride_weeks";

/// First date on or after `from` that falls on `weekday`
pub fn next_weekday_on_or_after(from: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let offset = (7 + weekday.num_days_from_monday() - from.weekday().num_days_from_monday()) % 7;
    from.checked_add_days(Days::new(u64::from(offset)))
}

/// Weekday dates row source
pub struct WeekdayDatesSource {
    metadata: SourceMetadata,
    config: WeekdayDatesConfig,
}

impl WeekdayDatesSource {
    pub fn new() -> Self {
        Self::with_config(WeekdayDatesConfig::default())
    }

    pub fn with_config(config: WeekdayDatesConfig) -> Self {
        let metadata = SourceMetadata {
            id: "weekday_dates".to_string(),
            name: "Weekday Dates".to_string(),
            description: "Dates of a chosen weekday, one row per week".to_string(),
            columns: vec!["value".to_string(), "date".to_string(), "week".to_string()],
        };
        Self { metadata, config }
    }

    fn date_for(&self, row: u32, record: &ConfigurationRecord) -> Option<NaiveDate> {
        let anchor = record.anchor.as_date()?;
        let weekday = record.weekday.unwrap_or(self.config.weekday);
        let stride = record
            .aux_integer(STRIDE_FIELD)
            .and_then(|n| u64::try_from(n).ok())
            .filter(|n| *n > 0)
            .unwrap_or(u64::from(self.config.stride_weeks.max(1)));
        let first = next_weekday_on_or_after(anchor, weekday)?;
        let days = u64::from(row).checked_mul(stride)?.checked_mul(7)?;
        first.checked_add_days(Days::new(days))
    }
}

impl Default for WeekdayDatesSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RowSource for WeekdayDatesSource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    fn fields(&self) -> Vec<FieldMetadata> {
        vec![
            FieldMetadata::new(
                FieldId::AnchorDate,
                "Start",
                "First row is the chosen weekday on or after this date",
                FieldPurpose::Anchor,
            ),
            FieldMetadata::new(
                FieldId::RowCount,
                "Rows",
                "Number of dates listed",
                FieldPurpose::RowCount,
            ),
            FieldMetadata::new(
                FieldId::DisplayFormat,
                "Format",
                "Date format of the display column",
                FieldPurpose::Format,
            ),
            FieldMetadata::new(
                FieldId::Weekday,
                "Weekday",
                "Day of the week listed",
                FieldPurpose::Parameter,
            ),
            FieldMetadata::new(
                FieldId::Custom(STRIDE_FIELD.to_string()),
                "Stride",
                "Weeks between rows",
                FieldPurpose::Parameter,
            ),
        ]
    }

    fn column_widths(&self) -> Vec<i32> {
        vec![HIDDEN_COLUMN_WIDTH, 1701, 567]
    }

    fn defaults(&self, ctx: &DefaultsContext) -> RecordDefaults {
        RecordDefaults {
            anchor: Anchor::Date(ctx.today),
            row_count: ctx.rows,
            display_format: self.config.display_format.clone(),
            weekday: Some(self.config.weekday),
            auxiliary: Default::default(),
        }
    }

    fn value(&self, row: u32, column: usize, record: &ConfigurationRecord) -> Option<CellValue> {
        let date = self.date_for(row, record)?;
        match column {
            0 | 1 => Some(CellValue::Date(date)),
            2 => Some(CellValue::Text(format!("W{:02}", date.iso_week().week()))),
            _ => None,
        }
    }

    fn default_rows(&self) -> Option<u32> {
        self.config.default_rows
    }

    fn configure_typed(&mut self, config: &SourceConfig) -> Result<()> {
        if let SourceConfig::WeekdayDates(cfg) = config {
            self.config = cfg.clone();
        } else {
            log::warn!(
                "WeekdayDatesSource ignoring {} configuration",
                config.source_type()
            );
        }
        Ok(())
    }

    fn get_typed_config(&self) -> Option<SourceConfig> {
        Some(SourceConfig::WeekdayDates(self.config.clone()))
    }
}
