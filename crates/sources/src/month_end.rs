//! Month end row source

use anyhow::Result;
use chrono::{Datelike, Months, NaiveDate};
use rg_rows_core::{
    Anchor, CellValue, ConfigurationRecord, DefaultsContext, FieldId, FieldMetadata, FieldPurpose,
    RecordDefaults, RowSource, SourceConfig, SourceMetadata, HIDDEN_COLUMN_WIDTH,
};

pub use rg_rows_types::source_configs::MonthEndConfig;

/// Last day of the month `months_ahead` months after the anchor's month
pub fn month_end(anchor: NaiveDate, months_ahead: u32) -> Option<NaiveDate> {
    let first = anchor.with_day(1)?;
    first
        .checked_add_months(Months::new(months_ahead.checked_add(1)?))?
        .pred_opt()
}

/// Month end row source
///
/// Lists consecutive month-end dates following the anchor.
pub struct MonthEndSource {
    metadata: SourceMetadata,
    config: MonthEndConfig,
}

impl MonthEndSource {
    pub fn new() -> Self {
        Self {
            metadata: SourceMetadata {
                id: "month_end".to_string(),
                name: "Month End".to_string(),
                description: "Last day of each month after the start date".to_string(),
                columns: vec!["value".to_string(), "date".to_string(), "days".to_string()],
            },
            config: MonthEndConfig::default(),
        }
    }
}

impl Default for MonthEndSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RowSource for MonthEndSource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    fn fields(&self) -> Vec<FieldMetadata> {
        vec![
            FieldMetadata::new(FieldId::AnchorDate, "Start", "Month to count from", FieldPurpose::Anchor),
            FieldMetadata::new(FieldId::RowCount, "Rows", "Number of months listed", FieldPurpose::RowCount),
            FieldMetadata::new(
                FieldId::DisplayFormat,
                "Format",
                "Date format of the display column",
                FieldPurpose::Format,
            ),
        ]
    }

    fn column_widths(&self) -> Vec<i32> {
        vec![HIDDEN_COLUMN_WIDTH, 1417, 454]
    }

    fn defaults(&self, ctx: &DefaultsContext) -> RecordDefaults {
        RecordDefaults {
            anchor: Anchor::Date(ctx.today),
            row_count: ctx.rows,
            display_format: self.config.display_format.clone(),
            ..Default::default()
        }
    }

    fn value(&self, row: u32, column: usize, record: &ConfigurationRecord) -> Option<CellValue> {
        let anchor = record.anchor.as_date()?;
        let skip = if self.config.include_current { 0 } else { 1 };
        let date = month_end(anchor, row.checked_add(skip)?)?;
        match column {
            0 | 1 => Some(CellValue::Date(date)),
            2 => Some(CellValue::Integer(i64::from(date.day()))),
            _ => None,
        }
    }

    fn default_rows(&self) -> Option<u32> {
        self.config.default_rows
    }

    fn configure_typed(&mut self, config: &SourceConfig) -> Result<()> {
        if let SourceConfig::MonthEnd(cfg) = config {
            self.config = cfg.clone();
        }
        Ok(())
    }

    fn get_typed_config(&self) -> Option<SourceConfig> {
        Some(SourceConfig::MonthEnd(self.config.clone()))
    }
}
