//! Weekday names row source

use anyhow::Result;
use chrono::Weekday;
use rg_rows_core::{
    Anchor, CellValue, ConfigurationRecord, DefaultsContext, FieldId, FieldMetadata, FieldPurpose,
    RecordDefaults, RowSource, SourceConfig, SourceMetadata, HIDDEN_COLUMN_WIDTH,
};

pub use rg_rows_types::source_configs::{NameStyle, WeekdayNamesConfig};

const LONG_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Weekday names row source
///
/// The ordinal anchor is the weekday of the first row (0 = Monday); rows wrap
/// around the week.
pub struct WeekdayNamesSource {
    metadata: SourceMetadata,
    config: WeekdayNamesConfig,
}

impl WeekdayNamesSource {
    pub fn new() -> Self {
        Self {
            metadata: SourceMetadata {
                id: "weekday_names".to_string(),
                name: "Weekday Names".to_string(),
                description: "Names of the days of the week".to_string(),
                columns: vec!["value".to_string(), "name".to_string()],
            },
            config: WeekdayNamesConfig::default(),
        }
    }

    fn weekday_for(&self, row: u32, record: &ConfigurationRecord) -> Option<Weekday> {
        let start = record.anchor.as_ordinal()?;
        let index = start.checked_add(i64::from(row))?.rem_euclid(7);
        Some((0..index).fold(Weekday::Mon, |day, _| day.succ()))
    }
}

impl Default for WeekdayNamesSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RowSource for WeekdayNamesSource {
    fn metadata(&self) -> &SourceMetadata {
        &self.metadata
    }

    fn fields(&self) -> Vec<FieldMetadata> {
        vec![
            FieldMetadata::new(
                FieldId::AnchorOrdinal,
                "First day",
                "Weekday of the first row, 0 = Monday",
                FieldPurpose::Anchor,
            ),
            FieldMetadata::new(FieldId::RowCount, "Rows", "Number of names listed", FieldPurpose::RowCount),
        ]
    }

    fn column_widths(&self) -> Vec<i32> {
        vec![HIDDEN_COLUMN_WIDTH, 1134]
    }

    fn defaults(&self, ctx: &DefaultsContext) -> RecordDefaults {
        let first = if self.config.sunday_first { 6 } else { 0 };
        RecordDefaults {
            anchor: Anchor::Ordinal(first),
            row_count: ctx.rows,
            ..Default::default()
        }
    }

    fn value(&self, row: u32, column: usize, record: &ConfigurationRecord) -> Option<CellValue> {
        let day = self.weekday_for(row, record)?;
        match column {
            0 => Some(CellValue::Integer(i64::from(day.number_from_monday()))),
            1 => {
                let name = LONG_NAMES[day.num_days_from_monday() as usize];
                Some(CellValue::Text(match self.config.style {
                    NameStyle::Long => name.to_string(),
                    NameStyle::Short => name[..3].to_string(),
                }))
            }
            _ => None,
        }
    }

    /// One full week unless the widget tag asks for another count
    fn default_rows(&self) -> Option<u32> {
        Some(7)
    }

    fn configure_typed(&mut self, config: &SourceConfig) -> Result<()> {
        if let SourceConfig::WeekdayNames(cfg) = config {
            self.config = cfg.clone();
        }
        Ok(())
    }

    fn get_typed_config(&self) -> Option<SourceConfig> {
        Some(SourceConfig::WeekdayNames(self.config.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(first: i64, rows: u32) -> ConfigurationRecord {
        ConfigurationRecord {
            anchor: Anchor::Ordinal(first),
            row_count: rows,
            ..Default::default()
        }
    }

    #[test]
    fn test_names_wrap_around() {
        let source = WeekdayNamesSource::new();
        let record = record(5, 4);
        let names: Vec<_> = (0..4)
            .filter_map(|row| source.value(row, 1, &record))
            .map(|value| value.render(None))
            .collect();
        assert_eq!(names, vec!["Saturday", "Sunday", "Monday", "Tuesday"]);
        assert_eq!(source.value(1, 0, &record), Some(CellValue::Integer(7)));
    }

    #[test]
    fn test_short_names_sunday_first() {
        let mut source = WeekdayNamesSource::new();
        source
            .configure_typed(&SourceConfig::WeekdayNames(WeekdayNamesConfig {
                style: NameStyle::Short,
                sunday_first: true,
            }))
            .unwrap();
        let defaults = source.defaults(&DefaultsContext {
            today: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            rows: 7,
        });
        let mut record = ConfigurationRecord::default();
        record.commit(&defaults);
        assert_eq!(source.value(0, 1, &record), Some(CellValue::Text("Sun".to_string())));
        assert_eq!(source.value(1, 1, &record), Some(CellValue::Text("Mon".to_string())));
    }

    #[test]
    fn test_negative_anchor() {
        let source = WeekdayNamesSource::new();
        assert_eq!(
            source.value(0, 1, &record(-1, 1)),
            Some(CellValue::Text("Sunday".to_string()))
        );
    }
}
