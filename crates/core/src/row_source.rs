//! Row source trait and related types

use anyhow::Result;
use chrono::NaiveDate;
use rg_rows_types::{CellValue, ConfigurationRecord, FieldMetadata, RecordDefaults, SourceConfig};

/// Metadata about a row source
#[derive(Debug, Clone)]
pub struct SourceMetadata {
    /// Unique identifier for this source type
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Description of what this source lists
    pub description: String,
    /// Column headings, index 0 being the hidden value column
    pub columns: Vec<String>,
}

/// Inputs available when computing defaults for a widget
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultsContext {
    /// "Now" as seen by the provider clock
    pub today: NaiveDate,
    /// Row count seeded from the widget tag, source config or built-in fallback
    pub rows: u32,
}

/// Trait for all row sources
///
/// A row source is the domain-specific part of a provider: it knows how many
/// columns it exposes, what a freshly opened widget looks like, and what value
/// sits at a given (row, column) for a configuration record. Everything else
/// (bounds checking, per-widget state, sessions) lives in [`crate::Provider`].
pub trait RowSource: Send + Sync {
    /// Get metadata about this source
    fn metadata(&self) -> &SourceMetadata;

    /// Get metadata describing the configurable fields
    fn fields(&self) -> Vec<FieldMetadata>;

    /// Number of columns including the hidden value column
    fn column_count(&self) -> usize {
        self.metadata().columns.len()
    }

    /// Preset widths, indexed by column
    fn column_widths(&self) -> Vec<i32>;

    /// Column that carries the display format
    fn display_column(&self) -> usize {
        1
    }

    /// Defaults committed for a widget that has none applied
    fn defaults(&self, ctx: &DefaultsContext) -> RecordDefaults;

    /// Value at (row, column)
    ///
    /// Only ever called with `row < record.row_count` and
    /// `column < column_count()`. Must be a pure function of its arguments.
    fn value(&self, row: u32, column: usize, record: &ConfigurationRecord) -> Option<CellValue>;

    /// Row count this source falls back to when the widget gives none
    fn default_rows(&self) -> Option<u32> {
        None
    }

    /// Configure the source with typed configuration
    fn configure_typed(&mut self, _config: &SourceConfig) -> Result<()> {
        Ok(())
    }

    /// Get the current typed configuration (if available)
    fn get_typed_config(&self) -> Option<SourceConfig> {
        None
    }
}

/// Type-erased row source for dynamic dispatch
pub type BoxedRowSource = Box<dyn RowSource>;
