//! Configuration field metadata and the tagged values that may be assigned to them

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::record::MAX_ROW_COUNT;

/// Type of data a field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    /// Text data (e.g., a display format)
    Text,
    /// Non-negative integer (e.g., row count)
    Count,
    /// Signed integer (e.g., an ordinal anchor)
    Integer,
    /// Calendar date
    Date,
    /// Day of the week
    Weekday,
    /// Anything goes (auxiliary fields opaque to the provider core)
    Any,
}

/// Purpose/role of a field in the record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldPurpose {
    /// Start/reference point of the generated rows
    Anchor,
    /// How many rows are exposed
    RowCount,
    /// Formatting hint for the display column
    Format,
    /// Domain parameter interpreted by the row source
    Parameter,
}

/// Identifier of a configurable field
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    /// Anchor expressed as a date
    AnchorDate,
    /// Anchor expressed as an ordinal
    AnchorOrdinal,
    RowCount,
    DisplayFormat,
    Weekday,
    /// Source-specific auxiliary field
    Custom(String),
}

impl FieldId {
    /// Declared type of this field
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldId::AnchorDate => FieldType::Date,
            FieldId::AnchorOrdinal => FieldType::Integer,
            FieldId::RowCount => FieldType::Count,
            FieldId::DisplayFormat => FieldType::Text,
            FieldId::Weekday => FieldType::Weekday,
            FieldId::Custom(_) => FieldType::Any,
        }
    }

    /// Check a value's shape against this field's declared type
    pub fn accepts(&self, value: &FieldValue) -> bool {
        match (self.field_type(), value) {
            (FieldType::Any, _) => true,
            (FieldType::Text, FieldValue::Text(_)) => true,
            (FieldType::Integer, FieldValue::Integer(_)) => true,
            (FieldType::Count, FieldValue::Integer(n)) => *n >= 0 && *n <= i64::from(MAX_ROW_COUNT),
            (FieldType::Date, FieldValue::Date(_)) => true,
            (FieldType::Weekday, FieldValue::Weekday(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldId::AnchorDate => f.write_str("anchor_date"),
            FieldId::AnchorOrdinal => f.write_str("anchor_ordinal"),
            FieldId::RowCount => f.write_str("row_count"),
            FieldId::DisplayFormat => f.write_str("display_format"),
            FieldId::Weekday => f.write_str("weekday"),
            FieldId::Custom(name) => write!(f, "custom:{}", name),
        }
    }
}

/// Tagged reconfiguration payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Date(NaiveDate),
    Weekday(Weekday),
}

impl FieldValue {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Text(_) => FieldType::Text,
            FieldValue::Integer(_) => FieldType::Integer,
            FieldValue::Date(_) => FieldType::Date,
            FieldValue::Weekday(_) => FieldType::Weekday,
        }
    }
}

/// Metadata describing a single configurable field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldMetadata {
    /// Field this entry describes
    pub id: FieldId,
    /// Human-readable name
    pub name: String,
    /// Description of what this field controls
    pub description: String,
    /// Purpose/role of this field
    pub purpose: FieldPurpose,
}

impl FieldMetadata {
    /// Create a new field metadata
    pub fn new(
        id: FieldId,
        name: impl Into<String>,
        description: impl Into<String>,
        purpose: FieldPurpose,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            purpose,
        }
    }

    pub fn field_type(&self) -> FieldType {
        self.id.field_type()
    }
}
