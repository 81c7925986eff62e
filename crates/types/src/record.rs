//! Per-widget configuration record

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::cell::Anchor;
use crate::field::{FieldId, FieldValue};

/// Built-in fallback row count when neither the widget tag nor the app
/// config provides one
pub const DEFAULT_ROW_COUNT: u32 = 10;

/// Largest row count a host can address with its signed 32-bit row index
pub const MAX_ROW_COUNT: u32 = i32::MAX as u32;

/// Mutable parameter set of one widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigurationRecord {
    /// True once default/custom values have been committed
    #[serde(default)]
    pub applied: bool,
    #[serde(default)]
    pub anchor: Anchor,
    #[serde(default)]
    pub row_count: u32,
    /// Formatting hint for the display column only
    #[serde(default)]
    pub display_format: String,
    #[serde(default)]
    pub weekday: Option<Weekday>,
    /// Source-specific parameters, opaque to the provider core
    #[serde(default)]
    pub auxiliary: BTreeMap<String, FieldValue>,
}

impl ConfigurationRecord {
    /// Overwrite every field from a set of defaults and mark the record applied
    pub fn commit(&mut self, defaults: &RecordDefaults) {
        self.anchor = defaults.anchor;
        self.row_count = defaults.row_count;
        self.display_format = defaults.display_format.clone();
        self.weekday = defaults.weekday;
        self.auxiliary = defaults.auxiliary.clone();
        self.applied = true;
    }

    /// Assign one field, returning `false` when the value does not fit the
    /// field's declared type (the record is left untouched)
    pub fn assign(&mut self, field: &FieldId, value: FieldValue) -> bool {
        if !field.accepts(&value) {
            return false;
        }
        match (field, value) {
            (FieldId::AnchorDate, FieldValue::Date(date)) => self.anchor = Anchor::Date(date),
            (FieldId::AnchorOrdinal, FieldValue::Integer(n)) => self.anchor = Anchor::Ordinal(n),
            (FieldId::RowCount, FieldValue::Integer(n)) => match u32::try_from(n) {
                Ok(rows) => self.row_count = rows,
                Err(_) => return false,
            },
            (FieldId::DisplayFormat, FieldValue::Text(text)) => self.display_format = text,
            (FieldId::Weekday, FieldValue::Weekday(day)) => self.weekday = Some(day),
            (FieldId::Custom(name), value) => {
                self.auxiliary.insert(name.clone(), value);
            }
            _ => return false,
        }
        true
    }

    /// Look up an auxiliary integer parameter
    pub fn aux_integer(&self, name: &str) -> Option<i64> {
        match self.auxiliary.get(name) {
            Some(FieldValue::Integer(n)) => Some(*n),
            _ => None,
        }
    }
}

/// Values committed by `apply_defaults`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RecordDefaults {
    pub anchor: Anchor,
    pub row_count: u32,
    pub display_format: String,
    #[serde(default)]
    pub weekday: Option<Weekday>,
    #[serde(default)]
    pub auxiliary: BTreeMap<String, FieldValue>,
}
