//! Reconfiguration channel payloads

use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::field::{FieldId, FieldValue};

/// Action requested through the reconfiguration channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum ReconfigureAction {
    /// Commit defaults unless already applied
    Default,
    /// Clear the applied flag so defaults are recomputed next time
    Reset,
    /// Assign one field
    SetField { field: FieldId, value: FieldValue },
}

impl ReconfigureAction {
    /// Decode an action carried in the row argument of a reserved-phase
    /// message. Only `Default` (0) and `Reset` (1) fit on the wire.
    pub fn from_wire(code: i32) -> Option<Self> {
        match code {
            0 => Some(ReconfigureAction::Default),
            1 => Some(ReconfigureAction::Reset),
            _ => None,
        }
    }
}

/// Outcome of a single field assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldUpdate {
    Accepted(FieldId),
    /// Value did not match the field's declared type and was dropped
    Discarded(FieldId),
}

impl FieldUpdate {
    pub fn is_accepted(&self) -> bool {
        matches!(self, FieldUpdate::Accepted(_))
    }
}

/// Bulk reconfiguration request used by integrators
///
/// `None` means "no change requested"; `Some(0)` rows is a real zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigureRequest {
    #[serde(default)]
    pub anchor_date: Option<NaiveDate>,
    #[serde(default)]
    pub anchor_ordinal: Option<i64>,
    #[serde(default)]
    pub row_count: Option<u32>,
    #[serde(default)]
    pub display_format: Option<String>,
    #[serde(default)]
    pub weekday: Option<Weekday>,
    #[serde(default)]
    pub auxiliary: Vec<(String, FieldValue)>,
}

impl ConfigureRequest {
    pub fn anchor_date(mut self, date: NaiveDate) -> Self {
        self.anchor_date = Some(date);
        self
    }

    pub fn anchor_ordinal(mut self, ordinal: i64) -> Self {
        self.anchor_ordinal = Some(ordinal);
        self
    }

    pub fn row_count(mut self, rows: u32) -> Self {
        self.row_count = Some(rows);
        self
    }

    pub fn display_format(mut self, format: impl Into<String>) -> Self {
        self.display_format = Some(format.into());
        self
    }

    pub fn weekday(mut self, day: Weekday) -> Self {
        self.weekday = Some(day);
        self
    }

    pub fn auxiliary(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.auxiliary.push((name.into(), value));
        self
    }

    /// Field assignments in application order
    ///
    /// An empty display format is treated as unset.
    pub fn assignments(&self) -> Vec<(FieldId, FieldValue)> {
        let mut out = Vec::new();
        if let Some(date) = self.anchor_date {
            out.push((FieldId::AnchorDate, FieldValue::Date(date)));
        }
        if let Some(n) = self.anchor_ordinal {
            out.push((FieldId::AnchorOrdinal, FieldValue::Integer(n)));
        }
        if let Some(rows) = self.row_count {
            out.push((FieldId::RowCount, FieldValue::Integer(i64::from(rows))));
        }
        if let Some(format) = self.display_format.as_ref().filter(|f| !f.is_empty()) {
            out.push((FieldId::DisplayFormat, FieldValue::Text(format.clone())));
        }
        if let Some(day) = self.weekday {
            out.push((FieldId::Weekday, FieldValue::Weekday(day)));
        }
        for (name, value) in &self.auxiliary {
            out.push((FieldId::Custom(name.clone()), value.clone()));
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.assignments().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_actions() {
        assert_eq!(ReconfigureAction::from_wire(0), Some(ReconfigureAction::Default));
        assert_eq!(ReconfigureAction::from_wire(1), Some(ReconfigureAction::Reset));
        assert_eq!(ReconfigureAction::from_wire(2), None);
    }

    #[test]
    fn test_zero_rows_is_not_unset() {
        let request = ConfigureRequest::default().row_count(0);
        assert!(!request.is_empty());
        assert_eq!(
            request.assignments(),
            vec![(FieldId::RowCount, FieldValue::Integer(0))]
        );
    }

    #[test]
    fn test_empty_format_is_unset() {
        let request = ConfigureRequest::default().display_format("");
        assert!(request.is_empty());
    }

    #[test]
    fn test_request_deserializes_with_missing_fields() {
        let request: ConfigureRequest = serde_json::from_str(r#"{"row_count": 4}"#).unwrap();
        assert_eq!(request.row_count, Some(4));
        assert_eq!(request.anchor_date, None);
    }
}
