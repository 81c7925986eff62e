//! Cell values produced by row sources and the anchor they are generated from

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Start/reference point for generated rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    Date(NaiveDate),
    Ordinal(i64),
}

impl Anchor {
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Anchor::Date(date) => Some(*date),
            Anchor::Ordinal(_) => None,
        }
    }

    pub fn as_ordinal(&self) -> Option<i64> {
        match self {
            Anchor::Ordinal(n) => Some(*n),
            Anchor::Date(_) => None,
        }
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Anchor::Ordinal(0)
    }
}

/// Value of one cell handed back to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Date(NaiveDate),
    /// No value (out-of-range query or nothing to show)
    #[default]
    Null,
}

impl CellValue {
    /// Render the value the way a host would, applying a display format
    ///
    /// Dates use chrono strftime syntax (e.g. `%a %d %b %Y`). An empty or
    /// invalid format falls back to ISO `yyyy-mm-dd`. Non-date values ignore
    /// the format.
    pub fn render(&self, format: Option<&str>) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Integer(n) => n.to_string(),
            CellValue::Null => String::new(),
            CellValue::Date(date) => {
                let iso = || date.format("%Y-%m-%d").to_string();
                match format.filter(|f| !f.is_empty()) {
                    Some(fmt) => {
                        // chrono reports bad specifiers through fmt::Error
                        let mut out = String::new();
                        if write!(out, "{}", date.format(fmt)).is_ok() {
                            out
                        } else {
                            log::debug!("Invalid date format '{}', using ISO", fmt);
                            iso()
                        }
                    }
                    None => iso(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_date_with_format() {
        let value = CellValue::Date(NaiveDate::from_ymd_opt(2021, 3, 1).unwrap());
        assert_eq!(value.render(Some("%a %d %b %Y")), "Mon 01 Mar 2021");
        assert_eq!(value.render(None), "2021-03-01");
        assert_eq!(value.render(Some("")), "2021-03-01");
    }

    #[test]
    fn test_render_invalid_format_falls_back() {
        let value = CellValue::Date(NaiveDate::from_ymd_opt(2021, 3, 1).unwrap());
        assert_eq!(value.render(Some("%Q")), "2021-03-01");
    }

    #[test]
    fn test_render_non_dates_ignore_format() {
        assert_eq!(CellValue::Integer(7).render(Some("%Y")), "7");
        assert_eq!(CellValue::Text("Monday".into()).render(Some("%Y")), "Monday");
        assert_eq!(CellValue::Null.render(None), "");
    }

    #[test]
    fn test_anchor_serialization() {
        let anchor = Anchor::Date(NaiveDate::from_ymd_opt(2021, 3, 1).unwrap());
        let json = serde_json::to_string(&anchor).unwrap();
        assert_eq!(json, r#"{"date":"2021-03-01"}"#);
        let back: Anchor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, anchor);
    }
}
