//! Configuration store - one mutable record per widget identity
//!
//! Records are created on first lookup and never removed, only reset. The
//! store is shared by every widget a provider serves, so each widget's
//! parameters stay isolated from the others while all of them are answered
//! by the same row source.

use log::{debug, warn};
use rg_rows_types::{ConfigurationRecord, FieldId, FieldUpdate, FieldValue, RecordDefaults, WidgetId};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Manages per-widget configuration records
///
/// All access goes through a single mutex so that a multi-threaded host can
/// share one store; single-threaded hosts pay one uncontended lock per call.
#[derive(Debug, Default)]
pub struct ConfigurationStore {
    records: Mutex<HashMap<WidgetId, ConfigurationRecord>>,
}

impl ConfigurationStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> MutexGuard<'_, HashMap<WidgetId, ConfigurationRecord>> {
        self.records.lock().unwrap_or_else(|poisoned| {
            warn!("Configuration store lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Snapshot of a widget's record, if one exists
    pub fn find(&self, id: &WidgetId) -> Option<ConfigurationRecord> {
        self.records().get(id).cloned()
    }

    /// Snapshot of a widget's record, creating an unapplied default one if absent
    pub fn find_or_create(&self, id: &WidgetId) -> ConfigurationRecord {
        self.records()
            .entry(id.clone())
            .or_insert_with(|| {
                debug!("Created configuration record for widget {}", id);
                ConfigurationRecord::default()
            })
            .clone()
    }

    /// Commit defaults unless the record is already applied
    ///
    /// Returns `true` when the defaults were written.
    pub fn apply_defaults(&self, id: &WidgetId, defaults: &RecordDefaults) -> bool {
        self.apply_defaults_with(id, || defaults.clone())
    }

    /// Like [`apply_defaults`](Self::apply_defaults) but only computes the
    /// defaults when they are actually needed
    pub fn apply_defaults_with<F>(&self, id: &WidgetId, make_defaults: F) -> bool
    where
        F: FnOnce() -> RecordDefaults,
    {
        let mut records = self.records();
        let record = records.entry(id.clone()).or_default();
        if record.applied {
            return false;
        }
        record.commit(&make_defaults());
        debug!(
            "Applied defaults for widget {} (rows: {}, anchor: {:?})",
            id, record.row_count, record.anchor
        );
        true
    }

    /// Clear the applied flag, leaving every other field as it was
    pub fn reset(&self, id: &WidgetId) {
        let mut records = self.records();
        records.entry(id.clone()).or_default().applied = false;
        debug!("Reset configuration record for widget {}", id);
    }

    /// Assign exactly one field
    ///
    /// Values that do not fit the field's declared type are dropped and the
    /// field keeps its previous value.
    pub fn set_field(&self, id: &WidgetId, field: FieldId, value: FieldValue) -> FieldUpdate {
        let mut records = self.records();
        let record = records.entry(id.clone()).or_default();
        let value_type = value.field_type();
        if record.assign(&field, value) {
            debug!("Widget {}: set {}", id, field);
            FieldUpdate::Accepted(field)
        } else {
            warn!(
                "Widget {}: discarded {:?} value for {} (expects {:?})",
                id,
                value_type,
                field,
                field.field_type()
            );
            FieldUpdate::Discarded(field)
        }
    }

    /// Number of widgets with a record
    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    /// Identities of all widgets with a record
    pub fn widget_ids(&self) -> Vec<WidgetId> {
        let mut ids: Vec<WidgetId> = self.records().keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Debug: print all records
    pub fn debug_print(&self) {
        for (id, record) in self.records().iter() {
            debug!(
                "  {} -> applied: {}, rows: {}, anchor: {:?}, format: {:?}",
                id, record.applied, record.row_count, record.anchor, record.display_format
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Weekday};
    use rg_rows_types::Anchor;

    fn defaults(rows: u32) -> RecordDefaults {
        RecordDefaults {
            anchor: Anchor::Date(NaiveDate::from_ymd_opt(2021, 3, 1).unwrap()),
            row_count: rows,
            display_format: "%d/%m/%Y".to_string(),
            weekday: Some(Weekday::Mon),
            auxiliary: Default::default(),
        }
    }

    #[test]
    fn test_find_missing_returns_none() {
        let store = ConfigurationStore::new();
        assert!(store.find(&WidgetId::new("w1")).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_find_or_create_is_unapplied() {
        let store = ConfigurationStore::new();
        let id = WidgetId::new("w1");
        let record = store.find_or_create(&id);
        assert!(!record.applied);
        assert_eq!(store.len(), 1);
        store.find_or_create(&id);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_apply_defaults_is_idempotent() {
        let store = ConfigurationStore::new();
        let id = WidgetId::new("w1");
        assert!(store.apply_defaults(&id, &defaults(4)));
        let first = store.find(&id).unwrap();
        assert!(!store.apply_defaults(&id, &defaults(99)));
        assert_eq!(store.find(&id).unwrap(), first);
    }

    #[test]
    fn test_apply_defaults_with_skips_computation_when_applied() {
        let store = ConfigurationStore::new();
        let id = WidgetId::new("w1");
        store.apply_defaults(&id, &defaults(4));
        let applied = store.apply_defaults_with(&id, || panic!("defaults recomputed"));
        assert!(!applied);
    }

    #[test]
    fn test_reset_then_default_round_trip() {
        let store = ConfigurationStore::new();
        let id = WidgetId::new("w1");
        store.apply_defaults(&id, &defaults(4));
        store.set_field(&id, FieldId::RowCount, FieldValue::Integer(20));
        store.set_field(&id, FieldId::DisplayFormat, FieldValue::Text("%Y".into()));
        store.set_field(&id, FieldId::Custom("stride".into()), FieldValue::Integer(2));

        store.reset(&id);
        store.apply_defaults(&id, &defaults(7));

        let mut expected = ConfigurationRecord::default();
        expected.commit(&defaults(7));
        assert_eq!(store.find(&id).unwrap(), expected);
    }

    #[test]
    fn test_reset_keeps_fields_frozen() {
        let store = ConfigurationStore::new();
        let id = WidgetId::new("w1");
        store.apply_defaults(&id, &defaults(4));
        store.reset(&id);
        let record = store.find(&id).unwrap();
        assert!(!record.applied);
        assert_eq!(record.row_count, 4);
    }

    #[test]
    fn test_set_field_is_selective() {
        let store = ConfigurationStore::new();
        let id = WidgetId::new("w1");
        store.apply_defaults(&id, &defaults(4));
        let before = store.find(&id).unwrap();

        let update = store.set_field(&id, FieldId::Weekday, FieldValue::Weekday(Weekday::Fri));
        assert_eq!(update, FieldUpdate::Accepted(FieldId::Weekday));

        let after = store.find(&id).unwrap();
        assert_eq!(after.weekday, Some(Weekday::Fri));
        assert_eq!(
            ConfigurationRecord {
                weekday: before.weekday,
                ..after
            },
            before
        );
    }

    #[test]
    fn test_mistyped_value_is_discarded() {
        let store = ConfigurationStore::new();
        let id = WidgetId::new("w1");
        store.apply_defaults(&id, &defaults(4));
        let update = store.set_field(&id, FieldId::DisplayFormat, FieldValue::Integer(42));
        assert_eq!(update, FieldUpdate::Discarded(FieldId::DisplayFormat));
        assert_eq!(store.find(&id).unwrap().display_format, "%d/%m/%Y");
    }

    #[test]
    fn test_row_count_beyond_host_index_is_discarded() {
        let store = ConfigurationStore::new();
        let id = WidgetId::new("w1");
        store.apply_defaults(&id, &defaults(4));
        let update = store.set_field(&id, FieldId::RowCount, FieldValue::Integer(i64::from(i32::MAX) + 1));
        assert_eq!(update, FieldUpdate::Discarded(FieldId::RowCount));
        assert_eq!(store.find(&id).unwrap().row_count, 4);
    }

    #[test]
    fn test_records_are_isolated() {
        let store = ConfigurationStore::new();
        let a = WidgetId::new("a");
        let b = WidgetId::new("b");
        store.apply_defaults(&a, &defaults(4));
        store.apply_defaults(&b, &defaults(8));
        store.set_field(&a, FieldId::RowCount, FieldValue::Integer(1));
        assert_eq!(store.find(&a).unwrap().row_count, 1);
        assert_eq!(store.find(&b).unwrap().row_count, 8);
        assert_eq!(store.widget_ids(), vec![a, b]);
    }
}
