//! Reconfiguration channel
//!
//! Lets integrator code change a widget's configuration after it is already
//! showing data, outside the host's normal phase sequence.

use log::{debug, info};
use rg_rows_types::{ConfigureRequest, FieldUpdate, ReconfigureAction};

use crate::provider::Provider;
use crate::widget::Widget;

impl Provider {
    /// Apply one reconfiguration action to a widget's record
    ///
    /// Returns the outcome of a `SetField`; `Default` and `Reset` return `None`.
    pub fn reconfigure(&self, widget: &dyn Widget, action: ReconfigureAction) -> Option<FieldUpdate> {
        let id = widget.id();
        match action {
            ReconfigureAction::Default => {
                if !self.ensure_defaults(widget) {
                    debug!("Widget {}: defaults already applied", id);
                }
                None
            }
            ReconfigureAction::Reset => {
                self.store().reset(&id);
                None
            }
            ReconfigureAction::SetField { field, value } => Some(self.store().set_field(&id, field, value)),
        }
    }

    /// Reconfigure a widget and make it re-pull its rows
    ///
    /// Opens the widget first if it has no live session, assigns every field set
    /// in `request` (or resets to defaults when none is), commits, and only
    /// then asks the widget to requery so it never shows stale rows.
    pub fn configure(&self, widget: &mut dyn Widget, request: &ConfigureRequest) -> Vec<FieldUpdate> {
        let id = widget.id();
        if self.session(&id).is_none() {
            debug!("Widget {} configured without an open session", id);
            self.initialize(widget);
            self.open(&*widget);
        }

        let assignments = request.assignments();
        if !assignments.is_empty() && self.ensure_defaults(&*widget) {
            // The closing Default step must find the record applied
            debug!("Widget {}: committed defaults before assigning fields", id);
        }
        let updates: Vec<FieldUpdate> = if assignments.is_empty() {
            self.reconfigure(&*widget, ReconfigureAction::Reset);
            Vec::new()
        } else {
            assignments
                .into_iter()
                .filter_map(|(field, value)| {
                    self.reconfigure(&*widget, ReconfigureAction::SetField { field, value })
                })
                .collect()
        };

        self.reconfigure(&*widget, ReconfigureAction::Default);
        info!(
            "Widget {} reconfigured ({} of {} fields accepted)",
            id,
            updates.iter().filter(|u| u.is_accepted()).count(),
            updates.len()
        );
        widget.request_requery();
        updates
    }
}

#[cfg(test)]
mod tests {
    use crate::clock::FixedClock;
    use crate::row_source::{DefaultsContext, RowSource, SourceMetadata};
    use crate::{Provider, Widget};
    use chrono::NaiveDate;
    use rg_rows_types::{
        Anchor, CellValue, ConfigurationRecord, ConfigureRequest, FieldId, FieldMetadata,
        FieldUpdate, FieldValue, Phase, ProtocolMessage, ReconfigureAction, RecordDefaults,
        WidgetId,
    };

    struct DaysSource(SourceMetadata);

    impl RowSource for DaysSource {
        fn metadata(&self) -> &SourceMetadata {
            &self.0
        }

        fn fields(&self) -> Vec<FieldMetadata> {
            Vec::new()
        }

        fn column_widths(&self) -> Vec<i32> {
            vec![0]
        }

        fn display_column(&self) -> usize {
            0
        }

        fn defaults(&self, ctx: &DefaultsContext) -> RecordDefaults {
            RecordDefaults {
                anchor: Anchor::Date(ctx.today),
                row_count: ctx.rows,
                display_format: "%d".to_string(),
                ..Default::default()
            }
        }

        fn value(&self, row: u32, _column: usize, record: &ConfigurationRecord) -> Option<CellValue> {
            let start = record.anchor.as_date()?;
            Some(CellValue::Date(start + chrono::Duration::days(i64::from(row))))
        }
    }

    /// Widget that snapshots the store when asked to requery
    struct SpyWidget<'a> {
        id: &'static str,
        provider: &'a Provider,
        seen_at_requery: Vec<ConfigurationRecord>,
    }

    impl Widget for SpyWidget<'_> {
        fn id(&self) -> WidgetId {
            WidgetId::new(self.id)
        }

        fn set_column_count(&mut self, _count: usize) {}

        fn set_column_widths(&mut self, _widths: &[i32]) {}

        fn request_requery(&mut self) {
            let record = self.provider.store().find(&self.id()).unwrap();
            self.seen_at_requery.push(record);
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    fn provider() -> Provider {
        let source = DaysSource(SourceMetadata {
            id: "days".to_string(),
            name: "Days".to_string(),
            description: "Consecutive days".to_string(),
            columns: vec!["date".to_string()],
        });
        Provider::new(Box::new(source))
            .with_clock(FixedClock(today()))
            .with_fallback_rows(5)
    }

    #[test]
    fn test_configure_unopened_widget() {
        let provider = provider();
        let mut widget = SpyWidget {
            id: "w1",
            provider: &provider,
            seen_at_requery: Vec::new(),
        };
        let anchor = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
        let updates = provider.configure(
            &mut widget,
            &ConfigureRequest::default().anchor_date(anchor).row_count(4),
        );

        assert_eq!(
            updates,
            vec![
                FieldUpdate::Accepted(FieldId::AnchorDate),
                FieldUpdate::Accepted(FieldId::RowCount)
            ]
        );
        assert!(provider.session(&WidgetId::new("w1")).is_some());

        // Requery saw the committed configuration
        assert_eq!(widget.seen_at_requery.len(), 1);
        let seen = &widget.seen_at_requery[0];
        assert!(seen.applied);
        assert_eq!(seen.row_count, 4);
        assert_eq!(seen.anchor, Anchor::Date(anchor));
    }

    #[test]
    fn test_empty_configure_restores_defaults() {
        let provider = provider();
        let mut widget = SpyWidget {
            id: "w1",
            provider: &provider,
            seen_at_requery: Vec::new(),
        };
        provider.configure(&mut widget, &ConfigureRequest::default().row_count(2).display_format("%b"));
        provider.configure(&mut widget, &ConfigureRequest::default());

        let record = widget.seen_at_requery.last().unwrap();
        assert!(record.applied);
        assert_eq!(record.row_count, 5);
        assert_eq!(record.display_format, "%d");
        assert_eq!(record.anchor, Anchor::Date(today()));
    }

    #[test]
    fn test_configure_zero_rows() {
        let provider = provider();
        let mut widget = SpyWidget {
            id: "w1",
            provider: &provider,
            seen_at_requery: Vec::new(),
        };
        provider.configure(&mut widget, &ConfigureRequest::default().row_count(0));
        assert_eq!(widget.seen_at_requery[0].row_count, 0);
    }

    #[test]
    fn test_set_field_reports_discard() {
        let provider = provider();
        let widget = SpyWidget {
            id: "w1",
            provider: &provider,
            seen_at_requery: Vec::new(),
        };
        provider.reconfigure(&widget, ReconfigureAction::Default);
        let outcome = provider.reconfigure(
            &widget,
            ReconfigureAction::SetField {
                field: FieldId::DisplayFormat,
                value: FieldValue::Integer(42),
            },
        );
        assert_eq!(outcome, Some(FieldUpdate::Discarded(FieldId::DisplayFormat)));
        assert_eq!(provider.store().find(&widget.id()).unwrap().display_format, "%d");
    }

    fn spy(provider: &Provider) -> SpyWidget<'_> {
        SpyWidget {
            id: "w1",
            provider,
            seen_at_requery: Vec::new(),
        }
    }

    #[test]
    fn test_configure_after_early_reset() {
        let provider = provider();
        let mut widget = spy(&provider);
        provider.reconfigure(&widget, ReconfigureAction::Reset);
        provider.configure(&mut widget, &ConfigureRequest::default().row_count(4));

        assert!(provider.session(&widget.id()).is_some());
        let seen = widget.seen_at_requery.last().unwrap();
        assert!(seen.applied);
        assert_eq!(seen.row_count, 4);
    }

    #[test]
    fn test_configure_after_early_set_field() {
        let provider = provider();
        let mut widget = spy(&provider);
        provider.reconfigure(
            &widget,
            ReconfigureAction::SetField {
                field: FieldId::RowCount,
                value: FieldValue::Integer(2),
            },
        );
        let anchor = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
        provider.configure(&mut widget, &ConfigureRequest::default().anchor_date(anchor));

        assert!(provider.session(&widget.id()).is_some());
        let seen = widget.seen_at_requery.last().unwrap();
        assert!(seen.applied);
        assert_eq!(seen.anchor, Anchor::Date(anchor));
    }

    #[test]
    fn test_configure_after_wire_reset() {
        let provider = provider();
        let mut widget = spy(&provider);
        let instance_id = provider
            .dispatch(&mut widget, &ProtocolMessage::lifecycle(0, Phase::Open))
            .as_instance_id()
            .unwrap();
        provider.dispatch(&mut widget, &ProtocolMessage::new(instance_id, 1, 0, Phase::Reserved));
        assert!(!provider.store().find(&widget.id()).unwrap().applied);

        provider.configure(&mut widget, &ConfigureRequest::default().row_count(4));

        assert_eq!(provider.session(&widget.id()), Some(instance_id));
        let seen = widget.seen_at_requery.last().unwrap();
        assert!(seen.applied);
        assert_eq!(seen.row_count, 4);
    }
}
