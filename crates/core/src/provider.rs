//! Provider dispatcher - answers host protocol messages for many widgets
//!
//! One `Provider` wraps one row source and serves any number of widgets at
//! the same time. Each widget is told apart by its identity and gets its own
//! configuration record in the shared store.

use log::{debug, trace, warn};
use rg_rows_types::{
    CellValue, ConfigurationRecord, ControlKind, Phase, ProtocolMessage, ReconfigureAction,
    Reply, WidgetId, DEFAULT_ROW_COUNT, MAX_ROW_COUNT,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

use crate::clock::{Clock, SystemClock};
use crate::constants::{COMBO_LEFT_MARGIN, HOST_DEFAULT_WIDTH};
use crate::error::ProviderError;
use crate::instance_id::InstanceIdGenerator;
use crate::row_source::{BoxedRowSource, DefaultsContext};
use crate::store::ConfigurationStore;
use crate::widget::Widget;

/// Extension points for the Close and End phases
pub trait LifecycleHooks: Send + Sync {
    fn on_close(&self, _widget: &WidgetId, _instance_id: i64) {}

    fn on_end(&self, _widget: &WidgetId, _instance_id: i64) {}
}

/// Hooks that do nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHooks;

impl LifecycleHooks for NoopHooks {}

/// Demand-driven data provider for list widgets
pub struct Provider {
    source: BoxedRowSource,
    store: ConfigurationStore,
    ids: InstanceIdGenerator,
    /// Current instance id per widget, set at Open and cleared at Close/End
    sessions: Mutex<HashMap<WidgetId, i64>>,
    clock: Box<dyn Clock>,
    hooks: Box<dyn LifecycleHooks>,
    fallback_rows: u32,
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("source", &self.source.metadata().id)
            .field("widgets", &self.store.len())
            .field("id_strategy", &self.ids.strategy())
            .field("fallback_rows", &self.fallback_rows)
            .finish()
    }
}

impl Provider {
    pub fn new(source: BoxedRowSource) -> Self {
        Self {
            source,
            store: ConfigurationStore::new(),
            ids: InstanceIdGenerator::default(),
            sessions: Mutex::new(HashMap::new()),
            clock: Box::new(SystemClock::local()),
            hooks: Box::new(NoopHooks),
            fallback_rows: DEFAULT_ROW_COUNT,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_id_generator(mut self, ids: InstanceIdGenerator) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_hooks(mut self, hooks: impl LifecycleHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    /// Row count used when neither the widget tag nor the source gives one
    pub fn with_fallback_rows(mut self, rows: u32) -> Self {
        self.fallback_rows = rows;
        self
    }

    pub fn source(&self) -> &BoxedRowSource {
        &self.source
    }

    pub fn store(&self) -> &ConfigurationStore {
        &self.store
    }

    /// Answer one host invocation
    ///
    /// Never fails: unknown phases, unknown widgets and out-of-range cells all
    /// degrade to a harmless reply.
    pub fn dispatch(&self, widget: &mut dyn Widget, msg: &ProtocolMessage) -> Reply {
        let Some(phase) = msg.phase() else {
            debug!("Ignoring unknown phase code {}", msg.phase);
            return Reply::Empty;
        };
        // Row queries are far more frequent than lifecycle calls
        let level = if phase.is_query() {
            log::Level::Trace
        } else {
            log::Level::Debug
        };
        log::log!(
            level,
            "dispatch {} for widget {} (instance {}, row {}, column {})",
            phase,
            widget.id(),
            msg.instance_id,
            msg.row,
            msg.column
        );

        match phase {
            Phase::Initialize => Reply::Proceed(self.initialize(widget)),
            Phase::Open => Reply::InstanceId(self.open(&*widget)),
            Phase::Reserved => {
                match ReconfigureAction::from_wire(msg.row) {
                    Some(action) => {
                        self.reconfigure(&*widget, action);
                    }
                    None => debug!("Ignoring reserved-phase action code {}", msg.row),
                }
                Reply::Empty
            }
            Phase::GetRowCount => Reply::Count(i64::from(self.record_for(&*widget).row_count)),
            Phase::GetColumnCount => Reply::Count(self.source.column_count() as i64),
            Phase::GetColumnWidth => Reply::Width(self.column_width(msg.column)),
            Phase::GetValue => {
                let record = self.record_for(&*widget);
                match self.cell(&record, msg.row, msg.column) {
                    Ok(value) => Reply::Value(value),
                    Err(e) => {
                        debug!("Widget {}: {}", widget.id(), e);
                        Reply::Value(CellValue::Null)
                    }
                }
            }
            Phase::GetFormat => Reply::Format(self.format_for(&*widget, msg.column)),
            Phase::Close => {
                self.end_session(&widget.id(), msg.instance_id);
                self.hooks.on_close(&widget.id(), msg.instance_id);
                Reply::Empty
            }
            Phase::End => {
                self.end_session(&widget.id(), msg.instance_id);
                self.hooks.on_end(&widget.id(), msg.instance_id);
                Reply::Empty
            }
        }
    }

    /// One-time widget setup, then make sure a committed record exists
    pub(crate) fn initialize(&self, widget: &mut dyn Widget) -> bool {
        widget.set_column_count(self.source.column_count());
        widget.set_column_widths(&self.source.column_widths());
        if widget.control_kind() == ControlKind::Combo {
            widget.set_left_margin(COMBO_LEFT_MARGIN);
        }
        self.ensure_defaults(&*widget);
        true
    }

    /// Start a session and hand out its id
    pub(crate) fn open(&self, widget: &dyn Widget) -> i64 {
        let id = widget.id();
        self.ensure_defaults(widget);
        let instance_id = self.ids.next();
        if let Some(previous) = self.sessions().insert(id.clone(), instance_id) {
            debug!(
                "Widget {} reopened, session {} replaced by {}",
                id, previous, instance_id
            );
        }
        instance_id
    }

    /// Whether `instance_id` is the live session of this widget
    pub fn is_current_session(&self, widget: &WidgetId, instance_id: i64) -> bool {
        self.sessions().get(widget) == Some(&instance_id)
    }

    /// Live session id of a widget, if it is open
    pub fn session(&self, widget: &WidgetId) -> Option<i64> {
        self.sessions().get(widget).copied()
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<WidgetId, i64>> {
        self.sessions.lock().unwrap_or_else(|poisoned| {
            warn!("Session table lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn end_session(&self, widget: &WidgetId, instance_id: i64) {
        let mut sessions = self.sessions();
        match sessions.get(widget) {
            Some(current) if *current == instance_id => {
                sessions.remove(widget);
                debug!("Session {} of widget {} ended", instance_id, widget);
            }
            Some(current) => debug!(
                "Widget {}: ignoring teardown of stale session {} (current {})",
                widget, instance_id, current
            ),
            None => trace!("Widget {}: teardown without open session", widget),
        }
    }

    /// Commit defaults for a widget unless they are already applied
    pub(crate) fn ensure_defaults(&self, widget: &dyn Widget) -> bool {
        let id = widget.id();
        self.store
            .apply_defaults_with(&id, || self.source.defaults(&self.defaults_context(widget)))
    }

    fn defaults_context(&self, widget: &dyn Widget) -> DefaultsContext {
        let tag_rows = widget
            .tag()
            .and_then(|tag| tag.trim().parse::<u32>().ok())
            .filter(|rows| *rows <= MAX_ROW_COUNT);
        DefaultsContext {
            today: self.clock.today(),
            rows: tag_rows
                .or_else(|| self.source.default_rows())
                .unwrap_or(self.fallback_rows)
                .min(MAX_ROW_COUNT),
        }
    }

    /// Record for a row/format query
    ///
    /// A widget that was never initialized gets a fresh committed record
    /// instead of an error. A reset record is returned as frozen at reset
    /// time.
    fn record_for(&self, widget: &dyn Widget) -> ConfigurationRecord {
        let id = widget.id();
        if let Some(record) = self.store.find(&id) {
            return record;
        }
        warn!("Widget {} queried before Initialize, creating defaults", id);
        self.ensure_defaults(widget);
        self.store.find_or_create(&id)
    }

    fn column_width(&self, column: i32) -> i32 {
        usize::try_from(column)
            .ok()
            .and_then(|index| self.source.column_widths().get(index).copied())
            .unwrap_or(HOST_DEFAULT_WIDTH)
    }

    fn format_for(&self, widget: &dyn Widget, column: i32) -> Option<String> {
        if usize::try_from(column).ok() != Some(self.source.display_column()) {
            return None;
        }
        let record = self.record_for(widget);
        Some(record.display_format).filter(|format| !format.is_empty())
    }

    /// Bounds-checked cell lookup
    fn cell(&self, record: &ConfigurationRecord, row: i32, column: i32) -> Result<CellValue, ProviderError> {
        let columns = self.source.column_count();
        let out_of_range = || ProviderError::OutOfRange {
            row,
            column,
            rows: record.row_count,
            columns,
        };
        let row_index = u32::try_from(row).map_err(|_| out_of_range())?;
        let column_index = usize::try_from(column).map_err(|_| out_of_range())?;
        if row_index >= record.row_count || column_index >= columns {
            return Err(out_of_range());
        }
        Ok(self
            .source
            .value(row_index, column_index, record)
            .unwrap_or_default())
    }
}
