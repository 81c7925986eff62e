//! In-memory list widget that drives a provider the way a host would
//!
//! `ListWidget` plays the host side of the protocol: it issues the phase
//! sequence, stores the layout the provider pushes, and renders every cell
//! with the format the provider reports for its column.

use log::{debug, trace, warn};
use rg_rows_core::{
    CellValue, ControlKind, Phase, ProtocolMessage, Provider, Reply, Widget, WidgetId,
    HOST_DEFAULT_WIDTH,
};

/// One row as shown by the widget
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    /// Raw values, one per column
    pub values: Vec<CellValue>,
    /// Rendered text, one per column
    pub cells: Vec<String>,
}

/// Host-side list or combo box
#[derive(Debug, Clone)]
pub struct ListWidget {
    id: WidgetId,
    kind: ControlKind,
    tag: Option<String>,
    column_count: usize,
    column_widths: Vec<i32>,
    left_margin: i32,
    instance_id: Option<i64>,
    rows: Vec<RenderedRow>,
    requery_pending: bool,
}

impl ListWidget {
    pub fn new(id: impl Into<WidgetId>, kind: ControlKind) -> Self {
        Self {
            id: id.into(),
            kind,
            tag: None,
            column_count: 0,
            column_widths: Vec::new(),
            left_margin: 0,
            instance_id: None,
            rows: Vec::new(),
            requery_pending: false,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn instance_id(&self) -> Option<i64> {
        self.instance_id
    }

    pub fn rows(&self) -> &[RenderedRow] {
        &self.rows
    }

    pub fn column_widths(&self) -> &[i32] {
        &self.column_widths
    }

    pub fn left_margin(&self) -> i32 {
        self.left_margin
    }

    pub fn is_requery_pending(&self) -> bool {
        self.requery_pending
    }

    fn send(&mut self, provider: &Provider, row: i32, column: i32, phase: Phase) -> Reply {
        let msg = ProtocolMessage::new(self.instance_id.unwrap_or(0), row, column, phase);
        provider.dispatch(self, &msg)
    }

    /// Initialize, open and pull the first batch of rows
    pub fn open(&mut self, provider: &Provider) {
        if self.send(provider, 0, 0, Phase::Initialize) != Reply::Proceed(true) {
            warn!("Provider declined to initialize widget {}", self.id);
            return;
        }
        match self.send(provider, 0, 0, Phase::Open) {
            Reply::InstanceId(id) => self.instance_id = Some(id),
            other => warn!("Widget {}: unexpected Open reply {:?}", self.id, other),
        }
        self.pull(provider);
    }

    /// Run the full pull sequence against the provider
    pub fn pull(&mut self, provider: &Provider) {
        self.requery_pending = false;

        let columns = self
            .send(provider, 0, 0, Phase::GetColumnCount)
            .as_count()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        let rows = self
            .send(provider, 0, 0, Phase::GetRowCount)
            .as_count()
            .and_then(|n| i32::try_from(n).ok())
            .unwrap_or(0)
            .max(0);

        for column in 0..columns {
            if let Reply::Width(width) = self.send(provider, 0, column as i32, Phase::GetColumnWidth) {
                if width != HOST_DEFAULT_WIDTH {
                    if let Some(slot) = self.column_widths.get_mut(column) {
                        *slot = width;
                    }
                }
            }
        }

        let mut rendered = Vec::new();
        for row in 0..rows {
            let mut values = Vec::with_capacity(columns);
            let mut cells = Vec::with_capacity(columns);
            for column in 0..columns {
                let value = self
                    .send(provider, row, column as i32, Phase::GetValue)
                    .as_value()
                    .cloned()
                    .unwrap_or_default();
                let format = match self.send(provider, row, column as i32, Phase::GetFormat) {
                    Reply::Format(format) => format,
                    _ => None,
                };
                cells.push(value.render(format.as_deref()));
                values.push(value);
            }
            trace!("Widget {} row {}: {:?}", self.id, row, cells);
            rendered.push(RenderedRow { values, cells });
        }

        debug!("Widget {} pulled {} rows x {} columns", self.id, rows, columns);
        self.rows = rendered;
    }

    /// Pull again if a requery was requested; returns whether it did
    pub fn refresh(&mut self, provider: &Provider) -> bool {
        if !self.requery_pending {
            return false;
        }
        self.pull(provider);
        true
    }

    /// Close and end the current session
    pub fn close(&mut self, provider: &Provider) {
        self.send(provider, 0, 0, Phase::Close);
        self.send(provider, 0, 0, Phase::End);
        self.instance_id = None;
    }

    /// Text of the visible columns (non-zero width), one string per row
    pub fn visible_text(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| {
                row.cells
                    .iter()
                    .enumerate()
                    .filter(|(column, _)| self.column_widths.get(*column).copied().unwrap_or(1) != 0)
                    .map(|(_, cell)| cell.as_str())
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect()
    }
}

impl Widget for ListWidget {
    fn id(&self) -> WidgetId {
        self.id.clone()
    }

    fn control_kind(&self) -> ControlKind {
        self.kind
    }

    fn tag(&self) -> Option<String> {
        self.tag.clone()
    }

    fn set_column_count(&mut self, count: usize) {
        self.column_count = count;
        self.column_widths.resize(count, HOST_DEFAULT_WIDTH);
    }

    fn set_column_widths(&mut self, widths: &[i32]) {
        self.column_widths = widths.to_vec();
        self.column_widths.resize(self.column_count, HOST_DEFAULT_WIDTH);
    }

    fn set_left_margin(&mut self, margin: i32) {
        self.left_margin = margin;
    }

    fn request_requery(&mut self) {
        self.requery_pending = true;
    }
}
