//! Host widget collaborator

use rg_rows_types::{ControlKind, WidgetId};

/// The capability surface a provider needs from the widget it feeds
///
/// Rendering and property storage belong to the host; a provider only reads
/// the identity, kind and tag, pushes static layout during Initialize, and
/// asks for a requery after reconfiguration.
pub trait Widget {
    /// Stable identity, derived from the host's widget reference
    fn id(&self) -> WidgetId;

    /// List box or combo box
    fn control_kind(&self) -> ControlKind {
        ControlKind::Combo
    }

    /// Free-text tag, used to seed a per-widget default row count
    fn tag(&self) -> Option<String> {
        None
    }

    /// Set the number of columns the widget shows
    fn set_column_count(&mut self, count: usize);

    /// Set the width of every column
    fn set_column_widths(&mut self, widths: &[i32]);

    /// Indent of the text portion (combo boxes only)
    fn set_left_margin(&mut self, _margin: i32) {}

    /// Force the widget to redo its full pull sequence
    fn request_requery(&mut self);
}
