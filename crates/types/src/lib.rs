//! rg-rows-types: Shared data types for rg-Rows list providers.
//!
//! This crate contains pure data types (protocol phases, messages, replies,
//! configuration records, field metadata) that are shared across all rg-Rows
//! crates. Nothing in here knows about a host widget or holds state.

pub mod cell;
pub mod field;
pub mod message;
pub mod phase;
pub mod reconfigure;
pub mod record;
pub mod source_configs;
pub mod widget;

// Re-export commonly used types at the crate root for convenience
pub use cell::{Anchor, CellValue};
pub use field::{FieldId, FieldMetadata, FieldPurpose, FieldType, FieldValue};
pub use message::{ProtocolMessage, Reply};
pub use phase::Phase;
pub use reconfigure::{ConfigureRequest, FieldUpdate, ReconfigureAction};
pub use record::{ConfigurationRecord, RecordDefaults, DEFAULT_ROW_COUNT, MAX_ROW_COUNT};
pub use source_configs::SourceConfig;
pub use widget::{ControlKind, WidgetId};
