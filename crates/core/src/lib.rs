//! rg-rows-core: Core traits and the provider dispatcher for rg-Rows.
//!
//! This crate contains the fundamental traits (RowSource, Widget), the
//! per-widget ConfigurationStore, the instance id generator, the Provider
//! that answers host protocol messages, and the source Registry.

mod clock;
pub mod constants;
mod error;
mod instance_id;
mod provider;
mod reconfigure;
mod registry;
mod row_source;
mod store;
mod widget;

pub use clock::{Clock, FixedClock, SystemClock};
pub use constants::{COMBO_LEFT_MARGIN, HIDDEN_COLUMN_WIDTH, HOST_DEFAULT_WIDTH};
pub use error::ProviderError;
pub use instance_id::{IdStrategy, InstanceIdGenerator};
pub use provider::{LifecycleHooks, NoopHooks, Provider};
pub use registry::{Registry, SourceFactory, SourceInfo};
pub use row_source::{BoxedRowSource, DefaultsContext, RowSource, SourceMetadata};
pub use store::ConfigurationStore;
pub use widget::Widget;

// Re-export types used in trait signatures for convenience
pub use rg_rows_types::{
    Anchor, CellValue, ConfigurationRecord, ConfigureRequest, ControlKind, FieldId,
    FieldMetadata, FieldPurpose, FieldType, FieldUpdate, FieldValue, Phase, ProtocolMessage,
    ReconfigureAction, RecordDefaults, Reply, SourceConfig, WidgetId, MAX_ROW_COUNT,
};
