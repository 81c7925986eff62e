//! Protocol message and reply types

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::phase::Phase;

/// One invocation of the provider by the host
///
/// The widget reference travels alongside the message. Created per call and
/// never retained.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProtocolMessage {
    pub instance_id: i64,
    pub row: i32,
    pub column: i32,
    /// Raw wire code; see [`Phase`]
    pub phase: i32,
}

impl ProtocolMessage {
    pub fn new(instance_id: i64, row: i32, column: i32, phase: Phase) -> Self {
        Self {
            instance_id,
            row,
            column,
            phase: phase.code(),
        }
    }

    /// Message for a phase that carries no row/column
    pub fn lifecycle(instance_id: i64, phase: Phase) -> Self {
        Self::new(instance_id, 0, 0, phase)
    }

    /// Decoded phase, `None` for codes outside the fixed enumeration
    pub fn phase(&self) -> Option<Phase> {
        Phase::from_code(self.phase)
    }
}

/// What the provider hands back for one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reply {
    /// Answer to Initialize
    Proceed(bool),
    /// Answer to Open
    InstanceId(i64),
    /// Answer to GetRowCount / GetColumnCount
    Count(i64),
    /// Answer to GetColumnWidth; `-1` asks the host to use its default
    Width(i32),
    /// Answer to GetValue
    Value(CellValue),
    /// Answer to GetFormat; `None` means no format for that column
    Format(Option<String>),
    /// Nothing to return
    Empty,
}

impl Reply {
    pub fn as_count(&self) -> Option<i64> {
        match self {
            Reply::Count(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&CellValue> {
        match self {
            Reply::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_instance_id(&self) -> Option<i64> {
        match self {
            Reply::InstanceId(id) => Some(*id),
            _ => None,
        }
    }
}
