//! Protocol phases issued by the host widget.
//!
//! The numeric codes are a contract with the host and must never be
//! renumbered.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminator of a protocol message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum Phase {
    /// First contact for this widget
    Initialize = 0,
    /// Session start, answered with a fresh instance id
    Open = 1,
    /// Unused by the host, routed to the reconfiguration channel
    Reserved = 2,
    /// Number of rows to expose
    GetRowCount = 3,
    /// Number of columns to expose
    GetColumnCount = 4,
    /// Width of one column
    GetColumnWidth = 5,
    /// Value of one cell
    GetValue = 6,
    /// Display format of one column
    GetFormat = 7,
    /// Recalculation / closing hook
    Close = 8,
    /// Final teardown hook
    End = 9,
}

impl Phase {
    /// All phases in wire order
    pub const ALL: [Phase; 10] = [
        Phase::Initialize,
        Phase::Open,
        Phase::Reserved,
        Phase::GetRowCount,
        Phase::GetColumnCount,
        Phase::GetColumnWidth,
        Phase::GetValue,
        Phase::GetFormat,
        Phase::Close,
        Phase::End,
    ];

    /// Decode a wire code. Unknown codes yield `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|phase| phase.code() == code)
    }

    /// Wire code of this phase
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Whether this phase queries row data (as opposed to lifecycle hooks)
    pub fn is_query(self) -> bool {
        matches!(
            self,
            Phase::GetRowCount
                | Phase::GetColumnCount
                | Phase::GetColumnWidth
                | Phase::GetValue
                | Phase::GetFormat
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Initialize => "initialize",
            Phase::Open => "open",
            Phase::Reserved => "reserved",
            Phase::GetRowCount => "get_row_count",
            Phase::GetColumnCount => "get_column_count",
            Phase::GetColumnWidth => "get_column_width",
            Phase::GetValue => "get_value",
            Phase::GetFormat => "get_format",
            Phase::Close => "close",
            Phase::End => "end",
        };
        f.write_str(name)
    }
}

impl TryFrom<i32> for Phase {
    type Error = i32;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Phase::from_code(code).ok_or(code)
    }
}
