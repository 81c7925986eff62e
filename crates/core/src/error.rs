//! Error types for the provider core

use thiserror::Error;

/// Errors raised inside the provider
///
/// None of these ever reach the host; the dispatcher degrades to an empty
/// reply and logs instead.
#[derive(Debug, Error, PartialEq)]
pub enum ProviderError {
    #[error("cell ({row}, {column}) is outside {rows} rows x {columns} columns")]
    OutOfRange {
        row: i32,
        column: i32,
        rows: u32,
        columns: usize,
    },
    #[error("unknown source: {0}")]
    UnknownSource(String),
    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),
}
