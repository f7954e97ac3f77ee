//! Error types for mask tables, word conversion and document handling.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort the conversion of a single file.
///
/// None of these should stop a batch: callers log them and move on to the
/// next input (see [`crate::batch::convert_all`]).
#[derive(Debug, Error)]
pub enum Error {
    /// The input buffer had no bytes at all.
    #[error("input is empty")]
    EmptyInput,

    /// A document or descriptor is structurally invalid: missing key, wrong
    /// value type, bad hex mask, zero mask, duplicate field name.
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// Word width is not one of 8, 16, 32 or 64 bits.
    #[error("unsupported word width: {0} bits (expected 8, 16, 32 or 64)")]
    UnsupportedWidth(u32),

    /// A record lacks a field that the mask table requires.
    #[error("record {record} is missing field `{field}`")]
    MissingField { record: usize, field: String },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedDocument(message.into())
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
