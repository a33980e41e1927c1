//! Error types for snapshot decoding and output encoding.

use thiserror::Error;

/// Errors raised around the serializer. The filters and the tree walk are
/// total; only decoding input and encoding output can fail.
#[derive(Debug, Error)]
pub enum DomJsonError {
    /// Snapshot or output JSON failed to encode or decode.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading a snapshot failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
