//! DOM snapshot capture.

use serde_json::Value;
use tracing::debug;

use domjson_core::DomSnapshot;

use crate::error::CdpError;

use super::core::PageSession;

/// In-page script that walks `document.body` and returns the snapshot as
/// JSON text, or `null` when the document has no body.
pub const CAPTURE_SCRIPT: &str = include_str!("capture_script.js");

impl PageSession {
    /// Capture the current document as a [`DomSnapshot`].
    ///
    /// Style and layout are read in one synchronous in-page pass.
    pub async fn capture_snapshot(&self) -> Result<DomSnapshot, CdpError> {
        let value = self.evaluate(CAPTURE_SCRIPT).await?;
        let snapshot = snapshot_from_value(value)?;

        debug!(
            "Captured {} ({} top-level children)",
            snapshot.url,
            snapshot.body.children.len()
        );
        Ok(snapshot)
    }
}

pub(super) fn snapshot_from_value(value: Value) -> Result<DomSnapshot, CdpError> {
    match value {
        Value::String(json) => Ok(DomSnapshot::from_json(&json)?),
        Value::Null => Err(CdpError::InvalidResponse(
            "Document has no body to capture".to_string(),
        )),
        other => Err(CdpError::InvalidResponse(format!(
            "Expected snapshot JSON text, got {}",
            other
        ))),
    }
}
