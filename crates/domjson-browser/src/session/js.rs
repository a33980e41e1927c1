//! JavaScript evaluation for CDP page session.

use serde_json::{Value, json};

use crate::error::CdpError;
use crate::protocol::EvaluateResult;

use super::core::PageSession;

impl PageSession {
    /// Evaluate a JavaScript expression and return its value.
    ///
    /// Promises are awaited. A thrown exception becomes
    /// [`CdpError::JavaScript`]; an `undefined` result becomes `Value::Null`.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        evaluation_value(result)
    }
}

/// Unpack a `Runtime.evaluate` result.
pub(super) fn evaluation_value(result: Value) -> Result<Value, CdpError> {
    let evaluated: EvaluateResult = serde_json::from_value(result)?;

    if let Some(exception) = evaluated.exception_details {
        return Err(CdpError::JavaScript(exception.message()));
    }

    Ok(evaluated.result.value.unwrap_or(Value::Null))
}
