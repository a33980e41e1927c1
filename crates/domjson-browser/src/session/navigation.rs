//! Navigation for CDP page session.

use std::time::{Duration, Instant};

use serde_json::json;
use tracing::debug;

use crate::error::CdpError;

use super::core::PageSession;

const LOAD_POLL_INTERVAL: Duration = Duration::from_millis(100);

impl PageSession {
    /// Navigate to `url` and wait for the document to load. Returns the frame id.
    pub async fn navigate(&self, url: &str) -> Result<String, CdpError> {
        let result = self
            .call("Page.navigate", Some(json!({"url": url})))
            .await?;

        if let Some(error) = result.get("errorText").and_then(|e| e.as_str()) {
            return Err(CdpError::NavigationFailed(format!("{}: {}", url, error)));
        }

        let frame_id = result["frameId"].as_str().unwrap_or("main").to_string();

        self.wait_for_load().await?;

        debug!("Navigated to {}", url);
        Ok(frame_id)
    }

    /// Poll `document.readyState` until the page is interactive.
    pub async fn wait_for_load(&self) -> Result<(), CdpError> {
        let start = Instant::now();

        loop {
            let state = self.evaluate("document.readyState").await?;
            if is_loaded(state.as_str()) {
                return Ok(());
            }

            if start.elapsed() > self.load_timeout {
                return Err(CdpError::Timeout(format!(
                    "Page load exceeded {:?}",
                    self.load_timeout
                )));
            }

            tokio::time::sleep(LOAD_POLL_INTERVAL).await;
        }
    }
}

pub(super) fn is_loaded(ready_state: Option<&str>) -> bool {
    matches!(ready_state, Some("complete" | "interactive"))
}
