//! Core session struct and CDP command dispatch.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use tracing::debug;

use crate::client::Connection;
use crate::error::CdpError;

/// How long [`PageSession::wait_for_load`] polls before giving up.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// A session attached to a single page target.
pub struct PageSession {
    /// Target ID.
    pub(super) target_id: String,
    /// Session ID for this target.
    pub(super) session_id: String,
    /// Connection shared with the client.
    pub(super) connection: Arc<Connection>,
    pub(super) load_timeout: Duration,
}

impl PageSession {
    pub(crate) fn new(target_id: String, session_id: String, connection: Arc<Connection>) -> Self {
        Self {
            target_id,
            session_id,
            connection,
            load_timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }

    /// Override the page load timeout.
    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = timeout;
        self
    }

    /// Get target ID.
    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    /// Get session ID.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Send a CDP command to this page session.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.connection
            .call(method, params, Some(&self.session_id))
            .await
    }

    /// Enable the domains capture relies on.
    pub(crate) async fn enable_domains(&self) -> Result<(), CdpError> {
        self.call("Page.enable", None).await?;
        self.call("Runtime.enable", None).await?;

        debug!("Enabled CDP domains for session {}", self.session_id);
        Ok(())
    }

    /// Detach from the target, leaving the tab open.
    pub async fn detach(&self) -> Result<(), CdpError> {
        self.connection
            .call(
                "Target.detachFromTarget",
                Some(json!({"sessionId": self.session_id})),
                None,
            )
            .await?;
        Ok(())
    }
}
