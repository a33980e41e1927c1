//! Tab-level facade over [`CdpClient`].

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, warn};

use domjson_core::DomSnapshot;

use crate::client::{CdpClient, DEFAULT_REQUEST_TIMEOUT};
use crate::error::CdpError;
use crate::protocol::PageInfo;
use crate::session::{DEFAULT_LOAD_TIMEOUT, PageSession};

/// Connection settings.
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// Remote-debugging HTTP endpoint.
    pub endpoint: String,
    /// Timeout for a single CDP request.
    pub request_timeout: Duration,
    /// Timeout for a page to finish loading.
    pub load_timeout: Duration,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:9222".to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            load_timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }
}

/// Which tab to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabSelector {
    /// The most recently focused page.
    Current,
    /// A target id from `/json/list`.
    Id(String),
}

impl FromStr for TabSelector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "current" => TabSelector::Current,
            id => TabSelector::Id(id.to_string()),
        })
    }
}

impl fmt::Display for TabSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabSelector::Current => f.write_str("current"),
            TabSelector::Id(id) => f.write_str(id),
        }
    }
}

/// An open tab as reported to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabInfo {
    pub index: usize,
    pub id: String,
    pub title: String,
    pub url: String,
    pub is_active: bool,
}

/// Page targets only, numbered in discovery order. Chrome lists the most
/// recently focused page first, so that one is active.
pub fn tab_infos(pages: &[PageInfo]) -> Vec<TabInfo> {
    pages
        .iter()
        .filter(|p| p.is_page())
        .enumerate()
        .map(|(index, page)| TabInfo {
            index,
            id: page.id.clone(),
            title: page.title.clone(),
            url: page.url.clone(),
            is_active: index == 0,
        })
        .collect()
}

/// Find the page target `selector` refers to.
pub fn select_page<'a>(
    pages: &'a [PageInfo],
    selector: &TabSelector,
) -> Result<&'a PageInfo, CdpError> {
    let mut candidates = pages.iter().filter(|p| p.is_page());
    match selector {
        TabSelector::Current => candidates
            .next()
            .ok_or_else(|| CdpError::TabNotFound("no open tabs".to_string())),
        TabSelector::Id(id) => candidates
            .find(|p| &p.id == id)
            .ok_or_else(|| CdpError::TabNotFound(id.clone())),
    }
}

/// A connected browser.
pub struct Browser {
    client: CdpClient,
    options: BrowserOptions,
}

impl Browser {
    /// Connect to the browser described by `options`.
    pub async fn connect(options: BrowserOptions) -> Result<Self, CdpError> {
        let client = CdpClient::connect(&options.endpoint, options.request_timeout).await?;
        info!("Connected to browser at {}", client.http_endpoint());
        Ok(Self { client, options })
    }

    /// Open tabs.
    pub async fn tabs(&self) -> Result<Vec<TabInfo>, CdpError> {
        let pages = self.client.list_pages().await?;
        Ok(tab_infos(&pages))
    }

    /// Resolve `selector` against the currently open tabs.
    pub async fn resolve_tab(&self, selector: &TabSelector) -> Result<PageInfo, CdpError> {
        let pages = self.client.list_pages().await?;
        select_page(&pages, selector).cloned()
    }

    async fn attach(&self, target_id: &str) -> Result<PageSession, CdpError> {
        Ok(self
            .client
            .attach_page(target_id)
            .await?
            .with_load_timeout(self.options.load_timeout))
    }

    /// Capture the DOM of an existing tab.
    pub async fn capture_tab(&self, selector: &TabSelector) -> Result<DomSnapshot, CdpError> {
        let page = self.resolve_tab(selector).await?;
        debug!("Capturing tab {} ({})", page.id, page.url);

        let session = self.attach(&page.id).await?;
        let captured = session.capture_snapshot().await;

        if let Err(e) = session.detach().await {
            warn!("Failed to detach from {}: {}", page.id, e);
        }
        captured
    }

    /// Open `url` in a new tab, wait for it to load and capture it.
    ///
    /// The tab is closed afterwards unless `keep_open` is set, including
    /// when navigation or capture fails.
    pub async fn open_and_capture(
        &self,
        url: &str,
        keep_open: bool,
    ) -> Result<DomSnapshot, CdpError> {
        let session = self
            .client
            .new_page(None)
            .await?
            .with_load_timeout(self.options.load_timeout);

        let captured = match session.navigate(url).await {
            Ok(_) => session.capture_snapshot().await,
            Err(e) => Err(e),
        };

        if keep_open {
            if let Err(e) = session.detach().await {
                warn!("Failed to detach from {}: {}", session.target_id(), e);
            }
        } else if let Err(e) = self.client.close_page(session.target_id()).await {
            warn!("Failed to close tab {}: {}", session.target_id(), e);
        }

        captured
    }
}

#[cfg(test)]
#[path = "browser_tests.rs"]
mod tests;
