//! Chrome DevTools Protocol capture host for domjson.
//!
//! Connects to a browser started with `--remote-debugging-port`, lists its
//! tabs and captures a tab's rendered DOM as a [`domjson_core::DomSnapshot`]:
//!
//! ```rust,ignore
//! use domjson_browser::{Browser, BrowserOptions, TabSelector};
//!
//! let browser = Browser::connect(BrowserOptions::default()).await?;
//! let snapshot = browser.capture_tab(&TabSelector::Current).await?;
//! ```

pub mod browser;
pub mod client;
pub mod error;
pub mod protocol;
pub mod session;

pub use browser::{Browser, BrowserOptions, TabInfo, TabSelector, select_page, tab_infos};
pub use client::{CdpClient, DEFAULT_REQUEST_TIMEOUT, fetch_pages, fetch_version, normalize_endpoint};
pub use error::CdpError;
pub use protocol::{BrowserVersion, PageInfo};
pub use session::{CAPTURE_SCRIPT, DEFAULT_LOAD_TIMEOUT, PageSession};
