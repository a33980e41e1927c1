//! Live browser commands: `tabs`, `capture`, `open`.

use std::time::Duration;

use tracing::info;

use domjson_browser::{Browser, BrowserOptions, TabSelector};
use domjson_config::Config;

use crate::cmd_snapshot::{convert, render};

pub(crate) fn browser_options(config: &Config) -> BrowserOptions {
    BrowserOptions {
        endpoint: config.browser.endpoint.clone(),
        request_timeout: Duration::from_secs(config.browser.request_timeout_secs),
        load_timeout: Duration::from_secs(config.browser.load_timeout_secs),
    }
}

pub(crate) async fn handle_tabs(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let browser = Browser::connect(browser_options(config)).await?;
    let tabs = browser.tabs().await?;
    println!("{}", render(&tabs, config)?);
    Ok(())
}

pub(crate) async fn handle_capture(
    tab: &TabSelector,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let browser = Browser::connect(browser_options(config)).await?;
    let snapshot = browser.capture_tab(tab).await?;
    info!("Captured {} ({})", snapshot.title, snapshot.url);
    println!("{}", convert(&snapshot, config)?);
    Ok(())
}

pub(crate) async fn handle_open(
    url: &str,
    keep_open: bool,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let browser = Browser::connect(browser_options(config)).await?;
    let snapshot = browser.open_and_capture(url, keep_open).await?;
    info!("Captured {} ({})", snapshot.title, snapshot.url);
    println!("{}", convert(&snapshot, config)?);
    Ok(())
}
