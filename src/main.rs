//! domjson - serialize the visible structure of a rendered page.
//!
//! Main entry point for the domjson CLI.

mod cli;
mod cmd_browser;
mod cmd_snapshot;

use clap::Parser;
use tracing::{debug, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use domjson_config::{ConfigLoader, ConfigValidator, LoggingConfig};

use cli::{Cli, Commands};

/// Initialize tracing: stderr always, plus a daily-rotated file when enabled.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let file_layer = if logging.file {
        std::fs::create_dir_all(&logging.dir)?;

        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("domjson")
            .filename_suffix("log")
            .max_log_files(14)
            .build(&logging.dir)?;

        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        // The guard flushes on drop; keep it for the life of the process.
        static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
            std::sync::OnceLock::new();
        let _ = GUARD.set(guard);

        Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
    } else {
        None
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    tracing_subscriber::registry()
        .with(env_filter)
        // stdout carries the JSON output
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(file_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config_path();
    let mut config = ConfigLoader::load_or_default(&config_path)?;
    cli.apply_overrides(&mut config);

    init_tracing(&config.logging)?;
    debug!("Using config {}", config_path.display());

    for warning in ConfigValidator::validate(&config).into_result()? {
        warn!("{}: {}", warning.path, warning.message);
    }

    match &cli.command {
        Commands::Snapshot { input } => cmd_snapshot::handle_snapshot(input, &config),
        Commands::Tabs => cmd_browser::handle_tabs(&config).await,
        Commands::Capture { tab } => cmd_browser::handle_capture(tab, &config).await,
        Commands::Open { url, keep_open } => {
            cmd_browser::handle_open(url, *keep_open, &config).await
        }
    }
}
