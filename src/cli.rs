//! CLI definitions for domjson.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use domjson_browser::TabSelector;
use domjson_config::{Config, default_config_path};

/// domjson CLI.
#[derive(Parser, Debug)]
#[command(name = "domjson")]
#[command(about = "Serialize the visible, meaningful structure of a rendered page as JSON")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.domjson/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Chrome remote-debugging endpoint
    #[arg(long, global = true, env = "DOMJSON_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Treat `opacity: 0` elements as hidden
    #[arg(long, global = true)]
    pub exclude_transparent: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Convert a snapshot JSON file to DOM JSON
    Snapshot {
        /// Snapshot file, or `-` for stdin
        input: PathBuf,
    },

    /// List open browser tabs
    Tabs,

    /// Capture a live tab
    Capture {
        /// `current` or a tab id from `domjson tabs`
        #[arg(long, default_value = "current")]
        tab: TabSelector,
    },

    /// Open a URL in a new tab and capture it
    Open {
        /// Page to load
        url: String,

        /// Leave the tab open after capturing
        #[arg(long)]
        keep_open: bool,
    },
}

impl Cli {
    /// The config file to read.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(default_config_path)
    }

    /// Layer command-line flags over file settings.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(endpoint) = &self.endpoint {
            config.browser.endpoint = endpoint.clone();
        }
        if self.pretty {
            config.output.pretty = true;
        }
        if self.exclude_transparent {
            config.filter.exclude_transparent = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_snapshot() {
        let cli = Cli::try_parse_from(["domjson", "snapshot", "page.json"]).unwrap();
        match cli.command {
            Commands::Snapshot { input } => assert_eq!(input, PathBuf::from("page.json")),
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(!cli.pretty);
    }

    #[test]
    fn test_parse_capture_defaults_to_current() {
        let cli = Cli::try_parse_from(["domjson", "capture"]).unwrap();
        match cli.command {
            Commands::Capture { tab } => assert_eq!(tab, TabSelector::Current),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_capture_by_id() {
        let cli = Cli::try_parse_from(["domjson", "capture", "--tab", "9F3A"]).unwrap();
        match cli.command {
            Commands::Capture { tab } => assert_eq!(tab, TabSelector::Id("9F3A".to_string())),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_open_with_global_flags() {
        let cli = Cli::try_parse_from([
            "domjson",
            "open",
            "https://example.com",
            "--keep-open",
            "--pretty",
            "--endpoint",
            "http://127.0.0.1:9333",
        ])
        .unwrap();
        match &cli.command {
            Commands::Open { url, keep_open } => {
                assert_eq!(url, "https://example.com");
                assert!(*keep_open);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(cli.pretty);
        assert_eq!(cli.endpoint.as_deref(), Some("http://127.0.0.1:9333"));
    }

    #[test]
    fn test_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["domjson"]).is_err());
    }

    #[test]
    fn test_apply_overrides() {
        let cli = Cli::try_parse_from([
            "domjson",
            "--exclude-transparent",
            "--endpoint",
            "http://10.0.0.2:9222",
            "tabs",
        ])
        .unwrap();
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.browser.endpoint, "http://10.0.0.2:9222");
        assert!(config.filter.exclude_transparent);
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_config_path_default() {
        let cli = Cli::try_parse_from(["domjson", "tabs"]).unwrap();
        assert!(cli.config_path().ends_with(".domjson/config.toml"));

        let cli = Cli::try_parse_from(["domjson", "-c", "/tmp/custom.toml", "tabs"]).unwrap();
        assert_eq!(cli.config_path(), PathBuf::from("/tmp/custom.toml"));
    }
}
