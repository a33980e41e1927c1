//! `domjson snapshot`: convert a saved snapshot to DOM JSON.

use std::io;
use std::path::Path;

use tracing::debug;

use domjson_config::Config;
use domjson_core::{DomJsonError, DomJsonTree, DomSerializer, DomSnapshot, FilterOptions};

/// Serializer configured from `[filter]`.
pub(crate) fn serializer_for(config: &Config) -> DomSerializer {
    DomSerializer::new(
        FilterOptions::default().exclude_transparent(config.filter.exclude_transparent),
    )
}

/// Render `value` honoring `[output] pretty`.
pub(crate) fn render<T: serde::Serialize>(value: &T, config: &Config) -> Result<String, DomJsonError> {
    let rendered = if config.output.pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(rendered)
}

/// Read a snapshot from `input`, or stdin when it is `-`.
pub(crate) fn read_snapshot(input: &Path) -> Result<DomSnapshot, DomJsonError> {
    if input == Path::new("-") {
        debug!("Reading snapshot from stdin");
        DomSnapshot::read_from(io::stdin().lock())
    } else {
        debug!("Reading snapshot from {}", input.display());
        DomSnapshot::load(input)
    }
}

pub(crate) fn convert(snapshot: &DomSnapshot, config: &Config) -> Result<String, DomJsonError> {
    let tree: DomJsonTree = snapshot.to_dom_json(&serializer_for(config));
    render(&tree, config)
}

pub(crate) fn handle_snapshot(input: &Path, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let snapshot = read_snapshot(input)?;
    println!("{}", convert(&snapshot, config)?);
    Ok(())
}
