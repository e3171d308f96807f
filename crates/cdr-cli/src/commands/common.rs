//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use cdr_ir::Circuit;

/// Load a circuit from a JSON file.
pub fn load_circuit(path: &Path) -> Result<Circuit> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }

    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.eq_ignore_ascii_case("json") => {
            anyhow::bail!("Unsupported circuit format '.{ext}': expected .json")
        }
        _ => Circuit::from_json(&source)
            .with_context(|| format!("Failed to parse circuit: {}", path.display())),
    }
}

/// Split a `key=value` option.
pub fn parse_option(raw: &str) -> Result<(&str, &str)> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim(), v.trim()))
        .filter(|(k, _)| !k.is_empty())
        .with_context(|| format!("Invalid option '{raw}': expected KEY=VALUE"))
}
