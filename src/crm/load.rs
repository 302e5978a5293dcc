use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::EngineOptions;

use super::snapshot::Snapshot;

pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    parse_snapshot(&raw).with_context(|| format!("failed to parse snapshot {}", path.display()))
}

pub fn load_options(path: &Path) -> Result<EngineOptions> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read options {}", path.display()))?;
    let options: EngineOptions =
        serde_json::from_str(&raw).context("invalid JSON in options file")?;
    Ok(options.sanitized())
}

fn parse_snapshot(raw: &str) -> Result<Snapshot> {
    serde_json::from_str(raw).context("invalid JSON in snapshot")
}
