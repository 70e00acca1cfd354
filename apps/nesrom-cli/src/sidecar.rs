//! `header.json`, the header half of an unpacked directory.

use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use nesrom_core::Header;

pub const HEADER_FILE: &str = "header.json";

pub fn write(dir: &Path, header: &Header) -> Result<()> {
    let path = dir.join(HEADER_FILE);
    let mut json = serde_json::to_string_pretty(header).context("failed to serialize header")?;
    json.push('\n');
    fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))
}

/// Reads the header back and checks every field survives encoding.
pub fn read(dir: &Path) -> Result<Header> {
    let path = dir.join(HEADER_FILE);
    let text =
        fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
    let header: Header = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a valid header description", path.display()))?;
    let normalized = header
        .normalized()
        .with_context(|| format!("{} describes a header that cannot be encoded", path.display()))?;
    if normalized != header {
        bail!(
            "{} sets fields its {} header cannot carry; packing would drop them",
            path.display(),
            header.format
        );
    }
    Ok(header)
}
