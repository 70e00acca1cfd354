use std::fs;

use anyhow::{Context, Result};
use nesrom_core::{Header, Layout, Report};
use tracing::warn;

use crate::args::InfoArgs;

/// Prints the header report. A truncated image still gets its header printed.
pub fn run(args: InfoArgs) -> Result<()> {
    let bytes =
        fs::read(&args.rom).with_context(|| format!("failed to read {}", args.rom.display()))?;
    let header = Header::decode(&bytes)
        .with_context(|| format!("{} has no usable iNES header", args.rom.display()))?;

    let report = Report::new(&header);
    match Layout::compute(&header, bytes.len()) {
        Ok(layout) => print!("{}", report.with_layout(layout)),
        Err(err) => {
            warn!("{}: {err}", args.rom.display());
            print!("{report}");
        }
    }
    Ok(())
}
