use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use nesrom_core::{RomContainer, header::RomFormat};
use tracing::info;

use crate::{
    args::Nes2Args,
    commands::{read_rom, write_rom},
};

pub fn run(args: Nes2Args) -> Result<()> {
    let rom = read_rom(&args.rom)?;
    if rom.header().format == RomFormat::Nes20 {
        info!("{} already has an NES 2.0 header", args.rom.display());
    }

    let rom = upgrade(rom)?;
    let output = args.output.unwrap_or_else(|| default_output(&args.rom));
    write_rom(&output, &rom)?;
    info!("Wrote {}", output.display());
    Ok(())
}

/// Swaps the header for its NES 2.0 form; segment data is untouched.
pub fn upgrade(rom: RomContainer) -> Result<RomContainer> {
    let header = rom.header().to_nes2();
    rom.with_header(header)
        .context("upgraded header does not fit the image")
}

fn default_output(rom: &Path) -> PathBuf {
    rom.with_extension("nes2.nes")
}
