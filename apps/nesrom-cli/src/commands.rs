pub mod info;
pub mod nes2;
pub mod pack;
pub mod unpack;

use std::{fs, path::Path};

use anyhow::{Context, Result};
use nesrom_core::RomContainer;

/// Reads and splits a ROM image from disk.
pub fn read_rom(path: &Path) -> Result<RomContainer> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    RomContainer::from_image(&bytes)
        .with_context(|| format!("{} is not a usable iNES image", path.display()))
}

/// Serializes `rom` and writes it to `path`.
pub fn write_rom(path: &Path, rom: &RomContainer) -> Result<()> {
    let image = rom
        .to_image()
        .with_context(|| format!("failed to encode image for {}", path.display()))?;
    fs::write(path, image).with_context(|| format!("failed to write {}", path.display()))
}
