use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use nesrom_core::{RomContainer, Segment};
use tracing::{debug, info};

use crate::{
    args::UnpackArgs,
    commands::read_rom,
    files::{self, FileLayout},
    sidecar,
};

pub fn run(args: UnpackArgs) -> Result<()> {
    let layout = args.layout.file_layout()?;
    let rom = read_rom(&args.rom)?;
    let dir = match args.output {
        Some(dir) => dir,
        None => default_dir(&args.rom)?,
    };

    let written = unpack(&rom, &dir, &layout)?;
    info!(
        "Unpacked {} into {} ({} files)",
        args.rom.display(),
        dir.display(),
        written.len()
    );
    Ok(())
}

/// Writes `header.json` and the segment files for `rom` into `dir`.
///
/// Returns the paths written, header first.
pub fn unpack(rom: &RomContainer, dir: &Path, layout: &FileLayout) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    sidecar::write(dir, rom.header())?;
    let mut written = vec![dir.join(sidecar::HEADER_FILE)];

    for segment in [Segment::Trainer, Segment::Prg, Segment::Chr, Segment::Misc] {
        let data = rom.segment(segment);
        for slice in layout.slices(segment, data.len())? {
            let path = dir.join(&slice.name);
            debug!("{segment}: {} bytes -> {}", slice.range.len(), path.display());
            fs::write(&path, &data[slice.range])
                .with_context(|| format!("failed to write {}", path.display()))?;
            written.push(path);
        }
    }

    remove_stale_segments(dir, &written)?;
    Ok(written)
}

/// Deletes segment files a previous unpack left behind, so `pack` cannot pick them up.
fn remove_stale_segments(dir: &Path, written: &[PathBuf]) -> Result<()> {
    let entries = fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))?;
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to list {}", dir.display()))?
            .path();
        let stale = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(files::is_segment_file)
            && !written.contains(&path);
        if stale {
            debug!("removing stale {}", path.display());
            fs::remove_file(&path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
        }
    }
    Ok(())
}

/// `roms/game.nes` unpacks into `roms/game`.
fn default_dir(rom: &Path) -> Result<PathBuf> {
    let dir = rom.with_extension("");
    if dir == rom {
        bail!(
            "{} has no extension to strip; pass --output explicitly",
            rom.display()
        );
    }
    Ok(dir)
}
