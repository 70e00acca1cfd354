use std::{fs, io, path::Path};

use anyhow::{Context, Result, anyhow, bail};
use nesrom_core::{RomContainer, Segment, TRAINER_LEN};
use tracing::{debug, info};

use crate::{
    args::PackArgs,
    commands::write_rom,
    files::{FileLayout, MISC_FILE},
    sidecar,
};

pub fn run(args: PackArgs) -> Result<()> {
    let layout = args.layout.file_layout()?;
    let rom = pack(&args.dir, &layout)?;
    write_rom(&args.output, &rom)?;
    info!(
        "Packed {} into {} ({} bytes)",
        args.dir.display(),
        args.output.display(),
        rom.image_len()
    );
    Ok(())
}

/// Rebuilds a container from a directory written by `unpack` with the same layout.
pub fn pack(dir: &Path, layout: &FileLayout) -> Result<RomContainer> {
    let header = sidecar::read(dir)?;

    let trainer = if header.trainer {
        let bytes = read_segment(dir, layout, Segment::Trainer, TRAINER_LEN)?;
        let trainer: Box<[u8; TRAINER_LEN]> = bytes
            .into_boxed_slice()
            .try_into()
            .map_err(|_| anyhow!("trainer must be exactly {TRAINER_LEN} bytes"))?;
        Some(trainer)
    } else {
        None
    };

    let prg_len = segment_len(Segment::Prg, header.prg_rom_len())?;
    let chr_len = segment_len(Segment::Chr, header.chr_rom_len())?;
    let prg = read_segment(dir, layout, Segment::Prg, prg_len)?;
    let chr = read_segment(dir, layout, Segment::Chr, chr_len)?;
    let misc = read_optional(&dir.join(MISC_FILE))?;

    RomContainer::new(header, trainer, prg, chr, misc)
        .with_context(|| format!("{} does not describe a consistent image", dir.display()))
}

/// Concatenates the files `layout` assigns to `segment`, checking each one's length.
fn read_segment(dir: &Path, layout: &FileLayout, segment: Segment, len: usize) -> Result<Vec<u8>> {
    let mut data = Vec::with_capacity(len);
    for slice in layout.slices(segment, len)? {
        let path = dir.join(&slice.name);
        let bytes = fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
        if bytes.len() != slice.range.len() {
            bail!(
                "{} holds {} bytes, {segment} expects {}",
                path.display(),
                bytes.len(),
                slice.range.len()
            );
        }
        debug!("{segment}: {} <- {}", slice.range.len(), path.display());
        data.extend_from_slice(&bytes);
    }
    Ok(data)
}

fn read_optional(path: &Path) -> Result<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => Ok(bytes),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(err) => Err(err).with_context(|| format!("failed to read {}", path.display())),
    }
}

fn segment_len(segment: Segment, len: u128) -> Result<usize> {
    usize::try_from(len)
        .map_err(|_| anyhow!("{segment} of {len} bytes does not fit in memory"))
}
