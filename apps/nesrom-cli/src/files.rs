//! Mapping between image segments and the files of an unpacked directory.
//!
//! Both `pack` and `unpack` go through [`FileLayout::slices`], so whatever shape
//! one writes the other reads back.

use std::ops::Range;

use nesrom_core::Segment;
use thiserror::Error;

pub const TRAINER_FILE: &str = "trainer.dat";
pub const PRG_FILE: &str = "prg.dat";
pub const CHR_FILE: &str = "chr.dat";
pub const MISC_FILE: &str = "misc.dat";

/// Whether `name` is a segment file under any layout, whatever its bank size.
pub fn is_segment_file(name: &str) -> bool {
    if [TRAINER_FILE, PRG_FILE, CHR_FILE, MISC_FILE].contains(&name) {
        return true;
    }
    name.strip_prefix("bank_")
        .and_then(|rest| rest.strip_suffix(".chr"))
        .is_some_and(|index| !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()))
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileLayoutError {
    #[error("CHR bank size must be greater than zero")]
    ZeroBankSize,
    #[error("CHR ROM of {len} bytes is not a whole number of {bank_size} byte banks")]
    UnalignedChr { len: usize, bank_size: usize },
}

/// How CHR ROM is stored on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChrFiles {
    /// One `chr.dat` holding the whole segment.
    #[default]
    Single,
    /// Fixed-size `bank_NN.chr` files, numbered from zero.
    Banks { bank_size: usize },
}

/// A named sub-range of one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSlice {
    pub name: String,
    pub range: Range<usize>,
}

/// Segment-to-file policy for an unpacked directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileLayout {
    pub chr: ChrFiles,
}

impl FileLayout {
    pub fn new(chr_bank_size: Option<usize>) -> Result<Self, FileLayoutError> {
        let chr = match chr_bank_size {
            None => ChrFiles::Single,
            Some(0) => return Err(FileLayoutError::ZeroBankSize),
            Some(bank_size) => ChrFiles::Banks { bank_size },
        };
        Ok(Self { chr })
    }

    /// Files holding a `len` byte `segment`, in image order.
    ///
    /// PRG always gets a file. Empty trainer, CHR and misc segments get none, and
    /// the header is never listed since it travels as `header.json`.
    pub fn slices(&self, segment: Segment, len: usize) -> Result<Vec<FileSlice>, FileLayoutError> {
        let whole = |name: &str| {
            vec![FileSlice {
                name: name.to_owned(),
                range: 0..len,
            }]
        };

        let slices = match segment {
            Segment::Header => Vec::new(),
            Segment::Prg => whole(PRG_FILE),
            Segment::Trainer | Segment::Chr | Segment::Misc if len == 0 => Vec::new(),
            Segment::Trainer => whole(TRAINER_FILE),
            Segment::Misc => whole(MISC_FILE),
            Segment::Chr => match self.chr {
                ChrFiles::Single => whole(CHR_FILE),
                ChrFiles::Banks { bank_size } => {
                    if len % bank_size != 0 {
                        return Err(FileLayoutError::UnalignedChr { len, bank_size });
                    }
                    (0..len / bank_size)
                        .map(|bank| FileSlice {
                            name: format!("bank_{bank:02}.chr"),
                            range: bank * bank_size..(bank + 1) * bank_size,
                        })
                        .collect()
                }
            },
        };
        Ok(slices)
    }
}
