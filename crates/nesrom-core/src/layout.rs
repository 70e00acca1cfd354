//! Segment boundaries inside a flat ROM image.
//!
//! Segments follow the header back to back: trainer (512 bytes, optional), PRG,
//! CHR, then whatever remains as miscellaneous ROM data.

use std::{fmt, ops::Range};

use crate::{
    error::LayoutError,
    header::{Header, NES_HEADER_LEN},
};

/// Size of the optional trainer block.
pub const TRAINER_LEN: usize = 512;

/// One region of a ROM image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Header,
    Trainer,
    Prg,
    Chr,
    Misc,
}

impl Segment {
    pub const ALL: [Segment; 5] = [
        Segment::Header,
        Segment::Trainer,
        Segment::Prg,
        Segment::Chr,
        Segment::Misc,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Trainer => "trainer",
            Self::Prg => "PRG ROM",
            Self::Chr => "CHR ROM",
            Self::Misc => "misc ROM",
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Offsets and lengths of every segment in an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layout {
    pub header_offset: usize,
    pub trainer_offset: usize,
    pub trainer_len: usize,
    pub prg_offset: usize,
    pub prg_len: usize,
    pub chr_offset: usize,
    pub chr_len: usize,
    pub misc_offset: usize,
    pub misc_len: usize,
}

impl Layout {
    /// Computes the layout of an `image_len` byte image described by `header`.
    ///
    /// Bytes past CHR are misc content, however many there are.
    pub fn compute(header: &Header, image_len: usize) -> Result<Self, LayoutError> {
        let mut cursor = 0;
        take(&mut cursor, image_len, Segment::Header, NES_HEADER_LEN as u128)?;
        let trainer_len = if header.trainer { TRAINER_LEN } else { 0 };
        let trainer_len = take(&mut cursor, image_len, Segment::Trainer, trainer_len as u128)?;
        let prg_len = take(&mut cursor, image_len, Segment::Prg, header.prg_rom_len())?;
        let chr_len = take(&mut cursor, image_len, Segment::Chr, header.chr_rom_len())?;

        Ok(Self::from_lengths(
            trainer_len,
            prg_len,
            chr_len,
            image_len - cursor,
        ))
    }

    /// Builds a layout from known segment lengths.
    pub fn from_lengths(
        trainer_len: usize,
        prg_len: usize,
        chr_len: usize,
        misc_len: usize,
    ) -> Self {
        let trainer_offset = NES_HEADER_LEN;
        let prg_offset = trainer_offset + trainer_len;
        let chr_offset = prg_offset + prg_len;
        let misc_offset = chr_offset + chr_len;
        Self {
            header_offset: 0,
            trainer_offset,
            trainer_len,
            prg_offset,
            prg_len,
            chr_offset,
            chr_len,
            misc_offset,
            misc_len,
        }
    }

    pub fn offset(&self, segment: Segment) -> usize {
        match segment {
            Segment::Header => self.header_offset,
            Segment::Trainer => self.trainer_offset,
            Segment::Prg => self.prg_offset,
            Segment::Chr => self.chr_offset,
            Segment::Misc => self.misc_offset,
        }
    }

    pub fn len(&self, segment: Segment) -> usize {
        match segment {
            Segment::Header => NES_HEADER_LEN,
            Segment::Trainer => self.trainer_len,
            Segment::Prg => self.prg_len,
            Segment::Chr => self.chr_len,
            Segment::Misc => self.misc_len,
        }
    }

    pub fn range(&self, segment: Segment) -> Range<usize> {
        let start = self.offset(segment);
        start..start + self.len(segment)
    }

    /// Total image length covered by this layout.
    pub fn image_len(&self) -> usize {
        self.misc_offset + self.misc_len
    }
}

fn take(
    cursor: &mut usize,
    image_len: usize,
    segment: Segment,
    len: u128,
) -> Result<usize, LayoutError> {
    let available = image_len.saturating_sub(*cursor);
    let truncated = LayoutError::TruncatedImage {
        segment,
        expected: len,
        available,
    };
    let len = usize::try_from(len).map_err(|_| truncated.clone())?;
    if len > available {
        return Err(truncated);
    }
    *cursor += len;
    Ok(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::{RomFormat, RomSize};

    fn header(prg: u16, chr: u16, trainer: bool) -> Header {
        Header {
            prg_rom: RomSize::Units(prg),
            chr_rom: RomSize::Units(chr),
            trainer,
            ..Header::default()
        }
    }

    #[test]
    fn offsets_are_cumulative() {
        let h = header(2, 1, true);
        let image_len = 16 + 512 + 32 * 1024 + 8 * 1024 + 100;

        let layout = Layout::compute(&h, image_len).expect("layout");

        assert_eq!(layout.header_offset, 0);
        assert_eq!(layout.trainer_offset, 16);
        assert_eq!(layout.trainer_len, 512);
        assert_eq!(layout.prg_offset, 16 + 512);
        assert_eq!(layout.prg_len, 32 * 1024);
        assert_eq!(layout.chr_offset, 16 + 512 + 32 * 1024);
        assert_eq!(layout.chr_len, 8 * 1024);
        assert_eq!(layout.misc_offset, 16 + 512 + 40 * 1024);
        assert_eq!(layout.misc_len, 100);
        assert_eq!(layout.image_len(), image_len);
    }

    #[test]
    fn no_trainer_means_prg_follows_header() {
        let layout = Layout::compute(&header(1, 0, false), 16 + 16 * 1024).expect("layout");
        assert_eq!(layout.trainer_len, 0);
        assert_eq!(layout.prg_offset, 16);
        assert_eq!(layout.misc_len, 0);
        assert!(layout.range(Segment::Chr).is_empty());
    }

    #[test]
    fn truncated_prg_is_reported() {
        let err = Layout::compute(&header(1, 0, false), 16 + 1024).unwrap_err();
        assert_eq!(
            err,
            LayoutError::TruncatedImage {
                segment: Segment::Prg,
                expected: 16 * 1024,
                available: 1024,
            }
        );
    }

    #[test]
    fn image_shorter_than_header() {
        let err = Layout::compute(&header(0, 0, false), 8).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::TruncatedImage {
                segment: Segment::Header,
                available: 8,
                ..
            }
        ));
    }

    #[test]
    fn huge_exponent_sizes_do_not_overflow() {
        let h = Header {
            format: RomFormat::Nes20,
            chr_rom: RomSize::Exponent {
                exponent: 63,
                multiplier: 3,
            },
            ..Header::default()
        };
        let err = Layout::compute(&h, 64).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::TruncatedImage {
                segment: Segment::Chr,
                ..
            }
        ));
    }
}
