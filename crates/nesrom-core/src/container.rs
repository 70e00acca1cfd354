use crate::{
    error::{EncodeError, Error},
    header::Header,
    layout::{Layout, Segment, TRAINER_LEN},
    presenter::Report,
};

/// A header together with the segment buffers it frames.
///
/// Every buffer is owned by the container; reading an image copies the slices out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomContainer {
    header: Header,
    trainer: Option<Box<[u8; TRAINER_LEN]>>,
    prg: Vec<u8>,
    chr: Vec<u8>,
    misc: Vec<u8>,
}

impl RomContainer {
    /// Assembles a container from independently supplied segments.
    ///
    /// The trainer, PRG and CHR buffers must match what `header` declares and the
    /// header must be encodable; misc data may have any length. The header is
    /// stored [normalized](Header::normalized), so the container equals the one
    /// read back from its own image.
    pub fn new(
        header: Header,
        trainer: Option<Box<[u8; TRAINER_LEN]>>,
        prg: Vec<u8>,
        chr: Vec<u8>,
        misc: Vec<u8>,
    ) -> Result<Self, Error> {
        let header = header.normalized()?;

        let trainer_len = trainer.as_ref().map_or(0, |t| t.len());
        let expected_trainer = if header.trainer { TRAINER_LEN } else { 0 };
        check_len(Segment::Trainer, expected_trainer as u128, trainer_len)?;
        check_len(Segment::Prg, header.prg_rom_len(), prg.len())?;
        check_len(Segment::Chr, header.chr_rom_len(), chr.len())?;

        Ok(Self {
            header,
            trainer,
            prg,
            chr,
            misc,
        })
    }

    /// Reads a full image: decode the header, lay out the segments, copy them out.
    pub fn from_image(bytes: &[u8]) -> Result<Self, Error> {
        let header = Header::decode(bytes)?;
        let layout = Layout::compute(&header, bytes.len())?;

        let trainer = if header.trainer {
            let mut trainer = Box::new([0u8; TRAINER_LEN]);
            trainer.copy_from_slice(&bytes[layout.range(Segment::Trainer)]);
            Some(trainer)
        } else {
            None
        };

        Ok(Self {
            header,
            trainer,
            prg: bytes[layout.range(Segment::Prg)].to_vec(),
            chr: bytes[layout.range(Segment::Chr)].to_vec(),
            misc: bytes[layout.range(Segment::Misc)].to_vec(),
        })
    }

    /// Serializes header, trainer, PRG, CHR and misc data, in that order.
    pub fn to_image(&self) -> Result<Vec<u8>, EncodeError> {
        let header = self.header.encode()?;
        let mut image = Vec::with_capacity(self.layout().image_len());
        image.extend_from_slice(&header);
        if let Some(trainer) = &self.trainer {
            image.extend_from_slice(trainer.as_slice());
        }
        image.extend_from_slice(&self.prg);
        image.extend_from_slice(&self.chr);
        image.extend_from_slice(&self.misc);
        Ok(image)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn trainer(&self) -> Option<&[u8; TRAINER_LEN]> {
        self.trainer.as_deref()
    }

    pub fn prg(&self) -> &[u8] {
        &self.prg
    }

    pub fn chr(&self) -> &[u8] {
        &self.chr
    }

    pub fn misc(&self) -> &[u8] {
        &self.misc
    }

    /// Bytes of one segment. The header segment is not stored and reads as empty.
    pub fn segment(&self, segment: Segment) -> &[u8] {
        match segment {
            Segment::Header => &[],
            Segment::Trainer => self.trainer.as_deref().map_or(&[][..], |t| &t[..]),
            Segment::Prg => &self.prg,
            Segment::Chr => &self.chr,
            Segment::Misc => &self.misc,
        }
    }

    /// Where each segment lands in the image [`RomContainer::to_image`] produces.
    pub fn layout(&self) -> Layout {
        Layout::from_lengths(
            self.trainer.as_ref().map_or(0, |t| t.len()),
            self.prg.len(),
            self.chr.len(),
            self.misc.len(),
        )
    }

    pub fn report(&self) -> Report<'_> {
        Report::new(&self.header).with_layout(self.layout())
    }

    /// Image length including the header.
    pub fn image_len(&self) -> usize {
        self.layout().image_len()
    }

    /// Swaps in a new header, keeping the segments. Fails when the new header
    /// declares different segment sizes.
    pub fn with_header(self, header: Header) -> Result<Self, Error> {
        Self::new(header, self.trainer, self.prg, self.chr, self.misc)
    }

    pub fn into_parts(self) -> RomParts {
        RomParts {
            header: self.header,
            trainer: self.trainer,
            prg: self.prg,
            chr: self.chr,
            misc: self.misc,
        }
    }
}

/// Owned pieces of a [`RomContainer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomParts {
    pub header: Header,
    pub trainer: Option<Box<[u8; TRAINER_LEN]>>,
    pub prg: Vec<u8>,
    pub chr: Vec<u8>,
    pub misc: Vec<u8>,
}

fn check_len(segment: Segment, expected: u128, actual: usize) -> Result<(), Error> {
    if expected != actual as u128 {
        return Err(Error::SegmentSizeMismatch {
            segment,
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::{FormatError, LayoutError},
        header::{ConsoleType, NES_HEADER_LEN, RomFormat, RomSize, VsHardwareType},
    };

    fn base_header(prg_banks: u8, chr_banks: u8, flags6: u8) -> [u8; NES_HEADER_LEN] {
        [
            b'N', b'E', b'S', 0x1A, prg_banks, chr_banks, flags6, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        ]
    }

    #[test]
    fn reads_basic_nrom_image() {
        let mut rom = base_header(1, 1, 0).to_vec();
        rom.extend(vec![0xAA; 16 * 1024]);
        rom.extend(vec![0x55; 8 * 1024]);

        let container = RomContainer::from_image(&rom).expect("parse image");

        assert_eq!(container.prg().len(), 16 * 1024);
        assert_eq!(container.chr().len(), 8 * 1024);
        assert_eq!(container.prg()[0], 0xAA);
        assert_eq!(container.chr()[0], 0x55);
        assert!(container.misc().is_empty());
        assert!(container.trainer().is_none());
        assert_eq!(container.to_image().expect("encode"), rom);
    }

    #[test]
    fn reads_image_with_trainer_and_misc() {
        let mut rom = base_header(1, 0, 0b0000_0100).to_vec();
        rom.extend(vec![0xFE; TRAINER_LEN]);
        rom.extend(vec![0xAA; 16 * 1024]);
        rom.extend([1, 2, 3]);

        let container = RomContainer::from_image(&rom).expect("parse image");

        assert_eq!(container.trainer().map(|t| t[0]), Some(0xFE));
        assert_eq!(container.prg()[0], 0xAA);
        assert_eq!(container.misc(), &[1, 2, 3]);
        assert_eq!(container.layout().misc_offset, 16 + 512 + 16 * 1024);
        assert_eq!(container.image_len(), rom.len());
        assert_eq!(container.to_image().expect("encode"), rom);
    }

    #[test]
    fn errors_when_prg_section_missing() {
        let mut rom = base_header(1, 0, 0).to_vec();
        rom.extend(vec![0xAA; 1024]);

        let err = RomContainer::from_image(&rom).expect_err("should fail");
        assert!(matches!(
            err,
            Error::Layout(LayoutError::TruncatedImage {
                segment: Segment::Prg,
                ..
            })
        ));
    }

    #[test]
    fn errors_on_bad_magic() {
        let err = RomContainer::from_image(&[0u8; 32]).expect_err("should fail");
        assert_eq!(err, Error::Format(FormatError::BadMagic));
    }

    #[test]
    fn new_checks_segment_sizes() {
        let header = Header {
            prg_rom: RomSize::Units(1),
            chr_rom: RomSize::Units(1),
            ..Header::default()
        };

        let err = RomContainer::new(header, None, vec![0; 16 * 1024], vec![0; 4096], Vec::new())
            .expect_err("chr too short");
        assert!(matches!(
            err,
            Error::SegmentSizeMismatch {
                segment: Segment::Chr,
                expected: 8192,
                actual: 4096
            }
        ));

        let trainer_header = Header {
            trainer: true,
            ..header
        };
        let err = RomContainer::new(
            trainer_header,
            None,
            vec![0; 16 * 1024],
            vec![0; 8 * 1024],
            Vec::new(),
        )
        .expect_err("trainer missing");
        assert!(matches!(
            err,
            Error::SegmentSizeMismatch {
                segment: Segment::Trainer,
                ..
            }
        ));
    }

    #[test]
    fn new_then_to_image_concatenates_in_order() {
        let header = Header {
            format: RomFormat::Nes20,
            prg_rom: RomSize::Units(1),
            chr_rom: RomSize::Units(1),
            trainer: true,
            misc_rom_count: 1,
            ..Header::default()
        };
        let container = RomContainer::new(
            header,
            Some(Box::new([7; TRAINER_LEN])),
            vec![1; 16 * 1024],
            vec![2; 8 * 1024],
            vec![3; 10],
        )
        .expect("assemble");

        let image = container.to_image().expect("encode");
        let layout = container.layout();

        assert_eq!(image.len(), layout.image_len());
        assert_eq!(&image[..16], &header.encode().expect("encode header"));
        assert!(image[layout.range(Segment::Trainer)].iter().all(|&b| b == 7));
        assert!(image[layout.range(Segment::Prg)].iter().all(|&b| b == 1));
        assert!(image[layout.range(Segment::Chr)].iter().all(|&b| b == 2));
        assert!(image[layout.range(Segment::Misc)].iter().all(|&b| b == 3));
        assert_eq!(RomContainer::from_image(&image).expect("reparse"), container);
    }

    #[test]
    fn new_fills_in_vs_defaults_the_image_would_carry() {
        let header = Header {
            format: RomFormat::Nes20,
            prg_rom: RomSize::Units(1),
            console_type: ConsoleType::VsSystem,
            ..Header::default()
        };
        let container = RomContainer::new(header, None, vec![0; 16 * 1024], Vec::new(), Vec::new())
            .expect("assemble");

        assert_eq!(
            container.header().vs_hardware_type,
            Some(VsHardwareType::UnisystemNormal)
        );
        let image = container.to_image().expect("encode");
        assert_eq!(RomContainer::from_image(&image).expect("reparse"), container);
    }

    #[test]
    fn with_header_keeps_segments() {
        let mut rom = base_header(1, 1, 0).to_vec();
        rom.extend(vec![0xAA; 16 * 1024]);
        rom.extend(vec![0x55; 8 * 1024]);
        let container = RomContainer::from_image(&rom).expect("parse image");

        let upgraded = container.header().to_nes2();
        let container = container.with_header(upgraded).expect("same sizes");

        assert_eq!(container.header().format, RomFormat::Nes20);
        assert_eq!(container.segment(Segment::Prg)[0], 0xAA);
    }
}
