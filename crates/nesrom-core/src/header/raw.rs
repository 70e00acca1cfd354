//! Named bit ranges over the 16 header bytes.
//!
//! Every multi-bit header field is declared once here as a [`BitRange`]; the
//! codec in [`super::Header`] only ever reads and writes through these, so decode
//! and encode share one description of the layout.

use bitflags::bitflags;

use super::NES_HEADER_LEN;

bitflags! {
    /// Single-bit fields of byte 6. The high nibble is [`MAPPER_LOW`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub(crate) struct Flags6: u8 {
        const VERTICAL    = 0b0000_0001;
        const BATTERY     = 0b0000_0010;
        const TRAINER     = 0b0000_0100;
        const FOUR_SCREEN = 0b0000_1000;
    }
}

/// A `width`-bit field starting at bit `shift` of byte `byte`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BitRange {
    byte: usize,
    shift: u8,
    width: u8,
}

impl BitRange {
    const fn new(byte: usize, shift: u8, width: u8) -> Self {
        Self { byte, shift, width }
    }

    pub(crate) const fn byte(self) -> usize {
        self.byte
    }

    /// Bits of [`BitRange::byte`] the field occupies.
    pub(crate) const fn mask(self) -> u8 {
        (((1u16 << self.width) - 1) as u8) << self.shift
    }

    /// Largest value the field can hold.
    pub(crate) const fn max(self) -> u8 {
        ((1u16 << self.width) - 1) as u8
    }
}

pub(crate) const PRG_ROM_LSB: BitRange = BitRange::new(4, 0, 8);
pub(crate) const CHR_ROM_LSB: BitRange = BitRange::new(5, 0, 8);
pub(crate) const FLAGS6: BitRange = BitRange::new(6, 0, 8);
pub(crate) const MAPPER_LOW: BitRange = BitRange::new(6, 4, 4);
pub(crate) const CONSOLE_TYPE: BitRange = BitRange::new(7, 0, 2);
pub(crate) const FORMAT: BitRange = BitRange::new(7, 2, 2);
pub(crate) const MAPPER_MID: BitRange = BitRange::new(7, 4, 4);
pub(crate) const MAPPER_HIGH: BitRange = BitRange::new(8, 0, 4);
pub(crate) const SUBMAPPER: BitRange = BitRange::new(8, 4, 4);
pub(crate) const PRG_ROM_MSB: BitRange = BitRange::new(9, 0, 4);
pub(crate) const CHR_ROM_MSB: BitRange = BitRange::new(9, 4, 4);
pub(crate) const PRG_RAM_SHIFT: BitRange = BitRange::new(10, 0, 4);
pub(crate) const PRG_NVRAM_SHIFT: BitRange = BitRange::new(10, 4, 4);
pub(crate) const CHR_RAM_SHIFT: BitRange = BitRange::new(11, 0, 4);
pub(crate) const CHR_NVRAM_SHIFT: BitRange = BitRange::new(11, 4, 4);
pub(crate) const TIMING: BitRange = BitRange::new(12, 0, 2);
pub(crate) const VS_PPU_TYPE: BitRange = BitRange::new(13, 0, 4);
pub(crate) const VS_HARDWARE_TYPE: BitRange = BitRange::new(13, 4, 4);
pub(crate) const EXTENDED_CONSOLE_TYPE: BitRange = BitRange::new(13, 0, 4);
pub(crate) const MISC_ROM_COUNT: BitRange = BitRange::new(14, 0, 2);
/// NES 2.0 byte 15: default expansion device. Bits 6..=7 stay reserved.
pub(crate) const EXPANSION_DEVICE: BitRange = BitRange::new(15, 0, 6);

/// The packed header exactly as it appears on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawHeader([u8; NES_HEADER_LEN]);

impl RawHeader {
    pub(crate) fn new(bytes: [u8; NES_HEADER_LEN]) -> Self {
        Self(bytes)
    }

    pub(crate) fn bytes(&self) -> &[u8; NES_HEADER_LEN] {
        &self.0
    }

    pub(crate) fn bytes_mut(&mut self) -> &mut [u8; NES_HEADER_LEN] {
        &mut self.0
    }

    pub(crate) fn into_bytes(self) -> [u8; NES_HEADER_LEN] {
        self.0
    }

    pub(crate) fn get(&self, range: BitRange) -> u8 {
        (self.0[range.byte] & range.mask()) >> range.shift
    }

    /// Replaces the field; bits of `value` above the field width are dropped.
    pub(crate) fn set(&mut self, range: BitRange, value: u8) {
        let byte = &mut self.0[range.byte];
        *byte = (*byte & !range.mask()) | ((value << range.shift) & range.mask());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_only_touches_its_own_bits() {
        let mut raw = RawHeader::new([0xFF; NES_HEADER_LEN]);
        raw.set(SUBMAPPER, 0x3);
        assert_eq!(raw.bytes()[8], 0x3F);
        assert_eq!(raw.get(MAPPER_HIGH), 0xF);
        assert_eq!(raw.get(SUBMAPPER), 0x3);
    }

    #[test]
    fn set_truncates_to_width() {
        let mut raw = RawHeader::new([0; NES_HEADER_LEN]);
        raw.set(TIMING, 0b1111_1110);
        assert_eq!(raw.bytes()[12], 0b10);
        assert_eq!(EXPANSION_DEVICE.max(), 0x3F);
    }

    #[test]
    fn full_byte_ranges_round_trip() {
        let mut raw = RawHeader::new([0; NES_HEADER_LEN]);
        raw.set(PRG_ROM_LSB, 0xA5);
        raw.set(FLAGS6, 0x5A);
        assert_eq!(raw.get(PRG_ROM_LSB), 0xA5);
        assert_eq!(raw.get(MAPPER_LOW), 0x5);
        assert_eq!(raw.get(FLAGS6), 0x5A);
    }
}
