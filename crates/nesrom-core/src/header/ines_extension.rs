/// iNES 1.0-only bytes (header bytes 8..=15).
///
/// iNES never standardised these bytes and plenty of dumps carry junk in them,
/// so they are kept verbatim instead of being interpreted. NES 2.0 headers leave
/// this at its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct INesExtension {
    /// Byte 8: volatile PRG RAM size in 8 KiB units. 0 means "assume 8 KiB".
    pub prg_ram_units: u8,
    /// Byte 9: TV system (bit 0: PAL).
    pub flags9: u8,
    /// Byte 10: unofficial TV system / PRG RAM presence / bus conflict hints.
    pub flags10: u8,
    /// Bytes 11..=15, expected to be zero.
    pub padding: [u8; 5],
}

impl INesExtension {
    pub(super) fn from_bytes(bytes: &[u8; 16]) -> Self {
        let mut padding = [0u8; 5];
        padding.copy_from_slice(&bytes[11..16]);
        Self {
            prg_ram_units: bytes[8],
            flags9: bytes[9],
            flags10: bytes[10],
            padding,
        }
    }

    pub(super) fn write_into(&self, bytes: &mut [u8; 16]) {
        bytes[8] = self.prg_ram_units;
        bytes[9] = self.flags9;
        bytes[10] = self.flags10;
        bytes[11..16].copy_from_slice(&self.padding);
    }

    /// Whether flags 9 marks the dump as a PAL title.
    pub fn pal_hint(&self) -> bool {
        self.flags9 & 0b1 != 0
    }
}
