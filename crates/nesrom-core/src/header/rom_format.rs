use std::fmt;

use crate::error::FormatError;

/// Identifies the header flavour encountered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RomFormat {
    /// iNES 1.0 headers.
    INes,
    /// NES 2.0 with extended sizing and metadata fields.
    Nes20,
}

impl RomFormat {
    /// Interprets byte 7 bits 2..=3. Archaic and other reserved patterns are rejected.
    pub(super) fn from_bits(bits: u8) -> Result<Self, FormatError> {
        match bits & 0b11 {
            0b00 => Ok(Self::INes),
            0b10 => Ok(Self::Nes20),
            other => Err(FormatError::UnsupportedVariant(other)),
        }
    }

    pub(super) fn bits(self) -> u8 {
        match self {
            Self::INes => 0b00,
            Self::Nes20 => 0b10,
        }
    }

    pub fn is_nes2(self) -> bool {
        self == Self::Nes20
    }
}

impl fmt::Display for RomFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::INes => f.write_str("iNES"),
            Self::Nes20 => f.write_str("NES 2.0"),
        }
    }
}
