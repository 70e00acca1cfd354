use std::fmt;

use super::RomFormat;
use crate::error::FormatError;

/// Console type advertised by header byte 7 bits 0..=1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConsoleType {
    /// Standard NES/Famicom cartridge.
    #[default]
    Nes,
    /// Vs. System arcade hardware.
    VsSystem,
    /// PlayChoice-10 hardware.
    PlayChoice10,
    /// NES 2.0 extended console type (see [`super::ExtendedConsoleType`]).
    Extended,
}

impl ConsoleType {
    /// iNES only knows the Vs. and PlayChoice bits; setting both is reserved there.
    pub(super) fn from_bits(bits: u8, format: RomFormat) -> Result<Self, FormatError> {
        match (bits & 0b11, format) {
            (0, _) => Ok(Self::Nes),
            (1, _) => Ok(Self::VsSystem),
            (2, _) => Ok(Self::PlayChoice10),
            (3, RomFormat::Nes20) => Ok(Self::Extended),
            (other, _) => Err(FormatError::InvalidConsoleType(other)),
        }
    }

    pub(super) fn bits(self) -> u8 {
        match self {
            Self::Nes => 0,
            Self::VsSystem => 1,
            Self::PlayChoice10 => 2,
            Self::Extended => 3,
        }
    }
}

impl fmt::Display for ConsoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Nes => "NES/Famicom",
            Self::VsSystem => "Vs. System",
            Self::PlayChoice10 => "PlayChoice-10",
            Self::Extended => "Extended",
        };
        f.write_str(name)
    }
}
