use std::fmt;

use crate::error::FormatError;

/// NES 2.0 extended console type (byte 13 low nibble, when the console type is Extended).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ExtendedConsoleType {
    /// $0: Regular NES/Famicom/Dendy.
    Regular,
    /// $1: Nintendo Vs. System.
    VsSystem,
    /// $2: PlayChoice-10.
    PlayChoice10,
    /// $3: Regular Famiclone, but with CPU that supports Decimal Mode.
    FamicloneWithDecimalMode,
    /// $4: Regular NES/Famicom with EPSM module or plug-through cartridge.
    NesFamicomWithEpsm,
    /// $5: V.R. Technology VT01 with red/cyan STN palette.
    Vt01RedCyanStnPalette,
    /// $6: V.R. Technology VT02.
    Vt02,
    /// $7: V.R. Technology VT03.
    Vt03,
    /// $8: V.R. Technology VT09.
    Vt09,
    /// $9: V.R. Technology VT32.
    Vt32,
    /// $A: V.R. Technology VT369.
    Vt369,
    /// $B: UMC UM6578.
    UmcUm6578,
    /// $C: Famicom Network System.
    FamicomNetworkSystem,
}

impl ExtendedConsoleType {
    /// $D..=$F are reserved and rejected.
    pub fn from_nibble(nibble: u8) -> Result<Self, FormatError> {
        Ok(match nibble & 0x0F {
            0x0 => Self::Regular,
            0x1 => Self::VsSystem,
            0x2 => Self::PlayChoice10,
            0x3 => Self::FamicloneWithDecimalMode,
            0x4 => Self::NesFamicomWithEpsm,
            0x5 => Self::Vt01RedCyanStnPalette,
            0x6 => Self::Vt02,
            0x7 => Self::Vt03,
            0x8 => Self::Vt09,
            0x9 => Self::Vt32,
            0xA => Self::Vt369,
            0xB => Self::UmcUm6578,
            0xC => Self::FamicomNetworkSystem,
            other => return Err(FormatError::InvalidExtendedConsoleType(other)),
        })
    }

    pub fn to_nibble(self) -> u8 {
        match self {
            Self::Regular => 0x0,
            Self::VsSystem => 0x1,
            Self::PlayChoice10 => 0x2,
            Self::FamicloneWithDecimalMode => 0x3,
            Self::NesFamicomWithEpsm => 0x4,
            Self::Vt01RedCyanStnPalette => 0x5,
            Self::Vt02 => 0x6,
            Self::Vt03 => 0x7,
            Self::Vt09 => 0x8,
            Self::Vt32 => 0x9,
            Self::Vt369 => 0xA,
            Self::UmcUm6578 => 0xB,
            Self::FamicomNetworkSystem => 0xC,
        }
    }
}

impl fmt::Display for ExtendedConsoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Regular => "Regular NES/Famicom/Dendy",
            Self::VsSystem => "Vs. System",
            Self::PlayChoice10 => "PlayChoice-10",
            Self::FamicloneWithDecimalMode => "Famiclone with decimal mode",
            Self::NesFamicomWithEpsm => "NES/Famicom with EPSM",
            Self::Vt01RedCyanStnPalette => "VT01 (red/cyan STN palette)",
            Self::Vt02 => "VT02",
            Self::Vt03 => "VT03",
            Self::Vt09 => "VT09",
            Self::Vt32 => "VT32",
            Self::Vt369 => "VT369",
            Self::UmcUm6578 => "UMC UM6578",
            Self::FamicomNetworkSystem => "Famicom Network System",
        };
        f.write_str(name)
    }
}
