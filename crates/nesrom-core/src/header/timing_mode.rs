use std::fmt;

/// CPU/PPU timing (NES 2.0 header byte 12 bits 0..=1).
///
/// iNES headers have no reliable timing field, so they always decode as [`TimingMode::Ntsc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TimingMode {
    /// 0: RP2C02 ("NTSC NES").
    #[default]
    Ntsc,
    /// 1: RP2C07 ("Licensed PAL NES").
    Pal,
    /// 2: Multiple-region.
    MultiRegion,
    /// 3: UA6538 ("Dendy").
    Dendy,
}

impl TimingMode {
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Ntsc,
            1 => Self::Pal,
            2 => Self::MultiRegion,
            _ => Self::Dendy,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            Self::Ntsc => 0,
            Self::Pal => 1,
            Self::MultiRegion => 2,
            Self::Dendy => 3,
        }
    }
}

impl fmt::Display for TimingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ntsc => "NTSC",
            Self::Pal => "PAL",
            Self::MultiRegion => "Multi-region",
            Self::Dendy => "Dendy",
        };
        f.write_str(name)
    }
}
