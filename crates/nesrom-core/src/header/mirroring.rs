use std::fmt;

use super::raw::Flags6;

/// Nametable arrangement wired on the cartridge board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Mirroring {
    /// Vertical arrangement of nametables (horizontal mirroring). Byte 6 bit 0 clear.
    Horizontal,
    /// Horizontal arrangement of nametables (vertical mirroring). Byte 6 bit 0 set.
    Vertical,
    /// Cartridge supplies its own four nametables. Byte 6 bit 3 set.
    FourScreen,
}

impl Mirroring {
    pub(super) fn from_flags6(flags6: Flags6) -> Self {
        if flags6.contains(Flags6::FOUR_SCREEN) {
            Self::FourScreen
        } else if flags6.contains(Flags6::VERTICAL) {
            Self::Vertical
        } else {
            Self::Horizontal
        }
    }

    pub(super) fn to_flags6(self) -> Flags6 {
        match self {
            Self::Horizontal => Flags6::empty(),
            Self::Vertical => Flags6::VERTICAL,
            Self::FourScreen => Flags6::FOUR_SCREEN,
        }
    }
}

impl fmt::Display for Mirroring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Horizontal => "Horizontal",
            Self::Vertical => "Vertical",
            Self::FourScreen => "Four-screen",
        };
        f.write_str(name)
    }
}
