use std::fmt;

use crate::error::EncodeError;

/// Largest usable shift count; 15 is reserved by the header format.
pub const MAX_RAM_SHIFT: u8 = 14;

/// A NES 2.0 RAM size stored as a shift count: 0 means absent, `n` means `64 << n` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub struct RamSize(u8);

impl RamSize {
    pub const NONE: Self = Self(0);

    /// Returns `None` for the reserved shift 15 and anything larger.
    pub fn from_shift(shift: u8) -> Option<Self> {
        (shift <= MAX_RAM_SHIFT).then_some(Self(shift))
    }

    /// Accepts 0 or an exact `64 << n` byte count.
    pub fn from_bytes(bytes: u32) -> Result<Self, EncodeError> {
        if bytes == 0 {
            return Ok(Self::NONE);
        }
        (1..=MAX_RAM_SHIFT)
            .find(|&shift| 64u32 << shift == bytes)
            .map(Self)
            .ok_or(EncodeError::InvalidRamSize { bytes })
    }

    pub fn shift(self) -> u8 {
        self.0
    }

    pub fn bytes(self) -> u32 {
        if self.0 == 0 { 0 } else { 64u32 << self.0 }
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<u32> for RamSize {
    type Error = EncodeError;

    fn try_from(bytes: u32) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl From<RamSize> for u32 {
    fn from(size: RamSize) -> Self {
        size.bytes()
    }
}

impl fmt::Display for RamSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            f.write_str("none")
        } else {
            crate::presenter::write_byte_len(f, u128::from(self.bytes()))
        }
    }
}
