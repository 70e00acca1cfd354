//! PRG/CHR ROM size channels.
//!
//! iNES stores a single byte of native units. NES 2.0 widens that to 12 bits with
//! a nibble from byte 9; a high nibble of `0xF` switches the low byte to the
//! exponent-multiplier form `EEEEEEMM`, meaning `2^E * (2 * MM + 1)` bytes.

use std::fmt;

use super::RomFormat;
use crate::error::EncodeError;
use crate::layout::Segment;

/// PRG ROM is counted in 16 KiB units.
pub const PRG_ROM_UNIT: u32 = 16 * 1024;
/// CHR ROM is counted in 8 KiB units.
pub const CHR_ROM_UNIT: u32 = 8 * 1024;

/// Largest unit count an iNES header can store.
pub const INES_MAX_UNITS: u16 = 0xFF;
/// Largest literal NES 2.0 unit count; `0xF00..` is taken by the exponent sentinel.
pub const NES2_MAX_UNITS: u16 = 0xEFF;
/// Largest exponent the 6-bit field can carry.
pub const MAX_EXPONENT: u8 = 63;
/// Largest multiplier the 2-bit field can carry.
pub const MAX_MULTIPLIER: u8 = 3;

const EXPONENT_SENTINEL: u8 = 0x0F;

/// Size of one ROM channel, in the form it is (or will be) stored in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RomSize {
    /// Literal count of native units (16 KiB PRG / 8 KiB CHR).
    Units(u16),
    /// NES 2.0 exponent-multiplier form: `2^exponent * (2 * multiplier + 1)` bytes.
    Exponent { exponent: u8, multiplier: u8 },
}

impl Default for RomSize {
    fn default() -> Self {
        Self::Units(0)
    }
}

impl RomSize {
    /// Decodes a size from the LSB byte and (NES 2.0 only) the byte 9 nibble.
    pub fn decode(lsb: u8, msb: u8, format: RomFormat) -> Self {
        match format {
            RomFormat::INes => Self::Units(u16::from(lsb)),
            RomFormat::Nes20 if msb & 0x0F == EXPONENT_SENTINEL => Self::Exponent {
                exponent: lsb >> 2,
                multiplier: lsb & 0b11,
            },
            RomFormat::Nes20 => Self::Units((u16::from(msb & 0x0F) << 8) | u16::from(lsb)),
        }
    }

    /// Returns the `(lsb, msb_nibble)` pair for the header. iNES always writes a zero nibble.
    pub fn encode(
        self,
        segment: Segment,
        unit: u32,
        format: RomFormat,
    ) -> Result<(u8, u8), EncodeError> {
        let not_representable = || EncodeError::SizeNotRepresentable {
            segment,
            bytes: self.byte_len(unit),
        };
        match (self, format) {
            (Self::Units(units), RomFormat::INes) if units <= INES_MAX_UNITS => {
                Ok((units as u8, 0))
            }
            (Self::Units(units), RomFormat::Nes20) if units <= NES2_MAX_UNITS => {
                Ok(((units & 0xFF) as u8, (units >> 8) as u8))
            }
            (
                Self::Exponent {
                    exponent,
                    multiplier,
                },
                RomFormat::Nes20,
            ) if exponent <= MAX_EXPONENT && multiplier <= MAX_MULTIPLIER => {
                Ok(((exponent << 2) | multiplier, EXPONENT_SENTINEL))
            }
            _ => Err(not_representable()),
        }
    }

    /// Picks the smallest lossless representation of `bytes`.
    ///
    /// A literal unit count wins whenever `bytes` is a whole number of units that
    /// fits the format's range; otherwise NES 2.0 falls back to the exponent form.
    pub fn from_byte_len(
        bytes: u128,
        segment: Segment,
        unit: u32,
        format: RomFormat,
    ) -> Result<Self, EncodeError> {
        let unit = u128::from(unit);
        let max_units = match format {
            RomFormat::INes => INES_MAX_UNITS,
            RomFormat::Nes20 => NES2_MAX_UNITS,
        };
        if bytes % unit == 0 && bytes / unit <= u128::from(max_units) {
            return Ok(Self::Units((bytes / unit) as u16));
        }

        if format == RomFormat::Nes20 && bytes != 0 {
            let exponent = bytes.trailing_zeros();
            let odd = bytes >> exponent;
            if exponent <= u32::from(MAX_EXPONENT) && matches!(odd, 1 | 3 | 5 | 7) {
                return Ok(Self::Exponent {
                    exponent: exponent as u8,
                    multiplier: ((odd - 1) / 2) as u8,
                });
            }
        }

        Err(EncodeError::SizeNotRepresentable { segment, bytes })
    }

    /// Size in bytes. Computed in `u128` so every exponent the header can carry fits.
    pub fn byte_len(self, unit: u32) -> u128 {
        match self {
            Self::Units(units) => u128::from(units) * u128::from(unit),
            Self::Exponent {
                exponent,
                multiplier,
            } => 1u128
                .checked_shl(u32::from(exponent))
                .unwrap_or(u128::MAX)
                .saturating_mul(u128::from(multiplier) * 2 + 1),
        }
    }

    pub fn is_empty(self) -> bool {
        match self {
            Self::Units(units) => units == 0,
            Self::Exponent { .. } => false,
        }
    }
}

/// Byte size of a ROM channel paired with its unit, for display.
pub(crate) struct SizeDisplay {
    pub(crate) size: RomSize,
    pub(crate) unit: u32,
}

impl fmt::Display for SizeDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::presenter::write_byte_len(f, self.size.byte_len(self.unit))?;
        match self.size {
            RomSize::Units(units) => write!(f, " ({units} x {} KiB)", self.unit / 1024),
            RomSize::Exponent {
                exponent,
                multiplier,
            } => write!(f, " (2^{exponent} x {})", u16::from(multiplier) * 2 + 1),
        }
    }
}
