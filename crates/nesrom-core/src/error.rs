use thiserror::Error;

use crate::{header::RomFormat, layout::Segment};

/// A 16-byte block that is not a header this crate can decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Provided buffer is shorter than the 16-byte header.
    #[error("header expected {} bytes, got {actual}", crate::header::NES_HEADER_LEN)]
    TooShort { actual: usize },
    /// Magic number ("NES<EOF>") is missing.
    #[error("missing NES magic bytes")]
    BadMagic,
    /// Byte 7 bits 2..=3 hold an archaic or reserved pattern.
    #[error("unsupported header variant (byte 7 format bits {0:#04b})")]
    UnsupportedVariant(u8),
    /// A NES 2.0 RAM shift nibble holds the reserved value 15.
    #[error("{field} size uses reserved shift value {nibble}")]
    InvalidRamSize { field: &'static str, nibble: u8 },
    /// Console type bits hold a value reserved for this format.
    #[error("reserved console type {0}")]
    InvalidConsoleType(u8),
    /// NES 2.0 extended console type nibble is reserved.
    #[error("reserved extended console type {0:#X}")]
    InvalidExtendedConsoleType(u8),
}

/// A [`crate::Header`] holding values its format cannot store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("{segment} size of {bytes} bytes cannot be stored in the header")]
    SizeNotRepresentable { segment: Segment, bytes: u128 },
    #[error("{field} value {value} exceeds maximum {max}")]
    FieldOutOfRange {
        field: &'static str,
        value: u32,
        max: u32,
    },
    /// A field set on a header whose format has nowhere to put it.
    #[error("{format} header cannot store {field}")]
    FieldNotStored {
        field: &'static str,
        format: RomFormat,
    },
    #[error("RAM size of {bytes} bytes is not 0 or 64 << n (n = 1..=14)")]
    InvalidRamSize { bytes: u32 },
}

/// An image shorter than its own header declares.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("{segment} section expected {expected} bytes, got {available}")]
    TruncatedImage {
        segment: Segment,
        expected: u128,
        available: usize,
    },
}

/// Errors raised while reading or assembling a [`crate::RomContainer`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    /// A supplied segment buffer does not match the size its header declares.
    #[error("{segment} segment is {actual} bytes but the header declares {expected}")]
    SegmentSizeMismatch {
        segment: Segment,
        expected: u128,
        actual: usize,
    },
}
