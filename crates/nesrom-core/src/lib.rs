//! Codec for iNES / NES 2.0 cartridge images.
//!
//! [`Header`] decodes and encodes the 16-byte container header, [`Layout`] finds
//! the trainer/PRG/CHR/misc segments that follow it, and [`RomContainer`] ties the
//! two together to read an image into owned segments and write it back byte for
//! byte. Nothing here touches the filesystem or logs; callers own all I/O.

pub mod container;
pub mod error;
pub mod header;
pub mod layout;
pub mod presenter;

pub use container::{RomContainer, RomParts};
pub use error::{EncodeError, Error, FormatError, LayoutError};
pub use header::{Header, NES_HEADER_LEN};
pub use layout::{Layout, Segment, TRAINER_LEN};
pub use presenter::Report;
