//! iNES / NES 2.0 header codec.
//!
//! The first 16 bytes of every `.nes` ROM are the *iNES header*. It stores how much
//! PRG/CHR data the cartridge carries, which mapper is required, and a handful of
//! compatibility flags. Modern dumps may use the extended **NES 2.0** flavour, so
//! the codec understands both and presents them as a single [`Header`].
//!
//! # Quick overview
//! - [`Header::decode`] turns the packed bytes into a [`Header`].
//! - [`Header::encode`] is its inverse: `decode(encode(h)) == h` for every header
//!   `decode` can produce.
//! - [`Header::prg_rom_len`] / [`Header::chr_rom_len`] give the segment sizes that
//!   [`crate::layout::Layout`] slices the image with.

mod console_type;
mod extended_console_type;
mod ines_extension;
mod mirroring;
mod ram_size;
pub(crate) mod raw;
mod rom_format;
mod rom_size;
mod timing_mode;
mod vs_system;

pub use console_type::ConsoleType;
pub use extended_console_type::ExtendedConsoleType;
pub use ines_extension::INesExtension;
pub use mirroring::Mirroring;
pub use ram_size::{MAX_RAM_SHIFT, RamSize};
pub use rom_format::RomFormat;
pub use rom_size::{
    CHR_ROM_UNIT, INES_MAX_UNITS, MAX_EXPONENT, MAX_MULTIPLIER, NES2_MAX_UNITS, PRG_ROM_UNIT,
    RomSize,
};
pub use timing_mode::TimingMode;
pub use vs_system::{VsHardwareType, VsPpuType};

pub(crate) use rom_size::SizeDisplay;

use crate::{
    error::{EncodeError, Error, FormatError},
    layout::Segment,
};
use raw::{BitRange, Flags6, RawHeader};

/// Signature at the start of every image: `NES` followed by MS-DOS EOF.
pub const NES_MAGIC: &[u8; 4] = b"NES\x1A";

/// Size of the fixed iNES header in bytes.
pub const NES_HEADER_LEN: usize = 16;

/// Largest mapper number NES 2.0 can address (12 bits).
pub const MAX_MAPPER: u16 = 0x0FFF;
/// Largest mapper number plain iNES can address (8 bits).
pub const INES_MAX_MAPPER: u16 = 0x00FF;
/// Largest submapper number (4 bits).
pub const MAX_SUBMAPPER: u8 = 0x0F;
/// Largest miscellaneous ROM count (2 bits).
pub const MAX_MISC_ROM_COUNT: u8 = 3;

/// High level representation of an iNES / NES 2.0 cartridge header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Header {
    /// Detected header flavour; decides how sizes, mapper and bytes 8..=15 are read.
    pub format: RomFormat,
    /// PRG ROM size (16 KiB units).
    pub prg_rom: RomSize,
    /// CHR ROM size (8 KiB units). Zero means the board uses CHR RAM.
    pub chr_rom: RomSize,
    /// Mapper ID (0 == NROM, 1 == MMC1, ...). Only 8 bits under iNES.
    pub mapper: u16,
    /// NES 2.0 submapper value. Always 0 for iNES files.
    #[cfg_attr(feature = "serde", serde(default))]
    pub submapper: u8,
    /// How the PPU nametables are mirrored.
    pub mirroring: Mirroring,
    /// Battery bit: the cartridge keeps RAM contents when powered off.
    #[cfg_attr(feature = "serde", serde(default))]
    pub battery: bool,
    /// Whether the 512 byte trainer sits between the header and PRG data.
    #[cfg_attr(feature = "serde", serde(default))]
    pub trainer: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub console_type: ConsoleType,
    /// NES 2.0 Vs. System only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub vs_hardware_type: Option<VsHardwareType>,
    /// NES 2.0 Vs. System only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub vs_ppu_type: Option<VsPpuType>,
    /// NES 2.0 extended console only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub extended_console_type: Option<ExtendedConsoleType>,
    /// Volatile PRG RAM (NES 2.0 only).
    #[cfg_attr(feature = "serde", serde(default))]
    pub prg_ram: RamSize,
    /// Battery backed PRG RAM (NES 2.0 only).
    #[cfg_attr(feature = "serde", serde(default))]
    pub prg_nvram: RamSize,
    /// Volatile CHR RAM (NES 2.0 only).
    #[cfg_attr(feature = "serde", serde(default))]
    pub chr_ram: RamSize,
    /// Battery backed CHR RAM (NES 2.0 only).
    #[cfg_attr(feature = "serde", serde(default))]
    pub chr_nvram: RamSize,
    /// CPU/PPU timing. Always NTSC for iNES.
    #[cfg_attr(feature = "serde", serde(default))]
    pub timing: TimingMode,
    /// Number of miscellaneous ROM areas following CHR (NES 2.0 only).
    #[cfg_attr(feature = "serde", serde(default))]
    pub misc_rom_count: u8,
    /// Default expansion device id (NES 2.0 byte 15 bits 0..=5).
    #[cfg_attr(feature = "serde", serde(default))]
    pub expansion_device: u8,
    /// Raw iNES bytes 8..=15, kept verbatim so legacy dumps re-encode unchanged.
    #[cfg_attr(feature = "serde", serde(default))]
    pub ines: INesExtension,
    /// Header bits no field owns, such as the upper bits of byte 12 or byte 13
    /// of a plain NES title. Written back as found.
    #[cfg_attr(feature = "serde", serde(default))]
    pub reserved: [u8; NES_HEADER_LEN],
}

impl Default for Header {
    /// An empty iNES NROM header.
    fn default() -> Self {
        Self {
            format: RomFormat::INes,
            prg_rom: RomSize::Units(0),
            chr_rom: RomSize::Units(0),
            mapper: 0,
            submapper: 0,
            mirroring: Mirroring::Horizontal,
            battery: false,
            trainer: false,
            console_type: ConsoleType::Nes,
            vs_hardware_type: None,
            vs_ppu_type: None,
            extended_console_type: None,
            prg_ram: RamSize::NONE,
            prg_nvram: RamSize::NONE,
            chr_ram: RamSize::NONE,
            chr_nvram: RamSize::NONE,
            timing: TimingMode::Ntsc,
            misc_rom_count: 0,
            expansion_device: 0,
            ines: INesExtension::default(),
            reserved: [0; NES_HEADER_LEN],
        }
    }
}

impl Header {
    /// Decode a header from the first [`NES_HEADER_LEN`] bytes of `bytes`.
    ///
    /// Reserved bits that carry no meaning are ignored; the reserved RAM shift 15,
    /// reserved console types and archaic format markers are rejected.
    pub fn decode(bytes: &[u8]) -> Result<Self, FormatError> {
        let block: [u8; NES_HEADER_LEN] = bytes
            .get(..NES_HEADER_LEN)
            .and_then(|b| b.try_into().ok())
            .ok_or(FormatError::TooShort {
                actual: bytes.len(),
            })?;

        if &block[0..4] != NES_MAGIC {
            return Err(FormatError::BadMagic);
        }

        let raw = RawHeader::new(block);
        let format = RomFormat::from_bits(raw.get(raw::FORMAT))?;
        let mut header = match format {
            RomFormat::INes => Self::decode_ines(&raw)?,
            RomFormat::Nes20 => Self::decode_nes20(&raw)?,
        };
        let owned = header.owned_bits();
        header.reserved = std::array::from_fn(|i| block[i] & !owned[i]);
        Ok(header)
    }

    fn decode_ines(raw: &RawHeader) -> Result<Self, FormatError> {
        let flags6 = Flags6::from_bits_truncate(raw.get(raw::FLAGS6));

        Ok(Self {
            format: RomFormat::INes,
            prg_rom: RomSize::decode(raw.get(raw::PRG_ROM_LSB), 0, RomFormat::INes),
            chr_rom: RomSize::decode(raw.get(raw::CHR_ROM_LSB), 0, RomFormat::INes),
            mapper: combine_mapper(raw, 0),
            mirroring: Mirroring::from_flags6(flags6),
            battery: flags6.contains(Flags6::BATTERY),
            trainer: flags6.contains(Flags6::TRAINER),
            console_type: ConsoleType::from_bits(raw.get(raw::CONSOLE_TYPE), RomFormat::INes)?,
            ines: INesExtension::from_bytes(raw.bytes()),
            ..Self::default()
        })
    }

    fn decode_nes20(raw: &RawHeader) -> Result<Self, FormatError> {
        let flags6 = Flags6::from_bits_truncate(raw.get(raw::FLAGS6));
        let console_type = ConsoleType::from_bits(raw.get(raw::CONSOLE_TYPE), RomFormat::Nes20)?;

        let (vs_hardware_type, vs_ppu_type, extended_console_type) = match console_type {
            ConsoleType::VsSystem => (
                Some(VsHardwareType::from_nibble(raw.get(raw::VS_HARDWARE_TYPE))),
                Some(VsPpuType::from_nibble(raw.get(raw::VS_PPU_TYPE))),
                None,
            ),
            ConsoleType::Extended => (
                None,
                None,
                Some(ExtendedConsoleType::from_nibble(
                    raw.get(raw::EXTENDED_CONSOLE_TYPE),
                )?),
            ),
            ConsoleType::Nes | ConsoleType::PlayChoice10 => (None, None, None),
        };

        Ok(Self {
            format: RomFormat::Nes20,
            prg_rom: RomSize::decode(
                raw.get(raw::PRG_ROM_LSB),
                raw.get(raw::PRG_ROM_MSB),
                RomFormat::Nes20,
            ),
            chr_rom: RomSize::decode(
                raw.get(raw::CHR_ROM_LSB),
                raw.get(raw::CHR_ROM_MSB),
                RomFormat::Nes20,
            ),
            mapper: combine_mapper(raw, raw.get(raw::MAPPER_HIGH)),
            submapper: raw.get(raw::SUBMAPPER),
            mirroring: Mirroring::from_flags6(flags6),
            battery: flags6.contains(Flags6::BATTERY),
            trainer: flags6.contains(Flags6::TRAINER),
            console_type,
            vs_hardware_type,
            vs_ppu_type,
            extended_console_type,
            prg_ram: decode_ram(raw, raw::PRG_RAM_SHIFT, "PRG RAM")?,
            prg_nvram: decode_ram(raw, raw::PRG_NVRAM_SHIFT, "PRG NVRAM")?,
            chr_ram: decode_ram(raw, raw::CHR_RAM_SHIFT, "CHR RAM")?,
            chr_nvram: decode_ram(raw, raw::CHR_NVRAM_SHIFT, "CHR NVRAM")?,
            timing: TimingMode::from_bits(raw.get(raw::TIMING)),
            misc_rom_count: raw.get(raw::MISC_ROM_COUNT),
            expansion_device: raw.get(raw::EXPANSION_DEVICE),
            ines: INesExtension::default(),
            reserved: [0; NES_HEADER_LEN],
        })
    }

    /// Encode this header into its 16-byte on-disk form.
    ///
    /// Fails only for headers that no decode could have produced: out of range
    /// mapper/submapper/misc values, or sizes the selected format cannot store.
    pub fn encode(&self) -> Result<[u8; NES_HEADER_LEN], EncodeError> {
        let mut raw = RawHeader::new([0; NES_HEADER_LEN]);
        raw.bytes_mut()[0..4].copy_from_slice(NES_MAGIC);

        let max_mapper = match self.format {
            RomFormat::INes => INES_MAX_MAPPER,
            RomFormat::Nes20 => MAX_MAPPER,
        };
        check_range("mapper", u32::from(self.mapper), u32::from(max_mapper))?;

        let (prg_lsb, prg_msb) = self
            .prg_rom
            .encode(Segment::Prg, PRG_ROM_UNIT, self.format)?;
        let (chr_lsb, chr_msb) = self
            .chr_rom
            .encode(Segment::Chr, CHR_ROM_UNIT, self.format)?;
        raw.set(raw::PRG_ROM_LSB, prg_lsb);
        raw.set(raw::CHR_ROM_LSB, chr_lsb);

        let mut flags6 = self.mirroring.to_flags6();
        flags6.set(Flags6::BATTERY, self.battery);
        flags6.set(Flags6::TRAINER, self.trainer);
        raw.set(raw::FLAGS6, flags6.bits());
        raw.set(raw::MAPPER_LOW, (self.mapper & 0x0F) as u8);

        if self.format == RomFormat::INes && self.console_type == ConsoleType::Extended {
            return Err(EncodeError::FieldOutOfRange {
                field: "console_type",
                value: u32::from(self.console_type.bits()),
                max: u32::from(ConsoleType::PlayChoice10.bits()),
            });
        }
        raw.set(raw::CONSOLE_TYPE, self.console_type.bits());
        raw.set(raw::FORMAT, self.format.bits());
        raw.set(raw::MAPPER_MID, ((self.mapper >> 4) & 0x0F) as u8);

        match self.format {
            RomFormat::INes => {
                self.check_ines_fields()?;
                self.ines.write_into(raw.bytes_mut());
            }
            RomFormat::Nes20 => self.encode_nes20_extension(&mut raw, prg_msb, chr_msb)?,
        }

        let owned = self.owned_bits();
        for ((byte, reserved), owned) in raw.bytes_mut().iter_mut().zip(self.reserved).zip(owned) {
            *byte |= reserved & !owned;
        }

        Ok(raw.into_bytes())
    }

    /// Bits of each header byte that a field of this header is encoded into.
    ///
    /// Everything else round-trips through [`Header::reserved`]. The vertical bit
    /// is free under four-screen mirroring since four-screen overrides it.
    fn owned_bits(&self) -> [u8; NES_HEADER_LEN] {
        let mut owned = [0xFF; NES_HEADER_LEN];
        if self.mirroring == Mirroring::FourScreen {
            owned[raw::FLAGS6.byte()] &= !Flags6::VERTICAL.bits();
        }
        if self.format == RomFormat::Nes20 {
            for range in [raw::TIMING, raw::MISC_ROM_COUNT, raw::EXPANSION_DEVICE] {
                owned[range.byte()] = range.mask();
            }
            owned[raw::EXTENDED_CONSOLE_TYPE.byte()] = match self.console_type {
                ConsoleType::VsSystem => raw::VS_PPU_TYPE.mask() | raw::VS_HARDWARE_TYPE.mask(),
                ConsoleType::Extended => raw::EXTENDED_CONSOLE_TYPE.mask(),
                ConsoleType::Nes | ConsoleType::PlayChoice10 => 0,
            };
        }
        owned
    }

    /// iNES has no room for the NES 2.0 fields; refuse to drop them silently.
    fn check_ines_fields(&self) -> Result<(), EncodeError> {
        let unstored = [
            ("submapper", self.submapper != 0),
            ("prg_ram", !self.prg_ram.is_none()),
            ("prg_nvram", !self.prg_nvram.is_none()),
            ("chr_ram", !self.chr_ram.is_none()),
            ("chr_nvram", !self.chr_nvram.is_none()),
            ("timing", self.timing != TimingMode::Ntsc),
            ("misc_rom_count", self.misc_rom_count != 0),
            ("expansion_device", self.expansion_device != 0),
            ("vs_hardware_type", self.vs_hardware_type.is_some()),
            ("vs_ppu_type", self.vs_ppu_type.is_some()),
            ("extended_console_type", self.extended_console_type.is_some()),
        ];
        match unstored.into_iter().find(|&(_, set)| set) {
            Some((field, _)) => Err(EncodeError::FieldNotStored {
                field,
                format: RomFormat::INes,
            }),
            None => Ok(()),
        }
    }

    /// The header as it reads back from its own encoding.
    ///
    /// Equal to `self` for every decoded header. Otherwise it differs where
    /// encoding fills in a default, e.g. the Vs. System nibbles left as `None`,
    /// or where a field is ignored, e.g. Vs. sub-fields on a plain NES title.
    pub fn normalized(&self) -> Result<Self, Error> {
        Ok(Self::decode(&self.encode()?)?)
    }

    fn encode_nes20_extension(
        &self,
        raw: &mut RawHeader,
        prg_msb: u8,
        chr_msb: u8,
    ) -> Result<(), EncodeError> {
        if self.ines != INesExtension::default() {
            return Err(EncodeError::FieldNotStored {
                field: "ines",
                format: RomFormat::Nes20,
            });
        }
        check_range(
            "submapper",
            u32::from(self.submapper),
            u32::from(MAX_SUBMAPPER),
        )?;
        check_range(
            "misc_rom_count",
            u32::from(self.misc_rom_count),
            u32::from(MAX_MISC_ROM_COUNT),
        )?;
        check_range(
            "expansion_device",
            u32::from(self.expansion_device),
            u32::from(raw::EXPANSION_DEVICE.max()),
        )?;

        raw.set(raw::MAPPER_HIGH, ((self.mapper >> 8) & 0x0F) as u8);
        raw.set(raw::SUBMAPPER, self.submapper);
        raw.set(raw::PRG_ROM_MSB, prg_msb);
        raw.set(raw::CHR_ROM_MSB, chr_msb);
        raw.set(raw::PRG_RAM_SHIFT, self.prg_ram.shift());
        raw.set(raw::PRG_NVRAM_SHIFT, self.prg_nvram.shift());
        raw.set(raw::CHR_RAM_SHIFT, self.chr_ram.shift());
        raw.set(raw::CHR_NVRAM_SHIFT, self.chr_nvram.shift());
        raw.set(raw::TIMING, self.timing.bits());

        match self.console_type {
            ConsoleType::VsSystem => {
                let hardware = self
                    .vs_hardware_type
                    .unwrap_or(VsHardwareType::UnisystemNormal);
                let ppu = self.vs_ppu_type.unwrap_or(VsPpuType::AnyRp2c03OrRc2c03);
                raw.set(raw::VS_HARDWARE_TYPE, hardware.to_nibble());
                raw.set(raw::VS_PPU_TYPE, ppu.to_nibble());
            }
            ConsoleType::Extended => {
                let extended = self
                    .extended_console_type
                    .unwrap_or(ExtendedConsoleType::Regular);
                raw.set(raw::EXTENDED_CONSOLE_TYPE, extended.to_nibble());
            }
            ConsoleType::Nes | ConsoleType::PlayChoice10 => {}
        }

        raw.set(raw::MISC_ROM_COUNT, self.misc_rom_count);
        raw.set(raw::EXPANSION_DEVICE, self.expansion_device);
        Ok(())
    }

    /// PRG ROM size in bytes.
    pub fn prg_rom_len(&self) -> u128 {
        self.prg_rom.byte_len(PRG_ROM_UNIT)
    }

    /// CHR ROM size in bytes.
    pub fn chr_rom_len(&self) -> u128 {
        self.chr_rom.byte_len(CHR_ROM_UNIT)
    }

    /// Rewrites an iNES header in NES 2.0 form.
    ///
    /// Fields NES 2.0 makes explicit are filled in the way loaders treat iNES
    /// dumps: 8 KiB of PRG RAM (battery backed when the battery bit is set), 8 KiB
    /// of CHR RAM when there is no CHR ROM, and PAL timing when flags 9 says so.
    /// NES 2.0 headers are returned unchanged.
    pub fn to_nes2(&self) -> Self {
        if self.format == RomFormat::Nes20 {
            return *self;
        }

        let eight_kib = RamSize::from_shift(7).unwrap_or(RamSize::NONE);
        let (prg_ram, prg_nvram) = if self.battery {
            (RamSize::NONE, eight_kib)
        } else {
            (eight_kib, RamSize::NONE)
        };
        let (vs_hardware_type, vs_ppu_type) = match self.console_type {
            ConsoleType::VsSystem => (
                Some(VsHardwareType::UnisystemNormal),
                Some(VsPpuType::AnyRp2c03OrRc2c03),
            ),
            _ => (None, None),
        };

        Self {
            format: RomFormat::Nes20,
            vs_hardware_type,
            vs_ppu_type,
            prg_ram,
            prg_nvram,
            chr_ram: if self.chr_rom.is_empty() {
                eight_kib
            } else {
                RamSize::NONE
            },
            timing: if self.ines.pal_hint() {
                TimingMode::Pal
            } else {
                TimingMode::Ntsc
            },
            ines: INesExtension::default(),
            ..*self
        }
    }
}

fn combine_mapper(raw: &RawHeader, upper: u8) -> u16 {
    let lower = u16::from(raw.get(raw::MAPPER_LOW));
    let middle = u16::from(raw.get(raw::MAPPER_MID)) << 4;
    let upper = u16::from(upper) << 8;
    lower | middle | upper
}

fn decode_ram(
    raw: &RawHeader,
    range: BitRange,
    field: &'static str,
) -> Result<RamSize, FormatError> {
    let nibble = raw.get(range);
    RamSize::from_shift(nibble).ok_or(FormatError::InvalidRamSize { field, nibble })
}

fn check_range(field: &'static str, value: u32, max: u32) -> Result<(), EncodeError> {
    if value > max {
        return Err(EncodeError::FieldOutOfRange { field, value, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(tail: [u8; 12]) -> [u8; NES_HEADER_LEN] {
        let mut bytes = [0u8; NES_HEADER_LEN];
        bytes[..4].copy_from_slice(NES_MAGIC);
        bytes[4..].copy_from_slice(&tail);
        bytes
    }

    #[test]
    fn decodes_plain_ines_nrom() {
        let bytes = header_bytes([2, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

        let header = Header::decode(&bytes).expect("header decodes");

        assert_eq!(header.format, RomFormat::INes);
        assert_eq!(header.prg_rom, RomSize::Units(2));
        assert_eq!(header.chr_rom, RomSize::Units(1));
        assert_eq!(header.prg_rom_len(), 32 * 1024);
        assert_eq!(header.chr_rom_len(), 8 * 1024);
        assert_eq!(header.mapper, 0);
        assert_eq!(header.mirroring, Mirroring::Horizontal);
        assert!(!header.battery);
        assert!(!header.trainer);
        assert_eq!(header.encode().expect("encodes"), bytes);
    }

    #[test]
    fn decodes_ines_flags_and_mapper() {
        // mapper 0x14 split over bytes 6/7, vertical + battery + trainer
        let bytes = header_bytes([8, 0, 0x47, 0x10, 0, 1, 0, 0, 0, 0, 0, 0]);

        let header = Header::decode(&bytes).expect("header decodes");

        assert_eq!(header.mapper, 0x14);
        assert_eq!(header.mirroring, Mirroring::Vertical);
        assert!(header.battery);
        assert!(header.trainer);
        assert!(header.ines.pal_hint());
        assert_eq!(header.timing, TimingMode::Ntsc);
        assert_eq!(header.encode().expect("encodes"), bytes);
    }

    #[test]
    fn ines_ignores_byte8_for_the_mapper() {
        let bytes = header_bytes([1, 1, 0x10, 0x00, 0x0F, 0, 0, 0, 0, 0, 0, 0]);

        let header = Header::decode(&bytes).expect("header decodes");

        assert_eq!(header.mapper, 1);
        assert_eq!(header.submapper, 0);
        assert_eq!(header.ines.prg_ram_units, 0x0F);
    }

    #[test]
    fn decodes_nes2_header() {
        let bytes = header_bytes([
            2,           // PRG LSB
            1,           // CHR LSB
            0b0100_0010, // mapper low nibble 4, battery
            0b0000_1000, // NES 2.0
            0b0011_0001, // mapper high nibble 1, submapper 3
            0b0001_0000, // CHR MSB 1
            0b0010_0010, // PRG RAM / NVRAM shift 2
            0b0100_0011, // CHR RAM shift 3 / NVRAM shift 4
            0b0000_0010, // multi-region
            0,
            0b0000_0010, // two misc ROMs
            0x05,        // expansion device
        ]);

        let header = Header::decode(&bytes).expect("header decodes");

        assert_eq!(header.format, RomFormat::Nes20);
        assert_eq!(header.mapper, 0x104);
        assert_eq!(header.submapper, 3);
        assert_eq!(header.prg_rom_len(), 32 * 1024);
        assert_eq!(header.chr_rom_len(), 0x101 * 8 * 1024);
        assert_eq!(header.prg_ram.bytes(), 256);
        assert_eq!(header.prg_nvram.bytes(), 256);
        assert_eq!(header.chr_ram.bytes(), 512);
        assert_eq!(header.chr_nvram.bytes(), 1024);
        assert_eq!(header.timing, TimingMode::MultiRegion);
        assert_eq!(header.misc_rom_count, 2);
        assert_eq!(header.expansion_device, 5);
        assert!(header.battery);
        assert_eq!(header.encode().expect("encodes"), bytes);
    }

    #[test]
    fn exponent_encoded_prg_survives_reencode() {
        let bytes = header_bytes([20 << 2, 0, 0, 0b0000_1000, 0, 0x0F, 0, 0, 0, 0, 0, 0]);

        let header = Header::decode(&bytes).expect("header decodes");

        assert_eq!(header.prg_rom_len(), 1_048_576);
        assert_eq!(
            header.prg_rom,
            RomSize::Exponent {
                exponent: 20,
                multiplier: 0
            }
        );
        assert_eq!(header.encode().expect("encodes"), bytes);
    }

    #[test]
    fn decodes_vs_system_sub_fields() {
        let bytes = header_bytes([1, 1, 0, 0b0000_1001, 0, 0, 0, 0, 0, 0x52, 0, 0]);

        let header = Header::decode(&bytes).expect("header decodes");

        assert_eq!(header.console_type, ConsoleType::VsSystem);
        assert_eq!(header.vs_hardware_type, Some(VsHardwareType::DualSystemNormal));
        assert_eq!(header.vs_ppu_type, Some(VsPpuType::Rp2c04_0001));
        assert_eq!(header.extended_console_type, None);
        assert_eq!(header.encode().expect("encodes"), bytes);
    }

    #[test]
    fn keeps_unknown_vs_ppu_nibbles() {
        let bytes = header_bytes([1, 1, 0, 0b0000_1001, 0, 0, 0, 0, 0, 0x0E, 0, 0]);

        let header = Header::decode(&bytes).expect("header decodes");

        assert_eq!(header.vs_ppu_type, Some(VsPpuType::Unknown(0x0E)));
        assert_eq!(header.encode().expect("encodes"), bytes);
    }

    #[test]
    fn decodes_extended_console_type() {
        let bytes = header_bytes([1, 0, 0, 0b0000_1011, 0, 0, 0, 0, 0, 0x0A, 0, 0]);

        let header = Header::decode(&bytes).expect("header decodes");

        assert_eq!(header.console_type, ConsoleType::Extended);
        assert_eq!(header.extended_console_type, Some(ExtendedConsoleType::Vt369));
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = header_bytes([0; 12]);
        bytes[..4].copy_from_slice(b"NOPE");

        let err = Header::decode(&bytes).unwrap_err();
        assert!(matches!(err, FormatError::BadMagic));
    }

    #[test]
    fn rejects_short_input() {
        let err = Header::decode(&NES_MAGIC[..]).unwrap_err();
        assert!(matches!(err, FormatError::TooShort { actual: 4 }));
    }

    #[test]
    fn rejects_archaic_and_reserved_format_bits() {
        for flags7 in [0b0000_0100, 0b0000_1100, 0b0101_0100] {
            let bytes = header_bytes([1, 1, 0, flags7, 0, 0, 0, 0, 0, 0, 0, 0]);
            let err = Header::decode(&bytes).unwrap_err();
            assert!(matches!(err, FormatError::UnsupportedVariant(_)));
        }
    }

    #[test]
    fn rejects_reserved_ram_shift() {
        let bytes = header_bytes([1, 1, 0, 0b0000_1000, 0, 0, 0xF0, 0, 0, 0, 0, 0]);

        let err = Header::decode(&bytes).unwrap_err();
        assert!(matches!(
            err,
            FormatError::InvalidRamSize {
                field: "PRG NVRAM",
                nibble: 15
            }
        ));
    }

    #[test]
    fn rejects_reserved_console_types() {
        let ines = header_bytes([1, 1, 0, 0b0000_0011, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert!(matches!(
            Header::decode(&ines),
            Err(FormatError::InvalidConsoleType(3))
        ));

        let extended = header_bytes([1, 1, 0, 0b0000_1011, 0, 0, 0, 0, 0, 0x0D, 0, 0]);
        assert!(matches!(
            Header::decode(&extended),
            Err(FormatError::InvalidExtendedConsoleType(0x0D))
        ));
    }

    #[test]
    fn encode_rejects_out_of_range_fields() {
        let header = Header {
            mapper: 0x100,
            ..Header::default()
        };
        assert!(matches!(
            header.encode(),
            Err(EncodeError::FieldOutOfRange {
                field: "mapper",
                ..
            })
        ));

        let header = Header {
            format: RomFormat::Nes20,
            submapper: 16,
            ..Header::default()
        };
        assert!(matches!(
            header.encode(),
            Err(EncodeError::FieldOutOfRange {
                field: "submapper",
                ..
            })
        ));

        let header = Header {
            prg_rom: RomSize::Exponent {
                exponent: 12,
                multiplier: 0,
            },
            ..Header::default()
        };
        assert!(matches!(
            header.encode(),
            Err(EncodeError::SizeNotRepresentable {
                segment: Segment::Prg,
                ..
            })
        ));
    }

    #[test]
    fn keeps_vertical_bit_under_four_screen() {
        let bytes = header_bytes([1, 1, 0x09, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

        let header = Header::decode(&bytes).expect("header decodes");

        assert_eq!(header.mirroring, Mirroring::FourScreen);
        assert_eq!(header.reserved[6], 0x01);
        assert_eq!(header.encode().expect("encodes"), bytes);
    }

    #[test]
    fn keeps_unowned_nes2_bits() {
        // NES console: byte 13 belongs to nobody; bytes 12/14/15 only partly.
        let bytes = header_bytes([1, 1, 0, 0b0000_1000, 0, 0, 0, 0, 0xFE, 0x37, 0xFE, 0xC5]);

        let header = Header::decode(&bytes).expect("header decodes");

        assert_eq!(header.timing, TimingMode::MultiRegion);
        assert_eq!(header.misc_rom_count, 2);
        assert_eq!(header.expansion_device, 0x05);
        assert_eq!(&header.reserved[12..], &[0xFC, 0x37, 0xFC, 0xC0]);
        assert_eq!(header.encode().expect("encodes"), bytes);
    }

    #[test]
    fn reserved_bits_never_overwrite_fields() {
        let header = Header {
            format: RomFormat::Nes20,
            timing: TimingMode::Pal,
            reserved: [0xFF; NES_HEADER_LEN],
            ..Header::default()
        };

        let bytes = header.encode().expect("encodes");
        let decoded = Header::decode(&bytes).expect("decodes");

        assert_eq!(decoded.timing, TimingMode::Pal);
        assert_eq!(decoded.mapper, 0);
        assert_eq!(bytes[12], 0xFD);
    }

    #[test]
    fn ines_refuses_nes2_only_fields() {
        let cases = [
            Header {
                submapper: 5,
                ..Header::default()
            },
            Header {
                timing: TimingMode::Pal,
                ..Header::default()
            },
            Header {
                chr_ram: RamSize::from_shift(7).unwrap_or_default(),
                ..Header::default()
            },
            Header {
                console_type: ConsoleType::VsSystem,
                vs_ppu_type: Some(VsPpuType::Rc2c05_01),
                ..Header::default()
            },
        ];
        let fields = ["submapper", "timing", "chr_ram", "vs_ppu_type"];

        for (header, expected) in cases.iter().zip(fields) {
            assert_eq!(
                header.encode(),
                Err(EncodeError::FieldNotStored {
                    field: expected,
                    format: RomFormat::INes
                })
            );
        }
    }

    #[test]
    fn nes2_refuses_ines_bytes() {
        let header = Header {
            format: RomFormat::Nes20,
            ines: INesExtension {
                flags9: 1,
                ..INesExtension::default()
            },
            ..Header::default()
        };
        assert!(matches!(
            header.encode(),
            Err(EncodeError::FieldNotStored { field: "ines", .. })
        ));
    }

    #[test]
    fn normalized_fills_in_vs_nibbles() {
        let header = Header {
            format: RomFormat::Nes20,
            console_type: ConsoleType::VsSystem,
            ..Header::default()
        };

        let normalized = header.normalized().expect("encodes");

        assert_eq!(normalized.vs_hardware_type, Some(VsHardwareType::UnisystemNormal));
        assert_eq!(normalized.vs_ppu_type, Some(VsPpuType::AnyRp2c03OrRc2c03));
        assert_eq!(normalized.normalized().expect("encodes"), normalized);
    }

    #[test]
    fn upgrades_ines_to_nes2() {
        let bytes = header_bytes([2, 0, 0x12, 0x00, 0, 1, 0, 0, 0, 0, 0, 0]);
        let header = Header::decode(&bytes).expect("header decodes");

        let upgraded = header.to_nes2();

        assert_eq!(upgraded.format, RomFormat::Nes20);
        assert_eq!(upgraded.mapper, header.mapper);
        assert_eq!(upgraded.prg_rom, header.prg_rom);
        assert_eq!(upgraded.prg_nvram.bytes(), 8 * 1024);
        assert!(upgraded.prg_ram.is_none());
        assert_eq!(upgraded.chr_ram.bytes(), 8 * 1024);
        assert_eq!(upgraded.timing, TimingMode::Pal);
        assert_eq!(upgraded.ines, INesExtension::default());

        let encoded = upgraded.encode().expect("encodes");
        assert_eq!(Header::decode(&encoded).expect("decodes"), upgraded);
        assert_eq!(upgraded.to_nes2(), upgraded);
    }
}
