//! Human readable summaries of headers and images.

use std::fmt;

use crate::{
    header::{CHR_ROM_UNIT, ConsoleType, Header, PRG_ROM_UNIT, RomFormat, SizeDisplay},
    layout::{Layout, Segment},
};

/// Writes a byte count using the largest binary unit that divides it evenly.
pub(crate) fn write_byte_len(f: &mut fmt::Formatter<'_>, bytes: u128) -> fmt::Result {
    const KIB: u128 = 1024;
    const MIB: u128 = 1024 * KIB;
    if bytes >= MIB && bytes % MIB == 0 {
        write!(f, "{} MiB", bytes / MIB)
    } else if bytes >= KIB && bytes % KIB == 0 {
        write!(f, "{} KiB", bytes / KIB)
    } else {
        write!(f, "{bytes} B")
    }
}

/// Diagnostic report of a header, optionally with the image layout.
///
/// Rendered through [`fmt::Display`]; formatting never fails for a decoded header.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    header: &'a Header,
    layout: Option<Layout>,
}

impl<'a> Report<'a> {
    pub fn new(header: &'a Header) -> Self {
        Self {
            header,
            layout: None,
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    fn write_header(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = self.header;
        writeln!(f, "Format:            {}", h.format)?;
        match h.format {
            RomFormat::INes => writeln!(f, "Mapper:            {}", h.mapper)?,
            RomFormat::Nes20 => writeln!(
                f,
                "Mapper:            {} (submapper {})",
                h.mapper, h.submapper
            )?,
        }
        writeln!(
            f,
            "PRG ROM:           {}",
            SizeDisplay {
                size: h.prg_rom,
                unit: PRG_ROM_UNIT
            }
        )?;
        writeln!(
            f,
            "CHR ROM:           {}",
            SizeDisplay {
                size: h.chr_rom,
                unit: CHR_ROM_UNIT
            }
        )?;
        writeln!(f, "Mirroring:         {}", h.mirroring)?;
        writeln!(f, "Battery:           {}", yes_no(h.battery))?;
        writeln!(f, "Trainer:           {}", yes_no(h.trainer))?;
        writeln!(f, "Console:           {}", h.console_type)?;

        match h.format {
            RomFormat::INes => {
                if h.ines.pal_hint() {
                    writeln!(f, "TV system hint:    PAL")?;
                }
                if h.ines.prg_ram_units != 0 {
                    writeln!(f, "PRG RAM hint:      {} x 8 KiB", h.ines.prg_ram_units)?;
                }
            }
            RomFormat::Nes20 => self.write_nes2(f)?,
        }
        Ok(())
    }

    fn write_nes2(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = self.header;
        match h.console_type {
            ConsoleType::VsSystem => {
                if let Some(hardware) = h.vs_hardware_type {
                    writeln!(f, "Vs. hardware:      {hardware}")?;
                }
                if let Some(ppu) = h.vs_ppu_type {
                    writeln!(f, "Vs. PPU:           {ppu}")?;
                }
            }
            ConsoleType::Extended => {
                if let Some(extended) = h.extended_console_type {
                    writeln!(f, "Extended console:  {extended}")?;
                }
            }
            ConsoleType::Nes | ConsoleType::PlayChoice10 => {}
        }
        writeln!(f, "Timing:            {}", h.timing)?;
        writeln!(f, "PRG RAM:           {}", h.prg_ram)?;
        writeln!(f, "PRG NVRAM:         {}", h.prg_nvram)?;
        writeln!(f, "CHR RAM:           {}", h.chr_ram)?;
        writeln!(f, "CHR NVRAM:         {}", h.chr_nvram)?;
        writeln!(f, "Misc ROMs:         {}", h.misc_rom_count)?;
        writeln!(f, "Expansion device:  {:#04X}", h.expansion_device)
    }

    fn write_layout(f: &mut fmt::Formatter<'_>, layout: &Layout) -> fmt::Result {
        writeln!(f, "Layout:")?;
        for segment in Segment::ALL {
            let len = layout.len(segment);
            if len == 0 && segment != Segment::Prg {
                continue;
            }
            writeln!(
                f,
                "  {:<9} {:#08X}  {} bytes",
                segment.name(),
                layout.offset(segment),
                len
            )?;
        }
        writeln!(f, "  total     {} bytes", layout.image_len())
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_header(f)?;
        if let Some(layout) = &self.layout {
            Self::write_layout(f, layout)?;
        }
        Ok(())
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
