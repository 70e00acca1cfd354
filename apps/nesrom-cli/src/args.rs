use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;

use crate::files::{FileLayout, FileLayoutError};

/// iNES / NES 2.0 ROM inspector and splitter
#[derive(Parser, Debug)]
#[command(name = "nesrom", author, version, about, long_about = None)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: Level,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Split a ROM image into header.json plus one file per segment
    Unpack(UnpackArgs),
    /// Rebuild a ROM image from an unpacked directory
    Pack(PackArgs),
    /// Print the decoded header and segment layout
    Info(InfoArgs),
    /// Rewrite an iNES header in NES 2.0 form
    Nes2(Nes2Args),
}

/// How CHR data is spread over files. Shared by `pack` and `unpack`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct LayoutArgs {
    /// Store CHR ROM as `bank_NN.chr` files of this many bytes instead of one `chr.dat`
    #[arg(long, value_name = "BYTES")]
    pub chr_bank_size: Option<usize>,
}

impl LayoutArgs {
    pub fn file_layout(&self) -> Result<FileLayout, FileLayoutError> {
        FileLayout::new(self.chr_bank_size)
    }
}

#[derive(clap::Args, Debug)]
pub struct UnpackArgs {
    /// ROM image to split
    pub rom: PathBuf,

    /// Output directory (defaults to the ROM file name without extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub layout: LayoutArgs,
}

#[derive(clap::Args, Debug)]
pub struct PackArgs {
    /// Directory produced by `unpack`
    pub dir: PathBuf,

    /// Output image
    #[arg(short, long, default_value = "packed.nes")]
    pub output: PathBuf,

    #[command(flatten)]
    pub layout: LayoutArgs,
}

#[derive(clap::Args, Debug)]
pub struct InfoArgs {
    /// ROM image to describe
    pub rom: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct Nes2Args {
    /// ROM image to upgrade
    pub rom: PathBuf,

    /// Output image (defaults to `<name>.nes2.nes` next to the input)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
