use clap::Parser;
use tracing_subscriber::FmtSubscriber;

use nesrom_cli::{
    args::{Cli, Command},
    commands,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Command::Unpack(args) => commands::unpack::run(args),
        Command::Pack(args) => commands::pack::run(args),
        Command::Info(args) => commands::info::run(args),
        Command::Nes2(args) => commands::nes2::run(args),
    }
}
