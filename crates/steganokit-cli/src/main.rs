use clap::Parser;
use log::debug;

mod cli;
mod commands;

use cli::{CliArgs, Commands};

pub type CliResult<T> = steganokit_core::Result<T>;

fn main() -> CliResult<()> {
    env_logger::init();

    let args = CliArgs::parse();
    debug!("{args:?}");
    let max_decode_bits = args.max_decode_bits;

    match args.command {
        Commands::Hide(hide) => hide.run(),
        Commands::Unveil(unveil) => unveil.run(max_decode_bits),
        Commands::Capacity(capacity) => capacity.run(),
    }
}
