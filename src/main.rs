mod application;
mod cli;
mod cli_handlers;
mod core;
mod modules;
mod utils;

use clap::Parser;
use cli::Cli;
use cli_handlers::from_cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    from_cli(cli.command).execute()
}
