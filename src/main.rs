use anyhow::Result;
use clap::Parser;
use gpulse::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.execute()
}
