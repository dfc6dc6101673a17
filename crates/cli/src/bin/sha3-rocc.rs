use anyhow::Result;
use clap::{Parser, Subcommand};
use sha3_rocc_cli::commands::hash::HashCmd;
use sha3_rocc_executor::setup_logger;

#[derive(Parser)]
#[command(name = "sha3-rocc", version, about = "Run messages through the SHA-3 RoCC accelerator model.")]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Hash(HashCmd),
}

fn main() -> Result<()> {
    setup_logger();
    let cli = Cli::parse();
    match cli.command {
        Commands::Hash(cmd) => cmd.run(),
    }
}
