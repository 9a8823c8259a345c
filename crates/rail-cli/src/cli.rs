use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "rail",
    about = "Station booking ledger: trains, travellers and tickets",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the booking ledger HTTP server
    Serve(ServeArgs),
    /// Print the effective server configuration
    Config(ConfigArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum StorageKind {
    Memory,
    File,
}

/// Options shared by every command that resolves a server configuration.
#[derive(Args, Debug)]
pub struct ConfigSource {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Address to listen on, overriding the file
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// Storage backend, overriding the file
    #[arg(long, value_enum)]
    pub storage: Option<StorageKind>,
    /// Directory for file-backed storage, overriding the file
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub source: ConfigSource,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub source: ConfigSource,
}
