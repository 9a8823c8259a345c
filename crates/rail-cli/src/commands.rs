use colored::Colorize;
use rail_server::{RailServer, ServerConfig, StorageBackend};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args.source)?;
    print_storage(&config);
    println!("{} Listening on {}", "✓".green().bold(), config.bind_addr.to_string().bold());

    let server = RailServer::new(config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.serve())?;
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args.source)?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

/// Load the configuration file, if any, then apply command-line overrides.
pub(crate) fn resolve_config(source: &ConfigSource) -> anyhow::Result<ServerConfig> {
    let mut config = match &source.config {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration");
            ServerConfig::load(path)?
        }
        None => ServerConfig::default(),
    };
    if let Some(bind) = source.bind {
        config.bind_addr = bind;
    }
    if let Some(storage) = source.storage {
        config.storage.backend = match storage {
            StorageKind::Memory => StorageBackend::Memory,
            StorageKind::File => StorageBackend::File,
        };
    }
    if let Some(dir) = &source.data_dir {
        config.storage.data_dir = dir.clone();
    }
    Ok(config)
}

fn print_storage(config: &ServerConfig) {
    match config.storage.backend {
        StorageBackend::Memory => println!(
            "  Storage: {} {}",
            "memory".yellow(),
            "(records are lost on shutdown)".dimmed()
        ),
        StorageBackend::File => println!(
            "  Storage: {} in {}",
            "file".cyan(),
            config.storage.data_dir.display().to_string().bold()
        ),
    }
}
