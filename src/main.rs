//! Foreman CLI entry point.

use anyhow::Result;
use clap::Parser;

use foreman::cli::{handle_error, Cli, Commands};
use foreman::infrastructure::config::ConfigLoader;
use foreman::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli.command, cli.config.as_deref(), cli.json).await {
        handle_error(err, cli.json);
    }
}

async fn run(command: Commands, config_path: Option<&std::path::Path>, json: bool) -> Result<()> {
    let config = match config_path {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    let _logger = LoggerImpl::init(&LogConfig::from(&config.logging))?;

    match command {
        Commands::Progress(args) => foreman::cli::commands::progress::execute(args, &config, json).await,
        Commands::Pretty(args) => foreman::cli::commands::pretty::execute(args, json).await,
    }
}
