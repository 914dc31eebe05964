//! uidocs CLI - shadcn/ui documentation fetcher
//!
//! Entry point for the `uidocs` command-line interface. Command
//! implementations live in the `commands` module; rendering in `output`.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;
use uidocs_core::{Config, FetchOptions, FetchService};

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    let config = Config::load()?;
    let service = FetchService::new(&config)?;

    // Expired persistent entries age out even without lookups hitting them
    let sweeper = service.spawn_sweeper();

    let options = FetchOptions {
        use_cache: !cli.no_cache,
        timeout: cli
            .timeout
            .map_or_else(|| service.default_timeout(), Duration::from_secs),
    };

    match &cli.command {
        Commands::Component { name } => {
            commands::fetch_component(&service, name, options, cli.json).await?;
        },
        Commands::Doc { path } => {
            commands::fetch_doc(&service, path, options, cli.json).await?;
        },
        Commands::Install { framework } => {
            commands::fetch_install(&service, framework.as_deref(), options, cli.json).await?;
        },
        Commands::Get { url } => {
            commands::fetch_url(&service, url, options, cli.json).await?;
        },
        Commands::Cache { action } => {
            commands::handle_cache(&service, action, cli.json)?;
        },
    }

    sweeper.abort();
    Ok(())
}

fn initialize_logging(cli: &Cli) -> Result<()> {
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
