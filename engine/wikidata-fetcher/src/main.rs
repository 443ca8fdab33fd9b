use clap::Parser;
use tracing::info;
use wikidata_fetcher::cli::{Cli, CliHandler};
use wikidata_fetcher::{initialize_logging, FetcherConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration, then fold in command-line overrides
    let mut config = match cli.config.as_deref() {
        Some(path) => FetcherConfig::load(Some(path))?,
        None => FetcherConfig::from_env()?,
    };
    cli.command.apply_overrides(&mut config);
    config.validate()?;

    initialize_logging(&config.logging)?;
    info!("Starting career fetcher v{}", env!("CARGO_PKG_VERSION"));

    let handler = CliHandler::new(config)?;
    handler.handle_command(cli.command).await
}
