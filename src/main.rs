use clap::Parser;
use sender_rs::cli::{self, Cli};
use sender_rs::logger::init_logger;
use sender_rs::services::{Dispatcher, ProviderRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = cli::load_settings(&cli)?;
    init_logger(settings.logger.clone())?;

    tracing::debug!(version = sender_rs::pkg_version(), "Starting sender");

    let dispatcher =
        Dispatcher::new(ProviderRegistry::with_defaults()).with_resolver(settings.providers);

    let receipt = cli::execute_command(cli.command, &dispatcher).await?;
    println!("{}", serde_json::to_string_pretty(&receipt)?);

    Ok(())
}
