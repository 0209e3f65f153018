//! Voice radio status SDK monitor.

use clap::Parser;
use monitor::{cli, sdk_client};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = cli::Cli::parse();

    let path = match cli.command.unwrap_or(cli::Commands::Watch) {
        cli::Commands::Watch => {
            return sdk_client::watch(&sdk_client::ws_url(&cli.url)).await;
        }
        cli::Commands::Transmitting => "/transmitting",
        cli::Commands::Rx => "/rx",
        cli::Commands::Tx => "/tx",
    };

    let entries = sdk_client::fetch_list(&cli.url, path).await?;
    if entries.is_empty() {
        println!("(none)");
    }
    for entry in entries {
        println!("{}", entry);
    }

    Ok(())
}
