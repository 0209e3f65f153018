//! CLI argument parsing.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "monitor")]
#[command(about = "Monitor for the voice radio status SDK")]
pub struct Cli {
    /// Base URL of the SDK server
    #[arg(
        long,
        env = "SDK_URL",
        default_value = "http://127.0.0.1:49080",
        global = true
    )]
    pub url: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Stream radio events from the WebSocket feed [default]
    Watch,

    /// Callsigns currently transmitting
    Transmitting,

    /// Stations that can be received
    Rx,

    /// Stations that can be transmitted on
    Tx,
}
