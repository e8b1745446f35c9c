//! Warpmap command line: render star maps to files or serve them over HTTP.

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod create;
mod protocol;
mod server;

#[derive(Debug, Parser)]
#[command(name = "warpmap", version, about = "Hexagonal star map renderer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Render a map to map.svg and map.html
    Create {
        /// Map description (.json or .csv); the standard map when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory the files are written to
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Use the monochrome palette
        #[arg(long)]
        mono: bool,
    },
    /// Serve the map API over HTTP
    Serve {
        #[arg(long, env = "SERVER_ADDR", default_value = "0.0.0.0:8080")]
        addr: SocketAddr,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match Cli::parse().command {
        Command::Create {
            input,
            out_dir,
            mono,
        } => create::create_map(input.as_deref(), &out_dir, mono),
        Command::Serve { addr } => {
            info!("Starting Warpmap server...");
            server::run_server(addr).await
        }
    }
}
