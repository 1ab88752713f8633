//! MatteSync - matte reconciliation for Frame TVs
//!
//! Sets, recolors or removes the mattes of every artwork item stored on a
//! Frame-style TV, from the command line.

use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mattesync::cli::RunArgs;
use mattesync::constants::APP_BINARY_NAME;

/// MatteSync - set or remove mattes on Frame TV art
#[derive(Parser, Debug)]
#[command(name = APP_BINARY_NAME, author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    run: RunArgs,

    /// Enable debug logging
    #[arg(short = 'D', long)]
    debug: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = cli.run.execute().await {
        error!("{e}");
        std::process::exit(e.exit_code.code());
    }
}
