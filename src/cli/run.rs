//! The matte run command.

use clap::Args;
use std::path::PathBuf;
use tracing::info;

use crate::cli::common::{CliError, CliResult};
use crate::cli::report::{render_text, JsonOutput};
use crate::config::Config;
use crate::constants::MATTE_NONE;
use crate::device::{SamsungArtClient, TokenStore};
use crate::session::{run_until, RunOutcome, SessionOptions};

/// Set, recolor or remove the mattes on every artwork item of a Frame TV
#[derive(Debug, Clone, Args)]
pub struct RunArgs {
    /// Address of the TV
    #[arg(value_name = "HOST")]
    pub host: String,

    /// File holding the pairing token (created on first pairing)
    #[arg(short, long, value_name = "FILE")]
    pub token_file: Option<PathBuf>,

    /// Landscape matte: none, org, <type>, <color> or <type>_<color>
    #[arg(short = 'm', long = "matte", value_name = "MATTE", default_value = MATTE_NONE)]
    pub matte: String,

    /// Portrait matte, same forms as --matte (default: leave unchanged)
    #[arg(short = 'p', long = "portrait-matte", value_name = "MATTE")]
    pub portrait_matte: Option<String>,

    /// Process all art, not just My Photos
    #[arg(short = 'A', long)]
    pub all: bool,

    /// Show what would change without sending anything
    #[arg(long)]
    pub dry_run: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Use this configuration file instead of the default
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl RunArgs {
    /// Loads the configuration this run uses.
    pub fn load_config(&self) -> CliResult<Config> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
        .map_err(|e| CliError::io(format!("Failed to load config: {e:#}")))
    }

    /// Builds the session inputs from arguments and configuration.
    #[must_use]
    pub fn session_options(&self, config: &Config) -> SessionOptions {
        SessionOptions {
            landscape: Some(self.matte.clone()),
            portrait: self.portrait_matte.clone(),
            category: (!self.all).then(|| config.library.category.clone()),
            list_timeout: config.device.list_timeout(),
            dry_run: self.dry_run,
        }
    }

    /// Execute the run command
    pub async fn execute(&self) -> CliResult<()> {
        let config = self.load_config()?;

        let token_path = config
            .token_file_path(self.token_file.as_deref())
            .map_err(|e| CliError::io(format!("Failed to resolve token file: {e:#}")))?;
        info!("using token file {}", token_path.display());

        let mut client =
            SamsungArtClient::new(&self.host, config.device.clone(), TokenStore::new(token_path))
                .map_err(|e| CliError::io(format!("Failed to create client: {e}")))?;

        let options = self.session_options(&config);
        let outcome = run_until(&mut client, &options, shutdown_signal()).await?;

        self.print(&outcome)
    }

    fn print(&self, outcome: &RunOutcome) -> CliResult<()> {
        if self.json {
            let json = serde_json::to_string_pretty(&JsonOutput::new(&self.host, outcome))
                .map_err(|e| CliError::io(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        } else {
            print!("{}", render_text(&self.host, outcome));
        }
        Ok(())
    }
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
