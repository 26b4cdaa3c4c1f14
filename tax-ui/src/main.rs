use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::io::BufReader;
use tracing::{debug, info};

use tax_client::HttpProfileClient;
use tax_ui::{AppConfig, WizardSession, logging, terminal};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Income tax planner.
///
/// Signs in with an email, walks through profile, income and deduction
/// steps, then asks the tax service for the tax as entered and with advice.
#[derive(Debug, Parser)]
struct Cli {
    /// Configuration file. Defaults to `tax-wizard.toml` when present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tax service address, overriding `[client] base_url`.
    #[arg(long)]
    base_url: Option<String>,

    /// Log filter, overriding `[log] level` (RUST_LOG still wins).
    #[arg(long)]
    log_level: Option<String>,

    /// Append logs to this file, overriding `[log] file`.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn apply(
        self,
        mut config: AppConfig,
    ) -> AppConfig {
        if let Some(base_url) = self.base_url {
            config.client.base_url = base_url;
        }
        if let Some(level) = self.log_level {
            config.log.level = level;
        }
        if let Some(file) = self.log_file {
            config.log.file = Some(file);
        }
        config
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::discover(cli.config.as_deref())?;
    let config = cli.apply(config);

    logging::init_logging(&config.log).context("failed to initialize logging")?;
    debug!(?config, "configuration loaded");

    let client = HttpProfileClient::new(&config.client)
        .with_context(|| format!("cannot use tax service at '{}'", config.client.base_url))?;
    info!(base_url = %client.base_url(), "using tax service");

    let mut session = WizardSession::new(client);
    terminal::run(&mut session, BufReader::new(tokio::io::stdin()), std::io::stdout()).await
}
