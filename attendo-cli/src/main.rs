//! attendo - command-line front end for the Attendo HR dashboard

mod cli;
mod commands;
mod logger;

use std::sync::Arc;

use anyhow::Context;
use attendo_client::{AttendoClient, ClientConfig};
use clap::Parser;

use cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logger::init_logger(logger::default_level(cli.verbose), cli.json_logs, cli.log_dir.as_deref())
        .context("failed to initialize logging")?;

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url.clone() {
        config.base_url = url;
    }
    if let Some(dir) = cli.work_dir.clone() {
        config = config.with_work_dir(dir);
    }
    tracing::debug!(base_url = %config.base_url, work_dir = %config.work_dir.display(), "configuration loaded");

    let client = AttendoClient::connect(config).context("failed to build HTTP client")?;
    commands::run(Arc::new(client), cli.command).await
}
