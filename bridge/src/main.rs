mod bridge;
mod config;
mod error;
mod scanner;
mod selector;
mod source;
mod sync;

use crate::bridge::Bridge;
use crate::config::Config;
use anyhow::{Context, Result};
use log::{error, warn};

#[tokio::main]
async fn main() -> Result<()> {
    common::load_env();

    let path = Config::path();
    let loaded = Config::from_file(&path);
    let config = loaded.as_ref().cloned().unwrap_or_default();

    if let Err(e) = common::init_logger(config.log_file.as_deref()) {
        common::init_logger(None)?;
        warn!("Couldn't open log file, logging to stderr: {e}");
    }
    if let Err(e) = loaded {
        warn!("{e}. Using default configuration");
    }

    start_bridge(config).await
}

async fn start_bridge(config: Config) -> Result<()> {
    let tixly = tixly::HttpClient::connect(&config.tixly_address, &config.tixly_credentials)
        .await
        .inspect_err(|e| error!("Failed to retrieve access token: {e}"))
        .context("Failed to retrieve access token.")?;

    if config.etron_address.is_empty() {
        warn!("No Etron address configured, slot writes will fail");
    }
    let etron = etron::HttpClient::new(&config.etron_address, &config.etron_auth)?;

    Bridge::new(tixly, etron, config).run().await;
    Ok(())
}
