pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{ConversionController, ConversionService};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Convert {
        fiat: Option<String>,
        crypto: Option<String>,
    },
    Interactive,
}

/// Loads configuration, applying the CLI base URL override if given.
pub fn load_config(config_path: Option<&str>, base_url: Option<&str>) -> Result<AppConfig> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    let config = config.with_base_url(base_url);
    debug!("Loaded config: {config:#?}");
    Ok(config)
}

/// Wires the HTTP quote provider into a fresh controller.
pub fn build_controller(config: &AppConfig) -> ConversionController {
    let provider = providers::quote_api::QuoteApiProvider::new(&config.provider.base_url);
    let service = ConversionService::new(Arc::new(provider));
    ConversionController::new(service, config.units.clone())
}

pub async fn run_command(
    command: AppCommand,
    config_path: Option<&str>,
    base_url: Option<&str>,
) -> Result<()> {
    info!("Converter starting...");

    let config = load_config(config_path, base_url)?;
    let mut controller = build_controller(&config);

    match command {
        AppCommand::Convert { fiat, crypto } => {
            cli::convert::run(&mut controller, fiat.as_deref(), crypto.as_deref()).await
        }
        AppCommand::Interactive => cli::interactive::run(&mut controller).await,
    }
}
