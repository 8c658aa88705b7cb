//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{load_config, validate_config, ConfigError, RelayConfig};

#[derive(Debug, Parser)]
#[command(name = "fetch-relay")]
#[command(about = "Relay a remote JSON user list over a local HTTP server", long_about = None)]
pub struct Cli {
    /// TOML configuration file; built-in defaults are used without it.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Override upstream.url.
    #[arg(long)]
    pub upstream_url: Option<String>,
}

/// Load the config file (or defaults), apply overrides, then validate the result.
pub fn resolve_config(cli: Cli) -> Result<RelayConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };

    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(url) = cli.upstream_url {
        config.upstream.url = url;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
