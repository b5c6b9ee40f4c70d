//! Server configuration.

use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use derivative::Derivative;
use serde::Deserialize;
use xdg::BaseDirectories;

/// Application prefix in XDG base directories.
///
/// This will be concatenated into `$XDG_CONFIG_HOME/filmlog`.
const XDG_PREFIX: &str = "filmlog";

/// Environment variable storing the configuration as inline TOML.
const ENV_CONFIG: &str = "FILMLOG_SERVER_CONFIG";

/// Configuration for the Filmlog Server.
#[derive(Clone, Derivative, Deserialize)]
#[derivative(Debug)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Socket address to listen on.
    #[serde(default = "default_listen_address")]
    pub listen: SocketAddr,

    /// Allowed `Host` headers.
    ///
    /// This _must_ be configured for production use. If unconfigured or the
    /// list is empty, all `Host` headers are allowed.
    #[serde(rename = "allowed-hosts")]
    #[serde(default = "Vec::new")]
    pub allowed_hosts: Vec<String>,

    /// Database connection.
    pub database: DatabaseConfig,
}

/// Database connection configuration.
#[derive(Clone, Derivative, Deserialize)]
#[derivative(Debug)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Connection URL.
    ///
    /// It may contain credentials.
    #[derivative(Debug = "ignore")]
    pub url: String,

    /// Whether to enable sending of periodic heartbeat queries.
    #[serde(default = "default_db_heartbeat")]
    pub heartbeat: bool,

    /// The interval between heartbeat queries.
    #[serde(rename = "heartbeat-interval")]
    #[serde(with = "humantime_serde", default = "default_db_heartbeat_interval")]
    pub heartbeat_interval: Duration,
}

fn default_listen_address() -> SocketAddr {
    SocketAddr::from(([0u16; 8], 8080))
}

fn default_db_heartbeat() -> bool {
    false
}

fn default_db_heartbeat_interval() -> Duration {
    Duration::from_secs(60)
}

/// Loads the configuration.
///
/// An explicit path wins over the environment, which wins over the
/// XDG configuration file.
pub async fn load_config(config_path: Option<&Path>) -> Result<Config> {
    if let Some(config_path) = config_path {
        return load_config_from_path(config_path);
    }

    if let Ok(config_env) = env::var(ENV_CONFIG) {
        return load_config_from_str(&config_env);
    }

    let xdg_config_path = get_xdg_config_path()?;
    if xdg_config_path.exists() {
        return load_config_from_path(&xdg_config_path);
    }

    Err(anyhow!(
        "No configuration found. Pass one with --config, set {} or create {:?}",
        ENV_CONFIG,
        xdg_config_path,
    ))
}

pub fn load_config_from_path(path: &Path) -> Result<Config> {
    tracing::info!("Using configurations: {:?}", path);

    let config = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file {:?}", path))?;
    toml::from_str(&config).context("Invalid configuration file")
}

pub fn load_config_from_str(s: &str) -> Result<Config> {
    tracing::info!("Using configurations from environment variable");
    toml::from_str(s).context("Invalid configuration")
}

pub fn get_xdg_config_path() -> Result<PathBuf> {
    let xdg_dirs = BaseDirectories::with_prefix(XDG_PREFIX)?;
    let config_path = xdg_dirs.get_config_home().join("server.toml");

    Ok(config_path)
}
