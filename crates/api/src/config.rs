//! Dashboard Configuration
//!
//! Settings come from an optional TOML file overlaid with `TIDE__*`
//! environment variables, e.g. `TIDE__PIPELINE__CSV_PATH`.

use pipeline::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File read when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "tide-dashboard.toml";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "TIDE";

/// HTTP server and logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// `trace`, `debug`, `info`, `warn` or `error`
    pub log_level: String,
    /// Emit JSON log lines instead of text
    pub json_logs: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl ServerConfig {
    /// Loopback only, verbose logs
    pub fn local() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            log_level: "debug".to_string(),
            json_logs: false,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub pipeline: PipelineConfig,
    pub server: ServerConfig,
}

/// Load configuration
///
/// An explicit `path` must exist; otherwise [`DEFAULT_CONFIG_FILE`] is read
/// if present.
pub fn load_config(path: Option<&Path>) -> Result<DashboardConfig, ::config::ConfigError> {
    let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    let settings = ::config::Config::builder()
        .add_source(::config::File::from(file).required(path.is_some()))
        .add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
