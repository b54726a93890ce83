//! Application configuration.
//!
//! Layers, last wins:
//! 1. Built-in defaults
//! 2. `config/default.toml` (optional)
//! 3. Environment: `PARKING__FACILITY__SLOT_COUNT=40`, `PARKING__LOG__JSON=true`
//! 4. `PARKING_STATE_FILE`

use anyhow::{Context, Result};
use parking_core::FacilityConfig;
use serde::{Deserialize, Serialize};
use telemetry::TracingConfig;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Parameters used when no saved state exists yet
    #[serde(default)]
    pub facility: FacilityConfig,

    /// Where the facility snapshot is read from and written to
    #[serde(default = "default_state_file")]
    pub state_file: String,

    #[serde(default)]
    pub log: TracingConfig,
}

fn default_state_file() -> String {
    "data/facility.json".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            facility: FacilityConfig::default(),
            state_file: default_state_file(),
            log: TracingConfig::default(),
        }
    }
}

/// Load configuration from files and environment.
pub fn load_config() -> Result<AppConfig> {
    let config = config::Config::builder()
        .add_source(config::Config::try_from(&AppConfig::default())?)
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        .add_source(
            config::Environment::with_prefix("PARKING")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: AppConfig = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    if let Ok(path) = std::env::var("PARKING_STATE_FILE") {
        config.state_file = path;
    }

    Ok(config)
}
