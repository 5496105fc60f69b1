//! Bridge configuration
//!
//! Stored as YAML in the platform config directory
//! (`~/.config/zoomlink/config.yaml` on Linux):
//!
//! ```yaml
//! controller:
//!   port_match: "R24"
//! session:
//!   max_chained_events: 256
//!   notify_missing_tracks: true
//! host:
//!   track_count: 16
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use zoomlink_core::SessionConfig;
use zoomlink_midi::ControllerProfile;

use crate::host::SimulatedHostConfig;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub controller: ControllerProfile,
    pub session: SessionConfig,
    pub host: SimulatedHostConfig,
}

/// Get the default config file path
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join("zoomlink")
        .join("config.yaml")
}

/// Load configuration from a YAML file
///
/// If the file doesn't exist, returns default config.
/// If the file exists but is invalid, logs a warning and returns default config.
pub fn load_config(path: &Path) -> BridgeConfig {
    log::info!("load_config: Loading from {:?}", path);

    if !path.exists() {
        log::info!("load_config: Config file doesn't exist, using defaults");
        return BridgeConfig::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_yaml::from_str::<BridgeConfig>(&contents) {
            Ok(config) => {
                log::info!(
                    "load_config: Loaded config - port match: '{}', {} tracks, chain limit {}",
                    config.controller.port_match,
                    config.host.track_count,
                    config.session.max_chained_events
                );
                config
            }
            Err(e) => {
                log::warn!("load_config: Failed to parse config: {}, using defaults", e);
                BridgeConfig::default()
            }
        },
        Err(e) => {
            log::warn!(
                "load_config: Failed to read config file: {}, using defaults",
                e
            );
            BridgeConfig::default()
        }
    }
}

/// Save configuration to a YAML file
///
/// Creates parent directories if they don't exist.
pub fn save_config(config: &BridgeConfig, path: &Path) -> Result<()> {
    log::info!("save_config: Saving to {:?}", path);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;

    std::fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    log::info!("save_config: Config saved successfully");
    Ok(())
}
