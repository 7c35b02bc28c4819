//! Configuration management for Siren.
//!
//! Loads configuration from ${SIREN_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Readiness condition for the update watcher.
///
/// Update polling starts only once the application is considered ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Readiness {
    /// Wait for the first rendered frame (default).
    #[default]
    Stable,
    /// Start polling as soon as the watcher is spawned.
    Immediate,
}

/// Gateway connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Base URL of the event dispatch gateway.
    pub base_url: String,
    /// Per-request timeout in seconds (0 disables).
    pub request_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8040".to_string(),
            request_timeout_secs: 10,
        }
    }
}

impl GatewayConfig {
    /// Returns the request timeout, or `None` when disabled.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

/// Update notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdatesConfig {
    /// Whether update polling runs at all.
    pub enabled: bool,
    /// Cadence of release checks, in seconds.
    pub poll_interval_secs: u64,
    /// When polling starts.
    pub readiness: Readiness,
}

impl Default for UpdatesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            poll_interval_secs: 60,
            readiness: Readiness::Stable,
        }
    }
}

impl UpdatesConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}

/// Connectivity probe configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectivityConfig {
    /// Cadence of the gateway health probe, in seconds.
    pub probe_interval_secs: u64,
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            probe_interval_secs: 15,
        }
    }
}

impl ConnectivityConfig {
    pub fn probe_interval(&self) -> Duration {
        Duration::from_secs(self.probe_interval_secs.max(1))
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Gateway connection settings.
    pub gateway: GatewayConfig,
    /// Update notification settings.
    pub updates: UpdatesConfig,
    /// Connectivity probe settings.
    pub connectivity: ConnectivityConfig,
}

impl Config {
    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the commented default template to `path` unless it already exists.
    ///
    /// Returns `true` when the file was created.
    pub fn init_at(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(true)
    }
}

/// Returns the default config template with comments.
///
/// Embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for Siren configuration and data directories.
    //!
    //! SIREN_HOME resolution order:
    //! 1. SIREN_HOME environment variable (if set)
    //! 2. ~/.config/siren (default)

    use std::path::PathBuf;

    /// Returns the user's home directory, if known.
    pub fn home_dir() -> Option<PathBuf> {
        std::env::var_os("HOME").map(PathBuf::from)
    }

    /// Returns the Siren home directory.
    ///
    /// Checks SIREN_HOME env var first, falls back to ~/.config/siren.
    pub fn siren_home() -> PathBuf {
        if let Some(home) = std::env::var_os("SIREN_HOME") {
            return PathBuf::from(home);
        }

        home_dir()
            .map(|h| h.join(".config").join("siren"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        siren_home().join("config.toml")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        siren_home().join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.gateway.base_url, "http://localhost:8040");
        assert_eq!(config.updates.poll_interval_secs, 60);
        assert_eq!(config.updates.readiness, Readiness::Stable);
        assert!(config.updates.enabled);
        assert_eq!(config.connectivity.probe_interval_secs, 15);
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.gateway.base_url, GatewayConfig::default().base_url);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[gateway]\nbase_url = \"http://dispatch.example:9000\"\n\n[updates]\nreadiness = \"immediate\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.gateway.base_url, "http://dispatch.example:9000");
        assert_eq!(config.updates.readiness, Readiness::Immediate);
        // Untouched sections keep defaults.
        assert_eq!(config.updates.poll_interval_secs, 60);
        assert_eq!(config.connectivity.probe_interval_secs, 15);
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let from_template: Config = toml::from_str(default_config_template()).unwrap();
        let defaults = Config::default();
        assert_eq!(from_template.gateway.base_url, defaults.gateway.base_url);
        assert_eq!(
            from_template.updates.poll_interval_secs,
            defaults.updates.poll_interval_secs
        );
        assert_eq!(from_template.updates.readiness, defaults.updates.readiness);
    }

    #[test]
    fn test_init_at_creates_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(Config::init_at(&path).unwrap());
        assert!(!Config::init_at(&path).unwrap());
        assert!(path.exists());
    }

    #[test]
    fn test_zero_timeout_disables() {
        let gateway = GatewayConfig {
            request_timeout_secs: 0,
            ..GatewayConfig::default()
        };
        assert!(gateway.request_timeout().is_none());
    }
}
