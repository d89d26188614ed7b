//! Configuration loading and typed config structures.
//!
//! The canonical configuration lives in `farmstead-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror
//! the YAML structure and a loader that reads the file; a missing file
//! means defaults everywhere.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::scheduler::SchedulerConfig;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration, mirroring `farmstead-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FarmConfig {
    /// World identity and reproducibility settings.
    #[serde(default)]
    pub world: WorldSection,

    /// Tick cadence settings.
    #[serde(default)]
    pub scheduler: SchedulerSection,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingSection,
}

impl FarmConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values for the server binding:
    /// `FARMSTEAD_HOST` and `FARMSTEAD_PORT`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.server.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.server.apply_env_overrides();
        Ok(config)
    }
}

/// World identity configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldSection {
    /// Human-readable farm name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for reproducible runs.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for WorldSection {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
        }
    }
}

/// Tick cadence configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SchedulerSection {
    /// Seconds between advances.
    #[serde(default = "default_advance_interval_secs")]
    pub advance_interval_secs: u64,

    /// Days applied per advance as one atomic batch.
    #[serde(default = "default_days_per_advance")]
    pub days_per_advance: u32,
}

impl SchedulerSection {
    /// Convert into the scheduler's runtime configuration.
    pub const fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            advance_interval: Duration::from_secs(self.advance_interval_secs),
            days_per_advance: self.days_per_advance,
        }
    }
}

impl Default for SchedulerSection {
    fn default() -> Self {
        Self {
            advance_interval_secs: default_advance_interval_secs(),
            days_per_advance: default_days_per_advance(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Address to bind (e.g. `0.0.0.0`).
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerSection {
    /// Override the binding with `FARMSTEAD_HOST` / `FARMSTEAD_PORT`
    /// when set, so deployments can rebind without editing the YAML.
    ///
    /// An unparseable `FARMSTEAD_PORT` is ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("FARMSTEAD_HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("FARMSTEAD_PORT")
            && let Ok(port) = port.parse::<u16>()
        {
            self.port = port;
        }
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingSection {
    /// Log level filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    "Farmstead".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_advance_interval_secs() -> u64 {
    10
}

const fn default_days_per_advance() -> u32 {
    3
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    8000
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = FarmConfig::default();
        assert_eq!(config.world.seed, 42);
        assert_eq!(config.scheduler.advance_interval_secs, 10);
        assert_eq!(config.scheduler.days_per_advance, 3);
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
world:
  name: "Test Farm"
  seed: 123

scheduler:
  advance_interval_secs: 5
  days_per_advance: 1

server:
  host: "127.0.0.1"
  port: 9090

logging:
  level: "debug"
"#;

        let config = FarmConfig::parse(yaml).unwrap();
        assert_eq!(config.world.name, "Test Farm");
        assert_eq!(config.world.seed, 123);
        assert_eq!(config.scheduler.days_per_advance, 1);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = FarmConfig::parse("world:\n  seed: 7\n").unwrap();
        // Seed is overridden; everything else uses defaults.
        assert_eq!(config.world.seed, 7);
        assert_eq!(config.scheduler.advance_interval_secs, 10);
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(FarmConfig::parse("").is_ok());
    }

    #[test]
    fn scheduler_section_converts_to_runtime_config() {
        let section = SchedulerSection::default();
        let config = section.scheduler_config();
        assert_eq!(config.advance_interval, Duration::from_secs(10));
        assert_eq!(config.days_per_advance, 3);
    }
}
