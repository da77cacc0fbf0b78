//! Service configuration.
//!
//! Resolution order: built-in defaults, then a TOML config file, then
//! environment overrides. The config file is `$SYMPTOMATE_CONFIG` if set,
//! otherwise `<config dir>/symptomate/config.toml` when it exists.

use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::error::SymptomateError;

pub const DEFAULT_PORT: u16 = 3001;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Address the HTTP API binds to
    pub host: String,
    pub port: u16,
    /// Custom rule table (embedded rules when unset)
    pub rules_path: Option<PathBuf>,
    /// Custom follow-up questionnaire (embedded questions when unset)
    pub followup_path: Option<PathBuf>,
    /// Probability of an injected analysis failure (0 disables)
    pub fault_rate: f64,
    /// Log filter used when RUST_LOG is not set
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            rules_path: None,
            followup_path: None,
            fault_rate: 0.0,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the standard locations and the process
    /// environment.
    pub fn load() -> Result<Self> {
        let explicit = std::env::var_os("SYMPTOMATE_CONFIG").map(PathBuf::from);
        let mut config = match explicit.or_else(|| Self::default_path().filter(|p| p.exists())) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// `<config dir>/symptomate/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("symptomate").join("config.toml"))
    }

    /// Parse a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: AppConfig =
            toml::from_str(&content).with_context(|| format!("Invalid config in {:?}", path))?;
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), SymptomateError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| SymptomateError::Config(format!("invalid PORT '{}'", port)))?;
        }
        if let Some(host) = lookup("SYMPTOMATE_HOST") {
            self.host = host;
        }
        if let Some(path) = lookup("SYMPTOMATE_RULES") {
            self.rules_path = Some(PathBuf::from(path));
        }
        if let Some(path) = lookup("SYMPTOMATE_FOLLOWUP") {
            self.followup_path = Some(PathBuf::from(path));
        }
        if let Some(rate) = lookup("SYMPTOMATE_FAULT_RATE") {
            self.fault_rate = rate.trim().parse().map_err(|_| {
                SymptomateError::Config(format!("invalid SYMPTOMATE_FAULT_RATE '{}'", rate))
            })?;
        }
        Ok(())
    }

    /// Socket address for the HTTP API.
    pub fn socket_addr(&self) -> Result<SocketAddr, SymptomateError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| SymptomateError::Config(format!("invalid host '{}'", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.port, 3001);
        assert_eq!(config.fault_rate, 0.0);
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:3001");
    }

    #[test]
    fn test_from_file_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "port = 8080\nrules_path = \"/etc/symptomate/rules.toml\"\n").unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(
            config.rules_path,
            Some(PathBuf::from("/etc/symptomate/rules.toml"))
        );
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_from_file_rejects_bad_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "port = \"eighty\"\n").unwrap();
        assert!(AppConfig::from_file(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_env(env(&[
                ("PORT", "4000"),
                ("SYMPTOMATE_HOST", "0.0.0.0"),
                ("SYMPTOMATE_FAULT_RATE", "0.1"),
                ("SYMPTOMATE_FOLLOWUP", "/tmp/q.toml"),
            ]))
            .unwrap();
        assert_eq!(config.port, 4000);
        assert_eq!(config.fault_rate, 0.1);
        assert_eq!(config.followup_path, Some(PathBuf::from("/tmp/q.toml")));
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:4000");
    }

    #[test]
    fn test_invalid_env_values() {
        let mut config = AppConfig::default();
        assert!(config.apply_env(env(&[("PORT", "not-a-port")])).is_err());
        assert!(config
            .apply_env(env(&[("SYMPTOMATE_FAULT_RATE", "often")]))
            .is_err());
    }

    #[test]
    fn test_invalid_host() {
        let config = AppConfig {
            host: "localhost:99".to_string(),
            ..AppConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }
}
