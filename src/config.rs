//! Gateway configuration: TOML settings loaded once at startup.
//!
//! All values have working defaults, so the service runs with no config file
//! at all. A missing file is fine; a present but unparsable file is an error.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Service name used in the health endpoint and config dir discovery.
pub const SERVICE_NAME: &str = "citygate";

/// Process-wide gateway settings. Loaded once and shared as `Arc<Config>`;
/// there is no runtime reload.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address the gateway binds to.
    pub listen_host: String,
    pub listen_port: u16,

    /// Base URL of the normalization backend. Adjust when the backend runs
    /// somewhere other than the local default.
    pub upstream_base_url: String,
    /// Timeout for a single backend call, in seconds.
    pub upstream_timeout_secs: u64,

    /// Allowed CORS origins. `["*"]` allows everything.
    pub cors_allow_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_host: "0.0.0.0".to_string(),
            listen_port: 8000,
            upstream_base_url: "http://localhost:8101".to_string(),
            upstream_timeout_secs: 10,
            cors_allow_origins: vec!["*".to_string()],
        }
    }
}

impl Config {
    /// Platform config file location, e.g. `~/.config/citygate/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", SERVICE_NAME)
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load settings from `path`, or from the platform config dir when no
    /// path is given. Falls back to defaults when the file does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Parse a TOML document. Unknown keys are logged and ignored rather than
    /// rejected, so a config file can carry keys for newer versions.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let de = toml::Deserializer::new(raw);
        let config = serde_ignored::deserialize(de, |path| {
            tracing::warn!("Ignoring unknown config key: {path}");
        })?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_usable() {
        let config = Config::default();
        assert_eq!(config.listen_port, 8000);
        assert_eq!(config.upstream_base_url, "http://localhost:8101");
        assert_eq!(config.upstream_timeout_secs, 10);
        assert_eq!(config.cors_allow_origins, vec!["*".to_string()]);
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let config = Config::from_toml("upstream_base_url = \"http://backend:9000\"").unwrap();
        assert_eq!(config.upstream_base_url, "http://backend:9000");
        assert_eq!(config.listen_port, 8000);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = Config::from_toml("listen_port = 9000\nno_such_key = true").unwrap();
        assert_eq!(config.listen_port, 9000);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(Config::from_toml("listen_port = \"not a number\"").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config.listen_port, 8000);
    }

    #[test]
    fn load_reads_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "listen_host = \"127.0.0.1\"\nlisten_port = 8080").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.listen_host, "127.0.0.1");
        assert_eq!(config.listen_port, 8080);
    }
}
