//! `txlens.yaml` loading.
//!
//! Precedence: CLI flags > environment > file > built-in defaults. CLI flags
//! are applied by the caller after [`AppConfig::load`].

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use txlens_core::ChainMap;
use txlens_explorer::ExplorerConfig;
use txlens_observability::LogConfig;

pub const DEFAULT_CONFIG_FILE: &str = "txlens.yaml";
pub const DEFAULT_OUTPUT: &str = "transaction_multichain.json";

pub const ENV_API_URL: &str = "TXLENS_API_URL";
pub const ENV_API_KEY: &str = "TXLENS_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub explorer: ExplorerConfig,
    /// Extra address → chain id entries, layered over the built-in map.
    #[serde(default)]
    pub chain_map: ChainMap,
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            explorer: ExplorerConfig::default(),
            chain_map: ChainMap::default(),
            output: default_output(),
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or from `txlens.yaml` in the working directory if it
    /// exists, then apply environment overrides.
    ///
    /// An explicitly given path must exist; the implicit default may not.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::from_file(default)?
                } else {
                    Self::default()
                }
            }
        };
        Ok(config.with_env(|key| std::env::var(key).ok()))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        // An empty file is a valid, all-defaults config.
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Apply `TXLENS_API_URL` / `TXLENS_API_KEY` from `lookup`.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.explorer.base_url = url;
        }
        if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.trim().is_empty()) {
            self.explorer.api_key = Some(key);
        }
        self
    }

    /// The built-in address book extended with `chain_map` entries.
    pub fn chains(&self) -> ChainMap {
        let mut chains = ChainMap::builtin();
        chains.extend(self.chain_map.clone());
        chains
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use txlens_explorer::client::DEFAULT_BASE_URL;

    #[test]
    fn empty_yaml_is_defaults() {
        let config = AppConfig::from_yaml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.output, PathBuf::from("transaction_multichain.json"));
        assert_eq!(config.explorer.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn file_values_and_chain_overrides() {
        let yaml = r#"
explorer:
  base_url: https://eth-sepolia.blockscout.com/api
  timeout_secs: 5
chain_map:
  "0xFAD8F1035ED8D097D354BB29C9E4714B5FC4566D": "137"
  "0x0000000000000000000000000000000000000001": "10"
output: out/report.json
log:
  level: debug
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.explorer.base_url, "https://eth-sepolia.blockscout.com/api");
        assert_eq!(config.explorer.timeout_secs, 5);
        assert_eq!(config.output, PathBuf::from("out/report.json"));
        assert_eq!(config.log.level, "debug");

        let chains = config.chains();
        assert_eq!(chains.len(), 5);
        assert_eq!(
            chains.resolve(Some("0xfad8f1035ed8d097d354bb29c9e4714b5fc4566d")),
            "137"
        );
        assert_eq!(
            chains.resolve(Some("0x1e31bebd0970b143279cb873c6005791f0802bdf")),
            "11155111"
        );
    }

    #[test]
    fn env_overrides_file() {
        let config = AppConfig::from_yaml("explorer:\n  base_url: http://file/api\n")
            .unwrap()
            .with_env(|key| match key {
                ENV_API_URL => Some("http://env/api".into()),
                ENV_API_KEY => Some("secret".into()),
                _ => None,
            });
        assert_eq!(config.explorer.base_url, "http://env/api");
        assert_eq!(config.explorer.api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn blank_env_is_ignored() {
        let config = AppConfig::default().with_env(|_| Some("  ".into()));
        assert_eq!(config.explorer.base_url, DEFAULT_BASE_URL);
        assert!(config.explorer.api_key.is_none());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/txlens.yaml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let path = std::env::temp_dir().join(format!("txlens-bad-{}.yaml", std::process::id()));
        std::fs::write(&path, "explorer: [not, a, map]").unwrap();
        let err = AppConfig::from_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
