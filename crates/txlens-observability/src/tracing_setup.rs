//! Tracing / logging initialisation helpers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log level per component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Global default level: "trace" | "debug" | "info" | "warn" | "error"
    #[serde(default = "default_level")]
    pub level: String,
    /// Override per component: crate name → level
    #[serde(default)]
    pub components: BTreeMap<String, String>,
    /// Emit JSON structured logs (true) or human-readable text (false)
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            components: BTreeMap::new(),
            json: false,
        }
    }
}

impl LogConfig {
    /// Build the filter directive string, e.g. `"info,txlens_explorer=debug"`.
    pub fn directives(&self) -> String {
        let mut directives = self.level.clone();
        for (component, level) in &self.components {
            directives.push_str(&format!(",{}={}", component.replace('-', "_"), level));
        }
        directives
    }

    /// Raise the global level to `debug` (the `--verbose` flag).
    pub fn verbose(mut self) -> Self {
        self.level = "debug".into();
        self
    }
}

/// Initialise tracing with the given log config.
///
/// `RUST_LOG`, when set, overrides the configured directives. Returns
/// `false` if a global subscriber was already installed.
pub fn init_tracing(config: &LogConfig) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.directives()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
    result.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_include_components_in_order() {
        let config = LogConfig {
            level: "warn".into(),
            components: BTreeMap::from([
                ("txlens-explorer".to_string(), "debug".to_string()),
                ("txlens-core".to_string(), "trace".to_string()),
            ]),
            json: false,
        };
        assert_eq!(
            config.directives(),
            "warn,txlens_core=trace,txlens_explorer=debug"
        );
    }

    #[test]
    fn verbose_raises_level() {
        assert_eq!(LogConfig::default().verbose().directives(), "debug");
    }

    #[test]
    fn deserializes_partial_yaml() {
        let config: LogConfig = serde_yaml::from_str("json: true").unwrap();
        assert_eq!(config.level, "info");
        assert!(config.json);
        assert!(config.components.is_empty());
    }

    #[test]
    fn second_init_is_rejected() {
        let config = LogConfig::default();
        init_tracing(&config);
        assert!(!init_tracing(&config));
    }
}
