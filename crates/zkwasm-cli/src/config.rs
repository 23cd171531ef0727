//! Client configuration and TOML/YAML parsing.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Client configuration loaded from a TOML/YAML file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// zkWasm service endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Hex-encoded account private key. Only signing commands need it.
    #[serde(default)]
    pub private_key: Option<String>,
}

fn default_endpoint() -> String {
    "https://rpc.zkwasmhub.com:8090".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            private_key: None,
        }
    }
}

impl Config {
    /// Load config from file (auto-detects format from extension).
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let string = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {path:?}"))?;

        match path.extension().and_then(|s| s.to_str()) {
            Some("toml") => Self::from_toml_str(&string),
            Some("yaml" | "yml") => Self::from_yaml_str(&string),
            Some(ext) => anyhow::bail!("Unsupported config format: .{ext}"),
            None => anyhow::bail!("Config file must have an extension (e.g., .toml)"),
        }
    }

    /// Parse config from TOML string.
    pub fn from_toml_str(s: &str) -> anyhow::Result<Self> {
        toml_edit::de::from_str(s).context("Failed to deserialize TOML config")
    }

    /// Parse config from YAML string.
    pub fn from_yaml_str(s: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(s).context("Failed to deserialize YAML config")
    }

    /// Private key, or an error naming where it can be set.
    pub fn private_key(&self) -> anyhow::Result<&str> {
        self.private_key.as_deref().context(
            "No private key configured (use --private-key, ZKWASM_PRIVATE_KEY or `private_key` in the config file)",
        )
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use super::*;

    fn sample_config() -> Config {
        Config {
            endpoint: "https://rpc.zkwasmhub.com:8090".to_string(),
            private_key: Some(
                "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318".to_string(),
            ),
        }
    }

    #[test]
    fn test_from_toml_str() {
        let toml = r#"
            endpoint = "https://rpc.zkwasmhub.com:8090"
            private_key = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318"
        "#;
        assert_eq!(Config::from_toml_str(toml).unwrap(), sample_config());
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = r#"
            endpoint: https://rpc.zkwasmhub.com:8090
            private_key: "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318"
        "#;
        assert_eq!(Config::from_yaml_str(yaml).unwrap(), sample_config());
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.private_key().is_err());
    }

    #[test]
    fn test_load() {
        let dir = tempfile::tempdir().unwrap();

        let path = dir.path().join("config.toml");
        fs::write(&path, "endpoint = \"http://localhost:8090\"").unwrap();
        assert_eq!(Config::load(&path).unwrap().endpoint, "http://localhost:8090");

        let path = dir.path().join("config.json");
        fs::write(&path, "{}").unwrap();
        assert!(Config::load(&path).is_err());

        assert!(Config::load(dir.path().join("missing.toml")).is_err());
    }
}
