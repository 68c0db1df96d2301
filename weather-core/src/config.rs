use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::model::Credential;

/// Environment variable that overrides the stored API key.
pub const API_KEY_ENV: &str = "API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// api_key = "..."
/// endpoint = "https://api.openweathermap.org/data/2.5/weather"
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// OpenWeather API key.
    pub api_key: Option<String>,

    /// Optional replacement for the public current-weather endpoint.
    pub endpoint: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "saved configuration");
        Ok(())
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid configuration TOML")
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherapp", "weatherapp")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Store the API key; blank input clears it.
    pub fn set_api_key(&mut self, api_key: &str) {
        let api_key = api_key.trim();
        self.api_key = (!api_key.is_empty()).then(|| api_key.to_string());
    }

    /// Store a custom endpoint; blank input restores the default.
    pub fn set_endpoint(&mut self, endpoint: &str) {
        let endpoint = endpoint.trim();
        self.endpoint = (!endpoint.is_empty()).then(|| endpoint.to_string());
    }

    /// Resolve the credential from the environment, then from this config.
    pub fn resolve_credential(&self) -> Result<Credential> {
        self.resolve_credential_with(std::env::var(API_KEY_ENV).ok())
    }

    /// Same as [`Config::resolve_credential`] with the environment value passed in.
    pub fn resolve_credential_with(&self, env_value: Option<String>) -> Result<Credential> {
        if let Some(key) = env_value.filter(|k| !k.trim().is_empty()) {
            tracing::debug!("using API key from ${API_KEY_ENV}");
            return Ok(Credential::new(key.trim()));
        }

        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(Credential::new)
            .ok_or_else(|| {
                anyhow!(
                    "No API key configured.\n\
                     Hint: run `weatherapp configure` or set the {API_KEY_ENV} environment variable."
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_errors_with_hint() {
        let cfg = Config::default();
        let err = cfg.resolve_credential_with(None).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No API key configured"));
        assert!(msg.contains("Hint: run `weatherapp configure`"));
    }

    #[test]
    fn stored_key_is_used() {
        let mut cfg = Config::default();
        cfg.set_api_key("STORED");

        let cred = cfg.resolve_credential_with(None).expect("key must resolve");
        assert_eq!(cred.as_str(), "STORED");
    }

    #[test]
    fn stored_key_is_trimmed() {
        let cfg = Config::from_toml(r#"api_key = "  KEY \t""#).expect("parse");

        let cred = cfg.resolve_credential_with(None).expect("key must resolve");
        assert_eq!(cred.as_str(), "KEY");
    }

    #[test]
    fn env_key_overrides_stored_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("STORED");

        let cred = cfg
            .resolve_credential_with(Some("FROM_ENV".into()))
            .expect("key must resolve");
        assert_eq!(cred.as_str(), "FROM_ENV");
    }

    #[test]
    fn blank_env_key_falls_back_to_config() {
        let mut cfg = Config::default();
        cfg.set_api_key("STORED");

        let cred = cfg
            .resolve_credential_with(Some("  ".into()))
            .expect("key must resolve");
        assert_eq!(cred.as_str(), "STORED");
    }

    #[test]
    fn blank_input_clears_settings() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY");
        cfg.set_endpoint("http://localhost:8080/weather");

        cfg.set_api_key("   ");
        cfg.set_endpoint("");

        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn toml_roundtrip() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY");
        cfg.set_endpoint("http://localhost:8080/weather");

        let text = toml::to_string_pretty(&cfg).expect("serialize");
        assert_eq!(Config::from_toml(&text).expect("parse"), cfg);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::from_toml("").expect("parse"), Config::default());
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(Config::from_toml("api_key = ").is_err());
    }
}
