use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::claims::MAX_ISSUED_AT_TOLERANCE;
use crate::error::SettingsError;
use crate::key_fetcher::KEY_SERVER_URL;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ValidatorSettings {
    pub project: ProjectSettings,
    pub key_server: KeyServerSettings,
    pub claims: ClaimsSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProjectSettings {
    /// Firebase project id; expected audience and issuer suffix of every token
    pub project_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyServerSettings {
    pub url: String,
    /// Request timeout in seconds; 0 leaves requests unbounded
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ClaimsSettings {
    /// Seconds an `iat` claim may lie in the future to absorb clock skew
    pub issued_at_tolerance_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for KeyServerSettings {
    fn default() -> Self {
        Self {
            url: KEY_SERVER_URL.to_string(),
            timeout_seconds: 10,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ValidatorSettings {
    /// Load settings from configuration files and environment variables, then
    /// initialize logging
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A settings file cannot be read or parsed
    /// - The resulting settings are invalid
    /// - Logger initialization fails
    pub fn load() -> Result<Self, SettingsError> {
        let mut settings = Self::load_base_settings()?;
        Self::apply_env_overrides(&mut settings);
        settings.validate()?;
        settings.initialize_logging()?;
        Ok(settings)
    }

    /// Load base settings from TOML file(s) or use defaults
    /// Settings are loaded with the following priority (highest to lowest):
    /// 1. Environment variables (applied separately after loading base settings)
    /// 2. Settings.toml in `FIREBASE_VALIDATOR_CONFIG_DIR` (if specified and exists)
    /// 3. Settings.toml in current directory (if exists)
    /// 4. Default settings
    ///
    /// # Errors
    ///
    /// Returns an error if a settings file cannot be read or parsed
    fn load_base_settings() -> Result<Self, SettingsError> {
        let mut settings = Self::default();

        let default_config_path = Path::new("Settings.toml");
        if default_config_path.exists() {
            settings = Self::from_file(default_config_path)?;
            log::debug!("Loaded base settings from {}", default_config_path.display());
        }

        if let Ok(config_dir) = std::env::var("FIREBASE_VALIDATOR_CONFIG_DIR") {
            let config_path = Path::new(&config_dir).join("Settings.toml");
            if config_path.exists() {
                settings = Self::from_file(&config_path)?;
                log::debug!("Overriding settings from {}", config_path.display());
            }
        }

        Ok(settings)
    }

    /// Parse settings from a TOML file; missing sections take their defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for these settings
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let toml_content = fs::read_to_string(path)?;
        Ok(basic_toml::from_str(&toml_content)?)
    }

    /// Apply environment variable overrides to settings
    pub fn apply_env_overrides(settings: &mut Self) {
        if let Ok(project_id) = std::env::var("FIREBASE_PROJECT_ID") {
            settings.project.project_id = project_id;
        }
        if let Ok(url) = std::env::var("FIREBASE_KEY_SERVER_URL") {
            settings.key_server.url = url;
        }
        Self::apply_numeric_env_override(
            "FIREBASE_KEY_SERVER_TIMEOUT_SECONDS",
            &mut settings.key_server.timeout_seconds,
        );
        Self::apply_numeric_env_override(
            "FIREBASE_IAT_TOLERANCE_SECONDS",
            &mut settings.claims.issued_at_tolerance_seconds,
        );
        if let Ok(log_level) = std::env::var("RUST_LOG") {
            settings.logging.level = log_level;
        }
    }

    /// Helper function to apply numeric environment variable overrides
    fn apply_numeric_env_override(env_var: &str, target: &mut u64) {
        if let Ok(value_str) = std::env::var(env_var) {
            if let Ok(value) = value_str.parse::<u64>() {
                *target = value;
            }
        }
    }

    /// Check the settings are usable
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Invalid`] if no project id is configured, the key
    /// server URL is empty, or the issued-at tolerance exceeds its bound
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.project.project_id.trim().is_empty() {
            return Err(SettingsError::Invalid(
                "project id is required (project.project_id or FIREBASE_PROJECT_ID)".to_string(),
            ));
        }
        if self.key_server.url.trim().is_empty() {
            return Err(SettingsError::Invalid("key server URL is empty".to_string()));
        }
        if self.claims.issued_at_tolerance_seconds > MAX_ISSUED_AT_TOLERANCE {
            return Err(SettingsError::Invalid(format!(
                "issued-at tolerance of {}s exceeds the maximum of {MAX_ISSUED_AT_TOLERANCE}s",
                self.claims.issued_at_tolerance_seconds
            )));
        }
        Ok(())
    }

    /// Initialize `env_logger` at the configured level
    ///
    /// # Errors
    ///
    /// Returns an error if a logger has already been installed
    fn initialize_logging(&self) -> Result<(), SettingsError> {
        env_logger::Builder::new()
            .parse_filters(&self.logging.level)
            .try_init()?;
        Ok(())
    }
}
