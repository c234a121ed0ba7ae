//! Configuration loading: one TOML file with a section per backend.
//!
//! API keys may come from the environment instead of the file (env wins),
//! so the file can be committed without secrets.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use importarr_lib::SyncError;

const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Top-level config file: `[radarr]` and/or `[sonarr]` sections.
#[derive(Debug, Default, Deserialize)]
pub struct ImportConfig {
    pub radarr: Option<BackendSettings>,
    pub sonarr: Option<BackendSettings>,
}

/// Connection and policy settings for one backend instance.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    /// e.g. "http://localhost:7878"
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    /// Local directory whose immediate subfolders are reconciled.
    pub source_dir: PathBuf,
    /// Library root path as the backend sees it.
    pub root_folder: String,
    #[serde(default = "default_profile_id")]
    pub quality_profile_id: u32,
    /// Sonarr v3 compatibility; v4 ignores it.
    #[serde(default = "default_profile_id")]
    pub language_profile_id: u32,
    /// Folders per batch. Backend-specific default when omitted.
    pub batch_size: Option<usize>,
    /// Seconds to pause between batches. Backend-specific default when omitted.
    pub batch_delay_secs: Option<u64>,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_profile_id() -> u32 {
    1
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl BackendSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl ImportConfig {
    /// Load from `path`, apply env overrides, and validate.
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SyncError::config(format!("Could not read {}: {e}", path.display())))?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn parse(contents: &str) -> Result<Self, SyncError> {
        toml::from_str(contents).map_err(|e| SyncError::config(format!("Invalid config: {e}")))
    }

    /// Env over file, the usual credential precedence.
    fn apply_env_overrides(&mut self) {
        if let (Some(radarr), Ok(key)) = (self.radarr.as_mut(), std::env::var("RADARR_API_KEY")) {
            radarr.api_key = key;
        }
        if let (Some(sonarr), Ok(key)) = (self.sonarr.as_mut(), std::env::var("SONARR_API_KEY")) {
            sonarr.api_key = key;
        }
    }

    fn validate(&self) -> Result<(), SyncError> {
        if self.radarr.is_none() && self.sonarr.is_none() {
            return Err(SyncError::config(
                "No [radarr] or [sonarr] section configured",
            ));
        }
        for (name, settings, env) in [
            ("radarr", &self.radarr, "RADARR_API_KEY"),
            ("sonarr", &self.sonarr, "SONARR_API_KEY"),
        ] {
            if let Some(s) = settings
                && s.api_key.is_empty()
            {
                return Err(SyncError::config(format!(
                    "Missing api_key for [{name}]. Add it to the config file or set {env}"
                )));
            }
        }
        Ok(())
    }
}

/// Default path to the config file: `~/.config/importarr/config.toml`.
pub fn config_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("importarr").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
        [radarr]
        base_url = "http://localhost:7878"
        api_key = "aaaa"
        source_dir = "/mnt/media/movies"
        root_folder = "/mnt/media/movies"
        quality_profile_id = 4
        batch_size = 50
        batch_delay_secs = 20
        request_timeout_secs = 5

        [sonarr]
        base_url = "http://localhost:8989/"
        api_key = "bbbb"
        source_dir = "/mnt/media/series"
        root_folder = "/mnt/media/series"
    "#;

    #[test]
    fn test_parse_full_config() {
        let config = ImportConfig::parse(FULL).unwrap();
        config.validate().unwrap();

        let radarr = config.radarr.unwrap();
        assert_eq!(radarr.base_url, "http://localhost:7878");
        assert_eq!(radarr.quality_profile_id, 4);
        assert_eq!(radarr.batch_size, Some(50));
        assert_eq!(radarr.batch_delay_secs, Some(20));
        assert_eq!(radarr.request_timeout(), Duration::from_secs(5));

        let sonarr = config.sonarr.unwrap();
        assert_eq!(sonarr.quality_profile_id, 1);
        assert_eq!(sonarr.language_profile_id, 1);
        assert_eq!(sonarr.batch_size, None);
        assert_eq!(sonarr.request_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_single_section_is_enough() {
        let config = ImportConfig::parse(
            r#"
            [sonarr]
            base_url = "http://localhost:8989"
            api_key = "bbbb"
            source_dir = "/srv/series"
            root_folder = "/srv/series"
        "#,
        )
        .unwrap();
        config.validate().unwrap();
        assert!(config.radarr.is_none());
    }

    #[test]
    fn test_no_sections_is_rejected() {
        let config = ImportConfig::parse("").unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("No [radarr] or [sonarr]"));
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        let config = ImportConfig::parse(
            r#"
            [radarr]
            base_url = "http://localhost:7878"
            source_dir = "/srv/movies"
            root_folder = "/srv/movies"
        "#,
        )
        .unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("RADARR_API_KEY"));
    }

    #[test]
    fn test_malformed_toml_is_a_config_error() {
        assert!(matches!(
            ImportConfig::parse("[radarr"),
            Err(SyncError::Config(_))
        ));
    }
}
