use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::PathBuf};

use crate::provider::GeocoderId;

/// Configuration for a single provider (e.g., API key).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Optional default geocoder id, e.g. "geoapify" or "nominatim".
    pub default_geocoder: Option<String>,

    /// Example TOML:
    /// [providers.geoapify]
    /// api_key = "..."
    pub providers: HashMap<String, ProviderConfig>,
}

impl Config {
    /// Return the default geocoder as a strongly-typed GeocoderId.
    ///
    /// Falls back to Nominatim when unset, since it needs no API key.
    pub fn default_geocoder_id(&self) -> Result<GeocoderId> {
        match self.default_geocoder.as_ref() {
            Some(s) => GeocoderId::try_from(s.as_str()),
            None => Ok(GeocoderId::Nominatim),
        }
    }

    pub fn has_provider(&self, id: GeocoderId) -> bool {
        self.providers.contains_key(id.as_str())
    }

    pub fn provider_config(&self, id: GeocoderId) -> Option<&ProviderConfig> {
        self.providers.get(id.as_str())
    }

    /// Store default geocoder as string.
    pub fn set_default_geocoder(&mut self, id: GeocoderId) {
        self.default_geocoder = Some(id.as_str().to_string());
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
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

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "foodfinder", "foodfinder-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Convenience helper: set/replace a provider API key and optionally set
    /// it as the default geocoder.
    pub fn upsert_provider_api_key(&mut self, provider_id: GeocoderId, api_key: String) {
        self.providers.insert(provider_id.as_str().to_string(), ProviderConfig { api_key });

        if self.default_geocoder.is_none() {
            self.default_geocoder = Some(provider_id.to_string());
        }
    }

    /// Returns API key for a provider, if present.
    pub fn provider_api_key(&self, provider_id: GeocoderId) -> Option<&str> {
        self.providers.get(provider_id.as_str()).map(|cfg| cfg.api_key.as_str())
    }

    pub fn is_provider_configured(&self, provider_id: GeocoderId) -> bool {
        self.provider_api_key(provider_id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::GeocoderId;

    #[test]
    fn default_geocoder_is_nominatim_when_not_set() {
        let cfg = Config::default();
        let id = cfg.default_geocoder_id().expect("fallback must resolve");

        assert_eq!(id, GeocoderId::Nominatim);
    }

    #[test]
    fn unknown_default_geocoder_errors() {
        let cfg = Config {
            default_geocoder: Some("doesnotexist".to_string()),
            ..Config::default()
        };
        let err = cfg.default_geocoder_id().unwrap_err();

        assert!(err.to_string().contains("Unknown geocoder"));
    }

    #[test]
    fn set_api_key_and_default_for_provider() {
        let mut cfg = Config::default();

        cfg.upsert_provider_api_key(GeocoderId::Geoapify, "GEO_KEY".into());

        let default = cfg.default_geocoder_id().expect("default geocoder must exist");
        assert_eq!(default, GeocoderId::Geoapify);

        let key = cfg.provider_api_key(GeocoderId::Geoapify);
        assert_eq!(key, Some("GEO_KEY"));
        assert!(cfg.is_provider_configured(GeocoderId::Geoapify));
    }

    #[test]
    fn upsert_does_not_override_existing_default() {
        let mut cfg = Config::default();
        cfg.set_default_geocoder(GeocoderId::Nominatim);

        cfg.upsert_provider_api_key(GeocoderId::Geoapify, "GEO_KEY".into());

        let default = cfg.default_geocoder_id().expect("default geocoder must exist");

        assert_eq!(default, GeocoderId::Nominatim);
        assert!(cfg.is_provider_configured(GeocoderId::Geoapify));
    }

    #[test]
    fn set_default_geocoder_overrides_default() {
        let mut cfg = Config::default();

        cfg.upsert_provider_api_key(GeocoderId::Geoapify, "GEO_KEY".into());

        let default = cfg.default_geocoder_id().expect("default geocoder must exist");
        assert_eq!(default, GeocoderId::Geoapify);

        cfg.set_default_geocoder(GeocoderId::Nominatim);

        let default = cfg.default_geocoder_id().expect("default geocoder must exist");
        assert_eq!(default, GeocoderId::Nominatim);
    }
}
