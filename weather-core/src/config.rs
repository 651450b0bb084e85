use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::PathBuf};

use crate::{
    provider::{ProviderId, openweather::OpenWeatherSettings},
    quote::QuoteSettings,
};

/// Values shipped in sample `.env` files; treated as "no key".
const PLACEHOLDER_KEYS: &[&str] = &["your_api_key_here", "your_openrouter_api_key_here"];

/// Configuration for a single provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,

    /// Override for the provider's base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Model id; only meaningful for text generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Example TOML:
    /// [providers.openweather]
    /// api_key = "..."
    ///
    /// [providers.openrouter]
    /// api_key = "..."
    /// model = "anthropic/claude-3-haiku"
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

/// Whether a credential is usable: non-blank and not a placeholder.
pub fn is_real_key(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && !PLACEHOLDER_KEYS.contains(&key)
}

impl Config {
    pub fn provider_config(&self, id: ProviderId) -> Option<&ProviderConfig> {
        self.providers.get(id.as_str())
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
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
        let dirs = ProjectDirs::from("dev", "weather-insights", "weather-insights")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Set or replace a provider API key, keeping any other settings.
    pub fn upsert_provider_api_key(&mut self, provider_id: ProviderId, api_key: String) {
        let entry = self.providers.entry(provider_id.as_str().to_string());
        entry.or_default().api_key = api_key;
    }

    /// Overlay keys from the process environment (`OPENWEATHER_API_KEY`,
    /// `OPENROUTER_API_KEY`). Environment values win over the file.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Same as [`Config::with_env_overrides`] with an explicit lookup.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        for id in ProviderId::all() {
            if let Some(key) = lookup(id.env_var()).filter(|k| !k.trim().is_empty()) {
                self.upsert_provider_api_key(*id, key);
            }
        }
        self
    }

    /// Returns a usable API key for a provider; placeholders count as missing.
    pub fn provider_api_key(&self, provider_id: ProviderId) -> Option<&str> {
        self.provider_config(provider_id)
            .map(|cfg| cfg.api_key.trim())
            .filter(|key| is_real_key(key))
    }

    pub fn is_provider_configured(&self, provider_id: ProviderId) -> bool {
        self.provider_api_key(provider_id).is_some()
    }

    /// Settings for the weather and geocoding client.
    pub fn openweather_settings(&self) -> OpenWeatherSettings {
        let api_key = self.provider_api_key(ProviderId::OpenWeather);
        let mut settings = OpenWeatherSettings::new(api_key.map(str::to_owned));
        if let Some(url) = self.base_url(ProviderId::OpenWeather) {
            settings.base_url = url;
        }
        settings
    }

    /// Settings for quote generation.
    pub fn quote_settings(&self) -> QuoteSettings {
        let api_key = self.provider_api_key(ProviderId::OpenRouter);
        let mut settings = QuoteSettings::new(api_key.map(str::to_owned));
        if let Some(url) = self.base_url(ProviderId::OpenRouter) {
            settings.base_url = url;
        }
        if let Some(model) = self
            .provider_config(ProviderId::OpenRouter)
            .and_then(|cfg| cfg.model.clone())
        {
            settings.model = model;
        }
        settings
    }

    fn base_url(&self, id: ProviderId) -> Option<String> {
        self.provider_config(id)
            .and_then(|cfg| cfg.base_url.as_deref())
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
    }
}
