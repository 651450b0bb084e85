use crate::{
    WeatherError,
    model::{GeocodedLocation, Observation},
    provider::openweather::{OpenWeatherProvider, OpenWeatherSettings},
};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod openweather;

/// External services that take a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    /// Geocoding and current weather.
    OpenWeather,
    /// Text generation for quotes.
    OpenRouter,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "openweather",
            ProviderId::OpenRouter => "openrouter",
        }
    }

    /// Environment variable that overrides the stored key.
    pub fn env_var(&self) -> &'static str {
        match self {
            ProviderId::OpenWeather => "OPENWEATHER_API_KEY",
            ProviderId::OpenRouter => "OPENROUTER_API_KEY",
        }
    }

    pub const fn all() -> &'static [ProviderId] {
        &[ProviderId::OpenWeather, ProviderId::OpenRouter]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ProviderId {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "openweather" => Ok(ProviderId::OpenWeather),
            "openrouter" => Ok(ProviderId::OpenRouter),
            _ => Err(anyhow::anyhow!(
                "Unknown provider '{value}'. Supported providers: openweather, openrouter."
            )),
        }
    }
}

/// Source of geocoding and current observations.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Resolve a US ZIP code to a named location with coordinates.
    async fn geocode_zip(&self, postal_code: &str) -> Result<GeocodedLocation, WeatherError>;

    /// Current conditions at a location, in imperial units.
    async fn current(&self, location: &GeocodedLocation) -> Result<Observation, WeatherError>;
}

/// Build the weather provider, or `None` when no usable key is configured.
pub fn provider_from_settings(
    settings: OpenWeatherSettings,
) -> Result<Option<Box<dyn WeatherProvider>>, WeatherError> {
    if settings.usable_key().is_none() {
        return Ok(None);
    }
    let provider = OpenWeatherProvider::new(settings)?;
    Ok(Some(Box::new(provider)))
}
