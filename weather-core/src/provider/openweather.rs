use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::{
    WeatherError,
    config::is_real_key,
    model::{GeocodedLocation, Observation},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const LOCATION_FAILED: &str =
    "Failed to fetch location data. Please check your internet connection and try again.";
const WEATHER_FAILED: &str =
    "Failed to fetch weather data. Please check your internet connection and try again.";

/// Connection settings for OpenWeatherMap.
#[derive(Debug, Clone)]
pub struct OpenWeatherSettings {
    /// `None`, blank or a placeholder means the service is not configured.
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl OpenWeatherSettings {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// The key, unless it is missing, blank or a placeholder.
    pub fn usable_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| is_real_key(key))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(settings: OpenWeatherSettings) -> Result<Self, WeatherError> {
        let api_key = settings
            .usable_key()
            .map(str::to_owned)
            .ok_or(WeatherError::Configuration)?;
        let http = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| {
                tracing::warn!("Failed to build HTTP client: {e}");
                WeatherError::network(WEATHER_FAILED)
            })?;

        Ok(Self {
            api_key,
            base_url: settings.base_url,
            http,
        })
    }

    async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
        fallback: &'static str,
    ) -> Result<(StatusCode, String), WeatherError> {
        let url = format!("{}{}", self.base_url, path);

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                tracing::debug!("Request to {path} failed: {e}");
                WeatherError::network(fallback)
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            tracing::debug!("Failed to read body from {path}: {e}");
            WeatherError::network(fallback)
        })?;

        if !status.is_success() {
            tracing::debug!("{path} returned {status}: {}", truncate_body(&body));
        }

        Ok((status, body))
    }
}

/// Map a non-success status onto the error taxonomy.
fn status_error(status: StatusCode, postal_code: &str, fallback: &'static str) -> WeatherError {
    match status {
        StatusCode::NOT_FOUND => WeatherError::NotFound {
            postal_code: postal_code.to_string(),
        },
        StatusCode::UNAUTHORIZED => WeatherError::Auth,
        StatusCode::TOO_MANY_REQUESTS => WeatherError::RateLimit,
        _ => WeatherError::network(fallback),
    }
}

#[derive(Debug, Deserialize)]
struct OwGeocodeResponse {
    name: String,
    lat: f64,
    lon: f64,
    country: String,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    zip: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    #[serde(default)]
    dt: Option<i64>,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    visibility: f64,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn geocode_zip(&self, postal_code: &str) -> Result<GeocodedLocation, WeatherError> {
        let zip = format!("{postal_code},US");
        let (status, body) = self
            .get("/geo/1.0/zip", &[("zip", zip.as_str())], LOCATION_FAILED)
            .await?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            // The location step has no rate-limit kind of its own.
            return Err(WeatherError::network(LOCATION_FAILED));
        }
        if !status.is_success() {
            return Err(status_error(status, postal_code, LOCATION_FAILED));
        }

        let parsed: OwGeocodeResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::debug!("Failed to parse geocoding JSON: {e}");
            WeatherError::network(LOCATION_FAILED)
        })?;

        Ok(GeocodedLocation {
            name: parsed.name,
            latitude: parsed.lat,
            longitude: parsed.lon,
            country: parsed.country,
            region: parsed.state.filter(|s| !s.is_empty()),
            postal_code: parsed.zip.unwrap_or_else(|| postal_code.to_string()),
        })
    }

    async fn current(&self, location: &GeocodedLocation) -> Result<Observation, WeatherError> {
        let lat = location.latitude.to_string();
        let lon = location.longitude.to_string();
        let (status, body) = self
            .get(
                "/data/2.5/weather",
                &[
                    ("lat", lat.as_str()),
                    ("lon", lon.as_str()),
                    ("units", "imperial"),
                ],
                WEATHER_FAILED,
            )
            .await?;

        if !status.is_success() {
            return Err(status_error(status, &location.postal_code, WEATHER_FAILED));
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::debug!("Failed to parse current weather JSON: {e}");
            WeatherError::network(WEATHER_FAILED)
        })?;

        let weather = parsed.weather.into_iter().next().ok_or_else(|| {
            tracing::debug!("Current weather response contained no conditions");
            WeatherError::network(WEATHER_FAILED)
        })?;

        let observed_at = parsed
            .dt
            .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0))
            .unwrap_or_else(Utc::now);

        Ok(Observation {
            temperature_f: parsed.main.temp,
            feels_like_f: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            pressure_hpa: parsed.main.pressure.round().max(0.0) as u32,
            wind_speed_mph: parsed.wind.speed,
            main: weather.main,
            description: weather.description,
            icon: weather.icon,
            visibility_m: parsed.visibility,
            observed_at,
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            status_error(StatusCode::NOT_FOUND, "99999", WEATHER_FAILED),
            WeatherError::NotFound {
                postal_code: "99999".into()
            }
        );
        assert_eq!(
            status_error(StatusCode::UNAUTHORIZED, "1", WEATHER_FAILED),
            WeatherError::Auth
        );
        assert_eq!(
            status_error(StatusCode::TOO_MANY_REQUESTS, "1", WEATHER_FAILED),
            WeatherError::RateLimit
        );
        assert_eq!(
            status_error(StatusCode::BAD_GATEWAY, "1", WEATHER_FAILED),
            WeatherError::network(WEATHER_FAILED)
        );
    }

    #[test]
    fn provider_requires_key() {
        let err = OpenWeatherProvider::new(OpenWeatherSettings::new(None)).unwrap_err();
        assert_eq!(err, WeatherError::Configuration);
    }

    #[test]
    fn placeholder_keys_are_not_usable() {
        for key in ["your_api_key_here", "your_openrouter_api_key_here", " ", ""] {
            let settings = OpenWeatherSettings::new(Some(key.to_string()));
            assert_eq!(settings.usable_key(), None, "{key:?}");
            let err = OpenWeatherProvider::new(settings).unwrap_err();
            assert_eq!(err, WeatherError::Configuration);
        }

        let settings = OpenWeatherSettings::new(Some(" KEY ".to_string()));
        assert_eq!(settings.usable_key(), Some("KEY"));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let body = "é".repeat(300);
        let out = truncate_body(&body);
        assert_eq!(out.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
