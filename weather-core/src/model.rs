use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::condition::Condition;

/// Coordinates and naming for a postal code, as returned by geocoding.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedLocation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub country: String,
    pub region: Option<String>,
    pub postal_code: String,
}

/// Current conditions as reported by the provider, before any rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub temperature_f: f64,
    pub feels_like_f: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed_mph: f64,
    /// Main keyword, e.g. "Clear" or "Rain".
    pub main: String,
    /// Free-text description, e.g. "light rain".
    pub description: String,
    pub icon: String,
    pub visibility_m: f64,
    pub observed_at: DateTime<Utc>,
}

/// Inputs for a quote.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRequest {
    pub location: String,
    /// Raw main keyword, not the normalized [`Condition`].
    pub condition: String,
    pub temperature_f: i32,
    pub description: String,
}

/// A fully resolved lookup, ready for display.
///
/// Temperatures are always Fahrenheit; see [`crate::units`] for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub location: String,
    pub region: Option<String>,
    pub country: String,
    pub temperature: i32,
    pub feels_like: i32,
    pub wind_speed: i32,
    pub humidity: u8,
    pub pressure: u32,
    /// Kilometres.
    pub visibility: i32,
    pub condition: Condition,
    pub description: String,
    pub icon: String,
    pub background_image: String,
    pub quote: String,
    pub observed_at: DateTime<Utc>,
}

impl WeatherRecord {
    /// "Region, Country", or just the country when no region is known.
    pub fn region_line(&self) -> String {
        match self.region.as_deref().filter(|r| !r.is_empty()) {
            Some(region) => format!("{region}, {}", self.country),
            None => self.country.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(region: Option<&str>) -> WeatherRecord {
        WeatherRecord {
            location: "Beverly Hills".into(),
            region: region.map(str::to_owned),
            country: "US".into(),
            temperature: 75,
            feels_like: 74,
            wind_speed: 4,
            humidity: 30,
            pressure: 1015,
            visibility: 10,
            condition: Condition::Sunny,
            description: "Clear Sky".into(),
            icon: "01d".into(),
            background_image: "img".into(),
            quote: "q".into(),
            observed_at: Utc::now(),
        }
    }

    #[test]
    fn region_line_with_and_without_region() {
        assert_eq!(record(Some("California")).region_line(), "California, US");
        assert_eq!(record(None).region_line(), "US");
        assert_eq!(record(Some("")).region_line(), "US");
    }

    #[test]
    fn record_serializes_condition_in_kebab_case() {
        let mut r = record(None);
        r.condition = Condition::PartlyCloudy;
        let json = serde_json::to_value(&r).expect("serialize");
        assert_eq!(json["condition"], "partly-cloudy");
    }
}
