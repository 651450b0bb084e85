//! Five-step display tiers for temperature, wind and humidity.
//!
//! Each threshold belongs to the lower tier: 32°F is still "Freezing".

use crate::units::{self, TemperatureUnit};
use std::fmt;

/// An ordinal bucket in `1..=5`, 1 being the lowest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DisplayTier(u8);

impl DisplayTier {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based position, handy for indexing label tables.
    pub fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    fn from_thresholds(value: f64, thresholds: [f64; 4]) -> Self {
        let below = thresholds.iter().take_while(|&&t| value > t).count();
        // `below` is in 0..=4.
        DisplayTier(below as u8 + 1)
    }
}

impl fmt::Display for DisplayTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

const TEMPERATURE_F: [f64; 4] = [32.0, 50.0, 70.0, 85.0];
const WIND_MPH: [f64; 4] = [5.0, 10.0, 15.0, 20.0];
const HUMIDITY_PCT: [f64; 4] = [20.0, 40.0, 60.0, 80.0];

/// Tier of a Fahrenheit temperature.
pub fn temperature_tier(fahrenheit: f64) -> DisplayTier {
    DisplayTier::from_thresholds(fahrenheit, TEMPERATURE_F)
}

/// Tier of a temperature given in `unit`; Celsius values are converted to
/// Fahrenheit first.
pub fn temperature_tier_in(value: i32, unit: TemperatureUnit) -> DisplayTier {
    let fahrenheit = match unit {
        TemperatureUnit::Fahrenheit => value,
        TemperatureUnit::Celsius => units::convert(value, TemperatureUnit::Fahrenheit),
    };
    temperature_tier(f64::from(fahrenheit))
}

/// Tier of a wind speed in mph.
pub fn wind_tier(mph: f64) -> DisplayTier {
    DisplayTier::from_thresholds(mph, WIND_MPH)
}

/// Tier of a relative humidity percentage.
pub fn humidity_tier(percent: f64) -> DisplayTier {
    DisplayTier::from_thresholds(percent, HUMIDITY_PCT)
}

/// Which measurement a tier describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measure {
    Temperature,
    Wind,
    Humidity,
}

impl Measure {
    pub fn title(&self) -> &'static str {
        match self {
            Measure::Temperature => "Temperature",
            Measure::Wind => "Wind",
            Measure::Humidity => "Humidity",
        }
    }

    /// Labels for tiers 1 through 5.
    pub fn labels(&self) -> [&'static str; 5] {
        match self {
            Measure::Temperature => ["Freezing", "Cold", "Mild", "Warm", "Hot"],
            Measure::Wind => ["Calm", "Light", "Moderate", "Strong", "Very Strong"],
            Measure::Humidity => ["Dry", "Low", "Moderate", "High", "Very High"],
        }
    }

    pub fn label(&self, tier: DisplayTier) -> &'static str {
        self.labels()[tier.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiers(f: fn(f64) -> DisplayTier, values: &[f64]) -> Vec<u8> {
        values.iter().map(|&v| f(v).get()).collect()
    }

    #[test]
    fn temperature_boundaries_belong_to_lower_tier() {
        let xs = [32.0, 33.0, 50.0, 51.0, 70.0, 71.0, 85.0, 86.0];
        assert_eq!(tiers(temperature_tier, &xs), vec![1, 2, 2, 3, 3, 4, 4, 5]);
        assert_eq!(temperature_tier(-40.0).get(), 1);
        assert_eq!(temperature_tier(120.0).get(), 5);
    }

    #[test]
    fn wind_boundaries() {
        assert_eq!(
            tiers(wind_tier, &[0.0, 5.0, 6.0, 10.0, 15.0, 16.0, 20.0, 21.0]),
            vec![1, 1, 2, 2, 3, 4, 4, 5]
        );
    }

    #[test]
    fn humidity_boundaries() {
        let xs = [20.0, 21.0, 40.0, 60.0, 61.0, 80.0, 81.0, 100.0];
        assert_eq!(tiers(humidity_tier, &xs), vec![1, 2, 2, 3, 4, 4, 5, 5]);
    }

    #[test]
    fn celsius_input_is_classified_as_fahrenheit() {
        // 0°C -> 32°F -> Freezing, 1°C -> 34°F -> Cold
        assert_eq!(temperature_tier_in(0, TemperatureUnit::Celsius).get(), 1);
        assert_eq!(temperature_tier_in(1, TemperatureUnit::Celsius).get(), 2);
        assert_eq!(temperature_tier_in(30, TemperatureUnit::Celsius).get(), 5);
        assert_eq!(
            temperature_tier_in(72, TemperatureUnit::Fahrenheit).get(),
            4
        );
    }

    #[test]
    fn labels_follow_tiers() {
        assert_eq!(
            Measure::Temperature.label(temperature_tier(20.0)),
            "Freezing"
        );
        assert_eq!(Measure::Wind.label(wind_tier(30.0)), "Very Strong");
        assert_eq!(Measure::Humidity.label(humidity_tier(55.0)), "Moderate");
    }
}
