use serde::{Deserialize, Serialize};
use std::fmt;

/// Display unit for temperatures.
///
/// Records always store Fahrenheit; this only decides how a value is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Fahrenheit,
    Celsius,
}

impl TemperatureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Fahrenheit => "F",
            TemperatureUnit::Celsius => "C",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TemperatureUnit::Fahrenheit => "Fahrenheit",
            TemperatureUnit::Celsius => "Celsius",
        }
    }

    /// The other unit.
    pub fn toggled(self) -> Self {
        match self {
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "°{}", self.symbol())
    }
}

/// Convert a temperature into `to`.
///
/// The input is taken to be in the *other* unit: Fahrenheit when converting to
/// Celsius and vice versa. Results are rounded to the nearest integer with
/// halves rounded away from zero (`f64::round`). A Fahrenheit -> Celsius ->
/// Fahrenheit round trip can drift by one degree.
pub fn convert(temp: i32, to: TemperatureUnit) -> i32 {
    let temp = f64::from(temp);
    let converted = match to {
        TemperatureUnit::Celsius => (temp - 32.0) * 5.0 / 9.0,
        TemperatureUnit::Fahrenheit => temp * 9.0 / 5.0 + 32.0,
    };
    round_to_i32(converted)
}

/// Present a canonical Fahrenheit value in `unit`.
pub fn display_temperature(fahrenheit: i32, unit: TemperatureUnit) -> i32 {
    match unit {
        TemperatureUnit::Fahrenheit => fahrenheit,
        TemperatureUnit::Celsius => convert(fahrenheit, TemperatureUnit::Celsius),
    }
}

/// Round half away from zero, saturating at the `i32` range.
pub(crate) fn round_to_i32(value: f64) -> i32 {
    // `as` saturates for out-of-range floats and maps NaN to 0.
    value.round() as i32
}
