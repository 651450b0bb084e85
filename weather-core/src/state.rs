//! State behind the interactive session: the query being typed, the unit the
//! user picked, and where the current lookup stands.

use crate::{
    WeatherError,
    level::{self, DisplayTier, Measure},
    model::WeatherRecord,
    resolver::WeatherResolver,
    units::{self, TemperatureUnit},
};

/// Lifecycle of the most recent lookup.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Resolving,
    Succeeded(WeatherRecord),
    /// Carries the user-facing message.
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct PresentationState {
    query: String,
    unit: TemperatureUnit,
    phase: Phase,
}

impl PresentationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    pub fn set_unit(&mut self, unit: TemperatureUnit) {
        self.unit = unit;
    }

    /// Flip between Fahrenheit and Celsius. Never touches the network.
    pub fn toggle_unit(&mut self) -> TemperatureUnit {
        self.unit = self.unit.toggled();
        self.unit
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn record(&self) -> Option<&WeatherRecord> {
        match &self.phase {
            Phase::Succeeded(record) => Some(record),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Resolving)
    }

    /// A lookup can start when the query is non-blank and none is running.
    pub fn can_submit(&self) -> bool {
        !self.query.trim().is_empty() && !self.is_loading()
    }

    /// Enter `Resolving` and hand back the postal code to look up.
    pub fn begin_lookup(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        self.phase = Phase::Resolving;
        Some(self.query.trim().to_string())
    }

    /// Leave `Resolving` with the outcome of the lookup.
    pub fn finish_lookup(&mut self, outcome: Result<WeatherRecord, WeatherError>) {
        self.phase = match outcome {
            Ok(record) => Phase::Succeeded(record),
            Err(err) => {
                tracing::debug!(kind = ?err.kind(), "Lookup failed");
                Phase::Failed(err.to_string())
            }
        };
    }

    /// Run a full lookup for the current query. Returns `false` when nothing
    /// was submitted (blank query).
    ///
    /// Dropping the future before it completes puts the state back to
    /// [`Phase::Idle`], so a cancelled lookup never leaves it `Resolving`.
    pub async fn submit(&mut self, resolver: &WeatherResolver) -> bool {
        let Some(postal_code) = self.begin_lookup() else {
            return false;
        };
        let guard = LookupGuard { state: self };
        let outcome = resolver.resolve(&postal_code).await;
        guard.state.finish_lookup(outcome);
        true
    }

    /// Display values for the current record in the active unit.
    pub fn view(&self) -> Option<WeatherView> {
        let record = self.record()?;
        Some(WeatherView::new(record, self.unit))
    }
}

/// Resets a lookup that was abandoned mid-flight.
struct LookupGuard<'a> {
    state: &'a mut PresentationState,
}

impl Drop for LookupGuard<'_> {
    fn drop(&mut self) {
        if self.state.is_loading() {
            tracing::debug!("Lookup cancelled");
            self.state.phase = Phase::Idle;
        }
    }
}

/// One measurement with its tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    pub measure: Measure,
    pub value: i32,
    pub unit_label: &'static str,
    pub tier: DisplayTier,
}

impl Scale {
    pub fn label(&self) -> &'static str {
        self.measure.label(self.tier)
    }
}

/// Numbers as shown on screen; recomputed whenever the unit or record changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherView {
    pub unit: TemperatureUnit,
    pub temperature: i32,
    pub feels_like: i32,
    pub temperature_scale: Scale,
    pub wind_scale: Scale,
    pub humidity_scale: Scale,
}

impl WeatherView {
    pub fn new(record: &WeatherRecord, unit: TemperatureUnit) -> Self {
        let temperature = units::display_temperature(record.temperature, unit);
        let feels_like = units::display_temperature(record.feels_like, unit);
        let unit_label = match unit {
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Celsius => "°C",
        };

        Self {
            unit,
            temperature,
            feels_like,
            temperature_scale: Scale {
                measure: Measure::Temperature,
                value: temperature,
                unit_label,
                tier: level::temperature_tier_in(temperature, unit),
            },
            wind_scale: Scale {
                measure: Measure::Wind,
                value: record.wind_speed,
                unit_label: "mph",
                tier: level::wind_tier(f64::from(record.wind_speed)),
            },
            humidity_scale: Scale {
                measure: Measure::Humidity,
                value: i32::from(record.humidity),
                unit_label: "%",
                tier: level::humidity_tier(f64::from(record.humidity)),
            },
        }
    }

    pub fn scales(&self) -> [Scale; 3] {
        [self.temperature_scale, self.wind_scale, self.humidity_scale]
    }
}
