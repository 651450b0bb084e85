use chrono::Local;
use std::fmt::Write;
use weather_core::{Phase, PresentationState, WeatherRecord, WeatherView, state::Scale};

const RULE: &str = "────────────────────────────────────────────";

/// Text for the current state of the session.
pub fn render(state: &PresentationState) -> String {
    match state.phase() {
        Phase::Idle => welcome(),
        Phase::Resolving => "Fetching real-time weather data...\n".to_string(),
        Phase::Failed(message) => format!("! {message}\n"),
        Phase::Succeeded(record) => match state.view() {
            Some(view) => weather(record, &view),
            None => String::new(),
        },
    }
}

fn welcome() -> String {
    [
        "Welcome to Weather Insights",
        "Get real-time weather data for any US ZIP code, with an uplifting thought to go with it.",
        "Powered by OpenWeatherMap.",
        "",
    ]
    .join("\n")
}

fn weather(record: &WeatherRecord, view: &WeatherView) -> String {
    let mut out = String::new();
    let unit = view.unit;

    // Writing to a String cannot fail.
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "  \"{}\"", record.quote);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{}", record.location);
    let _ = writeln!(out, "{}", record.region_line());
    let _ = writeln!(out);
    let _ = writeln!(out, "  {}{unit}  {}", view.temperature, record.description);
    let _ = writeln!(out, "  Feels like  {}{}", view.feels_like, unit);
    let _ = writeln!(out, "  Pressure    {} hPa", record.pressure);
    let _ = writeln!(out, "  Visibility  {} km", record.visibility);
    let _ = writeln!(out);
    for scale in view.scales() {
        let _ = writeln!(out, "  {}", scale_line(&scale));
    }
    let observed = record.observed_at.with_timezone(&Local);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  Observed {} · background {}",
        observed.format("%Y-%m-%d %H:%M"),
        record.background_image
    );
    out
}

/// e.g. `Wind         8 mph   ○ ● ○ ○ ○  Light`
fn scale_line(scale: &Scale) -> String {
    let dots: Vec<&str> = (1..=5)
        .map(|tier| if tier == scale.tier.get() { "●" } else { "○" })
        .collect();
    format!(
        "{:<12}{:>4} {:<4} {}  {}",
        scale.measure.title(),
        scale.value,
        scale.unit_label,
        dots.join(" "),
        scale.label()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use weather_core::{Condition, TemperatureUnit, WeatherError};

    fn record() -> WeatherRecord {
        WeatherRecord {
            location: "Beverly Hills".into(),
            region: Some("California".into()),
            country: "US".into(),
            temperature: 75,
            feels_like: 74,
            wind_speed: 8,
            humidity: 30,
            pressure: 1015,
            visibility: 10,
            condition: Condition::Sunny,
            description: "Clear Sky".into(),
            icon: "01d".into(),
            background_image: "https://example.com/sun.jpg".into(),
            quote: "Shine on!".into(),
            observed_at: Utc::now(),
        }
    }

    fn loaded(unit: TemperatureUnit) -> PresentationState {
        let mut state = PresentationState::new();
        state.set_unit(unit);
        state.set_query("90210");
        state.begin_lookup();
        state.finish_lookup(Ok(record()));
        state
    }

    #[test]
    fn renders_record_in_fahrenheit() {
        let text = render(&loaded(TemperatureUnit::Fahrenheit));
        assert!(text.contains("\"Shine on!\""));
        assert!(text.contains("California, US"));
        assert!(text.contains("75°F  Clear Sky"));
        assert!(text.contains("Feels like  74°F"));
        assert!(text.contains("1015 hPa"));
        assert!(text.contains("10 km"));
        assert!(text.contains("Warm"));
        assert!(text.contains("Light"));
        assert!(text.contains("Low"));
    }

    #[test]
    fn renders_record_in_celsius() {
        let text = render(&loaded(TemperatureUnit::Celsius));
        assert!(text.contains("24°C  Clear Sky"));
        assert!(text.contains("Feels like  23°C"));
    }

    #[test]
    fn renders_error_and_idle() {
        let mut state = PresentationState::new();
        assert!(render(&state).contains("Welcome"));

        state.set_query("1");
        state.begin_lookup();
        assert!(render(&state).contains("Fetching"));

        state.finish_lookup(Err(WeatherError::Auth));
        assert!(render(&state).starts_with("! Invalid API key"));
    }

    #[test]
    fn scale_line_marks_active_tier() {
        let view = WeatherView::new(&record(), TemperatureUnit::Fahrenheit);
        let line = scale_line(&view.wind_scale);
        assert!(line.contains("○ ● ○ ○ ○"), "{line}");
        assert!(line.ends_with("Light"));
    }
}
