use std::sync::Arc;

use crate::{
    WeatherError,
    condition::{self, Condition},
    model::{GeocodedLocation, Observation, QuoteRequest, WeatherRecord},
    provider::{self, WeatherProvider, openweather::OpenWeatherSettings},
    quote::{AiQuoteProvider, QuoteProvider, QuoteSettings},
    select::{RandomSelector, Selector},
    units::round_to_i32,
};

/// Turns a postal code into a [`WeatherRecord`].
///
/// Steps run strictly in order: geocode, current weather, quote. A failure in
/// either of the first two aborts the lookup; the quote step cannot fail.
#[derive(Debug)]
pub struct WeatherResolver {
    provider: Option<Box<dyn WeatherProvider>>,
    quotes: Box<dyn QuoteProvider>,
    selector: Arc<dyn Selector>,
}

impl WeatherResolver {
    /// `provider` is `None` when the weather service has no credential.
    pub fn new(
        provider: Option<Box<dyn WeatherProvider>>,
        quotes: Box<dyn QuoteProvider>,
        selector: Arc<dyn Selector>,
    ) -> Self {
        Self {
            provider,
            quotes,
            selector,
        }
    }

    /// Wire up the OpenWeather and OpenRouter clients from explicit settings.
    pub fn from_settings(
        weather: OpenWeatherSettings,
        quotes: QuoteSettings,
        selector: Arc<dyn Selector>,
    ) -> Result<Self, WeatherError> {
        let provider = provider::provider_from_settings(weather)?;
        let quotes = AiQuoteProvider::new(quotes, Arc::clone(&selector))?;
        Ok(Self::new(provider, Box::new(quotes), selector))
    }

    /// Same as [`WeatherResolver::from_settings`] with uniform random selection.
    pub fn with_random_selection(
        weather: OpenWeatherSettings,
        quotes: QuoteSettings,
    ) -> Result<Self, WeatherError> {
        Self::from_settings(weather, quotes, Arc::new(RandomSelector))
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn resolve(&self, postal_code: &str) -> Result<WeatherRecord, WeatherError> {
        let Some(provider) = self.provider.as_deref() else {
            return Err(WeatherError::Configuration);
        };
        let postal_code = postal_code.trim();

        tracing::debug!(postal_code, "Geocoding postal code");
        let location = provider.geocode_zip(postal_code).await?;

        tracing::debug!(
            lat = location.latitude,
            lon = location.longitude,
            "Fetching current weather"
        );
        let observation = provider.current(&location).await?;

        let quote = self
            .quotes
            .generate(&QuoteRequest {
                location: location.name.clone(),
                condition: observation.main.clone(),
                temperature_f: round_to_i32(observation.temperature_f),
                description: observation.description.clone(),
            })
            .await;

        let record = self.assemble(location, observation, quote);
        tracing::info!(
            location = %record.location,
            condition = %record.condition,
            temperature = record.temperature,
            "Resolved weather"
        );
        Ok(record)
    }

    fn assemble(
        &self,
        location: GeocodedLocation,
        observation: Observation,
        quote: String,
    ) -> WeatherRecord {
        let selector = self.selector.as_ref();
        let background = condition::background_for(&observation.main, selector);

        WeatherRecord {
            location: location.name,
            region: location.region,
            country: location.country,
            temperature: round_to_i32(observation.temperature_f),
            feels_like: round_to_i32(observation.feels_like_f),
            wind_speed: round_to_i32(observation.wind_speed_mph),
            humidity: observation.humidity_pct,
            pressure: observation.pressure_hpa,
            visibility: round_to_i32(observation.visibility_m / 1000.0),
            condition: Condition::from_main(&observation.main),
            description: condition::title_case(&observation.description),
            icon: observation.icon,
            background_image: background.to_string(),
            quote,
            observed_at: observation.observed_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ErrorKind,
        select::{FixedSelector, SeededSelector},
    };
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Default)]
    struct StubProvider {
        geocode_error: Option<WeatherError>,
        current_calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn geocode_zip(&self, postal_code: &str) -> Result<GeocodedLocation, WeatherError> {
            if let Some(err) = &self.geocode_error {
                return Err(err.clone());
            }
            Ok(GeocodedLocation {
                name: "New York".into(),
                latitude: 40.71,
                longitude: -74.01,
                country: "US".into(),
                region: None,
                postal_code: postal_code.into(),
            })
        }

        async fn current(&self, _location: &GeocodedLocation) -> Result<Observation, WeatherError> {
            self.current_calls.fetch_add(1, Ordering::SeqCst);
            Ok(Observation {
                temperature_f: 72.4,
                feels_like_f: 70.1,
                humidity_pct: 55,
                pressure_hpa: 1013,
                wind_speed_mph: 8.2,
                main: "Clear".into(),
                description: "clear sky".into(),
                icon: "01d".into(),
                visibility_m: 10000.0,
                observed_at: Utc::now(),
            })
        }
    }

    #[derive(Debug)]
    struct EchoQuotes;

    #[async_trait]
    impl QuoteProvider for EchoQuotes {
        async fn generate(&self, request: &QuoteRequest) -> String {
            format!(
                "{}|{}|{}|{}",
                request.location, request.condition, request.temperature_f, request.description
            )
        }
    }

    fn resolver(provider: Option<StubProvider>) -> WeatherResolver {
        seeded_resolver(provider, Arc::new(FixedSelector(0)))
    }

    fn seeded_resolver(
        provider: Option<StubProvider>,
        selector: Arc<dyn Selector>,
    ) -> WeatherResolver {
        WeatherResolver::new(
            provider.map(|p| Box::new(p) as Box<dyn WeatherProvider>),
            Box::new(EchoQuotes),
            selector,
        )
    }

    #[tokio::test]
    async fn assembles_rounded_record() {
        let record = resolver(Some(StubProvider::default()))
            .resolve("10001")
            .await
            .expect("resolves");

        assert_eq!(record.location, "New York");
        assert_eq!(record.temperature, 72);
        assert_eq!(record.feels_like, 70);
        assert_eq!(record.humidity, 55);
        assert_eq!(record.wind_speed, 8);
        assert_eq!(record.visibility, 10);
        assert_eq!(record.pressure, 1013);
        assert_eq!(record.description, "Clear Sky");
        assert_eq!(record.condition, Condition::Sunny);
        let pool = condition::background_pool("Clear");
        assert_eq!(record.background_image, pool[0]);
    }

    #[tokio::test]
    async fn quote_gets_raw_inputs() {
        let record = resolver(Some(StubProvider::default()))
            .resolve("10001")
            .await
            .expect("resolves");
        assert_eq!(record.quote, "New York|Clear|72|clear sky");
    }

    #[tokio::test]
    async fn missing_credential_is_configuration_error() {
        let err = resolver(None).resolve("10001").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[tokio::test]
    async fn geocode_failure_skips_weather_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let stub = StubProvider {
            geocode_error: Some(WeatherError::NotFound {
                postal_code: "00000".into(),
            }),
            current_calls: Arc::clone(&calls),
        };
        let err = resolver(Some(stub)).resolve("00000").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn successful_lookup_fetches_weather_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let stub = StubProvider {
            geocode_error: None,
            current_calls: Arc::clone(&calls),
        };
        resolver(Some(stub)).resolve(" 10001 ").await.expect("resolves");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn seeded_backgrounds_repeat_across_resolvers() {
        let mut picks = Vec::new();
        for _ in 0..2 {
            let selector: Arc<dyn Selector> = Arc::new(SeededSelector::new(11));
            let resolver = seeded_resolver(Some(StubProvider::default()), selector);
            let mut run = Vec::new();
            for _ in 0..5 {
                let record = resolver.resolve("10001").await.expect("resolves");
                run.push(record.background_image);
            }
            picks.push(run);
        }

        assert_eq!(picks[0], picks[1]);
        let pool = condition::background_pool("Clear");
        assert!(picks[0].iter().all(|url| pool.contains(&url.as_str())));
    }
}
