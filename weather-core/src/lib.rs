//! Core library for the `weather-insights` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeatherMap client (ZIP geocoding and current conditions)
//! - Quote generation with a curated fallback
//! - Unit conversion and display tiers
//! - The presentation state driven by the interactive session
//!
//! It is used by `weather-insights`, but can also be reused by other binaries or services.

pub mod condition;
pub mod config;
pub mod error;
pub mod level;
pub mod model;
pub mod provider;
pub mod quote;
pub mod resolver;
pub mod select;
pub mod state;
pub mod units;

pub use condition::Condition;
pub use config::{Config, ProviderConfig};
pub use error::{ErrorKind, WeatherError};
pub use level::{DisplayTier, Measure};
pub use model::{GeocodedLocation, Observation, QuoteRequest, WeatherRecord};
pub use provider::{ProviderId, WeatherProvider};
pub use quote::{AiQuoteProvider, QuoteProvider, QuoteSettings};
pub use resolver::WeatherResolver;
pub use select::{FixedSelector, RandomSelector, SeededSelector, Selector};
pub use state::{Phase, PresentationState, WeatherView};
pub use units::TemperatureUnit;
