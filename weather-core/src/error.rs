use thiserror::Error;

/// Why a lookup failed. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("OpenWeatherMap API key is not configured. Run `weather-insights configure openweather` or set OPENWEATHER_API_KEY.")]
    Configuration,

    #[error("Invalid zipcode {postal_code}. Please check the zipcode and try again.")]
    NotFound { postal_code: String },

    #[error("Invalid API key. Please check your OpenWeatherMap API key configuration.")]
    Auth,

    #[error("API rate limit exceeded. Please try again later.")]
    RateLimit,

    #[error("{message}")]
    Network { message: String },
}

/// Fieldless mirror of [`WeatherError`] for branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    NotFound,
    Auth,
    RateLimit,
    Network,
}

impl WeatherError {
    pub fn network<S: Into<String>>(message: S) -> Self {
        WeatherError::Network {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::Configuration => ErrorKind::Configuration,
            WeatherError::NotFound { .. } => ErrorKind::NotFound,
            WeatherError::Auth => ErrorKind::Auth,
            WeatherError::RateLimit => ErrorKind::RateLimit,
            WeatherError::Network { .. } => ErrorKind::Network,
        }
    }
}
