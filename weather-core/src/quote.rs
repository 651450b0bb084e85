//! Short uplifting quotes about the current weather.
//!
//! Quotes come from an OpenAI-compatible chat completion endpoint when a key
//! is configured, and from a small curated table otherwise. Generation never
//! fails: any problem with the remote call degrades to the table.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, sync::Arc, time::Duration};

use crate::{
    WeatherError,
    config::is_real_key,
    model::QuoteRequest,
    select::{self, Selector},
};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "anthropic/claude-3-haiku";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const SYSTEM_PROMPT: &str = "You are a motivational weather assistant that creates uplifting, \
    concise quotes about weather conditions. Keep responses under 25 words and always positive.";
const MAX_TOKENS: u32 = 50;
const TEMPERATURE: f32 = 0.8;

#[async_trait]
pub trait QuoteProvider: Send + Sync + Debug {
    /// Always returns a non-empty quote.
    async fn generate(&self, request: &QuoteRequest) -> String;
}

/// Connection settings for the text-generation backend.
#[derive(Debug, Clone)]
pub struct QuoteSettings {
    /// `None`, blank or a placeholder means quotes come from the fallback
    /// table only.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl QuoteSettings {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

const CLEAR_QUOTES: [&str; 3] = [
    "Sunshine is nature's way of reminding us that every day holds endless possibilities!",
    "Let the golden rays of today illuminate your path to greatness!",
    "Clear skies ahead mean clear opportunities await you!",
];
const CLOUDS_QUOTES: [&str; 3] = [
    "Even on cloudy days, remember that the sun is always shining above the clouds!",
    "Gray skies are just clouds waiting to reveal the blue. Your breakthrough is coming!",
    "Cloudy weather reminds us that beauty comes in many forms - embrace today's unique charm!",
];
const RAIN_QUOTES: [&str; 3] = [
    "Rain washes the world clean and gives us a fresh start - what will you create today?",
    "Like raindrops nourishing the earth, let today's challenges help you grow stronger!",
    "Every raindrop is a reminder that growth comes from life's gentle storms!",
];
const SNOW_QUOTES: [&str; 3] = [
    "Like snowflakes, you are unique and beautiful - let your individuality shine today!",
    "Snow blankets the world in peace and possibility - what dreams will you pursue?",
    "Winter's beauty reminds us that even in quiet seasons, magic is happening!",
];
const THUNDERSTORM_QUOTES: [&str; 3] = [
    "Even the strongest storms pass, leaving behind clearer skies and renewed strength!",
    "Thunder reminds us that powerful things are happening - you're capable of greatness too!",
    "After every storm comes growth - embrace the power within you today!",
];
const MIST_QUOTES: [&str; 3] = [
    "Misty mornings hold mystery and magic - what wonderful surprises await you today?",
    "Like morning mist, uncertainty can be beautiful when you trust the journey ahead!",
    "Foggy weather reminds us that clarity comes to those who keep moving forward!",
];
const DEFAULT_QUOTES: [&str; 3] = [
    "Every day is a gift - unwrap it with enthusiasm and joy!",
    "Weather changes, but your potential remains constant - shine bright today!",
    "No matter the weather outside, you have the power to create sunshine within!",
];

/// Curated quotes for a raw main keyword ("Rain", "Clear", ...).
pub fn fallback_pool(condition: &str) -> &'static [&'static str; 3] {
    match condition.trim().to_lowercase().as_str() {
        "clear" => &CLEAR_QUOTES,
        "clouds" => &CLOUDS_QUOTES,
        "rain" => &RAIN_QUOTES,
        "snow" => &SNOW_QUOTES,
        "thunderstorm" => &THUNDERSTORM_QUOTES,
        "mist" => &MIST_QUOTES,
        _ => &DEFAULT_QUOTES,
    }
}

pub fn fallback_quote(condition: &str, selector: &dyn Selector) -> String {
    let pool = fallback_pool(condition);
    select::choose(selector, pool)
        .copied()
        .unwrap_or(pool[0])
        .to_string()
}

fn user_prompt(request: &QuoteRequest) -> String {
    format!(
        "Generate a short, uplifting, and inspirational quote (maximum 25 words) \
         about the weather in {location}. \
         Current conditions: {description} with {temperature}°F temperature. \
         The quote should be motivational, positive, and relate to the weather \
         condition \"{condition}\". \
         Make it personal and encouraging, as if speaking directly to someone \
         checking the weather. \
         Do not use quotation marks in the response.",
        location = request.location,
        description = request.description,
        temperature = request.temperature_f,
        condition = request.condition,
    )
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatReply>,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Quotes from an OpenRouter-style backend, falling back to the curated table.
#[derive(Debug, Clone)]
pub struct AiQuoteProvider {
    settings: QuoteSettings,
    http: Client,
    selector: Arc<dyn Selector>,
}

impl AiQuoteProvider {
    /// Placeholder or blank keys are dropped here, so such a provider never
    /// touches the network.
    pub fn new(
        mut settings: QuoteSettings,
        selector: Arc<dyn Selector>,
    ) -> Result<Self, WeatherError> {
        settings.api_key = settings
            .api_key
            .map(|key| key.trim().to_string())
            .filter(|key| is_real_key(key));

        let http = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| {
                tracing::warn!("Failed to build quote HTTP client: {e}");
                WeatherError::network("Failed to set up the quote service.")
            })?;

        Ok(Self {
            settings,
            http,
            selector,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.settings.api_key.is_some()
    }

    async fn request_quote(&self, api_key: &str, request: &QuoteRequest) -> anyhow::Result<String> {
        let prompt = user_prompt(request);
        let body = ChatRequest {
            model: &self.settings.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let res = self
            .http
            .post(format!("{}/chat/completions", self.settings.base_url))
            .bearer_auth(api_key)
            .header("HTTP-Referer", "https://github.com/weather-insights")
            .header("X-Title", "Weather Insights")
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let parsed: ChatResponse = res.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .map(|c| c.trim().to_string())
            .unwrap_or_default();

        Ok(content)
    }
}

#[async_trait]
impl QuoteProvider for AiQuoteProvider {
    async fn generate(&self, request: &QuoteRequest) -> String {
        let Some(api_key) = self.settings.api_key.as_deref() else {
            tracing::debug!("Quote backend not configured, using fallback quotes");
            return fallback_quote(&request.condition, self.selector.as_ref());
        };

        match self.request_quote(api_key, request).await {
            Ok(quote) if !quote.is_empty() => quote,
            Ok(_) => {
                tracing::warn!("Empty response from quote backend, using fallback");
                fallback_quote(&request.condition, self.selector.as_ref())
            }
            Err(e) => {
                tracing::warn!("Failed to generate AI quote: {e}");
                fallback_quote(&request.condition, self.selector.as_ref())
            }
        }
    }
}
