use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use weather_core::{Config, PresentationState, ProviderId, TemperatureUnit, WeatherResolver};

use crate::{render, session};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather-insights",
    version,
    about = "Weather by ZIP code, with a little inspiration"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure credentials for a specific provider.
    Configure {
        /// Provider short name: "openweather" or "openrouter".
        provider: String,
    },

    /// Show the weather for a US ZIP code once.
    Show {
        /// Five-digit US ZIP code.
        zip: String,

        /// Show temperatures in Celsius.
        #[arg(long)]
        celsius: bool,
    },

    /// Look up ZIP codes interactively (the default).
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure { provider } => configure(&provider),
            Command::Show { zip, celsius } => {
                let resolver = build_resolver()?;
                let mut state = PresentationState::new();
                if celsius {
                    state.set_unit(TemperatureUnit::Celsius);
                }
                state.set_query(zip);
                if !state.submit(&resolver).await {
                    anyhow::bail!("Please enter a ZIP code.");
                }
                if let Some(message) = state.error() {
                    anyhow::bail!("{message}");
                }
                print!("{}", render::render(&state));
                Ok(())
            }
            Command::Interactive => {
                let resolver = build_resolver()?;
                session::run(&resolver).await
            }
        }
    }
}

fn build_resolver() -> anyhow::Result<WeatherResolver> {
    let config = Config::load()?.with_env_overrides();

    if !config.is_provider_configured(ProviderId::OpenWeather) {
        tracing::warn!("OpenWeatherMap API key not configured; lookups will fail");
    }
    if !config.is_provider_configured(ProviderId::OpenRouter) {
        tracing::warn!("OpenRouter API key not configured. Using fallback quotes.");
    }

    WeatherResolver::with_random_selection(
        config.openweather_settings(),
        config.quote_settings(),
    )
    .context("Failed to set up weather client")
}

fn configure(provider: &str) -> anyhow::Result<()> {
    let id = ProviderId::try_from(provider)?;
    let mut config = Config::load()?;

    let api_key = Password::new(&format!("API key for {id}:"))
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    if !weather_core::config::is_real_key(&api_key) {
        anyhow::bail!("That does not look like a real API key; nothing was saved.");
    }

    config.upsert_provider_api_key(id, api_key.trim().to_string());
    config.save()?;

    println!(
        "Saved {id} credentials to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["weather-insights"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn show_accepts_celsius_flag() {
        let cli = Cli::try_parse_from(["weather-insights", "show", "90210", "--celsius"])
            .expect("parses");
        match cli.command {
            Some(Command::Show { zip, celsius }) => {
                assert_eq!(zip, "90210");
                assert!(celsius);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn configure_takes_provider() {
        let cli = Cli::try_parse_from(["weather-insights", "configure", "openrouter"])
            .expect("parses");
        let Some(Command::Configure { provider }) = cli.command else {
            panic!("expected configure");
        };
        assert_eq!(provider, "openrouter");
    }
}
