use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use weatherapp_core::{
    CityQuery, Config, FetchError, OpenWeatherFetcher, WeatherSnapshot, config::API_KEY_ENV,
    fetcher_from_config, get_weather, provider::openweather::DEFAULT_ENDPOINT,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherapp", version, about = "Current weather for a city")]
pub struct Cli {
    /// Print debug logs to stderr (RUST_LOG takes precedence).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key (and optionally a custom endpoint).
    Configure,

    /// Show current weather for a city.
    Show {
        /// City name, e.g. "London" or "New York".
        city: String,

        /// Print the snapshot as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Prompt for cities repeatedly until Esc or Ctrl-C.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => {
                configure()?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { city, json } => show(&city, json).await,
            Command::Interactive => {
                interactive().await?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(&api_key);

    let endpoint = Text::new("Endpoint (empty for default):")
        .with_placeholder(DEFAULT_ENDPOINT)
        .with_initial_value(config.endpoint.as_deref().unwrap_or(""))
        .prompt()
        .context("Failed to read endpoint")?;
    config.set_endpoint(&endpoint);

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show(city: &str, json: bool) -> anyhow::Result<ExitCode> {
    let config = Config::load()?;
    let fetcher = fetcher_from_config(&config);

    let result = lookup(&config, &fetcher, city, env_api_key()).await?;

    match (&result, json) {
        (Ok(snapshot), true) => println!("{}", serde_json::to_string_pretty(snapshot)?),
        (Err(err), true) => eprintln!("{err}"),
        (_, false) => println!("{}", render::render(&result)),
    }

    Ok(if result.is_ok() { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

async fn interactive() -> anyhow::Result<()> {
    let config = Config::load()?;
    let fetcher = fetcher_from_config(&config);

    loop {
        let city = match Text::new("City:").with_help_message("Esc to quit").prompt() {
            Ok(city) => city,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city"),
        };

        println!("{}\n", attempt(&config, &fetcher, &city, env_api_key()).await);
    }

    Ok(())
}

/// Text for one interactive attempt. A configuration problem is reported
/// like any failed lookup so the session keeps going.
async fn attempt(
    config: &Config,
    fetcher: &OpenWeatherFetcher,
    city: &str,
    env_key: Option<String>,
) -> String {
    match lookup(config, fetcher, city, env_key).await {
        Ok(result) => render::render(&result),
        Err(err) => format!("{err:#}"),
    }
}

fn env_api_key() -> Option<String> {
    std::env::var(API_KEY_ENV).ok()
}

/// One lookup. Empty input is reported before a credential is even needed;
/// the credential is resolved afresh for every request.
async fn lookup(
    config: &Config,
    fetcher: &OpenWeatherFetcher,
    city: &str,
    env_key: Option<String>,
) -> anyhow::Result<Result<WeatherSnapshot, FetchError>> {
    if let Err(err) = CityQuery::new(city) {
        return Ok(Err(err));
    }

    let credential = config.resolve_credential_with(env_key)?;
    Ok(get_weather(fetcher, city, &credential).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_show_with_json_flag() {
        let cli = Cli::try_parse_from(["weatherapp", "show", "New York", "--json"])
            .expect("parse");
        match cli.command {
            Command::Show { city, json } => {
                assert_eq!(city, "New York");
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["weatherapp", "interactive", "-v"])
            .expect("parse");
        assert!(cli.verbose);
    }

    #[test]
    fn show_requires_city() {
        assert!(Cli::try_parse_from(["weatherapp", "show"]).is_err());
    }

    #[tokio::test]
    async fn empty_city_needs_no_credential() {
        let config = Config::default();
        let fetcher = OpenWeatherFetcher::with_endpoint("http://127.0.0.1:9/weather");

        let result = lookup(&config, &fetcher, "", None)
            .await
            .expect("no config error");
        assert_eq!(result, Err(FetchError::EmptyInput));
    }

    #[tokio::test]
    async fn missing_key_is_reported_per_attempt() {
        let config = Config::default();
        let fetcher = OpenWeatherFetcher::with_endpoint("http://127.0.0.1:9/weather");

        let first = attempt(&config, &fetcher, "Paris", None).await;
        assert!(first.contains("No API key configured"), "got: {first}");

        // The next attempt still runs and gets its own message.
        let second = attempt(&config, &fetcher, "", None).await;
        assert_eq!(second, "Please enter a city name");
    }
}
