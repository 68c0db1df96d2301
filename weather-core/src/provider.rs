use crate::{
    CityQuery, Config, Credential, FetchError, WeatherSnapshot, classify::classify,
    provider::openweather::OpenWeatherFetcher,
};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

pub mod openweather;

/// Result of a single upstream call, before classification.
#[derive(Debug, Clone, PartialEq)]
pub enum RawOutcome {
    /// 2xx response with a decoded JSON body.
    Success(Value),
    Failure(Failure),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure {
    Transport(TransportFailure),
    /// The call completed but the HTTP status was not a success.
    Http(u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    Connect(String),
    Timeout(String),
    Redirect(String),
    Other(String),
}

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key.
        let err = err.without_url();
        let detail = err.to_string();
        // Connect is checked first: a connect timeout counts as "no connection".
        if err.is_connect() {
            TransportFailure::Connect(detail)
        } else if err.is_timeout() {
            TransportFailure::Timeout(detail)
        } else if err.is_redirect() {
            TransportFailure::Redirect(detail)
        } else {
            TransportFailure::Other(detail)
        }
    }
}

#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    /// Issue exactly one request for `city`. Never retries.
    async fn fetch(&self, city: &CityQuery, credential: &Credential) -> RawOutcome;
}

/// Validate, fetch and classify in one step.
///
/// Empty input is rejected before the fetcher is touched.
pub async fn get_weather(
    fetcher: &dyn WeatherFetcher,
    city: &str,
    credential: &Credential,
) -> Result<WeatherSnapshot, FetchError> {
    let city = CityQuery::new(city)?;
    let outcome = fetcher.fetch(&city, credential).await;
    let result = classify(&outcome);

    if let Err(err) = &result {
        tracing::info!(city = %city, error = ?err, "weather lookup failed");
    }

    result
}

/// Build the fetcher described by the config, falling back to the public endpoint.
pub fn fetcher_from_config(config: &Config) -> OpenWeatherFetcher {
    match config.endpoint.as_deref() {
        Some(endpoint) => OpenWeatherFetcher::with_endpoint(endpoint),
        None => OpenWeatherFetcher::new(),
    }
}
