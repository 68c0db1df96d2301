use async_trait::async_trait;
use reqwest::{Client, Request};
use serde_json::Value;

use crate::model::{CityQuery, Credential};

use super::{Failure, RawOutcome, TransportFailure, WeatherFetcher};

pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Current-weather fetcher for the OpenWeather API.
///
/// Uses the transport's default timeout and redirect policy.
#[derive(Debug, Clone)]
pub struct OpenWeatherFetcher {
    endpoint: String,
    http: Client,
}

impl OpenWeatherFetcher {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the GET request; the city is percent-encoded into `q`.
    pub fn request(&self, city: &CityQuery, credential: &Credential) -> reqwest::Result<Request> {
        self.http
            .get(&self.endpoint)
            .query(&[("q", city.as_str()), ("appid", credential.as_str())])
            .build()
    }
}

impl Default for OpenWeatherFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherFetcher for OpenWeatherFetcher {
    async fn fetch(&self, city: &CityQuery, credential: &Credential) -> RawOutcome {
        tracing::debug!(city = %city, endpoint = %self.endpoint, "requesting current weather");

        let res = match self.request(city, credential) {
            Ok(req) => self.http.execute(req).await,
            Err(err) => Err(err),
        };

        let res = match res {
            Ok(res) => res,
            Err(err) => return RawOutcome::Failure(Failure::Transport(err.into())),
        };

        let status = res.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "upstream returned an error status");
            return RawOutcome::Failure(Failure::Http(status.as_u16()));
        }

        let body = match res.text().await {
            Ok(body) => body,
            Err(err) => return RawOutcome::Failure(Failure::Transport(err.into())),
        };

        match serde_json::from_str::<Value>(&body) {
            Ok(payload) => RawOutcome::Success(payload),
            Err(err) => RawOutcome::Failure(Failure::Transport(TransportFailure::Other(format!(
                "Failed to parse OpenWeather JSON ({err}): {}",
                truncate_body(&body)
            )))),
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
