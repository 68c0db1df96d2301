//! Core library for the `weatherapp` CLI.
//!
//! This crate defines:
//! - Configuration & credential resolution
//! - The fetcher abstraction and its OpenWeather implementation
//! - Classification of raw outcomes into snapshots or errors
//! - Shared domain models (city query, snapshot, icons)
//!
//! A lookup is one call to [`get_weather`]: the city is validated, fetched once
//! and classified into a single `Result<WeatherSnapshot, FetchError>`.

pub mod classify;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use classify::classify;
pub use config::Config;
pub use error::{FetchError, OtherDetail};
pub use model::{CityQuery, Credential, Icon, WeatherSnapshot};
pub use provider::{
    Failure, RawOutcome, TransportFailure, WeatherFetcher, fetcher_from_config, get_weather,
    openweather::OpenWeatherFetcher,
};
