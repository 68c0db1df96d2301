use serde::Serialize;
use std::fmt;

use crate::error::FetchError;

/// A city name as typed by the user.
///
/// Only an empty string is rejected; whitespace is kept as-is and the
/// upstream API decides whether the name means anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityQuery(String);

impl CityQuery {
    pub fn new(text: impl Into<String>) -> Result<Self, FetchError> {
        let text = text.into();
        if text.is_empty() {
            return Err(FetchError::EmptyInput);
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CityQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// API key for the upstream service. `Debug` never prints the key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Display icon derived from an upstream condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Atmosphere,
    Clear,
    Clouds,
    Unknown,
}

impl Icon {
    /// Ranges are checked in order; the first match wins.
    pub fn for_code(code: i64) -> Self {
        match code {
            200..=232 => Icon::Thunderstorm,
            300..=321 => Icon::Drizzle,
            500..=531 => Icon::Rain,
            600..=622 => Icon::Snow,
            701..=781 => Icon::Atmosphere,
            800 => Icon::Clear,
            801..=804 => Icon::Clouds,
            _ => Icon::Unknown,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Icon::Thunderstorm => "🌩️",
            Icon::Drizzle => "🌦️",
            Icon::Rain => "🌧️",
            Icon::Snow => "❄️",
            Icon::Atmosphere => "🌫️",
            Icon::Clear => "☀️",
            Icon::Clouds => "☁️",
            Icon::Unknown => "🌈",
        }
    }
}

/// Normalized current conditions for one city.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSnapshot {
    pub temperature_celsius: f64,
    pub feels_like_celsius: f64,
    pub humidity_percent: i64,
    pub wind_speed_mps: f64,
    pub description: String,
    pub condition_code: i64,
    pub icon: Icon,
}
