//! Turns a [`RawOutcome`] into either a [`WeatherSnapshot`] or a [`FetchError`].
//!
//! Everything here is pure: the same outcome always classifies the same way.

use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{FetchError, OtherDetail},
    model::{Icon, WeatherSnapshot},
    provider::{Failure, RawOutcome, TransportFailure},
};

const KELVIN_OFFSET: f64 = 273.15;

/// Application-level success value of the payload's `cod` field.
const COD_OK: i64 = 200;

pub fn classify(outcome: &RawOutcome) -> Result<WeatherSnapshot, FetchError> {
    match outcome {
        RawOutcome::Success(payload) => normalize(payload),
        RawOutcome::Failure(Failure::Http(status)) => Err(status_error(*status)),
        RawOutcome::Failure(Failure::Transport(failure)) => Err(transport_error(failure)),
    }
}

/// HTTP error status to error kind. Codes are disjoint, so order is irrelevant.
pub fn status_error(status: u16) -> FetchError {
    match status {
        400 => FetchError::BadRequest,
        401 => FetchError::InvalidCredential,
        403 => FetchError::AccessDenied,
        404 => FetchError::NotFound,
        500 => FetchError::ServerError,
        502 => FetchError::BadGateway,
        503 => FetchError::ServiceUnavailable,
        504 => FetchError::UpstreamTimeout,
        other => FetchError::Other(OtherDetail::Status(other)),
    }
}

pub fn transport_error(failure: &TransportFailure) -> FetchError {
    match failure {
        TransportFailure::Connect(_) => FetchError::NoConnection,
        TransportFailure::Timeout(_) => FetchError::Timeout,
        TransportFailure::Redirect(_) => FetchError::TooManyRedirects,
        TransportFailure::Other(detail) => FetchError::Other(OtherDetail::Transport(detail.clone())),
    }
}

pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    kelvin - KELVIN_OFFSET
}

/// First character upper-cased, the rest lower-cased.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: i64,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: i64,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrent {
    main: OwMain,
    wind: OwWind,
    weather: Vec<OwWeather>,
}

fn normalize(payload: &Value) -> Result<WeatherSnapshot, FetchError> {
    check_cod(payload)?;

    let parsed = OwCurrent::deserialize(payload).map_err(|e| payload_error(e.to_string()))?;

    let condition = parsed
        .weather
        .first()
        .ok_or_else(|| payload_error("no weather conditions in response"))?;

    Ok(WeatherSnapshot {
        temperature_celsius: kelvin_to_celsius(parsed.main.temp),
        feels_like_celsius: kelvin_to_celsius(parsed.main.feels_like),
        humidity_percent: parsed.main.humidity,
        wind_speed_mps: parsed.wind.speed,
        description: capitalize(&condition.description),
        condition_code: condition.id,
        icon: Icon::for_code(condition.id),
    })
}

/// `cod` shows up as a number on success and as a string on some errors.
fn check_cod(payload: &Value) -> Result<(), FetchError> {
    let cod = payload
        .get("cod")
        .ok_or_else(|| payload_error("missing field `cod`"))?;

    let code = match cod {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    match code {
        Some(COD_OK) => Ok(()),
        _ => Err(payload_error(format!("status field `cod` is {cod}, expected {COD_OK}"))),
    }
}

fn payload_error(detail: impl Into<String>) -> FetchError {
    FetchError::Other(OtherDetail::Payload(detail.into()))
}
