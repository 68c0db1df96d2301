//! Text rendering of a lookup result.
//!
//! Each call produces a complete block for one attempt; nothing from a
//! previous lookup is carried over.

use weatherapp_core::{FetchError, WeatherSnapshot};

pub fn render(result: &Result<WeatherSnapshot, FetchError>) -> String {
    match result {
        Ok(snapshot) => render_snapshot(snapshot),
        Err(err) => err.to_string(),
    }
}

fn render_snapshot(s: &WeatherSnapshot) -> String {
    format!(
        "{icon}  {temp:.1}°C\n\
         {description}\n\
         🌡 Feels like: {feels:.1}°C\n\
         💦 Humidity: {humidity}%\n\
         🌬️ Wind: {wind} m/s",
        icon = s.icon.emoji(),
        temp = s.temperature_celsius,
        description = s.description,
        feels = s.feels_like_celsius,
        humidity = s.humidity_percent,
        wind = format_speed(s.wind_speed_mps),
    )
}

/// Whole values keep one decimal ("3.0"); others print as-is ("4.63").
fn format_speed(speed: f64) -> String {
    if speed.fract() == 0.0 {
        format!("{speed:.1}")
    } else {
        speed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weatherapp_core::{Icon, OtherDetail};

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            temperature_celsius: 300.0 - 273.15,
            feels_like_celsius: 298.0 - 273.15,
            humidity_percent: 50,
            wind_speed_mps: 3.0,
            description: "Clear sky".into(),
            condition_code: 800,
            icon: Icon::Clear,
        }
    }

    #[test]
    fn snapshot_lines() {
        let out = render(&Ok(snapshot()));
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(
            lines,
            vec![
                "☀️  26.9°C",
                "Clear sky",
                "🌡 Feels like: 24.9°C",
                "💦 Humidity: 50%",
                "🌬️ Wind: 3.0 m/s",
            ]
        );
    }

    #[test]
    fn fractional_wind_is_kept() {
        let mut s = snapshot();
        s.wind_speed_mps = 4.63;
        assert!(render(&Ok(s)).ends_with("Wind: 4.63 m/s"));
    }

    #[test]
    fn whole_speeds_keep_one_decimal() {
        assert_eq!(format_speed(0.0), "0.0");
        assert_eq!(format_speed(12.0), "12.0");
        assert_eq!(format_speed(0.5), "0.5");
    }

    #[test]
    fn error_is_a_single_message() {
        assert_eq!(render(&Err(FetchError::NotFound)), "City not found");

        let out = render(&Err(FetchError::Other(OtherDetail::Status(429))));
        assert_eq!(out, "Error: HTTP status 429 Too Many Requests");
        assert_eq!(out.lines().count(), 1);
    }
}
