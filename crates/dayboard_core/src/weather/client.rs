//! Geocoding and weather HTTP clients.
//!
//! # Responsibility
//! - Wrap the public geocoding and forecast endpoints behind traits the
//!   lookup state machine consumes.
//! - Keep transport and response-shape details out of the state machine.
//!
//! # Invariants
//! - Every request carries a bound timeout.
//! - A forecast response without current conditions is rejected as
//!   malformed, never partially applied.

use crate::model::weather::{Coordinate, WeatherSnapshot};
use log::error;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

const GEOCODE_URL: &str = "https://nominatim.openstreetmap.org/search";
const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
// Nominatim rejects requests without an identifying user agent.
const USER_AGENT: &str = concat!("dayboard/", env!("CARGO_PKG_VERSION"));

pub type FetchResult<T> = Result<T, FetchError>;

/// Failure talking to or decoding an external lookup service.
#[derive(Debug)]
pub enum FetchError {
    /// Network, timeout or HTTP-status failure.
    Transport(reqwest::Error),
    /// Response decoded but lacked the expected shape.
    Malformed(String),
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "lookup transport failure: {err}"),
            Self::Malformed(details) => write!(f, "unexpected lookup response: {details}"),
        }
    }
}

impl Error for FetchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Malformed(_) => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

/// First geocoding candidate for a free-text place query.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPlace {
    pub coordinate: Coordinate,
    pub display_name: String,
}

/// Resolves a free-text place name to a coordinate.
pub trait GeocodeClient {
    /// Returns the first candidate, or `None` when the name resolves to
    /// nothing.
    fn geocode(&self, query: &str) -> FetchResult<Option<GeocodedPlace>>;
}

/// Fetches current conditions for a coordinate.
pub trait WeatherClient {
    fn current_conditions(&self, coordinate: Coordinate) -> FetchResult<WeatherSnapshot>;
}

/// HTTP implementation backed by Nominatim and Open-Meteo.
///
/// Cloning shares the underlying connection pool.
#[derive(Clone)]
pub struct HttpWeatherClient {
    http: Client,
}

impl HttpWeatherClient {
    pub fn new() -> FetchResult<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { http })
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeEntry {
    // Nominatim serializes coordinates as strings.
    lat: String,
    lon: String,
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentConditions>,
    hourly: Option<HourlySeries>,
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    time: String,
    temperature_2m: f64,
    relative_humidity_2m: Option<f64>,
    wind_speed_10m: f64,
}

#[derive(Debug, Deserialize)]
struct HourlySeries {
    relative_humidity_2m: Option<Vec<f64>>,
}

impl GeocodeClient for HttpWeatherClient {
    fn geocode(&self, query: &str) -> FetchResult<Option<GeocodedPlace>> {
        let entries: Vec<GeocodeEntry> = self
            .http
            .get(GEOCODE_URL)
            .query(&[("format", "json"), ("q", query), ("limit", "1")])
            .send()?
            .error_for_status()?
            .json()?;

        let Some(entry) = entries.into_iter().next() else {
            return Ok(None);
        };
        Ok(Some(parse_geocode_entry(entry)?))
    }
}

impl WeatherClient for HttpWeatherClient {
    fn current_conditions(&self, coordinate: Coordinate) -> FetchResult<WeatherSnapshot> {
        let query = [
            ("latitude", coordinate.latitude.to_string()),
            ("longitude", coordinate.longitude.to_string()),
            (
                "current",
                "temperature_2m,wind_speed_10m,relative_humidity_2m".to_string(),
            ),
            ("hourly", "relative_humidity_2m".to_string()),
        ];

        let response: ForecastResponse = self
            .http
            .get(FORECAST_URL)
            .query(&query)
            .send()?
            .error_for_status()?
            .json()?;

        snapshot_from_forecast(response)
    }
}

fn parse_geocode_entry(entry: GeocodeEntry) -> FetchResult<GeocodedPlace> {
    let latitude = parse_degrees("latitude", &entry.lat)?;
    let longitude = parse_degrees("longitude", &entry.lon)?;
    Ok(GeocodedPlace {
        coordinate: Coordinate {
            latitude,
            longitude,
        },
        display_name: entry.display_name,
    })
}

fn parse_degrees(field: &str, raw: &str) -> FetchResult<f64> {
    raw.parse::<f64>().map_err(|_| {
        error!("event=geocode_parse module=weather status=error field={field} value={raw}");
        FetchError::Malformed(format!("non-numeric {field} `{raw}`"))
    })
}

fn snapshot_from_forecast(response: ForecastResponse) -> FetchResult<WeatherSnapshot> {
    let current = response
        .current
        .ok_or_else(|| FetchError::Malformed("missing current conditions".to_string()))?;

    // Humidity falls back to the first hourly value when current
    // conditions omit it, then to zero, matching the screen's display.
    let humidity_pct = current
        .relative_humidity_2m
        .or_else(|| {
            response
                .hourly
                .and_then(|hourly| hourly.relative_humidity_2m)
                .and_then(|series| series.first().copied())
        })
        .unwrap_or(0.0);

    Ok(WeatherSnapshot {
        temperature_c: current.temperature_2m,
        humidity_pct,
        wind_speed_kmh: current.wind_speed_10m,
        observed_at: current.time,
    })
}

#[cfg(test)]
mod tests {
    use super::{parse_geocode_entry, snapshot_from_forecast, FetchError, ForecastResponse, GeocodeEntry};

    fn forecast(raw: &str) -> ForecastResponse {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn snapshot_requires_current_conditions() {
        let response = forecast(r#"{"hourly": {"relative_humidity_2m": [50.0]}}"#);
        let err = snapshot_from_forecast(response).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn snapshot_uses_current_humidity_when_present() {
        let response = forecast(
            r#"{
                "current": {
                    "time": "2024-01-01T00:00:00Z",
                    "temperature_2m": 15.0,
                    "relative_humidity_2m": 80.0,
                    "wind_speed_10m": 10.0
                },
                "hourly": {"relative_humidity_2m": [33.0]}
            }"#,
        );
        let snapshot = snapshot_from_forecast(response).unwrap();
        assert_eq!(snapshot.humidity_pct, 80.0);
        assert_eq!(snapshot.temperature_c, 15.0);
        assert_eq!(snapshot.wind_speed_kmh, 10.0);
        assert_eq!(snapshot.observed_at, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn snapshot_falls_back_to_first_hourly_humidity() {
        let response = forecast(
            r#"{
                "current": {
                    "time": "2024-01-01T00:00:00Z",
                    "temperature_2m": 15.0,
                    "wind_speed_10m": 10.0
                },
                "hourly": {"relative_humidity_2m": [61.0, 70.0]}
            }"#,
        );
        let snapshot = snapshot_from_forecast(response).unwrap();
        assert_eq!(snapshot.humidity_pct, 61.0);
    }

    #[test]
    fn snapshot_defaults_humidity_to_zero_without_any_series() {
        let response = forecast(
            r#"{
                "current": {
                    "time": "2024-01-01T00:00:00Z",
                    "temperature_2m": 15.0,
                    "wind_speed_10m": 10.0
                }
            }"#,
        );
        assert_eq!(snapshot_from_forecast(response).unwrap().humidity_pct, 0.0);
    }

    #[test]
    fn geocode_entry_parses_string_coordinates() {
        let entry = GeocodeEntry {
            lat: "21.0".to_string(),
            lon: "105.8".to_string(),
            display_name: "Hà Nội".to_string(),
        };
        let place = parse_geocode_entry(entry).unwrap();
        assert_eq!(place.coordinate.latitude, 21.0);
        assert_eq!(place.coordinate.longitude, 105.8);
        assert_eq!(place.display_name, "Hà Nội");
    }

    #[test]
    fn geocode_entry_rejects_non_numeric_coordinates() {
        let entry = GeocodeEntry {
            lat: "north-ish".to_string(),
            lon: "105.8".to_string(),
            display_name: "nowhere".to_string(),
        };
        assert!(matches!(
            parse_geocode_entry(entry),
            Err(FetchError::Malformed(_))
        ));
    }
}
