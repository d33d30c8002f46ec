//! Weather domain records.
//!
//! # Responsibility
//! - Define the ephemeral conditions snapshot held by the weather screen.
//! - Classify temperature into the descriptive band shown at render time.
//!
//! # Invariants
//! - A snapshot is replaced wholesale on each successful fetch; it is never
//!   partially updated or persisted.

use serde::{Deserialize, Serialize};

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Current conditions for one coordinate at one observation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_kmh: f64,
    /// Observation timestamp as reported by the provider.
    pub observed_at: String,
}

/// Descriptive temperature band, derived at render time from a snapshot.
///
/// Pure classification; not part of the lookup state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureBand {
    /// Below 0 °C.
    Freezing,
    /// 0–10 °C.
    Cold,
    /// 10–20 °C.
    Cool,
    /// 20–30 °C.
    Warm,
    /// 30 °C and above.
    Hot,
}

impl TemperatureBand {
    /// Classifies a temperature in °C into its band.
    pub fn classify(temperature_c: f64) -> Self {
        if temperature_c < 0.0 {
            Self::Freezing
        } else if temperature_c < 10.0 {
            Self::Cold
        } else if temperature_c < 20.0 {
            Self::Cool
        } else if temperature_c < 30.0 {
            Self::Warm
        } else {
            Self::Hot
        }
    }

    /// User-facing description shown next to the temperature.
    pub fn description(self) -> &'static str {
        match self {
            Self::Freezing => "Băng giá",
            Self::Cold => "Lạnh",
            Self::Cool => "Mát mẻ",
            Self::Warm => "Ấm áp",
            Self::Hot => "Nóng",
        }
    }
}
