//! Weather lookup state machine.
//!
//! # Responsibility
//! - Drive the screen's `Idle -> Loading -> Success | Error` transitions
//!   for city search and current-location lookups.
//! - Apply fetched results under a generation token so stale responses
//!   never overwrite newer ones.
//!
//! # Invariants
//! - Validation failures leave the state untouched.
//! - Lookup failures surface a user-facing message without leaking
//!   transport detail.
//! - No retry policy: a failed fetch waits for explicit re-invocation.

use crate::model::weather::{Coordinate, WeatherSnapshot};
use crate::weather::client::{GeocodeClient, WeatherClient};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default position used when the platform cannot provide one (permission
/// denied, acquisition failure).
pub const FALLBACK_COORDINATE: Coordinate = Coordinate {
    latitude: 21.046732510551642,
    longitude: 105.79222170282267,
};

/// Message shown when the geocoder yields no candidate.
pub const CITY_NOT_FOUND_MESSAGE: &str = "Không tìm thấy thành phố";
/// Generic message for transport and response-shape failures.
pub const FETCH_FAILED_MESSAGE: &str = "Không thể tải dữ liệu thời tiết";

/// Failure acquiring the device position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationError {
    PermissionDenied,
    Unavailable(String),
}

impl Display for LocationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "location permission denied"),
            Self::Unavailable(details) => write!(f, "location unavailable: {details}"),
        }
    }
}

impl Error for LocationError {}

/// Platform position source, including its permission flow.
pub trait LocationProvider {
    fn current_position(&self) -> Result<Coordinate, LocationError>;
}

/// Screen-visible lookup state.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupState {
    Idle,
    Loading,
    Success(WeatherSnapshot),
    Error(String),
}

/// Input validation failure; the lookup state is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherLookupError {
    EmptyCityName,
}

impl Display for WeatherLookupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCityName => write!(f, "city name cannot be empty"),
        }
    }
}

impl Error for WeatherLookupError {}

/// Token tying a fetch to the lookup generation that issued it.
///
/// Applying a result whose token no longer matches the current generation
/// is a no-op, so a rapid newer search cannot be overwritten by an older
/// response arriving late.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Weather screen component over pluggable geocode/weather/location
/// collaborators.
pub struct WeatherLookup<G, W, L> {
    geocoder: G,
    weather: W,
    location: L,
    state: LookupState,
    known_position: Option<Coordinate>,
    generation: u64,
}

impl<G, W, L> WeatherLookup<G, W, L>
where
    G: GeocodeClient,
    W: WeatherClient,
    L: LocationProvider,
{
    pub fn new(geocoder: G, weather: W, location: L) -> Self {
        Self {
            geocoder,
            weather,
            location,
            state: LookupState::Idle,
            known_position: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    /// Position acquired by an earlier location flow, if any.
    pub fn known_position(&self) -> Option<Coordinate> {
        self.known_position
    }

    /// Starts a new lookup generation and enters `Loading`.
    ///
    /// Callers that run their own fetch pass the token back through
    /// [`apply`](Self::apply); issuing a newer token supersedes every
    /// earlier one.
    pub fn begin(&mut self) -> RequestToken {
        self.generation += 1;
        self.state = LookupState::Loading;
        RequestToken(self.generation)
    }

    /// Applies a finished fetch for the given token.
    ///
    /// Stale tokens are dropped without touching the state.
    pub fn apply(&mut self, token: RequestToken, outcome: Result<WeatherSnapshot, String>) {
        if token.0 != self.generation {
            warn!(
                "event=lookup_apply module=weather status=stale token={} generation={}",
                token.0, self.generation
            );
            return;
        }
        self.state = match outcome {
            Ok(snapshot) => LookupState::Success(snapshot),
            Err(message) => LookupState::Error(message),
        };
    }

    /// Resolves a city name and fetches its current conditions.
    ///
    /// Empty or whitespace-only names are rejected without a transition.
    pub fn search_by_city(&mut self, name: &str) -> Result<(), WeatherLookupError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WeatherLookupError::EmptyCityName);
        }

        let token = self.begin();
        match self.geocoder.geocode(name) {
            Ok(Some(place)) => {
                info!(
                    "event=geocode module=weather status=ok place={}",
                    place.display_name
                );
                self.fetch_conditions(token, place.coordinate);
            }
            Ok(None) => {
                info!("event=geocode module=weather status=miss query={name}");
                self.apply(token, Err(CITY_NOT_FOUND_MESSAGE.to_string()));
            }
            Err(err) => {
                warn!("event=geocode module=weather status=error error={err}");
                self.apply(token, Err(FETCH_FAILED_MESSAGE.to_string()));
            }
        }
        Ok(())
    }

    /// Fetches conditions for the device position.
    ///
    /// Reuses the known position when one exists; otherwise runs the
    /// location flow, falling back to [`FALLBACK_COORDINATE`] on denial or
    /// failure, and remembers the result.
    pub fn use_current_location(&mut self) {
        let coordinate = match self.known_position {
            Some(position) => position,
            None => {
                let acquired = self.location.current_position().unwrap_or_else(|err| {
                    warn!("event=locate module=weather status=fallback error={err}");
                    FALLBACK_COORDINATE
                });
                self.known_position = Some(acquired);
                acquired
            }
        };

        let token = self.begin();
        self.fetch_conditions(token, coordinate);
    }

    fn fetch_conditions(&mut self, token: RequestToken, coordinate: Coordinate) {
        match self.weather.current_conditions(coordinate) {
            Ok(snapshot) => self.apply(token, Ok(snapshot)),
            Err(err) => {
                warn!("event=conditions_fetch module=weather status=error error={err}");
                self.apply(token, Err(FETCH_FAILED_MESSAGE.to_string()));
            }
        }
    }
}
