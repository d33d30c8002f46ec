//! Core domain logic for Dayboard.
//! This crate is the single source of truth for the screens' business
//! invariants. Rendering, haptics and the OS permission dialog stay in the
//! UI layer and reach core only through traits and returned signals.

pub mod countdown;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod weather;

pub use countdown::schedule::{IntervalGuard, ThreadSchedule, TickSchedule};
pub use countdown::session::{
    format_clock, parse_duration_input, CountdownError, CountdownSession, CountdownState,
    TickOutcome,
};
pub use countdown::{CountdownTimer, TICK_PERIOD};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::student::{sample_roster, Student, ROSTER_SIZE};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use model::weather::{Coordinate, TemperatureBand, WeatherSnapshot};
pub use repo::task_repo::{
    InMemoryTaskRepository, JsonFileTaskRepository, RepoError, RepoResult, TaskRepository,
};
pub use service::task_service::{TaskService, TaskServiceError, TaskServiceResult};
pub use weather::client::{
    FetchError, FetchResult, GeocodeClient, GeocodedPlace, HttpWeatherClient, WeatherClient,
};
pub use weather::lookup::{
    LocationError, LocationProvider, LookupState, RequestToken, WeatherLookup, WeatherLookupError,
    CITY_NOT_FOUND_MESSAGE, FALLBACK_COORDINATE, FETCH_FAILED_MESSAGE,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
