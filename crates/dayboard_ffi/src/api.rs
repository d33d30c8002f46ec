//! FFI use-case API for the UI-facing calls.
//!
//! # Responsibility
//! - Expose stable, screen-level functions to Dart via FRB.
//! - Keep error semantics simple: response envelopes, never exceptions.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - The UI layer owns the one-second interval; core validates every
//!   countdown transition it applies.

use dayboard_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    sample_roster, Coordinate, CountdownSession, HttpWeatherClient, JsonFileTaskRepository,
    LocationError, LocationProvider, LookupState, TaskService, TemperatureBand, TickOutcome,
    WeatherLookup,
};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};
use uuid::Uuid;

const TASKS_FILE_NAME: &str = "dayboard_tasks.json";
static TASKS_PATH: OnceLock<PathBuf> = OnceLock::new();
static TASKS: OnceLock<Mutex<TaskService<JsonFileTaskRepository>>> = OnceLock::new();
static COUNTDOWN: Mutex<CountdownSession> = Mutex::new(CountdownSession::new());

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Roster entry shown by the listing screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentView {
    pub id: String,
    pub name: String,
    pub age: u8,
    pub class_name: String,
}

/// Returns the fixed roster for the listing screen.
///
/// # FFI contract
/// - Sync call, deterministic output, never throws.
#[flutter_rust_bridge::frb(sync)]
pub fn roster() -> Vec<StudentView> {
    sample_roster()
        .into_iter()
        .map(|student| StudentView {
            id: student.id,
            name: student.name,
            age: student.age,
            class_name: student.class_name,
        })
        .collect()
}

/// Countdown state after one FFI call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownResponse {
    /// Whether the requested transition was applied.
    pub ok: bool,
    /// Validation or contract error when `ok` is false.
    pub message: String,
    /// Remaining time rendered as `MM:SS`.
    pub display: String,
    pub remaining_seconds: u32,
    pub running: bool,
    /// True exactly once, on the tick that reached zero. The UI maps this
    /// to the one-shot alert and haptic pulse.
    pub completion_signal: bool,
}

impl CountdownResponse {
    fn from_session(session: &CountdownSession, completion_signal: bool) -> Self {
        Self {
            ok: true,
            message: String::new(),
            display: dayboard_core::format_clock(session.remaining_seconds()),
            remaining_seconds: session.remaining_seconds(),
            running: session.is_running(),
            completion_signal,
        }
    }

    fn failure(session: &CountdownSession, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            ..Self::from_session(session, false)
        }
    }
}

/// Starts the countdown from free-text duration input.
///
/// # FFI contract
/// - Sync call, never panics.
/// - Rejects non-numeric/non-positive input and re-entrant starts.
#[flutter_rust_bridge::frb(sync)]
pub fn countdown_start(seconds_input: String) -> CountdownResponse {
    let mut session = lock_countdown();
    let duration = match dayboard_core::parse_duration_input(&seconds_input) {
        Ok(duration) => duration,
        Err(err) => return CountdownResponse::failure(&session, err.to_string()),
    };
    match session.start(duration) {
        Ok(()) => CountdownResponse::from_session(&session, false),
        Err(err) => CountdownResponse::failure(&session, err.to_string()),
    }
}

/// Applies one elapsed-second tick from the UI interval.
///
/// # FFI contract
/// - Sync call, never panics.
/// - `completion_signal` is reported exactly once per countdown.
#[flutter_rust_bridge::frb(sync)]
pub fn countdown_tick() -> CountdownResponse {
    let mut session = lock_countdown();
    match session.tick() {
        Ok(outcome) => {
            CountdownResponse::from_session(&session, outcome == TickOutcome::Expired)
        }
        Err(err) => CountdownResponse::failure(&session, err.to_string()),
    }
}

/// Stops the running countdown without the completion signal.
///
/// # FFI contract
/// - Sync call, never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn countdown_stop() -> CountdownResponse {
    let mut session = lock_countdown();
    match session.stop() {
        Ok(()) => CountdownResponse::from_session(&session, false),
        Err(err) => CountdownResponse::failure(&session, err.to_string()),
    }
}

/// To-do entry as rendered by the task screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskView {
    pub id: String,
    pub text: String,
    pub completed: bool,
}

/// Full-collection response for list/load calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    pub ok: bool,
    pub message: String,
    pub items: Vec<TaskView>,
}

/// Result envelope for one task mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    pub ok: bool,
    pub message: String,
    /// Id of the created/affected task on success.
    pub task_id: Option<String>,
}

impl TaskActionResponse {
    fn success(task_id: String) -> Self {
        Self {
            ok: true,
            message: String::new(),
            task_id: Some(task_id),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            task_id: None,
        }
    }
}

/// Loads the persisted task snapshot at screen startup.
///
/// # FFI contract
/// - Sync call, file-system backed, never panics.
/// - Malformed persisted data is reported, not replaced silently.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_load() -> TaskListResponse {
    with_tasks(|service| match service.load() {
        Ok(_) => TaskListResponse {
            ok: true,
            message: String::new(),
            items: task_views(service),
        },
        Err(err) => TaskListResponse {
            ok: false,
            message: format!("tasks_load failed: {err}"),
            items: task_views(service),
        },
    })
}

/// Returns the current in-memory collection.
///
/// # FFI contract
/// - Sync call, never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn tasks_list() -> TaskListResponse {
    with_tasks(|service| TaskListResponse {
        ok: true,
        message: String::new(),
        items: task_views(service),
    })
}

/// Appends a task from user input.
///
/// # FFI contract
/// - Sync call, never panics.
/// - Rejects empty/whitespace text; persists before reporting success.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(text: String) -> TaskActionResponse {
    with_tasks(|service| match service.add(&text) {
        Ok(id) => TaskActionResponse::success(id.to_string()),
        Err(err) => TaskActionResponse::failure(format!("task_add failed: {err}")),
    })
}

/// Toggles a task's completion flag.
///
/// # FFI contract
/// - Sync call, never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(id: String) -> TaskActionResponse {
    let Some(task_id) = parse_task_id(&id) else {
        return TaskActionResponse::failure(format!("invalid task id `{id}`"));
    };
    with_tasks(|service| match service.toggle_completed(task_id) {
        Ok(_) => TaskActionResponse::success(id.clone()),
        Err(err) => TaskActionResponse::failure(format!("task_toggle failed: {err}")),
    })
}

/// Replaces a task's text in place.
///
/// # FFI contract
/// - Sync call, never panics.
/// - Rejects empty/whitespace text.
#[flutter_rust_bridge::frb(sync)]
pub fn task_edit(id: String, text: String) -> TaskActionResponse {
    let Some(task_id) = parse_task_id(&id) else {
        return TaskActionResponse::failure(format!("invalid task id `{id}`"));
    };
    with_tasks(|service| match service.edit(task_id, &text) {
        Ok(()) => TaskActionResponse::success(id.clone()),
        Err(err) => TaskActionResponse::failure(format!("task_edit failed: {err}")),
    })
}

/// Removes a task. The confirmation dialog runs on the UI side.
///
/// # FFI contract
/// - Sync call, never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn task_remove(id: String) -> TaskActionResponse {
    let Some(task_id) = parse_task_id(&id) else {
        return TaskActionResponse::failure(format!("invalid task id `{id}`"));
    };
    with_tasks(|service| match service.remove(task_id) {
        Ok(_) => TaskActionResponse::success(id.clone()),
        Err(err) => TaskActionResponse::failure(format!("task_remove failed: {err}")),
    })
}

/// Conditions card rendered on a successful lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherView {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_kmh: f64,
    pub observed_at: String,
    /// Descriptive temperature band, e.g. "Mát mẻ".
    pub description: String,
}

/// Result envelope for one weather lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherResponse {
    pub ok: bool,
    pub message: String,
    pub weather: Option<WeatherView>,
}

impl WeatherResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            weather: None,
        }
    }
}

/// Searches weather by free-text city name.
///
/// # FFI contract
/// - Sync call; performs network I/O with a bound timeout.
/// - Never panics; all failures arrive as envelope messages.
#[flutter_rust_bridge::frb(sync)]
pub fn weather_search(city: String) -> WeatherResponse {
    let mut lookup = match build_lookup(None) {
        Ok(lookup) => lookup,
        Err(response) => return response,
    };
    if let Err(err) = lookup.search_by_city(&city) {
        return WeatherResponse::failure(err.to_string());
    }
    lookup_state_response(lookup.state())
}

/// Fetches weather for the host-provided position, falling back to the
/// default coordinate when the host has none.
///
/// # FFI contract
/// - Sync call; performs network I/O with a bound timeout.
/// - Never panics; all failures arrive as envelope messages.
#[flutter_rust_bridge::frb(sync)]
pub fn weather_for_position(latitude: Option<f64>, longitude: Option<f64>) -> WeatherResponse {
    let position = match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Some(Coordinate {
            latitude,
            longitude,
        }),
        _ => None,
    };
    let mut lookup = match build_lookup(position) {
        Ok(lookup) => lookup,
        Err(response) => return response,
    };
    lookup.use_current_location();
    lookup_state_response(lookup.state())
}

/// Position handed over by the host platform, if it granted one.
struct ProvidedPosition(Option<Coordinate>);

impl LocationProvider for ProvidedPosition {
    fn current_position(&self) -> Result<Coordinate, LocationError> {
        self.0
            .ok_or_else(|| LocationError::Unavailable("host provided no position".to_string()))
    }
}

fn build_lookup(
    position: Option<Coordinate>,
) -> Result<WeatherLookup<HttpWeatherClient, HttpWeatherClient, ProvidedPosition>, WeatherResponse>
{
    let client = HttpWeatherClient::new()
        .map_err(|err| WeatherResponse::failure(format!("http client init failed: {err}")))?;
    Ok(WeatherLookup::new(
        client.clone(),
        client,
        ProvidedPosition(position),
    ))
}

fn lookup_state_response(state: &LookupState) -> WeatherResponse {
    match state {
        LookupState::Success(snapshot) => WeatherResponse {
            ok: true,
            message: String::new(),
            weather: Some(WeatherView {
                temperature_c: snapshot.temperature_c,
                humidity_pct: snapshot.humidity_pct,
                wind_speed_kmh: snapshot.wind_speed_kmh,
                observed_at: snapshot.observed_at.clone(),
                description: TemperatureBand::classify(snapshot.temperature_c)
                    .description()
                    .to_string(),
            }),
        },
        LookupState::Error(message) => WeatherResponse::failure(message.clone()),
        LookupState::Idle | LookupState::Loading => {
            WeatherResponse::failure("lookup did not complete")
        }
    }
}

fn lock_countdown() -> std::sync::MutexGuard<'static, CountdownSession> {
    COUNTDOWN.lock().unwrap_or_else(PoisonError::into_inner)
}

fn with_tasks<T>(f: impl FnOnce(&mut TaskService<JsonFileTaskRepository>) -> T) -> T {
    let service = TASKS.get_or_init(|| {
        Mutex::new(TaskService::new(JsonFileTaskRepository::new(
            resolve_tasks_path(),
        )))
    });
    let mut guard = service.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

fn resolve_tasks_path() -> PathBuf {
    TASKS_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("DAYBOARD_TASKS_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(TASKS_FILE_NAME)
        })
        .clone()
}

fn parse_task_id(id: &str) -> Option<uuid::Uuid> {
    Uuid::parse_str(id.trim()).ok()
}

fn task_views(service: &TaskService<JsonFileTaskRepository>) -> Vec<TaskView> {
    service
        .tasks()
        .iter()
        .map(|task| TaskView {
            id: task.id.to_string(),
            text: task.text.clone(),
            completed: task.completed,
        })
        .collect()
}
