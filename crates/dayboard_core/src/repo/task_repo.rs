//! Task snapshot repository contracts and implementations.
//!
//! # Responsibility
//! - Provide load/save APIs over the single named slot holding the
//!   serialized task collection.
//! - Keep serialization and file-system details inside the persistence
//!   boundary.
//!
//! # Invariants
//! - `save` replaces the whole snapshot; a failed save never truncates the
//!   previous one.
//! - Read paths reject invalid persisted state (malformed JSON, duplicate
//!   ids) instead of masking it with an empty collection.

use crate::model::task::{Task, TaskId};
use log::{error, info};
use std::cell::RefCell;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence failure for the task snapshot slot.
#[derive(Debug)]
pub enum RepoError {
    Io(io::Error),
    Malformed(serde_json::Error),
    DuplicateId(TaskId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "task storage failure: {err}"),
            Self::Malformed(err) => write!(f, "malformed task snapshot: {err}"),
            Self::DuplicateId(id) => write!(f, "duplicate task id in snapshot: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Malformed(err) => Some(err),
            Self::DuplicateId(_) => None,
        }
    }
}

impl From<io::Error> for RepoError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value)
    }
}

/// Repository interface over the persisted task snapshot.
pub trait TaskRepository {
    /// Loads the snapshot. `None` means the slot has never been written.
    fn load(&self) -> RepoResult<Option<Vec<Task>>>;
    /// Overwrites the slot with the full collection.
    fn save(&self, tasks: &[Task]) -> RepoResult<()>;
}

impl<R: TaskRepository + ?Sized> TaskRepository for &R {
    fn load(&self) -> RepoResult<Option<Vec<Task>>> {
        (**self).load()
    }

    fn save(&self, tasks: &[Task]) -> RepoResult<()> {
        (**self).save(tasks)
    }
}

/// JSON-file-backed snapshot repository.
///
/// `save` writes a temp sibling and renames it over the slot, so the
/// previous snapshot survives a failed write.
pub struct JsonFileTaskRepository {
    path: PathBuf,
}

impl JsonFileTaskRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn staging_path(&self) -> PathBuf {
        let mut staging = self.path.as_os_str().to_owned();
        staging.push(".tmp");
        PathBuf::from(staging)
    }
}

impl TaskRepository for JsonFileTaskRepository {
    fn load(&self) -> RepoResult<Option<Vec<Task>>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("event=snapshot_load module=repo status=ok slot=absent");
                return Ok(None);
            }
            Err(err) => {
                error!("event=snapshot_load module=repo status=error error_code=io error={err}");
                return Err(err.into());
            }
        };

        let tasks = decode_snapshot(&raw)?;
        info!(
            "event=snapshot_load module=repo status=ok count={}",
            tasks.len()
        );
        Ok(Some(tasks))
    }

    fn save(&self, tasks: &[Task]) -> RepoResult<()> {
        let raw = serde_json::to_string(tasks)?;
        let staging = self.staging_path();
        std::fs::write(&staging, raw)?;
        std::fs::rename(&staging, &self.path)?;
        info!(
            "event=snapshot_save module=repo status=ok count={}",
            tasks.len()
        );
        Ok(())
    }
}

/// String-slot snapshot repository for tests and in-process demos.
///
/// Mirrors the platform key-value slot the app persists into.
pub struct InMemoryTaskRepository {
    slot: RefCell<Option<String>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self {
            slot: RefCell::new(None),
        }
    }

    /// Creates a repository whose slot already holds raw serialized data.
    pub fn with_contents(raw: impl Into<String>) -> Self {
        Self {
            slot: RefCell::new(Some(raw.into())),
        }
    }
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn load(&self) -> RepoResult<Option<Vec<Task>>> {
        match self.slot.borrow().as_deref() {
            Some(raw) => Ok(Some(decode_snapshot(raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, tasks: &[Task]) -> RepoResult<()> {
        let raw = serde_json::to_string(tasks)?;
        *self.slot.borrow_mut() = Some(raw);
        Ok(())
    }
}

fn decode_snapshot(raw: &str) -> RepoResult<Vec<Task>> {
    let tasks: Vec<Task> = serde_json::from_str(raw)?;

    let mut seen = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        if !seen.insert(task.id) {
            error!(
                "event=snapshot_load module=repo status=error error_code=duplicate_id id={}",
                task.id
            );
            return Err(RepoError::DuplicateId(task.id));
        }
    }

    Ok(tasks)
}
