//! Task-list use-case service.
//!
//! # Responsibility
//! - Provide the screen's CRUD entry points over the in-memory collection.
//! - Persist the full snapshot after every mutation.
//!
//! # Invariants
//! - Every mutation commits to storage before in-memory state advances; on
//!   persistence failure the prior collection stays intact.
//! - Insertion order is preserved; edits replace text in place.
//! - Task ids stay unique for the collection lifetime.

use crate::model::task::{validate_text, Task, TaskId, TaskValidationError};
use crate::repo::task_repo::{RepoError, TaskRepository};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Service error for task-list use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    /// User input failed validation; state is unchanged.
    Validation(TaskValidationError),
    /// No task with the given id exists.
    TaskNotFound(TaskId),
    /// Persistence-layer failure; in-memory state was not advanced.
    Repo(RepoError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::TaskNotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for TaskServiceError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Task-list manager owning the in-memory collection and its repository.
pub struct TaskService<R: TaskRepository> {
    repo: R,
    tasks: Vec<Task>,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service with an empty in-memory collection.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            tasks: Vec::new(),
        }
    }

    /// Current collection in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Loads the persisted snapshot at startup.
    ///
    /// # Contract
    /// - An absent slot yields an empty collection.
    /// - Malformed persisted data is reported to the caller, not silently
    ///   replaced with an empty collection.
    ///
    /// Returns the number of loaded tasks.
    pub fn load(&mut self) -> TaskServiceResult<usize> {
        match self.repo.load()? {
            Some(tasks) => {
                let count = tasks.len();
                self.tasks = tasks;
                Ok(count)
            }
            None => {
                self.tasks.clear();
                Ok(0)
            }
        }
    }

    /// Appends a new task built from user input.
    ///
    /// Rejects empty or whitespace-only text. Returns the new task's id.
    pub fn add(&mut self, text: &str) -> TaskServiceResult<TaskId> {
        let task = Task::new(text)?;
        let id = task.id;

        let mut next = self.tasks.clone();
        next.push(task);
        self.commit(next)?;
        Ok(id)
    }

    /// Flips the completion flag of the matching task.
    ///
    /// Returns the new flag value.
    pub fn toggle_completed(&mut self, id: TaskId) -> TaskServiceResult<bool> {
        let mut next = self.tasks.clone();
        let task = next
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(TaskServiceError::TaskNotFound(id))?;
        task.completed = !task.completed;
        let completed = task.completed;

        self.commit(next)?;
        Ok(completed)
    }

    /// Replaces the text of the matching task in place.
    ///
    /// Position and id are unchanged; empty text is rejected.
    pub fn edit(&mut self, id: TaskId, text: &str) -> TaskServiceResult<()> {
        let text = validate_text(text)?;

        let mut next = self.tasks.clone();
        let task = next
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(TaskServiceError::TaskNotFound(id))?;
        task.text = text;

        self.commit(next)
    }

    /// Deletes the matching task. The confirmation dialog is the caller's
    /// concern.
    ///
    /// Returns the removed task.
    pub fn remove(&mut self, id: TaskId) -> TaskServiceResult<Task> {
        let position = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(TaskServiceError::TaskNotFound(id))?;

        let mut next = self.tasks.clone();
        let removed = next.remove(position);
        self.commit(next)?;
        Ok(removed)
    }

    // Storage commit comes first; in-memory state advances only after the
    // snapshot is durably replaced.
    fn commit(&mut self, next: Vec<Task>) -> TaskServiceResult<()> {
        self.repo.save(&next)?;
        self.tasks = next;
        Ok(())
    }
}
