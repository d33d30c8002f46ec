//! To-do task domain model.
//!
//! # Responsibility
//! - Define the persisted to-do record and its snapshot wire shape.
//! - Validate user-entered task text before it reaches storage.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `text` is non-empty after trimming.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a to-do entry.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Validation failure for user-entered task text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Input was empty or whitespace-only.
    EmptyText,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "task text cannot be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// Persisted to-do record.
///
/// Snapshot wire shape is `{id, text, completed}`; the whole collection is
/// serialized into one named slot after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable ID assigned at creation, unique for the collection lifetime.
    pub id: TaskId,
    /// Trimmed, non-empty description.
    pub text: String,
    /// Completion flag, toggled in place.
    pub completed: bool,
}

impl Task {
    /// Creates a task from raw user input with a generated stable ID.
    ///
    /// # Invariants
    /// - `text` is trimmed before storage.
    /// - `completed` starts as `false`.
    pub fn new(text: &str) -> Result<Self, TaskValidationError> {
        Ok(Self {
            id: Uuid::new_v4(),
            text: validate_text(text)?,
            completed: false,
        })
    }

    /// Creates a task with a caller-provided stable ID.
    ///
    /// Used by snapshot import paths where identity already exists.
    pub fn with_id(id: TaskId, text: &str) -> Result<Self, TaskValidationError> {
        Ok(Self {
            id,
            text: validate_text(text)?,
            completed: false,
        })
    }
}

/// Trims user input and rejects empty results.
pub fn validate_text(text: &str) -> Result<String, TaskValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TaskValidationError::EmptyText);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{validate_text, Task, TaskValidationError};
    use uuid::Uuid;

    #[test]
    fn new_trims_and_sets_defaults() {
        let task = Task::new("  Buy milk  ").unwrap();
        assert!(!task.id.is_nil());
        assert_eq!(task.text, "Buy milk");
        assert!(!task.completed);
    }

    #[test]
    fn new_rejects_whitespace_only_text() {
        assert_eq!(Task::new("   ").unwrap_err(), TaskValidationError::EmptyText);
    }

    #[test]
    fn validate_text_preserves_interior_whitespace() {
        assert_eq!(validate_text(" a  b ").unwrap(), "a  b");
    }

    #[test]
    fn serialization_uses_expected_wire_fields() {
        let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
        let task = Task::with_id(id, "ship snapshot").unwrap();

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], id.to_string());
        assert_eq!(json["text"], "ship snapshot");
        assert_eq!(json["completed"], false);

        let decoded: Task = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, task);
    }
}
