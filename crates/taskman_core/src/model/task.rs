//! Task record model.
//!
//! # Invariants
//! - `id` is assigned once at creation and never reused for another task.
//! - `id` is the only merge key; two records with the same id are the same
//!   task at different points in time.
//! - `id` is never empty once stored; writes call `TaskRecord::validate()`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque primary key of a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Reasons a task cannot be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyId,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "task id must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// A single to-do item with free-text name and notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: TaskId,
    /// May be blank while a draft is being edited.
    pub name: String,
    pub notes: String,
}

impl TaskRecord {
    /// Creates a task with a newly generated id.
    pub fn new(name: impl Into<String>, notes: impl Into<String>) -> Self {
        Self::with_id(TaskId::generate(), name, notes)
    }

    /// Creates a task for an identity that already exists, e.g. when editing.
    pub fn with_id(id: impl Into<TaskId>, name: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            notes: notes.into(),
        }
    }

    /// Checks the record can be written. Blank names are allowed.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.as_str().is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        Ok(())
    }
}
