use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::serde::deserialize_optional_string;

/// Folds a blank optional attribute into `None`.
///
/// Absent and blank optionals are the same value everywhere a todo is stored,
/// so backends apply this before every write.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// A todo record as stored in the document table.
///
/// `user_id` and `todo_id` form the record's identity and never change after
/// creation. `created_at` is the sort attribute of the creation-time index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub user_id: String,
    pub todo_id: String,
    /// RFC 3339 timestamp set when the todo is created.
    pub created_at: String,
    pub name: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_string"
    )]
    pub due_date: Option<String>,
    pub done: bool,
    /// Public location of the uploaded attachment, without signature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment_url: Option<String>,
}

impl TodoItem {
    /// Creates a new, not yet completed todo for a user.
    ///
    /// Generates a random `todo_id` and stamps `created_at` with the current time.
    pub fn new(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            todo_id: Uuid::new_v4().to_string(),
            created_at: Utc::now().to_rfc3339(),
            name: name.into(),
            due_date: None,
            done: false,
            attachment_url: None,
        }
    }

    /// Sets the due date for this todo. A blank date leaves it unset.
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = non_blank(Some(due_date.into()));
        self
    }

    /// Sets a specific ID for this todo (useful for testing).
    pub fn with_id(mut self, todo_id: impl Into<String>) -> Self {
        self.todo_id = todo_id.into();
        self
    }

    /// Sets a specific creation timestamp (useful for testing).
    pub fn with_created_at(mut self, created_at: impl Into<String>) -> Self {
        self.created_at = created_at.into();
        self
    }

    /// Marks the todo as done or not done.
    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }
}

/// The subset of a todo that can be changed after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoUpdate {
    pub name: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_optional_string"
    )]
    pub due_date: Option<String>,
    pub done: bool,
}

impl TodoUpdate {
    pub fn new(name: impl Into<String>, done: bool) -> Self {
        Self {
            name: name.into(),
            due_date: None,
            done,
        }
    }

    /// Sets the due date carried by this update. A blank date clears it.
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = non_blank(Some(due_date.into()));
        self
    }
}

/// Outcome of a delete.
///
/// Deletes never raise: a failure is reported through this status instead.
/// The string forms are the markers callers compare against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeleteStatus {
    #[serde(rename = "success")]
    Success,
    #[serde(rename = "Error")]
    Error,
}

impl DeleteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeleteStatus::Success => "success",
            DeleteStatus::Error => "Error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DeleteStatus::Success)
    }
}

impl fmt::Display for DeleteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
