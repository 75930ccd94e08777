use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A user-owned to-do item. `completed`, `pinned` and `archived` are
/// independent flags; all eight combinations are valid rows.
/// `id`, `user_id` and `created_at` never change after the insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub completed: bool,
    pub pinned: bool,
    pub archived: bool,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Which timestamp column orders the list. Pinned tasks always come
/// first; this key only breaks the tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    UpdatedAt,
    CreatedAt,
}

impl SortKey {
    pub fn column(self) -> &'static str {
        match self {
            SortKey::UpdatedAt => "updated_at",
            SortKey::CreatedAt => "created_at",
        }
    }
}

/// Everything the form layer may set on a task. Flags the form does not
/// expose keep their previous value on edit and default to off on create.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub pinned: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// The one validation rule the client enforces. Belongs to the form
    /// layer; the repository never calls this.
    pub fn validate(&self) -> Result<(), Error> {
        if self.title.trim().is_empty() {
            return Err(Error::Config("Task title must not be empty".to_string()));
        }
        Ok(())
    }

    /// Draft prefilled from an existing task, for the edit form.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            completed: task.completed,
            pinned: task.pinned,
            archived: task.archived,
            due_date: task.due_date,
        }
    }
}

/// Partial update. Absent fields are left untouched by the backend;
/// `updated_at` is stamped on every outgoing patch by the repository.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    // Double-optional: `Some(None)` clears the due date, `None` leaves it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TaskPatch {
    pub fn completed(value: bool) -> Self {
        Self {
            completed: Some(value),
            ..Self::default()
        }
    }

    pub fn pinned(value: bool) -> Self {
        Self {
            pinned: Some(value),
            ..Self::default()
        }
    }

    pub fn archived(value: bool) -> Self {
        Self {
            archived: Some(value),
            ..Self::default()
        }
    }

    /// Full-field patch from a draft, for the edit-form save path.
    pub fn from_draft(draft: &TaskDraft) -> Self {
        Self {
            title: Some(draft.title.clone()),
            description: Some(draft.description.clone()),
            priority: Some(draft.priority),
            completed: Some(draft.completed),
            pinned: Some(draft.pinned),
            archived: Some(draft.archived),
            due_date: Some(draft.due_date),
            updated_at: None,
        }
    }

    /// Applies the patch to an in-memory task, mirroring what the backend
    /// will do to the row. Used for the optimistic local copy.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(pinned) = self.pinned {
            task.pinned = pinned;
        }
        if let Some(archived) = self.archived {
            task.archived = archived;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(updated_at) = self.updated_at {
            task.updated_at = updated_at;
        }
    }
}
