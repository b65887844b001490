/// Task model
///
/// Tasks are owned by exactly one user and carry progress, status, and
/// optional planning metadata. Deletion is a status transition, not a row
/// removal, so the consultation history attached to a task survives it.
///
/// # Lifecycle
///
/// ```text
/// created (pending, progress 0)
///   → partial updates (title/progress/status/due_date/notes/criteria)
///   → deleted (terminal, hidden from all ownership-scoped queries)
/// ```
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('pending', 'completed', 'deleted');
///
/// CREATE TABLE tasks (
///     id BIGSERIAL PRIMARY KEY,
///     user_id BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     title VARCHAR(100) NOT NULL,
///     progress INTEGER NOT NULL DEFAULT 0 CHECK (progress BETWEEN 0 AND 100),
///     status task_status NOT NULL DEFAULT 'pending',
///     due_date TIMESTAMPTZ,
///     notes TEXT,
///     completion_criteria TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task status
///
/// `Deleted` is the soft-delete marker: deleted tasks stay in the table but
/// are excluded from every list/get query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Task is open
    Pending,

    /// Task has been completed
    Completed,

    /// Task has been soft-deleted (terminal)
    Deleted,
}

impl TaskStatus {
    /// Converts status to its database string form
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Completed => "completed",
            TaskStatus::Deleted => "deleted",
        }
    }

    /// Checks if the task is soft-deleted
    pub fn is_deleted(&self) -> bool {
        matches!(self, TaskStatus::Deleted)
    }
}

/// Task owned by a single user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task id
    pub id: i64,

    /// Owning user
    pub user_id: i64,

    /// Title (1-100 characters, validated by the task service)
    pub title: String,

    /// Progress percentage (0-100)
    pub progress: i32,

    /// Current status
    pub status: TaskStatus,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// Optional free-text notes
    pub notes: Option<String>,

    /// Optional free-text completion criteria
    pub completion_criteria: Option<String>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
///
/// Progress defaults to 0 and status to `pending` at the store level.
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Title (already validated)
    pub title: String,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// Optional notes
    pub notes: Option<String>,

    /// Optional completion criteria
    pub completion_criteria: Option<String>,
}

/// Input for partially updating a task
///
/// `None` fields are left unchanged (partial-update semantics, not a full
/// replace).
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New progress percentage
    pub progress: Option<i32>,

    /// New status
    pub status: Option<TaskStatus>,

    /// New due date
    pub due_date: Option<DateTime<Utc>>,

    /// New notes
    pub notes: Option<String>,

    /// New completion criteria
    pub completion_criteria: Option<String>,
}

impl UpdateTask {
    /// Checks whether the update carries any field at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.progress.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
            && self.notes.is_none()
            && self.completion_criteria.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_status_as_str() {
        assert_eq!(TaskStatus::Pending.as_str(), "pending");
        assert_eq!(TaskStatus::Completed.as_str(), "completed");
        assert_eq!(TaskStatus::Deleted.as_str(), "deleted");
    }

    #[test]
    fn test_task_status_is_deleted() {
        assert!(!TaskStatus::Pending.is_deleted());
        assert!(!TaskStatus::Completed.is_deleted());
        assert!(TaskStatus::Deleted.is_deleted());
    }

    #[test]
    fn test_task_status_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::Pending).unwrap(),
            "\"pending\""
        );
        let status: TaskStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(status, TaskStatus::Completed);
    }

    #[test]
    fn test_task_status_rejects_unknown_value() {
        let result: Result<TaskStatus, _> = serde_json::from_str("\"archived\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_update_task_is_empty() {
        assert!(UpdateTask::default().is_empty());

        let update = UpdateTask {
            progress: Some(50),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
