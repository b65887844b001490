/// Task lifecycle service
///
/// Ownership-scoped task operations. Every operation takes the caller's
/// user id from a verified credential and re-checks ownership against the
/// store; a task that exists but belongs to someone else is reported as
/// not found, never as forbidden, so callers cannot probe which ids exist.
///
/// Deletion is a soft delete: the row survives with `deleted` status and
/// disappears from every subsequent list, get, update, and delete.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;

use taskcoach_shared::models::task::{CreateTask, Task, TaskStatus, UpdateTask};
use taskcoach_shared::store::TaskStore;

use super::{ServiceError, ServiceResult};

/// Maximum task title length, in characters
pub const MAX_TITLE_CHARS: usize = 100;

/// Caller-facing input for creating a task
///
/// Dates arrive as strings from the API layer and are parsed here so the
/// "invalid date" validation error carries service semantics, not a serde
/// decode failure.
#[derive(Debug, Clone, Default)]
pub struct CreateTaskInput {
    pub title: String,
    pub due_date: Option<String>,
    pub notes: Option<String>,
    pub completion_criteria: Option<String>,
}

/// Caller-facing input for partially updating a task
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskInput {
    pub title: Option<String>,
    pub progress: Option<i32>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<String>,
    pub notes: Option<String>,
    pub completion_criteria: Option<String>,
}

/// Ownership-enforcing task orchestrator
pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
}

impl TaskService {
    /// Creates a new service over a task store
    pub fn new(tasks: Arc<dyn TaskStore>) -> Self {
        Self { tasks }
    }

    /// Lists the caller's non-deleted tasks, newest first
    pub async fn list(&self, user_id: i64) -> ServiceResult<Vec<Task>> {
        Ok(self.tasks.list_by_user(user_id).await?)
    }

    /// Fetches one of the caller's tasks
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the task does not exist, is deleted, or is
    /// owned by a different user.
    pub async fn get(&self, user_id: i64, task_id: i64) -> ServiceResult<Task> {
        self.tasks
            .find_by_id_and_user(task_id, user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Task not found".to_string()))
    }

    /// Creates a task for the caller
    ///
    /// The title is trimmed before validation; progress starts at 0 and
    /// status at `pending`.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for an empty or over-length title, or an
    /// unparseable due date.
    pub async fn create(&self, user_id: i64, input: CreateTaskInput) -> ServiceResult<Task> {
        let title = validate_title(&input.title)?;
        let due_date = input.due_date.as_deref().map(parse_due_date).transpose()?;

        let task = self
            .tasks
            .create(
                user_id,
                CreateTask {
                    title,
                    due_date,
                    notes: input.notes,
                    completion_criteria: input.completion_criteria,
                },
            )
            .await?;

        info!(user_id, task_id = task.id, "Created task");

        Ok(task)
    }

    /// Partially updates one of the caller's tasks
    ///
    /// Absent fields are left unchanged. Ownership is verified before any
    /// field validation failure could reveal whether the task exists.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for missing, deleted, or foreign tasks, and
    /// `Validation` for an invalid title, progress, or due date.
    pub async fn update(
        &self,
        user_id: i64,
        task_id: i64,
        input: UpdateTaskInput,
    ) -> ServiceResult<Task> {
        // Ownership first, so foreign and nonexistent tasks are
        // indistinguishable regardless of payload validity
        let current = self.get(user_id, task_id).await?;

        let title = input.title.as_deref().map(validate_title).transpose()?;

        if let Some(progress) = input.progress {
            if !(0..=100).contains(&progress) {
                return Err(ServiceError::Validation(
                    "Progress must be between 0 and 100".to_string(),
                ));
            }
        }

        let due_date = input.due_date.as_deref().map(parse_due_date).transpose()?;

        let update = UpdateTask {
            title,
            progress: input.progress,
            status: input.status,
            due_date,
            notes: input.notes,
            completion_criteria: input.completion_criteria,
        };

        // A field-less update has nothing to write
        if update.is_empty() {
            return Ok(current);
        }

        let task = self
            .tasks
            .update(task_id, update)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Task not found".to_string()))?;

        info!(user_id, task_id, "Updated task");

        Ok(task)
    }

    /// Soft-deletes one of the caller's tasks
    ///
    /// A second delete of the same task fails with `NotFound`, since the
    /// first delete already hid it from ownership-scoped lookups.
    pub async fn delete(&self, user_id: i64, task_id: i64) -> ServiceResult<()> {
        self.get(user_id, task_id).await?;

        let deleted = self.tasks.soft_delete(task_id).await?;
        if !deleted {
            return Err(ServiceError::NotFound("Task not found".to_string()));
        }

        info!(user_id, task_id, "Soft-deleted task");

        Ok(())
    }
}

/// Trims and validates a task title
fn validate_title(title: &str) -> ServiceResult<String> {
    let trimmed = title.trim();

    if trimmed.is_empty() {
        return Err(ServiceError::Validation(
            "Title must not be empty".to_string(),
        ));
    }

    if trimmed.chars().count() > MAX_TITLE_CHARS {
        return Err(ServiceError::Validation(format!(
            "Title must be at most {} characters",
            MAX_TITLE_CHARS
        )));
    }

    Ok(trimmed.to_string())
}

/// Parses a due date from RFC 3339 or a bare `YYYY-MM-DD` calendar date
fn parse_due_date(raw: &str) -> Result<DateTime<Utc>, ServiceError> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| {
            ServiceError::Validation("Due date must be a valid calendar date".to_string())
        })
}
