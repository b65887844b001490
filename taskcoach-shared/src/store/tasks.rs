/// Task store
///
/// Ownership-scoped task queries. Every lookup that feeds an API operation
/// filters out soft-deleted rows, so a deleted task is indistinguishable
/// from a nonexistent one to callers.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::task::{CreateTask, Task, UpdateTask};

const TASK_COLUMNS: &str = "id, user_id, title, progress, status, due_date, notes, \
                            completion_criteria, created_at, updated_at";

/// Capability contract for task persistence
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Lists a user's non-deleted tasks, newest-created-first
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Task>, sqlx::Error>;

    /// Finds a non-deleted task by id, scoped to its owner
    ///
    /// Returns `None` when the task does not exist, is deleted, or belongs
    /// to a different user.
    async fn find_by_id_and_user(
        &self,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Task>, sqlx::Error>;

    /// Creates a new task (status `pending`, progress 0)
    async fn create(&self, user_id: i64, data: CreateTask) -> Result<Task, sqlx::Error>;

    /// Applies a partial update; `None` fields are left unchanged
    ///
    /// Returns `None` if no row with the given id exists.
    async fn update(&self, id: i64, data: UpdateTask) -> Result<Option<Task>, sqlx::Error>;

    /// Soft-deletes a task by transitioning its status to `deleted`
    ///
    /// Returns `false` if no row with the given id exists.
    async fn soft_delete(&self, id: i64) -> Result<bool, sqlx::Error>;
}

/// PostgreSQL-backed task store
#[derive(Debug, Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    /// Creates a new store over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Task>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            r#"
            SELECT {TASK_COLUMNS}
            FROM tasks
            WHERE user_id = $1 AND status <> 'deleted'
            ORDER BY created_at DESC, id DESC
            "#,
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn find_by_id_and_user(
        &self,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Task>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            SELECT {TASK_COLUMNS}
            FROM tasks
            WHERE id = $1 AND user_id = $2 AND status <> 'deleted'
            "#,
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn create(&self, user_id: i64, data: CreateTask) -> Result<Task, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            INSERT INTO tasks (user_id, title, due_date, notes, completion_criteria)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {TASK_COLUMNS}
            "#,
        ))
        .bind(user_id)
        .bind(data.title)
        .bind(data.due_date)
        .bind(data.notes)
        .bind(data.completion_criteria)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    async fn update(&self, id: i64, data: UpdateTask) -> Result<Option<Task>, sqlx::Error> {
        // Build the SET clause from the fields that are present
        let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
        let mut bind_count = 1;

        if data.title.is_some() {
            bind_count += 1;
            query.push_str(&format!(", title = ${}", bind_count));
        }
        if data.progress.is_some() {
            bind_count += 1;
            query.push_str(&format!(", progress = ${}", bind_count));
        }
        if data.status.is_some() {
            bind_count += 1;
            query.push_str(&format!(", status = ${}", bind_count));
        }
        if data.due_date.is_some() {
            bind_count += 1;
            query.push_str(&format!(", due_date = ${}", bind_count));
        }
        if data.notes.is_some() {
            bind_count += 1;
            query.push_str(&format!(", notes = ${}", bind_count));
        }
        if data.completion_criteria.is_some() {
            bind_count += 1;
            query.push_str(&format!(", completion_criteria = ${}", bind_count));
        }

        query.push_str(&format!(" WHERE id = $1 RETURNING {TASK_COLUMNS}"));

        let mut q = sqlx::query_as::<_, Task>(&query).bind(id);

        if let Some(title) = data.title {
            q = q.bind(title);
        }
        if let Some(progress) = data.progress {
            q = q.bind(progress);
        }
        if let Some(status) = data.status {
            q = q.bind(status);
        }
        if let Some(due_date) = data.due_date {
            q = q.bind(due_date);
        }
        if let Some(notes) = data.notes {
            q = q.bind(notes);
        }
        if let Some(criteria) = data.completion_criteria {
            q = q.bind(criteria);
        }

        let task = q.fetch_optional(&self.pool).await?;

        Ok(task)
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET status = 'deleted',
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
