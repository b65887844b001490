/// AI comment store
///
/// Append-only persistence for the consultation log. There is deliberately
/// no update or delete operation here.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::ai_comment::AiComment;

/// Capability contract for consultation-log persistence
#[async_trait]
pub trait CommentStore: Send + Sync {
    /// Lists a task's comments, newest-created-first
    async fn list_by_task(&self, task_id: i64) -> Result<Vec<AiComment>, sqlx::Error>;

    /// Finds a comment by id
    async fn find_by_id(&self, id: i64) -> Result<Option<AiComment>, sqlx::Error>;

    /// Appends a new comment to a task's log
    async fn create(
        &self,
        task_id: i64,
        user_input: &str,
        ai_response: &str,
    ) -> Result<AiComment, sqlx::Error>;
}

/// PostgreSQL-backed comment store
#[derive(Debug, Clone)]
pub struct PgCommentStore {
    pool: PgPool,
}

impl PgCommentStore {
    /// Creates a new store over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentStore for PgCommentStore {
    async fn list_by_task(&self, task_id: i64) -> Result<Vec<AiComment>, sqlx::Error> {
        let comments = sqlx::query_as::<_, AiComment>(
            r#"
            SELECT id, task_id, user_input, ai_response, created_at, updated_at
            FROM ai_comments
            WHERE task_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(task_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<AiComment>, sqlx::Error> {
        let comment = sqlx::query_as::<_, AiComment>(
            r#"
            SELECT id, task_id, user_input, ai_response, created_at, updated_at
            FROM ai_comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn create(
        &self,
        task_id: i64,
        user_input: &str,
        ai_response: &str,
    ) -> Result<AiComment, sqlx::Error> {
        let comment = sqlx::query_as::<_, AiComment>(
            r#"
            INSERT INTO ai_comments (task_id, user_input, ai_response)
            VALUES ($1, $2, $3)
            RETURNING id, task_id, user_input, ai_response, created_at, updated_at
            "#,
        )
        .bind(task_id)
        .bind(user_input)
        .bind(ai_response)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }
}
