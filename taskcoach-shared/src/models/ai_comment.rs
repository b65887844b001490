/// AI consultation comment model
///
/// Each comment records one user-input/AI-response pair for a task. The log
/// is append-only: comments are never edited or deleted through the API.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE ai_comments (
///     id BIGSERIAL PRIMARY KEY,
///     task_id BIGINT NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
///     user_input VARCHAR(500) NOT NULL,
///     ai_response TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of a task's consultation log
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AiComment {
    /// Unique comment id
    pub id: i64,

    /// Task this comment belongs to
    pub task_id: i64,

    /// Trimmed user input (at most 500 characters)
    pub user_input: String,

    /// AI-generated advice (truncated to 500 characters at persistence)
    pub ai_response: String,

    /// When the comment was created
    pub created_at: DateTime<Utc>,

    /// When the comment was last updated
    pub updated_at: DateTime<Utc>,
}
