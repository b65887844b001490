/// System-prompt template model
///
/// Prompts steer the AI coach's tone and behavior. Consumers treat the most
/// recently created active prompt as "the" active prompt; when several share
/// a creation timestamp the highest id wins, so selection is deterministic.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE prompts (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(100) NOT NULL,
///     content TEXT NOT NULL,
///     is_active BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Named system-prompt template
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Prompt {
    /// Unique prompt id
    pub id: i64,

    /// Human-readable name
    pub name: String,

    /// System prompt text sent to the AI endpoint
    pub content: String,

    /// Whether this prompt is eligible for selection
    pub is_active: bool,

    /// When the prompt was created
    pub created_at: DateTime<Utc>,

    /// When the prompt was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new prompt
#[derive(Debug, Clone)]
pub struct CreatePrompt {
    /// Human-readable name
    pub name: String,

    /// System prompt text
    pub content: String,

    /// Whether the prompt starts out active
    pub is_active: bool,
}
