/// Prompt store
///
/// Lookup of system-prompt templates for the AI coach. Active prompts are
/// returned most-recently-created first with the highest id breaking ties,
/// so "the" active prompt is always deterministic even if several rows are
/// flagged active at once.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::prompt::{CreatePrompt, Prompt};

/// Capability contract for prompt lookup
#[async_trait]
pub trait PromptStore: Send + Sync {
    /// Lists all prompts, newest-created-first
    async fn find_all(&self) -> Result<Vec<Prompt>, sqlx::Error>;

    /// Lists active prompts, newest-created-first (highest id on ties)
    async fn find_active(&self) -> Result<Vec<Prompt>, sqlx::Error>;

    /// Creates a new prompt
    async fn create(&self, data: CreatePrompt) -> Result<Prompt, sqlx::Error>;
}

/// PostgreSQL-backed prompt store
#[derive(Debug, Clone)]
pub struct PgPromptStore {
    pool: PgPool,
}

impl PgPromptStore {
    /// Creates a new store over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PromptStore for PgPromptStore {
    async fn find_all(&self) -> Result<Vec<Prompt>, sqlx::Error> {
        let prompts = sqlx::query_as::<_, Prompt>(
            r#"
            SELECT id, name, content, is_active, created_at, updated_at
            FROM prompts
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(prompts)
    }

    async fn find_active(&self) -> Result<Vec<Prompt>, sqlx::Error> {
        let prompts = sqlx::query_as::<_, Prompt>(
            r#"
            SELECT id, name, content, is_active, created_at, updated_at
            FROM prompts
            WHERE is_active = TRUE
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(prompts)
    }

    async fn create(&self, data: CreatePrompt) -> Result<Prompt, sqlx::Error> {
        let prompt = sqlx::query_as::<_, Prompt>(
            r#"
            INSERT INTO prompts (name, content, is_active)
            VALUES ($1, $2, $3)
            RETURNING id, name, content, is_active, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.content)
        .bind(data.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(prompt)
    }
}
