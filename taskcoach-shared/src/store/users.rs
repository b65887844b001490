/// User store
///
/// Lookup and creation of user accounts. Emails are unique via a
/// case-insensitive constraint; a duplicate insert surfaces as a database
/// constraint violation, which callers pre-empt with `find_by_email`.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User};

/// Capability contract for user persistence
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Finds a user by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error>;

    /// Finds a user by id
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, sqlx::Error>;

    /// Creates a new user
    async fn create(&self, data: CreateUser) -> Result<User, sqlx::Error>;
}

/// PostgreSQL-backed user store
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    /// Creates a new store over the given pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn create(&self, data: CreateUser) -> Result<User, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at, updated_at
            "#,
        )
        .bind(data.email)
        .bind(data.password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}
