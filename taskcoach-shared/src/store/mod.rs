/// Record store contracts and PostgreSQL implementations
///
/// Every collaborator the service layer depends on is behind an async
/// capability trait, so orchestrators can be exercised against in-memory
/// doubles without a database. Each trait has exactly one production
/// implementation backed by `sqlx::PgPool`.
///
/// # Modules
///
/// - `users`: [`UserStore`] / [`PgUserStore`]
/// - `tasks`: [`TaskStore`] / [`PgTaskStore`]
/// - `comments`: [`CommentStore`] / [`PgCommentStore`]
/// - `prompts`: [`PromptStore`] / [`PgPromptStore`]

pub mod comments;
pub mod prompts;
pub mod tasks;
pub mod users;

pub use comments::{CommentStore, PgCommentStore};
pub use prompts::{PgPromptStore, PromptStore};
pub use tasks::{PgTaskStore, TaskStore};
pub use users::{PgUserStore, UserStore};
