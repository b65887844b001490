/// Database models for TaskCoach
///
/// # Models
///
/// - `user`: User accounts
/// - `task`: User-owned tasks with soft-delete status
/// - `ai_comment`: Append-only AI consultation log entries
/// - `prompt`: System-prompt templates for the AI coach

pub mod ai_comment;
pub mod prompt;
pub mod task;
pub mod user;
