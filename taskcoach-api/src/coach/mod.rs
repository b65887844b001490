/// AI advice generation
///
/// This module defines the contract for generating coaching advice from a
/// task's context plus a user's free-text consultation, along with the
/// prompt-building and output-bounding rules shared by all generators.
///
/// # Generator Contract
///
/// All generators must:
/// 1. Implement the [`AdviceGenerator`] trait (async)
/// 2. Accept an [`AdviceRequest`] carrying task context, user input, and the
///    selected system prompt
/// 3. Return generated text, or a [`CoachError`] on any upstream failure
///
/// Upstream failure detail never reaches API callers; the consultation
/// service collapses every `CoachError` into a single opaque
/// service-unavailable error and the detail is only logged.
///
/// # Implementations
///
/// - [`OpenAiGenerator`]: production client for an OpenAI-compatible
///   chat-completions endpoint
/// - [`MockGenerator`]: deterministic generator for tests and local
///   development without an API key

pub mod mock;
pub mod openai;

pub use mock::MockGenerator;
pub use openai::OpenAiGenerator;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use taskcoach_shared::models::task::Task;

/// Maximum advice length persisted to the consultation log, in characters
pub const MAX_ADVICE_CHARS: usize = 500;

/// Ellipsis marker appended when advice is truncated
pub const TRUNCATION_MARKER: &str = "...";

/// System prompt used when no active prompt is configured
pub const FALLBACK_SYSTEM_PROMPT: &str = "You are an excellent task management coach. \
     Provide constructive advice about the user's task in 500 characters or less.";

/// Placeholder for task fields the user has not filled in
const UNSET: &str = "unset";

/// Error type for advice generation
#[derive(Debug, thiserror::Error)]
pub enum CoachError {
    /// The upstream endpoint rejected or failed the request
    #[error("Upstream generation failed: {0}")]
    Upstream(String),

    /// The request exceeded the configured timeout
    #[error("Generation request timed out")]
    Timeout,

    /// The upstream reply could not be decoded
    #[error("Invalid upstream response: {0}")]
    InvalidResponse(String),
}

/// Snapshot of the task fields embedded into an advice request
#[derive(Debug, Clone, PartialEq)]
pub struct TaskContext {
    /// Task title
    pub title: String,

    /// Progress percentage (0-100)
    pub progress: i32,

    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,

    /// Optional completion criteria
    pub completion_criteria: Option<String>,

    /// Optional notes
    pub notes: Option<String>,
}

impl From<&Task> for TaskContext {
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            progress: task.progress,
            due_date: task.due_date,
            completion_criteria: task.completion_criteria.clone(),
            notes: task.notes.clone(),
        }
    }
}

/// Bounded advice request handed to a generator
#[derive(Debug, Clone, PartialEq)]
pub struct AdviceRequest {
    /// Task the consultation is about
    pub task_id: i64,

    /// Trimmed user input (at most 500 characters, validated upstream)
    pub user_input: String,

    /// Task context snapshot
    pub context: TaskContext,

    /// Selected system prompt (active prompt or the built-in fallback)
    pub system_prompt: String,
}

/// Contract for advice generators
#[async_trait]
pub trait AdviceGenerator: Send + Sync {
    /// Generates advice text for a consultation request
    ///
    /// # Errors
    ///
    /// Returns a [`CoachError`] on any transport, timeout, or upstream
    /// failure. Implementations must not retry.
    async fn generate_advice(&self, request: &AdviceRequest) -> Result<String, CoachError>;
}

/// Builds the user-facing prompt embedding task context and consultation text
///
/// Unfilled task fields are rendered as an explicit "unset" marker so the
/// model never sees dangling labels.
pub fn build_user_prompt(request: &AdviceRequest) -> String {
    let context = &request.context;

    let due_date = context
        .due_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| UNSET.to_string());

    format!(
        "Task information:\n\
         - Title: {}\n\
         - Progress: {}%\n\
         - Due date: {}\n\
         - Completion criteria: {}\n\
         - Notes: {}\n\
         \n\
         Consultation: {}",
        context.title,
        context.progress,
        due_date,
        context.completion_criteria.as_deref().unwrap_or(UNSET),
        context.notes.as_deref().unwrap_or(UNSET),
        request.user_input,
    )
}

/// Bounds advice text to [`MAX_ADVICE_CHARS`] characters
///
/// Text over the limit is cut at the limit and suffixed with the ellipsis
/// marker; text at or under the limit is returned unmodified.
pub fn truncate_advice(advice: String) -> String {
    if advice.chars().count() > MAX_ADVICE_CHARS {
        let mut truncated: String = advice.chars().take(MAX_ADVICE_CHARS).collect();
        truncated.push_str(TRUNCATION_MARKER);
        truncated
    } else {
        advice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn request_with_context(context: TaskContext) -> AdviceRequest {
        AdviceRequest {
            task_id: 1,
            user_input: "How should I start?".to_string(),
            context,
            system_prompt: FALLBACK_SYSTEM_PROMPT.to_string(),
        }
    }

    #[test]
    fn test_build_user_prompt_full_context() {
        let request = request_with_context(TaskContext {
            title: "Write report".to_string(),
            progress: 40,
            due_date: Some(Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap()),
            completion_criteria: Some("Draft reviewed".to_string()),
            notes: Some("Focus on Q2 numbers".to_string()),
        });

        let prompt = build_user_prompt(&request);

        assert!(prompt.contains("- Title: Write report"));
        assert!(prompt.contains("- Progress: 40%"));
        assert!(prompt.contains("- Due date: 2025-07-01"));
        assert!(prompt.contains("- Completion criteria: Draft reviewed"));
        assert!(prompt.contains("- Notes: Focus on Q2 numbers"));
        assert!(prompt.contains("Consultation: How should I start?"));
    }

    #[test]
    fn test_build_user_prompt_unset_markers() {
        let request = request_with_context(TaskContext {
            title: "Bare task".to_string(),
            progress: 0,
            due_date: None,
            completion_criteria: None,
            notes: None,
        });

        let prompt = build_user_prompt(&request);

        assert!(prompt.contains("- Due date: unset"));
        assert!(prompt.contains("- Completion criteria: unset"));
        assert!(prompt.contains("- Notes: unset"));
    }

    #[test]
    fn test_truncate_advice_over_limit() {
        let advice = "a".repeat(600);
        let truncated = truncate_advice(advice);

        assert_eq!(truncated.chars().count(), MAX_ADVICE_CHARS + TRUNCATION_MARKER.len());
        assert!(truncated.ends_with(TRUNCATION_MARKER));
        assert!(truncated.starts_with("aaa"));
    }

    #[test]
    fn test_truncate_advice_at_limit() {
        let advice = "b".repeat(500);
        let truncated = truncate_advice(advice.clone());

        // Exactly at the limit passes through unmodified
        assert_eq!(truncated, advice);
    }

    #[test]
    fn test_truncate_advice_under_limit() {
        let advice = "short advice".to_string();
        assert_eq!(truncate_advice(advice.clone()), advice);
    }

    #[test]
    fn test_truncate_advice_counts_chars_not_bytes() {
        // 600 multibyte characters must still cut at 500 characters
        let advice = "あ".repeat(600);
        let truncated = truncate_advice(advice);

        assert_eq!(truncated.chars().count(), MAX_ADVICE_CHARS + TRUNCATION_MARKER.len());
        assert!(truncated.ends_with(TRUNCATION_MARKER));
    }
}
