/// Consultation service
///
/// Orchestrates AI coaching consultations against a task and the read side
/// of the consultation log. A consultation validates the input, verifies
/// task ownership, selects the active system prompt (falling back to the
/// built-in one), calls the advice generator, bounds the reply, and only
/// then appends an entry to the log. A generation failure persists nothing.
///
/// # Access Model
///
/// Consultations and comment listings are scoped through the owning task,
/// so a foreign task reads as not found. Direct comment lookup is the one
/// place existence may be revealed without content: a comment whose owning
/// task belongs to someone else is denied, not hidden.

use std::sync::Arc;

use tracing::{error, info, warn};

use taskcoach_shared::models::ai_comment::AiComment;
use taskcoach_shared::store::{CommentStore, PromptStore, TaskStore};

use crate::coach::{
    truncate_advice, AdviceGenerator, AdviceRequest, TaskContext, FALLBACK_SYSTEM_PROMPT,
};

use super::{ServiceError, ServiceResult};

/// Maximum consultation input length, in characters
pub const MAX_INPUT_CHARS: usize = 500;

/// Consultation orchestrator
pub struct CoachService {
    tasks: Arc<dyn TaskStore>,
    comments: Arc<dyn CommentStore>,
    prompts: Arc<dyn PromptStore>,
    generator: Arc<dyn AdviceGenerator>,
}

impl CoachService {
    /// Creates a new service over the stores and an advice generator
    pub fn new(
        tasks: Arc<dyn TaskStore>,
        comments: Arc<dyn CommentStore>,
        prompts: Arc<dyn PromptStore>,
        generator: Arc<dyn AdviceGenerator>,
    ) -> Self {
        Self {
            tasks,
            comments,
            prompts,
            generator,
        }
    }

    /// Runs a consultation against one of the caller's tasks
    ///
    /// Validation and ownership are checked before the generator is
    /// invoked, so an invalid or foreign consultation never costs an
    /// upstream call and never writes to the log.
    ///
    /// # Errors
    ///
    /// - `Validation` for empty or over-length input
    /// - `NotFound` for a missing, deleted, or foreign task
    /// - `AiUnavailable` when generation fails (detail is logged only)
    pub async fn consult(
        &self,
        user_id: i64,
        task_id: i64,
        user_input: &str,
    ) -> ServiceResult<AiComment> {
        // Length is bounded on the raw input, before trimming
        if user_input.chars().count() > MAX_INPUT_CHARS {
            return Err(ServiceError::Validation(format!(
                "Consultation text must be at most {} characters",
                MAX_INPUT_CHARS
            )));
        }

        let user_input = user_input.trim();

        if user_input.is_empty() {
            return Err(ServiceError::Validation(
                "Consultation text must not be empty".to_string(),
            ));
        }

        let task = self
            .tasks
            .find_by_id_and_user(task_id, user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Task not found".to_string()))?;

        let system_prompt = self.select_system_prompt().await?;

        let request = AdviceRequest {
            task_id: task.id,
            user_input: user_input.to_string(),
            context: TaskContext::from(&task),
            system_prompt,
        };

        let advice = self.generator.generate_advice(&request).await.map_err(|e| {
            error!(user_id, task_id, "Advice generation failed: {}", e);
            ServiceError::AiUnavailable
        })?;

        let advice = truncate_advice(advice);

        let comment = self.comments.create(task.id, user_input, &advice).await?;

        info!(user_id, task_id, comment_id = comment.id, "Recorded consultation");

        Ok(comment)
    }

    /// Lists the consultation log of one of the caller's tasks, newest first
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a missing, deleted, or foreign task.
    pub async fn list_comments(&self, user_id: i64, task_id: i64) -> ServiceResult<Vec<AiComment>> {
        self.tasks
            .find_by_id_and_user(task_id, user_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Task not found".to_string()))?;

        Ok(self.comments.list_by_task(task_id).await?)
    }

    /// Fetches a single consultation entry by id
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no such comment exists, and `AccessDenied` if
    /// the comment exists but its owning task is not the caller's.
    pub async fn get_comment(&self, user_id: i64, comment_id: i64) -> ServiceResult<AiComment> {
        let comment = self
            .comments
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Comment not found".to_string()))?;

        let owned = self
            .tasks
            .find_by_id_and_user(comment.task_id, user_id)
            .await?
            .is_some();

        if !owned {
            return Err(ServiceError::AccessDenied(
                "You do not have access to this comment".to_string(),
            ));
        }

        Ok(comment)
    }

    /// Selects the system prompt: the active prompt, or the built-in
    /// fallback when none is configured
    async fn select_system_prompt(&self) -> ServiceResult<String> {
        let active = self.prompts.find_active().await?;

        match active.into_iter().next() {
            Some(prompt) => Ok(prompt.content),
            None => {
                warn!("No active prompt configured, using built-in fallback");
                Ok(FALLBACK_SYSTEM_PROMPT.to_string())
            }
        }
    }
}
