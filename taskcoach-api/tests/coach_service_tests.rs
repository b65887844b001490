/// Integration tests for the consultation service
///
/// Exercised against in-memory stores and the mock advice generator. The
/// generator records every request, so these tests can assert not only
/// what was generated but that nothing was generated (and nothing
/// persisted) when validation or ownership checks fail.

mod common;

use common::{coach_harness, seed_task};
use taskcoach_api::coach::{MockGenerator, FALLBACK_SYSTEM_PROMPT};
use taskcoach_api::services::ServiceError;
use taskcoach_shared::models::prompt::CreatePrompt;
use taskcoach_shared::store::{PromptStore, TaskStore};

const ALICE: i64 = 1;
const BOB: i64 = 2;

#[tokio::test]
async fn test_consult_appends_to_log() {
    let harness = coach_harness(MockGenerator::with_response("Start with a 10-minute draft."));
    let task = seed_task(&harness.tasks, ALICE, "Write report").await;

    let comment = harness
        .service
        .consult(ALICE, task.id, "  Where do I start?  ")
        .await
        .unwrap();

    assert_eq!(comment.task_id, task.id);
    assert_eq!(comment.user_input, "Where do I start?");
    assert_eq!(comment.ai_response, "Start with a 10-minute draft.");
    assert_eq!(harness.comments.comment_count(), 1);
}

#[tokio::test]
async fn test_consult_uses_fallback_prompt_when_none_active() {
    let harness = coach_harness(MockGenerator::new());
    let task = seed_task(&harness.tasks, ALICE, "Write report").await;

    harness.service.consult(ALICE, task.id, "Help me plan").await.unwrap();

    let request = harness.generator.last_request().unwrap();
    assert_eq!(request.system_prompt, FALLBACK_SYSTEM_PROMPT);
    assert_eq!(request.context.title, "Write report");
}

#[tokio::test]
async fn test_consult_uses_active_prompt() {
    let harness = coach_harness(MockGenerator::new());
    let task = seed_task(&harness.tasks, ALICE, "Write report").await;

    harness
        .prompts
        .create(CreatePrompt {
            name: "Inactive".to_string(),
            content: "Never selected".to_string(),
            is_active: false,
        })
        .await
        .unwrap();
    harness
        .prompts
        .create(CreatePrompt {
            name: "Stern coach".to_string(),
            content: "Be direct and brief.".to_string(),
            is_active: true,
        })
        .await
        .unwrap();

    harness.service.consult(ALICE, task.id, "Help me plan").await.unwrap();

    let request = harness.generator.last_request().unwrap();
    assert_eq!(request.system_prompt, "Be direct and brief.");
}

#[tokio::test]
async fn test_consult_prefers_newest_active_prompt() {
    let harness = coach_harness(MockGenerator::new());
    let task = seed_task(&harness.tasks, ALICE, "Write report").await;

    harness
        .prompts
        .create(CreatePrompt {
            name: "Older".to_string(),
            content: "Older prompt".to_string(),
            is_active: true,
        })
        .await
        .unwrap();
    harness
        .prompts
        .create(CreatePrompt {
            name: "Newer".to_string(),
            content: "Newer prompt".to_string(),
            is_active: true,
        })
        .await
        .unwrap();

    harness.service.consult(ALICE, task.id, "Help").await.unwrap();

    let request = harness.generator.last_request().unwrap();
    assert_eq!(request.system_prompt, "Newer prompt");
}

#[tokio::test]
async fn test_consult_rejects_empty_input_without_generating() {
    let harness = coach_harness(MockGenerator::new());
    let task = seed_task(&harness.tasks, ALICE, "Write report").await;

    let result = harness.service.consult(ALICE, task.id, "   ").await;

    assert!(matches!(result, Err(ServiceError::Validation(_))));
    assert_eq!(harness.generator.call_count(), 0);
    assert_eq!(harness.comments.comment_count(), 0);
}

#[tokio::test]
async fn test_consult_input_length_boundary() {
    let harness = coach_harness(MockGenerator::new());
    let task = seed_task(&harness.tasks, ALICE, "Write report").await;

    // Exactly 500 characters is accepted
    let at_limit = "x".repeat(500);
    assert!(harness.service.consult(ALICE, task.id, &at_limit).await.is_ok());

    // 501 characters is rejected before anything happens
    let over = "x".repeat(501);
    let result = harness.service.consult(ALICE, task.id, &over).await;

    assert!(matches!(result, Err(ServiceError::Validation(_))));
    assert_eq!(harness.generator.call_count(), 1);
    assert_eq!(harness.comments.comment_count(), 1);
}

#[tokio::test]
async fn test_consult_bounds_raw_input_before_trimming() {
    let harness = coach_harness(MockGenerator::new());
    let task = seed_task(&harness.tasks, ALICE, "Write report").await;

    // 500 payload characters plus trailing whitespace is 501 raw characters,
    // over the bound even though it would trim back down to 500
    let padded = format!("{} ", "x".repeat(500));
    let result = harness.service.consult(ALICE, task.id, &padded).await;

    assert!(matches!(result, Err(ServiceError::Validation(_))));
    assert_eq!(harness.generator.call_count(), 0);
    assert_eq!(harness.comments.comment_count(), 0);
}

#[tokio::test]
async fn test_consult_foreign_task_not_found_without_generating() {
    let harness = coach_harness(MockGenerator::new());
    let task = seed_task(&harness.tasks, ALICE, "Alice task").await;

    let result = harness.service.consult(BOB, task.id, "Help me").await;

    assert!(matches!(result, Err(ServiceError::NotFound(_))));
    assert_eq!(harness.generator.call_count(), 0);
    assert_eq!(harness.comments.comment_count(), 0);
}

#[tokio::test]
async fn test_consult_deleted_task_not_found() {
    let harness = coach_harness(MockGenerator::new());
    let task = seed_task(&harness.tasks, ALICE, "Doomed task").await;

    harness.tasks.soft_delete(task.id).await.unwrap();

    let result = harness.service.consult(ALICE, task.id, "Help me").await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
    assert_eq!(harness.generator.call_count(), 0);
}

#[tokio::test]
async fn test_generation_failure_persists_nothing() {
    let harness = coach_harness(MockGenerator::failing());
    let task = seed_task(&harness.tasks, ALICE, "Write report").await;

    let result = harness.service.consult(ALICE, task.id, "Help me").await;

    assert!(matches!(result, Err(ServiceError::AiUnavailable)));
    assert_eq!(harness.generator.call_count(), 1);
    assert_eq!(harness.comments.comment_count(), 0);
}

#[tokio::test]
async fn test_long_advice_is_truncated_with_ellipsis() {
    let harness = coach_harness(MockGenerator::with_response("a".repeat(600)));
    let task = seed_task(&harness.tasks, ALICE, "Write report").await;

    let comment = harness.service.consult(ALICE, task.id, "Help me").await.unwrap();

    assert_eq!(comment.ai_response.chars().count(), 503);
    assert!(comment.ai_response.ends_with("..."));
}

#[tokio::test]
async fn test_advice_at_limit_is_stored_verbatim() {
    let advice = "b".repeat(500);
    let harness = coach_harness(MockGenerator::with_response(advice.clone()));
    let task = seed_task(&harness.tasks, ALICE, "Write report").await;

    let comment = harness.service.consult(ALICE, task.id, "Help me").await.unwrap();

    assert_eq!(comment.ai_response, advice);
}

#[tokio::test]
async fn test_list_comments_newest_first() {
    let harness = coach_harness(MockGenerator::new());
    let task = seed_task(&harness.tasks, ALICE, "Write report").await;

    harness.service.consult(ALICE, task.id, "First question").await.unwrap();
    harness.service.consult(ALICE, task.id, "Second question").await.unwrap();

    let comments = harness.service.list_comments(ALICE, task.id).await.unwrap();

    assert_eq!(comments.len(), 2);
    assert!(comments[0].id > comments[1].id);
}

#[tokio::test]
async fn test_list_comments_foreign_task_not_found() {
    let harness = coach_harness(MockGenerator::new());
    let task = seed_task(&harness.tasks, ALICE, "Alice task").await;

    harness.service.consult(ALICE, task.id, "Help").await.unwrap();

    let result = harness.service.list_comments(BOB, task.id).await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn test_get_comment_missing_is_not_found() {
    let harness = coach_harness(MockGenerator::new());

    let result = harness.service.get_comment(ALICE, 42).await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn test_get_comment_foreign_task_is_denied() {
    let harness = coach_harness(MockGenerator::new());
    let task = seed_task(&harness.tasks, ALICE, "Alice task").await;

    let comment = harness.service.consult(ALICE, task.id, "Help").await.unwrap();

    // Bob learns the comment exists but never sees its content
    let result = harness.service.get_comment(BOB, comment.id).await;
    assert!(matches!(result, Err(ServiceError::AccessDenied(_))));

    let owned = harness.service.get_comment(ALICE, comment.id).await.unwrap();
    assert_eq!(owned.id, comment.id);
}
