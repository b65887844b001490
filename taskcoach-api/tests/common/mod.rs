//! Common test utilities for service-level integration tests
//!
//! Provides in-memory implementations of the record-store traits so the
//! orchestrators can be exercised end-to-end without a database, plus
//! builders wiring them into services. Not every test binary uses every
//! helper.

#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use taskcoach_api::coach::{AdviceGenerator, MockGenerator};
use taskcoach_api::services::{AuthService, CoachService, TaskService};
use taskcoach_shared::models::ai_comment::AiComment;
use taskcoach_shared::models::prompt::{CreatePrompt, Prompt};
use taskcoach_shared::models::task::{CreateTask, Task, TaskStatus, UpdateTask};
use taskcoach_shared::models::user::{CreateUser, User};
use taskcoach_shared::store::{CommentStore, PromptStore, TaskStore, UserStore};

/// Signing secret used by every auth test (>= 32 bytes)
pub const JWT_SECRET: &str = "integration-test-secret-key-0123456789abcdef";

/// In-memory user store
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, data: CreateUser) -> Result<User, sqlx::Error> {
        let now = Utc::now();
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            email: data.email,
            password_hash: data.password_hash,
            created_at: now,
            updated_at: now,
        };
        self.users.lock().unwrap().push(user.clone());
        Ok(user)
    }
}

/// In-memory task store with soft-delete semantics
#[derive(Default)]
pub struct InMemoryTaskStore {
    tasks: Mutex<Vec<Task>>,
    next_id: AtomicI64,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self {
            tasks: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Raw row lookup, ignoring deletion status (for asserting soft deletes)
    pub fn raw_task(&self, id: i64) -> Option<Task> {
        self.tasks.lock().unwrap().iter().find(|t| t.id == id).cloned()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn list_by_user(&self, user_id: i64) -> Result<Vec<Task>, sqlx::Error> {
        let tasks = self.tasks.lock().unwrap();
        let mut owned: Vec<Task> = tasks
            .iter()
            .filter(|t| t.user_id == user_id && !t.status.is_deleted())
            .cloned()
            .collect();
        owned.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(owned)
    }

    async fn find_by_id_and_user(
        &self,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Task>, sqlx::Error> {
        let tasks = self.tasks.lock().unwrap();
        Ok(tasks
            .iter()
            .find(|t| t.id == id && t.user_id == user_id && !t.status.is_deleted())
            .cloned())
    }

    async fn create(&self, user_id: i64, data: CreateTask) -> Result<Task, sqlx::Error> {
        let now = Utc::now();
        let task = Task {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            user_id,
            title: data.title,
            progress: 0,
            status: TaskStatus::Pending,
            due_date: data.due_date,
            notes: data.notes,
            completion_criteria: data.completion_criteria,
            created_at: now,
            updated_at: now,
        };
        self.tasks.lock().unwrap().push(task.clone());
        Ok(task)
    }

    async fn update(&self, id: i64, data: UpdateTask) -> Result<Option<Task>, sqlx::Error> {
        let mut tasks = self.tasks.lock().unwrap();
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        if let Some(title) = data.title {
            task.title = title;
        }
        if let Some(progress) = data.progress {
            task.progress = progress;
        }
        if let Some(status) = data.status {
            task.status = status;
        }
        if let Some(due_date) = data.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(notes) = data.notes {
            task.notes = Some(notes);
        }
        if let Some(criteria) = data.completion_criteria {
            task.completion_criteria = Some(criteria);
        }
        task.updated_at = Utc::now();

        Ok(Some(task.clone()))
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, sqlx::Error> {
        let mut tasks = self.tasks.lock().unwrap();
        match tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.status = TaskStatus::Deleted;
                task.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// In-memory append-only comment store
#[derive(Default)]
pub struct InMemoryCommentStore {
    comments: Mutex<Vec<AiComment>>,
    next_id: AtomicI64,
}

impl InMemoryCommentStore {
    pub fn new() -> Self {
        Self {
            comments: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn comment_count(&self) -> usize {
        self.comments.lock().unwrap().len()
    }
}

#[async_trait]
impl CommentStore for InMemoryCommentStore {
    async fn list_by_task(&self, task_id: i64) -> Result<Vec<AiComment>, sqlx::Error> {
        let comments = self.comments.lock().unwrap();
        let mut entries: Vec<AiComment> = comments
            .iter()
            .filter(|c| c.task_id == task_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(entries)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<AiComment>, sqlx::Error> {
        let comments = self.comments.lock().unwrap();
        Ok(comments.iter().find(|c| c.id == id).cloned())
    }

    async fn create(
        &self,
        task_id: i64,
        user_input: &str,
        ai_response: &str,
    ) -> Result<AiComment, sqlx::Error> {
        let now = Utc::now();
        let comment = AiComment {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            task_id,
            user_input: user_input.to_string(),
            ai_response: ai_response.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.comments.lock().unwrap().push(comment.clone());
        Ok(comment)
    }
}

/// In-memory prompt store
#[derive(Default)]
pub struct InMemoryPromptStore {
    prompts: Mutex<Vec<Prompt>>,
    next_id: AtomicI64,
}

impl InMemoryPromptStore {
    pub fn new() -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl PromptStore for InMemoryPromptStore {
    async fn find_all(&self) -> Result<Vec<Prompt>, sqlx::Error> {
        let prompts = self.prompts.lock().unwrap();
        let mut all: Vec<Prompt> = prompts.iter().cloned().collect();
        all.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(all)
    }

    async fn find_active(&self) -> Result<Vec<Prompt>, sqlx::Error> {
        let mut active: Vec<Prompt> = self
            .prompts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.is_active)
            .cloned()
            .collect();
        active.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(active)
    }

    async fn create(&self, data: CreatePrompt) -> Result<Prompt, sqlx::Error> {
        let now = Utc::now();
        let prompt = Prompt {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: data.name,
            content: data.content,
            is_active: data.is_active,
            created_at: now,
            updated_at: now,
        };
        self.prompts.lock().unwrap().push(prompt.clone());
        Ok(prompt)
    }
}

/// Builds an auth service over a fresh in-memory user store
pub fn auth_service() -> (AuthService, Arc<InMemoryUserStore>) {
    let users = Arc::new(InMemoryUserStore::new());
    (AuthService::new(users.clone(), JWT_SECRET), users)
}

/// Builds a task service over a fresh in-memory task store
pub fn task_service() -> (TaskService, Arc<InMemoryTaskStore>) {
    let tasks = Arc::new(InMemoryTaskStore::new());
    (TaskService::new(tasks.clone()), tasks)
}

/// Consultation service plus handles to everything it is wired to
pub struct CoachHarness {
    pub service: CoachService,
    pub tasks: Arc<InMemoryTaskStore>,
    pub comments: Arc<InMemoryCommentStore>,
    pub prompts: Arc<InMemoryPromptStore>,
    pub generator: Arc<MockGenerator>,
}

/// Builds a consultation service around the given mock generator
pub fn coach_harness(generator: MockGenerator) -> CoachHarness {
    let tasks = Arc::new(InMemoryTaskStore::new());
    let comments = Arc::new(InMemoryCommentStore::new());
    let prompts = Arc::new(InMemoryPromptStore::new());
    let generator = Arc::new(generator);

    let service = CoachService::new(
        tasks.clone(),
        comments.clone(),
        prompts.clone(),
        generator.clone() as Arc<dyn AdviceGenerator>,
    );

    CoachHarness {
        service,
        tasks,
        comments,
        prompts,
        generator,
    }
}

/// Seeds a pending task owned by the given user
pub async fn seed_task(store: &InMemoryTaskStore, user_id: i64, title: &str) -> Task {
    store
        .create(
            user_id,
            CreateTask {
                title: title.to_string(),
                due_date: None,
                notes: None,
                completion_criteria: None,
            },
        )
        .await
        .unwrap()
}
