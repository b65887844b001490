//! # TaskCoach API Server
//!
//! Personal task-tracking service with AI coaching consultations.
//!
//! The server is built with Axum and provides:
//! - Registration and login with 24-hour bearer credentials
//! - Ownership-scoped task CRUD with soft deletion
//! - AI consultations against a task, appended to a consultation log
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p taskcoach-api
//! ```

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use taskcoach_api::{
    app::{build_router, AppState},
    coach::FALLBACK_SYSTEM_PROMPT,
    config::Config,
};
use taskcoach_shared::db::{migrations::run_migrations, pool};
use taskcoach_shared::models::prompt::CreatePrompt;
use taskcoach_shared::store::{PgPromptStore, PromptStore};

/// Name of the prompt seeded on first startup
const DEFAULT_PROMPT_NAME: &str = "Default Coach Prompt";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskcoach_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "TaskCoach API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    let pool = pool::create_pool(pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    run_migrations(&pool).await?;

    seed_default_prompt(&pool).await?;

    let bind_address = config.bind_address();
    let state = AppState::new(pool, config)?;
    let app = build_router(state);

    tracing::info!("Server listening on http://{}", bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Seeds the default active system prompt if no prompts exist yet
///
/// Runs once per empty database; existing prompts are never touched, so
/// operator-managed prompt sets survive restarts.
async fn seed_default_prompt(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let prompts: Arc<dyn PromptStore> = Arc::new(PgPromptStore::new(pool.clone()));

    if prompts.find_all().await?.is_empty() {
        prompts
            .create(CreatePrompt {
                name: DEFAULT_PROMPT_NAME.to_string(),
                content: FALLBACK_SYSTEM_PROMPT.to_string(),
                is_active: true,
            })
            .await?;

        tracing::info!("Seeded default coaching prompt");
    }

    Ok(())
}
