/// Application state and router builder
///
/// This module defines the shared application state and provides a function
/// to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskcoach_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config)?;
/// let app = taskcoach_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use taskcoach_shared::auth::middleware::{bearer_token, AuthError};
use taskcoach_shared::store::{PgCommentStore, PgPromptStore, PgTaskStore, PgUserStore};

use crate::coach::{AdviceGenerator, OpenAiGenerator};
use crate::config::Config;
use crate::error::ApiError;
use crate::services::{AuthService, CoachService, TaskService};

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. Services
/// are behind `Arc`, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Credential and account service
    pub auth: Arc<AuthService>,

    /// Task lifecycle service
    pub tasks: Arc<TaskService>,

    /// Consultation service
    pub coach: Arc<CoachService>,
}

impl AppState {
    /// Creates application state with production wiring
    ///
    /// Stores are PostgreSQL-backed and advice generation goes to the
    /// configured OpenAI-compatible endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the AI HTTP client cannot be constructed.
    pub fn new(db: PgPool, config: Config) -> anyhow::Result<Self> {
        let generator: Arc<dyn AdviceGenerator> =
            Arc::new(OpenAiGenerator::new(config.ai.clone())?);

        Ok(Self::with_generator(db, config, generator))
    }

    /// Creates application state with a caller-supplied advice generator
    ///
    /// Used by tests and local development to swap in a mock generator
    /// without an API key.
    pub fn with_generator(
        db: PgPool,
        config: Config,
        generator: Arc<dyn AdviceGenerator>,
    ) -> Self {
        let users = Arc::new(PgUserStore::new(db.clone()));
        let tasks = Arc::new(PgTaskStore::new(db.clone()));
        let comments = Arc::new(PgCommentStore::new(db.clone()));
        let prompts = Arc::new(PgPromptStore::new(db.clone()));

        let auth = Arc::new(AuthService::new(users, config.jwt.secret.clone()));
        let task_service = Arc::new(TaskService::new(tasks.clone()));
        let coach = Arc::new(CoachService::new(tasks, comments, prompts, generator));

        Self {
            db,
            config: Arc::new(config),
            auth,
            tasks: task_service,
            coach,
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                        # Health check (public)
/// └── /api/
///     ├── /auth/                     # Public
///     │   ├── POST /register
///     │   └── POST /login
///     ├── /tasks                     # Authenticated
///     │   ├── GET    /               # List own tasks
///     │   ├── POST   /               # Create task (201)
///     │   ├── GET    /:id
///     │   ├── PUT    /:id            # Partial update
///     │   ├── DELETE /:id            # Soft delete
///     │   ├── POST   /:id/consult    # AI consultation (201)
///     │   └── GET    /:id/comments   # Consultation log
///     └── /ai-comments/:id           # Authenticated comment lookup
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Authentication (per-route group)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public, no auth required)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    // Everything below requires a verified credential
    let task_routes = Router::new()
        .route("/", get(routes::tasks::list_tasks).post(routes::tasks::create_task))
        .route(
            "/:id",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .route("/:id/consult", post(routes::comments::consult))
        .route("/:id/comments", get(routes::comments::list_comments));

    let comment_routes = Router::new().route("/:id", get(routes::comments::get_comment));

    let protected_routes = Router::new()
        .nest("/tasks", task_routes)
        .nest("/ai-comments", comment_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .merge(protected_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Credential verification middleware layer
///
/// Extracts the bearer token from the Authorization header, resolves it to
/// a user through the auth service, and injects [`AuthContext`] into the
/// request extensions. Expired, malformed, badly-signed, and unknown-user
/// tokens are all rejected with the same 401.
async fn jwt_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())
        .map_err(|e| match e {
            AuthError::MissingCredentials => {
                ApiError::Unauthorized("Missing authorization header".to_string())
            }
            AuthError::InvalidFormat(msg) => ApiError::BadRequest(msg),
            AuthError::InvalidToken(msg) => ApiError::Unauthorized(msg),
        })?
        .to_string();

    let auth_context = state
        .auth
        .verify_token(&token)
        .await
        .ok_or_else(|| ApiError::Unauthorized("Invalid or expired credential".to_string()))?;

    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}
