/// Business-rule orchestrators
///
/// Services sit between the route handlers and the record stores. Every
/// operation is identity-scoped: the caller's user id comes from a verified
/// credential, and ownership is re-checked against the store on each call,
/// never against cached state. All validation and ownership failures are
/// detected before any mutation or external call is made.
///
/// # Modules
///
/// - `auth`: [`AuthService`] - registration, login, credential verification
/// - `tasks`: [`TaskService`] - task lifecycle with ownership enforcement
/// - `coach`: [`CoachService`] - AI consultations and the consultation log

pub mod auth;
pub mod coach;
pub mod tasks;

pub use auth::AuthService;
pub use coach::CoachService;
pub use tasks::TaskService;

/// Service result type alias
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error taxonomy for the service layer
///
/// Two categories are deliberately merged: a task that exists but belongs
/// to another user is reported as `NotFound` (never `AccessDenied`), and
/// unknown-email and wrong-password logins both produce
/// `InvalidCredentials`. `AccessDenied` exists only for comment lookups,
/// where comment existence may be revealed but content may not.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Malformed or out-of-range input; recoverable by correcting it
    #[error("{0}")]
    Validation(String),

    /// Entity absent, soft-deleted, or not owned by the caller
    #[error("{0}")]
    NotFound(String),

    /// Entity exists but the caller does not own it (comments only)
    #[error("{0}")]
    AccessDenied(String),

    /// Email address is already registered
    #[error("This email address is already registered")]
    DuplicateEmail,

    /// Unknown email or wrong password (indistinguishable by design)
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Upstream AI generation failed; detail is logged, never exposed
    #[error("The AI coaching service is currently unavailable")]
    AiUnavailable,

    /// Record store failure
    #[error("Storage error: {0}")]
    Store(#[from] sqlx::Error),

    /// Unexpected internal failure (e.g., hashing)
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
