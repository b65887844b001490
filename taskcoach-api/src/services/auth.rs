/// Authentication service
///
/// Issues and verifies session credentials and manages the registration /
/// login flows. Credentials are 24-hour HS256 bearer tokens bound to a user
/// id; the signing secret is process configuration and its absence is a
/// fatal startup condition, never a per-request error.
///
/// # Enumeration Hardening
///
/// `login` returns the same `InvalidCredentials` error whether the email is
/// unknown or the password is wrong, so responses never reveal which
/// accounts exist. `verify_token` likewise collapses malformed, expired,
/// badly-signed, and unknown-user tokens into a single `None`.

use std::sync::Arc;

use tracing::{debug, info};

use taskcoach_shared::auth::jwt::{create_token, validate_token, Claims};
use taskcoach_shared::auth::middleware::AuthContext;
use taskcoach_shared::auth::password::{hash_password, verify_password};
use taskcoach_shared::models::user::CreateUser;
use taskcoach_shared::store::UserStore;

use super::{ServiceError, ServiceResult};

/// Result of a successful registration or login
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Signed bearer credential, valid for 24 hours
    pub token: String,

    /// Authenticated user id
    pub user_id: i64,

    /// Authenticated user email
    pub email: String,
}

/// Credential and account orchestrator
pub struct AuthService {
    users: Arc<dyn UserStore>,
    jwt_secret: String,
}

impl AuthService {
    /// Creates a new service over a user store and signing secret
    pub fn new(users: Arc<dyn UserStore>, jwt_secret: impl Into<String>) -> Self {
        Self {
            users,
            jwt_secret: jwt_secret.into(),
        }
    }

    /// Registers a new user and returns a fresh session
    ///
    /// The password is hashed with Argon2id before persistence; the
    /// plaintext never reaches the store.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateEmail` if the email is already registered.
    pub async fn register(&self, email: &str, password: &str) -> ServiceResult<AuthSession> {
        let email = email.trim().to_lowercase();

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::DuplicateEmail);
        }

        let password_hash =
            hash_password(password).map_err(|e| ServiceError::Internal(e.into()))?;

        let user = self
            .users
            .create(CreateUser {
                email,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, "Registered new user");

        self.issue_session(user.id, user.email)
    }

    /// Authenticates a user and returns a fresh session
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredentials` if the email is unknown OR the password
    /// does not match. The two cases are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> ServiceResult<AuthSession> {
        let email = email.trim().to_lowercase();

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        let valid = verify_password(password, &user.password_hash)
            .map_err(|e| ServiceError::Internal(e.into()))?;

        if !valid {
            return Err(ServiceError::InvalidCredentials);
        }

        debug!(user_id = user.id, "User logged in");

        self.issue_session(user.id, user.email)
    }

    /// Verifies a bearer credential and resolves its user
    ///
    /// Returns `None` on any failure: malformed token, expired token, bad
    /// signature, or a user id that no longer resolves. The distinction is
    /// deliberately not surfaced.
    pub async fn verify_token(&self, token: &str) -> Option<AuthContext> {
        let claims = validate_token(token, &self.jwt_secret).ok()?;

        let user = self.users.find_by_id(claims.sub).await.ok().flatten()?;

        Some(AuthContext {
            user_id: user.id,
            email: user.email,
        })
    }

    fn issue_session(&self, user_id: i64, email: String) -> ServiceResult<AuthSession> {
        let claims = Claims::new(user_id);
        let token = create_token(&claims, &self.jwt_secret)
            .map_err(|e| ServiceError::Internal(e.into()))?;

        Ok(AuthSession {
            token,
            user_id,
            email,
        })
    }
}
