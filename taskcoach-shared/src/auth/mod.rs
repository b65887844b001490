/// Authentication utilities
///
/// This module provides the credential primitives for TaskCoach:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: Signed, time-bounded bearer tokens
/// - [`middleware`]: Bearer extraction and the per-request auth context
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Tokens**: HS256 signing, 24-hour expiry, issuer validation
/// - **Constant-time Comparison**: Password verification never short-circuits

pub mod jwt;
pub mod middleware;
pub mod password;
