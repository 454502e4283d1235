//! Error types for the admin credential and session actors.

use thiserror::Error;

/// Errors that can occur during admin setup, login and session checks.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    /// No admin password has been set yet.
    #[error("Not configured")]
    NotConfigured,

    /// Setup was attempted after a password was already set.
    #[error("Already configured")]
    AlreadyConfigured,

    #[error("Password too short (minimum {min} characters)")]
    PasswordTooShort { min: usize },

    /// Wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Unknown, revoked or purged session token.
    #[error("Invalid session")]
    InvalidSession,

    #[error("Session expired")]
    SessionExpired,

    /// The configured session lifetime cannot be represented as an expiry instant.
    #[error("Invalid session lifetime: {0}")]
    InvalidSessionTtl(String),

    /// Random generator or key derivation failure.
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
