//! # Admin Actors
//!
//! Two resource actors back admin authentication:
//!
//! - [`credential`] - the single [`AdminCredential`] holding the password hash
//! - [`session`] - [`Session`]s issued at login, keyed by a random UUID token
//! - [`error`] - [`AuthError`], shared by both
//!
//! Password hashing runs in the client (on a blocking thread), never inside an actor, so a
//! slow key derivation does not hold up other requests.
//!
//! ```rust
//! use restaurant::admin_actor;
//! use restaurant::clients::AdminClient;
//! use restaurant::config::AdminSettings;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (credential_actor, credentials) = admin_actor::new_credentials(8);
//!     let (session_actor, sessions) = admin_actor::new_sessions(8);
//!     tokio::spawn(credential_actor.run(()));
//!     tokio::spawn(session_actor.run(()));
//!
//!     let settings = AdminSettings { pbkdf2_iterations: 1_000, ..AdminSettings::default() };
//!     let admin = AdminClient::new(credentials, sessions, settings);
//!     admin.setup("s3cret!").await?;
//!     let session = admin.login("s3cret!").await?;
//!     admin.validate_session(&session.token).await?;
//!     Ok(())
//! }
//! ```

pub mod credential;
pub mod error;
pub mod session;

pub use error::*;
pub use session::{SessionAction, SessionFilter};

use crate::model::{AdminCredential, Session, ADMIN_KEY};
use resource_actor::{ResourceActor, ResourceClient};

/// Creates the credential actor. Every create targets [`ADMIN_KEY`].
pub fn new_credentials(
    buffer_size: usize,
) -> (ResourceActor<AdminCredential>, ResourceClient<AdminCredential>) {
    ResourceActor::new(buffer_size, || ADMIN_KEY.to_string())
}

/// Creates the session actor. Tokens are random v4 UUIDs.
pub fn new_sessions(buffer_size: usize) -> (ResourceActor<Session>, ResourceClient<Session>) {
    ResourceActor::new(buffer_size, || uuid::Uuid::new_v4().to_string())
}
