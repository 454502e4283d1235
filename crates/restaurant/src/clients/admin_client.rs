//! # Admin Client
//!
//! Admin setup, login and session checks on top of the credential and session actors.
//!
//! Passwords never reach the actors or the logs: they are hashed and verified here, on
//! Tokio's blocking pool, and only the hash is sent to the credential store.
use crate::admin_actor::{AuthError, SessionAction, SessionFilter};
use crate::config::AdminSettings;
use crate::model::{
    AdminCredential, CredentialCreate, CredentialUpdate, Session, SessionCreate, ADMIN_KEY,
};
use crate::password;
use chrono::{Duration, Utc};
use resource_actor::{FrameworkError, ResourceClient};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Client for admin authentication.
#[derive(Clone)]
pub struct AdminClient {
    credentials: ResourceClient<AdminCredential>,
    sessions: ResourceClient<Session>,
    settings: Arc<AdminSettings>,
}

fn map_error(e: FrameworkError) -> AuthError {
    e.into_entity_error::<AuthError>()
        .unwrap_or_else(|e| AuthError::ActorCommunicationError(e.to_string()))
}

impl AdminClient {
    pub fn new(
        credentials: ResourceClient<AdminCredential>,
        sessions: ResourceClient<Session>,
        settings: AdminSettings,
    ) -> Self {
        Self {
            credentials,
            sessions,
            settings: Arc::new(settings),
        }
    }

    #[instrument(skip(self))]
    pub async fn is_configured(&self) -> Result<bool, AuthError> {
        debug!("Sending request");
        let credential = self
            .credentials
            .get(ADMIN_KEY.to_string())
            .await
            .map_err(map_error)?;
        Ok(credential.is_some())
    }

    /// Sets the admin password. Only the first call succeeds.
    #[instrument(skip_all)]
    pub async fn setup(&self, password: &str) -> Result<(), AuthError> {
        if self.is_configured().await? {
            return Err(AuthError::AlreadyConfigured);
        }
        self.check_length(password)?;

        let password_hash = self.hash(password).await?;
        // A concurrent setup may have won since the check above; the store decides.
        match self.credentials.create(CredentialCreate { password_hash }).await {
            Ok(_) => {
                info!("Admin password configured");
                Ok(())
            }
            Err(FrameworkError::AlreadyExists(_)) => Err(AuthError::AlreadyConfigured),
            Err(e) => Err(map_error(e)),
        }
    }

    /// Checks the password and opens a session.
    #[instrument(skip_all)]
    pub async fn login(&self, password: &str) -> Result<Session, AuthError> {
        let credential = self.credential().await?;
        if !self.verify(password, credential.password_hash).await? {
            warn!("Login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let secs = self.settings.session_ttl_secs;
        let ttl = Duration::try_seconds(secs)
            .ok_or_else(|| AuthError::InvalidSessionTtl(format!("{secs}s is out of range")))?;
        let session = self
            .sessions
            .create(SessionCreate { ttl })
            .await
            .map_err(map_error)?;
        info!(expires_at = %session.expires_at, "Admin logged in");
        Ok(session)
    }

    /// Returns the session if the token is live. An expired session is removed.
    #[instrument(skip_all)]
    pub async fn validate_session(&self, token: &str) -> Result<Session, AuthError> {
        let check = SessionAction::Check { now: Utc::now() };
        match self.sessions.perform_action(token.to_string(), check).await {
            Ok(session) => Ok(session),
            Err(FrameworkError::NotFound(_)) => Err(AuthError::InvalidSession),
            Err(e) => match map_error(e) {
                AuthError::SessionExpired => {
                    debug!("Removing expired session");
                    self.revoke(token).await?;
                    Err(AuthError::SessionExpired)
                }
                other => Err(other),
            },
        }
    }

    #[instrument(skip_all)]
    pub async fn logout(&self, token: &str) -> Result<(), AuthError> {
        match self.sessions.delete(token.to_string()).await {
            Ok(()) => {
                info!("Admin logged out");
                Ok(())
            }
            Err(FrameworkError::NotFound(_)) => Err(AuthError::InvalidSession),
            Err(e) => Err(map_error(e)),
        }
    }

    /// Replaces the password. Needs a live session and the current password.
    #[instrument(skip_all)]
    pub async fn change_password(
        &self,
        token: &str,
        current: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        self.validate_session(token).await?;
        self.check_length(new_password)?;

        let credential = self.credential().await?;
        if !self.verify(current, credential.password_hash).await? {
            return Err(AuthError::InvalidCredentials);
        }

        let password_hash = self.hash(new_password).await?;
        self.credentials
            .update(ADMIN_KEY.to_string(), CredentialUpdate { password_hash })
            .await
            .map_err(map_error)?;
        info!("Admin password changed");
        Ok(())
    }

    /// Deletes every expired session and returns how many were removed.
    #[instrument(skip(self))]
    pub async fn purge_expired_sessions(&self) -> Result<usize, AuthError> {
        let expired = self
            .sessions
            .list(SessionFilter::ExpiredAt(Utc::now()))
            .await
            .map_err(map_error)?;

        let mut removed = 0;
        for session in expired {
            match self.sessions.delete(session.token).await {
                Ok(()) => removed += 1,
                Err(FrameworkError::NotFound(_)) => {}
                Err(e) => return Err(map_error(e)),
            }
        }
        if removed > 0 {
            info!(removed, "Expired sessions purged");
        }
        Ok(removed)
    }

    /// One read from each admin actor.
    pub async fn ping(&self) -> Result<(), AuthError> {
        self.is_configured().await?;
        self.sessions.get(String::new()).await.map_err(map_error)?;
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.credentials.is_closed() || self.sessions.is_closed()
    }

    async fn credential(&self) -> Result<AdminCredential, AuthError> {
        self.credentials
            .get(ADMIN_KEY.to_string())
            .await
            .map_err(map_error)?
            .ok_or(AuthError::NotConfigured)
    }

    async fn revoke(&self, token: &str) -> Result<(), AuthError> {
        match self.sessions.delete(token.to_string()).await {
            Ok(()) | Err(FrameworkError::NotFound(_)) => Ok(()),
            Err(e) => Err(map_error(e)),
        }
    }

    fn check_length(&self, password: &str) -> Result<(), AuthError> {
        let min = self.settings.min_password_len;
        if password.chars().count() < min {
            return Err(AuthError::PasswordTooShort { min });
        }
        Ok(())
    }

    async fn hash(&self, password: &str) -> Result<String, AuthError> {
        let password = password.to_string();
        let iterations = self.settings.pbkdf2_iterations;
        tokio::task::spawn_blocking(move || password::hash_password(&password, iterations))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
    }

    async fn verify(&self, password: &str, stored: String) -> Result<bool, AuthError> {
        let password = password.to_string();
        tokio::task::spawn_blocking(move || password::verify_password(&password, &stored))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_actor::mock::MockClient;

    fn settings() -> AdminSettings {
        AdminSettings {
            pbkdf2_iterations: 1_000,
            ..AdminSettings::default()
        }
    }

    fn credential(password: &str) -> AdminCredential {
        let now = Utc::now();
        AdminCredential {
            id: ADMIN_KEY.into(),
            password_hash: password::hash_password(password, 1_000).unwrap(),
            configured_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn short_password_is_rejected_before_hashing() {
        let mut credentials = MockClient::<AdminCredential>::new();
        credentials.expect_get(ADMIN_KEY.into()).return_ok(None);
        let sessions = MockClient::<Session>::new();
        let admin = AdminClient::new(credentials.client(), sessions.client(), settings());

        assert_eq!(
            admin.setup("12345").await,
            Err(AuthError::PasswordTooShort { min: 6 })
        );
        credentials.verify();
    }

    #[tokio::test]
    async fn setup_losing_the_race_reports_conflict() {
        let mut credentials = MockClient::<AdminCredential>::new();
        credentials.expect_get(ADMIN_KEY.into()).return_ok(None);
        credentials
            .expect_create()
            .return_err(FrameworkError::AlreadyExists(ADMIN_KEY.into()));
        let sessions = MockClient::<Session>::new();

        let admin = AdminClient::new(credentials.client(), sessions.client(), settings());
        assert_eq!(admin.setup("s3cret!").await, Err(AuthError::AlreadyConfigured));
        credentials.verify();
    }

    #[tokio::test]
    async fn login_without_setup_is_not_configured() {
        let mut credentials = MockClient::<AdminCredential>::new();
        credentials.expect_get(ADMIN_KEY.into()).return_ok(None);
        let sessions = MockClient::<Session>::new();

        let admin = AdminClient::new(credentials.client(), sessions.client(), settings());
        assert_eq!(admin.login("whatever").await, Err(AuthError::NotConfigured));
        credentials.verify();
    }

    #[tokio::test]
    async fn wrong_password_opens_no_session() {
        let mut credentials = MockClient::<AdminCredential>::new();
        credentials
            .expect_get(ADMIN_KEY.into())
            .return_ok(Some(credential("s3cret!")));
        let sessions = MockClient::<Session>::new();

        let admin = AdminClient::new(credentials.client(), sessions.client(), settings());
        assert_eq!(admin.login("guess!!").await, Err(AuthError::InvalidCredentials));
        credentials.verify();
        sessions.verify();
    }

    #[tokio::test]
    async fn expired_session_is_revoked() {
        let credentials = MockClient::<AdminCredential>::new();
        let mut sessions = MockClient::<Session>::new();
        sessions
            .expect_action("tok".into())
            .return_err(FrameworkError::EntityError(Box::new(AuthError::SessionExpired)));
        sessions.expect_delete("tok".into()).return_ok(());

        let admin = AdminClient::new(credentials.client(), sessions.client(), settings());
        assert_eq!(
            admin.validate_session("tok").await,
            Err(AuthError::SessionExpired)
        );
        sessions.verify();
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let credentials = MockClient::<AdminCredential>::new();
        let mut sessions = MockClient::<Session>::new();
        sessions
            .expect_action("nope".into())
            .return_err(FrameworkError::NotFound("nope".into()));
        sessions
            .expect_delete("nope".into())
            .return_err(FrameworkError::NotFound("nope".into()));

        let admin = AdminClient::new(credentials.client(), sessions.client(), settings());
        assert_eq!(admin.validate_session("nope").await, Err(AuthError::InvalidSession));
        assert_eq!(admin.logout("nope").await, Err(AuthError::InvalidSession));
        sessions.verify();
    }
}
