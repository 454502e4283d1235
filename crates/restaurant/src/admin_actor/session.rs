//! [`ActorEntity`] implementation for admin sessions, keyed by their token.

use crate::admin_actor::AuthError;
use crate::model::{Session, SessionCreate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use resource_actor::ActorEntity;
use std::convert::Infallible;

#[derive(Debug, Clone, Copy)]
pub enum SessionAction {
    /// Succeeds with the session unless it has expired at the given instant.
    Check { now: DateTime<Utc> },
}

/// `List` criteria for sessions.
#[derive(Debug, Clone, Copy, Default)]
pub enum SessionFilter {
    #[default]
    All,
    ExpiredAt(DateTime<Utc>),
}

#[async_trait]
impl ActorEntity for Session {
    type Id = String;
    type Create = SessionCreate;
    type Update = Infallible;
    type Filter = SessionFilter;
    type Action = SessionAction;
    type ActionResult = Session;
    type Context = ();
    type Error = AuthError;

    fn from_create_params(token: String, params: SessionCreate) -> Result<Self, AuthError> {
        let issued_at = Utc::now();
        let expires_at = issued_at.checked_add_signed(params.ttl).ok_or_else(|| {
            AuthError::InvalidSessionTtl(format!("{} is out of range", params.ttl))
        })?;
        Ok(Self {
            token,
            issued_at,
            expires_at,
        })
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), AuthError> {
        match update {}
    }

    async fn handle_action(
        &mut self,
        action: SessionAction,
        _ctx: &(),
    ) -> Result<Session, AuthError> {
        match action {
            SessionAction::Check { now } if self.is_expired_at(now) => {
                Err(AuthError::SessionExpired)
            }
            SessionAction::Check { .. } => Ok(self.clone()),
        }
    }

    fn matches(&self, filter: &SessionFilter) -> bool {
        match filter {
            SessionFilter::All => true,
            SessionFilter::ExpiredAt(now) => self.is_expired_at(*now),
        }
    }

    fn list_order(&self, other: &Self) -> std::cmp::Ordering {
        self.issued_at.cmp(&other.issued_at)
    }
}
