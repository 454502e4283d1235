use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Key of the single admin credential record.
pub const ADMIN_KEY: &str = "config";

/// The admin password hash. At most one exists, stored under [`ADMIN_KEY`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCredential {
    pub id: String,
    /// `pbkdf2$<iterations>$<salt hex>$<key hex>`
    pub password_hash: String,
    pub configured_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for the first (and only) credential.
#[derive(Clone)]
pub struct CredentialCreate {
    pub password_hash: String,
}

/// Replaces the stored hash.
#[derive(Clone)]
pub struct CredentialUpdate {
    pub password_hash: String,
}

// The actor logs create and update payloads; keep the hash out of them.
impl fmt::Debug for CredentialCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialCreate").finish_non_exhaustive()
    }
}

impl fmt::Debug for CredentialUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialUpdate").finish_non_exhaustive()
    }
}

/// An admin login. Valid until `expires_at`; logout deletes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SessionCreate {
    pub ttl: Duration,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_expires_at_its_deadline() {
        let now = Utc::now();
        let session = Session {
            token: "t".into(),
            issued_at: now,
            expires_at: now + Duration::seconds(10),
        };
        assert!(!session.is_expired_at(now));
        assert!(session.is_expired_at(now + Duration::seconds(10)));
    }

    #[test]
    fn credential_payloads_do_not_print_the_hash() {
        let create = CredentialCreate {
            password_hash: "pbkdf2$1$aa$bb".into(),
        };
        assert!(!format!("{create:?}").contains("pbkdf2"));
    }
}
