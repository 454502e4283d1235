//! [`ActorEntity`] implementation for the admin credential.
//!
//! The credential actor's id generator always returns
//! [`ADMIN_KEY`](crate::model::ADMIN_KEY), so the store holds at
//! most one record and a second setup fails with `AlreadyExists`.

use crate::admin_actor::AuthError;
use crate::model::{AdminCredential, CredentialCreate, CredentialUpdate};
use async_trait::async_trait;
use chrono::Utc;
use resource_actor::ActorEntity;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for AdminCredential {
    type Id = String;
    type Create = CredentialCreate;
    type Update = CredentialUpdate;
    type Filter = ();
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();
    type Error = AuthError;

    fn from_create_params(id: String, params: CredentialCreate) -> Result<Self, AuthError> {
        let now = Utc::now();
        Ok(Self {
            id,
            password_hash: params.password_hash,
            configured_at: now,
            updated_at: now,
        })
    }

    async fn on_update(&mut self, update: CredentialUpdate, _ctx: &()) -> Result<(), AuthError> {
        self.password_hash = update.password_hash;
        self.updated_at = Utc::now();
        Ok(())
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), AuthError> {
        match action {}
    }
}
