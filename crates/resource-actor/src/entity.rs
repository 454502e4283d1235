//! # ActorEntity Trait
//!
//! The `ActorEntity` trait is the contract every stored resource (orders, admin
//! credentials, sessions, …) implements to be managed by the generic `ResourceActor`.
//! It names the associated types for ids, DTOs, list filters, actions, context and
//! errors, and provides lifecycle hooks (`on_create`, `on_update`, `on_delete`,
//! `handle_action`) plus the listing hooks (`matches`, `list_order`).
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//! - [`ActorEntity::matches`]
//! - [`ActorEntity::list_order`]
//!
//! You only implement these when you need to customise behavior. The defaults accept
//! everything and leave listing order unspecified.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// The trait is `#[async_trait]` so hooks can await other actors. The `Context` type is
/// injected into every hook when the actor starts running, which lets dependencies be
/// bound late (passed to `run()` instead of `new()`).
///
/// # Identifiers
/// Ids are produced by the id generator handed to [`ResourceActor::new`](crate::ResourceActor::new),
/// so an entity type is free to pick counters, random tokens or a fixed key. A generator
/// returning a fixed key turns the actor into a singleton store: the second create is
/// rejected with [`FrameworkError::AlreadyExists`](crate::FrameworkError::AlreadyExists).
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity (e.g., String, Uuid, u64).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Criteria used by `List` requests. Use `()` when listing is unfiltered.
    type Filter: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g., `Advance`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One enum per actor rather than one per message: clients match on a single
    /// error type, at the cost of some variants being unreachable for some operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is built and before it is stored.
    /// Returning an error aborts the create.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the store.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;

    // --- Listing ---

    /// Whether this entity is included in a `List` response for `filter`.
    fn matches(&self, _filter: &Self::Filter) -> bool {
        true
    }

    /// Ordering of `List` responses. `Less` sorts first.
    fn list_order(&self, _other: &Self) -> Ordering {
        Ordering::Equal
    }
}
