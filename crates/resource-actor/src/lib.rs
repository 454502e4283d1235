//! # Resource Actor
//!
//! Building blocks for stores in which each resource type is owned by one actor.
//! A resource-oriented API (Create, Get, List, Update, Delete, plus custom Actions) sits on
//! top of the actor model: one Tokio task per resource type, sequential message handling,
//! and no shared mutable state.
//!
//! ## Layers
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - the stored type, its DTOs and its hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - the message loop that owns the store
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed request/response calls
//!
//! Business rules live in the entity hooks; the actor handles channels, id generation,
//! not-found and duplicate-key errors, filtering and ordering of list results.
//!
//! ## Concurrency
//!
//! Requests to one actor are applied one at a time, so every operation is atomic with
//! respect to the others and concurrent updates resolve as last-write-wins. Dropping every
//! client closes the channel; the actor then finishes its loop and logs its final size.
//!
//! ## Testing
//!
//! See [`mock`] for [`MockClient`](mock::MockClient), which answers client calls from
//! scripted expectations instead of a running actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
