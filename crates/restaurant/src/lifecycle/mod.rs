//! # System Lifecycle & Orchestration
//!
//! Starting, wiring and stopping the restaurant's actors.
//!
//! ## The RestaurantSystem Pattern
//!
//! [`RestaurantSystem`] creates each actor with its client, spawns it with its context and
//! keeps the join handles:
//!
//! ```rust,ignore
//! let feed = OrderFeed::new(config.store.feed_capacity);
//!
//! // 1. Create actors (no dependencies yet)
//! let (order_actor, orders) = order_actor::new(buffer_size);
//! let (credential_actor, credentials) = admin_actor::new_credentials(buffer_size);
//! let (session_actor, sessions) = admin_actor::new_sessions(buffer_size);
//!
//! // 2. Start them with their context injected
//! tokio::spawn(order_actor.run(feed.clone()));
//! tokio::spawn(credential_actor.run(()));
//! tokio::spawn(session_actor.run(()));
//! ```
//!
//! ## Dependency Injection via Context
//!
//! The order actor's `Context` is the [`OrderFeed`](crate::feed::OrderFeed) it publishes to.
//! It is handed over in `run(context)` rather than `new()`, so the feed can be created and
//! shared with subscribers independently of the actor.
//!
//! ## Graceful Shutdown
//!
//! 1. **Stop background tasks** - the session sweeper is aborted
//! 2. **Drop all clients** - closes the sender side of every channel
//! 3. **Actors detect closure** - `receiver.recv()` returns `None`, they log their final size
//! 4. **Await completion** - every actor handle is joined
//!
//! ## Health
//!
//! [`health::check`] sends one read to each actor and reports which ones answered.

pub mod health;
pub mod restaurant_system;

pub use health::HealthReport;
pub use restaurant_system::*;
