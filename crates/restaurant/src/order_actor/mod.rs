//! # Order Actor
//!
//! The order store: one [`ResourceActor`] owning every [`StoredOrder`], keyed by
//! `order_<unix millis>_<16 hex chars>` ids.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`StoredOrder`]
//! - [`error`] - [`OrderError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use restaurant::clients::OrderClient;
//! use restaurant::feed::OrderFeed;
//! use restaurant::model::{OrderCreate, OrderInfo, StatusAction};
//! use restaurant::order_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let feed = OrderFeed::new(16);
//!     let (actor, generic_client) = order_actor::new(32);
//!     tokio::spawn(actor.run(feed.clone()));
//!     let client = OrderClient::new(generic_client);
//!
//!     let order = client
//!         .place_order(OrderCreate {
//!             order_info: OrderInfo::table("12"),
//!             items: Vec::new(),
//!             total: 0.0,
//!         })
//!         .await?;
//!     client.advance(order.id, StatusAction::Accept).await?;
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use entity::OrderAction;
pub use error::*;

use crate::model::{generate_order_id, StoredOrder};
use resource_actor::{ResourceActor, ResourceClient};

/// Creates a new Order actor and its client. Run it with the [`OrderFeed`](crate::feed::OrderFeed)
/// it should publish to.
pub fn new(buffer_size: usize) -> (ResourceActor<StoredOrder>, ResourceClient<StoredOrder>) {
    ResourceActor::new(buffer_size, generate_order_id)
}
