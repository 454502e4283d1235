//! Typed clients wrapping the generic `ResourceClient`s of the restaurant's actors.

pub mod admin_client;
pub mod order_client;

pub use admin_client::AdminClient;
pub use order_client::OrderClient;
