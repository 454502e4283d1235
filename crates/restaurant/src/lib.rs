//! # Restaurant Ordering Service
//!
//! Customers build a cart from the menu and place dine-in or delivery orders; staff log in
//! and move orders through their lifecycle.
//!
//! - **[model]**: menu, cart, stored orders, the status machine, admin records
//! - **[pricing]**: subtotal, delivery fee, automatic and promo discounts, checkout
//! - **[order_actor]** / **[admin_actor]**: the resource actors owning the stores
//! - **[clients]**: typed clients over those actors
//! - **[feed]**: push notifications of order changes
//! - **[api]**: JSON request handling with status-coded errors
//! - **[lifecycle]**: starting, checking and stopping the whole system
//! - **[config]**: TOML configuration with built-in defaults

pub mod admin_actor;
pub mod api;
pub mod clients;
pub mod config;
pub mod feed;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod password;
pub mod pricing;
