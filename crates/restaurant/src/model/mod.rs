//! Domain data: the menu catalog, carts, stored orders, the status machine and admin records.

pub mod admin;
pub mod cart;
pub mod menu;
pub mod order;
pub mod status;

pub use admin::*;
pub use cart::*;
pub use menu::*;
pub use order::*;
pub use status::*;
