//! Typed clients wrapping the actor channels. Orchestration that spans
//! several actors (checkout, product joins) lives here, on the client side.

pub mod auth_client;
pub mod macros;
pub mod order_client;
pub mod order_item_client;
pub mod product_client;

pub use auth_client::*;
pub use order_client::*;
pub use order_item_client::*;
pub use product_client::*;
