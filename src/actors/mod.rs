//! Hand-written actors with their own request enums, for resources that do
//! not fit the generic by-id CRUD shape (read-by-parent, session lookup).

pub mod auth;
pub mod order_items;

use tokio::sync::oneshot;

/// Generic type aliases for service communication.
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

pub use auth::*;
pub use order_items::*;
