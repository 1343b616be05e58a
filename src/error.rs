use thiserror::Error;

/// Errors that can occur during auth provider operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Account already exists: {0}")]
    AlreadyExists(String),
    #[error("Unknown session: {0}")]
    UnknownSession(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Errors that can occur during product operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("Product not found: {0}")]
    NotFound(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Invalid product: {0}")]
    InvalidProduct(String),
    #[error("Invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: String, quantity: u32 },
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Errors surfaced by the order tracking view.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TrackingError {
    #[error("Order not found: {0}")]
    OrderNotFound(String),
    #[error("Order fetch failed: {0}")]
    FetchFailed(String),
    #[error("Subscription failed: {0}")]
    SubscribeFailed(String),
}
