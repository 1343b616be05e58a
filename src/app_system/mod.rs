//! System orchestration, startup, and shutdown logic.

pub mod bakery_system;
pub mod tracing;

pub use bakery_system::*;
pub use tracing::*;
