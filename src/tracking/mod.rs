//! The order tracking core: status pipeline interpretation, driver position
//! simulation, and the live tracker that merges authoritative realtime
//! updates with locally simulated movement.

pub mod position;
pub mod status;
pub mod tracker;

pub use tracker::*;
