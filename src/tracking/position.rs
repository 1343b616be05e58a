//! Driver position seeding and simulation constants.
//!
//! The simulated position is a client-only placeholder: it moves a fixed
//! fraction of the remaining distance toward the destination on every tick,
//! and is overwritten wholesale whenever an authoritative position arrives.

use std::time::Duration;

use crate::domain::LatLng;

/// Period between simulation ticks.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(3);

/// Fraction of the remaining distance covered per tick, per axis.
pub const DEFAULT_STEP_FACTOR: f64 = 0.05;

/// Offset in degrees used to seed a "somewhere nearby" starting point
/// southwest of the destination when no driver position is known yet.
pub const DEFAULT_SEED_OFFSET_DEG: f64 = 0.01;

/// Initial driver position for a tracking session: the order's last known
/// driver coordinates if present, otherwise a small offset southwest of the
/// destination.
pub fn seed_position(last_known: Option<LatLng>, destination: LatLng, offset_deg: f64) -> LatLng {
    last_known.unwrap_or(LatLng::new(
        destination.lat - offset_deg,
        destination.lng - offset_deg,
    ))
}
