use std::time::SystemTime;

use crate::domain::geo::LatLng;

/// A customer order as persisted in the orders collection.
///
/// The destination coordinates and customer details are set once at checkout
/// and never change; only `status`, `driver` and `estimated_delivery` are
/// mutated afterwards, by the fulfillment side.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    /// Nullable: guest checkout is allowed.
    pub customer_id: Option<String>,
    pub total_amount: f64,
    /// Raw pipeline status string. Unknown values are tolerated by the
    /// tracking view (they render as the earliest pipeline step).
    pub status: String,
    pub created_at: SystemTime,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub delivery_address: String,
    /// Delivery destination, immutable after creation.
    pub destination: LatLng,
    /// Last known driver position; absent until a driver is assigned.
    pub driver: Option<LatLng>,
    pub estimated_delivery: Option<SystemTime>,
}

/// Payload for creating a new order at checkout.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub customer_id: Option<String>,
    pub total_amount: f64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub destination: LatLng,
}

/// Fields the fulfillment process may change on an existing order.
///
/// There is deliberately no way to patch the destination, the customer
/// details or the creation timestamp.
#[derive(Debug, Clone, Default)]
pub struct OrderPatch {
    pub status: Option<String>,
    pub driver: Option<LatLng>,
    pub estimated_delivery: Option<SystemTime>,
}
