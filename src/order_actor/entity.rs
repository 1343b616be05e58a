use std::time::SystemTime;

use crate::actor_framework::Entity;
use crate::domain::{Order, OrderCreate, OrderPatch};
use crate::tracking::status::OrderStatus;

impl Entity for Order {
    type Id = String;
    type CreateParams = OrderCreate;
    type Patch = OrderPatch;

    fn id(&self) -> &String {
        &self.id
    }

    /// New orders always enter the pipeline at `pending` with no driver
    /// assigned. Destination and customer details are fixed here for good.
    fn from_create_params(id: String, params: OrderCreate) -> Result<Self, String> {
        if params.total_amount < 0.0 {
            return Err(format!("total must be non-negative: {}", params.total_amount));
        }
        Ok(Self {
            id,
            customer_id: params.customer_id,
            total_amount: params.total_amount,
            status: OrderStatus::Pending.as_str().to_string(),
            created_at: SystemTime::now(),
            customer_name: params.customer_name,
            customer_email: params.customer_email,
            customer_phone: params.customer_phone,
            delivery_address: params.delivery_address,
            destination: params.destination,
            driver: None,
            estimated_delivery: None,
        })
    }

    /// Applies a fulfillment-side patch.
    ///
    /// Known statuses may only move forward through the pipeline. Unknown
    /// status strings are stored as-is; the tracking view renders them
    /// leniently as the earliest step.
    fn on_update(&mut self, patch: OrderPatch) -> Result<(), String> {
        if let Some(next) = patch.status {
            if let (Some(current), Some(incoming)) =
                (OrderStatus::parse(&self.status), OrderStatus::parse(&next))
            {
                if incoming.step_index() < current.step_index() {
                    return Err(format!(
                        "status cannot move backward: {} -> {}",
                        self.status, next
                    ));
                }
            }
            self.status = next;
        }
        if let Some(driver) = patch.driver {
            self.driver = Some(driver);
        }
        if let Some(eta) = patch.estimated_delivery {
            self.estimated_delivery = Some(eta);
        }
        Ok(())
    }

    /// Orders are never deleted; they only reach a terminal status.
    fn on_delete(&self) -> Result<(), String> {
        Err(format!("orders cannot be deleted: {}", self.id))
    }
}
