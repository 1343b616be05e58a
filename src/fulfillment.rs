//! A stand-in for the external fulfillment process: the only writer that
//! advances an order through the pipeline and reports driver positions.

use std::time::{Duration, SystemTime};

use tokio::time::sleep;
use tracing::{info, instrument};

use crate::clients::OrderClient;
use crate::domain::{LatLng, OrderPatch};
use crate::error::OrderError;
use crate::tracking::status::OrderStatus;

/// Rough delivery window promised at dispatch time.
const DELIVERY_WINDOW: Duration = Duration::from_secs(20 * 60);

pub struct FulfillmentDriver {
    orders: OrderClient,
    /// Wall-clock pause between pipeline steps.
    pace: Duration,
}

impl FulfillmentDriver {
    pub fn new(orders: OrderClient, pace: Duration) -> Self {
        Self { orders, pace }
    }

    /// Drives one order from `pending` all the way to `delivered`, reporting
    /// the driver's position at each waypoint while in transit.
    #[instrument(skip(self, route))]
    pub async fn run_to_delivery(
        &self,
        order_id: String,
        route: Vec<LatLng>,
    ) -> Result<(), OrderError> {
        info!("Fulfillment starting");

        sleep(self.pace).await;
        self.set_status(&order_id, OrderStatus::Preparing).await?;

        sleep(self.pace).await;
        let order = self
            .orders
            .update_order(
                order_id.clone(),
                OrderPatch {
                    status: Some(OrderStatus::InTransit.as_str().to_string()),
                    driver: route.first().copied(),
                    estimated_delivery: Some(SystemTime::now() + DELIVERY_WINDOW),
                },
            )
            .await?;
        info!(status = %order.status, "Order dispatched");

        for waypoint in route.into_iter().skip(1) {
            sleep(self.pace).await;
            self.orders
                .update_order(
                    order_id.clone(),
                    OrderPatch {
                        driver: Some(waypoint),
                        ..Default::default()
                    },
                )
                .await?;
        }

        sleep(self.pace).await;
        let order = self
            .orders
            .update_order(
                order_id.clone(),
                OrderPatch {
                    status: Some(OrderStatus::Delivered.as_str().to_string()),
                    driver: Some(order.destination),
                    ..Default::default()
                },
            )
            .await?;
        info!(status = %order.status, "Fulfillment complete");
        Ok(())
    }

    async fn set_status(&self, order_id: &str, status: OrderStatus) -> Result<(), OrderError> {
        let order = self
            .orders
            .update_order(
                order_id.to_string(),
                OrderPatch {
                    status: Some(status.as_str().to_string()),
                    ..Default::default()
                },
            )
            .await?;
        info!(status = %order.status, "Order advanced");
        Ok(())
    }
}
