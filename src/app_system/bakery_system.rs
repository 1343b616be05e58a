use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{error, info};

use crate::actor_framework::ResourceActor;
use crate::actors::{AuthService, OrderItemService};
use crate::clients::{AuthClient, OrderClient, OrderItemClient, ProductClient};
use crate::domain::{Order, Product};
use crate::tracking::OrderTracker;

const ACTOR_BUFFER: usize = 32;

/// The main application system that wires up the store actors and the auth
/// provider.
///
/// Responsible for starting up actors, wiring them together, and handling
/// shutdown.
pub struct BakerySystem {
    pub order_client: OrderClient,
    pub product_client: ProductClient,
    pub item_client: OrderItemClient,
    pub auth_client: AuthClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl BakerySystem {
    pub fn new() -> Self {
        // 1. Product catalog (generic resource actor)
        let product_counter = Arc::new(AtomicU64::new(1));
        let next_product_id = move || {
            let id = product_counter.fetch_add(1, Ordering::SeqCst);
            format!("product_{}", id)
        };
        let (product_actor, product_inner) =
            ResourceActor::<Product>::new(ACTOR_BUFFER, next_product_id);
        let product_client = ProductClient::new(product_inner);
        let product_handle = tokio::spawn(product_actor.run());

        // 2. Order line items (hand-written service, read-by-parent)
        let (item_service, item_client) =
            OrderItemService::new(ACTOR_BUFFER, product_client.clone());
        let item_handle = tokio::spawn(item_service.run());

        // 3. Orders (generic resource actor with realtime subscriptions)
        let order_counter = Arc::new(AtomicU64::new(1));
        let next_order_id = move || {
            let id = order_counter.fetch_add(1, Ordering::SeqCst);
            format!("order_{}", id)
        };
        let (order_actor, order_inner) = ResourceActor::<Order>::new(ACTOR_BUFFER, next_order_id);
        let order_client = OrderClient::new(order_inner, product_client.clone(), item_client.clone());
        let order_handle = tokio::spawn(order_actor.run());

        // 4. Auth provider
        let (auth_service, auth_client) = AuthService::new(ACTOR_BUFFER);
        let auth_handle = tokio::spawn(auth_service.run());

        Self {
            order_client,
            product_client,
            item_client,
            auth_client,
            handles: vec![product_handle, item_handle, order_handle, auth_handle],
        }
    }

    /// A tracker over this system's order and line item stores, with the
    /// production configuration.
    pub fn tracker(&self) -> OrderTracker {
        OrderTracker::new(self.order_client.clone(), self.item_client.clone())
    }

    /// Drops this system's clients (closing the actor channels once no other
    /// clones remain) and waits for every actor to stop.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.order_client);
        drop(self.product_client);
        drop(self.item_client);
        drop(self.auth_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for BakerySystem {
    fn default() -> Self {
        Self::new()
    }
}
