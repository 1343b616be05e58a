use tracing::{error, info, instrument};

use crate::actor_framework::{FrameworkError, ResourceClient, RowStream};
use crate::clients::{OrderItemClient, ProductClient};
use crate::domain::{LatLng, LineItemDraft, Order, OrderCreate, OrderPatch};
use crate::error::OrderError;
use crate::impl_client_get;

/// One cart line handed to checkout.
#[derive(Debug, Clone)]
pub struct CheckoutLine {
    pub product_id: String,
    pub quantity: u32,
}

/// Everything checkout needs to place an order. Payment is not processed;
/// the order only records cash-on-delivery intent.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub customer_id: Option<String>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub delivery_address: String,
    pub destination: LatLng,
    pub lines: Vec<CheckoutLine>,
}

/// Client for the order actor.
///
/// This client handles the checkout orchestration: validating products,
/// snapshotting unit prices, creating the order and recording its line items.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    products: ProductClient,
    items: OrderItemClient,
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        products: ProductClient,
        items: OrderItemClient,
    ) -> Self {
        Self {
            inner,
            products,
            items,
        }
    }

    #[instrument(skip(self, request), fields(lines = request.lines.len()))]
    pub async fn place_order(&self, request: CheckoutRequest) -> Result<String, OrderError> {
        info!("Processing place_order request");

        if request.lines.is_empty() {
            error!("Cart is empty");
            return Err(OrderError::ValidationError("cart is empty".to_string()));
        }

        // Step 1: Validate each product and snapshot its current price.
        let mut drafts = Vec::with_capacity(request.lines.len());
        let mut total_amount = 0.0;
        for line in &request.lines {
            if line.quantity == 0 {
                error!(product_id = %line.product_id, "Zero quantity");
                return Err(OrderError::InvalidQuantity {
                    product_id: line.product_id.clone(),
                    quantity: 0,
                });
            }
            match self.products.get_product(line.product_id.clone()).await {
                Ok(Some(product)) => {
                    info!(product_name = %product.name, "Product validation successful");
                    total_amount += product.price * line.quantity as f64;
                    drafts.push(LineItemDraft {
                        product_id: line.product_id.clone(),
                        quantity: line.quantity,
                        unit_price: product.price,
                    });
                }
                Ok(None) => {
                    error!("Product not found");
                    return Err(OrderError::InvalidProduct(line.product_id.clone()));
                }
                Err(e) => {
                    error!(error = %e, "Product validation failed");
                    return Err(OrderError::InvalidProduct(format!(
                        "Product validation failed: {}",
                        e
                    )));
                }
            }
        }

        // Step 2: Create the order.
        let params = OrderCreate {
            customer_id: request.customer_id,
            total_amount,
            customer_name: request.customer_name,
            customer_email: request.customer_email,
            customer_phone: request.customer_phone,
            delivery_address: request.delivery_address,
            destination: request.destination,
        };
        let order_id = self
            .inner
            .create(params)
            .await
            .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))?;

        // Step 3: Record the line items in one batch.
        self.items.record_items(order_id.clone(), drafts).await?;

        info!(order_id = %order_id, total = total_amount, "Order placed");
        Ok(order_id)
    }

    #[instrument(skip(self))]
    pub async fn update_order(&self, id: String, patch: OrderPatch) -> Result<Order, OrderError> {
        self.inner.update(id.clone(), patch).await.map_err(|e| match e {
            FrameworkError::NotFound(_) => OrderError::NotFound(id),
            other => OrderError::ActorCommunicationError(other.to_string()),
        })
    }

    /// Opens the realtime feed of full-row replacement events for one order.
    #[instrument(skip(self))]
    pub async fn subscribe_order(&self, id: String) -> Result<RowStream<Order>, OrderError> {
        info!(channel = %format!("order-{}", id), "Opening realtime channel");
        self.inner
            .subscribe(id)
            .await
            .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))
    }
}

impl_client_get!(OrderClient, Order, OrderError, order);
