use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument, warn};

use crate::actors::OrderItemRequest;
use crate::clients::ProductClient;
use crate::domain::{LineItem, LineItemDraft, LineItemView};
use crate::error::OrderError;

/// Fallback display name when a line item's product no longer resolves.
const MISSING_PRODUCT_NAME: &str = "Product";

/// Client for the order line item actor. Joining with the product projection
/// happens here, not in the service.
#[derive(Clone)]
pub struct OrderItemClient {
    sender: mpsc::Sender<OrderItemRequest>,
    products: ProductClient,
}

impl OrderItemClient {
    pub fn new(sender: mpsc::Sender<OrderItemRequest>, products: ProductClient) -> Self {
        Self { sender, products }
    }

    #[instrument(skip(self, drafts))]
    pub async fn record_items(
        &self,
        order_id: String,
        drafts: Vec<LineItemDraft>,
    ) -> Result<Vec<String>, OrderError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(OrderItemRequest::Record {
                order_id,
                drafts,
                respond_to,
            })
            .await
            .map_err(|_| OrderError::ActorCommunicationError("Actor closed".to_string()))?;
        response
            .await
            .map_err(|_| OrderError::ActorCommunicationError("Actor dropped".to_string()))?
    }

    /// Raw line items for one order, without the product join.
    #[instrument(skip(self))]
    pub async fn raw_items_for_order(&self, order_id: String) -> Result<Vec<LineItem>, OrderError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(OrderItemRequest::ListForOrder {
                order_id,
                respond_to,
            })
            .await
            .map_err(|_| OrderError::ActorCommunicationError("Actor closed".to_string()))?;
        response
            .await
            .map_err(|_| OrderError::ActorCommunicationError("Actor dropped".to_string()))?
    }

    /// Line items for one order, joined with the product projection (display
    /// name and image). A product that no longer resolves degrades to a
    /// placeholder name rather than failing the whole read.
    #[instrument(skip(self))]
    pub async fn list_for_order(&self, order_id: String) -> Result<Vec<LineItemView>, OrderError> {
        let items = self.raw_items_for_order(order_id).await?;
        let mut views = Vec::with_capacity(items.len());
        for item in items {
            let product = self
                .products
                .get_product(item.product_id.clone())
                .await
                .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))?;
            let (name, image_url) = match product {
                Some(product) => (product.name, product.image_url),
                None => {
                    warn!(product_id = %item.product_id, "Product missing for line item");
                    (MISSING_PRODUCT_NAME.to_string(), None)
                }
            };
            views.push(LineItemView {
                id: item.id,
                name,
                image_url,
                quantity: item.quantity,
                unit_price: item.unit_price,
            });
        }
        Ok(views)
    }
}
