use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::actors::ServiceResponse;
use crate::clients::{OrderItemClient, ProductClient};
use crate::domain::{LineItem, LineItemDraft};
use crate::error::OrderError;

#[derive(Debug)]
pub enum OrderItemRequest {
    /// Records a batch of line items for one order. All-or-nothing: either
    /// every draft is valid and stored, or nothing is.
    Record {
        order_id: String,
        drafts: Vec<LineItemDraft>,
        respond_to: ServiceResponse<Vec<String>, OrderError>,
    },
    /// Read-by-parent: all line items belonging to one order.
    ListForOrder {
        order_id: String,
        respond_to: ServiceResponse<Vec<LineItem>, OrderError>,
    },
}

/// Stores order line items, keyed by parent order id.
pub struct OrderItemService {
    receiver: mpsc::Receiver<OrderItemRequest>,
    items: HashMap<String, Vec<LineItem>>,
    next_id: u64,
}

impl OrderItemService {
    pub fn new(buffer_size: usize, products: ProductClient) -> (Self, OrderItemClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            items: HashMap::new(),
            next_id: 1,
        };
        let client = OrderItemClient::new(sender, products);
        (service, client)
    }

    #[instrument(name = "order_item_service", skip(self))]
    pub async fn run(mut self) {
        info!("OrderItemService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                OrderItemRequest::Record {
                    order_id,
                    drafts,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.handle_record(order_id, drafts));
                }
                OrderItemRequest::ListForOrder {
                    order_id,
                    respond_to,
                } => {
                    self.handle_list(order_id, respond_to);
                }
            }
        }
        info!("OrderItemService stopped");
    }

    #[instrument(fields(order_id = %order_id, count = drafts.len()), skip(self, order_id, drafts))]
    fn handle_record(
        &mut self,
        order_id: String,
        drafts: Vec<LineItemDraft>,
    ) -> Result<Vec<String>, OrderError> {
        info!("Recording line items");
        for draft in &drafts {
            if draft.quantity == 0 {
                return Err(OrderError::InvalidQuantity {
                    product_id: draft.product_id.clone(),
                    quantity: 0,
                });
            }
        }
        let mut ids = Vec::with_capacity(drafts.len());
        let mut batch = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let id = format!("item_{}", self.next_id);
            self.next_id += 1;
            batch.push(LineItem {
                id: id.clone(),
                order_id: order_id.clone(),
                product_id: draft.product_id,
                quantity: draft.quantity,
                unit_price: draft.unit_price,
            });
            ids.push(id);
        }
        self.items.entry(order_id).or_default().extend(batch);
        Ok(ids)
    }

    #[instrument(fields(order_id = %order_id), skip(self, order_id, respond_to))]
    fn handle_list(&self, order_id: String, respond_to: ServiceResponse<Vec<LineItem>, OrderError>) {
        debug!("Processing list_for_order request");
        let items = self.items.get(&order_id).cloned().unwrap_or_default();
        let _ = respond_to.send(Ok(items));
    }
}
