use tracing::{debug, instrument};

use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::domain::{Product, ProductCreate, ProductPatch};
use crate::error::ProductError;
use crate::impl_client_get;

/// Client for the product catalog actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<String, ProductError> {
        debug!("Sending request");
        self.inner
            .create(params)
            .await
            .map_err(|e| ProductError::ActorCommunicationError(e.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: String,
        patch: ProductPatch,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id.clone(), patch).await.map_err(|e| match e {
            FrameworkError::NotFound(_) => ProductError::NotFound(id),
            other => ProductError::ActorCommunicationError(other.to_string()),
        })
    }
}

impl_client_get!(ProductClient, Product, ProductError, product);
