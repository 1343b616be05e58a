use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductPatch};

impl Entity for Product {
    type Id = String;
    type CreateParams = ProductCreate;
    type Patch = ProductPatch;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(id: String, params: ProductCreate) -> Result<Self, String> {
        if params.price < 0.0 {
            return Err(format!("price must be non-negative: {}", params.price));
        }
        Ok(Self {
            id,
            name: params.name,
            price: params.price,
            image_url: params.image_url,
        })
    }

    /// Catalog price changes never touch already-recorded line items; those
    /// carry their own snapshotted unit price.
    fn on_update(&mut self, patch: ProductPatch) -> Result<(), String> {
        if let Some(price) = patch.price {
            if price < 0.0 {
                return Err(format!("price must be non-negative: {}", price));
            }
            self.price = price;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = Some(image_url);
        }
        Ok(())
    }
}
