use async_trait::async_trait;
use crate::error::FetchError;
use crate::product::{Product, ProductId};

#[async_trait]
pub trait DetailSource: Send + Sync {
    /// Fetch the details of a single product from the external source
    async fn fetch_product_details(&self, id: ProductId) -> Result<Product, FetchError>;
}
