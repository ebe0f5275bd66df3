use async_trait::async_trait;
use crate::error::StorageError;
use crate::product::{Product, ProductId};

/// Persistence abstraction for products.
///
/// Implementations carry their own synchronization and are safe to share
/// between concurrent callers. A transient backend failure is always reported
/// with one of the `FailedTo*` kinds, never as `NotFound`.
#[async_trait]
pub trait ProductStorage: Send + Sync {
    /// Insert or replace the product stored under `product.id`.
    async fn save(&self, product: &Product) -> Result<(), StorageError>;

    async fn get_by_id(&self, id: ProductId) -> Result<Product, StorageError>;

    /// Remove the product, failing with `NotFound` when it is absent.
    async fn delete(&self, id: ProductId) -> Result<(), StorageError>;
}
