use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use stockroom_core::{Product, ProductId, ProductStorage, StorageError};

/// Immediate in-memory storage. Every operation runs under one lock.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    products: Mutex<HashMap<ProductId, Product>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.products.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.lock().is_empty()
    }
}

#[async_trait]
impl ProductStorage for MemoryStorage {
    async fn save(&self, product: &Product) -> Result<(), StorageError> {
        self.products.lock().insert(product.id, product.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: ProductId) -> Result<Product, StorageError> {
        self.products
            .lock()
            .get(&id)
            .cloned()
            .ok_or(StorageError::NotFound(id))
    }

    async fn delete(&self, id: ProductId) -> Result<(), StorageError> {
        self.products
            .lock()
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_save_upserts() {
        let storage = MemoryStorage::new();
        let product = Product::new(1, "Test Product", 10.0, 5, "Test");

        storage.save(&product).await.unwrap();
        assert_eq!(storage.get_by_id(1).await.unwrap(), product);

        let renamed = Product::new(1, "Renamed", 12.0, 1, "Test");
        storage.save(&renamed).await.unwrap();
        assert_eq!(storage.get_by_id(1).await.unwrap(), renamed);
        assert_eq!(storage.len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get_by_id(2).await.unwrap_err(), StorageError::NotFound(2));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let storage = MemoryStorage::new();
        storage.save(&Product::new(1, "Test Product", 0.0, 0, "")).await.unwrap();

        storage.delete(1).await.unwrap();
        assert!(storage.is_empty());
        assert_eq!(storage.delete(1).await.unwrap_err(), StorageError::NotFound(1));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_saves() {
        let storage = Arc::new(MemoryStorage::new());

        let handles: Vec<_> = (0..64)
            .map(|id| {
                let storage = Arc::clone(&storage);
                tokio::spawn(async move {
                    storage
                        .save(&Product::new(id, format!("Product {}", id), 1.0, 1, "Bulk"))
                        .await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(storage.len(), 64);
    }
}
