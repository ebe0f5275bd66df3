use async_trait::async_trait;
use std::collections::HashMap;
use stockroom_core::{Product, ProductId, ProductStorage, SimulatedLatency, StorageError};
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory storage that behaves like a slow, flaky database.
///
/// Each call takes the lock, sleeps a random delay and then, with the
/// configured probability, fails with its transient error kind before the key
/// is even looked at. Only when no failure is drawn does the call run the
/// normal save/get/delete logic. The lock is held for the whole sequence.
#[derive(Debug)]
pub struct MockDatabaseStorage {
    store: Mutex<HashMap<ProductId, Product>>,
    latency: SimulatedLatency,
}

impl MockDatabaseStorage {
    pub fn new(latency: SimulatedLatency) -> Self {
        Self {
            store: Mutex::new(HashMap::new()),
            latency,
        }
    }
}

impl Default for MockDatabaseStorage {
    fn default() -> Self {
        Self::new(SimulatedLatency::default())
    }
}

#[async_trait]
impl ProductStorage for MockDatabaseStorage {
    async fn save(&self, product: &Product) -> Result<(), StorageError> {
        let mut store = self.store.lock().await;
        if self.latency.simulate().await {
            debug!(product_id = product.id, "Simulated save failure");
            return Err(StorageError::FailedToSave(product.id));
        }

        store.insert(product.id, product.clone());
        Ok(())
    }

    async fn get_by_id(&self, id: ProductId) -> Result<Product, StorageError> {
        let store = self.store.lock().await;
        if self.latency.simulate().await {
            debug!(product_id = id, "Simulated get failure");
            return Err(StorageError::FailedToGet(id));
        }

        store.get(&id).cloned().ok_or(StorageError::NotFound(id))
    }

    async fn delete(&self, id: ProductId) -> Result<(), StorageError> {
        let mut store = self.store.lock().await;
        if self.latency.simulate().await {
            debug!(product_id = id, "Simulated delete failure");
            return Err(StorageError::FailedToDelete(id));
        }

        store.remove(&id).map(|_| ()).ok_or(StorageError::NotFound(id))
    }
}
