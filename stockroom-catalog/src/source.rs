use async_trait::async_trait;
use rand::Rng;
use stockroom_core::{DetailSource, FetchError, Product, ProductId, SimulatedLatency};
use tracing::debug;

/// Stand-in for a remote product-detail API.
///
/// Each call waits a random delay, fails with the configured probability and
/// otherwise synthesizes a product for the requested ID.
#[derive(Debug, Clone)]
pub struct SimulatedDetailSource {
    latency: SimulatedLatency,
    category: String,
}

impl SimulatedDetailSource {
    pub fn new(latency: SimulatedLatency) -> Self {
        Self {
            latency,
            category: "Category".to_string(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

impl Default for SimulatedDetailSource {
    fn default() -> Self {
        Self::new(SimulatedLatency::default())
    }
}

#[async_trait]
impl DetailSource for SimulatedDetailSource {
    async fn fetch_product_details(&self, id: ProductId) -> Result<Product, FetchError> {
        if self.latency.simulate().await {
            debug!(product_id = id, "Simulated detail fetch failure");
            return Err(FetchError::FetchFailed(id));
        }

        let (price, quantity) = {
            let mut rng = rand::thread_rng();
            (f64::from(rng.gen_range(0..100u32)), rng.gen_range(0..100))
        };

        Ok(Product::new(id, format!("Product {}", id), price, quantity, self.category.clone()))
    }
}
