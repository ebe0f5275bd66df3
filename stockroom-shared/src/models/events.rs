/// Topic product change events are published to unless configured otherwise.
pub const DEFAULT_PRODUCT_TOPIC: &str = "product-events";

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProductEventStatus {
    Updated,
    Deleted,
}

/// Change record emitted after a product is updated or deleted.
///
/// `order_id` mirrors `product_id`; downstream consumers key on it.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct ProductEvent {
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub status: ProductEventStatus,
}

impl ProductEvent {
    pub fn updated(product_id: i64, quantity: i32) -> Self {
        Self {
            order_id: product_id,
            product_id,
            quantity,
            status: ProductEventStatus::Updated,
        }
    }

    pub fn deleted(product_id: i64) -> Self {
        Self {
            order_id: product_id,
            product_id,
            quantity: 0,
            status: ProductEventStatus::Deleted,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
