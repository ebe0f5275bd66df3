use crate::product::ProductId;

/// Inventory-level failures. All of them are expected outcomes of normal use.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock {
        requested: i32,
        available: i32,
    },

    /// Carries the lookup key: an ID or a name
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    #[error("Product already exists: {0}")]
    ProductAlreadyExists(ProductId),

    #[error("Quantity out of range: {current} changed by {change}")]
    QuantityOverflow {
        current: i32,
        change: i32,
    },
}

/// Storage-layer failures.
///
/// `NotFound` is a definitive answer about the key. The `FailedTo*` kinds are
/// transient: the backend could not complete the call and says nothing about
/// whether the key exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    #[error("Failed to save product {0}")]
    FailedToSave(ProductId),

    #[error("Failed to get product {0}")]
    FailedToGet(ProductId),

    #[error("Failed to delete product {0}")]
    FailedToDelete(ProductId),
}

impl StorageError {
    pub fn is_transient(&self) -> bool {
        !matches!(self, StorageError::NotFound(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to fetch product details for {0}")]
    FetchFailed(ProductId),
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Failed to publish to {topic}: {reason}")]
    Publish {
        topic: String,
        reason: String,
    },

    #[error("Failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),
}
