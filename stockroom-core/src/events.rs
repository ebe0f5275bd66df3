use async_trait::async_trait;
use crate::error::PublishError;

/// Sink for change events emitted after successful writes.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, topic: &str, key: &str, payload: &str) -> Result<(), PublishError>;
}
