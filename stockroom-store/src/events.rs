use async_trait::async_trait;
use stockroom_core::{EventPublisher, PublishError};
use tracing::info;

#[cfg(feature = "kafka")]
pub use kafka::EventProducer;

#[cfg(feature = "kafka")]
mod kafka {
    use super::*;
    use rdkafka::config::ClientConfig;
    use rdkafka::producer::{FutureProducer, FutureRecord};
    use rdkafka::util::Timeout;
    use std::time::Duration;
    use tracing::error;

    #[derive(Clone)]
    pub struct EventProducer {
        producer: FutureProducer,
    }

    impl EventProducer {
        pub fn new(brokers: &str) -> Result<Self, rdkafka::error::KafkaError> {
            let producer: FutureProducer = ClientConfig::new()
                .set("bootstrap.servers", brokers)
                .set("message.timeout.ms", "5000")
                .create()?;

            Ok(Self { producer })
        }
    }

    #[async_trait]
    impl EventPublisher for EventProducer {
        async fn publish(&self, topic: &str, key: &str, payload: &str) -> Result<(), PublishError> {
            let record = FutureRecord::to(topic)
                .key(key)
                .payload(payload);

            match self.producer.send(record, Timeout::After(Duration::from_secs(0))).await {
                Ok(delivery) => {
                    info!(
                        topic,
                        key,
                        partition = delivery.partition,
                        offset = delivery.offset,
                        "Sent product event"
                    );
                    Ok(())
                }
                Err((e, _msg)) => {
                    error!(topic, error = %e, "Failed to send product event");
                    Err(PublishError::Publish {
                        topic: topic.to_string(),
                        reason: e.to_string(),
                    })
                }
            }
        }
    }
}

/// Publisher that only writes events to the log, for running without a broker.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogPublisher;

#[async_trait]
impl EventPublisher for LogPublisher {
    async fn publish(&self, topic: &str, key: &str, payload: &str) -> Result<(), PublishError> {
        info!(topic, key, payload, "Product event");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_publisher_accepts_everything() {
        LogPublisher
            .publish("product-events", "1", r#"{"product_id":1}"#)
            .await
            .unwrap();
    }
}
