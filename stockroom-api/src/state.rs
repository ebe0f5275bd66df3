use std::sync::Arc;
use stockroom_catalog::{ConcurrentFetcher, Inventory};
use stockroom_core::{DetailSource, EventPublisher, ProductStorage};
use stockroom_shared::DEFAULT_PRODUCT_TOPIC;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    /// Inventory has no lock of its own; every handler goes through this one.
    pub inventory: Arc<RwLock<Inventory>>,
    pub storage: Arc<dyn ProductStorage>,
    pub events: Arc<dyn EventPublisher>,
    pub event_topic: String,
    pub detail_source: Arc<dyn DetailSource>,
    pub fetcher: ConcurrentFetcher,
}

impl AppState {
    pub fn new(
        storage: Arc<dyn ProductStorage>,
        events: Arc<dyn EventPublisher>,
        detail_source: Arc<dyn DetailSource>,
    ) -> Self {
        Self {
            inventory: Arc::new(RwLock::new(Inventory::new())),
            storage,
            events,
            event_topic: DEFAULT_PRODUCT_TOPIC.to_string(),
            detail_source,
            fetcher: ConcurrentFetcher::default(),
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.event_topic = topic.into();
        self
    }

    pub fn with_fetcher(mut self, fetcher: ConcurrentFetcher) -> Self {
        self.fetcher = fetcher;
        self
    }
}
