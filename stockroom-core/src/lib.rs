pub mod error;
pub mod events;
pub mod latency;
pub mod product;
pub mod repository;
pub mod supplier;

pub use error::{CatalogError, FetchError, PublishError, StorageError};
pub use events::EventPublisher;
pub use latency::SimulatedLatency;
pub use product::{Product, ProductId};
pub use repository::ProductStorage;
pub use supplier::DetailSource;
