pub mod fetcher;
pub mod inventory;
pub mod source;

pub use fetcher::ConcurrentFetcher;
pub use inventory::Inventory;
pub use source::SimulatedDetailSource;
pub use stockroom_core::{CatalogError, Product, ProductId};
