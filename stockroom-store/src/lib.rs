pub mod app_config;
pub mod catalog_repo;
pub mod database;
pub mod events;
pub mod memory_repo;
pub mod mock_repo;

pub use catalog_repo::PgProductStorage;
pub use database::DbClient;
pub use events::LogPublisher;
#[cfg(feature = "kafka")]
pub use events::EventProducer;
pub use memory_repo::MemoryStorage;
pub use mock_repo::MockDatabaseStorage;
