pub mod models;

pub use models::events::{ProductEvent, ProductEventStatus, DEFAULT_PRODUCT_TOPIC};
