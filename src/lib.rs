pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod service;

pub use config::AppConfig;
pub use error::{AllocationError, InventoryError};
pub use service::{Allocator, SearchBudget};
