//! Core domain logic for the inventory service.
//! This crate is the single source of truth for product invariants.

pub mod logging;
pub mod model;
pub mod query;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::product::{
    Category, ParseCategoryError, Product, ProductId, ProductInput, ProductValidationError,
};
pub use query::filter::{Page, PageRequest, ProductFilter, DEFAULT_PAGE_SIZE};
pub use query::stats::{CategoryStatistics, InventoryStatistics, Rankings, RANKING_SIZE};
pub use service::product_service::{
    CreateProductRequest, ProductService, ServiceError, ServiceResult, UpdateProductRequest,
    MAX_PAGE_SIZE,
};
pub use store::product_store::{InMemoryProductStore, ProductRepository, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
