//! Core use-case services.
//!
//! # Responsibility
//! - Turn boundary requests into calls on the store contract.
//! - Keep HTTP/CLI adapters decoupled from store details.

pub mod product_service;
