//! Store layer: the authoritative, thread-safe product record set.
//!
//! # Responsibility
//! - Define the consumer-facing store contract (`ProductRepository`).
//! - Own record storage and all concurrency control.
//!
//! # Invariants
//! - Write paths call `ProductInput::validate()` before mutating.
//! - Failed operations leave the live set exactly as before the call.
//! - Every value crossing the store boundary is an owned clone.

pub mod product_store;
