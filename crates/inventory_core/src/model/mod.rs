//! Inventory domain model.
//!
//! # Responsibility
//! - Define the canonical product record owned by the store.
//! - Keep field-level invariants next to the data they guard.
//!
//! # Invariants
//! - Every product is identified by a stable, non-nil `ProductId`.
//! - Deletion is a hard removal; there is no tombstone state.

pub mod product;
