//! Stateless query and aggregation engines.
//!
//! # Responsibility
//! - Evaluate filter predicates, ordering and pagination over a snapshot.
//! - Compute statistics rollups and top-N rankings over a snapshot.
//!
//! # Invariants
//! - Functions here never touch store state; callers pass borrowed snapshots.
//! - Every ordering has a total tie-break on `id`, so output is deterministic.

pub mod filter;
pub mod stats;
