//! Repository layer abstractions.
//!
//! # Responsibility
//! - Define the storage contract the service layer depends on.
//! - Keep collection bookkeeping out of use-case orchestration.
//!
//! # Invariants
//! - Writes reject hospital-id collisions.

pub mod patient_repo;
