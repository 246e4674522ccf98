//! Patient domain model.
//!
//! # Responsibility
//! - Define validated value types for patients and their events.
//! - Define the partial-update descriptor applied by the service layer.
//!
//! # Invariants
//! - Every value is validated on construction and immutable afterwards.
//! - Edits produce new values; nothing is updated in place.

pub mod descriptor;
pub mod event;
pub mod patient;
pub mod sample;
