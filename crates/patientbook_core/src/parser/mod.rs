//! Command field resolution.
//!
//! # Responsibility
//! - Accept prefix→values mappings from the command tokenizer.
//! - Validate them into descriptors, patients and events.
//!
//! # Invariants
//! - Parsers never touch storage.

pub mod fields;
pub mod resolver;
