//! Core domain logic for patientbook.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod parser;
pub mod render;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::descriptor::{CollectionEdit, EditPatientDescriptor};
pub use model::event::{
    is_valid_event_name, is_valid_event_spec, is_valid_time_range, DateOrdering, EventNameRule,
    EventSpec, EventSpecRecord, EventValidationError, TimeRange,
};
pub use model::patient::{
    FamilyCondition, FieldValidationError, FoodPreference, Hobby, Name, Patient,
    PatientHospitalId, PreferredName, Tag,
};
pub use model::sample::sample_patients;
pub use parser::fields::{DuplicateFieldError, FieldKey, RawFields};
pub use parser::resolver::{PartialUpdateResolver, ResolveError, MESSAGE_NOT_EDITED};
pub use render::render_patient_card;
pub use repo::patient_repo::{InMemoryPatientRepository, PatientRepository, RepoError, RepoResult};
pub use service::patient_service::{PatientService, PatientServiceError, ServiceResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
