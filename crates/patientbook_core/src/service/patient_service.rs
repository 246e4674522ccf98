//! Patient use-case service.
//!
//! # Responsibility
//! - Apply resolved edits and event changes to stored patients.
//! - Provide event views ordered by the configured `DateOrdering`.
//!
//! # Invariants
//! - Stored patients are replaced, never mutated in place.
//! - Service APIs never bypass repository uniqueness checks.

use crate::config::CoreConfig;
use crate::model::descriptor::EditPatientDescriptor;
use crate::model::event::EventSpec;
use crate::model::patient::Patient;
use crate::repo::patient_repo::{PatientRepository, RepoError};
use chrono::{NaiveDate, NaiveTime};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for patient use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatientServiceError {
    /// Storage-layer failure.
    Repo(RepoError),
    /// Patient already carries an equal event.
    DuplicateEvent(EventSpec),
    /// Patient does not carry the event to delete.
    EventNotFound(EventSpec),
}

impl Display for PatientServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::DuplicateEvent(event) => write!(f, "event already exists: {event}"),
            Self::EventNotFound(event) => write!(f, "event not found: {event}"),
        }
    }
}

impl Error for PatientServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for PatientServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type ServiceResult<T> = Result<T, PatientServiceError>;

/// Patient service facade over repository implementations.
pub struct PatientService<R: PatientRepository> {
    repo: R,
    config: CoreConfig,
}

impl<R: PatientRepository> PatientService<R> {
    pub fn new(repo: R, config: CoreConfig) -> Self {
        Self { repo, config }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// Stores a new patient.
    pub fn add_patient(&mut self, patient: Patient) -> ServiceResult<()> {
        let hospital_id = patient.hospital_id().as_str().to_string();
        self.repo.add_patient(patient).inspect_err(|_| {
            warn!("event=patient_add module=service status=rejected hospital_id={hospital_id}");
        })?;
        info!("event=patient_add module=service status=ok hospital_id={hospital_id}");
        Ok(())
    }

    /// Applies `descriptor` to the patient at `index` and returns the result.
    pub fn edit_patient(
        &mut self,
        index: usize,
        descriptor: &EditPatientDescriptor,
    ) -> ServiceResult<Patient> {
        let edited = descriptor.apply_to(self.repo.get_patient(index)?);
        self.repo.replace_patient(index, edited.clone())?;
        info!(
            "event=patient_edit module=service status=ok index={index} edited_fields={}",
            descriptor.edited_field_count()
        );
        Ok(edited)
    }

    /// Adds one event to the patient at `index`.
    pub fn add_event(&mut self, index: usize, event: EventSpec) -> ServiceResult<Patient> {
        let current = self.repo.get_patient(index)?;
        if current.events().contains(&event) {
            return Err(PatientServiceError::DuplicateEvent(event));
        }
        let mut events = current.events().clone();
        events.insert(event);
        let edited = current.clone().with_events(events);
        self.repo.replace_patient(index, edited.clone())?;
        info!(
            "event=event_add module=service status=ok index={index} events={}",
            edited.events().len()
        );
        Ok(edited)
    }

    /// Removes one event from the patient at `index`.
    pub fn delete_event(&mut self, index: usize, event: &EventSpec) -> ServiceResult<Patient> {
        let current = self.repo.get_patient(index)?;
        if !current.events().contains(event) {
            return Err(PatientServiceError::EventNotFound(event.clone()));
        }
        let mut events = current.events().clone();
        events.remove(event);
        let edited = current.clone().with_events(events);
        self.repo.replace_patient(index, edited.clone())?;
        info!(
            "event=event_delete module=service status=ok index={index} events={}",
            edited.events().len()
        );
        Ok(edited)
    }

    pub fn get_patient(&self, index: usize) -> ServiceResult<&Patient> {
        Ok(self.repo.get_patient(index)?)
    }

    pub fn list_patients(&self) -> &[Patient] {
        self.repo.list_patients()
    }

    /// Events of the patient at `index`, ordered by the configured `DateOrdering`.
    pub fn sorted_events(&self, index: usize) -> ServiceResult<Vec<EventSpec>> {
        let patient = self.repo.get_patient(index)?;
        Ok(sort_events(patient, &self.config))
    }

    /// Events of the patient at `index` that are over at the given moment.
    pub fn past_events(
        &self,
        index: usize,
        now_date: NaiveDate,
        now_time: NaiveTime,
    ) -> ServiceResult<Vec<EventSpec>> {
        Ok(self
            .sorted_events(index)?
            .into_iter()
            .filter(|event| event.is_past_event(now_date, now_time))
            .collect())
    }
}

fn sort_events(patient: &Patient, config: &CoreConfig) -> Vec<EventSpec> {
    let mut events: Vec<EventSpec> = patient.events().iter().cloned().collect();
    events.sort_by(|left, right| config.date_ordering.compare_events(left, right));
    events
}
