//! Patient repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Hold the flat, ordered patient collection.
//! - Enforce hospital-id uniqueness on every write.
//!
//! # Invariants
//! - Indices are zero-based positions in insertion order.
//! - No two stored patients share a hospital id.

use crate::model::patient::{Patient, PatientHospitalId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for patient storage operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// Another stored patient already uses this hospital id.
    DuplicatePatient(PatientHospitalId),
    /// Index does not address a stored patient.
    IndexOutOfRange { index: usize, len: usize },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicatePatient(id) => {
                write!(f, "patient with hospital id {} already exists", id.as_str())
            }
            Self::IndexOutOfRange { index, len } => {
                write!(f, "patient index {index} out of range (stored: {len})")
            }
        }
    }
}

impl Error for RepoError {}

/// Storage contract for the patient collection.
pub trait PatientRepository {
    fn add_patient(&mut self, patient: Patient) -> RepoResult<()>;
    fn replace_patient(&mut self, index: usize, patient: Patient) -> RepoResult<()>;
    fn get_patient(&self, index: usize) -> RepoResult<&Patient>;
    fn list_patients(&self) -> &[Patient];
    fn contains_hospital_id(&self, id: &PatientHospitalId) -> bool;
}

/// `Vec`-backed patient repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPatientRepository {
    patients: Vec<Patient>,
}

impl InMemoryPatientRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_index(&self, index: usize) -> RepoResult<()> {
        if index < self.patients.len() {
            Ok(())
        } else {
            Err(RepoError::IndexOutOfRange {
                index,
                len: self.patients.len(),
            })
        }
    }
}

impl PatientRepository for InMemoryPatientRepository {
    fn add_patient(&mut self, patient: Patient) -> RepoResult<()> {
        if self.contains_hospital_id(patient.hospital_id()) {
            return Err(RepoError::DuplicatePatient(patient.hospital_id().clone()));
        }
        self.patients.push(patient);
        Ok(())
    }

    fn replace_patient(&mut self, index: usize, patient: Patient) -> RepoResult<()> {
        self.check_index(index)?;
        let collides = self
            .patients
            .iter()
            .enumerate()
            .any(|(position, stored)| position != index && stored.is_same_patient(&patient));
        if collides {
            return Err(RepoError::DuplicatePatient(patient.hospital_id().clone()));
        }
        self.patients[index] = patient;
        Ok(())
    }

    fn get_patient(&self, index: usize) -> RepoResult<&Patient> {
        self.check_index(index)?;
        Ok(&self.patients[index])
    }

    fn list_patients(&self) -> &[Patient] {
        &self.patients
    }

    fn contains_hospital_id(&self, id: &PatientHospitalId) -> bool {
        self.patients
            .iter()
            .any(|patient| patient.hospital_id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryPatientRepository, PatientRepository, RepoError};
    use crate::model::patient::{Name, Patient, PatientHospitalId, PreferredName};

    fn patient(id: &str, name: &str) -> Patient {
        Patient::new(
            PatientHospitalId::parse(id).unwrap(),
            Name::parse(name).unwrap(),
            PreferredName::parse(name).unwrap(),
        )
    }

    #[test]
    fn add_rejects_duplicate_hospital_id() {
        let mut repo = InMemoryPatientRepository::new();
        repo.add_patient(patient("1", "Amy")).unwrap();

        let err = repo.add_patient(patient("1", "Bob")).unwrap_err();
        assert_eq!(
            err,
            RepoError::DuplicatePatient(PatientHospitalId::parse("1").unwrap())
        );
        assert_eq!(repo.list_patients().len(), 1);
    }

    #[test]
    fn replace_allows_same_slot_and_rejects_other_slot_collision() {
        let mut repo = InMemoryPatientRepository::new();
        repo.add_patient(patient("1", "Amy")).unwrap();
        repo.add_patient(patient("2", "Bob")).unwrap();

        repo.replace_patient(0, patient("1", "Amy Tan")).unwrap();
        assert_eq!(repo.get_patient(0).unwrap().name().as_str(), "Amy Tan");

        assert!(matches!(
            repo.replace_patient(1, patient("1", "Bob")),
            Err(RepoError::DuplicatePatient(_))
        ));
        assert_eq!(
            repo.get_patient(5).unwrap_err(),
            RepoError::IndexOutOfRange { index: 5, len: 2 }
        );
    }
}
