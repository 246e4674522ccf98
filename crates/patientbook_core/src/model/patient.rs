//! Patient domain model.
//!
//! # Responsibility
//! - Define validated scalar fields and single-payload collection values.
//! - Define the canonical `Patient` record shared by service and rendering.
//!
//! # Invariants
//! - Every field is validated at construction; a `Patient` never holds raw input.
//! - `hospital_id` is the identity used for duplicate detection.
//! - Patients are rebuilt rather than mutated when edited.

use crate::model::event::EventSpec;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

static HOSPITAL_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid hospital id regex"));
static PERSON_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 ]*$").expect("valid person name regex"));

/// Field-level validation errors for patient attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValidationError {
    InvalidHospitalId(String),
    InvalidName(String),
    InvalidPreferredName(String),
    InvalidFoodPreference(String),
    InvalidFamilyCondition(String),
    InvalidHobby(String),
    InvalidTag(String),
}

impl Display for FieldValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidHospitalId(value) => write!(
                f,
                "invalid patient hospital id `{value}`: should only contain digits and not be blank"
            ),
            Self::InvalidName(value) => write!(
                f,
                "invalid name `{value}`: should only contain alphanumeric characters and spaces, and not be blank"
            ),
            Self::InvalidPreferredName(value) => write!(
                f,
                "invalid preferred name `{value}`: should only contain alphanumeric characters and spaces, and not be blank"
            ),
            Self::InvalidFoodPreference(value) => {
                write!(f, "invalid food preference `{value}`: should not be blank")
            }
            Self::InvalidFamilyCondition(value) => {
                write!(f, "invalid family condition `{value}`: should not be blank")
            }
            Self::InvalidHobby(value) => write!(f, "invalid hobby `{value}`: should not be blank"),
            Self::InvalidTag(value) => write!(f, "invalid tag `{value}`: should not be blank"),
        }
    }
}

impl Error for FieldValidationError {}

fn match_trimmed(raw: &str, pattern: &Regex) -> Option<String> {
    let trimmed = raw.trim();
    pattern.is_match(trimmed).then(|| trimmed.to_string())
}

/// Hospital-issued patient identifier (digits only).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PatientHospitalId(String);

impl PatientHospitalId {
    pub fn parse(raw: &str) -> Result<Self, FieldValidationError> {
        match_trimmed(raw, &HOSPITAL_ID_RE)
            .map(Self)
            .ok_or_else(|| FieldValidationError::InvalidHospitalId(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Full patient name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
    pub fn parse(raw: &str) -> Result<Self, FieldValidationError> {
        match_trimmed(raw, &PERSON_NAME_RE)
            .map(Self)
            .ok_or_else(|| FieldValidationError::InvalidName(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Name the patient prefers to be addressed by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PreferredName(String);

impl PreferredName {
    pub fn parse(raw: &str) -> Result<Self, FieldValidationError> {
        match_trimmed(raw, &PERSON_NAME_RE)
            .map(Self)
            .ok_or_else(|| FieldValidationError::InvalidPreferredName(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Collection members share one shape: a trimmed, non-blank payload compared by value.
macro_rules! text_value {
    ($(#[$meta:meta])* $name:ident => $error:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn parse(raw: &str) -> Result<Self, FieldValidationError> {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(FieldValidationError::$error(raw.to_string()));
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

text_value!(
    /// Food the patient likes or requires.
    FoodPreference => InvalidFoodPreference
);
text_value!(
    /// Free-text note about the patient's family situation.
    FamilyCondition => InvalidFamilyCondition
);
text_value!(Hobby => InvalidHobby);
text_value!(
    /// Short care label such as `diabetes` or `fall risk`.
    Tag => InvalidTag
);

/// Canonical patient record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Patient {
    hospital_id: PatientHospitalId,
    name: Name,
    preferred_name: PreferredName,
    food_preferences: BTreeSet<FoodPreference>,
    family_conditions: BTreeSet<FamilyCondition>,
    hobbies: BTreeSet<Hobby>,
    tags: BTreeSet<Tag>,
    events: BTreeSet<EventSpec>,
}

impl Patient {
    /// Creates a patient with empty collections.
    pub fn new(hospital_id: PatientHospitalId, name: Name, preferred_name: PreferredName) -> Self {
        Self {
            hospital_id,
            name,
            preferred_name,
            food_preferences: BTreeSet::new(),
            family_conditions: BTreeSet::new(),
            hobbies: BTreeSet::new(),
            tags: BTreeSet::new(),
            events: BTreeSet::new(),
        }
    }

    pub fn with_food_preferences(mut self, values: BTreeSet<FoodPreference>) -> Self {
        self.food_preferences = values;
        self
    }

    pub fn with_family_conditions(mut self, values: BTreeSet<FamilyCondition>) -> Self {
        self.family_conditions = values;
        self
    }

    pub fn with_hobbies(mut self, values: BTreeSet<Hobby>) -> Self {
        self.hobbies = values;
        self
    }

    pub fn with_tags(mut self, values: BTreeSet<Tag>) -> Self {
        self.tags = values;
        self
    }

    pub fn with_events(mut self, values: BTreeSet<EventSpec>) -> Self {
        self.events = values;
        self
    }

    pub fn hospital_id(&self) -> &PatientHospitalId {
        &self.hospital_id
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn preferred_name(&self) -> &PreferredName {
        &self.preferred_name
    }

    pub fn food_preferences(&self) -> &BTreeSet<FoodPreference> {
        &self.food_preferences
    }

    pub fn family_conditions(&self) -> &BTreeSet<FamilyCondition> {
        &self.family_conditions
    }

    pub fn hobbies(&self) -> &BTreeSet<Hobby> {
        &self.hobbies
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    pub fn events(&self) -> &BTreeSet<EventSpec> {
        &self.events
    }

    /// Returns whether `other` is the same patient by hospital id.
    pub fn is_same_patient(&self, other: &Patient) -> bool {
        self.hospital_id == other.hospital_id
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldValidationError, FoodPreference, Name, PatientHospitalId, Tag};

    #[test]
    fn hospital_id_accepts_digits_only() {
        assert_eq!(PatientHospitalId::parse(" 12345 ").unwrap().as_str(), "12345");
        assert_eq!(
            PatientHospitalId::parse("12a45").unwrap_err(),
            FieldValidationError::InvalidHospitalId("12a45".to_string())
        );
        assert!(PatientHospitalId::parse("").is_err());
    }

    #[test]
    fn name_rejects_leading_space_after_trim_and_symbols() {
        assert_eq!(Name::parse("  Alex Yeoh ").unwrap().as_str(), "Alex Yeoh");
        assert!(Name::parse("Alex*").is_err());
        assert!(Name::parse("   ").is_err());
    }

    #[test]
    fn text_values_trim_and_reject_blank() {
        assert_eq!(FoodPreference::parse(" Chicken rice ").unwrap().as_str(), "Chicken rice");
        assert_eq!(
            Tag::parse("  ").unwrap_err(),
            FieldValidationError::InvalidTag("  ".to_string())
        );
    }
}
