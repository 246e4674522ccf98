//! Partial-update descriptor for patient edits.
//!
//! # Responsibility
//! - Describe exactly which patient fields an edit changes.
//! - Rebuild an edited `Patient` from an original plus a descriptor.
//!
//! # Invariants
//! - A populated collection slot replaces the whole collection.
//! - Unpopulated slots never touch the original value.

use crate::model::event::EventSpec;
use crate::model::patient::{
    FamilyCondition, FoodPreference, Hobby, Name, Patient, PatientHospitalId, PreferredName, Tag,
};
use std::collections::BTreeSet;

/// Edit instruction for one collection field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionEdit<T> {
    /// Keep the current collection.
    Unchanged,
    /// Replace the current collection with the empty set.
    Clear,
    /// Replace the current collection with this set.
    Replace(BTreeSet<T>),
}

impl<T> Default for CollectionEdit<T> {
    fn default() -> Self {
        Self::Unchanged
    }
}

impl<T: Ord + Clone> CollectionEdit<T> {
    /// Returns whether this slot changes anything.
    pub fn is_edited(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }

    /// Returns the collection that results from applying this edit.
    pub fn apply(&self, current: &BTreeSet<T>) -> BTreeSet<T> {
        match self {
            Self::Unchanged => current.clone(),
            Self::Clear => BTreeSet::new(),
            Self::Replace(values) => values.clone(),
        }
    }

    /// Target set when edited, `None` when unchanged.
    pub fn target(&self) -> Option<BTreeSet<T>> {
        match self {
            Self::Unchanged => None,
            Self::Clear => Some(BTreeSet::new()),
            Self::Replace(values) => Some(values.clone()),
        }
    }
}

/// Field-level changes produced by resolving an edit request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPatientDescriptor {
    pub hospital_id: Option<PatientHospitalId>,
    pub name: Option<Name>,
    pub preferred_name: Option<PreferredName>,
    pub food_preferences: CollectionEdit<FoodPreference>,
    pub family_conditions: CollectionEdit<FamilyCondition>,
    pub hobbies: CollectionEdit<Hobby>,
    pub tags: CollectionEdit<Tag>,
    pub events: CollectionEdit<EventSpec>,
}

impl EditPatientDescriptor {
    /// Returns whether at least one slot is populated.
    pub fn is_any_field_edited(&self) -> bool {
        self.edited_field_count() > 0
    }

    /// Number of populated slots.
    pub fn edited_field_count(&self) -> usize {
        [
            self.hospital_id.is_some(),
            self.name.is_some(),
            self.preferred_name.is_some(),
            self.food_preferences.is_edited(),
            self.family_conditions.is_edited(),
            self.hobbies.is_edited(),
            self.tags.is_edited(),
            self.events.is_edited(),
        ]
        .into_iter()
        .filter(|edited| *edited)
        .count()
    }

    /// Builds the edited patient. `patient` itself is left untouched.
    pub fn apply_to(&self, patient: &Patient) -> Patient {
        Patient::new(
            self.hospital_id
                .clone()
                .unwrap_or_else(|| patient.hospital_id().clone()),
            self.name.clone().unwrap_or_else(|| patient.name().clone()),
            self.preferred_name
                .clone()
                .unwrap_or_else(|| patient.preferred_name().clone()),
        )
        .with_food_preferences(self.food_preferences.apply(patient.food_preferences()))
        .with_family_conditions(self.family_conditions.apply(patient.family_conditions()))
        .with_hobbies(self.hobbies.apply(patient.hobbies()))
        .with_tags(self.tags.apply(patient.tags()))
        .with_events(self.events.apply(patient.events()))
    }
}
