//! Partial-update and create-flow field resolution.
//!
//! # Responsibility
//! - Turn `RawFields` into an `EditPatientDescriptor` for the edit command.
//! - Turn `RawFields` into a whole `Patient` or `EventSpec` for create flows.
//!
//! # Invariants
//! - Resolution is pure: nothing stored is read or mutated here.
//! - The `[""]` clear sentinel never leaves this module; callers only
//!   see `CollectionEdit::Clear`.
//! - A descriptor with no populated slot is never returned.

use crate::config::CoreConfig;
use crate::model::descriptor::{CollectionEdit, EditPatientDescriptor};
use crate::model::event::{EventNameRule, EventSpec, EventValidationError};
use crate::model::patient::{
    FamilyCondition, FieldValidationError, FoodPreference, Hobby, Name, Patient,
    PatientHospitalId, PreferredName, Tag,
};
use crate::parser::fields::{DuplicateFieldError, FieldKey, RawFields};
use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// User-facing message for an edit request that changes nothing.
pub const MESSAGE_NOT_EDITED: &str = "At least one field to edit must be provided.";

const SINGLE_VALUED_PATIENT_FIELDS: &[FieldKey] =
    &[FieldKey::HospitalId, FieldKey::Name, FieldKey::PreferredName];
const SINGLE_VALUED_EVENT_FIELDS: &[FieldKey] = &[FieldKey::EventName, FieldKey::EventDate];

/// Errors from resolving raw command fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// A single-valued prefix was repeated.
    DuplicateField(DuplicateFieldError),
    /// A create flow is missing a required prefix.
    MissingField(FieldKey),
    /// A patient attribute failed validation.
    Field(FieldValidationError),
    /// An event name or spec failed validation.
    Event(EventValidationError),
    /// Event names and specs cannot be paired one to one.
    UnpairedEvents { names: usize, specs: usize },
    /// The edit request populates no field.
    NotEdited,
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateField(err) => write!(f, "{err}"),
            Self::MissingField(key) => write!(f, "missing required field `{key}`"),
            Self::Field(err) => write!(f, "{err}"),
            Self::Event(err) => write!(f, "{err}"),
            Self::UnpairedEvents { names, specs } => write!(
                f,
                "every event name needs exactly one date: got {names} name(s) and {specs} date(s)"
            ),
            Self::NotEdited => f.write_str(MESSAGE_NOT_EDITED),
        }
    }
}

impl Error for ResolveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DuplicateField(err) => Some(err),
            Self::Field(err) => Some(err),
            Self::Event(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DuplicateFieldError> for ResolveError {
    fn from(value: DuplicateFieldError) -> Self {
        Self::DuplicateField(value)
    }
}

impl From<FieldValidationError> for ResolveError {
    fn from(value: FieldValidationError) -> Self {
        Self::Field(value)
    }
}

impl From<EventValidationError> for ResolveError {
    fn from(value: EventValidationError) -> Self {
        Self::Event(value)
    }
}

/// Resolver for patient command fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct PartialUpdateResolver {
    event_name_rule: EventNameRule,
}

impl PartialUpdateResolver {
    /// Creates a resolver using the rules carried by `config`.
    pub fn new(config: &CoreConfig) -> Self {
        Self::with_event_name_rule(config.event_name_rule)
    }

    pub fn with_event_name_rule(event_name_rule: EventNameRule) -> Self {
        Self { event_name_rule }
    }

    pub fn event_name_rule(&self) -> EventNameRule {
        self.event_name_rule
    }

    /// Resolves an edit request into the set of field changes.
    ///
    /// # Contract
    /// - Absent scalar prefix → slot stays `None`.
    /// - Absent collection prefix → `CollectionEdit::Unchanged`.
    /// - Collection prefix given once with `""` → `CollectionEdit::Clear`.
    /// - Otherwise every entry is validated → `CollectionEdit::Replace`.
    ///
    /// # Errors
    /// - `DuplicateField` when `id/`, `n/` or `pn/` is repeated.
    /// - `Field` / `Event` when any provided value fails validation.
    /// - `UnpairedEvents` when `en/` and `ed/` counts differ.
    /// - `NotEdited` when no slot ends up populated.
    pub fn resolve_edit(&self, fields: &RawFields) -> Result<EditPatientDescriptor, ResolveError> {
        debug!(
            "event=edit_resolve module=parser status=start values={}",
            fields.len()
        );
        fields.verify_no_duplicates_for(SINGLE_VALUED_PATIENT_FIELDS)?;

        let descriptor = EditPatientDescriptor {
            hospital_id: fields
                .value(FieldKey::HospitalId)
                .map(PatientHospitalId::parse)
                .transpose()?,
            name: fields.value(FieldKey::Name).map(Name::parse).transpose()?,
            preferred_name: fields
                .value(FieldKey::PreferredName)
                .map(PreferredName::parse)
                .transpose()?,
            food_preferences: resolve_collection_edit(
                fields.all_values(FieldKey::FoodPreference),
                FoodPreference::parse,
            )?,
            family_conditions: resolve_collection_edit(
                fields.all_values(FieldKey::FamilyCondition),
                FamilyCondition::parse,
            )?,
            hobbies: resolve_collection_edit(fields.all_values(FieldKey::Hobby), Hobby::parse)?,
            tags: resolve_collection_edit(fields.all_values(FieldKey::Tag), Tag::parse)?,
            events: self.resolve_event_edit(fields)?,
        };

        if !descriptor.is_any_field_edited() {
            warn!("event=edit_resolve module=parser status=rejected reason=not_edited");
            return Err(ResolveError::NotEdited);
        }

        info!(
            "event=edit_resolve module=parser status=ok edited_fields={}",
            descriptor.edited_field_count()
        );
        Ok(descriptor)
    }

    /// Resolves a create request into a validated patient.
    ///
    /// `id/`, `n/` and `pn/` are required. Collection prefixes are optional
    /// and every provided entry must be valid; there is no clear sentinel
    /// when creating.
    pub fn resolve_patient(&self, fields: &RawFields) -> Result<Patient, ResolveError> {
        fields.verify_no_duplicates_for(SINGLE_VALUED_PATIENT_FIELDS)?;

        let hospital_id = PatientHospitalId::parse(required(fields, FieldKey::HospitalId)?)?;
        let name = Name::parse(required(fields, FieldKey::Name)?)?;
        let preferred_name = PreferredName::parse(required(fields, FieldKey::PreferredName)?)?;

        let patient = Patient::new(hospital_id, name, preferred_name)
            .with_food_preferences(resolve_set(
                fields.all_values(FieldKey::FoodPreference),
                FoodPreference::parse,
            )?)
            .with_family_conditions(resolve_set(
                fields.all_values(FieldKey::FamilyCondition),
                FamilyCondition::parse,
            )?)
            .with_hobbies(resolve_set(fields.all_values(FieldKey::Hobby), Hobby::parse)?)
            .with_tags(resolve_set(fields.all_values(FieldKey::Tag), Tag::parse)?)
            .with_events(self.pair_events(
                fields.all_values(FieldKey::EventName),
                fields.all_values(FieldKey::EventDate),
            )?);

        debug!(
            "event=patient_resolve module=parser status=ok events={}",
            patient.events().len()
        );
        Ok(patient)
    }

    /// Resolves exactly one `en/` + `ed/` pair into an event.
    pub fn resolve_event(&self, fields: &RawFields) -> Result<EventSpec, ResolveError> {
        fields.verify_no_duplicates_for(SINGLE_VALUED_EVENT_FIELDS)?;
        let name = required(fields, FieldKey::EventName)?;
        let spec = required(fields, FieldKey::EventDate)?;
        Ok(EventSpec::parse_with(name, spec, self.event_name_rule)?)
    }

    fn resolve_event_edit(
        &self,
        fields: &RawFields,
    ) -> Result<CollectionEdit<EventSpec>, ResolveError> {
        let names = fields.all_values(FieldKey::EventName);
        let specs = fields.all_values(FieldKey::EventDate);
        match (names, specs) {
            ([], []) => Ok(CollectionEdit::Unchanged),
            ([], [only]) if only.is_empty() => Ok(CollectionEdit::Clear),
            _ => self.pair_events(names, specs).map(CollectionEdit::Replace),
        }
    }

    fn pair_events(
        &self,
        names: &[String],
        specs: &[String],
    ) -> Result<BTreeSet<EventSpec>, ResolveError> {
        if names.len() != specs.len() {
            return Err(ResolveError::UnpairedEvents {
                names: names.len(),
                specs: specs.len(),
            });
        }
        names
            .iter()
            .zip(specs)
            .map(|(name, spec)| {
                EventSpec::parse_with(name, spec, self.event_name_rule).map_err(ResolveError::from)
            })
            .collect()
    }
}

fn required(fields: &RawFields, key: FieldKey) -> Result<&str, ResolveError> {
    fields.value(key).ok_or(ResolveError::MissingField(key))
}

fn resolve_set<T, F>(raw: &[String], parse: F) -> Result<BTreeSet<T>, FieldValidationError>
where
    T: Ord,
    F: Fn(&str) -> Result<T, FieldValidationError>,
{
    raw.iter().map(|entry| parse(entry.as_str())).collect()
}

fn resolve_collection_edit<T, F>(
    raw: &[String],
    parse: F,
) -> Result<CollectionEdit<T>, FieldValidationError>
where
    T: Ord,
    F: Fn(&str) -> Result<T, FieldValidationError>,
{
    match raw {
        [] => Ok(CollectionEdit::Unchanged),
        [only] if only.is_empty() => Ok(CollectionEdit::Clear),
        entries => resolve_set(entries, parse).map(CollectionEdit::Replace),
    }
}
