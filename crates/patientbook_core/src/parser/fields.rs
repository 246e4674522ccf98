//! Prefixed field values handed over by the command tokenizer.
//!
//! # Responsibility
//! - Name the field prefixes understood by the patient commands.
//! - Hold the raw values per prefix in input order.
//!
//! # Invariants
//! - Values are stored exactly as provided; no trimming or validation here.
//! - A collection prefix given once with an empty value (`t/`) is the
//!   wire form of "clear this collection".

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Field prefix of a patient command argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    HospitalId,
    Name,
    PreferredName,
    FoodPreference,
    FamilyCondition,
    Hobby,
    Tag,
    EventName,
    EventDate,
}

impl FieldKey {
    /// Every known prefix, in command-help order.
    pub const ALL: [FieldKey; 9] = [
        FieldKey::HospitalId,
        FieldKey::Name,
        FieldKey::PreferredName,
        FieldKey::FoodPreference,
        FieldKey::FamilyCondition,
        FieldKey::Hobby,
        FieldKey::Tag,
        FieldKey::EventName,
        FieldKey::EventDate,
    ];

    /// Prefix text as typed by the user.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::HospitalId => "id/",
            Self::Name => "n/",
            Self::PreferredName => "pn/",
            Self::FoodPreference => "fp/",
            Self::FamilyCondition => "fc/",
            Self::Hobby => "h/",
            Self::Tag => "t/",
            Self::EventName => "en/",
            Self::EventDate => "ed/",
        }
    }

    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.prefix() == prefix)
    }
}

impl Display for FieldKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Raised when a single-valued prefix appears more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateFieldError {
    pub keys: Vec<FieldKey>,
}

impl Display for DuplicateFieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let prefixes = self
            .keys
            .iter()
            .map(|key| key.prefix())
            .collect::<Vec<_>>()
            .join(" ");
        write!(
            f,
            "Multiple values specified for the following single-valued field(s): {prefixes}"
        )
    }
}

impl Error for DuplicateFieldError {}

/// Mapping from field prefix to the raw values given for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFields {
    values: BTreeMap<FieldKey, Vec<String>>,
}

impl RawFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one value for `key`.
    pub fn push(&mut self, key: FieldKey, value: impl Into<String>) -> &mut Self {
        self.values.entry(key).or_default().push(value.into());
        self
    }

    /// Builder form of `push`.
    pub fn with(mut self, key: FieldKey, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    /// Last value given for `key`, if any.
    pub fn value(&self, key: FieldKey) -> Option<&str> {
        self.all_values(key).last().map(String::as_str)
    }

    /// All values given for `key`, in input order.
    pub fn all_values(&self, key: FieldKey) -> &[String] {
        self.values.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of values across all prefixes.
    pub fn len(&self) -> usize {
        self.values.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rejects repeated values for any of `keys`.
    pub fn verify_no_duplicates_for(&self, keys: &[FieldKey]) -> Result<(), DuplicateFieldError> {
        let duplicated: Vec<FieldKey> = keys
            .iter()
            .copied()
            .filter(|key| self.all_values(*key).len() > 1)
            .collect();
        if duplicated.is_empty() {
            Ok(())
        } else {
            Err(DuplicateFieldError { keys: duplicated })
        }
    }
}

impl<V: Into<String>> FromIterator<(FieldKey, V)> for RawFields {
    fn from_iter<I: IntoIterator<Item = (FieldKey, V)>>(iter: I) -> Self {
        let mut fields = Self::new();
        for (key, value) in iter {
            fields.push(key, value);
        }
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::{FieldKey, RawFields};

    #[test]
    fn prefixes_are_unique_and_round_trip() {
        for key in FieldKey::ALL {
            assert_eq!(FieldKey::from_prefix(key.prefix()), Some(key));
        }
        assert_eq!(FieldKey::from_prefix("x/"), None);
    }

    #[test]
    fn value_returns_last_and_all_values_keeps_order() {
        let fields: RawFields = [
            (FieldKey::Tag, "a"),
            (FieldKey::Name, "First"),
            (FieldKey::Tag, "b"),
            (FieldKey::Name, "Second"),
        ]
        .into_iter()
        .collect();

        assert_eq!(fields.value(FieldKey::Name), Some("Second"));
        assert_eq!(fields.all_values(FieldKey::Tag), ["a", "b"]);
        assert!(fields.all_values(FieldKey::Hobby).is_empty());
        assert_eq!(fields.len(), 4);
    }

    #[test]
    fn verify_no_duplicates_reports_every_repeated_key() {
        let fields = RawFields::new()
            .with(FieldKey::HospitalId, "1")
            .with(FieldKey::HospitalId, "2")
            .with(FieldKey::Name, "A")
            .with(FieldKey::Tag, "x")
            .with(FieldKey::Tag, "y");

        let err = fields
            .verify_no_duplicates_for(&[FieldKey::HospitalId, FieldKey::Name, FieldKey::Tag])
            .unwrap_err();
        assert_eq!(err.keys, vec![FieldKey::HospitalId, FieldKey::Tag]);
        assert!(err.to_string().ends_with("id/ t/"));
    }
}
