use patientbook_core::{
    CollectionEdit, EventNameRule, EventSpec, EventValidationError, FieldKey,
    FieldValidationError, FoodPreference, PartialUpdateResolver, RawFields, ResolveError, Tag,
};
use std::collections::BTreeSet;

fn resolver() -> PartialUpdateResolver {
    PartialUpdateResolver::default()
}

#[test]
fn all_fields_absent_is_not_edited() {
    let err = resolver().resolve_edit(&RawFields::new()).unwrap_err();
    assert_eq!(err, ResolveError::NotEdited);
    assert_eq!(err.to_string(), "At least one field to edit must be provided.");
}

#[test]
fn scalar_fields_populate_only_their_slots() {
    let fields = RawFields::new()
        .with(FieldKey::Name, "Alex Tan")
        .with(FieldKey::PreferredName, " Al ");

    let descriptor = resolver().resolve_edit(&fields).unwrap();
    assert_eq!(descriptor.hospital_id, None);
    assert_eq!(descriptor.name.as_ref().map(|name| name.as_str()), Some("Alex Tan"));
    assert_eq!(
        descriptor.preferred_name.as_ref().map(|name| name.as_str()),
        Some("Al")
    );
    assert_eq!(descriptor.tags, CollectionEdit::Unchanged);
    assert_eq!(descriptor.events, CollectionEdit::Unchanged);
    assert_eq!(descriptor.edited_field_count(), 2);
}

#[test]
fn single_empty_entry_clears_collection() {
    let fields = RawFields::new().with(FieldKey::Tag, "");

    let descriptor = resolver().resolve_edit(&fields).unwrap();
    assert_eq!(descriptor.tags, CollectionEdit::Clear);
    assert_ne!(descriptor.tags, CollectionEdit::Unchanged);
    assert_eq!(descriptor.hobbies, CollectionEdit::Unchanged);
    assert!(descriptor.is_any_field_edited());
}

#[test]
fn collection_entries_replace_whole_set_and_collapse_duplicates() {
    let fields = RawFields::new()
        .with(FieldKey::FoodPreference, "Laksa")
        .with(FieldKey::FoodPreference, "Chicken rice")
        .with(FieldKey::FoodPreference, "Laksa ");

    let descriptor = resolver().resolve_edit(&fields).unwrap();
    let expected = BTreeSet::from([
        FoodPreference::parse("Chicken rice").unwrap(),
        FoodPreference::parse("Laksa").unwrap(),
    ]);
    assert_eq!(descriptor.food_preferences, CollectionEdit::Replace(expected));
}

#[test]
fn invalid_value_rejects_whole_request() {
    let fields = RawFields::new()
        .with(FieldKey::Name, "Alex Tan")
        .with(FieldKey::HospitalId, "A123");

    let err = resolver().resolve_edit(&fields).unwrap_err();
    assert_eq!(
        err,
        ResolveError::Field(FieldValidationError::InvalidHospitalId("A123".to_string()))
    );

    let fields = RawFields::new()
        .with(FieldKey::Tag, "diabetes")
        .with(FieldKey::Tag, " ");
    assert!(matches!(
        resolver().resolve_edit(&fields),
        Err(ResolveError::Field(FieldValidationError::InvalidTag(_)))
    ));
}

#[test]
fn repeated_single_valued_prefix_is_duplicate_field() {
    let fields = RawFields::new()
        .with(FieldKey::Name, "Alex")
        .with(FieldKey::Name, "Bob")
        .with(FieldKey::Tag, "a")
        .with(FieldKey::Tag, "b");

    match resolver().resolve_edit(&fields).unwrap_err() {
        ResolveError::DuplicateField(duplicate) => assert_eq!(duplicate.keys, vec![FieldKey::Name]),
        other => panic!("expected duplicate field error, got {other:?}"),
    }
}

#[test]
fn events_are_paired_and_parsed() {
    let fields = RawFields::new()
        .with(FieldKey::EventName, "Birthday!")
        .with(FieldKey::EventDate, "20-12-2024")
        .with(FieldKey::EventName, "Family Visit!")
        .with(FieldKey::EventDate, "30-03-2024, 15:00 - 18:00");

    let descriptor = resolver().resolve_edit(&fields).unwrap();
    let expected = BTreeSet::from([
        EventSpec::parse("Birthday!", "20-12-2024").unwrap(),
        EventSpec::parse("Family Visit!", "30-03-2024, 15:00 - 18:00").unwrap(),
    ]);
    assert_eq!(descriptor.events, CollectionEdit::Replace(expected));
}

#[test]
fn event_clear_sentinel_and_pairing_errors() {
    let clear = RawFields::new().with(FieldKey::EventDate, "");
    assert_eq!(
        resolver().resolve_edit(&clear).unwrap().events,
        CollectionEdit::Clear
    );

    let unpaired = RawFields::new()
        .with(FieldKey::EventName, "Birthday!")
        .with(FieldKey::EventName, "Visit!")
        .with(FieldKey::EventDate, "20-12-2024");
    assert_eq!(
        resolver().resolve_edit(&unpaired).unwrap_err(),
        ResolveError::UnpairedEvents { names: 2, specs: 1 }
    );

    let bad_range = RawFields::new()
        .with(FieldKey::EventName, "Checkup!")
        .with(FieldKey::EventDate, "12-12-2023, 00:00 - 24:00");
    assert!(matches!(
        resolver().resolve_edit(&bad_range),
        Err(ResolveError::Event(EventValidationError::InvalidTimeRange(_)))
    ));
}

#[test]
fn resolver_applies_configured_event_name_rule() {
    let fields = RawFields::new()
        .with(FieldKey::EventName, "Birthday celebration")
        .with(FieldKey::EventDate, "20-12-2024");

    assert!(matches!(
        resolver().resolve_edit(&fields),
        Err(ResolveError::Event(EventValidationError::InvalidName { .. }))
    ));

    let lenient = PartialUpdateResolver::with_event_name_rule(EventNameRule::AlphanumericOnly);
    assert!(lenient.resolve_edit(&fields).unwrap().events.is_edited());
}

#[test]
fn resolve_patient_requires_identity_fields() {
    let fields = RawFields::new()
        .with(FieldKey::HospitalId, "12345")
        .with(FieldKey::Name, "Alex Yeoh");
    assert_eq!(
        resolver().resolve_patient(&fields).unwrap_err(),
        ResolveError::MissingField(FieldKey::PreferredName)
    );

    let patient = resolver()
        .resolve_patient(
            &fields
                .clone()
                .with(FieldKey::PreferredName, "Alex")
                .with(FieldKey::Tag, "diabetes")
                .with(FieldKey::Tag, "diabetes"),
        )
        .unwrap();
    assert_eq!(patient.hospital_id().as_str(), "12345");
    assert_eq!(
        patient.tags(),
        &BTreeSet::from([Tag::parse("diabetes").unwrap()])
    );
    assert!(patient.hobbies().is_empty());
    assert!(patient.events().is_empty());
}

#[test]
fn resolve_patient_has_no_clear_sentinel() {
    let fields = RawFields::new()
        .with(FieldKey::HospitalId, "12345")
        .with(FieldKey::Name, "Alex Yeoh")
        .with(FieldKey::PreferredName, "Alex")
        .with(FieldKey::Hobby, "");
    assert!(matches!(
        resolver().resolve_patient(&fields),
        Err(ResolveError::Field(FieldValidationError::InvalidHobby(_)))
    ));
}

#[test]
fn resolve_event_takes_exactly_one_pair() {
    let fields = RawFields::new()
        .with(FieldKey::EventName, "Dentist!")
        .with(FieldKey::EventDate, "02-02-2024, 08:00 - 09:00");
    assert_eq!(
        resolver().resolve_event(&fields).unwrap().to_string(),
        "Dentist! (02-02-2024, from 08:00 to 09:00)"
    );

    let missing = RawFields::new().with(FieldKey::EventName, "Dentist!");
    assert_eq!(
        resolver().resolve_event(&missing).unwrap_err(),
        ResolveError::MissingField(FieldKey::EventDate)
    );

    let repeated = fields.with(FieldKey::EventDate, "03-02-2024");
    assert!(matches!(
        resolver().resolve_event(&repeated),
        Err(ResolveError::DuplicateField(_))
    ));
}
