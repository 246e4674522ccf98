//! Sample patients for first-run seeding and smoke checks.
//!
//! Built through `PartialUpdateResolver::resolve_patient`, so every sample
//! passes exactly the validation a typed-in patient would. Sample event names
//! are plain words; under `EventNameRule::RequireSymbol` they get a trailing
//! `!` so they load under either rule.

use crate::model::event::EventNameRule;
use crate::model::patient::Patient;
use crate::parser::fields::{FieldKey, RawFields};
use crate::parser::resolver::{PartialUpdateResolver, ResolveError};

struct SamplePatient {
    hospital_id: &'static str,
    name: &'static str,
    preferred_name: &'static str,
    food_preferences: &'static [&'static str],
    family_conditions: &'static [&'static str],
    hobbies: &'static [&'static str],
    tags: &'static [&'static str],
    events: &'static [(&'static str, &'static str)],
}

const SAMPLE_PATIENTS: &[SamplePatient] = &[
    SamplePatient {
        hospital_id: "12345",
        name: "Alex Yeoh Jia Jun",
        preferred_name: "Alex",
        food_preferences: &["Chicken rice"],
        family_conditions: &["Stable", "Has 2 sons that visits him regularly"],
        hobbies: &["Singing karaoke"],
        tags: &["diabetes"],
        events: &[("Birthday celebration", "20-12-2024")],
    },
    SamplePatient {
        hospital_id: "12346",
        name: "Bernice Yu Sheng Huat",
        preferred_name: "Bern",
        food_preferences: &["Char Kuay Tiao", "Black Carrot Cake"],
        family_conditions: &["Lives alone", "no family members around"],
        hobbies: &["Playing Mahjong"],
        tags: &["high blood pressure"],
        events: &[("Family Visit", "30-03-2024, 15:00 - 18:00")],
    },
    SamplePatient {
        hospital_id: "12347",
        name: "Mary Jane",
        preferred_name: "Mary",
        food_preferences: &["Korean"],
        family_conditions: &["Lives with only daughter", "quarrels regularly with daughter"],
        hobbies: &["Watching Drama"],
        tags: &["fall risk"],
        events: &[],
    },
    SamplePatient {
        hospital_id: "12348",
        name: "David Li",
        preferred_name: "David",
        food_preferences: &["Bak Kut Teh"],
        family_conditions: &["Son visits him every weekend"],
        hobbies: &["Plays erhu"],
        tags: &["diabetes", "skin irritation"],
        events: &[],
    },
    SamplePatient {
        hospital_id: "12349",
        name: "Irfan Ibrahim",
        preferred_name: "Fan",
        food_preferences: &["Roti Prata"],
        family_conditions: &["Children encountered accident 2 months ago"],
        hobbies: &["Plays badminton"],
        tags: &["tumour"],
        events: &[],
    },
    SamplePatient {
        hospital_id: "12350",
        name: "Roy Balakrishnan",
        preferred_name: "Rony",
        food_preferences: &["Fish Ball Soup"],
        family_conditions: &["Financial problem"],
        hobbies: &["Jog around park"],
        tags: &["wheelchair"],
        events: &[],
    },
];

impl SamplePatient {
    fn raw_fields(&self, rule: EventNameRule) -> RawFields {
        let mut fields = RawFields::new()
            .with(FieldKey::HospitalId, self.hospital_id)
            .with(FieldKey::Name, self.name)
            .with(FieldKey::PreferredName, self.preferred_name);
        let collections = [
            (FieldKey::FoodPreference, self.food_preferences),
            (FieldKey::FamilyCondition, self.family_conditions),
            (FieldKey::Hobby, self.hobbies),
            (FieldKey::Tag, self.tags),
        ];
        for (key, values) in collections {
            for value in values {
                fields.push(key, *value);
            }
        }
        for (name, spec) in self.events {
            fields.push(FieldKey::EventName, sample_event_name(name, rule));
            fields.push(FieldKey::EventDate, *spec);
        }
        fields
    }
}

fn sample_event_name(name: &str, rule: EventNameRule) -> String {
    match rule {
        EventNameRule::RequireSymbol => format!("{name}!"),
        EventNameRule::AlphanumericOnly => name.to_string(),
    }
}

/// Builds the sample patients with `resolver`'s rules.
///
/// Event names are shaped to the resolver's `EventNameRule`, so seeding
/// succeeds under every configured rule.
pub fn sample_patients(resolver: &PartialUpdateResolver) -> Result<Vec<Patient>, ResolveError> {
    let rule = resolver.event_name_rule();
    SAMPLE_PATIENTS
        .iter()
        .map(|sample| resolver.resolve_patient(&sample.raw_fields(rule)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::sample_patients;
    use crate::model::event::EventNameRule;
    use crate::parser::resolver::PartialUpdateResolver;

    #[test]
    fn samples_resolve_with_default_rules() {
        let patients = sample_patients(&PartialUpdateResolver::default()).unwrap();
        assert_eq!(patients.len(), 6);
        assert_eq!(patients[0].events().len(), 1);
        assert_eq!(
            patients[1].events().iter().next().unwrap().to_string(),
            "Family Visit! (30-03-2024, from 15:00 to 18:00)"
        );
    }

    #[test]
    fn samples_resolve_under_alphanumeric_only_rule() {
        let resolver = PartialUpdateResolver::with_event_name_rule(EventNameRule::AlphanumericOnly);
        let patients = sample_patients(&resolver).unwrap();
        assert_eq!(patients.len(), 6);
        assert_eq!(
            patients[0].events().iter().next().unwrap().to_string(),
            "Birthday celebration (20-12-2024)"
        );
        assert_eq!(
            patients[1].events().iter().next().unwrap().to_string(),
            "Family Visit (30-03-2024, from 15:00 to 18:00)"
        );
    }
}
