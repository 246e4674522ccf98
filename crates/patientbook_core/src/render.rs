//! Plain-text patient card rendering.
//!
//! Collections are listed in value order, tags in name order and events in
//! the order given by the configured `DateOrdering`, numbered from 1.

use crate::model::event::{DateOrdering, EventSpec};
use crate::model::patient::Patient;
const BULLET: &str = "\u{2981}";

/// Renders one patient card. `display_index` is the 1-based list position.
pub fn render_patient_card(
    patient: &Patient,
    display_index: usize,
    ordering: DateOrdering,
) -> String {
    let mut card = String::new();
    card.push_str(&format!(
        "{display_index}. {} ({})\n",
        patient.name().as_str(),
        patient.preferred_name().as_str()
    ));
    card.push_str(&format!("Hospital ID: {}\n", patient.hospital_id().as_str()));

    write_section(
        &mut card,
        "Food preferences",
        patient.food_preferences().iter().map(|value| value.as_str()),
    );
    write_section(
        &mut card,
        "Family conditions",
        patient.family_conditions().iter().map(|value| value.as_str()),
    );
    write_section(
        &mut card,
        "Hobbies",
        patient.hobbies().iter().map(|value| value.as_str()),
    );

    if !patient.tags().is_empty() {
        let tags = patient
            .tags()
            .iter()
            .map(|tag| format!("[{}]", tag.as_str()))
            .collect::<Vec<_>>()
            .join(" ");
        card.push_str(&format!("Tags: {tags}\n"));
    }

    if !patient.events().is_empty() {
        card.push_str("Events:\n");
        let mut events: Vec<&EventSpec> = patient.events().iter().collect();
        events.sort_by(|left, right| ordering.compare_events(left, right));
        for (position, event) in events.into_iter().enumerate() {
            card.push_str(&format!("{}. {event}\n", position + 1));
        }
    }

    card
}

fn write_section<'a>(card: &mut String, title: &str, values: impl Iterator<Item = &'a str>) {
    let mut values = values.peekable();
    if values.peek().is_none() {
        return;
    }
    card.push_str(&format!("{title}:\n"));
    for value in values {
        card.push_str(&format!("  {BULLET} {value}\n"));
    }
}
