//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `patientbook_core` linkage and configuration loading.
//! - Seed the sample patient book and print it as text cards or JSON.
//!
//! Usage: `patientbook_cli [--json]`

use log::{error, info};
use patientbook_core::{
    init_logging_from_config, render_patient_card, sample_patients, CoreConfig,
    InMemoryPatientRepository, PartialUpdateResolver, PatientService,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run(std::env::args().skip(1).any(|arg| arg == "--json")) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("event=cli_run module=cli status=error");
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(as_json: bool) -> Result<(), String> {
    let config = CoreConfig::from_env().map_err(|err| err.to_string())?;
    init_logging_from_config(&config)?;
    info!(
        "event=cli_start module=cli status=ok ping={} version={}",
        patientbook_core::ping(),
        patientbook_core::core_version()
    );

    print!("{}", render_output(config, as_json)?);
    Ok(())
}

/// Seeds the sample patient book and renders it.
///
/// With `as_json` the output is exactly one JSON array, so stdout stays
/// machine-readable; the ping/version probe lines only lead the text view.
fn render_output(config: CoreConfig, as_json: bool) -> Result<String, String> {
    let resolver = PartialUpdateResolver::new(&config);
    let ordering = config.date_ordering;
    let mut service = PatientService::new(InMemoryPatientRepository::new(), config);
    for patient in sample_patients(&resolver).map_err(|err| err.to_string())? {
        service.add_patient(patient).map_err(|err| err.to_string())?;
    }

    if as_json {
        let json = serde_json::to_string_pretty(service.list_patients())
            .map_err(|err| format!("failed to serialize patients: {err}"))?;
        return Ok(format!("{json}\n"));
    }

    let mut output = format!(
        "patientbook_core ping={}\npatientbook_core version={}\n",
        patientbook_core::ping(),
        patientbook_core::core_version()
    );
    for (position, patient) in service.list_patients().iter().enumerate() {
        output.push_str(&format!(
            "{}\n",
            render_patient_card(patient, position + 1, ordering)
        ));
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::render_output;
    use patientbook_core::{CoreConfig, EventNameRule};

    #[test]
    fn json_output_is_a_single_json_document() {
        let output = render_output(CoreConfig::default(), true).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        let patients = json.as_array().unwrap();
        assert_eq!(patients.len(), 6);
        assert_eq!(patients[0]["hospital_id"], "12345");
        assert!(!output.contains("ping="));
    }

    #[test]
    fn text_output_leads_with_probe_lines() {
        let output = render_output(CoreConfig::default(), false).unwrap();
        assert!(output.starts_with("patientbook_core ping=pong\npatientbook_core version="));
        assert!(output.contains("1. Alex Yeoh Jia Jun (Alex)\n"));
    }

    #[test]
    fn seeding_succeeds_under_alphanumeric_only_names() {
        let config = CoreConfig {
            event_name_rule: EventNameRule::AlphanumericOnly,
            ..CoreConfig::default()
        };
        let output = render_output(config, false).unwrap();
        assert!(output.contains("Birthday celebration (20-12-2024)"));
    }
}
