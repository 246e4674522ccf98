//! Core runtime configuration.
//!
//! # Responsibility
//! - Collect the behavior switches of the event grammar in one value.
//! - Load them from `PATIENTBOOK_*` environment variables.
//!
//! # Invariants
//! - Unset variables fall back to `CoreConfig::default()`.
//! - Set-but-invalid variables are errors, never silently ignored.

use crate::logging::default_log_level;
use crate::model::event::{DateOrdering, EventNameRule};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_EVENT_NAME_RULE: &str = "PATIENTBOOK_EVENT_NAME_RULE";
pub const ENV_DATE_ORDER: &str = "PATIENTBOOK_DATE_ORDER";
pub const ENV_LOG_LEVEL: &str = "PATIENTBOOK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "PATIENTBOOK_LOG_DIR";

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue {
                name,
                value,
                expected,
            } => write!(f, "invalid config `{name}`=`{value}`; expected {expected}"),
        }
    }
}

impl Error for ConfigError {}

/// Behavior switches for the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Acceptance rule applied to event names.
    pub event_name_rule: EventNameRule,
    /// Date comparison used by sorted event views.
    pub date_ordering: DateOrdering,
    /// Log level passed to `init_logging`.
    pub log_level: String,
    /// Rolling log directory; logging stays off when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            event_name_rule: EventNameRule::default(),
            date_ordering: DateOrdering::default(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_EVENT_NAME_RULE) {
            config.event_name_rule =
                EventNameRule::from_config_str(&value).ok_or(ConfigError::InvalidValue {
                    name: ENV_EVENT_NAME_RULE,
                    value,
                    expected: "require_symbol|alphanumeric_only",
                })?;
        }
        if let Some(value) = lookup(ENV_DATE_ORDER) {
            config.date_ordering =
                DateOrdering::from_config_str(&value).ok_or(ConfigError::InvalidValue {
                    name: ENV_DATE_ORDER,
                    value,
                    expected: "lexicographic|chronological",
                })?;
        }
        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            config.log_level = value;
        }
        config.log_dir = lookup(ENV_LOG_DIR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(config)
    }
}
