//! Per-session schedule settings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::storage::config::ScheduleConfig;
use crate::tasks::coerce_count;

/// Which calendar the schedule is meant for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarType {
    #[default]
    Local,
    Google,
}

impl FromStr for CalendarType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(CalendarType::Local),
            "google" => Ok(CalendarType::Google),
            other => Err(ValidationError::InvalidValue {
                field: "calendar_type".to_string(),
                message: format!("'{other}' is not one of local, google"),
            }),
        }
    }
}

impl fmt::Display for CalendarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CalendarType::Local => "local",
            CalendarType::Google => "google",
        })
    }
}

/// Start time, break length, timezone and calendar type.
///
/// Fields are independent; nothing checks them against each other or
/// against the task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSettings {
    /// `HH:MM`, passed through to the backend as typed.
    pub start: String,
    pub break_min: u32,
    /// IANA zone name.
    pub timezone: String,
    pub calendar_type: CalendarType,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self::from_config(&ScheduleConfig::default())
    }
}

impl ScheduleSettings {
    pub fn from_config(config: &ScheduleConfig) -> Self {
        Self {
            start: config.start_time.clone(),
            break_min: config.break_min,
            timezone: config.timezone.clone(),
            calendar_type: config.calendar_type,
        }
    }

    /// Set one field by name from raw input.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ValidationError> {
        match key.trim() {
            "start" | "start_time" => self.start = value.trim().to_string(),
            "break" | "break_min" => self.break_min = coerce_count(value),
            "timezone" | "tz" => self.timezone = value.trim().to_string(),
            "calendar" | "calendar_type" => self.calendar_type = value.parse()?,
            other => {
                return Err(ValidationError::InvalidValue {
                    field: other.to_string(),
                    message: "unknown setting (expected start, break_min, timezone or calendar_type)"
                        .to_string(),
                })
            }
        }
        Ok(())
    }
}
