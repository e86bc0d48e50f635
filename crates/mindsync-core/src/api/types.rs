//! Wire types for the backend endpoints.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Classification result from `POST /detect_mood`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodResult {
    pub label: String,
    pub friendly: String,
    pub emoji: String,
    /// In `[0, 1]`.
    pub confidence: f64,
}

impl MoodResult {
    /// Placeholder shown when classification is unavailable.
    pub fn neutral() -> Self {
        Self {
            label: "neutral".to_string(),
            friendly: "Neutral".to_string(),
            emoji: "🙂".to_string(),
            confidence: 0.0,
        }
    }

    /// Confidence as a whole percentage, clamped to 0..=100.
    pub fn confidence_percent(&self) -> u32 {
        if !self.confidence.is_finite() {
            return 0;
        }
        (self.confidence * 100.0).round().clamp(0.0, 100.0) as u32
    }
}

/// Renders the mood chip, e.g. `😅 Mixed (82%)`.
impl fmt::Display for MoodResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}%)",
            self.emoji,
            self.friendly,
            self.confidence_percent()
        )
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct MoodRequest<'a> {
    pub text: &'a str,
}

/// One task as sent to `POST /generate_schedule`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPayload {
    pub name: String,
    pub hours: u32,
    pub minutes: u32,
}

/// Body of `POST /generate_schedule`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub tasks: Vec<TaskPayload>,
    pub mood_label: String,
    /// `HH:MM`
    pub start_time: String,
    pub break_min: u32,
}

/// Response of `POST /generate_schedule`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub events: Vec<CalendarEvent>,
    /// Ordering strategy the backend picked for the mood, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<CalendarEvent>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<CalendarEvent>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Calendar entry produced by the backend.
///
/// Kept as raw JSON; the client never validates its shape. Accessors read
/// the conventional `title`/`start`/`end` fields when they are present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarEvent(pub serde_json::Value);

impl CalendarEvent {
    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(|v| v.as_str())
    }

    pub fn start(&self) -> Option<NaiveDateTime> {
        self.0.get("start").and_then(|v| v.as_str()).and_then(parse_local)
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        self.0.get("end").and_then(|v| v.as_str()).and_then(parse_local)
    }

    pub fn raw(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for CalendarEvent {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Accepts `YYYY-MM-DDTHH:MM[:SS]` local times and RFC 3339 timestamps.
fn parse_local(s: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local()))
}
