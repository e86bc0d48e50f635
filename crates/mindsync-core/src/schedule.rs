//! Schedule generation flow.
//!
//! Builds the backend request from whatever the task list and settings hold
//! right now and keeps the latest event list for display.

use tracing::{debug, warn};

use crate::api::{CalendarEvent, ScheduleRequest, ScheduleResponse, TaskPayload};
use crate::error::RequestError;
use crate::flow::{Completion, Sequence};
use crate::settings::ScheduleSettings;
use crate::tasks::{Task, TaskList};

/// Name sent for rows the user left blank.
pub const UNTITLED_TASK: &str = "Untitled Task";

impl From<&Task> for TaskPayload {
    fn from(task: &Task) -> Self {
        let name = if task.name.trim().is_empty() {
            UNTITLED_TASK.to_string()
        } else {
            task.name.clone()
        };
        Self {
            name,
            hours: task.hours,
            minutes: task.minutes,
        }
    }
}

/// Request body for the current tasks, mood label and settings.
pub fn build_request(
    tasks: &TaskList,
    mood_label: &str,
    settings: &ScheduleSettings,
) -> ScheduleRequest {
    let label = mood_label.trim();
    ScheduleRequest {
        tasks: tasks.iter().map(TaskPayload::from).collect(),
        mood_label: if label.is_empty() {
            "neutral".to_string()
        } else {
            label.to_lowercase()
        },
        start_time: settings.start.clone(),
        break_min: settings.break_min,
    }
}

/// A request ready to send, tagged with its sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub seq: u64,
    pub request: ScheduleRequest,
}

#[derive(Debug, Clone, Default)]
pub struct ScheduleFlow {
    events: Vec<CalendarEvent>,
    strategy: Option<String>,
    seq: Sequence,
}

impl ScheduleFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the inputs into a new tagged request.
    ///
    /// Nothing in the task list or settings is consumed.
    pub fn submit(
        &mut self,
        tasks: &TaskList,
        mood_label: &str,
        settings: &ScheduleSettings,
    ) -> Submission {
        Submission {
            seq: self.seq.next(),
            request: build_request(tasks, mood_label, settings),
        }
    }

    /// Hand back the backend's answer for submission `seq`.
    pub fn complete(
        &mut self,
        seq: u64,
        result: Result<ScheduleResponse, RequestError>,
    ) -> Completion {
        if !self.seq.is_latest(seq) {
            debug!(seq, latest = self.seq.latest(), "dropping stale schedule response");
            return Completion::Stale;
        }
        match result {
            Ok(resp) => {
                debug!(events = resp.events.len(), strategy = ?resp.strategy, "schedule received");
                self.events = resp.events;
                self.strategy = resp.strategy;
                Completion::Applied
            }
            Err(err) => {
                warn!(error = %err, "schedule generation failed, clearing preview");
                self.events.clear();
                self.strategy = None;
                Completion::Failed
            }
        }
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn strategy(&self) -> Option<&str> {
        self.strategy.as_deref()
    }
}
