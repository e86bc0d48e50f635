//! Client side of the MindSync backend contract.
//!
//! The backend classifies mood and builds the time-blocked schedule; both
//! are opaque to this crate. [`PlannerBackend`] is the seam the planner
//! talks to, [`ApiClient`] its HTTP implementation.

mod client;
mod types;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use types::{CalendarEvent, MoodResult, ScheduleRequest, ScheduleResponse, TaskPayload};

use crate::error::RequestError;
use std::future::Future;

/// Remote operations the planner depends on.
pub trait PlannerBackend: Send + Sync {
    /// Classify free-text mood input.
    fn detect_mood(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<MoodResult, RequestError>> + Send;

    /// Turn tasks, mood and settings into calendar events.
    fn generate_schedule(
        &self,
        request: &ScheduleRequest,
    ) -> impl Future<Output = Result<ScheduleResponse, RequestError>> + Send;
}
