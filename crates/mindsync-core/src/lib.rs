//! # MindSync Core Library
//!
//! This library provides the planner logic behind the MindSync mood-aware
//! day planner. The heavy lifting (mood classification, schedule
//! construction) happens in a remote service; this crate owns the client
//! contract for that service and the session state built around it. The
//! `mindsync` CLI is a thin layer over the same types.
//!
//! ## Architecture
//!
//! - **API client**: JSON-over-HTTP wrapper for `detect_mood`,
//!   `generate_schedule` and `health`
//! - **Flows**: mood check-in and schedule generation state machines, each
//!   tagging submissions with a sequence number so stale responses are dropped
//! - **Tasks & settings**: local, editable planner input
//! - **Calendar**: text rendering of the returned events
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`Planner`]: one planning session wiring everything together
//! - [`ApiClient`]: the HTTP contract client
//! - [`Config`]: application configuration management
//! - [`AlertSink`]: where user-visible failure notifications go

pub mod api;
pub mod calendar;
pub mod error;
pub mod flow;
pub mod mood;
pub mod planner;
pub mod schedule;
pub mod settings;
pub mod storage;
pub mod tasks;

pub use api::{
    ApiClient, CalendarEvent, MoodResult, PlannerBackend, ScheduleRequest, ScheduleResponse,
    TaskPayload,
};
pub use calendar::{render, CalendarView};
pub use error::{ConfigError, CoreError, RequestError, ValidationError};
pub use flow::Completion;
pub use mood::{MoodCheckin, MoodState};
pub use planner::{AlertSink, Planner, StderrAlerts};
pub use schedule::{ScheduleFlow, Submission};
pub use settings::{CalendarType, ScheduleSettings};
pub use storage::Config;
pub use tasks::{Task, TaskField, TaskList};
