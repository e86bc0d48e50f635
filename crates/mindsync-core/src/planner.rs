//! One planning session.
//!
//! Owns the mood check-in, task list, settings and event list, and runs the
//! two backend flows against them. State sits behind a mutex that is never
//! held across a backend call, so flows can overlap; sequence tagging decides
//! which response wins.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::api::{ApiClient, CalendarEvent, MoodResult, PlannerBackend};
use crate::calendar::{self, CalendarView};
use crate::flow::Completion;
use crate::mood::{MoodCheckin, MoodState};
use crate::schedule::ScheduleFlow;
use crate::settings::ScheduleSettings;
use crate::tasks::TaskList;

pub const MOOD_FAILED_ALERT: &str = "Mood detection failed. Showing a neutral mood instead.";
pub const SCHEDULE_FAILED_ALERT: &str =
    "Schedule generation failed. Check that the backend is running and try again.";

/// Receiver of user-visible failure notifications.
pub trait AlertSink: Send + Sync {
    fn alert(&self, message: &str);
}

/// Prints alerts to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrAlerts;

impl AlertSink for StderrAlerts {
    fn alert(&self, message: &str) {
        eprintln!("alert: {message}");
    }
}

#[derive(Debug, Default)]
struct Session {
    mood: MoodCheckin,
    tasks: TaskList,
    settings: ScheduleSettings,
    schedule: ScheduleFlow,
}

pub struct Planner<B = ApiClient, A = StderrAlerts> {
    backend: B,
    alerts: A,
    session: Mutex<Session>,
}

impl<B: PlannerBackend, A: AlertSink> Planner<B, A> {
    pub fn new(backend: B, alerts: A, settings: ScheduleSettings) -> Self {
        Self {
            backend,
            alerts,
            session: Mutex::new(Session {
                settings,
                ..Session::default()
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn alerts(&self) -> &A {
        &self.alerts
    }

    /// Classify `text` and show the result.
    ///
    /// On failure the neutral placeholder is shown and one alert fires.
    /// Returns the mood displayed once this call has finished.
    pub async fn check_in(&self, text: &str) -> MoodResult {
        let seq = self.lock().mood.submit();
        debug!(seq, "mood check-in submitted");
        let result = self.backend.detect_mood(text).await;

        let (completion, shown) = {
            let mut session = self.lock();
            let completion = session.mood.complete(seq, result);
            let shown = session.mood.current().cloned().unwrap_or_else(MoodResult::neutral);
            (completion, shown)
        };
        if completion.needs_alert() {
            self.alerts.alert(MOOD_FAILED_ALERT);
        }
        shown
    }

    /// Request a schedule for the current tasks, mood and settings.
    ///
    /// On success the event list is replaced; on failure it is cleared and
    /// one alert fires. Responses overtaken by a newer call are dropped.
    pub async fn generate(&self) -> Completion {
        let submission = {
            let mut session = self.lock();
            let label = session.mood.label_for_schedule();
            let Session {
                tasks,
                settings,
                schedule,
                ..
            } = &mut *session;
            schedule.submit(tasks, &label, settings)
        };
        debug!(
            seq = submission.seq,
            tasks = submission.request.tasks.len(),
            mood = %submission.request.mood_label,
            "schedule submitted"
        );
        let result = self.backend.generate_schedule(&submission.request).await;

        let completion = self.lock().schedule.complete(submission.seq, result);
        if completion.needs_alert() {
            self.alerts.alert(SCHEDULE_FAILED_ALERT);
        }
        completion
    }

    pub fn mood(&self) -> MoodState {
        self.lock().mood.state().clone()
    }

    pub fn events(&self) -> Vec<CalendarEvent> {
        self.lock().schedule.events().to_vec()
    }

    pub fn strategy(&self) -> Option<String> {
        self.lock().schedule.strategy().map(str::to_string)
    }

    pub fn tasks(&self) -> TaskList {
        self.lock().tasks.clone()
    }

    pub fn settings(&self) -> ScheduleSettings {
        self.lock().settings.clone()
    }

    /// Edit the task list in place.
    pub fn with_tasks<R>(&self, f: impl FnOnce(&mut TaskList) -> R) -> R {
        f(&mut self.lock().tasks)
    }

    /// Edit the settings in place.
    pub fn with_settings<R>(&self, f: impl FnOnce(&mut ScheduleSettings) -> R) -> R {
        f(&mut self.lock().settings)
    }

    /// Render the held events.
    pub fn render(&self, view: CalendarView) -> String {
        let session = self.lock();
        calendar::render(session.schedule.events(), view, &session.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ScheduleRequest, ScheduleResponse};
    use crate::error::RequestError;
    use crate::tasks::{Task, TaskField};
    use serde_json::json;

    #[derive(Default)]
    struct Recorded(Mutex<Vec<String>>);

    impl AlertSink for Recorded {
        fn alert(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    /// Answers from canned results and records schedule requests.
    #[derive(Default)]
    struct Canned {
        mood: Option<MoodResult>,
        events: Option<Vec<CalendarEvent>>,
        requests: Mutex<Vec<ScheduleRequest>>,
    }

    fn http_500(endpoint: &'static str) -> RequestError {
        RequestError {
            endpoint,
            status: Some(500),
            reason: "HTTP 500".into(),
        }
    }

    impl PlannerBackend for Canned {
        async fn detect_mood(&self, _text: &str) -> Result<MoodResult, RequestError> {
            self.mood.clone().ok_or_else(|| http_500("detect_mood"))
        }

        async fn generate_schedule(
            &self,
            request: &ScheduleRequest,
        ) -> Result<ScheduleResponse, RequestError> {
            self.requests.lock().unwrap().push(request.clone());
            self.events
                .clone()
                .map(|events| ScheduleResponse {
                    events,
                    strategy: None,
                })
                .ok_or_else(|| http_500("generate_schedule"))
        }
    }

    fn planner(backend: Canned) -> Planner<Canned, Recorded> {
        Planner::new(backend, Recorded::default(), ScheduleSettings::default())
    }

    #[tokio::test]
    async fn generate_without_check_in_sends_neutral() {
        let p = planner(Canned {
            events: Some(vec![]),
            ..Canned::default()
        });
        p.with_tasks(|t| {
            t.add_blank();
            t.update(0, TaskField::Hours, "x")
        })
        .unwrap();
        assert_eq!(p.generate().await, Completion::Applied);

        let sent = p.backend().requests.lock().unwrap().clone();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].mood_label, "neutral");
        assert_eq!(sent[0].tasks[0].name, "Untitled Task");
        assert_eq!(sent[0].tasks[0].hours, 0);
    }

    #[tokio::test]
    async fn check_in_label_flows_into_schedule_lowercased() {
        let p = planner(Canned {
            mood: Some(MoodResult {
                label: "JOY".into(),
                friendly: "Joy".into(),
                emoji: "😄".into(),
                confidence: 0.85,
            }),
            events: Some(vec![CalendarEvent(json!({"title": "Gym"}))]),
            ..Canned::default()
        });
        let shown = p.check_in("great day").await;
        assert_eq!(shown.to_string(), "😄 Joy (85%)");
        p.with_tasks(|t| t.push(Task::new("Gym", 1, 0)));
        p.generate().await;
        assert_eq!(p.backend().requests.lock().unwrap()[0].mood_label, "joy");
        assert_eq!(p.events().len(), 1);
        assert!(p.alerts().0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failures_fall_back_and_alert_once_each() {
        let p = planner(Canned::default());
        let shown = p.check_in("meh").await;
        assert_eq!(shown, MoodResult::neutral());
        assert_eq!(p.mood(), MoodState::HasResult(MoodResult::neutral()));

        assert_eq!(p.generate().await, Completion::Failed);
        assert!(p.events().is_empty());
        assert_eq!(
            *p.alerts().0.lock().unwrap(),
            vec![MOOD_FAILED_ALERT.to_string(), SCHEDULE_FAILED_ALERT.to_string()]
        );
    }

    #[tokio::test]
    async fn render_uses_session_settings() {
        let p = planner(Canned {
            events: Some(vec![]),
            ..Canned::default()
        });
        p.with_settings(|s| s.set("timezone", "Asia/Tokyo")).unwrap();
        p.generate().await;
        assert!(p.render(CalendarView::Day).contains("Asia/Tokyo"));
    }
}
