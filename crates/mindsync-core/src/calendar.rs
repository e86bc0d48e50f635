//! Text calendar for the generated events.
//!
//! Pure presentation: takes whatever events are held and lays them out as a
//! day, week or month agenda. Events without a readable start time are
//! listed separately instead of being dropped.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::str::FromStr;

use crate::api::CalendarEvent;
use crate::error::ValidationError;
use crate::settings::ScheduleSettings;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    #[default]
    Day,
    Week,
    Month,
}

impl FromStr for CalendarView {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(CalendarView::Day),
            "week" => Ok(CalendarView::Week),
            "month" => Ok(CalendarView::Month),
            other => Err(ValidationError::InvalidValue {
                field: "view".to_string(),
                message: format!("'{other}' is not one of day, week, month"),
            }),
        }
    }
}

impl fmt::Display for CalendarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CalendarView::Day => "day",
            CalendarView::Week => "week",
            CalendarView::Month => "month",
        })
    }
}

struct Timed<'a> {
    start: NaiveDateTime,
    end: Option<NaiveDateTime>,
    title: &'a str,
}

const UNTITLED: &str = "(untitled)";

/// `9:00 AM`
fn clock(t: &NaiveDateTime) -> String {
    t.format("%-I:%M %p").to_string()
}

fn day_heading(d: NaiveDate) -> String {
    d.format("%a %Y-%m-%d").to_string()
}

fn write_entry(out: &mut String, ev: &Timed<'_>) {
    let _ = match ev.end {
        Some(end) => writeln!(out, "  {} - {}  {}", clock(&ev.start), clock(&end), ev.title),
        None => writeln!(out, "  {}  {}", clock(&ev.start), ev.title),
    };
}

/// Render `events` in the given view.
pub fn render(events: &[CalendarEvent], view: CalendarView, settings: &ScheduleSettings) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} view | {} calendar | {}",
        view, settings.calendar_type, settings.timezone
    );

    if events.is_empty() {
        out.push_str("No events scheduled.\n");
        return out;
    }

    let mut timed = Vec::new();
    let mut untimed = Vec::new();
    for ev in events {
        let title = ev.title().unwrap_or(UNTITLED);
        match ev.start() {
            Some(start) => timed.push(Timed {
                start,
                end: ev.end(),
                title,
            }),
            None => untimed.push(title),
        }
    }
    timed.sort_by_key(|t| t.start);

    let mut by_day: BTreeMap<NaiveDate, Vec<&Timed<'_>>> = BTreeMap::new();
    for t in &timed {
        by_day.entry(t.start.date()).or_default().push(t);
    }

    if let Some(anchor) = timed.first().map(|t| t.start.date()) {
        let days: Vec<NaiveDate> = match view {
            CalendarView::Day => vec![anchor],
            CalendarView::Week => {
                let monday = anchor - Days::new(u64::from(anchor.weekday().num_days_from_monday()));
                (0..7).map(|i| monday + Days::new(i)).collect()
            }
            CalendarView::Month => by_day
                .keys()
                .copied()
                .filter(|d| d.year() == anchor.year() && d.month() == anchor.month())
                .collect(),
        };

        for day in days {
            let _ = writeln!(out, "{}", day_heading(day));
            match by_day.get(&day) {
                Some(entries) => entries.iter().for_each(|ev| write_entry(&mut out, ev)),
                None => out.push_str("  (no events)\n"),
            }
        }
    }

    if !untimed.is_empty() {
        out.push_str("Unscheduled\n");
        for title in untimed {
            let _ = writeln!(out, "  {title}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ev(title: &str, start: &str, end: &str) -> CalendarEvent {
        CalendarEvent(json!({"title": title, "start": start, "end": end}))
    }

    #[test]
    fn empty_list_says_so() {
        let out = render(&[], CalendarView::Day, &ScheduleSettings::default());
        assert!(out.starts_with("day view | local calendar | UTC"));
        assert!(out.contains("No events scheduled."));
    }

    #[test]
    fn day_view_lists_events_in_time_order() {
        let events = vec![
            ev("Email", "2026-10-19T10:40:00", "2026-10-19T11:00:00"),
            ev("Write report", "2026-10-19T09:00:00", "2026-10-19T10:30:00"),
        ];
        let out = render(&events, CalendarView::Day, &ScheduleSettings::default());
        let report = out.find("9:00 AM - 10:30 AM  Write report").unwrap();
        let email = out.find("10:40 AM - 11:00 AM  Email").unwrap();
        assert!(report < email);
        assert!(out.contains("Mon 2026-10-19"));
    }

    #[test]
    fn day_view_shows_only_first_day() {
        let events = vec![
            ev("Today", "2026-10-19T13:00:00", "2026-10-19T14:00:00"),
            ev("Tomorrow", "2026-10-20T09:00:00", "2026-10-20T10:00:00"),
        ];
        let out = render(&events, CalendarView::Day, &ScheduleSettings::default());
        assert!(out.contains("1:00 PM - 2:00 PM  Today"));
        assert!(!out.contains("Tomorrow"));
    }

    #[test]
    fn week_view_covers_monday_to_sunday() {
        let events = vec![ev("Gym", "2026-10-21T18:00:00", "2026-10-21T19:00:00")];
        let out = render(&events, CalendarView::Week, &ScheduleSettings::default());
        assert!(out.contains("Mon 2026-10-19\n  (no events)"));
        assert!(out.contains("Wed 2026-10-21\n  6:00 PM - 7:00 PM  Gym"));
        assert!(out.contains("Sun 2026-10-25"));
        assert_eq!(out.matches("(no events)").count(), 6);
    }

    #[test]
    fn month_view_lists_only_busy_days_of_that_month() {
        let events = vec![
            ev("A", "2026-10-02T09:00:00", "2026-10-02T10:00:00"),
            ev("B", "2026-10-30T09:00:00", "2026-10-30T10:00:00"),
            ev("C", "2026-11-01T09:00:00", "2026-11-01T10:00:00"),
        ];
        let out = render(&events, CalendarView::Month, &ScheduleSettings::default());
        assert!(out.contains("Fri 2026-10-02"));
        assert!(out.contains("Fri 2026-10-30"));
        assert!(!out.contains("2026-11-01"));
        assert!(!out.contains("(no events)"));
    }

    #[test]
    fn unreadable_events_are_listed_as_unscheduled() {
        let events = vec![CalendarEvent(json!({"title": "Someday"})), CalendarEvent(json!(42))];
        let out = render(&events, CalendarView::Day, &ScheduleSettings::default());
        assert!(out.contains("Unscheduled\n  Someday\n  (untitled)"));
    }

    #[test]
    fn event_without_end_shows_start_only() {
        let events = vec![CalendarEvent(json!({"title": "Call", "start": "2026-10-19T12:05:00"}))];
        let out = render(&events, CalendarView::Day, &ScheduleSettings::default());
        assert!(out.contains("  12:05 PM  Call"));
    }

    #[test]
    fn view_names_parse() {
        assert_eq!("Week".parse::<CalendarView>().unwrap(), CalendarView::Week);
        assert!("year".parse::<CalendarView>().is_err());
    }
}
