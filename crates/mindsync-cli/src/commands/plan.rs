use clap::Args;
use mindsync_core::{CalendarView, Completion};
use serde_json::json;

use super::{add_task_spec, open_planner, CmdResult};

#[derive(Args)]
pub struct PlanArgs {
    /// Task as NAME=H:MM or NAME=MINUTES (repeatable)
    #[arg(short, long = "task", value_name = "NAME=H:MM", required = true)]
    tasks: Vec<String>,
    /// Describe your mood first; the detected label shapes the schedule
    #[arg(short, long)]
    mood: Option<String>,
    /// Day start, HH:MM
    #[arg(long, value_name = "HH:MM")]
    start: Option<String>,
    /// Minutes between tasks
    #[arg(long = "break-min", value_name = "MINUTES")]
    break_min: Option<String>,
    /// IANA timezone shown with the calendar
    #[arg(long)]
    timezone: Option<String>,
    /// Calendar type (local, google)
    #[arg(long)]
    calendar: Option<String>,
    /// Calendar view (day, week, month)
    #[arg(long)]
    view: Option<CalendarView>,
    /// Print mood, strategy and raw events as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(args: PlanArgs, api_url: Option<&str>) -> CmdResult {
    let (planner, config) = open_planner(api_url)?;

    planner.with_tasks(|tasks| {
        args.tasks
            .iter()
            .try_for_each(|spec| add_task_spec(tasks, spec).map(|_| ()))
    })?;
    planner.with_settings(|settings| {
        let overrides = [
            ("start", &args.start),
            ("break_min", &args.break_min),
            ("timezone", &args.timezone),
            ("calendar_type", &args.calendar),
        ];
        overrides
            .into_iter()
            .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
            .try_for_each(|(key, value)| settings.set(key, value))
    })?;

    let mood = match &args.mood {
        Some(text) => Some(planner.check_in(text).await),
        None => None,
    };
    let completion = planner.generate().await;

    if args.json {
        let out = json!({
            "mood": mood,
            "strategy": planner.strategy(),
            "events": planner.events(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        if let Some(mood) = &mood {
            println!("Mood: {mood}");
        }
        if let Some(strategy) = planner.strategy() {
            println!("Strategy: {strategy}");
        }
        print!("{}", planner.render(args.view.unwrap_or(config.schedule.view)));
    }

    if completion == Completion::Failed {
        std::process::exit(1);
    }
    Ok(())
}
