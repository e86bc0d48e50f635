//! Interactive planning session.
//!
//! Keeps one [`Planner`] alive across commands so the task list, settings,
//! mood and events behave like a single page: edit, generate, look, repeat.

use std::io::{self, BufRead, Write};

use mindsync_core::api::PlannerBackend;
use mindsync_core::{AlertSink, CalendarView, MoodState, Planner, TaskField};

use super::{add_task_spec, open_planner, CmdResult};

const HELP: &str = "\
commands:
  mood <text>                   check in with how you feel
  add [NAME=H:MM]               add a task (blank if no spec)
  set <n> <name|hours|minutes> <value>
                                edit task n
  rm <n>                        remove task n
  tasks                         list tasks
  setting <key> <value>         start, break_min, timezone, calendar_type
  settings                      show settings
  generate                      build the schedule
  view [day|week|month]         show the calendar
  help                          this text
  quit                          leave";

#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    Continue,
    Quit,
}

pub async fn run(api_url: Option<&str>) -> CmdResult {
    let (planner, config) = open_planner(api_url)?;
    let mut view = config.schedule.view;
    let stdin = io::stdin();
    let mut out = io::stdout();

    writeln!(out, "MindSync planner. Type 'help' for commands.")?;
    loop {
        write!(out, "mindsync> ")?;
        out.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }
        match execute(&planner, line.trim(), &mut view, &mut out).await {
            Ok(Step::Continue) => {}
            Ok(Step::Quit) => break,
            Err(e) => writeln!(out, "error: {e}")?,
        }
    }
    Ok(())
}

/// 1-based position typed by the user to a list index.
fn position(arg: Option<&str>) -> Result<usize, Box<dyn std::error::Error>> {
    let raw = arg.ok_or("missing task number")?;
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("'{raw}' is not a task number").into()),
    }
}

/// Run one shell command line against the session.
pub async fn execute<B, A>(
    planner: &Planner<B, A>,
    line: &str,
    view: &mut CalendarView,
    out: &mut dyn Write,
) -> Result<Step, Box<dyn std::error::Error>>
where
    B: PlannerBackend,
    A: AlertSink,
{
    let (cmd, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    match cmd {
        "" => {}
        "help" | "?" => writeln!(out, "{HELP}")?,
        "quit" | "exit" | "q" => return Ok(Step::Quit),
        "mood" => {
            if rest.is_empty() {
                return Err("usage: mood <text>".into());
            }
            let mood = planner.check_in(rest).await;
            writeln!(out, "{mood}")?;
        }
        "add" => {
            let index = planner.with_tasks(|tasks| {
                if rest.is_empty() {
                    Ok(tasks.add_blank())
                } else {
                    add_task_spec(tasks, rest)
                }
            })?;
            writeln!(out, "added task {}", index + 1)?;
        }
        "set" => {
            let mut parts = rest.splitn(3, char::is_whitespace);
            let index = position(parts.next())?;
            let field: TaskField = parts.next().ok_or("missing field")?.parse()?;
            let value = parts.next().unwrap_or("").trim();
            planner.with_tasks(|tasks| tasks.update(index, field, value))?;
        }
        "rm" => {
            let index = position(Some(rest).filter(|r| !r.is_empty()))?;
            let removed = planner.with_tasks(|tasks| tasks.remove(index))?;
            writeln!(out, "removed '{}'", removed.name)?;
        }
        "tasks" => {
            let tasks = planner.tasks();
            if tasks.is_empty() {
                writeln!(out, "no tasks")?;
            }
            for (i, task) in tasks.iter().enumerate() {
                let name = if task.name.is_empty() { "(blank)" } else { task.name.as_str() };
                writeln!(out, "{}. {} {}h {}m", i + 1, name, task.hours, task.minutes)?;
            }
        }
        "setting" => {
            let (key, value) = rest.split_once(char::is_whitespace).ok_or("usage: setting <key> <value>")?;
            planner.with_settings(|settings| settings.set(key, value.trim()))?;
        }
        "settings" => {
            let s = planner.settings();
            writeln!(out, "start: {}", s.start)?;
            writeln!(out, "break_min: {}", s.break_min)?;
            writeln!(out, "timezone: {}", s.timezone)?;
            writeln!(out, "calendar_type: {}", s.calendar_type)?;
            if let MoodState::HasResult(mood) = planner.mood() {
                writeln!(out, "mood: {mood}")?;
            }
        }
        "generate" => {
            planner.generate().await;
            if let Some(strategy) = planner.strategy() {
                writeln!(out, "Strategy: {strategy}")?;
            }
            write!(out, "{}", planner.render(*view))?;
        }
        "view" => {
            if !rest.is_empty() {
                *view = rest.parse()?;
            }
            write!(out, "{}", planner.render(*view))?;
        }
        other => return Err(format!("unknown command '{other}', try 'help'").into()),
    }
    Ok(Step::Continue)
}
