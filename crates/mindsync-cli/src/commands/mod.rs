pub mod config;
pub mod health;
pub mod mood;
pub mod plan;
pub mod shell;

use mindsync_core::{
    ApiClient, Config, Planner, ScheduleSettings, StderrAlerts, TaskField, TaskList,
    ValidationError,
};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Client for `--api-url`, else the configured/env URL.
pub fn client(config: &Config, api_url: Option<&str>) -> Result<ApiClient, Box<dyn std::error::Error>> {
    let base = api_url
        .map(str::to_string)
        .unwrap_or_else(|| config.effective_base_url());
    tracing::debug!(%base, "using backend");
    Ok(ApiClient::new(&base)?)
}

/// Fresh planning session seeded from the config file.
pub fn open_planner(api_url: Option<&str>) -> Result<(Planner, Config), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let planner = Planner::new(
        client(&config, api_url)?,
        StderrAlerts,
        ScheduleSettings::from_config(&config.schedule),
    );
    Ok((planner, config))
}

/// Append a task written as `NAME=H:MM`, `NAME=MINUTES` or just `NAME`.
///
/// Durations go through the same coercion as interactive edits, so junk
/// becomes zero rather than an error.
pub fn add_task_spec(tasks: &mut TaskList, spec: &str) -> Result<usize, ValidationError> {
    let (name, duration) = match spec.rsplit_once('=') {
        Some((name, duration)) => (name, Some(duration)),
        None => (spec, None),
    };
    let index = tasks.add_blank();
    tasks.update(index, TaskField::Name, name.trim())?;
    if let Some(duration) = duration {
        let (hours, minutes) = duration.split_once(':').unwrap_or(("0", duration));
        tasks.update(index, TaskField::Hours, hours)?;
        tasks.update(index, TaskField::Minutes, minutes)?;
    }
    Ok(index)
}
