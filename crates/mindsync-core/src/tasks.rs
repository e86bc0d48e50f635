//! Editable task list for a planning session.
//!
//! Rows are addressed by position. Numeric fields never fail to parse:
//! anything that is not a non-negative number becomes `0`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// One task row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    pub hours: u32,
    pub minutes: u32,
}

impl Task {
    pub fn new(name: impl Into<String>, hours: u32, minutes: u32) -> Self {
        Self {
            name: name.into(),
            hours,
            minutes,
        }
    }

    /// Total duration in minutes.
    pub fn duration_min(&self) -> u64 {
        u64::from(self.hours) * 60 + u64::from(self.minutes)
    }
}

/// Editable field of a [`Task`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskField {
    Name,
    Hours,
    Minutes,
}

impl FromStr for TaskField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(TaskField::Name),
            "hours" | "h" => Ok(TaskField::Hours),
            "minutes" | "mins" | "m" => Ok(TaskField::Minutes),
            other => Err(ValidationError::InvalidValue {
                field: "field".to_string(),
                message: format!("unknown task field '{other}' (expected name, hours or minutes)"),
            }),
        }
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TaskField::Name => "name",
            TaskField::Hours => "hours",
            TaskField::Minutes => "minutes",
        })
    }
}

/// Coerce user input to a non-negative count, `0` when it isn't one.
///
/// Fractional input is truncated.
pub fn coerce_count(input: &str) -> u32 {
    let s = input.trim();
    if let Ok(n) = s.parse::<u32>() {
        return n;
    }
    match s.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 && n <= f64::from(u32::MAX) => n.trunc() as u32,
        _ => 0,
    }
}

/// Ordered list of task rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a blank row and return its index.
    pub fn add_blank(&mut self) -> usize {
        self.push(Task::default())
    }

    /// Append a filled row and return its index.
    pub fn push(&mut self, task: Task) -> usize {
        self.tasks.push(task);
        self.tasks.len() - 1
    }

    /// Set one field of the row at `index` from raw input.
    pub fn update(
        &mut self,
        index: usize,
        field: TaskField,
        value: &str,
    ) -> Result<(), ValidationError> {
        let len = self.tasks.len();
        let task = self
            .tasks
            .get_mut(index)
            .ok_or_else(|| out_of_bounds(index, len))?;
        match field {
            TaskField::Name => task.name = value.to_string(),
            TaskField::Hours => task.hours = coerce_count(value),
            TaskField::Minutes => task.minutes = coerce_count(value),
        }
        Ok(())
    }

    /// Remove and return the row at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Task, ValidationError> {
        if index >= self.tasks.len() {
            return Err(out_of_bounds(index, self.tasks.len()));
        }
        Ok(self.tasks.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    /// Sum of all row durations in minutes.
    pub fn total_min(&self) -> u64 {
        self.tasks.iter().map(Task::duration_min).sum()
    }
}

impl FromIterator<Task> for TaskList {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        Self {
            tasks: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

fn out_of_bounds(index: usize, len: usize) -> ValidationError {
    ValidationError::OutOfBounds {
        collection: "tasks".to_string(),
        index,
        len,
    }
}
