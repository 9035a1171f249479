use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::task::{date_serde, list_serde, or_default_serde, text_serde, Group, Task};

/// Project header: display name and overall date range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(with = "text_serde")]
    pub name: String,
    #[serde(with = "date_serde")]
    pub start: Option<NaiveDate>,
    #[serde(with = "date_serde")]
    pub end: Option<NaiveDate>,
}

/// A complete schedule as produced by the planning agent.
///
/// Read-only once loaded; every render pass derives its rows from it afresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schedule {
    #[serde(deserialize_with = "or_default_serde::deserialize")]
    pub project: Project,
    #[serde(deserialize_with = "list_serde::deserialize")]
    pub groups: Vec<Group>,
}

impl Project {
    pub fn new(name: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            name: name.into(),
            start: Some(start),
            end: Some(end),
        }
    }
}

impl Schedule {
    pub fn new(project: Project) -> Self {
        Self {
            project,
            groups: Vec::new(),
        }
    }

    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    /// All tasks in document order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.groups.iter().flat_map(|g| g.tasks.iter())
    }

    /// The date range the timeline spans.
    ///
    /// Project dates win; a missing bound falls back to the earliest/latest
    /// date found on any group or task. `None` only when no date exists at all.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let all_dates = || {
            self.groups
                .iter()
                .flat_map(|g| [g.start, g.end])
                .chain(self.tasks().flat_map(|t| [t.start, t.end]))
                .flatten()
        };
        let start = self.project.start.or_else(|| all_dates().min());
        let end = self.project.end.or_else(|| all_dates().max());
        match (start, end) {
            (Some(s), Some(e)) => Some((s, e)),
            (Some(d), None) | (None, Some(d)) => Some((d, d)),
            (None, None) => None,
        }
    }

    /// Demonstration schedule shown when the viewer starts without a file.
    pub fn sample() -> Self {
        let d = |m: u32, day: u32| NaiveDate::from_ymd_opt(2024, m, day).unwrap_or_default();

        Schedule::new(Project::new("Website Relaunch", d(1, 1), d(3, 29)))
            .with_group(
                Group::new("phase-1", "Discovery", d(1, 1), d(1, 26))
                    .with_effort("4 weeks")
                    .with_task(
                        Task::new("task-1-1", "Stakeholder interviews", d(1, 1), d(1, 10))
                            .with_effort("8 days"),
                    )
                    .with_task(
                        Task::new("task-1-2", "Requirements document", d(1, 15), d(1, 26))
                            .with_effort("10 days")
                            .depends_on("task-1-1"),
                    ),
            )
            .with_group(
                Group::new("phase-2", "Design", d(1, 22), d(2, 23))
                    .with_effort("5 weeks")
                    .with_task(
                        Task::new("task-2-1", "Wireframes", d(1, 22), d(2, 6))
                            .with_effort("12 days")
                            .depends_on("task-1-2"),
                    )
                    .with_task(
                        Task::new("task-2-2", "Visual design", d(2, 7), d(2, 23))
                            .with_effort("13 days")
                            .depends_on("task-2-1"),
                    ),
            )
            .with_group(
                Group::new("phase-3", "Build & Launch", d(2, 19), d(3, 29))
                    .with_effort("6 weeks")
                    .with_task(
                        Task::new("task-3-1", "Frontend development", d(2, 19), d(3, 15))
                            .with_effort("20 days")
                            .depends_on("task-2-1"),
                    )
                    .with_task(
                        Task::new("task-3-2", "Content migration", d(3, 4), d(3, 22))
                            .with_effort("15 days")
                            .depends_on("task-1-2"),
                    )
                    .with_task(
                        Task::new("task-3-3", "QA & launch", d(3, 18), d(3, 29))
                            .with_effort("10 days")
                            .depends_on("task-3-1")
                            .depends_on("task-3-2"),
                    ),
            )
    }
}
