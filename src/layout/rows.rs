//! Flattening of the phase/task hierarchy into display rows.
//!
//! The flat list is the only ordering both panels use; the label panel and
//! the timeline body are always derived from the same [`FlatRows`].

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use crate::model::{Group, Schedule, Task};

/// Ids of the phases whose tasks are currently hidden.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollapsedSet(HashSet<String>);

impl CollapsedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, group_id: &str) -> bool {
        self.0.contains(group_id)
    }

    /// Flip a phase between collapsed and expanded. Returns `true` if it is
    /// now collapsed.
    pub fn toggle(&mut self, group_id: &str) -> bool {
        if self.0.remove(group_id) {
            false
        } else {
            self.0.insert(group_id.to_string());
            true
        }
    }

    pub fn collapse_all(&mut self, schedule: &Schedule) {
        self.0.extend(schedule.groups.iter().map(|g| g.id.clone()));
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<S: Into<String>> FromIterator<S> for CollapsedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Phase,
    Task,
}

/// What a row was built from.
#[derive(Debug, Clone, Copy)]
pub enum RowSource<'a> {
    Phase(&'a Group),
    Task { task: &'a Task, group: &'a Group },
}

/// One line of the diagram.
#[derive(Debug, Clone)]
pub struct Row<'a> {
    pub source: RowSource<'a>,
    /// Position in the flattened list, hidden rows included.
    pub index: usize,
    pub visible: bool,
    /// Only meaningful for phase rows.
    pub collapsed: bool,
    /// Top edge among visible rows; `None` until laid out, and for hidden rows.
    pub offset: Option<f32>,
}

impl<'a> Row<'a> {
    pub fn kind(&self) -> RowKind {
        match self.source {
            RowSource::Phase(_) => RowKind::Phase,
            RowSource::Task { .. } => RowKind::Task,
        }
    }

    pub fn id(&self) -> &'a str {
        match self.source {
            RowSource::Phase(g) => &g.id,
            RowSource::Task { task, .. } => &task.id,
        }
    }

    pub fn name(&self) -> &'a str {
        match self.source {
            RowSource::Phase(g) => &g.name,
            RowSource::Task { task, .. } => &task.name,
        }
    }

    pub fn effort(&self) -> &'a str {
        match self.source {
            RowSource::Phase(g) => &g.effort,
            RowSource::Task { task, .. } => &task.effort,
        }
    }

    pub fn start(&self) -> Option<NaiveDate> {
        match self.source {
            RowSource::Phase(g) => g.start,
            RowSource::Task { task, .. } => task.start,
        }
    }

    pub fn end(&self) -> Option<NaiveDate> {
        match self.source {
            RowSource::Phase(g) => g.end,
            RowSource::Task { task, .. } => task.end,
        }
    }

    /// The owning phase: the group itself for phase rows.
    pub fn group(&self) -> &'a Group {
        match self.source {
            RowSource::Phase(g) => g,
            RowSource::Task { group, .. } => group,
        }
    }

    pub fn task(&self) -> Option<&'a Task> {
        match self.source {
            RowSource::Phase(_) => None,
            RowSource::Task { task, .. } => Some(task),
        }
    }

    /// Vertical middle of the row, if it is laid out.
    pub fn center_y(&self, row_height: f32) -> Option<f32> {
        self.offset.map(|top| top + row_height / 2.0)
    }
}

/// Result of one flattening pass.
#[derive(Debug, Clone, Default)]
pub struct FlatRows<'a> {
    rows: Vec<Row<'a>>,
    by_task: HashMap<&'a str, usize>,
}

impl<'a> FlatRows<'a> {
    pub fn rows(&self) -> &[Row<'a>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Row<'a>> {
        self.rows.iter().filter(|r| r.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.visible().count()
    }

    /// The row of the task with this id. Later duplicates shadow earlier ones.
    pub fn task_row(&self, id: &str) -> Option<&Row<'a>> {
        self.by_task.get(id).map(|&i| &self.rows[i])
    }

    /// Stack visible rows top to bottom; hidden rows take no space.
    pub fn assign_offsets(&mut self, row_height: f32) {
        let mut visible_index = 0usize;
        for row in &mut self.rows {
            if row.visible {
                row.offset = Some(visible_index as f32 * row_height);
                visible_index += 1;
            } else {
                row.offset = None;
            }
        }
    }
}

/// Flatten a schedule in document order: each phase row followed by its
/// task rows, which are hidden while the phase is collapsed.
pub fn flatten<'a>(schedule: &'a Schedule, collapsed: &CollapsedSet) -> FlatRows<'a> {
    let mut flat = FlatRows::default();

    for group in &schedule.groups {
        let is_collapsed = collapsed.contains(&group.id);
        flat.rows.push(Row {
            source: RowSource::Phase(group),
            index: flat.rows.len(),
            visible: true,
            collapsed: is_collapsed,
            offset: None,
        });

        for task in &group.tasks {
            let index = flat.rows.len();
            if let Some(previous) = flat.by_task.insert(task.id.as_str(), index) {
                tracing::warn!(
                    task_id = %task.id,
                    first_row = previous,
                    row = index,
                    "duplicate task id, later row wins"
                );
            }
            flat.rows.push(Row {
                source: RowSource::Task { task, group },
                index,
                visible: !is_collapsed,
                collapsed: false,
                offset: None,
            });
        }
    }

    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Schedule;

    fn ids(flat: &FlatRows) -> Vec<String> {
        flat.rows().iter().map(|r| r.id().to_string()).collect()
    }

    #[test]
    fn document_order() {
        let schedule = Schedule::sample();
        let flat = flatten(&schedule, &CollapsedSet::new());
        assert_eq!(
            ids(&flat),
            vec![
                "phase-1", "task-1-1", "task-1-2", "phase-2", "task-2-1", "task-2-2", "phase-3",
                "task-3-1", "task-3-2", "task-3-3"
            ]
        );
        assert!(flat.rows().iter().all(|r| r.visible));
        assert_eq!(flat.rows()[0].kind(), RowKind::Phase);
        assert_eq!(flat.rows()[1].kind(), RowKind::Task);
        assert_eq!(flat.rows()[4].index, 4);
    }

    #[test]
    fn collapsing_hides_only_that_phase_tasks() {
        let schedule = Schedule::sample();
        let collapsed: CollapsedSet = ["phase-2"].into_iter().collect();
        let mut flat = flatten(&schedule, &collapsed);
        flat.assign_offsets(10.0);

        let phase = &flat.rows()[3];
        assert!(phase.visible && phase.collapsed);
        assert!(!flat.rows()[4].visible && !flat.rows()[5].visible);
        assert_eq!(flat.rows()[4].offset, None);
        assert_eq!(flat.visible_count(), 8);
        // phase-3 moves up by exactly the two hidden rows
        assert_eq!(flat.rows()[6].offset, Some(40.0));
    }

    #[test]
    fn expanding_restores_order_and_offsets() {
        let schedule = Schedule::sample();
        let mut collapsed = CollapsedSet::new();
        let mut before = flatten(&schedule, &collapsed);
        before.assign_offsets(10.0);

        assert!(collapsed.toggle("phase-1"));
        assert!(!collapsed.toggle("phase-1"));

        let mut after = flatten(&schedule, &collapsed);
        after.assign_offsets(10.0);
        assert_eq!(ids(&before), ids(&after));
        let offsets = |f: &FlatRows| f.rows().iter().map(|r| r.offset).collect::<Vec<_>>();
        assert_eq!(offsets(&before), offsets(&after));
    }

    #[test]
    fn duplicate_task_id_last_write_wins() {
        let mut schedule = Schedule::sample();
        schedule.groups[1].tasks[0].id = "task-1-1".into();
        let flat = flatten(&schedule, &CollapsedSet::new());
        let row = flat.task_row("task-1-1").unwrap();
        assert_eq!(row.index, 4);
        assert_eq!(row.group().id, "phase-2");
    }

    #[test]
    fn unknown_task_lookup_is_none() {
        let schedule = Schedule::sample();
        let flat = flatten(&schedule, &CollapsedSet::new());
        assert!(flat.task_row("missing").is_none());
        assert!(flat.task_row("phase-1").is_none());
    }

    #[test]
    fn collapse_all_covers_every_group() {
        let schedule = Schedule::sample();
        let mut collapsed = CollapsedSet::new();
        collapsed.collapse_all(&schedule);
        assert_eq!(collapsed.len(), 3);
        let flat = flatten(&schedule, &collapsed);
        assert_eq!(flat.visible_count(), 3);
    }
}
