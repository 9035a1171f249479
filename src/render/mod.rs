//! One full render pass: schedule + collapsed set + width → [`Diagram`].
//!
//! The diagram is plain data. The desktop view paints it and [`svg`]
//! serializes it; neither keeps anything between passes.

pub mod svg;

use std::collections::HashSet;

use chrono::NaiveDate;
use egui::{pos2, Rect};

use crate::config::LayoutConfig;
use crate::layout::arrows::{route, ArrowPath};
use crate::layout::rows::{flatten, CollapsedSet, Row, RowKind};
use crate::model::timeline::format_date;
use crate::model::{Schedule, TickScale, Timeline};

/// A line of the left label panel. Hidden rows are kept so the panel and the
/// flattened order never diverge.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelRow {
    pub kind: RowKind,
    pub id: String,
    pub name: String,
    pub start: String,
    pub end: String,
    pub effort: String,
    pub hidden: bool,
    /// `Some` for phase rows: drives the collapse toggle.
    pub collapsed: Option<bool>,
    pub offset: Option<f32>,
}

/// A labelled gridline in the header.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderTick {
    pub date: NaiveDate,
    /// Clamped to the left edge for ticks aligned before the project start.
    pub x: f32,
    pub label: String,
}

/// Background shading behind a task row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stripe {
    pub y: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub kind: RowKind,
    pub id: String,
    pub name: String,
    /// "Jan 5, 2024 – Jan 10, 2024", for tooltips.
    pub dates: String,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub from_id: String,
    pub to_id: String,
    pub path: ArrowPath,
}

/// Everything one pass produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    pub title: String,
    pub date_range: String,
    pub timeline: Timeline,
    pub scale: TickScale,
    pub width: f32,
    pub row_height: f32,
    pub header_height: f32,
    /// Height of the visible rows only.
    pub body_height: f32,
    pub rows: Vec<LabelRow>,
    pub ticks: Vec<HeaderTick>,
    pub gridlines: Vec<f32>,
    pub stripes: Vec<Stripe>,
    pub bars: Vec<Bar>,
    pub arrows: Vec<Arrow>,
}

impl Diagram {
    pub fn visible_rows(&self) -> impl Iterator<Item = &LabelRow> {
        self.rows.iter().filter(|r| !r.hidden)
    }

    pub fn task_bar(&self, id: &str) -> Option<&Bar> {
        self.bars
            .iter()
            .find(|b| b.kind == RowKind::Task && b.id == id)
    }

    pub fn phase_bar(&self, id: &str) -> Option<&Bar> {
        self.bars
            .iter()
            .find(|b| b.kind == RowKind::Phase && b.id == id)
    }

    pub fn arrow(&self, from_id: &str, to_id: &str) -> Option<&Arrow> {
        self.arrows
            .iter()
            .find(|a| a.from_id == from_id && a.to_id == to_id)
    }
}

/// Lay out and build the whole diagram.
///
/// Never fails: rows with missing dates still get a label but no bar, and
/// arrows whose ends are unknown, hidden or undated are left out.
pub fn render(
    schedule: &Schedule,
    collapsed: &CollapsedSet,
    available_width: f32,
    config: &LayoutConfig,
) -> Diagram {
    let (start, end) = schedule.date_span().unwrap_or_else(|| {
        let epoch = NaiveDate::default();
        (epoch, epoch)
    });
    let timeline = Timeline::fit(start, end, available_width);
    let scale = timeline.scale(config.tick_min_spacing);

    let mut flat = flatten(schedule, collapsed);
    flat.assign_offsets(config.row_height);

    let ticks: Vec<HeaderTick> = scale
        .ticks(start, end)
        .into_iter()
        .map(|tick| HeaderTick {
            x: timeline.date_to_x(tick.date).max(0.0),
            date: tick.date,
            label: tick.label,
        })
        .collect();
    let gridlines = ticks.iter().map(|t| t.x).collect();

    let rows = flat.rows().iter().map(label_row).collect();

    let mut stripes = Vec::new();
    let mut bars = Vec::new();
    for (visible_index, row) in flat.visible().enumerate() {
        let Some(top) = row.offset else { continue };
        if row.kind() == RowKind::Task && visible_index % 2 == 1 {
            stripes.push(Stripe {
                y: top,
                height: config.row_height,
            });
        }
        if let Some(bar) = bar_for(row, top, &timeline, config) {
            bars.push(bar);
        }
    }

    let mut arrows = Vec::new();
    for row in flat.visible() {
        let Some(task) = row.task() else { continue };
        let mut seen = HashSet::new();
        for dep in &task.depends_on {
            if !seen.insert(dep.as_str()) {
                continue;
            }
            let Some(pred) = flat.task_row(dep) else {
                tracing::debug!(task_id = %task.id, depends_on = %dep, "unknown dependency, no arrow");
                continue;
            };
            if let Some(path) = route(pred, row, &timeline, config) {
                arrows.push(Arrow {
                    from_id: dep.clone(),
                    to_id: task.id.clone(),
                    path,
                });
            }
        }
    }

    let body_height = flat.visible_count() as f32 * config.row_height;
    tracing::debug!(
        rows = flat.len(),
        visible = flat.visible_count(),
        bars = bars.len(),
        arrows = arrows.len(),
        day_width = timeline.day_width,
        "render pass"
    );

    Diagram {
        title: schedule.project.name.clone(),
        date_range: format!("{} – {}", format_date(Some(start)), format_date(Some(end))),
        timeline,
        scale,
        width: available_width,
        row_height: config.row_height,
        header_height: config.header_height,
        body_height,
        rows,
        ticks,
        gridlines,
        stripes,
        bars,
        arrows,
    }
}

fn label_row(row: &Row<'_>) -> LabelRow {
    LabelRow {
        kind: row.kind(),
        id: row.id().to_string(),
        name: row.name().to_string(),
        start: format_date(row.start()),
        end: format_date(row.end()),
        effort: row.effort().to_string(),
        hidden: !row.visible,
        collapsed: (row.kind() == RowKind::Phase).then_some(row.collapsed),
        offset: row.offset,
    }
}

fn bar_for(row: &Row<'_>, top: f32, timeline: &Timeline, config: &LayoutConfig) -> Option<Bar> {
    let (start, end) = (row.start()?, row.end()?);
    let inset = match row.kind() {
        RowKind::Phase => config.phase_bar_inset,
        RowKind::Task => config.task_bar_inset,
    };
    let x0 = timeline.date_to_x(start);
    let x1 = (timeline.date_to_x(end) + timeline.day_width).max(x0);
    Some(Bar {
        kind: row.kind(),
        id: row.id().to_string(),
        name: row.name().to_string(),
        dates: format!("{} – {}", format_date(Some(start)), format_date(Some(end))),
        rect: Rect::from_min_max(
            pos2(x0, top + inset),
            pos2(x1, top + config.row_height - inset),
        ),
    })
}
