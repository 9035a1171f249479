//! Fixed layout constants.
//!
//! None of these are configurable at runtime; [`LayoutConfig`] only exists so
//! a render pass receives its geometry as an argument instead of reading
//! globals.

use std::time::Duration;

/// Height of every row, in both the label panel and the timeline body.
pub const ROW_HEIGHT: f32 = 36.0;
/// Height of the timeline header strip.
pub const HEADER_HEIGHT: f32 = 44.0;
/// Horizontal clearance an arrow keeps from the bars it connects.
pub const ELBOW: f32 = 12.0;

/// Minimum spacing between two ticks before the next coarser tier is used.
pub const TICK_MIN_SPACING: f32 = 40.0;
pub const WEEK_SPAN_DAYS: f32 = 7.0;
pub const MONTH_SPAN_DAYS: f32 = 30.0;

pub const PHASE_BAR_INSET: f32 = 10.0;
pub const TASK_BAR_INSET: f32 = 8.0;

pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(150);

/// Width used by headless exports when none is given.
pub const DEFAULT_EXPORT_WIDTH: f32 = 960.0;

/// Geometry handed to a render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub row_height: f32,
    pub header_height: f32,
    pub elbow: f32,
    pub tick_min_spacing: f32,
    pub phase_bar_inset: f32,
    pub task_bar_inset: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_height: ROW_HEIGHT,
            header_height: HEADER_HEIGHT,
            elbow: ELBOW,
            tick_min_spacing: TICK_MIN_SPACING,
            phase_bar_inset: PHASE_BAR_INSET,
            task_bar_inset: TASK_BAR_INSET,
        }
    }
}
