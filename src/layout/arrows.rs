//! Orthogonal routing of dependency arrows.
//!
//! An arrow leaves the predecessor's bar end and enters the successor's bar
//! start, always travelling rightward on its last segment. When there is no
//! room for a plain elbow the arrow detours along the row boundary next to
//! the predecessor so it never runs through the predecessor's bar.

use egui::{pos2, Pos2};

use crate::config::LayoutConfig;
use crate::layout::rows::Row;
use crate::model::Timeline;

/// A routed arrow, as one of the two path shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrowPath {
    /// Right, vertical, right: used when the successor starts well after
    /// the predecessor ends.
    Clear { from: Pos2, elbow_x: f32, to: Pos2 },
    /// Right, vertical to a lane on the predecessor's row edge, back along
    /// the lane, vertical, right into the target.
    Detour {
        from: Pos2,
        elbow_x: f32,
        lane_y: f32,
        approach_x: f32,
        to: Pos2,
    },
}

impl ArrowPath {
    /// Choose and build the path between two bar endpoints.
    ///
    /// `pred_top` is the top edge of the predecessor's row.
    pub fn plan(from: Pos2, to: Pos2, pred_top: f32, row_height: f32, elbow: f32) -> Self {
        let elbow_x = from.x + elbow;
        if from.x + 2.0 * elbow <= to.x {
            ArrowPath::Clear { from, elbow_x, to }
        } else {
            let lane_y = if to.y >= from.y {
                pred_top + row_height
            } else {
                pred_top
            };
            ArrowPath::Detour {
                from,
                elbow_x,
                lane_y,
                approach_x: elbow.max(to.x - elbow),
                to,
            }
        }
    }

    pub fn is_detour(&self) -> bool {
        matches!(self, ArrowPath::Detour { .. })
    }

    pub fn start(&self) -> Pos2 {
        match *self {
            ArrowPath::Clear { from, .. } | ArrowPath::Detour { from, .. } => from,
        }
    }

    pub fn end(&self) -> Pos2 {
        match *self {
            ArrowPath::Clear { to, .. } | ArrowPath::Detour { to, .. } => to,
        }
    }

    /// Corner points from start to end.
    pub fn points(&self) -> Vec<Pos2> {
        match *self {
            ArrowPath::Clear { from, elbow_x, to } => vec![
                from,
                pos2(elbow_x, from.y),
                pos2(elbow_x, to.y),
                to,
            ],
            ArrowPath::Detour {
                from,
                elbow_x,
                lane_y,
                approach_x,
                to,
            } => vec![
                from,
                pos2(elbow_x, from.y),
                pos2(elbow_x, lane_y),
                pos2(approach_x, lane_y),
                pos2(approach_x, to.y),
                to,
            ],
        }
    }

    pub fn segment_count(&self) -> usize {
        self.points().len() - 1
    }

    /// SVG path data, e.g. `M10 18 L22 18 L22 54 L40 54`.
    pub fn svg_d(&self) -> String {
        self.points()
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let cmd = if i == 0 { 'M' } else { 'L' };
                format!("{}{} {}", cmd, svg_num(p.x), svg_num(p.y))
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Round to two decimals and drop trailing zeros.
pub(crate) fn svg_num(v: f32) -> String {
    let rounded = (v * 100.0).round() / 100.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{}", rounded)
    }
}

/// Route an arrow from `pred`'s end to `succ`'s start.
///
/// `None` when either row is hidden or lacks the date it needs.
pub fn route(
    pred: &Row<'_>,
    succ: &Row<'_>,
    timeline: &Timeline,
    config: &LayoutConfig,
) -> Option<ArrowPath> {
    if !pred.visible || !succ.visible {
        return None;
    }
    let pred_top = pred.offset?;
    let from = pos2(
        timeline.date_to_x(pred.end()?) + timeline.day_width,
        pred.center_y(config.row_height)?,
    );
    let to = pos2(
        timeline.date_to_x(succ.start()?),
        succ.center_y(config.row_height)?,
    );
    Some(ArrowPath::plan(
        from,
        to,
        pred_top,
        config.row_height,
        config.elbow,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ROW: f32 = 36.0;
    const E: f32 = 12.0;

    #[test]
    fn clear_path_has_three_segments() {
        let path = ArrowPath::plan(pos2(100.0, 18.0), pos2(150.0, 54.0), 0.0, ROW, E);
        assert!(!path.is_detour());
        assert_eq!(path.segment_count(), 3);
        assert_eq!(
            path.points(),
            vec![
                pos2(100.0, 18.0),
                pos2(112.0, 18.0),
                pos2(112.0, 54.0),
                pos2(150.0, 54.0)
            ]
        );
    }

    #[test]
    fn exact_clearance_is_still_clear() {
        let path = ArrowPath::plan(pos2(100.0, 18.0), pos2(124.0, 54.0), 0.0, ROW, E);
        assert!(!path.is_detour());
    }

    #[test]
    fn overlap_detours_below_predecessor() {
        let path = ArrowPath::plan(pos2(100.0, 18.0), pos2(70.0, 54.0), 0.0, ROW, E);
        assert_eq!(path.segment_count(), 5);
        assert_eq!(
            path.points(),
            vec![
                pos2(100.0, 18.0),
                pos2(112.0, 18.0),
                pos2(112.0, 36.0),
                pos2(58.0, 36.0),
                pos2(58.0, 54.0),
                pos2(70.0, 54.0)
            ]
        );
    }

    #[test]
    fn overlap_detours_above_when_successor_is_above() {
        let path = ArrowPath::plan(pos2(100.0, 90.0), pos2(70.0, 18.0), 72.0, ROW, E);
        match path {
            ArrowPath::Detour { lane_y, .. } => assert_eq!(lane_y, 72.0),
            other => panic!("expected detour, got {:?}", other),
        }
    }

    #[test]
    fn approach_never_left_of_elbow() {
        let path = ArrowPath::plan(pos2(50.0, 18.0), pos2(4.0, 54.0), 0.0, ROW, E);
        match path {
            ArrowPath::Detour { approach_x, .. } => assert_eq!(approach_x, E),
            other => panic!("expected detour, got {:?}", other),
        }
    }

    #[test]
    fn svg_path_data() {
        let path = ArrowPath::plan(pos2(10.0, 18.0), pos2(40.5, 54.0), 0.0, ROW, E);
        assert_eq!(path.svg_d(), "M10 18 L22 18 L22 54 L40.5 54");
    }

    proptest! {
        #[test]
        fn clear_path_ends_moving_right(
            fx in 0.0f32..800.0,
            gap in 0.0f32..400.0,
            rows in 1u32..20,
        ) {
            let from = pos2(fx, ROW / 2.0);
            let to = pos2(fx + 2.0 * E + gap, rows as f32 * ROW + ROW / 2.0);
            let path = ArrowPath::plan(from, to, 0.0, ROW, E);
            prop_assert!(!path.is_detour());
            let pts = path.points();
            let (a, b) = (pts[pts.len() - 2], pts[pts.len() - 1]);
            prop_assert!(b.x > a.x);
            prop_assert_eq!(a.y, b.y);
        }

        #[test]
        fn detour_lane_stays_off_predecessor_bar(
            fx in 24.0f32..800.0,
            overlap in 0.0f32..400.0,
            pred_row in 0u32..20,
            succ_row in 0u32..20,
            inset in 1.0f32..16.0,
        ) {
            prop_assume!(pred_row != succ_row);
            let pred_top = pred_row as f32 * ROW;
            let from = pos2(fx, pred_top + ROW / 2.0);
            let to = pos2(fx + 2.0 * E - 0.5 - overlap, succ_row as f32 * ROW + ROW / 2.0);
            let path = ArrowPath::plan(from, to, pred_top, ROW, E);
            prop_assert!(path.is_detour());

            let bar_top = pred_top + inset;
            let bar_bottom = pred_top + ROW - inset;
            let pts = path.points();
            for seg in pts.windows(2) {
                let (a, b) = (seg[0], seg[1]);
                let inside_bar_band = |y: f32| y > bar_top && y < bar_bottom;
                if a.y == b.y && inside_bar_band(a.y) {
                    // Horizontal runs inside the bar's band stay right of the bar end.
                    prop_assert!(a.x >= fx && b.x >= fx);
                }
                if a.x == b.x && a.x < fx {
                    // Vertical runs left of the bar end never pass through the band.
                    prop_assert!(!(a.y.min(b.y) < bar_bottom && a.y.max(b.y) > bar_top));
                }
            }
        }
    }
}
