use egui::{pos2, vec2, Align2, Rect, Sense, Stroke, Ui};
use egui_phosphor::regular::{CARET_DOWN, CARET_RIGHT};

use crate::layout::rows::RowKind;
use crate::render::{Diagram, LabelRow};
use crate::ui::theme;

const START_COL: f32 = 230.0;
const END_COL: f32 = 150.0;
const EFFORT_COL: f32 = 70.0;
const ID_WIDTH: f32 = 64.0;

/// Actions that the row panel can request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowPanelAction {
    None,
    Toggle(String),
}

pub struct RowPanelOutput {
    pub action: RowPanelAction,
    /// Vertical scroll offset after this frame.
    pub scroll_y: f32,
}

/// Render the left label panel: a header strip the height of the timeline
/// header, then one fixed-height line per visible row.
pub fn show_row_panel(diagram: &Diagram, scroll_to: Option<f32>, ui: &mut Ui) -> RowPanelOutput {
    let mut action = RowPanelAction::None;
    ui.spacing_mut().item_spacing = vec2(0.0, 0.0);

    let (header_rect, _) = ui.allocate_exact_size(
        vec2(ui.available_width(), diagram.header_height),
        Sense::hover(),
    );
    paint_column_titles(ui, header_rect);

    let mut area = egui::ScrollArea::vertical()
        .id_salt("row_panel_scroll")
        .auto_shrink([false, false]);
    if let Some(y) = scroll_to {
        area = area.vertical_scroll_offset(y);
    }

    let output = area.show(ui, |ui| {
        ui.spacing_mut().item_spacing = vec2(0.0, 0.0);
        for row in diagram.visible_rows() {
            let (rect, response) = ui.allocate_exact_size(
                vec2(ui.available_width(), diagram.row_height),
                if row.collapsed.is_some() {
                    Sense::click()
                } else {
                    Sense::hover()
                },
            );
            paint_row(ui, rect, row, response.hovered());
            if row.collapsed.is_some() {
                let response = response.on_hover_cursor(egui::CursorIcon::PointingHand);
                if response.clicked() {
                    action = RowPanelAction::Toggle(row.id.clone());
                }
            }
        }
    });

    RowPanelOutput {
        action,
        scroll_y: output.state.offset.y,
    }
}

fn paint_column_titles(ui: &Ui, rect: Rect) {
    let painter = ui.painter();
    painter.rect_filled(rect, 0.0, theme::BG_HEADER);
    painter.line_segment(
        [rect.left_bottom(), rect.right_bottom()],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
    let y = rect.center().y;
    let titles = [
        ("TASK", rect.left() + 12.0),
        ("START", rect.right() - START_COL),
        ("END", rect.right() - END_COL),
        ("EFFORT", rect.right() - EFFORT_COL),
    ];
    for (text, x) in titles {
        painter.text(
            pos2(x, y),
            Align2::LEFT_CENTER,
            text,
            theme::font_small(),
            theme::TEXT_DIM,
        );
    }
}

fn paint_row(ui: &Ui, rect: Rect, row: &LabelRow, hovered: bool) {
    let painter = ui.painter_at(rect);
    let is_phase = row.kind == RowKind::Phase;

    if is_phase {
        painter.rect_filled(rect, 0.0, theme::BG_PHASE_ROW);
    }
    if hovered {
        painter.rect_filled(rect, 0.0, theme::BG_ROW_HOVER);
    }
    painter.line_segment(
        [rect.left_bottom(), rect.right_bottom()],
        Stroke::new(0.5, theme::BORDER_SUBTLE),
    );

    let y = rect.center().y;
    let name_x = match row.collapsed {
        Some(collapsed) => {
            let icon = if collapsed { CARET_RIGHT } else { CARET_DOWN };
            painter.text(
                pos2(rect.left() + 10.0, y),
                Align2::LEFT_CENTER,
                icon,
                theme::font_row(),
                theme::ACCENT,
            );
            rect.left() + 30.0
        }
        None => {
            painter.text(
                pos2(rect.left() + 12.0, y),
                Align2::LEFT_CENTER,
                &row.id,
                theme::font_small(),
                theme::TEXT_DIM,
            );
            rect.left() + 12.0 + ID_WIDTH
        }
    };

    // Keep the name out of the date columns.
    let name_clip = Rect::from_min_max(
        pos2(name_x, rect.top()),
        pos2(rect.right() - START_COL - 6.0, rect.bottom()),
    );
    let name_color = if is_phase {
        theme::TEXT_PRIMARY
    } else {
        theme::TEXT_SECONDARY
    };
    painter.with_clip_rect(name_clip).text(
        pos2(name_x, y),
        Align2::LEFT_CENTER,
        &row.name,
        theme::font_row(),
        name_color,
    );

    for (value, offset) in [
        (&row.start, START_COL),
        (&row.end, END_COL),
        (&row.effort, EFFORT_COL),
    ] {
        painter.text(
            pos2(rect.right() - offset, y),
            Align2::LEFT_CENTER,
            value,
            theme::font_sub(),
            theme::TEXT_DIM,
        );
    }
}
