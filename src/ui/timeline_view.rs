use chrono::NaiveDate;
use egui::scroll_area::ScrollBarVisibility;
use egui::{pos2, vec2, Align2, Painter, Pos2, Rect, Rounding, Sense, Shape, Stroke, Ui, Vec2};

use crate::layout::arrows::ArrowPath;
use crate::layout::rows::RowKind;
use crate::render::{Bar, Diagram};
use crate::ui::theme;

/// What the body reported this frame.
pub struct BodyOutput {
    pub scroll: Vec2,
    /// The day under the pointer, if it is over the timeline.
    pub hovered_date: Option<NaiveDate>,
}

/// Render the timeline header strip. It never scrolls on its own; the
/// horizontal offset always comes from the body.
pub fn show_header(diagram: &Diagram, scroll_x: Option<f32>, ui: &mut Ui) {
    let mut area = egui::ScrollArea::horizontal()
        .id_salt("timeline_header_scroll")
        .enable_scrolling(false)
        .scroll_bar_visibility(ScrollBarVisibility::AlwaysHidden)
        .auto_shrink([false, true]);
    if let Some(x) = scroll_x {
        area = area.horizontal_scroll_offset(x);
    }

    area.show(ui, |ui| {
        let width = diagram.width.max(ui.available_width());
        let (response, painter) =
            ui.allocate_painter(vec2(width, diagram.header_height), Sense::hover());
        let origin = response.rect.min;

        painter.rect_filled(response.rect, 0.0, theme::BG_HEADER);
        painter.line_segment(
            [
                pos2(origin.x, origin.y + diagram.header_height),
                pos2(origin.x + width, origin.y + diagram.header_height),
            ],
            Stroke::new(1.0, theme::BORDER_SUBTLE),
        );

        for tick in &diagram.ticks {
            let x = origin.x + tick.x;
            painter.line_segment(
                [pos2(x, origin.y), pos2(x, origin.y + diagram.header_height)],
                Stroke::new(0.5, theme::GRID_LINE),
            );
            painter.text(
                pos2(x + 4.0, origin.y + diagram.header_height / 2.0),
                Align2::LEFT_CENTER,
                &tick.label,
                theme::font_header(),
                theme::TEXT_SECONDARY,
            );
        }
    });
}

/// Render the timeline body: gridlines, stripes, bars, then arrows on top.
pub fn show_body(diagram: &Diagram, scroll_y: Option<f32>, ui: &mut Ui) -> BodyOutput {
    let mut area = egui::ScrollArea::both()
        .id_salt("timeline_body_scroll")
        .auto_shrink([false, false]);
    if let Some(y) = scroll_y {
        area = area.vertical_scroll_offset(y);
    }

    let output = area.show(ui, |ui| {
        let available = ui.available_size();
        let width = diagram.width.max(available.x);
        let height = diagram.body_height.max(available.y);
        let (response, painter) = ui.allocate_painter(vec2(width, height), Sense::hover());
        let origin = response.rect.min;

        painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

        for x in &diagram.gridlines {
            painter.line_segment(
                [pos2(origin.x + x, origin.y), pos2(origin.x + x, origin.y + height)],
                Stroke::new(0.5, theme::GRID_LINE),
            );
        }

        for stripe in &diagram.stripes {
            painter.rect_filled(
                Rect::from_min_size(
                    pos2(origin.x, origin.y + stripe.y),
                    vec2(width, stripe.height),
                ),
                0.0,
                theme::STRIPE,
            );
        }

        let pointer = response.hover_pos();
        let mut hovered_bar = None;
        for bar in &diagram.bars {
            let rect = bar.rect.translate(origin.to_vec2());
            draw_bar(&painter, bar, rect);
            if pointer.is_some_and(|p| rect.contains(p)) {
                hovered_bar = Some(bar);
            }
        }

        for arrow in &diagram.arrows {
            draw_arrow(&painter, &arrow.path, origin);
        }

        if let Some(bar) = hovered_bar {
            egui::show_tooltip_at_pointer(
                ui.ctx(),
                ui.layer_id(),
                egui::Id::new(("bar-tip", bar.kind == RowKind::Phase, &bar.id)),
                |ui| {
                    ui.strong(&bar.name);
                    ui.label(&bar.dates);
                },
            );
        }

        pointer
            .filter(|p| p.x - origin.x < diagram.width)
            .map(|p| diagram.timeline.x_to_date(p.x - origin.x))
    });

    BodyOutput {
        scroll: output.state.offset,
        hovered_date: output.inner,
    }
}

fn draw_bar(painter: &Painter, bar: &Bar, rect: Rect) {
    let rounding = Rounding::same(theme::BAR_ROUNDING);
    match bar.kind {
        RowKind::Phase => {
            painter.rect_filled(rect, rounding, theme::PHASE_FILL);
            painter.rect_stroke(rect, rounding, Stroke::new(1.0, theme::PHASE_BORDER));
        }
        RowKind::Task => {
            painter.rect_filled(rect, rounding, theme::TASK_FILL);
            // Lighter top half stands in for the gradient.
            let highlight = Rect::from_min_size(rect.min, vec2(rect.width(), rect.height() * 0.5));
            painter.rect_filled(
                highlight,
                Rounding {
                    nw: theme::BAR_ROUNDING,
                    ne: theme::BAR_ROUNDING,
                    sw: 0.0,
                    se: 0.0,
                },
                theme::TASK_FILL_LIGHT,
            );

            if rect.width() > 30.0 {
                let galley =
                    painter.layout_no_wrap(bar.name.clone(), theme::font_bar(), theme::TEXT_ON_BAR);
                let text_y = rect.top() + (rect.height() - galley.size().y) / 2.0;
                painter.with_clip_rect(rect).galley(
                    pos2(rect.left() + 6.0, text_y),
                    galley,
                    theme::TEXT_ON_BAR,
                );
            }
        }
    }
}

fn draw_arrow(painter: &Painter, path: &ArrowPath, origin: Pos2) {
    let offset = origin.to_vec2();
    let points: Vec<Pos2> = path.points().into_iter().map(|p| p + offset).collect();
    let stroke = Stroke::new(1.5, theme::ARROW);
    painter.add(Shape::line(points, stroke));

    // The head always points right, matching the last segment of a routed path.
    let tip = path.end() + offset;
    let h = theme::ARROW_HEAD;
    painter.add(Shape::convex_polygon(
        vec![tip, pos2(tip.x - h, tip.y - h * 0.8), pos2(tip.x - h, tip.y + h * 0.8)],
        theme::ARROW,
        Stroke::NONE,
    ));
}
