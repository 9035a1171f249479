//! SVG serialization of a [`Diagram`].
//!
//! [`document`] stitches title, label column, timeline header and body into
//! one standalone file for export.

use egui::Color32;

use super::{Diagram, LabelRow};
use crate::layout::arrows::svg_num;
use crate::layout::rows::RowKind;
use crate::ui::theme;

/// Width of the label column in exported documents.
pub const LABEL_COLUMN_WIDTH: f32 = 340.0;
/// Height of the title strip in exported documents.
pub const TITLE_HEIGHT: f32 = 40.0;

/// `#RRGGBB`, or `rgba(..)` when the colour is translucent.
pub fn css_color(color: Color32) -> String {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    if a == 255 {
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    } else {
        format!("rgba({},{},{},{:.3})", r, g, b, a as f32 / 255.0)
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn defs() -> String {
    format!(
        r#"<defs>
  <linearGradient id="task-gradient" x1="0" y1="0" x2="0" y2="1">
    <stop offset="0%" stop-color="{top}"/>
    <stop offset="100%" stop-color="{bottom}"/>
  </linearGradient>
  <marker id="arrowhead" viewBox="0 0 10 10" refX="9" refY="5" markerWidth="7" markerHeight="7" orient="0">
    <path d="M0 0 L10 5 L0 10 z" fill="{arrow}"/>
  </marker>
</defs>
"#,
        top = css_color(theme::TASK_FILL_LIGHT),
        bottom = css_color(theme::TASK_FILL),
        arrow = css_color(theme::ARROW),
    )
}

/// Header strip contents: one gridline and label per tick.
fn header_content(diagram: &Diagram) -> String {
    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<rect x="0" y="0" width="{w}" height="{h}" fill="{fill}"/>"#,
        w = svg_num(diagram.width),
        h = svg_num(diagram.header_height),
        fill = css_color(theme::BG_HEADER),
    ));
    svg.push('\n');
    for tick in &diagram.ticks {
        svg.push_str(&format!(
            r#"<line x1="{x}" y1="0" x2="{x}" y2="{h}" stroke="{color}" stroke-width="1"/>"#,
            x = svg_num(tick.x),
            h = svg_num(diagram.header_height),
            color = css_color(theme::GRID_LINE),
        ));
        svg.push('\n');
        svg.push_str(&format!(
            r#"<text x="{x}" y="{y}" font-size="11" fill="{color}">{label}</text>"#,
            x = svg_num(tick.x + 4.0),
            y = svg_num(diagram.header_height / 2.0 + 4.0),
            color = css_color(theme::TEXT_SECONDARY),
            label = escape(&tick.label),
        ));
        svg.push('\n');
    }
    svg
}

/// Body contents in paint order: gridlines, stripes, bars, arrows.
fn body_content(diagram: &Diagram) -> String {
    let mut svg = String::new();
    let height = svg_num(diagram.body_height);

    for x in &diagram.gridlines {
        svg.push_str(&format!(
            r#"<line x1="{x}" y1="0" x2="{x}" y2="{height}" stroke="{color}" stroke-width="1"/>"#,
            x = svg_num(*x),
            height = height,
            color = css_color(theme::GRID_LINE),
        ));
        svg.push('\n');
    }

    for stripe in &diagram.stripes {
        svg.push_str(&format!(
            r#"<rect x="0" y="{y}" width="{w}" height="{h}" fill="{fill}"/>"#,
            y = svg_num(stripe.y),
            w = svg_num(diagram.width),
            h = svg_num(stripe.height),
            fill = css_color(theme::STRIPE),
        ));
        svg.push('\n');
    }

    for bar in &diagram.bars {
        let r = bar.rect;
        match bar.kind {
            RowKind::Phase => svg.push_str(&format!(
                r#"<rect class="bar bar-phase" data-id="{id}" x="{x}" y="{y}" width="{w}" height="{h}" rx="3" fill="{fill}" stroke="{stroke}" stroke-width="1"><title>{name}</title></rect>"#,
                id = escape(&bar.id),
                x = svg_num(r.min.x),
                y = svg_num(r.min.y),
                w = svg_num(r.width()),
                h = svg_num(r.height()),
                fill = css_color(theme::PHASE_FILL),
                stroke = css_color(theme::PHASE_BORDER),
                name = escape(&bar.name),
            )),
            RowKind::Task => svg.push_str(&format!(
                r#"<rect class="bar bar-task" data-id="{id}" x="{x}" y="{y}" width="{w}" height="{h}" rx="4" fill="url(#task-gradient)"><title>{name}: {dates}</title></rect>"#,
                id = escape(&bar.id),
                x = svg_num(r.min.x),
                y = svg_num(r.min.y),
                w = svg_num(r.width()),
                h = svg_num(r.height()),
                name = escape(&bar.name),
                dates = escape(&bar.dates),
            )),
        }
        svg.push('\n');
    }

    for arrow in &diagram.arrows {
        svg.push_str(&format!(
            r#"<path class="dep-arrow" data-from="{from}" data-to="{to}" d="{d}" fill="none" stroke="{color}" stroke-width="1.5" marker-end="url(#arrowhead)"/>"#,
            from = escape(&arrow.from_id),
            to = escape(&arrow.to_id),
            d = arrow.path.svg_d(),
            color = css_color(theme::ARROW),
        ));
        svg.push('\n');
    }

    svg
}

fn label_content(diagram: &Diagram) -> String {
    let mut svg = String::new();
    let columns = [("TASK", 8.0), ("START", 170.0), ("END", 230.0), ("EFFORT", 290.0)];
    for (title, x) in columns {
        svg.push_str(&format!(
            r#"<text x="{x}" y="{y}" font-size="9" font-weight="bold" fill="{color}">{title}</text>"#,
            x = svg_num(x),
            y = svg_num(diagram.header_height / 2.0 + 3.0),
            color = css_color(theme::TEXT_DIM),
        ));
        svg.push('\n');
    }

    for row in diagram.visible_rows() {
        let Some(top) = row.offset else { continue };
        let y = diagram.header_height + top + diagram.row_height / 2.0 + 4.0;
        svg.push_str(&label_line(row, y));
    }
    svg
}

fn label_line(row: &LabelRow, y: f32) -> String {
    let (lead, weight, color) = match row.collapsed {
        Some(true) => ("▸ ".to_string(), "bold", theme::TEXT_PRIMARY),
        Some(false) => ("▾ ".to_string(), "bold", theme::TEXT_PRIMARY),
        None => (format!("{}  ", row.id), "normal", theme::TEXT_SECONDARY),
    };
    let mut svg = format!(
        r#"<text x="8" y="{y}" font-size="12" font-weight="{weight}" fill="{color}">{text}</text>"#,
        y = svg_num(y),
        weight = weight,
        color = css_color(color),
        text = escape(&format!("{}{}", lead, row.name)),
    );
    svg.push('\n');
    for (value, x) in [(&row.start, 170.0), (&row.end, 230.0), (&row.effort, 290.0)] {
        svg.push_str(&format!(
            r#"<text x="{x}" y="{y}" font-size="10" fill="{color}">{value}</text>"#,
            x = svg_num(x),
            y = svg_num(y),
            color = css_color(theme::TEXT_DIM),
            value = escape(value),
        ));
        svg.push('\n');
    }
    svg
}

/// A standalone document: title, label column and timeline side by side.
/// Hidden rows are omitted.
pub fn document(diagram: &Diagram) -> String {
    let width = LABEL_COLUMN_WIDTH + diagram.width.max(0.0);
    let height = TITLE_HEIGHT + diagram.header_height + diagram.body_height;
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"sans-serif\">\n",
        w = svg_num(width),
        h = svg_num(height),
    );
    svg.push_str(&defs());
    svg.push_str(&format!(
        r#"<rect width="100%" height="100%" fill="{}"/>"#,
        css_color(theme::BG_DARK)
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<text x="8" y="25" font-size="15" font-weight="bold" fill="{color}">{title}</text>"#,
        color = css_color(theme::TEXT_PRIMARY),
        title = escape(&diagram.title),
    ));
    svg.push('\n');
    svg.push_str(&format!(
        r#"<text x="{x}" y="25" font-size="11" text-anchor="end" fill="{color}">{range}</text>"#,
        x = svg_num(width - 8.0),
        color = css_color(theme::TEXT_SECONDARY),
        range = escape(&diagram.date_range),
    ));
    svg.push('\n');

    svg.push_str(&format!(
        "<g class=\"labels\" transform=\"translate(0 {})\">\n{}</g>\n",
        svg_num(TITLE_HEIGHT),
        label_content(diagram),
    ));
    svg.push_str(&format!(
        "<g class=\"timeline-header\" transform=\"translate({} {})\">\n{}</g>\n",
        svg_num(LABEL_COLUMN_WIDTH),
        svg_num(TITLE_HEIGHT),
        header_content(diagram),
    ));
    svg.push_str(&format!(
        "<g class=\"timeline-body\" transform=\"translate({} {})\">\n{}</g>\n",
        svg_num(LABEL_COLUMN_WIDTH),
        svg_num(TITLE_HEIGHT + diagram.header_height),
        body_content(diagram),
    ));
    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::layout::rows::CollapsedSet;
    use crate::model::Schedule;
    use crate::render::render;

    fn sample() -> Diagram {
        render(&Schedule::sample(), &CollapsedSet::new(), 890.0, &LayoutConfig::default())
    }

    #[test]
    fn body_draws_arrows_after_bars() {
        let svg = body_content(&sample());
        let last_bar = svg.rfind("class=\"bar ").unwrap();
        let first_arrow = svg.find("class=\"dep-arrow\"").unwrap();
        assert!(last_bar < first_arrow);
        assert_eq!(svg.matches("class=\"dep-arrow\"").count(), 7);
        assert_eq!(svg.matches("class=\"bar bar-phase\"").count(), 3);
    }

    #[test]
    fn header_has_one_label_per_tick() {
        let d = sample();
        let svg = header_content(&d);
        assert_eq!(svg.matches("<text").count(), d.ticks.len());
    }

    #[test]
    fn document_omits_hidden_rows() {
        let collapsed: CollapsedSet = ["phase-3"].into_iter().collect();
        let d = render(&Schedule::sample(), &collapsed, 890.0, &LayoutConfig::default());
        let svg = document(&d);
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("▸ Build &amp; Launch"));
        assert!(!svg.contains("QA &amp; launch"));
        assert!(svg.contains("Website Relaunch"));
    }

    #[test]
    fn colours() {
        assert_eq!(css_color(Color32::from_rgb(255, 0, 16)), "#FF0010");
        assert!(css_color(Color32::from_rgba_unmultiplied(0, 0, 0, 128)).starts_with("rgba(0,0,0,"));
    }
}
