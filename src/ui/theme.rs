use egui::{Color32, FontId, Rounding, Stroke, Visuals};

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(24, 24, 32);
pub const BG_PANEL: Color32 = Color32::from_rgb(30, 30, 40);
pub const BG_HEADER: Color32 = Color32::from_rgb(34, 37, 48);
pub const BG_PHASE_ROW: Color32 = Color32::from_rgb(36, 38, 52);
pub const BG_ROW_HOVER: Color32 = Color32::from_rgba_premultiplied(14, 14, 14, 14);
pub const BG_SELECTED: Color32 = Color32::from_rgba_premultiplied(28, 49, 77, 45);
pub const STRIPE: Color32 = Color32::from_rgba_premultiplied(6, 6, 6, 6);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(50, 52, 64);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 232, 240);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(155, 160, 178);
pub const TEXT_DIM: Color32 = Color32::from_rgb(100, 105, 120);
pub const TEXT_ON_BAR: Color32 = Color32::from_rgb(255, 255, 255);

pub const ACCENT: Color32 = Color32::from_rgb(80, 140, 220);
pub const GRID_LINE: Color32 = Color32::from_rgb(44, 46, 58);

pub const PHASE_FILL: Color32 = Color32::from_rgba_premultiplied(28, 49, 77, 90);
pub const PHASE_BORDER: Color32 = Color32::from_rgb(90, 140, 220);
pub const TASK_FILL: Color32 = Color32::from_rgb(66, 118, 200);
pub const TASK_FILL_LIGHT: Color32 = Color32::from_rgb(98, 150, 230);
pub const ARROW: Color32 = Color32::from_rgb(150, 160, 190);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const SIDE_PANEL_WIDTH: f32 = 420.0;
pub const SIDE_PANEL_MIN_WIDTH: f32 = 260.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;
pub const BAR_ROUNDING: f32 = 4.0;
pub const ARROW_HEAD: f32 = 5.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_header() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_sub() -> FontId {
    FontId::proportional(10.5)
}

pub fn font_row() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_bar() -> FontId {
    FontId::proportional(11.5)
}

pub fn font_small() -> FontId {
    FontId::proportional(9.5)
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

/// Dark visuals for the viewer. Only menus, dialog buttons and the reply
/// text box use egui widgets; the panels paint themselves.
pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.window_rounding = Rounding::same(8.0);
    // Reply text box background.
    visuals.extreme_bg_color = BG_DARK;

    for widget in [&mut visuals.widgets.inactive, &mut visuals.widgets.hovered] {
        widget.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
        widget.rounding = Rounding::same(BAR_ROUNDING);
    }
    visuals.widgets.inactive.weak_bg_fill = BG_HEADER;
    visuals.widgets.hovered.weak_bg_fill = BG_PHASE_ROW;
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.selection.bg_fill = BG_SELECTED;
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    ctx.set_visuals(visuals);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_sets_panel_and_selection_colours() {
        let ctx = egui::Context::default();
        apply_theme(&ctx);
        let visuals = ctx.style().visuals.clone();
        assert_eq!(visuals.panel_fill, BG_PANEL);
        assert_eq!(visuals.extreme_bg_color, BG_DARK);
        assert_eq!(visuals.selection.bg_fill, BG_SELECTED);
        assert_eq!(visuals.widgets.hovered.bg_stroke.color, ACCENT);
    }
}
