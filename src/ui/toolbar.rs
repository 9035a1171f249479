use crate::app::ScheduleApp;
use egui::{menu, RichText, Ui};

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut ScheduleApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").size(12.5), |ui| {
            if ui.button("  Open Schedule...").clicked() {
                app.open_schedule();
                ui.close_menu();
            }
            if ui.button("  Paste Agent Reply...").clicked() {
                app.show_paste_reply = true;
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Export SVG...").clicked() {
                app.export_svg();
                ui.close_menu();
            }
            if ui.button("  Export CSV...").clicked() {
                app.export_csv();
                ui.close_menu();
            }
            ui.separator();
            let has_export = app.last_export.is_some();
            if ui
                .add_enabled(has_export, egui::Button::new("  Open Last Export"))
                .clicked()
            {
                app.open_last_export();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").size(12.5), |ui| {
            if ui.button("  Collapse All Phases").clicked() {
                app.collapse_all();
                ui.close_menu();
            }
            if ui.button("  Expand All Phases").clicked() {
                app.expand_all();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").size(12.5), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned project title and date range
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if let Some(diagram) = app.diagram() {
                ui.label(RichText::new(&diagram.date_range).size(11.0).weak());
                ui.label(RichText::new(&diagram.title).size(12.0).strong());
            }
        });
    });
}
