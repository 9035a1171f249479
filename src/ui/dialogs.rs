use crate::app::ScheduleApp;
use crate::ui::theme;
use egui::{Color32, Context, RichText, Window};

/// Render the "Paste Agent Reply" dialog: the planning agent's message is
/// pasted verbatim and the schedule is pulled from its code block.
pub fn show_paste_reply_dialog(app: &mut ScheduleApp, ctx: &Context) {
    let mut should_close = false;
    Window::new(RichText::new("Paste Agent Reply").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([520.0, 0.0])
        .show(ctx, |ui| {
            ui.label(
                RichText::new("Paste the reply containing the ```json schedule block.")
                    .color(theme::TEXT_SECONDARY),
            );
            ui.add_space(6.0);
            egui::ScrollArea::vertical()
                .max_height(320.0)
                .show(ui, |ui| {
                    ui.add_sized(
                        [ui.available_width(), 300.0],
                        egui::TextEdit::multiline(&mut app.reply_text)
                            .code_editor()
                            .hint_text("```json\n{ \"project\": { ... }, \"groups\": [ ... ] }\n```"),
                    );
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let load_btn = egui::Button::new(RichText::new("Load").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([80.0, 28.0], load_btn).clicked() && app.load_reply_text() {
                    should_close = true;
                }
                if ui.add_sized([80.0, 28.0], egui::Button::new("Cancel")).clicked() {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_paste_reply = false;
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut ScheduleApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 180.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Schedule Gantt").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("A schedule timeline viewer");
                ui.label("built with Rust and egui.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}
