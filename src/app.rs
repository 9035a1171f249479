use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::NaiveDate;

use crate::config::{LayoutConfig, DEFAULT_EXPORT_WIDTH, RESIZE_DEBOUNCE};
use crate::layout::CollapsedSet;
use crate::model::Schedule;
use crate::model::timeline::DISPLAY_FORMAT;
use crate::render::{self, Diagram};
use crate::ui;
use crate::ui::row_panel::RowPanelAction;
use crate::ui::sync::{ResizeDebouncer, ScrollSync, ScrollTargets};

/// Main application state.
pub struct ScheduleApp {
    pub schedule: Schedule,
    pub collapsed: CollapsedSet,
    pub file_path: Option<PathBuf>,
    pub config: LayoutConfig,
    diagram: Option<Diagram>,

    // Scroll / resize coordination
    scroll: ScrollSync,
    pending_scroll: ScrollTargets,
    resize: ResizeDebouncer,
    /// False until a frame has reported the real body width.
    width_known: bool,

    // Dialog state
    pub show_about: bool,
    pub show_paste_reply: bool,
    pub reply_text: String,

    pub last_export: Option<PathBuf>,
    pub hovered_date: Option<NaiveDate>,
    pub status_message: String,
}

impl ScheduleApp {
    pub fn new(cc: &eframe::CreationContext<'_>, schedule: Option<Schedule>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        Self::with_schedule(schedule.unwrap_or_else(Schedule::sample))
    }

    /// Build the app state without a window. The diagram is laid out at the
    /// default width until the first frame reports the real one.
    pub fn with_schedule(schedule: Schedule) -> Self {
        let mut app = Self {
            schedule,
            collapsed: CollapsedSet::new(),
            file_path: None,
            config: LayoutConfig::default(),
            diagram: None,
            scroll: ScrollSync::new(),
            pending_scroll: ScrollTargets::default(),
            resize: ResizeDebouncer::new(RESIZE_DEBOUNCE),
            width_known: false,
            show_about: false,
            show_paste_reply: false,
            reply_text: String::new(),
            last_export: None,
            hovered_date: None,
            status_message: "Ready".to_string(),
        };
        app.render_now(DEFAULT_EXPORT_WIDTH);
        app
    }

    pub fn diagram(&self) -> Option<&Diagram> {
        self.diagram.as_ref()
    }

    /// Replace the displayed schedule. Collapse state and scroll positions
    /// start over.
    pub fn load_schedule(&mut self, schedule: Schedule, path: Option<PathBuf>) {
        self.schedule = schedule;
        self.file_path = path;
        self.collapsed.clear();
        self.pending_scroll = self.scroll.reset();
        self.hovered_date = None;
        self.rerender();
        self.status_message = format!(
            "Loaded '{}' ({} phases, {} tasks)",
            self.schedule.project.name,
            self.schedule.groups.len(),
            self.schedule.tasks().count()
        );
    }

    /// Lay out at `width` right away and remember it as the current width.
    pub fn render_now(&mut self, width: f32) {
        self.diagram = Some(render::render(
            &self.schedule,
            &self.collapsed,
            width,
            &self.config,
        ));
        self.resize.commit(width);
    }

    fn rerender(&mut self) {
        let width = self.resize.committed().unwrap_or(DEFAULT_EXPORT_WIDTH);
        self.render_now(width);
    }

    // --- Collapse state ---

    pub fn toggle_phase(&mut self, group_id: &str) {
        let collapsed = self.collapsed.toggle(group_id);
        self.rerender();
        let name = self
            .schedule
            .groups
            .iter()
            .find(|g| g.id == group_id)
            .map(|g| g.name.as_str())
            .unwrap_or(group_id);
        self.status_message = if collapsed {
            format!("Collapsed '{}'", name)
        } else {
            format!("Expanded '{}'", name)
        };
    }

    pub fn collapse_all(&mut self) {
        self.collapsed.collapse_all(&self.schedule);
        self.rerender();
        self.status_message = "All phases collapsed".to_string();
    }

    pub fn expand_all(&mut self) {
        self.collapsed.clear();
        self.rerender();
        self.status_message = "All phases expanded".to_string();
    }

    // --- File operations ---

    pub fn open_schedule(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Schedule", &["json"])
            .add_filter("Agent Reply", &["md", "txt"])
            .pick_file()
        {
            self.open_path(&path);
        }
    }

    /// Load a schedule file, or an agent reply if it is not plain JSON.
    pub fn open_path(&mut self, path: &Path) {
        let is_reply = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| !e.eq_ignore_ascii_case("json"));
        let loaded = if is_reply {
            crate::io::load_agent_reply(path)
        } else {
            crate::io::load_schedule(path)
        };
        match loaded {
            Ok(schedule) => self.load_schedule(schedule, Some(path.to_path_buf())),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "schedule load failed");
                self.status_message = format!("Error loading: {}", e);
            }
        }
    }

    /// Parse the pasted agent reply. Returns true when a schedule was loaded.
    pub fn load_reply_text(&mut self) -> bool {
        match crate::io::parse_agent_reply(&self.reply_text) {
            Ok(schedule) => {
                self.load_schedule(schedule, None);
                self.reply_text.clear();
                true
            }
            Err(e) => {
                self.status_message = format!("Reply not loaded: {}", e);
                false
            }
        }
    }

    fn export_name(&self, ext: &str) -> String {
        let stem = if self.schedule.project.name.is_empty() {
            "schedule"
        } else {
            self.schedule.project.name.as_str()
        };
        format!("{}.{}", stem, ext)
    }

    pub fn export_svg(&mut self) {
        let Some(diagram) = &self.diagram else { return };
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("SVG Image", &["svg"])
            .set_file_name(self.export_name("svg"))
            .save_file()
        {
            match crate::io::save_svg(diagram, &path) {
                Ok(()) => {
                    self.status_message = format!("Exported SVG to {}", path.display());
                    self.last_export = Some(path);
                }
                Err(e) => self.status_message = format!("SVG export failed: {}", e),
            }
        }
    }

    pub fn export_csv(&mut self) {
        let Some(diagram) = &self.diagram else { return };
        if diagram.rows.is_empty() {
            self.status_message = "Nothing to export, schedule has no rows".to_string();
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(self.export_name("csv"))
            .save_file()
        {
            match crate::io::export_csv(diagram, &path) {
                Ok(count) => {
                    self.status_message = format!("Exported {} rows to CSV", count);
                    self.last_export = Some(path);
                }
                Err(e) => self.status_message = format!("CSV export failed: {}", e),
            }
        }
    }

    pub fn open_last_export(&mut self) {
        if let Some(path) = &self.last_export {
            if let Err(e) = open::that(path) {
                self.status_message = format!("Could not open {}: {}", path.display(), e);
            }
        }
    }

    /// Feed the body width seen this frame. The first width is laid out at
    /// once; later changes wait for the debounce. Returns the time left
    /// until a pending change settles.
    pub fn observe_width(&mut self, width: f32, now: Instant) -> Option<Duration> {
        if !self.width_known {
            self.width_known = true;
            self.render_now(width);
            return None;
        }
        let remaining = self.resize.observe(width, now);
        if let Some(width) = self.resize.poll(now) {
            tracing::debug!(width, "resize settled");
            self.render_now(width);
        }
        remaining
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let dim = |text: String| {
                            egui::RichText::new(text)
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM)
                        };
                        if let Some(diagram) = &self.diagram {
                            ui.label(dim(format!("Arrows: {}", diagram.arrows.len())));
                            ui.label(dim(" · ".to_string()));
                            ui.label(dim(format!(
                                "Rows: {}/{}",
                                diagram.visible_rows().count(),
                                diagram.rows.len()
                            )));
                        }
                        if let Some(date) = self.hovered_date {
                            ui.label(dim(" · ".to_string()));
                            ui.label(dim(date.format(DISPLAY_FORMAT).to_string()));
                        }
                    });
                });
            });
    }
}

impl eframe::App for ScheduleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        self.show_status_bar(ctx);

        let targets = std::mem::take(&mut self.pending_scroll);

        // Left panel: row labels
        let mut rows_y = 0.0;
        let mut action = RowPanelAction::None;
        egui::SidePanel::left("row_panel")
            .default_width(ui::theme::SIDE_PANEL_WIDTH)
            .min_width(ui::theme::SIDE_PANEL_MIN_WIDTH)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::ZERO)
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                if let Some(diagram) = &self.diagram {
                    let output = ui::row_panel::show_row_panel(diagram, targets.rows_y, ui);
                    rows_y = output.scroll_y;
                    action = output.action;
                }
            });

        // Central panel: timeline header and body
        let mut body_scroll = None;
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            if let Some(remaining) = self.observe_width(ui.available_width(), Instant::now()) {
                ctx.request_repaint_after(remaining);
            }
            let Some(diagram) = &self.diagram else { return };

            ui.spacing_mut().item_spacing = egui::vec2(0.0, 0.0);
            ui::timeline_view::show_header(diagram, targets.header_x, ui);
            let output = ui::timeline_view::show_body(diagram, targets.body_y, ui);
            body_scroll = Some(output.scroll);
            self.hovered_date = output.hovered_date;
        });

        if let Some(scroll) = body_scroll {
            self.pending_scroll = self.scroll.observe(rows_y, scroll.x, scroll.y);
            if !self.pending_scroll.is_empty() {
                ctx.request_repaint();
            }
        }

        if let RowPanelAction::Toggle(id) = action {
            self.toggle_phase(&id);
        }

        // Dialogs
        if self.show_paste_reply {
            ui::dialogs::show_paste_reply_dialog(self, ctx);
        }
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}
