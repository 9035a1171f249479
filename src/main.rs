#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use schedule_gantt::app::ScheduleApp;
use schedule_gantt::config::{LayoutConfig, DEFAULT_EXPORT_WIDTH};
use schedule_gantt::layout::CollapsedSet;
use schedule_gantt::model::Schedule;
use schedule_gantt::{io, render};

/// Lay out a project schedule as a Gantt timeline.
#[derive(Debug, Parser)]
#[command(name = "schedule-gantt", version, about)]
struct Cli {
    /// Schedule JSON file (or agent reply with --reply). Opens the sample
    /// schedule when omitted.
    schedule: Option<PathBuf>,

    /// Treat the input as an agent reply and read the fenced JSON block.
    #[arg(long)]
    reply: bool,

    /// Write the diagram as SVG and exit.
    #[arg(long, value_name = "OUT")]
    export_svg: Option<PathBuf>,

    /// Write the row table as CSV and exit.
    #[arg(long, value_name = "OUT")]
    export_csv: Option<PathBuf>,

    /// Timeline width in pixels for exports.
    #[arg(long, value_name = "PX", default_value_t = DEFAULT_EXPORT_WIDTH)]
    width: f32,

    /// Collapse a phase by id before exporting. Repeatable.
    #[arg(long = "collapse", value_name = "GROUP_ID")]
    collapse: Vec<String>,
}

impl Cli {
    fn is_headless(&self) -> bool {
        self.export_svg.is_some() || self.export_csv.is_some()
    }

    fn load(&self) -> schedule_gantt::Result<Option<Schedule>> {
        let Some(path) = &self.schedule else {
            return Ok(None);
        };
        let schedule = if self.reply {
            io::load_agent_reply(path)?
        } else {
            io::load_schedule(path)?
        };
        Ok(Some(schedule))
    }
}

fn export(cli: &Cli, schedule: &Schedule) -> schedule_gantt::Result<()> {
    let collapsed: CollapsedSet = cli.collapse.iter().cloned().collect();
    let diagram = render::render(schedule, &collapsed, cli.width, &LayoutConfig::default());
    if let Some(out) = &cli.export_svg {
        io::save_svg(&diagram, out)?;
    }
    if let Some(out) = &cli.export_csv {
        io::export_csv(&diagram, out)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let schedule = match cli.load() {
        Ok(schedule) => schedule,
        Err(e) => {
            tracing::error!(error = %e, "could not load schedule");
            return ExitCode::FAILURE;
        }
    };

    if cli.is_headless() {
        let schedule = schedule.unwrap_or_else(Schedule::sample);
        return match export(&cli, &schedule) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(error = %e, "export failed");
                ExitCode::FAILURE
            }
        };
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Schedule Gantt"),
        ..Default::default()
    };

    let path = cli.schedule.clone();
    let result = eframe::run_native(
        "Schedule Gantt",
        options,
        Box::new(move |cc| {
            let mut app = ScheduleApp::new(cc, schedule);
            app.file_path = path;
            Ok(Box::new(app))
        }),
    );
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "viewer exited with an error");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn defaults_open_the_viewer() {
        let cli = Cli::try_parse_from(["schedule-gantt"]).unwrap();
        assert!(cli.schedule.is_none());
        assert!(!cli.is_headless());
        assert_eq!(cli.width, DEFAULT_EXPORT_WIDTH);
    }

    #[test]
    fn export_flags_parse() {
        let cli = Cli::try_parse_from([
            "schedule-gantt",
            "plan.md",
            "--reply",
            "--export-svg",
            "out.svg",
            "--width",
            "1200",
            "--collapse",
            "phase-1",
            "--collapse",
            "phase-2",
        ])
        .unwrap();
        assert!(cli.reply);
        assert!(cli.is_headless());
        assert_eq!(cli.width, 1200.0);
        assert_eq!(cli.collapse, vec!["phase-1", "phase-2"]);
        assert_eq!(cli.export_svg, Some(PathBuf::from("out.svg")));
    }

    #[test]
    fn headless_export_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let svg = dir.path().join("out.svg");
        let csv = dir.path().join("out.csv");
        let cli = Cli::try_parse_from([
            OsString::from("schedule-gantt"),
            OsString::from("--export-svg"),
            svg.clone().into_os_string(),
            OsString::from("--export-csv"),
            csv.clone().into_os_string(),
        ])
        .unwrap();
        export(&cli, &Schedule::sample()).unwrap();
        assert!(std::fs::read_to_string(&svg).unwrap().starts_with("<svg"));
        assert!(std::fs::read_to_string(&csv)
            .unwrap()
            .starts_with("Kind;Id;Name;Start;End;Effort"));
    }
}
