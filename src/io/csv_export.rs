use std::path::Path;

use crate::error::Result;
use crate::layout::rows::RowKind;
use crate::render::Diagram;

fn kind_label(kind: RowKind) -> &'static str {
    match kind {
        RowKind::Phase => "Phase",
        RowKind::Task => "Task",
    }
}

/// Write the label panel as a semicolon-delimited table.
///
/// Columns: Kind ; Id ; Name ; Start ; End ; Effort
/// Collapsed tasks are included. Returns the number of rows written.
pub fn export_rows<W: std::io::Write>(diagram: &Diagram, writer: W) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(["Kind", "Id", "Name", "Start", "End", "Effort"])?;
    for row in &diagram.rows {
        wtr.write_record([
            kind_label(row.kind),
            row.id.as_str(),
            row.name.as_str(),
            row.start.as_str(),
            row.end.as_str(),
            row.effort.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(diagram.rows.len())
}

/// [`export_rows`] into a file.
pub fn export_csv(diagram: &Diagram, path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)?;
    let count = export_rows(diagram, file)?;
    tracing::info!(path = %path.display(), rows = count, "csv exported");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::layout::rows::CollapsedSet;
    use crate::model::Schedule;
    use crate::render::render;

    #[test]
    fn writes_header_and_every_row() {
        let collapsed: CollapsedSet = ["phase-1"].into_iter().collect();
        let diagram = render(&Schedule::sample(), &collapsed, 900.0, &LayoutConfig::default());
        let mut out = Vec::new();
        let count = export_rows(&diagram, &mut out).unwrap();
        assert_eq!(count, 10);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "Kind;Id;Name;Start;End;Effort");
        assert_eq!(lines[1], "Phase;phase-1;Discovery;Jan 1, 2024;Jan 26, 2024;4 weeks");
        assert!(lines[2].starts_with("Task;task-1-1;Stakeholder interviews;"));
    }

    #[test]
    fn export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        let diagram = render(&Schedule::sample(), &CollapsedSet::new(), 900.0, &LayoutConfig::default());
        assert_eq!(export_csv(&diagram, &path).unwrap(), 10);
        assert!(std::fs::read_to_string(&path).unwrap().contains("QA & launch"));
    }
}
