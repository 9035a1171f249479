use std::path::Path;

use crate::error::{Result, ScheduleError};
use crate::model::Schedule;
use crate::render::{svg, Diagram};

/// Parse a schedule from JSON text.
pub fn parse_schedule(json: &str) -> Result<Schedule> {
    Ok(serde_json::from_str(json)?)
}

/// Load a schedule from a JSON file.
pub fn load_schedule(path: &Path) -> Result<Schedule> {
    let json = std::fs::read_to_string(path)?;
    let schedule = parse_schedule(&json)?;
    tracing::info!(
        path = %path.display(),
        groups = schedule.groups.len(),
        tasks = schedule.tasks().count(),
        "schedule loaded"
    );
    Ok(schedule)
}

/// Find the schedule JSON inside a planning agent's reply.
///
/// Returns the body of the last fenced code block whose content starts with
/// `{`; the agent states its final plan last.
pub fn extract_schedule_block(text: &str) -> Option<&str> {
    let mut found = None;
    let mut rest = text;
    while let Some(open) = rest.find("```") {
        let after_fence = &rest[open + 3..];
        // Skip the info string (e.g. "json") up to the end of the line.
        let Some(newline) = after_fence.find('\n') else { break };
        let body = &after_fence[newline + 1..];
        let Some(close) = body.find("```") else { break };
        let block = body[..close].trim();
        if block.starts_with('{') {
            found = Some(block);
        }
        rest = &body[close + 3..];
    }
    found
}

/// Extract and parse the schedule from an agent reply.
pub fn parse_agent_reply(text: &str) -> Result<Schedule> {
    let block = extract_schedule_block(text).ok_or(ScheduleError::NoScheduleBlock)?;
    parse_schedule(block)
}

/// Load an agent reply from disk and parse the schedule in it.
pub fn load_agent_reply(path: &Path) -> Result<Schedule> {
    let text = std::fs::read_to_string(path)?;
    let schedule = parse_agent_reply(&text)?;
    tracing::info!(path = %path.display(), groups = schedule.groups.len(), "schedule extracted from reply");
    Ok(schedule)
}

/// Write the diagram as a standalone SVG document.
pub fn save_svg(diagram: &Diagram, path: &Path) -> Result<()> {
    std::fs::write(path, svg::document(diagram))?;
    tracing::info!(path = %path.display(), "svg exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPLY: &str = "Here is a first idea:\n\
        ```\nnot json\n```\n\
        And the final plan:\n\
        ```json\n{\"project\":{\"name\":\"P\",\"start\":\"2024-01-01\",\"end\":\"2024-01-31\"},\"groups\":[]}\n```\n\
        Let me know!";

    #[test]
    fn extracts_last_json_block() {
        let block = extract_schedule_block(REPLY).unwrap();
        assert!(block.starts_with("{\"project\""));
        let schedule = parse_agent_reply(REPLY).unwrap();
        assert_eq!(schedule.project.name, "P");
    }

    #[test]
    fn reply_without_block_is_an_error() {
        let err = parse_agent_reply("I need more details first.").unwrap_err();
        assert!(matches!(err, ScheduleError::NoScheduleBlock));
    }

    #[test]
    fn unterminated_fence_is_ignored() {
        assert_eq!(extract_schedule_block("```json\n{\"project\":{}}"), None);
    }

    #[test]
    fn syntax_error_is_reported() {
        assert!(matches!(parse_schedule("{ nope"), Err(ScheduleError::Json(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_schedule(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ScheduleError::Io(_)));
    }

    #[test]
    fn load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.json");
        let json = serde_json::to_string(&Schedule::sample()).unwrap();
        std::fs::write(&path, json).unwrap();
        assert_eq!(load_schedule(&path).unwrap(), Schedule::sample());
    }
}
