use thiserror::Error;

/// Failures while loading a schedule or writing an export.
///
/// Rendering itself never fails; only the edges that touch files or
/// foreign text do.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No schedule code block found in reply")]
    NoScheduleBlock,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
