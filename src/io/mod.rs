pub mod csv_export;
pub mod file;

pub use csv_export::export_csv;
pub use file::{load_agent_reply, load_schedule, parse_agent_reply, parse_schedule, save_svg};
