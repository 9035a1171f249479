pub mod project;
pub mod task;
pub mod timeline;

pub use project::{Project, Schedule};
pub use task::{Group, Task};
pub use timeline::{Tick, TickScale, Timeline};
