pub mod arrows;
pub mod rows;

pub use arrows::{route, ArrowPath};
pub use rows::{flatten, CollapsedSet, FlatRows, Row, RowKind};
