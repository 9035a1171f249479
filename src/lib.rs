//! Schedule timeline layout and viewer.
//!
//! `render::render` turns a [`model::Schedule`] plus the set of collapsed
//! phases into a [`render::Diagram`]: row labels, header ticks, bars and
//! routed dependency arrows. The egui viewer and the SVG/CSV exporters both
//! draw from that one value.

pub mod app;
pub mod config;
pub mod error;
pub mod io;
pub mod layout;
pub mod model;
pub mod render;
pub mod ui;

pub use error::{Result, ScheduleError};
