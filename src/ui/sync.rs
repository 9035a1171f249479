//! Keeps the three scroll regions locked together and turns window
//! resizes into debounced re-renders.
//!
//! Both types are plain state machines fed with what the frame observed,
//! so they can be driven without a window.

use std::time::{Duration, Instant};

/// Offsets below this are treated as unchanged.
const EPSILON: f32 = 0.5;

/// Offsets to apply to the scroll regions on the next frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollTargets {
    pub rows_y: Option<f32>,
    pub body_y: Option<f32>,
    pub header_x: Option<f32>,
}

impl ScrollTargets {
    pub fn is_empty(&self) -> bool {
        self.rows_y.is_none() && self.body_y.is_none() && self.header_x.is_none()
    }
}

/// A mirrored offset handed to one region, which that region reports back
/// on the next frame.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Echo {
    Rows(f32),
    Body(f32),
}

/// Mirrors vertical scroll between the row panel and the timeline body, and
/// horizontal body scroll onto the header.
#[derive(Debug, Clone, Default)]
pub struct ScrollSync {
    rows_y: f32,
    body_x: f32,
    body_y: f32,
    /// The offset last mirrored onto a region. On the following frame that
    /// region is compared against it instead of its previous report, so the
    /// echo is not mirrored back while the other region still is.
    echo: Option<Echo>,
}

impl ScrollSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the offsets the regions reported this frame.
    pub fn observe(&mut self, rows_y: f32, body_x: f32, body_y: f32) -> ScrollTargets {
        let mut targets = ScrollTargets::default();

        if (body_x - self.body_x).abs() > EPSILON {
            targets.header_x = Some(body_x);
        }
        self.body_x = body_x;

        let (rows_base, body_base) = match self.echo.take() {
            Some(Echo::Rows(applied)) => (applied, self.body_y),
            Some(Echo::Body(applied)) => (self.rows_y, applied),
            None => (self.rows_y, self.body_y),
        };
        let rows_moved = (rows_y - rows_base).abs() > EPSILON;
        let body_moved = (body_y - body_base).abs() > EPSILON;

        if body_moved {
            targets.rows_y = Some(body_y);
            self.echo = Some(Echo::Rows(body_y));
            self.rows_y = body_y;
            self.body_y = body_y;
        } else if rows_moved {
            // Also covers a mirrored offset the rows clamped: the body follows.
            targets.body_y = Some(rows_y);
            self.echo = Some(Echo::Body(rows_y));
            self.rows_y = rows_y;
            self.body_y = rows_y;
        } else {
            self.rows_y = rows_y;
            self.body_y = body_y;
        }
        targets
    }

    /// Forget all offsets, e.g. after loading a new schedule.
    pub fn reset(&mut self) -> ScrollTargets {
        *self = Self::default();
        ScrollTargets {
            rows_y: Some(0.0),
            body_y: Some(0.0),
            header_x: Some(0.0),
        }
    }
}

/// Delays re-layout until the body width has stopped changing.
#[derive(Debug, Clone)]
pub struct ResizeDebouncer {
    delay: Duration,
    committed: Option<f32>,
    pending: Option<(f32, Instant)>,
}

impl ResizeDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            committed: None,
            pending: None,
        }
    }

    /// The width the current diagram was rendered at.
    pub fn committed(&self) -> Option<f32> {
        self.committed
    }

    /// Record a width that was just rendered without waiting.
    pub fn commit(&mut self, width: f32) {
        self.committed = Some(width);
        self.pending = None;
    }

    /// Record the width seen this frame. Returns how long until a pending
    /// change settles, so the caller can schedule a repaint.
    pub fn observe(&mut self, width: f32, now: Instant) -> Option<Duration> {
        let committed = self.committed?;
        if (width - committed).abs() < EPSILON {
            self.pending = None;
            return None;
        }
        match self.pending {
            Some((w, since)) if (w - width).abs() < EPSILON => {
                Some(self.delay.saturating_sub(now.saturating_duration_since(since)))
            }
            _ => {
                self.pending = Some((width, now));
                Some(self.delay)
            }
        }
    }

    /// The new width once it has been stable for the full delay.
    pub fn poll(&mut self, now: Instant) -> Option<f32> {
        let (width, since) = self.pending?;
        if now.saturating_duration_since(since) >= self.delay {
            self.commit(width);
            Some(width)
        } else {
            None
        }
    }
}
