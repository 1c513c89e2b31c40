// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag input for the sheet header.
//!
//! Platforms with a pan recognizer already deliver translation and velocity;
//! they can build [`DragSample`]s directly and feed them to
//! [`SheetController::handle_drag`](crate::SheetController::handle_drag).
//! Hosts that only see raw pointer events can use [`DragTracker`] to derive
//! the same samples.
//!
//! ## Usage
//!
//! 1) On pointer down over the header, call [`DragTracker::start`] and
//!    forward [`DragPhase::Began`].
//! 2) On each move, call [`DragTracker::update`] and forward the sample with
//!    [`DragPhase::Changed`].
//! 3) On pointer up, call [`DragTracker::end`] and forward [`DragPhase::Ended`].
//!
//! ```
//! use core::time::Duration;
//! use kurbo::Point;
//! use understory_sheet::DragTracker;
//!
//! let mut drag = DragTracker::default();
//! drag.start(Point::new(100.0, 500.0), Duration::from_millis(0));
//!
//! // Finger moves up 20px in 10ms.
//! let sample = drag
//!     .update(Point::new(100.0, 480.0), Duration::from_millis(10))
//!     .unwrap();
//! assert_eq!(sample.translation.y, -20.0);
//! assert_eq!(sample.velocity.y, -2000.0);
//! ```

use core::time::Duration;

use kurbo::{Point, Vec2};

/// Phase of a drag gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragPhase {
    /// The pointer went down on the header.
    Began,
    /// The pointer moved.
    Changed,
    /// The pointer was released.
    Ended,
    /// The platform cancelled the gesture.
    Cancelled,
}

/// Gesture data for one drag event.
///
/// Both vectors use screen orientation: positive `y` points down, so
/// dragging the header upwards produces negative `y` values.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct DragSample {
    /// Offset from where the drag started.
    pub translation: Vec2,
    /// Instantaneous velocity in units per second.
    pub velocity: Vec2,
}

impl DragSample {
    /// Creates a sample from a translation and a velocity.
    #[must_use]
    pub const fn new(translation: Vec2, velocity: Vec2) -> Self {
        Self {
            translation,
            velocity,
        }
    }
}

/// Derives [`DragSample`]s from pointer positions and timestamps.
///
/// Timestamps are whatever monotonic clock the host uses, expressed as a
/// [`Duration`] since an arbitrary origin.
#[derive(Clone, Copy, Debug, Default)]
pub struct DragTracker {
    start_pos: Option<Point>,
    last_pos: Option<Point>,
    last_time: Duration,
    velocity: Vec2,
}

impl DragTracker {
    /// Starts tracking a new drag from `pos`, discarding any previous one.
    pub fn start(&mut self, pos: Point, time: Duration) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
        self.last_time = time;
        self.velocity = Vec2::ZERO;
    }

    /// Records a new pointer position and returns the resulting sample.
    ///
    /// Returns `None` when no drag is active. If no time has passed since the
    /// previous position, the previous velocity is kept.
    pub fn update(&mut self, pos: Point, time: Duration) -> Option<DragSample> {
        let start = self.start_pos?;
        let last = self.last_pos.unwrap_or(pos);
        let dt = time.saturating_sub(self.last_time).as_secs_f64();
        if dt > 0.0 {
            self.velocity = (pos - last) / dt;
        }
        self.last_pos = Some(pos);
        self.last_time = time;
        Some(DragSample::new(pos - start, self.velocity))
    }

    /// Ends the drag and returns the last sample, if a drag was active.
    pub fn end(&mut self) -> Option<DragSample> {
        let sample = match (self.start_pos, self.last_pos) {
            (Some(start), Some(last)) => Some(DragSample::new(last - start, self.velocity)),
            _ => None,
        };
        *self = Self::default();
        sample
    }

    /// Returns `true` while a drag is being tracked.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }
}
