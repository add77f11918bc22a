// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag/click disambiguation for a single pointer.
//!
//! A press on a shape can start either a click on that shape or a drag of
//! the container underneath. [`ClickDisambiguator`] watches the press, the
//! moves, and the release, and only yields a [`SyntheticClick`] when the
//! pointer never strayed [`threshold`](ClickDisambiguator::threshold) pixels
//! or more from the press point.
//!
//! ```text
//!   Idle ──press──► Pressed ──move, |Δ| < t──► Pressed
//!                      │  └───move, |Δ| ≥ t──► Dragging
//!                      └─release─► Idle + click       Dragging ──release──► Idle
//!   (press while Pressed or Dragging starts a fresh Pressed)
//! ```
//!
//! Use the same threshold as the container's own drag start so a shape click
//! and a container drag never both fire for one gesture.
//!
//! ```
//! use kurbo::Point;
//! use understory_responder::gesture::{ClickDisambiguator, GestureState};
//!
//! let mut g = ClickDisambiguator::new(3.0);
//! g.press(Point::new(50.0, 50.0), 0);
//! g.pointer_move(Point::new(70.0, 60.0));
//! assert_eq!(g.state(), GestureState::Dragging);
//! assert!(g.release(Point::new(70.0, 60.0), 200).is_none());
//!
//! g.press(Point::new(50.0, 50.0), 300);
//! assert!(g.release(Point::new(50.0, 50.0), 350).is_some());
//! ```

use kurbo::Point;

/// Observable state of the disambiguator.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GestureState {
    /// No button or contact is down.
    Idle,
    /// Down, and still within the threshold of the press point.
    Pressed,
    /// Down, and moved at least the threshold away: the gesture is a drag.
    Dragging,
}

/// The live press.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PendingInteraction {
    /// Press position in container pixels.
    pub origin: Point,
    /// Press timestamp in host milliseconds.
    pub pressed_at: u64,
    /// True once the pointer moved at least the threshold away from `origin`.
    pub dragged: bool,
}

/// A click to feed into the router.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SyntheticClick {
    /// Release position in container pixels.
    pub point: Point,
    /// Press timestamp in host milliseconds.
    pub pressed_at: u64,
    /// Release timestamp in host milliseconds.
    pub released_at: u64,
}

/// Press/move/release state machine deciding when a click is synthesized.
#[derive(Clone, Debug)]
pub struct ClickDisambiguator {
    threshold: f64,
    pending: Option<PendingInteraction>,
}

impl Default for ClickDisambiguator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}

impl ClickDisambiguator {
    /// Default drag threshold in pixels.
    pub const DEFAULT_THRESHOLD: f64 = 3.0;

    /// Create an idle disambiguator. Negative thresholds are treated as zero.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.max(0.0),
            pending: None,
        }
    }

    /// Drag threshold in pixels.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Current state.
    pub fn state(&self) -> GestureState {
        match self.pending {
            None => GestureState::Idle,
            Some(p) if p.dragged => GestureState::Dragging,
            Some(_) => GestureState::Pressed,
        }
    }

    /// The live press, if any.
    pub fn pending(&self) -> Option<&PendingInteraction> {
        self.pending.as_ref()
    }

    /// True while the current gesture is a drag.
    pub fn is_dragging(&self) -> bool {
        self.state() == GestureState::Dragging
    }

    /// Record a press. Any previous interaction is discarded.
    pub fn press(&mut self, pt: Point, timestamp: u64) {
        self.pending = Some(PendingInteraction {
            origin: pt,
            pressed_at: timestamp,
            dragged: false,
        });
    }

    /// Record a move. Returns true if this move turned the press into a drag.
    pub fn pointer_move(&mut self, pt: Point) -> bool {
        let Some(p) = self.pending.as_mut() else {
            return false;
        };
        if p.dragged {
            return false;
        }
        if (pt - p.origin).hypot2() >= self.threshold * self.threshold {
            p.dragged = true;
            tracing::debug!(origin = ?p.origin, to = ?pt, "press became a drag");
            return true;
        }
        false
    }

    /// Record a release. Returns the click to synthesize, if any.
    ///
    /// The release point itself also counts as a move, so a release far from
    /// the press without intermediate moves is still a drag.
    pub fn release(&mut self, pt: Point, timestamp: u64) -> Option<SyntheticClick> {
        self.pointer_move(pt);
        let p = self.pending.take()?;
        (!p.dragged).then_some(SyntheticClick {
            point: pt,
            pressed_at: p.pressed_at,
            released_at: timestamp,
        })
    }

    /// Abandon the current interaction without synthesizing anything.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
