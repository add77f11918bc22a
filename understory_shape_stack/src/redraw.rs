// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coalesced repaint of the shared surface.
//!
//! ## Protocol
//!
//! 1) Mutations call [`RedrawScheduler::mark_dirty`] as often as they like.
//!    The first call in a turn asks the host for a frame; later calls while a
//!    frame is pending do nothing.
//! 2) When the host fires the frame it calls [`RedrawScheduler::run_frame`]
//!    with the token it handed out. The scheduler clears the surface and draws
//!    every visible layer bottom to top, exactly once.
//! 3) [`RedrawScheduler::dispose`] cancels a pending frame; the scheduler stays
//!    inert afterwards.
//!
//! ```
//! use understory_shape_stack::{FrameHost, FrameToken, LayerStack, Painter, RedrawScheduler, ShapeLayer};
//!
//! #[derive(Default)]
//! struct Host { next: u64, requested: u32 }
//! impl FrameHost for Host {
//!     fn request_frame(&mut self) -> FrameToken {
//!         self.next += 1;
//!         self.requested += 1;
//!         FrameToken(self.next)
//!     }
//!     fn cancel_frame(&mut self, _token: FrameToken) {}
//! }
//!
//! struct Count(u32);
//! impl Painter for Count {
//!     fn clear(&mut self) {}
//!     fn draw_layer(&mut self, _layer: &ShapeLayer) { self.0 += 1; }
//! }
//!
//! let mut scheduler = RedrawScheduler::new(Host::default());
//! scheduler.mark_dirty();
//! scheduler.mark_dirty();
//! assert_eq!(scheduler.host().requested, 1);
//!
//! let token = scheduler.pending().unwrap();
//! let mut painter = Count(0);
//! assert!(scheduler.run_frame(token, &LayerStack::new(), &mut painter));
//! assert!(!scheduler.run_frame(token, &LayerStack::new(), &mut painter));
//! ```

use crate::stack::LayerStack;
use crate::types::ShapeLayer;

/// Handle for one requested frame.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct FrameToken(pub u64);

/// The host environment's next-frame facility.
///
/// In a browser this wraps `requestAnimationFrame`; in a native loop it can
/// be a flag checked once per iteration.
pub trait FrameHost {
    /// Schedule a callback for the next frame and return its token.
    fn request_frame(&mut self) -> FrameToken;
    /// Cancel a previously requested frame.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Draws layers onto the shared surface.
pub trait Painter {
    /// Clear the whole surface.
    fn clear(&mut self);
    /// Draw one layer. Called bottom to top.
    fn draw_layer(&mut self, layer: &ShapeLayer);
}

/// Coalesces dirty marks into at most one pending frame.
pub struct RedrawScheduler<H: FrameHost> {
    host: H,
    pending: Option<FrameToken>,
    disposed: bool,
    frames: u64,
}

impl<H: FrameHost> core::fmt::Debug for RedrawScheduler<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RedrawScheduler")
            .field("pending", &self.pending)
            .field("disposed", &self.disposed)
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl<H: FrameHost> RedrawScheduler<H> {
    /// Create an idle scheduler driving `host`.
    pub fn new(host: H) -> Self {
        Self {
            host,
            pending: None,
            disposed: false,
            frames: 0,
        }
    }

    /// Request a repaint. Returns true if this call scheduled a new frame.
    pub fn mark_dirty(&mut self) -> bool {
        if self.disposed || self.pending.is_some() {
            return false;
        }
        let token = self.host.request_frame();
        tracing::trace!(?token, "redraw scheduled");
        self.pending = Some(token);
        true
    }

    /// Token of the pending frame, if any.
    pub fn pending(&self) -> Option<FrameToken> {
        self.pending
    }

    /// Number of frames painted so far.
    pub fn frames_painted(&self) -> u64 {
        self.frames
    }

    /// True once [`Self::dispose`] has run.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Paint the surface for `token`.
    ///
    /// Returns false without painting if `token` is not the pending frame
    /// (already painted, cancelled, or unknown).
    pub fn run_frame(
        &mut self,
        token: FrameToken,
        stack: &LayerStack,
        painter: &mut impl Painter,
    ) -> bool {
        if self.pending != Some(token) {
            return false;
        }
        self.pending = None;
        painter.clear();
        for layer in stack.iter().filter(|l| l.is_visible()) {
            painter.draw_layer(layer);
        }
        self.frames += 1;
        true
    }

    /// Cancel any pending frame and stop scheduling.
    pub fn dispose(&mut self) {
        if let Some(token) = self.pending.take() {
            self.host.cancel_frame(token);
        }
        self.disposed = true;
    }

    /// The host driving this scheduler.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Geometry, LayerFlags, LayerId, Shape};
    use alloc::vec::Vec;
    use kurbo::Point;

    #[derive(Default)]
    struct Host {
        next: u64,
        requested: Vec<FrameToken>,
        cancelled: Vec<FrameToken>,
    }

    impl FrameHost for Host {
        fn request_frame(&mut self) -> FrameToken {
            self.next += 1;
            let t = FrameToken(self.next);
            self.requested.push(t);
            t
        }
        fn cancel_frame(&mut self, token: FrameToken) {
            self.cancelled.push(token);
        }
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Option<LayerId>>,
    }

    impl Painter for Recorder {
        fn clear(&mut self) {
            self.ops.push(None);
        }
        fn draw_layer(&mut self, layer: &ShapeLayer) {
            self.ops.push(Some(layer.id()));
        }
    }

    fn stack_of(n: u64) -> LayerStack {
        let mut stack = LayerStack::new();
        for i in 1..=n {
            stack
                .add(ShapeLayer::new(
                    LayerId(i),
                    Shape::new(Geometry::circle(Point::new(0.0, 0.0), 1.0)),
                ))
                .unwrap();
        }
        stack
    }

    #[test]
    fn repeated_marks_request_one_frame() {
        let mut s = RedrawScheduler::new(Host::default());
        assert!(s.mark_dirty());
        for _ in 0..10 {
            assert!(!s.mark_dirty());
        }
        assert_eq!(s.host().requested.len(), 1);
    }

    #[test]
    fn frame_clears_then_draws_bottom_to_top() {
        let mut stack = stack_of(3);
        stack.raise_to_top(LayerId(1));
        let mut s = RedrawScheduler::new(Host::default());
        s.mark_dirty();
        let mut rec = Recorder::default();
        assert!(s.run_frame(s.pending().unwrap(), &stack, &mut rec));
        assert_eq!(
            rec.ops,
            [None, Some(LayerId(2)), Some(LayerId(3)), Some(LayerId(1))]
        );
        assert_eq!(s.frames_painted(), 1);
    }

    #[test]
    fn hidden_layers_are_not_drawn() {
        let mut stack = stack_of(2);
        stack.set_flags(LayerId(1), LayerFlags::empty());
        let mut s = RedrawScheduler::new(Host::default());
        s.mark_dirty();
        let mut rec = Recorder::default();
        s.run_frame(s.pending().unwrap(), &stack, &mut rec);
        assert_eq!(rec.ops, [None, Some(LayerId(2))]);
    }

    #[test]
    fn stale_token_does_not_paint() {
        let stack = stack_of(1);
        let mut s = RedrawScheduler::new(Host::default());
        s.mark_dirty();
        let token = s.pending().unwrap();
        let mut rec = Recorder::default();
        assert!(s.run_frame(token, &stack, &mut rec));
        assert!(!s.run_frame(token, &stack, &mut rec));
        assert!(!s.run_frame(FrameToken(999), &stack, &mut rec));
        assert_eq!(s.frames_painted(), 1);
    }

    #[test]
    fn marking_after_paint_schedules_next_frame() {
        let stack = stack_of(1);
        let mut s = RedrawScheduler::new(Host::default());
        s.mark_dirty();
        let mut rec = Recorder::default();
        s.run_frame(s.pending().unwrap(), &stack, &mut rec);
        assert!(s.mark_dirty());
        assert_eq!(s.host().requested.len(), 2);
    }

    #[test]
    fn dispose_cancels_pending_frame() {
        let stack = stack_of(1);
        let mut s = RedrawScheduler::new(Host::default());
        s.mark_dirty();
        let token = s.pending().unwrap();
        s.dispose();
        assert_eq!(s.host().cancelled, [token]);
        assert!(s.pending().is_none());
        assert!(!s.mark_dirty());
        let mut rec = Recorder::default();
        assert!(!s.run_frame(token, &stack, &mut rec));
        assert!(rec.ops.is_empty());
    }
}
