// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared surface: one drawing target, many shape layers.

use alloc::vec::Vec;

use kurbo::{Affine, Point};
use understory_responder::adapters::shape_stack::hits_for_point;
use understory_responder::gesture::ClickDisambiguator;
use understory_responder::hover::{HoverEvent, HoverState};
use understory_responder::router::Router;
use understory_responder::types::{
    DispatchReport, EventKind, HandlerError, HandlerId, LayerRequest, PointerEvent, PointerKind,
    PointerSample, Target,
};
use understory_shape_stack::{
    DuplicateLayerError, FrameHost, FrameToken, HitConfig, LayerFlags, LayerId, LayerStack,
    Painter, RedrawScheduler, Shape, ShapeLayer,
};

/// Tunables for a [`Surface`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SurfaceConfig {
    /// Hit slop for mouse/pen and touch pointers.
    pub hit: HitConfig,
    /// Distance in container pixels at which a press turns into a drag.
    ///
    /// Should match the container's own drag-start distance.
    pub drag_threshold: f64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            hit: HitConfig::default(),
            drag_threshold: ClickDisambiguator::DEFAULT_THRESHOLD,
        }
    }
}

/// Errors returned by [`Surface`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// A layer with the same id is already attached.
    #[error(transparent)]
    Duplicate(#[from] DuplicateLayerError),
    /// The surface has been disposed.
    #[error("surface has been disposed")]
    Disposed,
}

/// One raw pointer event as received by the container.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerInput {
    /// Position relative to the container.
    pub position: Point,
    /// Device kind; touch gets a larger hit slop.
    pub pointer: PointerKind,
    /// Host timestamp in milliseconds.
    pub timestamp: u64,
}

impl PointerInput {
    /// A mouse event.
    pub fn mouse(position: Point, timestamp: u64) -> Self {
        Self {
            position,
            pointer: PointerKind::Mouse,
            timestamp,
        }
    }

    /// A touch event.
    pub fn touch(position: Point, timestamp: u64) -> Self {
        Self {
            position,
            pointer: PointerKind::Touch,
            timestamp,
        }
    }
}

/// A drawing surface shared by many shape layers.
///
/// Owns the layer stack, the redraw scheduler, and the event machinery, and
/// exposes them through a small DOM-like API. All methods run synchronously;
/// the only deferred work is the repaint requested from the [`FrameHost`].
///
/// After [`Surface::dispose`], attaching fails with
/// [`SurfaceError::Disposed`] and every other operation does nothing.
pub struct Surface<H: FrameHost> {
    stack: LayerStack,
    redraw: RedrawScheduler<H>,
    router: Router<LayerId>,
    hover: HoverState<LayerId>,
    gesture: ClickDisambiguator,
    config: SurfaceConfig,
    transform: Affine,
    next_id: u64,
    disposed: bool,
}

impl<H: FrameHost> core::fmt::Debug for Surface<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Surface")
            .field("stack", &self.stack)
            .field("redraw", &self.redraw)
            .field("router", &self.router)
            .field("hover", &self.hover)
            .field("gesture", &self.gesture)
            .field("config", &self.config)
            .field("transform", &self.transform)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

impl<H: FrameHost> Surface<H> {
    /// Create an empty surface with the default configuration.
    pub fn new(host: H) -> Self {
        Self::with_config(host, SurfaceConfig::default())
    }

    /// Create an empty surface.
    pub fn with_config(host: H, config: SurfaceConfig) -> Self {
        Self {
            stack: LayerStack::new(),
            redraw: RedrawScheduler::new(host),
            router: Router::new(),
            hover: HoverState::new(),
            gesture: ClickDisambiguator::new(config.drag_threshold),
            config,
            transform: Affine::IDENTITY,
            next_id: 1,
            disposed: false,
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// The layer stack, bottom to top.
    pub fn stack(&self) -> &LayerStack {
        &self.stack
    }

    /// The frame host.
    pub fn host(&self) -> &H {
        self.redraw.host()
    }

    /// Mutable access to the frame host.
    pub fn host_mut(&mut self) -> &mut H {
        self.redraw.host_mut()
    }

    /// Token of the repaint waiting to run, if any.
    pub fn pending_frame(&self) -> Option<FrameToken> {
        self.redraw.pending()
    }

    /// The layer under the pointer as of the last move.
    pub fn hovered(&self) -> Option<LayerId> {
        self.hover.current()
    }

    /// Container to surface transform. Identity by default.
    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Set the container to surface transform, e.g. after the surface was
    /// offset inside its container.
    pub fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    /// Attach a shape as a new topmost layer.
    pub fn attach(&mut self, shape: Shape) -> Result<LayerId, SurfaceError> {
        if self.disposed {
            return Err(SurfaceError::Disposed);
        }
        let mut id = LayerId(self.next_id);
        while self.stack.contains(id) {
            id = LayerId(id.get() + 1);
        }
        self.next_id = id.get() + 1;
        self.insert(ShapeLayer::new(id, shape))
    }

    /// Attach a prebuilt layer as the topmost layer, keeping its id.
    pub fn insert(&mut self, layer: ShapeLayer) -> Result<LayerId, SurfaceError> {
        if self.disposed {
            return Err(SurfaceError::Disposed);
        }
        let id = layer.id();
        self.stack.add(layer)?;
        self.redraw.mark_dirty();
        Ok(id)
    }

    /// Detach a layer. Returns false if it was not attached.
    ///
    /// Its handlers stay registered so it can be inserted again; use
    /// [`Surface::off_target`] to drop them.
    pub fn detach(&mut self, id: LayerId) -> bool {
        if self.stack.remove(id).is_none() {
            return false;
        }
        self.hover.forget(id);
        self.redraw.mark_dirty();
        true
    }

    /// True if `id` is attached.
    pub fn is_attached(&self, id: LayerId) -> bool {
        self.stack.contains(id)
    }

    /// Move a layer to the top. No-op if it is detached or already there.
    pub fn raise_to_top(&mut self, id: LayerId) -> bool {
        let changed = self.stack.raise_to_top(id);
        if changed {
            self.redraw.mark_dirty();
        }
        changed
    }

    /// Move a layer to the bottom. No-op if it is detached or already there.
    pub fn lower_to_bottom(&mut self, id: LayerId) -> bool {
        let changed = self.stack.lower_to_bottom(id);
        if changed {
            self.redraw.mark_dirty();
        }
        changed
    }

    /// Toggle hit testing for a layer. Returns false if it is not attached.
    ///
    /// Drawing is unaffected, so no repaint is scheduled.
    pub fn set_interactive(&mut self, id: LayerId, interactive: bool) -> bool {
        if !self.stack.set_interactive(id, interactive) {
            return false;
        }
        if !interactive {
            self.hover.forget(id);
        }
        true
    }

    /// Show or hide a layer. Hidden layers are neither drawn nor hit.
    pub fn set_visible(&mut self, id: LayerId, visible: bool) -> bool {
        let Some(mut flags) = self.stack.get(id).map(ShapeLayer::flags) else {
            return false;
        };
        flags.set(LayerFlags::VISIBLE, visible);
        self.stack.set_flags(id, flags);
        if !visible {
            self.hover.forget(id);
        }
        self.redraw.mark_dirty();
        true
    }

    /// Replace a layer's shape, e.g. after the view was re-projected.
    pub fn set_shape(&mut self, id: LayerId, shape: Shape) -> bool {
        let found = self.stack.set_shape(id, shape);
        if found {
            self.redraw.mark_dirty();
        }
        found
    }

    /// Register a handler. Returns `None` once the surface is disposed.
    pub fn on(
        &mut self,
        target: Target<LayerId>,
        kind: EventKind,
        handler: impl FnMut(&mut PointerEvent<LayerId>) -> Result<(), HandlerError> + 'static,
    ) -> Option<HandlerId> {
        (!self.disposed).then(|| self.router.on(target, kind, handler))
    }

    /// Register a handler that runs at most once.
    pub fn once(
        &mut self,
        target: Target<LayerId>,
        kind: EventKind,
        handler: impl FnMut(&mut PointerEvent<LayerId>) -> Result<(), HandlerError> + 'static,
    ) -> Option<HandlerId> {
        (!self.disposed).then(|| self.router.once(target, kind, handler))
    }

    /// Remove a handler. Returns false if it was not registered.
    pub fn off(&mut self, id: HandlerId) -> bool {
        self.router.off(id)
    }

    /// Remove every handler of `target`. Returns how many were removed.
    pub fn off_target(&mut self, target: Target<LayerId>) -> usize {
        self.router.off_target(target)
    }

    /// Feed a press.
    pub fn pointer_down(&mut self, input: PointerInput) -> DispatchReport<LayerId> {
        if self.disposed {
            return DispatchReport::default();
        }
        let sample = self.sample(input);
        self.gesture.press(input.position, input.timestamp);
        let hits = self.hits(sample);
        let report = self.router.dispatch(EventKind::MouseDown, &hits, sample);
        self.finish(report)
    }

    /// Feed a move.
    ///
    /// Updates hover first (mouse-out on the old layer, mouse-over on the new
    /// one), then dispatches the move. While the press is a drag, hover is
    /// frozen and only the container sees the move.
    pub fn pointer_move(&mut self, input: PointerInput) -> DispatchReport<LayerId> {
        if self.disposed {
            return DispatchReport::default();
        }
        let sample = self.sample(input);
        self.gesture.pointer_move(input.position);
        let mut report = DispatchReport::default();
        let hits = if self.gesture.is_dragging() {
            Vec::new()
        } else {
            let hits = self.hits(sample);
            for transition in self.hover.update(hits.first().copied()) {
                report.merge(self.dispatch_hover(transition, sample));
            }
            hits
        };
        report.merge(self.router.dispatch(EventKind::MouseMove, &hits, sample));
        self.finish(report)
    }

    /// Feed a release.
    ///
    /// Always dispatches a mouse-up. A click follows only if the press never
    /// became a drag; every target sees the pre-click before any sees the
    /// click. The drag threshold is measured in container pixels.
    pub fn pointer_up(&mut self, input: PointerInput) -> DispatchReport<LayerId> {
        if self.disposed {
            return DispatchReport::default();
        }
        let sample = self.sample(input);
        let click = self.gesture.release(input.position, input.timestamp);
        let hits = self.hits(sample);
        let mut report = self.router.dispatch(EventKind::MouseUp, &hits, sample);
        if click.is_some() {
            report.merge(self.router.dispatch(EventKind::Click, &hits, sample));
        } else {
            tracing::trace!(point = ?sample.point, "click suppressed after drag");
        }
        self.finish(report)
    }

    /// Feed a double click recognized by the host.
    pub fn double_click(&mut self, input: PointerInput) -> DispatchReport<LayerId> {
        if self.disposed {
            return DispatchReport::default();
        }
        let sample = self.sample(input);
        let hits = self.hits(sample);
        let report = self.router.dispatch(EventKind::DblClick, &hits, sample);
        self.finish(report)
    }

    /// The pointer left the container: end the hover session.
    pub fn pointer_leave(&mut self, input: PointerInput) -> DispatchReport<LayerId> {
        if self.disposed {
            return DispatchReport::default();
        }
        let sample = self.sample(input);
        let report = match self.hover.clear() {
            Some(transition) => self.dispatch_hover(transition, sample),
            None => DispatchReport::default(),
        };
        self.finish(report)
    }

    /// Paint the frame identified by `token`.
    ///
    /// Returns false for stale or cancelled tokens and after disposal.
    pub fn run_frame(&mut self, token: FrameToken, painter: &mut impl Painter) -> bool {
        if self.disposed {
            return false;
        }
        self.redraw.run_frame(token, &self.stack, painter)
    }

    /// Release the surface: cancel the pending repaint, drop every layer and
    /// handler. Calling it again does nothing.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.redraw.dispose();
        self.stack.clear();
        self.router.clear();
        self.hover = HoverState::new();
        self.gesture.cancel();
        self.disposed = true;
        tracing::debug!("surface disposed");
    }

    /// True once [`Surface::dispose`] has run.
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn sample(&self, input: PointerInput) -> PointerSample {
        PointerSample {
            point: self.transform * input.position,
            container_point: input.position,
            pointer: input.pointer,
            timestamp: input.timestamp,
        }
    }

    fn hits(&self, sample: PointerSample) -> Vec<LayerId> {
        let slop = self
            .config
            .hit
            .slop(sample.pointer == PointerKind::Touch);
        hits_for_point(&self.stack, sample.point, slop)
    }

    fn dispatch_hover(
        &mut self,
        transition: HoverEvent<LayerId>,
        sample: PointerSample,
    ) -> DispatchReport<LayerId> {
        let (kind, layer) = match transition {
            HoverEvent::Enter(layer) => (EventKind::MouseOver, layer),
            HoverEvent::Leave(layer) => (EventKind::MouseOut, layer),
        };
        self.router.dispatch(kind, &[layer], sample)
    }

    /// Apply the layer changes handlers queued while the event was dispatched.
    fn finish(&mut self, report: DispatchReport<LayerId>) -> DispatchReport<LayerId> {
        for &request in &report.requests {
            match request {
                LayerRequest::Detach(id) => {
                    self.detach(id);
                }
                LayerRequest::RaiseToTop(id) => {
                    self.raise_to_top(id);
                }
                LayerRequest::LowerToBottom(id) => {
                    self.lower_to_bottom(id);
                }
                LayerRequest::SetInteractive(id, interactive) => {
                    self.set_interactive(id, interactive);
                }
            }
        }
        report
    }
}
