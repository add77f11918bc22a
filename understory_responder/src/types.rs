// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for the responder: event kinds, targets, phases, events, and reports.
//!
//! ## Overview
//!
//! These types describe the routing protocol and its inputs/outputs.
//! They are produced by the [`router`](crate::router) and consumed by handlers
//! and by the surface that owns the router.

use alloc::string::String;
use alloc::vec::Vec;
use kurbo::Point;

/// Kinds of synthetic pointer events.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventKind {
    /// Sent to every target before any target receives [`Click`](Self::Click).
    PreClick,
    /// Press and release without a drag in between.
    Click,
    /// Double click, forwarded from the host.
    DblClick,
    /// Button or contact pressed.
    MouseDown,
    /// Button or contact released.
    MouseUp,
    /// Pointer moved.
    MouseMove,
    /// Pointer entered a layer.
    MouseOver,
    /// Pointer left a layer.
    MouseOut,
}

impl EventKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::PreClick,
        Self::Click,
        Self::DblClick,
        Self::MouseDown,
        Self::MouseUp,
        Self::MouseMove,
        Self::MouseOver,
        Self::MouseOut,
    ];

    /// DOM-style event name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::PreClick => "preclick",
            Self::Click => "click",
            Self::DblClick => "dblclick",
            Self::MouseDown => "mousedown",
            Self::MouseUp => "mouseup",
            Self::MouseMove => "mousemove",
            Self::MouseOver => "mouseover",
            Self::MouseOut => "mouseout",
        }
    }

    /// Passes over the chain for a physical event of this kind, in order.
    ///
    /// A click is preceded by a full pre-click pass.
    pub const fn sequence(self) -> &'static [Self] {
        match self {
            Self::Click => &[Self::PreClick, Self::Click],
            Self::PreClick => &[Self::PreClick],
            Self::DblClick => &[Self::DblClick],
            Self::MouseDown => &[Self::MouseDown],
            Self::MouseUp => &[Self::MouseUp],
            Self::MouseMove => &[Self::MouseMove],
            Self::MouseOver => &[Self::MouseOver],
            Self::MouseOut => &[Self::MouseOut],
        }
    }
}

impl core::fmt::Display for EventKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// A logical event target.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Target<K> {
    /// A shape layer on the shared surface.
    Layer(K),
    /// The container hosting the surface (for example, the map).
    Container,
}

impl<K: Copy> Target<K> {
    /// The layer key, if this targets a layer.
    pub fn layer(&self) -> Option<K> {
        match self {
            Self::Layer(k) => Some(*k),
            Self::Container => None,
        }
    }
}

/// Phases of event propagation.
///
/// Appears on each [`Dispatch`] produced by
/// [`Router::chain`](crate::router::Router::chain).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// The event is at a target that was hit directly: a layer, or the
    /// container when no layer was hit.
    Target,
    /// The event reached the container after visiting hit layers.
    Bubble,
}

/// One step of a dispatch chain.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Dispatch<K> {
    /// Propagation phase for this step.
    pub phase: Phase,
    /// Target notified at this step.
    pub target: Target<K>,
}

/// The kind of device behind a pointer.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum PointerKind {
    /// Mouse or trackpad.
    #[default]
    Mouse,
    /// Finger on a touch screen.
    Touch,
    /// Stylus.
    Pen,
}

/// Raw input data shared by every event synthesized from one physical event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerSample {
    /// Position in surface pixels.
    pub point: Point,
    /// Position relative to the container, as received from the host.
    pub container_point: Point,
    /// Device kind.
    pub pointer: PointerKind,
    /// Host timestamp in milliseconds.
    pub timestamp: u64,
}

/// Deferred change requested by a handler.
///
/// Handlers run while the surface is borrowed for dispatch, so they queue
/// changes instead of applying them. The owner applies them after every
/// target of the physical event has been notified.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LayerRequest<K> {
    /// Detach the layer.
    Detach(K),
    /// Raise the layer to the top.
    RaiseToTop(K),
    /// Lower the layer to the bottom.
    LowerToBottom(K),
    /// Toggle hit testing for the layer.
    SetInteractive(K, bool),
}

/// Error returned by a failing handler.
///
/// A failure is logged and recorded in the [`DispatchReport`]; it never stops
/// other handlers or targets from being notified.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("event handler failed: {message}")]
pub struct HandlerError {
    message: String,
}

impl HandlerError {
    /// Create an error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Identifier of a registered handler.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct HandlerId(pub(crate) u64);

/// The event value passed to handlers.
#[derive(Clone, Debug)]
pub struct PointerEvent<K> {
    /// Event kind being delivered.
    pub kind: EventKind,
    /// Target currently being notified.
    pub target: Target<K>,
    /// Propagation phase at this target.
    pub phase: Phase,
    /// Input data of the physical event.
    pub sample: PointerSample,
    stopped: bool,
    default_prevented: bool,
    requests: Vec<LayerRequest<K>>,
}

impl<K> PointerEvent<K> {
    pub(crate) fn new(kind: EventKind, step: Dispatch<K>, sample: PointerSample) -> Self {
        Self {
            kind,
            target: step.target,
            phase: step.phase,
            sample,
            stopped: false,
            default_prevented: false,
            requests: Vec::new(),
        }
    }

    /// Position in surface pixels.
    pub fn point(&self) -> Point {
        self.sample.point
    }

    /// Stop propagation after the current target.
    ///
    /// Remaining handlers of the current target still run; later layers and
    /// the container are not notified.
    pub fn stop_propagation(&mut self) {
        self.stopped = true;
    }

    /// True if a handler stopped propagation.
    pub fn propagation_stopped(&self) -> bool {
        self.stopped
    }

    /// Mark the event consumed so the host skips its default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// True if a handler prevented the default action.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Queue a layer change to apply once dispatch has finished.
    pub fn request(&mut self, request: LayerRequest<K>) {
        self.requests.push(request);
    }

    pub(crate) fn take_requests(&mut self) -> Vec<LayerRequest<K>> {
        core::mem::take(&mut self.requests)
    }
}

/// One notification of one target.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Delivery<K> {
    /// Kind delivered.
    pub kind: EventKind,
    /// Target notified.
    pub target: Target<K>,
    /// Phase at the target.
    pub phase: Phase,
    /// Number of handlers that ran.
    pub handlers: usize,
}

/// A handler failure recorded during dispatch.
#[derive(Clone, Debug, PartialEq)]
pub struct HandlerFailure<K> {
    /// The failing handler.
    pub handler: HandlerId,
    /// Kind being delivered.
    pub kind: EventKind,
    /// Target being notified.
    pub target: Target<K>,
    /// The reported error.
    pub error: HandlerError,
}

/// Everything that happened while dispatching one or more events.
#[derive(Clone, Debug, PartialEq)]
pub struct DispatchReport<K> {
    /// Notifications in delivery order.
    pub deliveries: Vec<Delivery<K>>,
    /// True if some handler stopped propagation.
    pub stopped: bool,
    /// True if some handler prevented the default action.
    pub default_prevented: bool,
    /// Handler failures, in the order they happened.
    pub failures: Vec<HandlerFailure<K>>,
    /// Layer changes queued by handlers.
    pub requests: Vec<LayerRequest<K>>,
}

impl<K> Default for DispatchReport<K> {
    fn default() -> Self {
        Self {
            deliveries: Vec::new(),
            stopped: false,
            default_prevented: false,
            failures: Vec::new(),
            requests: Vec::new(),
        }
    }
}

impl<K: Copy + Eq> DispatchReport<K> {
    /// Targets that received `kind`, in order.
    pub fn targets_of(&self, kind: EventKind) -> Vec<Target<K>> {
        self.deliveries
            .iter()
            .filter(|d| d.kind == kind)
            .map(|d| d.target)
            .collect()
    }

    /// Number of times `target` received `kind`.
    pub fn count(&self, kind: EventKind, target: Target<K>) -> usize {
        self.deliveries
            .iter()
            .filter(|d| d.kind == kind && d.target == target)
            .count()
    }

    /// True if `kind` was delivered to any target.
    pub fn delivered(&self, kind: EventKind) -> bool {
        self.deliveries.iter().any(|d| d.kind == kind)
    }

    /// Append another report, as when one physical event produces several
    /// synthetic ones.
    pub fn merge(&mut self, other: Self) {
        self.deliveries.extend(other.deliveries);
        self.stopped |= other.stopped;
        self.default_prevented |= other.default_prevented;
        self.failures.extend(other.failures);
        self.requests.extend(other.requests);
    }
}
