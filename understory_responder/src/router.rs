// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Overview
//!
//! Builds the target chain for one physical event, then walks it invoking
//! registered handlers.
//!
//! ## Chain
//!
//! - Input is a snapshot of hit layers, topmost first, taken before any
//!   handler runs, so handlers that queue layer changes never alter the
//!   current chain.
//! - Every hit layer is a [`Phase::Target`] step, in input order.
//! - The container follows once as a [`Phase::Bubble`] step, no matter how
//!   many layers were hit.
//! - With no hit, the container alone is the [`Phase::Target`], exactly like
//!   a native event that missed every shape.
//!
//! ## Delivery
//!
//! - A click walks the chain twice: first with [`EventKind::PreClick`], then
//!   with [`EventKind::Click`]. Every target sees the pre-click before any
//!   target sees the click.
//! - Handlers of one target run in registration order.
//! - [`PointerEvent::stop_propagation`] ends the current pass after the
//!   current target; its remaining handlers still run. A stop during the
//!   pre-click pass does not cancel the click pass.
//! - A handler returning an error is logged and recorded; delivery continues.
//!
//! ## See Also
//!
//! [`hover`](crate::hover) for over/out transitions and
//! [`gesture`](crate::gesture) for deciding when a click is synthesized.

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::types::{
    Delivery, Dispatch, DispatchReport, EventKind, HandlerError, HandlerFailure, HandlerId, Phase,
    PointerEvent, PointerSample, Target,
};

/// Boxed event handler.
pub type Handler<K> = Box<dyn FnMut(&mut PointerEvent<K>) -> Result<(), HandlerError>>;

struct Entry<K> {
    id: HandlerId,
    target: Target<K>,
    kind: EventKind,
    once: bool,
    handler: Handler<K>,
}

/// Pointer event router with a handler table.
///
/// ## Usage
///
/// - Register handlers with [`Router::on`] / [`Router::once`] for a
///   [`Target`] and an [`EventKind`]; remove them with [`Router::off`].
/// - For every physical event, take a hit snapshot (topmost first) and call
///   [`Router::dispatch`].
/// - Inspect the returned [`DispatchReport`] for deliveries, failures, and
///   deferred layer requests.
pub struct Router<K> {
    entries: Vec<Entry<K>>,
    next_id: u64,
}

impl<K> core::fmt::Debug for Router<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Router")
            .field("handlers", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl<K> Default for Router<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }
}

impl<K: Copy + Eq + core::fmt::Debug> Router<K> {
    /// Create a router without handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kind` events at `target`.
    pub fn on(
        &mut self,
        target: Target<K>,
        kind: EventKind,
        handler: impl FnMut(&mut PointerEvent<K>) -> Result<(), HandlerError> + 'static,
    ) -> HandlerId {
        self.register(target, kind, false, Box::new(handler))
    }

    /// Register `handler` for the next `kind` event at `target` only.
    pub fn once(
        &mut self,
        target: Target<K>,
        kind: EventKind,
        handler: impl FnMut(&mut PointerEvent<K>) -> Result<(), HandlerError> + 'static,
    ) -> HandlerId {
        self.register(target, kind, true, Box::new(handler))
    }

    /// Remove a handler. Returns false if it was not registered.
    pub fn off(&mut self, id: HandlerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Remove every handler of `target`. Returns how many were removed.
    pub fn off_target(&mut self, target: Target<K>) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.target != target);
        before - self.entries.len()
    }

    /// Remove every handler.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// True if some handler listens for `kind` at `target`.
    pub fn listens(&self, target: Target<K>, kind: EventKind) -> bool {
        self.entries
            .iter()
            .any(|e| e.target == target && e.kind == kind)
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the target chain for a hit snapshot (topmost first).
    pub fn chain(hits: &[K]) -> Vec<Dispatch<K>> {
        if hits.is_empty() {
            return alloc::vec![Dispatch {
                phase: Phase::Target,
                target: Target::Container,
            }];
        }
        let mut out = Vec::with_capacity(hits.len() + 1);
        for &k in hits {
            out.push(Dispatch {
                phase: Phase::Target,
                target: Target::Layer(k),
            });
        }
        out.push(Dispatch {
            phase: Phase::Bubble,
            target: Target::Container,
        });
        out
    }

    /// Dispatch one physical event of `kind` over the chain built from `hits`.
    pub fn dispatch(
        &mut self,
        kind: EventKind,
        hits: &[K],
        sample: PointerSample,
    ) -> DispatchReport<K> {
        self.dispatch_chain(kind, &Self::chain(hits), sample)
    }

    /// Dispatch over an explicit chain.
    pub fn dispatch_chain(
        &mut self,
        kind: EventKind,
        chain: &[Dispatch<K>],
        sample: PointerSample,
    ) -> DispatchReport<K> {
        let mut report = DispatchReport::default();
        for &pass in kind.sequence() {
            for &step in chain {
                let mut ev = PointerEvent::new(pass, step, sample);
                self.deliver(&mut ev, &mut report);
                report.default_prevented |= ev.default_prevented();
                report.requests.extend(ev.take_requests());
                if ev.propagation_stopped() {
                    tracing::trace!(%pass, target = ?step.target, "propagation stopped");
                    report.stopped = true;
                    break;
                }
            }
        }
        report
    }

    fn register(
        &mut self,
        target: Target<K>,
        kind: EventKind,
        once: bool,
        handler: Handler<K>,
    ) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            target,
            kind,
            once,
            handler,
        });
        id
    }

    fn deliver(&mut self, ev: &mut PointerEvent<K>, report: &mut DispatchReport<K>) {
        let (target, kind) = (ev.target, ev.kind);
        let mut handlers = 0;
        let mut spent: Vec<HandlerId> = Vec::new();
        for entry in self
            .entries
            .iter_mut()
            .filter(|e| e.target == target && e.kind == kind)
        {
            handlers += 1;
            if entry.once {
                spent.push(entry.id);
            }
            if let Err(error) = (entry.handler)(ev) {
                tracing::warn!(
                    %kind,
                    ?target,
                    %error,
                    "event handler failed; continuing dispatch"
                );
                report.failures.push(HandlerFailure {
                    handler: entry.id,
                    kind,
                    target,
                    error,
                });
            }
        }
        if !spent.is_empty() {
            self.entries.retain(|e| !spent.contains(&e.id));
        }
        tracing::trace!(%kind, ?target, handlers, "delivered");
        report.deliveries.push(Delivery {
            kind,
            target,
            phase: ev.phase,
            handlers,
        });
    }
}
