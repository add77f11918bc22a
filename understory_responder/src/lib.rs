// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_responder --heading-base-level=0

//! Understory Responder: a deterministic, `no_std` router for pointer events on shapes.
//!
//! ## Overview
//!
//! Shapes painted onto one shared surface receive no native events of their
//! own. This crate takes the place of the host's event system for them: it
//! turns one physical pointer event plus a hit snapshot into a sequence of
//! synthetic events, delivered first to the hit shapes and then to the
//! container that owns the surface.
//! It does not perform hit testing; feed it the layers under the pointer,
//! topmost first (for example via the `shape_stack_adapter` feature).
//!
//! ## Chain
//!
//! - Each hit layer is notified in the [`Target`](crate::types::Phase::Target) phase, topmost first.
//! - The container is then notified once in the [`Bubble`](crate::types::Phase::Bubble) phase,
//!   however many layers were hit.
//! - With no hits, the container alone is the target.
//! - A handler calling [`stop_propagation`](crate::types::PointerEvent::stop_propagation)
//!   keeps every later target, the container included, from being notified.
//! - A click walks the chain twice: a pre-click pass, then the click pass.
//!
//! ## Workflow
//!
//! 1) Register handlers on a [`Router`](crate::router::Router) per [`Target`](crate::types::Target)
//!    and [`EventKind`](crate::types::EventKind).
//! 2) Run raw presses, moves, and releases through a
//!    [`ClickDisambiguator`](crate::gesture::ClickDisambiguator); only releases
//!    it approves become clicks.
//! 3) Feed the topmost hit of each move to [`HoverState`](crate::hover::HoverState)
//!    and dispatch mouse-out / mouse-over for its transitions.
//! 4) Dispatch, then apply the [`LayerRequest`](crate::types::LayerRequest)s
//!    collected in the [`DispatchReport`](crate::types::DispatchReport).
//!
//! ## Dispatcher sketch
//!
//! ```
//! use kurbo::Point;
//! use understory_responder::gesture::ClickDisambiguator;
//! use understory_responder::router::Router;
//! use understory_responder::types::{EventKind, PointerKind, PointerSample, Target};
//!
//! let mut router: Router<u32> = Router::new();
//! router.on(Target::Layer(7), EventKind::Click, |ev| {
//!     ev.stop_propagation();
//!     Ok(())
//! });
//!
//! let mut gesture = ClickDisambiguator::default();
//! let pt = Point::new(10.0, 10.0);
//! let sample = PointerSample {
//!     point: pt,
//!     container_point: pt,
//!     pointer: PointerKind::Mouse,
//!     timestamp: 0,
//! };
//!
//! gesture.press(pt, 0);
//! if gesture.release(pt, 40).is_some() {
//!     let report = router.dispatch(EventKind::Click, &[7], sample);
//!     assert_eq!(report.targets_of(EventKind::Click), [Target::Layer(7)]);
//!     assert!(report.stopped);
//! }
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod gesture;
pub mod hover;
pub mod router;
pub mod types;
