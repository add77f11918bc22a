// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_canvas --heading-base-level=0

//! Understory Canvas: many vector shapes on one drawing surface, with DOM-like events.
//!
//! A [`Surface`] combines:
//!
//! - a [`LayerStack`](understory_shape_stack::LayerStack) holding the shapes in z-order,
//! - a [`RedrawScheduler`](understory_shape_stack::RedrawScheduler) that turns
//!   any number of mutations into one repaint per frame,
//! - a [`Router`](understory_responder::router::Router) that delivers synthetic
//!   events to hit shapes topmost first and then once to the container,
//! - hover tracking and a [`ClickDisambiguator`](understory_responder::gesture::ClickDisambiguator)
//!   so a drag of the container never also clicks the shape it started on.
//!
//! The host supplies a [`FrameHost`] to schedule repaints, a [`Painter`] to
//! draw, and raw pointer input in container coordinates.
//!
//! ## Example
//!
//! ```
//! use kurbo::Point;
//! use understory_canvas::{
//!     EventKind, FrameHost, FrameToken, Geometry, PointerInput, Shape, Surface, Target,
//! };
//!
//! #[derive(Default)]
//! struct Host(u64);
//! impl FrameHost for Host {
//!     fn request_frame(&mut self) -> FrameToken {
//!         self.0 += 1;
//!         FrameToken(self.0)
//!     }
//!     fn cancel_frame(&mut self, _token: FrameToken) {}
//! }
//!
//! let mut surface = Surface::new(Host::default());
//! let dot = surface
//!     .attach(Shape::new(Geometry::circle(Point::new(50.0, 50.0), 10.0)))
//!     .unwrap();
//!
//! surface.on(Target::Layer(dot), EventKind::Click, |ev| {
//!     ev.stop_propagation();
//!     Ok(())
//! });
//!
//! let at = PointerInput::mouse(Point::new(52.0, 48.0), 0);
//! surface.pointer_down(at);
//! let report = surface.pointer_up(at);
//! assert_eq!(report.targets_of(EventKind::Click), [Target::Layer(dot)]);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod surface;

pub use surface::{PointerInput, Surface, SurfaceConfig, SurfaceError};

pub use understory_responder::types::{
    DispatchReport, EventKind, HandlerError, HandlerId, LayerRequest, Phase, PointerEvent,
    PointerKind, Target,
};
pub use understory_shape_stack::{
    FrameHost, FrameToken, Geometry, HitConfig, LayerFlags, LayerId, Painter, Shape, ShapeLayer,
    ShapeStyle,
};
