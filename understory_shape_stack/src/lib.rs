// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_shape_stack --heading-base-level=0

//! Understory Shape Stack: vector shape layers sharing one drawing surface.
//!
//! Shapes painted onto a single bitmap (a `<canvas>`, a GPU texture, a
//! software framebuffer) share one host element, so the host cannot tell them
//! apart. This crate keeps the bookkeeping the host would otherwise do:
//!
//! - Represents each shape as a [`ShapeLayer`]: pixel-space [`Geometry`], the
//!   [`ShapeStyle`] bits that matter for picking, and [`LayerFlags`].
//! - Keeps layers in a [`LayerStack`] whose order is the z-order, with
//!   raise-to-top / lower-to-bottom.
//! - Answers "which layers are under this point", topmost first, using
//!   precise geometry tests from [`hit`].
//! - Coalesces mutations into a single repaint per frame with
//!   [`RedrawScheduler`].
//!
//! ## Not a projection layer
//!
//! All coordinates are surface pixels. Upstream code projects geographic or
//! document coordinates and hands the results to this crate; when the view
//! changes it updates shapes with [`LayerStack::set_shape`].
//!
//! ## Hit tolerance
//!
//! Thin lines would be impossible to click if tested exactly. Every shape is
//! tested with a tolerance of half its stroke width plus a slop taken from
//! [`HitConfig`] (larger for touch). Points outside the shape's bounds
//! inflated by that tolerance are rejected before the precise test.
//!
//! ## Minimal usage
//!
//! ```
//! use understory_shape_stack::{Geometry, LayerId, LayerStack, Shape, ShapeLayer};
//! use kurbo::Point;
//!
//! let square = |x: f64| Geometry::polygon([
//!     Point::new(x, 0.0),
//!     Point::new(x, 100.0),
//!     Point::new(x + 100.0, 100.0),
//!     Point::new(x + 100.0, 0.0),
//! ]);
//!
//! let mut stack = LayerStack::new();
//! stack.add(ShapeLayer::new(LayerId(1), Shape::new(square(0.0)))).unwrap();
//! stack.add(ShapeLayer::new(LayerId(2), Shape::new(square(50.0)))).unwrap();
//!
//! // Both overlap at x = 75; the later one is on top.
//! let hits: Vec<_> = stack.hit_candidates(Point::new(75.0, 50.0), 2.0).map(|l| l.id()).collect();
//! assert_eq!(hits, [LayerId(2), LayerId(1)]);
//!
//! stack.raise_to_top(LayerId(1));
//! assert_eq!(stack.hit_test_point(Point::new(75.0, 50.0), 2.0), Some(LayerId(1)));
//!
//! // Z-order calls on unknown ids are no-ops.
//! assert!(!stack.lower_to_bottom(LayerId(99)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod hit;
pub mod redraw;
pub mod stack;
pub mod types;

pub use redraw::{FrameHost, FrameToken, Painter, RedrawScheduler};
pub use stack::{DuplicateLayerError, LayerStack};
pub use types::{Geometry, HitConfig, LayerFlags, LayerId, Shape, ShapeLayer, ShapeStyle};
