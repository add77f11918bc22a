// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter helpers for Understory Shape Stack.
//!
//! ## Feature
//!
//! Enable with `shape_stack_adapter`.
//!
//! ## Notes
//!
//! These helpers turn shape stack hit queries into the hit snapshot the
//! [`Router`](crate::router::Router) expects: interactive layers under the
//! point, topmost first. The result is an owned `Vec`, so handlers that later
//! queue layer changes cannot disturb the chain being dispatched.

use alloc::vec::Vec;

use kurbo::Point;
use understory_shape_stack::{LayerId, LayerStack};

/// Snapshot every interactive layer under `pt`, topmost first.
pub fn hits_for_point(stack: &LayerStack, pt: Point, slop: f64) -> Vec<LayerId> {
    stack.hit_candidates(pt, slop).map(|l| l.id()).collect()
}

/// The topmost interactive layer under `pt`, used for hover tracking.
pub fn top_hit_for_point(stack: &LayerStack, pt: Point, slop: f64) -> Option<LayerId> {
    stack.hit_test_point(pt, slop)
}
