// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered layer registry: insertion, removal, z-order, and hit queries.

use alloc::vec::Vec;
use kurbo::Point;

use crate::types::{LayerFlags, LayerId, Shape, ShapeLayer};

/// Returned by [`LayerStack::add`] when the identifier is already registered.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{0} is already registered")]
pub struct DuplicateLayerError(pub LayerId);

/// Ordered stack of shape layers sharing one surface.
///
/// Index 0 is the bottom of the stack; the last entry is topmost, drawn last
/// and hit-tested first. Insertion order is the initial z-order.
///
/// Every operation that takes a [`LayerId`] treats an unknown id as a no-op,
/// so z-order calls on shapes that were already detached are harmless.
#[derive(Clone, Default)]
pub struct LayerStack {
    layers: Vec<ShapeLayer>,
    revision: u64,
}

impl core::fmt::Debug for LayerStack {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let interactive = self.layers.iter().filter(|l| l.is_interactive()).count();
        f.debug_struct("LayerStack")
            .field("layers", &self.layers.len())
            .field("interactive", &interactive)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl LayerStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// True if no layer is registered.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Monotonic counter bumped by every change that affects drawing.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// True if `id` is registered.
    pub fn contains(&self, id: LayerId) -> bool {
        self.position(id).is_some()
    }

    /// Z position of `id`, counted from the bottom.
    pub fn position(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|l| l.id() == id)
    }

    /// Look up a layer.
    pub fn get(&self, id: LayerId) -> Option<&ShapeLayer> {
        self.layers.iter().find(|l| l.id() == id)
    }

    /// Iterate layers bottom to top (draw order).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &ShapeLayer> + '_ {
        self.layers.iter()
    }

    /// Layer identifiers bottom to top.
    pub fn ids(&self) -> Vec<LayerId> {
        self.layers.iter().map(ShapeLayer::id).collect()
    }

    /// Append `layer` on top of the stack.
    pub fn add(&mut self, layer: ShapeLayer) -> Result<(), DuplicateLayerError> {
        let id = layer.id();
        if self.contains(id) {
            return Err(DuplicateLayerError(id));
        }
        tracing::debug!(%id, z = self.layers.len(), "layer added");
        self.layers.push(layer);
        self.touch();
        Ok(())
    }

    /// Remove a layer, returning it if it was registered.
    pub fn remove(&mut self, id: LayerId) -> Option<ShapeLayer> {
        let idx = self.position(id)?;
        tracing::debug!(%id, "layer removed");
        self.touch();
        Some(self.layers.remove(idx))
    }

    /// Remove every layer.
    pub fn clear(&mut self) {
        if !self.layers.is_empty() {
            self.layers.clear();
            self.touch();
        }
    }

    /// Move `id` to the top. Returns true if the order changed.
    pub fn raise_to_top(&mut self, id: LayerId) -> bool {
        match self.position(id) {
            Some(idx) if idx + 1 < self.layers.len() => {
                let layer = self.layers.remove(idx);
                self.layers.push(layer);
                tracing::debug!(%id, "layer raised to top");
                self.touch();
                true
            }
            _ => false,
        }
    }

    /// Move `id` to the bottom. Returns true if the order changed.
    pub fn lower_to_bottom(&mut self, id: LayerId) -> bool {
        match self.position(id) {
            Some(idx) if idx > 0 => {
                let layer = self.layers.remove(idx);
                self.layers.insert(0, layer);
                tracing::debug!(%id, "layer lowered to bottom");
                self.touch();
                true
            }
            _ => false,
        }
    }

    /// Replace the flags of `id`. Returns true if the layer exists.
    pub fn set_flags(&mut self, id: LayerId, flags: LayerFlags) -> bool {
        let Some(layer) = self.layer_mut(id) else {
            return false;
        };
        let changed = layer.flags() != flags;
        layer.set_flags(flags);
        if changed {
            self.touch();
        }
        true
    }

    /// Toggle [`LayerFlags::INTERACTIVE`] on `id`. Returns true if the layer exists.
    ///
    /// Interactivity does not affect drawing, so the revision is left untouched.
    pub fn set_interactive(&mut self, id: LayerId, interactive: bool) -> bool {
        let Some(layer) = self.layer_mut(id) else {
            return false;
        };
        let mut flags = layer.flags();
        flags.set(LayerFlags::INTERACTIVE, interactive);
        layer.set_flags(flags);
        true
    }

    /// Replace the shape of `id`. Returns true if the layer exists.
    pub fn set_shape(&mut self, id: LayerId, shape: Shape) -> bool {
        let Some(layer) = self.layer_mut(id) else {
            return false;
        };
        layer.set_shape(shape);
        self.touch();
        true
    }

    /// Interactive layers under `pt`, topmost first.
    ///
    /// Lazy: each layer is tested only when the iterator reaches it.
    /// Hidden and non-interactive layers are skipped without testing.
    pub fn hit_candidates(&self, pt: Point, slop: f64) -> impl Iterator<Item = &ShapeLayer> + '_ {
        self.layers
            .iter()
            .rev()
            .filter(|l| l.is_interactive())
            .filter(move |l| l.hit(pt, slop))
    }

    /// Topmost interactive layer under `pt`.
    pub fn hit_test_point(&self, pt: Point, slop: f64) -> Option<LayerId> {
        self.hit_candidates(pt, slop).next().map(ShapeLayer::id)
    }

    fn layer_mut(&mut self, id: LayerId) -> Option<&mut ShapeLayer> {
        self.layers.iter_mut().find(|l| l.id() == id)
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Geometry;
    use alloc::vec;

    fn square(id: u64, x0: f64, y0: f64, x1: f64, y1: f64) -> ShapeLayer {
        ShapeLayer::new(
            LayerId(id),
            Shape::new(Geometry::polygon([
                Point::new(x0, y0),
                Point::new(x0, y1),
                Point::new(x1, y1),
                Point::new(x1, y0),
            ])),
        )
    }

    fn ids(v: &[u64]) -> Vec<LayerId> {
        v.iter().copied().map(LayerId).collect()
    }

    #[test]
    fn insertion_order_is_z_order() {
        let mut stack = LayerStack::new();
        for i in 1..=3 {
            stack.add(square(i, 0.0, 0.0, 10.0, 10.0)).unwrap();
        }
        assert_eq!(stack.ids(), ids(&[1, 2, 3]));
        assert_eq!(stack.position(LayerId(3)), Some(2));
    }

    #[test]
    fn duplicate_add_fails_and_keeps_stack_intact() {
        let mut stack = LayerStack::new();
        stack.add(square(1, 0.0, 0.0, 10.0, 10.0)).unwrap();
        let err = stack.add(square(1, 50.0, 50.0, 60.0, 60.0)).unwrap_err();
        assert_eq!(err, DuplicateLayerError(LayerId(1)));
        assert_eq!(stack.len(), 1);
        assert_eq!(
            stack.get(LayerId(1)).unwrap().bounds().unwrap().x0,
            0.0,
            "original layer must survive"
        );
    }

    #[test]
    fn remove_is_idempotent() {
        let mut stack = LayerStack::new();
        stack.add(square(1, 0.0, 0.0, 10.0, 10.0)).unwrap();
        assert!(stack.remove(LayerId(1)).is_some());
        assert!(stack.remove(LayerId(1)).is_none());
        assert!(stack.remove(LayerId(42)).is_none());
        assert!(stack.is_empty());
    }

    #[test]
    fn raise_and_lower_reorder() {
        let mut stack = LayerStack::new();
        for i in 1..=4 {
            stack.add(square(i, 0.0, 0.0, 10.0, 10.0)).unwrap();
        }
        assert!(stack.raise_to_top(LayerId(1)));
        assert_eq!(stack.ids(), ids(&[2, 3, 4, 1]));
        assert!(stack.lower_to_bottom(LayerId(4)));
        assert_eq!(stack.ids(), ids(&[4, 2, 3, 1]));
        // Already at the extreme.
        assert!(!stack.raise_to_top(LayerId(1)));
        assert!(!stack.lower_to_bottom(LayerId(4)));
        assert_eq!(stack.ids(), ids(&[4, 2, 3, 1]));
    }

    #[test]
    fn z_order_on_detached_id_is_noop() {
        let mut stack = LayerStack::new();
        stack.add(square(1, 0.0, 0.0, 10.0, 10.0)).unwrap();
        stack.add(square(2, 0.0, 0.0, 10.0, 10.0)).unwrap();
        stack.clear();
        let rev = stack.revision();
        assert!(!stack.raise_to_top(LayerId(1)));
        assert!(!stack.lower_to_bottom(LayerId(2)));
        assert!(!stack.set_interactive(LayerId(1), false));
        assert_eq!(stack.revision(), rev);
    }

    #[test]
    fn mixed_operations_never_duplicate_ids() {
        let mut stack = LayerStack::new();
        let mut next = 0_u64;
        // Deterministic pseudo-random operation mix.
        let mut seed = 0x2545_f491_u64;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            let target = LayerId(seed % (next + 1));
            match seed % 5 {
                0 | 1 => {
                    next += 1;
                    stack.add(square(next, 0.0, 0.0, 1.0, 1.0)).unwrap();
                }
                2 => {
                    stack.remove(target);
                }
                3 => {
                    stack.raise_to_top(target);
                    if stack.contains(target) {
                        assert_eq!(stack.ids().last(), Some(&target));
                    }
                }
                _ => {
                    stack.lower_to_bottom(target);
                    if stack.contains(target) {
                        assert_eq!(stack.ids().first(), Some(&target));
                    }
                }
            }
            let mut seen = stack.ids();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), stack.len(), "duplicate id in stack");
        }
    }

    #[test]
    fn candidates_are_topmost_first_and_skip_non_interactive() {
        let mut stack = LayerStack::new();
        stack.add(square(1, 0.0, 0.0, 100.0, 100.0)).unwrap();
        stack.add(square(2, 0.0, 0.0, 100.0, 100.0)).unwrap();
        stack.add(square(3, 0.0, 0.0, 100.0, 100.0)).unwrap();
        stack.set_interactive(LayerId(3), false);
        let hits: Vec<LayerId> = stack
            .hit_candidates(Point::new(50.0, 50.0), 0.0)
            .map(ShapeLayer::id)
            .collect();
        assert_eq!(hits, ids(&[2, 1]));
        assert_eq!(stack.hit_test_point(Point::new(50.0, 50.0), 0.0), Some(LayerId(2)));
        // Non-interactive layers stay in draw order.
        assert_eq!(stack.ids(), ids(&[1, 2, 3]));
    }

    #[test]
    fn hidden_layers_are_not_hit() {
        let mut stack = LayerStack::new();
        stack.add(square(1, 0.0, 0.0, 100.0, 100.0)).unwrap();
        stack.set_flags(LayerId(1), LayerFlags::INTERACTIVE);
        assert_eq!(stack.hit_test_point(Point::new(50.0, 50.0), 0.0), None);
    }

    #[test]
    fn candidates_follow_raise() {
        let mut stack = LayerStack::new();
        stack.add(square(1, 0.0, 0.0, 100.0, 100.0)).unwrap();
        stack.add(square(2, 0.0, 0.0, 100.0, 100.0)).unwrap();
        stack.raise_to_top(LayerId(1));
        let hits: Vec<LayerId> = stack
            .hit_candidates(Point::new(50.0, 50.0), 0.0)
            .map(ShapeLayer::id)
            .collect();
        assert_eq!(hits, vec![LayerId(1), LayerId(2)]);
    }

    #[test]
    fn miss_outside_every_shape() {
        let mut stack = LayerStack::new();
        stack.add(square(1, 0.0, 0.0, 100.0, 100.0)).unwrap();
        assert_eq!(stack.hit_candidates(Point::new(150.0, 150.0), 2.0).count(), 0);
    }

    #[test]
    fn set_shape_updates_bounds() {
        let mut stack = LayerStack::new();
        stack.add(square(1, 0.0, 0.0, 10.0, 10.0)).unwrap();
        assert!(stack.set_shape(
            LayerId(1),
            Shape::new(Geometry::circle(Point::new(200.0, 200.0), 5.0))
        ));
        assert_eq!(stack.hit_test_point(Point::new(5.0, 5.0), 0.0), None);
        assert_eq!(
            stack.hit_test_point(Point::new(200.0, 200.0), 0.0),
            Some(LayerId(1))
        );
    }
}
