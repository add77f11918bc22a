// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover state helper: compute over/out transitions for the topmost layer.
//!
//! ## Usage
//!
//! 1) On each pointer move, hit test and take the topmost layer (or `None`).
//! 2) Call [`HoverState::update`] with it to get `Leave(..)` / `Enter(..)` transitions.
//! 3) Dispatch [`MouseOut`](crate::types::EventKind::MouseOut) for each leave
//!    and [`MouseOver`](crate::types::EventKind::MouseOver) for each enter, in order.
//!
//! A layer sees exactly one enter per hover session and exactly one leave when
//! the session ends, however many moves happen in between.
//!
//! ## Minimal example
//!
//! ```
//! use understory_responder::hover::{HoverState, HoverEvent};
//! let mut h: HoverState<u32> = HoverState::new();
//! assert_eq!(h.update(Some(1)), vec![HoverEvent::Enter(1)]);
//! assert!(h.update(Some(1)).is_empty());
//! assert_eq!(h.update(Some(2)), vec![HoverEvent::Leave(1), HoverEvent::Enter(2)]);
//! assert_eq!(h.update(None), vec![HoverEvent::Leave(2)]);
//! ```

use alloc::vec::Vec;

/// Tracks which layer is currently hovered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverState<K: Copy + Eq> {
    current: Option<K>,
}

impl<K: Copy + Eq> Default for HoverState<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// A hover transition event.
///
/// Returned by [`HoverState::update`] and [`HoverState::clear`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent<K> {
    /// Pointer enters the given layer.
    Enter(K),
    /// Pointer leaves the given layer.
    Leave(K),
}

impl<K: Copy + Eq> HoverState<K> {
    /// Create an empty hover state.
    pub fn new() -> Self {
        Self { current: None }
    }

    /// The hovered layer, if any.
    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// Move hover to `next`, returning the leave (first) and enter (second)
    /// transitions needed. Empty when nothing changed.
    pub fn update(&mut self, next: Option<K>) -> Vec<HoverEvent<K>> {
        if self.current == next {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(2);
        if let Some(old) = self.current {
            out.push(HoverEvent::Leave(old));
        }
        if let Some(new) = next {
            out.push(HoverEvent::Enter(new));
        }
        self.current = next;
        out
    }

    /// End the hover session, returning the leave event if a layer was hovered.
    pub fn clear(&mut self) -> Option<HoverEvent<K>> {
        self.current.take().map(HoverEvent::Leave)
    }

    /// Drop `layer` from the hover state without emitting a transition.
    ///
    /// Used when the layer disappears (detached or made non-interactive).
    /// Returns true if it was the hovered layer.
    pub fn forget(&mut self, layer: K) -> bool {
        if self.current == Some(layer) {
            self.current = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn enter_on_fresh_hover() {
        let mut h: HoverState<u32> = HoverState::new();
        assert_eq!(h.update(Some(3)), vec![HoverEvent::Enter(3)]);
        assert_eq!(h.current(), Some(3));
    }

    // Many moves over the same layer: one enter only.
    #[test]
    fn repeated_updates_are_silent() {
        let mut h: HoverState<u32> = HoverState::new();
        let _ = h.update(Some(3));
        for _ in 0..5 {
            assert!(h.update(Some(3)).is_empty());
        }
    }

    // Switching layers: leave the old one before entering the new one.
    #[test]
    fn switch_leaves_then_enters() {
        let mut h: HoverState<u32> = HoverState::new();
        let _ = h.update(Some(1));
        assert_eq!(
            h.update(Some(2)),
            vec![HoverEvent::Leave(1), HoverEvent::Enter(2)]
        );
    }

    #[test]
    fn clear_emits_single_leave() {
        let mut h: HoverState<u32> = HoverState::new();
        let _ = h.update(Some(1));
        assert_eq!(h.clear(), Some(HoverEvent::Leave(1)));
        assert_eq!(h.clear(), None);
        assert!(h.update(None).is_empty());
    }

    #[test]
    fn forget_is_silent_and_targeted() {
        let mut h: HoverState<u32> = HoverState::new();
        let _ = h.update(Some(1));
        assert!(!h.forget(2));
        assert!(h.forget(1));
        assert_eq!(h.current(), None);
        // Re-entering after a forget starts a new session.
        assert_eq!(h.update(Some(1)), vec![HoverEvent::Enter(1)]);
    }
}
