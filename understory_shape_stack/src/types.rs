// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the shape stack: layer identifiers, flags, geometry, and style.

use alloc::vec::Vec;
use kurbo::{Point, Rect};

use crate::hit;

/// Identifier for a shape layer.
///
/// An opaque handle that stays stable for the lifetime of the layer.
/// The stack never invents identifiers on its own; callers (usually a surface)
/// allocate them and the stack rejects duplicates.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct LayerId(pub u64);

impl LayerId {
    /// Wrap a raw identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for LayerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

bitflags::bitflags! {
    /// Layer flags controlling drawing and hit testing.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct LayerFlags: u8 {
        /// Layer is visible (drawn, and eligible for hit testing).
        const VISIBLE     = 0b0000_0001;
        /// Layer is interactive (participates in hit testing).
        const INTERACTIVE = 0b0000_0010;
    }
}

impl Default for LayerFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::INTERACTIVE
    }
}

/// Pixel-space geometry of a shape.
///
/// All coordinates are already projected onto the shared surface.
#[derive(Clone, Debug, PartialEq)]
pub enum Geometry {
    /// One or more closed rings. Inner rings punch holes (even-odd rule).
    Polygon {
        /// Rings as ordered vertex lists; the closing edge is implicit.
        rings: Vec<Vec<Point>>,
    },
    /// One or more open polylines.
    Polyline {
        /// Parts as ordered vertex lists.
        parts: Vec<Vec<Point>>,
    },
    /// A circle with its radius already scaled to surface pixels.
    Circle {
        /// Center in surface pixels.
        center: Point,
        /// Radius in surface pixels.
        radius: f64,
    },
}

impl Geometry {
    /// A polygon with a single outer ring.
    pub fn polygon(ring: impl IntoIterator<Item = Point>) -> Self {
        Self::Polygon {
            rings: alloc::vec![ring.into_iter().collect()],
        }
    }

    /// A polyline with a single part.
    pub fn polyline(points: impl IntoIterator<Item = Point>) -> Self {
        Self::Polyline {
            parts: alloc::vec![points.into_iter().collect()],
        }
    }

    /// A circle.
    pub fn circle(center: Point, radius: f64) -> Self {
        Self::Circle { center, radius }
    }

    /// Axis-aligned bounds of the raw geometry, without any stroke or slop.
    ///
    /// Returns `None` for geometry without any vertex.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Polygon { rings: lists } | Self::Polyline { parts: lists } => lists
                .iter()
                .flatten()
                .fold(None, |acc: Option<Rect>, &p| match acc {
                    None => Some(Rect::from_points(p, p)),
                    Some(r) => Some(r.union_pt(p)),
                }),
            Self::Circle { center, radius } => {
                let r = radius.max(0.0);
                Some(Rect::new(
                    center.x - r,
                    center.y - r,
                    center.x + r,
                    center.y + r,
                ))
            }
        }
    }
}

/// Style attributes that influence hit testing.
///
/// Colors, dash patterns and the like belong to the painter and are not modeled here.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShapeStyle {
    /// Whether the outline is stroked.
    pub stroke: bool,
    /// Stroke width in surface pixels.
    pub stroke_width: f64,
    /// Whether the interior is filled. Only meaningful for polygons and circles.
    pub fill: bool,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke: true,
            stroke_width: 3.0,
            fill: true,
        }
    }
}

impl ShapeStyle {
    /// Half of the stroke width, or zero when the outline is not stroked.
    pub fn half_stroke(&self) -> f64 {
        if self.stroke {
            self.stroke_width.max(0.0) * 0.5
        } else {
            0.0
        }
    }
}

/// Hit-test tolerance policy.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HitConfig {
    /// Slop in pixels added to every shape boundary for mouse and pen input.
    pub hit_slop: f64,
    /// Slop in pixels used for touch input, where the contact area is larger.
    pub touch_hit_slop: f64,
}

impl HitConfig {
    /// Default slop for mouse and pen input.
    pub const DEFAULT_HIT_SLOP: f64 = 2.0;
    /// Default slop for touch input.
    pub const DEFAULT_TOUCH_HIT_SLOP: f64 = 10.0;

    /// Select the slop for a pointer.
    pub fn slop(&self, touch: bool) -> f64 {
        if touch {
            self.touch_hit_slop
        } else {
            self.hit_slop
        }
    }
}

impl Default for HitConfig {
    fn default() -> Self {
        Self {
            hit_slop: Self::DEFAULT_HIT_SLOP,
            touch_hit_slop: Self::DEFAULT_TOUCH_HIT_SLOP,
        }
    }
}

/// Geometry plus the style needed to hit test it.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    /// Pixel-space geometry.
    pub geometry: Geometry,
    /// Style attributes relevant to hit tolerance.
    pub style: ShapeStyle,
}

impl Shape {
    /// A shape with the default style.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            style: ShapeStyle::default(),
        }
    }

    /// Replace the style.
    #[must_use]
    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    /// Tolerance radius in pixels: half the stroke plus `slop`.
    pub fn hit_tolerance(&self, slop: f64) -> f64 {
        self.style.half_stroke() + slop.max(0.0)
    }
}

/// One drawable shape on the shared surface.
#[derive(Clone, Debug)]
pub struct ShapeLayer {
    id: LayerId,
    shape: Shape,
    flags: LayerFlags,
    bounds: Option<Rect>,
}

impl ShapeLayer {
    /// Create a visible, interactive layer.
    pub fn new(id: LayerId, shape: Shape) -> Self {
        Self::with_flags(id, shape, LayerFlags::default())
    }

    /// Create a layer with explicit flags.
    pub fn with_flags(id: LayerId, shape: Shape, flags: LayerFlags) -> Self {
        let bounds = shape.geometry.bounds();
        Self {
            id,
            shape,
            flags,
            bounds,
        }
    }

    /// The layer identifier.
    pub fn id(&self) -> LayerId {
        self.id
    }

    /// The shape drawn by this layer.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Current flags.
    pub fn flags(&self) -> LayerFlags {
        self.flags
    }

    /// Bounds of the raw geometry (no stroke, no slop).
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// True when the layer is drawn.
    pub fn is_visible(&self) -> bool {
        self.flags.contains(LayerFlags::VISIBLE)
    }

    /// True when the layer takes part in hit testing.
    pub fn is_interactive(&self) -> bool {
        self.flags.contains(LayerFlags::VISIBLE | LayerFlags::INTERACTIVE)
    }

    /// Precise hit test against this layer, ignoring its flags.
    ///
    /// Points outside the bounds inflated by the tolerance are rejected
    /// before the per-geometry test runs.
    pub fn hit(&self, pt: Point, slop: f64) -> bool {
        let Some(bounds) = self.bounds else {
            return false;
        };
        let tolerance = self.shape.hit_tolerance(slop);
        let padded = bounds.inflate(tolerance, tolerance);
        if pt.x < padded.x0 || pt.x > padded.x1 || pt.y < padded.y0 || pt.y > padded.y1 {
            return false;
        }
        hit::hit_test(&self.shape, pt, tolerance)
    }

    pub(crate) fn set_flags(&mut self, flags: LayerFlags) {
        self.flags = flags;
    }

    pub(crate) fn set_shape(&mut self, shape: Shape) {
        self.bounds = shape.geometry.bounds();
        self.shape = shape;
    }
}
