// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape stack basics.
//!
//! Stack three shapes, hit-test through them, reorder, and paint.
//!
//! Run:
//! - `cargo run -p understory_demos --example shape_stack_basics`

use kurbo::Point;
use understory_shape_stack::{
    FrameHost, FrameToken, Geometry, LayerId, LayerStack, Painter, RedrawScheduler, Shape,
    ShapeLayer, ShapeStyle,
};

struct Host(u64);
impl FrameHost for Host {
    fn request_frame(&mut self) -> FrameToken {
        self.0 += 1;
        FrameToken(self.0)
    }
    fn cancel_frame(&mut self, _token: FrameToken) {}
}

struct Print;
impl Painter for Print {
    fn clear(&mut self) {
        println!("  clear");
    }
    fn draw_layer(&mut self, layer: &ShapeLayer) {
        println!("  draw {} bounds={:?}", layer.id(), layer.bounds());
    }
}

fn main() {
    let mut stack = LayerStack::new();
    let field = LayerId(1);
    let road = LayerId(2);
    let well = LayerId(3);

    stack
        .add(ShapeLayer::new(
            field,
            Shape::new(Geometry::polygon([
                Point::new(0.0, 0.0),
                Point::new(0.0, 100.0),
                Point::new(100.0, 100.0),
                Point::new(100.0, 0.0),
            ])),
        ))
        .unwrap();
    stack
        .add(ShapeLayer::new(
            road,
            Shape::new(Geometry::polyline([
                Point::new(-20.0, 50.0),
                Point::new(120.0, 50.0),
            ]))
            .with_style(ShapeStyle {
                stroke_width: 6.0,
                ..ShapeStyle::default()
            }),
        ))
        .unwrap();
    stack
        .add(ShapeLayer::new(
            well,
            Shape::new(Geometry::circle(Point::new(50.0, 52.0), 5.0)),
        ))
        .unwrap();

    // Topmost first.
    let pt = Point::new(50.0, 50.0);
    let hits: Vec<_> = stack.hit_candidates(pt, 2.0).map(|l| l.id()).collect();
    println!("== Hits at {pt:?} ==\n  {hits:?}");
    assert_eq!(hits, [well, road, field]);

    // The road is 6px wide; 4px off its center line is still on it.
    assert!(stack.get(road).unwrap().hit(Point::new(10.0, 54.0), 2.0));

    stack.lower_to_bottom(well);
    stack.set_interactive(road, false);
    let hits: Vec<_> = stack.hit_candidates(pt, 2.0).map(|l| l.id()).collect();
    println!("== Hits after reorder ==\n  {hits:?}");
    assert_eq!(hits, [field, well]);

    let mut redraw = RedrawScheduler::new(Host(0));
    redraw.mark_dirty();
    redraw.mark_dirty();
    let token = redraw.pending().unwrap();
    println!("== Paint {token:?} ==");
    assert!(redraw.run_frame(token, &stack, &mut Print));
    assert_eq!(redraw.frames_painted(), 1);
}
