// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover transitions on a shared surface.
//!
//! Moving across two shapes yields one mouse-over and one mouse-out per shape,
//! however many moves happen over each.
//!
//! Run:
//! - `cargo run -p understory_demos --example canvas_hover`

use kurbo::Point;
use understory_canvas::{
    EventKind, FrameHost, FrameToken, Geometry, PointerInput, Shape, Surface, Target,
};

struct Host(u64);
impl FrameHost for Host {
    fn request_frame(&mut self) -> FrameToken {
        self.0 += 1;
        FrameToken(self.0)
    }
    fn cancel_frame(&mut self, _token: FrameToken) {}
}

fn main() {
    let mut surface = Surface::new(Host(0));
    let left = surface
        .attach(Shape::new(Geometry::circle(Point::new(50.0, 50.0), 30.0)))
        .unwrap();
    let right = surface
        .attach(Shape::new(Geometry::circle(Point::new(150.0, 50.0), 30.0)))
        .unwrap();

    let mut overs = Vec::new();
    let mut outs = Vec::new();
    for x in (0..=200).step_by(10) {
        let report = surface.pointer_move(PointerInput::mouse(Point::new(x as f64, 50.0), 0));
        for d in &report.deliveries {
            if d.kind != EventKind::MouseMove {
                println!("  x={x:>3}: {} -> {:?}", d.kind, d.target);
            }
        }
        overs.extend(report.targets_of(EventKind::MouseOver));
        outs.extend(report.targets_of(EventKind::MouseOut));
    }
    let report = surface.pointer_leave(PointerInput::mouse(Point::new(250.0, 50.0), 0));
    outs.extend(report.targets_of(EventKind::MouseOut));

    assert_eq!(
        overs,
        [
            Target::Layer(left),
            Target::Container,
            Target::Layer(right),
            Target::Container
        ]
    );
    assert_eq!(outs.iter().filter(|t| t.layer().is_some()).count(), 2);
    assert_eq!(surface.hovered(), None);
}
