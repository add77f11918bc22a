// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Clicks, bubbling, and drags on a shared surface.
//!
//! Two overlapping shapes both see a click, the container sees it once, and a
//! drag that starts on a shape clicks nothing.
//!
//! Run:
//! - `cargo run -p understory_demos --example canvas_click`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Point;
use understory_canvas::{
    EventKind, FrameHost, FrameToken, Geometry, LayerId, PointerInput, Shape, Surface, Target,
};

struct Host(u64);
impl FrameHost for Host {
    fn request_frame(&mut self) -> FrameToken {
        self.0 += 1;
        FrameToken(self.0)
    }
    fn cancel_frame(&mut self, _token: FrameToken) {}
}

fn rect(x: f64, y: f64, w: f64, h: f64) -> Shape {
    Shape::new(Geometry::polygon([
        Point::new(x, y),
        Point::new(x, y + h),
        Point::new(x + w, y + h),
        Point::new(x + w, y),
    ]))
}

fn main() {
    let mut surface = Surface::new(Host(0));
    let lower = surface.attach(rect(0.0, 0.0, 100.0, 100.0)).unwrap();
    let upper = surface.attach(rect(50.0, 50.0, 100.0, 100.0)).unwrap();

    let log: Rc<RefCell<Vec<String>>> = Rc::default();
    let targets = [Target::Layer(lower), Target::Layer(upper), Target::Container];
    for target in targets {
        for kind in [EventKind::PreClick, EventKind::Click] {
            let log = log.clone();
            surface.on(target, kind, move |ev| {
                log.borrow_mut().push(format!("{} -> {:?}", ev.kind, ev.target));
                Ok(())
            });
        }
    }

    let tap = |s: &mut Surface<Host>, from: Point, to: Point| {
        s.pointer_down(PointerInput::mouse(from, 0));
        s.pointer_move(PointerInput::mouse(to, 10));
        s.pointer_up(PointerInput::mouse(to, 20))
    };

    println!("== Click in the overlap ==");
    tap(&mut surface, Point::new(75.0, 75.0), Point::new(75.0, 75.0));
    for line in log.borrow_mut().drain(..) {
        println!("  {line}");
    }

    println!("== Drag from the overlap ==");
    let report = tap(&mut surface, Point::new(75.0, 75.0), Point::new(95.0, 85.0));
    assert!(!report.delivered(EventKind::Click));
    println!("  clicks: {}", log.borrow().len());

    println!("== Raise the lower shape and click again ==");
    surface.raise_to_top(lower);
    let report = tap(&mut surface, Point::new(75.0, 75.0), Point::new(75.0, 75.0));
    let clicked: Vec<Target<LayerId>> = report.targets_of(EventKind::Click);
    println!("  {clicked:?}");
    assert_eq!(
        clicked,
        [Target::Layer(lower), Target::Layer(upper), Target::Container]
    );
}
