// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Responder basics.
//!
//! Drive the router, hover state, and click disambiguator by hand over a
//! layer stack, without a surface tying them together.
//!
//! Run:
//! - `cargo run -p understory_demos --example responder_basics`

use kurbo::Point;
use understory_responder::adapters::shape_stack::{hits_for_point, top_hit_for_point};
use understory_responder::gesture::ClickDisambiguator;
use understory_responder::hover::{HoverEvent, HoverState};
use understory_responder::router::Router;
use understory_responder::types::{EventKind, PointerKind, PointerSample, Target};
use understory_shape_stack::{Geometry, HitConfig, LayerId, LayerStack, Shape, ShapeLayer};

fn sample(point: Point, timestamp: u64) -> PointerSample {
    PointerSample {
        point,
        container_point: point,
        pointer: PointerKind::Mouse,
        timestamp,
    }
}

fn main() {
    let mut stack = LayerStack::new();
    let disc = LayerId(1);
    let pin = LayerId(2);
    stack
        .add(ShapeLayer::new(
            disc,
            Shape::new(Geometry::circle(Point::new(50.0, 50.0), 40.0)),
        ))
        .unwrap();
    stack
        .add(ShapeLayer::new(
            pin,
            Shape::new(Geometry::circle(Point::new(60.0, 60.0), 8.0)),
        ))
        .unwrap();
    let slop = HitConfig::default().slop(false);

    let mut router: Router<LayerId> = Router::new();
    for target in [Target::Layer(disc), Target::Layer(pin), Target::Container] {
        for kind in [EventKind::PreClick, EventKind::Click] {
            router.on(target, kind, move |ev| {
                println!("  {} -> {:?} ({:?})", ev.kind, ev.target, ev.phase);
                Ok(())
            });
        }
    }

    println!("== Chain for a point over both discs ==");
    let hits = hits_for_point(&stack, Point::new(60.0, 60.0), slop);
    for step in Router::<LayerId>::chain(&hits) {
        println!("  {:?} {:?}", step.phase, step.target);
    }

    println!("== Hover across the stack ==");
    let mut hover: HoverState<LayerId> = HoverState::new();
    for pt in [
        Point::new(20.0, 50.0),
        Point::new(60.0, 60.0),
        Point::new(200.0, 200.0),
    ] {
        for transition in hover.update(top_hit_for_point(&stack, pt, slop)) {
            match transition {
                HoverEvent::Enter(id) => println!("  mouseover {id}"),
                HoverEvent::Leave(id) => println!("  mouseout {id}"),
            }
        }
    }

    println!("== Press and release in place ==");
    let mut gesture = ClickDisambiguator::default();
    let at = Point::new(60.0, 60.0);
    gesture.press(at, 0);
    if let Some(click) = gesture.release(at, 80) {
        let hits = hits_for_point(&stack, click.point, slop);
        let report = router.dispatch(EventKind::Click, &hits, sample(click.point, 80));
        assert_eq!(report.count(EventKind::Click, Target::Container), 1);
    }

    println!("== Drag: no click ==");
    gesture.press(at, 100);
    gesture.pointer_move(Point::new(80.0, 70.0));
    assert!(gesture.release(Point::new(80.0, 70.0), 180).is_none());
    println!("  suppressed");
}
