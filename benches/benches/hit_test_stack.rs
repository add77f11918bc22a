// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use understory_canvas::{FrameHost, FrameToken, PointerInput, Surface};
use understory_shape_stack::{Geometry, LayerId, LayerStack, Shape, ShapeLayer};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// A mix of hexagons, three-segment lines and circles scattered over a 2000x2000 surface.
fn gen_shapes(count: usize, size: f64) -> Vec<Shape> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let cx = rng.next_f64() * 2000.0;
        let cy = rng.next_f64() * 2000.0;
        let geometry = match i % 3 {
            0 => Geometry::polygon((0..6).map(|k| {
                let a = k as f64 * core::f64::consts::FRAC_PI_3;
                Point::new(cx + size * a.cos(), cy + size * a.sin())
            })),
            1 => Geometry::polyline([
                Point::new(cx - size, cy),
                Point::new(cx, cy + size),
                Point::new(cx + size, cy),
                Point::new(cx + 2.0 * size, cy - size),
            ]),
            _ => Geometry::circle(Point::new(cx, cy), size * 0.5),
        };
        out.push(Shape::new(geometry));
    }
    out
}

fn gen_points(count: usize) -> Vec<Point> {
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    (0..count)
        .map(|_| Point::new(rng.next_f64() * 2000.0, rng.next_f64() * 2000.0))
        .collect()
}

fn build_stack(shapes: &[Shape]) -> LayerStack {
    let mut stack = LayerStack::new();
    for (i, shape) in shapes.iter().enumerate() {
        let _ = stack.add(ShapeLayer::new(LayerId(i as u64), shape.clone()));
    }
    stack
}

fn bench_stack(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack");
    let points = gen_points(256);
    for &n in &[100usize, 1_000, 10_000] {
        let stack = build_stack(&gen_shapes(n, 30.0));
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(format!("hit_candidates_n{}", n), |b| {
            b.iter(|| {
                let mut hits = 0;
                for &pt in &points {
                    hits += stack.hit_candidates(pt, 2.0).count();
                }
                black_box(hits);
            })
        });
        group.bench_function(format!("hit_test_point_n{}", n), |b| {
            b.iter(|| {
                for &pt in &points {
                    black_box(stack.hit_test_point(pt, 2.0));
                }
            })
        });
    }
    let shapes = gen_shapes(1_000, 30.0);
    group.bench_function("add_raise_n1000", |b| {
        b.iter_batched(
            || build_stack(&shapes),
            |mut stack| {
                for i in (0..1_000).step_by(7) {
                    stack.raise_to_top(LayerId(i));
                }
                black_box(stack.len());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

#[derive(Default)]
struct Host(u64);

impl FrameHost for Host {
    fn request_frame(&mut self) -> FrameToken {
        self.0 += 1;
        FrameToken(self.0)
    }
    fn cancel_frame(&mut self, _token: FrameToken) {}
}

fn bench_surface(c: &mut Criterion) {
    let mut group = c.benchmark_group("surface");
    let points = gen_points(256);
    for &n in &[100usize, 1_000] {
        let mut surface = Surface::new(Host::default());
        for shape in gen_shapes(n, 30.0) {
            let _ = surface.attach(shape);
        }
        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(format!("pointer_move_n{}", n), |b| {
            b.iter(|| {
                for (t, &pt) in points.iter().enumerate() {
                    let report = surface.pointer_move(PointerInput::mouse(pt, t as u64));
                    black_box(report.deliveries.len());
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_stack, bench_surface);
criterion_main!(benches);
