//! Benchmarks the per-frame cost of the animation core.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use driftfall::prelude::*;

struct NullSurface;

impl Surface for NullSurface {
    fn clear(&mut self) {}
    fn draw_glyph(&mut self, _glyph: &str, _placement: Placement) {}
    fn draw_image(&mut self, _image: ImageHandle, _placement: Placement) {}
}

/// An animator churning at its item cap.
fn saturated(max_items: usize) -> Animator {
    let config = FallConfig {
        max_items,
        spawn_rate: 1.0,
        ..Default::default()
    };
    let mut animator = Animator::new(config, Vec2::new(1920.0, 1080.0)).with_seed(42);
    animator.start(Vec::new());
    animator.seed_initial();
    for _ in 0..max_items * 2 {
        animator.advance(1.0);
    }
    animator
}

fn bench_advance(c: &mut Criterion) {
    let mut animator = saturated(40);
    c.bench_function("advance_40_particles", |b| {
        b.iter(|| animator.advance(black_box(1.0)))
    });

    let mut animator = saturated(1000);
    c.bench_function("advance_1000_particles", |b| {
        b.iter(|| animator.advance(black_box(1.0)))
    });
}

fn bench_render(c: &mut Criterion) {
    let animator = saturated(1000);
    let mut surface = NullSurface;
    c.bench_function("render_1000_particles", |b| {
        b.iter(|| animator.render(&mut surface))
    });
}

criterion_group!(benches, bench_advance, bench_render);
criterion_main!(benches);
