//! Compositor Benchmarks
//!
//! ```bash
//! cargo bench --bench compositors
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use video_compare::{
    compare::{match_dimensions, CompositorRegistry},
    video::{Frame, FrameDims, FrameSequence},
};

fn test_clip(frames: usize, height: usize, width: usize) -> FrameSequence {
    let dims = FrameDims::new(height, width, 3);
    let clip = (0..frames)
        .map(|i| Frame::from_fn(dims, |y, x, c| ((x * 7 + y * 11 + c * 13 + i) % 256) as f32 / 255.0))
        .collect();
    FrameSequence::with_frames(dims, clip).expect("consistent frame shapes")
}

fn bench_compositors(c: &mut Criterion) {
    let mut group = c.benchmark_group("composite");
    let registry = CompositorRegistry::new();

    for (width, height) in [(640, 360), (1280, 720)] {
        let a = test_clip(8, height, width);
        let b = test_clip(8, height, width);
        group.throughput(Throughput::Elements(a.len() as u64));

        for mode in registry.available_modes() {
            let compositor = registry.get(mode).expect("registered mode");
            group.bench_with_input(
                BenchmarkId::new(compositor.name(), format!("{}x{}", width, height)),
                &(&a, &b),
                |bench, (a, b)| bench.iter(|| black_box(compositor.composite(a, b, black_box(0.5)))),
            );
        }
    }

    group.finish();
}

fn bench_match_dimensions(c: &mut Criterion) {
    let mut group = c.benchmark_group("match_dimensions");
    let a = test_clip(8, 720, 1280);
    let b = test_clip(8, 540, 960);
    group.throughput(Throughput::Elements(a.len() as u64));

    group.bench_function("crop_720p_to_540p", |bench| {
        bench.iter(|| black_box(match_dimensions(black_box(&a), black_box(&b))))
    });

    group.finish();
}

criterion_group!(benches, bench_compositors, bench_match_dimensions);
criterion_main!(benches);
