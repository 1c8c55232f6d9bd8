//! Working Memory Benchmarks
//!
//! Benchmarks for buffer insertion, eviction, and snapshots.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use affect_memory::affect::EmotionalState;
use affect_memory::dst::SimClock;
use affect_memory::memory::{WorkingMemoryBuffer, WorkingMemoryConfig};

fn full_buffer(capacity: usize) -> WorkingMemoryBuffer<u64> {
    let mut buffer = WorkingMemoryBuffer::with_config(
        WorkingMemoryConfig::default().with_capacity(capacity),
        SimClock::new(),
    )
    .unwrap();
    for i in 0..capacity {
        #[allow(clippy::cast_precision_loss)]
        let attention = (i as f64) / (capacity as f64);
        buffer.insert(&format!("ep-{i:05}"), i as u64, attention, EmotionalState::neutral());
    }
    buffer
}

fn bench_insert_with_eviction(c: &mut Criterion) {
    c.bench_function("working_memory/insert_evict_cap_100", |b| {
        let mut buffer = full_buffer(100);
        let mut i = 0u64;

        b.iter(|| {
            i += 1;
            black_box(buffer.insert(
                &format!("new-{i}"),
                i,
                0.5,
                EmotionalState::neutral(),
            ));
        });
    });
}

fn bench_touch(c: &mut Criterion) {
    c.bench_function("working_memory/touch", |b| {
        let mut buffer = full_buffer(100);

        b.iter(|| {
            black_box(buffer.touch("ep-00050").ok());
        });
    });
}

fn bench_snapshot(c: &mut Criterion) {
    c.bench_function("working_memory/snapshot_100", |b| {
        let buffer = full_buffer(100);

        b.iter(|| {
            black_box(buffer.snapshot());
        });
    });
}

criterion_group!(benches, bench_insert_with_eviction, bench_touch, bench_snapshot);
criterion_main!(benches);
