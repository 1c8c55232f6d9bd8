//! Contagion Propagation Benchmarks
//!
//! Benchmarks for graph propagation and overlay maintenance.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use affect_memory::affect::EmotionalState;
use affect_memory::contagion::{ContagionConfig, ContagionPropagator, SimilarityGraph};
use affect_memory::dst::SimClock;

fn strong_positive() -> EmotionalState {
    EmotionalState::new(0.9, 0.8, 0.2, 0.7, 0.1, 0.1, 0.1, 0.85)
}

/// Chain of `len` nodes with high-similarity edges.
fn chain_graph(len: usize) -> SimilarityGraph {
    let mut graph = SimilarityGraph::new();
    for i in 0..len.saturating_sub(1) {
        graph.add_undirected(&format!("ep-{i:04}"), &format!("ep-{:04}", i + 1), 0.9);
    }
    graph
}

/// Star of `arms` neighbors around a single hub.
fn star_graph(arms: usize) -> SimilarityGraph {
    let mut graph = SimilarityGraph::new();
    for i in 0..arms {
        graph.add_undirected("hub", &format!("arm-{i:04}"), 0.85);
    }
    graph
}

fn bench_propagate_star(c: &mut Criterion) {
    c.bench_function("contagion/propagate_star_100", |b| {
        let graph = star_graph(100);
        let emotion = strong_positive();

        b.iter(|| {
            let mut propagator = ContagionPropagator::new(SimClock::new());
            black_box(propagator.on_episode_access("hub", &emotion, &graph));
        });
    });
}

fn bench_propagate_chain_deep(c: &mut Criterion) {
    c.bench_function("contagion/propagate_chain_8_hops", |b| {
        let graph = chain_graph(32);
        let emotion = strong_positive();
        let config = ContagionConfig::default()
            .with_max_hops(8)
            .with_intensity_threshold(0.1)
            .with_floor_epsilon(0.05);

        b.iter(|| {
            let mut propagator =
                ContagionPropagator::with_config(config.clone(), SimClock::new()).unwrap();
            black_box(propagator.on_episode_access("ep-0000", &emotion, &graph));
        });
    });
}

fn bench_decay_overlays(c: &mut Criterion) {
    c.bench_function("contagion/decay_500_overlays", |b| {
        let clock = SimClock::new();
        let graph = star_graph(500);
        let config = ContagionConfig::default().with_floor_epsilon(0.01);
        let mut propagator = ContagionPropagator::with_config(config, clock.clone()).unwrap();
        propagator.on_episode_access("hub", &strong_positive(), &graph);
        clock.advance_ms(1000);

        b.iter(|| {
            black_box(propagator.decay_overlays());
        });
    });
}

fn bench_adjust_scores(c: &mut Criterion) {
    use affect_memory::retrieval::{RetrievalBiasAdjuster, RetrievalBiasConfig};

    c.bench_function("contagion/adjust_100_candidates", |b| {
        let graph = star_graph(100);
        let mut propagator = ContagionPropagator::new(SimClock::new());
        propagator.on_episode_access("hub", &strong_positive(), &graph);

        let candidates: Vec<(String, f64)> = (0..100)
            .map(|i| (format!("arm-{i:04}"), 0.5))
            .collect();
        let query = strong_positive();
        let adjuster =
            RetrievalBiasAdjuster::new(&propagator, RetrievalBiasConfig::default()).unwrap();

        b.iter(|| {
            black_box(adjuster.adjust(&candidates, &query));
        });
    });
}

criterion_group!(
    benches,
    bench_propagate_star,
    bench_propagate_chain_deep,
    bench_decay_overlays,
    bench_adjust_scores
);
criterion_main!(benches);
