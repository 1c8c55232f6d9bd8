//! Retrieval Bias Example
//!
//! Shows how overlay congruence reshapes a candidate ranking, and how the
//! effect fades with time.
//!
//! Run with:
//!   cargo run --example retrieval_bias

use affect_memory::affect::EmotionalState;
use affect_memory::contagion::{ContagionConfig, ContagionPropagator, SimilarityGraph};
use affect_memory::dst::SimClock;
use affect_memory::retrieval::{RetrievalBiasAdjuster, RetrievalBiasConfig};

fn print_ranking(label: &str, adjuster: &RetrievalBiasAdjuster<'_>, query: &EmotionalState) {
    let candidates = vec![
        ("episode_002".to_string(), 0.70),
        ("episode_003".to_string(), 0.65),
        ("episode_999".to_string(), 0.75),
    ];

    let mut adjusted = adjuster.adjust(&candidates, query);
    adjusted.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap());

    println!("{label}");
    for candidate in adjusted {
        println!(
            "  {}  base {:.2} -> {:.3}",
            candidate.id, candidate.base_score, candidate.score
        );
    }
    println!();
}

fn main() {
    let clock = SimClock::new();
    let config = ContagionConfig::default().with_floor_epsilon(0.05);
    let mut propagator = ContagionPropagator::with_config(config, clock.clone()).unwrap();

    let mut graph = SimilarityGraph::new();
    graph.add_undirected("episode_001", "episode_002", 0.85);
    graph.add_undirected("episode_001", "episode_003", 0.75);

    let emotion = EmotionalState::new(0.9, 0.8, 0.2, 0.7, 0.1, 0.1, 0.1, 0.85);
    propagator.on_episode_access("episode_001", &emotion, &graph);

    let query = EmotionalState::new(0.8, 0.75, 0.3, 0.6, 0.2, 0.2, 0.2, 0.7);
    let opposed = EmotionalState::new(0.1, 0.1, 0.9, 0.2, 0.85, 0.7, 0.8, 0.1);

    let adjuster =
        RetrievalBiasAdjuster::new(&propagator, RetrievalBiasConfig::default()).unwrap();

    print_ranking("Fresh overlays, congruent query:", &adjuster, &query);
    print_ranking("Fresh overlays, opposed query:", &adjuster, &opposed);

    // Eight hours: two half-lives of overlay decay
    clock.advance_ms(8 * 3_600_000);
    print_ranking("Eight hours later, congruent query:", &adjuster, &query);
}
