//! Basic Usage Example
//!
//! Demonstrates the core access -> propagate -> retrieve workflow.
//!
//! Run with:
//!   cargo run --example basic_usage

use affect_memory::affect::EmotionalState;
use affect_memory::attention::AttentionInputs;
use affect_memory::contagion::SimilarityGraph;
use affect_memory::dst::SimClock;
use affect_memory::engine::AffectEngine;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    println!("=== Affect Memory: Basic Usage ===\n");

    // One clock drives the whole engine; a host would mirror real time here
    let clock = SimClock::new();
    let mut engine: AffectEngine<String> = AffectEngine::new(clock.clone());

    // Similarity graph as an upstream semantic service would supply it
    let mut graph = SimilarityGraph::new();
    graph.add_undirected("episode_001", "episode_002", 0.85);
    graph.add_undirected("episode_001", "episode_003", 0.75);
    graph.add_undirected("episode_002", "episode_004", 0.80);
    graph.add_undirected("episode_003", "episode_005", 0.72);
    println!("Graph: {} nodes, {} edges\n", graph.node_count(), graph.edge_count());

    // === Access with a strong positive emotion ===
    println!("--- Accessing episode_001 (breakthrough moment) ---");
    let emotion = EmotionalState::new(0.9, 0.8, 0.2, 0.7, 0.1, 0.1, 0.1, 0.85);
    println!(
        "  Source emotion: intensity {:.2}, valence {:+.2}",
        emotion.intensity(),
        emotion.valence()
    );

    let outcome = engine.on_access(
        "episode_001",
        "finally fixed the solver convergence".to_string(),
        emotion,
        &AttentionInputs::new(0.9, 0.8),
        &graph,
    );
    println!("  Attention score: {:.3}", outcome.attention_score);
    println!("  Overlays created:");
    for overlay in &outcome.overlays {
        println!(
            "    {} <- {} (intensity {:.3}, {} hop(s))",
            overlay.episode_id, overlay.source_episode_id, overlay.intensity, overlay.hop_distance
        );
    }
    println!();

    // === Biased retrieval ===
    println!("--- Retrieval with a congruent positive query ---");
    let query = EmotionalState::new(0.8, 0.75, 0.3, 0.6, 0.2, 0.2, 0.2, 0.7);
    let candidates = vec![
        ("episode_001".to_string(), 0.90),
        ("episode_002".to_string(), 0.70),
        ("episode_003".to_string(), 0.65),
        ("episode_004".to_string(), 0.60),
        ("episode_999".to_string(), 0.75),
    ];

    let ranked = engine.adjust_candidates(&candidates, &query);
    for candidate in &ranked {
        let marker = if candidate.was_adjusted() { "boosted" } else { "       " };
        println!(
            "  {} {}  base {:.2} -> {:.3}",
            marker, candidate.id, candidate.base_score, candidate.score
        );
    }
    println!();

    // === Decay over time ===
    println!("--- Four hours later (one half-life) ---");
    clock.advance_ms(4 * 3_600_000);
    let removed = engine.decay();
    let stats = engine.stats();
    println!("  Overlays removed: {removed}");
    println!(
        "  Remaining: {} (mean intensity {:.3})",
        stats.contagion.total_overlays, stats.contagion.mean_intensity
    );
    println!(
        "  Working set: {}/{} items",
        stats.working_memory.len, stats.working_memory.capacity
    );
}
