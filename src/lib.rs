//! # Affect Memory
//!
//! A bounded working-set of recently attended memory items, combined with
//! graph propagation of affective signal and retrieval-time score biasing.
//! Deterministic by construction: every time-dependent behavior runs
//! against an explicit clock, so whole scenarios replay exactly.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                     AffectEngine                        │
//! ├─────────────────────────────────────────────────────────┤
//! │  AttentionScorer  │ WorkingMemoryBuffer │ Contagion     │
//! │  (top-down +      │ (capacity K,        │ Propagator    │
//! │   bottom-up)      │  composite evict)   │ (BFS + decay) │
//! ├─────────────────────────────────────────────────────────┤
//! │  RetrievalBiasAdjuster   │ overlay congruence x query   │
//! ├─────────────────────────────────────────────────────────┤
//! │  DST Framework           │ SimClock + seeded RNG        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use affect_memory::affect::EmotionalState;
//! use affect_memory::attention::AttentionInputs;
//! use affect_memory::contagion::SimilarityGraph;
//! use affect_memory::dst::SimClock;
//! use affect_memory::engine::AffectEngine;
//!
//! let clock = SimClock::new();
//! let mut engine: AffectEngine<String> = AffectEngine::new(clock.clone());
//!
//! // Similarity graph supplied by an upstream semantic service
//! let mut graph = SimilarityGraph::new();
//! graph.add_undirected("episode_001", "episode_002", 0.85);
//!
//! // An access event spreads its emotion across related episodes
//! let emotion = EmotionalState::new(0.9, 0.8, 0.2, 0.7, 0.1, 0.1, 0.1, 0.85);
//! let outcome = engine.on_access(
//!     "episode_001",
//!     "breakthrough moment".to_string(),
//!     emotion,
//!     &AttentionInputs::new(0.9, 0.8),
//!     &graph,
//! );
//! assert_eq!(outcome.overlays.len(), 1);
//!
//! // Later retrieval is biased toward emotionally congruent episodes
//! let candidates = vec![("episode_002".to_string(), 0.70)];
//! let ranked = engine.adjust_candidates(&candidates, &emotion);
//! assert!(ranked[0].score > 0.70);
//! ```
//!
//! ## Concurrency
//!
//! The core is computation-only: no I/O, no suspension points, no internal
//! locking. Mutating operations take `&mut self`; a host sharing one
//! engine across threads wraps it in its own mutex and gets a consistent
//! view by taking reads under the same lock.
//!
//! ## Determinism
//!
//! Eviction, propagation, merging, and ranking are deterministic functions
//! of their inputs and the clock, including output ordering. The [`dst`]
//! module provides the simulated clock, seeded RNG, and property-test
//! harness used throughout the test suite.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod affect;
pub mod attention;
pub mod constants;
pub mod contagion;
pub mod dst;
pub mod engine;
pub mod memory;
pub mod retrieval;

// Re-export common types
pub use affect::EmotionalState;
pub use attention::{
    AttentionConfig, AttentionError, AttentionInputs, AttentionScorer, NoveltyEstimator,
    RepetitionNovelty,
};
pub use contagion::{
    ContagionConfig, ContagionError, ContagionOverlay, ContagionPropagator, ContagionStats,
    SimilarityGraph,
};
pub use dst::{DeterministicRng, SimClock, SimConfig};
pub use engine::{AccessOutcome, AffectEngine, EngineConfig, EngineError, EngineStats};
pub use memory::{
    WorkingMemoryBuffer, WorkingMemoryConfig, WorkingMemoryError, WorkingMemoryItem,
    WorkingMemoryStats,
};
pub use retrieval::{
    AdjustedCandidate, RetrievalBiasAdjuster, RetrievalBiasConfig, RetrievalError,
};
