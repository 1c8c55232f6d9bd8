//! Affect Engine - Main Interface
//!
//! `TigerStyle`: One owned orchestrator, explicit lifecycle, no ambient
//! state.
//!
//! # Overview
//!
//! The engine wires the components into the access/retrieval control flow:
//!
//! ```text
//! on_access(id, content, emotion, attention inputs, graph)
//!   ├── AttentionScorer       → attention score
//!   ├── WorkingMemoryBuffer   → insert (maybe evict)
//!   └── ContagionPropagator   → spread emotion, update overlays
//!
//! adjust_candidates(candidates, query emotion)
//!   └── RetrievalBiasAdjuster → rescored candidates, ranked
//! ```
//!
//! The engine is computation-only and synchronous. Mutating operations
//! take `&mut self`; a host sharing one engine across threads serializes
//! them under its own lock (the engine holds none).
//!
//! # Example
//!
//! ```
//! use affect_memory::affect::EmotionalState;
//! use affect_memory::attention::AttentionInputs;
//! use affect_memory::contagion::SimilarityGraph;
//! use affect_memory::dst::SimClock;
//! use affect_memory::engine::AffectEngine;
//!
//! let mut engine: AffectEngine<&str> = AffectEngine::new(SimClock::new());
//!
//! let mut graph = SimilarityGraph::new();
//! graph.add_undirected("ep-1", "ep-2", 0.85);
//!
//! let emotion = EmotionalState::new(0.9, 0.8, 0.2, 0.7, 0.1, 0.1, 0.1, 0.85);
//! let outcome = engine.on_access("ep-1", "content", emotion, &AttentionInputs::new(0.9, 0.8), &graph);
//! assert!(outcome.attention_score > 0.0);
//! assert_eq!(outcome.overlays.len(), 1);
//! ```

mod config;

pub use config::EngineConfig;

use serde::Serialize;

use crate::affect::EmotionalState;
use crate::attention::{AttentionError, AttentionInputs, AttentionScorer};
use crate::contagion::{
    ContagionError, ContagionOverlay, ContagionPropagator, ContagionStats, SimilarityGraph,
};
use crate::dst::SimClock;
use crate::memory::{
    WorkingMemoryBuffer, WorkingMemoryError, WorkingMemoryItem, WorkingMemoryStats,
};
use crate::retrieval::{
    AdjustedCandidate, RetrievalBiasAdjuster, RetrievalBiasConfig, RetrievalError,
};

// =============================================================================
// Error Types
// =============================================================================

/// Errors from engine construction and operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    /// Working memory configuration or operation error
    #[error(transparent)]
    WorkingMemory(#[from] WorkingMemoryError),

    /// Attention configuration error
    #[error(transparent)]
    Attention(#[from] AttentionError),

    /// Contagion configuration error
    #[error(transparent)]
    Contagion(#[from] ContagionError),

    /// Retrieval bias configuration error
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),
}

// =============================================================================
// Result Types
// =============================================================================

/// Outcome of one access event.
#[derive(Debug, Clone)]
pub struct AccessOutcome {
    /// Attention score computed for the accessed item
    pub attention_score: f64,
    /// Id of the item evicted to admit this one, if any
    pub evicted: Option<String>,
    /// Overlays created or updated by the contagion pass
    pub overlays: Vec<ContagionOverlay>,
}

/// Aggregate engine statistics.
#[derive(Debug, Clone, Serialize)]
pub struct EngineStats {
    /// Working memory summary
    pub working_memory: WorkingMemoryStats,
    /// Contagion summary
    pub contagion: ContagionStats,
}

// =============================================================================
// AffectEngine
// =============================================================================

/// Orchestrates attention scoring, the working set, and emotional
/// contagion behind one call surface.
///
/// Generic over `C`, the caller-owned content handle stored alongside each
/// working memory item.
#[derive(Debug)]
pub struct AffectEngine<C> {
    scorer: AttentionScorer,
    buffer: WorkingMemoryBuffer<C>,
    propagator: ContagionPropagator,
    bias: RetrievalBiasConfig,
}

impl<C> AffectEngine<C> {
    /// Create an engine with default configuration.
    #[must_use]
    pub fn new(clock: SimClock) -> Self {
        Self {
            scorer: AttentionScorer::new(),
            buffer: WorkingMemoryBuffer::new(clock.clone()),
            propagator: ContagionPropagator::new(clock),
            bias: RetrievalBiasConfig::default(),
        }
    }

    /// Create an engine with a validated configuration.
    ///
    /// # Errors
    /// Returns the first component's `InvalidConfiguration` error. A
    /// rejected configuration constructs nothing: there is no partially
    /// initialized engine.
    pub fn with_config(config: EngineConfig, clock: SimClock) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self {
            scorer: AttentionScorer::with_config(config.attention)?,
            buffer: WorkingMemoryBuffer::with_config(config.working_memory, clock.clone())?,
            propagator: ContagionPropagator::with_config(config.contagion, clock)?,
            bias: config.bias,
        })
    }

    /// Handle one access event: score, insert, propagate.
    #[tracing::instrument(skip(self, content, emotion, inputs, graph))]
    pub fn on_access(
        &mut self,
        id: &str,
        content: C,
        emotion: EmotionalState,
        inputs: &AttentionInputs,
        graph: &SimilarityGraph,
    ) -> AccessOutcome {
        let attention_score = self.scorer.score(inputs);
        let evicted = self.buffer.insert(id, content, attention_score, emotion);
        let overlays = self.propagator.on_episode_access(id, &emotion, graph);

        AccessOutcome {
            attention_score,
            evicted,
            overlays,
        }
    }

    /// Update an item's last-access timestamp.
    ///
    /// # Errors
    /// Returns [`WorkingMemoryError::NotFound`] (non-fatal) for unknown
    /// ids.
    pub fn touch(&mut self, id: &str) -> Result<(), WorkingMemoryError> {
        self.buffer.touch(id)
    }

    /// Ordered view of the working set, most recently touched first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<&WorkingMemoryItem<C>> {
        self.buffer.snapshot()
    }

    /// Age all overlays to the current clock reading.
    ///
    /// Idempotent at a fixed clock. Returns the number of overlays removed.
    pub fn decay(&mut self) -> usize {
        self.propagator.decay_overlays()
    }

    /// Rescale retrieval candidates by overlay congruence with the query
    /// emotion, ranked by adjusted score descending (ties by id for a
    /// total order).
    #[must_use]
    pub fn adjust_candidates(
        &self,
        candidates: &[(String, f64)],
        query_emotion: &EmotionalState,
    ) -> Vec<AdjustedCandidate> {
        let adjuster = RetrievalBiasAdjuster::new_unchecked(&self.propagator, self.bias.clone());
        let mut adjusted = adjuster.adjust(candidates, query_emotion);
        adjusted.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        adjusted
    }

    /// Direct access to the working memory buffer.
    #[must_use]
    pub fn working_memory(&self) -> &WorkingMemoryBuffer<C> {
        &self.buffer
    }

    /// Direct access to the contagion propagator.
    #[must_use]
    pub fn propagator(&self) -> &ContagionPropagator {
        &self.propagator
    }

    /// Read-only aggregate statistics.
    #[must_use]
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            working_memory: self.buffer.stats(),
            contagion: self.propagator.stats(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
