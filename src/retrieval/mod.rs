//! Retrieval Bias - Congruence-Weighted Score Adjustment
//!
//! `TigerStyle`: Pure read, bounded boosts, graceful pass-through.
//!
//! Rescales externally supplied candidate relevance scores using active
//! contagion overlays and a query emotion. Candidates without an overlay
//! pass through bit-identical; no candidate is ever added or dropped, and
//! input order is preserved (callers re-sort if they want ranking by the
//! adjusted score).

use serde::Serialize;

use crate::affect::EmotionalState;
use crate::constants::{
    RETRIEVAL_BIAS_BOOST_WEIGHT_DEFAULT, RETRIEVAL_BIAS_BOOST_WEIGHT_MAX,
    RETRIEVAL_BIAS_MULTIPLIER_MAX_DEFAULT, RETRIEVAL_SCORE_MAX, RETRIEVAL_SCORE_MIN,
};
use crate::contagion::ContagionPropagator;

// =============================================================================
// Error Types
// =============================================================================

/// Errors from retrieval bias configuration.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RetrievalError {
    /// A configured value is outside its valid range
    #[error("invalid configuration: {field} = {value} outside [{min}, {max}]")]
    InvalidConfiguration {
        /// Name of the offending field
        field: &'static str,
        /// Provided value
        value: f64,
        /// Minimum allowed
        min: f64,
        /// Maximum allowed
        max: f64,
    },
}

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for retrieval score adjustment.
///
/// `TigerStyle`: All fields public, builder methods, validated once.
#[derive(Debug, Clone)]
pub struct RetrievalBiasConfig {
    /// Weight applied to `congruence * intensity` in the multiplier
    pub boost_weight: f64,
    /// Cap on the score multiplier (1.0 disables boosting entirely)
    pub max_multiplier: f64,
}

impl Default for RetrievalBiasConfig {
    fn default() -> Self {
        Self {
            boost_weight: RETRIEVAL_BIAS_BOOST_WEIGHT_DEFAULT,
            max_multiplier: RETRIEVAL_BIAS_MULTIPLIER_MAX_DEFAULT,
        }
    }
}

impl RetrievalBiasConfig {
    /// Create a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the boost weight.
    #[must_use]
    pub fn with_boost_weight(mut self, boost_weight: f64) -> Self {
        self.boost_weight = boost_weight;
        self
    }

    /// Set the multiplier cap.
    #[must_use]
    pub fn with_max_multiplier(mut self, max_multiplier: f64) -> Self {
        self.max_multiplier = max_multiplier;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    /// Returns [`RetrievalError::InvalidConfiguration`] if the boost weight
    /// is negative or above the maximum, or the multiplier cap is below 1.
    pub fn validate(&self) -> Result<(), RetrievalError> {
        if !self.boost_weight.is_finite()
            || !(0.0..=RETRIEVAL_BIAS_BOOST_WEIGHT_MAX).contains(&self.boost_weight)
        {
            return Err(RetrievalError::InvalidConfiguration {
                field: "boost_weight",
                value: self.boost_weight,
                min: 0.0,
                max: RETRIEVAL_BIAS_BOOST_WEIGHT_MAX,
            });
        }
        if !self.max_multiplier.is_finite() || self.max_multiplier < 1.0 {
            return Err(RetrievalError::InvalidConfiguration {
                field: "max_multiplier",
                value: self.max_multiplier,
                min: 1.0,
                max: f64::INFINITY,
            });
        }
        Ok(())
    }
}

// =============================================================================
// Result Types
// =============================================================================

/// One candidate after bias adjustment.
#[derive(Debug, Clone, Serialize)]
pub struct AdjustedCandidate {
    /// Candidate item id
    pub id: String,
    /// Score as supplied by the upstream ranker (clamped to [0, 1])
    pub base_score: f64,
    /// Score after contagion bias, in [0, 1]
    pub score: f64,
}

impl AdjustedCandidate {
    /// Whether the bias changed this candidate's score.
    #[must_use]
    pub fn was_adjusted(&self) -> bool {
        (self.score - self.base_score).abs() > f64::EPSILON
    }
}

// =============================================================================
// RetrievalBiasAdjuster
// =============================================================================

/// Thin read-only seam over the propagator's overlay table.
///
/// Callers that should not depend on [`ContagionPropagator`] internals use
/// this wrapper; it exposes only score adjustment.
///
/// # Example
///
/// ```
/// use affect_memory::affect::EmotionalState;
/// use affect_memory::contagion::{ContagionPropagator, SimilarityGraph};
/// use affect_memory::dst::SimClock;
/// use affect_memory::retrieval::{RetrievalBiasAdjuster, RetrievalBiasConfig};
///
/// let mut propagator = ContagionPropagator::new(SimClock::new());
/// let mut graph = SimilarityGraph::new();
/// graph.add_undirected("ep-1", "ep-2", 0.85);
/// let strong = EmotionalState::new(0.9, 0.8, 0.2, 0.7, 0.1, 0.1, 0.1, 0.85);
/// propagator.on_episode_access("ep-1", &strong, &graph);
///
/// let adjuster =
///     RetrievalBiasAdjuster::new(&propagator, RetrievalBiasConfig::default()).unwrap();
/// let adjusted = adjuster.adjust(&[("ep-2".to_string(), 0.7)], &strong);
/// assert!(adjusted[0].score > 0.7);
/// ```
#[derive(Debug)]
pub struct RetrievalBiasAdjuster<'a> {
    propagator: &'a ContagionPropagator,
    config: RetrievalBiasConfig,
}

impl<'a> RetrievalBiasAdjuster<'a> {
    /// Create an adjuster over a propagator with a validated configuration.
    ///
    /// # Errors
    /// Returns [`RetrievalError::InvalidConfiguration`] if the config is
    /// out of range.
    pub fn new(
        propagator: &'a ContagionPropagator,
        config: RetrievalBiasConfig,
    ) -> Result<Self, RetrievalError> {
        config.validate()?;
        Ok(Self { propagator, config })
    }

    /// Crate-internal constructor for configs validated elsewhere.
    pub(crate) fn new_unchecked(
        propagator: &'a ContagionPropagator,
        config: RetrievalBiasConfig,
    ) -> Self {
        debug_assert!(config.validate().is_ok(), "config must be pre-validated");
        Self { propagator, config }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &RetrievalBiasConfig {
        &self.config
    }

    /// Rescale candidate scores by overlay congruence with the query
    /// emotion.
    ///
    /// For each candidate holding an active overlay:
    ///
    /// ```text
    /// adjusted = clamp01(base * clamp(1 + boost_weight * congruence * intensity,
    ///                                 0, max_multiplier))
    /// ```
    ///
    /// Candidates without an overlay are returned unchanged. The output
    /// contains exactly the input candidates, in input order.
    #[must_use]
    pub fn adjust(
        &self,
        candidates: &[(String, f64)],
        query_emotion: &EmotionalState,
    ) -> Vec<AdjustedCandidate> {
        let adjusted: Vec<AdjustedCandidate> = candidates
            .iter()
            .map(|(id, base)| self.adjust_one(id, *base, query_emotion))
            .collect();

        // Postcondition: the candidate set is preserved
        debug_assert_eq!(adjusted.len(), candidates.len());
        adjusted
    }

    fn adjust_one(&self, id: &str, base: f64, query_emotion: &EmotionalState) -> AdjustedCandidate {
        let base_score = clamp_base_score(base);

        let Some((overlay_emotion, intensity)) = self.propagator.effective_overlay(id) else {
            // The safe default: absence of an overlay leaves the upstream
            // score untouched
            return AdjustedCandidate {
                id: id.to_string(),
                base_score,
                score: base_score,
            };
        };

        let congruence = overlay_emotion.congruence(query_emotion);
        let multiplier = (1.0 + self.config.boost_weight * congruence * intensity)
            .clamp(0.0, self.config.max_multiplier);
        let score = (base_score * multiplier).clamp(RETRIEVAL_SCORE_MIN, RETRIEVAL_SCORE_MAX);

        // Postcondition
        debug_assert!((0.0..=1.0).contains(&score), "adjusted score out of range");

        AdjustedCandidate {
            id: id.to_string(),
            base_score,
            score,
        }
    }
}

fn clamp_base_score(value: f64) -> f64 {
    if !value.is_finite() {
        tracing::debug!(value, "non-finite base score, using 0.0");
        return 0.0;
    }
    if !(RETRIEVAL_SCORE_MIN..=RETRIEVAL_SCORE_MAX).contains(&value) {
        tracing::debug!(value, "base score outside [0, 1], clamping");
    }
    value.clamp(RETRIEVAL_SCORE_MIN, RETRIEVAL_SCORE_MAX)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contagion::{ContagionConfig, SimilarityGraph};
    use crate::dst::SimClock;

    fn strong_positive() -> EmotionalState {
        EmotionalState::new(0.9, 0.8, 0.2, 0.7, 0.1, 0.1, 0.1, 0.85)
    }

    fn positive_query() -> EmotionalState {
        EmotionalState::new(0.8, 0.75, 0.3, 0.6, 0.2, 0.2, 0.2, 0.7)
    }

    /// Propagator pre-loaded with overlays on episodes 002-004.
    fn seeded_propagator() -> ContagionPropagator {
        let mut propagator = ContagionPropagator::new(SimClock::new());
        let mut graph = SimilarityGraph::new();
        graph.add_undirected("episode_001", "episode_002", 0.85);
        graph.add_undirected("episode_001", "episode_003", 0.75);
        graph.add_undirected("episode_002", "episode_004", 0.80);
        propagator.on_episode_access("episode_001", &strong_positive(), &graph);
        propagator
    }

    #[test]
    fn test_congruent_overlays_boost_scores() {
        let propagator = seeded_propagator();
        let adjuster =
            RetrievalBiasAdjuster::new(&propagator, RetrievalBiasConfig::default()).unwrap();

        let candidates = vec![
            ("episode_001".to_string(), 0.90),
            ("episode_002".to_string(), 0.70),
            ("episode_003".to_string(), 0.65),
            ("episode_004".to_string(), 0.60),
            ("episode_999".to_string(), 0.75),
        ];

        let adjusted = adjuster.adjust(&candidates, &positive_query());

        // Overlaid candidates get a strictly positive boost
        for id in ["episode_002", "episode_003", "episode_004"] {
            let candidate = adjusted.iter().find(|c| c.id == id).unwrap();
            assert!(candidate.score > candidate.base_score, "{id} not boosted");
        }

        // No overlay: returned exactly unchanged
        let control = adjusted.iter().find(|c| c.id == "episode_999").unwrap();
        assert_eq!(control.score, 0.75);
        assert!(!control.was_adjusted());

        // The source has no overlay either
        let source = adjusted.iter().find(|c| c.id == "episode_001").unwrap();
        assert_eq!(source.score, 0.90);
    }

    #[test]
    fn test_output_preserves_input_order_and_set() {
        let propagator = seeded_propagator();
        let adjuster =
            RetrievalBiasAdjuster::new(&propagator, RetrievalBiasConfig::default()).unwrap();

        let candidates = vec![
            ("episode_004".to_string(), 0.60),
            ("episode_999".to_string(), 0.75),
            ("episode_002".to_string(), 0.70),
        ];

        let adjusted = adjuster.adjust(&candidates, &positive_query());
        let ids: Vec<&str> = adjusted.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["episode_004", "episode_999", "episode_002"]);
    }

    #[test]
    fn test_adjusted_scores_clamped_to_one() {
        let propagator = seeded_propagator();
        let config = RetrievalBiasConfig::default().with_boost_weight(10.0);
        let adjuster = RetrievalBiasAdjuster::new(&propagator, config).unwrap();

        let adjusted = adjuster.adjust(
            &[("episode_002".to_string(), 0.95)],
            &positive_query(),
        );
        assert!(adjusted[0].score <= 1.0);
    }

    #[test]
    fn test_multiplier_cap_bounds_boost() {
        let propagator = seeded_propagator();
        let config = RetrievalBiasConfig::default()
            .with_boost_weight(10.0)
            .with_max_multiplier(1.5);
        let adjuster = RetrievalBiasAdjuster::new(&propagator, config).unwrap();

        let adjusted = adjuster.adjust(
            &[("episode_002".to_string(), 0.4)],
            &positive_query(),
        );
        assert!(adjusted[0].score <= 0.4 * 1.5 + 1e-12);
    }

    #[test]
    fn test_neutral_query_leaves_scores_unchanged() {
        let propagator = seeded_propagator();
        let adjuster =
            RetrievalBiasAdjuster::new(&propagator, RetrievalBiasConfig::default()).unwrap();

        let adjusted = adjuster.adjust(
            &[("episode_002".to_string(), 0.7)],
            &EmotionalState::neutral(),
        );
        // Zero congruence against a neutral query: multiplier is exactly 1
        assert_eq!(adjusted[0].score, 0.7);
    }

    #[test]
    fn test_base_scores_clamped() {
        let propagator = seeded_propagator();
        let adjuster =
            RetrievalBiasAdjuster::new(&propagator, RetrievalBiasConfig::default()).unwrap();

        let adjusted = adjuster.adjust(
            &[
                ("episode_999".to_string(), 1.7),
                ("episode_998".to_string(), -0.3),
            ],
            &positive_query(),
        );
        assert_eq!(adjusted[0].base_score, 1.0);
        assert_eq!(adjusted[1].base_score, 0.0);
    }

    #[test]
    fn test_empty_candidates() {
        let propagator = seeded_propagator();
        let adjuster =
            RetrievalBiasAdjuster::new(&propagator, RetrievalBiasConfig::default()).unwrap();
        assert!(adjuster.adjust(&[], &positive_query()).is_empty());
    }

    #[test]
    fn test_decayed_overlay_stops_boosting() {
        let clock = SimClock::new();
        let mut propagator = ContagionPropagator::with_config(
            ContagionConfig::default(),
            clock.clone(),
        )
        .unwrap();
        let mut graph = SimilarityGraph::new();
        graph.add_undirected("episode_001", "episode_002", 0.85);
        propagator.on_episode_access("episode_001", &strong_positive(), &graph);

        // Far past any residual intensity
        clock.advance_ms(24 * 3_600_000);

        let adjuster =
            RetrievalBiasAdjuster::new(&propagator, RetrievalBiasConfig::default()).unwrap();
        let adjusted = adjuster.adjust(&[("episode_002".to_string(), 0.7)], &positive_query());
        assert_eq!(adjusted[0].score, 0.7);
    }

    #[test]
    fn test_invalid_configurations_rejected() {
        let propagator = seeded_propagator();

        let negative_boost = RetrievalBiasConfig::default().with_boost_weight(-0.5);
        assert!(RetrievalBiasAdjuster::new(&propagator, negative_boost).is_err());

        let tiny_cap = RetrievalBiasConfig::default().with_max_multiplier(0.5);
        assert!(RetrievalBiasAdjuster::new(&propagator, tiny_cap).is_err());
    }
}
