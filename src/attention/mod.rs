//! Attention Scoring - Top-Down + Bottom-Up Salience
//!
//! `TigerStyle`: Deterministic weighted combination, no hidden state.
//!
//! The scorer combines an explicit goal-relevance term (top-down, supplied
//! by the caller) with a novelty term (bottom-up, supplied directly or
//! derived from repetition counts via a [`NoveltyEstimator`]). Output is
//! always clamped to [0, 1].

use serde::{Deserialize, Serialize};

use crate::constants::{
    ATTENTION_NOVELTY_HALVING_REPETITIONS_DEFAULT, ATTENTION_SCORE_MAX, ATTENTION_SCORE_MIN,
    ATTENTION_THRESHOLD_DEFAULT, ATTENTION_WEIGHT_GOAL_DEFAULT, ATTENTION_WEIGHT_NOVELTY_DEFAULT,
    ATTENTION_WEIGHT_SUM_TOLERANCE,
};

// =============================================================================
// Error Types
// =============================================================================

/// Errors from attention configuration.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AttentionError {
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

/// Configuration for the attention scorer.
///
/// `TigerStyle`: All fields public, builder methods, validated once.
#[derive(Debug, Clone)]
pub struct AttentionConfig {
    /// Weight of the top-down (goal relevance) term
    pub goal_weight: f64,
    /// Weight of the bottom-up (novelty) term
    pub novelty_weight: f64,
    /// Default threshold used by [`AttentionScorer::filter`] callers
    pub threshold: f64,
}

impl Default for AttentionConfig {
    fn default() -> Self {
        Self {
            goal_weight: ATTENTION_WEIGHT_GOAL_DEFAULT,
            novelty_weight: ATTENTION_WEIGHT_NOVELTY_DEFAULT,
            threshold: ATTENTION_THRESHOLD_DEFAULT,
        }
    }
}

impl AttentionConfig {
    /// Create a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both term weights.
    #[must_use]
    pub fn with_weights(mut self, goal_weight: f64, novelty_weight: f64) -> Self {
        self.goal_weight = goal_weight;
        self.novelty_weight = novelty_weight;
        self
    }

    /// Set the default filter threshold.
    #[must_use]
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    /// Returns [`AttentionError::InvalidConfiguration`] if any weight is
    /// negative, the weights do not sum to ~1.0, or the threshold is
    /// outside [0, 1].
    pub fn validate(&self) -> Result<(), AttentionError> {
        if !(0.0..=1.0).contains(&self.goal_weight) || !self.goal_weight.is_finite() {
            return Err(AttentionError::InvalidConfiguration {
                field: "goal_weight",
                value: self.goal_weight,
                min: 0.0,
                max: 1.0,
            });
        }
        if !(0.0..=1.0).contains(&self.novelty_weight) || !self.novelty_weight.is_finite() {
            return Err(AttentionError::InvalidConfiguration {
                field: "novelty_weight",
                value: self.novelty_weight,
                min: 0.0,
                max: 1.0,
            });
        }
        let sum = self.goal_weight + self.novelty_weight;
        if (sum - 1.0).abs() > ATTENTION_WEIGHT_SUM_TOLERANCE {
            return Err(AttentionError::InvalidConfiguration {
                field: "goal_weight + novelty_weight",
                value: sum,
                min: 1.0 - ATTENTION_WEIGHT_SUM_TOLERANCE,
                max: 1.0 + ATTENTION_WEIGHT_SUM_TOLERANCE,
            });
        }
        if !(0.0..=1.0).contains(&self.threshold) || !self.threshold.is_finite() {
            return Err(AttentionError::InvalidConfiguration {
                field: "threshold",
                value: self.threshold,
                min: 0.0,
                max: 1.0,
            });
        }
        Ok(())
    }
}

// =============================================================================
// Inputs
// =============================================================================

/// Caller-supplied factors for one scoring decision.
///
/// Both factors are expected in [0, 1]; out-of-range values are clamped
/// (non-fatal) and debug-logged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AttentionInputs {
    /// Explicit goal/context relevance (top-down)
    pub goal_relevance: f64,
    /// Novelty/salience (bottom-up)
    pub novelty: f64,
}

impl AttentionInputs {
    /// Create inputs from the two factors.
    #[must_use]
    pub fn new(goal_relevance: f64, novelty: f64) -> Self {
        Self {
            goal_relevance,
            novelty,
        }
    }
}

// =============================================================================
// Novelty Estimation
// =============================================================================

/// Narrow capability interface for bottom-up novelty.
///
/// Any host signal (repetition counters, prediction error, etc.) enters the
/// core only as a bounded float through this seam.
pub trait NoveltyEstimator {
    /// Estimate novelty in [0, 1] from how often the item has been seen.
    fn estimate(&self, repetition_count: u64) -> f64;
}

/// Default estimator: novelty halves every `halving_repetitions` sightings.
#[derive(Debug, Clone)]
pub struct RepetitionNovelty {
    /// Repetition count at which novelty has halved
    pub halving_repetitions: f64,
}

impl RepetitionNovelty {
    /// Create an estimator with the default halving rate.
    #[must_use]
    pub fn new() -> Self {
        Self {
            halving_repetitions: ATTENTION_NOVELTY_HALVING_REPETITIONS_DEFAULT,
        }
    }
}

impl Default for RepetitionNovelty {
    fn default() -> Self {
        Self::new()
    }
}

impl NoveltyEstimator for RepetitionNovelty {
    fn estimate(&self, repetition_count: u64) -> f64 {
        debug_assert!(self.halving_repetitions > 0.0);
        #[allow(clippy::cast_precision_loss)]
        let exponent = repetition_count as f64 / self.halving_repetitions;
        let novelty = 0.5_f64.powf(exponent);

        // Postcondition
        debug_assert!((0.0..=1.0).contains(&novelty), "novelty out of range");
        novelty
    }
}

// =============================================================================
// AttentionScorer
// =============================================================================

/// Deterministic two-factor attention scorer.
///
/// # Example
///
/// ```
/// use affect_memory::attention::{AttentionConfig, AttentionInputs, AttentionScorer};
///
/// let scorer = AttentionScorer::with_config(AttentionConfig::default()).unwrap();
/// let score = scorer.score(&AttentionInputs::new(0.8, 0.5));
/// assert!(score > 0.0 && score <= 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct AttentionScorer {
    config: AttentionConfig,
}

impl AttentionScorer {
    /// Create a scorer with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: AttentionConfig::default(),
        }
    }

    /// Create a scorer with a validated configuration.
    ///
    /// # Errors
    /// Returns [`AttentionError::InvalidConfiguration`] if the config is
    /// out of range.
    pub fn with_config(config: AttentionConfig) -> Result<Self, AttentionError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &AttentionConfig {
        &self.config
    }

    /// Score a candidate from its top-down and bottom-up factors.
    ///
    /// Output is clamped to [0, 1]. No hidden state beyond the configured
    /// weights.
    #[must_use]
    pub fn score(&self, inputs: &AttentionInputs) -> f64 {
        let goal = clamp_factor("goal_relevance", inputs.goal_relevance);
        let novelty = clamp_factor("novelty", inputs.novelty);

        let score = self.config.goal_weight * goal + self.config.novelty_weight * novelty;
        let score = score.clamp(ATTENTION_SCORE_MIN, ATTENTION_SCORE_MAX);

        // Postcondition
        debug_assert!((0.0..=1.0).contains(&score), "score out of range");
        score
    }

    /// Score a candidate deriving novelty from a repetition count.
    #[must_use]
    pub fn score_with_estimator<N: NoveltyEstimator>(
        &self,
        goal_relevance: f64,
        repetition_count: u64,
        estimator: &N,
    ) -> f64 {
        let novelty = estimator.estimate(repetition_count);
        self.score(&AttentionInputs::new(goal_relevance, novelty))
    }

    /// Drop candidates scoring below `threshold`, preserving input order.
    #[must_use]
    pub fn filter<T>(&self, candidates: Vec<(T, f64)>, threshold: f64) -> Vec<(T, f64)> {
        let threshold = threshold.clamp(ATTENTION_SCORE_MIN, ATTENTION_SCORE_MAX);
        candidates
            .into_iter()
            .filter(|(_, score)| *score >= threshold)
            .collect()
    }
}

impl Default for AttentionScorer {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_factor(field: &'static str, value: f64) -> f64 {
    if !value.is_finite() {
        tracing::debug!(field, value, "non-finite attention factor, using 0.0");
        return 0.0;
    }
    if !(0.0..=1.0).contains(&value) {
        tracing::debug!(field, value, "attention factor outside [0, 1], clamping");
    }
    value.clamp(0.0, 1.0)
}

// =============================================================================
// Tests
// =============================================================================
