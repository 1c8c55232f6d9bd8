//! `TigerStyle` Constants
//!
//! All limits use big-endian naming: `CATEGORY_SPECIFICS_UNIT_LIMIT`
//! Example: `WORKING_MEMORY_CAPACITY_COUNT_MAX` (not `MAX_CAPACITY`)
//!
//! Every constant includes units in the name:
//! - _MS for milliseconds
//! - _`COUNT_MAX` for quantity limits
//! - _DEFAULT for configurable defaults

// =============================================================================
// Emotional State
// =============================================================================

/// Number of components in an emotional state vector
pub const EMOTION_DIMENSIONS_COUNT: usize = 8;

/// Minimum value of a single emotion component
pub const EMOTION_COMPONENT_MIN: f64 = 0.0;

/// Maximum value of a single emotion component
pub const EMOTION_COMPONENT_MAX: f64 = 1.0;

/// Norm below which an emotion vector is treated as neutral for congruence
pub const EMOTION_NORM_EPSILON: f64 = 1e-8;

// =============================================================================
// Working Memory Limits
// =============================================================================

/// Default buffer capacity (Miller's law)
pub const WORKING_MEMORY_CAPACITY_DEFAULT: usize = 7;

/// Maximum configurable buffer capacity
pub const WORKING_MEMORY_CAPACITY_COUNT_MAX: usize = 10_000;

/// Default eviction weight for the attention term
pub const WORKING_MEMORY_WEIGHT_ATTENTION_DEFAULT: f64 = 1.0 / 3.0;

/// Default eviction weight for the recency term
pub const WORKING_MEMORY_WEIGHT_RECENCY_DEFAULT: f64 = 1.0 / 3.0;

/// Default eviction weight for the residual emotional intensity term
pub const WORKING_MEMORY_WEIGHT_EMOTION_DEFAULT: f64 = 1.0 / 3.0;

/// Tolerance when checking that eviction weights sum to 1.0
pub const WORKING_MEMORY_WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Default half-life for recency and residual-emotion decay (60 seconds)
pub const WORKING_MEMORY_RECENCY_HALFLIFE_MS_DEFAULT: u64 = 60 * TIME_MS_PER_SEC;

/// Maximum length of an item id
pub const WORKING_MEMORY_ITEM_ID_BYTES_MAX: usize = 256;

// =============================================================================
// Attention Limits
// =============================================================================

/// Default weight for the top-down (goal relevance) term
pub const ATTENTION_WEIGHT_GOAL_DEFAULT: f64 = 0.6;

/// Default weight for the bottom-up (novelty) term
pub const ATTENTION_WEIGHT_NOVELTY_DEFAULT: f64 = 0.4;

/// Tolerance when checking that attention weights sum to 1.0
pub const ATTENTION_WEIGHT_SUM_TOLERANCE: f64 = 0.01;

/// Default filter threshold for attention scores
pub const ATTENTION_THRESHOLD_DEFAULT: f64 = 0.1;

/// Minimum attention score
pub const ATTENTION_SCORE_MIN: f64 = 0.0;

/// Maximum attention score
pub const ATTENTION_SCORE_MAX: f64 = 1.0;

/// Default repetition count at which novelty has halved
pub const ATTENTION_NOVELTY_HALVING_REPETITIONS_DEFAULT: f64 = 2.0;

// =============================================================================
// Contagion Limits
// =============================================================================

/// Default minimum edge similarity for spreading
pub const CONTAGION_SIMILARITY_THRESHOLD_DEFAULT: f64 = 0.7;

/// Default maximum semantic distance for spreading
pub const CONTAGION_MAX_HOPS_DEFAULT: u32 = 2;

/// Maximum configurable hop count
pub const CONTAGION_MAX_HOPS_COUNT_MAX: u32 = 16;

/// Default minimum intensity to keep spreading from a node
pub const CONTAGION_INTENSITY_THRESHOLD_DEFAULT: f64 = 0.6;

/// Default per-hop multiplicative decay factor
pub const CONTAGION_HOP_DECAY_FACTOR_DEFAULT: f64 = 0.95;

/// Default half-life for overlay time decay (4 hours)
pub const CONTAGION_TIME_DECAY_HALFLIFE_MS_DEFAULT: u64 = 4 * TIME_MS_PER_HOUR;

/// Default maximum overlay lifetime (24 hours)
pub const CONTAGION_OVERLAY_TTL_MS_DEFAULT: u64 = 24 * TIME_MS_PER_HOUR;

// =============================================================================
// Retrieval Bias Limits
// =============================================================================

/// Default boost weight applied to congruence x intensity
pub const RETRIEVAL_BIAS_BOOST_WEIGHT_DEFAULT: f64 = 0.3;

/// Maximum configurable boost weight
pub const RETRIEVAL_BIAS_BOOST_WEIGHT_MAX: f64 = 10.0;

/// Default cap on the score multiplier (base score at most doubled)
pub const RETRIEVAL_BIAS_MULTIPLIER_MAX_DEFAULT: f64 = 2.0;

/// Minimum retrieval score
pub const RETRIEVAL_SCORE_MIN: f64 = 0.0;

/// Maximum retrieval score
pub const RETRIEVAL_SCORE_MAX: f64 = 1.0;

// =============================================================================
// DST (Deterministic Simulation Testing) Limits
// =============================================================================

/// Maximum number of simulation steps
pub const DST_SIMULATION_STEPS_MAX: u64 = 1_000_000;

/// Maximum time advance per step in milliseconds
pub const DST_TIME_ADVANCE_MS_MAX: u64 = 86_400_000; // 24 hours

// =============================================================================
// Time Constants
// =============================================================================

/// Milliseconds per second
pub const TIME_MS_PER_SEC: u64 = 1000;

/// Milliseconds per minute
pub const TIME_MS_PER_MIN: u64 = 60 * TIME_MS_PER_SEC;

/// Milliseconds per hour
pub const TIME_MS_PER_HOUR: u64 = 60 * TIME_MS_PER_MIN;

/// Milliseconds per day
pub const TIME_MS_PER_DAY: u64 = 24 * TIME_MS_PER_HOUR;

// =============================================================================
// Tests
// =============================================================================
