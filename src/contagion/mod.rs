//! Emotional Contagion - Bounded Graph Propagation with Decaying Overlays
//!
//! `TigerStyle`: Deterministic traversal, explicit bounds, graceful
//! degradation on malformed input.
//!
//! # Algorithm
//!
//! On access of an episode with sufficiently intense emotion, the
//! propagator performs a level-synchronous breadth-first expansion over an
//! externally supplied similarity graph:
//!
//! 1. Only edges with similarity >= `similarity_threshold` are traversed.
//! 2. The intensity arriving at a neighbor is
//!    `parent_intensity * hop_decay_factor * edge_similarity`.
//! 3. A node reached by several paths in the same call keeps the maximum
//!    arriving intensity and the intensity-weighted blend of arriving
//!    emotions; it is finalized at its first (shortest) hop level and never
//!    revisited, which guarantees termination on cyclic graphs.
//! 4. Nodes whose intensity falls below `intensity_threshold` stop
//!    spreading; an overlay is still kept if the arriving intensity clears
//!    the (possibly lower) floor epsilon.
//! 5. Overlays age with an exponential half-life and are dropped below the
//!    floor or past their TTL.
//!
//! Self-loops, duplicate edges, and out-of-range weights are skipped at
//! debug-log granularity; no edge can abort propagation for the rest of
//! the graph.

mod graph;
mod overlay;

pub use graph::SimilarityGraph;
pub use overlay::ContagionOverlay;

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::affect::EmotionalState;
use crate::constants::{
    CONTAGION_HOP_DECAY_FACTOR_DEFAULT, CONTAGION_INTENSITY_THRESHOLD_DEFAULT,
    CONTAGION_MAX_HOPS_COUNT_MAX, CONTAGION_MAX_HOPS_DEFAULT, CONTAGION_OVERLAY_TTL_MS_DEFAULT,
    CONTAGION_SIMILARITY_THRESHOLD_DEFAULT, CONTAGION_TIME_DECAY_HALFLIFE_MS_DEFAULT,
};
use crate::dst::SimClock;

// =============================================================================
// Error Types
// =============================================================================

/// Errors from contagion configuration.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ContagionError {
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

/// Configuration for the contagion propagator.
///
/// `TigerStyle`: All fields public, builder methods, validated once.
#[derive(Debug, Clone)]
pub struct ContagionConfig {
    /// Minimum edge similarity for spreading
    pub similarity_threshold: f64,
    /// Maximum semantic distance (hops) from the source
    pub max_hops: u32,
    /// Minimum intensity for a node to keep spreading
    pub intensity_threshold: f64,
    /// Minimum intensity for an overlay to exist; `None` means use
    /// `intensity_threshold`
    pub floor_epsilon: Option<f64>,
    /// Per-hop multiplicative decay factor, in (0, 1]
    pub hop_decay_factor: f64,
    /// Half-life of overlay time decay
    pub time_decay_halflife_ms: u64,
    /// Maximum overlay lifetime from creation
    pub overlay_ttl_ms: u64,
}

impl Default for ContagionConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: CONTAGION_SIMILARITY_THRESHOLD_DEFAULT,
            max_hops: CONTAGION_MAX_HOPS_DEFAULT,
            intensity_threshold: CONTAGION_INTENSITY_THRESHOLD_DEFAULT,
            floor_epsilon: None,
            hop_decay_factor: CONTAGION_HOP_DECAY_FACTOR_DEFAULT,
            time_decay_halflife_ms: CONTAGION_TIME_DECAY_HALFLIFE_MS_DEFAULT,
            overlay_ttl_ms: CONTAGION_OVERLAY_TTL_MS_DEFAULT,
        }
    }
}

impl ContagionConfig {
    /// Create a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the similarity threshold.
    #[must_use]
    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Set the maximum hop count.
    #[must_use]
    pub fn with_max_hops(mut self, max_hops: u32) -> Self {
        self.max_hops = max_hops;
        self
    }

    /// Set the intensity threshold.
    #[must_use]
    pub fn with_intensity_threshold(mut self, threshold: f64) -> Self {
        self.intensity_threshold = threshold;
        self
    }

    /// Set a floor epsilon distinct from the intensity threshold.
    #[must_use]
    pub fn with_floor_epsilon(mut self, epsilon: f64) -> Self {
        self.floor_epsilon = Some(epsilon);
        self
    }

    /// Set the per-hop decay factor.
    #[must_use]
    pub fn with_hop_decay_factor(mut self, factor: f64) -> Self {
        self.hop_decay_factor = factor;
        self
    }

    /// Set the time-decay half-life.
    #[must_use]
    pub fn with_time_decay_halflife_ms(mut self, halflife_ms: u64) -> Self {
        self.time_decay_halflife_ms = halflife_ms;
        self
    }

    /// Set the overlay TTL.
    #[must_use]
    pub fn with_overlay_ttl_ms(mut self, ttl_ms: u64) -> Self {
        self.overlay_ttl_ms = ttl_ms;
        self
    }

    /// Effective floor epsilon.
    #[must_use]
    pub fn floor(&self) -> f64 {
        self.floor_epsilon.unwrap_or(self.intensity_threshold)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    /// Returns [`ContagionError::InvalidConfiguration`] if any threshold or
    /// epsilon is outside [0, 1], the hop decay is outside (0, 1], the hop
    /// count is 0 or above the maximum, or a time constant is zero.
    pub fn validate(&self) -> Result<(), ContagionError> {
        for (field, value) in [
            ("similarity_threshold", self.similarity_threshold),
            ("intensity_threshold", self.intensity_threshold),
            ("floor_epsilon", self.floor()),
        ] {
            if !(0.0..=1.0).contains(&value) || !value.is_finite() {
                return Err(ContagionError::InvalidConfiguration {
                    field,
                    value,
                    min: 0.0,
                    max: 1.0,
                });
            }
        }
        if !self.hop_decay_factor.is_finite()
            || self.hop_decay_factor <= 0.0
            || self.hop_decay_factor > 1.0
        {
            return Err(ContagionError::InvalidConfiguration {
                field: "hop_decay_factor",
                value: self.hop_decay_factor,
                min: f64::MIN_POSITIVE,
                max: 1.0,
            });
        }
        if self.max_hops == 0 || self.max_hops > CONTAGION_MAX_HOPS_COUNT_MAX {
            return Err(ContagionError::InvalidConfiguration {
                field: "max_hops",
                value: f64::from(self.max_hops),
                min: 1.0,
                max: f64::from(CONTAGION_MAX_HOPS_COUNT_MAX),
            });
        }
        if self.time_decay_halflife_ms == 0 {
            return Err(ContagionError::InvalidConfiguration {
                field: "time_decay_halflife_ms",
                value: 0.0,
                min: 1.0,
                max: f64::INFINITY,
            });
        }
        if self.overlay_ttl_ms == 0 {
            return Err(ContagionError::InvalidConfiguration {
                field: "overlay_ttl_ms",
                value: 0.0,
                min: 1.0,
                max: f64::INFINITY,
            });
        }
        Ok(())
    }
}

// =============================================================================
// Stats
// =============================================================================

/// Read-only summary of overlay state.
///
/// Intensities are effective values (time decay applied) at the current
/// clock reading.
#[derive(Debug, Clone, Serialize)]
pub struct ContagionStats {
    /// Number of distinct nodes carrying an active overlay
    pub episodes_affected: usize,
    /// Total active overlays (one per affected node)
    pub total_overlays: usize,
    /// Mean effective residual intensity (0.0 when no overlays)
    pub mean_intensity: f64,
}

// =============================================================================
// Propagator
// =============================================================================

/// Per-call merge accumulator for a node reached by one or more paths.
struct Arrival {
    intensity: f64,
    contributions: Vec<(EmotionalState, f64)>,
}

/// Spreads emotional states across a similarity graph, maintaining a table
/// of decaying per-node overlays.
///
/// # Example
///
/// ```
/// use affect_memory::affect::EmotionalState;
/// use affect_memory::contagion::{ContagionPropagator, SimilarityGraph};
/// use affect_memory::dst::SimClock;
///
/// let mut propagator = ContagionPropagator::new(SimClock::new());
/// let mut graph = SimilarityGraph::new();
/// graph.add_undirected("ep-1", "ep-2", 0.85);
///
/// let strong = EmotionalState::new(0.9, 0.8, 0.2, 0.7, 0.1, 0.1, 0.1, 0.85);
/// let overlays = propagator.on_episode_access("ep-1", &strong, &graph);
/// assert_eq!(overlays.len(), 1);
/// assert_eq!(overlays[0].episode_id, "ep-2");
/// ```
#[derive(Debug)]
pub struct ContagionPropagator {
    config: ContagionConfig,
    overlays: HashMap<String, ContagionOverlay>,
    clock: SimClock,
}

impl ContagionPropagator {
    /// Create a propagator with default configuration.
    #[must_use]
    pub fn new(clock: SimClock) -> Self {
        Self {
            config: ContagionConfig::default(),
            overlays: HashMap::new(),
            clock,
        }
    }

    /// Create a propagator with a validated configuration.
    ///
    /// # Errors
    /// Returns [`ContagionError::InvalidConfiguration`] if the config is
    /// out of range.
    pub fn with_config(config: ContagionConfig, clock: SimClock) -> Result<Self, ContagionError> {
        config.validate()?;
        Ok(Self {
            config,
            overlays: HashMap::new(),
            clock,
        })
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &ContagionConfig {
        &self.config
    }

    /// Get the clock driving overlay decay.
    #[must_use]
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Propagate an accessed episode's emotion across the graph.
    ///
    /// Returns the overlays created or updated by this call, sorted by
    /// (hop distance, episode id) for deterministic output. Sources whose
    /// emotion intensity is below `intensity_threshold` do not spread and
    /// return an empty list. The source node itself never receives an
    /// overlay.
    #[tracing::instrument(skip(self, source_emotion, graph), fields(source = source_id))]
    pub fn on_episode_access(
        &mut self,
        source_id: &str,
        source_emotion: &EmotionalState,
        graph: &SimilarityGraph,
    ) -> Vec<ContagionOverlay> {
        // Precondition
        assert!(!source_id.is_empty(), "source_id cannot be empty");

        let source_intensity = source_emotion.intensity();
        if source_intensity < self.config.intensity_threshold {
            tracing::debug!(
                intensity = source_intensity,
                threshold = self.config.intensity_threshold,
                "emotion below spreading threshold"
            );
            return Vec::new();
        }

        let now = self.clock.now_ms();
        let floor = self.config.floor();

        let mut visited: HashSet<String> = HashSet::new();
        visited.insert(source_id.to_string());

        let mut frontier: Vec<(String, f64, EmotionalState)> =
            vec![(source_id.to_string(), source_intensity, *source_emotion)];
        let mut touched: Vec<(u32, String)> = Vec::new();

        for hop in 1..=self.config.max_hops {
            if frontier.is_empty() {
                break;
            }

            // Gather all arrivals at this hop level before finalizing any
            // node, so overlapping paths merge instead of overwriting.
            let mut arrivals: HashMap<String, Arrival> = HashMap::new();
            for (node_id, node_intensity, node_emotion) in &frontier {
                let mut seen_neighbors: HashSet<&str> = HashSet::new();
                for (neighbor_id, weight) in graph.neighbors(node_id) {
                    if neighbor_id == node_id {
                        tracing::debug!(node = %node_id, "skipping self-loop edge");
                        continue;
                    }
                    if !weight.is_finite() || !(0.0..=1.0).contains(weight) {
                        tracing::debug!(
                            node = %node_id,
                            neighbor = %neighbor_id,
                            weight,
                            "skipping out-of-range edge weight"
                        );
                        continue;
                    }
                    if !seen_neighbors.insert(neighbor_id.as_str()) {
                        tracing::debug!(
                            node = %node_id,
                            neighbor = %neighbor_id,
                            "skipping duplicate edge"
                        );
                        continue;
                    }
                    if *weight < self.config.similarity_threshold {
                        continue;
                    }
                    if visited.contains(neighbor_id.as_str()) {
                        continue;
                    }

                    let arriving = node_intensity * self.config.hop_decay_factor * weight;
                    let entry = arrivals.entry(neighbor_id.clone()).or_insert(Arrival {
                        intensity: 0.0,
                        contributions: Vec::new(),
                    });
                    // A node cannot be diluted by a weaker second path
                    entry.intensity = entry.intensity.max(arriving);
                    entry.contributions.push((*node_emotion, arriving));
                }
            }

            // Finalize the level in sorted order for determinism
            let mut level: Vec<(String, Arrival)> = arrivals.into_iter().collect();
            level.sort_by(|(a, _), (b, _)| a.cmp(b));

            let mut next_frontier = Vec::new();
            for (node_id, arrival) in level {
                visited.insert(node_id.clone());

                let emotion = EmotionalState::blend_weighted(&arrival.contributions);
                let kept =
                    self.apply_arrival(&node_id, source_id, emotion, arrival.intensity, hop, now, floor);
                if kept {
                    touched.push((hop, node_id.clone()));
                }
                if arrival.intensity >= self.config.intensity_threshold {
                    next_frontier.push((node_id, arrival.intensity, emotion));
                }
            }
            frontier = next_frontier;
        }

        touched.sort();
        let result: Vec<ContagionOverlay> = touched
            .iter()
            .filter_map(|(_, id)| self.overlays.get(id).cloned())
            .collect();

        tracing::debug!(overlays = result.len(), "propagation complete");
        result
    }

    /// Merge one finalized arrival into the overlay table.
    ///
    /// Returns true if the node holds an overlay after this call.
    fn apply_arrival(
        &mut self,
        node_id: &str,
        source_id: &str,
        emotion: EmotionalState,
        intensity: f64,
        hop: u32,
        now: u64,
        floor: f64,
    ) -> bool {
        let merged = match self.overlays.get(node_id) {
            Some(old) if !self.is_expired(old, now) => {
                let old_effective = old.intensity
                    * halflife_decay(old.since_update_ms(now), self.config.time_decay_halflife_ms);
                let blended = EmotionalState::blend_weighted(&[
                    (old.emotion, old_effective),
                    (emotion, intensity),
                ]);
                let source_episode_id = if intensity >= old_effective {
                    source_id.to_string()
                } else {
                    old.source_episode_id.clone()
                };
                ContagionOverlay {
                    episode_id: node_id.to_string(),
                    source_episode_id,
                    emotion: blended,
                    intensity: old_effective.max(intensity),
                    hop_distance: old.hop_distance.min(hop),
                    created_at_ms: old.created_at_ms,
                    updated_at_ms: now,
                }
            }
            _ => ContagionOverlay {
                episode_id: node_id.to_string(),
                source_episode_id: source_id.to_string(),
                emotion,
                intensity,
                hop_distance: hop,
                created_at_ms: now,
                updated_at_ms: now,
            },
        };

        if merged.intensity >= floor {
            self.overlays.insert(node_id.to_string(), merged);
            true
        } else {
            if self.overlays.remove(node_id).is_some() {
                tracing::debug!(node = %node_id, "overlay dropped below floor");
            }
            false
        }
    }

    /// Age all overlays to the current clock reading.
    ///
    /// Residual intensity decays exponentially with the configured
    /// half-life since the last update; overlays below the floor epsilon or
    /// past their TTL are removed. Idempotent: a second call at the same
    /// clock reading is a no-op. Returns the number of overlays removed.
    pub fn decay_overlays(&mut self) -> usize {
        let now = self.clock.now_ms();
        let floor = self.config.floor();
        let halflife = self.config.time_decay_halflife_ms;
        let ttl = self.config.overlay_ttl_ms;

        let before = self.overlays.len();
        self.overlays.retain(|_, overlay| {
            let elapsed = overlay.since_update_ms(now);
            if elapsed > 0 {
                overlay.intensity *= halflife_decay(elapsed, halflife);
                overlay.updated_at_ms = now;
            }
            overlay.intensity >= floor && overlay.age_ms(now) <= ttl
        });

        let removed = before - self.overlays.len();
        if removed > 0 {
            tracing::debug!(removed, remaining = self.overlays.len(), "overlays expired");
        }
        removed
    }

    /// Raw overlay record for a node, if present.
    ///
    /// The stored intensity is as of the overlay's last update; use
    /// [`Self::effective_overlay`] for the decayed view.
    #[must_use]
    pub fn overlay(&self, id: &str) -> Option<&ContagionOverlay> {
        self.overlays.get(id)
    }

    /// Effective (time-decayed) overlay emotion and intensity for a node.
    ///
    /// Pure read: returns `None` for nodes without an overlay, and for
    /// overlays that have decayed below the floor or outlived their TTL,
    /// without mutating the table.
    #[must_use]
    pub fn effective_overlay(&self, id: &str) -> Option<(EmotionalState, f64)> {
        let overlay = self.overlays.get(id)?;
        let now = self.clock.now_ms();
        if self.is_expired(overlay, now) {
            return None;
        }
        let effective = overlay.intensity
            * halflife_decay(overlay.since_update_ms(now), self.config.time_decay_halflife_ms);
        if effective < self.config.floor() {
            return None;
        }
        Some((overlay.emotion, effective))
    }

    /// Number of overlays currently active (effective intensity above the
    /// floor, within TTL).
    #[must_use]
    pub fn active_overlay_count(&self) -> usize {
        self.overlays
            .keys()
            .filter(|id| self.effective_overlay(id).is_some())
            .count()
    }

    /// Read-only contagion statistics. No side effects.
    #[must_use]
    pub fn stats(&self) -> ContagionStats {
        let intensities: Vec<f64> = self
            .overlays
            .keys()
            .filter_map(|id| self.effective_overlay(id).map(|(_, intensity)| intensity))
            .collect();

        let count = intensities.len();
        let mean_intensity = if count == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let mean = intensities.iter().sum::<f64>() / count as f64;
            mean
        };

        ContagionStats {
            episodes_affected: count,
            total_overlays: count,
            mean_intensity,
        }
    }

    /// Drop all overlays.
    pub fn clear(&mut self) {
        self.overlays.clear();
    }

    fn is_expired(&self, overlay: &ContagionOverlay, now: u64) -> bool {
        overlay.age_ms(now) > self.config.overlay_ttl_ms
    }
}

/// Exponential decay: `0.5^(elapsed / halflife)`.
fn halflife_decay(elapsed_ms: u64, halflife_ms: u64) -> f64 {
    debug_assert!(halflife_ms > 0, "halflife must be positive");
    #[allow(clippy::cast_precision_loss)]
    let exponent = elapsed_ms as f64 / halflife_ms as f64;
    0.5_f64.powf(exponent)
}

// =============================================================================
// Tests
// =============================================================================
