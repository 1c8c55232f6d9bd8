//! Working Memory Buffer - Capacity-Bounded Active Workspace
//!
//! `TigerStyle`: Explicit capacity, deterministic eviction, clock-driven decay.
//!
//! # Design
//!
//! The buffer holds at most `capacity` items. When full, inserting a new
//! item evicts the resident with the lowest composite score:
//!
//! ```text
//! composite = w_a * attention + w_r * recency + w_e * residual_emotion
//! ```
//!
//! where recency and residual emotional intensity decay exponentially with
//! the configured half-life. Ties break by oldest insertion, then smallest
//! id, so eviction is fully deterministic. The new item is always admitted;
//! insertion never fails for want of space.
//!
//! The buffer owns its item records but never the content they refer to:
//! `content` is an opaque caller-owned handle (generic `C`).

use std::collections::HashMap;

use serde::Serialize;

use crate::affect::EmotionalState;
use crate::constants::{
    WORKING_MEMORY_CAPACITY_COUNT_MAX, WORKING_MEMORY_CAPACITY_DEFAULT,
    WORKING_MEMORY_ITEM_ID_BYTES_MAX, WORKING_MEMORY_RECENCY_HALFLIFE_MS_DEFAULT,
    WORKING_MEMORY_WEIGHT_ATTENTION_DEFAULT, WORKING_MEMORY_WEIGHT_EMOTION_DEFAULT,
    WORKING_MEMORY_WEIGHT_RECENCY_DEFAULT, WORKING_MEMORY_WEIGHT_SUM_TOLERANCE,
};
use crate::dst::SimClock;

// =============================================================================
// Error Types
// =============================================================================

/// Errors from working memory operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WorkingMemoryError {
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

    /// The referenced item is not resident
    #[error("item not found: {id}")]
    NotFound {
        /// The missing item id
        id: String,
    },
}

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the working memory buffer.
///
/// `TigerStyle`: All fields public, builder methods, validated once.
#[derive(Debug, Clone)]
pub struct WorkingMemoryConfig {
    /// Maximum number of resident items
    pub capacity: usize,
    /// Eviction weight for the attention term
    pub weight_attention: f64,
    /// Eviction weight for the recency term
    pub weight_recency: f64,
    /// Eviction weight for the residual emotional intensity term
    pub weight_emotion: f64,
    /// Half-life for recency and residual-emotion decay
    pub recency_halflife_ms: u64,
}

impl Default for WorkingMemoryConfig {
    fn default() -> Self {
        Self {
            capacity: WORKING_MEMORY_CAPACITY_DEFAULT,
            weight_attention: WORKING_MEMORY_WEIGHT_ATTENTION_DEFAULT,
            weight_recency: WORKING_MEMORY_WEIGHT_RECENCY_DEFAULT,
            weight_emotion: WORKING_MEMORY_WEIGHT_EMOTION_DEFAULT,
            recency_halflife_ms: WORKING_MEMORY_RECENCY_HALFLIFE_MS_DEFAULT,
        }
    }
}

impl WorkingMemoryConfig {
    /// Create a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the buffer capacity.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the eviction weight triple.
    #[must_use]
    pub fn with_weights(mut self, attention: f64, recency: f64, emotion: f64) -> Self {
        self.weight_attention = attention;
        self.weight_recency = recency;
        self.weight_emotion = emotion;
        self
    }

    /// Set the recency half-life.
    #[must_use]
    pub fn with_recency_halflife_ms(mut self, halflife_ms: u64) -> Self {
        self.recency_halflife_ms = halflife_ms;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    /// Returns [`WorkingMemoryError::InvalidConfiguration`] if the capacity
    /// is zero or above the maximum, any weight is negative, the weights do
    /// not sum to ~1.0, or the half-life is zero.
    pub fn validate(&self) -> Result<(), WorkingMemoryError> {
        if self.capacity == 0 || self.capacity > WORKING_MEMORY_CAPACITY_COUNT_MAX {
            return Err(WorkingMemoryError::InvalidConfiguration {
                field: "capacity",
                value: to_f64(self.capacity),
                min: 1.0,
                max: to_f64(WORKING_MEMORY_CAPACITY_COUNT_MAX),
            });
        }
        for (field, value) in [
            ("weight_attention", self.weight_attention),
            ("weight_recency", self.weight_recency),
            ("weight_emotion", self.weight_emotion),
        ] {
            if !(0.0..=1.0).contains(&value) || !value.is_finite() {
                return Err(WorkingMemoryError::InvalidConfiguration {
                    field,
                    value,
                    min: 0.0,
                    max: 1.0,
                });
            }
        }
        let sum = self.weight_attention + self.weight_recency + self.weight_emotion;
        if (sum - 1.0).abs() > WORKING_MEMORY_WEIGHT_SUM_TOLERANCE {
            return Err(WorkingMemoryError::InvalidConfiguration {
                field: "weight sum",
                value: sum,
                min: 1.0 - WORKING_MEMORY_WEIGHT_SUM_TOLERANCE,
                max: 1.0 + WORKING_MEMORY_WEIGHT_SUM_TOLERANCE,
            });
        }
        if self.recency_halflife_ms == 0 {
            return Err(WorkingMemoryError::InvalidConfiguration {
                field: "recency_halflife_ms",
                value: 0.0,
                min: 1.0,
                max: f64::INFINITY,
            });
        }
        Ok(())
    }
}

#[allow(clippy::cast_precision_loss)]
fn to_f64(value: usize) -> f64 {
    value as f64
}

// =============================================================================
// Item Type
// =============================================================================

/// A resident item in the working memory buffer.
///
/// Owned exclusively by the buffer; destroyed on eviction or explicit
/// removal. The `content` handle is opaque to the buffer.
#[derive(Debug, Clone)]
pub struct WorkingMemoryItem<C> {
    /// Opaque item id
    pub id: String,
    /// Caller-owned content handle
    pub content: C,
    /// Attention score at insertion, in [0, 1]
    pub attention_score: f64,
    /// Emotional state captured at insertion
    pub emotion: EmotionalState,
    /// Insertion timestamp (ms)
    pub inserted_at_ms: u64,
    /// Last access timestamp (ms)
    pub last_access_ms: u64,
    /// Number of accesses since insertion
    pub access_count: u64,
}

// =============================================================================
// Stats
// =============================================================================

/// Read-only summary of buffer state.
#[derive(Debug, Clone, Serialize)]
pub struct WorkingMemoryStats {
    /// Current resident count
    pub len: usize,
    /// Configured capacity
    pub capacity: usize,
    /// `len / capacity`
    pub utilization: f64,
    /// Mean attention score of residents (0.0 when empty)
    pub mean_attention: f64,
}

// =============================================================================
// Working Memory Buffer
// =============================================================================

/// Capacity-bounded buffer of the currently most relevant items.
///
/// # Example
///
/// ```
/// use affect_memory::affect::EmotionalState;
/// use affect_memory::dst::SimClock;
/// use affect_memory::memory::WorkingMemoryBuffer;
///
/// let mut buffer: WorkingMemoryBuffer<&str> = WorkingMemoryBuffer::new(SimClock::new());
/// let evicted = buffer.insert("ep-1", "content", 0.8, EmotionalState::neutral());
/// assert!(evicted.is_none());
/// assert_eq!(buffer.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct WorkingMemoryBuffer<C> {
    config: WorkingMemoryConfig,
    items: HashMap<String, WorkingMemoryItem<C>>,
    clock: SimClock,
}

impl<C> WorkingMemoryBuffer<C> {
    /// Create a buffer with default configuration.
    #[must_use]
    pub fn new(clock: SimClock) -> Self {
        Self {
            config: WorkingMemoryConfig::default(),
            items: HashMap::new(),
            clock,
        }
    }

    /// Create a buffer with a validated configuration.
    ///
    /// # Errors
    /// Returns [`WorkingMemoryError::InvalidConfiguration`] if the config
    /// is out of range (capacity 0 included).
    pub fn with_config(
        config: WorkingMemoryConfig,
        clock: SimClock,
    ) -> Result<Self, WorkingMemoryError> {
        config.validate()?;
        Ok(Self {
            config,
            items: HashMap::new(),
            clock,
        })
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &WorkingMemoryConfig {
        &self.config
    }

    /// Get the clock driving recency decay.
    #[must_use]
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Insert an item, evicting the lowest-composite resident when full.
    ///
    /// Returns the evicted item's id, if any. Re-inserting a resident id
    /// refreshes it in place (content, attention, emotion, last access) and
    /// never evicts. The new item is always admitted; capacity is never
    /// exceeded.
    pub fn insert(
        &mut self,
        id: &str,
        content: C,
        attention_score: f64,
        emotion: EmotionalState,
    ) -> Option<String> {
        // Preconditions
        assert!(!id.is_empty(), "item id cannot be empty");
        assert!(
            id.len() <= WORKING_MEMORY_ITEM_ID_BYTES_MAX,
            "item id exceeds {} bytes",
            WORKING_MEMORY_ITEM_ID_BYTES_MAX
        );

        let now = self.clock.now_ms();
        let attention_score = clamp_score(attention_score);

        if let Some(existing) = self.items.get_mut(id) {
            existing.content = content;
            existing.attention_score = attention_score;
            existing.emotion = emotion;
            existing.inserted_at_ms = now;
            existing.last_access_ms = now;
            existing.access_count += 1;
            return None;
        }

        let evicted = if self.items.len() >= self.config.capacity {
            let victim = self.select_victim(now);
            if let Some(victim_id) = &victim {
                tracing::debug!(evicted = %victim_id, inserted = %id, "working memory eviction");
                self.items.remove(victim_id);
            }
            victim
        } else {
            None
        };

        self.items.insert(
            id.to_string(),
            WorkingMemoryItem {
                id: id.to_string(),
                content,
                attention_score,
                emotion,
                inserted_at_ms: now,
                last_access_ms: now,
                access_count: 0,
            },
        );

        // Postcondition
        assert!(
            self.items.len() <= self.config.capacity,
            "capacity invariant violated"
        );

        evicted
    }

    /// Update an item's last-access timestamp.
    ///
    /// # Errors
    /// Returns [`WorkingMemoryError::NotFound`] (non-fatal) for unknown ids.
    pub fn touch(&mut self, id: &str) -> Result<(), WorkingMemoryError> {
        let now = self.clock.now_ms();
        match self.items.get_mut(id) {
            Some(item) => {
                item.last_access_ms = now;
                item.access_count += 1;
                Ok(())
            }
            None => Err(WorkingMemoryError::NotFound { id: id.to_string() }),
        }
    }

    /// Remove an item explicitly, returning it.
    ///
    /// # Errors
    /// Returns [`WorkingMemoryError::NotFound`] for unknown ids.
    pub fn remove(&mut self, id: &str) -> Result<WorkingMemoryItem<C>, WorkingMemoryError> {
        self.items
            .remove(id)
            .ok_or_else(|| WorkingMemoryError::NotFound { id: id.to_string() })
    }

    /// Get an item without touching it.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&WorkingMemoryItem<C>> {
        self.items.get(id)
    }

    /// Check whether an id is resident.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Ordered view of residents, most recently touched first.
    ///
    /// Ties break by newest insertion, then smallest id. Read-only: no
    /// access timestamps are updated.
    #[must_use]
    pub fn snapshot(&self) -> Vec<&WorkingMemoryItem<C>> {
        let mut items: Vec<&WorkingMemoryItem<C>> = self.items.values().collect();
        items.sort_by(|a, b| {
            b.last_access_ms
                .cmp(&a.last_access_ms)
                .then_with(|| b.inserted_at_ms.cmp(&a.inserted_at_ms))
                .then_with(|| a.id.cmp(&b.id))
        });
        items
    }

    /// Current resident count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Configured capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Clear all residents.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Read-only buffer statistics.
    #[must_use]
    pub fn stats(&self) -> WorkingMemoryStats {
        let len = self.items.len();
        let mean_attention = if len == 0 {
            0.0
        } else {
            self.items.values().map(|i| i.attention_score).sum::<f64>() / to_f64(len)
        };
        WorkingMemoryStats {
            len,
            capacity: self.config.capacity,
            utilization: to_f64(len) / to_f64(self.config.capacity),
            mean_attention,
        }
    }

    /// Composite eviction score for one resident at time `now`.
    fn composite_score(&self, item: &WorkingMemoryItem<C>, now: u64) -> f64 {
        let recency = halflife_decay(
            now.saturating_sub(item.last_access_ms),
            self.config.recency_halflife_ms,
        );
        let residual_emotion = item.emotion.intensity()
            * halflife_decay(
                now.saturating_sub(item.inserted_at_ms),
                self.config.recency_halflife_ms,
            );

        let score = self.config.weight_attention * item.attention_score
            + self.config.weight_recency * recency
            + self.config.weight_emotion * residual_emotion;

        // Postcondition: bounded by the validated weight sum
        debug_assert!(
            (0.0..=1.0 + WORKING_MEMORY_WEIGHT_SUM_TOLERANCE).contains(&score),
            "composite out of range"
        );
        score
    }

    /// Select the eviction victim: lowest composite, ties by oldest
    /// insertion, then smallest id.
    fn select_victim(&self, now: u64) -> Option<String> {
        self.items
            .values()
            .map(|item| (self.composite_score(item, now), item))
            .min_by(|(score_a, a), (score_b, b)| {
                score_a
                    .partial_cmp(score_b)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then_with(|| a.inserted_at_ms.cmp(&b.inserted_at_ms))
                    .then_with(|| a.id.cmp(&b.id))
            })
            .map(|(_, item)| item.id.clone())
    }
}

fn clamp_score(value: f64) -> f64 {
    if !value.is_finite() {
        tracing::debug!(value, "non-finite attention score, using 0.0");
        return 0.0;
    }
    if !(0.0..=1.0).contains(&value) {
        tracing::debug!(value, "attention score outside [0, 1], clamping");
    }
    value.clamp(0.0, 1.0)
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

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_with_capacity(capacity: usize, clock: &SimClock) -> WorkingMemoryBuffer<&'static str> {
        WorkingMemoryBuffer::with_config(
            WorkingMemoryConfig::default().with_capacity(capacity),
            clock.clone(),
        )
        .unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let clock = SimClock::new();
        let mut buffer = buffer_with_capacity(3, &clock);

        let evicted = buffer.insert("ep-1", "content", 0.8, EmotionalState::neutral());
        assert!(evicted.is_none());
        assert_eq!(buffer.len(), 1);
        assert!(buffer.contains("ep-1"));

        let item = buffer.get("ep-1").unwrap();
        assert_eq!(item.attention_score, 0.8);
        assert_eq!(item.access_count, 0);
    }

    #[test]
    fn test_capacity_never_exceeded() {
        let clock = SimClock::new();
        let mut buffer = buffer_with_capacity(3, &clock);

        for i in 0..20 {
            let id = format!("ep-{i:03}");
            buffer.insert(&id, "c", 0.5, EmotionalState::neutral());
            assert!(buffer.len() <= 3);
        }
        assert_eq!(buffer.len(), 3);
    }

    #[test]
    fn test_eviction_lowest_composite() {
        // Scenario: capacity 3, attention scores [0.9, 0.4, 0.6, 0.8]
        // inserted in order; exactly one eviction, victim is the 0.4 item.
        let clock = SimClock::new();
        let mut buffer = buffer_with_capacity(3, &clock);

        assert!(buffer
            .insert("ep-a", "c", 0.9, EmotionalState::neutral())
            .is_none());
        assert!(buffer
            .insert("ep-b", "c", 0.4, EmotionalState::neutral())
            .is_none());
        assert!(buffer
            .insert("ep-c", "c", 0.6, EmotionalState::neutral())
            .is_none());

        let evicted = buffer.insert("ep-d", "c", 0.8, EmotionalState::neutral());
        assert_eq!(evicted.as_deref(), Some("ep-b"));
        assert_eq!(buffer.len(), 3);
        assert!(buffer.contains("ep-d"));
        assert!(!buffer.contains("ep-b"));
    }

    #[test]
    fn test_eviction_tie_breaks_deterministic() {
        let clock = SimClock::new();
        let mut buffer = buffer_with_capacity(2, &clock);

        // Identical scores and timestamps: smallest id loses
        buffer.insert("ep-b", "c", 0.5, EmotionalState::neutral());
        buffer.insert("ep-a", "c", 0.5, EmotionalState::neutral());

        let evicted = buffer.insert("ep-c", "c", 0.5, EmotionalState::neutral());
        assert_eq!(evicted.as_deref(), Some("ep-a"));
    }

    #[test]
    fn test_eviction_tie_breaks_oldest_insertion_first() {
        let clock = SimClock::new();
        let mut buffer = buffer_with_capacity(2, &clock);

        // Same attention; recency differs only via insertion time. With a
        // long half-life the composite gap is tiny but deterministic; make
        // timestamps differ while scores stay equal by touching both.
        buffer.insert("ep-old", "c", 0.5, EmotionalState::neutral());
        clock.advance_ms(10);
        buffer.insert("ep-new", "c", 0.5, EmotionalState::neutral());
        clock.advance_ms(10);
        buffer.touch("ep-old").unwrap();
        buffer.touch("ep-new").unwrap();

        // Recency terms now equal; ep-old has the older insertion.
        let evicted = buffer.insert("ep-x", "c", 0.5, EmotionalState::neutral());
        assert_eq!(evicted.as_deref(), Some("ep-old"));
    }

    #[test]
    fn test_recency_influences_eviction() {
        let clock = SimClock::new();
        let config = WorkingMemoryConfig::default()
            .with_capacity(2)
            .with_recency_halflife_ms(1000);
        let mut buffer: WorkingMemoryBuffer<&str> =
            WorkingMemoryBuffer::with_config(config, clock.clone()).unwrap();

        buffer.insert("ep-stale", "c", 0.6, EmotionalState::neutral());
        buffer.insert("ep-fresh", "c", 0.6, EmotionalState::neutral());

        // ep-fresh touched recently, ep-stale ages two half-lives
        clock.advance_ms(2000);
        buffer.touch("ep-fresh").unwrap();

        let evicted = buffer.insert("ep-x", "c", 0.6, EmotionalState::neutral());
        assert_eq!(evicted.as_deref(), Some("ep-stale"));
    }

    #[test]
    fn test_emotional_intensity_protects_resident() {
        let clock = SimClock::new();
        let mut buffer = buffer_with_capacity(2, &clock);

        let strong = EmotionalState::new(0.9, 0.8, 0.2, 0.7, 0.1, 0.1, 0.1, 0.85);
        buffer.insert("ep-emotional", "c", 0.5, strong);
        buffer.insert("ep-flat", "c", 0.5, EmotionalState::neutral());

        // Equal attention and recency: the flat item scores lower
        let evicted = buffer.insert("ep-x", "c", 0.5, EmotionalState::neutral());
        assert_eq!(evicted.as_deref(), Some("ep-flat"));
    }

    #[test]
    fn test_reinsert_refreshes_in_place() {
        let clock = SimClock::new();
        let mut buffer = buffer_with_capacity(2, &clock);

        buffer.insert("ep-1", "old", 0.3, EmotionalState::neutral());
        buffer.insert("ep-2", "c", 0.5, EmotionalState::neutral());

        clock.advance_ms(100);
        let evicted = buffer.insert("ep-1", "new", 0.9, EmotionalState::neutral());

        assert!(evicted.is_none());
        assert_eq!(buffer.len(), 2);
        let item = buffer.get("ep-1").unwrap();
        assert_eq!(item.content, "new");
        assert_eq!(item.attention_score, 0.9);
        assert_eq!(item.last_access_ms, 100);
    }

    #[test]
    fn test_touch_updates_timestamp() {
        let clock = SimClock::new();
        let mut buffer = buffer_with_capacity(3, &clock);
        buffer.insert("ep-1", "c", 0.5, EmotionalState::neutral());

        clock.advance_ms(500);
        buffer.touch("ep-1").unwrap();

        let item = buffer.get("ep-1").unwrap();
        assert_eq!(item.last_access_ms, 500);
        assert_eq!(item.access_count, 1);
        assert_eq!(item.inserted_at_ms, 0);
    }

    #[test]
    fn test_touch_not_found_is_nonfatal() {
        let clock = SimClock::new();
        let mut buffer = buffer_with_capacity(3, &clock);

        let result = buffer.touch("ghost");
        assert!(matches!(
            result,
            Err(WorkingMemoryError::NotFound { ref id }) if id == "ghost"
        ));
        // Buffer unchanged
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_remove() {
        let clock = SimClock::new();
        let mut buffer = buffer_with_capacity(3, &clock);
        buffer.insert("ep-1", "c", 0.5, EmotionalState::neutral());

        let removed = buffer.remove("ep-1").unwrap();
        assert_eq!(removed.id, "ep-1");
        assert!(buffer.is_empty());
        assert!(buffer.remove("ep-1").is_err());
    }

    #[test]
    fn test_snapshot_order() {
        let clock = SimClock::new();
        let mut buffer = buffer_with_capacity(5, &clock);

        buffer.insert("ep-1", "c", 0.5, EmotionalState::neutral());
        clock.advance_ms(10);
        buffer.insert("ep-2", "c", 0.5, EmotionalState::neutral());
        clock.advance_ms(10);
        buffer.touch("ep-1").unwrap();

        let ids: Vec<&str> = buffer.snapshot().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["ep-1", "ep-2"]);
    }

    #[test]
    fn test_snapshot_has_no_side_effects() {
        let clock = SimClock::new();
        let mut buffer = buffer_with_capacity(3, &clock);
        buffer.insert("ep-1", "c", 0.5, EmotionalState::neutral());

        let _ = buffer.snapshot();
        assert_eq!(buffer.get("ep-1").unwrap().access_count, 0);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let clock = SimClock::new();
        let result: Result<WorkingMemoryBuffer<()>, _> = WorkingMemoryBuffer::with_config(
            WorkingMemoryConfig::default().with_capacity(0),
            clock,
        );
        assert!(matches!(
            result,
            Err(WorkingMemoryError::InvalidConfiguration { field: "capacity", .. })
        ));
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let config = WorkingMemoryConfig::default().with_weights(0.5, 0.5, 0.5);
        assert!(config.validate().is_err());

        let config = WorkingMemoryConfig::default().with_weights(-0.1, 0.6, 0.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_stats() {
        let clock = SimClock::new();
        let mut buffer = buffer_with_capacity(4, &clock);
        buffer.insert("ep-1", "c", 0.4, EmotionalState::neutral());
        buffer.insert("ep-2", "c", 0.8, EmotionalState::neutral());

        let stats = buffer.stats();
        assert_eq!(stats.len, 2);
        assert_eq!(stats.capacity, 4);
        assert!((stats.utilization - 0.5).abs() < 1e-12);
        assert!((stats.mean_attention - 0.6).abs() < 1e-12);
    }
}

// =============================================================================
// Property-Based Tests
// =============================================================================
