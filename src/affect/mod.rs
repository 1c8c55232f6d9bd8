//! Emotional State - 8-Dimensional Affect Vector
//!
//! `TigerStyle`: Immutable value type, explicit bounds, derived measures.
//!
//! An [`EmotionalState`] is an eight-component vector over the Plutchik
//! basic emotions. Components are clamped to [0, 1] at construction; all
//! derived measures (intensity, valence, congruence) are bounded. Blending
//! two states produces a new state, never mutates either input.

use serde::{Deserialize, Serialize};

use crate::constants::{
    EMOTION_COMPONENT_MAX, EMOTION_COMPONENT_MIN, EMOTION_DIMENSIONS_COUNT, EMOTION_NORM_EPSILON,
};

/// An immutable 8-dimensional emotional state.
///
/// Positive-valence components: joy, trust, anticipation, surprise.
/// Negative-valence components: fear, sadness, disgust, anger.
///
/// # Example
///
/// ```
/// use affect_memory::affect::EmotionalState;
///
/// let strong = EmotionalState::new(0.9, 0.8, 0.2, 0.7, 0.1, 0.1, 0.1, 0.85);
/// assert!(strong.intensity() > 0.6);
/// assert!(strong.valence() > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionalState {
    /// Joy component
    pub joy: f64,
    /// Trust component
    pub trust: f64,
    /// Fear component
    pub fear: f64,
    /// Surprise component (treated as positive-valence)
    pub surprise: f64,
    /// Sadness component
    pub sadness: f64,
    /// Disgust component
    pub disgust: f64,
    /// Anger component
    pub anger: f64,
    /// Anticipation component
    pub anticipation: f64,
}

impl EmotionalState {
    /// Create a new state, clamping every component into [0, 1].
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        joy: f64,
        trust: f64,
        fear: f64,
        surprise: f64,
        sadness: f64,
        disgust: f64,
        anger: f64,
        anticipation: f64,
    ) -> Self {
        Self {
            joy: clamp_component(joy),
            trust: clamp_component(trust),
            fear: clamp_component(fear),
            surprise: clamp_component(surprise),
            sadness: clamp_component(sadness),
            disgust: clamp_component(disgust),
            anger: clamp_component(anger),
            anticipation: clamp_component(anticipation),
        }
    }

    /// The neutral state (all components zero).
    #[must_use]
    pub fn neutral() -> Self {
        Self::from_array([0.0; EMOTION_DIMENSIONS_COUNT])
    }

    /// Return the components as a fixed-size array.
    ///
    /// Order: joy, trust, fear, surprise, sadness, disgust, anger,
    /// anticipation.
    #[must_use]
    pub fn as_array(&self) -> [f64; EMOTION_DIMENSIONS_COUNT] {
        [
            self.joy,
            self.trust,
            self.fear,
            self.surprise,
            self.sadness,
            self.disgust,
            self.anger,
            self.anticipation,
        ]
    }

    /// Create a state from a component array (clamped into range).
    #[must_use]
    pub fn from_array(components: [f64; EMOTION_DIMENSIONS_COUNT]) -> Self {
        Self::new(
            components[0],
            components[1],
            components[2],
            components[3],
            components[4],
            components[5],
            components[6],
            components[7],
        )
    }

    /// Overall emotional intensity in [0, 1].
    ///
    /// Euclidean norm of the component vector, clamped to 1.0. Used as the
    /// propagation "energy" of a contagion pass.
    #[must_use]
    pub fn intensity(&self) -> f64 {
        let norm = self
            .as_array()
            .iter()
            .map(|c| c * c)
            .sum::<f64>()
            .sqrt();
        let intensity = norm.min(EMOTION_COMPONENT_MAX);

        // Postcondition
        debug_assert!((0.0..=1.0).contains(&intensity), "intensity out of range");
        intensity
    }

    /// Net valence in [-1, 1]: positive minus negative component mass.
    #[must_use]
    pub fn valence(&self) -> f64 {
        let positive = self.joy + self.trust + self.anticipation + self.surprise;
        let negative = self.fear + self.sadness + self.disgust + self.anger;
        let valence = (positive - negative) / 4.0;

        // Postcondition
        debug_assert!((-1.0..=1.0).contains(&valence), "valence out of range");
        valence
    }

    /// Blend toward `other` by `weight` in [0, 1].
    ///
    /// `weight == 0.0` returns `self`, `weight == 1.0` returns `other`.
    #[must_use]
    pub fn blend(&self, other: &Self, weight: f64) -> Self {
        let w = weight.clamp(0.0, 1.0);
        let a = self.as_array();
        let b = other.as_array();

        let mut out = [0.0; EMOTION_DIMENSIONS_COUNT];
        for i in 0..EMOTION_DIMENSIONS_COUNT {
            out[i] = a[i] * (1.0 - w) + b[i] * w;
        }
        Self::from_array(out)
    }

    /// Combine several states weighted by non-negative weights.
    ///
    /// Used by the contagion merge rule with arriving intensities as
    /// weights. A zero (or empty) total weight yields the neutral state.
    #[must_use]
    pub fn blend_weighted(states: &[(Self, f64)]) -> Self {
        let total: f64 = states.iter().map(|(_, w)| w.max(0.0)).sum();
        if total <= 0.0 {
            return Self::neutral();
        }

        let mut out = [0.0; EMOTION_DIMENSIONS_COUNT];
        for (state, weight) in states {
            let w = weight.max(0.0) / total;
            let components = state.as_array();
            for i in 0..EMOTION_DIMENSIONS_COUNT {
                out[i] += components[i] * w;
            }
        }
        Self::from_array(out)
    }

    /// Cosine similarity between two states, in [-1, 1].
    ///
    /// Returns 0.0 when either vector is (near-)zero, so a neutral query
    /// never biases retrieval.
    #[must_use]
    pub fn congruence(&self, other: &Self) -> f64 {
        let a = self.as_array();
        let b = other.as_array();

        let dot: f64 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
        let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

        if norm_a < EMOTION_NORM_EPSILON || norm_b < EMOTION_NORM_EPSILON {
            return 0.0;
        }

        let congruence = (dot / (norm_a * norm_b)).clamp(-1.0, 1.0);

        // Postcondition
        debug_assert!(
            (-1.0..=1.0).contains(&congruence),
            "congruence out of range"
        );
        congruence
    }
}

impl Default for EmotionalState {
    fn default() -> Self {
        Self::neutral()
    }
}

fn clamp_component(value: f64) -> f64 {
    debug_assert!(
        value.is_finite(),
        "emotion component must be finite, got {value}"
    );
    if value.is_finite() {
        value.clamp(EMOTION_COMPONENT_MIN, EMOTION_COMPONENT_MAX)
    } else {
        EMOTION_COMPONENT_MIN
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn strongly_positive() -> EmotionalState {
        EmotionalState::new(0.9, 0.8, 0.2, 0.7, 0.1, 0.1, 0.1, 0.85)
    }

    fn strongly_negative() -> EmotionalState {
        EmotionalState::new(0.1, 0.1, 0.9, 0.2, 0.85, 0.7, 0.8, 0.1)
    }

    #[test]
    fn test_neutral_state() {
        let neutral = EmotionalState::neutral();
        assert_eq!(neutral.intensity(), 0.0);
        assert_eq!(neutral.valence(), 0.0);
        assert_eq!(neutral, EmotionalState::default());
    }

    #[test]
    fn test_components_clamped_on_construction() {
        let state = EmotionalState::new(1.5, -0.2, 0.5, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert_eq!(state.joy, 1.0);
        assert_eq!(state.trust, 0.0);
        assert_eq!(state.fear, 0.5);
    }

    #[test]
    fn test_intensity_bounded() {
        // All components maxed: raw norm is sqrt(8), clamped to 1.0
        let maxed = EmotionalState::from_array([1.0; EMOTION_DIMENSIONS_COUNT]);
        assert_eq!(maxed.intensity(), 1.0);

        let strong = strongly_positive();
        assert!(strong.intensity() > 0.6);
        assert!(strong.intensity() <= 1.0);
    }

    #[test]
    fn test_valence_sign() {
        assert!(strongly_positive().valence() > 0.0);
        assert!(strongly_negative().valence() < 0.0);
    }

    #[test]
    fn test_valence_bounds() {
        let all_positive = EmotionalState::new(1.0, 1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0);
        assert!((all_positive.valence() - 1.0).abs() < 1e-12);

        let all_negative = EmotionalState::new(0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 1.0, 0.0);
        assert!((all_negative.valence() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_blend_endpoints() {
        let a = strongly_positive();
        let b = strongly_negative();

        assert_eq!(a.blend(&b, 0.0), a);
        assert_eq!(a.blend(&b, 1.0), b);

        let mid = a.blend(&b, 0.5);
        assert!((mid.joy - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_blend_weighted_by_intensity() {
        let a = strongly_positive();
        let b = strongly_negative();

        // Dominant weight pulls the blend toward that state
        let blended = EmotionalState::blend_weighted(&[(a, 0.9), (b, 0.1)]);
        assert!(blended.joy > blended.fear);

        // Order of arrivals must not matter
        let reversed = EmotionalState::blend_weighted(&[(b, 0.1), (a, 0.9)]);
        assert_eq!(blended, reversed);
    }

    #[test]
    fn test_blend_weighted_zero_total() {
        let blended = EmotionalState::blend_weighted(&[(strongly_positive(), 0.0)]);
        assert_eq!(blended, EmotionalState::neutral());
        assert_eq!(EmotionalState::blend_weighted(&[]), EmotionalState::neutral());
    }

    #[test]
    fn test_congruence_self_is_one() {
        let state = strongly_positive();
        assert!((state.congruence(&state) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_congruence_neutral_is_zero() {
        let state = strongly_positive();
        assert_eq!(state.congruence(&EmotionalState::neutral()), 0.0);
        assert_eq!(EmotionalState::neutral().congruence(&state), 0.0);
    }

    #[test]
    fn test_congruence_opposed_states() {
        // Non-negative vectors: congruence stays in [0, 1], but opposed
        // profiles score well below matching ones.
        let positive = strongly_positive();
        let negative = strongly_negative();
        let similar = EmotionalState::new(0.8, 0.7, 0.3, 0.6, 0.2, 0.2, 0.2, 0.75);

        assert!(positive.congruence(&similar) > positive.congruence(&negative));
    }

    #[test]
    fn test_serde_round_trip() {
        let state = strongly_positive();
        let json = serde_json::to_string(&state).unwrap();
        let back: EmotionalState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
