//! Contagion Overlay - Decaying Per-Item Affect Record

use serde::Serialize;

use crate::affect::EmotionalState;

/// A decaying record of emotional influence received via propagation.
///
/// Exactly one overlay exists per decorated node; repeated propagation
/// merges in place (max intensity, intensity-weighted emotion blend,
/// minimum hop distance). Owned by the propagator's overlay table;
/// removed once residual intensity falls below the floor epsilon or the
/// record outlives its TTL.
#[derive(Debug, Clone, Serialize)]
pub struct ContagionOverlay {
    /// The node this overlay decorates
    pub episode_id: String,
    /// The node whose access seeded the strongest contribution
    pub source_episode_id: String,
    /// Blended propagated emotion
    pub emotion: EmotionalState,
    /// Residual intensity as of `updated_at_ms`
    pub intensity: f64,
    /// Minimum semantic distance (hops) from a propagation source
    pub hop_distance: u32,
    /// Creation timestamp (ms)
    pub created_at_ms: u64,
    /// Last update timestamp (ms)
    pub updated_at_ms: u64,
}

impl ContagionOverlay {
    /// Age of the overlay at `now_ms`, measured from creation.
    #[must_use]
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.created_at_ms)
    }

    /// Time since the overlay was last updated.
    #[must_use]
    pub fn since_update_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.updated_at_ms)
    }
}
