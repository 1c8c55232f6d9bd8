//! Engine Configuration
//!
//! `TigerStyle`: Sensible defaults, builder pattern, explicit over implicit.
//!
//! Aggregates the per-component configurations behind one surface so a host
//! can construct the whole engine from a single validated value.

use crate::attention::AttentionConfig;
use crate::contagion::ContagionConfig;
use crate::memory::WorkingMemoryConfig;
use crate::retrieval::RetrievalBiasConfig;

use super::EngineError;

/// Global configuration for the affect engine.
///
/// `TigerStyle`: All fields public for transparency; validated once when
/// the engine is constructed, immutable thereafter.
///
/// # Example
///
/// ```
/// use affect_memory::engine::EngineConfig;
/// use affect_memory::memory::WorkingMemoryConfig;
///
/// let config = EngineConfig::default()
///     .with_working_memory(WorkingMemoryConfig::default().with_capacity(16));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Working memory buffer configuration
    pub working_memory: WorkingMemoryConfig,
    /// Attention scorer configuration
    pub attention: AttentionConfig,
    /// Contagion propagator configuration
    pub contagion: ContagionConfig,
    /// Retrieval bias configuration
    pub bias: RetrievalBiasConfig,
}

impl EngineConfig {
    /// Create a config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the working memory configuration.
    #[must_use]
    pub fn with_working_memory(mut self, config: WorkingMemoryConfig) -> Self {
        self.working_memory = config;
        self
    }

    /// Set the attention configuration.
    #[must_use]
    pub fn with_attention(mut self, config: AttentionConfig) -> Self {
        self.attention = config;
        self
    }

    /// Set the contagion configuration.
    #[must_use]
    pub fn with_contagion(mut self, config: ContagionConfig) -> Self {
        self.contagion = config;
        self
    }

    /// Set the retrieval bias configuration.
    #[must_use]
    pub fn with_bias(mut self, config: RetrievalBiasConfig) -> Self {
        self.bias = config;
        self
    }

    /// Validate every component configuration.
    ///
    /// # Errors
    /// Returns the first component's `InvalidConfiguration` error.
    pub fn validate(&self) -> Result<(), EngineError> {
        self.working_memory.validate()?;
        self.attention.validate()?;
        self.contagion.validate()?;
        self.bias.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contagion::ContagionConfig;

    #[test]
    fn test_default_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_component_propagates() {
        let config =
            EngineConfig::default().with_contagion(ContagionConfig::default().with_max_hops(0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder_chaining() {
        let config = EngineConfig::new()
            .with_working_memory(WorkingMemoryConfig::default().with_capacity(3))
            .with_bias(RetrievalBiasConfig::default().with_boost_weight(0.5));

        assert_eq!(config.working_memory.capacity, 3);
        assert!((config.bias.boost_weight - 0.5).abs() < 1e-12);
    }
}
