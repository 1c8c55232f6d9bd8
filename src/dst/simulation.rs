//! Simulation - DST Test Harness
//!
//! `TigerStyle`: One seed controls the whole environment.
//!
//! The core is computation-only, so the environment is small: a shared
//! clock and a forkable RNG, both derived from the run's seed. Tests build
//! engines against `env.clock` and drive time explicitly.

use std::future::Future;

use super::clock::SimClock;
use super::config::SimConfig;
use super::rng::DeterministicRng;

/// Environment provided to simulation tests.
///
/// `TigerStyle`: All simulation resources in one place.
pub struct SimEnvironment {
    /// Simulation configuration
    pub config: SimConfig,
    /// Simulated clock
    pub clock: SimClock,
    /// Deterministic RNG
    pub rng: DeterministicRng,
}

impl SimEnvironment {
    /// Advance simulated time in milliseconds.
    pub fn advance_time_ms(&self, ms: u64) -> u64 {
        self.clock.advance_ms(ms)
    }

    /// Get current simulated time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }
}

/// DST simulation harness.
///
/// `TigerStyle`:
/// - Single seed controls all randomness
/// - Environment is provided to the test closure
///
/// # Example
///
/// ```
/// use affect_memory::dst::{SimConfig, Simulation};
///
/// # #[tokio::main]
/// # async fn main() {
/// let sim = Simulation::new(SimConfig::with_seed(42));
///
/// sim.run(|env| async move {
///     env.advance_time_ms(1000);
///     assert_eq!(env.now_ms(), 1000);
///     Ok::<(), std::convert::Infallible>(())
/// })
/// .await
/// .unwrap();
/// # }
/// ```
pub struct Simulation {
    config: SimConfig,
}

impl Simulation {
    /// Create a new simulation with the given configuration.
    #[must_use]
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }

    /// Run the simulation with the given test function.
    ///
    /// # Errors
    /// Returns any error from the test function.
    pub async fn run<F, Fut, E>(self, test_fn: F) -> Result<(), E>
    where
        F: FnOnce(SimEnvironment) -> Fut,
        Fut: Future<Output = Result<(), E>>,
    {
        let mut rng = DeterministicRng::new(self.config.seed());
        let clock = SimClock::new();

        let env = SimEnvironment {
            config: self.config,
            clock,
            rng: rng.fork(),
        };

        test_fn(env).await
    }
}
