//! DST - Deterministic Simulation Testing
//!
//! TigerBeetle/FoundationDB-style deterministic testing support.
//!
//! # Philosophy
//!
//! Every time-dependent behavior in this crate (recency decay, overlay
//! aging, TTL expiry) runs against a [`SimClock`] rather than the system
//! clock, so any failing scenario replays exactly. Randomness exists only
//! in the test harness, seeded through [`SimConfig`].
//!
//! Run with an explicit seed for reproducibility:
//! ```bash
//! DST_SEED=12345 cargo test
//! ```

mod clock;
mod config;
mod property;
mod rng;
mod simulation;

pub use clock::SimClock;
pub use config::SimConfig;
pub use property::{
    run_property_tests, PropertyTest, PropertyTestFailure, PropertyTestResult, PropertyTestable,
    TimeAdvanceConfig,
};
pub use rng::DeterministicRng;
pub use simulation::{SimEnvironment, Simulation};
