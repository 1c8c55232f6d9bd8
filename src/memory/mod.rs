//! Memory tier: the capacity-bounded working set.

mod working;

pub use working::{
    WorkingMemoryBuffer, WorkingMemoryConfig, WorkingMemoryError, WorkingMemoryItem,
    WorkingMemoryStats,
};
