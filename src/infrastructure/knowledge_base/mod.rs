//! Vector index implementations and their on-disk snapshot

mod in_memory;
mod snapshot;

pub use in_memory::InMemoryVectorIndex;
pub use snapshot::IndexSnapshot;
