//! Browser host implementations.

pub mod memory;

pub use memory::{HistoryEntry, MemoryHost};
