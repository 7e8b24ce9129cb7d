//! # Storage Module
//!
//! Owns all lead data held by the process. The domain layer reads and writes
//! exclusively through the traits defined here; the current backend keeps
//! everything in memory, seeded at startup and discarded on exit.

pub mod memory;
pub mod traits;

pub use memory::{BuyerRepository, HistoryRepository, MemoryConnection};
pub use traits::{BuyerStorage, HistoryStorage};
