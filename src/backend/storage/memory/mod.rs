//! In-memory storage backend.
//!
//! All state lives in process memory and is reset on restart. The layout
//! mirrors what a persistent backend would look like: a cloneable connection
//! handle plus one repository per entity.

pub mod buyer_repository;
pub mod connection;
pub mod history_repository;

pub use buyer_repository::BuyerRepository;
pub use connection::MemoryConnection;
pub use history_repository::HistoryRepository;
