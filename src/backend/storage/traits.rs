//! # Storage Traits
//!
//! Storage abstraction traits for the lead tracker. The domain layer talks
//! only to these traits, so the in-memory backend can be swapped for a
//! persistent one without touching the services.

use anyhow::Result;

use crate::backend::domain::models::buyer::Buyer;
use crate::backend::domain::models::history::HistoryEntry;

/// Trait defining the interface for buyer storage operations.
pub trait BuyerStorage: Send + Sync {
    /// Store a new buyer.
    fn store_buyer(&self, buyer: &Buyer) -> Result<()>;

    /// Retrieve a specific buyer by ID.
    fn get_buyer(&self, buyer_id: &str) -> Result<Option<Buyer>>;

    /// List all buyers in insertion order.
    ///
    /// Returns an independent snapshot; mutating the returned vector has no
    /// effect on the stored collection.
    fn list_buyers(&self) -> Result<Vec<Buyer>>;

    /// Replace an existing buyer. Fails if the buyer does not exist.
    fn update_buyer(&self, buyer: &Buyer) -> Result<()>;

    /// Delete a buyer by ID.
    /// Returns true if the buyer was found and deleted, false otherwise.
    fn delete_buyer(&self, buyer_id: &str) -> Result<bool>;
}

/// Trait defining the interface for history storage operations.
pub trait HistoryStorage: Send + Sync {
    /// Append a new history entry. Entries are never updated.
    fn store_entry(&self, entry: &HistoryEntry) -> Result<()>;

    /// List all entries for a buyer, ordered by creation time descending
    /// (most recent first). Ties keep insertion order.
    fn list_entries(&self, buyer_id: &str) -> Result<Vec<HistoryEntry>>;

    /// Remove every entry referencing the given buyer.
    /// Returns the number of entries removed.
    fn delete_entries_for_buyer(&self, buyer_id: &str) -> Result<u32>;
}
