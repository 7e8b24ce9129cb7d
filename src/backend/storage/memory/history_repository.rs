use anyhow::Result;
use log::debug;

use super::connection::MemoryConnection;
use crate::backend::domain::models::history::HistoryEntry;
use crate::backend::storage::traits::HistoryStorage;

/// In-memory history repository.
#[derive(Clone)]
pub struct HistoryRepository {
    connection: MemoryConnection,
}

impl HistoryRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

impl HistoryStorage for HistoryRepository {
    fn store_entry(&self, entry: &HistoryEntry) -> Result<()> {
        debug!("Storing history entry {} for buyer {}", entry.id, entry.buyer_id);
        self.connection.history().push(entry.clone());
        Ok(())
    }

    fn list_entries(&self, buyer_id: &str) -> Result<Vec<HistoryEntry>> {
        let mut entries: Vec<HistoryEntry> = self
            .connection
            .history()
            .iter()
            .filter(|e| e.buyer_id == buyer_id)
            .cloned()
            .collect();
        // Stable sort, so same-timestamp entries keep insertion order.
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(entries)
    }

    fn delete_entries_for_buyer(&self, buyer_id: &str) -> Result<u32> {
        let mut history = self.connection.history();
        let original_len = history.len();
        history.retain(|e| e.buyer_id != buyer_id);
        Ok((original_len - history.len()) as u32)
    }
}
