use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, TimeZone, Utc};
use log::info;

use crate::backend::domain::models::buyer::{Buyer, BuyerStatus, PropertyType};
use crate::backend::domain::models::history::{HistoryEntry, ACTION_CREATED_LEAD, ACTION_STATUS_CHANGED};

/// Shared handle over the in-memory collections.
///
/// Clones are cheap and all point at the same underlying data, mirroring how
/// a database connection handle would behave. The collections live for the
/// lifetime of the process and are discarded on exit.
#[derive(Clone)]
pub struct MemoryConnection {
    buyers: Arc<Mutex<Vec<Buyer>>>,
    history: Arc<Mutex<Vec<HistoryEntry>>>,
}

impl MemoryConnection {
    /// Create a connection over empty collections.
    pub fn new() -> Self {
        Self {
            buyers: Arc::new(Mutex::new(Vec::new())),
            history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a connection pre-populated with the demo data set: three buyer
    /// leads and their activity history, owned by `user1`.
    pub fn with_seed_data() -> Self {
        let connection = Self::new();
        {
            let mut buyers = connection.buyers();
            buyers.push(Buyer {
                id: "1".to_string(),
                first_name: "John".to_string(),
                last_name: "Smith".to_string(),
                email: "john.smith@email.com".to_string(),
                phone: Some("+1-555-0123".to_string()),
                budget: Some(450_000.0),
                preferred_location: Some("Downtown".to_string()),
                property_type: Some(PropertyType::Condo),
                status: BuyerStatus::Qualified,
                source: Some("Website".to_string()),
                notes: Some("Looking for 2-bedroom condo with parking".to_string()),
                created_at: seed_date(2024, 1, 15),
                updated_at: seed_date(2024, 1, 20),
                user_id: "user1".to_string(),
            });
            buyers.push(Buyer {
                id: "2".to_string(),
                first_name: "Sarah".to_string(),
                last_name: "Johnson".to_string(),
                email: "sarah.j@email.com".to_string(),
                phone: Some("+1-555-0456".to_string()),
                budget: Some(650_000.0),
                preferred_location: Some("Suburbs".to_string()),
                property_type: Some(PropertyType::House),
                status: BuyerStatus::Viewing,
                source: Some("Referral".to_string()),
                notes: Some("Family of 4, needs good schools nearby".to_string()),
                created_at: seed_date(2024, 1, 10),
                updated_at: seed_date(2024, 1, 22),
                user_id: "user1".to_string(),
            });
            buyers.push(Buyer {
                id: "3".to_string(),
                first_name: "Mike".to_string(),
                last_name: "Davis".to_string(),
                email: "mike.davis@email.com".to_string(),
                phone: Some("+1-555-0789".to_string()),
                budget: Some(300_000.0),
                preferred_location: Some("City Center".to_string()),
                property_type: Some(PropertyType::Apartment),
                status: BuyerStatus::New,
                source: Some("Social Media".to_string()),
                notes: Some("First-time buyer, flexible on location".to_string()),
                created_at: seed_date(2024, 1, 25),
                updated_at: seed_date(2024, 1, 25),
                user_id: "user1".to_string(),
            });
        }
        {
            let mut history = connection.history();
            history.push(HistoryEntry {
                id: "1".to_string(),
                buyer_id: "1".to_string(),
                action: ACTION_CREATED_LEAD.to_string(),
                details: Some("Initial contact from website form".to_string()),
                created_at: seed_date(2024, 1, 15),
                user_id: "user1".to_string(),
            });
            history.push(HistoryEntry {
                id: "2".to_string(),
                buyer_id: "1".to_string(),
                action: ACTION_STATUS_CHANGED.to_string(),
                details: Some("Changed from new to qualified after phone call".to_string()),
                created_at: seed_date(2024, 1, 20),
                user_id: "user1".to_string(),
            });
            history.push(HistoryEntry {
                id: "3".to_string(),
                buyer_id: "2".to_string(),
                action: ACTION_CREATED_LEAD.to_string(),
                details: Some("Referral from existing client".to_string()),
                created_at: seed_date(2024, 1, 10),
                user_id: "user1".to_string(),
            });
        }
        info!("Seeded in-memory store with demo leads");
        connection
    }

    pub(crate) fn buyers(&self) -> MutexGuard<'_, Vec<Buyer>> {
        // A poisoned lock only means another thread panicked mid-write;
        // the data itself is still usable for this single-writer store.
        self.buyers.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(crate) fn history(&self) -> MutexGuard<'_, Vec<HistoryEntry>> {
        self.history.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MemoryConnection {
    fn default() -> Self {
        Self::new()
    }
}

fn seed_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_connection_is_empty() {
        let connection = MemoryConnection::new();
        assert!(connection.buyers().is_empty());
        assert!(connection.history().is_empty());
    }

    #[test]
    fn test_seed_data_shape() {
        let connection = MemoryConnection::with_seed_data();
        assert_eq!(connection.buyers().len(), 3);
        assert_eq!(connection.history().len(), 3);

        let buyers = connection.buyers();
        assert_eq!(buyers[0].last_name, "Smith");
        assert_eq!(buyers[0].status, BuyerStatus::Qualified);
        assert_eq!(buyers[2].first_name, "Mike");
    }

    #[test]
    fn test_clones_share_state() {
        let connection = MemoryConnection::with_seed_data();
        let clone = connection.clone();
        connection.buyers().pop();
        assert_eq!(clone.buyers().len(), 2);
    }
}
