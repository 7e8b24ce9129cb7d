use anyhow::Result;
use log::debug;

use super::connection::MemoryConnection;
use crate::backend::domain::errors::DomainError;
use crate::backend::domain::models::buyer::Buyer;
use crate::backend::storage::traits::BuyerStorage;

/// In-memory buyer repository.
#[derive(Clone)]
pub struct BuyerRepository {
    connection: MemoryConnection,
}

impl BuyerRepository {
    pub fn new(connection: MemoryConnection) -> Self {
        Self { connection }
    }
}

impl BuyerStorage for BuyerRepository {
    fn store_buyer(&self, buyer: &Buyer) -> Result<()> {
        debug!("Storing buyer: {}", buyer.id);
        self.connection.buyers().push(buyer.clone());
        Ok(())
    }

    fn get_buyer(&self, buyer_id: &str) -> Result<Option<Buyer>> {
        let buyers = self.connection.buyers();
        Ok(buyers.iter().find(|b| b.id == buyer_id).cloned())
    }

    fn list_buyers(&self) -> Result<Vec<Buyer>> {
        Ok(self.connection.buyers().clone())
    }

    fn update_buyer(&self, buyer: &Buyer) -> Result<()> {
        let mut buyers = self.connection.buyers();
        match buyers.iter().position(|b| b.id == buyer.id) {
            Some(index) => {
                buyers[index] = buyer.clone();
                Ok(())
            }
            None => Err(DomainError::NotFound(buyer.id.clone()).into()),
        }
    }

    fn delete_buyer(&self, buyer_id: &str) -> Result<bool> {
        let mut buyers = self.connection.buyers();
        let original_len = buyers.len();
        buyers.retain(|b| b.id != buyer_id);
        Ok(buyers.len() < original_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::buyer::BuyerStatus;
    use chrono::Utc;

    fn sample_buyer(id: &str) -> Buyer {
        let now = Utc::now();
        Buyer {
            id: id.to_string(),
            first_name: "Test".to_string(),
            last_name: "Buyer".to_string(),
            email: "test@example.com".to_string(),
            phone: None,
            budget: None,
            preferred_location: None,
            property_type: None,
            status: BuyerStatus::New,
            source: None,
            notes: None,
            created_at: now,
            updated_at: now,
            user_id: "user1".to_string(),
        }
    }

    #[test]
    fn test_store_and_get_buyer() {
        let repo = BuyerRepository::new(MemoryConnection::new());
        repo.store_buyer(&sample_buyer("b1")).unwrap();

        let found = repo.get_buyer("b1").unwrap();
        assert_eq!(found.unwrap().id, "b1");
        assert!(repo.get_buyer("missing").unwrap().is_none());
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let repo = BuyerRepository::new(MemoryConnection::new());
        repo.store_buyer(&sample_buyer("b1")).unwrap();
        repo.store_buyer(&sample_buyer("b2")).unwrap();
        repo.store_buyer(&sample_buyer("b3")).unwrap();

        let ids: Vec<String> = repo.list_buyers().unwrap().into_iter().map(|b| b.id).collect();
        assert_eq!(ids, vec!["b1", "b2", "b3"]);
    }

    #[test]
    fn test_list_returns_independent_snapshot() {
        let repo = BuyerRepository::new(MemoryConnection::new());
        repo.store_buyer(&sample_buyer("b1")).unwrap();

        let mut snapshot = repo.list_buyers().unwrap();
        snapshot.clear();

        assert_eq!(repo.list_buyers().unwrap().len(), 1);
    }

    #[test]
    fn test_update_replaces_record() {
        let repo = BuyerRepository::new(MemoryConnection::new());
        repo.store_buyer(&sample_buyer("b1")).unwrap();

        let mut changed = sample_buyer("b1");
        changed.first_name = "Renamed".to_string();
        repo.update_buyer(&changed).unwrap();

        assert_eq!(repo.get_buyer("b1").unwrap().unwrap().first_name, "Renamed");
    }

    #[test]
    fn test_update_missing_buyer_fails() {
        let repo = BuyerRepository::new(MemoryConnection::new());
        let err = repo.update_buyer(&sample_buyer("ghost")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_buyer() {
        let repo = BuyerRepository::new(MemoryConnection::new());
        repo.store_buyer(&sample_buyer("b1")).unwrap();

        assert!(repo.delete_buyer("b1").unwrap());
        assert!(!repo.delete_buyer("b1").unwrap());
        assert!(repo.list_buyers().unwrap().is_empty());
    }
}
