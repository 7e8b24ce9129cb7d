use anyhow::Result;
use chrono::Utc;
use log::{info, warn};

use crate::backend::domain::commands::buyers::{
    BuyerFiltersCommand, BuyerStatsResult, CreateBuyerCommand, CreateBuyerResult,
    DeleteBuyerCommand, DeleteBuyerResult, GetBuyerCommand, GetBuyerResult, ListBuyersResult,
    SearchBuyersCommand, UpdateBuyerCommand, UpdateBuyerResult,
};
use crate::backend::domain::commands::history::{
    AddHistoryCommand, ListHistoryCommand, ListHistoryResult,
};
use crate::backend::domain::errors::DomainError;
use crate::backend::domain::models::buyer::{is_valid_email, Buyer, BuyerStatus};
use crate::backend::domain::models::history::{
    HistoryEntry, ACTION_CREATED_LEAD, ACTION_STATUS_CHANGED,
};
use crate::backend::storage::memory::{BuyerRepository, HistoryRepository, MemoryConnection};
use crate::backend::storage::traits::{BuyerStorage, HistoryStorage};

/// Service for managing buyer leads and their activity history.
///
/// All mutations take an explicit `actor_id` identifying the signed-in user
/// on whose behalf the change is recorded.
#[derive(Clone)]
pub struct BuyerService {
    buyer_repository: BuyerRepository,
    history_repository: HistoryRepository,
}

impl BuyerService {
    /// Create a new BuyerService over the given connection.
    pub fn new(connection: MemoryConnection) -> Self {
        Self {
            buyer_repository: BuyerRepository::new(connection.clone()),
            history_repository: HistoryRepository::new(connection),
        }
    }

    /// List all buyer leads in insertion order.
    pub fn list_buyers(&self) -> Result<ListBuyersResult> {
        let buyers = self.buyer_repository.list_buyers()?;
        Ok(ListBuyersResult { buyers })
    }

    /// Get a buyer by ID.
    pub fn get_buyer(&self, command: GetBuyerCommand) -> Result<GetBuyerResult> {
        let buyer = self.buyer_repository.get_buyer(&command.buyer_id)?;
        if buyer.is_none() {
            warn!("Buyer not found: {}", command.buyer_id);
        }
        Ok(GetBuyerResult { buyer })
    }

    /// Create a new buyer lead and record a "Created lead" history entry.
    pub fn create_buyer(
        &self,
        command: CreateBuyerCommand,
        actor_id: &str,
    ) -> Result<CreateBuyerResult> {
        info!(
            "Creating buyer lead: {} {}",
            command.first_name, command.last_name
        );

        self.validate_create_command(&command)?;

        let now = Utc::now();
        let buyer = Buyer {
            id: Buyer::generate_id(),
            first_name: command.first_name,
            last_name: command.last_name,
            email: command.email,
            phone: command.phone,
            budget: command.budget,
            preferred_location: command.preferred_location,
            property_type: command.property_type,
            status: command.status.unwrap_or_default(),
            source: command.source,
            notes: command.notes,
            created_at: now,
            updated_at: now,
            user_id: actor_id.to_string(),
        };

        self.buyer_repository.store_buyer(&buyer)?;
        self.record_history(
            &buyer.id,
            ACTION_CREATED_LEAD,
            Some("New buyer lead created".to_string()),
            actor_id,
        )?;

        info!("Created buyer lead with ID: {}", buyer.id);

        Ok(CreateBuyerResult { buyer })
    }

    /// Apply a partial update to an existing buyer.
    ///
    /// A status change additionally records a "Status changed" history entry
    /// naming both the old and the new status.
    pub fn update_buyer(
        &self,
        command: UpdateBuyerCommand,
        actor_id: &str,
    ) -> Result<UpdateBuyerResult> {
        info!("Updating buyer lead: {}", command.buyer_id);

        let mut buyer = self
            .buyer_repository
            .get_buyer(&command.buyer_id)?
            .ok_or_else(|| DomainError::NotFound(command.buyer_id.clone()))?;

        self.validate_update_command(&command)?;

        let old_status = buyer.status;

        if let Some(first_name) = command.first_name {
            buyer.first_name = first_name;
        }
        if let Some(last_name) = command.last_name {
            buyer.last_name = last_name;
        }
        if let Some(email) = command.email {
            buyer.email = email;
        }
        if let Some(phone) = command.phone {
            buyer.phone = Some(phone);
        }
        if let Some(budget) = command.budget {
            buyer.budget = Some(budget);
        }
        if let Some(preferred_location) = command.preferred_location {
            buyer.preferred_location = Some(preferred_location);
        }
        if let Some(property_type) = command.property_type {
            buyer.property_type = Some(property_type);
        }
        if let Some(status) = command.status {
            buyer.status = status;
        }
        if let Some(source) = command.source {
            buyer.source = Some(source);
        }
        if let Some(notes) = command.notes {
            buyer.notes = Some(notes);
        }
        buyer.updated_at = Utc::now();

        self.buyer_repository.update_buyer(&buyer)?;

        if old_status != buyer.status {
            self.record_history(
                &buyer.id,
                ACTION_STATUS_CHANGED,
                Some(format!("Changed from {} to {}", old_status, buyer.status)),
                actor_id,
            )?;
        }

        info!("Updated buyer lead: {}", buyer.id);

        Ok(UpdateBuyerResult { buyer })
    }

    /// Delete a buyer and every history entry referencing it.
    /// Returns whether a record was actually removed.
    pub fn delete_buyer(&self, command: DeleteBuyerCommand) -> Result<DeleteBuyerResult> {
        info!("Deleting buyer lead: {}", command.buyer_id);

        let deleted = self.buyer_repository.delete_buyer(&command.buyer_id)?;
        if deleted {
            let removed = self
                .history_repository
                .delete_entries_for_buyer(&command.buyer_id)?;
            info!(
                "Deleted buyer lead {} and {} history entries",
                command.buyer_id, removed
            );
        } else {
            warn!("Delete requested for unknown buyer: {}", command.buyer_id);
        }

        Ok(DeleteBuyerResult { deleted })
    }

    /// Free-text search across buyer fields. A buyer matches if any field
    /// matches. Text fields compare case-insensitively; the phone number is
    /// compared verbatim.
    pub fn search_buyers(&self, command: SearchBuyersCommand) -> Result<ListBuyersResult> {
        let query = command.query;
        let lowercase_query = query.to_lowercase();

        let buyers = self
            .buyer_repository
            .list_buyers()?
            .into_iter()
            .filter(|buyer| {
                buyer.first_name.to_lowercase().contains(&lowercase_query)
                    || buyer.last_name.to_lowercase().contains(&lowercase_query)
                    || buyer.email.to_lowercase().contains(&lowercase_query)
                    || buyer
                        .phone
                        .as_deref()
                        .map_or(false, |phone| phone.contains(&query))
                    || buyer
                        .preferred_location
                        .as_deref()
                        .map_or(false, |l| l.to_lowercase().contains(&lowercase_query))
                    || buyer.property_type.map_or(false, |p| {
                        p.as_str().to_lowercase().contains(&lowercase_query)
                    })
                    || buyer
                        .source
                        .as_deref()
                        .map_or(false, |s| s.to_lowercase().contains(&lowercase_query))
            })
            .collect();

        Ok(ListBuyersResult { buyers })
    }

    /// Structured filtering. Every provided criterion must hold.
    pub fn filter_buyers(&self, command: BuyerFiltersCommand) -> Result<ListBuyersResult> {
        let buyers = self
            .buyer_repository
            .list_buyers()?
            .into_iter()
            .filter(|buyer| {
                if let Some(status) = command.status {
                    if buyer.status != status {
                        return false;
                    }
                }
                if let Some(property_type) = command.property_type {
                    if buyer.property_type != Some(property_type) {
                        return false;
                    }
                }
                if let Some(min_budget) = command.min_budget {
                    if buyer.budget.map_or(true, |b| b < min_budget) {
                        return false;
                    }
                }
                if let Some(max_budget) = command.max_budget {
                    if buyer.budget.map_or(true, |b| b > max_budget) {
                        return false;
                    }
                }
                if let Some(ref location) = command.location {
                    let wanted = location.to_lowercase();
                    if buyer
                        .preferred_location
                        .as_deref()
                        .map_or(true, |l| !l.to_lowercase().contains(&wanted))
                    {
                        return false;
                    }
                }
                if let Some(ref source) = command.source {
                    let wanted = source.to_lowercase();
                    if buyer
                        .source
                        .as_deref()
                        .map_or(true, |s| !s.to_lowercase().contains(&wanted))
                    {
                        return false;
                    }
                }
                true
            })
            .collect();

        Ok(ListBuyersResult { buyers })
    }

    /// Dashboard counts over the live collection.
    pub fn buyer_stats(&self) -> Result<BuyerStatsResult> {
        let buyers = self.buyer_repository.list_buyers()?;
        let count_status =
            |status: BuyerStatus| buyers.iter().filter(|b| b.status == status).count();

        Ok(BuyerStatsResult {
            total: buyers.len(),
            qualified: count_status(BuyerStatus::Qualified),
            viewing: count_status(BuyerStatus::Viewing),
            closed: count_status(BuyerStatus::Closed),
        })
    }

    /// List a buyer's history, most recent first.
    pub fn list_history(&self, command: ListHistoryCommand) -> Result<ListHistoryResult> {
        let entries = self.history_repository.list_entries(&command.buyer_id)?;
        Ok(ListHistoryResult { entries })
    }

    /// Manually record an activity against a buyer.
    ///
    /// Fire-and-forget: the buyer id is not checked for existence, so an
    /// entry recorded against a deleted lead is simply never listed.
    pub fn add_history(&self, command: AddHistoryCommand, actor_id: &str) -> Result<()> {
        self.record_history(
            &command.buyer_id,
            &command.action,
            command.details,
            actor_id,
        )
    }

    fn record_history(
        &self,
        buyer_id: &str,
        action: &str,
        details: Option<String>,
        actor_id: &str,
    ) -> Result<()> {
        let entry = HistoryEntry {
            id: HistoryEntry::generate_id(),
            buyer_id: buyer_id.to_string(),
            action: action.to_string(),
            details,
            created_at: Utc::now(),
            user_id: actor_id.to_string(),
        };
        self.history_repository.store_entry(&entry)
    }

    fn validate_create_command(&self, command: &CreateBuyerCommand) -> Result<()> {
        Self::validate_required_name(&command.first_name, "First name")?;
        Self::validate_required_name(&command.last_name, "Last name")?;
        Self::validate_email(&command.email)?;
        Self::validate_optional_fields(
            command.budget,
            command.preferred_location.as_deref(),
            command.source.as_deref(),
            command.notes.as_deref(),
        )
    }

    fn validate_update_command(&self, command: &UpdateBuyerCommand) -> Result<()> {
        if let Some(ref first_name) = command.first_name {
            Self::validate_required_name(first_name, "First name")?;
        }
        if let Some(ref last_name) = command.last_name {
            Self::validate_required_name(last_name, "Last name")?;
        }
        if let Some(ref email) = command.email {
            Self::validate_email(email)?;
        }
        Self::validate_optional_fields(
            command.budget,
            command.preferred_location.as_deref(),
            command.source.as_deref(),
            command.notes.as_deref(),
        )
    }

    fn validate_required_name(value: &str, label: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(DomainError::Validation(format!("{} is required", label)).into());
        }
        if value.len() > 50 {
            return Err(DomainError::Validation(format!("{} too long", label)).into());
        }
        Ok(())
    }

    fn validate_email(email: &str) -> Result<()> {
        if !is_valid_email(email) {
            return Err(DomainError::Validation("Invalid email address".to_string()).into());
        }
        Ok(())
    }

    fn validate_optional_fields(
        budget: Option<f64>,
        preferred_location: Option<&str>,
        source: Option<&str>,
        notes: Option<&str>,
    ) -> Result<()> {
        if let Some(budget) = budget {
            if budget <= 0.0 {
                return Err(
                    DomainError::Validation("Budget must be positive".to_string()).into(),
                );
            }
        }
        if preferred_location.map_or(false, |l| l.len() > 100) {
            return Err(DomainError::Validation("Location too long".to_string()).into());
        }
        if source.map_or(false, |s| s.len() > 50) {
            return Err(DomainError::Validation("Source too long".to_string()).into());
        }
        if notes.map_or(false, |n| n.len() > 1000) {
            return Err(DomainError::Validation("Notes too long".to_string()).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::buyer::PropertyType;

    const ACTOR: &str = "user1";

    fn setup_test() -> BuyerService {
        BuyerService::new(MemoryConnection::new())
    }

    fn setup_seeded() -> BuyerService {
        BuyerService::new(MemoryConnection::with_seed_data())
    }

    fn create_command(first: &str, last: &str, email: &str) -> CreateBuyerCommand {
        CreateBuyerCommand {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_buyer_defaults_and_history() {
        let service = setup_test();
        let result = service
            .create_buyer(create_command("Jane", "Doe", "jane@example.com"), ACTOR)
            .unwrap();

        assert_eq!(result.buyer.status, BuyerStatus::New);
        assert_eq!(result.buyer.user_id, ACTOR);
        assert_eq!(result.buyer.created_at, result.buyer.updated_at);

        let history = service
            .list_history(ListHistoryCommand {
                buyer_id: result.buyer.id.clone(),
            })
            .unwrap();
        assert_eq!(history.entries.len(), 1);
        assert_eq!(history.entries[0].action, ACTION_CREATED_LEAD);
        assert_eq!(
            history.entries[0].details.as_deref(),
            Some("New buyer lead created")
        );
    }

    #[test]
    fn test_create_buyer_ids_are_unique() {
        let service = setup_test();
        let mut ids = std::collections::HashSet::new();
        for i in 0..20 {
            let result = service
                .create_buyer(
                    create_command("Lead", "Test", &format!("lead{}@example.com", i)),
                    ACTOR,
                )
                .unwrap();
            assert!(ids.insert(result.buyer.id));
        }
    }

    #[test]
    fn test_create_buyer_keeps_explicit_status() {
        let service = setup_test();
        let mut command = create_command("Jane", "Doe", "jane@example.com");
        command.status = Some(BuyerStatus::Contacted);

        let result = service.create_buyer(command, ACTOR).unwrap();
        assert_eq!(result.buyer.status, BuyerStatus::Contacted);
    }

    #[test]
    fn test_create_buyer_validation() {
        let service = setup_test();

        let missing_name = create_command(" ", "Doe", "jane@example.com");
        assert!(service.create_buyer(missing_name, ACTOR).is_err());

        let long_name = create_command(&"a".repeat(51), "Doe", "jane@example.com");
        assert!(service.create_buyer(long_name, ACTOR).is_err());

        let bad_email = create_command("Jane", "Doe", "not-an-email");
        let err = service.create_buyer(bad_email, ACTOR).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::Validation(_))
        ));

        let mut negative_budget = create_command("Jane", "Doe", "jane@example.com");
        negative_budget.budget = Some(-100.0);
        assert!(service.create_buyer(negative_budget, ACTOR).is_err());
    }

    #[test]
    fn test_update_buyer_status_change_records_history() {
        let service = setup_test();
        let created = service
            .create_buyer(create_command("Jane", "Doe", "jane@example.com"), ACTOR)
            .unwrap();

        let updated = service
            .update_buyer(
                UpdateBuyerCommand {
                    buyer_id: created.buyer.id.clone(),
                    status: Some(BuyerStatus::Contacted),
                    ..Default::default()
                },
                ACTOR,
            )
            .unwrap();
        assert_eq!(updated.buyer.status, BuyerStatus::Contacted);

        let history = service
            .list_history(ListHistoryCommand {
                buyer_id: created.buyer.id.clone(),
            })
            .unwrap();
        assert_eq!(history.entries.len(), 2);

        let status_entry = history
            .entries
            .iter()
            .find(|e| e.action == ACTION_STATUS_CHANGED)
            .unwrap();
        let details = status_entry.details.as_deref().unwrap();
        assert!(details.contains("new"));
        assert!(details.contains("contacted"));
    }

    #[test]
    fn test_update_buyer_same_status_records_nothing() {
        let service = setup_test();
        let created = service
            .create_buyer(create_command("Jane", "Doe", "jane@example.com"), ACTOR)
            .unwrap();

        service
            .update_buyer(
                UpdateBuyerCommand {
                    buyer_id: created.buyer.id.clone(),
                    status: Some(BuyerStatus::New),
                    phone: Some("+1-555-9999".to_string()),
                    ..Default::default()
                },
                ACTOR,
            )
            .unwrap();

        let history = service
            .list_history(ListHistoryCommand {
                buyer_id: created.buyer.id.clone(),
            })
            .unwrap();
        assert_eq!(history.entries.len(), 1);
        assert_eq!(history.entries[0].action, ACTION_CREATED_LEAD);
    }

    #[test]
    fn test_update_merges_partial_fields() {
        let service = setup_test();
        let mut command = create_command("Jane", "Doe", "jane@example.com");
        command.phone = Some("+1-555-1111".to_string());
        let created = service.create_buyer(command, ACTOR).unwrap();

        let updated = service
            .update_buyer(
                UpdateBuyerCommand {
                    buyer_id: created.buyer.id.clone(),
                    budget: Some(500_000.0),
                    ..Default::default()
                },
                ACTOR,
            )
            .unwrap();

        assert_eq!(updated.buyer.budget, Some(500_000.0));
        assert_eq!(updated.buyer.phone.as_deref(), Some("+1-555-1111"));
        assert_eq!(updated.buyer.first_name, "Jane");
        assert!(updated.buyer.updated_at >= created.buyer.created_at);
    }

    #[test]
    fn test_update_nonexistent_buyer() {
        let service = setup_test();
        let err = service
            .update_buyer(
                UpdateBuyerCommand {
                    buyer_id: "ghost".to_string(),
                    status: Some(BuyerStatus::Lost),
                    ..Default::default()
                },
                ACTOR,
            )
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_buyer_cascades_history() {
        let service = setup_test();
        let created = service
            .create_buyer(create_command("Jane", "Doe", "jane@example.com"), ACTOR)
            .unwrap();
        service
            .add_history(
                AddHistoryCommand {
                    buyer_id: created.buyer.id.clone(),
                    action: "Phone call".to_string(),
                    details: None,
                },
                ACTOR,
            )
            .unwrap();

        let result = service
            .delete_buyer(DeleteBuyerCommand {
                buyer_id: created.buyer.id.clone(),
            })
            .unwrap();
        assert!(result.deleted);

        let history = service
            .list_history(ListHistoryCommand {
                buyer_id: created.buyer.id.clone(),
            })
            .unwrap();
        assert!(history.entries.is_empty());
        assert!(service
            .get_buyer(GetBuyerCommand {
                buyer_id: created.buyer.id,
            })
            .unwrap()
            .buyer
            .is_none());
    }

    #[test]
    fn test_delete_nonexistent_buyer_leaves_collections_unchanged() {
        let service = setup_seeded();
        let result = service
            .delete_buyer(DeleteBuyerCommand {
                buyer_id: "ghost".to_string(),
            })
            .unwrap();
        assert!(!result.deleted);
        assert_eq!(service.list_buyers().unwrap().buyers.len(), 3);
        assert_eq!(
            service
                .list_history(ListHistoryCommand {
                    buyer_id: "1".to_string(),
                })
                .unwrap()
                .entries
                .len(),
            2
        );
    }

    #[test]
    fn test_search_is_case_insensitive_for_names() {
        let service = setup_seeded();
        let result = service
            .search_buyers(SearchBuyersCommand {
                query: "SMITH".to_string(),
            })
            .unwrap();
        assert_eq!(result.buyers.len(), 1);
        assert_eq!(result.buyers[0].last_name, "Smith");
    }

    #[test]
    fn test_search_phone_is_verbatim() {
        let service = setup_seeded();

        // Digits match as a plain substring.
        let result = service
            .search_buyers(SearchBuyersCommand {
                query: "555-0123".to_string(),
            })
            .unwrap();
        assert_eq!(result.buyers.len(), 1);
        assert_eq!(result.buyers[0].first_name, "John");

        // The phone field is never case-folded, so a query that only differs
        // by case from another field still misses the phone.
        let mut command = CreateBuyerCommand {
            first_name: "Pat".to_string(),
            last_name: "Lee".to_string(),
            email: "pat.lee@example.com".to_string(),
            ..Default::default()
        };
        command.phone = Some("+1-555-EXT".to_string());
        service.create_buyer(command, ACTOR).unwrap();

        let miss = service
            .search_buyers(SearchBuyersCommand {
                query: "555-ext".to_string(),
            })
            .unwrap();
        assert!(miss.buyers.is_empty());

        let hit = service
            .search_buyers(SearchBuyersCommand {
                query: "555-EXT".to_string(),
            })
            .unwrap();
        assert_eq!(hit.buyers.len(), 1);
    }

    #[test]
    fn test_search_matches_location_and_source() {
        let service = setup_seeded();

        let by_location = service
            .search_buyers(SearchBuyersCommand {
                query: "downtown".to_string(),
            })
            .unwrap();
        assert_eq!(by_location.buyers.len(), 1);

        let by_source = service
            .search_buyers(SearchBuyersCommand {
                query: "referral".to_string(),
            })
            .unwrap();
        assert_eq!(by_source.buyers.len(), 1);
        assert_eq!(by_source.buyers[0].first_name, "Sarah");
    }

    #[test]
    fn test_filter_buyers_conjunction() {
        let service = setup_seeded();

        let by_status = service
            .filter_buyers(BuyerFiltersCommand {
                status: Some(BuyerStatus::Qualified),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_status.buyers.len(), 1);

        let by_budget = service
            .filter_buyers(BuyerFiltersCommand {
                min_budget: Some(400_000.0),
                max_budget: Some(700_000.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_budget.buyers.len(), 2);

        let no_match = service
            .filter_buyers(BuyerFiltersCommand {
                status: Some(BuyerStatus::Qualified),
                property_type: Some(PropertyType::House),
                ..Default::default()
            })
            .unwrap();
        assert!(no_match.buyers.is_empty());
    }

    #[test]
    fn test_buyer_stats() {
        let service = setup_seeded();
        let stats = service.buyer_stats().unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.qualified, 1);
        assert_eq!(stats.viewing, 1);
        assert_eq!(stats.closed, 0);
    }

    #[test]
    fn test_add_history_does_not_check_buyer_exists() {
        let service = setup_test();
        service
            .add_history(
                AddHistoryCommand {
                    buyer_id: "never-created".to_string(),
                    action: "Phone call".to_string(),
                    details: Some("Left voicemail".to_string()),
                },
                ACTOR,
            )
            .unwrap();

        let history = service
            .list_history(ListHistoryCommand {
                buyer_id: "never-created".to_string(),
            })
            .unwrap();
        assert_eq!(history.entries.len(), 1);
    }

    /// Seeded John Smith is qualified; closing him adds exactly one entry
    /// and it sorts to the front.
    #[test]
    fn test_qualified_to_closed_scenario() {
        let service = setup_seeded();
        let before = service
            .list_history(ListHistoryCommand {
                buyer_id: "1".to_string(),
            })
            .unwrap()
            .entries
            .len();

        service
            .update_buyer(
                UpdateBuyerCommand {
                    buyer_id: "1".to_string(),
                    status: Some(BuyerStatus::Closed),
                    ..Default::default()
                },
                ACTOR,
            )
            .unwrap();

        let history = service
            .list_history(ListHistoryCommand {
                buyer_id: "1".to_string(),
            })
            .unwrap();
        assert_eq!(history.entries.len(), before + 1);
        assert_eq!(history.entries[0].action, ACTION_STATUS_CHANGED);
        let details = history.entries[0].details.as_deref().unwrap();
        assert!(details.contains("qualified"));
        assert!(details.contains("closed"));
    }
}
